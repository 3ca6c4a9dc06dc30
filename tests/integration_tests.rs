//! Integration tests for cardcheck.
//!
//! These cover the full pipeline against a frozen clock, the provider
//! catalog, policies and message rendering.

use cardcheck::{
    luhn, CardData, CardValidator, DefaultTranslator, Errors, Field, Message, MessageKey,
    MonthYearPair, Policy, Provider,
};
use chrono::{DateTime, Datelike, TimeZone, Utc};

// =============================================================================
// FIXTURES
// =============================================================================

mod test_cards {
    pub const VISA: &str = "4111111111111111";
    pub const VISA_13: &str = "4222222222222";
    pub const MASTER: &str = "5555555555554444";
    pub const AMEX: &str = "378282246310005";
    pub const DISCOVER: &str = "6011111111111117";
    pub const DINERS: &str = "30569309025904";
    pub const JCB: &str = "3530111333300000";
    pub const SWITCH: &str = "675900000000000000";
    pub const SOLO: &str = "6767000000000000";
    pub const DANKORT: &str = "5019717010103742";
    pub const MAESTRO: &str = "6331101999990016";

    pub const BAD_CHECKSUM: &str = "4123456789012345";
}

fn frozen() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2010, 11, 1, 1, 0, 0).unwrap()
}

fn credit_card() -> CardData {
    CardData::new()
        .number(test_cards::VISA)
        .name_on_card("John Smith")
        .expiration(1, frozen().year() + 1)
        .verification_value("1434")
}

fn switch_card() -> CardData {
    credit_card()
        .number(test_cards::SWITCH)
        .provider_name("switch")
        .start(1, 1990)
        .issue_number("01")
}

fn run(policy: Policy, card: &CardData) -> Errors {
    CardValidator::new(policy)
        .validate_at(card, frozen())
        .into_errors()
}

fn run_default(card: &CardData) -> Errors {
    run(Policy::default(), card)
}

// =============================================================================
// BASELINE
// =============================================================================

#[test]
fn test_factory_cards_are_valid() {
    assert!(run_default(&credit_card()).is_empty());
    assert!(run_default(&switch_card()).is_empty());
}

#[test]
fn test_every_detectable_provider_validates() {
    for (number, provider) in [
        (test_cards::VISA, Provider::Visa),
        (test_cards::VISA_13, Provider::Visa),
        (test_cards::MASTER, Provider::Master),
        (test_cards::AMEX, Provider::AmericanExpress),
        (test_cards::DISCOVER, Provider::Discover),
        (test_cards::DINERS, Provider::DinersClub),
        (test_cards::JCB, Provider::Jcb),
        (test_cards::DANKORT, Provider::Dankort),
        (test_cards::MAESTRO, Provider::Maestro),
    ] {
        let report = CardValidator::new(Policy::default())
            .validate_at(&credit_card().number(number), frozen());
        assert!(report.is_valid(), "{} should be valid: {:?}", number, report.errors());
        assert_eq!(report.provider(), Some(provider), "{}", number);
    }
}

// =============================================================================
// PRESENCE AND RANGE
// =============================================================================

#[test]
fn test_presence_rules() {
    let mut card = credit_card().number("").name_on_card("");
    card.set_expiration_year(None);

    let errors = run_default(&card);
    assert_eq!(errors.get(Field::Number), &[MessageKey::Blank]);
    assert_eq!(errors.get(Field::NameOnCard), &[MessageKey::Blank]);
    assert_eq!(errors.get(Field::ExpirationYear), &[MessageKey::Blank]);
}

#[test]
fn test_expiration_month_inclusion() {
    for month in [0, 13] {
        let errors = run_default(&credit_card().expiration(month, 2011));
        assert_eq!(errors.get(Field::ExpirationMonth), &[MessageKey::Inclusion]);
    }

    let mut card = credit_card();
    card.set_expiration_month(None);
    assert_eq!(
        run_default(&card).get(Field::ExpirationMonth),
        &[MessageKey::Inclusion]
    );
}

// =============================================================================
// EXPIRATION
// =============================================================================

#[test]
fn test_expired_month_in_current_year() {
    let errors = run_default(&credit_card().expiration(10, 2010));
    assert_eq!(errors.get(Field::ExpirationYear), &[MessageKey::Expired]);
}

#[test]
fn test_current_month_is_not_expired() {
    assert!(run_default(&credit_card().expiration(11, 2010)).is_empty());
}

#[test]
fn test_expired_last_year() {
    let errors = run_default(&credit_card().expiration(1, frozen().year() - 1));
    assert_eq!(errors.get(Field::ExpirationYear), &[MessageKey::Expired]);
}

#[test]
fn test_exceeds_recent_future() {
    let errors = run_default(&credit_card().expiration(1, frozen().year() + 21));
    assert_eq!(
        errors.get(Field::ExpirationYear),
        &[MessageKey::ExceedsRecentFuture]
    );
}

#[test]
fn test_twenty_years_ahead_is_accepted() {
    // Horizon is 2030-11-01; October 2030 ends before it.
    assert!(run_default(&credit_card().expiration(10, 2030)).is_empty());
    // November 2030 ends after it.
    let errors = run_default(&credit_card().expiration(11, 2030));
    assert!(errors.contains(Field::ExpirationYear, MessageKey::ExceedsRecentFuture));
}

#[test]
fn test_invalid_pair_skips_temporal_rules() {
    let errors = run_default(&credit_card().expiration(49, 1000));
    assert!(!errors.has(Field::ExpirationYear));
    assert!(!MonthYearPair::new(49, 1000).is_valid());
}

// =============================================================================
// NUMBER AND PROVIDER
// =============================================================================

#[test]
fn test_number_checked_against_provider_format() {
    let errors = run_default(&credit_card().provider_name("visa").number("68293421"));
    assert_eq!(errors.get(Field::Number), &[MessageKey::InvalidFormat]);
}

#[test]
fn test_checksum_is_checked() {
    let errors = run_default(&credit_card().number(test_cards::BAD_CHECKSUM));
    assert_eq!(errors.get(Field::Number), &[MessageKey::InvalidFormat]);
    assert!(luhn::validate_str(test_cards::VISA));
    assert!(!luhn::validate_str(test_cards::BAD_CHECKSUM));
}

#[test]
fn test_explicit_provider_mismatch() {
    let policy = Policy::default().auto_derive_provider_name(false);
    let errors = run(policy, &credit_card().provider_name("american_express"));
    assert_eq!(errors.get(Field::Number), &[MessageKey::InvalidFormat]);
    assert!(!errors.has(Field::ProviderName));
}

#[test]
fn test_no_provider_and_no_derivation() {
    let policy = Policy::default().auto_derive_provider_name(false);
    let errors = run(policy, &credit_card());
    // Without a provider the format rule does not apply.
    assert!(!errors.has(Field::Number));
    assert_eq!(
        errors.get(Field::ProviderName),
        &[MessageKey::UnsupportedProvider]
    );
}

#[test]
fn test_derivation_skips_provider_check() {
    let mut card = credit_card().provider_name("").number(test_cards::AMEX);
    let report =
        CardValidator::new(Policy::default()).validate_and_derive_at(&mut card, frozen());
    assert!(report.is_valid(), "{:?}", report.errors());
    assert_eq!(report.provider(), Some(Provider::AmericanExpress));
    assert_eq!(card.provider(), "american_express");
}

#[test]
fn test_invalid_number_leaves_provider_alone() {
    let errors = run_default(&credit_card().number("fasdfas"));
    assert!(errors.has(Field::Number));
    assert!(!errors.has(Field::ProviderName));
}

#[test]
fn test_unsupported_provider() {
    let policy = Policy::default()
        .with_supported_providers(["master"])
        .auto_derive_provider_name(false);
    let errors = run(policy, &credit_card().provider_name("visa"));
    assert_eq!(
        errors.get(Field::ProviderName),
        &[MessageKey::UnsupportedProvider]
    );
}

#[test]
fn test_provider_membership_is_case_insensitive() {
    let policy = Policy::default()
        .with_supported_providers(["VISA"])
        .auto_derive_provider_name(false);
    assert!(run(policy, &credit_card().provider_name("Visa")).is_empty());
}

#[test]
fn test_supported_list_ignored_when_deriving() {
    let policy = Policy::default().with_supported_providers(["master"]);
    assert!(run(policy, &credit_card()).is_empty());
}

#[test]
fn test_narrowing_to_unknown_names() {
    let policy = Policy::default().with_supported_providers(["gaga", "ohlala"]);
    assert!(policy.supported_providers().is_empty());
}

#[test]
fn test_default_supported_list_is_the_catalog() {
    assert_eq!(
        Policy::default().supported_provider_names(),
        Provider::ALL.iter().map(|p| p.name()).collect::<Vec<_>>()
    );
}

// =============================================================================
// DERIVATION
// =============================================================================

#[test]
fn test_derive_provider_name() {
    for (number, expected) in [
        (test_cards::VISA, "visa"),
        (test_cards::MASTER, "master"),
        (test_cards::AMEX, "american_express"),
    ] {
        let mut card = credit_card().provider_name("").number(number);
        card.derive_provider_name();
        assert_eq!(card.provider(), expected);
    }
}

#[test]
fn test_derive_without_match() {
    let mut card = credit_card().provider_name("dankort").number("1234567890");
    assert_eq!(card.derive_provider_name(), None);
    assert_eq!(card.provider(), "dankort");
}

// =============================================================================
// VERIFICATION VALUE
// =============================================================================

#[test]
fn test_verification_value_required() {
    let policy = Policy::default().require_verification_value(true);
    let errors = run(policy, &credit_card().verification_value(""));
    assert_eq!(errors.get(Field::VerificationValue), &[MessageKey::Blank]);
}

#[test]
fn test_verification_value_optional() {
    let policy = Policy::default().require_verification_value(false);
    assert!(run(policy, &credit_card().verification_value("")).is_empty());
}

// =============================================================================
// SWITCH AND SOLO
// =============================================================================

#[test]
fn test_switch_requires_extra_fields() {
    let mut card = switch_card().issue_number("");
    card.set_start_month(None);
    card.set_start_year(None);

    let errors = run_default(&card);
    assert_eq!(errors.get(Field::StartMonth), &[MessageKey::Blank]);
    assert_eq!(errors.get(Field::StartYear), &[MessageKey::Blank]);
    assert_eq!(errors.get(Field::IssueNumber), &[MessageKey::InvalidIssueNumber]);
    assert_eq!(errors.len(), 3);
}

#[test]
fn test_switch_start_in_future() {
    let errors = run_default(&switch_card().start(1, frozen().year() + 1));
    assert_eq!(
        errors.get(Field::StartYear),
        &[MessageKey::FuturisticStartDate]
    );
}

#[test]
fn test_solo_uses_the_same_rules() {
    let mut card = switch_card().number(test_cards::SOLO).provider_name("solo");
    card.set_start_month(None);
    let errors = run_default(&card);
    assert_eq!(errors.get(Field::StartMonth), &[MessageKey::Blank]);
}

#[test]
fn test_switch_rules_follow_derived_provider() {
    // Derivation turns a mislabelled switch number into a switch card.
    let card = credit_card().number(test_cards::SWITCH).provider_name("visa");
    let errors = run_default(&card);
    assert!(errors.has(Field::StartMonth));
    assert!(errors.has(Field::IssueNumber));
}

// =============================================================================
// MASKING
// =============================================================================

#[test]
fn test_masked_number() {
    let card = credit_card();
    let masked = card.masked_number().unwrap();
    assert_eq!(masked, "XXXXXXXXXXXX1111");
    assert!(masked.ends_with(&test_cards::VISA[12..]));
    assert_eq!(credit_card().number("").masked_number(), None);
    assert_eq!(credit_card().number("123").masked_number(), None);
}

// =============================================================================
// IDEMPOTENCE AND RENDERING
// =============================================================================

#[test]
fn test_validation_is_idempotent() {
    let validator = CardValidator::new(Policy::default());
    let card = credit_card().expiration(10, 2010).number(test_cards::BAD_CHECKSUM);
    let first = validator.validate_at(&card, frozen());
    let second = validator.validate_at(&card, frozen());
    assert_eq!(first, second);
}

#[test]
fn test_full_messages_with_translator() {
    let errors = run_default(&credit_card().expiration(10, 2010).name_on_card(""));

    assert_eq!(
        errors.full_messages(&DefaultTranslator),
        vec!["Name on card can't be blank", "Expiration year is expired"]
    );

    let german = |msg: &Message| match msg.key {
        MessageKey::Expired => Some("ist abgelaufen".to_string()),
        _ => None,
    };
    assert_eq!(
        errors.full_messages(&german),
        vec!["Name on card can't be blank", "Expiration year ist abgelaufen"]
    );
}

#[test]
fn test_messages_carry_field_and_default() {
    let errors = run_default(&credit_card().number(test_cards::BAD_CHECKSUM));
    let messages = errors.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].key, MessageKey::InvalidFormat);
    assert_eq!(messages[0].field, Field::Number);
    assert_eq!(messages[0].default_text, "is not a valid card number");
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[cfg(feature = "serde")]
#[test]
fn test_report_to_json() {
    let report = CardValidator::new(Policy::default())
        .validate_at(&credit_card().expiration(10, 2010).name_on_card(""), frozen());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "valid": false,
            "provider_name": "visa",
            "errors": {
                "name_on_card": ["blank"],
                "expiration_year": ["expired"],
            },
        })
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_card_and_policy_from_json() {
    let card: CardData = serde_json::from_str(
        r#"{
            "number": "675900000000000000",
            "name_on_card": "John Smith",
            "expiration_month": 1,
            "expiration_year": 2011,
            "verification_value": "1434",
            "provider_name": "SWITCH",
            "start_month": 1,
            "start_year": 1990,
            "issue_number": "01"
        }"#,
    )
    .unwrap();
    assert_eq!(card.provider(), "switch");

    let policy = Policy::from_json(r#"{"auto_derive_provider_name": false}"#).unwrap();
    assert!(run(policy, &card).is_empty());
}
