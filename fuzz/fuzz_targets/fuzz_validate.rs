//! Fuzz target for the validation pipeline.
//!
//! Builds arbitrary card records and policies and checks that validation
//! never panics and is deterministic.

#![no_main]

use arbitrary::Arbitrary;
use cardcheck::{CardData, CardValidator, Policy};
use chrono::{DateTime, Utc};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    number: String,
    name_on_card: String,
    expiration_month: Option<i32>,
    expiration_year: Option<i32>,
    verification_value: String,
    provider_name: String,
    start_month: Option<i32>,
    start_year: Option<i32>,
    issue_number: String,
    require_verification_value: bool,
    auto_derive_provider_name: bool,
    supported_providers: Vec<String>,
    now: i64,
}

fuzz_target!(|input: Input| {
    let Some(now) = DateTime::<Utc>::from_timestamp(input.now, 0) else {
        return;
    };

    let mut card = CardData::new()
        .number(input.number)
        .name_on_card(input.name_on_card)
        .verification_value(input.verification_value)
        .provider_name(input.provider_name)
        .issue_number(input.issue_number);
    card.set_expiration_month(input.expiration_month);
    card.set_expiration_year(input.expiration_year);
    card.set_start_month(input.start_month);
    card.set_start_year(input.start_year);

    let policy = Policy::default()
        .require_verification_value(input.require_verification_value)
        .auto_derive_provider_name(input.auto_derive_provider_name)
        .with_supported_providers(&input.supported_providers);
    let validator = CardValidator::new(policy);

    let first = validator.validate_at(&card, now);
    let second = validator.validate_at(&card, now);
    assert_eq!(first, second, "validation must be deterministic");
    assert_eq!(first.is_valid(), first.errors().is_empty());

    let _ = card.masked_number();
    let _ = format!("{:?}", card);
    let _ = card.derive_provider_name();
});
