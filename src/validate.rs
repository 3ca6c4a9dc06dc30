//! The validation pipeline.
//!
//! Validation runs a fixed, ordered list of [`Rule`]s over a card record and
//! a [`Policy`]. Each rule has a guard deciding whether it applies and a
//! check that appends at most one finding per field. Every applicable rule
//! runs; an early failure never hides a later one.
//!
//! | # | rule | field | key |
//! |---|------|-------|-----|
//! | 1 | number present | `number` | `blank` |
//! | 2 | name present | `name_on_card` | `blank` |
//! | 3 | expiration year present | `expiration_year` | `blank` |
//! | 4 | expiration month in 1..=12 | `expiration_month` | `inclusion` |
//! | 5 | verification value present (if required) | `verification_value` | `blank` |
//! | 6 | not expired | `expiration_year` | `expired` |
//! | 7 | not too far ahead | `expiration_year` | `exceeds_recent_future` |
//! | 8 | number fits provider format and checksum | `number` | `invalid_format` |
//! | 9 | provider supported (derivation off) | `provider_name` | `unsupported_provider` |
//! | 10-13 | switch/solo start date and issue number | `start_month`, `start_year`, `issue_number` | |
//!
//! # Example
//!
//! ```
//! use cardcheck::{CardData, CardValidator, Field, MessageKey, Policy};
//! use chrono::{TimeZone, Utc};
//!
//! let validator = CardValidator::new(Policy::default());
//! let now = Utc.with_ymd_and_hms(2010, 11, 1, 1, 0, 0).unwrap();
//!
//! let card = CardData::new()
//!     .number("4111111111111111")
//!     .name_on_card("John Smith")
//!     .expiration(10, 2010)
//!     .verification_value("123");
//!
//! let report = validator.validate_at(&card, now);
//! assert!(!report.is_valid());
//! assert_eq!(report.errors().get(Field::ExpirationYear), &[MessageKey::Expired]);
//! assert_eq!(report.provider_name(), "visa");
//! ```

use chrono::{DateTime, Utc};

use crate::card::CardData;
use crate::errors::{Errors, Field};
use crate::luhn;
use crate::message::MessageKey;
use crate::month_year::{MonthYearPair, RECENT_FUTURE_YEAR_LIMIT};
use crate::policy::Policy;
use crate::provider::{detect_provider, Provider};

/// Snapshot a validation run works on.
struct Context<'a> {
    card: &'a CardData,
    policy: &'a Policy,
    /// Provider name after derivation, lower-case.
    provider: &'a str,
    expiration: MonthYearPair,
    start: MonthYearPair,
    now: DateTime<Utc>,
}

impl Context<'_> {
    fn is_switch_or_solo(&self) -> bool {
        Provider::from_name(self.provider).is_some_and(|p| p.is_switch_or_solo())
    }
}

/// One step of the pipeline: a guard and a check.
pub struct Rule {
    name: &'static str,
    applies: fn(&Context<'_>) -> bool,
    check: fn(&Context<'_>, &mut Errors),
}

impl Rule {
    /// Short identifier of the rule, e.g. `"expiration_not_past"`.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn always(_: &Context<'_>) -> bool {
    true
}

fn require(errors: &mut Errors, present: bool, field: Field) {
    if !present {
        errors.add(field, MessageKey::Blank);
    }
}

/// Every rule, in evaluation order.
static RULES: &[Rule] = &[
    Rule {
        name: "number_present",
        applies: always,
        check: |ctx, errors| require(errors, !is_blank(ctx.card.card_number()), Field::Number),
    },
    Rule {
        name: "name_on_card_present",
        applies: always,
        check: |ctx, errors| require(errors, !is_blank(ctx.card.holder_name()), Field::NameOnCard),
    },
    Rule {
        name: "expiration_year_present",
        applies: always,
        check: |ctx, errors| {
            require(errors, ctx.card.expiration_year().is_some(), Field::ExpirationYear)
        },
    },
    Rule {
        name: "expiration_month_in_range",
        applies: always,
        check: |ctx, errors| {
            let in_range = ctx
                .card
                .expiration_month()
                .is_some_and(|month| (1..=12).contains(&month));
            if !in_range {
                errors.add(Field::ExpirationMonth, MessageKey::Inclusion);
            }
        },
    },
    Rule {
        name: "verification_value_present",
        applies: |ctx| ctx.policy.requires_verification_value(),
        check: |ctx, errors| {
            require(
                errors,
                !is_blank(ctx.card.verification_code()),
                Field::VerificationValue,
            )
        },
    },
    Rule {
        name: "expiration_not_past",
        applies: |ctx| ctx.expiration.is_valid(),
        check: |ctx, errors| {
            if ctx.expiration.end_of_month_is_past(ctx.now) {
                errors.add(Field::ExpirationYear, MessageKey::Expired);
            }
        },
    },
    Rule {
        name: "expiration_within_recent_future",
        applies: |ctx| ctx.expiration.is_valid(),
        check: |ctx, errors| {
            if ctx
                .expiration
                .exceeds_recent_future(ctx.now, RECENT_FUTURE_YEAR_LIMIT)
            {
                errors.add(Field::ExpirationYear, MessageKey::ExceedsRecentFuture);
            }
        },
    },
    Rule {
        name: "number_matches_provider",
        applies: |ctx| {
            (!is_blank(ctx.provider) || ctx.policy.derives_provider_name())
                && !is_blank(ctx.card.card_number())
        },
        check: |ctx, errors| {
            let number = ctx.card.card_number();
            let valid = Provider::from_name(ctx.provider)
                .is_some_and(|provider| provider.matches(number))
                && luhn::validate_str(number);
            if !valid {
                errors.add(Field::Number, MessageKey::InvalidFormat);
            }
        },
    },
    Rule {
        name: "provider_supported",
        applies: |ctx| !ctx.policy.derives_provider_name(),
        check: |ctx, errors| {
            if !ctx.policy.supports(ctx.provider) {
                errors.add(Field::ProviderName, MessageKey::UnsupportedProvider);
            }
        },
    },
    Rule {
        name: "start_month_present",
        applies: |ctx| ctx.is_switch_or_solo(),
        check: |ctx, errors| require(errors, ctx.card.start_month().is_some(), Field::StartMonth),
    },
    Rule {
        name: "start_year_present",
        applies: |ctx| ctx.is_switch_or_solo(),
        check: |ctx, errors| require(errors, ctx.card.start_year().is_some(), Field::StartYear),
    },
    Rule {
        name: "issue_number_format",
        applies: |ctx| ctx.is_switch_or_solo(),
        check: |ctx, errors| {
            let issue = ctx.card.issue();
            let valid = (1..=2).contains(&issue.len()) && issue.bytes().all(|b| b.is_ascii_digit());
            if !valid {
                errors.add(Field::IssueNumber, MessageKey::InvalidIssueNumber);
            }
        },
    },
    Rule {
        name: "start_not_future",
        applies: |ctx| ctx.is_switch_or_solo() && ctx.start.is_valid(),
        check: |ctx, errors| {
            if ctx.start.start_of_month_is_future(ctx.now) {
                errors.add(Field::StartYear, MessageKey::FuturisticStartDate);
            }
        },
    },
];

/// Outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    valid: bool,
    provider_name: String,
    errors: Errors,
}

impl Report {
    /// True when no rule reported anything.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The findings, keyed by field.
    #[inline]
    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// Consumes the report, returning the findings.
    #[inline]
    pub fn into_errors(self) -> Errors {
        self.errors
    }

    /// Provider name the rules ran with: the derived one when derivation is
    /// enabled and a pattern matched, otherwise the one on the card.
    #[inline]
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// The provider the rules ran with, if it is in the catalog.
    pub fn provider(&self) -> Option<Provider> {
        Provider::from_name(&self.provider_name)
    }
}

/// Validates card records against a [`Policy`].
///
/// The validator holds no state besides its policy, so one instance can be
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct CardValidator {
    policy: Policy,
}

impl Default for CardValidator {
    /// A validator using [`Policy::global`].
    fn default() -> Self {
        Self::new(Policy::global().clone())
    }
}

impl CardValidator {
    /// Creates a validator with the given policy.
    #[inline]
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// The policy in use.
    #[inline]
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Names of the pipeline rules, in evaluation order.
    pub fn rule_names() -> Vec<&'static str> {
        Self::rules().iter().map(Rule::name).collect()
    }

    /// The pipeline rules, in evaluation order.
    pub fn rules() -> &'static [Rule] {
        RULES
    }

    /// Validates `card` against the current time.
    pub fn validate(&self, card: &CardData) -> Report {
        self.validate_at(card, Utc::now())
    }

    /// Validates `card` as if the current time were `now`.
    ///
    /// The card is not modified. With derivation enabled, the derived
    /// provider is used for this run and returned in the report.
    pub fn validate_at(&self, card: &CardData, now: DateTime<Utc>) -> Report {
        let derived = if self.policy.derives_provider_name() {
            detect_provider(card.card_number())
        } else {
            None
        };
        let provider = derived.map_or(card.provider(), |p| p.name());

        let ctx = Context {
            card,
            policy: &self.policy,
            provider,
            expiration: card.expiration_date(),
            start: card.start_date(),
            now,
        };

        let mut errors = Errors::new();
        for rule in Self::rules() {
            if !(rule.applies)(&ctx) {
                continue;
            }
            let before = errors.len();
            (rule.check)(&ctx, &mut errors);
            if errors.len() > before {
                tracing::trace!(rule = rule.name, "rule reported a finding");
            }
        }

        tracing::debug!(
            provider,
            derived = derived.is_some(),
            findings = errors.len(),
            "validated card data"
        );

        Report {
            valid: errors.is_empty(),
            provider_name: provider.to_string(),
            errors,
        }
    }

    /// Derives the provider name on `card` (when enabled) and validates it.
    ///
    /// This is [`validate`](Self::validate) plus writing the derived
    /// provider back to the record.
    pub fn validate_and_derive(&self, card: &mut CardData) -> Report {
        self.validate_and_derive_at(card, Utc::now())
    }

    /// [`validate_and_derive`](Self::validate_and_derive) as if the current
    /// time were `now`.
    pub fn validate_and_derive_at(&self, card: &mut CardData, now: DateTime<Utc>) -> Report {
        if self.policy.derives_provider_name() {
            card.derive_provider_name();
        }
        self.validate_at(card, now)
    }
}

/// Validates `card` with the process-wide default policy.
///
/// ```
/// use cardcheck::{validate_card, CardData, Field};
///
/// let report = validate_card(&CardData::new());
/// assert!(report.errors().has(Field::Number));
/// assert!(report.errors().has(Field::NameOnCard));
/// ```
pub fn validate_card(card: &CardData) -> Report {
    CardValidator::default().validate(card)
}

/// Quick yes/no check with the process-wide default policy.
#[inline]
pub fn is_valid(card: &CardData) -> bool {
    validate_card(card).is_valid()
}
