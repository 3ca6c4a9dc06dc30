//! # cardcheck
//!
//! Validation of payment card input: number, holder name, expiration,
//! verification code and provider (brand), plus switch/solo start dates and
//! issue numbers.
//!
//! ## Features
//!
//! - Provider detection from a fixed catalog of twelve number formats
//! - Luhn checksum verification
//! - Expiration checks (expired, too far in the future) and start-date checks
//! - Policy-driven rules: verification value requirement, supported
//!   providers, provider derivation
//! - Findings as stable message keys per field, rendered by a caller-supplied
//!   translator
//! - Card number masking for display
//!
//! ## Quick Start
//!
//! ```rust
//! use cardcheck::{CardData, CardValidator, Field, MessageKey, Policy};
//! use chrono::{TimeZone, Utc};
//!
//! let validator = CardValidator::new(Policy::default());
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
//!
//! let card = CardData::new()
//!     .number("4111111111111111")
//!     .name_on_card("John Smith")
//!     .expiration(1, 2099)
//!     .verification_value("123");
//!
//! // `validate` uses the current time; `validate_at` pins it.
//! let report = validator.validate_at(&card, now);
//! // 2099 is more than twenty years after 2025.
//! assert_eq!(
//!     report.errors().get(Field::ExpirationYear),
//!     &[MessageKey::ExceedsRecentFuture]
//! );
//! assert_eq!(report.provider_name(), "visa");
//!
//! // Safe for logging - never exposes the full number
//! assert_eq!(card.masked_number().as_deref(), Some("XXXXXXXXXXXX1111"));
//! ```
//!
//! ## Policies
//!
//! ```rust
//! use cardcheck::{CardData, CardValidator, Field, MessageKey, Policy};
//!
//! let policy = Policy::default()
//!     .auto_derive_provider_name(false)
//!     .with_supported_providers(["master"]);
//!
//! let card = CardData::new().number("4111111111111111").provider_name("visa");
//! let report = CardValidator::new(policy).validate(&card);
//! assert!(report.errors().contains(Field::ProviderName, MessageKey::UnsupportedProvider));
//! ```
//!
//! ## Rendering messages
//!
//! ```rust
//! use cardcheck::{CardData, CardValidator, DefaultTranslator, Message, Policy};
//!
//! let report = CardValidator::new(Policy::default()).validate(&CardData::new());
//! let english = report.errors().full_messages(&DefaultTranslator);
//! assert_eq!(english[0], "Number can't be blank");
//!
//! let french = |msg: &Message| match msg.key.as_str() {
//!     "blank" => Some("doit être rempli(e)".to_string()),
//!     _ => None,
//! };
//! assert_eq!(report.errors().full_messages(&french)[0], "Number doit être rempli(e)");
//! ```
//!
//! ## Supported Providers
//!
//! | Provider | Prefix | Length |
//! |----------|--------|--------|
//! | visa | 4 | 13, 16 |
//! | master | 51-55, 677189 | 16 |
//! | discover | 6011, 65 | 16 |
//! | american_express | 34, 37 | 15 |
//! | diners_club | 300-305, 36, 38 | 14 |
//! | jcb | 3528-3589 | 16 |
//! | switch | 6759 | 16, 18, 19 |
//! | solo | 6767 | 16, 18, 19 |
//! | dankort | 5019 | 16 |
//! | maestro | 50, 56-58, 6x | 12-19 |
//! | forbrugsforeningen | 600722 | 16 |
//! | laser | 6304, 6706, 6709, 6771 | 12, 16, 18, 19 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize reports, load policies and card records from JSON |
//! | `cli` | Command-line tool |
//!
//! ## Security
//!
//! - Card number and verification value are zeroed when a `CardData` is dropped
//! - `Debug` shows the masked number only
//! - Logging never includes the card number
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod error;
pub mod errors;
pub mod luhn;
pub mod mask;
pub mod message;
pub mod month_year;
pub mod policy;
pub mod provider;
pub mod validate;

// Re-export main types at crate root
pub use card::CardData;
pub use error::{PolicyError, ProviderError};
pub use errors::{Errors, Field};
pub use message::{message, DefaultTranslator, Message, MessageKey, Translator};
pub use month_year::{MonthYearPair, RECENT_FUTURE_YEAR_LIMIT};
pub use policy::{install_default, Policy};
pub use provider::{detect_provider, Provider};
pub use validate::{is_valid, validate_card, CardValidator, Report, Rule};
