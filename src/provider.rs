//! Card providers (brands) and the reference catalog of number formats.
//!
//! The catalog is a fixed, ordered list of twelve providers. Each one owns a
//! full-string pattern over ASCII digits. Order only matters for detection:
//! [`detect_provider`] returns the first provider whose pattern matches, so
//! numbers that fit several formats (for example a switch number, which is
//! also a valid maestro number) resolve to the earlier entry.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::ProviderError;

/// A card provider known to the reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Provider {
    /// Visa - prefix 4, 13 or 16 digits
    Visa,
    /// Mastercard - prefix 51-55 or 677189, 16 digits
    Master,
    /// Discover - prefix 6011 or 65, 16 digits
    Discover,
    /// American Express - prefix 34 or 37, 15 digits
    AmericanExpress,
    /// Diners Club - prefix 300-305, 36 or 38, 14 digits
    DinersClub,
    /// JCB - prefix 3528-3589, 16 digits
    Jcb,
    /// Switch - prefix 6759, 16, 18 or 19 digits
    Switch,
    /// Solo - prefix 6767, 16, 18 or 19 digits
    Solo,
    /// Dankort - prefix 5019, 16 digits
    Dankort,
    /// Maestro - prefix 50, 56-58 or 6x, 12-19 digits
    Maestro,
    /// Forbrugsforeningen - prefix 600722, 16 digits
    Forbrugsforeningen,
    /// Laser - prefix 6304, 6706, 6709 or 6771, 12, 16, 18 or 19 digits
    Laser,
}

impl Provider {
    /// Every provider in catalog order.
    pub const ALL: [Provider; 12] = [
        Provider::Visa,
        Provider::Master,
        Provider::Discover,
        Provider::AmericanExpress,
        Provider::DinersClub,
        Provider::Jcb,
        Provider::Switch,
        Provider::Solo,
        Provider::Dankort,
        Provider::Maestro,
        Provider::Forbrugsforeningen,
        Provider::Laser,
    ];

    /// The lower-case catalog name, e.g. `"american_express"`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Master => "master",
            Self::Discover => "discover",
            Self::AmericanExpress => "american_express",
            Self::DinersClub => "diners_club",
            Self::Jcb => "jcb",
            Self::Switch => "switch",
            Self::Solo => "solo",
            Self::Dankort => "dankort",
            Self::Maestro => "maestro",
            Self::Forbrugsforeningen => "forbrugsforeningen",
            Self::Laser => "laser",
        }
    }

    /// The number format for this provider, as regular expression source.
    #[inline]
    pub const fn pattern(&self) -> &'static str {
        match self {
            Self::Visa => r"^4\d{12}(\d{3})?$",
            Self::Master => r"^(5[1-5]\d{4}|677189)\d{10}$",
            Self::Discover => r"^(6011|65\d{2})\d{12}$",
            Self::AmericanExpress => r"^3[47]\d{13}$",
            Self::DinersClub => r"^3(0[0-5]|[68]\d)\d{11}$",
            Self::Jcb => r"^35(28|29|[3-8]\d)\d{12}$",
            Self::Switch => r"^6759\d{12}(\d{2,3})?$",
            Self::Solo => r"^6767\d{12}(\d{2,3})?$",
            Self::Dankort => r"^5019\d{12}$",
            Self::Maestro => r"^(5[06-8]|6\d)\d{10,17}$",
            Self::Forbrugsforeningen => r"^600722\d{10}$",
            Self::Laser => r"^(6304|6706|6771|6709)\d{8}(\d{4}|\d{6,7})?$",
        }
    }

    /// Returns true if `number` has this provider's format.
    ///
    /// Only ASCII digits can match; anything else is simply a non-match.
    pub fn matches(&self, number: &str) -> bool {
        number.is_ascii() && compiled()[*self as usize].is_match(number)
    }

    /// Looks up a provider by catalog name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Provider> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|provider| provider.name().eq_ignore_ascii_case(name))
    }

    /// Switch and solo cards carry a start date and an issue number.
    #[inline]
    pub const fn is_switch_or_solo(&self) -> bool {
        matches!(self, Self::Switch | Self::Solo)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ProviderError::Unknown(s.to_string()))
    }
}

/// Compiled catalog patterns, indexed by `Provider as usize`.
fn compiled() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        Provider::ALL
            .iter()
            .map(|provider| {
                // Patterns are compile-time constants covered by tests.
                Regex::new(provider.pattern()).expect("catalog pattern is a valid regex")
            })
            .collect()
    })
}

/// Detects the provider of a card number.
///
/// Scans the catalog in order and returns the first provider whose pattern
/// matches. Returns `None` when nothing matches.
///
/// # Example
///
/// ```
/// use cardcheck::provider::{detect_provider, Provider};
///
/// assert_eq!(detect_provider("378282246310005"), Some(Provider::AmericanExpress));
/// assert_eq!(detect_provider("5555555555554444"), Some(Provider::Master));
/// assert_eq!(detect_provider("1234"), None);
/// ```
pub fn detect_provider(number: &str) -> Option<Provider> {
    Provider::ALL
        .into_iter()
        .find(|provider| provider.matches(number))
}

/// Names of every catalog provider, in catalog order.
pub fn catalog_names() -> Vec<&'static str> {
    Provider::ALL.iter().map(Provider::name).collect()
}
