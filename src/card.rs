//! The card record being validated.
//!
//! [`CardData`] holds raw, unvalidated input as a user typed it. Every field
//! may be blank or malformed. Validation reports on that instead of
//! rejecting construction.

use std::fmt;
use zeroize::Zeroize;

use crate::mask;
use crate::month_year::MonthYearPair;
use crate::provider::{detect_provider, Provider};

/// Card input to validate.
///
/// # Security
///
/// - The number and verification value are zeroed when the record is dropped
/// - `Debug` output shows the masked number and hides the verification value
///
/// # Example
///
/// ```
/// use cardcheck::CardData;
///
/// let card = CardData::new()
///     .number("4111111111111111")
///     .name_on_card("John Smith")
///     .expiration(1, 2030)
///     .verification_value("123")
///     .provider_name("VISA");
///
/// assert_eq!(card.provider(), "visa");
/// assert_eq!(card.masked_number().as_deref(), Some("XXXXXXXXXXXX1111"));
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct CardData {
    #[cfg_attr(feature = "serde", serde(default))]
    number: String,
    #[cfg_attr(feature = "serde", serde(default))]
    name_on_card: String,
    #[cfg_attr(feature = "serde", serde(default))]
    expiration_month: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    expiration_year: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    verification_value: String,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "de::lowercase"))]
    provider_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    start_month: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    start_year: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    issue_number: String,
}

impl CardData {
    /// Creates an empty record.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the card number.
    #[must_use]
    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.set_number(number);
        self
    }

    /// Sets the cardholder name.
    #[must_use]
    pub fn name_on_card(mut self, name: impl Into<String>) -> Self {
        self.name_on_card = name.into();
        self
    }

    /// Sets the expiration month and year.
    #[must_use]
    pub fn expiration(mut self, month: i32, year: i32) -> Self {
        self.expiration_month = Some(month);
        self.expiration_year = Some(year);
        self
    }

    /// Sets the verification code.
    #[must_use]
    pub fn verification_value(mut self, value: impl Into<String>) -> Self {
        self.set_verification_value(value);
        self
    }

    /// Sets the provider name, lower-cased.
    #[must_use]
    pub fn provider_name(mut self, name: impl AsRef<str>) -> Self {
        self.set_provider_name(name);
        self
    }

    /// Sets the start month and year (switch and solo cards).
    #[must_use]
    pub fn start(mut self, month: i32, year: i32) -> Self {
        self.start_month = Some(month);
        self.start_year = Some(year);
        self
    }

    /// Sets the issue number (switch and solo cards).
    #[must_use]
    pub fn issue_number(mut self, issue: impl Into<String>) -> Self {
        self.issue_number = issue.into();
        self
    }

    /// Replaces the card number, zeroing the previous one.
    pub fn set_number(&mut self, number: impl Into<String>) {
        self.number.zeroize();
        self.number = number.into();
    }

    /// Replaces the cardholder name.
    pub fn set_name_on_card(&mut self, name: impl Into<String>) {
        self.name_on_card = name.into();
    }

    /// Sets or clears the expiration month.
    pub fn set_expiration_month(&mut self, month: Option<i32>) {
        self.expiration_month = month;
    }

    /// Sets or clears the expiration year.
    pub fn set_expiration_year(&mut self, year: Option<i32>) {
        self.expiration_year = year;
    }

    /// Replaces the verification code, zeroing the previous one.
    pub fn set_verification_value(&mut self, value: impl Into<String>) {
        self.verification_value.zeroize();
        self.verification_value = value.into();
    }

    /// Replaces the provider name. Always stored lower-case.
    pub fn set_provider_name(&mut self, name: impl AsRef<str>) {
        self.provider_name = name.as_ref().to_lowercase();
    }

    /// Sets or clears the start month.
    pub fn set_start_month(&mut self, month: Option<i32>) {
        self.start_month = month;
    }

    /// Sets or clears the start year.
    pub fn set_start_year(&mut self, year: Option<i32>) {
        self.start_year = year;
    }

    /// Replaces the issue number.
    pub fn set_issue_number(&mut self, issue: impl Into<String>) {
        self.issue_number = issue.into();
    }

    /// The raw card number.
    ///
    /// # Security Warning
    ///
    /// This is the full number. Use [`masked_number`](Self::masked_number)
    /// for anything that is displayed or logged.
    #[inline]
    pub fn card_number(&self) -> &str {
        &self.number
    }

    /// The cardholder name.
    #[inline]
    pub fn holder_name(&self) -> &str {
        &self.name_on_card
    }

    /// The expiration month, if given.
    #[inline]
    pub fn expiration_month(&self) -> Option<i32> {
        self.expiration_month
    }

    /// The expiration year, if given.
    #[inline]
    pub fn expiration_year(&self) -> Option<i32> {
        self.expiration_year
    }

    /// The raw verification code.
    #[inline]
    pub fn verification_code(&self) -> &str {
        &self.verification_value
    }

    /// The lower-case provider name; empty when unknown.
    #[inline]
    pub fn provider(&self) -> &str {
        &self.provider_name
    }

    /// The start month, if given.
    #[inline]
    pub fn start_month(&self) -> Option<i32> {
        self.start_month
    }

    /// The start year, if given.
    #[inline]
    pub fn start_year(&self) -> Option<i32> {
        self.start_year
    }

    /// The raw issue number.
    #[inline]
    pub fn issue(&self) -> &str {
        &self.issue_number
    }

    /// The expiration month and year as a pair.
    pub fn expiration_date(&self) -> MonthYearPair {
        MonthYearPair::from_parts(self.expiration_month, self.expiration_year)
    }

    /// The start month and year as a pair.
    pub fn start_date(&self) -> MonthYearPair {
        MonthYearPair::from_parts(self.start_month, self.start_year)
    }

    /// The number with everything but the last four characters replaced by `X`.
    ///
    /// `None` if the number has fewer than four characters.
    pub fn masked_number(&self) -> Option<String> {
        mask::mask_number(&self.number)
    }

    /// Whether the provider name is `switch` or `solo`.
    pub fn is_switch_or_solo(&self) -> bool {
        Provider::from_name(&self.provider_name).is_some_and(|p| p.is_switch_or_solo())
    }

    /// Sets the provider name from the number, first catalog match wins.
    ///
    /// Leaves the provider name untouched when no pattern matches, and
    /// returns the detected provider.
    pub fn derive_provider_name(&mut self) -> Option<Provider> {
        let detected = detect_provider(&self.number);
        if let Some(provider) = detected {
            self.set_provider_name(provider.name());
        }
        detected
    }
}

impl fmt::Debug for CardData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardData")
            .field("number", &self.masked_number())
            .field("name_on_card", &self.name_on_card)
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("verification_value", &"***")
            .field("provider_name", &self.provider_name)
            .field("start_month", &self.start_month)
            .field("start_year", &self.start_year)
            .field("issue_number", &self.issue_number)
            .finish()
    }
}

impl Drop for CardData {
    fn drop(&mut self) {
        self.number.zeroize();
        self.verification_value.zeroize();
    }
}

#[cfg(feature = "serde")]
mod de {
    use serde::{Deserialize, Deserializer};

    pub(super) fn lowercase<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(String::deserialize(deserializer)?.to_lowercase())
    }
}
