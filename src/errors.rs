//! The error collection: validation findings keyed by field.
//!
//! Each field maps to the message keys added for it, in the order the rules
//! added them. Fields themselves keep the order in which they first received
//! a finding. An empty collection means the card data is valid.

use std::fmt;

use crate::message::{message, render, Message, MessageKey, Translator};

/// A field of a card record that findings can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Field {
    /// The card number.
    Number,
    /// The cardholder name.
    NameOnCard,
    /// Expiration month (1-12).
    ExpirationMonth,
    /// Expiration year.
    ExpirationYear,
    /// Card verification code.
    VerificationValue,
    /// Provider (brand) name.
    ProviderName,
    /// Start month, switch and solo only.
    StartMonth,
    /// Start year, switch and solo only.
    StartYear,
    /// Issue number, switch and solo only.
    IssueNumber,
}

impl Field {
    /// The symbolic key, e.g. `"expiration_year"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::NameOnCard => "name_on_card",
            Self::ExpirationMonth => "expiration_month",
            Self::ExpirationYear => "expiration_year",
            Self::VerificationValue => "verification_value",
            Self::ProviderName => "provider_name",
            Self::StartMonth => "start_month",
            Self::StartYear => "start_year",
            Self::IssueNumber => "issue_number",
        }
    }

    /// Label used as the prefix of full messages, e.g. `"Expiration year"`.
    pub const fn human_name(&self) -> &'static str {
        match self {
            Self::Number => "Number",
            Self::NameOnCard => "Name on card",
            Self::ExpirationMonth => "Expiration month",
            Self::ExpirationYear => "Expiration year",
            Self::VerificationValue => "Verification value",
            Self::ProviderName => "Provider name",
            Self::StartMonth => "Start month",
            Self::StartYear => "Start year",
            Self::IssueNumber => "Issue number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered mapping from field to the message keys reported for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    entries: Vec<(Field, Vec<MessageKey>)>,
}

impl Errors {
    /// Creates an empty collection.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key` to the findings for `field`.
    pub fn add(&mut self, field: Field, key: MessageKey) {
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, keys)) => keys.push(key),
            None => self.entries.push((field, vec![key])),
        }
    }

    /// Findings for `field`, in the order they were added. Empty if none.
    pub fn get(&self, field: Field) -> &[MessageKey] {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, keys)| keys.as_slice())
            .unwrap_or(&[])
    }

    /// True if `field` has at least one finding.
    pub fn has(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    /// True if `field` has the finding `key`.
    pub fn contains(&self, field: Field, key: MessageKey) -> bool {
        self.get(field).contains(&key)
    }

    /// True when nothing was reported.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of findings across all fields.
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, keys)| keys.len()).sum()
    }

    /// Fields with findings, in first-reported order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.entries.iter().map(|(field, _)| *field)
    }

    /// Every `(field, key)` pair in order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, MessageKey)> + '_ {
        self.entries
            .iter()
            .flat_map(|(field, keys)| keys.iter().map(move |key| (*field, *key)))
    }

    /// Every finding as a renderable [`Message`].
    pub fn messages(&self) -> Vec<Message> {
        self.iter().map(|(field, key)| message(key, field)).collect()
    }

    /// Rendered messages prefixed with the field label, e.g.
    /// `"Expiration year is expired"`.
    pub fn full_messages(&self, translator: &dyn Translator) -> Vec<String> {
        self.messages()
            .iter()
            .map(|msg| format!("{} {}", msg.field.human_name(), render(msg, translator)))
            .collect()
    }

    /// Removes every finding.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Errors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, keys) in &self.entries {
            map.serialize_entry(field, keys)?;
        }
        map.end()
    }
}
