//! Message keys and their rendering.
//!
//! Validation only produces stable [`MessageKey`]s. Turning a key into text
//! is up to a caller-supplied [`Translator`]; when it has nothing to offer,
//! the built-in English default is used.

use std::fmt;

use crate::errors::Field;

/// Identifier of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MessageKey {
    /// A required value is missing or blank.
    Blank,
    /// A value is outside its allowed set.
    Inclusion,
    /// The expiration month has already ended.
    Expired,
    /// The expiration month is too far in the future.
    ExceedsRecentFuture,
    /// The number does not fit the provider's format or fails the checksum.
    InvalidFormat,
    /// The provider is not accepted by the policy.
    UnsupportedProvider,
    /// The issue number is not one or two digits.
    InvalidIssueNumber,
    /// The start month has not begun yet.
    FuturisticStartDate,
}

impl MessageKey {
    /// Every key, for building translation tables.
    pub const ALL: [MessageKey; 8] = [
        MessageKey::Blank,
        MessageKey::Inclusion,
        MessageKey::Expired,
        MessageKey::ExceedsRecentFuture,
        MessageKey::InvalidFormat,
        MessageKey::UnsupportedProvider,
        MessageKey::InvalidIssueNumber,
        MessageKey::FuturisticStartDate,
    ];

    /// The stable identifier, e.g. `"exceeds_recent_future"`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Inclusion => "inclusion",
            Self::Expired => "expired",
            Self::ExceedsRecentFuture => "exceeds_recent_future",
            Self::InvalidFormat => "invalid_format",
            Self::UnsupportedProvider => "unsupported_provider",
            Self::InvalidIssueNumber => "invalid_issue_number",
            Self::FuturisticStartDate => "futuristic_start_date",
        }
    }

    /// English fallback text.
    pub const fn default_text(&self) -> &'static str {
        match self {
            Self::Blank => "can't be blank",
            Self::Inclusion => "is not included in the list",
            Self::Expired => "is expired",
            Self::ExceedsRecentFuture => "is not a valid year",
            Self::InvalidFormat => "is not a valid card number",
            Self::UnsupportedProvider => "is not supported",
            Self::InvalidIssueNumber => "is not valid",
            Self::FuturisticStartDate => "is in the future",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A finding ready to be rendered: key, field and fallback text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Message {
    /// The message identifier.
    pub key: MessageKey,
    /// The field the finding is attached to.
    pub field: Field,
    /// English text used when no translation is available.
    pub default_text: &'static str,
}

/// Builds the message triple for `key` on `field`.
#[inline]
pub const fn message(key: MessageKey, field: Field) -> Message {
    Message {
        key,
        field,
        default_text: key.default_text(),
    }
}

/// Renders messages into display text.
///
/// Returning `None` falls back to [`Message::default_text`].
pub trait Translator {
    /// Translates a message, or returns `None` to use the default text.
    fn translate(&self, message: &Message) -> Option<String>;
}

/// A translator that always uses the default English text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn translate(&self, _message: &Message) -> Option<String> {
        None
    }
}

impl<F> Translator for F
where
    F: Fn(&Message) -> Option<String>,
{
    fn translate(&self, message: &Message) -> Option<String> {
        self(message)
    }
}

/// Renders `message` with `translator`, falling back to the default text.
pub fn render(message: &Message, translator: &dyn Translator) -> String {
    translator
        .translate(message)
        .unwrap_or_else(|| message.default_text.to_string())
}
