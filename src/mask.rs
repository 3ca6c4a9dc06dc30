//! Masking for card numbers shown in receipts, logs and debug output.
//!
//! Never more than the last four characters of a number are revealed.

/// Character used for hidden positions.
pub const MASK_CHAR: char = 'X';

/// Masks all but the last four characters of `number`.
///
/// Returns `None` when the number has fewer than four characters, since
/// there is nothing that can be safely shown.
///
/// # Example
///
/// ```
/// use cardcheck::mask::mask_number;
///
/// assert_eq!(mask_number("4111111111111111").as_deref(), Some("XXXXXXXXXXXX1111"));
/// assert_eq!(mask_number("411"), None);
/// assert_eq!(mask_number(""), None);
/// ```
pub fn mask_number(number: &str) -> Option<String> {
    let len = number.chars().count();
    if len < 4 {
        return None;
    }

    let mut masked = String::with_capacity(len);
    masked.extend(std::iter::repeat(MASK_CHAR).take(len - 4));
    masked.extend(number.chars().skip(len - 4));
    Some(masked)
}

/// The last four characters of `number`, or `None` if it is shorter than that.
pub fn last_four(number: &str) -> Option<String> {
    let len = number.chars().count();
    if len < 4 {
        return None;
    }
    Some(number.chars().skip(len - 4).collect())
}
