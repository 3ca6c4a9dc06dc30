//! Luhn checksum ("modulus 10") for card numbers.
//!
//! Every second digit counting from the rightmost one is doubled, doubled
//! values of ten or more have nine subtracted, and the number is valid when
//! the total is a multiple of ten.

/// Doubled digit with nine subtracted when the result is >= 10.
/// Index is the digit (0-9).
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a sequence of digit values (0-9, not ASCII) with the Luhn algorithm.
///
/// An empty sequence is never valid.
///
/// # Panics
///
/// Panics if any value is greater than 9. Use [`validate_str`] for
/// untrusted input.
///
/// # Example
///
/// ```
/// use cardcheck::luhn::validate;
///
/// assert!(validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));
/// assert!(!validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2]));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Validates a card number string.
///
/// Only ASCII digits are accepted. Separators, letters or an empty string
/// make the number invalid; this never panics on malformed input.
///
/// ```
/// use cardcheck::luhn::validate_str;
///
/// assert!(validate_str("4111111111111111"));
/// assert!(!validate_str("4123456789012345"));
/// assert!(!validate_str("4111-1111-1111-1111"));
/// ```
pub fn validate_str(number: &str) -> bool {
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let digits: Vec<u8> = number.bytes().map(|b| b - b'0').collect();
    validate(&digits)
}

/// Computes the Luhn sum (not reduced modulo 10) for a sequence of digits.
///
/// # Panics
///
/// Panics if any value is greater than 9.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    // Rightmost digit is position 0 and is not doubled.
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &digit)| {
            if position % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Computes the check digit that makes `digits` followed by it pass validation.
///
/// # Panics
///
/// Panics if any value is greater than 9.
///
/// ```
/// use cardcheck::luhn::generate_check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Each existing digit moves one position left once the check digit is
    // appended, so the doubling parity flips.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &digit)| {
            if position % 2 == 0 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
