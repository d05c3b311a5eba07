//! PhoneNumber value object and the format check behind it.

use super::errors::{PhoneRejection, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Separator between the area code and the subscriber part.
pub const SEPARATOR: char = '-';

/// Cycle lengths checked by the repeated-pattern rule. Longer periods pass.
const REJECTED_CYCLE_LENGTHS: [usize; 2] = [2, 3];

static SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2,3}-[0-9]{5,}$").expect("phone shape pattern is valid")
});

/// Decide whether `candidate` is an acceptable phone number.
///
/// A number is `<area>-<subscriber>` with a 2-3 digit area and a subscriber
/// of at least 5 digits. On top of the shape, degenerate digit sequences are
/// refused: all zeros, a single repeated digit, and sequences that are a
/// 2- or 3-digit block tiled over the whole length.
///
/// ```
/// use phonebook_mcp_server::domain::is_valid_phone_number;
///
/// assert!(is_valid_phone_number("040-1234567"));
/// assert!(!is_valid_phone_number("12-12121"));
/// ```
pub fn is_valid_phone_number(candidate: &str) -> bool {
    check_phone_number(candidate).is_ok()
}

/// Like [`is_valid_phone_number`], but reports the first rule broken.
pub fn check_phone_number(candidate: &str) -> Result<(), PhoneRejection> {
    if !SHAPE.is_match(candidate) || candidate.matches(SEPARATOR).count() != 1 {
        return Err(PhoneRejection::Shape);
    }

    let digits = concatenated_digits(candidate);

    if digits.bytes().all(|b| b == b'0') {
        return Err(PhoneRejection::AllZeros);
    }

    if is_single_repeated_digit(&digits) {
        return Err(PhoneRejection::RepeatedDigit);
    }

    match REJECTED_CYCLE_LENGTHS
        .iter()
        .find(|&&len| tiles_with_prefix(&digits, len))
    {
        Some(&len) => Err(PhoneRejection::RepeatingBlock(len)),
        None => Ok(()),
    }
}

/// Area and subscriber digits joined, separator removed.
fn concatenated_digits(number: &str) -> String {
    number.chars().filter(|&c| c != SEPARATOR).collect()
}

fn is_single_repeated_digit(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    match bytes.first() {
        Some(&first) => bytes.iter().all(|&b| b == first),
        None => false,
    }
}

/// True if repeating the first `len` digits reproduces `digits` exactly.
fn tiles_with_prefix(digits: &str, len: usize) -> bool {
    let pattern = &digits[..len.min(digits.len())];
    if pattern.is_empty() {
        return false;
    }

    let repeats = digits.len().div_ceil(pattern.len());
    let tiled = pattern.repeat(repeats);
    tiled[..digits.len()] == *digits
}

/// A phone number that passed [`is_valid_phone_number`].
///
/// # Example
///
/// ```
/// use phonebook_mcp_server::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("09-1234556").unwrap();
/// assert_eq!(phone.as_str(), "09-1234556");
/// assert_eq!(phone.digits(), "091234556");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating the format.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the number is rejected.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let number = phone.into();

        match check_phone_number(&number) {
            Ok(()) => Ok(Self(number)),
            Err(reason) => Err(ValidationError::InvalidPhone { number, reason }),
        }
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Area code digits (before the separator).
    pub fn area_code(&self) -> &str {
        self.0.split(SEPARATOR).next().unwrap_or_default()
    }

    /// Area and subscriber digits with the separator removed.
    pub fn digits(&self) -> String {
        concatenated_digits(&self.0)
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
