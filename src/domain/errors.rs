//! Errors raised while building domain values from user or wire input.

use thiserror::Error;

/// The first phone-number rule a candidate broke.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneRejection {
    /// Not `<2-3 digits>-<5+ digits>`, or more than one separator.
    #[error("expected 2-3 digits, a dash and at least 5 digits")]
    Shape,

    #[error("every digit is zero")]
    AllZeros,

    #[error("a single digit repeated")]
    RepeatedDigit,

    /// The digits are a block of this many digits tiled over the number.
    #[error("a {0}-digit block repeated")]
    RepeatingBlock(usize),
}

/// Input refused before anything is sent to the directory.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ID cannot be empty")]
    EmptyId,

    /// Empty or whitespace-only name.
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Invalid phone number {number}: {reason}")]
    InvalidPhone {
        number: String,
        reason: PhoneRejection,
    },
}
