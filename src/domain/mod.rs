//! Domain value objects and types.
//!
//! Type-safe wrappers for person IDs and phone numbers. Constructors validate,
//! so an invalid value cannot be represented once it is past the boundary.

pub mod errors;
pub mod person_id;
pub mod phone;

pub use errors::{PhoneRejection, ValidationError};
pub use person_id::PersonId;
pub use phone::{check_phone_number, is_valid_phone_number, PhoneNumber};
