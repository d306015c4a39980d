//! Request and response shapes. Field names on the wire are the camelCase
//! names the admin UI uses.

pub mod admin;
pub mod base;
pub mod enums;
pub mod front;

pub use base::{empty_str_as_none, PageParams, PageResult};
pub use enums::LoginClientEnum;

use crate::error::ApiError;

/// Rules a decoded request must satisfy before it reaches a service.
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

/// Mainland mobile number: `1`, then 3-9, then nine digits.
pub fn is_mobile(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 11
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
        && bytes.iter().all(u8::is_ascii_digit)
}
