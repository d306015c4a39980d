use std::fmt::Display;

use thiserror::Error;

/// A handler produced something that has no JSON representation.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("map key must be a string, got {0}")]
    KeyMustBeString(&'static str),

    #[error("non-finite float {0} cannot be represented in JSON")]
    NonFiniteFloat(f64),

    #[error("integer {0} is out of JSON range")]
    NumberOutOfRange(String),

    #[error("invalid datetime format: {0}")]
    InvalidFormat(String),

    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for NormalizeError {
    fn custom<T: Display>(msg: T) -> Self {
        NormalizeError::Custom(msg.to_string())
    }
}
