use std::fmt;

/// Unified error type for the skip map.
///
/// Map operations never fail; absence is reported through `Option` or
/// `bool`. Only construction from explicit [`Options`](crate::Options)
/// can be rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration value is out of range.
    InvalidOptions(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidOptions(msg) => write!(f, "Invalid options: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
