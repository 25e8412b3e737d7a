use std::fmt::Display;
use std::io;
use std::str;

use serde::{de, ser};

use crate::validate::Rejection;

/// Errors that can occur while converting querystrings and mappings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A message raised by a `Serialize` or `Deserialize` implementation.
    #[error("{0}")]
    Custom(String),

    /// The validator passed at construction refused the decoded mapping.
    #[error("querystring rejected: {0}")]
    Rejected(#[from] Rejection),

    /// A percent-decoded key or value was not valid UTF-8.
    #[error("invalid UTF-8 in querystring: {0}")]
    Utf8(#[from] str::Utf8Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    /// The data has a shape that cannot be represented as a nested mapping.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}

impl Error {
    pub(crate) fn custom<T: Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::custom(msg)
    }
}

impl ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::custom(msg)
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
