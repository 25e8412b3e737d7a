//! Decode-time validation of a mapping.
//!
//! A [`Validator`] sees the freshly decoded mapping exactly once, when a
//! [`SearchParams`](crate::SearchParams) is built from a querystring. It may
//! hand back a different mapping (for instance with values normalized) or
//! refuse it.

use std::fmt::{self, Display};
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::value::Mapping;

/// Why a validator refused a mapping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Rejection {
    message: String,
}

impl Rejection {
    pub fn new(message: impl Display) -> Self {
        Rejection {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<crate::Error> for Rejection {
    fn from(err: crate::Error) -> Self {
        Rejection::new(err)
    }
}

/// Accepts, transforms, or rejects a decoded mapping.
///
/// Implemented for any `Fn(Mapping) -> Result<Mapping, Rejection>`:
///
/// ```
/// use structured_qs::{Mapping, Rejection, SearchParams};
///
/// let require_filters = |m: Mapping| {
///     if m.contains_key("filters") {
///         Ok(m)
///     } else {
///         Err(Rejection::new("missing filters"))
///     }
/// };
///
/// assert!(SearchParams::parse_with("filters_toyline=3", &require_filters).is_ok());
/// assert!(SearchParams::parse_with("page=3", &require_filters).is_err());
/// ```
pub trait Validator {
    fn validate(&self, mapping: Mapping) -> Result<Mapping, Rejection>;
}

impl<F> Validator for F
where
    F: Fn(Mapping) -> Result<Mapping, Rejection>,
{
    fn validate(&self, mapping: Mapping) -> Result<Mapping, Rejection> {
        self(mapping)
    }
}

/// Validates a mapping by round-tripping it through the Rust type `T`.
///
/// The mapping is deserialized into `T`, with string leaves parsed into
/// whatever primitive `T` asks for, then serialized back. Anything `T`
/// cannot represent is a rejection; anything it normalizes (`"03"` read as a
/// `u32`, say) comes back normalized.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use structured_qs::{Schema, SearchParams, Value};
///
/// #[derive(Deserialize, Serialize)]
/// struct Filters {
///     toyline: u32,
///     tags: Option<Vec<String>>,
/// }
///
/// #[derive(Deserialize, Serialize)]
/// struct Query {
///     filters: Filters,
/// }
///
/// let schema = Schema::<Query>::new();
/// let params = SearchParams::parse_with("?filters_toyline=03", &schema).unwrap();
/// assert_eq!(params.get("filters.toyline"), Some(&Value::from("3")));
///
/// assert!(SearchParams::parse_with("?filters_toyline=many", &schema).is_err());
/// ```
pub struct Schema<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> Schema<T> {
    pub fn new() -> Self {
        Schema {
            marker: PhantomData,
        }
    }
}

impl<T> Default for Schema<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> Copy for Schema<T> {}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Schema")
            .field(&std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Validator for Schema<T>
where
    T: DeserializeOwned + Serialize,
{
    fn validate(&self, mapping: Mapping) -> Result<Mapping, Rejection> {
        let typed: T = crate::de::from_mapping(mapping)?;
        Ok(crate::ser::to_mapping(&typed)?)
    }
}
