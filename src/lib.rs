//! Structured querystrings with flat, readable keys.
//!
//! This crate stores nested search parameters in a URL querystring without
//! any brackets. Nesting levels are joined with `_` and arrays are joined
//! with `|`:
//!
//! ```text
//! ?filters_toyline=355&filters_tags=Walmart|Dollar%20Store
//! ```
//!
//! decodes to
//!
//! ```text
//! { filters: { toyline: "355", tags: ["Walmart", "Dollar Store"] } }
//! ```
//!
//! Every leaf is a string or an array of strings; nothing is parsed into
//! numbers or booleans on the way in. Typed access goes through serde: any
//! `Deserialize` type can be read out of a mapping (see [`from_mapping`]
//! and [`SearchParams::to_typed`]), and any `Serialize` type can be written
//! into one (see [`to_mapping`]).
//!
//! ## Limitations
//!
//! The format trades generality for readability, so a few things cannot be
//! represented:
//!
//! - key segments containing `_` are split apart when decoded;
//! - array elements containing `|` are split apart when decoded;
//! - a one-element array is written like a plain string, and an empty array
//!   like an empty string;
//! - arrays can only hold strings, not nested mappings.
//!
//! ## Usage
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use structured_qs::{SearchParams, Value};
//!
//! #[derive(Debug, PartialEq, Deserialize, Serialize)]
//! struct Filters {
//!     toyline: u32,
//!     tags: Vec<String>,
//! }
//!
//! #[derive(Debug, PartialEq, Deserialize, Serialize)]
//! struct Query {
//!     filters: Filters,
//! }
//!
//! let mut params = SearchParams::parse("?filters_tags=Walmart|Target&filters_toyline=355").unwrap();
//! assert_eq!(params.get("filters.toyline"), Some(&Value::from("355")));
//!
//! params.set("filters.toyline", 356);
//! let query: Query = params.to_typed().unwrap();
//! assert_eq!(
//!     query,
//!     Query {
//!         filters: Filters {
//!             toyline: 356,
//!             tags: vec!["Walmart".to_string(), "Target".to_string()],
//!         },
//!     }
//! );
//!
//! assert_eq!(params.to_string(), "filters_tags=Walmart%7CTarget&filters_toyline=356");
//! ```

pub mod access;
mod config;
mod de;
mod error;
mod map;
pub mod merge;
mod params;
mod path;
mod ser;
mod validate;
mod value;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use de::{ValueDeserializer, from_bytes, from_mapping, from_reader, from_str, from_str_as, from_value};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use map::Map;
#[doc(inline)]
pub use merge::Merge;
#[doc(inline)]
pub use params::SearchParams;
#[doc(inline)]
pub use path::{ARRAY_DELIMITER, PATH_SEPARATOR, Path, WIRE_SEPARATOR};
#[doc(inline)]
pub use ser::{Serializer, ValueSerializer, to_mapping, to_string, to_value, to_writer};
#[doc(inline)]
pub use validate::{Rejection, Schema, Validator};
#[doc(inline)]
pub use value::{Mapping, Value};
