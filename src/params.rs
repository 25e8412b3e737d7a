//! A search-params container over a nested mapping.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::access;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::merge::Merge;
use crate::path::Path;
use crate::validate::Validator;
use crate::value::{Mapping, Value};

/// Owns a nested mapping decoded from (or destined for) a querystring.
///
/// Values are addressed by dot-separated logical paths such as
/// `"filters.toyline"`, independently of the `_`-joined keys used on the
/// wire.
///
/// ```
/// use structured_qs::{SearchParams, Value};
///
/// let mut params: SearchParams = "?filters_tags=foo|bar&filters_toyline=3".parse().unwrap();
/// params.set("filters.toyline", 5);
///
/// assert_eq!(params.get("filters.toyline"), Some(&Value::from("5")));
/// assert_eq!(params.to_string(), "filters_tags=foo%7Cbar&filters_toyline=5");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchParams {
    params: Mapping,
    config: Config,
}

impl SearchParams {
    /// Decodes `input` with the default `Config`.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_config(input, Config::default())
    }

    /// Decodes `input` with a custom `Config`, which is also used whenever
    /// the container is written back out.
    pub fn parse_with_config(input: &str, config: Config) -> Result<Self> {
        Ok(SearchParams {
            params: config.deserialize_str(input)?,
            config,
        })
    }

    /// Decodes `input` and passes the result through `validator` once.
    ///
    /// The container holds whatever mapping the validator returns. A
    /// rejection is logged and returned as [`Error::Rejected`].
    pub fn parse_with<V: Validator + ?Sized>(input: &str, validator: &V) -> Result<Self> {
        Self::parse_with_config_validated(input, Config::default(), validator)
    }

    /// Like [`parse_with`](Self::parse_with), decoding with a custom
    /// `Config` that is kept for writing the container out.
    pub fn parse_with_config_validated<V: Validator + ?Sized>(
        input: &str,
        config: Config,
        validator: &V,
    ) -> Result<Self> {
        let decoded = config.deserialize_str(input)?;
        match validator.validate(decoded) {
            Ok(params) => Ok(SearchParams { params, config }),
            Err(rejection) => {
                warn!(%rejection, "search params rejected by validator");
                Err(Error::Rejected(rejection))
            }
        }
    }

    /// Wraps an existing mapping without validating it.
    pub fn from_mapping(params: Mapping) -> Self {
        SearchParams {
            params,
            config: Config::default(),
        }
    }

    /// Builds a container from any serializable value.
    ///
    /// See [`to_mapping`](crate::to_mapping) for how Rust values are
    /// represented.
    pub fn from_typed<T: Serialize + ?Sized>(input: &T) -> Result<Self> {
        Ok(Self::from_mapping(crate::ser::to_mapping(input)?))
    }

    /// Replaces the `Config` used when writing the container out.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> Config {
        self.config
    }

    /// Looks up the node at `path`.
    pub fn get(&self, path: impl Into<Path>) -> Option<&Value> {
        access::get(&self.params, &path.into())
    }

    /// Reads the node at `path` as a Rust type.
    ///
    /// Returns `Ok(None)` if nothing is stored at `path`.
    pub fn get_as<T: DeserializeOwned>(&self, path: impl Into<Path>) -> Result<Option<T>> {
        self.get(path)
            .map(|value| crate::de::from_value(value.clone()))
            .transpose()
    }

    /// Stores `value` at `path`, replacing whatever was there and creating
    /// intermediate mappings as needed.
    pub fn set(&mut self, path: impl Into<Path>, value: impl Into<Value>) {
        access::set(&mut self.params, &path.into(), Some(value.into()));
    }

    /// Like [`set`](Self::set), but `None` removes the key instead.
    pub fn set_opt(&mut self, path: impl Into<Path>, value: Option<Value>) {
        access::set(&mut self.params, &path.into(), value);
    }

    /// Combines `partial` into the container using `strategy`.
    pub fn set_all(&mut self, partial: Mapping, strategy: Merge) {
        strategy.apply(&mut self.params, partial);
    }

    /// Deep-merges `partial` into the container.
    pub fn merge(&mut self, partial: Mapping) {
        self.set_all(partial, Merge::Deep);
    }

    /// Serializes `partial` and combines it into the container.
    pub fn set_all_from<T: Serialize + ?Sized>(&mut self, partial: &T, strategy: Merge) -> Result<()> {
        let partial = crate::ser::to_mapping(partial)?;
        self.set_all(partial, strategy);
        Ok(())
    }

    /// Removes the node at `path`. Missing paths are ignored.
    pub fn clear(&mut self, path: impl Into<Path>) {
        access::clear(&mut self.params, &path.into());
    }

    pub fn all(&self) -> &Mapping {
        &self.params
    }

    pub fn all_mut(&mut self) -> &mut Mapping {
        &mut self.params
    }

    pub fn into_inner(self) -> Mapping {
        self.params
    }

    /// Reads the whole container as a Rust type.
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T> {
        crate::de::from_mapping(self.params.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl From<Mapping> for SearchParams {
    fn from(params: Mapping) -> Self {
        Self::from_mapping(params)
    }
}

impl FromStr for SearchParams {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = self
            .config
            .serialize_string(&self.params)
            .map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}
