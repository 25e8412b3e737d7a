//! Key paths.
//!
//! A key is addressed in two different ways:
//!
//! - on the wire, as a single *wire key* whose segments are joined by `_`,
//!   e.g. `filters_toyline=355`;
//! - in code, as a logical [`Path`] whose string form joins segments with
//!   `.`, e.g. `params.get("filters.toyline")`.
//!
//! A segment that itself contains `_` cannot be told apart from two nested
//! segments once it is on the wire. This is a constraint on key names, and
//! is not checked at runtime.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separates nesting levels in a wire key.
pub const WIRE_SEPARATOR: char = '_';

/// Separates nesting levels in a logical path.
pub const PATH_SEPARATOR: char = '.';

/// Separates the elements of an array leaf in a wire value.
pub const ARRAY_DELIMITER: char = '|';

/// A logical path into a nested mapping.
///
/// ```
/// use structured_qs::Path;
///
/// let path: Path = "filters.toyline".parse().unwrap();
/// assert_eq!(path.segments(), ["filters", "toyline"]);
/// assert_eq!(path.to_wire_key(), "filters_toyline");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    pub fn new(segments: Vec<String>) -> Self {
        Path { segments }
    }

    /// Splits a decoded wire key into a path.
    ///
    /// At most `max_depth` splits are made; anything after the last split
    /// stays in the final segment as-is.
    pub fn from_wire_key(key: &str, max_depth: usize) -> Self {
        Path {
            segments: key
                .splitn(max_depth.saturating_add(1), WIRE_SEPARATOR)
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Joins the segments back into a (not yet percent-encoded) wire key.
    pub fn to_wire_key(&self) -> String {
        self.join(WIRE_SEPARATOR)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Returns the final segment and the segments leading up to it.
    pub fn split_last(&self) -> Option<(&String, &[String])> {
        self.segments.split_last()
    }

    fn join(&self, separator: char) -> String {
        let mut out = String::with_capacity(self.segments.iter().map(|s| s.len() + 1).sum());
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                out.push(separator);
            }
            out.push_str(segment);
        }
        out
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Path::from(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Path {
            segments: s.split(PATH_SEPARATOR).map(str::to_owned).collect(),
        }
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        Path::from(s.as_str())
    }
}

impl From<&String> for Path {
    fn from(s: &String) -> Self {
        Path::from(s.as_str())
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl From<Vec<String>> for Path {
    fn from(segments: Vec<String>) -> Self {
        Path { segments }
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Path {
            segments: segments.into_iter().map(str::to_owned).collect(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(PATH_SEPARATOR))
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({self})")
    }
}

#[cfg(test)]
mod test {
    use super::Path;

    use pretty_assertions::assert_eq;

    #[test]
    fn logical_path_splits_on_dots() {
        let path = Path::from("a.b.c");
        assert_eq!(path.segments(), ["a", "b", "c"]);
        assert_eq!(path.to_string(), "a.b.c");
    }

    #[test]
    fn empty_string_is_one_empty_segment() {
        let path = Path::from("");
        assert_eq!(path.segments(), [""]);
        assert!(!path.is_empty());
    }

    #[test]
    fn wire_key_respects_max_depth() {
        let path = Path::from_wire_key("a_b_c_d", 2);
        assert_eq!(path.segments(), ["a", "b", "c_d"]);

        let flat = Path::from_wire_key("a_b_c_d", 0);
        assert_eq!(flat.segments(), ["a_b_c_d"]);
    }

    #[test]
    fn wire_key_unbounded() {
        let path = Path::from_wire_key("a_b_c_d_e_f_g_h", usize::MAX);
        assert_eq!(path.segments(), ["a", "b", "c", "d", "e", "f", "g", "h"]);
        assert_eq!(path.to_string(), "a.b.c.d.e.f.g.h");
    }

    #[test]
    fn wire_key_keeps_empty_segments() {
        let path = Path::from_wire_key("a__b", 5);
        assert_eq!(path.segments(), ["a", "", "b"]);
        assert_eq!(path.to_wire_key(), "a__b");
    }

    #[test]
    fn dots_are_not_wire_separators() {
        let path = Path::from_wire_key("a.b_c", 5);
        assert_eq!(path.segments(), ["a.b", "c"]);
    }
}
