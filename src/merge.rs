//! Merging a partial mapping into an existing one.

use crate::value::{Mapping, Value};

/// How [`SearchParams::set_all`](crate::SearchParams::set_all) applies a
/// partial mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Merge {
    /// Recursively merge nested mappings, see [`deep_merge`].
    #[default]
    Deep,
    /// Replace top-level keys wholesale, see [`assign`].
    Shallow,
}

impl Merge {
    pub fn apply(self, target: &mut Mapping, source: Mapping) {
        match self {
            Merge::Deep => deep_merge(target, source),
            Merge::Shallow => assign(target, source),
        }
    }
}

/// Merges `source` into `target`.
///
/// Where both sides hold a mapping under the same key, the two are merged
/// recursively. In every other case the value from `source` replaces the
/// one in `target`; in particular arrays are replaced, never concatenated.
pub fn deep_merge(target: &mut Mapping, source: Mapping) {
    for (key, value) in source {
        match value {
            Value::Map(incoming) => match target.get_mut(&key) {
                Some(Value::Map(existing)) => deep_merge(existing, incoming),
                _ => {
                    target.insert(key, Value::Map(incoming));
                }
            },
            leaf => {
                target.insert(key, leaf);
            }
        }
    }
}

/// Copies every top-level key of `source` into `target`, replacing what was
/// there. Nested mappings are not merged.
pub fn assign(target: &mut Mapping, source: Mapping) {
    target.extend(source);
}

#[cfg(test)]
mod test {
    use super::{Merge, assign, deep_merge};
    use crate::value::{Mapping, Value};

    use pretty_assertions::assert_eq;

    fn mapping(value: Value) -> Mapping {
        value.into_map().unwrap()
    }

    #[test]
    fn merges_nested_keys() {
        let mut target = mapping(Value::from_iter([(
            "a",
            Value::from_iter([("x", "1"), ("y", "2")]),
        )]));
        let source = mapping(Value::from_iter([("a", Value::from_iter([("y", "3")]))]));
        deep_merge(&mut target, source);
        assert_eq!(
            target,
            mapping(Value::from_iter([(
                "a",
                Value::from_iter([("x", "1"), ("y", "3")])
            )]))
        );
    }

    #[test]
    fn arrays_are_replaced() {
        let mut target = mapping(Value::from_iter([("a", ["1", "2"])]));
        let source = mapping(Value::from_iter([("a", ["3"])]));
        deep_merge(&mut target, source);
        assert_eq!(target, mapping(Value::from_iter([("a", ["3"])])));
    }

    #[test]
    fn mapping_replaces_leaf() {
        let mut target = mapping(Value::from_iter([("a", "leaf")]));
        let source = mapping(Value::from_iter([("a", Value::from_iter([("b", "1")]))]));
        deep_merge(&mut target, source.clone());
        assert_eq!(target, source);
    }

    #[test]
    fn leaf_replaces_mapping() {
        let mut target = mapping(Value::from_iter([("a", Value::from_iter([("b", "1")]))]));
        let source = mapping(Value::from_iter([("a", "leaf")]));
        deep_merge(&mut target, source.clone());
        assert_eq!(target, source);
    }

    #[test]
    fn assign_is_shallow() {
        let mut target = mapping(Value::from_iter([
            ("a", Value::from_iter([("x", "1"), ("y", "2")])),
            ("b", Value::from("kept")),
        ]));
        let source = mapping(Value::from_iter([("a", Value::from_iter([("y", "3")]))]));
        assign(&mut target, source);
        assert_eq!(
            target,
            mapping(Value::from_iter([
                ("a", Value::from_iter([("y", "3")])),
                ("b", Value::from("kept")),
            ]))
        );
    }

    #[test]
    fn default_merge_is_deep() {
        assert_eq!(Merge::default(), Merge::Deep);
    }
}
