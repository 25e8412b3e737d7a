//! Path-addressed reads and writes on a nested mapping.
//!
//! These operate on a logical [`Path`] (`filters.toyline`), never on a wire
//! key. All of them mutate in place and none of them fail: a path that runs
//! into a missing key or a leaf is simply "not found".

use tracing::debug;

use crate::map;
use crate::path::Path;
use crate::value::{Mapping, Value};

/// Returns the node at `path`, or `None` if any segment is missing.
///
/// A leaf reached before the end of the path also counts as missing.
pub fn get<'m>(mapping: &'m Mapping, path: &Path) -> Option<&'m Value> {
    let (last, parents) = path.split_last()?;
    let mut current = mapping;
    for segment in parents {
        match current.get(segment.as_str())? {
            Value::Map(child) => current = child,
            _ => return None,
        }
    }
    current.get(last.as_str())
}

/// Mutable counterpart of [`get`].
pub fn get_mut<'m>(mapping: &'m mut Mapping, path: &Path) -> Option<&'m mut Value> {
    let (last, parents) = path.split_last()?;
    let mut current = mapping;
    for segment in parents {
        match current.get_mut(segment.as_str()) {
            Some(Value::Map(child)) => current = child,
            _ => return None,
        }
    }
    current.get_mut(last.as_str())
}

/// Writes `value` at `path`, or removes the key there when `value` is `None`.
///
/// Missing intermediate mappings are created. An intermediate segment that
/// currently holds a leaf is replaced by an empty mapping, so this succeeds
/// whatever the existing shape of `mapping` is. Note that removing a key
/// still creates the intermediate mappings leading to it.
pub fn set(mapping: &mut Mapping, path: &Path, value: Option<Value>) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = mapping;
    for segment in parents {
        current = descend_or_create(current, segment);
    }
    match value {
        Some(value) => {
            current.insert(last.clone(), value);
        }
        None => {
            map::remove(current, last);
        }
    }
}

/// Removes the key at `path`.
///
/// Does nothing if any intermediate segment is missing or is a leaf.
pub fn clear(mapping: &mut Mapping, path: &Path) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = mapping;
    for segment in parents {
        match current.get_mut(segment.as_str()) {
            Some(Value::Map(child)) => current = child,
            _ => return,
        }
    }
    map::remove(current, last);
}

fn descend_or_create<'m>(mapping: &'m mut Mapping, segment: &str) -> &'m mut Mapping {
    let node = mapping
        .entry(segment.to_owned())
        .or_insert_with(Value::new_map);
    if node.is_leaf() {
        debug!(segment, "replacing leaf with a mapping to descend into it");
    }
    node.coerce_map()
}

#[cfg(test)]
mod test {
    use super::{clear, get, get_mut, set};
    use crate::path::Path;
    use crate::value::{Mapping, Value};

    use pretty_assertions::assert_eq;

    fn mapping(value: Value) -> Mapping {
        value.into_map().unwrap()
    }

    fn sample() -> Mapping {
        mapping(Value::from_iter([(
            "filters",
            Value::from_iter([
                ("toyline", Value::from("355")),
                ("tags", Value::from(["foo", "bar"])),
            ]),
        )]))
    }

    #[test]
    fn get_walks_nested_keys() {
        let m = sample();
        assert_eq!(get(&m, &"filters.toyline".into()), Some(&Value::from("355")));
        assert_eq!(
            get(&m, &"filters.tags".into()),
            Some(&Value::from(["foo", "bar"]))
        );
        assert!(get(&m, &"filters".into()).unwrap().is_map());
    }

    #[test]
    fn get_missing_is_none() {
        let m = sample();
        assert_eq!(get(&m, &"filters.missing".into()), None);
        assert_eq!(get(&m, &"nope.toyline".into()), None);
        // cannot descend through a leaf
        assert_eq!(get(&m, &"filters.toyline.deeper".into()), None);
        assert_eq!(get(&m, &Path::default()), None);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut m = sample();
        if let Some(Value::String(s)) = get_mut(&mut m, &"filters.toyline".into()) {
            s.push('0');
        }
        assert_eq!(get(&m, &"filters.toyline".into()), Some(&Value::from("3550")));
    }

    #[test]
    fn set_creates_intermediates() {
        let mut m = Mapping::new();
        set(&mut m, &"a.b.c".into(), Some("1".into()));
        assert_eq!(
            m,
            mapping(Value::from_iter([(
                "a",
                Value::from_iter([("b", Value::from_iter([("c", "1")]))])
            )]))
        );
    }

    #[test]
    fn set_replaces_subtree() {
        let mut m = sample();
        set(&mut m, &"filters".into(), Some("flat".into()));
        assert_eq!(m, mapping(Value::from_iter([("filters", "flat")])));
    }

    #[test]
    fn set_overwrites_leaf_intermediate() {
        let mut m = mapping(Value::from_iter([("a", "scalar")]));
        set(&mut m, &"a.b".into(), Some("1".into()));
        assert_eq!(
            m,
            mapping(Value::from_iter([("a", Value::from_iter([("b", "1")]))]))
        );
    }

    #[test]
    fn set_none_removes_key() {
        let mut m = mapping(Value::from_iter([("a", Value::from_iter([("b", "1")]))]));
        set(&mut m, &"a.b".into(), None);
        assert_eq!(m, mapping(Value::from_iter([("a", Value::new_map())])));
        assert_eq!(get(&m, &"a.b".into()), None);
    }

    #[test]
    fn clear_removes_key() {
        let mut m = sample();
        clear(&mut m, &"filters.tags".into());
        assert_eq!(
            m,
            mapping(Value::from_iter([(
                "filters",
                Value::from_iter([("toyline", "355")])
            )]))
        );
    }

    #[test]
    fn clear_missing_is_noop() {
        let mut m = sample();
        clear(&mut m, &"x.y".into());
        clear(&mut m, &"filters.toyline.deeper".into());
        clear(&mut m, &"filters.missing".into());
        assert_eq!(m, sample());
    }
}
