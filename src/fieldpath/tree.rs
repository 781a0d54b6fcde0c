//! Reading and writing values in a tree through a [`Path`].

use super::path::{Path, PathElement};
use crate::value::{Map, Value};

/// Returns the value at `path`, or `None` when any segment is absent.
///
/// Key segments only address maps and index segments only address lists.
/// An empty path addresses the root itself.
pub fn get<'a>(tree: &'a Value, path: &Path) -> Option<&'a Value> {
    get_at(tree, path.as_slice())
}

/// Writes `value` at `path`, creating missing intermediate containers.
///
/// A missing intermediate becomes a list when the segment after it is an
/// index and a map otherwise. Values in the way that are not the kind of
/// container the path needs are replaced. Writing past the end of a list
/// pads it with empty slots, which read as absent.
pub fn set(tree: &mut Value, path: &Path, value: Value) {
    let Some((last, parents)) = path.as_slice().split_last() else {
        *tree = value;
        return;
    };

    let mut current = tree;
    for element in parents {
        current = slot(current, element);
    }
    *slot(current, last) = value;
}

/// Removes the value at `path` and returns it.
///
/// Removing a list index leaves an empty slot so later elements keep their
/// indices; empty slots at the end of the list are dropped. If the parent
/// of the final segment is absent nothing happens.
pub fn remove(tree: &mut Value, path: &Path) -> Option<Value> {
    let (last, parents) = path.as_slice().split_last()?;
    let parent = get_at_mut(tree, parents)?;
    match (parent, last) {
        (Value::Map(map), PathElement::Key(key)) => map.delete(key),
        (Value::List(list), PathElement::Index(i)) => {
            let removed = list
                .get_mut(*i)
                .map(|slot| std::mem::replace(slot, Value::Undefined))
                .filter(|v| !v.is_undefined());
            while list.last().is_some_and(Value::is_undefined) {
                list.pop();
            }
            removed
        }
        _ => None,
    }
}

fn get_at<'a>(tree: &'a Value, elements: &[PathElement]) -> Option<&'a Value> {
    elements
        .iter()
        .try_fold(tree, |current, element| match (current, element) {
            (Value::Map(map), PathElement::Key(key)) => map.get(key),
            (Value::List(list), PathElement::Index(i)) => {
                list.get(*i).filter(|v| !v.is_undefined())
            }
            _ => None,
        })
}

fn get_at_mut<'a>(tree: &'a mut Value, elements: &[PathElement]) -> Option<&'a mut Value> {
    let mut current = tree;
    for element in elements {
        current = match (current, element) {
            (Value::Map(map), PathElement::Key(key)) => map.get_mut(key)?,
            (Value::List(list), PathElement::Index(i)) => {
                list.get_mut(*i).filter(|v| !v.is_undefined())?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Returns the child slot for `element`, turning `current` into the right
/// container kind first. New slots are empty until written.
fn slot<'a>(current: &'a mut Value, element: &PathElement) -> &'a mut Value {
    match element {
        PathElement::Key(key) => ensure_map(current)
            .fields
            .entry(key.clone())
            .or_insert(Value::Undefined),
        PathElement::Index(i) => {
            let list = ensure_list(current);
            if list.len() <= *i {
                list.resize(*i + 1, Value::Undefined);
            }
            &mut list[*i]
        }
    }
}

fn ensure_map(value: &mut Value) -> &mut Map {
    if !value.is_map() {
        *value = Value::Map(Map::new());
    }
    match value {
        Value::Map(map) => map,
        _ => unreachable!("value was just replaced by a map"),
    }
}

fn ensure_list(value: &mut Value) -> &mut Vec<Value> {
    if !value.is_list() {
        *value = Value::List(Vec::new());
    }
    match value {
        Value::List(list) => list,
        _ => unreachable!("value was just replaced by a list"),
    }
}
