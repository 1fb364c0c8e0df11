use serde_json::{Map, Value};

use crate::error::FormError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// Splits `a.b[2].c` into `a`, `b`, `2`, `c`. Purely numeric segments are indices.
pub fn parse_path(path: &str) -> Result<Vec<Segment>, FormError> {
    let normalized = path.replace('[', ".").replace(']', "");
    normalized
        .split('.')
        .map(|segment| {
            if segment.is_empty() {
                Err(FormError::InvalidPath(path.to_string()))
            } else if segment.bytes().all(|b| b.is_ascii_digit()) {
                segment
                    .parse()
                    .map(Segment::Index)
                    .map_err(|_| FormError::InvalidPath(path.to_string()))
            } else {
                Ok(Segment::Key(segment.to_string()))
            }
        })
        .collect()
}

pub fn read_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let segments = parse_path(path).ok()?;
    segments
        .iter()
        .try_fold(root, |value, segment| match (value, segment) {
            (Value::Object(map), Segment::Key(key)) => map.get(key),
            (Value::Object(map), Segment::Index(i)) => map.get(&i.to_string()),
            (Value::Array(items), Segment::Index(i)) => items.get(*i),
            _ => None,
        })
}

/// Writes one leaf, creating objects and arrays along the way. Numeric
/// segments create arrays, anything else objects. An index may address an
/// existing element or the next one to append.
pub fn write_path(root: &mut Value, path: &str, value: Value) -> Result<(), FormError> {
    let segments = parse_path(path)?;
    let invalid = || FormError::InvalidPath(path.to_string());
    let Some((last, parents)) = segments.split_last() else {
        return Err(invalid());
    };

    let mut current = root;
    for (i, segment) in parents.iter().enumerate() {
        let next = &segments[i + 1];
        current = child_mut(current, segment, || empty_container(next)).ok_or_else(invalid)?;
    }
    *child_mut(current, last, || Value::Null).ok_or_else(invalid)? = value;
    Ok(())
}

fn empty_container(next: &Segment) -> Value {
    match next {
        Segment::Index(_) => Value::Array(Vec::new()),
        Segment::Key(_) => Value::Object(Map::new()),
    }
}

fn child_mut<'a>(
    value: &'a mut Value,
    segment: &Segment,
    make: impl FnOnce() -> Value,
) -> Option<&'a mut Value> {
    if value.is_null() {
        *value = empty_container(segment);
    }
    match (value, segment) {
        (Value::Object(map), Segment::Key(key)) => Some(map.entry(key.clone()).or_insert_with(make)),
        (Value::Object(map), Segment::Index(i)) => {
            Some(map.entry(i.to_string()).or_insert_with(make))
        }
        (Value::Array(items), Segment::Index(i)) => {
            // Arrays grow by appending; an index past the end is not a valid path.
            if *i == items.len() {
                items.push(Value::Null);
            }
            let slot = items.get_mut(*i)?;
            if slot.is_null() {
                *slot = make();
            }
            Some(slot)
        }
        _ => None,
    }
}
