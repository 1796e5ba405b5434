//! Stored values and the primitive operations shared by every engine.
//!
//! Each operation works on the slot for one key: `None` when the key is absent. An
//! operation that fails leaves the slot untouched, and a list that becomes empty is
//! removed from its slot.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tastebook_core::FieldMap;

use crate::error::{Result, StoreError};

/// A value held under a single key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// A map of string fields.
    Hash(FieldMap),
    /// An ordered list; index 0 is the head.
    List(VecDeque<String>),
}

fn wrong_type(key: &str) -> StoreError {
    StoreError::WrongType {
        key: key.to_string(),
    }
}

fn hash<'a>(slot: Option<&'a Value>, key: &str) -> Result<Option<&'a FieldMap>> {
    match slot {
        None => Ok(None),
        Some(Value::Hash(fields)) => Ok(Some(fields)),
        Some(Value::List(_)) => Err(wrong_type(key)),
    }
}

fn list<'a>(slot: Option<&'a Value>, key: &str) -> Result<Option<&'a VecDeque<String>>> {
    match slot {
        None => Ok(None),
        Some(Value::List(items)) => Ok(Some(items)),
        Some(Value::Hash(_)) => Err(wrong_type(key)),
    }
}

/// Set `fields` on a hash, creating it if needed. Returns the number of new fields.
pub(crate) fn hset(slot: &mut Option<Value>, key: &str, fields: &FieldMap) -> Result<usize> {
    hash(slot.as_ref(), key)?;
    let Value::Hash(existing) = slot.get_or_insert_with(|| Value::Hash(FieldMap::new())) else {
        return Err(wrong_type(key));
    };

    let mut added = 0;
    for (field, value) in fields {
        if existing.insert(field.clone(), value.clone()).is_none() {
            added += 1;
        }
    }
    Ok(added)
}

/// All fields of a hash; empty when the key is absent.
pub(crate) fn hgetall(slot: Option<&Value>, key: &str) -> Result<FieldMap> {
    Ok(hash(slot, key)?.cloned().unwrap_or_default())
}

/// Add `delta` to an integer field, treating a missing field as zero.
pub(crate) fn hincrby(
    slot: &mut Option<Value>,
    key: &str,
    field: &str,
    delta: i64,
) -> Result<i64> {
    let current = match hash(slot.as_ref(), key)?.and_then(|fields| fields.get(field)) {
        None => 0,
        Some(raw) => raw.parse::<i64>().map_err(|_| StoreError::NotAnInteger {
            key: key.to_string(),
            field: field.to_string(),
        })?,
    };
    let next = current.checked_add(delta).ok_or_else(|| StoreError::Overflow {
        key: key.to_string(),
        field: field.to_string(),
    })?;

    let Value::Hash(fields) = slot.get_or_insert_with(|| Value::Hash(FieldMap::new())) else {
        return Err(wrong_type(key));
    };
    fields.insert(field.to_string(), next.to_string());
    Ok(next)
}

/// Push `value` at the head of a list, creating it if needed. Returns the new length.
pub(crate) fn lpush(slot: &mut Option<Value>, key: &str, value: &str) -> Result<usize> {
    list(slot.as_ref(), key)?;
    let Value::List(items) = slot.get_or_insert_with(|| Value::List(VecDeque::new())) else {
        return Err(wrong_type(key));
    };
    items.push_front(value.to_string());
    Ok(items.len())
}

/// Inclusive slice `start..=stop` of a list.
///
/// Negative indices count from the tail. Out-of-range bounds are clipped and an empty
/// range yields an empty vector.
pub(crate) fn lrange(slot: Option<&Value>, key: &str, start: i64, stop: i64) -> Result<Vec<String>> {
    let Some(items) = list(slot, key)? else {
        return Ok(Vec::new());
    };

    let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
    let resolve = |index: i64| if index < 0 { len.saturating_add(index) } else { index };
    let start = resolve(start).max(0);
    let stop = resolve(stop).min(len - 1);
    if start > stop || start >= len {
        return Ok(Vec::new());
    }

    // Both bounds are within 0..len here.
    let (start, stop) = (
        usize::try_from(start).unwrap_or(0),
        usize::try_from(stop).unwrap_or(0),
    );
    Ok(items.range(start..=stop).cloned().collect())
}

/// Remove occurrences of `value` from a list.
///
/// `count > 0` removes up to `count` from the head, `count < 0` up to `|count|` from the
/// tail, and `count == 0` removes all. Returns the number removed.
pub(crate) fn lrem(slot: &mut Option<Value>, key: &str, count: i64, value: &str) -> Result<usize> {
    if list(slot.as_ref(), key)?.is_none() {
        return Ok(0);
    }
    let Some(Value::List(items)) = slot.as_mut() else {
        return Err(wrong_type(key));
    };

    let limit = if count == 0 {
        usize::MAX
    } else {
        usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX)
    };

    let mut removed = 0;
    if count >= 0 {
        let mut index = 0;
        while index < items.len() && removed < limit {
            if items[index] == value {
                items.remove(index);
                removed += 1;
            } else {
                index += 1;
            }
        }
    } else {
        let mut index = items.len();
        while index > 0 && removed < limit {
            index -= 1;
            if items[index] == value {
                items.remove(index);
                removed += 1;
            }
        }
    }

    if items.is_empty() {
        *slot = None;
    }
    Ok(removed)
}
