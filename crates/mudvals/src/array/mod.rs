//! Hybrid array containers
//!
//! An array is either *packed* (a vector indexed by consecutive integers
//! starting at zero) or a *dictionary* (an AVL tree keyed by arbitrary
//! values). Script code sees one container type; the storage mode is an
//! internal representation choice.
//!
//! Containers are shared by handle: cloning an [`ArrayRef`] aliases the
//! same storage. Mutation goes through copy-on-write — a handle about to
//! mutate storage that other handles can still see first decouples onto a
//! private deep copy, so the other handles keep observing the old
//! contents. A *pinned* container opts out of this and mutates in place,
//! which is how scripts get deliberate shared-state semantics.

pub(crate) mod tree;

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{ArrayError, Result};
use crate::value::cmp::{compare, Case};
use crate::value::{TypeTag, Value};
use tree::AvlTree;

/// Storage mode of an array container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayMode {
    /// Vector storage indexed by consecutive integers from zero
    Packed,
    /// Tree storage keyed by arbitrary values
    Dictionary,
}

impl fmt::Display for ArrayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayMode::Packed => write!(f, "packed"),
            ArrayMode::Dictionary => write!(f, "dictionary"),
        }
    }
}

enum Storage {
    Packed(Vec<Value>),
    Dictionary(AvlTree),
}

struct ArrayValue {
    pinned: bool,
    storage: Storage,
}

impl ArrayValue {
    fn len(&self) -> usize {
        match &self.storage {
            Storage::Packed(items) => items.len(),
            Storage::Dictionary(tree) => tree.len(),
        }
    }

    fn mode(&self) -> ArrayMode {
        match &self.storage {
            Storage::Packed(_) => ArrayMode::Packed,
            Storage::Dictionary(_) => ArrayMode::Dictionary,
        }
    }

    // Decoupling preserves the storage mode, so a handle that saw one
    // mode before copy-on-write sees the same mode after.
    fn packed_mut(&mut self) -> &mut Vec<Value> {
        match &mut self.storage {
            Storage::Packed(items) => items,
            Storage::Dictionary(_) => unreachable!("storage mode changed mid-operation"),
        }
    }

    fn dict_mut(&mut self) -> &mut AvlTree {
        match &mut self.storage {
            Storage::Dictionary(tree) => tree,
            Storage::Packed(_) => unreachable!("storage mode changed mid-operation"),
        }
    }
}

/// Shared handle to an array container.
///
/// `Clone` aliases the storage; [`ArrayRef::share_count`] reports how many
/// handles currently alias it. All mutating operations take `&mut self`
/// and apply copy-on-write first, so a handle that mutates a shared,
/// unpinned container silently rebinds itself to a private copy.
pub struct ArrayRef(Rc<RefCell<ArrayValue>>);

impl Clone for ArrayRef {
    fn clone(&self) -> Self {
        ArrayRef(Rc::clone(&self.0))
    }
}

/// Validate an integer write index for a packed array. `0..len` addresses
/// existing slots; `len` itself is the append position.
fn packed_index(key: &Value, len: usize) -> Result<usize> {
    let idx = key
        .as_integer()
        .ok_or_else(|| ArrayError::type_error("integer", key))?;
    if idx < 0 || idx > len as i64 {
        return Err(ArrayError::IndexOutOfBounds { index: idx, len });
    }
    Ok(idx as usize)
}

/// Clamp an inclusive packed range: a negative start clamps to zero and an
/// oversized end clamps to the last slot, but a start past the end of the
/// container, a negative end, or an inverted range is an error.
fn packed_clamp_range(start: &Value, end: &Value, len: usize) -> Result<(usize, usize)> {
    let s = start
        .as_integer()
        .ok_or_else(|| ArrayError::type_error("integer", start))?;
    let e = end
        .as_integer()
        .ok_or_else(|| ArrayError::type_error("integer", end))?;
    let sidx = if s < 0 {
        0
    } else if s >= len as i64 {
        return Err(ArrayError::IndexOutOfBounds { index: s, len });
    } else {
        s
    };
    let eidx = if e >= len as i64 {
        len as i64 - 1
    } else if e < 0 {
        return Err(ArrayError::IndexOutOfBounds { index: e, len });
    } else {
        e
    };
    if sidx > eidx {
        return Err(ArrayError::InvalidRange { start: s, end: e });
    }
    Ok((sidx as usize, eidx as usize))
}

/// Resolve dictionary range bounds to the nearest existing keys: the start
/// rounds up to the next key, the end rounds down to the previous one.
/// `None` means the resolved range is empty.
fn resolve_dict_bounds(tree: &AvlTree, start: &Value, end: &Value) -> Option<(Value, Value)> {
    let s = if tree.contains_key(start) {
        start.clone()
    } else {
        tree.next(start)?.0.clone()
    };
    let e = if tree.contains_key(end) {
        end.clone()
    } else {
        tree.prev(end)?.0.clone()
    };
    if compare(&s, &e, Case::Insensitive) == Ordering::Greater {
        return None;
    }
    Some((s, e))
}

impl ArrayRef {
    fn from_storage(pinned: bool, storage: Storage) -> Self {
        ArrayRef(Rc::new(RefCell::new(ArrayValue { pinned, storage })))
    }

    /// New packed array of `len` slots, each holding `Integer(0)`.
    pub fn new_packed(len: usize) -> Self {
        Self::from_storage(false, Storage::Packed(vec![Value::Integer(0); len]))
    }

    /// New empty dictionary array.
    pub fn new_dictionary() -> Self {
        Self::from_storage(false, Storage::Dictionary(AvlTree::new()))
    }

    /// New packed array holding the given values in order.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self::from_storage(false, Storage::Packed(values))
    }

    /// Wrap this handle in a [`Value`].
    pub fn into_value(self) -> Value {
        Value::Array(self)
    }

    /// Whether two handles alias the same storage.
    pub fn ptr_eq(a: &ArrayRef, b: &ArrayRef) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Number of entries in the container.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Whether the container has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current storage mode.
    pub fn mode(&self) -> ArrayMode {
        self.0.borrow().mode()
    }

    /// Number of handles currently aliasing this storage.
    pub fn share_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Whether the container is pinned in place.
    pub fn is_pinned(&self) -> bool {
        self.0.borrow().pinned
    }

    /// Pin or unpin the container. A pinned container never decouples:
    /// mutations through any handle are seen by every handle.
    pub fn set_pinned(&mut self, pinned: bool) {
        self.0.borrow_mut().pinned = pinned;
    }

    /// Copy-on-write gate: called at the top of every mutating operation,
    /// after argument validation, so failed calls never decouple.
    fn make_exclusive(&mut self) {
        if Rc::strong_count(&self.0) > 1 && !self.0.borrow().pinned {
            *self = self.decouple();
        }
    }

    /// Deep-copy the container into a fresh unshared handle.
    ///
    /// Entry values are cloned, which bumps payload reference counts
    /// rather than duplicating string buffers or nested containers.
    pub fn decouple(&self) -> ArrayRef {
        let inner = self.0.borrow();
        let storage = match &inner.storage {
            Storage::Packed(items) => Storage::Packed(items.clone()),
            Storage::Dictionary(tree) => Storage::Dictionary(tree.clone()),
        };
        Self::from_storage(inner.pinned, storage)
    }

    /// Run a dictionary mutation on a detached copy of the tree, then swap
    /// the result back in, so no cell borrow is held while the key
    /// comparator runs.
    ///
    /// Comparing array-typed keys reads their entries, and a key that
    /// aliases this container (possible when pinning has suppressed
    /// copy-on-write) would otherwise re-enter the mutably borrowed cell.
    /// With the tree detached, such a key compares against the container's
    /// pre-mutation contents, which is what the recursive comparator saw
    /// in place.
    fn with_dict_detached<R>(&mut self, f: impl FnOnce(&mut AvlTree) -> R) -> R {
        let mut tree = {
            let inner = self.0.borrow();
            match &inner.storage {
                Storage::Dictionary(tree) => tree.clone(),
                Storage::Packed(_) => unreachable!("storage mode changed mid-operation"),
            }
        };
        let result = f(&mut tree);
        self.0.borrow_mut().storage = Storage::Dictionary(tree);
        result
    }

    /// Insert or overwrite a dictionary entry, returning the new count.
    /// Only an array-typed key can ever reach the array comparator, so
    /// every other key mutates in place.
    fn dict_set(&mut self, key: Value, value: Value) -> usize {
        if key.is_array() {
            self.with_dict_detached(|tree| {
                tree.set(key, value);
                tree.len()
            })
        } else {
            let mut inner = self.0.borrow_mut();
            let tree = inner.dict_mut();
            tree.set(key, value);
            tree.len()
        }
    }

    /// Remove a dictionary entry, returning the new count.
    fn dict_remove(&mut self, key: &Value) -> usize {
        if key.is_array() {
            self.with_dict_detached(|tree| {
                tree.remove(key);
                tree.len()
            })
        } else {
            let mut inner = self.0.borrow_mut();
            let tree = inner.dict_mut();
            tree.remove(key);
            tree.len()
        }
    }

    /// Snapshot of all entries in ascending key order. Packed arrays
    /// synthesize their integer keys.
    ///
    /// This is the stable iteration order external serialization relies
    /// on, and the aliasing-safe way to walk a container that is about to
    /// be mutated.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (Value::Integer(i as i64), v.clone()))
                .collect(),
            Storage::Dictionary(tree) => {
                tree.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
            }
        }
    }

    /// Whether an entry exists under this key.
    pub fn contains_key(&self, key: &Value) -> bool {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => matches!(
                key,
                Value::Integer(n) if *n >= 0 && (*n as usize) < items.len()
            ),
            Storage::Dictionary(tree) => tree.contains_key(key),
        }
    }

    /// Whether any entry's value compares equal to `value` under the
    /// given case mode.
    pub fn contains_value(&self, value: &Value, case: Case) -> bool {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => items
                .iter()
                .any(|v| compare(v, value, case) == Ordering::Equal),
            Storage::Dictionary(tree) => tree
                .iter()
                .any(|(_, v)| compare(v, value, case) == Ordering::Equal),
        }
    }

    /// Look up the value under a key. Packed arrays require an in-range
    /// non-negative integer key; anything else is simply absent.
    pub fn get_item(&self, key: &Value) -> Option<Value> {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => {
                let idx = key.as_integer()?;
                if idx < 0 {
                    return None;
                }
                items.get(idx as usize).cloned()
            }
            Storage::Dictionary(tree) => tree.get(key).cloned(),
        }
    }

    /// Store a value under a key, returning the new entry count.
    ///
    /// Packed arrays accept integer keys in `0..len` (overwrite) or
    /// exactly `len` (append); anything else is an error. Dictionaries
    /// accept any key, overwriting an existing entry.
    pub fn set_item(&mut self, key: &Value, value: Value) -> Result<usize> {
        {
            let inner = self.0.borrow();
            if let Storage::Packed(items) = &inner.storage {
                packed_index(key, items.len())?;
            }
        }
        self.make_exclusive();
        match self.mode() {
            ArrayMode::Packed => {
                let mut inner = self.0.borrow_mut();
                let items = inner.packed_mut();
                let idx = packed_index(key, items.len())?;
                if idx == items.len() {
                    items.push(value);
                } else {
                    items[idx] = value;
                }
                Ok(items.len())
            }
            ArrayMode::Dictionary => Ok(self.dict_set(key.clone(), value)),
        }
    }

    /// Insert a value under a key, returning the new entry count.
    ///
    /// Packed arrays shift the tail up to make room (key in `0..=len`);
    /// dictionaries behave exactly like [`ArrayRef::set_item`].
    pub fn insert_item(&mut self, key: &Value, value: Value) -> Result<usize> {
        {
            let inner = self.0.borrow();
            if let Storage::Packed(items) = &inner.storage {
                packed_index(key, items.len())?;
            }
        }
        self.make_exclusive();
        match self.mode() {
            ArrayMode::Packed => {
                let mut inner = self.0.borrow_mut();
                let items = inner.packed_mut();
                let idx = packed_index(key, items.len())?;
                items.insert(idx, value);
                Ok(items.len())
            }
            ArrayMode::Dictionary => Ok(self.dict_set(key.clone(), value)),
        }
    }

    /// Append a value to the end of a packed array.
    pub fn append_item(&mut self, value: Value) -> Result<usize> {
        if self.mode() != ArrayMode::Packed {
            return Err(ArrayError::ModeMismatch {
                expected: ArrayMode::Packed,
            });
        }
        let key = Value::Integer(self.len() as i64);
        self.set_item(&key, value)
    }

    /// First key in iteration order, if any.
    pub fn first(&self) -> Option<Value> {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => {
                if items.is_empty() {
                    None
                } else {
                    Some(Value::Integer(0))
                }
            }
            Storage::Dictionary(tree) => tree.first().map(|(k, _)| k.clone()),
        }
    }

    /// Last key in iteration order, if any.
    pub fn last(&self) -> Option<Value> {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => {
                if items.is_empty() {
                    None
                } else {
                    Some(Value::Integer(items.len() as i64 - 1))
                }
            }
            Storage::Dictionary(tree) => tree.last().map(|(k, _)| k.clone()),
        }
    }

    /// Key following `key` in iteration order. The key need not be
    /// present; packed arrays truncate float keys and clamp negative
    /// positions to the front, and refuse to iterate from a string key.
    pub fn next(&self, key: &Value) -> Option<Value> {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => {
                if items.is_empty() {
                    return None;
                }
                // Stepping past i64::MAX means past the end of any array
                let idx = match key {
                    Value::String(_) => return None,
                    Value::Float(f) => {
                        if *f < 0.0 {
                            0
                        } else {
                            (*f as i64).checked_add(1)?
                        }
                    }
                    Value::Integer(n) => n.checked_add(1)?,
                    _ => return None,
                };
                if idx >= items.len() as i64 {
                    return None;
                }
                Some(Value::Integer(idx.max(0)))
            }
            Storage::Dictionary(tree) => tree.next(key).map(|(k, _)| k.clone()),
        }
    }

    /// Key preceding `key` in iteration order; the mirror of
    /// [`ArrayRef::next`], clamping past-the-end positions to the back.
    pub fn prev(&self, key: &Value) -> Option<Value> {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => {
                if items.is_empty() {
                    return None;
                }
                let len = items.len() as i64;
                // Stepping below i64::MIN means before the front
                let idx = match key {
                    Value::String(_) => return None,
                    Value::Float(f) => {
                        if *f >= len as f64 {
                            len - 1
                        } else {
                            (*f as i64).checked_sub(1)?
                        }
                    }
                    Value::Integer(n) => n.checked_sub(1)?,
                    _ => return None,
                };
                let idx = idx.min(len - 1);
                if idx < 0 {
                    return None;
                }
                Some(Value::Integer(idx))
            }
            Storage::Dictionary(tree) => tree.prev(key).map(|(k, _)| k.clone()),
        }
    }

    /// Extract the inclusive range `[start, end]` into a new container of
    /// the same mode.
    ///
    /// Packed arrays clamp a negative start to zero and an oversized end
    /// to the last slot, but error on a start past the end, a negative
    /// end, or an inverted range. Dictionaries round the bounds inward to
    /// the nearest existing keys and return an empty dictionary when
    /// nothing falls between them.
    pub fn get_range(&self, start: &Value, end: &Value) -> Result<ArrayRef> {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => {
                let (sidx, eidx) = packed_clamp_range(start, end, items.len())?;
                Ok(ArrayRef::from_values(items[sidx..=eidx].to_vec()))
            }
            Storage::Dictionary(tree) => {
                let mut nu = AvlTree::new();
                if let Some((s, e)) = resolve_dict_bounds(tree, start, end) {
                    for (k, v) in tree.iter() {
                        if compare(k, &s, Case::Insensitive) == Ordering::Less {
                            continue;
                        }
                        if compare(k, &e, Case::Insensitive) == Ordering::Greater {
                            break;
                        }
                        nu.set(k.clone(), v.clone());
                    }
                }
                Ok(Self::from_storage(false, Storage::Dictionary(nu)))
            }
        }
    }

    /// Overwrite entries from `source`, returning the new entry count.
    ///
    /// Packed arrays write the source's values sequentially starting at
    /// `start` (in `0..=len`), appending as the write position passes the
    /// end. Dictionaries copy every source entry under its own key and
    /// ignore `start`. An empty source is a no-op.
    pub fn set_range(&mut self, start: &Value, source: &ArrayRef) -> Result<usize> {
        // Snapshot first so that a source aliasing self stays readable
        // while self mutates.
        let src = source.entries();
        if src.is_empty() {
            return Ok(self.len());
        }
        match self.mode() {
            ArrayMode::Packed => {
                let start_idx = packed_index(start, self.len())?;
                self.make_exclusive();
                let mut inner = self.0.borrow_mut();
                let items = inner.packed_mut();
                let mut idx = start_idx;
                for (_, v) in src {
                    if idx == items.len() {
                        items.push(v);
                    } else {
                        items[idx] = v;
                    }
                    idx += 1;
                }
                Ok(items.len())
            }
            ArrayMode::Dictionary => {
                self.make_exclusive();
                let mut count = self.len();
                for (k, v) in src {
                    count = self.dict_set(k, v);
                }
                Ok(count)
            }
        }
    }

    /// Splice `source`'s values into a packed array at `start`, shifting
    /// the tail up. On a dictionary this is identical to
    /// [`ArrayRef::set_range`]. An empty source is a no-op.
    pub fn insert_range(&mut self, start: &Value, source: &ArrayRef) -> Result<usize> {
        let src = source.entries();
        if src.is_empty() {
            return Ok(self.len());
        }
        match self.mode() {
            ArrayMode::Packed => {
                let start_idx = packed_index(start, self.len())?;
                self.make_exclusive();
                let mut inner = self.0.borrow_mut();
                let items = inner.packed_mut();
                items.splice(start_idx..start_idx, src.into_iter().map(|(_, v)| v));
                Ok(items.len())
            }
            ArrayMode::Dictionary => {
                self.make_exclusive();
                let mut count = self.len();
                for (k, v) in src {
                    count = self.dict_set(k, v);
                }
                Ok(count)
            }
        }
    }

    /// Delete the inclusive range `[start, end]`, returning the new entry
    /// count.
    ///
    /// Packed arrays clamp and validate like [`ArrayRef::get_range`], then
    /// close the gap. Dictionaries resolve the bounds to existing keys and
    /// remove each key in the range; bounds that resolve to an empty range
    /// leave the container untouched.
    pub fn delete_range(&mut self, start: &Value, end: &Value) -> Result<usize> {
        match self.mode() {
            ArrayMode::Packed => {
                let range = {
                    let inner = self.0.borrow();
                    let items = match &inner.storage {
                        Storage::Packed(items) => items,
                        Storage::Dictionary(_) => unreachable!("mode checked above"),
                    };
                    if !start.is_integer() {
                        return Err(ArrayError::type_error("integer", start));
                    }
                    if !end.is_integer() {
                        return Err(ArrayError::type_error("integer", end));
                    }
                    if items.is_empty() {
                        return Ok(0);
                    }
                    packed_clamp_range(start, end, items.len())?
                };
                self.make_exclusive();
                let mut inner = self.0.borrow_mut();
                let items = inner.packed_mut();
                items.drain(range.0..=range.1);
                Ok(items.len())
            }
            ArrayMode::Dictionary => {
                let bounds = {
                    let inner = self.0.borrow();
                    let tree = match &inner.storage {
                        Storage::Dictionary(tree) => tree,
                        Storage::Packed(_) => unreachable!("mode checked above"),
                    };
                    match resolve_dict_bounds(tree, start, end) {
                        Some(bounds) => bounds,
                        None => return Ok(tree.len()),
                    }
                };
                self.make_exclusive();
                let doomed: Vec<Value> = {
                    let inner = self.0.borrow();
                    let tree = match &inner.storage {
                        Storage::Dictionary(tree) => tree,
                        Storage::Packed(_) => unreachable!("mode checked above"),
                    };
                    tree.iter()
                        .map(|(k, _)| k)
                        .filter(|k| {
                            compare(k, &bounds.0, Case::Insensitive) != Ordering::Less
                                && compare(k, &bounds.1, Case::Insensitive) != Ordering::Greater
                        })
                        .cloned()
                        .collect()
                };
                let mut count = self.len();
                for key in &doomed {
                    count = self.dict_remove(key);
                }
                Ok(count)
            }
        }
    }

    /// Delete a single entry; shorthand for a one-key
    /// [`ArrayRef::delete_range`].
    pub fn delete_item(&mut self, key: &Value) -> Result<usize> {
        self.delete_range(key, key)
    }

    /// Convert a packed array into a dictionary keyed by its implicit
    /// integer indices. A dictionary passes through unchanged.
    pub fn promote(self) -> ArrayRef {
        if self.mode() == ArrayMode::Dictionary {
            return self;
        }
        let pinned = self.is_pinned();
        let mut tree = AvlTree::new();
        for (k, v) in self.entries() {
            tree.set(k, v);
        }
        Self::from_storage(pinned, Storage::Dictionary(tree))
    }

    /// Collect a dictionary's keys whose values are integers at or above
    /// `threshold` into a packed array, in key order. Keys are ordered and
    /// unique, so the result works as a set.
    pub fn demote_only(&self, threshold: i64) -> Result<ArrayRef> {
        let inner = self.0.borrow();
        let tree = match &inner.storage {
            Storage::Dictionary(tree) => tree,
            Storage::Packed(_) => {
                return Err(ArrayError::ModeMismatch {
                    expected: ArrayMode::Dictionary,
                })
            }
        };
        let keys = tree
            .iter()
            .filter(|(_, v)| matches!(v, Value::Integer(n) if *n >= threshold))
            .map(|(k, _)| k.clone())
            .collect();
        Ok(ArrayRef::from_values(keys))
    }

    /// Tally `source`'s values into self: each value becomes a key here,
    /// with `delta` added to an existing integer entry, inserted outright
    /// when the key is absent, and skipped when the existing entry is not
    /// an integer. This is the core of set difference/union/intersection.
    pub fn mash(&mut self, source: &ArrayRef, delta: i64) {
        // Snapshot so that mashing a container into itself reads a stable
        // view of the source.
        for (_, key) in source.entries() {
            match self.get_item(&key) {
                Some(Value::Integer(n)) => {
                    let _ = self.set_item(&key, Value::Integer(n + delta));
                }
                Some(_) => {}
                None => {
                    let _ = self.set_item(&key, Value::Integer(delta));
                }
            }
        }
    }

    /// Whether every value in the container carries the given tag.
    /// Vacuously true when empty.
    pub fn is_homogenous(&self, tag: TypeTag) -> bool {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => items.iter().all(|v| v.tag() == tag),
            Storage::Dictionary(tree) => tree.iter().all(|(_, v)| v.tag() == tag),
        }
    }

    /// Store a value under an integer key.
    pub fn set_int_key(&mut self, key: i64, value: impl Into<Value>) -> Result<usize> {
        self.set_item(&Value::Integer(key), value.into())
    }

    /// Store a value under a string key.
    pub fn set_str_key(&mut self, key: &str, value: impl Into<Value>) -> Result<usize> {
        self.set_item(&Value::string(key), value.into())
    }

    /// Look up the value under an integer key.
    pub fn get_int_key(&self, key: i64) -> Option<Value> {
        self.get_item(&Value::Integer(key))
    }

    /// Look up the value under a string key.
    pub fn get_str_key(&self, key: &str) -> Option<Value> {
        self.get_item(&Value::string(key))
    }

    /// Look up a string value under an integer key; `None` when absent or
    /// not a string.
    pub fn get_int_key_str(&self, key: i64) -> Option<Arc<str>> {
        match self.get_int_key(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for ArrayRef {
    fn eq(&self, other: &Self) -> bool {
        if ArrayRef::ptr_eq(self, other) {
            return true;
        }
        self.entries() == other.entries()
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        match &inner.storage {
            Storage::Packed(items) => f.debug_list().entries(items.iter()).finish(),
            Storage::Dictionary(tree) => f.debug_map().entries(tree.iter()).finish(),
        }
    }
}
