use std::fmt;
use std::ops::Index;
use std::slice;

use crate::bucket::Bucket;
use crate::{KeyError, validate_key};

/// Suggested table size when the caller has no better estimate.
pub const DEFAULT_CAPACITY: usize = 1000;

/// A fixed-capacity hash table mapping string keys to values of type `V`.
///
/// Collisions are resolved by separate chaining: each slot holds an optional
/// [`Bucket`], created lazily on the first insert that hashes to it. The
/// capacity never changes after construction; load is absorbed entirely by
/// chain length.
///
/// Missing keys are signaled with `None` across all lookup paths. The
/// [`Index`] impl panics on a miss instead, like `std::collections::HashMap`.
#[derive(Debug)]
pub struct HashTable<V> {
    table: Vec<Option<Bucket<V>>>,
    length: usize,
}

impl<V> HashTable<V> {
    /// Creates a table with `capacity` slots, all empty.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be a positive integer");
        Self {
            table: (0..capacity).map(|_| None).collect(),
            length: 0,
        }
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of slots, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Inserts `value` under `key`, returning the previous value if the key
    /// was already present.
    ///
    /// A new key is appended to the chain of its slot (creating the bucket
    /// on first use) and counted; an existing key is updated in place and
    /// leaves `len` untouched. A rejected key leaves the table unmodified.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, KeyError> {
        validate_key(key)?;

        let pos = self.slot(key);
        let bucket = self.table[pos].get_or_insert_with(Bucket::new);
        let old = bucket.append(key, value)?;
        if old.is_none() {
            self.length += 1;
        }

        Ok(old)
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.table[self.slot(key)].as_ref()?.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let pos = self.slot(key);
        self.table[pos].as_mut()?.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry stored under `key`.
    ///
    /// Returns whether an entry was removed; a miss (empty slot or key
    /// absent from the chain) is not an error. The emptied bucket stays
    /// allocated in its slot, which is observable only through diagnostics.
    pub fn remove(&mut self, key: &str) -> bool {
        let pos = self.slot(key);
        let Some(bucket) = self.table[pos].as_mut() else {
            return false;
        };

        let removed = bucket.remove(key);
        if removed {
            self.length -= 1;
        }
        removed
    }

    // [adapters]

    /// Occupancy count per slot, in slot order, 0 for slots never populated.
    ///
    /// Diagnostic surface for distribution reporting; the sum of all yielded
    /// counts equals `self.len()`.
    pub fn slot_lengths(&self) -> SlotLengths<'_, V> {
        SlotLengths {
            slots: self.table.iter(),
        }
    }

    // [private]

    fn slot(&self, key: &str) -> usize {
        (Self::hash(key) % self.table.len() as u64) as usize
    }

    /// Case-insensitive polynomial hash: `h = h*31 + code_point(c)` over the
    /// lowercased character sequence, wrapping in `u64`.
    ///
    /// Characters whose lowercase form expands to several characters are
    /// folded one produced character at a time, so the result is
    /// deterministic for any input.
    fn hash(key: &str) -> u64 {
        let mut hash: u64 = 0;
        for c in key.chars().flat_map(char::to_lowercase) {
            hash = hash.wrapping_mul(31).wrapping_add(c as u64);
        }
        hash
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V: fmt::Display> fmt::Display for HashTable<V> {
    /// One line per slot in slot order; absent slots render as empty lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, slot) in self.table.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            if let Some(bucket) = slot {
                write!(f, "{bucket}")?;
            }
        }
        Ok(())
    }
}

impl<V> Index<&str> for HashTable<V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the table.
    fn index(&self, key: &str) -> &V {
        self.get(key).expect("key not found in hashtable")
    }
}

// [iterators]

pub struct SlotLengths<'a, V> {
    slots: slice::Iter<'a, Option<Bucket<V>>>,
}

impl<V> Iterator for SlotLengths<'_, V> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .next()
            .map(|slot| slot.as_ref().map_or(0, Bucket::len))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}
