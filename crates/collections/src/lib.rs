//! A fixed-capacity hash table with string keys, built on separate chaining.
//!
//! Each slot of the table holds an optional [`Bucket`], a singly linked list
//! of key-value nodes. The table never resizes: capacity is chosen at
//! construction and chains simply grow on collision.

mod bucket;
mod hash_table;

pub use bucket::{Bucket, Iter, Node};
pub use hash_table::{DEFAULT_CAPACITY, HashTable, SlotLengths};

use thiserror::Error;

/// Errors raised when a key fails validation on insert/append.
///
/// Non-string keys are ruled out at compile time by the `&str` parameter
/// type, so the only runtime violation left is emptiness.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeyError {
    #[error("key cannot be an empty string")]
    Empty,
}

/// Shared key contract for [`HashTable::insert`] and [`Bucket::append`].
pub(crate) fn validate_key(key: &str) -> Result<(), KeyError> {
    if key.is_empty() {
        Err(KeyError::Empty)
    } else {
        Ok(())
    }
}
