use std::fmt;
use std::ops::Index;

use crate::{KeyError, validate_key};

/// A single key-value entry in a collision chain.
///
/// Each node exclusively owns its successor, so dropping the head of a
/// chain drops the whole chain.
#[derive(Debug, PartialEq, Eq)]
pub struct Node<V> {
    pub(crate) key: String,
    pub(crate) value: V,
    pub(crate) next: Option<Box<Node<V>>>,
}

impl<V> Node<V> {
    fn new(key: String, value: V) -> Self {
        Self {
            key,
            value,
            next: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

impl<V: fmt::Display> fmt::Display for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}]", self.key, self.value)
    }
}

/// The collision chain for one hash slot.
///
/// An ordered singly linked list of [`Node`]s with a maintained length.
/// Every keyed operation is a single O(n) pass over the chain; the table
/// keeps chains short, not the bucket.
#[derive(Debug)]
pub struct Bucket<V> {
    first: Option<Box<Node<V>>>,
    length: usize,
}

impl<V> Bucket<V> {
    pub fn new() -> Self {
        Self {
            first: None,
            length: 0,
        }
    }

    /// Returns the number of nodes in the chain.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Shorthand for `self.len() == 0`
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Inserts `value` under `key`, returning the previous value if the key
    /// was already present.
    ///
    /// An existing node is updated in place; a new key is linked at the
    /// tail of the chain. The chain is unchanged when the key is invalid.
    pub fn append(&mut self, key: &str, value: V) -> Result<Option<V>, KeyError> {
        validate_key(key)?;

        if let Some(node) = self.get_node_mut(key) {
            let old = std::mem::replace(&mut node.value, value);
            return Ok(Some(old));
        }

        let mut link = &mut self.first;
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(Node::new(key.to_owned(), value)));
        self.length += 1;

        Ok(None)
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.get_node(key).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.get_node_mut(key).map(|node| &mut node.value)
    }

    /// Returns the node holding `key`, if any.
    pub fn get_node(&self, key: &str) -> Option<&Node<V>> {
        self.iter().find(|node| node.key == key)
    }

    pub fn get_node_mut(&mut self, key: &str) -> Option<&mut Node<V>> {
        let mut current = self.first.as_deref_mut();
        while let Some(node) = current {
            if node.key == key {
                return Some(node);
            }
            current = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks the node holding `key` in a single pass.
    ///
    /// Returns whether a node was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let mut link = &mut self.first;
        loop {
            match link {
                None => return false,
                Some(node) if node.key == key => {
                    *link = node.next.take();
                    self.length -= 1;
                    return true;
                }
                Some(node) => link = &mut node.next,
            }
        }
    }

    // [adapters]

    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            current: self.first.as_deref(),
            len: self.length,
        }
    }
}

impl<V> Default for Bucket<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Drop for Bucket<V> {
    fn drop(&mut self) {
        let mut curr = self.first.take();
        while let Some(mut node) = curr {
            curr = node.next.take();
            // node goes out of scope here, calling drop
        }
    }
}

impl<V: fmt::Display> fmt::Display for Bucket<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

impl<V> Index<&str> for Bucket<V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the bucket.
    fn index(&self, key: &str) -> &V {
        self.get(key).expect("key not found in bucket")
    }
}

// [iterators]

pub struct Iter<'a, V> {
    current: Option<&'a Node<V>>,
    len: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Node<V>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.current.take() {
            None => None,
            Some(node) => {
                self.current = node.next.as_deref();
                self.len -= 1;
                Some(node)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

#[cfg(test)]
mod test {
    use super::Bucket;
    use crate::KeyError;

    const KEY1: &str = "Dummy1test";
    const KEY2: &str = "Dummy2test";
    const ABSENT: &str = "this key is not in the bucket";

    fn populated_bucket() -> Bucket<i64> {
        let mut bucket = Bucket::new();
        bucket.append(KEY1, 123456).unwrap();
        bucket.append(KEY2, 123457).unwrap();
        for i in 0..8 {
            bucket.append(&format!("filler{i}"), 100000 + i).unwrap();
        }
        bucket
    }

    #[test]
    fn append_increments_length() {
        let mut bucket = populated_bucket();
        let prev = bucket.len();

        let old = bucket.append("HashTable", 2023).unwrap();
        assert_eq!(old, None);
        assert_eq!(bucket.len(), prev + 1);
    }

    #[test]
    fn append_existing_key_updates_value_in_place() {
        let mut bucket = populated_bucket();
        let prev = bucket.len();

        let old = bucket.append(KEY1, 654321).unwrap();
        assert_eq!(old, Some(123456));
        assert_eq!(bucket.len(), prev);
        assert_eq!(bucket.get(KEY1), Some(&654321));
    }

    #[test]
    fn append_empty_key_is_rejected() {
        let mut bucket = Bucket::new();

        let err = bucket.append("", "value").unwrap_err();
        assert_eq!(err, KeyError::Empty);
        assert_eq!(bucket.len(), 0);
        assert!(bucket.is_empty());
    }

    #[test]
    fn get_returns_value_or_none() {
        let bucket = populated_bucket();

        assert_eq!(bucket.get(KEY1), Some(&123456));
        assert_eq!(bucket.get(KEY2), Some(&123457));
        assert_eq!(bucket.get(ABSENT), None);
    }

    #[test]
    fn get_node_finds_key_or_none() {
        let bucket = populated_bucket();

        let node = bucket.get_node(KEY1).unwrap();
        assert_eq!(node.key(), KEY1);
        assert_eq!(*node.value(), 123456);
        assert!(bucket.get_node(ABSENT).is_none());
    }

    #[test]
    fn remove_unlinks_and_shrinks() {
        let mut bucket = populated_bucket();

        assert!(bucket.remove(KEY2));
        assert!(bucket.remove(KEY1));
        assert_eq!(bucket.len(), 8);
        assert_eq!(bucket.get(KEY1), None);
        assert_eq!(bucket.get(KEY2), None);
    }

    #[test]
    fn remove_everything_leaves_empty_chain() {
        let mut bucket = Bucket::new();
        bucket.append(KEY1, 123456).unwrap();
        bucket.append(KEY2, 123457).unwrap();

        assert!(bucket.remove(KEY1));
        assert!(bucket.remove(KEY2));
        assert_eq!(bucket.len(), 0);
        assert_eq!(bucket.get(KEY1), None);
        assert_eq!(bucket.get(KEY2), None);
    }

    #[test]
    fn remove_from_empty_bucket_returns_false() {
        let mut bucket: Bucket<i64> = Bucket::new();

        assert!(!bucket.remove(KEY1));
        assert_eq!(bucket.len(), 0);
    }

    #[test]
    fn remove_head_relinks_first() {
        let mut bucket = Bucket::new();
        bucket.append("head", 1).unwrap();
        bucket.append("tail", 2).unwrap();

        assert!(bucket.remove("head"));
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket.get("tail"), Some(&2));
        assert_eq!(bucket.to_string(), "[tail: 2]");
    }

    #[test]
    fn display_joins_nodes_in_insertion_order() {
        let mut bucket = Bucket::new();
        bucket.append("key1", 123456789).unwrap();
        bucket.append("key2", 123456790).unwrap();

        assert_eq!(bucket.to_string(), "[key1: 123456789], [key2: 123456790]");
    }

    #[test]
    fn index_returns_value() {
        let bucket = populated_bucket();
        assert_eq!(bucket[KEY1], 123456);
    }

    #[test]
    #[should_panic(expected = "key not found in bucket")]
    fn index_panics_on_missing_key() {
        let bucket = populated_bucket();
        let _ = bucket[ABSENT];
    }

    #[test]
    fn iter_walks_chain_in_order() {
        let mut bucket = Bucket::new();
        for i in 0..10 {
            bucket.append(&format!("key{i}"), i).unwrap();
        }

        for (i, node) in bucket.iter().enumerate() {
            assert_eq!(node.key(), format!("key{i}"));
            assert_eq!(*node.value(), i);
        }
        assert_eq!(bucket.iter().count(), 10);
    }
}
