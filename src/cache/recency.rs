//! Recency List Module
//!
//! Ordered key-value storage with O(1) move-to-back, pop-front and pop-back.
//!
//! Nodes live in an arena addressed by index and are chained into a doubly
//! linked list; a hash index maps each key to its node. Freed slots are kept
//! on a free list and reused by later inserts.

use std::collections::HashMap;

// == Node ==
/// Arena slot holding one entry and its neighbours.
#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Ordered mapping from key to value.
///
/// - Front = least recently touched
/// - Back = most recently touched
#[derive(Debug)]
pub struct RecencyList<V> {
    index: HashMap<String, usize>,
    nodes: Vec<Option<Node<V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
}

impl<V> Default for RecencyList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RecencyList<V> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
        }
    }

    // == Length ==
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Contains ==
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    // == Get ==
    /// Returns the value for `key` without changing its position.
    pub fn get(&self, key: &str) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.nodes[idx].as_ref().map(|node| &node.value)
    }

    // == Push Back ==
    /// Appends a new entry at the back (most recently touched end).
    ///
    /// The key must not already be present; callers check with `contains` first.
    pub fn push_back(&mut self, key: String, value: V) {
        debug_assert!(!self.index.contains_key(&key), "duplicate key {}", key);

        let idx = self.alloc_node();
        self.nodes[idx] = Some(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.link_back(idx);
        self.index.insert(key, idx);
    }

    // == Move To Back ==
    /// Moves `key` to the back. Returns false if the key is absent.
    pub fn move_to_back(&mut self, key: &str) -> bool {
        let Some(&idx) = self.index.get(key) else {
            return false;
        };

        if self.tail != Some(idx) {
            self.unlink(idx);
            self.link_back(idx);
        }
        true
    }

    // == Pop Front ==
    /// Removes and returns the least recently touched entry.
    pub fn pop_front(&mut self) -> Option<(String, V)> {
        let idx = self.head?;
        self.remove_node(idx)
    }

    // == Pop Back ==
    /// Removes and returns the most recently touched entry.
    pub fn pop_back(&mut self) -> Option<(String, V)> {
        let idx = self.tail?;
        self.remove_node(idx)
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
    }

    // == Iteration ==
    /// Iterates entries from front (least recent) to back (most recent).
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    /// Iterates keys from front to back.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates values from front to back.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    fn remove_node(&mut self, idx: usize) -> Option<(String, V)> {
        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.index.remove(&node.key);
        self.free_list.push(idx);
        Some((node.key, node.value))
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = old_tail;
            node.next = None;
        }

        match old_tail {
            Some(tail_idx) => {
                if let Some(tail) = &mut self.nodes[tail_idx] {
                    tail.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }

        self.tail = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match &self.nodes[idx] {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn alloc_node(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            self.nodes.push(None);
            self.nodes.len() - 1
        }
    }
}

// == Iterator ==
/// Front-to-back iterator over a [`RecencyList`].
pub struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.nodes[idx].as_ref()?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((node.key.as_str(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(keys: &[&str]) -> RecencyList<u32> {
        let mut list = RecencyList::new();
        for (i, key) in keys.iter().enumerate() {
            list.push_back(key.to_string(), i as u32);
        }
        list
    }

    fn order(list: &RecencyList<u32>) -> Vec<&str> {
        list.keys().collect()
    }

    #[test]
    fn test_recency_new() {
        let list: RecencyList<u32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    fn test_push_back_keeps_insertion_order() {
        let list = list_of(&["a", "b", "c"]);

        assert_eq!(list.len(), 3);
        assert_eq!(order(&list), vec!["a", "b", "c"]);
        assert_eq!(list.get("b"), Some(&1));
        assert!(list.contains("c"));
        assert!(!list.contains("d"));
    }

    #[test]
    fn test_move_to_back() {
        let mut list = list_of(&["a", "b", "c"]);

        assert!(list.move_to_back("a"));
        assert_eq!(order(&list), vec!["b", "c", "a"]);

        // Middle element
        assert!(list.move_to_back("c"));
        assert_eq!(order(&list), vec!["b", "a", "c"]);

        // Already at the back
        assert!(list.move_to_back("c"));
        assert_eq!(order(&list), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_move_to_back_missing_key() {
        let mut list = list_of(&["a", "b"]);

        assert!(!list.move_to_back("zzz"));
        assert_eq!(order(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_pop_front_and_back() {
        let mut list = list_of(&["a", "b", "c"]);

        assert_eq!(list.pop_front(), Some(("a".to_string(), 0)));
        assert_eq!(list.pop_back(), Some(("c".to_string(), 2)));
        assert_eq!(order(&list), vec!["b"]);

        assert_eq!(list.pop_back(), Some(("b".to_string(), 1)));
        assert!(list.is_empty());
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = list_of(&["a", "b"]);

        list.pop_front();
        list.push_back("c".to_string(), 7);

        assert_eq!(list.nodes.len(), 2);
        assert_eq!(order(&list), vec!["b", "c"]);
        assert_eq!(list.get("c"), Some(&7));
        assert_eq!(list.get("a"), None);
    }

    #[test]
    fn test_clear() {
        let mut list = list_of(&["a", "b", "c"]);

        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.pop_front(), None);

        list.push_back("d".to_string(), 3);
        assert_eq!(order(&list), vec!["d"]);
    }

    #[test]
    fn test_values_follow_order() {
        let mut list = list_of(&["a", "b", "c"]);
        list.move_to_back("a");

        let values: Vec<u32> = list.values().copied().collect();
        assert_eq!(values, vec![1, 2, 0]);
        assert_eq!(list.iter().len(), 3);
    }
}
