use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Append-only ordered collection with zero-based indexed access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence<T>(Vec<T>);

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn append(&mut self, item: T) {
        self.0.push(item);
    }

    /// Returns the item at `index`, or `NotFound` when out of range.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.0
            .get(index)
            .ok_or_else(|| Error::not_found(format!("Index {index}")))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_insertion_order() {
        let mut seq = Sequence::new();
        seq.append("b");
        seq.append("a");
        seq.append("c");
        let items: Vec<_> = seq.iter().copied().collect();
        assert_eq!(items, vec!["b", "a", "c"]);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn test_at_returns_item_by_index() {
        let seq: Sequence<u32> = (10..13).collect();
        assert_eq!(seq.at(0), Ok(&10));
        assert_eq!(seq.at(2), Ok(&12));
    }

    #[test]
    fn test_at_out_of_range_is_not_found() {
        let seq: Sequence<u32> = Sequence::new();
        assert!(seq.is_empty());
        assert!(matches!(seq.at(0), Err(Error::NotFound { .. })));
    }
}
