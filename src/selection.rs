//! Multi-selection of result rows
//!
//! Keyed by item id, kept in the order items were picked. Independent from
//! the result set: selected items survive new queries.

use crate::types::ResultItem;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    items: Vec<ResultItem>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item`. No-op if an item with the same id is already selected or
    /// the item is a synthetic row. Returns whether the set changed.
    pub fn add(&mut self, item: ResultItem) -> bool {
        if item.is_sentinel() || self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the item with `id`. Returns whether the set changed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Select if absent, deselect if present
    pub fn toggle(&mut self, item: ResultItem) -> bool {
        if self.contains(item.id) {
            self.remove(item.id)
        } else {
            self.add(item)
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.items.is_empty();
        self.items.clear();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_is_idempotent_by_id() {
        let mut selection = SelectionSet::new();
        assert!(selection.add(ResultItem::new(1, "Cathy")));
        assert!(!selection.add(ResultItem::new(1, "Cathy (renamed)")));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.items()[0].name, "Cathy");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut selection = SelectionSet::new();
        assert!(!selection.remove(3));
        selection.add(ResultItem::new(3, "Doggo"));
        assert!(selection.remove(3));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_sentinel_rows_cannot_be_selected() {
        let mut selection = SelectionSet::new();
        assert!(!selection.add(ResultItem::no_options_found()));
        assert!(!selection.toggle(ResultItem::loading()));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_and_order() {
        let mut selection = SelectionSet::new();
        selection.toggle(ResultItem::new(2, "b"));
        selection.toggle(ResultItem::new(1, "a"));
        selection.toggle(ResultItem::new(3, "c"));
        selection.toggle(ResultItem::new(1, "a"));

        let ids: Vec<i64> = selection.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![2, 3]);

        assert!(selection.clear());
        assert!(!selection.clear());
    }
}
