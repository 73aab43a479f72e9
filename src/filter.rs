//! List Filter
//!
//! Set of selected list ids. Empty means every list is shown.

use std::collections::BTreeSet;

use crate::models::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    selected: BTreeSet<String>,
}

impl ListFilter {
    /// Flip `list_id`; returns whether it is now selected.
    pub fn toggle(&mut self, list_id: &str) -> bool {
        if self.selected.remove(list_id) {
            false
        } else {
            self.selected.insert(list_id.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, list_id: &str) -> bool {
        self.selected.contains(list_id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn admits(&self, task: &Task) -> bool {
        self.selected.is_empty() || self.selected.contains(&task.list_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::task;

    #[test]
    fn test_empty_admits_everything() {
        let filter = ListFilter::default();
        assert!(filter.admits(&task("a", "l1", None)));
        assert!(filter.admits(&task("b", "l2", None)));
    }

    #[test]
    fn test_toggle() {
        let mut filter = ListFilter::default();
        assert!(filter.toggle("l1"));
        assert!(filter.admits(&task("a", "l1", None)));
        assert!(!filter.admits(&task("b", "l2", None)));
        assert!(!filter.toggle("l1"));
        assert!(filter.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut filter = ListFilter::default();
        filter.toggle("l1");
        filter.toggle("l2");
        assert_eq!(filter.len(), 2);
        filter.clear();
        assert!(filter.is_empty());
    }
}
