//! Active plugin tracking.

use std::collections::HashSet;

/// The set of currently active plugin ids, kept in activation order.
///
/// Mutated only by the activation controller.
#[derive(Clone, Debug, Default)]
pub struct ActiveSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl ActiveSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check membership.
    pub fn contains(&self, plugin_id: &str) -> bool {
        self.members.contains(plugin_id)
    }

    /// Active ids in activation order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Owned copy of the active ids in activation order.
    pub fn to_vec(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Number of active plugins.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if nothing is active.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Add an id. Returns false if it was already present.
    pub(crate) fn insert(&mut self, plugin_id: String) -> bool {
        if !self.members.insert(plugin_id.clone()) {
            return false;
        }
        self.order.push(plugin_id);
        true
    }

    /// Remove an id. Returns false if it was not present.
    pub(crate) fn remove(&mut self, plugin_id: &str) -> bool {
        if !self.members.remove(plugin_id) {
            return false;
        }
        self.order.retain(|id| id != plugin_id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut set = ActiveSet::new();
        assert!(set.is_empty());

        assert!(set.insert("a".to_string()));
        assert!(!set.insert("a".to_string()));
        assert!(set.contains("a"));
        assert_eq!(set.len(), 1);

        assert!(set.remove("a"));
        assert!(!set.remove("a"));
        assert!(!set.contains("a"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_activation_order() {
        let mut set = ActiveSet::new();
        set.insert("order-types".to_string());
        set.insert("kitchen-display".to_string());
        set.insert("barcode-scanner".to_string());
        set.remove("kitchen-display");
        set.insert("kitchen-display".to_string());

        let ids: Vec<&str> = set.iter().collect();
        assert_eq!(ids, vec!["order-types", "barcode-scanner", "kitchen-display"]);
        assert_eq!(set.to_vec().len(), 3);
    }
}
