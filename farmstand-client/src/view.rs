//! Derived views
//!
//! Pure projections of the raw snapshots, recomputed from scratch on every
//! call; the inputs are never mutated. The inventory view sorts; the queue
//! view never does - arrival order is who's next.

use shared::models::{Customer, InventoryItem};
use std::cmp::Ordering;

/// Case-insensitive substring filter on name, then a stable ascending
/// case-insensitive sort by name. An empty search filters nothing; the
/// sort always applies.
pub fn filter_sort_inventory(items: &[InventoryItem], search: &str) -> Vec<InventoryItem> {
    let needle = search.trim().to_lowercase();
    let mut view: Vec<InventoryItem> = items
        .iter()
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    view.sort_by(|a, b| compare_names(&a.name, &b.name));
    view
}

/// Case-insensitive substring filter on name only. Relative FIFO order is
/// preserved verbatim.
pub fn filter_queue(queue: &[Customer], search: &str) -> Vec<Customer> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return queue.to_vec();
    }
    queue
        .iter()
        .filter(|customer| customer.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, qty: u32) -> InventoryItem {
        InventoryItem {
            name: name.into(),
            qty,
        }
    }

    fn names(view: &[InventoryItem]) -> Vec<&str> {
        view.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn filter_keeps_exactly_the_matches() {
        let items = vec![item("Eggs", 12), item("Milk", 2), item("eggplant", 5)];
        let view = filter_sort_inventory(&items, "egg");
        assert_eq!(names(&view), vec!["eggplant", "Eggs"]);
    }

    #[test]
    fn empty_search_returns_all_sorted() {
        let items = vec![item("Milk", 2), item("apples", 30), item("Eggs", 12)];
        let view = filter_sort_inventory(&items, "");
        assert_eq!(view.len(), items.len());
        assert_eq!(names(&view), vec!["apples", "Eggs", "Milk"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let items = vec![item("Goat Cheese", 4), item("cheddar", 1)];
        assert_eq!(filter_sort_inventory(&items, "CHEE").len(), 1);
        assert_eq!(filter_sort_inventory(&items, "chedDAR").len(), 1);
    }

    #[test]
    fn whitespace_search_is_identity_filter() {
        let items = vec![item("b", 1), item("a", 1)];
        let view = filter_sort_inventory(&items, "   ");
        assert_eq!(names(&view), vec!["a", "b"]);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let items = vec![item("b", 1), item("a", 1)];
        let _ = filter_sort_inventory(&items, "");
        assert_eq!(names(&items), vec!["b", "a"]);
    }

    #[test]
    fn queue_filter_preserves_relative_order() {
        let queue = vec![
            Customer::new("Dana"),
            Customer::new("alice"),
            Customer::new("Dan"),
            Customer::new("Bob"),
        ];
        let view = filter_queue(&queue, "dan");
        let got: Vec<&str> = view.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(got, vec!["Dana", "Dan"]);
    }

    #[test]
    fn queue_is_never_sorted() {
        let queue = vec![
            Customer::new("Zoe"),
            Customer::new("Abe"),
            Customer::new("Mia"),
        ];
        let view = filter_queue(&queue, "");
        let got: Vec<&str> = view.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(got, vec!["Zoe", "Abe", "Mia"]);
    }
}
