/// Tracks the checked rows of the roles table.
///
/// Rows are keyed by role name, so a reordered list keeps its checks. The
/// tracker does not know the list itself: checking a name that is not shown
/// is allowed. Insertion order is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    rows: Vec<String>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the row's membership and returns whether it is now checked.
    pub fn toggle(&mut self, row: &str) -> bool {
        match self.rows.iter().position(|r| r == row) {
            Some(index) => {
                self.rows.remove(index);
                false
            }
            None => {
                self.rows.push(row.to_string());
                true
            }
        }
    }

    pub fn is_selected(&self, row: &str) -> bool {
        self.rows.iter().any(|r| r == row)
    }

    pub fn selected(&self) -> &[String] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut selection = SelectionTracker::new();
        assert!(selection.toggle("ROLE_ADMIN"));
        assert!(selection.is_selected("ROLE_ADMIN"));
        assert!(!selection.toggle("ROLE_ADMIN"));
        assert!(!selection.is_selected("ROLE_ADMIN"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selected_counts_net_toggles() {
        let mut selection = SelectionTracker::new();
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("c");
        selection.toggle("b");
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.selected(), &["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_unknown_rows_are_accepted() {
        let mut selection = SelectionTracker::new();
        assert!(selection.toggle("not-in-any-list"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut selection = SelectionTracker::new();
        selection.toggle("a");
        selection.toggle("b");
        selection.clear();
        assert!(selection.is_empty());
        assert!(!selection.is_selected("a"));
    }
}
