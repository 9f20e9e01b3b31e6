//! Multi-selection over a collection's name list.
//!
//! Click semantics follow the usual list widget rules:
//! plain click selects one, ctrl toggles, shift selects the range from the
//! last clicked name.

/// Selected names for one collection list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    items: Vec<String>,
    selected: Vec<String>,
    anchor: Option<String>,
}

impl SelectionState {
    /// Creates a selection over `items` with nothing selected.
    #[must_use]
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            selected: Vec::new(),
            anchor: None,
        }
    }

    /// Replaces the item list, dropping selections (and the range anchor)
    /// that no longer exist.
    pub fn update_items(&mut self, items: Vec<String>) {
        self.selected.retain(|s| items.contains(s));
        if self.anchor.as_ref().is_some_and(|a| !items.contains(a)) {
            self.anchor = None;
        }
        self.items = items;
    }

    /// Applies a click on `name` and returns the new selection.
    pub fn click(&mut self, name: &str, ctrl: bool, shift: bool) -> &[String] {
        let range = if shift {
            self.anchor.as_deref().and_then(|anchor| self.range(anchor, name))
        } else {
            None
        };

        if let Some(range) = range {
            self.selected = range;
        } else if ctrl && !shift {
            if let Some(index) = self.selected.iter().position(|s| s == name) {
                self.selected.remove(index);
            } else {
                self.selected.push(name.to_string());
            }
        } else {
            self.selected = vec![name.to_string()];
        }

        self.anchor = Some(name.to_string());
        &self.selected
    }

    /// Selects every item.
    pub fn select_all(&mut self) -> &[String] {
        self.selected = self.items.clone();
        &self.selected
    }

    /// Clears the selection.
    pub fn select_none(&mut self) -> &[String] {
        self.selected.clear();
        &self.selected
    }

    /// Selects exactly the items that were not selected.
    pub fn invert(&mut self) -> &[String] {
        self.selected = self
            .items
            .iter()
            .filter(|i| !self.selected.contains(i))
            .cloned()
            .collect();
        &self.selected
    }

    /// Whether `name` is selected.
    #[must_use]
    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    /// Selected names in selection order.
    #[must_use]
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Last clicked name, the start of the next shift-click range.
    #[must_use]
    pub fn anchor(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    /// The item list the selection refers to.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    fn range(&self, from: &str, to: &str) -> Option<Vec<String>> {
        let start = self.items.iter().position(|i| i == from)?;
        let end = self.items.iter().position(|i| i == to)?;
        let (lo, hi) = if start <= end { (start, end) } else { (end, start) };
        Some(self.items[lo..=hi].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<String> {
        ["a", "b", "c", "d"].iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_plain_click_selects_one() {
        let mut sel = SelectionState::new(items());
        sel.click("a", false, false);
        assert_eq!(sel.click("c", false, false), ["c"]);
    }

    #[test]
    fn test_ctrl_click_toggles() {
        let mut sel = SelectionState::new(items());
        sel.click("a", false, false);
        sel.click("c", true, false);
        assert_eq!(sel.selected(), ["a", "c"]);
        sel.click("a", true, false);
        assert_eq!(sel.selected(), ["c"]);
    }

    #[test]
    fn test_shift_click_selects_range_either_way() {
        let mut sel = SelectionState::new(items());
        sel.click("d", false, false);
        assert_eq!(sel.click("b", false, true), ["b", "c", "d"]);
    }

    #[test]
    fn test_shift_without_anchor_selects_one() {
        let mut sel = SelectionState::new(items());
        assert_eq!(sel.click("b", false, true), ["b"]);
    }

    #[test]
    fn test_update_items_drops_missing() {
        let mut sel = SelectionState::new(items());
        sel.select_all();
        sel.update_items(vec!["a".to_string(), "d".to_string()]);
        assert_eq!(sel.selected(), ["a", "d"]);
        assert!(!sel.is_selected("b"));
    }

    #[test]
    fn test_update_items_clears_removed_anchor() {
        let mut sel = SelectionState::new(items());
        sel.click("b", false, false);
        sel.update_items(vec!["a".to_string(), "c".to_string(), "d".to_string()]);
        assert_eq!(sel.anchor(), None);

        assert_eq!(sel.click("c", false, true), ["c"]);
        assert_eq!(sel.anchor(), Some("c"));
        assert_eq!(sel.click("a", false, true), ["a", "c"]);

        sel.update_items(items());
        assert_eq!(sel.anchor(), Some("a"));
    }

    #[test]
    fn test_invert_and_none() {
        let mut sel = SelectionState::new(items());
        sel.click("b", false, false);
        assert_eq!(sel.invert(), ["a", "c", "d"]);
        assert!(sel.select_none().is_empty());
    }
}
