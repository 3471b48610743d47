//! Searchable multi-select over the symptom catalog.

use crate::domain::SymptomOption;

/// Symptom selection state: catalog options, a filter query, a cursor over the
/// filtered options and the selected symptoms in the order they were picked.
#[derive(Debug, Clone, Default)]
pub struct SymptomPicker {
    options: Vec<SymptomOption>,
    selected: Vec<SymptomOption>,
    query: String,
    cursor: usize,
}

impl SymptomPicker {
    /// Replace the catalog options. The selection is kept.
    pub fn set_options(&mut self, options: Vec<SymptomOption>) {
        self.options = options;
        self.clamp_cursor();
    }

    #[must_use]
    pub fn options(&self) -> &[SymptomOption] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> &[SymptomOption] {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.iter().any(|s| s.value == value)
    }

    /// Add `option` unless an option with the same value is already selected.
    pub fn select(&mut self, option: SymptomOption) {
        if !self.is_selected(&option.value) {
            self.selected.push(option);
        }
    }

    /// Remove the selected option with this value, if any.
    pub fn deselect(&mut self, value: &str) {
        self.selected.retain(|s| s.value != value);
    }

    /// Select `option`, or deselect it if it is already selected.
    pub fn toggle(&mut self, option: &SymptomOption) {
        if self.is_selected(&option.value) {
            self.deselect(&option.value);
        } else {
            self.selected.push(option.clone());
        }
    }

    /// Toggle the option under the cursor.
    pub fn toggle_highlighted(&mut self) {
        if let Some(option) = self.highlighted().cloned() {
            self.toggle(&option);
        }
    }

    /// Drop the most recently selected option.
    pub fn pop_selected(&mut self) -> Option<SymptomOption> {
        self.selected.pop()
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.cursor = 0;
    }

    pub fn pop_query(&mut self) -> Option<char> {
        let popped = self.query.pop();
        self.clamp_cursor();
        popped
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Options whose label contains the query (case-insensitive).
    #[must_use]
    pub fn filtered(&self) -> Vec<&SymptomOption> {
        let needle = self.query.trim().to_lowercase();
        self.options
            .iter()
            .filter(|o| needle.is_empty() || o.label.to_lowercase().contains(&needle))
            .collect()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<&SymptomOption> {
        self.filtered().get(self.cursor).copied()
    }

    pub fn move_down(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn move_up(&mut self) {
        let len = self.filtered().len();
        if len > 0 {
            self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.filtered().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}
