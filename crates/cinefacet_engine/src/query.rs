use std::collections::BTreeSet;

use crate::facet::Facet;

/// The user's current facet selections and search text.
///
/// Selections are not validated against any vocabulary: a value no record carries
/// is kept and simply matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    selected: [BTreeSet<String>; 3],
    search_text: String,
}

/// A single user action on the query state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryAction {
    Toggle { facet: Facet, value: String },
    SetSearchText(String),
    Clear(Facet),
    ClearAll,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `value` if it is not selected, deselect it otherwise.
    /// Returns whether the value is selected afterwards.
    pub fn toggle_facet_value(&mut self, facet: Facet, value: impl Into<String>) -> bool {
        let value = value.into();
        let set = &mut self.selected[facet.index()];
        if set.remove(&value) {
            false
        } else {
            set.insert(value);
            true
        }
    }

    /// Replace the search text verbatim. Case folding happens at match time.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn clear(&mut self, facet: Facet) {
        self.selected[facet.index()].clear();
    }

    /// Drop every selection and the search text.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn apply(&mut self, action: QueryAction) {
        match action {
            QueryAction::Toggle { facet, value } => {
                self.toggle_facet_value(facet, value);
            }
            QueryAction::SetSearchText(text) => self.set_search_text(text),
            QueryAction::Clear(facet) => self.clear(facet),
            QueryAction::ClearAll => self.clear_all(),
        }
    }

    pub fn selected(&self, facet: Facet) -> &BTreeSet<String> {
        &self.selected[facet.index()]
    }

    pub fn is_selected(&self, facet: Facet, value: &str) -> bool {
        self.selected(facet).contains(value)
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// True when no facet value is selected and the search text is empty.
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.selected.iter().all(BTreeSet::is_empty)
    }
}
