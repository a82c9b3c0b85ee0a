// Filter configuration - what the user asked to see
use serde::{Deserialize, Serialize};

use crate::models::SortBy;

/// Current search text, category and sort mode
///
/// Always fully defined: an empty `search_query` matches everything and an
/// empty `selected_category` means "all categories".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub selected_category: String,
    #[serde(default)]
    pub sort_by: SortBy,
}

/// State transitions for [`FilterConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    SetSearchQuery(String),
    SetSelectedCategory(String),
    SetSortBy(SortBy),
    Reset,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn set_selected_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    /// Back to defaults in one go
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when anything differs from the defaults
    pub fn is_active(&self) -> bool {
        !self.search_query.is_empty()
            || !self.selected_category.is_empty()
            || self.sort_by != SortBy::None
    }

    /// Apply one action and hand back the new state
    pub fn reduce(mut self, action: FilterAction) -> Self {
        match action {
            FilterAction::SetSearchQuery(query) => self.set_search_query(query),
            FilterAction::SetSelectedCategory(category) => self.set_selected_category(category),
            FilterAction::SetSortBy(sort_by) => self.set_sort_by(sort_by),
            FilterAction::Reset => self.reset(),
        }
        self
    }
}
