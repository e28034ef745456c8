use serde::{Deserialize, Serialize};

use crate::domain::entities::row::Row;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub field: String,
    pub term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub global_search: String,
    pub column_filters: Vec<ColumnFilter>,
}

impl FilterState {
    pub fn search(term: &str) -> Self {
        Self {
            global_search: term.to_string(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.global_search.trim().is_empty()
            && self
                .column_filters
                .iter()
                .all(|filter| filter.term.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn total_pages(&self, filtered_count: usize) -> usize {
        filtered_count.div_ceil(self.page_size)
    }

    pub fn clamp(&self, filtered_count: usize) -> usize {
        self.page.clamp(1, self.total_pages(filtered_count).max(1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    pub columns: &'a [String],
    pub rows: Vec<&'a Row>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
}
