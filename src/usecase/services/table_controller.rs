use std::cmp::Ordering;

use log::debug;

use crate::domain::entities::dataset::{
    ColumnFilter, FilterState, PageState, SortDirection, SortSpec, TableView,
};
use crate::domain::entities::row::{collate, Dataset, Row, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("field {0:?} is not configured as filterable")]
    FieldNotFilterable(String),
    #[error("page size must be greater than zero (got {0})")]
    InvalidPageSize(usize),
}

// the dataset is passed in on every call and never modified
#[derive(Debug, Clone)]
pub struct TableController {
    searchable_fields: Vec<String>,
    filterable_fields: Vec<String>,
    filter: FilterState,
    sort: Option<SortSpec>,
    page: PageState,
}

impl TableController {
    pub fn new(
        page_size: usize,
        searchable_fields: Vec<String>,
        filterable_fields: Vec<String>,
    ) -> Result<Self, TableError> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize(page_size));
        }
        Ok(Self {
            searchable_fields,
            filterable_fields,
            filter: FilterState::default(),
            sort: None,
            page: PageState { page: 1, page_size },
        })
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort_state(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size
    }

    pub fn filterable_fields(&self) -> &[String] {
        &self.filterable_fields
    }

    pub fn set_search(&mut self, term: &str) {
        if self.filter.global_search != term {
            self.filter.global_search = term.to_string();
            self.page.page = 1;
        }
    }

    pub fn set_column_filter(&mut self, field: &str, term: &str) -> Result<(), TableError> {
        if !self.filterable_fields.iter().any(|name| name == field) {
            return Err(TableError::FieldNotFilterable(field.to_string()));
        }

        let filters = &mut self.filter.column_filters;
        match filters.iter_mut().find(|filter| filter.field == field) {
            Some(existing) if existing.term == term => return Ok(()),
            Some(existing) => existing.term = term.to_string(),
            None => filters.push(ColumnFilter {
                field: field.to_string(),
                term: term.to_string(),
            }),
        }
        self.page.page = 1;
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        if self.filter != FilterState::default() {
            self.filter = FilterState::default();
            self.page.page = 1;
        }
    }

    // Same field flips the direction; a new field starts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        let direction = match &self.sort {
            Some(current) if current.field == field => current.direction.flipped(),
            _ => SortDirection::Asc,
        };
        self.sort = Some(SortSpec {
            field: field.to_string(),
            direction,
        });
        self.page.page = 1;
    }

    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        if self.sort != sort {
            self.sort = sort;
            self.page.page = 1;
        }
    }

    pub fn set_page(&mut self, page: usize, dataset: &Dataset) {
        self.page.page = page;
        self.page.page = self.current_page(dataset);
    }

    pub fn next_page(&mut self, dataset: &Dataset) {
        let page = self.current_page(dataset) + 1;
        self.set_page(page, dataset);
    }

    pub fn prev_page(&mut self, dataset: &Dataset) {
        let page = self.current_page(dataset).saturating_sub(1);
        self.set_page(page, dataset);
    }

    pub fn current_page(&self, dataset: &Dataset) -> usize {
        self.page.clamp(self.filtered_indices(dataset).len())
    }

    pub fn total_pages(&self, dataset: &Dataset) -> usize {
        self.page.total_pages(self.filtered_indices(dataset).len())
    }

    pub fn filtered_indices(&self, dataset: &Dataset) -> Vec<usize> {
        if self.searchable_fields.is_empty() {
            filter_indices(dataset, &self.filter, &text_columns(dataset))
        } else {
            filter_indices(dataset, &self.filter, &self.searchable_fields)
        }
    }

    pub fn ordered_indices(&self, dataset: &Dataset) -> Vec<usize> {
        let mut indices = self.filtered_indices(dataset);
        if let Some(sort) = &self.sort {
            sort_indices(dataset, &mut indices, sort);
        }
        indices
    }

    pub fn ordered_rows<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Row> {
        self.ordered_indices(dataset)
            .into_iter()
            .filter_map(|idx| dataset.row(idx))
            .collect()
    }

    pub fn view<'a>(&self, dataset: &'a Dataset) -> TableView<'a> {
        let ordered = self.ordered_rows(dataset);
        let filtered_count = ordered.len();
        let page = self.page.clamp(filtered_count);
        let rows = paginate(&ordered, page, self.page.page_size).to_vec();

        debug!(
            "table view: {} of {} rows match, page {page} shows {}",
            filtered_count,
            dataset.len(),
            rows.len()
        );

        TableView {
            columns: dataset.columns(),
            rows,
            page,
            page_size: self.page.page_size,
            total_pages: self.page.total_pages(filtered_count),
            filtered_count,
        }
    }
}

// columns whose value in the first row is text
pub fn text_columns(dataset: &Dataset) -> Vec<String> {
    let Some(first) = dataset.row(0) else {
        return Vec::new();
    };
    dataset
        .columns()
        .iter()
        .filter(|column| matches!(first.get(column), Value::Text(_)))
        .cloned()
        .collect()
}

pub fn filter_indices(dataset: &Dataset, filter: &FilterState, searchable: &[String]) -> Vec<usize> {
    let search = filter.global_search.trim().to_lowercase();
    let constraints: Vec<(&str, String)> = filter
        .column_filters
        .iter()
        .map(|constraint| (constraint.field.as_str(), constraint.term.trim().to_lowercase()))
        .filter(|(_, term)| !term.is_empty())
        .collect();

    dataset
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            let search_hit = search.is_empty()
                || searchable
                    .iter()
                    .any(|field| contains_folded(row.get(field), &search));
            search_hit
                && constraints
                    .iter()
                    .all(|(field, term)| contains_folded(row.get(field), term))
        })
        .map(|(idx, _)| idx)
        .collect()
}

fn contains_folded(value: &Value, needle: &str) -> bool {
    !value.is_null() && value.to_text().to_lowercase().contains(needle)
}

// Stable sort. Null cells go last in both directions.
pub fn sort_indices(dataset: &Dataset, indices: &mut [usize], sort: &SortSpec) {
    indices.sort_by(|&a, &b| {
        let (Some(left), Some(right)) = (dataset.row(a), dataset.row(b)) else {
            return Ordering::Equal;
        };
        compare_for_sort(left.get(&sort.field), right.get(&sort.field), sort.direction)
    });
}

pub fn compare_for_sort(left: &Value, right: &Value, direction: SortDirection) -> Ordering {
    match (left.is_null(), right.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = compare_values(left, right);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => collate(&left.to_text(), &right.to_text()),
    }
}

pub fn paginate<'s, T>(items: &'s [T], page: usize, page_size: usize) -> &'s [T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
