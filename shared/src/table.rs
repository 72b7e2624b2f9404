//! Generic table model.
//!
//! Turns a record set plus field descriptors into the rows a table displays:
//! filter, then sort, then (for client-side paging) slice one page.
//! Rendering is a pure function of its inputs.

use std::cmp::Ordering;

use serde_json::Value;

use crate::Record;
use crate::field::{FieldDescriptor, lookup};

// =========================================================
// 排序 (Sorting)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: &'static str,
    pub direction: SortDirection,
}

/// "basic" ordering: missing/null first, then booleans, numbers (numeric),
/// strings (lexicographic), then anything else by its JSON text.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(v: Option<&Value>) -> u8 {
        match v {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => match rank(a).cmp(&rank(b)) {
            Ordering::Equal if rank(a) == 4 => {
                let x = a.map(Value::to_string).unwrap_or_default();
                let y = b.map(Value::to_string).unwrap_or_default();
                x.cmp(&y)
            }
            other => other,
        },
    }
}

// =========================================================
// 分页 (Paging)
// =========================================================

/// Where pagination happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paging {
    /// The backend returns one page at a time along with `totalPages`.
    Server,
    /// The full record set is loaded and sliced locally.
    Client,
}

/// Per-table UI state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    paging: Paging,
    page: usize,
    page_size: usize,
    /// Server-reported; unused for client paging.
    total_pages: usize,
    sort: Option<SortSpec>,
    filter: String,
}

impl TableState {
    pub fn new(paging: Paging, page_size: usize) -> Self {
        Self {
            paging,
            page: 0,
            page_size: page_size.max(1),
            total_pages: 0,
            sort: None,
            filter: String::new(),
        }
    }

    pub fn paging(&self) -> Paging {
        self.paging
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Header click: ascending → descending → unsorted. Clicking another
    /// column starts it at ascending and drops the previous sort.
    pub fn toggle_sort(&mut self, key: &'static str) {
        self.sort = match self.sort {
            Some(SortSpec {
                key: current,
                direction: SortDirection::Ascending,
            }) if current == key => Some(SortSpec {
                key,
                direction: SortDirection::Descending,
            }),
            Some(SortSpec {
                key: current,
                direction: SortDirection::Descending,
            }) if current == key => None,
            _ => Some(SortSpec {
                key,
                direction: SortDirection::Ascending,
            }),
        };
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.filter = text.into();
        if self.paging == Paging::Client {
            self.page = 0;
        }
    }

    /// Client paging: jump to `page` of the `total_pages` currently shown.
    /// A target outside `[0, total_pages)` is ignored and returns `false`.
    pub fn set_page(&mut self, page: usize, total_pages: usize) -> bool {
        if page >= total_pages {
            return false;
        }
        self.page = page;
        true
    }

    /// Server paging: record the page the backend just delivered.
    pub fn apply_server_page(&mut self, page: usize, total_pages: usize) {
        self.total_pages = total_pages;
        self.page = if total_pages > 0 {
            page.min(total_pages - 1)
        } else {
            0
        };
    }

    /// Back to the first page, e.g. after an upstream filter change.
    pub fn reset_page(&mut self) {
        self.page = 0;
    }
}

// =========================================================
// 渲染 (Rendering)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Position of the record in the input slice.
    pub index: usize,
    pub cells: Vec<String>,
}

/// Rows and pager state of one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub rows: Vec<RowView>,
    pub page: usize,
    pub total_pages: usize,
}

impl TableView {
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    /// Target of a "Previous" click; `None` on the first page.
    pub fn prev_page(&self) -> Option<usize> {
        self.has_prev().then(|| self.page - 1)
    }

    /// Target of a "Next" click; `None` on the last page.
    pub fn next_page(&self) -> Option<usize> {
        self.has_next().then(|| self.page + 1)
    }

    /// "Page 0 of 0" for an empty table.
    pub fn page_label(&self) -> String {
        let current = if self.total_pages == 0 { 0 } else { self.page + 1 };
        format!("Page {} of {}", current, self.total_pages)
    }
}

/// Whether any visible cell contains `filter`, ignoring case.
pub fn matches_filter(record: &Record, fields: &[FieldDescriptor], filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let needle = filter.to_lowercase();
    fields
        .iter()
        .any(|f| f.cell_text(record).to_lowercase().contains(&needle))
}

/// Indices of the records that pass the filter, in display order.
pub fn ordered_indices(records: &[Record], fields: &[FieldDescriptor], state: &TableState) -> Vec<usize> {
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches_filter(r, fields, &state.filter))
        .map(|(i, _)| i)
        .collect();

    if let Some(spec) = state.sort {
        // slice::sort_by is stable, so equal keys keep their input order
        // in both directions.
        indices.sort_by(|&a, &b| {
            let ord = compare_values(lookup(&records[a], spec.key), lookup(&records[b], spec.key));
            match spec.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
    indices
}

pub fn render(records: &[Record], fields: &[FieldDescriptor], state: &TableState) -> TableView {
    let indices = ordered_indices(records, fields, state);

    let (visible, page, total_pages) = match state.paging {
        Paging::Server => (indices, state.page, state.total_pages),
        Paging::Client => {
            let total_pages = indices.len().div_ceil(state.page_size);
            let page = state.page.min(total_pages.saturating_sub(1));
            let visible = indices
                .into_iter()
                .skip(page * state.page_size)
                .take(state.page_size)
                .collect();
            (visible, page, total_pages)
        }
    };

    let rows = visible
        .into_iter()
        .map(|index| RowView {
            index,
            cells: fields.iter().map(|f| f.cell_text(&records[index])).collect(),
        })
        .collect();

    TableView {
        rows,
        page,
        total_pages,
    }
}

#[cfg(test)]
mod tests;
