//! Generic CRUD screen controller.
//!
//! One [`CrudScreen`] backs every entity list: it owns the table state, the
//! modal, the loaded records and the class scope, and turns user actions into
//! [`ApiRequest`]s. The caller runs the requests and reports the results back
//! through the `finish_*` methods.

use serde_json::Value;

use crate::Record;
use crate::entities::EntitySpec;
use crate::error::{ApiError, ApiErrorKind, ApiResult};
use crate::form::{FormMode, ModalState};
use crate::notice::Notice;
use crate::protocol::{ApiRequest, PageResponse, response_message};
use crate::school::ClassScope;
use crate::table::{Paging, TableState, TableView, render};

/// Generation stamp of one list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    page: usize,
}

impl LoadTicket {
    pub fn page(&self) -> usize {
        self.page
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingLoad {
    pub ticket: LoadTicket,
    pub request: ApiRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load started after this one; the result was dropped.
    Stale,
    /// Previous rows are kept.
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrudScreen {
    spec: EntitySpec,
    table: TableState,
    modal: ModalState,
    records: Vec<Record>,
    scope: ClassScope,
    generation: u64,
    loading: bool,
}

impl CrudScreen {
    pub fn new(spec: EntitySpec, page_size: usize) -> Self {
        Self {
            spec,
            table: TableState::new(spec.paging, page_size),
            modal: ModalState::closed(spec.fields),
            records: Vec::new(),
            scope: ClassScope::default(),
            generation: 0,
            loading: false,
        }
    }

    pub fn spec(&self) -> &EntitySpec {
        &self.spec
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn modal_mut(&mut self) -> &mut ModalState {
        &mut self.modal
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn scope(&self) -> &ClassScope {
        &self.scope
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn view(&self) -> TableView {
        render(&self.records, self.spec.fields, &self.table)
    }

    // =========================================================
    // 列表加载
    // =========================================================

    /// Starts loading `page` (ignored for client-paged entities, which load
    /// everything). Any load still in flight becomes stale.
    pub fn begin_load(&mut self, page: usize) -> ApiResult<PendingLoad> {
        if self.spec.scoped && !self.scope.is_complete() {
            return Err(ApiError::new(
                ApiErrorKind::Rejected,
                format!("class {} has no sections", self.scope.class_name()),
            ));
        }
        let page = match self.spec.paging {
            Paging::Server => page,
            Paging::Client => 0,
        };
        let request = self
            .spec
            .list_request(page, self.table.page_size(), &self.scope)?;

        self.generation += 1;
        self.loading = true;
        Ok(PendingLoad {
            ticket: LoadTicket {
                generation: self.generation,
                page,
            },
            request,
        })
    }

    /// Reloads the page currently shown, e.g. after a mutation.
    pub fn begin_reload(&mut self) -> ApiResult<PendingLoad> {
        self.begin_load(self.table.page())
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: ApiResult<PageResponse>) -> LoadOutcome {
        if ticket.generation != self.generation {
            return LoadOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                if self.spec.paging == Paging::Server {
                    self.table.apply_server_page(ticket.page, page.total_pages);
                }
                self.records = page.content;
                LoadOutcome::Applied
            }
            Err(e) => LoadOutcome::Failed(e),
        }
    }

    /// Pager click. Client paging moves locally and returns `None`; server
    /// paging returns the load to run, and the page index only changes once
    /// it completes. A target outside `[0, total_pages)` changes nothing and
    /// returns `None`.
    pub fn change_page(&mut self, page: usize) -> Option<ApiResult<PendingLoad>> {
        match self.spec.paging {
            Paging::Client => {
                let total_pages = self.view().total_pages;
                self.table.set_page(page, total_pages);
                None
            }
            Paging::Server if page < self.table.total_pages() => Some(self.begin_load(page)),
            Paging::Server => None,
        }
    }

    pub fn toggle_sort(&mut self, key: &'static str) {
        self.table.toggle_sort(key);
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.table.set_filter(text);
    }

    // =========================================================
    // 班级范围
    // =========================================================

    /// Returns whether the scope changed; a change goes back to page 0.
    pub fn set_class(&mut self, class_name: &str) -> bool {
        if self.scope.class_name() == class_name {
            return false;
        }
        self.scope.set_class(class_name);
        self.table.reset_page();
        true
    }

    pub fn set_section(&mut self, section: &str) -> bool {
        if self.scope.section() == section || !self.scope.set_section(section) {
            return false;
        }
        self.table.reset_page();
        true
    }

    // =========================================================
    // 增改删
    // =========================================================

    /// `false` for read-only entities.
    pub fn open_add(&mut self) -> bool {
        if !self.spec.is_creatable() {
            return false;
        }
        let defaults = self.spec.defaults(&self.scope);
        self.modal
            .open_add(format!("Add {}", self.spec.singular), &defaults);
        true
    }

    /// Opens the edit modal for `records()[index]`; `false` when the entity
    /// is not editable or the index is out of range. Scoped entities keep the
    /// class and section currently selected.
    pub fn open_edit(&mut self, index: usize) -> bool {
        if !self.spec.is_editable() {
            return false;
        }
        let Some(entity) = self.records.get(index).cloned() else {
            return false;
        };
        let overrides = self.spec.edit_overrides(&self.scope);
        self.modal
            .open_edit(format!("Edit {}", self.spec.singular), entity, &overrides);
        true
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
    }

    /// Request for the modal's submit button.
    pub fn submit_request(&self) -> ApiResult<ApiRequest> {
        if !self.modal.is_visible() {
            return Err(ApiError::new(ApiErrorKind::Rejected, "no form is open"));
        }
        let draft = self.modal.submission();
        match (self.modal.mode(), self.modal.entity()) {
            (FormMode::Edit, Some(entity)) => self.spec.update_request(entity, &draft),
            _ => self.spec.create_request(&draft),
        }
    }

    /// Success closes the modal (the caller then reloads); failure keeps it
    /// open with the draft intact.
    pub fn finish_submit(&mut self, result: ApiResult<Value>) -> Notice {
        match result {
            Ok(value) => {
                let verb = match self.modal.mode() {
                    FormMode::Add => "added",
                    FormMode::Edit => "updated",
                };
                self.modal.close();
                Notice::success(response_message(&value).unwrap_or_else(|| {
                    format!("{} {} successfully.", self.spec.singular, verb)
                }))
            }
            Err(e) => Notice::error(e.message),
        }
    }

    pub fn delete_request(&self, index: usize) -> ApiResult<ApiRequest> {
        let entity = self
            .records
            .get(index)
            .ok_or_else(|| ApiError::new(ApiErrorKind::NotFound, "row no longer exists"))?;
        self.spec.delete_request(entity)
    }

    /// Delete offered from the edit modal.
    pub fn modal_delete_request(&self) -> ApiResult<ApiRequest> {
        match self.modal.entity() {
            Some(entity) if self.modal.mode().allows_delete() => self.spec.delete_request(entity),
            _ => Err(ApiError::new(ApiErrorKind::Rejected, "nothing to delete")),
        }
    }

    /// Rows are left untouched either way; a success is followed by a reload.
    pub fn finish_delete(&mut self, result: ApiResult<Value>) -> Notice {
        match result {
            Ok(value) => {
                self.modal.close();
                Notice::success(response_message(&value).unwrap_or_else(|| {
                    format!("{} deleted successfully.", self.spec.singular)
                }))
            }
            Err(e) => Notice::error(e.message),
        }
    }
}
