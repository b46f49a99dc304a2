//! Resource views
//!
//! A `ResourceView` composes the three per-view state objects:
//! - `ListPanel` (items and the single selection)
//! - `FormPanel` (create/edit, when open)
//! - `DeleteFlow` (confirmation modal)
//!
//! `Resource` ties an entity type to its API calls and form schema,
//! so both views share one implementation.

pub mod delete;
pub mod form;
pub mod list;
pub mod tematica;
pub mod video;

pub use delete::{DeleteFlow, DeleteOutcome};
pub use form::{FieldErrors, FieldKind, FormField, FormMode, FormPanel};
pub use list::ListPanel;

use crate::api::{ApiError, ApiResult, CatalogApi};
use crate::types::Tematica;
use std::fmt::Debug;
use tracing::{info, warn};

/// Data a form schema may need besides the entity itself
#[derive(Debug, Clone, Copy, Default)]
pub struct FormContext<'a> {
    /// Options for `tematicaId` selects
    pub tematicas: &'a [Tematica],
}

/// An entity managed through a `ResourceView`
pub trait Resource: Clone + Debug + Sized {
    /// Singular, lowercase
    const NOUN: &'static str;
    /// Plural, capitalized, for panel titles
    const PLURAL: &'static str;
    const MSG_CREATED: &'static str;
    const MSG_UPDATED: &'static str;
    const MSG_DELETED: &'static str;
    /// Shown when dependents prevent deletion
    const BLOCKED_MESSAGE: &'static str = "No se puede borrar el elemento";

    fn id(&self) -> Option<u64>;
    fn with_id(self, id: u64) -> Self;

    /// One-line summary for lists and dialogs
    fn list_label(&self) -> String;
    /// Label/value pairs for the detail panel
    fn details(&self) -> Vec<(&'static str, String)>;

    fn list(api: &dyn CatalogApi) -> ApiResult<Vec<Self>>;
    fn fetch(api: &dyn CatalogApi, id: u64) -> ApiResult<Self>;
    fn create(api: &dyn CatalogApi, item: &Self) -> ApiResult<Self>;
    fn update(api: &dyn CatalogApi, id: u64, item: &Self) -> ApiResult<Self>;
    fn delete(api: &dyn CatalogApi, id: u64) -> ApiResult<()>;

    /// Number of records that block deleting `id`
    fn dependents(_api: &dyn CatalogApi, _id: u64) -> ApiResult<usize> {
        Ok(0)
    }

    /// Fields for a new entity, or pre-populated from `current`
    fn form_fields(current: Option<&Self>, ctx: &FormContext) -> Vec<FormField>;
    fn from_form(form: &FormPanel) -> Result<Self, FieldErrors>;
}

/// What the app should show after a view operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    None,
    Flash { message: String, is_error: bool },
    Error { title: String, message: String },
}

impl ViewEvent {
    pub fn flash(message: impl Into<String>) -> Self {
        ViewEvent::Flash {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn flash_error(message: impl Into<String>) -> Self {
        ViewEvent::Flash {
            message: message.into(),
            is_error: true,
        }
    }

    fn from_api(err: &ApiError) -> Self {
        ViewEvent::Error {
            title: err.title().into(),
            message: err.to_string(),
        }
    }
}

/// State for one resource type
#[derive(Debug, Clone)]
pub struct ResourceView<R: Resource> {
    pub list: ListPanel<R>,
    pub form: Option<FormPanel>,
    pub delete: DeleteFlow,
    pub loaded: bool,
}

impl<R: Resource> Default for ResourceView<R> {
    fn default() -> Self {
        Self {
            list: ListPanel::default(),
            form: None,
            delete: DeleteFlow::Idle,
            loaded: false,
        }
    }
}

impl<R: Resource> ResourceView<R> {
    /// Fetch the list from the API
    pub fn reload(&mut self, api: &dyn CatalogApi) -> ViewEvent {
        match R::list(api) {
            Ok(items) => {
                self.list.replace(items);
                self.loaded = true;
                ViewEvent::None
            }
            Err(e) => {
                warn!(kind = R::NOUN, error = %e, "failed to load list");
                ViewEvent::from_api(&e)
            }
        }
    }

    /// Open an empty create form. The selection is left untouched.
    pub fn open_create(&mut self, ctx: &FormContext) {
        self.form = Some(FormPanel::new(FormMode::Create, R::form_fields(None, ctx)));
    }

    /// Open the edit form with the current values of the selected item
    pub fn open_edit(&mut self, api: &dyn CatalogApi, ctx: &FormContext) -> ViewEvent {
        let Some(id) = self.list.selected_id() else {
            return ViewEvent::flash_error("Seleccione un elemento de la lista");
        };

        match R::fetch(api, id) {
            Ok(current) => {
                self.form = Some(FormPanel::new(
                    FormMode::Edit(id),
                    R::form_fields(Some(&current), ctx),
                ));
                ViewEvent::None
            }
            Err(e) => ViewEvent::from_api(&e),
        }
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validate and send the open form.
    ///
    /// Validation errors stay inline and nothing is sent. On API failure the
    /// form stays open so the input is not lost.
    pub fn submit(&mut self, api: &dyn CatalogApi) -> ViewEvent {
        let Some(form) = self.form.as_mut() else {
            return ViewEvent::None;
        };

        let item = match R::from_form(form) {
            Ok(item) => item,
            Err(errors) => {
                form.apply_errors(&errors);
                return ViewEvent::flash_error("Revise los campos marcados");
            }
        };
        form.apply_errors(&Vec::new());

        let mode = form.mode;
        let result = match mode {
            FormMode::Create => R::create(api, &item),
            FormMode::Edit(id) => R::update(api, id, &item.with_id(id)),
        };

        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                warn!(kind = R::NOUN, error = %e, "failed to save");
                return ViewEvent::from_api(&e);
            }
        };

        info!(kind = R::NOUN, id = ?saved.id(), ?mode, "saved");
        self.form = None;

        let reloaded = self.reload(api);
        if let Some(id) = saved.id() {
            self.list.select_id(id);
        }

        match reloaded {
            ViewEvent::None => ViewEvent::flash(match mode {
                FormMode::Create => R::MSG_CREATED,
                FormMode::Edit(_) => R::MSG_UPDATED,
            }),
            other => other,
        }
    }

    /// "Borrar": open the delete flow for the selected item
    pub fn begin_delete(&mut self, api: &dyn CatalogApi) -> ViewEvent {
        let Some(item) = self.list.selected() else {
            return ViewEvent::flash_error("Seleccione un elemento de la lista");
        };

        match DeleteFlow::begin(api, item) {
            Ok(flow) => {
                self.delete = flow;
                ViewEvent::None
            }
            Err(e) => ViewEvent::from_api(&e),
        }
    }

    /// "Confirmar" in the delete modal
    pub fn confirm_delete(&mut self, api: &dyn CatalogApi) -> ViewEvent {
        match self.delete.confirm::<R>(api) {
            Some(DeleteOutcome::Deleted(_)) => {
                self.list.clear_selection();
                match self.reload(api) {
                    ViewEvent::None => ViewEvent::flash(R::MSG_DELETED),
                    other => other,
                }
            }
            Some(DeleteOutcome::Failed(e)) => ViewEvent::from_api(&e),
            Some(DeleteOutcome::Blocked) | None => ViewEvent::None,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete.cancel();
    }
}
