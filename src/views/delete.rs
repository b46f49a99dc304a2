//! Delete confirmation flow
//!
//! `Idle -> Confirming -> (Idle | Blocked)`
//!
//! The dependency check runs before `Confirming` is entered, so the confirm
//! action is never offered for an item that has blocking dependents. It runs
//! again on confirmation in case a dependent appeared in the meantime.

use super::Resource;
use crate::api::{ApiError, CatalogApi};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    #[default]
    Idle,
    Confirming {
        id: u64,
        label: String,
    },
    Blocked {
        label: String,
        message: String,
        dependents: usize,
    },
}

/// Result of confirming a delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(u64),
    Blocked,
    Failed(ApiError),
}

impl DeleteFlow {
    /// Open the flow for `item`, checking dependents first
    pub fn begin<R: Resource>(api: &dyn CatalogApi, item: &R) -> Result<Self, ApiError> {
        let Some(id) = item.id() else {
            return Ok(DeleteFlow::Idle);
        };
        let label = item.list_label();

        let dependents = R::dependents(api, id)?;
        if dependents > 0 {
            info!(kind = R::NOUN, id, dependents, "delete blocked by dependents");
            return Ok(Self::blocked::<R>(label, dependents));
        }

        Ok(DeleteFlow::Confirming { id, label })
    }

    /// Run the confirmed delete. Only acts in `Confirming`.
    pub fn confirm<R: Resource>(&mut self, api: &dyn CatalogApi) -> Option<DeleteOutcome> {
        let DeleteFlow::Confirming { id, label } = std::mem::take(self) else {
            return None;
        };

        match R::dependents(api, id) {
            Ok(0) => {}
            Ok(dependents) => {
                *self = Self::blocked::<R>(label, dependents);
                return Some(DeleteOutcome::Blocked);
            }
            Err(e) => return Some(DeleteOutcome::Failed(e)),
        }

        match R::delete(api, id) {
            Ok(()) => {
                info!(kind = R::NOUN, id, "deleted");
                Some(DeleteOutcome::Deleted(id))
            }
            Err(e) if e.is_conflict() => {
                *self = Self::blocked::<R>(label, 0);
                Some(DeleteOutcome::Blocked)
            }
            Err(e) => Some(DeleteOutcome::Failed(e)),
        }
    }

    pub fn cancel(&mut self) {
        *self = DeleteFlow::Idle;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DeleteFlow::Idle)
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, DeleteFlow::Blocked { .. })
    }

    fn blocked<R: Resource>(label: String, dependents: usize) -> Self {
        DeleteFlow::Blocked {
            label,
            message: R::BLOCKED_MESSAGE.to_string(),
            dependents,
        }
    }
}
