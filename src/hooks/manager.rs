//! Hook manager: drives the controller against a [`HookService`].
//!
//! Each operation changes the local lists first, then awaits the remote
//! request and records its completion. Transport failures are logged and
//! reported as [`Delivery::Failed`]; the local change stays in place.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use tracing::{error, info};

use super::controller::HookListController;
use super::service::HookService;
use super::types::{HookError, HookId, HookRequest, RunScope};

/// Outcome of the remote half of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Confirmed { message: Option<String> },
    Failed,
}

impl Delivery {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

pub struct HookManager<S> {
    controller: HookListController,
    service: S,
}

impl<S: HookService> HookManager<S> {
    #[must_use]
    pub fn new(service: S, controller: HookListController) -> Self {
        Self { controller, service }
    }

    #[must_use]
    pub fn controller(&self) -> &HookListController {
        &self.controller
    }

    /// Tear down, handing back the final list state.
    #[must_use]
    pub fn into_controller(self) -> HookListController {
        self.controller
    }

    /// Fetch the active list and mount it.
    pub async fn load_active(&mut self) -> Delivery {
        match self.service.active_hooks().await {
            Ok(hooks) => {
                info!(count = hooks.len(), "active hooks loaded");
                self.controller.replace_active(hooks);
                Delivery::Confirmed { message: None }
            }
            Err(e) => {
                error!(error = %e, code = e.error_code(), "error loading active hooks");
                Delivery::Failed
            }
        }
    }

    /// Replace the installable list from the service. Not retried.
    pub async fn load_available(&mut self) -> Delivery {
        match self.service.browsable_hooks().await {
            Ok(hooks) => {
                info!(count = hooks.len(), "available hooks loaded");
                self.controller.replace_available(hooks);
                Delivery::Confirmed { message: None }
            }
            Err(e) => {
                error!(error = %e, code = e.error_code(), "error loading available hooks");
                Delivery::Failed
            }
        }
    }

    /// Install a hook.
    ///
    /// # Errors
    ///
    /// Returns a precondition [`HookError`]; transport failures are
    /// reported through [`Delivery::Failed`].
    pub async fn activate(&mut self, id: &HookId) -> Result<Delivery, HookError> {
        let request = self.controller.activate(id)?;
        Ok(self.dispatch(request).await)
    }

    /// Remove a hook.
    ///
    /// # Errors
    ///
    /// Returns a precondition [`HookError`]; transport failures are
    /// reported through [`Delivery::Failed`].
    pub async fn deactivate(&mut self, id: &HookId) -> Result<Delivery, HookError> {
        let request = self.controller.deactivate(id)?;
        Ok(self.dispatch(request).await)
    }

    /// Apply a drag result locally without persisting it.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidMove`] for out-of-range indices.
    pub fn move_active(&mut self, from: usize, to: usize) -> Result<(), HookError> {
        self.controller.move_active(from, to)
    }

    /// Apply an explicit execution order locally without persisting it.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::DuplicateInOrder`] or [`HookError::NotActive`].
    pub fn arrange(&mut self, order: &[HookId]) -> Result<(), HookError> {
        self.controller.arrange(order)
    }

    /// Persist the current active order.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::ReorderDisabled`] with fewer than two active hooks.
    pub async fn reorder(&mut self) -> Result<Delivery, HookError> {
        let request = self.controller.reorder()?;
        Ok(self.dispatch(request).await)
    }

    /// Run the installed hooks on the chosen commits.
    pub async fn run(&mut self, scope: RunScope) -> Delivery {
        let request = self.controller.run(scope);
        self.dispatch(request).await
    }

    async fn dispatch(&mut self, request: HookRequest) -> Delivery {
        let kind = request.kind();
        let result = self.service.send(&request).await;
        self.controller.finish(kind);
        match result {
            Ok(reply) => {
                info!(?kind, message = reply.message.as_deref().unwrap_or(""), "hook request confirmed");
                Delivery::Confirmed { message: reply.message }
            }
            Err(e) => {
                // Local state already reflects the change; it is not reverted.
                error!(?kind, error = %e, code = e.error_code(), "hook request failed");
                Delivery::Failed
            }
        }
    }
}
