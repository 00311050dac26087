//! Hook list controller: the active/available state machine.
//!
//! DESIGN
//! ======
//! The controller owns two disjoint sequences. `active` is ordered by
//! execution; `available` is what can still be installed. Every mutation is
//! applied locally first and returns the [`HookRequest`] that persists it,
//! so the caller decides when and how the request is sent. Views render
//! from [`HookListController::view`] and refer to hooks by id only.
//!
//! ERROR HANDLING
//! ==============
//! Precondition failures are returned before any state changes. Transport
//! failures happen after the local change and are never rolled back; the
//! caller only clears the pending flag via [`HookListController::finish`].

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::collections::{BTreeMap, HashSet};

use super::types::{HookDescriptor, HookError, HookId, HookRequest, RequestKind, RunScope};

pub const NO_ACTIVE_HOOKS: &str = "No active hooks.";
pub const NO_AVAILABLE_HOOKS: &str = "No hooks available.";
pub const SORT_HINT: &str = "You can drag active hooks to change execution order. Topmost hook is executed first.";
pub const DROP_AREA_HINT: &str = "Drag-and-drop hooks here from the list below to install.";

/// Display state derived from the two lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookListView {
    pub active_empty: bool,
    pub available_empty: bool,
    /// Drag reordering is only offered with more than one active hook.
    pub reorder_enabled: bool,
    /// The install drop area is shown while anything is installable.
    pub drop_area_visible: bool,
}

impl HookListView {
    #[must_use]
    pub fn active_message(&self) -> Option<&'static str> {
        self.active_empty.then_some(NO_ACTIVE_HOOKS)
    }

    #[must_use]
    pub fn available_message(&self) -> Option<&'static str> {
        self.available_empty.then_some(NO_AVAILABLE_HOOKS)
    }

    #[must_use]
    pub fn sort_hint(&self) -> Option<&'static str> {
        self.reorder_enabled.then_some(SORT_HINT)
    }
}

/// Active and available hook lists plus in-flight request counts.
#[derive(Debug, Clone, Default)]
pub struct HookListController {
    active: Vec<HookDescriptor>,
    available: Vec<HookDescriptor>,
    pending: BTreeMap<RequestKind, usize>,
}

impl HookListController {
    /// Mount with an initial state. Hooks listed in both inputs stay active;
    /// duplicate ids keep their first occurrence.
    #[must_use]
    pub fn new(active: Vec<HookDescriptor>, available: Vec<HookDescriptor>) -> Self {
        let mut controller = Self { active: dedup(active), ..Self::default() };
        controller.replace_available(available);
        controller
    }

    #[must_use]
    pub fn active(&self) -> &[HookDescriptor] {
        &self.active
    }

    #[must_use]
    pub fn available(&self) -> &[HookDescriptor] {
        &self.available
    }

    #[must_use]
    pub fn is_active(&self, id: &HookId) -> bool {
        self.active.iter().any(|h| &h.id == id)
    }

    #[must_use]
    pub fn is_available(&self, id: &HookId) -> bool {
        self.available.iter().any(|h| &h.id == id)
    }

    #[must_use]
    pub fn view(&self) -> HookListView {
        HookListView {
            active_empty: self.active.is_empty(),
            available_empty: self.available.is_empty(),
            reorder_enabled: self.active.len() > 1,
            drop_area_visible: !self.available.is_empty(),
        }
    }

    /// Replace the installable list wholesale, skipping hooks already active.
    pub fn replace_available(&mut self, hooks: Vec<HookDescriptor>) {
        let active: HashSet<&HookId> = self.active.iter().map(|h| &h.id).collect();
        let fresh = hooks.into_iter().filter(|h| !active.contains(&h.id)).collect();
        self.available = dedup(fresh);
    }

    /// Replace the active list wholesale; those hooks leave `available`.
    pub fn replace_active(&mut self, hooks: Vec<HookDescriptor>) {
        self.active = dedup(hooks);
        let active: HashSet<HookId> = self.active.iter().map(|h| h.id.clone()).collect();
        self.available.retain(|h| !active.contains(&h.id));
    }

    /// Install: move a hook from `available` to the tail of `active`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::NotAvailable`] if the hook is not installable.
    pub fn activate(&mut self, id: &HookId) -> Result<HookRequest, HookError> {
        let pos = self
            .available
            .iter()
            .position(|h| &h.id == id)
            .ok_or_else(|| HookError::NotAvailable(id.clone()))?;
        let hook = self.available.remove(pos);
        self.active.push(hook);
        Ok(self.begin(HookRequest::Add { hook_id: id.clone() }))
    }

    /// Remove: move a hook from `active` to the head of `available`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::NotActive`] if the hook is not active, or
    /// [`HookError::NotRemovable`] if it is pinned.
    pub fn deactivate(&mut self, id: &HookId) -> Result<HookRequest, HookError> {
        let pos = self
            .active
            .iter()
            .position(|h| &h.id == id)
            .ok_or_else(|| HookError::NotActive(id.clone()))?;
        if !self.active[pos].removable {
            return Err(HookError::NotRemovable(id.clone()));
        }
        let hook = self.active.remove(pos);
        self.available.insert(0, hook);
        Ok(self.begin(HookRequest::Remove { hook_id: id.clone() }))
    }

    /// Apply a drag result to the active order. Sends nothing; follow with
    /// [`Self::reorder`] to persist.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidMove`] if either index is out of range.
    pub fn move_active(&mut self, from: usize, to: usize) -> Result<(), HookError> {
        let len = self.active.len();
        if from >= len || to >= len {
            return Err(HookError::InvalidMove { from, to, len });
        }
        let hook = self.active.remove(from);
        self.active.insert(to, hook);
        Ok(())
    }

    /// Move the named hooks to the front of `active`, in the given order.
    /// Hooks not named keep their relative order behind them. Sends nothing.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::DuplicateInOrder`] if an id repeats, or
    /// [`HookError::NotActive`] if one is not installed. The list is left
    /// unchanged on error.
    pub fn arrange(&mut self, order: &[HookId]) -> Result<(), HookError> {
        let mut seen = HashSet::new();
        for id in order {
            if !seen.insert(id) {
                return Err(HookError::DuplicateInOrder(id.clone()));
            }
            if !self.is_active(id) {
                return Err(HookError::NotActive(id.clone()));
            }
        }
        let (mut named, rest): (Vec<_>, Vec<_>) = self.active.drain(..).partition(|h| seen.contains(&h.id));
        named.sort_by_key(|h| order.iter().position(|id| id == &h.id));
        named.extend(rest);
        self.active = named;
        Ok(())
    }

    /// Persist the current active order.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::ReorderDisabled`] with fewer than two active hooks.
    pub fn reorder(&mut self) -> Result<HookRequest, HookError> {
        if self.active.len() < 2 {
            return Err(HookError::ReorderDisabled { active: self.active.len() });
        }
        let hook_ids = self.active.iter().map(|h| h.id.clone()).collect();
        Ok(self.begin(HookRequest::SetOrder { hook_ids }))
    }

    /// Ask the service to run the active hooks.
    pub fn run(&mut self, scope: RunScope) -> HookRequest {
        self.begin(HookRequest::Run { scope })
    }

    /// `true` while a request of this kind is in flight.
    #[must_use]
    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.pending.get(&kind).is_some_and(|n| *n > 0)
    }

    /// Record completion (success or failure) of a request of this kind.
    pub fn finish(&mut self, kind: RequestKind) {
        if let Some(n) = self.pending.get_mut(&kind) {
            *n = n.saturating_sub(1);
            if *n == 0 {
                self.pending.remove(&kind);
            }
        }
    }

    fn begin(&mut self, request: HookRequest) -> HookRequest {
        *self.pending.entry(request.kind()).or_insert(0) += 1;
        request
    }
}

fn dedup(hooks: Vec<HookDescriptor>) -> Vec<HookDescriptor> {
    let mut seen = HashSet::new();
    hooks.into_iter().filter(|h| seen.insert(h.id.clone())).collect()
}
