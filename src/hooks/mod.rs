//! Commit hooks: ordered installation management against the repository.
//!
//! DESIGN
//! ======
//! [`controller`] is the synchronous state machine over the active and
//! installable lists. [`service`] talks to the repository's hook endpoints.
//! [`manager`] joins the two: mutate locally, send, record completion.

pub mod controller;
pub mod manager;
pub mod service;
pub mod types;

pub use controller::{HookListController, HookListView};
pub use manager::{Delivery, HookManager};
pub use service::{HookEndpoints, HookService, HttpHookService};
pub use types::{HookDescriptor, HookError, HookId, HookRequest, RunScope};
