//! Hook types: descriptors, wire requests, and errors.
//!
//! Hook ids come from the repository service as strings (object ids) or, on
//! older deployments, as integers. Both are normalized to [`HookId`] strings
//! so form payloads render them the same way.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by hook list operations and the hook service client.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HookError {
    /// Activation requested for a hook that is not installable.
    #[error("hook {0} is not in the available list")]
    NotAvailable(HookId),

    /// Deactivation requested for a hook that is not active.
    #[error("hook {0} is not in the active list")]
    NotActive(HookId),

    /// Deactivation requested for a hook flagged non-removable.
    #[error("hook {0} cannot be removed")]
    NotRemovable(HookId),

    /// Reordering needs at least two active hooks.
    #[error("reorder needs more than one active hook (have {active})")]
    ReorderDisabled { active: usize },

    /// An explicit execution order named the same hook twice.
    #[error("hook {0} appears more than once in the requested order")]
    DuplicateInOrder(HookId),

    /// A drag move referenced a position outside the active list.
    #[error("cannot move active hook {from} to {to}: list has {len} entries")]
    InvalidMove { from: usize, to: usize, len: usize },

    /// The HTTP request did not complete.
    #[error("hook request failed: {0}")]
    Request(String),

    /// The service answered with a non-success status.
    #[error("hook service error: status {status}")]
    Response { status: u16, body: String },

    /// The service response body could not be deserialized.
    #[error("hook response parse failed: {0}")]
    Parse(String),

    /// The service completed the request but reported failure.
    #[error("hook service rejected {0}")]
    Rejected(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl HookError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotAvailable(_) => "E_HOOK_NOT_AVAILABLE",
            Self::NotActive(_) => "E_HOOK_NOT_ACTIVE",
            Self::NotRemovable(_) => "E_HOOK_NOT_REMOVABLE",
            Self::ReorderDisabled { .. } => "E_REORDER_DISABLED",
            Self::DuplicateInOrder(_) => "E_DUPLICATE_IN_ORDER",
            Self::InvalidMove { .. } => "E_INVALID_MOVE",
            Self::Request(_) => "E_HOOK_REQUEST",
            Self::Response { .. } => "E_HOOK_RESPONSE",
            Self::Parse(_) => "E_HOOK_PARSE",
            Self::Rejected(_) => "E_HOOK_REJECTED",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// `true` for failures of the remote call rather than of a precondition.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Request(_) | Self::Response { .. } | Self::Parse(_) | Self::Rejected(_) | Self::HttpClientBuild(_)
        )
    }
}

// =============================================================================
// DESCRIPTORS
// =============================================================================

/// Hook identifier, always carried as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawHookId", into = "String")]
pub struct HookId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawHookId {
    Text(String),
    Number(u64),
}

impl From<RawHookId> for HookId {
    fn from(raw: RawHookId) -> Self {
        match raw {
            RawHookId::Text(s) => Self(s),
            RawHookId::Number(n) => Self(n.to_string()),
        }
    }
}

impl From<HookId> for String {
    fn from(id: HookId) -> Self {
        id.0
    }
}

impl From<&str> for HookId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<u64> for HookId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl HookId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A commit hook as listed by the repository service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookDescriptor {
    pub id: HookId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortname: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Missing means removable; only an explicit `false` pins a hook.
    #[serde(default = "default_removable")]
    pub removable: bool,
}

fn default_removable() -> bool {
    true
}

/// Envelope for `browsable_hooks` and `active_hooks` responses.
#[derive(Debug, Deserialize)]
pub struct HookListResponse {
    pub hooks: Vec<HookDescriptor>,
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Which commits a hook run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunScope {
    AllCommits,
    LastCommit,
}

/// Mutating request kinds, used for pending-request tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestKind {
    Add,
    Remove,
    SetOrder,
    Run,
}

/// A request that persists a hook list change on the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookRequest {
    Add { hook_id: HookId },
    Remove { hook_id: HookId },
    SetOrder { hook_ids: Vec<HookId> },
    Run { scope: RunScope },
}

impl HookRequest {
    #[must_use]
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::Add { .. } => RequestKind::Add,
            Self::Remove { .. } => RequestKind::Remove,
            Self::SetOrder { .. } => RequestKind::SetOrder,
            Self::Run { .. } => RequestKind::Run,
        }
    }

    /// Form fields sent with the request.
    #[must_use]
    pub fn form(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Add { hook_id } | Self::Remove { hook_id } => vec![("hook_id", hook_id.to_string())],
            Self::SetOrder { hook_ids } => {
                let joined = hook_ids
                    .iter()
                    .map(HookId::as_str)
                    .collect::<Vec<_>>()
                    .join(",");
                vec![("hook_ids", joined)]
            }
            Self::Run { scope: RunScope::AllCommits } => vec![("commits", "all".to_owned())],
            Self::Run { scope: RunScope::LastCommit } => Vec::new(),
        }
    }
}

/// Successful completion of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Human-readable status text, when the service sends one.
    pub message: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
