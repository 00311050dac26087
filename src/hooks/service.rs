//! Hook service client: the repository's commit hook endpoints.
//!
//! Thin HTTP wrapper over the repository admin controller. Listing endpoints
//! return `{"hooks": [...]}`; mutating endpoints take form fields. Response
//! parsing is kept in pure functions for testability.

#[cfg(test)]
#[path = "service_test.rs"]
mod service_test;

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::types::{HookDescriptor, HookError, HookListResponse, HookRequest, Reply, RequestKind};
use crate::config::ServiceConfig;

// =============================================================================
// SERVICE TRAIT
// =============================================================================

/// Remote store for hook configuration. Enables mocking in tests.
#[async_trait::async_trait]
pub trait HookService: Send + Sync {
    /// Hooks that can still be installed.
    ///
    /// # Errors
    ///
    /// Returns a transport [`HookError`] if the call fails.
    async fn browsable_hooks(&self) -> Result<Vec<HookDescriptor>, HookError>;

    /// Hooks currently installed, in execution order.
    ///
    /// # Errors
    ///
    /// Returns a transport [`HookError`] if the call fails.
    async fn active_hooks(&self) -> Result<Vec<HookDescriptor>, HookError>;

    /// Persist one change.
    ///
    /// # Errors
    ///
    /// Returns a transport [`HookError`] if the call fails or the service
    /// reports failure.
    async fn send(&self, request: &HookRequest) -> Result<Reply, HookError>;
}

// =============================================================================
// ENDPOINTS
// =============================================================================

/// Endpoint paths relative to the repository admin URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookEndpoints {
    pub browsable: String,
    pub active: String,
    pub add: String,
    pub remove: String,
    pub order: String,
    pub run: String,
}

impl Default for HookEndpoints {
    fn default() -> Self {
        Self {
            browsable: "browsable_hooks".into(),
            active: "active_hooks".into(),
            add: "add_commit_hook".into(),
            remove: "remove_commit_hook".into(),
            order: "set_hook_order".into(),
            run: "run_hooks".into(),
        }
    }
}

impl HookEndpoints {
    #[must_use]
    pub fn for_kind(&self, kind: RequestKind) -> &str {
        match kind {
            RequestKind::Add => &self.add,
            RequestKind::Remove => &self.remove,
            RequestKind::SetOrder => &self.order,
            RequestKind::Run => &self.run,
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpHookService {
    http: reqwest::Client,
    base_url: String,
    endpoints: HookEndpoints,
}

impl HttpHookService {
    /// Build a client for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: &ServiceConfig, endpoints: HookEndpoints) -> Result<Self, HookError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| HookError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), endpoints })
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    async fn fetch_list(&self, path: &str) -> Result<Vec<HookDescriptor>, HookError> {
        let url = self.url(path);
        debug!(%url, "fetching hook list");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HookError::Request(e.to_string()))?;
        let text = read_success(response).await?;
        parse_hook_list(&text)
    }
}

#[async_trait::async_trait]
impl HookService for HttpHookService {
    async fn browsable_hooks(&self) -> Result<Vec<HookDescriptor>, HookError> {
        self.fetch_list(&self.endpoints.browsable).await
    }

    async fn active_hooks(&self) -> Result<Vec<HookDescriptor>, HookError> {
        self.fetch_list(&self.endpoints.active).await
    }

    async fn send(&self, request: &HookRequest) -> Result<Reply, HookError> {
        let kind = request.kind();
        let url = self.url(self.endpoints.for_kind(kind));
        debug!(%url, ?kind, "sending hook request");
        let response = self
            .http
            .post(&url)
            .form(&request.form())
            .send()
            .await
            .map_err(|e| HookError::Request(e.to_string()))?;
        let text = read_success(response).await?;
        parse_reply(kind, &text)
    }
}

async fn read_success(response: reqwest::Response) -> Result<String, HookError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| HookError::Request(e.to_string()))?;
    if !(200..300).contains(&status) {
        return Err(HookError::Response { status, body: text });
    }
    Ok(text)
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct StatusReply {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    msg: Option<String>,
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn parse_hook_list(json: &str) -> Result<Vec<HookDescriptor>, HookError> {
    let resp: HookListResponse = serde_json::from_str(json).map_err(|e| HookError::Parse(e.to_string()))?;
    Ok(resp.hooks)
}

/// Interpret a mutating endpoint's body.
///
/// `set_hook_order` answers with an empty body and `add_commit_hook` echoes
/// the hook; both only need a success status. `remove_commit_hook` and
/// `run_hooks` carry an explicit `success` flag.
fn parse_reply(kind: RequestKind, body: &str) -> Result<Reply, HookError> {
    match kind {
        RequestKind::Add | RequestKind::SetOrder => Ok(Reply::default()),
        RequestKind::Remove | RequestKind::Run => {
            let reply: StatusReply = serde_json::from_str(body).map_err(|e| HookError::Parse(e.to_string()))?;
            if reply.success == Some(false) {
                return Err(HookError::Rejected(format!("{kind:?}")));
            }
            Ok(Reply { message: reply.msg })
        }
    }
}
