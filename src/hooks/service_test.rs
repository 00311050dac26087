use super::*;
use crate::config::{RequestTimeouts, ServiceConfig};

fn config(base_url: &str) -> ServiceConfig {
    ServiceConfig {
        base_url: base_url.into(),
        timeouts: RequestTimeouts { request_secs: 5, connect_secs: 1 },
    }
}

// =============================================================================
// urls
// =============================================================================

#[test]
fn join_url_normalizes_slashes() {
    assert_eq!(join_url("http://repo.test/admin/", "/add_commit_hook"), "http://repo.test/admin/add_commit_hook");
    assert_eq!(join_url("http://repo.test/admin", "run_hooks"), "http://repo.test/admin/run_hooks");
}

#[test]
fn endpoints_map_request_kinds() {
    let e = HookEndpoints::default();
    assert_eq!(e.for_kind(RequestKind::Add), "add_commit_hook");
    assert_eq!(e.for_kind(RequestKind::Remove), "remove_commit_hook");
    assert_eq!(e.for_kind(RequestKind::SetOrder), "set_hook_order");
    assert_eq!(e.for_kind(RequestKind::Run), "run_hooks");
}

#[test]
fn client_builds_urls_from_config() {
    let svc = HttpHookService::new(&config("http://repo.test/p/code/"), HookEndpoints::default()).unwrap();
    assert_eq!(svc.url("browsable_hooks"), "http://repo.test/p/code/browsable_hooks");
}

// =============================================================================
// parsing
// =============================================================================

#[test]
fn parse_hook_list_reads_envelope() {
    let hooks = parse_hook_list(r#"{"hooks": [{"id": "a1", "name": "Mail", "description": "Send mail"}]}"#).unwrap();
    assert_eq!(hooks.len(), 1);
    assert_eq!(hooks[0].name, "Mail");
}

#[test]
fn parse_hook_list_rejects_garbage() {
    let err = parse_hook_list("<html>").unwrap_err();
    assert!(matches!(err, HookError::Parse(_)));
}

#[test]
fn add_and_order_ignore_body() {
    assert_eq!(parse_reply(RequestKind::Add, r#"{"id": "a1", "name": "Mail"}"#).unwrap(), Reply::default());
    assert_eq!(parse_reply(RequestKind::SetOrder, "").unwrap(), Reply::default());
}

#[test]
fn remove_reports_rejection() {
    assert!(parse_reply(RequestKind::Remove, r#"{"success": true}"#).is_ok());
    let err = parse_reply(RequestKind::Remove, r#"{"success": false}"#).unwrap_err();
    assert!(matches!(err, HookError::Rejected(_)));
}

#[test]
fn run_surfaces_message() {
    let reply = parse_reply(
        RequestKind::Run,
        r#"{"success": true, "msg": "Running Post Commit Hooks for All Commits"}"#,
    )
    .unwrap();
    assert_eq!(reply.message.as_deref(), Some("Running Post Commit Hooks for All Commits"));
}

// =============================================================================
// transport
// =============================================================================

#[tokio::test]
async fn unreachable_service_is_request_error() {
    let svc = HttpHookService::new(&config("http://127.0.0.1:9"), HookEndpoints::default()).unwrap();
    let err = svc.browsable_hooks().await.unwrap_err();
    assert!(matches!(err, HookError::Request(_)));
    assert!(err.is_transport());
}
