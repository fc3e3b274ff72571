//! API client behaviour against a mocked platform

use ankra::{AnkraError, ApiClient};
use httpmock::prelude::*;
use serde_json::json;

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.base_url(), "test-token").expect("client")
}

#[tokio::test]
async fn list_clusters_sends_auth_and_parses_pagination() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/clusters")
                .query_param("page", "1")
                .query_param("page_size", "25")
                .header("authorization", "Bearer test-token");
            then.status(200).json_body(json!({
                "result": [
                    {
                        "id": "c-1",
                        "name": "prod",
                        "state": "up",
                        "kube_version": "v1.29.0",
                        "nodes": 3,
                        "control_planes": 1,
                        "created_at": "2025-01-01T00:00:00Z",
                        "kind": "imported"
                    }
                ],
                "pagination": {"total_count": 1, "total_pages": 1, "page": 1, "page_size": 25}
            }));
        })
        .await;

    let response = client(&server).list_clusters(1, 25).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.result.len(), 1);
    assert_eq!(response.result[0].name, "prod");
    assert_eq!(response.result[0].nodes, 3);
    assert_eq!(response.pagination.total_pages, 1);
}

#[tokio::test]
async fn get_cluster_by_name_requires_exact_match() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/clusters")
                .query_param("cluster_name", "prod");
            then.status(200).json_body(json!({
                "result": [
                    {"id": "c-2", "name": "prod-eu", "state": "up"},
                    {"id": "c-1", "name": "prod", "state": "up", "status": "healthy"}
                ]
            }));
        })
        .await;

    let cluster = client(&server).get_cluster_by_name("prod").await.unwrap();
    assert_eq!(cluster.cluster.id, "c-1");
    assert_eq!(cluster.status.as_deref(), Some("healthy"));
}

#[tokio::test]
async fn get_cluster_by_name_reports_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/clusters");
            then.status(200).json_body(json!({"result": []}));
        })
        .await;

    let err = client(&server)
        .get_cluster_by_name("missing")
        .await
        .unwrap_err();
    assert!(matches!(err, AnkraError::NotFound { .. }));
    assert!(err.to_string().contains("missing"));
}

#[tokio::test]
async fn error_responses_carry_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(DELETE).path("/api/v1/clusters/prod");
            then.status(422).body("cluster is already being deleted");
        })
        .await;

    let err = client(&server).delete_cluster("prod").await.unwrap_err();
    assert!(err.is_status(422));
    assert!(err.to_string().contains("already being deleted"));
}

#[tokio::test]
async fn delete_addon_sends_permanence_flag() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(DELETE)
                .path("/api/v1/org/clusters/imported/c-1/addons/a-9")
                .query_param("delete", "true");
            then.status(204);
        })
        .await;

    client(&server).delete_addon("c-1", "a-9", true).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn list_operations_parses_bare_array() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/clusters/c-1/operations")
                .query_param("type_list", "write");
            then.status(200).json_body(json!([
                {
                    "id": "op-1",
                    "name": "apply stack",
                    "status": "in_progress",
                    "created_at": "2025-01-01T00:00:00Z",
                    "updated_at": "2025-01-01T00:01:00Z"
                }
            ]));
        })
        .await;

    let operations = client(&server).list_operations("c-1").await.unwrap();
    assert_eq!(operations.len(), 1);
    assert_eq!(operations[0].status, "in_progress");
}

#[tokio::test]
async fn list_tokens_parses_bare_array() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/org/account/tokens");
            then.status(200).json_body(json!([
                {
                    "id": "t-1",
                    "name": "ci",
                    "created_at": "2025-01-01T00:00:00Z",
                    "expires_at": "2026-01-01T00:00:00Z",
                    "revoked": false
                }
            ]));
        })
        .await;

    let tokens = client(&server).list_tokens().await.unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].name, "ci");
    assert!(!tokens[0].revoked);
}

#[tokio::test]
async fn sops_encrypt_posts_paths_and_returns_yaml() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/org/sops/encrypt")
                .json_body(json!({
                    "yaml_content": "value: \"hunter2\"\n",
                    "encrypted_paths": ["value"]
                }));
            then.status(200).json_body(json!({
                "encrypted_yaml": "value: ENC[AES256_GCM,data:...]\n",
                "success": true
            }));
        })
        .await;

    let response = client(&server)
        .sops_encrypt("value: \"hunter2\"\n", &["value".to_string()])
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(response.success);
    assert!(response.encrypted_yaml.contains("ENC["));
}

#[tokio::test]
async fn create_stack_tolerates_empty_response_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/org/clusters/imported/c-1/stacks")
                .json_body(json!({"name": "monitoring", "description": "obs"}));
            then.status(200);
        })
        .await;

    client(&server)
        .create_stack("c-1", "monitoring", "obs")
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn switch_organisation_tolerates_empty_response_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/v1/org/organisation/switch")
                .json_body(json!({"organisation_id": "org-1"}));
            then.status(200);
        })
        .await;

    client(&server).switch_organisation("org-1").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn reconcile_posts_without_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/org/clusters/imported/c-1/reconcile");
            then.status(200)
                .json_body(json!({"success": true, "message": "reconcile scheduled"}));
        })
        .await;

    let response = client(&server).reconcile_cluster("c-1").await.unwrap();
    mock.assert_async().await;
    assert!(response.success);
    assert_eq!(response.message, "reconcile scheduled");
}
