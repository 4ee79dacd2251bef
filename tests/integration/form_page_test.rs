use super::common;

use common::test_server::TestServer;
use protoform::adapters::file_set_client::{FileSetSource, HttpFileSetSource};
use protoform::domain::error::FormError;

#[tokio::test]
async fn test_http_source_fetches_file_set() {
    let server = TestServer::new().await;

    let file_set = HttpFileSetSource::new()
        .load(&server.service_path)
        .await
        .unwrap();

    assert_eq!(file_set.files.len(), 1);
    assert_eq!(file_set.files[0].package, "music");
}

#[tokio::test]
async fn test_http_source_reports_status() {
    let server = TestServer::new().await;

    let err = HttpFileSetSource::new()
        .load(&server.broken_service_path)
        .await
        .unwrap_err();

    match &err {
        FormError::FetchFailure { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("Expected fetch failure, got {:?}", other),
    }
    assert_eq!(err.to_string(), "500 Internal Server Error");
}

#[tokio::test]
async fn test_method_form_page() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/forms/music.MusicService/add_track"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"name="title""#));
    assert!(html.contains(r#"name="plays" value="0" disabled>"#));
    assert!(html.contains("Repeated field tags not supported."));
    assert!(html.contains("Unsupported variant: BOOL"));
}

#[tokio::test]
async fn test_method_form_page_with_toggle_on() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/forms/music.MusicService/add_track?enable=plays"))
        .send()
        .await
        .unwrap();

    let html = response.text().await.unwrap();
    assert!(html.contains(r#"name="plays" value="0">"#));
}

#[tokio::test]
async fn test_void_method_page_has_no_inputs() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/forms/music.MusicService/count"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"type="submit""#));
    assert!(!html.contains(r#"type="text""#));
}

#[tokio::test]
async fn test_unknown_method_renders_single_error() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/forms/music.MusicService/delete_track"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let html = response.text().await.unwrap();
    assert_eq!(html.matches(r#"class="error""#).count(), 1);
    assert!(!html.contains("<form"));
}

#[tokio::test]
async fn test_missing_request_message_is_fatal() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/api/forms/music.MusicService/broken"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No message found for 'music.Missing'");
}

#[tokio::test]
async fn test_fetch_failure_shown_verbatim() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/forms/music.MusicService/add_track"))
        .query(&[("service_path", server.broken_service_path.as_str())])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<p class="error">500 Internal Server Error</p>"#));
}

#[tokio::test]
async fn test_method_form_json() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/api/forms/music.MusicService/add_track"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["outcome"], "fields");
    let fields = body["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 4);
    assert_eq!(fields[0]["type"], "widget");
    assert_eq!(fields[0]["field_name"], "title");
    assert_eq!(fields[0]["initially_enabled"], true);
    assert_eq!(fields[1]["category"], "int");
    assert_eq!(fields[2]["type"], "unsupported");

    let response = client
        .get(server.url("/api/forms/music.MusicService/count"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["outcome"], "empty");
}

#[tokio::test]
async fn test_methods_page_links_each_method() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/forms"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("music.MusicService.add_track"));
    assert!(html.contains("music.MusicService.count"));
    assert!(html.contains("music.MusicService.broken"));
}

#[tokio::test]
async fn test_relative_service_path_stays_on_configured_origin() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(server.url("/forms/music.MusicService/add_track"))
        .query(&[("service_path", "/broken")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 502);
    let html = response.text().await.unwrap();
    assert!(html.contains(r#"<p class="error">500 Internal Server Error</p>"#));
}

#[tokio::test]
async fn test_service_path_on_other_host_is_rejected() {
    let server = TestServer::new().await;
    let client = reqwest::Client::new();

    // Same host as the app, but not the configured service origin
    let response = client
        .get(server.url("/api/forms/music.MusicService/add_track"))
        .query(&[("service_path", format!("{}/health", server.base_url))])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("is not allowed"));
}
