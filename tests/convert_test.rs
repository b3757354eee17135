//! End-to-end tests: real server, mock file host, real spreadsheets.

mod common;

use std::collections::HashSet;

use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{closed_port, entries, people_workbook, start_file_host, start_service};

async fn post_convert(base_url: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{}/xlsx2json", base_url))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_converts_first_sheet_to_rows() {
    let work_dir = tempfile::tempdir().unwrap();
    let service = start_service(work_dir.path()).await;
    let host = start_file_host(200, people_workbook().unwrap()).await;

    let res = post_convert(
        &service.base_url,
        json!({ "file_url": format!("http://{}/people.xlsx", host) }),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let header_id = res
        .headers()
        .get("x-request-id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body: Value = res.json().await.unwrap();

    assert_eq!(body["success"], json!(true));
    let request_id = body["request_id"].as_str().unwrap();
    assert_eq!(request_id.len(), 8);
    assert_eq!(request_id, header_id);
    assert!(body["processing_time"].as_str().unwrap().ends_with('s'));

    let rows = body["rows_as_dict"].as_array().unwrap();
    assert_eq!(rows.len(), 2);

    let keys: Vec<&str> = rows[0].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "age", "score"]);

    assert_eq!(rows[0], json!({ "name": "alice", "age": 30, "score": 9.5 }));
    assert_eq!(rows[1], json!({ "name": "bob", "age": 25, "score": 7.25 }));

    assert_eq!(entries(work_dir.path()), 0, "temporary file left behind");
}

#[tokio::test]
async fn test_upstream_status_is_client_error() {
    let work_dir = tempfile::tempdir().unwrap();
    let service = start_service(work_dir.path()).await;
    let host = start_file_host(404, b"gone".to_vec()).await;
    let file_url = format!("http://{}/missing.xlsx", host);

    let res = post_convert(&service.base_url, json!({ "file_url": file_url })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains(&file_url), "{}", detail);
    assert!(detail.contains("404"), "{}", detail);
    assert_eq!(entries(work_dir.path()), 0);
}

#[tokio::test]
async fn test_unreachable_host_is_server_error() {
    let work_dir = tempfile::tempdir().unwrap();
    let service = start_service(work_dir.path()).await;
    let addr = closed_port().await;

    let res = post_convert(
        &service.base_url,
        json!({ "file_url": format!("http://{}/f.xlsx", addr) }),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("error sending request"), "{}", detail);
}

#[tokio::test]
async fn test_invalid_spreadsheet_is_server_error_and_cleaned_up() {
    let work_dir = tempfile::tempdir().unwrap();
    let service = start_service(work_dir.path()).await;
    let host = start_file_host(200, b"this is not a spreadsheet".to_vec()).await;

    let res = post_convert(
        &service.base_url,
        json!({ "file_url": format!("http://{}/bad.xlsx", host) }),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert!(!body["detail"].as_str().unwrap().is_empty());
    assert_eq!(entries(work_dir.path()), 0, "temporary file left behind");
}

#[tokio::test]
async fn test_missing_file_url_is_rejected() {
    let work_dir = tempfile::tempdir().unwrap();
    let service = start_service(work_dir.path()).await;

    let res = post_convert(&service.base_url, json!({ "url": "http://x/y.xlsx" })).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_health() {
    let work_dir = tempfile::tempdir().unwrap();
    let service = start_service(work_dir.path()).await;

    let res = reqwest::get(format!("{}/health", service.base_url)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_are_isolated() {
    let work_dir = tempfile::tempdir().unwrap();
    let service = start_service(work_dir.path()).await;
    let host = start_file_host(200, people_workbook().unwrap()).await;
    let file_url = format!("http://{}/people.xlsx", host);

    let mut handles = Vec::new();
    for _ in 0..20 {
        let base_url = service.base_url.clone();
        let file_url = file_url.clone();
        handles.push(tokio::spawn(async move {
            let res = post_convert(&base_url, json!({ "file_url": file_url })).await;
            assert_eq!(res.status(), StatusCode::OK);
            res.json::<Value>().await.unwrap()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        let body = handle.await.unwrap();
        assert_eq!(body["rows_as_dict"].as_array().unwrap().len(), 2);
        ids.insert(body["request_id"].as_str().unwrap().to_string());
    }

    assert_eq!(ids.len(), 20, "request IDs were reused");
    assert_eq!(entries(work_dir.path()), 0, "temporary files left behind");
}
