//! Behavioural tests for the HTTP API, driven through the router in-process.

#![expect(clippy::expect_used, reason = "tests fail loudly on setup errors")]

mod support;

use std::io::{Cursor, Read};
use std::time::Duration;

use axum::http::{StatusCode, header};
use featuredoc_server::config::ServerConfig;
use featuredoc_server::handlers::UploadResponse;
use rstest::rstest;
use support::{
    LOGIN_FEATURE, body_bytes, body_json, get_request, multipart_request, router, send,
};

#[tokio::test]
async fn health_reports_ok_and_version() {
    let app = router(ServerConfig::default());
    let response = send(&app, get_request("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn upload_then_download_returns_docx() {
    let app = router(ServerConfig::default());

    let response = send(
        &app,
        multipart_request("/upload", "file", "login.feature", LOGIN_FEATURE.as_bytes()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let uploaded: UploadResponse =
        serde_json::from_slice(&body_bytes(response).await).expect("upload response");
    assert_eq!(uploaded.filename, "login.feature");
    assert_eq!(uploaded.title, "login");
    assert_eq!(uploaded.scenario_count, 2);
    assert_eq!(uploaded.download_url, format!("/download/{}", uploaded.file_id));

    let response = send(&app, get_request(&uploaded.download_url)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"login.docx\""
    );

    let bytes = body_bytes(response).await;
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).expect("docx is a zip");
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .expect("document part")
        .read_to_string(&mut xml)
        .expect("utf-8 document part");
    assert!(xml.contains("Successful login"));
    assert!(xml.contains("Rejected login"));
    assert!(!xml.contains("Pending design"));
}

#[tokio::test]
async fn upload_without_scenarios_is_rejected() {
    let app = router(ServerConfig::default());
    let response = send(
        &app,
        multipart_request("/upload", "file", "empty.feature", b"Feature: Nothing\n  Scenario: Stub\n"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "No scenarios found in the feature file");
}

#[rstest]
#[case("notes.txt", b"Scenario: A\n  s1".as_slice(), StatusCode::BAD_REQUEST, "only .feature files")]
#[case("bad.feature", b"\xff\xfe\x41".as_slice(), StatusCode::BAD_REQUEST, "not valid UTF-8")]
#[tokio::test]
async fn upload_validation_failures(
    #[case] filename: &str,
    #[case] content: &[u8],
    #[case] expected_status: StatusCode,
    #[case] expected_detail: &str,
) {
    let app = router(ServerConfig::default());
    let response = send(&app, multipart_request("/upload", "file", filename, content)).await;
    assert_eq!(response.status(), expected_status);
    let body = body_json(response).await;
    let detail = body["detail"].as_str().unwrap_or_default();
    assert!(detail.contains(expected_detail), "unexpected detail: {detail}");
}

#[tokio::test]
async fn oversized_upload_is_rejected_with_413() {
    let app = router(ServerConfig::default().with_max_upload_bytes(32));
    let content = LOGIN_FEATURE.as_bytes();
    assert!(content.len() > 32);
    let response = send(&app, multipart_request("/upload", "file", "big.feature", content)).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "file exceeds the upload limit of 32 bytes");
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = router(ServerConfig::default());
    let response = send(
        &app,
        multipart_request("/upload", "attachment", "login.feature", LOGIN_FEATURE.as_bytes()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["detail"]
            .as_str()
            .is_some_and(|detail| detail.starts_with("no file was uploaded"))
    );
}

#[tokio::test]
async fn non_multipart_upload_is_rejected_with_json_detail() {
    let app = router(ServerConfig::default());
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/upload")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(axum::body::Body::from(LOGIN_FEATURE))
        .expect("valid request");
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["detail"]
            .as_str()
            .is_some_and(|detail| detail.starts_with("invalid upload request"))
    );
}

#[tokio::test]
async fn preview_returns_extracted_scenarios() {
    let app = router(ServerConfig::default());
    let response = send(
        &app,
        multipart_request("/preview", "file", "login.feature", LOGIN_FEATURE.as_bytes()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "login");
    assert_eq!(body["scenarios"][0]["index"], 1);
    assert_eq!(body["scenarios"][0]["tags"], "@smoke");
    assert_eq!(body["scenarios"][0]["name"], "Successful login");
    assert_eq!(body["scenarios"][1]["name"], "Rejected login");
    assert_eq!(body["scenarios"][1]["tag_list"][0], "@negative");
    assert_eq!(body["scenarios"][1]["steps"][1], "When they submit <password>");
}

#[rstest]
#[case::no_scenarios(
    "stub.feature",
    b"Scenario: Stub\n".as_slice(),
    StatusCode::BAD_REQUEST,
    "No scenarios found in the feature file"
)]
#[case::wrong_extension(
    "notes.txt",
    b"Scenario: A\n  s1\n".as_slice(),
    StatusCode::BAD_REQUEST,
    "only .feature files are supported, got `notes.txt`"
)]
#[case::oversized(
    "big.feature",
    LOGIN_FEATURE.as_bytes(),
    StatusCode::PAYLOAD_TOO_LARGE,
    "file exceeds the upload limit of 32 bytes"
)]
#[tokio::test]
async fn preview_applies_upload_rules(
    #[case] filename: &str,
    #[case] content: &[u8],
    #[case] expected_status: StatusCode,
    #[case] expected_detail: &str,
) {
    let app = router(ServerConfig::default().with_max_upload_bytes(32));
    let response = send(&app, multipart_request("/preview", "file", filename, content)).await;
    assert_eq!(response.status(), expected_status);
    let body = body_json(response).await;
    assert_eq!(body["detail"], expected_detail);
}

#[tokio::test]
async fn unknown_download_is_not_found() {
    let app = router(ServerConfig::default());
    let response = send(&app, get_request("/download/does-not-exist")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(
        body["detail"],
        "document `does-not-exist` was not found or has expired"
    );
}

#[tokio::test]
async fn documents_expire_after_ttl() {
    let app = router(ServerConfig::default().with_cache_ttl(Duration::from_millis(100)));
    let response = send(
        &app,
        multipart_request("/upload", "file", "login.feature", LOGIN_FEATURE.as_bytes()),
    )
    .await;
    let uploaded: UploadResponse =
        serde_json::from_slice(&body_bytes(response).await).expect("upload response");

    tokio::time::sleep(Duration::from_millis(300)).await;
    let response = send(&app, get_request(&uploaded.download_url)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
