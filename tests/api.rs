//! End-to-end tests for the `/api` surface

mod common;

use std::path::PathBuf;

use axum::http::{header, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{build_pdf, multipart_upload, page_rotations, page_widths, setup, state_for};
use pdfshelf_server::state::AppState;

fn server(state: &AppState) -> TestServer {
    TestServer::new(pdfshelf_server::app(state.clone())).unwrap()
}

fn seed(state: &AppState, widths: &[i64]) -> String {
    state
        .store()
        .register(&build_pdf(widths), Some("sample.pdf"))
        .unwrap()
        .doc_id
}

fn document_path(body: &Value) -> PathBuf {
    PathBuf::from(body["document"]["path"].as_str().unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let (_dir, state) = setup(false);
    let response = server(&state).get("/api/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn list_documents_returns_metadata() {
    let (_dir, state) = setup(false);
    let id = seed(&state, &[200, 210]);

    let body = server(&state).get("/api/documents").await.json::<Value>();
    let documents = body["documents"].as_array().unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0]["doc_id"], id.as_str());
    assert_eq!(documents[0]["name"], "sample.pdf");
    assert_eq!(documents[0]["pages"], 2);
    assert!(documents[0]["path"].as_str().unwrap().ends_with(&format!("{}.pdf", id)));
}

#[tokio::test]
async fn startup_scan_registers_dropped_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sample.pdf"), build_pdf(&[200, 210, 220])).unwrap();
    let state = state_for(dir.path(), false);

    let response = server(&state).get("/api/document/sample").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["document"]["name"], "sample.pdf");
    assert_eq!(body["document"]["pages"], 3);
}

#[tokio::test]
async fn upload_stores_pdf_with_sanitized_name() {
    let (dir, state) = setup(false);
    let app = pdfshelf_server::app(state.clone());

    let request = multipart_upload("/api/upload", "file", "quarterly report.pdf", &build_pdf(&[200, 210, 220]));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let id = body["document"]["doc_id"].as_str().unwrap();

    assert_eq!(body["document"]["name"], "quarterly_report.pdf");
    assert_eq!(body["document"]["pages"], 3);
    assert!(dir.path().join(format!("{}.pdf", id)).exists());
    assert_eq!(state.store().len(), 1);
}

#[tokio::test]
async fn upload_without_file_field_is_bad_request() {
    let (_dir, state) = setup(false);
    let app = pdfshelf_server::app(state.clone());

    let request = multipart_upload("/api/upload", "attachment", "a.pdf", &build_pdf(&[200]));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Missing file upload");
    assert!(state.store().is_empty());
}

#[tokio::test]
async fn upload_of_non_pdf_is_rejected_without_residue() {
    let (dir, state) = setup(false);
    let app = pdfshelf_server::app(state.clone());

    let request = multipart_upload("/api/upload", "file", "notes.pdf", b"just some text");
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.store().is_empty());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn download_streams_original_bytes() {
    let (_dir, state) = setup(false);
    let bytes = build_pdf(&[200]);
    let meta = state.store().register(&bytes, Some("invoice.pdf")).unwrap();

    let response = server(&state)
        .get(&format!("/api/document/{}/download", meta.doc_id))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header(header::CONTENT_TYPE), "application/pdf");
    assert!(response
        .header(header::CONTENT_DISPOSITION)
        .to_str()
        .unwrap()
        .contains("invoice.pdf"));
    assert_eq!(response.as_bytes().as_ref(), bytes.as_slice());
}

#[tokio::test]
async fn download_unknown_is_not_found() {
    let (_dir, state) = setup(false);
    let response = server(&state).get("/api/document/missing/download").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Document missing not found");
}

#[tokio::test]
async fn previews_reject_bad_window_parameters() {
    let (_dir, state) = setup(true);
    let id = seed(&state, &[200, 210]);
    let server = server(&state);

    for (key, value) in [("offset", "abc"), ("limit", "1.5"), ("offset", "-1"), ("limit", "0"), ("limit", "-3")] {
        let response = server
            .get(&format!("/api/document/{}/pages", id))
            .add_query_param(key, value)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}={}", key, value);
        assert!(response.json::<Value>()["error"].is_string());
    }

    let response = server
        .get(&format!("/api/document/{}/pages", id))
        .add_query_param("offset", "abc")
        .await;
    assert_eq!(response.json::<Value>()["error"], "offset and limit must be integers");
}

#[tokio::test]
async fn previews_unknown_document_is_not_found() {
    let (_dir, state) = setup(true);
    let response = server(&state).get("/api/document/missing/pages").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn previews_without_renderer_are_unavailable() {
    let (_dir, state) = setup(false);
    let id = seed(&state, &[200]);

    let response = server(&state).get(&format!("/api/document/{}/pages", id)).await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.json::<Value>()["error"].is_string());
}

#[cfg(feature = "render")]
#[tokio::test]
async fn previews_render_requested_window() {
    let (_dir, state) = setup(true);
    let id = seed(&state, &[200, 210, 220, 230, 240]);
    let server = server(&state);

    let body = server
        .get(&format!("/api/document/{}/pages", id))
        .add_query_param("offset", 1)
        .add_query_param("limit", 2)
        .await
        .json::<Value>();
    assert_eq!(body["total_pages"], 5);
    let pages = body["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["index"], 2);
    assert_eq!(pages[1]["index"], 3);
    assert!(pages[0]["image"].as_str().unwrap().starts_with("data:image/png;base64,"));

    let body = server
        .get(&format!("/api/document/{}/pages", id))
        .add_query_param("offset", 7)
        .await
        .json::<Value>();
    assert_eq!(body["total_pages"], 5);
    assert!(body["pages"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn slice_by_range_and_by_list() {
    let (_dir, state) = setup(false);
    let id = seed(&state, &[200, 210, 220, 230, 240]);
    let server = server(&state);

    let response = server
        .post(&format!("/api/document/{}/slice", id))
        .json(&json!({"startPage": 2, "endPage": 4}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["document"]["pages"], 3);
    assert_eq!(page_widths(&document_path(&body)), vec![210, 220, 230]);

    let body = server
        .post(&format!("/api/document/{}/slice", id))
        .json(&json!({"pages": [5, 2, 4]}))
        .await
        .json::<Value>();
    assert_eq!(page_widths(&document_path(&body)), vec![210, 230, 240]);

    assert_eq!(state.store().len(), 3);
}

#[tokio::test]
async fn slice_rejects_invalid_requests() {
    let (_dir, state) = setup(false);
    let id = seed(&state, &[200, 210, 220]);
    let server = server(&state);

    for body in [
        json!({}),
        json!({"pages": []}),
        json!({"pages": [0]}),
        json!({"pages": [1, 4]}),
        json!({"startPage": 3, "endPage": 2}),
        json!({"startPage": 1, "endPage": 9}),
        json!({"startPage": 1, "pages": [2]}),
        json!({"pages": ["one"]}),
    ] {
        let response = server
            .post(&format!("/api/document/{}/slice", id))
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", body);
        assert!(response.json::<Value>()["error"].is_string(), "{}", body);
    }
    assert_eq!(state.store().len(), 1);
}

#[tokio::test]
async fn slice_out_of_range_names_page() {
    let (_dir, state) = setup(false);
    let id = seed(&state, &[200, 210, 220]);

    let response = server(&state)
        .post(&format!("/api/document/{}/slice", id))
        .json(&json!({"pages": [2, 8]}))
        .await;

    assert_eq!(
        response.json::<Value>()["error"],
        "Page 8 is out of range (document has 3 pages)"
    );
}

#[tokio::test]
async fn slice_unknown_document_is_not_found() {
    let (_dir, state) = setup(false);
    let server = server(&state);

    for body in [json!({"startPage": 1}), json!({}), json!({"startPage": 1, "pages": [2]})] {
        let response = server
            .post("/api/document/missing/slice")
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::NOT_FOUND, "{}", body);
    }
}

#[tokio::test]
async fn merge_concatenates_in_request_order() {
    let (_dir, state) = setup(false);
    let first = seed(&state, &[100, 110]);
    let second = seed(&state, &[300, 310, 320]);

    let response = server(&state)
        .post("/api/merge")
        .json(&json!({"documentIds": [second, first], "name": "bundle.pdf"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["document"]["pages"], 5);
    assert_eq!(body["document"]["name"], "bundle.pdf");
    assert_ne!(body["document"]["doc_id"], "bundle.pdf");
    assert_eq!(page_widths(&document_path(&body)), vec![300, 310, 320, 100, 110]);
}

#[tokio::test]
async fn merge_rejects_empty_and_unknown_ids() {
    let (_dir, state) = setup(false);
    let id = seed(&state, &[100]);
    let server = server(&state);

    let response = server.post("/api/merge").json(&json!({"documentIds": []})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/merge")
        .json(&json!({"documentIds": [id, "ghost"]}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(state.store().len(), 1);
}

#[tokio::test]
async fn rotate_defaults_to_quarter_turn() {
    let (_dir, state) = setup(false);
    let id = seed(&state, &[200, 210, 220]);

    let response = server(&state)
        .post(&format!("/api/document/{}/rotate", id))
        .json(&json!({"pages": [2]}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_ne!(body["document"]["doc_id"], id.as_str());
    assert_eq!(body["document"]["pages"], 3);
    let path = document_path(&body);
    assert_eq!(page_widths(&path), vec![200, 210, 220]);
    assert_eq!(page_rotations(&path), vec![0, 90, 0]);
}

#[tokio::test]
async fn rotate_with_explicit_angle() {
    let (_dir, state) = setup(false);
    let id = seed(&state, &[200, 210]);

    let body = server(&state)
        .post(&format!("/api/document/{}/rotate", id))
        .json(&json!({"pages": [1, 2], "angle": 180}))
        .await
        .json::<Value>();

    assert_eq!(page_rotations(&document_path(&body)), vec![180, 180]);
}

#[tokio::test]
async fn rotate_accepts_very_large_right_angles() {
    let (_dir, state) = setup(false);
    let id = seed(&state, &[200]);
    let server = server(&state);

    let first = server
        .post(&format!("/api/document/{}/rotate", id))
        .json(&json!({"pages": [1]}))
        .await
        .json::<Value>();
    let rotated_id = first["document"]["doc_id"].as_str().unwrap().to_string();

    let response = server
        .post(&format!("/api/document/{}/rotate", rotated_id))
        .json(&json!({"pages": [1], "angle": 9_223_372_036_854_775_800_i64}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(page_rotations(&document_path(&response.json::<Value>())), vec![90]);
}

#[tokio::test]
async fn rotate_rejects_invalid_requests() {
    let (_dir, state) = setup(false);
    let id = seed(&state, &[200]);
    let server = server(&state);

    for body in [json!({"pages": []}), json!({}), json!({"pages": [2]}), json!({"pages": [1], "angle": 45})] {
        let response = server
            .post(&format!("/api/document/{}/rotate", id))
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{}", body);
    }

    let response = server
        .post("/api/document/missing/rotate")
        .json(&json!({"pages": [1]}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let (_dir, state) = setup(false);
    let meta = state.store().register(&build_pdf(&[200]), None).unwrap();
    let server = server(&state);

    let response = server.delete(&format!("/api/document/{}", meta.doc_id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"status": "deleted", "doc_id": meta.doc_id.clone()})
    );
    assert!(!meta.path.exists());

    let response = server.get(&format!("/api/document/{}/download", meta.doc_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server.delete(&format!("/api/document/{}", meta.doc_id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
