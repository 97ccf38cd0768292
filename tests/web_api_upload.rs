//! Web API Upload Tests
//!
//! Integration tests for POST /upload.

mod common;

use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use common::{create_test_server, MockProvider, MAX_UPLOAD};
use serde_json::Value;

fn image_part(name: &str) -> Part {
    Part::bytes(b"\x89PNG\r\n\x1a\nfake image data".to_vec())
        .file_name(name.to_string())
        .mime_type("image/png")
}

#[tokio::test]
async fn test_upload_with_type_query() {
    let provider = MockProvider::new();
    let server = create_test_server(provider.clone());

    let form = MultipartForm::new().add_part("image", image_part("shoe.png"));
    let response = server
        .post("/upload")
        .add_query_param("type", "product")
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Image uploaded successfully");
    assert_eq!(body["folder"], "/products");
    assert_eq!(body["type"], "product");
    assert!(body["fileId"].as_str().is_some());

    let file_path = body["filePath"].as_str().unwrap();
    assert!(file_path.starts_with("/products/product_"));
    assert!(file_path.ends_with("_shoe.png"));
    assert!(body["imageUrl"].as_str().unwrap().ends_with(file_path));

    let uploads = provider.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].folder, "/products");
    assert!(uploads[0].bytes.starts_with(b"\x89PNG"));
}

#[tokio::test]
async fn test_upload_type_from_form_field() {
    let provider = MockProvider::new();
    let server = create_test_server(provider);

    let form = MultipartForm::new()
        .add_text("type", "reference-book")
        .add_part("image", image_part("cover.jpg"));
    let response = server.post("/upload").multipart(form).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["folder"], "/reference-books");
    assert_eq!(body["type"], "reference-book");
}

#[tokio::test]
async fn test_upload_query_type_wins_over_form_field() {
    let provider = MockProvider::new();
    let server = create_test_server(provider);

    let form = MultipartForm::new()
        .add_text("type", "blog")
        .add_part("image", image_part("a.png"));
    let response = server
        .post("/upload")
        .add_query_param("type", "banner")
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["folder"], "/banners");
    assert_eq!(body["type"], "banner");
}

#[tokio::test]
async fn test_upload_unknown_type_goes_to_general() {
    let provider = MockProvider::new();
    let server = create_test_server(provider);

    let form = MultipartForm::new().add_part("image", image_part("x.png"));
    let response = server
        .post("/upload")
        .add_query_param("type", "spaceship")
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["folder"], "/general");
    assert_eq!(body["type"], "spaceship");
    assert!(body["filePath"]
        .as_str()
        .unwrap()
        .starts_with("/general/spaceship_"));
}

#[tokio::test]
async fn test_upload_without_type_defaults_to_general() {
    let provider = MockProvider::new();
    let server = create_test_server(provider);

    let form = MultipartForm::new().add_part("image", image_part("x.png"));
    let response = server.post("/upload").multipart(form).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["folder"], "/general");
    assert_eq!(body["type"], "general");
}

#[tokio::test]
async fn test_upload_without_file() {
    let provider = MockProvider::new();
    let server = create_test_server(provider.clone());

    let form = MultipartForm::new().add_text("type", "product");
    let response = server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "No file provided");
    assert_eq!(provider.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upload_non_multipart_body() {
    let provider = MockProvider::new();
    let server = create_test_server(provider.clone());

    let response = server.post("/upload").text("not a form").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "No file provided");
    assert_eq!(provider.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upload_empty_file() {
    let provider = MockProvider::new();
    let server = create_test_server(provider.clone());

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(Vec::<u8>::new()).file_name("empty.png"),
    );
    let response = server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(provider.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upload_too_large() {
    let provider = MockProvider::new();
    let server = create_test_server(provider.clone());

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0u8; MAX_UPLOAD + 1]).file_name("big.png"),
    );
    let response = server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "File too large (max 1MB)");
    assert_eq!(provider.upload_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_upload_provider_failure() {
    let provider = MockProvider::new();
    provider.fail_with("quota exceeded");
    let server = create_test_server(provider.clone());

    let form = MultipartForm::new().add_part("image", image_part("a.png"));
    let response = server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Upload failed");
    assert_eq!(body["details"], "upload failed: quota exceeded");
    assert_eq!(provider.upload_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_uploads_get_distinct_ids() {
    let provider = MockProvider::new();
    let server = create_test_server(provider.clone());

    let mut ids = Vec::new();
    for _ in 0..3 {
        let form = MultipartForm::new().add_part("image", image_part("same.png"));
        let response = server
            .post("/upload")
            .add_query_param("type", "user")
            .multipart(form)
            .await;
        response.assert_status_ok();
        ids.push(response.json::<Value>()["fileId"].as_str().unwrap().to_string());
    }

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert_eq!(provider.file_count(), 3);
}
