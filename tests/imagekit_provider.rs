//! ImageKit Provider Tests
//!
//! Exercises the REST client against a mock ImageKit API.

use mediagate::config::ImageKitConfig;
use mediagate::provider::{ListFilesQuery, ListSort, UploadFile};
use mediagate::{Error, ImageKitProvider, ProviderOperation, StorageProvider};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// `Basic base64("private_test:")`
const AUTH: &str = "Basic cHJpdmF0ZV90ZXN0Og==";

fn provider_for(server: &MockServer) -> ImageKitProvider {
    let config = ImageKitConfig {
        private_key: "private_test".to_string(),
        url_endpoint: "https://ik.imagekit.io/demo".to_string(),
        upload_url: server.uri(),
        api_url: server.uri(),
        ..Default::default()
    };
    ImageKitProvider::new(&config).unwrap()
}

#[tokio::test]
async fn test_upload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/files/upload"))
        .and(header("authorization", AUTH))
        .and(body_string_contains("name=\"fileName\""))
        .and(body_string_contains("product_1_shoe.png"))
        .and(body_string_contains("/products"))
        .and(body_string_contains("useUniqueFileName"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fileId": "abc123",
            "name": "product_1_shoe.png",
            "filePath": "/products/product_1_shoe.png",
            "url": "https://ik.imagekit.io/demo/products/product_1_shoe.png",
            "size": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uploaded = provider_for(&server)
        .upload(UploadFile {
            bytes: b"fake png bytes".to_vec(),
            file_name: "product_1_shoe.png".to_string(),
            folder: "/products".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(uploaded.file_id, "abc123");
    assert_eq!(uploaded.file_path, "/products/product_1_shoe.png");
    assert_eq!(
        uploaded.url,
        "https://ik.imagekit.io/demo/products/product_1_shoe.png"
    );
}

#[tokio::test]
async fn test_upload_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/files/upload"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "Your account cannot be authenticated.",
            "help": "For support kindly contact us at support@imagekit.io ."
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .upload(UploadFile {
            bytes: vec![1, 2, 3],
            file_name: "a.png".to_string(),
            folder: "/general".to_string(),
        })
        .await
        .unwrap_err();

    match err {
        Error::Provider { operation, message } => {
            assert_eq!(operation, ProviderOperation::Upload);
            assert_eq!(message, "Your account cannot be authenticated.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_files_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files"))
        .and(header("authorization", AUTH))
        .and(query_param("path", "/brands"))
        .and(query_param("sort", "DESC_CREATED"))
        .and(query_param("limit", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "fileId": "f2",
                "name": "brand_2_b.png",
                "filePath": "/brands/brand_2_b.png",
                "url": "https://ik.imagekit.io/demo/brands/brand_2_b.png",
                "type": "file",
                "height": 100
            },
            {
                "fileId": "f1",
                "name": "brand_1_a.png",
                "filePath": "/brands/brand_1_a.png",
                "url": "https://ik.imagekit.io/demo/brands/brand_1_a.png"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let files = provider_for(&server)
        .list_files(ListFilesQuery {
            path: Some("/brands".to_string()),
            sort: Some(ListSort::DescCreated),
            limit: Some(30),
            search_query: None,
        })
        .await
        .unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].file_id, "f2");
    assert_eq!(files[0].extra.get("height"), Some(&json!(100)));
    assert_eq!(files[1].name, "brand_1_a.png");
}

#[tokio::test]
async fn test_list_files_search_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files"))
        .and(query_param("path", "/categories"))
        .and(query_param("searchQuery", "name=\"cat_123_photo\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let files = provider_for(&server)
        .list_files(ListFilesQuery {
            path: Some("/categories".to_string()),
            search_query: Some("name=\"cat_123_photo\"".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(files.is_empty());
}

#[tokio::test]
async fn test_list_files_error_without_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/files"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .list_files(ListFilesQuery::default())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "list failed: HTTP error: 502 Bad Gateway");
}

#[tokio::test]
async fn test_delete_file_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/files/abc123"))
        .and(header("authorization", AUTH))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = provider_for(&server).delete_file("abc123").await.unwrap();

    assert_eq!(result, serde_json::Value::Null);
}

#[tokio::test]
async fn test_delete_file_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/files/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "The requested file does not exist."
        })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .delete_file("missing")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "delete failed: The requested file does not exist."
    );
}
