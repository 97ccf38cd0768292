//! Test helpers for web API tests.
//!
//! Provides an in-memory storage provider and a helper that builds an
//! axum-test server around it.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;

use mediagate::config::PreviewConfig;
use mediagate::provider::{
    ListFilesQuery, ListSort, ResourcePathResolver, StorageProvider, StoredFile, UploadFile,
    UploadedFile,
};
use mediagate::web::{create_router, AppState};
use mediagate::{Error, LinkPreviewer, MediaService, ProviderOperation, Result};

/// CDN endpoint used by test URLs.
pub const ENDPOINT: &str = "https://ik.imagekit.io/demo";

/// Upload limit used by test servers.
pub const MAX_UPLOAD: usize = 1024 * 1024;

/// In-memory [`StorageProvider`] that records every call.
#[derive(Default)]
pub struct MockProvider {
    files: Mutex<Vec<StoredFile>>,
    next_id: AtomicUsize,
    failure: Mutex<Option<String>>,
    pub upload_calls: AtomicUsize,
    pub uploads: Mutex<Vec<UploadFile>>,
    pub list_queries: Mutex<Vec<ListFilesQuery>>,
    pub deleted: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Store a file directly, returning its id.
    pub fn insert(&self, folder: &str, name: &str) -> String {
        let id = format!("file_{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let file_path = if folder == "/" {
            format!("/{name}")
        } else {
            format!("{folder}/{name}")
        };

        let mut extra = serde_json::Map::new();
        extra.insert("fileType".to_string(), serde_json::json!("image"));

        self.files.lock().unwrap().push(StoredFile {
            file_id: id.clone(),
            name: name.to_string(),
            url: Some(format!("{ENDPOINT}{file_path}")),
            file_path: Some(file_path),
            extra,
        });
        id
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    fn check_failure(&self, operation: ProviderOperation) -> Result<()> {
        match self.failure.lock().unwrap().as_ref() {
            Some(message) => Err(Error::provider(operation, message.clone())),
            None => Ok(()),
        }
    }
}

/// Parent folder of a stored path, `/` for root files.
fn parent_folder(file_path: &str) -> &str {
    match file_path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &file_path[..idx],
    }
}

#[async_trait]
impl StorageProvider for MockProvider {
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure(ProviderOperation::Upload)?;

        let id = self.insert(&file.folder, &file.file_name);
        let stored = self
            .files
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.file_id == id)
            .cloned()
            .unwrap();
        self.uploads.lock().unwrap().push(file);

        Ok(UploadedFile {
            file_id: stored.file_id,
            name: stored.name,
            file_path: stored.file_path.unwrap(),
            url: stored.url.unwrap(),
        })
    }

    async fn list_files(&self, query: ListFilesQuery) -> Result<Vec<StoredFile>> {
        self.list_queries.lock().unwrap().push(query.clone());
        self.check_failure(ProviderOperation::List)?;

        let wanted_name = query
            .search_query
            .as_deref()
            .and_then(|q| q.strip_prefix("name=\""))
            .and_then(|q| q.strip_suffix('"'))
            .map(str::to_string);

        let mut files: Vec<StoredFile> = self
            .files
            .lock()
            .unwrap()
            .iter()
            .filter(|f| match &query.path {
                Some(path) => parent_folder(f.file_path.as_deref().unwrap_or("/")) == path.as_str(),
                None => true,
            })
            .filter(|f| match &wanted_name {
                Some(name) => f.name.split('.').next() == Some(name.as_str()),
                None => true,
            })
            .cloned()
            .collect();

        if query.sort == Some(ListSort::DescCreated) {
            files.reverse();
        }
        if let Some(limit) = query.limit {
            files.truncate(limit as usize);
        }
        Ok(files)
    }

    async fn delete_file(&self, file_id: &str) -> Result<serde_json::Value> {
        self.check_failure(ProviderOperation::Delete)?;

        let mut files = self.files.lock().unwrap();
        let before = files.len();
        files.retain(|f| f.file_id != file_id);
        if files.len() == before {
            return Err(Error::provider(
                ProviderOperation::Delete,
                "The requested file does not exist.",
            ));
        }

        self.deleted.lock().unwrap().push(file_id.to_string());
        Ok(serde_json::Value::Null)
    }
}

/// Link preview settings used by test servers. Local pages must be reachable.
pub fn test_preview_config() -> PreviewConfig {
    PreviewConfig {
        block_private_hosts: false,
        total_timeout_secs: 5,
        ..Default::default()
    }
}

/// Create application state around `provider`.
pub fn create_app_state(provider: Arc<MockProvider>, preview: &PreviewConfig) -> AppState {
    let media = MediaService::new(provider, ResourcePathResolver::new(ENDPOINT));
    let previewer = LinkPreviewer::new(preview).expect("Failed to create previewer");

    AppState::new(media, previewer, MAX_UPLOAD)
}

/// Create a test server backed by `provider`.
pub fn create_test_server(provider: Arc<MockProvider>) -> TestServer {
    create_test_server_with_preview(provider, &test_preview_config())
}

/// Create a test server with custom link preview settings.
pub fn create_test_server_with_preview(
    provider: Arc<MockProvider>,
    preview: &PreviewConfig,
) -> TestServer {
    let router = create_router(Arc::new(create_app_state(provider, preview)), &[]);
    TestServer::new(router).expect("Failed to create test server")
}
