//! ImageKit REST API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;

use super::{ListFilesQuery, StorageProvider, StoredFile, UploadFile, UploadedFile};
use crate::config::ImageKitConfig;
use crate::error::{Error, ProviderOperation, Result};

/// User agent string for provider calls.
const USER_AGENT: &str = "mediagate/0.1";

/// Error body returned by the ImageKit API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// [`StorageProvider`] backed by the ImageKit upload and management APIs.
#[derive(Debug, Clone)]
pub struct ImageKitProvider {
    client: Client,
    private_key: String,
    upload_url: String,
    api_url: String,
}

impl ImageKitProvider {
    /// Create a provider from configuration.
    pub fn new(config: &ImageKitConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            private_key: config.private_key.clone(),
            upload_url: config.upload_url.trim_end_matches('/').to_string(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Turn a non-success response into a provider error.
    async fn check(response: Response, operation: ProviderOperation) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| format!("HTTP error: {}", status));

        Err(Error::provider(operation, message))
    }
}

#[async_trait]
impl StorageProvider for ImageKitProvider {
    async fn upload(&self, file: UploadFile) -> Result<UploadedFile> {
        let op = ProviderOperation::Upload;
        let mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(mime.as_ref())
            .map_err(|e| Error::provider(op, e.to_string()))?;

        let form = Form::new()
            .part("file", part)
            .text("fileName", file.file_name)
            .text("folder", file.folder)
            .text("useUniqueFileName", "false");

        let response = self
            .client
            .post(format!("{}/api/v1/files/upload", self.upload_url))
            .basic_auth(&self.private_key, Some(""))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::provider(op, e.to_string()))?;

        Self::check(response, op)
            .await?
            .json::<UploadedFile>()
            .await
            .map_err(|e| Error::provider(op, format!("invalid upload response: {}", e)))
    }

    async fn list_files(&self, query: ListFilesQuery) -> Result<Vec<StoredFile>> {
        let op = ProviderOperation::List;

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(path) = query.path {
            params.push(("path", path));
        }
        if let Some(sort) = query.sort {
            params.push(("sort", sort.as_str().to_string()));
        }
        if let Some(limit) = query.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(search) = query.search_query {
            params.push(("searchQuery", search));
        }

        let response = self
            .client
            .get(format!("{}/v1/files", self.api_url))
            .basic_auth(&self.private_key, Some(""))
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::provider(op, e.to_string()))?;

        Self::check(response, op)
            .await?
            .json::<Vec<StoredFile>>()
            .await
            .map_err(|e| Error::provider(op, format!("invalid list response: {}", e)))
    }

    async fn delete_file(&self, file_id: &str) -> Result<serde_json::Value> {
        let op = ProviderOperation::Delete;

        let response = self
            .client
            .delete(format!(
                "{}/v1/files/{}",
                self.api_url,
                urlencoding::encode(file_id)
            ))
            .basic_auth(&self.private_key, Some(""))
            .send()
            .await
            .map_err(|e| Error::provider(op, e.to_string()))?;

        let body = Self::check(response, op)
            .await?
            .text()
            .await
            .map_err(|e| Error::provider(op, e.to_string()))?;

        // 204 No Content on success
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| Error::provider(op, format!("invalid delete response: {}", e)))
    }
}
