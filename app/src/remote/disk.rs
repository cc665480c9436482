//! Cloud-disk REST client
//!
//! Minimal file API over the user's cloud drive: download/upload one file
//! and create the containing folder. Requests authenticate with the OAuth
//! access token from configuration; the token never appears in logs or
//! errors. No retry policy beyond the HTTP client defaults.

use crate::config::CloudConfig;
use crate::error::{AppError, AppResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

pub struct CloudDiskClient {
    http: Client,
    base_url: String,
    access_token: SecretString,
}

impl CloudDiskClient {
    pub fn new(config: &CloudConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: SecretString::new(config.access_token.clone()),
        }
    }

    fn file_url(&self, path: &str) -> String {
        format!("{}/files/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn folder_url(&self, path: &str) -> String {
        format!("{}/folders/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.access_token.expose_secret())
    }

    /// Download a file's content. An absent file (HTTP 404) is `None`.
    pub async fn download(&self, path: &str) -> AppResult<Option<String>> {
        debug!(path, "downloading remote file");
        let response = self.authorize(self.http.get(self.file_url(path))).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.text().await?)),
            status => Err(AppError::Remote(format!(
                "download of '{path}' failed with status {status}"
            ))),
        }
    }

    /// Upload (create or replace) a file's content.
    pub async fn upload(&self, path: &str, body: String) -> AppResult<()> {
        debug!(path, bytes = body.len(), "uploading remote file");
        let response = self
            .authorize(self.http.put(self.file_url(path)))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(AppError::Remote(format!(
                "upload of '{path}' failed with status {status}"
            )))
        }
    }

    /// Create a folder. A folder that already exists (HTTP 409) is success.
    pub async fn ensure_folder(&self, path: &str) -> AppResult<()> {
        let response = self
            .authorize(self.http.put(self.folder_url(path)))
            .send()
            .await?;

        match response.status() {
            StatusCode::CONFLICT => Ok(()),
            status if status.is_success() => Ok(()),
            status => Err(AppError::Remote(format!(
                "creating folder '{path}' failed with status {status}"
            ))),
        }
    }
}
