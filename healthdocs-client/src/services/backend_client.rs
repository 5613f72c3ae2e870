//! Raw HTTP transport for the document backend.
//!
//! One `reqwest::Client` per instance; all authenticated endpoints take the
//! token explicitly. Download is the exception: it never issues a request
//! here, only builds a URL for native navigation.

use crate::config::BackendSettings;
use crate::error::TransferError;
use crate::models::DocumentRecord;
use reqwest::multipart;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

pub struct BackendClient {
    client: Client,
    settings: BackendSettings,
}

impl BackendClient {
    pub fn new(settings: BackendSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.settings.url
    }

    /// POST `/login` with the fixed identifying user. Unauthenticated.
    pub async fn login(&self, user: &str) -> Result<String, TransferError> {
        let url = format!("{}/login", self.settings.url);

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "user": user }))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send POST request to {}: {}", url, e);
                TransferError::Transport(e)
            })?;

        if !response.status().is_success() {
            return Err(TransferError::LoginRejected {
                status: response.status(),
            });
        }

        let body: TokenResponse = response.json().await?;
        Ok(body.token)
    }

    /// GET `/documents` with bearer auth. Any rejection is treated as the
    /// session no longer being valid.
    pub async fn list_documents(&self, token: &str) -> Result<Vec<DocumentRecord>, TransferError> {
        let url = format!("{}/documents", self.settings.url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send GET request to {}: {}", url, e);
                TransferError::Transport(e)
            })?;

        if !response.status().is_success() {
            return Err(TransferError::SessionExpired {
                status: response.status(),
            });
        }

        Ok(response.json().await?)
    }

    /// POST `/documents/upload` as multipart: a `file` part plus a
    /// `patient_id` text part, with bearer auth.
    pub async fn upload_document(
        &self,
        token: &str,
        filename: &str,
        bytes: Vec<u8>,
        patient_id: &str,
    ) -> Result<(), TransferError> {
        let url = format!("{}/documents/upload", self.settings.url);

        let form = multipart::Form::new()
            .part(
                "file",
                multipart::Part::bytes(bytes)
                    .file_name(filename.to_string())
                    .mime_str("application/pdf")?,
            )
            .text("patient_id", patient_id.to_string());

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send upload request to {}: {}", url, e);
                TransferError::Transport(e)
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TransferError::SessionExpired { status });
        }
        if !status.is_success() {
            return Err(TransferError::Backend {
                operation: "upload",
                status,
            });
        }

        Ok(())
    }

    /// DELETE `/documents/{id}` with bearer auth.
    pub async fn delete_document(&self, token: &str, document_id: &str) -> Result<(), TransferError> {
        let url = format!("{}/documents/{}", self.settings.url, document_id);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send DELETE request to {}: {}", url, e);
                TransferError::Transport(e)
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(TransferError::SessionExpired { status });
        }
        if !status.is_success() {
            return Err(TransferError::Backend {
                operation: "delete",
                status,
            });
        }

        Ok(())
    }

    /// Builds the direct download link with the token as a query parameter.
    /// The backend accepts the token in the query string for this endpoint
    /// only, so the link works for plain navigation outside the scripted
    /// request path.
    pub fn download_url(&self, token: &str, document_id: &str) -> String {
        format!(
            "{}/documents/{}/download?token={}",
            self.settings.url,
            document_id,
            urlencoding::encode(token)
        )
    }
}
