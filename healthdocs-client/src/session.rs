//! Session & transfer orchestration.
//!
//! `SessionManager` owns the auth state machine, the locally mirrored
//! document list, and the upload busy gate. All state is written only by the
//! completion paths of its own operations; the list is server-authoritative
//! and replaced wholesale after every successful fetch, never merged.

use crate::config::Settings;
use crate::error::TransferError;
use crate::models::{DocumentRecord, FileSelection, LogNotifier, Notice, Notifier};
use crate::services::BackendClient;
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-lifetime holder of the session token.
///
/// The token is injected explicitly wherever it is needed instead of living
/// in ambient global storage. Create one instance at the composition root and
/// share it via `Arc`.
pub struct SessionContext {
    token: RwLock<Option<Secret<String>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
        }
    }

    pub async fn set_token(&self, token: String) {
        *self.token.write().await = Some(Secret::new(token));
    }

    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    /// Exposes the raw token for attaching to a request. `None` before login.
    pub async fn token(&self) -> Option<String> {
        self.token
            .read()
            .await
            .as_ref()
            .map(|t| t.expose_secret().clone())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticating,
    Authenticated,
}

struct ManagerState {
    auth: AuthState,
    documents: Vec<DocumentRecord>,
    selection: Option<FileSelection>,
    busy: bool,
}

pub struct SessionManager {
    backend: BackendClient,
    session: Arc<SessionContext>,
    notifier: Arc<dyn Notifier>,
    login_user: String,
    default_patient_id: String,
    clear_token_on_expiry: bool,
    state: RwLock<ManagerState>,
}

impl SessionManager {
    pub fn new(settings: Settings, session: Arc<SessionContext>) -> Self {
        Self::with_notifier(settings, session, Arc::new(LogNotifier))
    }

    pub fn with_notifier(
        settings: Settings,
        session: Arc<SessionContext>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            backend: BackendClient::new(settings.backend.clone()),
            session,
            notifier,
            login_user: settings.backend.login_user,
            default_patient_id: settings.backend.default_patient_id,
            clear_token_on_expiry: settings.session.clear_token_on_expiry,
            state: RwLock::new(ManagerState {
                auth: AuthState::Unauthenticated,
                documents: Vec::new(),
                selection: None,
                busy: false,
            }),
        }
    }

    /// Single login attempt with the configured user; no retry, no backoff.
    /// On success the token is stored and the document list is fetched
    /// immediately. On failure the manager stays unauthenticated until the
    /// process is restarted and `initialize` runs again.
    pub async fn initialize(&self) -> Result<(), TransferError> {
        self.state.write().await.auth = AuthState::Authenticating;

        match self.backend.login(&self.login_user).await {
            Ok(token) => {
                self.session.set_token(token).await;
                self.state.write().await.auth = AuthState::Authenticated;
                self.refresh_documents().await
            }
            Err(e) => {
                self.state.write().await.auth = AuthState::Unauthenticated;
                tracing::error!(error = %e, "Login failed");
                self.notifier.notify(Notice::LoginFailed);
                Err(e)
            }
        }
    }

    /// Replaces the local document list with the backend's. Without a stored
    /// token this is a silent no-op so callers may fire it before login has
    /// completed without triggering spurious failure notices.
    pub async fn refresh_documents(&self) -> Result<(), TransferError> {
        let Some(token) = self.session.token().await else {
            return Ok(());
        };

        match self.backend.list_documents(&token).await {
            Ok(documents) => {
                self.state.write().await.documents = documents;
                Ok(())
            }
            Err(e) => {
                self.apply_expiry_policy(&e).await;
                tracing::error!(error = %e, "Failed to fetch document list");
                self.notifier.notify(Notice::SessionExpired);
                Err(e)
            }
        }
    }

    /// Records the pending file selection (the UI's "file input changed").
    pub async fn select_file(&self, filename: impl Into<String>, bytes: Vec<u8>) {
        self.state.write().await.selection = Some(FileSelection {
            filename: filename.into(),
            bytes,
        });
    }

    /// Uploads the pending selection for the given patient.
    ///
    /// An empty or missing selection fails locally before any network call.
    /// The busy flag is a hard precondition here, not just a UI affordance:
    /// a second call while one is in flight is rejected to avoid duplicate
    /// submissions. Busy is cleared on every exit path.
    pub async fn upload(&self, patient_id: &str) -> Result<(), TransferError> {
        let selection = {
            let mut state = self.state.write().await;
            match state.selection.clone() {
                Some(s) if !s.bytes.is_empty() => {
                    if state.busy {
                        return Err(TransferError::UploadInFlight);
                    }
                    state.busy = true;
                    s
                }
                _ => {
                    self.notifier.notify(Notice::SelectFileFirst);
                    return Err(TransferError::NoFileSelected);
                }
            }
        };

        let Some(token) = self.session.token().await else {
            self.state.write().await.busy = false;
            return Err(TransferError::NotAuthenticated);
        };

        let result = self
            .backend
            .upload_document(&token, &selection.filename, selection.bytes, patient_id)
            .await;

        match result {
            Ok(()) => {
                {
                    let mut state = self.state.write().await;
                    state.busy = false;
                    state.selection = None;
                }
                tracing::info!(filename = %selection.filename, patient_id = %patient_id, "Upload succeeded");
                self.notifier.notify(Notice::UploadSucceeded);
                self.refresh_documents().await
            }
            Err(e) => {
                self.state.write().await.busy = false;
                self.apply_expiry_policy(&e).await;
                tracing::error!(filename = %selection.filename, error = %e, "Upload failed");
                self.notifier.notify(Notice::UploadFailed);
                Err(e)
            }
        }
    }

    /// Deletes a document, then re-fetches the list. The local collection is
    /// never touched optimistically; it only changes after the server round
    /// trip confirms the new state.
    pub async fn delete_document(&self, document_id: &str) -> Result<(), TransferError> {
        let Some(token) = self.session.token().await else {
            return Err(TransferError::NotAuthenticated);
        };

        match self.backend.delete_document(&token, document_id).await {
            Ok(()) => self.refresh_documents().await,
            Err(e) => {
                self.apply_expiry_policy(&e).await;
                tracing::error!(document_id = %document_id, error = %e, "Delete failed");
                self.notifier.notify(Notice::DeleteFailed);
                Err(e)
            }
        }
    }

    /// Builds a direct download link carrying the token as a query parameter.
    ///
    /// This is the one deliberate exception to header-based authorization:
    /// the link is meant for native navigation (a new browser tab, the OS
    /// opener), outside the scripted request path. The token ends up in a
    /// navigable URL, so treat the result as sensitive; a short-lived signed
    /// ticket would be the hardened replacement. Performs no I/O and mutates
    /// no state.
    pub async fn download_url(&self, document_id: &str) -> Result<String, TransferError> {
        let Some(token) = self.session.token().await else {
            return Err(TransferError::NotAuthenticated);
        };
        Ok(self.backend.download_url(&token, document_id))
    }

    pub async fn documents(&self) -> Vec<DocumentRecord> {
        self.state.read().await.documents.clone()
    }

    pub async fn is_busy(&self) -> bool {
        self.state.read().await.busy
    }

    pub async fn auth_state(&self) -> AuthState {
        self.state.read().await.auth
    }

    /// Patient id the UI pre-fills in the upload form; the user can still
    /// override it per upload.
    pub fn default_patient_id(&self) -> &str {
        &self.default_patient_id
    }

    pub async fn selected_filename(&self) -> Option<String> {
        self.state
            .read()
            .await
            .selection
            .as_ref()
            .map(|s| s.filename.clone())
    }

    async fn apply_expiry_policy(&self, error: &TransferError) {
        if self.clear_token_on_expiry && matches!(error, TransferError::SessionExpired { .. }) {
            self.session.clear_token().await;
            self.state.write().await.auth = AuthState::Unauthenticated;
        }
    }
}
