//! Shared helpers for the wiremock-backed integration tests.

use healthdocs_client::config::{BackendSettings, SessionSettings, Settings};
use healthdocs_client::{DocumentRecord, Notice, Notifier};
use std::sync::Mutex;
use wiremock::MockServer;

pub fn settings_for(server: &MockServer) -> Settings {
    Settings {
        backend: BackendSettings {
            url: server.uri(),
            login_user: "demo".to_string(),
            default_patient_id: "demo123".to_string(),
        },
        session: SessionSettings::default(),
    }
}

pub fn doc(id: &str, filename: &str) -> DocumentRecord {
    DocumentRecord {
        id: id.to_string(),
        filename: filename.to_string(),
        patient_id: "demo123".to_string(),
        upload_date: "2024-01-01".to_string(),
        size_kb: 12,
    }
}

/// Notifier that records every surfaced notice for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
