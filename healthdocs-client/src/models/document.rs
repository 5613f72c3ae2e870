use serde::{Deserialize, Serialize};

/// One uploaded file as reported by the backend.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub id: String,
    pub filename: String,
    pub patient_id: String,
    pub upload_date: String, // backend-formatted, kept opaque
    pub size_kb: u64,
}

/// A locally chosen file waiting to be uploaded. Cleared on upload success,
/// kept around on failure so the user can retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub filename: String,
    pub bytes: Vec<u8>,
}
