/// User-visible outcome of a session or transfer operation.
///
/// Every failure is converted to one of these at the point of call; nothing
/// propagates past the manager as an unhandled error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    LoginFailed,
    SessionExpired,
    SelectFileFirst,
    UploadSucceeded,
    UploadFailed,
    DeleteFailed,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::LoginFailed => "Login failed",
            Notice::SessionExpired => "Session expired. Please refresh.",
            Notice::SelectFileFirst => "Please select a file",
            Notice::UploadSucceeded => "Upload successful",
            Notice::UploadFailed => "Upload failed",
            Notice::DeleteFailed => "Delete failed",
        }
    }
}

/// Sink for notices. The UI layer implements this to surface messages to the
/// user; tests implement it to record what was surfaced.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default notifier that routes notices to the log stream.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::UploadSucceeded => tracing::info!(notice = notice.message(), "user notice"),
            _ => tracing::warn!(notice = notice.message(), "user notice"),
        }
    }
}
