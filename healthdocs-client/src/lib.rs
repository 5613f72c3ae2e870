pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

pub use error::TransferError;
pub use models::{DocumentRecord, FileSelection, Notice, Notifier};
pub use session::{AuthState, SessionContext, SessionManager};
