pub mod document;
pub mod notice;

pub use document::{DocumentRecord, FileSelection};
pub use notice::{LogNotifier, Notice, Notifier};
