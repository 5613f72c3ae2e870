use anyhow::Context;
use dotenvy::dotenv;
use healthdocs_client::config;
use healthdocs_client::session::{SessionContext, SessionManager};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = config::load().context("Failed to read configuration")?;
    info!(backend = %settings.backend.url, "Starting healthdocs-client");

    // Single process-lifetime session context, shared from the composition root.
    let session = Arc::new(SessionContext::new());
    let manager = SessionManager::new(settings, session);

    manager.initialize().await?;
    info!(patient_id = %manager.default_patient_id(), "Session ready");

    let documents = manager.documents().await;
    info!(count = documents.len(), "Fetched document list");
    for doc in documents {
        info!(
            id = %doc.id,
            filename = %doc.filename,
            patient_id = %doc.patient_id,
            upload_date = %doc.upload_date,
            size_kb = doc.size_kb,
            "document"
        );
    }

    Ok(())
}
