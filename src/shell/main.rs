use anyhow::Context;
use std::fs;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use nss_attendance::modules::attendance::adapters::outbound::spreadsheet_reader::CalamineSpreadsheetReader;
use nss_attendance::shared::infrastructure::participation_store::in_memory::InMemoryParticipationStore;
use nss_attendance::shared::infrastructure::participation_store::retrying::RetryingParticipationStore;
use nss_attendance::shell::config::AppConfig;
use nss_attendance::shell::http::router;
use nss_attendance::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::load()?;

    // TODO: replace with the portal database adapter; until then the store lives in memory
    let participations = match &config.participations_file {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("could not read PARTICIPATIONS_FILE {path}"))?;
            let store = InMemoryParticipationStore::from_json(&json)
                .with_context(|| format!("invalid participations in {path}"))?;
            tracing::info!(%path, "participation store seeded");
            store
        }
        None => {
            tracing::warn!("PARTICIPATIONS_FILE not set, starting with an empty participation store");
            InMemoryParticipationStore::new()
        }
    };
    let store = Arc::new(RetryingParticipationStore::new(
        participations,
        config.retry_policy(),
    ));
    let reader = Arc::new(CalamineSpreadsheetReader::new());
    let state = AppState::build(&config, reader, store);

    let app = router(state, config.max_upload_bytes).layer(TraceLayer::new_for_http());

    let address = config.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        threshold = config.approval_threshold,
        "attendance service listening on http://{address}"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
