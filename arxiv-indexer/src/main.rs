//! arXiv Indexer - ingest, embed and index recent papers.
//!
//! Loads configuration, connects to every external service, runs one
//! ingestion pass and then serves the front door until interrupted.

use dotenv::dotenv;
use tracing::{error, info};

use arxiv_indexer::server::{self, AppState};
use arxiv_indexer::telemetry::{self, LogFormat};
use arxiv_indexer::{Dependencies, IndexingError, Settings};

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    dotenv().ok();
    telemetry::init(LogFormat::from_env());

    let settings = Settings::from_env().inspect_err(|e| error!(error = %e, "Invalid configuration"))?;
    let deps = Dependencies::new(&settings)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to initialize dependencies"))?;

    match deps.orchestrator.run_once().await {
        Ok(report) => info!(
            final_state = %report.final_state(),
            indexed = report.indexed,
            "Startup ingestion finished"
        ),
        Err(e) => error!(error = %e, "Startup ingestion did not run"),
    }

    let state = AppState { store: deps.store };
    server::serve(settings.bind_addr, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Received shutdown signal");
    })
    .await
}
