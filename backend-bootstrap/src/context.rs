use std::sync::Arc;

use anyhow::Result;

use backend_application::{AppState, Metrics};
use backend_infrastructure::{AppConfig, MemoryScanLedger, RosterDirectory};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let roster = Arc::new(RosterDirectory::load(&runtime_config.roster_dir).await?);
        let ledger = Arc::new(MemoryScanLedger::new());

        let state = AppState {
            config: runtime_config,
            ledger,
            veterans: roster.clone(),
            events: roster.clone(),
            services: roster,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
