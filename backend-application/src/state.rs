use std::sync::Arc;

use backend_domain::ports::{EventDirectory, ScanLedger, ServiceCatalog, VeteranDirectory};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub ledger: Arc<dyn ScanLedger>,
    pub veterans: Arc<dyn VeteranDirectory>,
    pub events: Arc<dyn EventDirectory>,
    pub services: Arc<dyn ServiceCatalog>,
    pub metrics: Arc<Metrics>,
}
