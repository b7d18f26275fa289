use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    scans_created: AtomicU64,
    scans_amended: AtomicU64,
    duplicate_scans: AtomicU64,
    ineligible_scans: AtomicU64,
    lookup_failures: AtomicU64,
    storage_errors: AtomicU64,
}

impl Metrics {
    pub fn record_created(&self) {
        self.scans_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_amended(&self) {
        self.scans_amended.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicate_scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ineligible(&self) {
        self.ineligible_scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lookup_failure(&self) {
        self.lookup_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_storage_error(&self) {
        self.storage_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let created = self.scans_created.load(Ordering::Relaxed);
        let amended = self.scans_amended.load(Ordering::Relaxed);
        let duplicates = self.duplicate_scans.load(Ordering::Relaxed);
        let ineligible = self.ineligible_scans.load(Ordering::Relaxed);
        let lookups = self.lookup_failures.load(Ordering::Relaxed);
        let storage = self.storage_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE muster_scans_created_total counter\n\
muster_scans_created_total {}\n\
# TYPE muster_scans_amended_total counter\n\
muster_scans_amended_total {}\n\
# TYPE muster_duplicate_scans_total counter\n\
muster_duplicate_scans_total {}\n\
# TYPE muster_ineligible_scans_total counter\n\
muster_ineligible_scans_total {}\n\
# TYPE muster_lookup_failures_total counter\n\
muster_lookup_failures_total {}\n\
# TYPE muster_storage_errors_total counter\n\
muster_storage_errors_total {}\n",
            created, amended, duplicates, ineligible, lookups, storage
        )
    }
}
