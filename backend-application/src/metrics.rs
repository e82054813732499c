use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    ingest_requests: AtomicU64,
    ingest_errors: AtomicU64,
    extractions_completed: AtomicU64,
    extractions_failed: AtomicU64,
}

impl Metrics {
    pub fn record_ingest(&self) {
        self.ingest_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ingest_error(&self) {
        self.ingest_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_extraction_completed(&self) {
        self.extractions_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_extraction_failed(&self) {
        self.extractions_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn extractions_failed(&self) -> u64 {
        self.extractions_failed.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let requests = self.ingest_requests.load(Ordering::Relaxed);
        let errors = self.ingest_errors.load(Ordering::Relaxed);
        let completed = self.extractions_completed.load(Ordering::Relaxed);
        let failed = self.extractions_failed.load(Ordering::Relaxed);

        format!(
            "# TYPE archie_ingest_requests_total counter\n\
archie_ingest_requests_total {}\n\
# TYPE archie_ingest_errors_total counter\n\
archie_ingest_errors_total {}\n\
# TYPE archie_extractions_completed_total counter\n\
archie_extractions_completed_total {}\n\
# TYPE archie_extractions_failed_total counter\n\
archie_extractions_failed_total {}\n",
            requests, errors, completed, failed
        )
    }
}
