pub mod enrichment_worker;

#[cfg(test)]
mod enrichment_worker_tests;

pub use enrichment_worker::{EnrichmentConfig, EnrichmentTick, EnrichmentWorker, SYSTEM_PROMPT};
