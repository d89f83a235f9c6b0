use chrono::Utc;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use storefront_ai::{ChatMessage, CompletionRequest, TextGenerator};
use tokio::sync::watch;

use crate::errors::Result;
use crate::products::ProductRepositoryTrait;
use crate::utils::sanitize::sanitize_html;

/// System role content sent with every enrichment prompt.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant for an online store";

/// Settings injected at worker construction.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Model identifier passed through to the generation endpoint.
    pub model: String,
    /// Fixed pause between loop iterations.
    pub poll_interval: Duration,
    /// Attempt count at which a row is quarantined.
    pub max_attempts: i32,
    /// Backoff after the first failure; doubles with each one after.
    pub initial_backoff: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            poll_interval: Duration::from_secs(10),
            max_attempts: 5,
            initial_backoff: Duration::from_secs(30),
        }
    }
}

/// What one worker iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentTick {
    /// No product is currently awaiting enrichment.
    Idle,
    /// A description was generated and persisted.
    Enriched { product_id: String },
    /// The attempt failed and was recorded on the row.
    Failed { product_id: String, quarantined: bool },
}

/// Background loop that fills in missing product descriptions.
///
/// One candidate per tick, serialized with itself. Failed rows back off
/// exponentially and are quarantined once their attempt budget is spent,
/// so a poison row cannot monopolize the loop.
pub struct EnrichmentWorker {
    repository: Arc<dyn ProductRepositoryTrait>,
    generator: Arc<dyn TextGenerator>,
    config: EnrichmentConfig,
}

impl EnrichmentWorker {
    pub fn new(
        repository: Arc<dyn ProductRepositoryTrait>,
        generator: Arc<dyn TextGenerator>,
        config: EnrichmentConfig,
    ) -> Self {
        Self {
            repository,
            generator,
            config,
        }
    }

    /// Runs until the shutdown channel flips to true or closes.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!("Enrichment worker started");
        loop {
            if *shutdown.borrow() {
                break;
            }

            match self.run_once().await {
                Ok(EnrichmentTick::Idle) => debug!("Enrichment worker idle"),
                Ok(EnrichmentTick::Enriched { product_id }) => {
                    info!("Enriched product {}", product_id);
                }
                Ok(EnrichmentTick::Failed {
                    product_id,
                    quarantined,
                }) => {
                    if quarantined {
                        warn!("Product {} exhausted its enrichment attempts", product_id);
                    } else {
                        warn!("Enrichment attempt for product {} failed", product_id);
                    }
                }
                Err(e) => error!("Enrichment iteration failed: {}", e),
            }

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
        info!("Enrichment worker stopped");
    }

    /// One full iteration: pick a candidate, call the generator, persist.
    pub async fn run_once(&self) -> Result<EnrichmentTick> {
        let now = Utc::now().naive_utc();
        let candidate = match self
            .repository
            .next_enrichment_candidate(now, self.config.max_attempts)?
        {
            Some(candidate) => candidate,
            None => return Ok(EnrichmentTick::Idle),
        };

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(format!(
                    "Write a product description for a product with a name {}",
                    candidate.name
                )),
            ],
        };

        match self.generator.complete(request).await {
            Ok(text) => {
                // Description and flag land in one transaction.
                self.repository
                    .apply_enrichment(&candidate.id, &sanitize_html(&text))
                    .await?;
                Ok(EnrichmentTick::Enriched {
                    product_id: candidate.id,
                })
            }
            Err(e) => {
                let attempts = candidate.enrich_attempts + 1;
                let quarantined = attempts >= self.config.max_attempts;
                let next_attempt_at = now + self.backoff_after(attempts);
                self.repository
                    .record_enrichment_failure(&candidate.id, &e.to_string(), next_attempt_at)
                    .await?;
                Ok(EnrichmentTick::Failed {
                    product_id: candidate.id,
                    quarantined,
                })
            }
        }
    }

    /// Exponential backoff: initial * 2^(attempts-1), capped at 2^16.
    fn backoff_after(&self, attempts: i32) -> chrono::Duration {
        let exponent = attempts.saturating_sub(1).clamp(0, 16) as u32;
        let seconds = self
            .config
            .initial_backoff
            .as_secs()
            .saturating_mul(1u64 << exponent);
        chrono::Duration::seconds(seconds as i64)
    }
}
