#[cfg(test)]
mod tests {
    use crate::enrichment::{EnrichmentConfig, EnrichmentTick, EnrichmentWorker, SYSTEM_PROMPT};
    use crate::errors::Result;
    use crate::products::{ImageClaim, NewProduct, Product, ProductRepositoryTrait, ProductUpdate};
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use storefront_ai::{AiError, CompletionRequest, TextGenerator};
    use tokio::sync::watch;

    // --- Mock TextGenerator ---
    #[derive(Clone, Default)]
    struct MockGenerator {
        responses: Arc<Mutex<Vec<std::result::Result<String, AiError>>>>,
        requests: Arc<Mutex<Vec<CompletionRequest>>>,
    }

    impl MockGenerator {
        fn with(responses: Vec<std::result::Result<String, AiError>>) -> Self {
            Self {
                responses: Arc::new(Mutex::new(responses)),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn complete(&self, request: CompletionRequest) -> std::result::Result<String, AiError> {
            self.requests.lock().unwrap().push(request);
            self.responses.lock().unwrap().remove(0)
        }
    }

    // --- Mock ProductRepository (enrichment columns only) ---
    #[derive(Clone, Default)]
    struct MockProductRepository {
        products: Arc<Mutex<Vec<Product>>>,
    }

    impl MockProductRepository {
        fn new() -> Self {
            Self::default()
        }

        fn seed(&self, product: Product) {
            self.products.lock().unwrap().push(product);
        }

        fn row(&self, product_id: &str) -> Product {
            self.products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == product_id)
                .cloned()
                .unwrap()
        }

        fn clear_backoff(&self, product_id: &str) {
            let mut products = self.products.lock().unwrap();
            if let Some(product) = products.iter_mut().find(|p| p.id == product_id) {
                product.enrich_next_attempt_at = None;
            }
        }
    }

    #[async_trait]
    impl ProductRepositoryTrait for MockProductRepository {
        fn get_by_id(&self, product_id: &str) -> Result<Option<Product>> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.id == product_id)
                .cloned())
        }

        fn exists(&self, product_id: &str) -> Result<bool> {
            Ok(self.get_by_id(product_id)?.is_some())
        }

        fn list(&self, _offset: Option<i64>, _limit: Option<i64>) -> Result<Vec<Product>> {
            unimplemented!()
        }

        fn list_for_category(&self, _category_id: &str) -> Result<Vec<Product>> {
            unimplemented!()
        }

        async fn create(&self, _new_product: NewProduct) -> Result<Product> {
            unimplemented!()
        }

        async fn update(&self, _update: ProductUpdate) -> Result<Product> {
            unimplemented!()
        }

        async fn delete(&self, _product_id: &str) -> Result<usize> {
            unimplemented!()
        }

        async fn set_image(&self, _product_id: &str, _extension: &str) -> Result<()> {
            unimplemented!()
        }

        async fn clear_image(&self, _product_id: &str) -> Result<()> {
            unimplemented!()
        }

        fn list_image_claims(&self) -> Result<Vec<ImageClaim>> {
            unimplemented!()
        }

        fn next_enrichment_candidate(
            &self,
            now: NaiveDateTime,
            max_attempts: i32,
        ) -> Result<Option<Product>> {
            let mut candidates: Vec<Product> = self
                .products
                .lock()
                .unwrap()
                .iter()
                .filter(|p| !p.ai_generated)
                .filter(|p| p.enrich_attempts < max_attempts)
                .filter(|p| p.enrich_next_attempt_at.map_or(true, |at| at <= now))
                .cloned()
                .collect();
            candidates.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(candidates.into_iter().next())
        }

        async fn apply_enrichment(&self, product_id: &str, description: &str) -> Result<()> {
            let mut products = self.products.lock().unwrap();
            if let Some(product) = products.iter_mut().find(|p| p.id == product_id) {
                product.description = Some(description.to_string());
                product.ai_generated = true;
                product.enrich_attempts = 0;
                product.enrich_next_attempt_at = None;
                product.enrich_last_error = None;
            }
            Ok(())
        }

        async fn record_enrichment_failure(
            &self,
            product_id: &str,
            error: &str,
            next_attempt_at: NaiveDateTime,
        ) -> Result<()> {
            let mut products = self.products.lock().unwrap();
            if let Some(product) = products.iter_mut().find(|p| p.id == product_id) {
                product.enrich_attempts += 1;
                product.enrich_last_error = Some(error.to_string());
                product.enrich_next_attempt_at = Some(next_attempt_at);
            }
            Ok(())
        }

        fn list_quarantined(&self, max_attempts: i32) -> Result<Vec<Product>> {
            Ok(self
                .products
                .lock()
                .unwrap()
                .iter()
                .filter(|p| !p.ai_generated && p.enrich_attempts >= max_attempts)
                .cloned()
                .collect())
        }
    }

    fn undescribed_product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            sku: format!("SKU-{}", id),
            price: dec!(12.50),
            ..Default::default()
        }
    }

    fn worker_with(
        repository: MockProductRepository,
        generator: MockGenerator,
        config: EnrichmentConfig,
    ) -> EnrichmentWorker {
        EnrichmentWorker::new(Arc::new(repository), Arc::new(generator), config)
    }

    #[tokio::test]
    async fn test_one_iteration_enriches_the_first_candidate() {
        let repository = MockProductRepository::new();
        repository.seed(undescribed_product("p-1", "Folding Chair"));
        let generator = MockGenerator::with(vec![Ok(
            "<p>A sturdy chair.</p><script>alert(1)</script>".to_string()
        )]);
        let worker = worker_with(
            repository.clone(),
            generator,
            EnrichmentConfig::default(),
        );

        let tick = worker.run_once().await.unwrap();

        assert_eq!(
            tick,
            EnrichmentTick::Enriched {
                product_id: "p-1".to_string()
            }
        );
        let row = repository.row("p-1");
        assert!(row.ai_generated);
        let description = row.description.unwrap();
        assert!(description.contains("A sturdy chair."));
        assert!(!description.contains("script"));
    }

    #[tokio::test]
    async fn test_idle_when_no_candidates_remain() {
        let repository = MockProductRepository::new();
        repository.seed(undescribed_product("p-1", "Folding Chair"));
        let generator = MockGenerator::with(vec![Ok("A sturdy chair.".to_string())]);
        let worker = worker_with(
            repository.clone(),
            generator.clone(),
            EnrichmentConfig::default(),
        );

        let first = worker.run_once().await.unwrap();
        let second = worker.run_once().await.unwrap();

        assert!(matches!(first, EnrichmentTick::Enriched { .. }));
        assert_eq!(second, EnrichmentTick::Idle);
        assert_eq!(generator.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_prompt_names_the_product() {
        let repository = MockProductRepository::new();
        repository.seed(undescribed_product("p-1", "Folding Chair"));
        let generator = MockGenerator::with(vec![Ok("A sturdy chair.".to_string())]);
        let worker = worker_with(
            repository,
            generator.clone(),
            EnrichmentConfig {
                model: "gpt-4o-mini".to_string(),
                ..EnrichmentConfig::default()
            },
        );

        worker.run_once().await.unwrap();

        let requests = generator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-4o-mini");
        assert_eq!(requests[0].messages[0].role, "system");
        assert_eq!(requests[0].messages[0].content, SYSTEM_PROMPT);
        assert_eq!(requests[0].messages[1].role, "user");
        assert_eq!(
            requests[0].messages[1].content,
            "Write a product description for a product with a name Folding Chair"
        );
    }

    #[tokio::test]
    async fn test_failure_records_backoff_without_a_partial_write() {
        let repository = MockProductRepository::new();
        repository.seed(undescribed_product("p-1", "Folding Chair"));
        let generator =
            MockGenerator::with(vec![Err(AiError::Transport("connection refused".to_string()))]);
        let worker = worker_with(
            repository.clone(),
            generator,
            EnrichmentConfig::default(),
        );

        let tick = worker.run_once().await.unwrap();

        assert_eq!(
            tick,
            EnrichmentTick::Failed {
                product_id: "p-1".to_string(),
                quarantined: false
            }
        );
        let row = repository.row("p-1");
        assert!(!row.ai_generated);
        assert!(row.description.is_none());
        assert_eq!(row.enrich_attempts, 1);
        assert!(row.enrich_next_attempt_at.is_some());
        assert!(row
            .enrich_last_error
            .unwrap()
            .contains("connection refused"));
    }

    #[tokio::test]
    async fn test_backoff_doubles_with_each_failure() {
        let repository = MockProductRepository::new();
        repository.seed(undescribed_product("p-1", "Folding Chair"));
        let generator = MockGenerator::with(vec![
            Err(AiError::RateLimited),
            Err(AiError::RateLimited),
        ]);
        let config = EnrichmentConfig {
            initial_backoff: Duration::from_secs(30),
            ..EnrichmentConfig::default()
        };
        let worker = worker_with(repository.clone(), generator, config);

        worker.run_once().await.unwrap();
        let first_delay = repository.row("p-1").enrich_next_attempt_at.unwrap()
            - chrono::Utc::now().naive_utc();

        repository.clear_backoff("p-1");
        worker.run_once().await.unwrap();
        let second_delay = repository.row("p-1").enrich_next_attempt_at.unwrap()
            - chrono::Utc::now().naive_utc();

        assert!(first_delay <= chrono::Duration::seconds(30));
        assert!(first_delay > chrono::Duration::seconds(25));
        assert!(second_delay <= chrono::Duration::seconds(60));
        assert!(second_delay > chrono::Duration::seconds(55));
    }

    #[tokio::test]
    async fn test_row_is_quarantined_after_its_last_attempt() {
        let repository = MockProductRepository::new();
        repository.seed(Product {
            enrich_attempts: 1,
            ..undescribed_product("p-1", "Folding Chair")
        });
        let generator = MockGenerator::with(vec![Err(AiError::RateLimited)]);
        let config = EnrichmentConfig {
            max_attempts: 2,
            ..EnrichmentConfig::default()
        };
        let worker = worker_with(repository.clone(), generator, config);

        let tick = worker.run_once().await.unwrap();
        assert_eq!(
            tick,
            EnrichmentTick::Failed {
                product_id: "p-1".to_string(),
                quarantined: true
            }
        );

        // The quarantined row is no longer a candidate, even once its
        // backoff elapses.
        repository.clear_backoff("p-1");
        let next = worker.run_once().await.unwrap();
        assert_eq!(next, EnrichmentTick::Idle);

        let quarantined = repository.list_quarantined(2).unwrap();
        assert_eq!(quarantined.len(), 1);
        assert_eq!(quarantined[0].id, "p-1");
    }

    #[tokio::test]
    async fn test_run_stops_when_shutdown_is_already_signalled() {
        let repository = MockProductRepository::new();
        repository.seed(undescribed_product("p-1", "Folding Chair"));
        let generator = MockGenerator::with(vec![]);
        let worker = worker_with(repository, generator.clone(), EnrichmentConfig::default());

        let (tx, rx) = watch::channel(true);
        worker.run(rx).await;
        drop(tx);

        assert!(generator.requests().is_empty());
    }

    #[tokio::test]
    async fn test_run_honours_shutdown_during_the_delay() {
        let repository = MockProductRepository::new();
        let generator = MockGenerator::with(vec![]);
        let config = EnrichmentConfig {
            poll_interval: Duration::from_secs(60),
            ..EnrichmentConfig::default()
        };
        let worker = Arc::new(worker_with(repository, generator, config));

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn({
            let worker = worker.clone();
            async move { worker.run(rx).await }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("worker did not stop after the shutdown signal")
            .unwrap();
    }
}
