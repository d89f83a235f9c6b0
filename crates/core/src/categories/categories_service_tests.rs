#[cfg(test)]
mod tests {
    use crate::categories::{
        Category, CategoryRepositoryTrait, CategoryService, CategoryServiceTrait, CategoryUpdate,
        NewCategory,
    };
    use crate::errors::{DatabaseError, Error, Result};
    use crate::outcome::MutationStatus;
    use crate::products::{ImageClaim, NewProduct, Product, ProductRepositoryTrait, ProductUpdate};
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use std::sync::{Arc, Mutex};

    // --- Mock CategoryRepository ---
    #[derive(Clone, Default)]
    struct MockCategoryRepository {
        categories: Arc<Mutex<Vec<Category>>>,
        links: Arc<Mutex<Vec<(String, String)>>>,
        fail_edge_writes: bool,
    }

    impl MockCategoryRepository {
        fn new() -> Self {
            Self::default()
        }

        fn with_failing_edge_writes() -> Self {
            Self {
                fail_edge_writes: true,
                ..Self::default()
            }
        }

        fn seed(&self, category: Category) {
            self.categories.lock().unwrap().push(category);
        }

        fn link_count(&self) -> usize {
            self.links.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CategoryRepositoryTrait for MockCategoryRepository {
        fn get_by_id(&self, category_id: &str) -> Result<Option<Category>> {
            Ok(self
                .categories
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.id == category_id)
                .cloned())
        }

        fn exists(&self, category_id: &str) -> Result<bool> {
            Ok(self.get_by_id(category_id)?.is_some())
        }

        fn list(&self) -> Result<Vec<Category>> {
            let mut categories = self.categories.lock().unwrap().clone();
            categories.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(categories)
        }

        fn list_for_product(&self, product_id: &str) -> Result<Vec<Category>> {
            let links = self.links.lock().unwrap();
            let mut categories: Vec<Category> = self
                .categories
                .lock()
                .unwrap()
                .iter()
                .filter(|c| {
                    links
                        .iter()
                        .any(|(cat, prod)| cat == &c.id && prod == product_id)
                })
                .cloned()
                .collect();
            categories.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(categories)
        }

        async fn create(&self, new_category: NewCategory) -> Result<Category> {
            let category = Category {
                id: new_category.id.unwrap_or_else(|| "c-generated".to_string()),
                name: new_category.name,
                description: new_category.description,
                color: new_category.color,
                ..Default::default()
            };
            self.categories.lock().unwrap().push(category.clone());
            Ok(category)
        }

        async fn update(&self, update: CategoryUpdate) -> Result<Category> {
            let mut categories = self.categories.lock().unwrap();
            let target_id = update.id.clone().unwrap_or_default();
            match categories.iter_mut().find(|c| c.id == target_id) {
                Some(category) => {
                    category.name = update.name;
                    category.description = update.description;
                    category.color = update.color;
                    Ok(category.clone())
                }
                None => Err(Error::Database(DatabaseError::NotFound(format!(
                    "category {}",
                    target_id
                )))),
            }
        }

        async fn delete(&self, category_id: &str) -> Result<usize> {
            let mut categories = self.categories.lock().unwrap();
            let before = categories.len();
            categories.retain(|c| c.id != category_id);
            self.links
                .lock()
                .unwrap()
                .retain(|(cat, _)| cat != category_id);
            Ok(before - categories.len())
        }

        async fn link_product(&self, category_id: &str, product_id: &str) -> Result<()> {
            if self.fail_edge_writes {
                return Err(Error::Database(DatabaseError::QueryFailed(
                    "database is locked".to_string(),
                )));
            }
            let mut links = self.links.lock().unwrap();
            let edge = (category_id.to_string(), product_id.to_string());
            if !links.contains(&edge) {
                links.push(edge);
            }
            Ok(())
        }

        async fn unlink_product(&self, category_id: &str, product_id: &str) -> Result<()> {
            if self.fail_edge_writes {
                return Err(Error::Database(DatabaseError::QueryFailed(
                    "database is locked".to_string(),
                )));
            }
            self.links
                .lock()
                .unwrap()
                .retain(|(cat, prod)| !(cat == category_id && prod == product_id));
            Ok(())
        }
    }

    // --- Mock ProductRepository (lookup only) ---
    #[derive(Clone, Default)]
    struct MockProductCatalog {
        known_ids: Arc<Mutex<Vec<String>>>,
    }

    impl MockProductCatalog {
        fn with_ids(ids: &[&str]) -> Self {
            Self {
                known_ids: Arc::new(Mutex::new(ids.iter().map(|s| s.to_string()).collect())),
            }
        }
    }

    #[async_trait]
    impl ProductRepositoryTrait for MockProductCatalog {
        fn get_by_id(&self, _product_id: &str) -> Result<Option<Product>> {
            unimplemented!()
        }

        fn exists(&self, product_id: &str) -> Result<bool> {
            Ok(self
                .known_ids
                .lock()
                .unwrap()
                .iter()
                .any(|id| id == product_id))
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
            _now: NaiveDateTime,
            _max_attempts: i32,
        ) -> Result<Option<Product>> {
            unimplemented!()
        }

        async fn apply_enrichment(&self, _product_id: &str, _description: &str) -> Result<()> {
            unimplemented!()
        }

        async fn record_enrichment_failure(
            &self,
            _product_id: &str,
            _error: &str,
            _next_attempt_at: NaiveDateTime,
        ) -> Result<()> {
            unimplemented!()
        }

        fn list_quarantined(&self, _max_attempts: i32) -> Result<Vec<Product>> {
            unimplemented!()
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            description: "Seasonal picks".to_string(),
            color: "#2e7d32".to_string(),
            ..Default::default()
        }
    }

    fn service_with(
        repository: MockCategoryRepository,
        products: MockProductCatalog,
    ) -> CategoryService {
        CategoryService::new(Arc::new(repository), Arc::new(products))
    }

    #[tokio::test]
    async fn test_add_category_reports_created_id() {
        let repository = MockCategoryRepository::new();
        let service = service_with(repository.clone(), MockProductCatalog::default());

        let outcome = service
            .add_category(NewCategory {
                id: None,
                name: "Outdoor".to_string(),
                description: "Camping and hiking gear".to_string(),
                color: "#00695c".to_string(),
            })
            .await;

        assert_eq!(outcome.status, MutationStatus::Created);
        assert_eq!(outcome.created_id.as_deref(), Some("c-generated"));
        assert_eq!(repository.list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_category_with_blank_name_writes_nothing() {
        let repository = MockCategoryRepository::new();
        let service = service_with(repository.clone(), MockProductCatalog::default());

        let outcome = service
            .add_category(NewCategory {
                id: None,
                name: "   ".to_string(),
                description: "Camping and hiking gear".to_string(),
                color: "#00695c".to_string(),
            })
            .await;

        assert_eq!(outcome.status, MutationStatus::Error);
        assert!(repository.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_category_is_not_found() {
        let service = service_with(MockCategoryRepository::new(), MockProductCatalog::default());

        let outcome = service
            .update_category(CategoryUpdate {
                id: Some("c-missing".to_string()),
                name: "Outdoor".to_string(),
                description: "Camping and hiking gear".to_string(),
                color: "#00695c".to_string(),
            })
            .await;

        assert_eq!(outcome.status, MutationStatus::NotFound);
        assert_eq!(outcome.messages, vec!["Category was not found."]);
    }

    #[tokio::test]
    async fn test_delete_category_reports_deleted() {
        let repository = MockCategoryRepository::new();
        repository.seed(category("c-1", "Outdoor"));
        let service = service_with(repository.clone(), MockProductCatalog::default());

        let outcome = service.delete_category("c-1").await;

        assert_eq!(outcome.status, MutationStatus::Deleted);
        assert!(repository.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_not_found() {
        let service = service_with(MockCategoryRepository::new(), MockProductCatalog::default());

        let outcome = service.delete_category("c-missing").await;

        assert_eq!(outcome.status, MutationStatus::NotFound);
        assert_eq!(
            outcome.messages,
            vec!["Category cannot be deleted because it does not exist."]
        );
    }

    #[tokio::test]
    async fn test_link_enumerates_every_missing_endpoint() {
        let service = service_with(MockCategoryRepository::new(), MockProductCatalog::default());

        let outcome = service.link_product("c-missing", "p-missing").await;

        assert_eq!(outcome.status, MutationStatus::NotFound);
        assert_eq!(
            outcome.messages,
            vec!["Product was not found.", "Category was not found."]
        );
    }

    #[tokio::test]
    async fn test_link_with_missing_category_only_names_the_category() {
        let repository = MockCategoryRepository::new();
        let service = service_with(repository, MockProductCatalog::with_ids(&["p-1"]));

        let outcome = service.link_product("c-missing", "p-1").await;

        assert_eq!(outcome.status, MutationStatus::NotFound);
        assert_eq!(outcome.messages, vec!["Category was not found."]);
    }

    #[tokio::test]
    async fn test_link_is_idempotent() {
        let repository = MockCategoryRepository::new();
        repository.seed(category("c-1", "Outdoor"));
        let service = service_with(repository.clone(), MockProductCatalog::with_ids(&["p-1"]));

        let first = service.link_product("c-1", "p-1").await;
        let second = service.link_product("c-1", "p-1").await;

        assert_eq!(first.status, MutationStatus::Created);
        assert!(first.created_id.is_none());
        assert_eq!(second.status, MutationStatus::Created);
        assert_eq!(repository.link_count(), 1);
    }

    #[tokio::test]
    async fn test_unlink_without_edge_still_reports_deleted() {
        let repository = MockCategoryRepository::new();
        repository.seed(category("c-1", "Outdoor"));
        let service = service_with(repository.clone(), MockProductCatalog::with_ids(&["p-1"]));

        let outcome = service.unlink_product("c-1", "p-1").await;

        assert_eq!(outcome.status, MutationStatus::Deleted);
        assert_eq!(repository.link_count(), 0);
    }

    #[tokio::test]
    async fn test_link_storage_failure_reports_error() {
        let repository = MockCategoryRepository::with_failing_edge_writes();
        repository.seed(category("c-1", "Outdoor"));
        let service = service_with(repository, MockProductCatalog::with_ids(&["p-1"]));

        let outcome = service.link_product("c-1", "p-1").await;

        assert_eq!(outcome.status, MutationStatus::Error);
        assert_eq!(
            outcome.messages[0],
            "There was an issue linking the product to the category"
        );
        assert!(outcome.messages[1].contains("database is locked"));
    }

    #[tokio::test]
    async fn test_list_categories_for_product_follows_links() {
        let repository = MockCategoryRepository::new();
        repository.seed(category("c-1", "Outdoor"));
        repository.seed(category("c-2", "Indoor"));
        let service = service_with(repository.clone(), MockProductCatalog::with_ids(&["p-1"]));

        let linked = service.link_product("c-2", "p-1").await;
        assert_eq!(linked.status, MutationStatus::Created);

        let categories = service.list_categories_for_product("p-1").unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].id, "c-2");
    }
}
