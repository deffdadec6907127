//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use boxoffice::catalog::{Category, CategoryDraft, CategoryId};

use crate::{
    api::{ApiClient, ApiError},
    domain::Create,
};

#[derive(Debug, Clone)]
pub struct HttpCategoriesService {
    client: ApiClient,
}

impl HttpCategoriesService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoriesService for HttpCategoriesService {
    #[tracing::instrument(name = "categories.service.create_category", skip(self, draft), err)]
    async fn create_category(&self, draft: CategoryDraft) -> Result<Category, ApiError> {
        self.client
            .post("/categories/", &Create::new(&draft), None)
            .await
    }

    #[tracing::instrument(name = "categories.service.list_categories", skip(self), err)]
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.client.get("/categories", None).await
    }

    #[tracing::instrument(
        name = "categories.service.get_category",
        skip(self),
        fields(category = %id),
        err
    )]
    async fn get_category(&self, id: CategoryId) -> Result<Category, ApiError> {
        self.client.get(&format!("/categories/{id}"), None).await
    }

    #[tracing::instrument(
        name = "categories.service.update_category",
        skip(self, draft),
        fields(category = %id),
        err
    )]
    async fn update_category(
        &self,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<Category, ApiError> {
        self.client
            .patch(&format!("/categories/{id}"), &draft, None)
            .await
    }

    #[tracing::instrument(
        name = "categories.service.delete_category",
        skip(self),
        fields(category = %id),
        err
    )]
    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError> {
        self.client.delete(&format!("/categories/{id}"), None).await
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Creates a category.
    async fn create_category(&self, draft: CategoryDraft) -> Result<Category, ApiError>;

    /// Lists every category.
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Retrieve a single category.
    async fn get_category(&self, id: CategoryId) -> Result<Category, ApiError>;

    /// Replaces the fields of a category.
    async fn update_category(
        &self,
        id: CategoryId,
        draft: CategoryDraft,
    ) -> Result<Category, ApiError>;

    /// Deletes a category.
    async fn delete_category(&self, id: CategoryId) -> Result<(), ApiError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_category_omits_missing_description() -> TestResult {
        let ctx = TestContext::new().await;

        Mock::given(method("POST"))
            .and(path("/categories/"))
            .and(body_json(json!({ "id": 0, "name": "Shows" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "id": 4, "name": "Shows" })),
            )
            .expect(1)
            .mount(&ctx.server)
            .await;

        let category = HttpCategoriesService::new(ctx.client)
            .create_category(CategoryDraft {
                name: "Shows".to_string(),
                description: None,
            })
            .await?;

        assert_eq!(category.id, CategoryId::new(4));
        assert_eq!(category.description, None);

        Ok(())
    }

    #[tokio::test]
    async fn list_categories_decodes_descriptions() -> TestResult {
        let ctx = TestContext::new().await;

        Mock::given(method("GET"))
            .and(path("/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "name": "Shows", "description": "Live music" },
                { "id": 2, "name": "Esportes" }
            ])))
            .mount(&ctx.server)
            .await;

        let categories = HttpCategoriesService::new(ctx.client)
            .list_categories()
            .await?;

        assert_eq!(
            categories
                .iter()
                .map(|c| c.description.as_deref())
                .collect::<Vec<_>>(),
            [Some("Live music"), None]
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_missing_category_is_not_found() {
        let ctx = TestContext::new().await;

        Mock::given(method("DELETE"))
            .and(path("/categories/8"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&ctx.server)
            .await;

        let result = HttpCategoriesService::new(ctx.client)
            .delete_category(CategoryId::new(8))
            .await;

        assert!(
            matches!(result, Err(ApiError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
