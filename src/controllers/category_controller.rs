use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::category_dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::dto::common::ApiResponse;
use crate::repositories::category_repository::CategoryRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation;

pub struct CategoryController {
    repository: CategoryRepository,
}

impl CategoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CategoryRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, AppError> {
        request.validate()?;

        validation::validate_not_empty(&request.name)
            .map_err(|_| validation_error("name", "Ingrese el nombre de la categoría"))?;

        if self.repository.name_exists(&request.name).await? {
            return Err(AppError::Conflict("La categoría ya existe".to_string()));
        }

        let category = self.repository.create(request.name).await?;

        Ok(ApiResponse::success_with_message(
            category.into(),
            "Categoría creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryResponse, AppError> {
        let category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))?;

        Ok(category.into())
    }

    pub async fn list(&self) -> Result<Vec<CategoryResponse>, AppError> {
        let categories = self.repository.find_all().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCategoryRequest,
    ) -> Result<ApiResponse<CategoryResponse>, AppError> {
        request.validate()?;

        let category = self
            .repository
            .update(id, request.name, request.is_active)
            .await?;

        Ok(ApiResponse::success_with_message(
            category.into(),
            "Categoría actualizada exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.deactivate(id).await
    }
}
