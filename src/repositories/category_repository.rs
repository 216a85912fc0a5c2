use sqlx::PgPool;
use uuid::Uuid;

use crate::models::category::Category;
use crate::utils::errors::AppError;

pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: String) -> Result<Category, AppError> {
        let id = Uuid::new_v4();

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name, is_active)
            VALUES ($1, $2, TRUE)
            RETURNING *
            "#
        )
        .bind(id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating category: {}", e)))?;

        Ok(category)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding category: {}", e)))?;

        Ok(category)
    }

    pub async fn find_all(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing categories: {}", e)))?;

        Ok(categories)
    }

    pub async fn name_exists(&self, name: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1)"
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking category name: {}", e)))?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        is_active: Option<bool>,
    ) -> Result<Category, AppError> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, is_active = $3
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(is_active.unwrap_or(current.is_active))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating category: {}", e)))?;

        Ok(category)
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<(), AppError> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Categoría no encontrada".to_string()))?;

        sqlx::query("UPDATE categories SET is_active = FALSE WHERE id = $1")
            .bind(current.id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deactivating category: {}", e)))?;

        Ok(())
    }
}
