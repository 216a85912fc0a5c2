use sqlx::PgPool;
use uuid::Uuid;

use crate::models::driver::Driver;
use crate::utils::errors::AppError;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        phone: Option<String>,
        license: Option<String>,
        status: String,
    ) -> Result<Driver, AppError> {
        let id = Uuid::new_v4();

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (id, name, phone, license, status, is_active)
            VALUES ($1, $2, $3, $4, $5, TRUE)
            RETURNING *
            "#
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .bind(license)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating driver: {}", e)))?;

        Ok(driver)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding driver: {}", e)))?;

        Ok(driver)
    }

    pub async fn find_all(&self) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>("SELECT * FROM drivers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing drivers: {}", e)))?;

        Ok(drivers)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        phone: Option<String>,
        license: Option<String>,
        status: Option<String>,
        is_active: Option<bool>,
    ) -> Result<Driver, AppError> {
        // Obtener conductor actual
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET name = $2, phone = $3, license = $4, status = $5, is_active = $6
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(phone.or(current.phone))
        .bind(license.or(current.license))
        .bind(status.unwrap_or(current.status))
        .bind(is_active.unwrap_or(current.is_active))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating driver: {}", e)))?;

        Ok(driver)
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<(), AppError> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        sqlx::query("UPDATE drivers SET is_active = FALSE WHERE id = $1")
            .bind(current.id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deactivating driver: {}", e)))?;

        Ok(())
    }
}
