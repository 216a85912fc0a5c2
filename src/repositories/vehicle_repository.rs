use sqlx::PgPool;
use uuid::Uuid;

use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        brand: String,
        model: String,
        size: Option<String>,
        plate: String,
        status: String,
    ) -> Result<Vehicle, AppError> {
        let id = Uuid::new_v4();

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, brand, model, size, plate, status, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, TRUE)
            RETURNING *
            "#
        )
        .bind(id)
        .bind(brand)
        .bind(model)
        .bind(size)
        .bind(plate)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY brand ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing vehicles: {}", e)))?;

        Ok(vehicles)
    }

    pub async fn plate_exists(&self, plate: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1)"
        )
        .bind(plate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error checking plate: {}", e)))?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        brand: Option<String>,
        model: Option<String>,
        size: Option<String>,
        plate: Option<String>,
        status: Option<String>,
        is_active: Option<bool>,
    ) -> Result<Vehicle, AppError> {
        // Obtener vehículo actual
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET brand = $2, model = $3, size = $4, plate = $5, status = $6, is_active = $7
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(brand.unwrap_or(current.brand))
        .bind(model.unwrap_or(current.model))
        .bind(size.or(current.size))
        .bind(plate.unwrap_or(current.plate))
        .bind(status.unwrap_or(current.status))
        .bind(is_active.unwrap_or(current.is_active))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating vehicle: {}", e)))?;

        Ok(vehicle)
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<(), AppError> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        sqlx::query("UPDATE vehicles SET is_active = FALSE WHERE id = $1")
            .bind(current.id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deactivating vehicle: {}", e)))?;

        Ok(())
    }
}
