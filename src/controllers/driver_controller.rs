use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::driver_dto::{CreateDriverRequest, DriverResponse, UpdateDriverRequest};
use crate::models::driver::DriverStatus;
use crate::repositories::driver_repository::DriverRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation;

pub struct DriverController {
    repository: DriverRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        validation::validate_not_empty(&request.name)
            .map_err(|_| validation_error("name", "Ingrese el nombre del conductor"))?;
        if let Some(phone) = request.phone.as_deref() {
            validation::validate_phone(phone)
                .map_err(|_| validation_error("phone", "Teléfono inválido"))?;
        }

        let status = match request.status.as_deref() {
            Some(value) => DriverStatus::parse(value)
                .ok_or_else(|| validation_error("status", "Estado de conductor inválido"))?,
            None => DriverStatus::Available,
        };

        let driver = self
            .repository
            .create(
                request.name,
                request.phone,
                request.license,
                status.as_str().to_string(),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            driver.into(),
            "Conductor creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        let driver = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Conductor no encontrado".to_string()))?;

        Ok(driver.into())
    }

    pub async fn list(&self) -> Result<Vec<DriverResponse>, AppError> {
        let drivers = self.repository.find_all().await?;
        Ok(drivers.into_iter().map(DriverResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateDriverRequest,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        if let Some(status) = request.status.as_deref() {
            DriverStatus::parse(status)
                .ok_or_else(|| validation_error("status", "Estado de conductor inválido"))?;
        }

        let driver = self
            .repository
            .update(
                id,
                request.name,
                request.phone,
                request.license,
                request.status,
                request.is_active,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            driver.into(),
            "Conductor actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.deactivate(id).await
    }
}
