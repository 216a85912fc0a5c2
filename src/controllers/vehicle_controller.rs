use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::vehicle::VehicleStatus;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if request.brand.trim().is_empty()
            || request.model.trim().is_empty()
            || request.plate.trim().is_empty()
        {
            return Err(validation_error(
                "vehicle",
                "Ingrese marca, modelo y placa del vehículo",
            ));
        }
        validation::validate_license_plate(&request.plate)
            .map_err(|_| validation_error("plate", "Formato de placa inválido"))?;

        // La placa es única en el catálogo
        if self.repository.plate_exists(&request.plate).await? {
            return Err(AppError::Conflict("La placa ya está registrada".to_string()));
        }

        let status = match request.status.as_deref() {
            Some(value) => VehicleStatus::parse(value)
                .ok_or_else(|| validation_error("status", "Estado de vehículo inválido"))?,
            None => VehicleStatus::Available,
        };

        let vehicle = self
            .repository
            .create(
                request.brand,
                request.model,
                request.size,
                request.plate,
                status.as_str().to_string(),
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(vehicle.into())
    }

    pub async fn list(&self) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.find_all().await?;
        Ok(vehicles.into_iter().map(VehicleResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        if let Some(plate) = request.plate.as_deref() {
            validation::validate_license_plate(plate)
                .map_err(|_| validation_error("plate", "Formato de placa inválido"))?;
        }
        if let Some(status) = request.status.as_deref() {
            VehicleStatus::parse(status)
                .ok_or_else(|| validation_error("status", "Estado de vehículo inválido"))?;
        }

        let vehicle = self
            .repository
            .update(
                id,
                request.brand,
                request.model,
                request.size,
                request.plate,
                request.status,
                request.is_active,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.deactivate(id).await
    }
}
