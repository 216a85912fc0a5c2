use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::client_dto::{ClientResponse, CreateClientRequest, UpdateClientRequest};
use crate::dto::common::ApiResponse;
use crate::repositories::client_repository::ClientRepository;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation;

pub struct ClientController {
    repository: ClientRepository,
}

impl ClientController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClientRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateClientRequest,
    ) -> Result<ApiResponse<ClientResponse>, AppError> {
        request.validate()?;

        validation::validate_not_empty(&request.name)
            .map_err(|_| validation_error("name", "Ingrese nombre del cliente"))?;
        if let Some(phone) = request.phone.as_deref() {
            validation::validate_phone(phone)
                .map_err(|_| validation_error("phone", "Teléfono inválido"))?;
        }

        let client = self.repository.create(request.name, request.phone).await?;

        Ok(ApiResponse::success_with_message(
            client.into(),
            "Cliente creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ClientResponse, AppError> {
        let client = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        Ok(client.into())
    }

    pub async fn list(&self) -> Result<Vec<ClientResponse>, AppError> {
        let clients = self.repository.find_all().await?;
        Ok(clients.into_iter().map(ClientResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateClientRequest,
    ) -> Result<ApiResponse<ClientResponse>, AppError> {
        request.validate()?;

        if let Some(phone) = request.phone.as_deref() {
            validation::validate_phone(phone)
                .map_err(|_| validation_error("phone", "Teléfono inválido"))?;
        }

        let client = self
            .repository
            .update(id, request.name, request.phone, request.is_active)
            .await?;

        Ok(ApiResponse::success_with_message(
            client.into(),
            "Cliente actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.deactivate(id).await
    }
}
