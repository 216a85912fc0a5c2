use sqlx::PgPool;
use uuid::Uuid;

use crate::models::client::Client;
use crate::utils::errors::AppError;

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: String, phone: Option<String>) -> Result<Client, AppError> {
        let id = Uuid::new_v4();

        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, name, phone, is_active)
            VALUES ($1, $2, $3, TRUE)
            RETURNING *
            "#
        )
        .bind(id)
        .bind(name)
        .bind(phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating client: {}", e)))?;

        Ok(client)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding client: {}", e)))?;

        Ok(client)
    }

    pub async fn find_all(&self) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing clients: {}", e)))?;

        Ok(clients)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        phone: Option<String>,
        is_active: Option<bool>,
    ) -> Result<Client, AppError> {
        // Obtener cliente actual
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        let client = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = $2, phone = $3, is_active = $4
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(phone.or(current.phone))
        .bind(is_active.unwrap_or(current.is_active))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating client: {}", e)))?;

        Ok(client)
    }

    /// Baja lógica: los alquileres existentes siguen resolviendo la
    /// referencia para mostrarla.
    pub async fn deactivate(&self, id: Uuid) -> Result<(), AppError> {
        let current = self.find_by_id(id).await?
            .ok_or_else(|| AppError::NotFound("Cliente no encontrado".to_string()))?;

        sqlx::query("UPDATE clients SET is_active = FALSE WHERE id = $1")
            .bind(current.id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deactivating client: {}", e)))?;

        Ok(())
    }
}
