use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::rental::Rental;
use crate::utils::errors::AppError;

/// Datos de un contrato nuevo. Los agregados iniciales (total_paid = 0,
/// pending_amount, payment_status) los calcula el controller con el
/// reductor del ledger y llegan ya resueltos.
#[derive(Debug)]
pub struct NewRental {
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub category: String,
    pub event_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub base_rate: Decimal,
    pub amount: Decimal,
    pub pending_amount: Decimal,
    pub payment_status: String,
    pub status: String,
    pub pickup_location: String,
    pub destination_location: String,
    pub pickup_coords: Option<serde_json::Value>,
}

/// Conjunto completo de valores resultantes de un update (el controller
/// ya hizo el merge campo a campo con el contrato actual).
#[derive(Debug)]
pub struct RentalUpdate {
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub category: String,
    pub event_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub base_rate: Decimal,
    pub amount: Decimal,
    pub pending_amount: Decimal,
    pub payment_status: String,
    pub status: String,
    pub pickup_location: String,
    pub destination_location: String,
    pub pickup_coords: Option<serde_json::Value>,
}

pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Rental>, AppError> {
        let rentals = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing rentals: {}", e)))?;

        Ok(rentals)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, AppError> {
        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding rental: {}", e)))?;

        Ok(rental)
    }

    pub async fn find_by_status(&self, status: &str) -> Result<Vec<Rental>, AppError> {
        let rentals = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE status = $1 ORDER BY created_at DESC"
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing rentals by status: {}", e)))?;

        Ok(rentals)
    }

    /// Alquileres no completados de un día calendario, para el detector
    /// de conflictos. `exclude` omite el contrato que se está editando.
    pub async fn find_active_on_date(
        &self,
        date: NaiveDate,
        exclude: Option<Uuid>,
    ) -> Result<Vec<Rental>, AppError> {
        let rentals = match exclude {
            Some(id) => {
                sqlx::query_as::<_, Rental>(
                    "SELECT * FROM rentals WHERE date = $1 AND status <> 'completed' AND id <> $2"
                )
                .bind(date)
                .bind(id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, Rental>(
                    "SELECT * FROM rentals WHERE date = $1 AND status <> 'completed'"
                )
                .bind(date)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::Database(format!("Error listing rentals by date: {}", e)))?;

        Ok(rentals)
    }

    pub async fn create(&self, data: NewRental) -> Result<Rental, AppError> {
        let id = Uuid::new_v4();

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals (
                id, client_id, vehicle_id, driver_id, category, event_name,
                date, start_time, end_time, base_rate, amount,
                total_paid, pending_amount, payment_status, status,
                pickup_location, destination_location, pickup_coords, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, 0, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#
        )
        .bind(id)
        .bind(data.client_id)
        .bind(data.vehicle_id)
        .bind(data.driver_id)
        .bind(data.category)
        .bind(data.event_name)
        .bind(data.date)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.base_rate)
        .bind(data.amount)
        .bind(data.pending_amount)
        .bind(data.payment_status)
        .bind(data.status)
        .bind(data.pickup_location)
        .bind(data.destination_location)
        .bind(data.pickup_coords.map(sqlx::types::Json))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating rental: {}", e)))?;

        Ok(rental)
    }

    pub async fn update(&self, id: Uuid, changes: RentalUpdate) -> Result<Rental, AppError> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET client_id = $2, vehicle_id = $3, driver_id = $4, category = $5,
                event_name = $6, date = $7, start_time = $8, end_time = $9,
                base_rate = $10, amount = $11, pending_amount = $12,
                payment_status = $13, status = $14, pickup_location = $15,
                destination_location = $16, pickup_coords = $17
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(changes.client_id)
        .bind(changes.vehicle_id)
        .bind(changes.driver_id)
        .bind(changes.category)
        .bind(changes.event_name)
        .bind(changes.date)
        .bind(changes.start_time)
        .bind(changes.end_time)
        .bind(changes.base_rate)
        .bind(changes.amount)
        .bind(changes.pending_amount)
        .bind(changes.payment_status)
        .bind(changes.status)
        .bind(changes.pickup_location)
        .bind(changes.destination_location)
        .bind(changes.pickup_coords.map(sqlx::types::Json))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating rental: {}", e)))?;

        Ok(rental)
    }

    /// Cambio de estado de una sola fila (lo usa el barrido de
    /// auto-completado; re-aplicarlo sobre un contrato completado es
    /// un no-op).
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<Rental, AppError> {
        let rental = sqlx::query_as::<_, Rental>(
            "UPDATE rentals SET status = $2 WHERE id = $1 RETURNING *"
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating rental status: {}", e)))?;

        Ok(rental)
    }

    /// Eliminar un contrato y sus pagos en una sola transacción
    /// (cascada explícita, sin depender de triggers del backend).
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        sqlx::query("DELETE FROM payments WHERE rental_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting rental payments: {}", e)))?;

        sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting rental: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing transaction: {}", e)))?;

        Ok(())
    }
}
