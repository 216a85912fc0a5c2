use chrono::{NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::payment::Payment;
use crate::models::rental::Rental;
use crate::services::ledger_service;
use crate::utils::errors::AppError;

/// Transacción nueva con el monto ya firmado (negativo = devolución).
#[derive(Debug)]
pub struct NewPayment {
    pub rental_id: Uuid,
    pub amount: Decimal,
    pub payment_type: String,
    pub payment_type_label: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub payment_date: NaiveDate,
    pub payment_time: NaiveTime,
    pub created_by: Option<String>,
}

pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error finding payment: {}", e)))?;

        Ok(payment)
    }

    pub async fn find_by_rental(&self, rental_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE rental_id = $1 ORDER BY created_at DESC"
        )
        .bind(rental_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error listing payments: {}", e)))?;

        Ok(payments)
    }

    /// Insertar la transacción y recalcular los agregados del alquiler
    /// desde la tabla de pagos, todo en una transacción. El recálculo es
    /// explícito en la aplicación: no hay trigger en el backend.
    pub async fn create_and_reconcile(
        &self,
        rental_amount: Decimal,
        data: NewPayment,
    ) -> Result<(Payment, Rental), AppError> {
        let id = Uuid::new_v4();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments (
                id, rental_id, amount, payment_type, payment_type_label,
                reference, notes, payment_date, payment_time, created_at, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#
        )
        .bind(id)
        .bind(data.rental_id)
        .bind(data.amount)
        .bind(data.payment_type)
        .bind(data.payment_type_label)
        .bind(data.reference)
        .bind(data.notes)
        .bind(data.payment_date)
        .bind(data.payment_time)
        .bind(Utc::now())
        .bind(data.created_by)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Error creating payment: {}", e)))?;

        let rental =
            Self::reconcile_rental(&mut tx, data.rental_id, rental_amount).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing transaction: {}", e)))?;

        Ok((payment, rental))
    }

    /// Eliminar la transacción y recalcular los agregados del alquiler
    /// dueño en la misma transacción.
    pub async fn delete_and_reconcile(&self, payment: &Payment) -> Result<Rental, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Error starting transaction: {}", e)))?;

        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(payment.rental_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error finding rental for payment: {}", e)))?;

        sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(payment.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting payment: {}", e)))?;

        let rental = Self::reconcile_rental(&mut tx, rental.id, rental.amount).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Error committing transaction: {}", e)))?;

        Ok(rental)
    }

    /// Recalcular total_paid / pending_amount / payment_status desde la
    /// suma firmada de la tabla de pagos y escribirlos en el alquiler.
    async fn reconcile_rental(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        rental_id: Uuid,
        rental_amount: Decimal,
    ) -> Result<Rental, AppError> {
        let (total_paid,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE rental_id = $1"
        )
        .bind(rental_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::Database(format!("Error summing payments: {}", e)))?;

        let summary = ledger_service::from_totals(rental_amount, total_paid);

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET total_paid = $2, pending_amount = $3, payment_status = $4
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(rental_id)
        .bind(summary.total_paid)
        .bind(summary.pending_amount)
        .bind(summary.payment_status().as_str())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| AppError::Database(format!("Error updating rental aggregates: {}", e)))?;

        Ok(rental)
    }
}
