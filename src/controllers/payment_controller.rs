//! Controller de pagos
//!
//! Registra cobros y devoluciones contra el ledger de un alquiler.
//! Los topes (pendiente para cobros, sobrepago para devoluciones) se
//! validan con el reductor antes de escribir; en fallo no hay ningún
//! efecto secundario.

use std::collections::HashMap;

use chrono::Local;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::dto::payment_dto::{
    PaymentKind, PaymentRecordedResponse, PaymentResponse, PaymentSummaryResponse,
    RecordPaymentRequest,
};
use crate::dto::rental_dto::RentalResponse;
use crate::repositories::payment_repository::{NewPayment, PaymentRepository};
use crate::repositories::rental_repository::RentalRepository;
use crate::services::ledger_service;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation;

pub struct PaymentController {
    payments: PaymentRepository,
    rentals: RentalRepository,
}

impl PaymentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            payments: PaymentRepository::new(pool.clone()),
            rentals: RentalRepository::new(pool),
        }
    }

    pub async fn record(
        &self,
        rental_id: Uuid,
        request: RecordPaymentRequest,
    ) -> Result<ApiResponse<PaymentRecordedResponse>, AppError> {
        request.validate()?;

        let rental = self
            .rentals
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alquiler no encontrado".to_string()))?;

        let summary = ledger_service::from_totals(rental.amount, rental.total_paid);
        let kind = request.kind.unwrap_or(PaymentKind::Charge);

        // El monto se ingresa en positivo; el signo persistido lo decide
        // el sentido de la transacción
        let (signed_amount, label) = match kind {
            PaymentKind::Charge => {
                ledger_service::validate_charge(&summary, request.amount)?;
                (request.amount, request.payment_type.label().to_string())
            }
            PaymentKind::Refund => {
                ledger_service::validate_refund(&summary, request.amount)?;
                (
                    -request.amount,
                    format!("Devolución - {}", request.payment_type.label()),
                )
            }
        };

        let now = Local::now().naive_local();
        let payment_date = request.payment_date.unwrap_or_else(|| now.date());
        let payment_time = match request.payment_time.as_deref() {
            Some(value) => validation::validate_time(value)
                .map_err(|_| validation_error("payment_time", "Formato de hora inválido (HH:MM)"))?,
            None => now.time(),
        };

        let (payment, rental) = self
            .payments
            .create_and_reconcile(
                rental.amount,
                NewPayment {
                    rental_id,
                    amount: signed_amount,
                    payment_type: request.payment_type.as_str().to_string(),
                    payment_type_label: label,
                    reference: request.reference.filter(|r| !r.trim().is_empty()),
                    notes: request.notes.filter(|n| !n.trim().is_empty()),
                    payment_date,
                    payment_time,
                    created_by: request.created_by,
                },
            )
            .await?;

        let message = match kind {
            PaymentKind::Charge => "Pago registrado exitosamente",
            PaymentKind::Refund => "Devolución registrada exitosamente",
        };

        Ok(ApiResponse::success_with_message(
            PaymentRecordedResponse {
                payment: payment.into(),
                rental: rental.into(),
            },
            message.to_string(),
        ))
    }

    pub async fn list_by_rental(&self, rental_id: Uuid) -> Result<Vec<PaymentResponse>, AppError> {
        self.rentals
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alquiler no encontrado".to_string()))?;

        let payments = self.payments.find_by_rental(rental_id).await?;
        Ok(payments.into_iter().map(PaymentResponse::from).collect())
    }

    pub async fn summary_by_rental(
        &self,
        rental_id: Uuid,
    ) -> Result<PaymentSummaryResponse, AppError> {
        self.rentals
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alquiler no encontrado".to_string()))?;

        let payments = self.payments.find_by_rental(rental_id).await?;

        let total: Decimal = payments.iter().map(|p| p.amount).sum();
        let mut by_type: HashMap<String, Decimal> = HashMap::new();
        for payment in &payments {
            *by_type
                .entry(payment.payment_type.clone())
                .or_insert(Decimal::ZERO) += payment.amount;
        }

        Ok(PaymentSummaryResponse {
            total,
            by_type,
            count: payments.len(),
        })
    }

    pub async fn delete(&self, payment_id: Uuid) -> Result<ApiResponse<RentalResponse>, AppError> {
        let payment = self
            .payments
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pago no encontrado".to_string()))?;

        let rental = self.payments.delete_and_reconcile(&payment).await?;

        Ok(ApiResponse::success_with_message(
            rental.into(),
            "Pago eliminado exitosamente".to_string(),
        ))
    }
}
