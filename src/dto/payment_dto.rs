use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::rental_dto::RentalResponse;
use crate::models::payment::{Payment, PaymentType};

/// Sentido de la transacción: cobro al cliente o devolución.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Charge,
    Refund,
}

/// Request para registrar una transacción. El monto siempre se ingresa
/// en positivo; el signo lo determina `kind` (refund se persiste en
/// negativo).
#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    pub kind: Option<PaymentKind>,
    pub payment_type: PaymentType,

    #[validate(length(max = 100))]
    pub reference: Option<String>,

    #[validate(length(max = 500))]
    pub notes: Option<String>,

    pub payment_date: Option<NaiveDate>,
    pub payment_time: Option<String>,

    #[validate(length(max = 100))]
    pub created_by: Option<String>,
}

/// Response de transacción para la API
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub amount: Decimal,
    pub payment_type: String,
    pub payment_type_label: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub payment_date: NaiveDate,
    pub payment_time: String,
    pub created_at: String,
    pub created_by: Option<String>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            rental_id: payment.rental_id,
            amount: payment.amount,
            payment_type: payment.payment_type,
            payment_type_label: payment.payment_type_label,
            reference: payment.reference,
            notes: payment.notes,
            payment_date: payment.payment_date,
            payment_time: payment.payment_time.format("%H:%M:%S").to_string(),
            created_at: payment.created_at.to_rfc3339(),
            created_by: payment.created_by,
        }
    }
}

/// Resultado de registrar o eliminar una transacción: la transacción
/// (si aplica) y el alquiler con sus agregados ya recalculados.
#[derive(Debug, Serialize)]
pub struct PaymentRecordedResponse {
    pub payment: PaymentResponse,
    pub rental: RentalResponse,
}

/// Resumen de pagos por alquiler
#[derive(Debug, Serialize)]
pub struct PaymentSummaryResponse {
    pub total: Decimal,
    pub by_type: HashMap<String, Decimal>,
    pub count: usize,
}
