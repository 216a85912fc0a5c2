//! Modelo de Payment (transacción de pago)
//!
//! Una transacción pertenece a exactamente un alquiler. El monto es
//! firmado: positivo = cobro, negativo = devolución al cliente.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tipo de pago disponible
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    BankTransfer,
    Qr,
    Other,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Cash => "cash",
            PaymentType::BankTransfer => "bank_transfer",
            PaymentType::Qr => "qr",
            PaymentType::Other => "other",
        }
    }

    /// Etiqueta legible para el usuario
    pub fn label(&self) -> &'static str {
        match self {
            PaymentType::Cash => "Efectivo",
            PaymentType::BankTransfer => "Transferencia Bancaria",
            PaymentType::Qr => "Pago QR",
            PaymentType::Other => "Otro",
        }
    }
}

/// Payment principal - mapea exactamente a la tabla payments
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Payment {
    pub id: Uuid,
    pub rental_id: Uuid,
    pub amount: Decimal,
    pub payment_type: String,
    pub payment_type_label: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub payment_date: NaiveDate,
    pub payment_time: NaiveTime,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}
