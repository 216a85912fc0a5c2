//! Modelo de Rental (contrato de alquiler)
//!
//! Mapea exactamente a la tabla rentals. Los agregados de pago
//! (total_paid, pending_amount, payment_status) se recalculan en cada
//! escritura del ledger — nunca se editan de forma independiente.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Estado del contrato - ciclo de vida reserved → completed (terminal)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Reserved,
    Completed,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Reserved => "reserved",
            RentalStatus::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "reserved" => Some(RentalStatus::Reserved),
            "completed" => Some(RentalStatus::Completed),
            _ => None,
        }
    }
}

/// Clasificación del estado de pago - mapea a la columna payment_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        }
    }
}

/// Rental principal - mapea exactamente a la tabla rentals
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Rental {
    pub id: Uuid,
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
    pub total_paid: Decimal,
    pub pending_amount: Decimal,
    pub payment_status: String,
    pub status: String,
    pub pickup_location: String,
    pub destination_location: String,
    pub pickup_coords: Option<sqlx::types::Json<serde_json::Value>>,
    pub created_at: DateTime<Utc>,
}

impl Rental {
    pub fn is_completed(&self) -> bool {
        self.status == RentalStatus::Completed.as_str()
    }
}
