use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::rental::Rental;

/// Request para crear un nuevo contrato de alquiler.
/// Las horas llegan como "HH:MM" (formato del formulario); si no se envía
/// `amount` el servidor lo calcula con la tarifa base.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRentalRequest {
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(length(max = 200))]
    pub event_name: Option<String>,

    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub base_rate: Decimal,

    /// Monto manual; omitirlo activa la calculadora de tarifas
    pub amount: Option<Decimal>,

    pub status: Option<String>,

    #[validate(length(max = 300))]
    pub pickup_location: Option<String>,

    #[validate(length(max = 300))]
    pub destination_location: Option<String>,

    pub pickup_coords: Option<serde_json::Value>,
}

/// Request para actualizar un contrato existente (semántica de patch:
/// los campos ausentes conservan su valor actual).
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRentalRequest {
    pub client_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub driver_id: Option<Uuid>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(length(max = 200))]
    pub event_name: Option<String>,

    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub base_rate: Option<Decimal>,
    pub amount: Option<Decimal>,
    pub status: Option<String>,

    #[validate(length(max = 300))]
    pub pickup_location: Option<String>,

    #[validate(length(max = 300))]
    pub destination_location: Option<String>,

    pub pickup_coords: Option<serde_json::Value>,
}

/// Response de contrato para la API
#[derive(Debug, Serialize)]
pub struct RentalResponse {
    pub id: Uuid,
    pub client_id: Uuid,
    pub vehicle_id: Uuid,
    pub driver_id: Option<Uuid>,
    pub category: String,
    pub event_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub base_rate: Decimal,
    pub amount: Decimal,
    pub total_paid: Decimal,
    pub pending_amount: Decimal,
    /// total_paid - amount; positivo cuando hay sobrepago a devolver
    pub balance: Decimal,
    pub payment_status: String,
    pub status: String,
    pub pickup_location: String,
    pub destination_location: String,
    pub pickup_coords: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            id: rental.id,
            client_id: rental.client_id,
            vehicle_id: rental.vehicle_id,
            driver_id: rental.driver_id,
            category: rental.category,
            event_name: rental.event_name,
            date: rental.date,
            start_time: rental.start_time.format("%H:%M").to_string(),
            end_time: rental.end_time.format("%H:%M").to_string(),
            base_rate: rental.base_rate,
            amount: rental.amount,
            total_paid: rental.total_paid,
            pending_amount: rental.pending_amount,
            balance: rental.total_paid - rental.amount,
            payment_status: rental.payment_status,
            status: rental.status,
            pickup_location: rental.pickup_location,
            destination_location: rental.destination_location,
            pickup_coords: rental.pickup_coords.map(|c| c.0),
            created_at: rental.created_at.to_rfc3339(),
        }
    }
}

/// Query para consultar disponibilidad de vehículos/conductores
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    /// Alquiler a excluir (el que se está editando)
    pub exclude: Option<Uuid>,
}

/// Ids ocupados en la ventana consultada - el formulario deshabilita
/// estas opciones y el guardado vuelve a validar en el servidor
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub busy_vehicle_ids: Vec<Uuid>,
    pub busy_driver_ids: Vec<Uuid>,
    pub conflicting_rental_ids: Vec<Uuid>,
}

/// Query para cotizar un monto sin crear el contrato
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub start_time: String,
    pub end_time: String,
    pub base_rate: Decimal,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub duration_hours: Decimal,
    pub amount: Decimal,
}
