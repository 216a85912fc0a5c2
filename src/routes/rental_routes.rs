use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::payment_controller::PaymentController;
use crate::controllers::rental_controller::RentalController;
use crate::dto::common::ApiResponse;
use crate::dto::payment_dto::{
    PaymentRecordedResponse, PaymentResponse, PaymentSummaryResponse, RecordPaymentRequest,
};
use crate::dto::rental_dto::{
    AvailabilityQuery, AvailabilityResponse, CreateRentalRequest, QuoteQuery, QuoteResponse,
    RentalResponse, UpdateRentalRequest,
};
use crate::services::rate_service;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError};
use crate::utils::validation;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_rental))
        .route("/", get(list_rentals))
        .route("/availability", get(availability))
        .route("/quote", get(quote))
        .route("/:id", get(get_rental))
        .route("/:id", put(update_rental))
        .route("/:id", delete(delete_rental))
        .route("/:id/payment", post(record_payment))
        .route("/:id/payments", get(list_payments))
        .route("/:id/payments/summary", get(payments_summary))
}

async fn create_rental(
    State(state): State<AppState>,
    Json(request): Json<CreateRentalRequest>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_rentals(
    State(state): State<AppState>,
) -> Result<Json<Vec<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RentalResponse>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRentalRequest>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Alquiler eliminado exitosamente"
    })))
}

/// Ids ocupados en la ventana consultada: el formulario deshabilita
/// estas opciones de vehículo/conductor.
async fn availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    let response = controller.availability(query).await?;
    Ok(Json(response))
}

/// Cotización reactiva del formulario: no toca la base de datos.
pub async fn quote(Query(query): Query<QuoteQuery>) -> Result<Json<QuoteResponse>, AppError> {
    let start_time = validation::validate_time(&query.start_time)
        .map_err(|_| validation_error("start_time", "Formato de hora inválido (HH:MM)"))?;
    let end_time = validation::validate_time(&query.end_time)
        .map_err(|_| validation_error("end_time", "Formato de hora inválido (HH:MM)"))?;
    validation::validate_non_negative(query.base_rate)
        .map_err(|_| validation_error("base_rate", "La tarifa base no puede ser negativa"))?;

    Ok(Json(QuoteResponse {
        duration_hours: rate_service::duration_hours(start_time, end_time),
        amount: rate_service::calculate_amount(start_time, end_time, query.base_rate),
    }))
}

async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<ApiResponse<PaymentRecordedResponse>>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    let response = controller.record(id, request).await?;
    Ok(Json(response))
}

async fn list_payments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PaymentResponse>>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    let response = controller.list_by_rental(id).await?;
    Ok(Json(response))
}

async fn payments_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentSummaryResponse>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    let response = controller.summary_by_rental(id).await?;
    Ok(Json(response))
}
