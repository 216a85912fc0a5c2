use axum::{
    extract::{Path, State},
    routing::delete,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::payment_controller::PaymentController;
use crate::dto::common::ApiResponse;
use crate::dto::rental_dto::RentalResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    Router::new().route("/:id", delete(delete_payment))
}

/// Edición administrativa: eliminar una transacción recalcula los
/// agregados del alquiler dueño.
async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}
