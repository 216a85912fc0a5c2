use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::{DashboardSummaryResponse, RentalExportRow};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/rentals", get(rentals_export))
        .route("/summary", get(summary))
}

/// Filas aplanadas y reconciliadas para el exportador de planillas.
async fn rentals_export(
    State(state): State<AppState>,
) -> Result<Json<Vec<RentalExportRow>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.rentals_export().await?;
    Ok(Json(response))
}

async fn summary(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummaryResponse>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.summary().await?;
    Ok(Json(response))
}
