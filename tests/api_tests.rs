use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use rental_management::routes::rental_routes;

// App de test sin base de datos: health + el endpoint puro de cotización
fn create_test_app() -> Router {
    Router::new()
        .route(
            "/health",
            get(|| async {
                axum::Json(json!({
                    "service": "rental-management",
                    "status": "healthy"
                }))
            }),
        )
        .route("/api/rental/quote", get(rental_routes::quote))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["service"], "rental-management");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_quote_fractional_hours() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/rental/quote?start_time=09:00&end_time=11:30&base_rate=100")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["amount"], "250");
}

#[tokio::test]
async fn test_quote_minimum_one_hour() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/rental/quote?start_time=09:00&end_time=09:30&base_rate=100")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["amount"], "100");
}

#[tokio::test]
async fn test_quote_rejects_invalid_time() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/rental/quote?start_time=9am&end_time=11:30&base_rate=100")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_quote_rejects_negative_rate() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/rental/quote?start_time=09:00&end_time=11:30&base_rate=-5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
