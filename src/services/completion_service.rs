//! Regla de auto-completado
//!
//! Barrido periódico que promueve reservas a "completed" cuando el
//! contrato está totalmente pagado y su hora de fin ya pasó. El barrido
//! es at-least-once e idempotente: volver a aplicar el cambio de estado
//! sobre un contrato completado no tiene efecto, y los errores se
//! registran y se reintentan en el siguiente tick sin estado intermedio.

use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::PgPool;
use tracing::{debug, error, info};

use crate::models::rental::{Rental, RentalStatus};
use crate::repositories::rental_repository::RentalRepository;
use crate::services::ledger_service;
use crate::utils::errors::AppError;

pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

fn fallback_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap()
}

/// Instante efectivo de fin: fecha + hora de fin (23:59 si falta).
pub fn effective_end(date: NaiveDate, end_time: Option<NaiveTime>) -> NaiveDateTime {
    date.and_time(end_time.unwrap_or_else(fallback_end_time))
}

/// Un alquiler reservado es elegible cuando el ledger lo da por pagado
/// (incluye el caso de sobrepago) y `now` ya pasó su instante de fin.
pub fn is_due(rental: &Rental, now: NaiveDateTime) -> bool {
    if rental.status != RentalStatus::Reserved.as_str() {
        return false;
    }
    let summary = ledger_service::from_totals(rental.amount, rental.total_paid);
    summary.is_paid() && now > effective_end(rental.date, Some(rental.end_time))
}

/// Ejecutar una pasada del barrido. Devuelve cuántos contratos se
/// completaron; los fallos por contrato se registran y no abortan la
/// pasada.
pub async fn sweep_once(pool: &PgPool) -> Result<usize, AppError> {
    let repository = RentalRepository::new(pool.clone());
    let reserved = repository.find_by_status(RentalStatus::Reserved.as_str()).await?;
    let now = Local::now().naive_local();

    let mut completed = 0;
    for rental in reserved {
        if !is_due(&rental, now) {
            continue;
        }
        match repository
            .update_status(rental.id, RentalStatus::Completed.as_str())
            .await
        {
            Ok(_) => {
                completed += 1;
                info!("Alquiler {} completado automáticamente", rental.id);
            }
            Err(e) => {
                // Se reintenta en el siguiente tick
                error!("Error al completar alquiler {} automáticamente: {}", rental.id, e);
            }
        }
    }

    Ok(completed)
}

/// Tarea de fondo: una pasada inmediata al arrancar y luego una por
/// intervalo.
pub async fn run(pool: PgPool, interval_secs: u64) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
    loop {
        interval.tick().await;
        match sweep_once(&pool).await {
            Ok(0) => debug!("Barrido de auto-completado sin cambios"),
            Ok(n) => info!("Barrido de auto-completado: {} contrato(s) completado(s)", n),
            Err(e) => error!("Error en barrido de auto-completado: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn time(value: &str) -> NaiveTime {
        NaiveTime::parse_from_str(value, "%H:%M").unwrap()
    }

    fn rental(day: &str, end: &str, amount: i64, total_paid: i64, status: &str) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            driver_id: None,
            category: "General".to_string(),
            event_name: String::new(),
            date: date(day),
            start_time: time("09:00"),
            end_time: time(end),
            base_rate: Decimal::from(50),
            amount: Decimal::from(amount),
            total_paid: Decimal::from(total_paid),
            pending_amount: (Decimal::from(amount) - Decimal::from(total_paid)).max(Decimal::ZERO),
            payment_status: "pending".to_string(),
            status: status.to_string(),
            pickup_location: "A confirmar".to_string(),
            destination_location: "A confirmar".to_string(),
            pickup_coords: None,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn paid_and_elapsed_is_due() {
        let r = rental("2025-03-10", "18:00", 450, 450, "reserved");
        let now = date("2025-03-11").and_time(time("08:00"));
        assert!(is_due(&r, now));
    }

    #[test]
    fn overpaid_counts_as_paid() {
        let r = rental("2025-03-10", "18:00", 450, 500, "reserved");
        let now = date("2025-03-11").and_time(time("08:00"));
        assert!(is_due(&r, now));
    }

    #[test]
    fn unpaid_is_never_due() {
        let r = rental("2025-03-10", "18:00", 450, 200, "reserved");
        let now = date("2025-03-11").and_time(time("08:00"));
        assert!(!is_due(&r, now));
    }

    #[test]
    fn future_end_is_not_due() {
        let r = rental("2025-03-10", "18:00", 450, 450, "reserved");
        let now = date("2025-03-10").and_time(time("17:59"));
        assert!(!is_due(&r, now));
    }

    #[test]
    fn end_instant_itself_is_not_due() {
        // La condición es estrictamente "now > fin"
        let r = rental("2025-03-10", "18:00", 450, 450, "reserved");
        let now = date("2025-03-10").and_time(time("18:00"));
        assert!(!is_due(&r, now));
    }

    #[test]
    fn completed_rental_is_never_selected_again() {
        // Idempotencia del barrido: completed es terminal
        let r = rental("2025-03-10", "18:00", 450, 450, "completed");
        let now = date("2025-03-11").and_time(time("08:00"));
        assert!(!is_due(&r, now));
    }

    #[test]
    fn effective_end_defaults_to_end_of_day() {
        let end = effective_end(date("2025-03-10"), None);
        assert_eq!(end, date("2025-03-10").and_time(time("23:59")));
    }
}
