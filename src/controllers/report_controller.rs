//! Controller de reportes
//!
//! Aplana el join rental + client + vehicle + driver en filas ya
//! reconciliadas para los exportadores (planilla, cotización) y calcula
//! los KPIs del dashboard. El formato de los documentos queda fuera del
//! núcleo: aquí solo se entregan los datos.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::report_dto::{DashboardSummaryResponse, RentalExportRow};
use crate::models::rental::{Rental, RentalStatus};
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::rental_repository::RentalRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

const UNKNOWN_NAME: &str = "Desconocido";
const NO_DRIVER: &str = "Sin Chofer";

pub struct ReportController {
    rentals: RentalRepository,
    clients: ClientRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            rentals: RentalRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool),
        }
    }

    pub async fn rentals_export(&self) -> Result<Vec<RentalExportRow>, AppError> {
        let rentals = self.rentals.find_all().await?;
        let clients = self.clients.find_all().await?;
        let vehicles = self.vehicles.find_all().await?;
        let drivers = self.drivers.find_all().await?;

        // Las referencias a catálogos desactivados siguen resolviendo
        let client_names: HashMap<Uuid, (String, Option<String>)> = clients
            .into_iter()
            .map(|c| (c.id, (c.name, c.phone)))
            .collect();
        let vehicle_names: HashMap<Uuid, String> = vehicles
            .into_iter()
            .map(|v| (v.id, v.display_name()))
            .collect();
        let driver_names: HashMap<Uuid, String> =
            drivers.into_iter().map(|d| (d.id, d.name)).collect();

        let rows = rentals
            .into_iter()
            .map(|rental| {
                let (client_name, client_phone) = client_names
                    .get(&rental.client_id)
                    .cloned()
                    .unwrap_or((UNKNOWN_NAME.to_string(), None));
                let vehicle_name = vehicle_names
                    .get(&rental.vehicle_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_NAME.to_string());
                let driver_name = match rental.driver_id {
                    Some(driver_id) => driver_names
                        .get(&driver_id)
                        .cloned()
                        .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                    None => NO_DRIVER.to_string(),
                };

                RentalExportRow {
                    id: rental.id,
                    client_name,
                    client_phone,
                    vehicle_name,
                    driver_name,
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
                    created_at: rental.created_at.to_rfc3339(),
                }
            })
            .collect();

        Ok(rows)
    }

    pub async fn summary(&self) -> Result<DashboardSummaryResponse, AppError> {
        let rentals = self.rentals.find_all().await?;
        Ok(build_summary(&rentals, Local::now().date_naive()))
    }
}

/// KPIs del dashboard a partir de la colección de alquileres.
fn build_summary(rentals: &[Rental], today: NaiveDate) -> DashboardSummaryResponse {
    let reserved = rentals
        .iter()
        .filter(|r| r.status == RentalStatus::Reserved.as_str())
        .count();
    let completed = rentals.iter().filter(|r| r.is_completed()).count();

    let paid_payments = rentals.iter().filter(|r| r.payment_status == "paid").count();
    let pending_payments = rentals.len() - paid_payments;

    let total_revenue: Decimal = rentals.iter().map(|r| r.amount).sum();
    let total_collected: Decimal = rentals.iter().map(|r| r.total_paid).sum();
    // pending_amount ya es 0 en los contratos saldados, así que la suma
    // directa equivale a sumar solo lo adeudado
    let total_pending_amount: Decimal = rentals.iter().map(|r| r.pending_amount).sum();

    let this_month: Vec<&Rental> = rentals
        .iter()
        .filter(|r| r.date.year() == today.year() && r.date.month() == today.month())
        .collect();
    let this_month_revenue: Decimal = this_month.iter().map(|r| r.amount).sum();

    let today_rentals = rentals.iter().filter(|r| r.date == today).count();

    let vehicles_in_use: HashSet<Uuid> = rentals
        .iter()
        .filter(|r| r.status == RentalStatus::Reserved.as_str())
        .map(|r| r.vehicle_id)
        .collect();

    DashboardSummaryResponse {
        total_rentals: rentals.len(),
        reserved,
        completed,
        pending_payments,
        paid_payments,
        total_revenue,
        total_collected,
        total_pending_amount,
        this_month_rentals: this_month.len(),
        this_month_revenue,
        today_rentals,
        vehicles_in_use: vehicles_in_use.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveTime, Utc};

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn rental(
        day: &str,
        vehicle_id: Uuid,
        amount: i64,
        total_paid: i64,
        payment_status: &str,
        status: &str,
    ) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            vehicle_id,
            driver_id: None,
            category: "General".to_string(),
            event_name: String::new(),
            date: date(day),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            base_rate: Decimal::from(50),
            amount: Decimal::from(amount),
            total_paid: Decimal::from(total_paid),
            pending_amount: (Decimal::from(amount) - Decimal::from(total_paid))
                .max(Decimal::ZERO),
            payment_status: payment_status.to_string(),
            status: status.to_string(),
            pickup_location: "A confirmar".to_string(),
            destination_location: "A confirmar".to_string(),
            pickup_coords: None,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn summary_counts_and_totals() {
        let vehicle_a = Uuid::new_v4();
        let vehicle_b = Uuid::new_v4();
        let rentals = vec![
            rental("2025-03-10", vehicle_a, 450, 450, "paid", "completed"),
            rental("2025-03-10", vehicle_a, 300, 100, "partial", "reserved"),
            rental("2025-03-15", vehicle_b, 200, 0, "pending", "reserved"),
        ];

        let summary = build_summary(&rentals, date("2025-03-10"));

        assert_eq!(summary.total_rentals, 3);
        assert_eq!(summary.reserved, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.paid_payments, 1);
        assert_eq!(summary.pending_payments, 2);
        assert_eq!(summary.total_revenue, Decimal::from(950));
        assert_eq!(summary.total_collected, Decimal::from(550));
        assert_eq!(summary.total_pending_amount, Decimal::from(400));
        assert_eq!(summary.this_month_rentals, 3);
        assert_eq!(summary.today_rentals, 2);
        assert_eq!(summary.vehicles_in_use, 2);
    }

    #[test]
    fn summary_only_counts_current_month() {
        let vehicle = Uuid::new_v4();
        let rentals = vec![
            rental("2025-03-10", vehicle, 100, 0, "pending", "reserved"),
            rental("2025-04-01", vehicle, 200, 0, "pending", "reserved"),
        ];

        let summary = build_summary(&rentals, date("2025-03-31"));

        assert_eq!(summary.this_month_rentals, 1);
        assert_eq!(summary.this_month_revenue, Decimal::from(100));
        assert_eq!(summary.today_rentals, 0);
    }

    #[test]
    fn empty_collection_yields_zeroed_summary() {
        let summary = build_summary(&[], date("2025-03-10"));
        assert_eq!(summary.total_rentals, 0);
        assert_eq!(summary.total_revenue, Decimal::ZERO);
        assert_eq!(summary.vehicles_in_use, 0);
    }
}
