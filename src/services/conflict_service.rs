//! Detector de conflictos de horario
//!
//! Dada una ventana candidata {fecha, inicio, fin} y el conjunto de
//! alquileres existentes, determina qué vehículos y conductores ya están
//! reservados en una ventana superpuesta del mismo día. Dos intervalos
//! semiabiertos [s1, e1) y [s2, e2) se superponen sii s1 < e2 && s2 < e1,
//! comparando minutos desde medianoche. No hay soporte para intervalos
//! que crucen medianoche.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime, Timelike};
use uuid::Uuid;

use crate::models::rental::Rental;

/// Ventana de reserva de un día calendario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

fn minutes_since_midnight(time: NaiveTime) -> i32 {
    (time.hour() * 60 + time.minute()) as i32
}

impl BookingWindow {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self { date, start, end }
    }

    /// Superposición semiabierta sobre el mismo día calendario.
    pub fn overlaps(&self, other: &BookingWindow) -> bool {
        if self.date != other.date {
            return false;
        }
        let s1 = minutes_since_midnight(self.start);
        let e1 = minutes_since_midnight(self.end);
        let s2 = minutes_since_midnight(other.start);
        let e2 = minutes_since_midnight(other.end);
        s1 < e2 && s2 < e1
    }
}

/// Resultado de la detección: alquileres en conflicto y los recursos
/// que ya están ocupados en la ventana candidata.
#[derive(Debug, Clone, Default)]
pub struct ConflictReport {
    pub rentals: Vec<Uuid>,
    pub vehicles: HashSet<Uuid>,
    pub drivers: HashSet<Uuid>,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.rentals.is_empty()
    }

    pub fn vehicle_busy(&self, vehicle_id: Uuid) -> bool {
        self.vehicles.contains(&vehicle_id)
    }

    pub fn driver_busy(&self, driver_id: Uuid) -> bool {
        self.drivers.contains(&driver_id)
    }
}

/// Detectar conflictos de la ventana candidata contra los alquileres
/// existentes. `exclude` omite el alquiler que se está editando. Los
/// alquileres completados nunca generan conflicto.
pub fn detect(candidate: &BookingWindow, existing: &[Rental], exclude: Option<Uuid>) -> ConflictReport {
    let mut report = ConflictReport::default();

    for rental in existing {
        if exclude == Some(rental.id) {
            continue;
        }
        if rental.is_completed() {
            continue;
        }

        let window = BookingWindow::new(rental.date, rental.start_time, rental.end_time);
        if window.overlaps(candidate) {
            report.rentals.push(rental.id);
            report.vehicles.insert(rental.vehicle_id);
            if let Some(driver_id) = rental.driver_id {
                report.drivers.insert(driver_id);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rust_decimal::Decimal;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn time(value: &str) -> NaiveTime {
        NaiveTime::parse_from_str(value, "%H:%M").unwrap()
    }

    fn rental(
        day: &str,
        start: &str,
        end: &str,
        vehicle_id: Uuid,
        driver_id: Option<Uuid>,
        status: &str,
    ) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            vehicle_id,
            driver_id,
            category: "General".to_string(),
            event_name: String::new(),
            date: date(day),
            start_time: time(start),
            end_time: time(end),
            base_rate: Decimal::from(50),
            amount: Decimal::from(150),
            total_paid: Decimal::ZERO,
            pending_amount: Decimal::from(150),
            payment_status: "pending".to_string(),
            status: status.to_string(),
            pickup_location: "A confirmar".to_string(),
            destination_location: "A confirmar".to_string(),
            pickup_coords: None,
            created_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    #[test]
    fn overlapping_window_flags_vehicle() {
        let vehicle = Uuid::new_v4();
        let existing = vec![rental("2025-03-10", "09:00", "12:00", vehicle, None, "reserved")];

        let candidate = BookingWindow::new(date("2025-03-10"), time("11:00"), time("13:00"));
        let report = detect(&candidate, &existing, None);

        assert_eq!(report.rentals.len(), 1);
        assert!(report.vehicle_busy(vehicle));
    }

    #[test]
    fn touching_windows_do_not_conflict() {
        // [09:00, 12:00) y [12:00, 14:00) se tocan pero no se superponen
        let vehicle = Uuid::new_v4();
        let existing = vec![rental("2025-03-10", "09:00", "12:00", vehicle, None, "reserved")];

        let candidate = BookingWindow::new(date("2025-03-10"), time("12:00"), time("14:00"));
        let report = detect(&candidate, &existing, None);

        assert!(report.is_empty());
        assert!(!report.vehicle_busy(vehicle));
    }

    #[test]
    fn different_dates_never_conflict() {
        let vehicle = Uuid::new_v4();
        let existing = vec![rental("2025-03-10", "09:00", "12:00", vehicle, None, "reserved")];

        let candidate = BookingWindow::new(date("2025-03-11"), time("09:00"), time("12:00"));
        let report = detect(&candidate, &existing, None);

        assert!(report.is_empty());
    }

    #[test]
    fn completed_rentals_never_conflict() {
        let vehicle = Uuid::new_v4();
        let existing = vec![rental("2025-03-10", "09:00", "12:00", vehicle, None, "completed")];

        let candidate = BookingWindow::new(date("2025-03-10"), time("10:00"), time("11:00"));
        let report = detect(&candidate, &existing, None);

        assert!(report.is_empty());
    }

    #[test]
    fn excluded_rental_is_ignored() {
        let vehicle = Uuid::new_v4();
        let existing = vec![rental("2025-03-10", "09:00", "12:00", vehicle, None, "reserved")];
        let own_id = existing[0].id;

        let candidate = BookingWindow::new(date("2025-03-10"), time("10:00"), time("11:00"));
        let report = detect(&candidate, &existing, Some(own_id));

        assert!(report.is_empty());
    }

    #[test]
    fn driver_set_only_includes_assigned_drivers() {
        let vehicle_a = Uuid::new_v4();
        let vehicle_b = Uuid::new_v4();
        let driver = Uuid::new_v4();
        let existing = vec![
            rental("2025-03-10", "09:00", "12:00", vehicle_a, Some(driver), "reserved"),
            rental("2025-03-10", "10:00", "13:00", vehicle_b, None, "reserved"),
        ];

        let candidate = BookingWindow::new(date("2025-03-10"), time("11:00"), time("14:00"));
        let report = detect(&candidate, &existing, None);

        assert_eq!(report.rentals.len(), 2);
        assert!(report.vehicle_busy(vehicle_a));
        assert!(report.vehicle_busy(vehicle_b));
        assert!(report.driver_busy(driver));
        assert_eq!(report.drivers.len(), 1);
    }

    #[test]
    fn candidate_contained_in_existing_conflicts() {
        let vehicle = Uuid::new_v4();
        let existing = vec![rental("2025-03-10", "08:00", "20:00", vehicle, None, "reserved")];

        let candidate = BookingWindow::new(date("2025-03-10"), time("10:00"), time("11:00"));
        let report = detect(&candidate, &existing, None);

        assert!(report.vehicle_busy(vehicle));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = BookingWindow::new(date("2025-03-10"), time("09:00"), time("12:00"));
        let b = BookingWindow::new(date("2025-03-10"), time("11:00"), time("13:00"));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }
}
