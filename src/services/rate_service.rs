//! Calculadora de tarifas
//!
//! Deriva el monto total de un contrato a partir de la hora de inicio,
//! la hora de fin y la tarifa base por hora, con un mínimo facturable de
//! una hora. Si el fin es anterior al inicio la duración se interpreta
//! como cruce de medianoche (+24h); la capa de validación de la API
//! rechaza esas ventanas antes de persistir, así que la función queda
//! total para cualquier entrada.

use chrono::{NaiveTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};

const MINUTES_PER_DAY: i64 = 24 * 60;
const MIN_BILLABLE_MINUTES: i64 = 60;

fn minutes_since_midnight(time: NaiveTime) -> i64 {
    (time.hour() * 60 + time.minute()) as i64
}

/// Minutos facturables entre inicio y fin, con mínimo de una hora.
pub fn billable_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let mut minutes = minutes_since_midnight(end) - minutes_since_midnight(start);
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }
    minutes.max(MIN_BILLABLE_MINUTES)
}

/// Duración facturable en horas fraccionarias.
pub fn duration_hours(start: NaiveTime, end: NaiveTime) -> Decimal {
    Decimal::from(billable_minutes(start, end)) / Decimal::from(60)
}

/// Monto del contrato: duración * tarifa base, redondeado a la unidad
/// de moneda entera (mitades hacia arriba).
pub fn calculate_amount(start: NaiveTime, end: NaiveTime, base_rate: Decimal) -> Decimal {
    (duration_hours(start, end) * base_rate)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(value: &str) -> NaiveTime {
        NaiveTime::parse_from_str(value, "%H:%M").unwrap()
    }

    #[test]
    fn fractional_hours() {
        // 2.5 horas a Bs 100/h
        let amount = calculate_amount(time("09:00"), time("11:30"), Decimal::from(100));
        assert_eq!(amount, Decimal::from(250));
    }

    #[test]
    fn minimum_one_hour_billed() {
        // Media hora se factura como una hora completa
        let amount = calculate_amount(time("09:00"), time("09:30"), Decimal::from(100));
        assert_eq!(amount, Decimal::from(100));
    }

    #[test]
    fn equal_times_bill_one_hour() {
        let amount = calculate_amount(time("09:00"), time("09:00"), Decimal::from(80));
        assert_eq!(amount, Decimal::from(80));
    }

    #[test]
    fn end_before_start_wraps_midnight() {
        // 22:00 → 02:00 son 4 horas cruzando medianoche
        assert_eq!(billable_minutes(time("22:00"), time("02:00")), 240);
        let amount = calculate_amount(time("22:00"), time("02:00"), Decimal::from(50));
        assert_eq!(amount, Decimal::from(200));
    }

    #[test]
    fn rounds_half_up_to_currency_unit() {
        // 1.5h * 33 = 49.5 → 50
        let amount = calculate_amount(time("10:00"), time("11:30"), Decimal::from(33));
        assert_eq!(amount, Decimal::from(50));
        // 95 min * 33/60 = 52.25 → 52
        let amount = calculate_amount(time("10:00"), time("11:35"), Decimal::from(33));
        assert_eq!(amount, Decimal::from(52));
    }

    #[test]
    fn full_day_window() {
        let amount = calculate_amount(time("08:00"), time("18:00"), Decimal::from(50));
        assert_eq!(amount, Decimal::from(500));
    }
}
