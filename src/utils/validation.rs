//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos.

use chrono::NaiveTime;
use serde::Serialize;
use validator::ValidationError;

/// Validar y convertir string a hora del día (acepta HH:MM y HH:MM:SS)
pub fn validate_time(value: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| {
            let mut error = ValidationError::new("time");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"HH:MM".to_string());
            error
        })
}

/// Validar que la ventana horaria sea válida: fin estrictamente después del inicio.
/// Los alquileres no cruzan medianoche.
pub fn validate_time_window(start: NaiveTime, end: NaiveTime) -> Result<(), ValidationError> {
    if end <= start {
        let mut error = ValidationError::new("time_window");
        error.add_param("start".into(), &start.format("%H:%M").to_string());
        error.add_param("end".into(), &end.format("%H:%M").to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_digit(10)).collect::<String>();
    if clean_phone.len() < 6 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar formato de placa de vehículo
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    // Formato básico: ABC-123 o similar
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 4 || clean_plate.len() > 10 {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_time_accepts_both_formats() {
        assert_eq!(
            validate_time("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            validate_time("18:30:00").unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap()
        );
        assert!(validate_time("25:00").is_err());
        assert!(validate_time("9am").is_err());
    }

    #[test]
    fn test_validate_time_window() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let twelve = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!(validate_time_window(nine, twelve).is_ok());
        assert!(validate_time_window(twelve, nine).is_err());
        // Fin igual al inicio tampoco es válido
        assert!(validate_time_window(nine, nine).is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Juan Perez").is_ok());
        assert!(validate_not_empty("").is_err());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("76543210").is_ok());
        assert!(validate_phone("+591 76543210").is_ok());
        assert!(validate_phone("123").is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0).is_ok());
        assert!(validate_non_negative(10).is_ok());
        assert!(validate_non_negative(-1).is_err());
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("ABC-123").is_ok());
        assert!(validate_license_plate("A1").is_err());
        assert!(validate_license_plate("ABCDEFGHIJK").is_err());
    }
}
