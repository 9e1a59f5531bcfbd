//! Utilidades de validación
//!
//! Normalización de matrículas y validadores usados por los DTOs.

use chrono::{NaiveDate, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("whitespace regex is valid");
}

/// Normalizar una matrícula: sin espacios y en mayúsculas.
///
/// Se aplica en todas las entradas que reciben un número de vehículo o una
/// matrícula, y otra vez al comparar en lecturas.
pub fn normalize_vehicle_number(raw: &str) -> String {
    WHITESPACE.replace_all(raw, "").to_uppercase()
}

/// Parsear una fecha `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// Validar fecha `YYYY-MM-DD`
pub fn validate_date(value: &str) -> Result<(), ValidationError> {
    match parse_date(value) {
        Some(_) => Ok(()),
        None => {
            let mut error = ValidationError::new("date");
            error.add_param("value".into(), &value.to_string());
            error.add_param("format".into(), &"YYYY-MM-DD".to_string());
            Err(error)
        }
    }
}

/// Validar hora `HH:MM` o `HH:MM:SS`
pub fn validate_time(value: &str) -> Result<(), ValidationError> {
    let value_trimmed = value.trim();
    let parsed = NaiveTime::parse_from_str(value_trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value_trimmed, "%H:%M:%S"));

    parsed.map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("time");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"HH:MM".to_string());
        error
    })
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty"));
    }
    Ok(())
}

/// Validar que la matrícula conserve caracteres tras normalizar
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    if normalize_vehicle_number(value).is_empty() {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Decimales admitidos en un importe (columna `NUMERIC(12, 2)`)
const AMOUNT_SCALE: u32 = 2;

/// Importe máximo admitido (columna `NUMERIC(12, 2)`)
fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, AMOUNT_SCALE)
}

/// Validar importe de multa: no negativo, dos decimales como máximo y
/// dentro del rango de la columna
pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("amount");
        error.add_param("min".into(), &0);
        return Err(error);
    }
    if value.normalize().scale() > AMOUNT_SCALE {
        let mut error = ValidationError::new("amount_scale");
        error.add_param("max_decimals".into(), &AMOUNT_SCALE);
        return Err(error);
    }
    if *value > max_amount() {
        let mut error = ValidationError::new("amount_range");
        error.add_param("max".into(), &max_amount().to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_whitespace_and_uppercases() {
        assert_eq!(normalize_vehicle_number("mh 12 ab 1234"), "MH12AB1234");
        assert_eq!(normalize_vehicle_number("MH12AB1234"), "MH12AB1234");
        assert_eq!(normalize_vehicle_number(" mh\t12\nab 1234 "), "MH12AB1234");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["mh 12 ab 1234", "  ka 01  x 9 ", "", "dl3c\u{a0}ab 0001", "ÄbC d"] {
            let once = normalize_vehicle_number(raw);
            assert_eq!(normalize_vehicle_number(&once), once, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2024-10-15").is_ok());
        assert!(validate_date("15/10/2024").is_err());
        assert!(validate_date("2024-02-30").is_err());
    }

    #[test]
    fn test_validate_time_accepts_minutes_and_seconds() {
        assert!(validate_time("14:30").is_ok());
        assert!(validate_time("09:15:00").is_ok());
        assert!(validate_time("25:00").is_err());
        assert!(validate_time("noon").is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(&Decimal::from(500)).is_ok());
        assert!(validate_amount(&Decimal::ZERO).is_ok());
        assert!(validate_amount(&Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_amount_scale_limit() {
        assert!(validate_amount(&Decimal::new(123_45, 2)).is_ok());
        assert!(validate_amount(&Decimal::new(1_000_00, 2)).is_ok());
        assert!(validate_amount(&Decimal::new(1_000_000, 3)).is_ok());
        assert!(validate_amount(&Decimal::new(12_345, 3)).is_err());
    }

    #[test]
    fn test_validate_amount_range_limit() {
        assert!(validate_amount(&Decimal::new(999_999_999_999, 2)).is_ok());
        assert!(validate_amount(&Decimal::from(10_000_000_000i64)).is_err());
        assert!(validate_amount(&Decimal::new(123_456_789_012_345_678, 3)).is_err());
    }

    #[test]
    fn test_validate_license_plate_rejects_blank() {
        assert!(validate_license_plate("   ").is_err());
        assert!(validate_license_plate("mh 14 xy 9876").is_ok());
    }
}
