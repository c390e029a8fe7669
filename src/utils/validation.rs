//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos que usan los
//! DTOs a través de `#[validate(custom = ...)]` y los servicios.

use std::fmt::Display;

use chrono::NaiveDate;
use num_traits::Zero;
use validator::ValidationError;

/// La fecha de fin debe ser estrictamente posterior a la de inicio
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end <= start {
        let mut error = ValidationError::new("date_range");
        error.message = Some("La fecha de fin debe ser posterior a la fecha de inicio".into());
        error.add_param("startDate".into(), &start.to_string());
        error.add_param("endDate".into(), &end.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty"));
    }
    Ok(())
}

/// Validar formato de email
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if !value.contains('@') || !value.contains('.') {
        let mut error = ValidationError::new("email");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de placa
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 5 || clean_plate.len() > 10 {
        let mut error = ValidationError::new("license_plate");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un monto sea positivo
pub fn validate_positive_amount<T: PartialOrd + Display + Zero>(value: &T) -> Result<(), ValidationError> {
    if *value <= T::zero() {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un monto no sea negativo
pub fn validate_non_negative_amount<T: PartialOrd + Display + Zero>(value: &T) -> Result<(), ValidationError> {
    if *value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_validate_date_range() {
        let start = NaiveDate::from_ymd_opt(2024, 10, 20).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 10, 27).unwrap();
        assert!(validate_date_range(start, end).is_ok());
        assert!(validate_date_range(end, start).is_err());
        // Mismo día tampoco es válido
        assert!(validate_date_range(start, start).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("admin@xyz.com").is_ok());
        assert!(validate_email("invalid-email").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+1 (809) 555-1234").is_ok());
        assert!(validate_phone("123").is_err());
    }

    #[test]
    fn test_validate_license_plate() {
        assert!(validate_license_plate("ABC-123").is_ok());
        assert!(validate_license_plate("A").is_err());
    }

    #[test]
    fn test_amounts() {
        assert!(validate_positive_amount(&Decimal::from(120)).is_ok());
        assert!(validate_positive_amount(&Decimal::ZERO).is_err());
        assert!(validate_non_negative_amount(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative_amount(&Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("Oficina Centro").is_ok());
        assert!(validate_not_empty("   ").is_err());
        assert!(validate_not_empty("").is_err());
    }
}
