//! Generación de códigos legibles y formato de fechas para notas

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rand::Rng;

use crate::models::ReservationType;

fn random_suffix() -> String {
    format!("{:04}", rand::thread_rng().gen_range(0..10_000))
}

/// `RNT-YYYY-NNNN` o `PRE-YYYY-NNNN`
pub fn registration_number(kind: ReservationType, now: DateTime<Utc>) -> String {
    format!("{}-{}-{}", kind.code_prefix(), now.year(), random_suffix())
}

/// Código de cada renta creada desde el carrito: `{base}-{i}`, donde `base` es
/// un único `RNT-YYYY-NNNN` por compra
pub fn checkout_registration_number(base: &str, index: usize) -> String {
    format!("{}-{}", base, index)
}

/// `CTR-YYYY-NNNN`
pub fn contract_number(now: DateTime<Utc>) -> String {
    format!("CTR-{}-{}", now.year(), random_suffix())
}

pub fn contract_url(contract_number: &str) -> String {
    format!("https://storage.xyz.com/contracts/{}.pdf", contract_number)
}

pub fn transaction_id(now: DateTime<Utc>) -> String {
    format!("TXN-{}-{}", now.format("%Y%m%d%H%M%S"), random_suffix())
}

/// `dd/mm/YYYY HH:MM`
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y %H:%M").to_string()
}

/// `dd/mm/YYYY`
pub fn format_date(value: NaiveDate) -> String {
    value.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assert_code_shape(code: &str, prefix: &str) {
        let parts: Vec<&str> = code.split('-').collect();
        assert_eq!(parts.len(), 3, "{}", code);
        assert_eq!(parts[0], prefix);
        assert_eq!(parts[1], "2025");
        assert_eq!(parts[2].len(), 4);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_codes_follow_expected_format() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 9, 5, 0).unwrap();

        assert_code_shape(&registration_number(ReservationType::PreReservado, now), "PRE");
        assert_code_shape(&registration_number(ReservationType::Reservado, now), "RNT");
        assert_code_shape(&contract_number(now), "CTR");

        assert_eq!(checkout_registration_number("RNT-2025-0042", 2), "RNT-2025-0042-2");
    }

    #[test]
    fn test_date_formats() {
        let now = Utc.with_ymd_and_hms(2025, 3, 4, 9, 5, 0).unwrap();
        assert_eq!(format_datetime(now), "04/03/2025 09:05");
        assert_eq!(format_date(now.date_naive()), "04/03/2025");
    }
}
