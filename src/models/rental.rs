//! Modelo de Rental
//!
//! Una renta es una reserva confirmada (`reservado`) o una pre-reserva sin pago
//! inicial (`pre-reservado`) sobre un vehículo y un rango de fechas inclusivo.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::transition::TransitionError;

/// Máximo de pre-reservas simultáneas por vehículo
pub const MAX_PRE_RESERVATIONS: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationType {
    Reservado,
    PreReservado,
}

impl ReservationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationType::Reservado => "reservado",
            ReservationType::PreReservado => "pre-reservado",
        }
    }

    /// Prefijo del código de registro
    pub fn code_prefix(&self) -> &'static str {
        match self {
            ReservationType::Reservado => "RNT",
            ReservationType::PreReservado => "PRE",
        }
    }
}

impl fmt::Display for ReservationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pendiente,
    Activa,
    Completada,
    Cancelada,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RentalEvent {
    ContractSigned,
    Complete,
    Cancel,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Pendiente => "pendiente",
            RentalStatus::Activa => "activa",
            RentalStatus::Completada => "completada",
            RentalStatus::Cancelada => "cancelada",
        }
    }

    /// Pendiente o activa: la renta todavía ocupa el vehículo
    pub fn is_live(&self) -> bool {
        matches!(self, RentalStatus::Pendiente | RentalStatus::Activa)
    }

    pub fn apply(self, event: RentalEvent) -> Result<RentalStatus, TransitionError> {
        use RentalEvent::*;
        use RentalStatus::*;

        match (self, event) {
            (Pendiente, ContractSigned) => Ok(Activa),
            (Activa, Complete) => Ok(Completada),
            (Pendiente | Activa, Cancel) => Ok(Cancelada),
            _ => Err(TransitionError::new("renta", self, event)),
        }
    }
}

impl fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rango de fechas inclusivo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self { start_date, end_date }
    }

    /// Solapamiento con límites inclusivos, evaluado cláusula a cláusula
    pub fn overlaps(&self, other: &DateRange) -> bool {
        let (start, end) = (self.start_date, self.end_date);
        let (other_start, other_end) = (other.start_date, other.end_date);

        (start >= other_start && start <= other_end)
            || (end >= other_start && end <= other_end)
            || (start <= other_start && end >= other_end)
    }

    /// Días facturables entre inicio y fin
    pub fn total_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: Uuid,
    pub registration_number: String,
    pub reservation_type: ReservationType,
    pub vehicle_id: Uuid,
    pub user_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_dni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_license: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i64,
    pub base_price: Decimal,
    pub initial_payment: Decimal,
    pub deposit: Decimal,
    pub damage_charges: Decimal,
    pub total_price: Decimal,
    pub status: RentalStatus,
    pub contract_signed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_url: Option<String>,
    pub pickup_location: String,
    pub return_location: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_reserve_position: Option<u8>,
}

impl Rental {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    pub fn is_pre_reservation(&self) -> bool {
        self.reservation_type == ReservationType::PreReservado
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_overlap_is_inclusive() {
        let booked = DateRange::new(date("2024-10-20"), date("2024-10-27"));

        assert!(DateRange::new(date("2024-10-22"), date("2024-10-24")).overlaps(&booked));
        assert!(DateRange::new(date("2024-10-27"), date("2024-10-30")).overlaps(&booked));
        assert!(DateRange::new(date("2024-10-15"), date("2024-10-20")).overlaps(&booked));
        assert!(DateRange::new(date("2024-10-01"), date("2024-11-30")).overlaps(&booked));
        assert!(!DateRange::new(date("2024-11-01"), date("2024-11-05")).overlaps(&booked));
        assert!(!DateRange::new(date("2024-10-10"), date("2024-10-19")).overlaps(&booked));
    }

    #[test]
    fn test_total_days() {
        let range = DateRange::new(date("2024-10-20"), date("2024-10-27"));
        assert_eq!(range.total_days(), 7);
    }

    #[test]
    fn test_rental_transitions() {
        assert_eq!(
            RentalStatus::Pendiente.apply(RentalEvent::ContractSigned).unwrap(),
            RentalStatus::Activa
        );
        assert_eq!(
            RentalStatus::Activa.apply(RentalEvent::Complete).unwrap(),
            RentalStatus::Completada
        );
        assert!(RentalStatus::Pendiente.apply(RentalEvent::Complete).is_err());
        assert!(RentalStatus::Completada.apply(RentalEvent::Cancel).is_err());
        assert!(RentalStatus::Cancelada.apply(RentalEvent::ContractSigned).is_err());
    }

    #[test]
    fn test_reservation_type_serialization() {
        let json = serde_json::to_string(&ReservationType::PreReservado).unwrap();
        assert_eq!(json, "\"pre-reservado\"");
        assert_eq!(ReservationType::PreReservado.code_prefix(), "PRE");
    }
}
