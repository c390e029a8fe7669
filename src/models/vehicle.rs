//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle, su máquina de estados explícita y las
//! clasificaciones que usan los filtros del catálogo (tipo, transmisión, plazas).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::transition::TransitionError;

/// Estado del vehículo
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    Disponible,
    PreRentado,
    Rentado,
    EnMantenimiento,
}

/// Eventos que mueven el estado de un vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleEvent {
    /// Se creó una renta (reserva o pre-reserva) para el vehículo
    RentalCreated,
    /// Se firmó un contrato o el vehículo recibió un contrato reasignado
    ContractActivated,
    /// El vehículo queda libre: contrato finalizado, cancelado o reasignado a otro
    Released,
    /// Ya no quedan rentas pendientes ni activas para el vehículo
    ReservationsCleared,
    MaintenanceStarted,
    MaintenanceFinished,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Disponible => "disponible",
            VehicleStatus::PreRentado => "pre-rentado",
            VehicleStatus::Rentado => "rentado",
            VehicleStatus::EnMantenimiento => "en-mantenimiento",
        }
    }

    /// Única función de transición del vehículo
    pub fn apply(self, event: VehicleEvent) -> Result<VehicleStatus, TransitionError> {
        use VehicleEvent::*;
        use VehicleStatus::*;

        let next = match (self, event) {
            (EnMantenimiento, RentalCreated | ContractActivated) => None,
            (Rentado, RentalCreated) => Some(Rentado),
            (_, RentalCreated) => Some(PreRentado),
            (_, ContractActivated) => Some(Rentado),

            (EnMantenimiento, Released | ReservationsCleared) => Some(EnMantenimiento),
            (_, Released) => Some(Disponible),
            (Rentado, ReservationsCleared) => Some(Rentado),
            (_, ReservationsCleared) => Some(Disponible),

            (Disponible | PreRentado, MaintenanceStarted) => Some(EnMantenimiento),
            (_, MaintenanceStarted) => None,
            (EnMantenimiento, MaintenanceFinished) => Some(Disponible),
            (_, MaintenanceFinished) => None,
        };

        next.ok_or_else(|| TransitionError::new("vehículo", self, event))
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vehículo de la flota
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub category: String,
    pub price_per_day: Decimal,
    pub status: VehicleStatus,
    pub image_url: String,
    pub transmission: String,
    pub fuel_type: String,
    pub seats: u32,
    pub mileage: u32,
    pub license_plate: String,
    pub description: String,
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
}

impl Vehicle {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    pub fn car_type(&self) -> CarType {
        CarType::from_category(&self.category)
    }

    pub fn transmission_kind(&self) -> TransmissionKind {
        if self.transmission == "Automática" {
            TransmissionKind::Automatic
        } else {
            TransmissionKind::Manual
        }
    }

    pub fn passenger_class(&self) -> PassengerClass {
        PassengerClass::from_seats(self.seats)
    }
}

/// Tipo de vehículo mostrado en el catálogo, derivado de la categoría
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CarType {
    Sedan,
    #[serde(rename = "SUV")]
    Suv,
    Sports,
    Electric,
    Luxury,
}

impl CarType {
    pub fn from_category(category: &str) -> Self {
        let category = category.to_lowercase();
        if category.contains("sedan") {
            CarType::Sedan
        } else if category.contains("suv") {
            CarType::Suv
        } else if category.contains("deportivo") || category.contains("sport") {
            CarType::Sports
        } else if category.contains("eléctrico") || category.contains("electric") {
            CarType::Electric
        } else if category.contains("lujo") || category.contains("luxury") {
            CarType::Luxury
        } else {
            CarType::Sedan
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Sedan" => Some(CarType::Sedan),
            "SUV" => Some(CarType::Suv),
            "Sports" => Some(CarType::Sports),
            "Electric" => Some(CarType::Electric),
            "Luxury" => Some(CarType::Luxury),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransmissionKind {
    Automatic,
    Manual,
}

impl TransmissionKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Automatic" => Some(TransmissionKind::Automatic),
            "Manual" => Some(TransmissionKind::Manual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PassengerClass {
    #[serde(rename = "2 Seats")]
    TwoSeats,
    #[serde(rename = "4 Seats")]
    FourSeats,
    #[serde(rename = "5+ Seats")]
    FivePlusSeats,
}

impl PassengerClass {
    pub fn from_seats(seats: u32) -> Self {
        if seats <= 2 {
            PassengerClass::TwoSeats
        } else if seats <= 4 {
            PassengerClass::FourSeats
        } else {
            PassengerClass::FivePlusSeats
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2 Seats" => Some(PassengerClass::TwoSeats),
            "4 Seats" => Some(PassengerClass::FourSeats),
            "5+ Seats" => Some(PassengerClass::FivePlusSeats),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rental_created_moves_available_to_pre_rented() {
        assert_eq!(
            VehicleStatus::Disponible.apply(VehicleEvent::RentalCreated).unwrap(),
            VehicleStatus::PreRentado
        );
        // Una reserva futura no degrada un vehículo ya rentado
        assert_eq!(
            VehicleStatus::Rentado.apply(VehicleEvent::RentalCreated).unwrap(),
            VehicleStatus::Rentado
        );
    }

    #[test]
    fn test_vehicle_in_maintenance_cannot_be_booked() {
        assert!(VehicleStatus::EnMantenimiento.apply(VehicleEvent::RentalCreated).is_err());
        assert!(VehicleStatus::EnMantenimiento.apply(VehicleEvent::ContractActivated).is_err());
    }

    #[test]
    fn test_release_keeps_maintenance() {
        assert_eq!(
            VehicleStatus::Rentado.apply(VehicleEvent::Released).unwrap(),
            VehicleStatus::Disponible
        );
        assert_eq!(
            VehicleStatus::EnMantenimiento.apply(VehicleEvent::Released).unwrap(),
            VehicleStatus::EnMantenimiento
        );
    }

    #[test]
    fn test_maintenance_cycle() {
        let status = VehicleStatus::Disponible
            .apply(VehicleEvent::MaintenanceStarted)
            .unwrap();
        assert_eq!(status, VehicleStatus::EnMantenimiento);
        assert_eq!(
            status.apply(VehicleEvent::MaintenanceFinished).unwrap(),
            VehicleStatus::Disponible
        );
        assert!(VehicleStatus::Rentado.apply(VehicleEvent::MaintenanceStarted).is_err());
        assert!(VehicleStatus::Disponible.apply(VehicleEvent::MaintenanceFinished).is_err());
    }

    #[test]
    fn test_reservations_cleared_does_not_free_rented_vehicle() {
        assert_eq!(
            VehicleStatus::PreRentado.apply(VehicleEvent::ReservationsCleared).unwrap(),
            VehicleStatus::Disponible
        );
        assert_eq!(
            VehicleStatus::Rentado.apply(VehicleEvent::ReservationsCleared).unwrap(),
            VehicleStatus::Rentado
        );
    }

    #[test]
    fn test_status_serializes_as_kebab_case() {
        let json = serde_json::to_string(&VehicleStatus::EnMantenimiento).unwrap();
        assert_eq!(json, "\"en-mantenimiento\"");
        assert_eq!(VehicleStatus::PreRentado.as_str(), "pre-rentado");
    }

    #[test]
    fn test_car_type_from_category() {
        assert_eq!(CarType::from_category("Eléctrico"), CarType::Electric);
        assert_eq!(CarType::from_category("Deportivo"), CarType::Sports);
        assert_eq!(CarType::from_category("SUV"), CarType::Suv);
        // "Sedán" con tilde cae en el valor por defecto
        assert_eq!(CarType::from_category("Sedán"), CarType::Sedan);
        assert_eq!(CarType::from_category("Lujo"), CarType::Luxury);
    }

    #[test]
    fn test_passenger_class() {
        assert_eq!(PassengerClass::from_seats(2), PassengerClass::TwoSeats);
        assert_eq!(PassengerClass::from_seats(4), PassengerClass::FourSeats);
        assert_eq!(PassengerClass::from_seats(7), PassengerClass::FivePlusSeats);
    }
}
