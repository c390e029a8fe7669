//! Modelo de Contract
//!
//! Contrato preliminar generado a partir de una renta. Las firmas son texto libre.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::transition::TransitionError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Borrador,
    Activo,
    Completado,
    Cancelado,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractEvent {
    Activate,
    Extend,
    Reassign,
    Complete,
    Cancel,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Borrador => "borrador",
            ContractStatus::Activo => "activo",
            ContractStatus::Completado => "completado",
            ContractStatus::Cancelado => "cancelado",
        }
    }

    pub fn apply(self, event: ContractEvent) -> Result<ContractStatus, TransitionError> {
        use ContractEvent::*;
        use ContractStatus::*;

        match (self, event) {
            (Borrador, Activate) => Ok(Activo),
            (Activo, Extend | Reassign) => Ok(Activo),
            (Activo, Complete) => Ok(Completado),
            (Borrador | Activo, Cancel) => Ok(Cancelado),
            _ => Err(TransitionError::new("contrato", self, event)),
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: Uuid,
    pub contract_number: String,
    pub rental_id: Uuid,
    pub vehicle_id: Uuid,
    pub user_id: Uuid,
    pub customer_name: String,
    pub customer_dni: String,
    pub customer_license: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_amount: Decimal,
    pub deposit_amount: Decimal,
    pub status: ContractStatus,
    pub company_signature: String,
    pub client_signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_url: Option<String>,
    pub email_sent: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Contract {
    /// Agrega un bloque de texto a las notas existentes
    pub fn append_note(&mut self, note: &str) {
        let current = self.notes.take().unwrap_or_default();
        self.notes = Some(format!("{}\n\n{}", current, note));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_lifecycle() {
        let status = ContractStatus::Borrador.apply(ContractEvent::Activate).unwrap();
        assert_eq!(status, ContractStatus::Activo);
        assert_eq!(status.apply(ContractEvent::Extend).unwrap(), ContractStatus::Activo);
        assert_eq!(
            status.apply(ContractEvent::Complete).unwrap(),
            ContractStatus::Completado
        );
    }

    #[test]
    fn test_closed_contracts_reject_events() {
        assert!(ContractStatus::Completado.apply(ContractEvent::Extend).is_err());
        assert!(ContractStatus::Completado.apply(ContractEvent::Cancel).is_err());
        assert!(ContractStatus::Cancelado.apply(ContractEvent::Complete).is_err());
        assert!(ContractStatus::Borrador.apply(ContractEvent::Complete).is_err());
        assert!(ContractStatus::Cancelado.apply(ContractEvent::Reassign).is_err());
    }
}
