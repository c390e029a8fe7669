//! Registros de mantenimiento de la flota

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    Programado,
    EnProgreso,
    Completado,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub cost: Decimal,
    pub date: NaiveDate,
    pub performed_by: String,
    pub status: MaintenanceStatus,
}
