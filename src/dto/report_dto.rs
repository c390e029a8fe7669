use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStatusCounts {
    pub disponible: usize,
    pub pre_rentado: usize,
    pub rentado: usize,
    pub en_mantenimiento: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRentalStat {
    pub vehicle_id: Uuid,
    pub name: String,
    pub rentals: usize,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCost {
    pub vehicle_id: Uuid,
    pub name: String,
    pub cost: Decimal,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_rentals: usize,
    pub total_revenue: Decimal,
    pub base_revenue: Decimal,
    pub deposits: Decimal,
    pub vehicle_status: VehicleStatusCounts,
    pub revenue_by_category: BTreeMap<String, Decimal>,
    pub top_vehicles: Vec<VehicleRentalStat>,
    pub maintenance_costs: Vec<MaintenanceCost>,
    pub total_maintenance_cost: Decimal,
}
