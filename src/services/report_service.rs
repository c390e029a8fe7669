//! Reportes de negocio
//!
//! Ingresos de las rentas filtradas por fecha de inicio y categoría, estado de
//! la flota, vehículos más rentados y costos de mantenimiento.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::report_dto::{
    MaintenanceCost, ReportQuery, ReportSummary, VehicleRentalStat, VehicleStatusCounts,
};
use crate::models::{Rental, VehicleStatus};
use crate::store::AppStore;

const TOP_VEHICLES: usize = 5;

fn vehicle_name(store: &AppStore, id: Uuid) -> String {
    store
        .vehicle(id)
        .map(|v| v.display_name())
        .unwrap_or_else(|| "Vehículo eliminado".to_string())
}

fn filtered_rentals<'a>(store: &'a AppStore, query: &'a ReportQuery) -> impl Iterator<Item = &'a Rental> {
    store
        .rentals()
        .iter()
        .filter(move |r| query.from.map_or(true, |from| r.start_date >= from))
        .filter(move |r| query.to.map_or(true, |to| r.start_date <= to))
        .filter(move |r| match &query.category {
            Some(category) => store
                .vehicle(r.vehicle_id)
                .map_or(false, |v| &v.category == category),
            None => true,
        })
}

pub fn summary(store: &AppStore, query: &ReportQuery) -> ReportSummary {
    let rentals: Vec<&Rental> = filtered_rentals(store, query).collect();

    let total_revenue: Decimal = rentals.iter().map(|r| r.total_price).sum();
    let base_revenue: Decimal = rentals.iter().map(|r| r.base_price).sum();
    let deposits: Decimal = rentals.iter().map(|r| r.deposit).sum();

    let mut vehicle_status = VehicleStatusCounts::default();
    for vehicle in store.vehicles() {
        match vehicle.status {
            VehicleStatus::Disponible => vehicle_status.disponible += 1,
            VehicleStatus::PreRentado => vehicle_status.pre_rentado += 1,
            VehicleStatus::Rentado => vehicle_status.rentado += 1,
            VehicleStatus::EnMantenimiento => vehicle_status.en_mantenimiento += 1,
        }
    }

    let mut revenue_by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut per_vehicle: HashMap<Uuid, (usize, Decimal)> = HashMap::new();
    for rental in &rentals {
        if let Some(vehicle) = store.vehicle(rental.vehicle_id) {
            *revenue_by_category
                .entry(vehicle.category.clone())
                .or_insert(Decimal::ZERO) += rental.total_price;
        }
        let entry = per_vehicle.entry(rental.vehicle_id).or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += rental.base_price;
    }

    let mut top_vehicles: Vec<VehicleRentalStat> = per_vehicle
        .into_iter()
        .map(|(vehicle_id, (rentals, revenue))| VehicleRentalStat {
            vehicle_id,
            name: vehicle_name(store, vehicle_id),
            rentals,
            revenue,
        })
        .collect();
    // Empates por ingresos y luego por nombre, para un orden estable
    top_vehicles.sort_by(|a, b| {
        b.rentals
            .cmp(&a.rentals)
            .then(b.revenue.cmp(&a.revenue))
            .then(a.name.cmp(&b.name))
    });
    top_vehicles.truncate(TOP_VEHICLES);

    let mut costs: HashMap<Uuid, Decimal> = HashMap::new();
    for record in store.maintenance() {
        *costs.entry(record.vehicle_id).or_insert(Decimal::ZERO) += record.cost;
    }
    let mut maintenance_costs: Vec<MaintenanceCost> = costs
        .into_iter()
        .map(|(vehicle_id, cost)| MaintenanceCost {
            vehicle_id,
            name: vehicle_name(store, vehicle_id),
            cost,
        })
        .collect();
    maintenance_costs.sort_by(|a, b| b.cost.cmp(&a.cost).then(a.name.cmp(&b.name)));
    let total_maintenance_cost = maintenance_costs.iter().map(|m| m.cost).sum();

    ReportSummary {
        total_rentals: rentals.len(),
        total_revenue,
        base_revenue,
        deposits,
        vehicle_status,
        revenue_by_category,
        top_vehicles,
        maintenance_costs,
        total_maintenance_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::{mock_users, vehicle_id};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_summary_over_seed_data() {
        let store = AppStore::seeded(mock_users());
        let report = summary(&store, &ReportQuery::default());

        assert_eq!(report.total_rentals, 2);
        assert_eq!(report.total_revenue, Decimal::from(1820));
        assert_eq!(report.base_revenue, Decimal::from(1320));
        assert_eq!(report.deposits, Decimal::from(500));

        assert_eq!(report.vehicle_status.disponible, 3);
        assert_eq!(report.vehicle_status.pre_rentado, 1);
        assert_eq!(report.vehicle_status.rentado, 3);
        assert_eq!(report.vehicle_status.en_mantenimiento, 1);

        assert_eq!(report.revenue_by_category.get("Sedán"), Some(&Decimal::from(1820)));

        // Clase C: 900 de base, Corolla: 420
        assert_eq!(report.top_vehicles[0].vehicle_id, vehicle_id(6));
        assert_eq!(report.top_vehicles[1].vehicle_id, vehicle_id(3));

        assert_eq!(report.maintenance_costs[0].name, "Toyota Corolla");
        assert_eq!(report.maintenance_costs.len(), 3);
        assert_eq!(report.total_maintenance_cost, Decimal::from(800));
    }

    #[test]
    fn test_date_and_category_filters() {
        let store = AppStore::seeded(mock_users());

        let query = ReportQuery {
            from: Some(date("2024-10-25")),
            to: Some(date("2024-10-31")),
            category: None,
        };
        let report = summary(&store, &query);
        assert_eq!(report.total_rentals, 1);
        assert_eq!(report.total_revenue, Decimal::from(1200));

        let query = ReportQuery {
            category: Some("SUV".to_string()),
            ..Default::default()
        };
        let report = summary(&store, &query);
        assert_eq!(report.total_rentals, 0);
        assert!(report.top_vehicles.is_empty());
        assert!(report.revenue_by_category.is_empty());
    }
}
