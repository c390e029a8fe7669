//! Catálogo y administración de vehículos

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleQuery};
use crate::models::{
    CarType, PassengerClass, RentalStatus, TransmissionKind, Vehicle, VehicleEvent, VehicleStatus,
};
use crate::store::{AppStore, Mutation};
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, AppResult};

/// Banda de precio del catálogo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    Low,
    Medium,
    High,
}

impl PriceBand {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "low" => Some(PriceBand::Low),
            "medium" => Some(PriceBand::Medium),
            "high" => Some(PriceBand::High),
            _ => None,
        }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        let hundred = Decimal::from(100);
        let two_hundred = Decimal::from(200);
        match self {
            PriceBand::Low => price < hundred,
            PriceBand::Medium => price >= hundred && price < two_hundred,
            PriceBand::High => price >= two_hundred,
        }
    }
}

/// Parsea una lista separada por comas; un valor desconocido es un error
fn parse_list<T>(raw: &Option<String>, field: &str, parse: impl Fn(&str) -> Option<T>) -> AppResult<Vec<T>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse(s).ok_or_else(|| bad_request_error(format!("Valor '{}' no válido para {}", s, field))))
        .collect()
}

pub fn list_vehicles(store: &AppStore, query: &VehicleQuery) -> AppResult<Vec<Vehicle>> {
    let band = match &query.price_band {
        Some(raw) => Some(
            PriceBand::parse(raw)
                .ok_or_else(|| bad_request_error(format!("Banda de precio '{}' no válida", raw)))?,
        ),
        None => None,
    };
    let car_types = parse_list(&query.car_types, "carTypes", CarType::parse)?;
    let transmissions = parse_list(&query.transmissions, "transmissions", TransmissionKind::parse)?;
    let passengers = parse_list(&query.passengers, "passengers", PassengerClass::parse)?;
    let search = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let vehicles = store
        .vehicles()
        .iter()
        .filter(|v| match &search {
            Some(term) => {
                v.brand.to_lowercase().contains(term)
                    || v.model.to_lowercase().contains(term)
                    || v.category.to_lowercase().contains(term)
            }
            None => true,
        })
        .filter(|v| query.category.as_ref().map_or(true, |c| &v.category == c))
        .filter(|v| band.map_or(true, |b| b.contains(v.price_per_day)))
        .filter(|v| query.status.map_or(true, |s| v.status == s))
        .filter(|v| query.min_price.map_or(true, |min| v.price_per_day >= min))
        .filter(|v| query.max_price.map_or(true, |max| v.price_per_day <= max))
        .filter(|v| car_types.is_empty() || car_types.contains(&v.car_type()))
        .filter(|v| transmissions.is_empty() || transmissions.contains(&v.transmission_kind()))
        .filter(|v| passengers.is_empty() || passengers.contains(&v.passenger_class()))
        .cloned()
        .collect();

    Ok(vehicles)
}

/// Categorías distintas en orden de aparición
pub fn categories(store: &AppStore) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for vehicle in store.vehicles() {
        if !categories.contains(&vehicle.category) {
            categories.push(vehicle.category.clone());
        }
    }
    categories
}

fn ensure_unique_plate(store: &AppStore, plate: &str, except: Option<Uuid>) -> AppResult<()> {
    let taken = store
        .vehicles()
        .iter()
        .any(|v| v.license_plate.eq_ignore_ascii_case(plate) && Some(v.id) != except);
    if taken {
        return Err(conflict_error(format!("La placa {} ya está registrada", plate)));
    }
    Ok(())
}

pub fn create_vehicle(store: &mut AppStore, request: CreateVehicleRequest) -> AppResult<Vehicle> {
    ensure_unique_plate(store, &request.license_plate, None)?;

    let vehicle = Vehicle {
        id: Uuid::new_v4(),
        brand: request.brand,
        model: request.model,
        year: request.year.unwrap_or_else(|| Utc::now().year()),
        category: request.category,
        price_per_day: request.price_per_day,
        status: VehicleStatus::Disponible,
        image_url: request.image_url.unwrap_or_default(),
        transmission: request.transmission.unwrap_or_else(|| "Automática".to_string()),
        fuel_type: request.fuel_type.unwrap_or_else(|| "Gasolina".to_string()),
        seats: request.seats.unwrap_or(5),
        mileage: request.mileage.unwrap_or(0),
        license_plate: request.license_plate,
        description: request.description.unwrap_or_default(),
        features: request.features.unwrap_or_default(),
        rating: None,
        review_count: None,
    };

    store.commit(vec![Mutation::PutVehicle(vehicle.clone())])?;
    info!("🚗 Vehículo creado: {} ({})", vehicle.display_name(), vehicle.license_plate);
    Ok(vehicle)
}

pub fn update_vehicle(store: &mut AppStore, id: Uuid, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
    let mut vehicle = store
        .vehicle(id)
        .cloned()
        .ok_or_else(|| not_found_error("Vehículo", id))?;

    if let Some(plate) = &request.license_plate {
        ensure_unique_plate(store, plate, Some(id))?;
    }

    if let Some(brand) = request.brand {
        vehicle.brand = brand;
    }
    if let Some(model) = request.model {
        vehicle.model = model;
    }
    if let Some(year) = request.year {
        vehicle.year = year;
    }
    if let Some(category) = request.category {
        vehicle.category = category;
    }
    if let Some(price) = request.price_per_day {
        vehicle.price_per_day = price;
    }
    if let Some(plate) = request.license_plate {
        vehicle.license_plate = plate;
    }
    if let Some(transmission) = request.transmission {
        vehicle.transmission = transmission;
    }
    if let Some(fuel_type) = request.fuel_type {
        vehicle.fuel_type = fuel_type;
    }
    if let Some(seats) = request.seats {
        vehicle.seats = seats;
    }
    if let Some(mileage) = request.mileage {
        vehicle.mileage = mileage;
    }
    if let Some(image_url) = request.image_url {
        vehicle.image_url = image_url;
    }
    if let Some(description) = request.description {
        vehicle.description = description;
    }
    if let Some(features) = request.features {
        vehicle.features = features;
    }

    store.commit(vec![Mutation::PutVehicle(vehicle.clone())])?;
    Ok(vehicle)
}

/// Un vehículo con rentas pendientes o activas no se puede eliminar
pub fn delete_vehicle(store: &mut AppStore, id: Uuid) -> AppResult<()> {
    let vehicle = store
        .vehicle(id)
        .cloned()
        .ok_or_else(|| not_found_error("Vehículo", id))?;

    if store.rentals_for_vehicle(id).any(|r| r.is_live()) {
        return Err(conflict_error(format!(
            "{} tiene rentas pendientes o activas",
            vehicle.display_name()
        )));
    }

    store.commit(vec![Mutation::DeleteVehicle(id)])?;
    info!("🗑️ Vehículo eliminado: {}", vehicle.display_name());
    Ok(())
}

/// Cambio de estado administrativo: mantenimiento o liberación
pub fn update_vehicle_status(store: &mut AppStore, id: Uuid, target: VehicleStatus) -> AppResult<Vehicle> {
    let mut vehicle = store
        .vehicle(id)
        .cloned()
        .ok_or_else(|| not_found_error("Vehículo", id))?;

    let event = match (vehicle.status, target) {
        (_, VehicleStatus::EnMantenimiento) => VehicleEvent::MaintenanceStarted,
        (VehicleStatus::EnMantenimiento, VehicleStatus::Disponible) => VehicleEvent::MaintenanceFinished,
        (_, VehicleStatus::Disponible) => {
            let active = store
                .rentals_for_vehicle(id)
                .any(|r| r.status == RentalStatus::Activa);
            if active {
                return Err(conflict_error(format!(
                    "{} tiene un contrato activo y no se puede liberar",
                    vehicle.display_name()
                )));
            }
            VehicleEvent::Released
        }
        (_, other) => {
            return Err(bad_request_error(format!(
                "El estado '{}' solo se asigna mediante reservas y contratos",
                other
            )))
        }
    };

    let previous = vehicle.status;
    vehicle.status = vehicle.status.apply(event)?;
    store.commit(vec![Mutation::PutVehicle(vehicle.clone())])?;

    info!("🔧 {}: {} → {}", vehicle.display_name(), previous, vehicle.status);
    Ok(vehicle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::{mock_users, vehicle_id};
    use crate::utils::errors::AppError;

    fn store() -> AppStore {
        AppStore::seeded(mock_users())
    }

    fn names(vehicles: &[Vehicle]) -> Vec<String> {
        vehicles.iter().map(|v| v.display_name()).collect()
    }

    fn create_request(plate: &str) -> CreateVehicleRequest {
        CreateVehicleRequest {
            brand: "Kia".to_string(),
            model: "Rio".to_string(),
            year: None,
            category: "Compacto".to_string(),
            price_per_day: Decimal::from(45),
            license_plate: plate.to_string(),
            transmission: None,
            fuel_type: None,
            seats: None,
            mileage: None,
            image_url: None,
            description: None,
            features: None,
        }
    }

    #[test]
    fn test_search_matches_brand_model_and_category() {
        let store = store();
        let query = VehicleQuery {
            search: Some("suv".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&list_vehicles(&store, &query).unwrap()), vec!["BMW X5", "Honda CR-V"]);

        let query = VehicleQuery {
            search: Some("mustang".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&list_vehicles(&store, &query).unwrap()), vec!["Ford Mustang"]);
    }

    #[test]
    fn test_price_bands() {
        let store = store();
        let band = |b: &str| {
            let query = VehicleQuery {
                price_band: Some(b.to_string()),
                ..Default::default()
            };
            list_vehicles(&store, &query).unwrap().len()
        };

        // <100: Corolla, CR-V, Altima; [100,200): Tesla, BMW, Clase C; >=200: 911, Mustang
        assert_eq!(band("low"), 3);
        assert_eq!(band("medium"), 3);
        assert_eq!(band("high"), 2);

        let query = VehicleQuery {
            price_band: Some("cheap".to_string()),
            ..Default::default()
        };
        assert!(matches!(list_vehicles(&store, &query), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_type_transmission_and_passenger_filters() {
        let store = store();

        let query = VehicleQuery {
            car_types: Some("Sports,Electric".to_string()),
            ..Default::default()
        };
        assert_eq!(
            names(&list_vehicles(&store, &query).unwrap()),
            vec!["Tesla Model 3", "Porsche 911", "Ford Mustang"]
        );

        let query = VehicleQuery {
            transmissions: Some("Manual".to_string()),
            ..Default::default()
        };
        assert_eq!(names(&list_vehicles(&store, &query).unwrap()), vec!["Ford Mustang"]);

        let query = VehicleQuery {
            passengers: Some("2 Seats,4 Seats".to_string()),
            ..Default::default()
        };
        assert_eq!(
            names(&list_vehicles(&store, &query).unwrap()),
            vec!["Porsche 911", "Ford Mustang"]
        );
    }

    #[test]
    fn test_status_and_price_range_filters() {
        let store = store();
        let query = VehicleQuery {
            status: Some(VehicleStatus::Rentado),
            min_price: Some(Decimal::from(65)),
            max_price: Some(Decimal::from(250)),
            ..Default::default()
        };
        assert_eq!(
            names(&list_vehicles(&store, &query).unwrap()),
            vec!["Ford Mustang", "Nissan Altima"]
        );
    }

    #[test]
    fn test_categories_in_insertion_order() {
        assert_eq!(
            categories(&store()),
            vec!["Eléctrico", "SUV", "Sedán", "Deportivo"]
        );
    }

    #[test]
    fn test_create_vehicle_applies_defaults() {
        let mut store = store();
        let vehicle = create_vehicle(&mut store, create_request("KIA-001")).unwrap();

        assert_eq!(vehicle.status, VehicleStatus::Disponible);
        assert_eq!(vehicle.transmission, "Automática");
        assert_eq!(vehicle.fuel_type, "Gasolina");
        assert_eq!(vehicle.seats, 5);
        assert_eq!(vehicle.mileage, 0);
        assert_eq!(vehicle.year, Utc::now().year());
        assert_eq!(store.vehicles().len(), 9);
    }

    #[test]
    fn test_duplicate_plate_is_rejected() {
        let mut store = store();
        let result = create_vehicle(&mut store, create_request("abc-123"));
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_update_vehicle_keeps_status() {
        let mut store = store();
        let request = UpdateVehicleRequest {
            price_per_day: Some(Decimal::from(130)),
            ..Default::default()
        };
        let vehicle = update_vehicle(&mut store, vehicle_id(3), request).unwrap();

        assert_eq!(vehicle.price_per_day, Decimal::from(130));
        assert_eq!(vehicle.status, VehicleStatus::Rentado);
    }

    #[test]
    fn test_delete_vehicle_with_live_rental_is_rejected() {
        let mut store = store();
        assert!(matches!(
            delete_vehicle(&mut store, vehicle_id(3)),
            Err(AppError::Conflict(_))
        ));

        delete_vehicle(&mut store, vehicle_id(4)).unwrap();
        assert!(store.vehicle(vehicle_id(4)).is_none());
    }

    #[test]
    fn test_maintenance_status_changes() {
        let mut store = store();

        let vehicle = update_vehicle_status(&mut store, vehicle_id(1), VehicleStatus::EnMantenimiento).unwrap();
        assert_eq!(vehicle.status, VehicleStatus::EnMantenimiento);

        let vehicle = update_vehicle_status(&mut store, vehicle_id(1), VehicleStatus::Disponible).unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Disponible);

        // Rentado no puede entrar a mantenimiento
        assert!(matches!(
            update_vehicle_status(&mut store, vehicle_id(7), VehicleStatus::EnMantenimiento),
            Err(AppError::InvalidTransition(_))
        ));
        assert!(matches!(
            update_vehicle_status(&mut store, vehicle_id(1), VehicleStatus::Rentado),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_release_refused_with_active_rental() {
        let mut store = store();
        // El Corolla tiene la renta activa RNT-2024-0001
        assert!(matches!(
            update_vehicle_status(&mut store, vehicle_id(3), VehicleStatus::Disponible),
            Err(AppError::Conflict(_))
        ));

        // El Mustang figura como rentado pero sin renta activa
        let vehicle = update_vehicle_status(&mut store, vehicle_id(7), VehicleStatus::Disponible).unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Disponible);
    }
}
