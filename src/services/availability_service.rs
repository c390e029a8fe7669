//! Verificación de disponibilidad
//!
//! Solo las reservas confirmadas (`reservado`) bloquean un rango de fechas. Las
//! pre-reservas nunca bloquean: solo se cuentan para aplicar el límite de tres.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{DateRange, ReservationType, Vehicle};
use crate::store::AppStore;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub available: bool,
    pub pre_reserves_count: usize,
    pub reserved_dates: Vec<DateRange>,
}

/// Disponibilidad de un vehículo para un rango inclusivo
pub fn check_vehicle_availability(
    store: &AppStore,
    vehicle_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Availability {
    check_vehicle_availability_ignoring(store, vehicle_id, DateRange::new(start, end), None)
}

/// Igual que `check_vehicle_availability` pero sin tener en cuenta una renta,
/// la que se está modificando (extensión, conversión o reasignación)
pub fn check_vehicle_availability_ignoring(
    store: &AppStore,
    vehicle_id: Uuid,
    range: DateRange,
    ignore_rental: Option<Uuid>,
) -> Availability {
    let mut availability = Availability {
        available: true,
        pre_reserves_count: 0,
        reserved_dates: Vec::new(),
    };

    let live = store
        .rentals_for_vehicle(vehicle_id)
        .filter(|r| r.is_live())
        .filter(|r| Some(r.id) != ignore_rental);

    for rental in live {
        availability.reserved_dates.push(rental.range());

        match rental.reservation_type {
            // Se cuentan todas, se solapen o no con el rango consultado
            ReservationType::PreReservado => availability.pre_reserves_count += 1,
            ReservationType::Reservado => {
                if range.overlaps(&rental.range()) {
                    availability.available = false;
                }
            }
        }
    }

    availability
}

/// Alternativas de la misma categoría, hasta un 20% más caras y libres en el rango
pub fn recommended_vehicles(
    store: &AppStore,
    vehicle_id: Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<Vehicle> {
    let Some(original) = store.vehicle(vehicle_id) else {
        return Vec::new();
    };
    let max_price = original.price_per_day * Decimal::new(12, 1);

    store
        .vehicles()
        .iter()
        .filter(|v| v.id != original.id)
        .filter(|v| v.category == original.category)
        .filter(|v| v.price_per_day <= max_price)
        .filter(|v| check_vehicle_availability(store, v.id, start, end).available)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Rental, RentalStatus};
    use crate::store::seed::{mock_rentals, mock_users, vehicle_id};
    use crate::store::Mutation;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn rental_for(vehicle: Uuid, kind: ReservationType, start: &str, end: &str) -> Rental {
        let mut rental = mock_rentals().remove(0);
        rental.id = Uuid::new_v4();
        rental.vehicle_id = vehicle;
        rental.reservation_type = kind;
        rental.status = RentalStatus::Pendiente;
        rental.start_date = date(start);
        rental.end_date = date(end);
        rental
    }

    fn store_with(rentals: Vec<Rental>) -> AppStore {
        let mut store = AppStore::seeded(mock_users());
        store
            .commit(rentals.into_iter().map(Mutation::PutRental).collect())
            .unwrap();
        store
    }

    #[test]
    fn test_vehicle_without_rentals_is_available() {
        let store = AppStore::seeded(mock_users());
        let result = check_vehicle_availability(&store, vehicle_id(2), date("2024-10-01"), date("2024-10-05"));

        assert!(result.available);
        assert_eq!(result.pre_reserves_count, 0);
        assert!(result.reserved_dates.is_empty());
    }

    #[test]
    fn test_unknown_vehicle_is_available() {
        let store = AppStore::seeded(mock_users());
        let result = check_vehicle_availability(&store, Uuid::new_v4(), date("2024-10-01"), date("2024-10-05"));
        assert!(result.available);
        assert_eq!(result.pre_reserves_count, 0);
    }

    #[test]
    fn test_confirmed_reservation_blocks_overlapping_ranges() {
        // Toyota Corolla tiene RNT-2024-0001 del 20 al 27 de octubre
        let store = AppStore::seeded(mock_users());

        let inside = check_vehicle_availability(&store, vehicle_id(3), date("2024-10-22"), date("2024-10-24"));
        assert!(!inside.available);
        assert_eq!(inside.reserved_dates, vec![DateRange::new(date("2024-10-20"), date("2024-10-27"))]);

        let touching = check_vehicle_availability(&store, vehicle_id(3), date("2024-10-27"), date("2024-10-29"));
        assert!(!touching.available);

        let after = check_vehicle_availability(&store, vehicle_id(3), date("2024-11-01"), date("2024-11-05"));
        assert!(after.available);
    }

    #[test]
    fn test_pre_reservations_never_block() {
        let vehicle = vehicle_id(2);
        let store = store_with(vec![
            rental_for(vehicle, ReservationType::PreReservado, "2024-12-01", "2024-12-05"),
            rental_for(vehicle, ReservationType::PreReservado, "2024-12-02", "2024-12-06"),
            rental_for(vehicle, ReservationType::PreReservado, "2024-12-03", "2024-12-07"),
        ]);

        let result = check_vehicle_availability(&store, vehicle, date("2024-12-01"), date("2024-12-07"));

        assert!(result.available);
        assert_eq!(result.pre_reserves_count, 3);
        assert_eq!(result.reserved_dates.len(), 3);
    }

    #[test]
    fn test_pre_reservation_count_ignores_date_overlap() {
        let vehicle = vehicle_id(2);
        let store = store_with(vec![
            rental_for(vehicle, ReservationType::PreReservado, "2025-01-01", "2025-01-03"),
            rental_for(vehicle, ReservationType::PreReservado, "2025-06-01", "2025-06-03"),
        ]);

        let result = check_vehicle_availability(&store, vehicle, date("2025-09-01"), date("2025-09-02"));

        assert!(result.available);
        assert_eq!(result.pre_reserves_count, 2);
    }

    #[test]
    fn test_closed_rentals_are_ignored() {
        let vehicle = vehicle_id(2);
        let mut cancelled = rental_for(vehicle, ReservationType::Reservado, "2024-12-01", "2024-12-05");
        cancelled.status = RentalStatus::Cancelada;
        let mut completed = rental_for(vehicle, ReservationType::PreReservado, "2024-12-01", "2024-12-05");
        completed.status = RentalStatus::Completada;
        let store = store_with(vec![cancelled, completed]);

        let result = check_vehicle_availability(&store, vehicle, date("2024-12-01"), date("2024-12-05"));

        assert!(result.available);
        assert_eq!(result.pre_reserves_count, 0);
        assert!(result.reserved_dates.is_empty());
    }

    #[test]
    fn test_ignored_rental_does_not_block_itself() {
        let store = AppStore::seeded(mock_users());
        let range = DateRange::new(date("2024-10-20"), date("2024-10-30"));
        let own = crate::store::seed::rental_id(1);

        assert!(!check_vehicle_availability_ignoring(&store, vehicle_id(3), range, None).available);
        assert!(check_vehicle_availability_ignoring(&store, vehicle_id(3), range, Some(own)).available);
    }

    #[test]
    fn test_recommendations_same_category_and_price_cap() {
        let store = AppStore::seeded(mock_users());

        // Corolla (Sedán, 60): Altima 70 entra, Clase C 180 supera el 20%
        let recs = recommended_vehicles(&store, vehicle_id(3), date("2025-01-01"), date("2025-01-05"));
        let ids: Vec<_> = recs.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![vehicle_id(8)]);

        // Clase C (Sedán, 180): los sedanes más baratos también cuentan
        let recs = recommended_vehicles(&store, vehicle_id(6), date("2025-01-01"), date("2025-01-05"));
        let ids: Vec<_> = recs.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![vehicle_id(3), vehicle_id(8)]);

        assert!(recommended_vehicles(&store, Uuid::new_v4(), date("2025-01-01"), date("2025-01-05")).is_empty());
    }
}
