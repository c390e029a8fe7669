//! Carrito y checkout
//!
//! Cada usuario tiene un carrito con como máximo un item por vehículo. El
//! checkout convierte todos los items en reservas confirmadas o ninguno.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::dto::cart_dto::{CartSummary, CheckoutResponse};
use crate::middleware::AuthenticatedUser;
use crate::models::{
    CartItem, DateRange, Notification, NotificationType, PaymentMethod, Rental, RentalStatus,
    ReservationType, VehicleEvent,
};
use crate::services::availability_service::check_vehicle_availability;
use crate::store::{AppStore, Mutation};
use crate::utils::codes;
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, AppResult};
use crate::utils::validation::{validate_date_range, validate_not_empty};

const CHECKOUT_LOCATION: &str = "Oficina Centro";

pub fn deposit() -> Decimal {
    Decimal::from(200)
}

pub fn tax_rate() -> Decimal {
    Decimal::new(18, 2)
}

pub fn summary(store: &AppStore, user_id: Uuid) -> CartSummary {
    let items = store.cart(user_id).to_vec();
    let subtotal: Decimal = items.iter().map(|i| i.total_price).sum();
    let deposit = if items.is_empty() { Decimal::ZERO } else { deposit() };
    let taxes = subtotal * tax_rate();

    CartSummary {
        total: subtotal + deposit + taxes,
        items,
        subtotal,
        deposit,
        taxes,
    }
}

pub fn add_item(
    store: &mut AppStore,
    user_id: Uuid,
    vehicle_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> AppResult<CartSummary> {
    validate_date_range(start_date, end_date)
        .map_err(|_| bad_request_error("La fecha de fin debe ser posterior a la fecha de inicio"))?;

    let vehicle = store
        .vehicle(vehicle_id)
        .ok_or_else(|| not_found_error("Vehículo", vehicle_id))?;

    let total_days = DateRange::new(start_date, end_date).total_days();
    let item = CartItem {
        vehicle_id,
        start_date,
        end_date,
        total_days,
        price_per_day: vehicle.price_per_day,
        total_price: vehicle.price_per_day * Decimal::from(total_days),
    };

    let mut items: Vec<CartItem> = store
        .cart(user_id)
        .iter()
        .filter(|i| i.vehicle_id != vehicle_id)
        .cloned()
        .collect();
    items.push(item);

    store.commit(vec![Mutation::SetCart { user_id, items }])?;
    Ok(summary(store, user_id))
}

pub fn remove_item(store: &mut AppStore, user_id: Uuid, vehicle_id: Uuid) -> AppResult<CartSummary> {
    let items: Vec<CartItem> = store
        .cart(user_id)
        .iter()
        .filter(|i| i.vehicle_id != vehicle_id)
        .cloned()
        .collect();

    store.commit(vec![Mutation::SetCart { user_id, items }])?;
    Ok(summary(store, user_id))
}

pub fn clear(store: &mut AppStore, user_id: Uuid) -> AppResult<()> {
    store.commit(vec![Mutation::SetCart { user_id, items: Vec::new() }])?;
    Ok(())
}

pub fn checkout(
    store: &mut AppStore,
    actor: &AuthenticatedUser,
    payment_method: PaymentMethod,
    signature: &str,
    now: DateTime<Utc>,
) -> AppResult<CheckoutResponse> {
    validate_not_empty(signature)
        .map_err(|_| bad_request_error("Por favor firma el contrato para continuar"))?;

    let items = store.cart(actor.user_id).to_vec();
    if items.is_empty() {
        return Err(bad_request_error("El carrito está vacío"));
    }

    // Primero se verifican todos los items; si alguno falla no se crea nada
    let mut vehicles = Vec::with_capacity(items.len());
    for item in &items {
        let vehicle = store
            .vehicle(item.vehicle_id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehículo", item.vehicle_id))?;

        let availability =
            check_vehicle_availability(store, vehicle.id, item.start_date, item.end_date);
        if !availability.available {
            return Err(conflict_error(format!(
                "{} ya está reservado para las fechas seleccionadas",
                vehicle.display_name()
            )));
        }

        let mut updated = vehicle;
        updated.status = updated.status.apply(VehicleEvent::RentalCreated)?;
        vehicles.push(updated);
    }

    let profile = store.user(actor.user_id).cloned();
    let deposit_share = deposit() / Decimal::from(items.len());

    let order_code = codes::registration_number(ReservationType::Reservado, now);
    let mut rentals = Vec::with_capacity(items.len());
    let mut mutations = Vec::new();
    for (i, (item, vehicle)) in items.iter().zip(vehicles).enumerate() {
        let taxes = item.total_price * tax_rate();
        let rental = Rental {
            id: Uuid::new_v4(),
            registration_number: codes::checkout_registration_number(&order_code, i + 1),
            reservation_type: ReservationType::Reservado,
            vehicle_id: item.vehicle_id,
            user_id: actor.user_id,
            customer_name: profile
                .as_ref()
                .map(|u| u.name.clone())
                .unwrap_or_else(|| actor.username.clone()),
            customer_email: profile.as_ref().map(|u| u.email.clone()).unwrap_or_default(),
            customer_phone: profile.as_ref().map(|u| u.phone.clone()).unwrap_or_default(),
            customer_dni: profile.as_ref().and_then(|u| u.dni.clone()),
            customer_license: profile.as_ref().and_then(|u| u.license_number.clone()),
            start_date: item.start_date,
            end_date: item.end_date,
            total_days: item.total_days,
            base_price: item.total_price,
            initial_payment: item.total_price,
            deposit: deposit_share,
            damage_charges: Decimal::ZERO,
            total_price: item.total_price + deposit_share + taxes,
            status: RentalStatus::Pendiente,
            contract_signed: true,
            contract_url: None,
            pickup_location: CHECKOUT_LOCATION.to_string(),
            return_location: CHECKOUT_LOCATION.to_string(),
            created_at: now,
            pre_reserve_position: None,
        };

        mutations.push(Mutation::PushNotification(Notification::new(
            actor.user_id,
            "Reserva confirmada",
            format!(
                "Tu reserva {} para {} ha sido confirmada. Pago con {}.",
                rental.registration_number,
                vehicle.display_name(),
                payment_method.as_str()
            ),
            NotificationType::Success,
        )));
        mutations.push(Mutation::PutRental(rental.clone()));
        mutations.push(Mutation::PutVehicle(vehicle));
        rentals.push(rental);
    }

    mutations.push(Mutation::SetCart {
        user_id: actor.user_id,
        items: Vec::new(),
    });

    store.commit(mutations)?;

    let total: Decimal = rentals.iter().map(|r| r.total_price).sum();
    info!("🛒 Checkout de {}: {} reservas, total {}", actor.username, rentals.len(), total);
    Ok(CheckoutResponse { rentals, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UserRole, VehicleStatus};
    use crate::store::seed::{mock_users, user_id, vehicle_id};
    use crate::utils::errors::AppError;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: user_id(1),
            username: "admin".to_string(),
            role: UserRole::Admin,
        }
    }

    #[test]
    fn test_adding_same_vehicle_replaces_item() {
        let mut store = AppStore::seeded(mock_users());
        let user = user_id(1);

        add_item(&mut store, user, vehicle_id(1), date("2025-01-01"), date("2025-01-03")).unwrap();
        let cart = add_item(&mut store, user, vehicle_id(1), date("2025-01-01"), date("2025-01-05")).unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].total_days, 4);
        assert_eq!(cart.subtotal, Decimal::from(480));
        assert_eq!(cart.deposit, Decimal::from(200));
        assert_eq!(cart.taxes, Decimal::new(8640, 2));
        assert_eq!(cart.total, Decimal::new(76640, 2));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = AppStore::seeded(mock_users());
        let user = user_id(1);
        add_item(&mut store, user, vehicle_id(1), date("2025-01-01"), date("2025-01-03")).unwrap();
        add_item(&mut store, user, vehicle_id(2), date("2025-01-01"), date("2025-01-03")).unwrap();

        let cart = remove_item(&mut store, user, vehicle_id(1)).unwrap();
        assert_eq!(cart.items.len(), 1);

        clear(&mut store, user).unwrap();
        let cart = summary(&store, user);
        assert!(cart.items.is_empty());
        assert_eq!(cart.total, Decimal::ZERO);
    }

    #[test]
    fn test_checkout_creates_confirmed_rentals() {
        let mut store = AppStore::seeded(mock_users());
        let actor = admin();
        add_item(&mut store, actor.user_id, vehicle_id(1), date("2025-01-01"), date("2025-01-03")).unwrap();
        add_item(&mut store, actor.user_id, vehicle_id(2), date("2025-01-01"), date("2025-01-02")).unwrap();

        let result = checkout(&mut store, &actor, PaymentMethod::Tarjeta, "Admin", Utc::now()).unwrap();

        assert_eq!(result.rentals.len(), 2);
        let first = &result.rentals[0];
        // 240 + 100 de depósito + 43.20 de impuestos
        assert_eq!(first.total_price, Decimal::new(38320, 2));
        assert!(first.registration_number.ends_with("-1"));
        assert!(first.contract_signed);
        assert_eq!(first.reservation_type, ReservationType::Reservado);
        assert_eq!(first.pickup_location, "Oficina Centro");
        assert!(result.rentals[1].registration_number.ends_with("-2"));
        // Todas las rentas de la compra comparten el mismo código base
        let base = first.registration_number.trim_end_matches("-1");
        assert!(base.starts_with("RNT-"));
        assert_eq!(result.rentals[1].registration_number, format!("{}-2", base));

        assert!(store.cart(actor.user_id).is_empty());
        assert_eq!(store.vehicle(vehicle_id(1)).unwrap().status, VehicleStatus::PreRentado);
    }

    #[test]
    fn test_checkout_is_all_or_nothing() {
        let mut store = AppStore::seeded(mock_users());
        let actor = admin();
        add_item(&mut store, actor.user_id, vehicle_id(1), date("2025-01-01"), date("2025-01-03")).unwrap();
        // Toyota Corolla ya está reservado del 20 al 27 de octubre de 2024
        add_item(&mut store, actor.user_id, vehicle_id(3), date("2024-10-21"), date("2024-10-23")).unwrap();
        let before = store.rentals().len();

        let result = checkout(&mut store, &actor, PaymentMethod::Efectivo, "Admin", Utc::now());

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.rentals().len(), before);
        assert_eq!(store.cart(actor.user_id).len(), 2);
    }

    #[test]
    fn test_checkout_requires_signature_and_items() {
        let mut store = AppStore::seeded(mock_users());
        let actor = admin();

        assert!(matches!(
            checkout(&mut store, &actor, PaymentMethod::Tarjeta, "Admin", Utc::now()),
            Err(AppError::BadRequest(_))
        ));

        add_item(&mut store, actor.user_id, vehicle_id(1), date("2025-01-01"), date("2025-01-03")).unwrap();
        assert!(matches!(
            checkout(&mut store, &actor, PaymentMethod::Tarjeta, " ", Utc::now()),
            Err(AppError::BadRequest(_))
        ));
    }
}
