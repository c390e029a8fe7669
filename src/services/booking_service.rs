//! Creación y cancelación de rentas
//!
//! La verificación de disponibilidad y el commit se ejecutan con el mismo
//! `&mut AppStore`, así que el límite de pre-reservas no admite carreras.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::dto::rental_dto::CreateRentalRequest;
use crate::middleware::AuthenticatedUser;
use crate::models::{
    DateRange, Notification, NotificationType, Rental, RentalEvent, RentalStatus, ReservationType,
    TransitionError, VehicleEvent, MAX_PRE_RESERVATIONS,
};
use crate::services::availability_service::check_vehicle_availability;
use crate::store::{AppStore, Mutation};
use crate::utils::codes;
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, validation_error, AppResult};
use crate::utils::validation::{validate_date_range, validate_not_empty};

/// Tipo de reserva: el explícito o, si no viene, según haya pago inicial
fn resolve_reservation_type(request: &CreateRentalRequest) -> ReservationType {
    request.reservation_type.unwrap_or_else(|| {
        if request.initial_payment.unwrap_or_default() > Decimal::ZERO {
            ReservationType::Reservado
        } else {
            ReservationType::PreReservado
        }
    })
}

pub fn create_rental(
    store: &mut AppStore,
    actor: &AuthenticatedUser,
    request: CreateRentalRequest,
    now: DateTime<Utc>,
) -> AppResult<Rental> {
    let (start_date, end_date) = match (request.start_date, request.end_date) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(validation_error(
                "startDate",
                "Por favor selecciona las fechas de inicio y fin",
            ))
        }
    };
    validate_date_range(start_date, end_date)
        .map_err(|_| bad_request_error("La fecha de fin debe ser posterior a la fecha de inicio"))?;

    validate_not_empty(&request.pickup_location)
        .and_then(|_| validate_not_empty(&request.return_location))
        .map_err(|_| bad_request_error("Por favor indica las ubicaciones de recogida y devolución"))?;

    let vehicle = store
        .vehicle(request.vehicle_id)
        .cloned()
        .ok_or_else(|| not_found_error("Vehículo", request.vehicle_id))?;

    let reservation_type = resolve_reservation_type(&request);
    let availability = check_vehicle_availability(store, vehicle.id, start_date, end_date);

    let pre_reserve_position = match reservation_type {
        ReservationType::PreReservado => {
            if availability.pre_reserves_count >= MAX_PRE_RESERVATIONS {
                return Err(conflict_error(format!(
                    "Este vehículo ya tiene el máximo de {} pre-reservas",
                    MAX_PRE_RESERVATIONS
                )));
            }
            Some((availability.pre_reserves_count + 1) as u8)
        }
        ReservationType::Reservado => {
            if !availability.available {
                return Err(conflict_error(
                    "El vehículo ya está reservado para las fechas seleccionadas",
                ));
            }
            None
        }
    };

    let mut updated_vehicle = vehicle.clone();
    updated_vehicle.status = vehicle.status.apply(VehicleEvent::RentalCreated)?;

    let profile = store.user(actor.user_id);
    let customer_name = request
        .customer_name
        .or_else(|| profile.map(|u| u.name.clone()))
        .unwrap_or_else(|| actor.username.clone());
    let customer_email = request
        .customer_email
        .or_else(|| profile.map(|u| u.email.clone()))
        .unwrap_or_default();
    let customer_phone = request
        .customer_phone
        .or_else(|| profile.map(|u| u.phone.clone()))
        .unwrap_or_default();
    let customer_dni = request.customer_dni.or_else(|| profile.and_then(|u| u.dni.clone()));
    let customer_license = request
        .customer_license
        .or_else(|| profile.and_then(|u| u.license_number.clone()));

    let total_days = DateRange::new(start_date, end_date).total_days();
    let base_price = vehicle.price_per_day * Decimal::from(total_days);
    let deposit = request.deposit.unwrap_or_default();

    let rental = Rental {
        id: Uuid::new_v4(),
        registration_number: codes::registration_number(reservation_type, now),
        reservation_type,
        vehicle_id: vehicle.id,
        user_id: actor.user_id,
        customer_name,
        customer_email,
        customer_phone,
        customer_dni,
        customer_license,
        start_date,
        end_date,
        total_days,
        base_price,
        initial_payment: request.initial_payment.unwrap_or_default(),
        deposit,
        damage_charges: Decimal::ZERO,
        total_price: base_price + deposit,
        status: RentalStatus::Pendiente,
        contract_signed: false,
        contract_url: None,
        pickup_location: request.pickup_location,
        return_location: request.return_location,
        created_at: now,
        pre_reserve_position,
    };

    let notification = match pre_reserve_position {
        Some(position) => Notification::new(
            actor.user_id,
            "Pre-reserva creada",
            format!(
                "Tu pre-reserva {} para {} fue registrada. Posición {}/{} en la lista de espera.",
                rental.registration_number,
                vehicle.display_name(),
                position,
                MAX_PRE_RESERVATIONS
            ),
            NotificationType::Info,
        ),
        None => Notification::new(
            actor.user_id,
            "Reserva confirmada",
            format!(
                "Tu reserva {} para {} ha sido confirmada.",
                rental.registration_number,
                vehicle.display_name()
            ),
            NotificationType::Success,
        ),
    };

    store.commit(vec![
        Mutation::PutRental(rental.clone()),
        Mutation::PutVehicle(updated_vehicle),
        Mutation::PushNotification(notification),
    ])?;

    info!(
        "🚗 Renta {} creada ({}) para vehículo {}",
        rental.registration_number, rental.reservation_type, vehicle.license_plate
    );
    Ok(rental)
}

/// Cancelar una renta pendiente (pre-reserva o reserva sin contrato)
pub fn cancel_rental(store: &mut AppStore, rental_id: Uuid) -> AppResult<Rental> {
    let rental = store
        .rental(rental_id)
        .cloned()
        .ok_or_else(|| not_found_error("Renta", rental_id))?;

    // Las rentas activas solo se cancelan a través de su contrato
    if rental.status != RentalStatus::Pendiente {
        return Err(TransitionError::new("renta", rental.status, RentalEvent::Cancel).into());
    }

    let mut cancelled = rental.clone();
    cancelled.status = rental.status.apply(RentalEvent::Cancel)?;

    let mut mutations = vec![Mutation::PutRental(cancelled.clone())];

    let others_live = store
        .rentals_for_vehicle(rental.vehicle_id)
        .any(|r| r.id != rental.id && r.is_live());
    if !others_live {
        if let Some(vehicle) = store.vehicle(rental.vehicle_id) {
            let mut vehicle = vehicle.clone();
            vehicle.status = vehicle.status.apply(VehicleEvent::ReservationsCleared)?;
            mutations.push(Mutation::PutVehicle(vehicle));
        }
    }

    mutations.push(Mutation::PushNotification(Notification::new(
        rental.user_id,
        "Pre-reserva cancelada",
        format!("Tu pre-reserva {} ha sido cancelada.", rental.registration_number),
        NotificationType::Warning,
    )));

    store.commit(mutations)?;

    info!("🗑️ Renta {} cancelada", rental.registration_number);
    Ok(cancelled)
}
