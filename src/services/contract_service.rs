//! Ciclo de vida de los contratos
//!
//! Generación, extensión, finalización, cancelación y reasignación de vehículo.
//! Cada operación valida todo contra el store y luego hace un único commit.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;
use uuid::Uuid;

use crate::dto::contract_dto::{
    CancelContractRequest, CreateContractRequest, ExtendContractRequest, FinishContractRequest,
    FinishContractResponse,
};
use crate::models::{
    Contract, ContractEvent, ContractStatus, DateRange, Notification, NotificationType, Payment,
    PaymentStatus, Rental, RentalEvent, ReservationType, Vehicle, VehicleEvent,
};
use crate::services::availability_service::check_vehicle_availability_ignoring;
use crate::store::{AppStore, Mutation};
use crate::utils::codes;
use crate::utils::errors::{bad_request_error, conflict_error, not_found_error, AppResult};
use crate::utils::validation::validate_not_empty;

fn find_contract(store: &AppStore, id: Uuid) -> AppResult<Contract> {
    store
        .contract(id)
        .cloned()
        .ok_or_else(|| not_found_error("Contrato", id))
}

fn find_rental(store: &AppStore, id: Uuid) -> AppResult<Rental> {
    store
        .rental(id)
        .cloned()
        .ok_or_else(|| not_found_error("Renta", id))
}

fn find_vehicle(store: &AppStore, id: Uuid) -> AppResult<Vehicle> {
    store
        .vehicle(id)
        .cloned()
        .ok_or_else(|| not_found_error("Vehículo", id))
}

fn vehicle_label(vehicle: &Vehicle) -> String {
    format!("{} {} ({})", vehicle.brand, vehicle.model, vehicle.license_plate)
}

/// Tope de días que admite una sola extensión
pub const MAX_EXTENSION_DAYS: i64 = 365;

/// Depósito sugerido: 10% del total, redondeado a unidades
pub fn suggested_deposit(total: Decimal) -> Decimal {
    (total * Decimal::new(1, 1)).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

pub fn create_contract(
    store: &mut AppStore,
    request: CreateContractRequest,
    now: DateTime<Utc>,
) -> AppResult<Contract> {
    [&request.customer_name, &request.customer_dni, &request.customer_license]
        .into_iter()
        .try_for_each(|field| validate_not_empty(field))
        .map_err(|_| bad_request_error("Por favor completa todos los campos obligatorios"))?;
    validate_not_empty(&request.company_signature)
        .and_then(|_| validate_not_empty(&request.client_signature))
        .map_err(|_| bad_request_error("Por favor completa ambas firmas (Empresa y Cliente)"))?;

    let customer_name = request.customer_name.trim();
    let customer_dni = request.customer_dni.trim();
    let customer_license = request.customer_license.trim();
    let company_signature = request.company_signature.trim();
    let client_signature = request.client_signature.trim();

    let rental = find_rental(store, request.rental_id)?;
    if rental.contract_signed || store.contract_for_rental(rental.id).is_some() {
        return Err(conflict_error(format!(
            "La renta {} ya tiene un contrato firmado",
            rental.registration_number
        )));
    }

    // Al convertir una pre-reserva, ninguna reserva confirmada puede ocupar el rango
    let availability =
        check_vehicle_availability_ignoring(store, rental.vehicle_id, rental.range(), Some(rental.id));
    if !availability.available {
        return Err(conflict_error(
            "El vehículo ya está reservado para las fechas de esta renta",
        ));
    }

    let mut vehicle = find_vehicle(store, rental.vehicle_id)?;
    vehicle.status = vehicle.status.apply(VehicleEvent::ContractActivated)?;

    let contract_number = codes::contract_number(now);
    let contract_url = codes::contract_url(&contract_number);

    let notes = format!(
        "{}\n\n--- FIRMAS DIGITALES ---\nFirma de la Empresa: {}\nFirma del Cliente: {}\nFecha y Hora: {}",
        request.notes.as_deref().unwrap_or_default(),
        company_signature,
        client_signature,
        codes::format_datetime(now)
    );

    let contract = Contract {
        id: Uuid::new_v4(),
        contract_number: contract_number.clone(),
        rental_id: rental.id,
        vehicle_id: rental.vehicle_id,
        user_id: rental.user_id,
        customer_name: customer_name.to_string(),
        customer_dni: customer_dni.to_string(),
        customer_license: customer_license.to_string(),
        start_date: rental.start_date,
        end_date: rental.end_date,
        total_amount: rental.total_price,
        deposit_amount: request
            .deposit_amount
            .unwrap_or_else(|| suggested_deposit(rental.total_price)),
        status: ContractStatus::Borrador.apply(ContractEvent::Activate)?,
        company_signature: company_signature.to_string(),
        client_signature: client_signature.to_string(),
        signed_date: Some(now),
        contract_url: Some(contract_url.clone()),
        email_sent: false,
        created_at: now,
        updated_at: None,
        notes: Some(notes),
    };

    let mut signed = rental.clone();
    signed.status = rental.status.apply(RentalEvent::ContractSigned)?;
    signed.contract_signed = true;
    signed.reservation_type = ReservationType::Reservado;
    signed.pre_reserve_position = None;
    signed.contract_url = Some(contract_url);

    let notification = Notification::new(
        rental.user_id,
        "Contrato preliminar generado",
        format!(
            "Se ha generado el contrato preliminar {} para tu reserva {}. El pago se realizará al devolver el vehículo.",
            contract_number, rental.registration_number
        ),
        NotificationType::Success,
    );

    store.commit(vec![
        Mutation::PutContract(contract.clone()),
        Mutation::PutRental(signed),
        Mutation::PutVehicle(vehicle),
        Mutation::PushNotification(notification),
    ])?;

    info!("📄 Contrato {} generado para renta {}", contract_number, rental.registration_number);
    Ok(contract)
}

pub fn extend_contract(
    store: &mut AppStore,
    contract_id: Uuid,
    request: ExtendContractRequest,
    now: DateTime<Utc>,
) -> AppResult<Contract> {
    let days = request.additional_days;
    if !(1..=MAX_EXTENSION_DAYS).contains(&days) {
        return Err(bad_request_error(format!(
            "Por favor ingresa entre 1 y {} días adicionales",
            MAX_EXTENSION_DAYS
        )));
    }

    let mut contract = find_contract(store, contract_id)?;
    contract.status = contract.status.apply(ContractEvent::Extend)?;

    let vehicle = store
        .vehicle(contract.vehicle_id)
        .cloned()
        .ok_or_else(|| bad_request_error("No se encontró información del vehículo"))?;
    let mut rental = find_rental(store, contract.rental_id)?;

    let new_end = Duration::try_days(days)
        .and_then(|delta| contract.end_date.checked_add_signed(delta))
        .ok_or_else(|| bad_request_error("La nueva fecha de finalización no es válida"))?;
    let first_added = contract.end_date.succ_opt().unwrap_or(new_end);
    let added = DateRange::new(first_added, new_end);
    let availability =
        check_vehicle_availability_ignoring(store, vehicle.id, added, Some(rental.id));
    if !availability.available {
        return Err(conflict_error(
            "El vehículo tiene otra reserva confirmada en los días de la extensión",
        ));
    }

    let additional_cost = vehicle.price_per_day * Decimal::from(days);
    let new_end_label = codes::format_date(new_end);

    let mut note = format!(
        "Extensión: +{} día(s) hasta {} - Costo adicional: ${:.2}",
        days, new_end_label, additional_cost
    );
    if let Some(extra) = request.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        note.push_str(&format!("\nNotas: {}", extra));
    }

    contract.end_date = new_end;
    contract.total_amount += additional_cost;
    contract.updated_at = Some(now);
    contract.append_note(&note);

    rental.end_date = new_end;
    rental.total_days += days;
    rental.total_price = contract.total_amount;

    let notification = Notification::new(
        contract.user_id,
        "Contrato extendido",
        format!(
            "Tu contrato {} ha sido extendido por {} día(s) adicional(es). Nueva fecha de finalización: {}. Costo adicional: ${:.2}.",
            contract.contract_number, days, new_end_label, additional_cost
        ),
        NotificationType::Info,
    );

    store.commit(vec![
        Mutation::PutContract(contract.clone()),
        Mutation::PutRental(rental),
        Mutation::PushNotification(notification),
    ])?;

    info!("📅 Contrato {} extendido {} día(s)", contract.contract_number, days);
    Ok(contract)
}

pub fn finish_contract(
    store: &mut AppStore,
    contract_id: Uuid,
    request: FinishContractRequest,
    now: DateTime<Utc>,
) -> AppResult<FinishContractResponse> {
    if request.damage_charges < Decimal::ZERO {
        return Err(bad_request_error("Los cargos por daños no pueden ser negativos"));
    }

    let mut contract = find_contract(store, contract_id)?;
    contract.status = contract.status.apply(ContractEvent::Complete)?;

    let mut rental = find_rental(store, contract.rental_id)?;
    rental.status = rental.status.apply(RentalEvent::Complete)?;
    rental.damage_charges = request.damage_charges;

    let total_to_pay = contract.total_amount - contract.deposit_amount + request.damage_charges;

    if request.has_damages {
        contract.append_note(&format!(
            "Daños reportados: {}\nCargos adicionales: ${:.2}",
            request.damage_description.as_deref().unwrap_or_default(),
            request.damage_charges
        ));
    }
    contract.updated_at = Some(now);

    let payment = Payment {
        id: Uuid::new_v4(),
        rental_id: rental.id,
        amount: total_to_pay,
        method: request.payment_method,
        status: PaymentStatus::Completado,
        transaction_id: codes::transaction_id(now),
        created_at: now,
    };

    let mut mutations = vec![
        Mutation::PutContract(contract.clone()),
        Mutation::PutRental(rental),
        Mutation::PutPayment(payment.clone()),
    ];

    if let Some(vehicle) = store.vehicle(contract.vehicle_id) {
        let mut vehicle = vehicle.clone();
        vehicle.status = vehicle.status.apply(VehicleEvent::Released)?;
        mutations.push(Mutation::PutVehicle(vehicle));
    }

    mutations.push(Mutation::PushNotification(Notification::new(
        contract.user_id,
        "Contrato finalizado",
        format!(
            "El contrato {} ha sido finalizado. Monto total pagado: ${:.2}.",
            contract.contract_number, total_to_pay
        ),
        NotificationType::Success,
    )));

    store.commit(mutations)?;

    info!(
        "✅ Contrato {} finalizado. Total cobrado: {} ({})",
        contract.contract_number,
        total_to_pay,
        payment.method.as_str()
    );
    Ok(FinishContractResponse {
        contract,
        total_to_pay,
        payment,
    })
}

pub fn cancel_contract(
    store: &mut AppStore,
    contract_id: Uuid,
    request: CancelContractRequest,
    now: DateTime<Utc>,
) -> AppResult<Contract> {
    let mut contract = find_contract(store, contract_id)?;
    contract.status = contract.status.apply(ContractEvent::Cancel)?;
    contract.updated_at = Some(now);
    if let Some(reason) = request.reason.as_deref().filter(|r| !r.trim().is_empty()) {
        contract.append_note(&format!(
            "Cancelación: {} - {}",
            reason,
            codes::format_datetime(now)
        ));
    }

    let mut mutations = vec![Mutation::PutContract(contract.clone())];

    if let Some(rental) = store.rental(contract.rental_id) {
        let mut rental = rental.clone();
        rental.status = rental.status.apply(RentalEvent::Cancel)?;
        mutations.push(Mutation::PutRental(rental));
    }

    if let Some(vehicle) = store.vehicle(contract.vehicle_id) {
        let mut vehicle = vehicle.clone();
        vehicle.status = vehicle.status.apply(VehicleEvent::Released)?;
        mutations.push(Mutation::PutVehicle(vehicle));
    }

    mutations.push(Mutation::PushNotification(Notification::new(
        contract.user_id,
        "Contrato cancelado",
        format!("El contrato {} ha sido cancelado.", contract.contract_number),
        NotificationType::Warning,
    )));

    store.commit(mutations)?;

    info!("🚫 Contrato {} cancelado", contract.contract_number);
    Ok(contract)
}

pub fn reassign_vehicle(
    store: &mut AppStore,
    contract_id: Uuid,
    new_vehicle_id: Uuid,
    now: DateTime<Utc>,
) -> AppResult<Contract> {
    let mut contract = find_contract(store, contract_id)?;
    contract.status = contract.status.apply(ContractEvent::Reassign)?;
    if contract.vehicle_id == new_vehicle_id {
        return Err(bad_request_error(
            "El vehículo seleccionado ya está asignado a este contrato",
        ));
    }

    let mut old_vehicle = find_vehicle(store, contract.vehicle_id)?;
    let mut new_vehicle = find_vehicle(store, new_vehicle_id)?;

    let range = DateRange::new(contract.start_date, contract.end_date);
    let availability =
        check_vehicle_availability_ignoring(store, new_vehicle.id, range, Some(contract.rental_id));
    if !availability.available {
        return Err(conflict_error(format!(
            "{} no está disponible para las fechas del contrato",
            new_vehicle.display_name()
        )));
    }

    let note = format!(
        "Reasignación: Vehículo cambiado de {} a {} - {}",
        vehicle_label(&old_vehicle),
        vehicle_label(&new_vehicle),
        codes::format_datetime(now)
    );

    old_vehicle.status = old_vehicle.status.apply(VehicleEvent::Released)?;
    new_vehicle.status = new_vehicle.status.apply(VehicleEvent::ContractActivated)?;

    contract.vehicle_id = new_vehicle.id;
    contract.updated_at = Some(now);
    contract.append_note(&note);

    let mut mutations = vec![Mutation::PutContract(contract.clone())];
    if let Some(rental) = store.rental(contract.rental_id) {
        let mut rental = rental.clone();
        rental.vehicle_id = new_vehicle.id;
        mutations.push(Mutation::PutRental(rental));
    }

    mutations.push(Mutation::PushNotification(Notification::new(
        contract.user_id,
        "Vehículo reasignado",
        format!(
            "El vehículo de tu contrato {} fue cambiado a {}.",
            contract.contract_number,
            vehicle_label(&new_vehicle)
        ),
        NotificationType::Info,
    )));
    mutations.push(Mutation::PutVehicle(old_vehicle));
    mutations.push(Mutation::PutVehicle(new_vehicle));

    store.commit(mutations)?;

    info!("🔄 Contrato {} reasignado", contract.contract_number);
    Ok(contract)
}
