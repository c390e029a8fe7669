//! Datos iniciales de la flota
//!
//! Catálogo de demostración que se carga cuando `SEED_MOCK_DATA` está activo.
//! Los ids son deterministas para que los tests puedan referenciarlos.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    Maintenance, MaintenanceStatus, Notification, NotificationType, Rental, RentalStatus,
    ReservationType, User, UserRole, Vehicle, VehicleStatus,
};

pub fn vehicle_id(n: u128) -> Uuid {
    Uuid::from_u128(0x1000 + n)
}

pub fn rental_id(n: u128) -> Uuid {
    Uuid::from_u128(0x2000 + n)
}

pub fn user_id(n: u128) -> Uuid {
    Uuid::from_u128(0x3000 + n)
}

fn notification_id(n: u128) -> Uuid {
    Uuid::from_u128(0x4000 + n)
}

fn maintenance_id(n: u128) -> Uuid {
    Uuid::from_u128(0x5000 + n)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn timestamp(y: i32, m: u32, d: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn image(photo: &str) -> String {
    format!("https://images.unsplash.com/{}?fit=max&fm=jpg&q=80&w=1080", photo)
}

#[allow(clippy::too_many_arguments)]
fn vehicle(
    n: u128,
    brand: &str,
    model: &str,
    year: i32,
    category: &str,
    price: i64,
    status: VehicleStatus,
    photo: &str,
    transmission: &str,
    fuel_type: &str,
    seats: u32,
    mileage: u32,
    plate: &str,
    description: &str,
    features: &[&str],
    rating: f64,
    review_count: u32,
) -> Vehicle {
    Vehicle {
        id: vehicle_id(n),
        brand: brand.to_string(),
        model: model.to_string(),
        year,
        category: category.to_string(),
        price_per_day: Decimal::from(price),
        status,
        image_url: image(photo),
        transmission: transmission.to_string(),
        fuel_type: fuel_type.to_string(),
        seats,
        mileage,
        license_plate: plate.to_string(),
        description: description.to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        rating: Some(rating),
        review_count: Some(review_count),
    }
}

pub fn mock_vehicles() -> Vec<Vehicle> {
    vec![
        vehicle(
            1, "Tesla", "Model 3", 2024, "Eléctrico", 120, VehicleStatus::Disponible,
            "photo-1593941707874-ef25b8b4a92b", "Automática", "Eléctrico", 5, 5000, "ABC-123",
            "Vehículo eléctrico de última generación con autopilot y gran autonomía.",
            &["Autopilot", "Cámara 360°", "Asientos de cuero", "Pantalla táctil 15\"", "Carga rápida"],
            4.8, 24,
        ),
        vehicle(
            2, "BMW", "X5", 2023, "SUV", 150, VehicleStatus::Disponible,
            "photo-1758217209786-95458c5d30a7", "Automática", "Gasolina", 7, 15000, "XYZ-456",
            "SUV de lujo con espacio para toda la familia y tecnología de punta.",
            &["7 asientos", "Sistema de navegación", "Control crucero adaptativo", "Techo panorámico", "Sistema de sonido premium"],
            4.6, 18,
        ),
        vehicle(
            3, "Toyota", "Corolla", 2023, "Sedán", 60, VehicleStatus::Rentado,
            "photo-1658662160331-62f7e52e63de", "Automática", "Híbrido", 5, 25000, "DEF-789",
            "Sedán eficiente y confiable, ideal para viajes largos y uso diario.",
            &["Bajo consumo", "Sistema híbrido", "Apple CarPlay", "Cámara trasera", "Sensores de estacionamiento"],
            4.5, 32,
        ),
        vehicle(
            4, "Porsche", "911", 2024, "Deportivo", 350, VehicleStatus::Disponible,
            "photo-1716013989018-698c714f20d6", "Automática", "Gasolina", 2, 3000, "GHI-321",
            "Deportivo de alto rendimiento para una experiencia de conducción inolvidable.",
            &["Motor turbo", "Modo deportivo", "Sistema de escape deportivo", "Frenos de alto rendimiento", "Interior premium"],
            5.0, 8,
        ),
        vehicle(
            5, "Honda", "CR-V", 2023, "SUV", 85, VehicleStatus::EnMantenimiento,
            "photo-1705747401901-28363172fe7e", "Automática", "Gasolina", 5, 35000, "JKL-654",
            "SUV compacto versátil con gran espacio de carga y confort.",
            &["Amplio maletero", "Sistema de seguridad Honda Sensing", "Climatizador dual", "Bluetooth", "Control de voz"],
            4.4, 15,
        ),
        vehicle(
            6, "Mercedes-Benz", "Clase C", 2024, "Sedán", 180, VehicleStatus::PreRentado,
            "photo-1658662160331-62f7e52e63de", "Automática", "Gasolina", 5, 8000, "MNO-987",
            "Sedán de lujo con elegancia y tecnología de vanguardia.",
            &["Sistema MBUX", "Asientos con masaje", "Iluminación ambiental", "Head-up display", "Asistente de estacionamiento"],
            4.7, 12,
        ),
        vehicle(
            7, "Ford", "Mustang", 2023, "Deportivo", 200, VehicleStatus::Rentado,
            "photo-1642975474863-94903cfdc4aa", "Manual", "Gasolina", 4, 12000, "PQR-111",
            "Muscle car americano con un potente motor V8.",
            &["Motor V8", "Sistema de escape deportivo", "Asientos deportivos", "Pantalla táctil", "Sistema de sonido premium"],
            4.8, 20,
        ),
        vehicle(
            8, "Nissan", "Altima", 2023, "Sedán", 70, VehicleStatus::Rentado,
            "photo-1590362891991-f776e747a588", "Automática", "Gasolina", 5, 28000, "STU-222",
            "Sedán familiar espacioso con excelente rendimiento de combustible.",
            &["Pantalla táctil", "Cámara de reversa", "Bluetooth", "Control crucero", "Sistema de navegación"],
            4.3, 16,
        ),
    ]
}

/// Usuario administrador por defecto (admin / 1234). La contraseña queda en
/// texto plano como en los snapshots heredados.
pub fn mock_users() -> Vec<User> {
    vec![User {
        id: user_id(1),
        username: "admin".to_string(),
        password: Some("1234".to_string()),
        email: "admin@xyz.com".to_string(),
        name: "Admin".to_string(),
        phone: "+1234567890".to_string(),
        role: UserRole::Admin,
        dni: Some("001-0123456-7".to_string()),
        address: Some("Av. Principal 123, Santo Domingo".to_string()),
        license_number: Some("A12345678".to_string()),
        deposit_verified: true,
        deposit_amount: Some(Decimal::from(500)),
        created_at: timestamp(2024, 1, 1),
    }]
}

pub fn mock_rentals() -> Vec<Rental> {
    vec![
        Rental {
            id: rental_id(1),
            registration_number: "RNT-2024-0001".to_string(),
            reservation_type: ReservationType::Reservado,
            vehicle_id: vehicle_id(3),
            user_id: user_id(2),
            customer_name: "Juan Pérez García".to_string(),
            customer_email: "juan.perez@example.com".to_string(),
            customer_phone: "+1 (809) 555-1234".to_string(),
            customer_dni: Some("001-0234567-8".to_string()),
            customer_license: Some("B23456789".to_string()),
            start_date: date(2024, 10, 20),
            end_date: date(2024, 10, 27),
            total_days: 7,
            base_price: Decimal::from(420),
            initial_payment: Decimal::from(100),
            deposit: Decimal::from(200),
            damage_charges: Decimal::ZERO,
            total_price: Decimal::from(620),
            status: RentalStatus::Activa,
            contract_signed: true,
            contract_url: Some("/contracts/RNT-2024-0001.pdf".to_string()),
            pickup_location: "Oficina Centro".to_string(),
            return_location: "Oficina Centro".to_string(),
            created_at: timestamp(2024, 10, 15),
            pre_reserve_position: None,
        },
        Rental {
            id: rental_id(2),
            registration_number: "PRE-2024-0002".to_string(),
            reservation_type: ReservationType::PreReservado,
            vehicle_id: vehicle_id(6),
            user_id: user_id(2),
            customer_name: "María Rodríguez Santos".to_string(),
            customer_email: "maria.rodriguez@example.com".to_string(),
            customer_phone: "+1 (809) 555-5678".to_string(),
            customer_dni: Some("001-0345678-9".to_string()),
            customer_license: Some("C34567890".to_string()),
            start_date: date(2024, 10, 28),
            end_date: date(2024, 11, 2),
            total_days: 5,
            base_price: Decimal::from(900),
            initial_payment: Decimal::ZERO,
            deposit: Decimal::from(300),
            damage_charges: Decimal::ZERO,
            total_price: Decimal::from(1200),
            status: RentalStatus::Pendiente,
            contract_signed: false,
            contract_url: None,
            pickup_location: "Oficina Aeropuerto".to_string(),
            return_location: "Oficina Centro".to_string(),
            created_at: timestamp(2024, 10, 25),
            pre_reserve_position: Some(1),
        },
    ]
}

pub fn mock_notifications() -> Vec<Notification> {
    let entries = [
        (
            1,
            "Reserva confirmada",
            "Tu reserva RNT-2024-0001 ha sido confirmada. Recoge tu vehículo el 20 de octubre.",
            NotificationType::Success,
            false,
            timestamp(2024, 10, 15),
        ),
        (
            2,
            "Recordatorio de devolución",
            "Recuerda devolver tu vehículo mañana 27 de octubre antes de las 5:00 PM.",
            NotificationType::Warning,
            false,
            timestamp(2024, 10, 26),
        ),
        (
            3,
            "Contrato pendiente",
            "Por favor firma el contrato de tu reserva RNT-2024-0002 antes del 28 de octubre.",
            NotificationType::Info,
            true,
            timestamp(2024, 10, 25),
        ),
    ];

    entries
        .into_iter()
        .map(|(n, title, message, kind, read, created_at)| Notification {
            id: notification_id(n),
            user_id: user_id(2),
            title: title.to_string(),
            message: message.to_string(),
            kind,
            read,
            created_at,
        })
        .collect()
}

pub fn mock_maintenance() -> Vec<Maintenance> {
    vec![
        Maintenance {
            id: maintenance_id(1),
            vehicle_id: vehicle_id(5),
            kind: "Mantenimiento Preventivo".to_string(),
            description: "Cambio de aceite, filtros y revisión general".to_string(),
            cost: Decimal::from(250),
            date: date(2024, 10, 26),
            performed_by: "Taller Autorizado Honda".to_string(),
            status: MaintenanceStatus::EnProgreso,
        },
        Maintenance {
            id: maintenance_id(2),
            vehicle_id: vehicle_id(3),
            kind: "Reparación".to_string(),
            description: "Cambio de neumáticos delanteros".to_string(),
            cost: Decimal::from(400),
            date: date(2024, 9, 15),
            performed_by: "Taller Central".to_string(),
            status: MaintenanceStatus::Completado,
        },
        Maintenance {
            id: maintenance_id(3),
            vehicle_id: vehicle_id(1),
            kind: "Inspección".to_string(),
            description: "Inspección técnica anual".to_string(),
            cost: Decimal::from(150),
            date: date(2024, 8, 20),
            performed_by: "Centro de Inspección Vehicular".to_string(),
            status: MaintenanceStatus::Completado,
        },
    ]
}
