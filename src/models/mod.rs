//! Modelos del sistema
//!
//! Entidades del dominio de renta de vehículos. Todas serializan en camelCase y
//! los estados usan los valores en español del frontend.

pub mod cart;
pub mod contract;
pub mod maintenance;
pub mod notification;
pub mod payment;
pub mod rental;
pub mod transition;
pub mod user;
pub mod vehicle;

pub use cart::CartItem;
pub use contract::{Contract, ContractEvent, ContractStatus};
pub use maintenance::{Maintenance, MaintenanceStatus};
pub use notification::{Notification, NotificationType};
pub use payment::{Payment, PaymentMethod, PaymentStatus};
pub use rental::{DateRange, Rental, RentalEvent, RentalStatus, ReservationType, MAX_PRE_RESERVATIONS};
pub use transition::TransitionError;
pub use user::{User, UserRole};
pub use vehicle::{CarType, PassengerClass, TransmissionKind, Vehicle, VehicleEvent, VehicleStatus};
