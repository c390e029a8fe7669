//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. Los servicios
//! son funciones síncronas sobre `AppStore`: validan, arman el lote de
//! mutaciones y lo confirman con un único `commit`.

pub mod auth_service;
pub mod availability_service;
pub mod booking_service;
pub mod cart_service;
pub mod contract_service;
pub mod jwt_service;
pub mod listing_service;
pub mod report_service;
pub mod user_service;
pub mod vehicle_service;

pub use availability_service::{check_vehicle_availability, Availability};
pub use jwt_service::JwtService;
