//! XYZ RentCar backend
//!
//! API JSON para la gestión de alquiler de vehículos: catálogo, reservas y
//! pre-reservas, contratos, usuarios, notificaciones, carrito y reportes.

pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod store;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
