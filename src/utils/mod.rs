//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación y
//! generación de códigos y formato de fechas.

pub mod codes;
pub mod errors;
pub mod validation;
