//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno y su interpretación.

pub mod environment;

pub use environment::*;
