//! Errores de transición de estado
//!
//! Las entidades con ciclo de vida (vehículo, renta, contrato) exponen una única
//! función `apply(event)` que devuelve este error cuando el evento no es válido
//! para el estado actual.

use std::fmt::{Debug, Display};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transición inválida de {entity}: evento {event} no permitido desde '{from}'")]
pub struct TransitionError {
    pub entity: &'static str,
    pub from: String,
    pub event: String,
}

impl TransitionError {
    pub fn new(entity: &'static str, from: impl Display, event: impl Debug) -> Self {
        Self {
            entity,
            from: from.to_string(),
            event: format!("{:?}", event),
        }
    }
}
