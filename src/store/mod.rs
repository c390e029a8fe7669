//! Estado en memoria
//!
//! `AppStore` reemplaza al estado global mutable: accesores de lectura y un único
//! punto de escritura (`commit`).

pub mod app_store;
pub mod seed;

pub use app_store::{AppStore, CommitSummary, Mutation, StoreError};
