//! Controllers
//!
//! Cada controller toma el lock del store, delega en el servicio y arma la
//! `ApiResponse`. Las latencias simuladas se aplican antes de tomar el lock.

pub mod auth_controller;
pub mod cart_controller;
pub mod contract_controller;
pub mod notification_controller;
pub mod rental_controller;
pub mod report_controller;
pub mod user_controller;
pub mod vehicle_controller;

use crate::state::AppState;
use crate::storage::user_snapshots;
use crate::store::AppStore;

/// Reescribe `xyz_users` si algún commit cambió la lista de usuarios. Se
/// llama con el lock de escritura tomado para que los snapshots se escriban en
/// orden.
pub(crate) async fn persist_users(state: &AppState, store: &mut AppStore) {
    if store.take_users_changed() {
        user_snapshots::save_users(state.snapshots.as_ref(), store.users()).await;
    }
}
