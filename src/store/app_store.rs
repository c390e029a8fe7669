//! Store en memoria de la aplicación
//!
//! Todas las colecciones viven aquí. La lectura se hace con accesores y la
//! escritura pasa siempre por `commit`, que valida el lote completo antes de
//! aplicar la primera mutación.

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::{
    CartItem, Contract, Maintenance, Notification, Payment, Rental, User, Vehicle,
};

use super::seed;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{entity} con id '{id}' no existe")]
    MissingEntity { entity: &'static str, id: Uuid },
}

/// Cambio atómico sobre el store
#[derive(Debug, Clone)]
pub enum Mutation {
    PutVehicle(Vehicle),
    DeleteVehicle(Uuid),
    PutRental(Rental),
    PutContract(Contract),
    PutUser(User),
    DeleteUser(Uuid),
    PushNotification(Notification),
    MarkNotificationRead(Uuid),
    PutPayment(Payment),
    SetCart { user_id: Uuid, items: Vec<CartItem> },
}

/// Resultado de un commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitSummary {
    pub applied: usize,
    /// El lote tocó la lista de usuarios y hay que reescribir `xyz_users`
    pub users_changed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AppStore {
    vehicles: Vec<Vehicle>,
    rentals: Vec<Rental>,
    contracts: Vec<Contract>,
    users: Vec<User>,
    notifications: Vec<Notification>,
    payments: Vec<Payment>,
    maintenance: Vec<Maintenance>,
    carts: HashMap<Uuid, Vec<CartItem>>,
    /// Hay cambios en usuarios pendientes de escribir en `xyz_users`
    users_dirty: bool,
}

impl AppStore {
    /// Store vacío salvo por la lista de usuarios
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }

    /// Store con el catálogo de demostración
    pub fn seeded(users: Vec<User>) -> Self {
        let mut notifications = seed::mock_notifications();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Self {
            vehicles: seed::mock_vehicles(),
            rentals: seed::mock_rentals(),
            users,
            notifications,
            maintenance: seed::mock_maintenance(),
            ..Self::default()
        }
    }

    // ----- Accesores -----

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, id: Uuid) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn rentals(&self) -> &[Rental] {
        &self.rentals
    }

    pub fn rental(&self, id: Uuid) -> Option<&Rental> {
        self.rentals.iter().find(|r| r.id == id)
    }

    pub fn rentals_for_vehicle(&self, vehicle_id: Uuid) -> impl Iterator<Item = &Rental> {
        self.rentals.iter().filter(move |r| r.vehicle_id == vehicle_id)
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn contract(&self, id: Uuid) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    pub fn contract_for_rental(&self, rental_id: Uuid) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.rental_id == rental_id)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Notificaciones, la más reciente primero
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn notifications_for(&self, user_id: Uuid) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(move |n| n.user_id == user_id)
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn maintenance(&self) -> &[Maintenance] {
        &self.maintenance
    }

    pub fn cart(&self, user_id: Uuid) -> &[CartItem] {
        self.carts.get(&user_id).map(Vec::as_slice).unwrap_or(&[])
    }

    // ----- Escritura -----

    /// Devuelve si algún commit tocó usuarios desde la última llamada y
    /// limpia la marca
    pub fn take_users_changed(&mut self) -> bool {
        std::mem::take(&mut self.users_dirty)
    }

    /// Aplica un lote de mutaciones. Si alguna referencia una entidad
    /// inexistente no se aplica ninguna.
    pub fn commit(&mut self, mutations: Vec<Mutation>) -> Result<CommitSummary, StoreError> {
        self.validate(&mutations)?;

        let mut summary = CommitSummary::default();
        for mutation in mutations {
            if matches!(mutation, Mutation::PutUser(_) | Mutation::DeleteUser(_)) {
                summary.users_changed = true;
            }
            self.apply(mutation);
            summary.applied += 1;
        }

        self.users_dirty |= summary.users_changed;
        debug!("📝 Commit aplicado: {} mutaciones", summary.applied);
        Ok(summary)
    }

    fn validate(&self, mutations: &[Mutation]) -> Result<(), StoreError> {
        let mut vehicles: HashSet<Uuid> = self.vehicles.iter().map(|v| v.id).collect();
        let mut users: HashSet<Uuid> = self.users.iter().map(|u| u.id).collect();
        let mut notifications: HashSet<Uuid> = self.notifications.iter().map(|n| n.id).collect();

        for mutation in mutations {
            match mutation {
                Mutation::PutVehicle(v) => {
                    vehicles.insert(v.id);
                }
                Mutation::DeleteVehicle(id) => {
                    if !vehicles.remove(id) {
                        return Err(StoreError::MissingEntity { entity: "vehicle", id: *id });
                    }
                }
                Mutation::PutUser(u) => {
                    users.insert(u.id);
                }
                Mutation::DeleteUser(id) => {
                    if !users.remove(id) {
                        return Err(StoreError::MissingEntity { entity: "user", id: *id });
                    }
                }
                Mutation::PushNotification(n) => {
                    notifications.insert(n.id);
                }
                Mutation::MarkNotificationRead(id) => {
                    if !notifications.contains(id) {
                        return Err(StoreError::MissingEntity { entity: "notification", id: *id });
                    }
                }
                Mutation::PutRental(_)
                | Mutation::PutContract(_)
                | Mutation::PutPayment(_)
                | Mutation::SetCart { .. } => {}
            }
        }

        Ok(())
    }

    fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::PutVehicle(vehicle) => upsert(&mut self.vehicles, vehicle, |v| v.id),
            Mutation::DeleteVehicle(id) => self.vehicles.retain(|v| v.id != id),
            Mutation::PutRental(rental) => upsert(&mut self.rentals, rental, |r| r.id),
            Mutation::PutContract(contract) => upsert(&mut self.contracts, contract, |c| c.id),
            Mutation::PutUser(user) => upsert(&mut self.users, user, |u| u.id),
            Mutation::DeleteUser(id) => {
                self.users.retain(|u| u.id != id);
                self.carts.remove(&id);
            }
            Mutation::PushNotification(notification) => {
                self.notifications.insert(0, notification)
            }
            Mutation::MarkNotificationRead(id) => {
                if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
                    n.read = true;
                }
            }
            Mutation::PutPayment(payment) => upsert(&mut self.payments, payment, |p| p.id),
            Mutation::SetCart { user_id, items } => {
                if items.is_empty() {
                    self.carts.remove(&user_id);
                } else {
                    self.carts.insert(user_id, items);
                }
            }
        }
    }
}

/// Reemplaza el elemento con el mismo id o lo agrega al final
fn upsert<T>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> Uuid) {
    let id = key(&item);
    match items.iter_mut().find(|existing| key(existing) == id) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NotificationType, VehicleStatus};
    use crate::store::seed::{mock_users, vehicle_id};

    #[test]
    fn test_seeded_store_contents() {
        let store = AppStore::seeded(mock_users());

        assert_eq!(store.vehicles().len(), 8);
        assert_eq!(store.rentals().len(), 2);
        assert_eq!(store.maintenance().len(), 3);
        assert!(store.user_by_username("admin").is_some());

        // Más reciente primero
        let dates: Vec<_> = store.notifications().iter().map(|n| n.created_at).collect();
        assert!(dates.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_commit_upserts_vehicle() {
        let mut store = AppStore::seeded(mock_users());
        let mut vehicle = store.vehicle(vehicle_id(1)).cloned().unwrap();
        vehicle.status = VehicleStatus::PreRentado;

        let summary = store.commit(vec![Mutation::PutVehicle(vehicle)]).unwrap();

        assert_eq!(summary.applied, 1);
        assert!(!summary.users_changed);
        assert_eq!(store.vehicles().len(), 8);
        assert_eq!(
            store.vehicle(vehicle_id(1)).unwrap().status,
            VehicleStatus::PreRentado
        );
    }

    #[test]
    fn test_failed_batch_leaves_store_untouched() {
        let mut store = AppStore::seeded(mock_users());
        let before = store.notifications().len();

        let result = store.commit(vec![
            Mutation::PushNotification(Notification::new(
                Uuid::new_v4(),
                "Hola",
                "Mensaje",
                NotificationType::Info,
            )),
            Mutation::DeleteVehicle(Uuid::new_v4()),
        ]);

        assert!(matches!(result, Err(StoreError::MissingEntity { entity: "vehicle", .. })));
        assert_eq!(store.notifications().len(), before);
    }

    #[test]
    fn test_user_mutations_flag_snapshot() {
        let mut store = AppStore::new(mock_users());
        let admin = store.users()[0].clone();

        let summary = store.commit(vec![Mutation::PutUser(admin)]).unwrap();
        assert!(summary.users_changed);
        assert!(store.take_users_changed());
        // La marca se consume una sola vez
        assert!(!store.take_users_changed());

        store.commit(vec![Mutation::SetCart { user_id: Uuid::new_v4(), items: Vec::new() }]).unwrap();
        assert!(!store.take_users_changed());
    }

    #[test]
    fn test_notifications_are_prepended() {
        let mut store = AppStore::new(Vec::new());
        let user = Uuid::new_v4();
        let first = Notification::new(user, "Uno", "1", NotificationType::Info);
        let second = Notification::new(user, "Dos", "2", NotificationType::Success);

        store.commit(vec![Mutation::PushNotification(first)]).unwrap();
        store.commit(vec![Mutation::PushNotification(second)]).unwrap();

        let titles: Vec<_> = store.notifications_for(user).map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["Dos", "Uno"]);
    }

    #[test]
    fn test_empty_cart_is_removed() {
        let mut store = AppStore::new(Vec::new());
        let user = Uuid::new_v4();

        store
            .commit(vec![Mutation::SetCart { user_id: user, items: Vec::new() }])
            .unwrap();
        assert!(store.cart(user).is_empty());
    }
}
