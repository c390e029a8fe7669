//! Listados de rentas, contratos y notificaciones

use uuid::Uuid;

use crate::dto::contract_dto::ContractQuery;
use crate::dto::rental_dto::{RentalQuery, RentalView};
use crate::models::{Contract, Notification, Rental, RentalStatus, ReservationType};
use crate::store::{AppStore, Mutation};
use crate::utils::errors::{forbidden_error, not_found_error, AppResult};

fn in_view(rental: &Rental, view: RentalView) -> bool {
    match view {
        RentalView::PreReservations => {
            rental.reservation_type == ReservationType::PreReservado
                && rental.status != RentalStatus::Cancelada
        }
        RentalView::Confirmed => {
            rental.reservation_type == ReservationType::Reservado
                && rental.status == RentalStatus::Pendiente
                && !rental.contract_signed
        }
        RentalView::All => true,
    }
}

fn matches_search(store: &AppStore, rental: &Rental, term: &str) -> bool {
    let vehicle = store.vehicle(rental.vehicle_id);
    let user = store.user(rental.user_id);

    rental.registration_number.to_lowercase().contains(term)
        || vehicle.map_or(false, |v| {
            v.brand.to_lowercase().contains(term) || v.model.to_lowercase().contains(term)
        })
        || user.map_or(false, |u| u.name.to_lowercase().contains(term))
        || rental.customer_name.to_lowercase().contains(term)
        || rental.customer_email.to_lowercase().contains(term)
}

pub fn list_rentals(store: &AppStore, query: &RentalQuery) -> Vec<Rental> {
    let term = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    store
        .rentals()
        .iter()
        .filter(|r| in_view(r, query.view))
        .filter(|r| query.status.map_or(true, |s| r.status == s))
        .filter(|r| term.as_deref().map_or(true, |t| matches_search(store, r, t)))
        .cloned()
        .collect()
}

pub fn get_rental(store: &AppStore, id: Uuid) -> AppResult<Rental> {
    store
        .rental(id)
        .cloned()
        .ok_or_else(|| not_found_error("Renta", id))
}

pub fn list_contracts(store: &AppStore, query: &ContractQuery) -> Vec<Contract> {
    store
        .contracts()
        .iter()
        .filter(|c| query.status.map_or(true, |s| c.status == s))
        .cloned()
        .collect()
}

pub fn get_contract(store: &AppStore, id: Uuid) -> AppResult<Contract> {
    store
        .contract(id)
        .cloned()
        .ok_or_else(|| not_found_error("Contrato", id))
}

/// Notificaciones del usuario, la más reciente primero
pub fn list_notifications(store: &AppStore, user_id: Uuid, unread_only: bool) -> Vec<Notification> {
    store
        .notifications_for(user_id)
        .filter(|n| !unread_only || !n.read)
        .cloned()
        .collect()
}

/// Marca una notificación propia como leída
pub fn mark_notification_read(store: &mut AppStore, user_id: Uuid, id: Uuid) -> AppResult<Notification> {
    let notification = store
        .notifications()
        .iter()
        .find(|n| n.id == id)
        .cloned()
        .ok_or_else(|| not_found_error("Notificación", id))?;

    if notification.user_id != user_id {
        return Err(forbidden_error("La notificación pertenece a otro usuario"));
    }

    store.commit(vec![Mutation::MarkNotificationRead(id)])?;
    Ok(Notification {
        read: true,
        ..notification
    })
}

/// Marca como leídas todas las notificaciones pendientes del usuario en un
/// solo commit. Devuelve cuántas cambiaron.
pub fn mark_all_notifications_read(store: &mut AppStore, user_id: Uuid) -> AppResult<usize> {
    let mutations: Vec<Mutation> = store
        .notifications_for(user_id)
        .filter(|n| !n.read)
        .map(|n| Mutation::MarkNotificationRead(n.id))
        .collect();

    let updated = mutations.len();
    if updated > 0 {
        store.commit(mutations)?;
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContractStatus, NotificationType};
    use crate::store::seed::{mock_users, rental_id, user_id};
    use crate::utils::errors::AppError;

    fn registrations(rentals: &[Rental]) -> Vec<&str> {
        rentals.iter().map(|r| r.registration_number.as_str()).collect()
    }

    #[test]
    fn test_rental_views() {
        let mut store = AppStore::seeded(mock_users());
        let mut confirmed = store.rental(rental_id(1)).cloned().unwrap();
        confirmed.id = Uuid::new_v4();
        confirmed.registration_number = "RNT-2025-0100".to_string();
        confirmed.status = RentalStatus::Pendiente;
        confirmed.contract_signed = false;
        store.commit(vec![Mutation::PutRental(confirmed)]).unwrap();

        let list = |view| {
            list_rentals(&store, &RentalQuery { view, search: None, status: None })
        };

        assert_eq!(registrations(&list(RentalView::PreReservations)), vec!["PRE-2024-0002"]);
        assert_eq!(registrations(&list(RentalView::Confirmed)), vec!["RNT-2025-0100"]);
        assert_eq!(list(RentalView::All).len(), 3);
    }

    #[test]
    fn test_rental_search() {
        let store = AppStore::seeded(mock_users());
        let search = |term: &str| {
            let query = RentalQuery {
                view: RentalView::All,
                search: Some(term.to_string()),
                status: None,
            };
            list_rentals(&store, &query)
        };

        assert_eq!(registrations(&search("corolla")), vec!["RNT-2024-0001"]);
        assert_eq!(registrations(&search("MARÍA")), vec!["PRE-2024-0002"]);
        assert_eq!(registrations(&search("juan.perez@")), vec!["RNT-2024-0001"]);
        assert_eq!(registrations(&search("pre-2024")), vec!["PRE-2024-0002"]);
        assert!(search("inexistente").is_empty());
    }

    #[test]
    fn test_rental_status_filter() {
        let store = AppStore::seeded(mock_users());
        let by_status = |status| {
            let query = RentalQuery {
                view: RentalView::All,
                search: None,
                status: Some(status),
            };
            list_rentals(&store, &query)
        };

        assert_eq!(registrations(&by_status(RentalStatus::Activa)), vec!["RNT-2024-0001"]);
        assert_eq!(registrations(&by_status(RentalStatus::Pendiente)), vec!["PRE-2024-0002"]);
        assert!(by_status(RentalStatus::Completada).is_empty());
    }

    #[test]
    fn test_mark_all_notifications_read() {
        let mut store = AppStore::seeded(mock_users());
        let owner = user_id(2);
        let other = Notification::new(user_id(1), "Hola", "Mensaje", NotificationType::Info);
        store.commit(vec![Mutation::PushNotification(other)]).unwrap();

        assert_eq!(mark_all_notifications_read(&mut store, owner).unwrap(), 2);
        assert!(list_notifications(&store, owner, true).is_empty());
        // Las notificaciones de otros usuarios no cambian
        assert_eq!(list_notifications(&store, user_id(1), true).len(), 1);
        // Sin pendientes no hay nada que marcar
        assert_eq!(mark_all_notifications_read(&mut store, owner).unwrap(), 0);
    }

    #[test]
    fn test_unknown_rental_and_contract() {
        let store = AppStore::seeded(mock_users());
        assert!(matches!(get_rental(&store, Uuid::new_v4()), Err(AppError::NotFound(_))));
        assert!(matches!(get_contract(&store, Uuid::new_v4()), Err(AppError::NotFound(_))));
        assert!(list_contracts(&store, &ContractQuery { status: Some(ContractStatus::Activo) }).is_empty());
    }

    #[test]
    fn test_notifications_for_user() {
        let mut store = AppStore::seeded(mock_users());
        let owner = user_id(2);

        assert_eq!(list_notifications(&store, owner, false).len(), 3);
        let unread = list_notifications(&store, owner, true);
        assert_eq!(unread.len(), 2);
        assert!(list_notifications(&store, user_id(1), false).is_empty());

        let read = mark_notification_read(&mut store, owner, unread[0].id).unwrap();
        assert!(read.read);
        assert_eq!(list_notifications(&store, owner, true).len(), 1);
    }

    #[test]
    fn test_cannot_mark_foreign_notification() {
        let mut store = AppStore::seeded(mock_users());
        let foreign = Notification::new(user_id(2), "Hola", "Mensaje", NotificationType::Info);
        let id = foreign.id;
        store.commit(vec![Mutation::PushNotification(foreign)]).unwrap();

        assert!(matches!(
            mark_notification_read(&mut store, user_id(1), id),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            mark_notification_read(&mut store, user_id(1), Uuid::new_v4()),
            Err(AppError::NotFound(_))
        ));
    }
}
