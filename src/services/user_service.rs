//! Administración de usuarios y perfil propio

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserQuery};
use crate::middleware::AuthenticatedUser;
use crate::models::{User, UserRole};
use crate::store::{AppStore, Mutation};
use crate::utils::errors::{
    bad_request_error, conflict_error, forbidden_error, not_found_error, AppResult,
};
use crate::utils::validation::validate_not_empty;

const ADMIN_ONLY_CREATE: &str = "Solo los administradores pueden agregar nuevos usuarios";

/// Usuarios sin contraseña, filtrados por texto y rol
pub fn list_users(store: &AppStore, query: &UserQuery) -> Vec<User> {
    let term = query
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    store
        .users()
        .iter()
        .filter(|u| query.role.map_or(true, |r| u.role == r))
        .filter(|u| match &term {
            Some(t) => {
                u.username.to_lowercase().contains(t)
                    || u.name.to_lowercase().contains(t)
                    || u.email.to_lowercase().contains(t)
            }
            None => true,
        })
        .map(User::without_password)
        .collect()
}

pub fn get_user(store: &AppStore, id: Uuid) -> AppResult<User> {
    store
        .user(id)
        .map(User::without_password)
        .ok_or_else(|| not_found_error("Usuario", id))
}

/// Comprobaciones previas al hash de la contraseña
pub fn check_create_request(actor: &AuthenticatedUser, request: &CreateUserRequest) -> AppResult<()> {
    actor.require_admin(ADMIN_ONLY_CREATE)?;

    [&request.username, &request.password, &request.name]
        .into_iter()
        .try_for_each(|field| validate_not_empty(field))
        .map_err(|_| bad_request_error("Usuario, contraseña y nombre son obligatorios"))
}

pub fn create_user(
    store: &mut AppStore,
    actor: &AuthenticatedUser,
    request: CreateUserRequest,
    password_hash: String,
    now: DateTime<Utc>,
) -> AppResult<User> {
    check_create_request(actor, &request)?;

    if store.user_by_username(request.username.trim()).is_some() {
        return Err(conflict_error(format!(
            "El usuario '{}' ya existe",
            request.username
        )));
    }

    let user = User {
        id: Uuid::new_v4(),
        username: request.username.trim().to_string(),
        password: Some(password_hash),
        email: request.email,
        name: request.name,
        phone: request.phone,
        role: request.role.unwrap_or(UserRole::Empleado),
        dni: request.dni,
        address: request.address,
        license_number: request.license_number,
        deposit_verified: false,
        deposit_amount: None,
        created_at: now,
    };

    store.commit(vec![Mutation::PutUser(user.clone())])?;
    info!("👤 Usuario {} creado por {}", user.username, actor.username);
    Ok(user.without_password())
}

/// Actualización parcial. `password_hash` ya viene calculado si el request
/// trae contraseña nueva. Con `allow_role = false` (perfil propio) el rol no se toca.
pub fn update_user(
    store: &mut AppStore,
    id: Uuid,
    request: UpdateUserRequest,
    password_hash: Option<String>,
    allow_role: bool,
) -> AppResult<User> {
    let mut user = store
        .user(id)
        .cloned()
        .ok_or_else(|| not_found_error("Usuario", id))?;

    if !allow_role && request.role.is_some_and(|r| r != user.role) {
        return Err(forbidden_error("No puedes cambiar tu propio rol"));
    }

    if let Some(hash) = password_hash {
        user.password = Some(hash);
    }
    if let Some(email) = request.email {
        user.email = email;
    }
    if let Some(name) = request.name {
        user.name = name;
    }
    if let Some(phone) = request.phone {
        user.phone = phone;
    }
    if let Some(role) = request.role {
        user.role = role;
    }
    if let Some(dni) = request.dni {
        user.dni = Some(dni);
    }
    if let Some(address) = request.address {
        user.address = Some(address);
    }
    if let Some(license) = request.license_number {
        user.license_number = Some(license);
    }
    if let Some(verified) = request.deposit_verified {
        user.deposit_verified = verified;
    }
    if let Some(amount) = request.deposit_amount {
        user.deposit_amount = Some(amount);
    }

    store.commit(vec![Mutation::PutUser(user.clone())])?;
    Ok(user.without_password())
}

pub fn delete_user(store: &mut AppStore, actor: &AuthenticatedUser, id: Uuid) -> AppResult<()> {
    actor.require_admin("Solo los administradores pueden eliminar usuarios")?;

    if actor.user_id == id {
        return Err(bad_request_error("No puedes eliminar tu propia cuenta"));
    }

    let user = store
        .user(id)
        .cloned()
        .ok_or_else(|| not_found_error("Usuario", id))?;

    store.commit(vec![Mutation::DeleteUser(id)])?;
    info!("🗑️ Usuario {} eliminado por {}", user.username, actor.username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::{mock_users, user_id};
    use crate::utils::errors::AppError;

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: user_id(1),
            username: "admin".to_string(),
            role: UserRole::Admin,
        }
    }

    fn employee(id: Uuid) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id,
            username: "ana".to_string(),
            role: UserRole::Empleado,
        }
    }

    fn request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            password: "secreto".to_string(),
            name: "Ana Gómez".to_string(),
            email: "ana@xyz.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_admin_creates_user_without_exposing_password() {
        let mut store = AppStore::new(mock_users());
        let user = create_user(&mut store, &admin(), request("ana"), "hash".to_string(), Utc::now()).unwrap();

        assert_eq!(user.role, UserRole::Empleado);
        assert!(user.password.is_none());
        assert_eq!(store.users().len(), 2);
        assert_eq!(store.user(user.id).unwrap().password.as_deref(), Some("hash"));
    }

    #[test]
    fn test_only_admins_create_users() {
        let mut store = AppStore::new(mock_users());
        let result = create_user(
            &mut store,
            &employee(Uuid::new_v4()),
            request("ana"),
            "hash".to_string(),
            Utc::now(),
        );

        match result {
            Err(AppError::Forbidden(message)) => assert_eq!(message, ADMIN_ONLY_CREATE),
            other => panic!("se esperaba Forbidden, se obtuvo {:?}", other),
        }
    }

    #[test]
    fn test_required_fields_and_duplicates() {
        let mut store = AppStore::new(mock_users());

        let mut missing = request("ana");
        missing.name = String::new();
        assert!(matches!(
            create_user(&mut store, &admin(), missing, "hash".to_string(), Utc::now()),
            Err(AppError::BadRequest(_))
        ));

        assert!(matches!(
            create_user(&mut store, &admin(), request("admin"), "hash".to_string(), Utc::now()),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_search_and_role_filter() {
        let mut store = AppStore::new(mock_users());
        create_user(&mut store, &admin(), request("ana"), "hash".to_string(), Utc::now()).unwrap();

        let query = UserQuery {
            search: Some("gómez".to_string()),
            role: None,
        };
        assert_eq!(list_users(&store, &query).len(), 1);

        let query = UserQuery {
            search: None,
            role: Some(UserRole::Admin),
        };
        let admins = list_users(&store, &query);
        assert_eq!(admins.len(), 1);
        assert!(admins[0].password.is_none());
    }

    #[test]
    fn test_profile_update_cannot_change_role() {
        let mut store = AppStore::new(mock_users());
        let user = create_user(&mut store, &admin(), request("ana"), "hash".to_string(), Utc::now()).unwrap();

        let change_role = UpdateUserRequest {
            role: Some(UserRole::Admin),
            ..Default::default()
        };
        assert!(matches!(
            update_user(&mut store, user.id, change_role, None, false),
            Err(AppError::Forbidden(_))
        ));

        let change_phone = UpdateUserRequest {
            phone: Some("8095551234".to_string()),
            ..Default::default()
        };
        let updated = update_user(&mut store, user.id, change_phone, Some("nuevo".to_string()), false).unwrap();
        assert_eq!(updated.phone, "8095551234");
        assert_eq!(updated.role, UserRole::Empleado);
        assert_eq!(store.user(user.id).unwrap().password.as_deref(), Some("nuevo"));
    }

    #[test]
    fn test_delete_user() {
        let mut store = AppStore::new(mock_users());
        let user = create_user(&mut store, &admin(), request("ana"), "hash".to_string(), Utc::now()).unwrap();

        assert!(matches!(
            delete_user(&mut store, &employee(user.id), user_id(1)),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            delete_user(&mut store, &admin(), user_id(1)),
            Err(AppError::BadRequest(_))
        ));

        delete_user(&mut store, &admin(), user.id).unwrap();
        assert!(store.user(user.id).is_none());
    }
}
