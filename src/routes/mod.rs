//! Routers de la API
//!
//! Todas las rutas bajo `/api` salvo login, registro y health requieren un
//! token Bearer.

pub mod auth_routes;
pub mod cart_routes;
pub mod contract_routes;
pub mod rental_routes;
pub mod report_routes;
pub mod user_routes;
pub mod vehicle_routes;

use axum::{middleware, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth_middleware, cors_layer};
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/rentals", rental_routes::create_rental_router())
        .nest("/api/contracts", contract_routes::create_contract_router())
        .nest("/api/users", user_routes::create_user_router())
        .nest("/api/notifications", user_routes::create_notification_router())
        .nest("/api/cart", cart_routes::create_cart_router())
        .nest("/api/reports", report_routes::create_report_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .merge(protected)
        .layer(cors_layer(&state.config.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "xyz-rentcar-backend",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
