use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn, Level};

use rentcar_backend::config::EnvironmentConfig;
use rentcar_backend::storage::{build_storage, user_snapshots};
use rentcar_backend::store::AppStore;
use rentcar_backend::{create_app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env();

    // Configurar logging
    let level = Level::from_str(&config.log_level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚗 XYZ RentCar - API de alquiler de vehículos");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    let snapshots = build_storage(&config).await.map_err(|e| {
        error!("❌ Error inicializando el almacenamiento de snapshots: {}", e);
        e
    })?;

    let users = user_snapshots::load_users(snapshots.as_ref()).await;
    if let Some(session) = user_snapshots::load_session(snapshots.as_ref()).await {
        info!("🔐 Sesión guardada de {}", session.username);
    }

    let store = if config.seed_mock_data {
        info!("🌱 Cargando catálogo de demostración");
        AppStore::seeded(users)
    } else {
        AppStore::new(users)
    };

    if config.is_production() && config.jwt_secret == EnvironmentConfig::default().jwt_secret {
        warn!("⚠️ JWT_SECRET por defecto en producción");
    }
    if config.is_development() {
        info!("🧪 Modo desarrollo: latencias simuladas {}ms (auth) / {}ms (pago)", config.auth_delay_ms, config.payment_delay_ms);
    }

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::new(store, config, snapshots);
    let app = create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("🔑 Auth: POST /api/auth/login, /api/auth/register, /api/auth/logout; GET|PUT /api/auth/me");
    info!("🚙 Vehículos: /api/vehicles, /api/vehicles/categories, /api/vehicles/:id/{{status,availability,recommendations}}");
    info!("📅 Rentas: /api/rentals, /api/rentals/:id/cancel");
    info!("📄 Contratos: /api/contracts, /api/contracts/:id/{{extend,finish,cancel,reassign}}");
    info!("👥 Usuarios: /api/users, /api/notifications");
    info!("🛒 Carrito: /api/cart, /api/cart/checkout");
    info!("📊 Reportes: /api/reports/summary");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
