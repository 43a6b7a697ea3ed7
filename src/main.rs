mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::connection::mask_database_url;
use database::DatabaseConnection;
use middleware::cors::cors_layer;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Garagem Inteligente - API");
    info!("============================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };
    if let Ok(url) = std::env::var("DATABASE_URL") {
        info!("✅ PostgreSQL conectado: {}", mask_database_url(&url));
    }

    let pool = db_connection.pool().clone();
    let config = EnvironmentConfig::default();
    if config.is_development() {
        info!("🛠️ Ejecutando en modo desarrollo");
    }

    let cors = cors_layer(&config);

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/auth", routes::auth_routes::create_auth_router(app_state.clone()))
        .nest(
            "/api/garagem",
            routes::garage_routes::create_garage_router(app_state.clone()),
        )
        .nest("/api/public", routes::public_routes::create_public_router())
        .layer(cors)
        .with_state(app_state);

    // Puerto del servidor
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("🔐 Endpoints - Auth:");
    info!("   POST /api/auth/register - Criar conta");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/auth/me - Perfil autenticado");
    info!("🚗 Endpoints - Garagem:");
    info!("   POST /api/garagem - Adicionar veículo");
    info!("   GET  /api/garagem - Listar veículos");
    info!("   GET  /api/garagem/:id - Obter veículo");
    info!("   PUT  /api/garagem/:id - Atualizar veículo");
    info!("   DELETE /api/garagem/:id - Remover veículo");
    info!("   POST /api/garagem/:id/acoes - Executar ação (ligar, acelerar, turbo...)");
    info!("🔧 Endpoints - Manutenções e viagens:");
    info!("   POST /api/garagem/:id/manutencoes - Registrar manutenção");
    info!("   GET  /api/garagem/:id/manutencoes - Histórico + agendadas");
    info!("   DELETE /api/garagem/:id/manutencoes/:record_id - Remover registro");
    info!("   POST /api/garagem/:id/viagens - Registrar viagem");
    info!("   GET  /api/garagem/:id/viagens - Listar viagens");
    info!("   DELETE /api/garagem/:id/viagens/:trip_id - Remover viagem");
    info!("🌤️ Endpoints públicos:");
    info!("   GET  /api/public/dicas - Dicas de manutenção (?tipo=)");
    info!("   GET  /api/public/destaques - Veículos em destaque");
    info!("   GET  /api/public/tempo/:cidade - Previsão do tempo");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                anyhow::Error::from(e)
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Garagem Inteligente API funcionando!",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
