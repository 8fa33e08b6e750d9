//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;

use crate::config::{AppState, Config};

#[tokio::main]
async fn main() {
    // RUST_LOG controla o nível; sem ele, "info"
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Sem configuração válida não arrancamos
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuração inválida: {}", e);
            std::process::exit(1);
        }
    };

    let (app_state, db_pool) = match AppState::connect(&config).await {
        Ok(connected) => connected,
        Err(e) => {
            tracing::error!("❌ Falha ao inicializar o estado da aplicação: {:#}", e);
            std::process::exit(1);
        }
    };

    // Faz o app rodar as migrações do SQLx na inicialização
    if let Err(e) = sqlx::migrate!().run(&db_pool).await {
        tracing::error!("❌ Falha ao rodar as migrações do banco de dados: {}", e);
        std::process::exit(1);
    }
    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = routes::build_router(app_state);

    let listener = match TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("❌ Falha ao iniciar o listener TCP em {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("🚀 Servidor escutando em {}", config.bind_addr);
    tracing::info!("📚 Documentação em http://{}/swagger-ui", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Erro no servidor Axum: {}", e);
        std::process::exit(1);
    }
}
