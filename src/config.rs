// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use thiserror::Error;

use crate::{
    db::{InventoryStore, PgStore},
    services::{DashboardService, LedgerService, ProductService, UserService},
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("a variável de ambiente {0} deve ser definida")]
    Missing(&'static str),

    #[error("valor inválido em {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

// Configuração lida do ambiente (e do .env, se existir)
#[derive(Debug, Clone)]
pub struct Config {
    pub store_url: String,
    pub store_access_key: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let store_url = required("STORE_URL")?;
        let store_access_key = required("STORE_ACCESS_KEY")?;

        // Falha já aqui em vez de na primeira ligação
        PgConnectOptions::from_str(&store_url).map_err(|e| ConfigError::Invalid {
            var: "STORE_URL",
            reason: e.to_string(),
        })?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let max_connections = match lookup("STORE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    var: "STORE_MAX_CONNECTIONS",
                    reason: format!("'{raw}' não é um inteiro positivo"),
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            store_url,
            store_access_key,
            bind_addr,
            max_connections,
        })
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let options = PgConnectOptions::from_str(&self.store_url).map_err(|e| ConfigError::Invalid {
            var: "STORE_URL",
            reason: e.to_string(),
        })?;
        Ok(options.password(&self.store_access_key))
    }
}

#[derive(Clone)]
pub struct AppState {
    pub ledger_service: LedgerService,
    pub dashboard_service: DashboardService,
    pub product_service: ProductService,
    pub user_service: UserService,
}

impl AppState {
    pub async fn connect(config: &Config) -> anyhow::Result<(Self, PgPool)> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(config.connect_options()?)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let store: Arc<dyn InventoryStore> = Arc::new(PgStore::new(db_pool.clone()));
        Ok((Self::from_store(store), db_pool))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_store(store: Arc<dyn InventoryStore>) -> Self {
        Self {
            ledger_service: LedgerService::new(store.clone()),
            dashboard_service: DashboardService::new(store.clone()),
            product_service: ProductService::new(store.clone()),
            user_service: UserService::new(store),
        }
    }
}
