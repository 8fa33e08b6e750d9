// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::{
    common::error::AppError,
    db::InventoryStore,
    models::{
        dashboard::{DashboardSummary, LowStockReport},
        movement::MovementView,
    },
    services::validate_limit,
};

// Tamanho das listas do resumo (alertas e últimos movimentos)
pub const SUMMARY_LIST_LIMIT: i64 = 5;

/// Limites `[início, fim)` do dia local `day`, em UTC.
///
/// O fim é a meia-noite do dia seguinte, por isso 23:59:59 ainda conta.
pub fn local_day_bounds(day: NaiveDate) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let next_day = day
        .succ_opt()
        .ok_or_else(|| anyhow::anyhow!("data fora do intervalo: {day}"))?;
    Ok((local_midnight(day), local_midnight(next_day)))
}

fn local_midnight(day: NaiveDate) -> DateTime<Utc> {
    let naive = day.and_time(chrono::NaiveTime::MIN);
    // Num salto de hora de verão a meia-noite pode não existir: usa-se o instante UTC equivalente
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

// Qualquer falha de leitura vira um único DataUnavailableError
fn unavailable(e: AppError) -> AppError {
    match e {
        AppError::DataUnavailableError(_) => e,
        other => {
            tracing::error!("🔥 Falha ao ler dados do dashboard: {}", other);
            AppError::DataUnavailableError(other.to_string())
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    store: Arc<dyn InventoryStore>,
}

impl DashboardService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub async fn count_products(&self) -> Result<i64, AppError> {
        self.store.count_products().await.map_err(unavailable)
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.store.count_users().await.map_err(unavailable)
    }

    pub async fn low_stock_products(&self, limit: i64) -> Result<LowStockReport, AppError> {
        let limit = validate_limit(limit)?;
        let (products, total) = self
            .store
            .low_stock_products(limit)
            .await
            .map_err(unavailable)?;
        Ok(LowStockReport { products, total })
    }

    pub async fn count_movements_today(&self) -> Result<i64, AppError> {
        self.count_movements_on(Local::now().date_naive()).await
    }

    pub async fn count_movements_on(&self, day: NaiveDate) -> Result<i64, AppError> {
        let (start, end) = local_day_bounds(day)?;
        self.store
            .count_movements_between(start, end)
            .await
            .map_err(unavailable)
    }

    pub async fn recent_movements(&self, limit: i64) -> Result<Vec<MovementView>, AppError> {
        let limit = validate_limit(limit)?;
        self.store.recent_movements(limit).await.map_err(unavailable)
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary, AppError> {
        self.get_summary_for_day(Local::now().date_naive()).await
    }

    /// Todas as leituras correm em paralelo; se uma falhar, falha o resumo inteiro.
    pub async fn get_summary_for_day(&self, day: NaiveDate) -> Result<DashboardSummary, AppError> {
        let (total_products, low_stock, total_users, movements_today, recent_movements) = tokio::try_join!(
            self.count_products(),
            self.low_stock_products(SUMMARY_LIST_LIMIT),
            self.count_users(),
            self.count_movements_on(day),
            self.recent_movements(SUMMARY_LIST_LIMIT),
        )?;

        Ok(DashboardSummary {
            total_products,
            low_stock_count: low_stock.total,
            total_users,
            movements_today,
            low_stock_products: low_stock.products,
            recent_movements,
        })
    }
}
