// src/db/dashboard_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::{common::error::AppError, models::product::Product};

// COUNT(*) OVER () é calculado antes do LIMIT: cada linha traz o total completo
const LOW_STOCK: &str = r#"
    SELECT p.*, COUNT(*) OVER () AS total_low_stock
    FROM products p
    WHERE p.current_stock <= p.min_stock
    ORDER BY p.name ASC, p.id ASC
    LIMIT $1
"#;

#[derive(Debug, FromRow)]
struct LowStockRow {
    #[sqlx(flatten)]
    product: Product,
    total_low_stock: i64,
}

// Sem linhas (com limite >= 1) não há produtos em stock baixo
fn split_total(rows: Vec<LowStockRow>) -> (Vec<Product>, i64) {
    let total = rows.first().map(|row| row.total_low_stock).unwrap_or(0);
    let products = rows.into_iter().map(|row| row.product).collect();
    (products, total)
}

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_products(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    // Lista limitada (por nome) + total sem limite, numa só query (mesmo snapshot)
    pub async fn low_stock_products(&self, limit: i64) -> Result<(Vec<Product>, i64), AppError> {
        let rows = sqlx::query_as::<_, LowStockRow>(LOW_STOCK)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(split_total(rows))
    }

    /// Movimentos com `start <= timestamp < end`.
    pub async fn count_movements_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM movements WHERE "timestamp" >= $1 AND "timestamp" < $2"#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
