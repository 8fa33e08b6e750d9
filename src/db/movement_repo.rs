// src/db/movement_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::movement::{Movement, MovementDraft, MovementRow, MovementView},
};

// O instante é tirado já com a linha do produto bloqueada (clock_timestamp, não NOW()),
// por isso a ordem por "timestamp" segue a ordem em que o stock mudou.
const INSERT_MOVEMENT: &str = r#"
    INSERT INTO movements (product_id, user_id, kind, quantity, stock_before, stock_after, notes, "timestamp")
    VALUES ($1, $2, $3, $4, $5, $6, $7, clock_timestamp())
    RETURNING *
"#;

const LIST_RECENT: &str = r#"
    SELECT
        m.*,
        p.name AS product_name,
        p.code AS product_code,
        p.unit::text AS product_unit,
        u.name AS user_name
    FROM movements m
    LEFT JOIN products p ON m.product_id = p.id
    LEFT JOIN users u ON m.user_id = u.id
    ORDER BY m."timestamp" DESC, m.seq DESC
    LIMIT $1
"#;

#[derive(Clone)]
pub struct MovementRepository {
    pool: PgPool,
}

impl MovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Regista um movimento no livro-razão (auditoria). Nunca há UPDATE nem DELETE.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        draft: &MovementDraft,
        stock_before: i32,
        stock_after: i32,
    ) -> Result<Movement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, Movement>(INSERT_MOVEMENT)
        .bind(draft.product_id)
        .bind(draft.user_id)
        .bind(draft.kind)
        .bind(draft.quantity)
        .bind(stock_before)
        .bind(stock_after)
        .bind(&draft.notes)
        .fetch_one(executor)
        .await?;

        Ok(movement)
    }

    // Mais recentes primeiro, com nome/código do produto e nome do utilizador
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<MovementView>, AppError> {
        let rows = sqlx::query_as::<_, MovementRow>(LIST_RECENT)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MovementView::from).collect())
    }
}
