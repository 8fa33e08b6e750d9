// src/db/product_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::product::{CreateProductPayload, Product, UpdateProductPayload},
};

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leitura
    // ---

    pub async fn get_all(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    /// Lê o stock atual e bloqueia a linha até ao fim da transação.
    pub async fn get_stock_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<i32>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stock = sqlx::query_scalar::<_, i32>(
            "SELECT current_stock FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(stock)
    }

    // ---
    // Escrita
    // ---

    pub async fn create(&self, input: &CreateProductPayload) -> Result<Product, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (code, name, description, category, unit, current_stock, min_stock, unit_price, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.unit)
        .bind(input.initial_stock)
        .bind(input.min_stock)
        .bind(input.unit_price)
        .bind(&input.location)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    // current_stock fica de fora: só o livro-razão o altera
    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateProductPayload,
    ) -> Result<Option<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                code = $2,
                name = $3,
                description = $4,
                category = $5,
                unit = $6,
                min_stock = $7,
                unit_price = $8,
                location = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.category)
        .bind(input.unit)
        .bind(input.min_stock)
        .bind(input.unit_price)
        .bind(&input.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from_write)
    }

    pub async fn set_stock<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        new_stock: i32,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE products SET current_stock = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(new_stock)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Devolve `false` se o produto não existir.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from_write)?;
        Ok(result.rows_affected() > 0)
    }
}
