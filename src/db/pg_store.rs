// src/db/pg_store.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        DashboardRepository, InventoryStore, MovementRepository, ProductRepository,
        UserRepository,
    },
    models::{
        movement::{Movement, MovementDraft, MovementView},
        product::{CreateProductPayload, Product, UpdateProductPayload},
        user::User,
    },
};

// Implementação Postgres: junta os repositórios e abre a transação do movimento
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    products: ProductRepository,
    users: UserRepository,
    movements: MovementRepository,
    dashboard: DashboardRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            movements: MovementRepository::new(pool.clone()),
            dashboard: DashboardRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl InventoryStore for PgStore {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.products.get_all().await
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        self.products.find_by_id(id).await
    }

    async fn create_product(&self, input: &CreateProductPayload) -> Result<Product, AppError> {
        self.products.create(input).await
    }

    async fn update_product(
        &self,
        id: Uuid,
        input: &UpdateProductPayload,
    ) -> Result<Option<Product>, AppError> {
        self.products.update(id, input).await
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError> {
        self.products.delete(id).await
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.get_all().await
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.users.find_by_id(id).await
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, AppError> {
        self.users.create(name, email).await
    }

    async fn update_user(&self, id: Uuid, name: &str, email: &str) -> Result<Option<User>, AppError> {
        self.users.update(id, name, email).await
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        self.users.delete(id).await
    }

    async fn record_movement(&self, draft: &MovementDraft) -> Result<Movement, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. Lê o stock atual com a linha bloqueada (FOR UPDATE)
        let stock_before = self
            .products
            .get_stock_for_update(&mut *tx, draft.product_id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        // 2. O autor tem de existir
        if !self.users.exists(&mut *tx, draft.user_id).await? {
            return Err(AppError::UserNotFound);
        }

        // 3. Valida e calcula (saída acima do stock falha aqui, sem escritas)
        let stock_after = draft.apply_to(stock_before)?;

        // 4. Grava histórico + novo saldo
        let movement = self
            .movements
            .insert(&mut *tx, draft, stock_before, stock_after)
            .await?;
        self.products
            .set_stock(&mut *tx, draft.product_id, stock_after)
            .await?;

        tx.commit().await?;
        Ok(movement)
    }

    async fn recent_movements(&self, limit: i64) -> Result<Vec<MovementView>, AppError> {
        self.movements.list_recent(limit).await
    }

    async fn count_products(&self) -> Result<i64, AppError> {
        self.dashboard.count_products().await
    }

    async fn count_users(&self) -> Result<i64, AppError> {
        self.dashboard.count_users().await
    }

    async fn low_stock_products(&self, limit: i64) -> Result<(Vec<Product>, i64), AppError> {
        self.dashboard.low_stock_products(limit).await
    }

    async fn count_movements_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        self.dashboard.count_movements_between(start, end).await
    }
}
