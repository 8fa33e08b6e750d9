use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        movement::{Movement, MovementDraft, MovementView},
        product::{CreateProductPayload, Product, UpdateProductPayload},
        user::User,
    },
};

pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod movement_repo;
pub use movement_repo::MovementRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod pg_store;
pub use pg_store::PgStore;

#[cfg(test)]
pub mod memory_store;

/// Acesso aos dados partilhado por todos os serviços.
///
/// `record_movement` é a única operação com várias escritas: lê o stock do
/// produto, aplica o `MovementDraft`, insere o movimento e grava o novo stock
/// de forma atómica. Movimentos concorrentes no mesmo produto ficam serializados.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    // --- Produtos ---
    async fn list_products(&self) -> Result<Vec<Product>, AppError>;
    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError>;
    async fn create_product(&self, input: &CreateProductPayload) -> Result<Product, AppError>;
    async fn update_product(
        &self,
        id: Uuid,
        input: &UpdateProductPayload,
    ) -> Result<Option<Product>, AppError>;
    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError>;

    // --- Utilizadores ---
    async fn list_users(&self) -> Result<Vec<User>, AppError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn create_user(&self, name: &str, email: &str) -> Result<User, AppError>;
    async fn update_user(&self, id: Uuid, name: &str, email: &str) -> Result<Option<User>, AppError>;
    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError>;

    // --- Movimentos ---
    async fn record_movement(&self, draft: &MovementDraft) -> Result<Movement, AppError>;
    async fn recent_movements(&self, limit: i64) -> Result<Vec<MovementView>, AppError>;

    // --- Leituras agregadas ---
    async fn count_products(&self) -> Result<i64, AppError>;
    async fn count_users(&self) -> Result<i64, AppError>;
    async fn low_stock_products(&self, limit: i64) -> Result<(Vec<Product>, i64), AppError>;
    async fn count_movements_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, AppError>;
}
