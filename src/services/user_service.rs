// src/services/user_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{common::error::AppError, db::InventoryStore, models::user::User};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn InventoryStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.store.list_users().await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.store.find_user(id).await?.ok_or(AppError::UserNotFound)
    }

    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, AppError> {
        self.store.create_user(name.trim(), &email.trim().to_lowercase()).await
    }

    pub async fn update_user(&self, id: Uuid, name: &str, email: &str) -> Result<User, AppError> {
        self.store
            .update_user(id, name.trim(), &email.trim().to_lowercase())
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_user(id).await? {
            return Err(AppError::UserNotFound);
        }
        tracing::info!("Utilizador {} eliminado", id);
        Ok(())
    }
}
