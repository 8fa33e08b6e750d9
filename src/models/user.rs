// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Utilizador: o "autor" de cada movimento de stock
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Ana Costa")]
    pub name: String,
    #[schema(example = "ana@loja.pt")]
    pub email: String,
    // Atribuído pelo servidor, nunca alterado
    pub created_at: DateTime<Utc>,
}

// Usado tanto na criação como na edição
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
}
