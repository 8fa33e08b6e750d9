// src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Unidade de medida ---
// Guardada no banco como 'unidades' / 'caixas' (o mesmo texto que o cliente mostra)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "unit_of_measure")]
pub enum UnitOfMeasure {
    #[default]
    #[sqlx(rename = "unidades")]
    #[serde(rename = "unidades")]
    Units,
    #[sqlx(rename = "caixas")]
    #[serde(rename = "caixas")]
    Boxes,
}

// --- Produto ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    #[schema(example = "SK-001")]
    pub code: String,
    #[schema(example = "Creme Hidratante")]
    pub name: String,
    pub description: String,
    #[schema(example = "Skincare")]
    pub category: String,
    pub unit: UnitOfMeasure,

    // Só o livro-razão altera este campo depois da criação
    #[schema(example = 12)]
    pub current_stock: i32,
    #[schema(example = 5)]
    pub min_stock: i32,
    #[schema(example = 9.99)]
    pub unit_price: Decimal,
    #[schema(example = "Prateleira A3")]
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock
    }
}

pub(crate) fn validate_price(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O preço não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub unit: UnitOfMeasure,

    // Stock inicial: ponto de partida do livro-razão deste produto
    #[validate(range(min = 0, message = "O stock inicial não pode ser negativo."))]
    #[serde(default)]
    pub initial_stock: i32,

    #[validate(range(min = 0, message = "O stock mínimo não pode ser negativo."))]
    #[serde(default)]
    pub min_stock: i32,

    #[validate(custom(function = "validate_price"))]
    #[serde(default)]
    pub unit_price: Decimal,

    #[serde(default)]
    pub location: String,
}

// ---
// Payload: UpdateProduct
// ---
// Não existe campo de stock: a edição só mexe nos dados descritivos e no limite mínimo.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub unit: UnitOfMeasure,

    #[validate(range(min = 0, message = "O stock mínimo não pode ser negativo."))]
    #[serde(default)]
    pub min_stock: i32,

    #[validate(custom(function = "validate_price"))]
    #[serde(default)]
    pub unit_price: Decimal,

    #[serde(default)]
    pub location: String,
}
