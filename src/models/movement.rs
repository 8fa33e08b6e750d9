// src/models/movement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::common::error::AppError;

// Texto mostrado quando o produto/utilizador de um movimento não é encontrado
pub const MISSING_REFERENCE_LABEL: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_kind", rename_all = "lowercase")] // Banco
#[serde(rename_all = "lowercase")] // JSON
pub enum MovementKind {
    Entrada, // entrada de stock
    Saida,   // saída de stock
}

// --- MOVIMENTO (livro-razão, só acrescenta) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    pub stock_before: i32,
    pub stock_after: i32,
    pub timestamp: DateTime<Utc>,
    pub notes: String,
}

/// Um pedido de movimento já com produto e utilizador escolhidos e a quantidade validada.
///
/// O store aplica-o com `apply_to` sobre o stock lido dentro da própria transação.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDraft {
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    pub notes: String,
}

impl MovementDraft {
    /// Calcula o novo stock a partir do stock atual.
    pub fn apply_to(&self, current_stock: i32) -> Result<i32, AppError> {
        match self.kind {
            MovementKind::Entrada => current_stock
                .checked_add(self.quantity)
                .ok_or(AppError::InvalidQuantity),
            MovementKind::Saida => {
                if self.quantity > current_stock {
                    return Err(AppError::InsufficientStock {
                        available: current_stock,
                        requested: self.quantity,
                    });
                }
                Ok(current_stock - self.quantity)
            }
        }
    }
}

// Linha do histórico com os dados de exibição do produto e do utilizador (LEFT JOIN)
#[derive(Debug, Clone, FromRow)]
pub struct MovementRow {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub kind: MovementKind,
    pub quantity: i32,
    pub stock_before: i32,
    pub stock_after: i32,
    pub timestamp: DateTime<Utc>,
    pub notes: String,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub product_unit: Option<String>,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementView {
    pub id: Uuid,
    pub product_id: Uuid,
    #[schema(example = "Creme Hidratante")]
    pub product_name: String,
    #[schema(example = "SK-001")]
    pub product_code: String,
    #[schema(example = "unidades")]
    pub product_unit: String,
    pub user_id: Uuid,
    #[schema(example = "Ana Costa")]
    pub user_name: String,
    pub kind: MovementKind,
    pub quantity: i32,
    pub stock_before: i32,
    pub stock_after: i32,
    pub timestamp: DateTime<Utc>,
    pub notes: String,
}

impl From<MovementRow> for MovementView {
    fn from(row: MovementRow) -> Self {
        let label = |value: Option<String>| value.unwrap_or_else(|| MISSING_REFERENCE_LABEL.to_string());
        Self {
            id: row.id,
            product_id: row.product_id,
            product_name: label(row.product_name),
            product_code: label(row.product_code),
            product_unit: label(row.product_unit),
            user_id: row.user_id,
            user_name: label(row.user_name),
            kind: row.kind,
            quantity: row.quantity,
            stock_before: row.stock_before,
            stock_after: row.stock_after,
            timestamp: row.timestamp,
            notes: row.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(kind: MovementKind, quantity: i32) -> MovementDraft {
        MovementDraft {
            product_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind,
            quantity,
            notes: String::new(),
        }
    }

    #[test]
    fn entrada_adds_to_current_stock() {
        assert_eq!(draft(MovementKind::Entrada, 3).apply_to(5).unwrap(), 8);
    }

    #[test]
    fn saida_subtracts_and_may_reach_zero() {
        assert_eq!(draft(MovementKind::Saida, 5).apply_to(5).unwrap(), 0);
    }

    #[test]
    fn saida_above_stock_is_insufficient() {
        let err = draft(MovementKind::Saida, 10).apply_to(5).unwrap_err();
        assert!(matches!(
            err,
            AppError::InsufficientStock { available: 5, requested: 10 }
        ));
    }

    #[test]
    fn missing_references_degrade_to_placeholder() {
        let row = MovementRow {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: MovementKind::Saida,
            quantity: 1,
            stock_before: 2,
            stock_after: 1,
            timestamp: Utc::now(),
            notes: String::new(),
            product_name: None,
            product_code: Some("SK-9".into()),
            product_unit: None,
            user_name: None,
        };

        let view = MovementView::from(row);
        assert_eq!(view.product_name, MISSING_REFERENCE_LABEL);
        assert_eq!(view.product_code, "SK-9");
        assert_eq!(view.user_name, MISSING_REFERENCE_LABEL);
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MovementKind::Saida).unwrap(), "\"saida\"");
    }
}
