// src/services/ledger_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{error::AppError, in_flight::InFlightSubmissions},
    db::InventoryStore,
    models::movement::{Movement, MovementDraft, MovementKind, MovementView},
    services::validate_limit,
};

#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn InventoryStore>,
    in_flight: InFlightSubmissions,
}

impl LedgerService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self {
            store,
            in_flight: InFlightSubmissions::new(),
        }
    }

    // --- REGISTAR MOVIMENTO (ENTRADA / SAÍDA) ---
    pub async fn submit_movement(
        &self,
        product_id: Option<Uuid>,
        user_id: Option<Uuid>,
        kind: Option<MovementKind>,
        quantity: Option<i32>,
        notes: Option<&str>,
    ) -> Result<Movement, AppError> {
        // 1. Produto e utilizador escolhidos
        let (Some(product_id), Some(user_id)) = (product_id, user_id) else {
            return Err(AppError::MissingSelection);
        };

        // 2. Quantidade positiva (ainda sem tocar no store)
        let quantity = match quantity {
            Some(quantity) if quantity > 0 => quantity,
            _ => return Err(AppError::InvalidQuantity),
        };

        let Some(kind) = kind else {
            return Err(AppError::MissingKind);
        };

        let _guard = self.in_flight.acquire(user_id, product_id)?;

        let draft = MovementDraft {
            product_id,
            user_id,
            kind,
            quantity,
            notes: notes.unwrap_or_default().trim().to_string(),
        };

        // 3-5. Leitura fresca do stock, verificação e as duas escritas numa só transação
        match self.store.record_movement(&draft).await {
            Ok(movement) => {
                tracing::info!(
                    "📦 Movimento {:?} de {} no produto {}: {} -> {}",
                    movement.kind,
                    movement.quantity,
                    movement.product_id,
                    movement.stock_before,
                    movement.stock_after
                );
                Ok(movement)
            }
            Err(AppError::InsufficientStock { available, requested }) => {
                tracing::warn!(
                    "Saída recusada no produto {}: disponível {}, pedido {}",
                    product_id,
                    available,
                    requested
                );
                Err(AppError::InsufficientStock { available, requested })
            }
            Err(e) => Err(e),
        }
    }

    // Histórico (ecrã de movimentos)
    pub async fn list_movements(&self, limit: i64) -> Result<Vec<MovementView>, AppError> {
        let limit = validate_limit(limit)?;
        self.store.recent_movements(limit).await
    }
}
