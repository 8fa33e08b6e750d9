// src/common/in_flight.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::common::error::AppError;

/// Registo dos movimentos a decorrer, por (utilizador, produto).
///
/// Um segundo pedido igual enquanto o primeiro não termina é recusado.
#[derive(Clone, Default)]
pub struct InFlightSubmissions {
    active: Arc<Mutex<HashSet<(Uuid, Uuid)>>>,
}

impl InFlightSubmissions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self, user_id: Uuid, product_id: Uuid) -> Result<InFlightGuard, AppError> {
        let key = (user_id, product_id);
        let mut active = self
            .active
            .lock()
            .map_err(|_| anyhow::anyhow!("lock de submissões envenenado"))?;

        if !active.insert(key) {
            return Err(AppError::SubmissionInFlight);
        }

        Ok(InFlightGuard {
            active: Arc::clone(&self.active),
            key,
        })
    }
}

// Liberta a chave quando o pedido termina (com sucesso ou erro)
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<(Uuid, Uuid)>>>,
    key: (Uuid, Uuid),
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut active) = self.active.lock() {
            active.remove(&self.key);
        }
    }
}
