// src/db/memory_store.rs

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryStore,
    models::{
        movement::{Movement, MovementDraft, MovementKind, MovementRow, MovementView},
        product::{CreateProductPayload, Product, UnitOfMeasure, UpdateProductPayload},
        user::User,
    },
};

#[derive(Default)]
struct State {
    products: HashMap<Uuid, Product>,
    users: HashMap<Uuid, User>,
    movements: Vec<Movement>,
}

/// Store em memória para os testes.
///
/// Um único `Mutex` faz o papel da transação: ler-validar-escrever de um
/// movimento acontece sem outro pedido pelo meio.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    calls: AtomicUsize,
    fail_reads: AtomicBool,
    movement_gate: Mutex<Option<Arc<MovementGate>>>,
}

/// Prende `record_movement` até `release` ser notificado.
#[derive(Default)]
pub struct MovementGate {
    pub entered: Notify,
    pub release: Notify,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de operações já pedidas ao store.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Faz falhar todas as leituras agregadas seguintes.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// A partir daqui cada `record_movement` avisa em `entered` e espera por `release`.
    pub fn hold_movements(&self) -> Arc<MovementGate> {
        let gate = Arc::new(MovementGate::default());
        *self.movement_gate.lock().unwrap_or_else(|p| p.into_inner()) = Some(gate.clone());
        gate
    }

    pub fn open_movements(&self) {
        *self.movement_gate.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }

    pub fn movements(&self) -> Vec<Movement> {
        self.lock().movements.clone()
    }

    // Acrescenta um movimento já feito (com data escolhida), sem passar pelo livro-razão
    pub fn seed_movement(&self, product_id: Uuid, user_id: Uuid, timestamp: DateTime<Utc>) {
        self.lock().movements.push(Movement {
            id: Uuid::new_v4(),
            product_id,
            user_id,
            kind: MovementKind::Entrada,
            quantity: 1,
            stock_before: 0,
            stock_after: 1,
            timestamp,
            notes: String::new(),
        });
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn enter_read(&self) -> Result<(), AppError> {
        self.enter();
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::PersistenceError(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

fn by_name<T>(items: &mut [T], name: impl Fn(&T) -> &str, id: impl Fn(&T) -> Uuid) {
    items.sort_by(|a, b| name(a).cmp(name(b)).then_with(|| id(a).cmp(&id(b))));
}

fn unit_label(unit: UnitOfMeasure) -> String {
    match unit {
        UnitOfMeasure::Units => "unidades".to_string(),
        UnitOfMeasure::Boxes => "caixas".to_string(),
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.enter_read()?;
        let mut products: Vec<Product> = self.lock().products.values().cloned().collect();
        by_name(&mut products, |p| p.name.as_str(), |p| p.id);
        Ok(products)
    }

    async fn find_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        self.enter_read()?;
        Ok(self.lock().products.get(&id).cloned())
    }

    async fn create_product(&self, input: &CreateProductPayload) -> Result<Product, AppError> {
        self.enter();
        let mut state = self.lock();
        if state.products.values().any(|p| p.code == input.code) {
            return Err(AppError::ProductCodeAlreadyExists);
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            code: input.code.clone(),
            name: input.name.clone(),
            description: input.description.clone(),
            category: input.category.clone(),
            unit: input.unit,
            current_stock: input.initial_stock,
            min_stock: input.min_stock,
            unit_price: input.unit_price,
            location: input.location.clone(),
            created_at: now,
            updated_at: now,
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: Uuid,
        input: &UpdateProductPayload,
    ) -> Result<Option<Product>, AppError> {
        self.enter();
        let mut state = self.lock();
        if state.products.values().any(|p| p.code == input.code && p.id != id) {
            return Err(AppError::ProductCodeAlreadyExists);
        }

        let Some(product) = state.products.get_mut(&id) else {
            return Ok(None);
        };
        product.code = input.code.clone();
        product.name = input.name.clone();
        product.description = input.description.clone();
        product.category = input.category.clone();
        product.unit = input.unit;
        product.min_stock = input.min_stock;
        product.unit_price = input.unit_price;
        product.location = input.location.clone();
        product.updated_at = Utc::now();
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError> {
        self.enter();
        let mut state = self.lock();
        if state.movements.iter().any(|m| m.product_id == id) {
            return Err(AppError::ReferencedByMovements);
        }
        Ok(state.products.remove(&id).is_some())
    }

    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.enter_read()?;
        let mut users: Vec<User> = self.lock().users.values().cloned().collect();
        by_name(&mut users, |u| u.name.as_str(), |u| u.id);
        Ok(users)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.enter_read()?;
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, AppError> {
        self.enter();
        let mut state = self.lock();
        if state.users.values().any(|u| u.email == email) {
            return Err(AppError::EmailAlreadyExists);
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, name: &str, email: &str) -> Result<Option<User>, AppError> {
        self.enter();
        let mut state = self.lock();
        if state.users.values().any(|u| u.email == email && u.id != id) {
            return Err(AppError::EmailAlreadyExists);
        }

        let Some(user) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        user.name = name.to_string();
        user.email = email.to_string();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AppError> {
        self.enter();
        let mut state = self.lock();
        if state.movements.iter().any(|m| m.user_id == id) {
            return Err(AppError::ReferencedByMovements);
        }
        Ok(state.users.remove(&id).is_some())
    }

    async fn record_movement(&self, draft: &MovementDraft) -> Result<Movement, AppError> {
        self.enter();

        let gate = self.movement_gate.lock().unwrap_or_else(|p| p.into_inner()).clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let mut state = self.lock();

        let stock_before = state
            .products
            .get(&draft.product_id)
            .map(|p| p.current_stock)
            .ok_or(AppError::ProductNotFound)?;
        if !state.users.contains_key(&draft.user_id) {
            return Err(AppError::UserNotFound);
        }

        let stock_after = draft.apply_to(stock_before)?;

        let movement = Movement {
            id: Uuid::new_v4(),
            product_id: draft.product_id,
            user_id: draft.user_id,
            kind: draft.kind,
            quantity: draft.quantity,
            stock_before,
            stock_after,
            timestamp: Utc::now(),
            notes: draft.notes.clone(),
        };
        state.movements.push(movement.clone());
        if let Some(product) = state.products.get_mut(&draft.product_id) {
            product.current_stock = stock_after;
            product.updated_at = movement.timestamp;
        }
        Ok(movement)
    }

    async fn recent_movements(&self, limit: i64) -> Result<Vec<MovementView>, AppError> {
        self.enter_read()?;
        let state = self.lock();

        let mut movements = state.movements.clone();
        // Ordem de inserção desempata timestamps iguais (o mais novo primeiro)
        movements.reverse();
        movements.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let views = movements
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|m| {
                let product = state.products.get(&m.product_id);
                let user = state.users.get(&m.user_id);
                MovementView::from(MovementRow {
                    id: m.id,
                    product_id: m.product_id,
                    user_id: m.user_id,
                    kind: m.kind,
                    quantity: m.quantity,
                    stock_before: m.stock_before,
                    stock_after: m.stock_after,
                    timestamp: m.timestamp,
                    notes: m.notes,
                    product_name: product.map(|p| p.name.clone()),
                    product_code: product.map(|p| p.code.clone()),
                    product_unit: product.map(|p| unit_label(p.unit)),
                    user_name: user.map(|u| u.name.clone()),
                })
            })
            .collect();
        Ok(views)
    }

    async fn count_products(&self) -> Result<i64, AppError> {
        self.enter_read()?;
        Ok(self.lock().products.len() as i64)
    }

    async fn count_users(&self) -> Result<i64, AppError> {
        self.enter_read()?;
        Ok(self.lock().users.len() as i64)
    }

    async fn low_stock_products(&self, limit: i64) -> Result<(Vec<Product>, i64), AppError> {
        self.enter_read()?;
        let mut low: Vec<Product> = self
            .lock()
            .products
            .values()
            .filter(|p| p.is_low_stock())
            .cloned()
            .collect();
        by_name(&mut low, |p| p.name.as_str(), |p| p.id);

        let total = low.len() as i64;
        low.truncate(usize::try_from(limit).unwrap_or(0));
        Ok((low, total))
    }

    async fn count_movements_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        self.enter_read()?;
        let total = self
            .lock()
            .movements
            .iter()
            .filter(|m| m.timestamp >= start && m.timestamp < end)
            .count();
        Ok(total as i64)
    }
}
