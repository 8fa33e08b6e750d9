// src/services/product_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryStore,
    models::product::{CreateProductPayload, Product, UpdateProductPayload},
};

#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn InventoryStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.store.list_products().await
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.store.find_product(id).await?.ok_or(AppError::ProductNotFound)
    }

    pub async fn create_product(&self, input: &CreateProductPayload) -> Result<Product, AppError> {
        let product = self.store.create_product(input).await?;
        tracing::info!("Produto {} criado com stock inicial {}", product.code, product.current_stock);
        Ok(product)
    }

    // O stock atual nunca é alterado por aqui
    pub async fn update_product(
        &self,
        id: Uuid,
        input: &UpdateProductPayload,
    ) -> Result<Product, AppError> {
        self.store
            .update_product(id, input)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_product(id).await? {
            return Err(AppError::ProductNotFound);
        }
        tracing::info!("Produto {} eliminado", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_store::MemoryStore;
    use crate::models::{movement::MovementKind, product::UnitOfMeasure};
    use crate::services::LedgerService;
    use rust_decimal::Decimal;

    fn create_payload(code: &str, stock: i32) -> CreateProductPayload {
        CreateProductPayload {
            code: code.into(),
            name: "Máscara".into(),
            description: "Argila".into(),
            category: "Skincare".into(),
            unit: UnitOfMeasure::Units,
            initial_stock: stock,
            min_stock: 1,
            unit_price: Decimal::new(1250, 2),
            location: "A1".into(),
        }
    }

    fn update_payload(code: &str) -> UpdateProductPayload {
        UpdateProductPayload {
            code: code.into(),
            name: "Máscara XL".into(),
            description: "Argila verde".into(),
            category: "Outros".into(),
            unit: UnitOfMeasure::Boxes,
            min_stock: 4,
            unit_price: Decimal::new(1500, 2),
            location: "B2".into(),
        }
    }

    #[tokio::test]
    async fn update_overwrites_fields_but_keeps_stock() {
        let service = ProductService::new(Arc::new(MemoryStore::new()));
        let created = service.create_product(&create_payload("MS-1", 9)).await.unwrap();

        let updated = service.update_product(created.id, &update_payload("MS-1")).await.unwrap();

        assert_eq!(updated.name, "Máscara XL");
        assert_eq!(updated.unit, UnitOfMeasure::Boxes);
        assert_eq!(updated.min_stock, 4);
        assert_eq!(updated.current_stock, 9);
    }

    #[tokio::test]
    async fn duplicate_code_is_a_conflict() {
        let service = ProductService::new(Arc::new(MemoryStore::new()));
        service.create_product(&create_payload("MS-1", 0)).await.unwrap();
        let other = service.create_product(&create_payload("MS-2", 0)).await.unwrap();

        assert!(matches!(
            service.create_product(&create_payload("MS-1", 0)).await,
            Err(AppError::ProductCodeAlreadyExists)
        ));
        assert!(matches!(
            service.update_product(other.id, &update_payload("MS-1")).await,
            Err(AppError::ProductCodeAlreadyExists)
        ));
    }

    #[tokio::test]
    async fn referenced_product_cannot_be_deleted() {
        let store = Arc::new(MemoryStore::new());
        let service = ProductService::new(store.clone());
        let product = service.create_product(&create_payload("MS-1", 3)).await.unwrap();
        let user = store.create_user("Rui", "rui@loja.pt").await.unwrap();
        LedgerService::new(store.clone())
            .submit_movement(Some(product.id), Some(user.id), Some(MovementKind::Saida), Some(1), None)
            .await
            .unwrap();

        let err = service.delete_product(product.id).await.unwrap_err();

        assert!(matches!(err, AppError::ReferencedByMovements));
        assert_eq!(service.get_product(product.id).await.unwrap().current_stock, 2);
        assert_eq!(store.movements().len(), 1);
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let service = ProductService::new(Arc::new(MemoryStore::new()));
        assert!(matches!(service.get_product(Uuid::new_v4()).await, Err(AppError::ProductNotFound)));
        assert!(matches!(service.delete_product(Uuid::new_v4()).await, Err(AppError::ProductNotFound)));
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let store = Arc::new(MemoryStore::new());
        let service = ProductService::new(store);
        for (code, name) in [("1", "Tónico"), ("2", "Esfoliante"), ("3", "Gel")] {
            let mut payload = create_payload(code, 0);
            payload.name = name.into();
            service.create_product(&payload).await.unwrap();
        }

        let names: Vec<_> = service
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Esfoliante", "Gel", "Tónico"]);
    }
}
