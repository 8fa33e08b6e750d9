// src/models/dashboard.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{movement::MovementView, product::Product};

// 1. Produtos abaixo (ou no) limite mínimo
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LowStockReport {
    pub products: Vec<Product>, // Lista limitada, ordenada por nome
    pub total: i64,             // Total sem limite (pode ser maior que products.len())
}

// 2. Resumo (Os Cards do Topo + listas)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: i64,
    pub low_stock_count: i64,
    pub total_users: i64,
    pub movements_today: i64,
    pub low_stock_products: Vec<Product>,
    pub recent_movements: Vec<MovementView>,
}
