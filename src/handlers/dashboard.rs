// src/handlers/dashboard.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{
        dashboard::{DashboardSummary, LowStockReport},
        movement::MovementView,
    },
    services::dashboard_service::SUMMARY_LIST_LIMIT,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListLimitQuery {
    /// Tamanho da lista (1-500, padrão 5)
    pub limit: Option<i64>,
}

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contagens, alertas de stock baixo e últimos movimentos", body = DashboardSummary),
        (status = 503, description = "Falha ao ler os dados")
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .dashboard_service
        .get_summary()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/low-stock
#[utoipa::path(
    get,
    path = "/api/dashboard/low-stock",
    tag = "Dashboard",
    params(ListLimitQuery),
    responses(
        (status = 200, description = "Produtos com stock <= mínimo (por nome) e o total", body = LowStockReport)
    )
)]
pub async fn get_low_stock(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListLimitQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let report = app_state
        .dashboard_service
        .low_stock_products(query.limit.unwrap_or(SUMMARY_LIST_LIMIT))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/dashboard/recent-movements
#[utoipa::path(
    get,
    path = "/api/dashboard/recent-movements",
    tag = "Dashboard",
    params(ListLimitQuery),
    responses(
        (status = 200, description = "Últimos movimentos", body = Vec<MovementView>)
    )
)]
pub async fn get_recent_movements(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ListLimitQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let movements = app_state
        .dashboard_service
        .recent_movements(query.limit.unwrap_or(SUMMARY_LIST_LIMIT))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(movements)))
}
