// src/handlers/movements.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, json::ApiJson},
    models::movement::{Movement, MovementKind, MovementView},
};

const DEFAULT_HISTORY_LIMIT: i64 = 100;

// --- DTO: Novo movimento ---
// Seleção, quantidade e tipo podem faltar: o livro-razão valida-os pela ordem certa
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMovementPayload {
    pub product_id: Option<Uuid>,
    pub user_id: Option<Uuid>,

    #[schema(example = "saida")]
    pub kind: Option<MovementKind>,

    #[schema(example = 1)]
    pub quantity: Option<i32>,

    #[validate(length(max = 1000, message = "As observações têm no máximo 1000 caracteres."))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Máximo de movimentos (1-500, padrão 100)
    pub limit: Option<i64>,
}

// POST /api/movements
#[utoipa::path(
    post,
    path = "/api/movements",
    tag = "Movements",
    request_body = SubmitMovementPayload,
    responses(
        (status = 201, description = "Movimento registado e stock atualizado", body = Movement),
        (status = 400, description = "Seleção em falta, quantidade inválida, tipo em falta ou JSON inválido"),
        (status = 404, description = "Produto ou utilizador não encontrado"),
        (status = 409, description = "Movimento igual ainda em curso"),
        (status = 422, description = "Stock insuficiente")
    )
)]
pub async fn submit_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    ApiJson(payload): ApiJson<SubmitMovementPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale))?;

    let movement = app_state
        .ledger_service
        .submit_movement(
            payload.product_id,
            payload.user_id,
            payload.kind,
            payload.quantity,
            payload.notes.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    // Devolve o movimento com os stocks antes/depois para o cliente atualizar a tela
    Ok((StatusCode::CREATED, Json(movement)))
}

// GET /api/movements
#[utoipa::path(
    get,
    path = "/api/movements",
    tag = "Movements",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Histórico, mais recentes primeiro", body = Vec<MovementView>),
        (status = 400, description = "Limite inválido")
    )
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<HistoryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let movements = app_state
        .ledger_service
        .list_movements(query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT))
        .await
        .map_err(|app_err| app_err.to_api_error(&locale))?;

    Ok((StatusCode::OK, Json(movements)))
}
