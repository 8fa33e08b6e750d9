use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::middleware::i18n::Locale;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Selecione o produto e o utilizador")]
    MissingSelection,

    #[error("A quantidade deve ser maior que zero")]
    InvalidQuantity,

    #[error("Tipo de movimento em falta")]
    MissingKind,

    // Corpo JSON ilegível ou com tipos errados
    #[error("Corpo do pedido inválido: {0}")]
    MalformedBody(String),

    #[error("Limite inválido")]
    InvalidLimit,

    #[error("Stock insuficiente: disponível {available}, pedido {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Utilizador não encontrado")]
    UserNotFound,

    #[error("Código de produto já existe")]
    ProductCodeAlreadyExists,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Já existe um movimento em curso para este produto")]
    SubmissionInFlight,

    // Violação de chave estrangeira ao eliminar produto/utilizador
    #[error("Registo tem movimentos associados")]
    ReferencedByMovements,

    #[error("Erro de banco de dados: {0}")]
    PersistenceError(#[from] sqlx::Error),

    #[error("Dados indisponíveis: {0}")]
    DataUnavailableError(String),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// Família de cada erro, tal como aparece no campo `code` da resposta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    InsufficientStock,
    NotFound,
    Conflict,
    Persistence,
    DataUnavailable,
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::InsufficientStock => "insufficient_stock",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Conflict => "conflict",
            ErrorCategory::Persistence => "persistence",
            ErrorCategory::DataUnavailable => "data_unavailable",
            ErrorCategory::Internal => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::InsufficientStock => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Conflict => StatusCode::CONFLICT,
            ErrorCategory::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCategory::DataUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ValidationError(_)
            | AppError::MissingSelection
            | AppError::InvalidQuantity
            | AppError::MissingKind
            | AppError::MalformedBody(_)
            | AppError::InvalidLimit => ErrorCategory::Validation,
            AppError::InsufficientStock { .. } => ErrorCategory::InsufficientStock,
            AppError::ProductNotFound | AppError::UserNotFound => ErrorCategory::NotFound,
            AppError::ProductCodeAlreadyExists
            | AppError::EmailAlreadyExists
            | AppError::SubmissionInFlight => ErrorCategory::Conflict,
            AppError::ReferencedByMovements | AppError::PersistenceError(_) => {
                ErrorCategory::Persistence
            }
            AppError::DataUnavailableError(_) => ErrorCategory::DataUnavailable,
            AppError::InternalServerError(_) => ErrorCategory::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            // Falha de integridade: o pedido é válido mas o estado atual impede-o
            AppError::ReferencedByMovements => StatusCode::CONFLICT,
            other => other.category().status(),
        }
    }

    /// Converte erros do sqlx vindos de uma escrita, reconhecendo as violações de integridade.
    pub fn from_write(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_foreign_key_violation() {
                return AppError::ReferencedByMovements;
            }
            if db_err.is_unique_violation() {
                let constraint = db_err.constraint().unwrap_or_default();
                if constraint.contains("code") {
                    return AppError::ProductCodeAlreadyExists;
                }
                if constraint.contains("email") {
                    return AppError::EmailAlreadyExists;
                }
            }
        }
        e.into()
    }

    fn localized_message(&self, lang: &str) -> String {
        let en = lang == "en";
        match self {
            AppError::ValidationError(_) => if en {
                "One or more fields are invalid.".into()
            } else {
                "Um ou mais campos são inválidos.".into()
            },
            AppError::MissingSelection => if en {
                "Select the product and the user.".into()
            } else {
                "Selecione o produto e o utilizador.".into()
            },
            AppError::InvalidQuantity => if en {
                "Quantity must be greater than zero.".into()
            } else {
                "A quantidade deve ser maior que zero.".into()
            },
            AppError::MissingKind => if en {
                "Choose the movement type (entrada or saida).".into()
            } else {
                "Indique o tipo de movimento (entrada ou saída).".into()
            },
            AppError::MalformedBody(_) => if en {
                "The request body is not valid JSON for this operation.".into()
            } else {
                "O corpo do pedido não é um JSON válido para esta operação.".into()
            },
            AppError::InvalidLimit => if en {
                "The limit must be between 1 and 500.".into()
            } else {
                "O limite deve estar entre 1 e 500.".into()
            },
            AppError::InsufficientStock { available, requested } => if en {
                format!("Insufficient stock for this operation (available {available}, requested {requested}).")
            } else {
                format!("Stock insuficiente para esta operação (disponível {available}, pedido {requested}).")
            },
            AppError::ProductNotFound => if en {
                "Product not found.".into()
            } else {
                "Produto não encontrado.".into()
            },
            AppError::UserNotFound => if en {
                "User not found.".into()
            } else {
                "Utilizador não encontrado.".into()
            },
            AppError::ProductCodeAlreadyExists => if en {
                "This product code is already in use.".into()
            } else {
                "Este código de produto já está em uso.".into()
            },
            AppError::EmailAlreadyExists => if en {
                "This e-mail is already in use.".into()
            } else {
                "Este e-mail já está em uso.".into()
            },
            AppError::SubmissionInFlight => if en {
                "A movement for this product is already being recorded.".into()
            } else {
                "Já existe um movimento deste produto a ser registado.".into()
            },
            AppError::ReferencedByMovements => if en {
                "Cannot delete: there are movements associated with this record.".into()
            } else {
                "Não é possível eliminar: existem movimentos associados.".into()
            },
            AppError::DataUnavailableError(_) => if en {
                "Could not load the dashboard data.".into()
            } else {
                "Erro ao carregar dados do dashboard.".into()
            },
            AppError::PersistenceError(e) => e.to_string(),
            AppError::InternalServerError(_) => if en {
                "An unexpected error occurred.".into()
            } else {
                "Ocorreu um erro inesperado.".into()
            },
        }
    }

    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let category = self.category();
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                Some(json!(details))
            }
            AppError::MalformedBody(reason) => Some(json!({ "body": reason })),
            _ => None,
        };

        ApiError {
            status,
            code: category.as_str(),
            message: self.localized_message(&locale.0),
            details,
        }
    }
}

// O erro já traduzido, pronto para virar resposta HTTP
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "code": self.code, "details": details }),
            None => json!({ "error": self.message, "code": self.code }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_the_error_taxonomy() {
        assert_eq!(AppError::MissingSelection.category(), ErrorCategory::Validation);
        assert_eq!(AppError::InvalidQuantity.category(), ErrorCategory::Validation);
        assert_eq!(
            AppError::InsufficientStock { available: 1, requested: 2 }.category(),
            ErrorCategory::InsufficientStock
        );
        assert_eq!(AppError::ReferencedByMovements.category(), ErrorCategory::Persistence);
        assert_eq!(
            AppError::PersistenceError(sqlx::Error::RowNotFound).category(),
            ErrorCategory::Persistence
        );
        assert_eq!(
            AppError::DataUnavailableError("x".into()).category(),
            ErrorCategory::DataUnavailable
        );
    }

    #[test]
    fn api_error_is_localized() {
        let pt = AppError::MissingSelection.to_api_error(&Locale("pt".into()));
        let en = AppError::MissingSelection.to_api_error(&Locale("en".into()));

        assert_eq!(pt.status, StatusCode::BAD_REQUEST);
        assert_eq!(pt.code, "validation");
        assert_eq!(pt.message, "Selecione o produto e o utilizador.");
        assert_eq!(en.message, "Select the product and the user.");
    }

    #[test]
    fn referenced_delete_is_a_conflict_in_the_persistence_family() {
        let api = AppError::ReferencedByMovements.to_api_error(&Locale("en".into()));
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.code, "persistence");
    }

    #[test]
    fn insufficient_stock_maps_to_unprocessable() {
        let api = AppError::InsufficientStock { available: 5, requested: 10 }
            .to_api_error(&Locale("pt".into()));
        assert_eq!(api.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(api.message.contains("disponível 5"));
    }
}
