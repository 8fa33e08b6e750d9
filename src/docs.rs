// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Products ---
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::get_user,
        handlers::users::create_user,
        handlers::users::update_user,
        handlers::users::delete_user,

        // --- Movements ---
        handlers::movements::submit_movement,
        handlers::movements::list_movements,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_low_stock,
        handlers::dashboard::get_recent_movements,
    ),
    components(
        schemas(
            // --- Products ---
            models::product::UnitOfMeasure,
            models::product::Product,
            models::product::CreateProductPayload,
            models::product::UpdateProductPayload,

            // --- Users ---
            models::user::User,
            models::user::UserPayload,

            // --- Movements ---
            models::movement::MovementKind,
            models::movement::Movement,
            models::movement::MovementView,
            handlers::movements::SubmitMovementPayload,

            // --- Dashboard ---
            models::dashboard::LowStockReport,
            models::dashboard::DashboardSummary,
        )
    ),
    tags(
        (name = "Products", description = "Catálogo de Produtos"),
        (name = "Users", description = "Utilizadores que registam movimentos"),
        (name = "Movements", description = "Entradas e Saídas de Stock"),
        (name = "Dashboard", description = "Indicadores do Stock")
    )
)]
pub struct ApiDoc;
