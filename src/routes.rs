// src/routes.rs

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

pub fn build_router(app_state: AppState) -> Router {
    // Catálogo e registo de utilizadores
    let catalogue_routes = Router::new()
        .route(
            "/api/products",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/api/products/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        )
        .route(
            "/api/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/api/users/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        );

    let movement_routes = Router::new().route(
        "/api/movements",
        get(handlers::movements::list_movements).post(handlers::movements::submit_movement),
    );

    let dashboard_routes = Router::new()
        .route("/api/dashboard/summary", get(handlers::dashboard::get_summary))
        .route("/api/dashboard/low-stock", get(handlers::dashboard::get_low_stock))
        .route(
            "/api/dashboard/recent-movements",
            get(handlers::dashboard::get_recent_movements),
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(catalogue_routes)
        .merge(movement_routes)
        .merge(dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}
