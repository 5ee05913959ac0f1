//! API routes module

pub mod health;
pub mod root;

use axum::Router;
use axum_helpers::health_router;
use domain_products::{MongoProductRepository, ProductService, handlers};
use std::io;

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Routes nested under `/api`
pub fn routes(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(state.connection.clone());
    let service = ProductService::new(repository);

    Router::new()
        .nest("/products", handlers::router(service))
        .merge(root::api_router())
        .merge(health::router(state.clone()))
}

/// The full application router with middleware and the OpenAPI document
pub fn app(state: &AppState) -> io::Result<Router> {
    let root = root::router().merge(health_router(state.config.app));
    axum_helpers::create_router::<ApiDoc>(routes(state), root)
}
