//! OpenAPI documentation configuration

use utoipa::OpenApi;

use crate::api::{health, root};

/// Combined OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products API",
        version = "0.1.0",
        description = "Product catalogue API backed by MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(root::welcome, root::api_test, health::test_db),
    components(schemas(root::WelcomeResponse, root::ApiTestResponse, health::TestDbResponse)),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalogue endpoints"),
        (name = "Status", description = "Liveness and connectivity checks")
    )
)]
pub struct ApiDoc;
