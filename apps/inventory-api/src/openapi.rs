//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Accounts and product inventory over MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api", api = domain_users::ApiDoc),
        (path = "/api/product", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Users", description = "Account creation and authentication"),
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;
