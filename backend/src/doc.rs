//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] aggregate generating the OpenAPI specification for
//! the REST API: all inbound HTTP paths, the request/response schemas, and
//! the session cookie security scheme.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::categories::{CategoryPayload, CategoryResponse};
use crate::inbound::http::orders::{OrderLineResponse, OrderResponse, PlaceOrderPayload};
use crate::inbound::http::products::{ProductPayload, ProductResponse};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie established by the identity provider.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Inventory backend API",
        description = "Catalog management and guest order placement."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::orders::place_order,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::delete_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        CategoryPayload,
        CategoryResponse,
        ProductPayload,
        ProductResponse,
        PlaceOrderPayload,
        OrderResponse,
        OrderLineResponse,
    )),
    tags(
        (name = "categories", description = "Category catalog management"),
        (name = "products", description = "Product catalog management"),
        (name = "orders", description = "Guest order placement and review"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
