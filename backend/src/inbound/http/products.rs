//! Product endpoints.
//!
//! ```text
//! GET    /api/v1/products?search=term
//! GET    /api/v1/products/{id}
//! POST   /api/v1/products
//! PUT    /api/v1/products/{id}
//! DELETE /api/v1/products/{id}
//! ```
//!
//! Reads require an authenticated session; mutations require the admin role.

use actix_web::{delete, get, post, put, web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::catalog::{Product, ProductDraft};
use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Product create/update request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    /// Display name, at most 100 characters.
    #[schema(example = "Hammer")]
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price; must be strictly positive.
    #[schema(value_type = String, example = "9.99")]
    pub price: BigDecimal,
    /// Stock on hand; must not be negative.
    #[schema(example = 10)]
    pub quantity: i32,
    /// Owning category; must reference an active category.
    pub category_id: Uuid,
    /// Image path; a blank or absent value falls back to the default image.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl From<ProductPayload> for ProductDraft {
    fn from(payload: ProductPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
            price: payload.price,
            quantity: payload.quantity,
            category_id: payload.category_id,
            image_url: payload.image_url,
        }
    }
}

/// Product response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    #[schema(example = "Hammer")]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "9.99")]
    pub price: BigDecimal,
    pub quantity: i32,
    pub category_id: Uuid,
    #[schema(example = "/images/default-product.png")]
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            category_id: product.category_id,
            image_url: product.image_url,
            created_at: product.created_at,
            created_by: product.created_by,
            updated_at: product.updated_at,
            updated_by: product.updated_by,
        }
    }
}

/// Query parameters for the product listing.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ProductListQuery {
    /// Substring matched against product name, description, and category
    /// name; blank terms are ignored.
    pub search: Option<String>,
}

/// List active products, optionally filtered by a search term.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Active products", body = Vec<ProductResponse>),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts",
    security(("SessionCookie" = []))
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<ProductListQuery>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    let products = state
        .catalog
        .list_products(&principal, query.search.as_deref())
        .await?;
    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch one active product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product details", body = ProductResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown or inactive product", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProduct",
    security(("SessionCookie" = []))
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    let product = state.catalog.get_product(&principal, *id).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation failure or unknown category", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin role required", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct",
    security(("SessionCookie" = []))
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProductPayload>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    let created = state
        .catalog_commands
        .create_product(&principal, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(created)))
}

/// Overwrite a product's mutable fields.
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product identifier")),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Product updated"),
        (status = 400, description = "Validation failure or unknown category", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 404, description = "Unknown or inactive product", body = Error),
        (status = 409, description = "Concurrent modification", body = Error)
    ),
    tags = ["products"],
    operation_id = "updateProduct",
    security(("SessionCookie" = []))
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    payload: web::Json<ProductPayload>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    state
        .catalog_commands
        .update_product(&principal, *id, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Soft-delete a product.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = Uuid, Path, description = "Product identifier")),
    responses(
        (status = 204, description = "Product inactive (idempotent)"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin role required", body = Error)
    ),
    tags = ["products"],
    operation_id = "deleteProduct",
    security(("SessionCookie" = []))
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    state
        .catalog_commands
        .delete_product(&principal, *id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
