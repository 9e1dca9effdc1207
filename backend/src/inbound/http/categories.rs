//! Category endpoints.
//!
//! ```text
//! GET    /api/v1/categories
//! GET    /api/v1/categories/{id}
//! POST   /api/v1/categories
//! PUT    /api/v1/categories/{id}
//! DELETE /api/v1/categories/{id}
//! ```
//!
//! Reads require an authenticated session; mutations require the admin role.

use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::catalog::{Category, CategoryDraft};
use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Category create/update request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    /// Display name, at most 100 characters.
    #[schema(example = "Tools")]
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CategoryPayload> for CategoryDraft {
    fn from(payload: CategoryPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description,
        }
    }
}

/// Category response body.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: Uuid,
    #[schema(example = "Tools")]
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
            created_by: category.created_by,
            updated_at: category.updated_at,
            updated_by: category.updated_by,
        }
    }
}

/// List all active categories.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Active categories", body = Vec<CategoryResponse>),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listCategories",
    security(("SessionCookie" = []))
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    let categories = state.catalog.list_categories(&principal).await?;
    let body: Vec<CategoryResponse> = categories.into_iter().map(CategoryResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch one active category.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category details", body = CategoryResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Unknown or inactive category", body = Error)
    ),
    tags = ["categories"],
    operation_id = "getCategory",
    security(("SessionCookie" = []))
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    let category = state.catalog.get_category(&principal, *id).await?;
    Ok(HttpResponse::Ok().json(CategoryResponse::from(category)))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation failure", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin role required", body = Error)
    ),
    tags = ["categories"],
    operation_id = "createCategory",
    security(("SessionCookie" = []))
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CategoryPayload>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    let created = state
        .catalog_commands
        .create_category(&principal, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(CategoryResponse::from(created)))
}

/// Overwrite a category's mutable fields.
#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    request_body = CategoryPayload,
    responses(
        (status = 200, description = "Category updated"),
        (status = 400, description = "Validation failure", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 404, description = "Unknown or inactive category", body = Error),
        (status = 409, description = "Concurrent modification", body = Error)
    ),
    tags = ["categories"],
    operation_id = "updateCategory",
    security(("SessionCookie" = []))
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
    payload: web::Json<CategoryPayload>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    state
        .catalog_commands
        .update_category(&principal, *id, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().finish())
}

/// Soft-delete a category.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = Uuid, Path, description = "Category identifier")),
    responses(
        (status = 204, description = "Category inactive (idempotent)"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Admin role required", body = Error)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory",
    security(("SessionCookie" = []))
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    state
        .catalog_commands
        .delete_category(&principal, *id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
