//! Guest order endpoints.
//!
//! ```text
//! POST   /api/v1/orders
//! GET    /api/v1/orders
//! GET    /api/v1/orders/{id}
//! DELETE /api/v1/orders/{id}
//! ```
//!
//! The order surface is open to guests; no session is required.

use actix_web::{delete, get, post, web, HttpResponse};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{OrderAggregate, OrderLine, OrderLineDetail, OrderLineSubmission};
use crate::domain::ports::{PlaceOrderRequest, PlacedOrder};
use crate::domain::Error;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Order placement request body.
///
/// Lines arrive as three parallel arrays (product id, quantity, unit price);
/// the arrays must agree in length.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderPayload {
    /// Guest's display name, at most 100 characters.
    #[schema(example = "Ada Lovelace")]
    pub guest_name: String,
    /// Guest's contact email.
    #[schema(example = "ada@example.com")]
    pub guest_email: String,
    /// Ordered product identifiers, parallel to `quantities` and `prices`.
    pub product_ids: Vec<Uuid>,
    /// Per-line quantities; each must be strictly positive.
    pub quantities: Vec<i32>,
    /// Per-line unit prices captured at order time.
    #[schema(value_type = Vec<String>)]
    pub prices: Vec<BigDecimal>,
}

impl PlaceOrderPayload {
    fn into_request(self) -> Result<PlaceOrderRequest, Error> {
        if self.product_ids.len() != self.quantities.len()
            || self.product_ids.len() != self.prices.len()
        {
            return Err(Error::invalid_request(
                "productIds, quantities, and prices must have the same length",
            )
            .with_details(json!({ "field": "productIds" })));
        }

        let lines = self
            .product_ids
            .into_iter()
            .zip(self.quantities)
            .zip(self.prices)
            .map(|((product_id, quantity), unit_price)| OrderLineSubmission {
                product_id,
                quantity,
                unit_price,
            })
            .collect();

        Ok(PlaceOrderRequest {
            guest_name: self.guest_name,
            guest_email: self.guest_email,
            lines,
        })
    }
}

/// One order line in a response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Name of the referenced product, when it still exists.
    #[schema(example = "Hammer")]
    pub product_name: Option<String>,
    pub quantity: i32,
    #[schema(value_type = String, example = "9.99")]
    pub unit_price: BigDecimal,
}

impl From<OrderLineDetail> for OrderLineResponse {
    fn from(detail: OrderLineDetail) -> Self {
        Self {
            id: detail.line.id,
            product_id: detail.line.product_id,
            product_name: detail.product_name,
            quantity: detail.line.quantity,
            unit_price: detail.line.unit_price,
        }
    }
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        Self {
            id: line.id,
            product_id: line.product_id,
            product_name: None,
            quantity: line.quantity,
            unit_price: line.unit_price,
        }
    }
}

/// Order response body with its lines.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    #[schema(example = "Ada Lovelace")]
    pub guest_name: String,
    #[schema(example = "ada@example.com")]
    pub guest_email: String,
    pub order_date: DateTime<Utc>,
    #[schema(value_type = String, example = "19.98")]
    pub total_amount: BigDecimal,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderAggregate> for OrderResponse {
    fn from(aggregate: OrderAggregate) -> Self {
        Self {
            id: aggregate.order.id,
            guest_name: aggregate.order.guest_name,
            guest_email: aggregate.order.guest_email,
            order_date: aggregate.order.order_date,
            total_amount: aggregate.order.total_amount,
            lines: aggregate
                .lines
                .into_iter()
                .map(OrderLineResponse::from)
                .collect(),
        }
    }
}

impl From<PlacedOrder> for OrderResponse {
    fn from(placed: PlacedOrder) -> Self {
        Self {
            id: placed.order.id,
            guest_name: placed.order.guest_name,
            guest_email: placed.order.guest_email,
            order_date: placed.order.order_date,
            total_amount: placed.order.total_amount,
            lines: placed
                .lines
                .into_iter()
                .map(OrderLineResponse::from)
                .collect(),
        }
    }
}

/// Place a guest order.
///
/// Lines whose product id does not resolve are dropped; the returned order
/// covers only the accepted lines.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = PlaceOrderPayload,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Validation failure", body = Error),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "placeOrder"
)]
#[post("/orders")]
pub async fn place_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PlaceOrderPayload>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    let request = payload.into_inner().into_request()?;
    let placed = state.order_commands.place_order(&principal, request).await?;
    Ok(HttpResponse::Created().json(OrderResponse::from(placed)))
}

/// List all orders with their lines, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "All orders", body = Vec<OrderResponse>),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    let orders = state.orders.list_orders(&principal).await?;
    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// Fetch one order with its lines and product names.
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order details", body = OrderResponse),
        (status = 404, description = "Unknown order", body = Error)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    let aggregate = state.orders.get_order(&principal, *id).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(aggregate)))
}

/// Hard-delete an order and its lines.
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    params(("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 204, description = "Order removed (idempotent)"),
        (status = 503, description = "Service unavailable", body = Error)
    ),
    tags = ["orders"],
    operation_id = "deleteOrder"
)]
#[delete("/orders/{id}")]
pub async fn delete_order(
    state: web::Data<HttpState>,
    session: SessionContext,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let principal = session.principal()?;
    state.order_commands.delete_order(&principal, *id).await?;
    Ok(HttpResponse::NoContent().finish())
}
