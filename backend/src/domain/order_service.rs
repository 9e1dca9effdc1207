//! Order domain service.
//!
//! Places guest orders atomically and serves fully materialized order
//! aggregates. Lines referencing unknown products are dropped before the
//! order is assembled; the skip is logged but the order still succeeds
//! (behaviour inherited from the source system, see DESIGN.md).

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::access::{authorize, Action, Principal};
use crate::domain::order::{Order, OrderAggregate, OrderDraft, OrderValidationError};
use crate::domain::ports::{
    CatalogRepositoryError, OrderCommand, OrderQuery, OrderRepository, OrderRepositoryError,
    PlaceOrderRequest, PlacedOrder, ProductRepository,
};
use crate::domain::Error;

fn map_order_repository_error(error: OrderRepositoryError) -> Error {
    match error {
        OrderRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("order repository unavailable: {message}"))
        }
        OrderRepositoryError::Query { message } => {
            Error::internal(format!("order repository error: {message}"))
        }
    }
}

fn map_catalog_repository_error(error: CatalogRepositoryError) -> Error {
    match error {
        CatalogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalog repository unavailable: {message}"))
        }
        CatalogRepositoryError::Query { message } => {
            Error::internal(format!("catalog repository error: {message}"))
        }
    }
}

fn validation_error(error: OrderValidationError) -> Error {
    Error::invalid_request(error.to_string())
        .with_details(serde_json::json!({ "field": error.field() }))
}

/// Order service over the order repository plus the product repository used
/// to resolve line references.
#[derive(Clone)]
pub struct OrderService<O, P> {
    orders: Arc<O>,
    products: Arc<P>,
}

impl<O, P> OrderService<O, P> {
    /// Create a new service with the given repositories.
    pub fn new(orders: Arc<O>, products: Arc<P>) -> Self {
        Self { orders, products }
    }
}

#[async_trait]
impl<O, P> OrderCommand for OrderService<O, P>
where
    O: OrderRepository,
    P: ProductRepository,
{
    async fn place_order(
        &self,
        principal: &Principal,
        request: PlaceOrderRequest,
    ) -> Result<PlacedOrder, Error> {
        authorize(principal, Action::PlaceOrder)?;

        let draft = OrderDraft {
            guest_name: request.guest_name,
            guest_email: request.guest_email,
            lines: request.lines,
        };
        draft.validate().map_err(validation_error)?;

        // Resolve each line against the catalog; the lookup is unfiltered,
        // so lines for soft-deleted products are still accepted.
        let mut accepted = Vec::with_capacity(draft.lines.len());
        for line in draft.lines {
            match self
                .products
                .find_by_id(line.product_id)
                .await
                .map_err(map_catalog_repository_error)?
            {
                Some(_) => accepted.push(line),
                None => {
                    warn!(product_id = %line.product_id, "dropping order line for unknown product");
                }
            }
        }

        let (order, lines) = Order::assemble(
            draft.guest_name,
            draft.guest_email,
            chrono::Utc::now(),
            accepted,
        );
        self.orders
            .create(&order, &lines)
            .await
            .map_err(map_order_repository_error)?;
        info!(
            order_id = %order.id,
            line_count = lines.len(),
            total = %order.total_amount,
            "order placed"
        );
        Ok(PlacedOrder { order, lines })
    }

    async fn delete_order(&self, principal: &Principal, id: Uuid) -> Result<(), Error> {
        authorize(principal, Action::DeleteOrder)?;
        self.orders
            .delete(id)
            .await
            .map_err(map_order_repository_error)?;
        info!(order_id = %id, "order deleted");
        Ok(())
    }
}

#[async_trait]
impl<O, P> OrderQuery for OrderService<O, P>
where
    O: OrderRepository,
    P: ProductRepository,
{
    async fn list_orders(&self, principal: &Principal) -> Result<Vec<OrderAggregate>, Error> {
        authorize(principal, Action::ReadOrders)?;
        self.orders
            .list_with_lines()
            .await
            .map_err(map_order_repository_error)
    }

    async fn get_order(&self, principal: &Principal, id: Uuid) -> Result<OrderAggregate, Error> {
        authorize(principal, Action::ReadOrders)?;
        self.orders
            .find_with_lines(id)
            .await
            .map_err(map_order_repository_error)?
            .ok_or_else(|| Error::not_found(format!("order {id} not found")))
    }
}

#[cfg(test)]
#[path = "order_service_tests.rs"]
mod tests;
