//! Diesel-backed implementation of the order repository port.
//!
//! Order placement and deletion each span two tables, so both run inside a
//! transaction: either every row lands or none do.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::order::{Order, OrderAggregate, OrderLine, OrderLineDetail};
use crate::domain::ports::{OrderRepository, OrderRepositoryError};

use super::diesel_helpers::{map_order_diesel_error, map_order_pool_error};
use super::models::{NewOrderLineRow, NewOrderRow, OrderLineRow, OrderRow};
use super::pool::DbPool;
use super::schema::{order_lines, orders, products};

/// PostgreSQL adapter for [`OrderRepository`].
#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_detail((row, product_name): (OrderLineRow, Option<String>)) -> OrderLineDetail {
    OrderLineDetail {
        line: OrderLine::from(row),
        product_name,
    }
}

#[async_trait]
impl OrderRepository for DieselOrderRepository {
    async fn create(
        &self,
        order: &Order,
        lines: &[OrderLine],
    ) -> Result<(), OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_order_pool_error)?;

        let order_row = NewOrderRow::from(order);
        let line_rows: Vec<NewOrderLineRow> = lines.iter().map(NewOrderLineRow::from).collect();

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(orders::table)
                    .values(&order_row)
                    .execute(conn)
                    .await?;

                if !line_rows.is_empty() {
                    diesel::insert_into(order_lines::table)
                        .values(&line_rows)
                        .execute(conn)
                        .await?;
                }

                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_order_diesel_error)?;

        Ok(())
    }

    async fn find_with_lines(
        &self,
        id: Uuid,
    ) -> Result<Option<OrderAggregate>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_order_pool_error)?;

        let order_row: Option<OrderRow> = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_order_diesel_error)?;

        let Some(order_row) = order_row else {
            return Ok(None);
        };

        // Left join keeps lines whose product has since been removed; the
        // name simply comes back as None.
        let line_rows: Vec<(OrderLineRow, Option<String>)> = order_lines::table
            .left_join(products::table)
            .filter(order_lines::order_id.eq(id))
            .select((OrderLineRow::as_select(), products::name.nullable()))
            .order_by(order_lines::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_order_diesel_error)?;

        Ok(Some(OrderAggregate {
            order: Order::from(order_row),
            lines: line_rows.into_iter().map(into_detail).collect(),
        }))
    }

    async fn list_with_lines(&self) -> Result<Vec<OrderAggregate>, OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_order_pool_error)?;

        let order_rows: Vec<OrderRow> = orders::table
            .select(OrderRow::as_select())
            .order_by((orders::order_date.desc(), orders::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_order_diesel_error)?;

        let line_rows: Vec<(OrderLineRow, Option<String>)> = order_lines::table
            .left_join(products::table)
            .select((OrderLineRow::as_select(), products::name.nullable()))
            .order_by(order_lines::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_order_diesel_error)?;

        let mut lines_by_order: HashMap<Uuid, Vec<OrderLineDetail>> = HashMap::new();
        for pair in line_rows {
            lines_by_order
                .entry(pair.0.order_id)
                .or_default()
                .push(into_detail(pair));
        }

        Ok(order_rows
            .into_iter()
            .map(|row| {
                let lines = lines_by_order.remove(&row.id).unwrap_or_default();
                OrderAggregate {
                    order: Order::from(row),
                    lines,
                }
            })
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<(), OrderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_order_pool_error)?;

        conn.transaction(|conn| {
            async move {
                diesel::delete(order_lines::table.filter(order_lines::order_id.eq(id)))
                    .execute(conn)
                    .await?;

                diesel::delete(orders::table.filter(orders::id.eq(id)))
                    .execute(conn)
                    .await?;

                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_order_diesel_error)?;

        Ok(())
    }
}
