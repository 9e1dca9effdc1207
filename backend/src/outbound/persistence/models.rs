//! Internal Diesel row structs for database operations.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain. They exist to satisfy Diesel's type requirements for queries and
//! mutations.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::catalog::{AuditStamp, Category, CategoryChanges, Product, ProductChanges};
use crate::domain::order::{Order, OrderLine};

use super::schema::{categories, order_lines, orders, products};

// ---------------------------------------------------------------------------
// Category models
// ---------------------------------------------------------------------------

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

/// Insertable struct for creating new category records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: &'a str,
}

impl<'a> NewCategoryRow<'a> {
    pub(crate) fn from_domain(category: &'a Category) -> Self {
        Self {
            id: category.id,
            name: category.name.as_str(),
            description: category.description.as_deref(),
            is_active: category.is_active,
            created_at: category.created_at,
            created_by: category.created_by.as_str(),
        }
    }
}

/// Changeset for category edits; `None` description clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = categories)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CategoryChangesRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: &'a str,
}

impl<'a> CategoryChangesRow<'a> {
    pub(crate) fn from_domain(changes: &'a CategoryChanges, stamp: &'a AuditStamp) -> Self {
        Self {
            name: changes.name(),
            description: changes.description(),
            updated_at: stamp.at,
            updated_by: stamp.by.as_str(),
        }
    }
}

/// Changeset flipping the soft-delete flag.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = categories)]
pub(crate) struct CategorySoftDeleteRow<'a> {
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
    pub updated_by: &'a str,
}

// ---------------------------------------------------------------------------
// Product models
// ---------------------------------------------------------------------------

/// Row struct for reading from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub quantity: i32,
    pub category_id: Uuid,
    pub image_url: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            quantity: row.quantity,
            category_id: row.category_id,
            image_url: row.image_url,
            is_active: row.is_active,
            created_at: row.created_at,
            created_by: row.created_by,
            updated_at: row.updated_at,
            updated_by: row.updated_by,
        }
    }
}

/// Insertable struct for creating new product records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: &'a BigDecimal,
    pub quantity: i32,
    pub category_id: Uuid,
    pub image_url: &'a str,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: &'a str,
}

impl<'a> NewProductRow<'a> {
    pub(crate) fn from_domain(product: &'a Product) -> Self {
        Self {
            id: product.id,
            name: product.name.as_str(),
            description: product.description.as_deref(),
            price: &product.price,
            quantity: product.quantity,
            category_id: product.category_id,
            image_url: product.image_url.as_str(),
            is_active: product.is_active,
            created_at: product.created_at,
            created_by: product.created_by.as_str(),
        }
    }
}

/// Changeset for product edits; `None` description clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProductChangesRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: &'a BigDecimal,
    pub quantity: i32,
    pub category_id: Uuid,
    pub image_url: &'a str,
    pub updated_at: DateTime<Utc>,
    pub updated_by: &'a str,
}

impl<'a> ProductChangesRow<'a> {
    pub(crate) fn from_domain(changes: &'a ProductChanges, stamp: &'a AuditStamp) -> Self {
        Self {
            name: changes.name(),
            description: changes.description(),
            price: changes.price(),
            quantity: changes.quantity(),
            category_id: changes.category_id(),
            image_url: changes.image_url(),
            updated_at: stamp.at,
            updated_by: stamp.by.as_str(),
        }
    }
}

/// Changeset flipping the soft-delete flag.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductSoftDeleteRow<'a> {
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
    pub updated_by: &'a str,
}

// ---------------------------------------------------------------------------
// Order models
// ---------------------------------------------------------------------------

/// Row struct for reading from the orders table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderRow {
    pub id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    pub order_date: DateTime<Utc>,
    pub total_amount: BigDecimal,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            guest_name: row.guest_name,
            guest_email: row.guest_email,
            order_date: row.order_date,
            total_amount: row.total_amount,
        }
    }
}

/// Insertable struct for order headers; owned so it can cross the
/// transaction closure.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub(crate) struct NewOrderRow {
    pub id: Uuid,
    pub guest_name: String,
    pub guest_email: String,
    pub order_date: DateTime<Utc>,
    pub total_amount: BigDecimal,
}

impl From<&Order> for NewOrderRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            guest_name: order.guest_name.clone(),
            guest_email: order.guest_email.clone(),
            order_date: order.order_date,
            total_amount: order.total_amount.clone(),
        }
    }
}

/// Row struct for reading from the order_lines table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = order_lines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        Self {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            quantity: row.quantity,
            unit_price: row.unit_price,
        }
    }
}

/// Insertable struct for order lines; owned for the same reason as
/// [`NewOrderRow`].
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = order_lines)]
pub(crate) struct NewOrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
}

impl From<&OrderLine> for NewOrderLineRow {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: line.id,
            order_id: line.order_id,
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price.clone(),
        }
    }
}
