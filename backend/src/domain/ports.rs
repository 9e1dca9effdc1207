//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports (`CatalogQuery`, `CatalogCommand`, `OrderQuery`,
//! `OrderCommand`) are what inbound adapters call; driven ports (the
//! repository traits) are what the persistence adapter implements. Each
//! driven trait exposes strongly typed errors so adapters map their
//! failures into predictable variants.

use async_trait::async_trait;
use thiserror::Error as ThisError;
use uuid::Uuid;

use crate::domain::access::Principal;
use crate::domain::catalog::{
    AuditStamp, Category, CategoryChanges, CategoryDraft, Product, ProductChanges, ProductDraft,
};
use crate::domain::order::{Order, OrderAggregate, OrderLine, OrderLineSubmission};
use crate::domain::Error;

// ---------------------------------------------------------------------------
// Driven port errors
// ---------------------------------------------------------------------------

/// Persistence errors raised by catalog repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CatalogRepositoryError {
    /// Pool checkout or connectivity failure.
    #[error("catalog repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("catalog repository query failed: {message}")]
    Query { message: String },
}

impl CatalogRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by order repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum OrderRepositoryError {
    /// Pool checkout or connectivity failure.
    #[error("order repository connection failed: {message}")]
    Connection { message: String },
    /// Query, mutation, or transaction failure.
    #[error("order repository query failed: {message}")]
    Query { message: String },
}

impl OrderRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Outcome of a guarded update: either rows were written or none matched.
///
/// Zero rows means the record vanished or changed between read and write;
/// the service re-checks existence once to disambiguate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    Applied,
    ZeroRows,
}

// ---------------------------------------------------------------------------
// Driven ports (repositories)
// ---------------------------------------------------------------------------

/// Persistence port for categories.
///
/// `find_active_by_id` is the single place the soft-delete filter is
/// applied for point reads; callers never re-implement it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All active categories, ordered by name.
    async fn list_active(&self) -> Result<Vec<Category>, CatalogRepositoryError>;

    /// Point read without the soft-delete filter.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CatalogRepositoryError>;

    /// Point read restricted to active records.
    async fn find_active_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Category>, CatalogRepositoryError>;

    /// Insert a freshly created category.
    async fn insert(&self, category: &Category) -> Result<(), CatalogRepositoryError>;

    /// Overwrite mutable fields of an active category, stamping the audit
    /// fields from `stamp`.
    async fn update(
        &self,
        id: Uuid,
        changes: &CategoryChanges,
        stamp: &AuditStamp,
    ) -> Result<UpdateStatus, CatalogRepositoryError>;

    /// Idempotent soft delete: flips the active flag if set, otherwise does
    /// nothing.
    async fn set_inactive(&self, id: Uuid, stamp: &AuditStamp)
        -> Result<(), CatalogRepositoryError>;
}

/// Persistence port for products.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All active products, ordered by name.
    async fn list_active(&self) -> Result<Vec<Product>, CatalogRepositoryError>;

    /// Active products whose name, description, or category name contains
    /// `term` (case-sensitive substring).
    async fn search_active(&self, term: &str) -> Result<Vec<Product>, CatalogRepositoryError>;

    /// Point read without the soft-delete filter.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogRepositoryError>;

    /// Point read restricted to active records.
    async fn find_active_by_id(&self, id: Uuid)
        -> Result<Option<Product>, CatalogRepositoryError>;

    /// Insert a freshly created product.
    async fn insert(&self, product: &Product) -> Result<(), CatalogRepositoryError>;

    /// Overwrite mutable fields of an active product, stamping the audit
    /// fields from `stamp`.
    async fn update(
        &self,
        id: Uuid,
        changes: &ProductChanges,
        stamp: &AuditStamp,
    ) -> Result<UpdateStatus, CatalogRepositoryError>;

    /// Idempotent soft delete.
    async fn set_inactive(&self, id: Uuid, stamp: &AuditStamp)
        -> Result<(), CatalogRepositoryError>;
}

/// Persistence port for the order aggregate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist an order and its lines as one atomic unit; either all rows
    /// are written or none are.
    async fn create(&self, order: &Order, lines: &[OrderLine])
        -> Result<(), OrderRepositoryError>;

    /// Fully materialized aggregate: order, lines, referenced product names.
    async fn find_with_lines(
        &self,
        id: Uuid,
    ) -> Result<Option<OrderAggregate>, OrderRepositoryError>;

    /// All orders with their lines, newest-first by order date.
    async fn list_with_lines(&self) -> Result<Vec<OrderAggregate>, OrderRepositoryError>;

    /// Hard-delete an order and its lines; no-op when absent.
    async fn delete(&self, id: Uuid) -> Result<(), OrderRepositoryError>;
}

// ---------------------------------------------------------------------------
// Driving ports (use-cases)
// ---------------------------------------------------------------------------

/// Catalog read operations.
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Active categories, inactive records excluded unconditionally.
    async fn list_categories(&self, principal: &Principal) -> Result<Vec<Category>, Error>;

    /// One active category; NotFound when missing or soft-deleted.
    async fn get_category(&self, principal: &Principal, id: Uuid) -> Result<Category, Error>;

    /// Active products; a non-blank `search` term restricts the result to
    /// substring matches across name, description, and category name.
    async fn list_products(
        &self,
        principal: &Principal,
        search: Option<&str>,
    ) -> Result<Vec<Product>, Error>;

    /// One active product; NotFound when missing or soft-deleted.
    async fn get_product(&self, principal: &Principal, id: Uuid) -> Result<Product, Error>;
}

/// Catalog write operations (admin only).
#[async_trait]
pub trait CatalogCommand: Send + Sync {
    async fn create_category(
        &self,
        principal: &Principal,
        draft: CategoryDraft,
    ) -> Result<Category, Error>;

    async fn update_category(
        &self,
        principal: &Principal,
        id: Uuid,
        draft: CategoryDraft,
    ) -> Result<(), Error>;

    async fn delete_category(&self, principal: &Principal, id: Uuid) -> Result<(), Error>;

    async fn create_product(
        &self,
        principal: &Principal,
        draft: ProductDraft,
    ) -> Result<Product, Error>;

    async fn update_product(
        &self,
        principal: &Principal,
        id: Uuid,
        draft: ProductDraft,
    ) -> Result<(), Error>;

    async fn delete_product(&self, principal: &Principal, id: Uuid) -> Result<(), Error>;
}

/// A guest order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceOrderRequest {
    pub guest_name: String,
    pub guest_email: String,
    pub lines: Vec<OrderLineSubmission>,
}

/// The persisted outcome of a placement: the order plus the lines that were
/// actually written (lines for unknown products are dropped).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order: Order,
    pub lines: Vec<OrderLine>,
}

/// Order write operations (open to guests).
#[async_trait]
pub trait OrderCommand: Send + Sync {
    async fn place_order(
        &self,
        principal: &Principal,
        request: PlaceOrderRequest,
    ) -> Result<PlacedOrder, Error>;

    /// Hard-delete; no-op when absent.
    async fn delete_order(&self, principal: &Principal, id: Uuid) -> Result<(), Error>;
}

/// Order read operations.
#[async_trait]
pub trait OrderQuery: Send + Sync {
    async fn list_orders(&self, principal: &Principal) -> Result<Vec<OrderAggregate>, Error>;

    async fn get_order(&self, principal: &Principal, id: Uuid) -> Result<OrderAggregate, Error>;
}
