//! Persistence adapters backed by PostgreSQL via Diesel.

pub mod diesel_category_repository;
mod diesel_helpers;
pub mod diesel_order_repository;
pub mod diesel_product_repository;
mod models;
pub mod pool;
pub mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_order_repository::DieselOrderRepository;
pub use diesel_product_repository::DieselProductRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
