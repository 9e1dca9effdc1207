//! Diesel-backed implementation of the product repository port.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::catalog::{AuditStamp, Product, ProductChanges};
use crate::domain::ports::{CatalogRepositoryError, ProductRepository, UpdateStatus};

use super::diesel_helpers::{contains_pattern, map_diesel_error, map_pool_error, update_status};
use super::models::{NewProductRow, ProductChangesRow, ProductRow, ProductSoftDeleteRow};
use super::pool::DbPool;
use super::schema::{categories, products};

/// PostgreSQL adapter for [`ProductRepository`].
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        id: Uuid,
        active_only: bool,
    ) -> Result<Option<Product>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = products::table
            .filter(products::id.eq(id))
            .select(ProductRow::as_select())
            .into_boxed();
        if active_only {
            query = query.filter(products::is_active.eq(true));
        }

        let row: Option<ProductRow> = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Product::from))
    }
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list_active(&self) -> Result<Vec<Product>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProductRow> = products::table
            .filter(products::is_active.eq(true))
            .select(ProductRow::as_select())
            .order_by(products::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn search_active(&self, term: &str) -> Result<Vec<Product>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = contains_pattern(term);

        // Join on the category so its name participates in the match; the
        // description column is nullable, so the non-null predicates are
        // lifted with `.nullable()` to combine.
        let rows: Vec<ProductRow> = products::table
            .inner_join(categories::table)
            .filter(products::is_active.eq(true))
            .filter(
                products::name
                    .like(pattern.clone())
                    .nullable()
                    .or(products::description.like(pattern.clone()))
                    .or(categories::name.like(pattern).nullable()),
            )
            .select(ProductRow::as_select())
            .order_by(products::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, CatalogRepositoryError> {
        self.find_one(id, false).await
    }

    async fn find_active_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Product>, CatalogRepositoryError> {
        self.find_one(id, true).await
    }

    async fn insert(&self, product: &Product) -> Result<(), CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(products::table)
            .values(NewProductRow::from_domain(product))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &ProductChanges,
        stamp: &AuditStamp,
    ) -> Result<UpdateStatus, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows = diesel::update(products::table)
            .filter(products::id.eq(id))
            .filter(products::is_active.eq(true))
            .set(ProductChangesRow::from_domain(changes, stamp))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(update_status(updated_rows))
    }

    async fn set_inactive(
        &self,
        id: Uuid,
        stamp: &AuditStamp,
    ) -> Result<(), CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(products::table)
            .filter(products::id.eq(id))
            .filter(products::is_active.eq(true))
            .set(ProductSoftDeleteRow {
                is_active: false,
                updated_at: stamp.at,
                updated_by: stamp.by.as_str(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }
}
