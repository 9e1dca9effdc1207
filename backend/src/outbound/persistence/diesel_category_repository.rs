//! Diesel-backed implementation of the category repository port.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::catalog::{AuditStamp, Category, CategoryChanges};
use crate::domain::ports::{CatalogRepositoryError, CategoryRepository, UpdateStatus};

use super::diesel_helpers::{map_diesel_error, map_pool_error, update_status};
use super::models::{CategoryChangesRow, CategoryRow, CategorySoftDeleteRow, NewCategoryRow};
use super::pool::DbPool;
use super::schema::categories;

/// PostgreSQL adapter for [`CategoryRepository`].
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        id: Uuid,
        active_only: bool,
    ) -> Result<Option<Category>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = categories::table
            .filter(categories::id.eq(id))
            .select(CategoryRow::as_select())
            .into_boxed();
        if active_only {
            query = query.filter(categories::is_active.eq(true));
        }

        let row: Option<CategoryRow> = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Category::from))
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list_active(&self) -> Result<Vec<Category>, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CategoryRow> = categories::table
            .filter(categories::is_active.eq(true))
            .select(CategoryRow::as_select())
            .order_by(categories::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, CatalogRepositoryError> {
        self.find_one(id, false).await
    }

    async fn find_active_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Category>, CatalogRepositoryError> {
        self.find_one(id, true).await
    }

    async fn insert(&self, category: &Category) -> Result<(), CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(categories::table)
            .values(NewCategoryRow::from_domain(category))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &CategoryChanges,
        stamp: &AuditStamp,
    ) -> Result<UpdateStatus, CatalogRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated_rows = diesel::update(categories::table)
            .filter(categories::id.eq(id))
            .filter(categories::is_active.eq(true))
            .set(CategoryChangesRow::from_domain(changes, stamp))
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

        // Zero affected rows is fine here: the record is already inactive or
        // was never there, and the operation is idempotent either way.
        diesel::update(categories::table)
            .filter(categories::id.eq(id))
            .filter(categories::is_active.eq(true))
            .set(CategorySoftDeleteRow {
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
