//! Catalog domain service.
//!
//! Implements the catalog driving ports on top of the category and product
//! repositories. Every operation authorizes the acting principal first,
//! then validates, then touches storage.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::access::{authorize, Action, Principal};
use crate::domain::catalog::{
    AuditStamp, CatalogValidationError, Category, CategoryChanges, CategoryDraft, Product,
    ProductChanges, ProductDraft,
};
use crate::domain::ports::{
    CatalogCommand, CatalogQuery, CatalogRepositoryError, CategoryRepository, ProductRepository,
    UpdateStatus,
};
use crate::domain::Error;

fn map_repository_error(error: CatalogRepositoryError) -> Error {
    match error {
        CatalogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalog repository unavailable: {message}"))
        }
        CatalogRepositoryError::Query { message } => {
            Error::internal(format!("catalog repository error: {message}"))
        }
    }
}

fn validation_error(error: CatalogValidationError) -> Error {
    Error::invalid_request(error.to_string())
        .with_details(serde_json::json!({ "field": error.field() }))
}

/// Catalog service over a category and a product repository.
#[derive(Clone)]
pub struct CatalogService<C, P> {
    categories: Arc<C>,
    products: Arc<P>,
}

impl<C, P> CatalogService<C, P> {
    /// Create a new service with the given repositories.
    pub fn new(categories: Arc<C>, products: Arc<P>) -> Self {
        Self {
            categories,
            products,
        }
    }
}

/// Resolve a zero-row update: the record changed between read and write, so
/// existence was re-checked once. Vanished or soft-deleted records report
/// NotFound; anything else is a fatal conflict.
fn resolve_zero_rows(kind: &str, still_active: bool) -> Error {
    if still_active {
        Error::conflict(format!("{kind} was modified concurrently"))
    } else {
        Error::not_found(format!("{kind} not found"))
    }
}

#[async_trait]
impl<C, P> CatalogQuery for CatalogService<C, P>
where
    C: CategoryRepository,
    P: ProductRepository,
{
    async fn list_categories(&self, principal: &Principal) -> Result<Vec<Category>, Error> {
        authorize(principal, Action::ReadCatalog)?;
        self.categories
            .list_active()
            .await
            .map_err(map_repository_error)
    }

    async fn get_category(&self, principal: &Principal, id: Uuid) -> Result<Category, Error> {
        authorize(principal, Action::ReadCatalog)?;
        self.categories
            .find_active_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("category {id} not found")))
    }

    async fn list_products(
        &self,
        principal: &Principal,
        search: Option<&str>,
    ) -> Result<Vec<Product>, Error> {
        authorize(principal, Action::ReadCatalog)?;
        // A blank term returns the same set as the plain active listing.
        match search.map(str::trim).filter(|term| !term.is_empty()) {
            Some(term) => self
                .products
                .search_active(term)
                .await
                .map_err(map_repository_error),
            None => self
                .products
                .list_active()
                .await
                .map_err(map_repository_error),
        }
    }

    async fn get_product(&self, principal: &Principal, id: Uuid) -> Result<Product, Error> {
        authorize(principal, Action::ReadCatalog)?;
        self.products
            .find_active_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("product {id} not found")))
    }
}

#[async_trait]
impl<C, P> CatalogCommand for CatalogService<C, P>
where
    C: CategoryRepository,
    P: ProductRepository,
{
    async fn create_category(
        &self,
        principal: &Principal,
        draft: CategoryDraft,
    ) -> Result<Category, Error> {
        authorize(principal, Action::MutateCatalog)?;
        let stamp = AuditStamp::now(principal.audit_name());
        let category = Category::create(draft, stamp).map_err(validation_error)?;
        self.categories
            .insert(&category)
            .await
            .map_err(map_repository_error)?;
        info!(category_id = %category.id, actor = %category.created_by, "category created");
        Ok(category)
    }

    async fn update_category(
        &self,
        principal: &Principal,
        id: Uuid,
        draft: CategoryDraft,
    ) -> Result<(), Error> {
        authorize(principal, Action::MutateCatalog)?;
        let changes =
            CategoryChanges::new(draft.name, draft.description).map_err(validation_error)?;
        if self
            .categories
            .find_active_by_id(id)
            .await
            .map_err(map_repository_error)?
            .is_none()
        {
            return Err(Error::not_found(format!("category {id} not found")));
        }
        let stamp = AuditStamp::now(principal.audit_name());
        match self
            .categories
            .update(id, &changes, &stamp)
            .await
            .map_err(map_repository_error)?
        {
            UpdateStatus::Applied => {
                info!(category_id = %id, actor = %stamp.by, "category updated");
                Ok(())
            }
            UpdateStatus::ZeroRows => {
                let still_active = self
                    .categories
                    .find_active_by_id(id)
                    .await
                    .map_err(map_repository_error)?
                    .is_some();
                Err(resolve_zero_rows("category", still_active))
            }
        }
    }

    async fn delete_category(&self, principal: &Principal, id: Uuid) -> Result<(), Error> {
        authorize(principal, Action::MutateCatalog)?;
        let stamp = AuditStamp::now(principal.audit_name());
        self.categories
            .set_inactive(id, &stamp)
            .await
            .map_err(map_repository_error)?;
        info!(category_id = %id, actor = %stamp.by, "category soft-deleted");
        Ok(())
    }

    async fn create_product(
        &self,
        principal: &Principal,
        draft: ProductDraft,
    ) -> Result<Product, Error> {
        authorize(principal, Action::MutateCatalog)?;
        if self
            .categories
            .find_active_by_id(draft.category_id)
            .await
            .map_err(map_repository_error)?
            .is_none()
        {
            return Err(Error::invalid_request("category does not exist")
                .with_details(serde_json::json!({ "field": "categoryId" })));
        }
        let stamp = AuditStamp::now(principal.audit_name());
        let product = Product::create(draft, stamp).map_err(validation_error)?;
        self.products
            .insert(&product)
            .await
            .map_err(map_repository_error)?;
        info!(product_id = %product.id, actor = %product.created_by, "product created");
        Ok(product)
    }

    async fn update_product(
        &self,
        principal: &Principal,
        id: Uuid,
        draft: ProductDraft,
    ) -> Result<(), Error> {
        authorize(principal, Action::MutateCatalog)?;
        let changes = ProductChanges::new(draft).map_err(validation_error)?;
        if self
            .categories
            .find_active_by_id(changes.category_id())
            .await
            .map_err(map_repository_error)?
            .is_none()
        {
            return Err(Error::invalid_request("category does not exist")
                .with_details(serde_json::json!({ "field": "categoryId" })));
        }
        if self
            .products
            .find_active_by_id(id)
            .await
            .map_err(map_repository_error)?
            .is_none()
        {
            return Err(Error::not_found(format!("product {id} not found")));
        }
        let stamp = AuditStamp::now(principal.audit_name());
        match self
            .products
            .update(id, &changes, &stamp)
            .await
            .map_err(map_repository_error)?
        {
            UpdateStatus::Applied => {
                info!(product_id = %id, actor = %stamp.by, "product updated");
                Ok(())
            }
            UpdateStatus::ZeroRows => {
                let still_active = self
                    .products
                    .find_active_by_id(id)
                    .await
                    .map_err(map_repository_error)?
                    .is_some();
                Err(resolve_zero_rows("product", still_active))
            }
        }
    }

    async fn delete_product(&self, principal: &Principal, id: Uuid) -> Result<(), Error> {
        authorize(principal, Action::MutateCatalog)?;
        let stamp = AuditStamp::now(principal.audit_name());
        self.products
            .set_inactive(id, &stamp)
            .await
            .map_err(map_repository_error)?;
        info!(product_id = %id, actor = %stamp.by, "product soft-deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "catalog_service_tests.rs"]
mod tests;
