//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CatalogCommand, CatalogQuery, OrderCommand, OrderQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalog: Arc<dyn CatalogQuery>,
    pub catalog_commands: Arc<dyn CatalogCommand>,
    pub orders: Arc<dyn OrderQuery>,
    pub order_commands: Arc<dyn OrderCommand>,
}

impl HttpState {
    /// Bundle the driving port implementations for handler injection.
    pub fn new(
        catalog: Arc<dyn CatalogQuery>,
        catalog_commands: Arc<dyn CatalogCommand>,
        orders: Arc<dyn OrderQuery>,
        order_commands: Arc<dyn OrderCommand>,
    ) -> Self {
        Self {
            catalog,
            catalog_commands,
            orders,
            order_commands,
        }
    }
}
