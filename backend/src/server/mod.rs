//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    config::CookieContentSecurity, storage::CookieSessionStore, SessionMiddleware,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

use crate::domain::{CatalogService, OrderService};
use crate::inbound::http::categories::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use crate::inbound::http::health::{live, ready, HealthState};
use crate::inbound::http::orders::{delete_order, get_order, list_orders, place_order};
use crate::inbound::http::products::{
    create_product, delete_product, get_product, list_products, update_product,
};
use crate::inbound::http::state::HttpState;
use crate::middleware::RequestTrace;
use crate::outbound::persistence::{
    DieselCategoryRepository, DieselOrderRepository, DieselProductRepository,
};

/// Everything an app instance needs; cloned into each worker.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
}

/// Assemble the Actix application: session middleware, request tracing, the
/// versioned API scope, and the health probes.
///
/// Public so integration tests can run the full HTTP surface against
/// in-memory port implementations.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(list_categories)
        .service(get_category)
        .service(create_category)
        .service(update_category)
        .service(delete_category)
        .service(list_products)
        .service(get_product)
        .service(create_product)
        .service(update_product)
        .service(delete_product)
        .service(place_order)
        .service(list_orders)
        .service(get_order)
        .service(delete_order);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(RequestTrace)
        .service(api)
        .service(ready)
        .service(live)
}

/// Wire the Diesel repositories and domain services into an [`HttpState`].
fn build_http_state(config: &ServerConfig) -> HttpState {
    let categories = Arc::new(DieselCategoryRepository::new(config.db_pool.clone()));
    let products = Arc::new(DieselProductRepository::new(config.db_pool.clone()));
    let orders = Arc::new(DieselOrderRepository::new(config.db_pool.clone()));

    let catalog = Arc::new(CatalogService::new(categories, products.clone()));
    let order_service = Arc::new(OrderService::new(orders, products));

    HttpState::new(
        catalog.clone(),
        catalog,
        order_service.clone(),
        order_service,
    )
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        key,
        cookie_secure,
        bind_addr,
        db_pool: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
