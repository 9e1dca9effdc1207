//! Domain layer: entities, ports, services, and the access guard.
//!
//! Everything in here is transport and storage agnostic. Inbound adapters
//! call the driving ports in [`ports`]; the persistence adapter implements
//! the driven (repository) ports.

pub mod access;
pub mod catalog;
pub mod catalog_service;
pub mod error;
pub mod order;
pub mod order_service;
pub mod ports;

pub use self::access::{authorize, Action, Principal, Role};
pub use self::catalog_service::CatalogService;
pub use self::error::{Error, ErrorCode};
pub use self::order_service::OrderService;
