//! # sqlbridge-driver
//!
//! Backend registry and dispatch for MySQL-shaped connection strings.
//!
//! A [`BackendRegistry`] maps each [`Backend`] tag to an opaque
//! [`NativeDriver`] registered explicitly at startup. `open` and
//! `open_connector` translate the generic connection string into the
//! backend's native descriptor (through `sqlbridge-dsn`), call the native
//! primitive, and wrap the result so that every subsequent exec/query/prepare
//! passes through the query text normalizer first.
//!
//! ```rust,ignore
//! use sqlbridge_driver::{Backend, BackendRegistry, DriverConfig};
//!
//! let registry = BackendRegistry::builder()
//!     .register(Backend::MySql, mysql_driver)
//!     .register(Backend::Dm8, dm_driver)
//!     .build(DriverConfig::default().backend_tag(Some("dm8")));
//!
//! let mut conn = registry.open("user:pass@tcp(host:5236)/mydb?timeout=10s").await?;
//! let affected = conn.exec("UPDATE `t` SET a = 1", &[]).await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod connection;
pub mod error;
pub mod registry;
pub mod rewrite;
pub mod value;

pub use backend::Backend;
pub use config::{DRIVER_NAME, DriverConfig};
pub use connection::{
    BridgeConnection, BridgeConnector, BridgeStatement, NativeConnection, NativeConnector,
    NativeDriver, NativeStatement, Row,
};
pub use error::{BackendError, BackendResult, DriverError, DriverResult};
pub use registry::{BackendRegistry, BackendRegistryBuilder};
pub use rewrite::QueryRewrite;
pub use value::BoundValue;
