//! # sqlbridge-rwsplit
//!
//! Read/write-split pooled connection manager for MySQL-compatible backends.
//!
//! A [`SplitDb`] owns two sqlx pools built from one [`SplitConfig`]: an
//! eagerly verified primary for writes and transactions, and a lazily
//! connected replica for reads. When no replica is configured the read handle
//! aliases the primary and every call still succeeds.
//!
//! ```rust,ignore
//! use sqlbridge_rwsplit::{SplitConfig, SplitDb};
//!
//! let config = SplitConfig {
//!     user: "app".into(),
//!     password: "secret".into(),
//!     host: "db.internal".into(),
//!     read_host: Some("replica.internal".into()),
//!     database: "orders".into(),
//!     ..SplitConfig::default()
//! };
//! let db = SplitDb::connect(&config).await?;
//! let rows = db.fetch_all("SELECT id FROM orders").await?; // replica
//! db.execute("DELETE FROM orders WHERE id = 1").await?;    // primary
//! db.close().await;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod db;
pub mod error;

pub use config::{DEFAULT_MAX_OPEN, SplitConfig, bracket_host};
pub use db::{IDLE_TIMEOUT, SplitDb};
pub use error::{SplitError, SplitResult};
