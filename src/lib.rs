//! # sqlbridge
//!
//! Route one MySQL-shaped connection string across heterogeneous relational
//! backends.
//!
//! sqlbridge provides:
//! - A parser and rewriter for `user[:password]@protocol(address)/database`
//!   connection strings, including cluster address expansion and per-dialect
//!   parameter remapping
//! - A backend registry dispatching opens to native drivers, with query text
//!   normalization on every statement
//! - A read/write-split pooled connection manager over sqlx
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sqlbridge::prelude::*;
//!
//! let registry = BackendRegistry::builder()
//!     .register(Backend::Dm8, dm_driver)
//!     .build(DriverConfig::default().backend_tag(Some("dm8")));
//!
//! let mut conn = registry
//!     .open("user:pass@tcp(h1,h2:5236)/mydb?timeout=10s")
//!     .await?;
//! conn.exec("UPDATE `t` SET `a` = ?", &[1i64.into()]).await?;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Connection-string parsing and rewriting.
pub mod dsn {
    pub use sqlbridge_dsn::*;
}

/// Backend registry and dispatch.
pub mod driver {
    pub use sqlbridge_driver::*;
}

/// Read/write-split pooled connection management.
pub mod rwsplit {
    pub use sqlbridge_rwsplit::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::driver::{
        Backend, BackendRegistry, BoundValue, DriverConfig, DriverError, DriverResult,
    };
    pub use crate::dsn::{ConnectionDescriptor, Dialect, DsnError, DsnResult, ServiceFile};
    pub use crate::rwsplit::{SplitConfig, SplitDb, SplitError, SplitResult};
}

// Re-export key types at the crate root
pub use driver::{Backend, BackendRegistry, DriverConfig, DriverError};
pub use dsn::{ConnectionDescriptor, Dialect, DsnError};
pub use rwsplit::{SplitConfig, SplitDb, SplitError};
