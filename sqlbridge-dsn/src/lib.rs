//! # sqlbridge-dsn
//!
//! Parsing and rewriting of MySQL-shaped connection strings.
//!
//! One generic connection string of the form
//! `user[:password]@protocol(address)/database[?key=value&...]` is parsed into
//! a [`ConnectionDescriptor`] and rendered into the native form each backend
//! dialect expects:
//!
//! - [`Dialect::MySql`] — lossless passthrough re-rendering
//! - [`Dialect::Dm`] — a `dm://` URL with renamed parameters and, for
//!   comma-separated cluster addresses, a named-service descriptor file
//! - [`Dialect::Kingbase`] — a space-separated key/value string
//!
//! Parsing is total: success yields a fully populated descriptor, failure a
//! typed [`DsnError`]. The only side effect in the whole crate is the
//! cluster service-file write performed by the DM dialect.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cluster;
pub mod descriptor;
pub mod dialect;
pub mod duration;
pub mod error;
pub mod params;
pub mod service;

pub use cluster::{ClusterAddressList, HostPort};
pub use descriptor::{ConnectionDescriptor, Param};
pub use dialect::{Dialect, RenderOptions, escape_userinfo};
pub use duration::parse_duration;
pub use error::{DsnError, DsnResult};
pub use params::{ParamMode, ParamRule, ParamRules, remap_params};
pub use service::ServiceFile;
