//! The backend registry.
//!
//! Native drivers are installed explicitly at startup against the closed
//! [`Backend`] set. Selection resolves once, at registry construction: if the
//! configured backend has no installed driver, the default backend is used
//! instead, and both the native driver and the connection-string dialect
//! follow that resolution together.

use std::collections::HashMap;
use std::sync::Arc;

use sqlbridge_dsn::ConnectionDescriptor;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::config::DriverConfig;
use crate::connection::{BridgeConnection, BridgeConnector, NativeDriver};
use crate::error::{DriverError, DriverResult};
use crate::rewrite::QueryRewrite;

/// Builder for a [`BackendRegistry`].
#[derive(Default)]
pub struct BackendRegistryBuilder {
    drivers: HashMap<Backend, Arc<dyn NativeDriver>>,
}

impl BackendRegistryBuilder {
    /// Install a native driver for a backend. Installing twice for the same
    /// backend replaces the earlier driver.
    pub fn register(mut self, backend: Backend, driver: Arc<dyn NativeDriver>) -> Self {
        self.drivers.insert(backend, driver);
        self
    }

    /// Finish construction, resolving the effective backend.
    pub fn build(self, config: DriverConfig) -> BackendRegistry {
        let selected = config.selected_backend();
        let effective = if self.drivers.contains_key(&selected) {
            selected
        } else {
            Backend::DEFAULT
        };
        if effective != selected {
            info!(
                selected = %selected,
                effective = %effective,
                "selected backend has no installed driver, using default"
            );
        }
        BackendRegistry {
            drivers: self.drivers,
            config,
            effective,
        }
    }
}

/// Maps backends to installed native drivers and dispatches opens.
pub struct BackendRegistry {
    drivers: HashMap<Backend, Arc<dyn NativeDriver>>,
    config: DriverConfig,
    effective: Backend,
}

impl BackendRegistry {
    /// Start building a registry.
    pub fn builder() -> BackendRegistryBuilder {
        BackendRegistryBuilder::default()
    }

    /// The backend opens will be dispatched to.
    pub fn effective_backend(&self) -> Backend {
        self.effective
    }

    fn driver(&self) -> DriverResult<&Arc<dyn NativeDriver>> {
        self.drivers
            .get(&self.effective)
            .ok_or(DriverError::Unregistered(self.effective))
    }

    /// Translate a generic connection string into the effective backend's
    /// native descriptor.
    ///
    /// Cluster addresses may cause a service descriptor file to be written as
    /// a side effect; see [`sqlbridge_dsn::ServiceFile`].
    pub fn translate(&self, dsn: &str) -> DriverResult<String> {
        let descriptor = ConnectionDescriptor::parse(dsn)?;
        let dialect = self.effective.dialect();
        let native = dialect.render(&descriptor, &self.config.render_options())?;
        debug!(backend = %self.effective, "translated connection string");
        Ok(native)
    }

    /// Open a connection through the effective backend.
    pub async fn open(&self, dsn: &str) -> DriverResult<BridgeConnection> {
        let driver = self.driver()?;
        let native = self.translate(dsn)?;
        let conn = driver.open(&native).await.map_err(DriverError::backend)?;
        let rewrite = QueryRewrite::for_dialect(self.effective.dialect());
        Ok(BridgeConnection::new(conn, rewrite, self.config.is_verbose()))
    }

    /// Build a reusable connector through the effective backend. The
    /// connection string is translated once, up front; every `connect` call
    /// reuses the bound native descriptor.
    pub async fn open_connector(&self, dsn: &str) -> DriverResult<BridgeConnector> {
        let driver = self.driver()?;
        let native = self.translate(dsn)?;
        let connector = driver
            .open_connector(&native)
            .await
            .map_err(DriverError::backend)?;
        let rewrite = QueryRewrite::for_dialect(self.effective.dialect());
        Ok(BridgeConnector::new(
            connector,
            rewrite,
            self.config.is_verbose(),
        ))
    }
}
