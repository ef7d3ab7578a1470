//! Dispatcher configuration.

use sqlbridge_dsn::{ParamMode, RenderOptions, ServiceFile};

use crate::backend::Backend;

/// The name this dispatcher registers itself under.
pub const DRIVER_NAME: &str = "sqlbridge";

/// Explicit configuration for a [`crate::BackendRegistry`].
///
/// Everything the dispatcher needs is carried here; nothing is read from the
/// process environment.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    backend: Backend,
    param_mode: ParamMode,
    service: ServiceFile,
    verbose: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            backend: Backend::DEFAULT,
            param_mode: ParamMode::default(),
            service: ServiceFile::default(),
            verbose: false,
        }
    }
}

impl DriverConfig {
    /// Select the target backend.
    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Select the target backend by tag, falling back to the default backend
    /// when the tag is unknown or absent.
    pub fn backend_tag(mut self, tag: Option<&str>) -> Self {
        self.backend = Backend::from_tag_or_default(tag);
        self
    }

    /// Set how unknown connection-string parameters are handled.
    pub fn param_mode(mut self, mode: ParamMode) -> Self {
        self.param_mode = mode;
        self
    }

    /// Reject unknown connection-string parameters instead of dropping them.
    pub fn strict(self) -> Self {
        self.param_mode(ParamMode::Strict)
    }

    /// Override the cluster service-file name and path.
    pub fn service(mut self, service: ServiceFile) -> Self {
        self.service = service;
        self
    }

    /// Log forwarded statements and arguments at debug level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// The selected backend.
    pub fn selected_backend(&self) -> Backend {
        self.backend
    }

    /// Whether verbose statement logging is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// The rendering options derived from this configuration.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            mode: self.param_mode,
            service: self.service.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.selected_backend(), Backend::MySql);
        assert_eq!(config.render_options().mode, ParamMode::Lenient);
        assert!(!config.is_verbose());
    }

    #[test]
    fn test_builder_chain() {
        let config = DriverConfig::default()
            .backend_tag(Some("kdb9"))
            .strict()
            .verbose(true);
        assert_eq!(config.selected_backend(), Backend::Kingbase);
        assert_eq!(config.render_options().mode, ParamMode::Strict);
        assert!(config.is_verbose());
    }
}
