//! The native-driver seam and the rewriting wrappers around it.
//!
//! Native backends implement the `Native*` traits against their own wire
//! protocols and descriptor formats. The registry never hands a native handle
//! to callers directly; it wraps each one in a `Bridge*` counterpart that
//! pushes every statement and argument list through the dialect's
//! [`QueryRewrite`] before delegating.

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::{BackendResult, DriverError, DriverResult};
use crate::rewrite::QueryRewrite;
use crate::value::BoundValue;

/// A single result row, as decoded by the native backend.
pub type Row = Vec<BoundValue>;

/// A prepared statement held by a native backend.
#[async_trait]
pub trait NativeStatement: Send {
    /// Execute the statement, returning the affected-row count.
    async fn exec(&mut self, args: &[BoundValue]) -> BackendResult<u64>;

    /// Run the statement as a query and collect all rows.
    async fn query(&mut self, args: &[BoundValue]) -> BackendResult<Vec<Row>>;
}

/// An open connection held by a native backend.
#[async_trait]
pub trait NativeConnection: Send {
    /// Execute a statement directly, returning the affected-row count.
    async fn exec(&mut self, sql: &str, args: &[BoundValue]) -> BackendResult<u64>;

    /// Run a query directly and collect all rows.
    async fn query(&mut self, sql: &str, args: &[BoundValue]) -> BackendResult<Vec<Row>>;

    /// Prepare a statement for repeated execution.
    async fn prepare(&mut self, sql: &str) -> BackendResult<Box<dyn NativeStatement>>;

    /// Check connection liveness.
    async fn ping(&mut self) -> BackendResult<()>;

    /// Close the connection.
    async fn close(&mut self) -> BackendResult<()>;
}

/// A reusable connection factory bound to one native descriptor.
#[async_trait]
pub trait NativeConnector: Send + Sync {
    /// Open a fresh connection from the bound descriptor.
    async fn connect(&self) -> BackendResult<Box<dyn NativeConnection>>;
}

/// An installed native backend implementation.
#[async_trait]
pub trait NativeDriver: Send + Sync {
    /// Open a connection from a native descriptor string.
    async fn open(&self, descriptor: &str) -> BackendResult<Box<dyn NativeConnection>>;

    /// Build a reusable connector bound to a native descriptor string.
    async fn open_connector(&self, descriptor: &str) -> BackendResult<Box<dyn NativeConnector>>;
}

/// A native connection wrapped with query normalization.
pub struct BridgeConnection {
    inner: Box<dyn NativeConnection>,
    rewrite: QueryRewrite,
    verbose: bool,
}

impl std::fmt::Debug for BridgeConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConnection")
            .field("rewrite", &self.rewrite)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl BridgeConnection {
    pub(crate) fn new(inner: Box<dyn NativeConnection>, rewrite: QueryRewrite, verbose: bool) -> Self {
        Self {
            inner,
            rewrite,
            verbose,
        }
    }

    fn log_statement(&self, sql: &str, args: &[BoundValue]) {
        if self.verbose {
            let rendered: Vec<String> = args.iter().map(BoundValue::render_for_log).collect();
            debug!(sql, args = ?rendered, "forwarding statement");
        } else {
            trace!(sql, "forwarding statement");
        }
    }

    /// Execute a statement, returning the affected-row count.
    pub async fn exec(&mut self, sql: &str, args: &[BoundValue]) -> DriverResult<u64> {
        let sql = self.rewrite.rewrite_sql(sql);
        let args = self.rewrite.rewrite_args(args);
        self.log_statement(&sql, &args);
        self.inner.exec(&sql, &args).await.map_err(DriverError::backend)
    }

    /// Run a query and collect all rows.
    pub async fn query(&mut self, sql: &str, args: &[BoundValue]) -> DriverResult<Vec<Row>> {
        let sql = self.rewrite.rewrite_sql(sql);
        let args = self.rewrite.rewrite_args(args);
        self.log_statement(&sql, &args);
        self.inner.query(&sql, &args).await.map_err(DriverError::backend)
    }

    /// Prepare a statement. The statement text is normalized here, once;
    /// arguments are normalized on each execution.
    pub async fn prepare(&mut self, sql: &str) -> DriverResult<BridgeStatement> {
        let sql = self.rewrite.rewrite_sql(sql);
        if self.verbose {
            debug!(sql = %sql, "preparing statement");
        }
        let inner = self
            .inner
            .prepare(&sql)
            .await
            .map_err(DriverError::backend)?;
        Ok(BridgeStatement {
            inner,
            rewrite: self.rewrite,
            sql: sql.into_owned(),
            verbose: self.verbose,
        })
    }

    /// Check connection liveness.
    pub async fn ping(&mut self) -> DriverResult<()> {
        self.inner.ping().await.map_err(DriverError::backend)
    }

    /// Close the connection.
    pub async fn close(&mut self) -> DriverResult<()> {
        self.inner.close().await.map_err(DriverError::backend)
    }
}

/// A prepared statement wrapped with argument normalization.
pub struct BridgeStatement {
    inner: Box<dyn NativeStatement>,
    rewrite: QueryRewrite,
    sql: String,
    verbose: bool,
}

impl BridgeStatement {
    fn log_execution(&self, args: &[BoundValue]) {
        if self.verbose {
            let rendered: Vec<String> = args.iter().map(BoundValue::render_for_log).collect();
            debug!(sql = %self.sql, args = ?rendered, "executing prepared statement");
        } else {
            trace!(sql = %self.sql, "executing prepared statement");
        }
    }

    /// Execute the statement, returning the affected-row count.
    pub async fn exec(&mut self, args: &[BoundValue]) -> DriverResult<u64> {
        let args = self.rewrite.rewrite_args(args);
        self.log_execution(&args);
        self.inner.exec(&args).await.map_err(DriverError::backend)
    }

    /// Run the statement as a query and collect all rows.
    pub async fn query(&mut self, args: &[BoundValue]) -> DriverResult<Vec<Row>> {
        let args = self.rewrite.rewrite_args(args);
        self.log_execution(&args);
        self.inner.query(&args).await.map_err(DriverError::backend)
    }
}

/// A native connector wrapped so that every connection it produces carries
/// the dialect's query normalization.
pub struct BridgeConnector {
    inner: Box<dyn NativeConnector>,
    rewrite: QueryRewrite,
    verbose: bool,
}

impl BridgeConnector {
    pub(crate) fn new(inner: Box<dyn NativeConnector>, rewrite: QueryRewrite, verbose: bool) -> Self {
        Self {
            inner,
            rewrite,
            verbose,
        }
    }

    /// Open a fresh connection from the bound descriptor.
    pub async fn connect(&self) -> DriverResult<BridgeConnection> {
        let conn = self.inner.connect().await.map_err(DriverError::backend)?;
        Ok(BridgeConnection::new(conn, self.rewrite, self.verbose))
    }
}
