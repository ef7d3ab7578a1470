//! The read/write-split connection set.
//!
//! Two pools over one configuration. The write pool is built eagerly and its
//! liveness verified with a ping; a failure there is fatal to construction.
//! The read pool is built lazily when a replica endpoint is configured, and
//! otherwise aliases the write pool.
//!
//! Both pools keep as many idle connections as their open-connection cap.
//! With a smaller idle cap, a throughput burst churns through short-lived
//! connections and leaves the client host piling up TIME_WAIT sockets; pinning
//! the two caps together keeps the burst's connections reusable. Idle
//! retirement is fixed at 120 seconds so the previous batch of closed sockets
//! has left TIME_WAIT before the next retirement wave.

use std::time::Duration;

use sqlx::mysql::{MySqlPoolOptions, MySqlRow, MySqlStatement};
use sqlx::{Connection, Executor, MySql, MySqlPool, Statement, Transaction};
use tracing::{debug, info};

use crate::config::SplitConfig;
use crate::error::{SplitError, SplitResult};

/// Fixed idle-connection retirement time, shared by both pools.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(120);

/// A pooled connection set with statement-kind routing.
///
/// Reads go to the replica pool, writes and transactions to the primary.
/// Routing is by call site, not by SQL inspection: `fetch_*` is a read,
/// everything else is a write.
#[derive(Clone, Debug)]
pub struct SplitDb {
    write: MySqlPool,
    read: MySqlPool,
    dedicated_read: bool,
}

fn pool_options(max_open: u32, config: &SplitConfig) -> MySqlPoolOptions {
    let mut options = MySqlPoolOptions::new()
        .max_connections(max_open)
        .min_connections(max_open)
        .idle_timeout(IDLE_TIMEOUT);
    if let Some(lifetime) = config.max_lifetime() {
        options = options.max_lifetime(lifetime);
    }
    if let Some(timeout) = config.acquire_timeout() {
        options = options.acquire_timeout(timeout);
    }
    options
}

impl SplitDb {
    /// Build the connection set.
    ///
    /// The primary pool is connected and pinged before this returns; the
    /// replica pool, when configured, defers its first connection to first
    /// use.
    pub async fn connect(config: &SplitConfig) -> SplitResult<Self> {
        if config.host.is_empty() {
            return Err(SplitError::config("primary host is required"));
        }

        let write_url = config.write_url()?;
        let write = pool_options(config.effective_max_open(), config)
            .connect(&write_url)
            .await?;
        write.acquire().await?.ping().await?;
        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_open = config.effective_max_open(),
            "primary pool ready"
        );

        let read = match config.read_url()? {
            Some(read_url) => {
                let read = pool_options(config.effective_max_open_read(), config)
                    .connect_lazy(&read_url)?;
                info!(
                    host = config.read_host.as_deref().unwrap_or_default(),
                    port = config.read_port.unwrap_or(config.port),
                    max_open = config.effective_max_open_read(),
                    "replica pool configured"
                );
                Some(read)
            }
            None => {
                debug!("no replica configured, reads share the primary pool");
                None
            }
        };

        Ok(Self::assemble(write, read))
    }

    /// Pair the primary pool with a replica, or alias the primary for reads
    /// when no replica exists.
    fn assemble(write: MySqlPool, read: Option<MySqlPool>) -> Self {
        match read {
            Some(read) => Self {
                write,
                read,
                dedicated_read: true,
            },
            None => Self {
                read: write.clone(),
                write,
                dedicated_read: false,
            },
        }
    }

    /// Whether reads go to a dedicated replica pool.
    pub fn is_split(&self) -> bool {
        self.dedicated_read
    }

    /// The pool read operations route to.
    pub fn read_pool(&self) -> &MySqlPool {
        &self.read
    }

    /// The pool write and transactional operations route to.
    pub fn write_pool(&self) -> &MySqlPool {
        &self.write
    }

    /// Run a query on the read pool and collect all rows.
    pub async fn fetch_all(&self, sql: &str) -> SplitResult<Vec<MySqlRow>> {
        Ok(sqlx::query(sql).fetch_all(&self.read).await?)
    }

    /// Run a query on the read pool, expecting exactly one row.
    pub async fn fetch_one(&self, sql: &str) -> SplitResult<MySqlRow> {
        Ok(sqlx::query(sql).fetch_one(&self.read).await?)
    }

    /// Run a query on the read pool, expecting at most one row.
    pub async fn fetch_optional(&self, sql: &str) -> SplitResult<Option<MySqlRow>> {
        Ok(sqlx::query(sql).fetch_optional(&self.read).await?)
    }

    /// Execute a statement on the write pool, returning the affected-row
    /// count.
    pub async fn execute(&self, sql: &str) -> SplitResult<u64> {
        let done = sqlx::query(sql).execute(&self.write).await?;
        Ok(done.rows_affected())
    }

    /// Prepare a statement on the write pool.
    pub async fn prepare(&self, sql: &str) -> SplitResult<MySqlStatement<'static>> {
        let mut conn = self.write.acquire().await?;
        let statement = (&mut *conn).prepare(sql).await?;
        Ok(Statement::to_owned(&statement))
    }

    /// Begin a transaction on the write pool.
    pub async fn begin(&self) -> SplitResult<Transaction<'static, MySql>> {
        Ok(self.write.begin().await?)
    }

    /// Verify primary liveness.
    pub async fn ping(&self) -> SplitResult<()> {
        self.write.acquire().await?.ping().await?;
        Ok(())
    }

    /// Close both pools. The read pool is skipped when it aliases the
    /// primary.
    pub async fn close(&self) {
        if self.dedicated_read {
            self.read.close().await;
        }
        self.write.close().await;
        info!("connection set closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Lazy pools never dial out, so the alias wiring is observable without a
    // server.
    fn lazy_pool() -> MySqlPool {
        MySqlPoolOptions::new()
            .connect_lazy("mysql://app@localhost:3306/orders")
            .unwrap()
    }

    #[tokio::test]
    async fn test_connect_requires_primary_host() {
        let config = SplitConfig::default();
        let err = SplitDb::connect(&config).await.unwrap_err();
        assert!(matches!(err, SplitError::Config(_)));
    }

    #[tokio::test]
    async fn test_reads_alias_primary_without_replica() {
        let db = SplitDb::assemble(lazy_pool(), None);
        assert!(!db.is_split());

        // close() skips the read handle, yet the read handle reports closed:
        // it is the primary pool, not a distinct one.
        db.close().await;
        assert!(db.write_pool().is_closed());
        assert!(db.read_pool().is_closed());
    }

    #[tokio::test]
    async fn test_replica_pool_is_distinct_when_configured() {
        let db = SplitDb::assemble(lazy_pool(), Some(lazy_pool()));
        assert!(db.is_split());

        db.write_pool().close().await;
        assert!(!db.read_pool().is_closed());

        db.close().await;
        assert!(db.read_pool().is_closed());
    }

    #[test]
    fn test_pool_options_pin_idle_to_open() {
        // min == max keeps burst connections reusable instead of churning.
        let config = SplitConfig::default();
        let options = pool_options(8, &config);
        assert_eq!(options.get_max_connections(), 8);
        assert_eq!(options.get_min_connections(), 8);
    }
}
