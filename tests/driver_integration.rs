//! Integration tests for backend dispatch through the registry.
//!
//! A mock native driver records the descriptor it is opened with and the
//! statements it receives, so translation and query normalization can be
//! checked end to end without a database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use sqlbridge::driver::{
    Backend, BackendRegistry, BackendResult, BoundValue, DriverConfig, DriverError,
    NativeConnection, NativeConnector, NativeDriver, NativeStatement, Row,
};
use sqlbridge::dsn::ServiceFile;

#[derive(Default)]
struct Recorder {
    opened: Mutex<Vec<String>>,
    statements: Mutex<Vec<(String, Vec<BoundValue>)>>,
}

struct MockDriver {
    recorder: Arc<Recorder>,
}

struct MockConnection {
    recorder: Arc<Recorder>,
}

struct MockConnector {
    recorder: Arc<Recorder>,
}

struct MockStatement {
    recorder: Arc<Recorder>,
    sql: String,
}

#[async_trait]
impl NativeStatement for MockStatement {
    async fn exec(&mut self, args: &[BoundValue]) -> BackendResult<u64> {
        self.recorder
            .statements
            .lock()
            .unwrap()
            .push((self.sql.clone(), args.to_vec()));
        Ok(1)
    }

    async fn query(&mut self, args: &[BoundValue]) -> BackendResult<Vec<Row>> {
        self.recorder
            .statements
            .lock()
            .unwrap()
            .push((self.sql.clone(), args.to_vec()));
        Ok(Vec::new())
    }
}

#[async_trait]
impl NativeConnection for MockConnection {
    async fn exec(&mut self, sql: &str, args: &[BoundValue]) -> BackendResult<u64> {
        self.recorder
            .statements
            .lock()
            .unwrap()
            .push((sql.to_string(), args.to_vec()));
        Ok(1)
    }

    async fn query(&mut self, sql: &str, args: &[BoundValue]) -> BackendResult<Vec<Row>> {
        self.recorder
            .statements
            .lock()
            .unwrap()
            .push((sql.to_string(), args.to_vec()));
        Ok(Vec::new())
    }

    async fn prepare(&mut self, sql: &str) -> BackendResult<Box<dyn NativeStatement>> {
        Ok(Box::new(MockStatement {
            recorder: Arc::clone(&self.recorder),
            sql: sql.to_string(),
        }))
    }

    async fn ping(&mut self) -> BackendResult<()> {
        Ok(())
    }

    async fn close(&mut self) -> BackendResult<()> {
        Ok(())
    }
}

#[async_trait]
impl NativeConnector for MockConnector {
    async fn connect(&self) -> BackendResult<Box<dyn NativeConnection>> {
        Ok(Box::new(MockConnection {
            recorder: Arc::clone(&self.recorder),
        }))
    }
}

#[async_trait]
impl NativeDriver for MockDriver {
    async fn open(&self, descriptor: &str) -> BackendResult<Box<dyn NativeConnection>> {
        self.recorder
            .opened
            .lock()
            .unwrap()
            .push(descriptor.to_string());
        Ok(Box::new(MockConnection {
            recorder: Arc::clone(&self.recorder),
        }))
    }

    async fn open_connector(&self, descriptor: &str) -> BackendResult<Box<dyn NativeConnector>> {
        self.recorder
            .opened
            .lock()
            .unwrap()
            .push(descriptor.to_string());
        Ok(Box::new(MockConnector {
            recorder: Arc::clone(&self.recorder),
        }))
    }
}

fn mock() -> (Arc<MockDriver>, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let driver = Arc::new(MockDriver {
        recorder: Arc::clone(&recorder),
    });
    (driver, recorder)
}

#[tokio::test]
async fn test_dm_open_translates_and_normalizes() {
    let dir = tempfile::tempdir().unwrap();
    let service = ServiceFile::new("DM", dir.path().join("dm_svc.conf"));
    let (driver, recorder) = mock();

    let registry = BackendRegistry::builder()
        .register(Backend::Dm8, driver)
        .build(
            DriverConfig::default()
                .backend_tag(Some("dm8"))
                .service(service.clone()),
        );

    let mut conn = registry
        .open("user:pass@tcp(h1,h2:5236)/mydb?timeout=10s")
        .await
        .unwrap();

    // The native driver saw the dm:// descriptor, not the generic string.
    {
        let opened = recorder.opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].starts_with("dm://user:pass@DM?connectTimeout=10000"));
    }
    // Cluster expansion landed in the service file.
    assert_eq!(
        std::fs::read_to_string(&service.path).unwrap(),
        "DM=(h1:5236,h2:5236)"
    );

    // Statement text and binary arguments are normalized before delegation.
    conn.exec(
        "UPDATE `t` SET `blob` = ?",
        &[BoundValue::bytes(b"payload".to_vec())],
    )
    .await
    .unwrap();

    let statements = recorder.statements.lock().unwrap();
    let (sql, args) = &statements[0];
    assert_eq!(sql, "UPDATE \"t\" SET \"blob\" = ?");
    assert_eq!(args[0], BoundValue::bytes(b"payload".to_vec()).widened());
}

#[tokio::test]
async fn test_prepared_statement_normalizes_once() {
    let (driver, recorder) = mock();
    let registry = BackendRegistry::builder()
        .register(Backend::Kingbase, driver)
        .build(DriverConfig::default().backend_tag(Some("kdb9")));

    let mut conn = registry
        .open("app:pw@tcp(10.0.0.1:54321)/orders")
        .await
        .unwrap();
    let mut statement = conn.prepare("SELECT `id` FROM `orders`").await.unwrap();
    statement.query(&[]).await.unwrap();

    let statements = recorder.statements.lock().unwrap();
    assert_eq!(statements[0].0, "SELECT \"id\" FROM \"orders\"");
}

#[tokio::test]
async fn test_connector_translates_once_and_reconnects() {
    let (driver, recorder) = mock();
    let registry = BackendRegistry::builder()
        .register(Backend::MySql, driver)
        .build(DriverConfig::default());

    let connector = registry
        .open_connector("app:pw@tcp(localhost:3306)/orders?timeout=3s")
        .await
        .unwrap();
    let mut a = connector.connect().await.unwrap();
    let mut b = connector.connect().await.unwrap();
    a.ping().await.unwrap();
    b.exec("SELECT 1", &[]).await.unwrap();

    let opened = recorder.opened.lock().unwrap();
    // MySQL passthrough: the descriptor is the original generic string.
    assert_eq!(opened.as_slice(), ["app:pw@tcp(localhost:3306)/orders?timeout=3s"]);
}

#[tokio::test]
async fn test_unknown_tag_falls_back_to_default_backend() {
    let (driver, recorder) = mock();
    let registry = BackendRegistry::builder()
        .register(Backend::MySql, driver)
        .build(DriverConfig::default().backend_tag(Some("oracle")));

    assert_eq!(registry.effective_backend(), Backend::MySql);
    registry
        .open("app:pw@tcp(localhost:3306)/orders")
        .await
        .unwrap();
    assert_eq!(recorder.opened.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_grammar_error_reaches_caller_without_dispatch() {
    let (driver, recorder) = mock();
    let registry = BackendRegistry::builder()
        .register(Backend::MySql, driver)
        .build(DriverConfig::default());

    let err = registry.open("not a connection string").await.unwrap_err();
    assert!(matches!(err, DriverError::Dsn(_)));
    assert!(recorder.opened.lock().unwrap().is_empty());
}
