//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use tokio::net::TcpListener;

use task_tracker::http::HttpServer;
use task_tracker::lifecycle::Shutdown;
use task_tracker::storage::Database;

/// A running server over a throwaway snapshot file.
pub struct TestServer {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    shutdown: Shutdown,
    _db_dir: TempDir,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server on an ephemeral port with an empty temp store.
pub async fn start_server() -> TestServer {
    let db_dir = tempfile::tempdir().unwrap();
    let db_path = db_dir.path().join("db.json");
    let store = Arc::new(Database::open(&db_path).await.unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = HttpServer::new(Arc::clone(&store));
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    TestServer { addr, db_path, shutdown, _db_dir: db_dir }
}
