//! Spawns a surfsup server over a fixture dataset for the duration of a test.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use surfsup::config::{Config, DatabaseConfig};
use surfsup::{build_router, AppState};

/// A running server plus the temporary directory holding its dataset
pub struct TestServer {
    pub addr: SocketAddr,
    _dir: TempDir,
}

/// Start a server over the sample dataset on an ephemeral port
pub async fn start_sample_server() -> TestServer {
    start_with_dataset(|path| async move {
        super::test_data::create_sample_dataset(&path).await
    })
    .await
}

/// Start a server over a dataset with no rows
pub async fn start_empty_server() -> TestServer {
    start_with_dataset(|path| async move {
        super::test_data::create_empty_dataset(&path).await
    })
    .await
}

async fn start_with_dataset<F, Fut>(create: F) -> TestServer
where
    F: FnOnce(std::path::PathBuf) -> Fut,
    Fut: std::future::Future<Output = Result<(), sqlx::Error>>,
{
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("hawaii.sqlite");
    create(path.clone())
        .await
        .expect("Failed to create test dataset");

    let addr = spawn_server(&path).await;
    TestServer { addr, _dir: dir }
}

async fn spawn_server(path: &Path) -> SocketAddr {
    let config = Config {
        database: DatabaseConfig {
            path: path.to_path_buf(),
            max_connections: 2,
        },
        ..Default::default()
    };

    let state = AppState::open(config)
        .await
        .expect("Failed to open test dataset");
    let app = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    addr
}
