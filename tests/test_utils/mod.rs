//! Test utilities for database and server testing.
//!
//! Provides in-memory SQLite databases with migrations applied and a helper
//! that serves the full router on an ephemeral port.

use anyhow::{Context, Result};
use microsite::{
    config::AppConfig,
    migration::{Migrator, MigratorTrait},
    render::Templates,
    seeds::{SeedPolicy, seed_agents},
    server::{AppState, create_app},
};
use sea_orm::{Database, DatabaseConnection};
use std::{path::PathBuf, sync::Arc};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Same as [`setup_test_db`], with the fixture agents inserted.
#[allow(dead_code)]
pub async fn setup_seeded_db() -> Result<DatabaseConnection> {
    let db = setup_test_db().await?;
    seed_agents(&db, SeedPolicy::IfEmpty).await?;
    Ok(db)
}

/// The templates directory shipped with the crate.
#[allow(dead_code)]
pub fn templates_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates")
}

#[allow(dead_code)]
pub struct TestServerHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    join_handle: Option<JoinHandle<Result<()>>>,
}

#[allow(dead_code)]
impl TestServerHandle {
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.join_handle.take() {
            handle.await.context("server task join failed")??;
        }

        Ok(())
    }
}

impl Drop for TestServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Serves the app over a seeded database with the shipped templates.
///
/// Returns the base URL, the database handle and the server handle.
#[allow(dead_code)]
pub async fn spawn_test_app(config: AppConfig) -> (String, DatabaseConnection, TestServerHandle) {
    let db = setup_seeded_db().await.unwrap();
    let config = AppConfig {
        templates_dir: templates_dir(),
        ..config
    };
    let templates = Templates::load(&config.templates_dir).unwrap();

    let state = AppState {
        config: Arc::new(config),
        db: db.clone(),
        templates: Arc::new(templates),
    };
    let app = create_app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let server_url = format!("http://{}", listener.local_addr().unwrap());

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .context("axum server error")
    });

    (
        server_url,
        db,
        TestServerHandle {
            shutdown_tx: Some(shutdown_tx),
            join_handle: Some(join_handle),
        },
    )
}
