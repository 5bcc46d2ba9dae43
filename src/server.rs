//! # Server Configuration
//!
//! Router assembly, shared state and the startup sequence for the microsite.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderName, HeaderValue, header},
    middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{services::ServeFile, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers;
use crate::render::Templates;
use crate::seeds::seed_agents;
use crate::telemetry;
use migration::{Migrator, MigratorTrait};

/// Allows the Tailwind CDN, Google Fonts and cdnjs used by the page templates.
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
    script-src 'self' 'unsafe-inline' https://cdn.tailwindcss.com; \
    style-src 'self' 'unsafe-inline' https://fonts.googleapis.com https://cdnjs.cloudflare.com; \
    font-src 'self' https://fonts.gstatic.com https://cdnjs.cloudflare.com; \
    img-src 'self' https: data:; \
    form-action 'self'; \
    frame-ancestors 'none'";

const HSTS: &str = "max-age=31536000; includeSubDomains";

/// Static pages served verbatim from the templates directory.
const STATIC_PAGES: &[(&str, &str)] = &[
    ("/privacy-policy", "privacy.html"),
    ("/terms-conditions", "terms.html"),
    ("/login", "login.html"),
    ("/thank-you", "thank-you.html"),
    ("/thank-you/{slug}", "thank-you.html"),
];

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
    pub templates: Arc<Templates>,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(handlers::directory::directory))
        .route("/meet/{slug}", get(handlers::profile::meet))
        .route("/sms-compliance", get(handlers::profile::sms_compliance))
        .route("/submit", post(handlers::leads::submit))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz));

    for (path, file) in STATIC_PAGES {
        router = router.route_service(path, ServeFile::new(state.config.templates_dir.join(file)));
    }

    let hsts = state.config.is_production();

    let mut router = router
        .with_state(state)
        .layer(middleware::from_fn(telemetry::trace_context_middleware))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-dns-prefetch-control"),
            HeaderValue::from_static("off"),
        ));

    if hsts {
        router = router.layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS),
        ));
    }

    router.layer(TraceLayer::new_for_http())
}

/// Prepares the database and templates, then serves until shutdown.
///
/// Any failure before the listener is bound is returned to the caller, which
/// exits the process.
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    telemetry::init_tracing(&config).context("initializing tracing")?;

    let db = crate::db::init_pool(&config).await?;

    Migrator::up(&db, None)
        .await
        .context("applying database migrations")?;

    let seeded = seed_agents(&db, config.reseed).await?;
    tracing::info!(seeded, policy = %config.reseed, "Agent seed step finished");

    let templates = Templates::load(&config.templates_dir)?;

    let addr = config
        .bind_addr()
        .with_context(|| format!("invalid server address {}:{}", config.host, config.port))?;

    let state = AppState {
        config: Arc::new(config),
        db,
        templates: Arc::new(templates),
    };
    let profile = state.config.profile.clone();
    let strategy = state.config.slug_strategy;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!(%addr, %profile, slug_strategy = %strategy, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
