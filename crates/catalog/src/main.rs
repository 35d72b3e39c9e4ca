//! RocketShoes Catalog - stock and product catalog API server.
//!
//! This binary serves the catalog API on port 3333.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rocketshoes_catalog::{CatalogConfig, CatalogData, app};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_sentry(config: &CatalogConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    )))
}

/// Warnings and errors become Sentry events; info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    use sentry_tracing::EventFilter;
    use tracing::Level;

    let level = *metadata.level();
    if level <= Level::WARN {
        EventFilter::Event
    } else if level <= Level::DEBUG {
        EventFilter::Breadcrumb
    } else {
        EventFilter::Ignore
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = CatalogConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes_catalog=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let data = CatalogData::load(&config.data_path).expect("Failed to load catalog data");
    tracing::info!(
        products = data.products().len(),
        path = %config.data_path.display(),
        "Catalog data loaded"
    );

    let app = app(data)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!("catalog listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => log_ctrl_c(result),
                    _ = terminate.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl+C");
                log_ctrl_c(tokio::signal::ctrl_c().await);
            }
        }
    }

    #[cfg(not(unix))]
    log_ctrl_c(tokio::signal::ctrl_c().await);

    tracing::info!("Shutting down catalog");
}

fn log_ctrl_c(result: std::io::Result<()>) {
    if let Err(e) = result {
        tracing::error!(error = %e, "Ctrl+C handler failed");
    }
}
