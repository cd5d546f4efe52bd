mod config;
mod errors;
mod mailer;
mod mcp;
mod models;
mod qa;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::mailer::{Mailer, NotificationGateway, SmtpMailer, UnconfiguredMailer};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::load_resume;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV API v{}", env!("CARGO_PKG_VERSION"));

    // The resume is required; refuse to start without it.
    let document = load_resume(&config.cv_path)?;

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => {
            info!("SMTP relay configured: {}:{}", smtp.host, smtp.port);
            Arc::new(SmtpMailer::new(smtp, config.smtp_timeout)?)
        }
        None => {
            warn!("SMTP credentials not set; send_email will report failures");
            Arc::new(UnconfiguredMailer)
        }
    };
    let gateway = NotificationGateway::new(mailer, config.smtp_timeout);

    let state = AppState::new(document, gateway)?;

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
