use mimalloc::MiMalloc;
use portagen::config::Config;
use portagen::db::Storage;
use portagen::export::ChromePdfRenderer;
use portagen::router::{PortagenState, portagen_router};
use portagen::service::seed;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    if cfg.jwt_secret.trim().is_empty() {
        return Err("jwt_secret must be set (PORTAGEN_JWT_SECRET)".into());
    }

    info!(
        listen_addr = %cfg.listen_addr,
        database_url = %cfg.database_url,
        loglevel = %cfg.loglevel,
        staging_dir = %cfg.export.staging_dir.display(),
        admins = cfg.admin_emails.len(),
    );

    let storage = Storage::connect(&cfg.database_url).await?;
    if cfg.seed_templates {
        match seed::seed_templates(&storage).await {
            Ok(true) => {}
            Ok(false) => info!("template catalogue already populated"),
            Err(e) => warn!(error = %e, "failed to seed templates"),
        }
    }

    let pdf = Arc::new(ChromePdfRenderer::new(&cfg.export));
    let addr = cfg.listen_addr.clone();
    let state = PortagenState::new(storage, cfg, pdf)?;
    let app = portagen_router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
