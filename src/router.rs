use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::auth::TokenKeys;
use crate::config::Config;
use crate::db::Storage;
use crate::error::PortagenError;
use crate::export::{PdfRenderer, TemplateRenderer};
use crate::handlers::{health, payments, portfolios, templates, users};
use crate::middleware::panic::catch_panic;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct PortagenState {
    pub storage: Storage,
    pub config: Arc<Config>,
    pub tokens: Arc<TokenKeys>,
    pub renderer: Arc<TemplateRenderer>,
    pub pdf: Arc<dyn PdfRenderer>,
}

impl PortagenState {
    pub fn new(
        storage: Storage,
        config: Config,
        pdf: Arc<dyn PdfRenderer>,
    ) -> Result<Self, PortagenError> {
        let tokens = TokenKeys::new(&config.jwt_secret, config.jwt_ttl_days);
        Ok(Self {
            storage,
            tokens: Arc::new(tokens),
            renderer: Arc::new(TemplateRenderer::new()?),
            config: Arc::new(config),
            pdf,
        })
    }
}

pub fn portagen_router(state: PortagenState) -> Router {
    let api = Router::new()
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route(
            "/users/profile",
            get(users::profile).put(users::update_profile),
        )
        .route(
            "/templates",
            get(templates::list_templates).post(templates::create_template),
        )
        .route(
            "/templates/{id}",
            get(templates::get_template)
                .put(templates::update_template)
                .delete(templates::delete_template),
        )
        .route(
            "/portfolios",
            get(portfolios::list_portfolios).post(portfolios::create_portfolio),
        )
        .route(
            "/portfolios/{id}",
            get(portfolios::get_portfolio)
                .put(portfolios::update_portfolio)
                .delete(portfolios::delete_portfolio),
        )
        .route(
            "/portfolios/{id}/download/zip",
            get(portfolios::download_zip),
        )
        .route(
            "/portfolios/{id}/download/pdf",
            get(portfolios::download_pdf),
        )
        .route(
            "/payments",
            get(payments::list_payments).post(payments::create_payment),
        );

    let body_limit = state.config.body_limit_bytes();
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .fallback(|| async { PortagenError::NotFound("Route not found") })
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(catch_panic))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
