use crate::clock::SystemClock;
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::handlers::{health_check, lookup_json, lookup_query, AppState, SharedState};
use crate::middleware::logging_middleware;
use crate::providers::{CepAbertoAdapter, ProviderSet, ViaCepAdapter};
use crate::rate_limiter::RateLimiter;
use crate::transport::HttpTransport;
use axum::routing::get;
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the router around an already assembled dispatcher.
pub fn create_app(dispatcher: Dispatcher) -> Router {
    let shared_state: SharedState = Arc::new(AppState::new(dispatcher));

    Router::new()
        .route("/cep", get(lookup_query).post(lookup_json))
        .route("/health", get(health_check))
        .with_state(shared_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(logging_middleware)),
        )
}

/// Wires the production dispatcher: wall clock, HTTP transport, and one
/// rate limiter for the whole process.
pub fn build_dispatcher(config: &Config) -> Result<Dispatcher> {
    let providers = ProviderSet::new(
        ViaCepAdapter::new(&config.viacep_base_url),
        CepAbertoAdapter::new(&config.cepaberto_base_url, &config.cepaberto_token),
    );
    let transport = HttpTransport::new(config.upstream_timeout())?;

    Ok(Dispatcher::new(
        Arc::new(RateLimiter::new()),
        providers,
        Arc::new(transport),
        Arc::new(SystemClock),
    ))
}

pub struct Server {
    app: Router,
    bind_addr: SocketAddr,
}

impl Server {
    pub fn new(config: Config) -> Result<Self> {
        config.validate_settings()?;

        if !config.has_cepaberto_token() {
            tracing::warn!("CEPABERTO_TOKEN is not set; cepaberto lookups will be refused upstream");
        }

        let app = create_app(build_dispatcher(&config)?);

        Ok(Self {
            app,
            bind_addr: config.bind_addr,
        })
    }

    pub async fn run(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(self.bind_addr).await?;

        tracing::info!("CEP gateway listening on {}", self.bind_addr);
        tracing::info!("Lookups available at /cep, health check at /health");

        let app = self.app.into_make_service_with_connect_info::<SocketAddr>();

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}
