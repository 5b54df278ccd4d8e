use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;

use wellness_onboarding::backend::{HttpProfileService, ProfileService};
use wellness_onboarding::config::Config;
use wellness_onboarding::onboarding::{OnboardingManager, OnboardingRouteState, onboarding_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    eprintln!("🌱 Wellness Onboarding v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.api_base_url);
    eprintln!(
        "   Auth: {}",
        if config.api_token.is_some() {
            "bearer token"
        } else {
            "none"
        }
    );
    eprintln!("   API: http://0.0.0.0:{}/api/onboarding/status", config.listen_port);
    eprintln!("   Notices WS: ws://0.0.0.0:{}/ws/onboarding\n", config.listen_port);

    let service: Arc<dyn ProfileService> =
        Arc::new(HttpProfileService::new(&config).context("failed to create backend client")?);
    let manager = Arc::new(OnboardingManager::new(service, config.seed_name.clone()));

    let app = onboarding_routes(OnboardingRouteState { manager }).layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.listen_port))
        .await
        .with_context(|| format!("failed to bind port {}", config.listen_port))?;
    tracing::info!(port = config.listen_port, "Onboarding server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await
        .context("server error")?;

    Ok(())
}
