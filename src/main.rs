use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workout_map::{config, routes, state};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workout_map=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    // Corrupt stored workouts stop startup instead of being replaced.
    let state = match state::AppState::new(config.clone()) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!("Failed to load workouts: {}", err);
            std::process::exit(1);
        }
    };

    let serve_dir = ServeDir::new(&config.web_root)
        .not_found_service(ServeFile::new(config.web_root.join("index.html")));

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::workouts::router())
        .fallback_service(serve_dir)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Failed to bind {}: {}", addr, err);
            std::process::exit(1);
        }
    };

    tracing::info!("Workout map listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("View: GET http://{}/api/view", addr);
    tracing::info!("Submit: POST http://{}/api/workouts", addr);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", err);
    }
}
