//! Case Muse API server
//!
//! Owns the AI test-case generation boundary for the Case Muse client.
//! Provides REST API endpoints for:
//!
//! - Test case generation from a target URL
//! - Health checking
//!
//! ## Architecture
//!
//! The server sits between the slim browser frontend and the model API,
//! providing:
//!
//! - One canonical generation prompt and response schema
//! - Rate limiting via tower-governor
//! - The API key boundary (the key never reaches the browser)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;
mod generator;

use api::{handle_generate_test_cases, handle_health};
use generator::{GeminiGenerator, TestCaseGenerator};

/// Command-line arguments for the Case Muse server
#[derive(Parser, Debug)]
#[command(name = "casemuse-api")]
#[command(about = "Case Muse API server for AI test case generation")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Model used for test case generation
    #[arg(long, default_value = "gemini-2.0-flash")]
    model: String,

    /// Model request timeout in milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,

    /// Rate limit: requests per second per IP
    #[arg(long, default_value = "10")]
    rate_limit: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The generation boundary; a trait object so tests can script it.
    pub generator: Arc<dyn TestCaseGenerator>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_key = std::env::var("GEMINI_API_KEY")
        .context("GEMINI_API_KEY is not set; the generator cannot reach the model API")?;

    let generator = GeminiGenerator::new(api_key, args.model.clone(), args.timeout_ms)?;
    let state = AppState {
        generator: Arc::new(generator),
    };

    // Create rate limiter configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(args.rate_limit.into())
            .burst_size(args.rate_limit * 2)
            .finish()
            .expect("Failed to create rate limiter config"),
    );

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(handle_health))
        // API endpoints
        .route("/api/generate-test-cases", post(handle_generate_test_cases))
        // Apply middleware
        .layer(TraceLayer::new_for_http())
        .layer(GovernorLayer {
            config: governor_conf,
        })
        .layer(cors)
        .with_state(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Case Muse API listening on http://{}", addr);
    info!("Model: {}", args.model);
    info!("Rate limit: {} requests/second per IP", args.rate_limit);
    info!("Model timeout: {}ms", args.timeout_ms);

    axum::serve(listener, app).await?;

    Ok(())
}
