mod config;
mod constants;
mod error;
mod headers;
mod routes;
mod transforms;
mod upstream;

use axum::ServiceExt;
use axum::{
    Router,
    extract::Request,
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use clap::Parser;
use config::{Config, ProxyConfig};
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::normalize_path::NormalizePath;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_HASH: &str = env!("GIT_HASH");
pub const BUILD_TIME: &str = env!("BUILD_TIME");

pub struct AppState {
    pub config: ProxyConfig,
    pub http_client: Client,
}

#[derive(Parser)]
#[command(name = "gemini-proxy")]
#[command(about = "Persona-injecting reverse proxy for the Gemini API")]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, env = "GEMINI_PROXY_HOST")]
    host: Option<String>,

    /// Port to bind to
    #[arg(short, long, env = "GEMINI_PROXY_PORT")]
    port: Option<u16>,
}

/// Answer preflight immediately and stamp the wildcard cross-origin headers
/// onto every response, error paths included, so browser callers can always
/// read the body.
async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        headers::apply_cors(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    headers::apply_cors(response.headers_mut());
    response
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::health::index))
        .route("/health", get(routes::health::health))
        .route("/version", get(routes::health::version))
        .fallback(routes::generate::fallback)
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);

    let proxy_config = ProxyConfig::from_env();

    // Shared HTTP client with connection pooling
    let http_client = Client::builder()
        .timeout(Duration::from_secs(300)) // 5 min timeout for long completions
        .pool_max_idle_per_host(10)
        .build()
        .expect("Failed to create HTTP client");

    info!(
        upstream = %proxy_config.upstream_base,
        model = %proxy_config.model,
        "proxy configured"
    );

    let state = Arc::new(AppState {
        config: proxy_config,
        http_client,
    });

    let app = NormalizePath::trim_trailing_slash(app(state));

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid address");
    info!(
        "Starting gemini-proxy v{}-{} (built {})",
        VERSION, GIT_HASH, BUILD_TIME
    );
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .await
    .unwrap();
}
