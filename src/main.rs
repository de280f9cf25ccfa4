use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use sure_scout::{
    answer_question, core::config::load_scout_config, get_chapter_details, list_chapters, mcp,
    types::*, AppState,
};

fn parse_port_from_args() -> Option<u16> {
    let mut args = std::env::args().peekable();
    while let Some(a) = args.next() {
        if a == "--port" {
            if let Some(v) = args.next() {
                if let Ok(p) = v.parse::<u16>() {
                    return Some(p);
                }
            }
        } else if let Some(rest) = a.strip_prefix("--port=") {
            if let Ok(p) = rest.parse::<u16>() {
                return Some(p);
            }
        }
    }
    None
}

fn port_from_env() -> Option<u16> {
    for k in ["SURE_SCOUT_PORT", "PORT"] {
        if let Ok(v) = std::env::var(k) {
            if let Ok(p) = v.trim().parse::<u16>() {
                return Some(p);
            }
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=warn"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!("Starting Sure Scout HTTP server");

    let settings = load_scout_config().resolve();
    info!("Chapter listing: {}", settings.listing_url());
    let state = Arc::new(AppState::new(settings)?);

    let app = Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/chapter", post(chapter_handler))
        .route("/research", post(research_handler))
        .route("/chapters", get(chapters_handler))
        .route("/mcp/tools", get(mcp::list_tools))
        .route("/mcp/call", post(mcp::call_tool))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let port: u16 = parse_port_from_args()
        .or_else(port_from_env)
        .unwrap_or(5000);
    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            anyhow::bail!(
                "Address already in use: {}. Stop the existing process or run with --port {} (or set PORT/SURE_SCOUT_PORT).",
                bind_addr,
                port.saturating_add(1)
            )
        }
        Err(e) => return Err(e.into()),
    };
    info!("Sure Scout listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state.clone()))
        .await?;

    Ok(())
}

async fn shutdown_signal(state: Arc<AppState>) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).ok();
        let mut sigint = signal(SignalKind::interrupt()).ok();

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = async {
                if let Some(ref mut s) = sigterm {
                    s.recv().await;
                } else {
                    futures::future::pending::<()>().await;
                }
            } => {},
            _ = async {
                if let Some(ref mut s) = sigint {
                    s.recv().await;
                } else {
                    futures::future::pending::<()>().await;
                }
            } => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    let stats = state.cache.stats().await;
    info!(
        "Shutting down; cache held {} of {} entries ({} hits, {} misses)",
        stats.entries, stats.capacity, stats.hits, stats.misses
    );
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "sure-scout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// Operation failures travel inside the envelope, so these always answer 200.
async fn chapter_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChapterRequest>,
) -> Json<ResultEnvelope> {
    info!("Chapter lookup: {}", request.name);
    Json(get_chapter_details(&state, &request.name).await)
}

async fn research_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResearchRequest>,
) -> Json<ResultEnvelope> {
    info!("Research question: {}", request.question);
    Json(answer_question(&state, &request.question).await)
}

async fn chapters_handler(State(state): State<Arc<AppState>>) -> Json<ResultEnvelope> {
    Json(list_chapters(&state).await)
}
