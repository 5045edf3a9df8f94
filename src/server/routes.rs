use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;

use super::handlers;
use super::pages;

/// State shared across all routes. Provider and mailer credentials are
/// deliberately not here — they are re-read from the environment on each
/// request, so nothing secret outlives a request.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}

pub fn build(config: Config) -> Router {
    let state = AppState { config };

    // The chat widget and contact form call the JSON API from the browser;
    // keep those endpoints callable from anywhere.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        // Pages
        .route("/", get(pages::home))
        .route("/about", get(pages::about))
        .route("/projects", get(pages::projects))
        .route("/experience", get(pages::experience))
        .route("/blog", get(pages::blog_index))
        .route("/blog/{slug}", get(pages::blog_post))
        .route("/contact", get(pages::contact))
        // Static assets
        .route("/style.css", get(serve_css))
        .route("/site.js", get(serve_js))
        // API
        .route("/api/assistant", post(handlers::assistant))
        .route("/api/contact", post(handlers::contact))
        .route("/api/resume", get(handlers::resume))
        // Site plumbing
        .route("/sitemap.xml", get(handlers::sitemap))
        .route("/healthz", get(handlers::healthz))
        .layer(cors)
        .with_state(state)
}

async fn serve_css() -> (axum::http::HeaderMap, &'static str) {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        "text/css".parse().unwrap(),
    );
    (headers, include_str!("ui/style.css"))
}

async fn serve_js() -> (axum::http::HeaderMap, &'static str) {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        axum::http::header::CONTENT_TYPE,
        "application/javascript".parse().unwrap(),
    );
    (headers, include_str!("ui/site.js"))
}
