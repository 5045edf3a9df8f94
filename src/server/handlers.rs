use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::assistant::{self, ChatTurn};
use crate::content::SiteContext;
use crate::email::{self, ResendMailer};

use super::routes::AppState;

// -- Assistant -----------------------------------------------------------

#[derive(Deserialize)]
struct AssistantBody {
    /// The full transcript, caller-supplied each time. A body without the
    /// field is an empty transcript, not an error.
    #[serde(default)]
    messages: Vec<ChatTurn>,
}

/// POST /api/assistant — the provider waterfall. The only error a caller
/// ever sees is a body that fails to parse; every provider failure is
/// absorbed downstream.
pub async fn assistant(
    State(state): State<AppState>,
    body: String,
) -> (StatusCode, Json<serde_json::Value>) {
    let parsed: AssistantBody = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => {
            error!(err = %e, "assistant request body did not parse");
            return internal_error();
        }
    };

    let ctx = SiteContext::gather(&state.config.content_dir);
    let providers = assistant::providers_from_env();
    let reply = assistant::respond(&providers, &parsed.messages, &ctx, &state.config.owner).await;

    let mut resp = json!({
        "ok": true,
        "message": { "role": "assistant", "content": reply.content },
    });
    match reply.provider {
        Some(name) => resp["provider"] = json!(name),
        None => resp["mock"] = json!(true),
    }
    (StatusCode::OK, Json(resp))
}

// -- Contact -------------------------------------------------------------

#[derive(Deserialize)]
struct ContactBody {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
}

/// POST /api/contact — relay a visitor message to the owner and send the
/// visitor a confirmation. Without a Resend key the submission is logged
/// and answered in mock mode.
pub async fn contact(
    State(state): State<AppState>,
    body: String,
) -> (StatusCode, Json<serde_json::Value>) {
    let parsed: ContactBody = match serde_json::from_str(&body) {
        Ok(p) => p,
        Err(e) => {
            error!(err = %e, "contact request body did not parse");
            return internal_error();
        }
    };

    let (name, email, message) = match (
        nonempty(parsed.name),
        nonempty(parsed.email),
        nonempty(parsed.message),
    ) {
        (Some(n), Some(e), Some(m)) => (n, e, m),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "ok": false, "error": "Missing fields" })),
            );
        }
    };

    let Some(mailer) = ResendMailer::from_env(&state.config.contact) else {
        info!(name = %name, email = %email, "contact relayed in mock mode (no RESEND_API_KEY)");
        return (StatusCode::OK, Json(json!({ "ok": true, "mock": true })));
    };

    let owner = &state.config.owner;
    let notify = mailer.send(
        &state.config.contact.to_email,
        &format!("Portfolio Contact: Message from {name}"),
        &email::notification_email(&name, &email, &message),
        &email,
    );
    if let Err(e) = notify.await {
        error!(err = %e, "contact notification failed");
        return internal_error();
    }

    let confirm = mailer.send(
        &email,
        "Message Received - Thank you for reaching out!",
        &email::confirmation_email(&name, owner, &state.config.base_url),
        &state.config.contact.to_email,
    );
    if let Err(e) = confirm.await {
        error!(err = %e, "contact confirmation failed");
        return internal_error();
    }

    (StatusCode::OK, Json(json!({ "ok": true })))
}

fn nonempty(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn internal_error() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "ok": false, "error": "Internal error" })),
    )
}

// -- Resume --------------------------------------------------------------

/// GET /api/resume — plain-text resume generated from the static
/// experience data, served as a download.
pub async fn resume(State(state): State<AppState>) -> (HeaderMap, String) {
    let owner = &state.config.owner;
    let mut text = format!("{}\n{}\n\nExperience:\n", owner.name, owner.title);
    for item in crate::content::experience::experience() {
        text.push_str(&format!("- {} — {} ({})\n", item.org, item.role, item.dates));
    }
    text.push_str("\nEducation:\n");
    for item in crate::content::experience::education() {
        text.push_str(&format!("- {} — {} ({})\n", item.org, item.role, item.dates));
    }
    text.push_str(&format!("\nMore: {}\n", state.config.base_url));

    let filename = format!("{}_Resume.txt", owner.name.replace(' ', "_"));
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, "text/plain".parse().unwrap());
    headers.insert(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{filename}\"")
            .parse()
            .unwrap(),
    );
    (headers, text)
}

// -- Sitemap -------------------------------------------------------------

const SITEMAP_ROUTES: &[&str] = &["/", "/projects", "/experience", "/blog", "/about", "/contact"];

pub async fn sitemap(State(state): State<AppState>) -> (HeaderMap, String) {
    let base = state.config.base_url.trim_end_matches('/');
    let today = chrono::Utc::now().format("%Y-%m-%d");

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for route in SITEMAP_ROUTES {
        let priority = if *route == "/" { "1.0" } else { "0.7" };
        xml.push_str(&format!(
            "  <url><loc>{base}{route}</loc><lastmod>{today}</lastmod>\
             <changefreq>weekly</changefreq><priority>{priority}</priority></url>\n"
        ));
    }
    xml.push_str("</urlset>\n");

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, "application/xml".parse().unwrap());
    (headers, xml)
}

// -- Health --------------------------------------------------------------

pub async fn healthz(State(state): State<AppState>) -> Json<serde_json::Value> {
    let ctx = SiteContext::gather(&state.config.content_dir);
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {
            "projects": ctx.projects.len(),
            "posts": ctx.posts.len(),
            "openai": std::env::var("OPENAI_API_KEY").map(|s| !s.is_empty()).unwrap_or(false),
            "azure": std::env::var("AZURE_OPENAI_API_KEY").map(|s| !s.is_empty()).unwrap_or(false),
            "email": crate::config::Config::resend_api_key().is_some(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn state() -> AppState {
        let mut config = Config::default();
        config.content_dir = std::path::PathBuf::from("/tmp/nonexistent-portfolio-handlers");
        AppState { config }
    }

    fn clear_provider_env() {
        unsafe {
            std::env::remove_var("OPENAI_API_KEY");
            std::env::remove_var("AZURE_OPENAI_ENDPOINT");
            std::env::remove_var("AZURE_OPENAI_API_KEY");
            std::env::remove_var("AZURE_OPENAI_API_VERSION");
            std::env::remove_var("AZURE_OPENAI_DEPLOYMENT");
            std::env::remove_var("RESEND_API_KEY");
        }
    }

    #[tokio::test]
    async fn assistant_rejects_malformed_body() {
        let (status, Json(body)) =
            assistant(State(state()), "not json at all".to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Internal error");
    }

    #[tokio::test]
    async fn assistant_answers_without_messages_field() {
        clear_provider_env();
        let (status, Json(body)) = assistant(State(state()), "{}".to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["mock"], true);
        assert!(!body["message"]["content"].as_str().unwrap().is_empty());
        assert_eq!(body["message"]["role"], "assistant");
    }

    #[tokio::test]
    async fn assistant_mock_routes_by_keyword() {
        clear_provider_env();
        let req = r#"{"messages":[{"role":"user","content":"What's your experience?"}]}"#;
        let (status, Json(body)) = assistant(State(state()), req.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["mock"], true);
        let content = body["message"]["content"].as_str().unwrap();
        assert!(content.contains("AI and Data Intern"));
        assert!(content.contains("IBM X Northeastern University"));
    }

    #[tokio::test]
    async fn contact_requires_all_fields() {
        let req = r#"{"name":"A","email":"a@example.com"}"#;
        let (status, Json(body)) = contact(State(state()), req.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["ok"], false);
        assert_eq!(body["error"], "Missing fields");
    }

    #[tokio::test]
    async fn contact_blank_field_is_missing() {
        let req = r#"{"name":"A","email":"  ","message":"hi"}"#;
        let (status, _) = contact(State(state()), req.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn contact_mock_mode_without_api_key() {
        clear_provider_env();
        let req = r#"{"name":"A","email":"a@example.com","message":"hello"}"#;
        let (status, Json(body)) = contact(State(state()), req.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["mock"], true);
    }

    #[tokio::test]
    async fn contact_rejects_malformed_body() {
        let (status, Json(body)) = contact(State(state()), "{".to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn resume_is_a_plain_text_attachment() {
        let (headers, text) = resume(State(state())).await;
        assert_eq!(headers[header::CONTENT_TYPE], "text/plain");
        assert!(headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("attachment"));
        assert!(text.contains("Prabhakar Elavala"));
        assert!(text.contains("IBM X Northeastern University"));
        assert!(text.contains("Northeastern University"));
    }

    #[tokio::test]
    async fn sitemap_lists_all_routes() {
        let (headers, xml) = sitemap(State(state())).await;
        assert_eq!(headers[header::CONTENT_TYPE], "application/xml");
        for route in SITEMAP_ROUTES {
            assert!(xml.contains(&format!("http://localhost:3000{route}</loc>")));
        }
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<priority>0.7</priority>"));
    }

    #[tokio::test]
    async fn healthz_reports_checks() {
        clear_provider_env();
        let Json(body) = healthz(State(state())).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"]["openai"], false);
        assert!(body["checks"]["projects"].as_u64().unwrap() > 0);
    }
}
