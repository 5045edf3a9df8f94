use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Html;

use crate::content::blog::{self, escape_html};
use crate::content::{experience, projects};

use super::routes::AppState;

const NAV: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/about", "About"),
    ("/projects", "Projects"),
    ("/experience", "Experience"),
    ("/blog", "Blog"),
    ("/contact", "Contact"),
];

/// Shared page shell: header navigation, main content, footer, and the
/// chat widget markup that site.js wires up.
fn layout(state: &AppState, title: &str, active: &str, body: &str) -> Html<String> {
    let owner = &state.config.owner;
    let nav = NAV
        .iter()
        .map(|(href, label)| {
            let class = if *href == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{href}\"{class}>{label}</a>")
        })
        .collect::<Vec<_>>()
        .join("\n      ");

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} | {owner_name}</title>
  <link rel="stylesheet" href="/style.css">
</head>
<body>
  <header>
    <a class="brand" href="/">{owner_name}</a>
    <nav>
      {nav}
    </nav>
  </header>
  <main>
{body}
  </main>
  <footer>
    <p>{owner_name} — {owner_title}</p>
    <p><a href="{github}">GitHub</a> · <a href="/api/resume">Resume</a> · <a href="/contact">Contact</a></p>
  </footer>
  <div id="chat-widget" class="chat-widget">
    <button id="chat-toggle" type="button">Ask me anything</button>
    <div id="chat-panel" class="chat-panel" hidden>
      <div id="chat-log" class="chat-log"></div>
      <form id="chat-form">
        <input id="chat-input" type="text" placeholder="Ask about projects or experience…" autocomplete="off">
        <button type="submit">Send</button>
      </form>
    </div>
  </div>
  <script src="/site.js"></script>
</body>
</html>"#,
        owner_name = escape_html(&owner.name),
        owner_title = escape_html(&owner.title),
        github = owner.github_url,
    ))
}

// -- Pages ---------------------------------------------------------------

pub async fn home(State(state): State<AppState>) -> Html<String> {
    let owner = &state.config.owner;
    let featured = projects::projects()
        .iter()
        .take(3)
        .map(project_card)
        .collect::<Vec<_>>()
        .join("\n");

    let latest = &experience::experience()[0];
    let body = format!(
        r#"    <section class="hero">
      <p class="eyebrow">{name}</p>
      <h1>AI/ML Engineer for Backend, Integrations &amp; LLM Automation</h1>
      <p class="lede">I build reliable backend services, SaaS integrations, and LLM agents
      that automate real workflows — shipping fast with tests, metrics, and clean APIs.</p>
      <div class="actions">
        <a class="button" href="/projects">View Projects</a>
        <a class="button secondary" href="/api/resume">Download Resume</a>
        <a class="button outline" href="/contact">Contact</a>
      </div>
    </section>
    <section>
      <h2>Currently</h2>
      <div class="cards">
        <div class="card">
          <h3>{latest_role}</h3>
          <p>{latest_org} · {latest_dates}</p>
        </div>
        <div class="card">
          <h3>{edu_role}</h3>
          <p>{edu_org} · {edu_dates}</p>
        </div>
      </div>
    </section>
    <section>
      <h2>Featured Projects</h2>
      <div class="cards">
{featured}
      </div>
      <p><a href="/projects">View all projects →</a></p>
    </section>"#,
        name = escape_html(&owner.name),
        latest_role = escape_html(latest.role),
        latest_org = escape_html(latest.org),
        latest_dates = latest.dates,
        edu_role = escape_html(experience::education()[0].role),
        edu_org = escape_html(experience::education()[0].org),
        edu_dates = experience::education()[0].dates,
    );
    layout(&state, "Home", "/", &body)
}

const SKILLS: &[&str] = &[
    "LLMs", "MLOps", "Python/SQL", "AWS", "Azure", "Databricks",
    "LangChain", "FastAPI", "PyTorch",
];

pub async fn about(State(state): State<AppState>) -> Html<String> {
    let skills = SKILLS
        .iter()
        .map(|s| format!("<span class=\"chip\">{s}</span>"))
        .collect::<Vec<_>>()
        .join("\n        ");
    let body = format!(
        r#"    <h1>About</h1>
    <p>I build production-grade AI/ML systems with a focus on reliability and
    developer experience. My work spans data engineering, modeling, inference
    services, and product integrations.</p>
    <p>Focus areas: LLMs, RAG, evaluations, observability, scalable serving, and MLOps.</p>
    <h2>Skills</h2>
    <div class="chips">
        {skills}
    </div>"#
    );
    layout(&state, "About", "/about", &body)
}

fn project_card(p: &projects::Project) -> String {
    let tech = p
        .tech
        .iter()
        .map(|t| format!("<span class=\"chip\">{t}</span>"))
        .collect::<Vec<_>>()
        .join(" ");
    let mut links = Vec::new();
    if let Some(url) = p.github {
        links.push(format!("<a href=\"{url}\">GitHub</a>"));
    }
    if let Some(url) = p.demo {
        links.push(format!("<a href=\"{url}\">Live Demo</a>"));
    }
    let metrics = p
        .highlight_metrics
        .iter()
        .map(|m| format!("<li>{}</li>", escape_html(m)))
        .collect::<Vec<_>>()
        .join("");

    format!(
        r#"        <div class="card">
          <h3>{title}</h3>
          <p>{summary}</p>
          <div class="chips">{tech}</div>
          <ul>{metrics}</ul>
          <p class="links">{links}</p>
        </div>"#,
        title = escape_html(p.title),
        summary = escape_html(p.summary),
        links = links.join(" · "),
    )
}

pub async fn projects(State(state): State<AppState>) -> Html<String> {
    let cards = projects::projects()
        .iter()
        .map(project_card)
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        "    <h1>Projects</h1>\n    <div class=\"cards\">\n{cards}\n    </div>"
    );
    layout(&state, "Projects", "/projects", &body)
}

fn experience_entry(item: &experience::ExperienceItem) -> String {
    let bullets = item
        .bullets
        .iter()
        .map(|b| format!("<li>{}</li>", escape_html(b)))
        .collect::<Vec<_>>()
        .join("\n          ");
    let location = item
        .location
        .map(|l| format!(" · {}", escape_html(l)))
        .unwrap_or_default();
    let gpa = item
        .gpa
        .map(|g| format!(" · GPA {g}"))
        .unwrap_or_default();

    format!(
        r#"      <article class="entry">
        <h3>{role}</h3>
        <p class="meta">{org} · {dates}{location} · {kind}{gpa}</p>
        <ul>
          {bullets}
        </ul>
      </article>"#,
        role = escape_html(item.role),
        org = escape_html(item.org),
        dates = item.dates,
        kind = item.kind.label(),
    )
}

pub async fn experience(State(state): State<AppState>) -> Html<String> {
    let work = experience::experience()
        .iter()
        .map(experience_entry)
        .collect::<Vec<_>>()
        .join("\n");
    let education = experience::education()
        .iter()
        .map(experience_entry)
        .collect::<Vec<_>>()
        .join("\n");
    let body = format!(
        "    <h1>Experience</h1>\n{work}\n    <h2>Education</h2>\n{education}"
    );
    layout(&state, "Experience", "/experience", &body)
}

pub async fn blog_index(State(state): State<AppState>) -> Html<String> {
    let posts = blog::list_posts(&state.config.content_dir);
    let items = if posts.is_empty() {
        "      <li class=\"muted\">No posts yet.</li>".to_string()
    } else {
        posts
            .iter()
            .map(|p| {
                format!(
                    "      <li><a href=\"/blog/{}\">{}</a></li>",
                    p.slug,
                    escape_html(&p.title)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let body = format!("    <h1>Blog</h1>\n    <ul class=\"post-list\">\n{items}\n    </ul>");
    layout(&state, "Blog", "/blog", &body)
}

pub async fn blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> (StatusCode, Html<String>) {
    let Some(post) = blog::load_post(&state.config.content_dir, &slug) else {
        let body = r#"    <h1>Article Not Found</h1>
    <p>Sorry, the requested blog post could not be found.</p>
    <p><a href="/blog">← Back to Blog</a></p>"#;
        return (
            StatusCode::NOT_FOUND,
            layout(&state, "Not Found", "/blog", body),
        );
    };

    let tags = post
        .meta
        .tags
        .iter()
        .map(|t| format!("<span class=\"chip\">{}</span>", escape_html(t)))
        .collect::<Vec<_>>()
        .join(" ");
    let body = format!(
        r#"    <p><a href="/blog">← Back to Blog</a></p>
    <article class="post">
      <h1>{title}</h1>
      <p class="lede">{summary}</p>
      <p class="meta">{date} · {read_time} · {tags}</p>
{content}
    </article>"#,
        title = escape_html(&post.meta.title),
        summary = escape_html(&post.meta.summary),
        date = post.meta.date,
        read_time = escape_html(&post.meta.read_time),
        content = blog::render_markdown(&post.body),
    );
    (
        StatusCode::OK,
        layout(&state, &post.meta.title, "/blog", &body),
    )
}

pub async fn contact(State(state): State<AppState>) -> Html<String> {
    let body = r#"    <h1>Contact</h1>
    <p>Have a question or an opportunity? Send a message and I'll get back to
    you within a day.</p>
    <form id="contact-form" class="contact-form">
      <label>Name <input name="name" type="text" required></label>
      <label>Email <input name="email" type="email" required></label>
      <label>Message <textarea name="message" rows="6" required></textarea></label>
      <button type="submit" class="button">Send Message</button>
      <p id="contact-status" class="muted"></p>
    </form>"#;
    layout(&state, "Contact", "/contact", body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn state_with(dir: &std::path::Path) -> AppState {
        let mut config = Config::default();
        config.content_dir = dir.to_path_buf();
        AppState { config }
    }

    fn state() -> AppState {
        state_with(std::path::Path::new("/tmp/nonexistent-portfolio-pages"))
    }

    #[tokio::test]
    async fn every_page_renders_the_shell() {
        let s = state();
        for html in [
            home(State(s.clone())).await.0,
            about(State(s.clone())).await.0,
            projects(State(s.clone())).await.0,
            experience(State(s.clone())).await.0,
            blog_index(State(s.clone())).await.0,
            contact(State(s.clone())).await.0,
        ] {
            assert!(html.contains("<!DOCTYPE html>"));
            assert!(html.contains(&s.config.owner.name));
            assert!(html.contains("chat-widget"));
            assert!(html.contains("/style.css"));
        }
    }

    #[tokio::test]
    async fn projects_page_lists_every_project() {
        let html = projects(State(state())).await.0;
        for p in crate::content::projects::projects() {
            assert!(html.contains(p.title), "missing {}", p.title);
        }
    }

    #[tokio::test]
    async fn experience_page_has_work_and_education() {
        let html = experience(State(state())).await.0;
        assert!(html.contains("AI and Data Intern"));
        assert!(html.contains("Northeastern University"));
        assert!(html.contains("<h2>Education</h2>"));
    }

    #[tokio::test]
    async fn blog_index_degrades_without_content_dir() {
        let html = blog_index(State(state())).await.0;
        assert!(html.contains("No posts yet."));
    }

    #[tokio::test]
    async fn blog_post_renders_markdown() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("test-post.md"),
            "---\ntitle: Test Post\nsummary: Summary here\n---\n# Heading\n\nBody text.",
        )
        .unwrap();
        let s = state_with(dir.path());

        let (status, Html(html)) = blog_post(State(s), Path("test-post".to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Test Post"));
        assert!(html.contains("<h1>Heading</h1>"));
        assert!(html.contains("<p>Body text.</p>"));
    }

    #[tokio::test]
    async fn missing_post_is_404() {
        let (status, Html(html)) = blog_post(State(state()), Path("nope".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(html.contains("Article Not Found"));
    }

    #[tokio::test]
    async fn contact_page_has_the_form() {
        let html = contact(State(state())).await.0;
        assert!(html.contains("contact-form"));
        assert!(html.contains("name=\"email\""));
        assert!(html.contains("name=\"message\""));
    }
}
