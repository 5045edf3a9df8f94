//! Local template replies used when no upstream provider is available.
//! Deterministic, allocation-only, and guaranteed to produce text.

use crate::content::SiteContext;

type Predicate = fn(&str) -> bool;
type Builder = fn(&SiteContext) -> String;

/// Routing table evaluated in order; the first predicate that matches and
/// whose builder yields text wins. Predicates see the lowercased current
/// question, so matching is case-insensitive by construction.
const ROUTES: &[(Predicate, Builder)] = &[
    (is_project_question, projects_reply),
    (is_background_question, background_reply),
];

pub fn reply(question: &str, ctx: &SiteContext) -> String {
    let q = question.to_lowercase();
    for (matches, build) in ROUTES {
        if matches(&q) {
            let text = build(ctx);
            if !text.is_empty() {
                return text;
            }
        }
    }
    generic_reply()
}

fn is_project_question(q: &str) -> bool {
    q.contains("project") || q.contains("portfolio")
}

fn is_background_question(q: &str) -> bool {
    ["experience", "work", "education", "background"]
        .iter()
        .any(|k| q.contains(k))
}

fn projects_reply(ctx: &SiteContext) -> String {
    if ctx.projects.is_empty() {
        return String::new();
    }
    let mut lines = vec!["Here are a few projects worth a look:".to_string()];
    for p in ctx.projects.iter().take(3) {
        let mut line = format!("• {} — {}", p.title, p.summary);
        if let Some(url) = p.github {
            line.push_str(&format!(" ({url})"));
        }
        lines.push(line);
    }
    lines.push("Ask about any of them for more detail.".to_string());
    lines.join("\n")
}

fn background_reply(ctx: &SiteContext) -> String {
    let Some(latest) = ctx.experience.first().or_else(|| ctx.education.first()) else {
        return String::new();
    };
    let mut text = format!(
        "Most recently: {} at {} ({}).",
        latest.role, latest.org, latest.dates
    );
    if let Some(bullet) = latest.bullets.first() {
        text.push(' ');
        text.push_str(bullet);
        if !bullet.ends_with('.') {
            text.push('.');
        }
    }
    text.push_str(" Ask about earlier roles or education for the full picture.");
    text
}

fn generic_reply() -> String {
    "I'm the portfolio assistant. I can walk you through the projects, professional \
     experience, education, and blog posts on this site — try asking about a project \
     or my background."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn ctx() -> SiteContext {
        SiteContext::gather(Path::new("/tmp/nonexistent-portfolio-fallback"))
    }

    fn empty_ctx() -> SiteContext {
        SiteContext {
            projects: &[],
            experience: &[],
            education: &[],
            posts: Vec::new(),
        }
    }

    #[test]
    fn project_keywords_route_to_project_template() {
        let c = ctx();
        let text = reply("show me your projects", &c);
        assert!(text.contains(c.projects[0].title));
        assert!(text.contains(c.projects[0].summary));

        let via_portfolio = reply("walk me through the portfolio", &c);
        assert_eq!(text, via_portfolio);
    }

    #[test]
    fn routing_is_case_insensitive() {
        let c = ctx();
        assert_eq!(
            reply("Tell me about your PROJECTS", &c),
            reply("tell me about your projects", &c)
        );
        assert_eq!(
            reply("YOUR WORK HISTORY?", &c),
            reply("your work history?", &c)
        );
    }

    #[test]
    fn background_keywords_route_to_latest_experience() {
        let c = ctx();
        for question in [
            "what's your experience?",
            "where did you work",
            "tell me about your education",
            "what's your background",
        ] {
            let text = reply(question, &c);
            assert!(
                text.contains(c.experience[0].role) && text.contains(c.experience[0].org),
                "{question:?} did not include the latest record"
            );
        }
    }

    #[test]
    fn unmatched_question_gets_generic_reply() {
        let c = ctx();
        let text = reply("what's the weather like?", &c);
        assert_eq!(text, generic_reply());
    }

    #[test]
    fn empty_question_gets_generic_reply() {
        let c = ctx();
        assert_eq!(reply("", &c), generic_reply());
    }

    #[test]
    fn empty_data_degrades_to_generic() {
        let c = empty_ctx();
        assert_eq!(reply("projects?", &c), generic_reply());
        assert_eq!(reply("experience?", &c), generic_reply());
    }

    #[test]
    fn reply_is_never_empty() {
        let c = ctx();
        for q in ["", "projects", "experience", "ksjdfh"] {
            assert!(!reply(q, &c).is_empty());
        }
    }

    #[test]
    fn project_reply_caps_at_three_entries() {
        let c = ctx();
        let text = reply("projects", &c);
        let bullets = text.matches('•').count();
        assert_eq!(bullets, 3);
    }
}
