use crate::config::OwnerConfig;
use crate::content::SiteContext;

/// Build the system prompt prepended to every provider request: persona,
/// formatting rules, and the per-request site context bundle.
pub fn system_prompt(owner: &OwnerConfig, ctx: &SiteContext) -> String {
    let mut projects = String::new();
    for p in ctx.projects {
        projects.push_str(&format!("- {} — {}\n", p.title, p.summary));
        projects.push_str(&format!("  Tech: {}\n", p.tech.join(", ")));
        if let Some(url) = p.github {
            projects.push_str(&format!("  GitHub: {url}\n"));
        }
        if let Some(url) = p.demo {
            projects.push_str(&format!("  Demo: {url}\n"));
        }
        if !p.highlight_metrics.is_empty() {
            projects.push_str(&format!(
                "  Highlights: {}\n",
                p.highlight_metrics.join("; ")
            ));
        }
    }

    let mut experience = String::new();
    for item in ctx.experience {
        experience.push_str(&format!(
            "- {} at {} ({})",
            item.role, item.org, item.dates
        ));
        if let Some(loc) = item.location {
            experience.push_str(&format!(", {loc}"));
        }
        experience.push('\n');
        for bullet in item.bullets {
            experience.push_str(&format!("  * {bullet}\n"));
        }
    }

    let mut education = String::new();
    for item in ctx.education {
        education.push_str(&format!(
            "- {} at {} ({})",
            item.role, item.org, item.dates
        ));
        if let Some(gpa) = item.gpa {
            education.push_str(&format!(", GPA {gpa}"));
        }
        education.push('\n');
    }

    let posts = if ctx.posts.is_empty() {
        "(no posts published yet)\n".to_string()
    } else {
        let mut out = String::new();
        for post in &ctx.posts {
            out.push_str(&format!("- {} (/blog/{})\n", post.title, post.slug));
        }
        out
    };

    format!(
        r#"You are the portfolio assistant for {name}, {title}.
You answer visitor questions about {name}'s projects, professional experience,
education, and blog posts, using only the information below.

Keep replies concise and conversational. Use plain text with short paragraphs
or simple bullet lists. When a project has a GitHub or demo link, include it.
If asked something the information below does not cover, say so and suggest
the contact page instead of guessing.

== PROJECTS ==

{projects}
== EXPERIENCE ==

{experience}
== EDUCATION ==

{education}
== BLOG POSTS ==

{posts}"#,
        name = owner.name,
        title = owner.title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn prompt_includes_owner_and_site_data() {
        let owner = OwnerConfig::default();
        let ctx = SiteContext::gather(Path::new("/tmp/nonexistent-portfolio-prompt"));
        let prompt = system_prompt(&owner, &ctx);

        assert!(prompt.contains(&owner.name));
        assert!(prompt.contains("== PROJECTS =="));
        assert!(prompt.contains(ctx.projects[0].title));
        assert!(prompt.contains(ctx.experience[0].org));
        assert!(prompt.contains("== EDUCATION =="));
        assert!(prompt.contains("(no posts published yet)"));
    }

    #[test]
    fn prompt_lists_posts_when_present() {
        let owner = OwnerConfig::default();
        let mut ctx = SiteContext::gather(Path::new("/tmp/nonexistent-portfolio-prompt"));
        ctx.posts = vec![crate::content::PostSummary {
            slug: "rag-notes".to_string(),
            title: "Rag Notes".to_string(),
        }];
        let prompt = system_prompt(&owner, &ctx);
        assert!(prompt.contains("/blog/rag-notes"));
    }
}
