pub mod blog;
pub mod experience;
pub mod projects;

use std::path::Path;

pub use blog::PostSummary;
pub use experience::ExperienceItem;
pub use projects::Project;

/// Per-request snapshot of the static site data the assistant answers
/// from: projects, experience/education, and blog post slugs. Rebuilt
/// fresh on every request and discarded with the response; nothing here
/// is cached or shared between requests.
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub projects: &'static [Project],
    pub experience: &'static [ExperienceItem],
    pub education: &'static [ExperienceItem],
    pub posts: Vec<PostSummary>,
}

impl SiteContext {
    /// Assemble the bundle. This cannot fail: the only fallible source is
    /// the blog directory, and its absence degrades to an empty post list.
    pub fn gather(content_dir: &Path) -> Self {
        Self {
            projects: projects::projects(),
            experience: experience::experience(),
            education: experience::education(),
            posts: blog::list_posts(content_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_with_missing_blog_dir_degrades() {
        let ctx = SiteContext::gather(Path::new("/tmp/nope-portfolio-content"));
        assert!(!ctx.projects.is_empty());
        assert!(!ctx.experience.is_empty());
        assert!(!ctx.education.is_empty());
        assert!(ctx.posts.is_empty());
    }
}
