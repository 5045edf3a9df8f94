use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

/// A blog post as listed on the index page and in the assistant context.
/// The slug is the filename minus its extension.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
}

/// Frontmatter fields, with the same fallbacks the site has always used
/// for posts that carry no (or partial) frontmatter.
#[derive(Debug, Clone, PartialEq)]
pub struct PostMeta {
    pub title: String,
    pub summary: String,
    pub date: String,
    pub read_time: String,
    pub tags: Vec<String>,
}

impl Default for PostMeta {
    fn default() -> Self {
        Self {
            title: "Blog Post".to_string(),
            summary: "A technical article".to_string(),
            date: "2025-01-01".to_string(),
            read_time: "5 min read".to_string(),
            tags: vec!["Tech".to_string()],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Post {
    pub meta: PostMeta,
    /// Markdown body with the frontmatter block stripped.
    pub body: String,
}

const POST_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Enumerate posts in the content directory, sorted by slug. A missing or
/// unreadable directory yields an empty list, never an error.
pub fn list_posts(dir: &Path) -> Vec<PostSummary> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            debug!(dir = %dir.display(), err = %e, "blog directory unavailable");
            return Vec::new();
        }
    };

    let mut posts: Vec<PostSummary> = entries
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let ext = path.extension()?.to_str()?;
            if !POST_EXTENSIONS.contains(&ext) {
                return None;
            }
            let slug = path.file_stem()?.to_str()?.to_string();
            let title = title_from_slug(&slug);
            Some(PostSummary { slug, title })
        })
        .collect();

    posts.sort_by(|a, b| a.slug.cmp(&b.slug));
    posts
}

/// Load a single post by slug. Slugs containing path separators or parent
/// references are rejected outright.
pub fn load_post(dir: &Path, slug: &str) -> Option<Post> {
    if slug.is_empty() || slug.contains('/') || slug.contains('\\') || slug.contains("..") {
        return None;
    }

    for ext in POST_EXTENSIONS {
        let path = dir.join(format!("{slug}.{ext}"));
        if let Ok(content) = fs::read_to_string(&path) {
            let (meta, body) = parse_frontmatter(&content);
            return Some(Post { meta, body });
        }
    }
    None
}

/// Naive title from slug: "hello-world" -> "Hello World".
pub fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a `---` frontmatter block off the top of a post and parse its
/// `key: value` lines. Unknown keys are ignored; missing keys keep their
/// defaults. Returns the metadata and the remaining markdown body.
pub fn parse_frontmatter(content: &str) -> (PostMeta, String) {
    let mut meta = PostMeta::default();

    let Some(rest) = content.strip_prefix("---\n") else {
        return (meta, content.to_string());
    };
    let Some(end) = rest.find("\n---") else {
        return (meta, content.to_string());
    };

    let block = &rest[..end];
    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match key.trim() {
            "title" => meta.title = value.to_string(),
            "summary" => meta.summary = value.to_string(),
            "date" => meta.date = value.to_string(),
            "readTime" => meta.read_time = value.to_string(),
            "tags" => meta.tags = value.split(',').map(|t| t.trim().to_string()).collect(),
            _ => {}
        }
    }

    let body = rest[end + 4..].trim_start_matches('\n').to_string();
    (meta, body)
}

// -- Markup --------------------------------------------------------------

/// Escape the five HTML-significant characters. Used by every place that
/// interpolates untrusted or free-form text into markup.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the markdown subset the blog actually uses: ATX headings,
/// paragraphs, unordered lists, fenced code blocks, and inline
/// code/bold/links. Everything is HTML-escaped before markup is applied.
pub fn render_markdown(md: &str) -> String {
    let mut html = String::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut list_items: Vec<String> = Vec::new();
    let mut code_lines: Vec<String> = Vec::new();
    let mut in_code = false;

    fn flush_paragraph(html: &mut String, paragraph: &mut Vec<String>) {
        if !paragraph.is_empty() {
            html.push_str(&format!("<p>{}</p>\n", paragraph.join(" ")));
            paragraph.clear();
        }
    }
    fn flush_list(html: &mut String, items: &mut Vec<String>) {
        if !items.is_empty() {
            html.push_str("<ul>\n");
            for item in items.iter() {
                html.push_str(&format!("<li>{item}</li>\n"));
            }
            html.push_str("</ul>\n");
            items.clear();
        }
    }

    for line in md.lines() {
        if line.trim_start().starts_with("```") {
            if in_code {
                html.push_str(&format!(
                    "<pre><code>{}</code></pre>\n",
                    code_lines.join("\n")
                ));
                code_lines.clear();
                in_code = false;
            } else {
                flush_paragraph(&mut html, &mut paragraph);
                flush_list(&mut html, &mut list_items);
                in_code = true;
            }
            continue;
        }
        if in_code {
            code_lines.push(escape_html(line));
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush_paragraph(&mut html, &mut paragraph);
            flush_list(&mut html, &mut list_items);
            continue;
        }

        if let Some(rest) = heading(trimmed) {
            flush_paragraph(&mut html, &mut paragraph);
            flush_list(&mut html, &mut list_items);
            let (level, text) = rest;
            html.push_str(&format!("<h{level}>{}</h{level}>\n", inline_markup(text)));
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            flush_paragraph(&mut html, &mut paragraph);
            list_items.push(inline_markup(item));
            continue;
        }

        flush_list(&mut html, &mut list_items);
        paragraph.push(inline_markup(trimmed));
    }

    if in_code {
        // Unterminated fence: close it rather than swallowing the tail.
        html.push_str(&format!(
            "<pre><code>{}</code></pre>\n",
            code_lines.join("\n")
        ));
    }
    flush_paragraph(&mut html, &mut paragraph);
    flush_list(&mut html, &mut list_items);
    html
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&hashes) {
        line[hashes..]
            .strip_prefix(' ')
            .map(|text| (hashes, text))
    } else {
        None
    }
}

/// Escape, then apply inline spans: `code`, **bold**, [text](url).
fn inline_markup(text: &str) -> String {
    let escaped = escape_html(text);
    let with_code = replace_spans(&escaped, "`", "<code>", "</code>");
    let with_bold = replace_spans(&with_code, "**", "<strong>", "</strong>");
    replace_links(&with_bold)
}

fn replace_spans(s: &str, delim: &str, open: &str, close: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find(delim) {
        let after = &rest[start + delim.len()..];
        match after.find(delim) {
            Some(end) => {
                out.push_str(&rest[..start]);
                out.push_str(open);
                out.push_str(&after[..end]);
                out.push_str(close);
                rest = &after[end + delim.len()..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

fn replace_links(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    loop {
        let Some(start) = rest.find('[') else { break };
        let Some(mid) = rest[start..].find("](") else { break };
        let after = &rest[start + mid + 2..];
        let Some(end) = after.find(')') else { break };

        let text = &rest[start + 1..start + mid];
        let url = &after[..end];
        out.push_str(&rest[..start]);
        out.push_str(&format!("<a href=\"{url}\">{text}</a>"));
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn title_from_slug_capitalizes_words() {
        assert_eq!(title_from_slug("hello-world"), "Hello World");
        assert_eq!(title_from_slug("rag-pipeline-notes"), "Rag Pipeline Notes");
        assert_eq!(title_from_slug("single"), "Single");
    }

    #[test]
    fn missing_dir_yields_empty_list() {
        let posts = list_posts(Path::new("/tmp/does-not-exist-portfolio-blog"));
        assert!(posts.is_empty());
    }

    #[test]
    fn list_posts_enumerates_markdown_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b-second-post.md"), "body").unwrap();
        std::fs::write(dir.path().join("a-first-post.mdx"), "body").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let posts = list_posts(dir.path());
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "a-first-post");
        assert_eq!(posts[0].title, "A First Post");
        assert_eq!(posts[1].slug, "b-second-post");
    }

    #[test]
    fn load_post_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        assert!(load_post(dir.path(), "../etc/passwd").is_none());
        assert!(load_post(dir.path(), "a/b").is_none());
        assert!(load_post(dir.path(), "").is_none());
    }

    #[test]
    fn load_post_reads_md_and_mdx() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("one.md"), "# Hi").unwrap();
        std::fs::write(dir.path().join("two.mdx"), "# Yo").unwrap();
        assert!(load_post(dir.path(), "one").is_some());
        assert!(load_post(dir.path(), "two").is_some());
        assert!(load_post(dir.path(), "three").is_none());
    }

    #[test]
    fn frontmatter_full_block() {
        let content = "---\ntitle: My Post\nsummary: About things\ndate: 2025-06-01\nreadTime: 8 min read\ntags: Rust, LLM, Web\n---\n\nBody text.";
        let (meta, body) = parse_frontmatter(content);
        assert_eq!(meta.title, "My Post");
        assert_eq!(meta.summary, "About things");
        assert_eq!(meta.date, "2025-06-01");
        assert_eq!(meta.read_time, "8 min read");
        assert_eq!(meta.tags, vec!["Rust", "LLM", "Web"]);
        assert_eq!(body, "Body text.");
    }

    #[test]
    fn frontmatter_partial_keeps_defaults() {
        let content = "---\ntitle: Only Title\n---\nBody";
        let (meta, body) = parse_frontmatter(content);
        assert_eq!(meta.title, "Only Title");
        assert_eq!(meta.summary, "A technical article");
        assert_eq!(meta.tags, vec!["Tech"]);
        assert_eq!(body, "Body");
    }

    #[test]
    fn frontmatter_absent_returns_whole_body() {
        let content = "No frontmatter here.";
        let (meta, body) = parse_frontmatter(content);
        assert_eq!(meta, PostMeta::default());
        assert_eq!(body, content);
    }

    #[test]
    fn frontmatter_value_with_colon_preserved() {
        let content = "---\ntitle: RAG: a field guide\n---\nBody";
        let (meta, _) = parse_frontmatter(content);
        assert_eq!(meta.title, "RAG: a field guide");
    }

    #[test]
    fn escape_html_escapes_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn markdown_headings_and_paragraphs() {
        let html = render_markdown("# Title\n\nFirst line\nsecond line\n\n## Section");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>First line second line</p>"));
        assert!(html.contains("<h2>Section</h2>"));
    }

    #[test]
    fn markdown_lists() {
        let html = render_markdown("- one\n- two\n\ntext");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<li>two</li>"));
        assert!(html.contains("<p>text</p>"));
    }

    #[test]
    fn markdown_code_fence_is_escaped() {
        let html = render_markdown("```\nlet x = a < b;\n```");
        assert!(html.contains("<pre><code>let x = a &lt; b;</code></pre>"));
    }

    #[test]
    fn markdown_unterminated_fence_still_closes() {
        let html = render_markdown("```\ntrailing code");
        assert!(html.contains("<pre><code>trailing code</code></pre>"));
    }

    #[test]
    fn markdown_inline_spans() {
        let html = render_markdown("Use `cargo` with **care**, see [docs](https://example.com).");
        assert!(html.contains("<code>cargo</code>"));
        assert!(html.contains("<strong>care</strong>"));
        assert!(html.contains(r#"<a href="https://example.com">docs</a>"#));
    }

    #[test]
    fn markdown_escapes_raw_html() {
        let html = render_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
