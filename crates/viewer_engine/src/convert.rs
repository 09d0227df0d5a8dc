use std::sync::OnceLock;

use regex::Regex;

/// Turns a message body into plain text suitable for a terminal page.
pub trait Converter: Send + Sync {
    fn to_text(&self, html: &str) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Html2TextConverter;

fn markdown_image() -> &'static Regex {
    static IMAGE: OnceLock<Regex> = OnceLock::new();
    IMAGE.get_or_init(|| Regex::new(r"!\[[^\]]*\]\(([^)\s]*)[^)]*\)").expect("static regex"))
}

impl Converter for Html2TextConverter {
    fn to_text(&self, html: &str) -> String {
        let markdown = html2md::parse_html(html);
        let with_placeholders = markdown_image().replace_all(&markdown, |caps: &regex::Captures| {
            format!("[image: {}]", image_name(&caps[1]))
        });
        let lines: Vec<&str> = with_placeholders.lines().map(str::trim_end).collect();
        lines.join("\n").trim_matches('\n').to_string()
    }
}

fn image_name(target: &str) -> &str {
    let without_query = target.split(['?', '#']).next().unwrap_or(target);
    without_query
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_text() {
        let text = Html2TextConverter.to_text("<p>Hello</p><p>world</p>");
        assert!(text.contains("Hello"));
        assert!(text.contains("world"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn images_render_as_named_placeholders() {
        let text = Html2TextConverter.to_text(
            r#"look <img src="file:///snap/images/cat.png" alt="cat"> here"#,
        );
        assert!(text.contains("[image: cat.png]"), "unexpected text: {text:?}");
    }

    #[test]
    fn image_name_strips_query_and_path() {
        assert_eq!(image_name("https://a/b/c.jpg?x=1"), "c.jpg");
        assert_eq!(image_name("c.jpg"), "c.jpg");
    }
}
