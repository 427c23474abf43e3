use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::issue::{IssueLabel, IssueUser, RawIssue};

/// URL of a post's cover image
///
/// Never empty and never contains whitespace. Construct it with
/// [`CoverImage::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct CoverImage(String);

impl CoverImage {
    /// Accepts a URL-like reference, trimming surrounding whitespace and
    /// angle brackets. Returns `None` for anything empty or containing
    /// whitespace.
    pub fn parse(candidate: &str) -> Option<Self> {
        let trimmed = candidate
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim();

        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CoverImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CoverImage> for String {
    fn from(value: CoverImage) -> Self {
        value.0
    }
}

/// Blog post derived from a GitHub issue
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BlogPost {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub cover_image: Option<CoverImage>,
    pub created_at: String,
    pub updated_at: String,
    pub author: IssueUser,
    pub labels: Vec<IssueLabel>,
    pub html_url: String,
}

fn markdown_image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[.*?\]\((.*?)\)").unwrap())
}

fn html_image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<img.*?src=["'](.*?)["']"#).unwrap())
}

fn is_link_title(text: &str) -> bool {
    let quoted = |open: char, close: char| {
        text.len() >= 2 && text.starts_with(open) && text.ends_with(close)
    };
    quoted('"', '"') || quoted('\'', '\'')
}

/// URL of a Markdown image target
///
/// `<url>` is taken verbatim up to the closing bracket. Otherwise the first
/// token is the URL and anything after it must be a quoted title.
fn markdown_target(target: &str) -> Option<&str> {
    let target = target.trim();

    if let Some(rest) = target.strip_prefix('<') {
        return rest.split_once('>').map(|(url, _)| url);
    }

    match target.split_once(char::is_whitespace) {
        None => Some(target),
        Some((url, title)) => is_link_title(title.trim()).then_some(url),
    }
}

/// Find the cover image of a post body
///
/// Only the first Markdown image (`![alt](url)`) is considered, then only the
/// first HTML `<img src="...">`. Markdown wins even if the HTML image appears
/// earlier in the text.
pub fn extract_cover_image(body: &str) -> Option<CoverImage> {
    if body.is_empty() {
        return None;
    }

    let from_markdown = markdown_image_regex()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| markdown_target(m.as_str()))
        .and_then(CoverImage::parse);

    from_markdown.or_else(|| {
        html_image_regex()
            .captures(body)
            .and_then(|caps| caps.get(1))
            .and_then(|m| CoverImage::parse(m.as_str()))
    })
}

/// Transform a single issue into a blog post
///
/// Pull requests never become blog posts.
pub fn transform_issue(issue: RawIssue) -> Option<BlogPost> {
    if issue.is_pull_request() {
        return None;
    }

    let cover_image = issue.body.as_deref().and_then(extract_cover_image);

    Some(BlogPost {
        id: issue.id,
        number: issue.number,
        title: issue.title,
        body: issue.body,
        cover_image,
        created_at: issue.created_at,
        updated_at: issue.updated_at,
        author: issue.user,
        labels: issue.labels,
        html_url: issue.html_url,
    })
}

/// Transform GitHub issues into blog posts, dropping pull requests
///
/// Order is preserved.
pub fn transform_issues(issues: Vec<RawIssue>) -> Vec<BlogPost> {
    issues.into_iter().filter_map(transform_issue).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_issue(number: u64, body: Option<&str>, pull_request: bool) -> RawIssue {
        RawIssue {
            id: 500 + number,
            number,
            title: format!("Issue {number}"),
            body: body.map(str::to_string),
            created_at: "2024-01-15T08:30:00Z".to_string(),
            updated_at: "2024-01-16T08:30:00Z".to_string(),
            user: IssueUser {
                login: "writer".to_string(),
                avatar_url: "https://avatars.example/writer".to_string(),
            },
            labels: vec![IssueLabel {
                name: "export".to_string(),
                color: "0e8a16".to_string(),
            }],
            pull_request: pull_request
                .then(|| serde_json::json!({ "url": "https://api.github.com/pr" })),
            html_url: format!("https://github.com/o/r/issues/{number}"),
        }
    }

    fn cover(body: &str) -> Option<String> {
        extract_cover_image(body).map(String::from)
    }

    #[test]
    fn test_extract_cover_markdown_wins_over_html() {
        let body = "![cover](https://x/a.png) and <img src='https://x/b.png'>";
        assert_eq!(cover(body), Some("https://x/a.png".to_string()));
    }

    #[test]
    fn test_extract_cover_markdown_wins_even_when_later() {
        let body = "<img src=\"https://x/first.png\">\n\nText\n\n![late](https://x/late.png)";
        assert_eq!(cover(body), Some("https://x/late.png".to_string()));
    }

    #[test]
    fn test_extract_cover_html_double_quotes() {
        assert_eq!(
            cover("<img src=\"https://x/c.png\">"),
            Some("https://x/c.png".to_string())
        );
    }

    #[test]
    fn test_extract_cover_html_with_other_attributes() {
        let body = r#"<img width="300" alt="kiln" src="https://x/kiln.jpg" />"#;
        assert_eq!(cover(body), Some("https://x/kiln.jpg".to_string()));
    }

    #[test]
    fn test_extract_cover_first_markdown_only() {
        let body = "![one](https://x/1.png) ![two](https://x/2.png)";
        assert_eq!(cover(body), Some("https://x/1.png".to_string()));
    }

    #[test]
    fn test_extract_cover_markdown_title_is_dropped() {
        let body = r#"![bags](https://x/bags.png "Charcoal bags")"#;
        assert_eq!(cover(body), Some("https://x/bags.png".to_string()));
    }

    #[test]
    fn test_extract_cover_markdown_single_quoted_title() {
        assert_eq!(
            cover("![bags](https://x/bags.png 'Bags')"),
            Some("https://x/bags.png".to_string())
        );
    }

    #[test]
    fn test_extract_cover_markdown_target_with_spaces_is_absent() {
        assert_eq!(cover("![a](my file.png)"), None);
        assert_eq!(cover("![a](<https://x/a b.png>)"), None);
    }

    #[test]
    fn test_extract_cover_markdown_target_with_spaces_falls_back_to_html() {
        let body = "![a](my file.png) <img src=\"https://x/ok.png\">";
        assert_eq!(cover(body), Some("https://x/ok.png".to_string()));
    }

    #[test]
    fn test_extract_cover_markdown_angle_brackets() {
        assert_eq!(
            cover("![a](<https://x/a.png> \"title\")"),
            Some("https://x/a.png".to_string())
        );
    }

    #[test]
    fn test_extract_cover_empty_markdown_target_falls_back_to_html() {
        let body = "![broken]() <img src='https://x/ok.png'>";
        assert_eq!(cover(body), Some("https://x/ok.png".to_string()));
    }

    #[test]
    fn test_extract_cover_empty_html_src_is_absent() {
        assert_eq!(cover("<img src=\"\">"), None);
    }

    #[test]
    fn test_extract_cover_empty_body() {
        assert_eq!(cover(""), None);
    }

    #[test]
    fn test_extract_cover_no_images() {
        assert_eq!(cover("Just text about [a link](https://x/page)"), None);
    }

    #[test]
    fn test_cover_image_parse_rejects_blank() {
        assert!(CoverImage::parse("").is_none());
        assert!(CoverImage::parse("   ").is_none());
        assert!(CoverImage::parse("<>").is_none());
        assert!(CoverImage::parse("two words").is_none());
    }

    #[test]
    fn test_cover_image_serializes_as_string() {
        let image = CoverImage::parse("<https://x/a.png>").unwrap();
        assert_eq!(image.as_str(), "https://x/a.png");
        assert_eq!(
            serde_json::to_string(&image).unwrap(),
            "\"https://x/a.png\""
        );
    }

    #[test]
    fn test_transform_issue_passes_metadata_through() {
        let issue = create_issue(12, Some("![c](https://x/c.png) body"), false);

        let post = transform_issue(issue.clone()).unwrap();

        assert_eq!(post.id, issue.id);
        assert_eq!(post.number, 12);
        assert_eq!(post.title, "Issue 12");
        assert_eq!(post.body, issue.body);
        assert_eq!(post.created_at, issue.created_at);
        assert_eq!(post.updated_at, issue.updated_at);
        assert_eq!(post.author, issue.user);
        assert_eq!(post.labels, issue.labels);
        assert_eq!(post.html_url, issue.html_url);
        assert_eq!(
            post.cover_image.map(String::from),
            Some("https://x/c.png".to_string())
        );
    }

    #[test]
    fn test_transform_issue_absent_body_has_no_cover() {
        let post = transform_issue(create_issue(1, None, false)).unwrap();
        assert_eq!(post.cover_image, None);
        assert_eq!(post.body, None);
    }

    #[test]
    fn test_transform_issue_rejects_pull_request() {
        assert!(transform_issue(create_issue(1, Some("text"), true)).is_none());
    }

    #[test]
    fn test_transform_issues_drops_pull_requests_in_order() {
        let issues = vec![
            create_issue(9, None, false),
            create_issue(8, None, true),
            create_issue(7, None, false),
            create_issue(6, None, true),
            create_issue(5, None, false),
        ];
        let expected = issues.iter().filter(|i| !i.is_pull_request()).count();

        let posts = transform_issues(issues);

        assert_eq!(posts.len(), expected);
        let numbers: Vec<u64> = posts.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![9, 7, 5]);
    }

    #[test]
    fn test_transform_issues_empty() {
        assert!(transform_issues(vec![]).is_empty());
    }
}
