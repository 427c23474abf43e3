use std::sync::OnceLock;

use regex::Regex;

/// Number of characters kept in a post preview
pub const EXCERPT_LENGTH: usize = 150;

/// Appended to every excerpt
pub const ELLIPSIS: &str = "...";

fn image_reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap())
}

// An unterminated `<` swallows the rest of the text, like a browser would.
fn html_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>?").unwrap())
}

fn markup_chars_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[#*`]").unwrap())
}

/// Remove image references, HTML tags and Markdown emphasis characters
///
/// Entities are decoded first, so encoded markup is stripped like literal
/// markup. The result is trimmed.
pub fn strip_markup(body: &str) -> String {
    let decoded = html_escape::decode_html_entities(body);
    let without_images = image_reference_regex().replace_all(&decoded, "");
    let without_tags = html_tag_regex().replace_all(&without_images, "");
    markup_chars_regex()
        .replace_all(&without_tags, "")
        .trim()
        .to_string()
}

/// Keep at most `max_chars` characters, never splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Build the preview text shown on a post card
///
/// The ellipsis is always appended, also for short or missing bodies.
pub fn build_excerpt(body: Option<&str>) -> String {
    let plain = strip_markup(body.unwrap_or_default());
    format!("{}{ELLIPSIS}", truncate_chars(&plain, EXCERPT_LENGTH))
}
