use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("static regex"))
}

fn whitespace_pattern() -> &'static Regex {
    static SPACES: OnceLock<Regex> = OnceLock::new();
    SPACES.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// 移除 HTML 標籤並壓縮空白 (題庫常見 `<i>Hamlet</i>` 這類標記)
pub fn strip_html(input: &str) -> String {
    let without_tags = tag_pattern().replace_all(input, "");
    collapse_whitespace(&without_tags)
}

pub fn collapse_whitespace(input: &str) -> String {
    whitespace_pattern()
        .replace_all(input.trim(), " ")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_html_removes_markup() {
        assert_eq!(strip_html("<i>Hamlet</i>"), "Hamlet");
        assert_eq!(strip_html("a <b>bold</b>  move"), "a bold move");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  two\n\tlines  "), "two lines");
        assert_eq!(collapse_whitespace(""), "");
    }
}
