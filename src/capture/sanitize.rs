//! Markup stripping for operator-supplied and rendered text.
//!
//! # Responsibilities
//! - Remove anything that could execute or render as markup
//! - Pass all other text through unchanged
//!
//! # Design Decisions
//! - Strip, don't escape: removed content cannot resurface after a second
//!   encoding pass
//! - An unterminated tag swallows the rest of the input (it could never
//!   render as safe text anyway)

/// Strip markup from `text`, passing everything else through.
///
/// Everything between `<` and the matching `>` is removed, including the
/// delimiters. Applied to override bodies at set-time and to history entries
/// rendered into the dashboard.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(sanitize("hello world"), "hello world");
        assert_eq!(sanitize(r#"{"x": 5}"#), r#"{"x": 5}"#);
    }

    #[test]
    fn test_tags_are_stripped() {
        assert_eq!(sanitize("<script>alert(1)</script>ok"), "alert(1)ok");
        assert_eq!(sanitize("a<b>c</b>d"), "acd");
    }

    #[test]
    fn test_unterminated_tag_is_dropped() {
        assert_eq!(sanitize("safe<img src=x onerror=boom"), "safe");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize(""), "");
    }
}
