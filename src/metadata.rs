//! Text metadata derived from descriptions.
//!
//! Pages pull three things out of an entry's free text: a short
//! meta-description for search snippets, a longer excerpt for the hidden SEO
//! block, and an optional gameplay video.
//!
//! ## Description resolution
//!
//! The first non-empty source wins:
//!
//! ```text
//! entry page:  Info.txt → Comment field → placeholder
//! system page: Info/Info.txt → (no page)
//! ```
//!
//! ## Video links
//!
//! Descriptions conventionally carry a line such as
//! `Gameplay: https://www.youtube.com/watch?v=abcdefghijk`. Any of the watch,
//! `youtu.be` short, or embed URL forms yield the 11-character video ID.
//! Text without a recognizable link simply has no video.

use regex::Regex;
use std::sync::LazyLock;

/// Characters kept in the `<meta name="description">` content.
pub const META_DESCRIPTION_CHARS: usize = 155;

static VIDEO_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Gameplay|Video):\s*(https?://\S+)").expect("video label regex is valid")
});

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("youtube id regex is valid")
});

/// Return the first non-empty, non-blank value in priority order.
///
/// ```text
/// resolve(&[info_txt, comment])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// First `max` characters of `text` (characters, not bytes).
pub fn excerpt(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_pos, _)) => &text[..byte_pos],
        None => text,
    }
}

/// Search-snippet text: first 155 characters, line breaks as spaces, `...`.
pub fn meta_description(text: &str) -> String {
    let head = excerpt(text, META_DESCRIPTION_CHARS);
    let flat = head.replace("\r\n", " ").replace(['\n', '\r'], " ");
    format!("{flat}...")
}

/// Extract a YouTube video ID from a `Gameplay:` or `Video:` line.
pub fn extract_video_id(text: &str) -> Option<String> {
    VIDEO_LABEL
        .captures_iter(text)
        .filter_map(|caps| {
            let url = caps.get(1)?.as_str();
            YOUTUBE_ID
                .captures(url)
                .and_then(|id| id.get(1))
                .map(|m| m.as_str().to_string())
        })
        .next()
}

/// Canonical watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal HTML unescape for the four entities we emit.
    fn unescape(s: &str) -> String {
        s.replace("&quot;", "\"")
            .replace("&gt;", ">")
            .replace("&lt;", "<")
            .replace("&amp;", "&")
    }

    #[test]
    fn resolve_first_non_empty_wins() {
        assert_eq!(
            resolve(&[None, Some("  "), Some("comment"), Some("later")]),
            Some("comment".to_string())
        );
        assert_eq!(resolve(&[None, Some("")]), None);
    }

    #[test]
    fn escape_covers_all_special_characters() {
        let raw = r#"Tom & "Jerry" <3 > all"#;
        let escaped = escape_html(raw);
        assert_eq!(
            escaped,
            "Tom &amp; &quot;Jerry&quot; &lt;3 &gt; all"
        );
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert!(!escaped.contains('"'));
    }

    #[test]
    fn escape_round_trips() {
        for raw in ["a&amp;b", "<script>alert(\"x\")</script>", "&&<<>>\"\"", "plain"] {
            assert_eq!(unescape(&escape_html(raw)), raw);
        }
    }

    #[test]
    fn excerpt_counts_characters_not_bytes() {
        assert_eq!(excerpt("Танчики", 3), "Тан");
        assert_eq!(excerpt("short", 100), "short");
    }

    #[test]
    fn meta_description_collapses_line_breaks() {
        assert_eq!(meta_description("a\r\nb\nc\rd"), "a b c d...");
    }

    #[test]
    fn meta_description_truncates_long_text() {
        let text = "x".repeat(600);
        let meta = meta_description(&text);
        assert_eq!(meta, format!("{}...", "x".repeat(155)));
    }

    #[test]
    fn meta_description_counts_before_collapsing() {
        let text = format!("{}\n{}", "a".repeat(154), "b".repeat(10));
        let meta = meta_description(&text);
        assert_eq!(meta, format!("{} ...", "a".repeat(154)));
    }

    #[test]
    fn video_id_from_short_url() {
        let text = "Great game.\nGameplay: https://youtu.be/abcdefghijk\n";
        assert_eq!(extract_video_id(text).as_deref(), Some("abcdefghijk"));
    }

    #[test]
    fn video_id_from_watch_url() {
        let text = "Video: https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10";
        assert_eq!(extract_video_id(text).as_deref(), Some("dQw4w9WgXcQ"));
    }

    #[test]
    fn video_id_from_embed_url() {
        let text = "Gameplay: https://www.youtube.com/embed/AbC_dEf-123";
        assert_eq!(extract_video_id(text).as_deref(), Some("AbC_dEf-123"));
    }

    #[test]
    fn no_label_means_no_video() {
        assert_eq!(extract_video_id("https://youtu.be/abcdefghijk"), None);
    }

    #[test]
    fn non_youtube_link_means_no_video() {
        assert_eq!(extract_video_id("Gameplay: https://vimeo.com/12345"), None);
        assert_eq!(extract_video_id("Gameplay: https://youtu.be/short"), None);
    }

    #[test]
    fn watch_url_is_canonical() {
        assert_eq!(
            watch_url("abcdefghijk"),
            "https://www.youtube.com/watch?v=abcdefghijk"
        );
    }
}
