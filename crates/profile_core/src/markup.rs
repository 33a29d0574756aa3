//! HTML text helpers used by projections and the renderer.
//!
//! # Invariants
//! - `escape_html` output is safe both as element text and inside a
//!   double-quoted attribute value.
//! - Fragment scanning never panics on malformed markup; unclosed elements
//!   extend to the end of the input.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<!--[\s\S]*?-->|<(/?)([A-Za-z][A-Za-z0-9-]*)(?:[^>]*?)(/?)>")
        .expect("valid tag regex")
});
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z]+);").expect("valid entity regex"));

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Escapes text for insertion into markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Returns the text content of an HTML fragment.
pub fn plain_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, "");
    decode_entities(&stripped)
}

/// Splits a fragment into its top-level elements (outer HTML each).
///
/// Text between top-level elements is not an element and is skipped.
pub fn top_level_elements(html: &str) -> Vec<String> {
    let mut elements = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for captures in TAG_RE.captures_iter(html) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        let Some(name) = captures.get(2) else {
            // comment
            continue;
        };
        let closing = captures.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = captures.get(3).is_some_and(|m| !m.as_str().is_empty());
        let is_void = VOID_ELEMENTS.contains(&name.as_str().to_ascii_lowercase().as_str());

        if closing {
            if depth == 0 {
                continue;
            }
            depth -= 1;
            if depth == 0 {
                if let Some(begin) = start.take() {
                    elements.push(html[begin..whole.end()].to_string());
                }
            }
            continue;
        }

        if depth == 0 {
            if is_void || self_closing {
                elements.push(whole.as_str().to_string());
                continue;
            }
            start = Some(whole.start());
        }
        if !is_void && !self_closing {
            depth += 1;
        }
    }

    if let Some(begin) = start {
        elements.push(html[begin..].to_string());
    }

    elements
}

fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |captures: &regex::Captures<'_>| {
            let entity = &captures[1];
            decode_entity(entity).unwrap_or_else(|| captures[0].to_string())
        })
        .into_owned()
}

fn decode_entity(entity: &str) -> Option<String> {
    let decoded = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        numeric if numeric.starts_with("#x") || numeric.starts_with("#X") => {
            char::from_u32(u32::from_str_radix(&numeric[2..], 16).ok()?)?
        }
        numeric if numeric.starts_with('#') => char::from_u32(numeric[1..].parse().ok()?)?,
        _ => return None,
    };
    Some(decoded.to_string())
}

#[cfg(test)]
mod tests {
    use super::{escape_html, plain_text, top_level_elements};

    #[test]
    fn escapes_structural_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn plain_text_strips_tags_and_decodes_entities() {
        assert_eq!(
            plain_text("<p>Hello <strong>Rust</strong> &amp; friends&#33;</p><!-- note -->"),
            "Hello Rust & friends!"
        );
        assert_eq!(plain_text("fish &unknown; chips"), "fish &unknown; chips");
    }

    #[test]
    fn splits_top_level_elements() {
        let sections = top_level_elements("<p>one <em>1</em></p>\n<div><p>two</p></div>tail<br>");
        assert_eq!(
            sections,
            vec!["<p>one <em>1</em></p>", "<div><p>two</p></div>", "<br>"]
        );
    }

    #[test]
    fn plain_text_bio_has_no_elements() {
        assert!(top_level_elements("just words").is_empty());
    }

    #[test]
    fn unclosed_element_runs_to_end() {
        assert_eq!(top_level_elements("<p>open <b>x</b>"), vec!["<p>open <b>x</b>"]);
    }
}
