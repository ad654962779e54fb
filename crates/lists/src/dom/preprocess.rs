// ABOUTME: Markup cleanup applied before list detection.
// ABOUTME: Drops non-content tags and noise blocks, unwraps inline formatting, strips comments.

use ego_tree::NodeId;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::collections::HashSet;

// Removed together with their whole subtree
const USELESS_TAGS: &[&str] = &[
    "meta", "style", "script", "noscript", "link", "video", "audio", "iframe", "source", "svg",
    "path", "symbol", "img", "footer", "header", "xmp", "noembed", "noframes",
    "plaintext",
];

// Tag dropped, children kept in place
const STRIP_TAGS: &[&str] = &["span", "strong", "em", "b", "i", "font"];

static NOISE_CLASS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)comment|advert").unwrap());
static HIDDEN_STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)display\s*:\s*none").unwrap());

fn is_useless_tag(name: &str) -> bool {
    USELESS_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name))
}

fn is_strip_tag(name: &str) -> bool {
    STRIP_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name))
}

/// Comment widgets, ad slots and hidden blocks.
pub fn is_noise(element: &ElementRef) -> bool {
    let el = element.value();
    if let Some(style) = el.attr("style") {
        if HIDDEN_STYLE_RE.is_match(style) {
            return true;
        }
    }
    if el.name().eq_ignore_ascii_case("div") {
        if let Some(class) = el.attr("class") {
            return NOISE_CLASS_RE.is_match(class);
        }
    }
    false
}

fn mark_removed(doc: &Html) -> HashSet<NodeId> {
    let mut skip = HashSet::new();
    for node in doc.tree.root().descendants() {
        if let Some(el) = ElementRef::wrap(node) {
            if is_useless_tag(el.value().name()) || is_noise(&el) {
                skip.insert(el.id());
            }
        }
    }
    skip
}

/// Clean raw markup for list detection and return the re-serialized document.
///
/// Applying it to its own output changes nothing.
pub fn preprocess_for_list(html: &str) -> String {
    let doc = Html::parse_document(html);
    let skip = mark_removed(&doc);

    let mut out = String::with_capacity(html.len());
    for child in doc.tree.root().children() {
        serialize_node(child, &skip, &mut out);
    }
    out
}

fn serialize_node(node: ego_tree::NodeRef<Node>, skip: &HashSet<NodeId>, out: &mut String) {
    if skip.contains(&node.id()) {
        return;
    }
    match node.value() {
        Node::Text(t) => out.push_str(&escape_text(t)),
        Node::Element(el) => {
            let name = el.name();
            if is_strip_tag(name) {
                for child in node.children() {
                    serialize_node(child, skip, out);
                }
                return;
            }

            out.push('<');
            out.push_str(name);

            // attribute storage is unordered, sort for a stable output
            let mut attrs: Vec<(&str, &str)> = el.attrs().collect();
            attrs.sort_unstable();
            for (k, v) in attrs {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&escape_attr(v));
                out.push('"');
            }
            out.push('>');

            if is_void_element(name) {
                return;
            }

            if drops_leading_newline(name) {
                let mut inner = String::new();
                for child in node.children() {
                    serialize_node(child, skip, &mut inner);
                }
                // the parser eats one newline right after the start tag
                if inner.starts_with('\n') {
                    out.push('\n');
                }
                out.push_str(&inner);
            } else {
                for child in node.children() {
                    serialize_node(child, skip, out);
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        _ => {}
    }
}

fn drops_leading_newline(tag: &str) -> bool {
    matches!(tag.to_lowercase().as_str(), "pre" | "textarea" | "listing")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scraper::Selector;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Index</title><script>var a = "<li>";</script><style>li{}</style></head>
<body>
<header><a href="/">Home</a></header>
<!-- list starts -->
<ul class="news">
<li><a href="/1" class="x" data-id="1"><span>Breaking:</span> <b>rates</b> &amp; markets</a><img src="a.png"></li>
</ul>
<div class="comment-box"><a href="/c">comment</a></div>
<div style="display: none">hidden</div>
<footer>bye</footer>
</body></html>"#;

    #[test]
    fn test_removes_useless_and_noise() {
        let out = preprocess_for_list(PAGE);
        assert!(!out.contains("<script"));
        assert!(!out.contains("<style"));
        assert!(!out.contains("<header"));
        assert!(!out.contains("<footer"));
        assert!(!out.contains("<img"));
        assert!(!out.contains("comment-box"));
        assert!(!out.contains("hidden"));
        assert!(!out.contains("list starts"));
        assert!(!out.contains("DOCTYPE"));
    }

    #[test]
    fn test_unwraps_inline_tags_and_keeps_text() {
        let out = preprocess_for_list(PAGE);
        assert!(!out.contains("<span"));
        assert!(!out.contains("<b>"));

        let doc = Html::parse_document(&out);
        let sel = Selector::parse("ul.news a").unwrap();
        let a = doc.select(&sel).next().unwrap();
        assert_eq!(a.text().collect::<String>(), "Breaking: rates & markets");
        assert_eq!(a.value().attr("href"), Some("/1"));
        assert_eq!(a.value().attr("data-id"), Some("1"));
    }

    #[test]
    fn test_idempotent() {
        let once = preprocess_for_list(PAGE);
        let twice = preprocess_for_list(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_idempotent_keeps_leading_newlines() {
        let html = "<body><pre>\n\ncode</pre><textarea>\n\nnote</textarea>\
                    <pre><span>\nwrapped</span></pre><listing>\n\nold</listing></body>";
        let once = preprocess_for_list(html);
        let twice = preprocess_for_list(&once);
        let thrice = preprocess_for_list(&twice);
        assert_eq!(once, twice);
        assert_eq!(twice, thrice);

        let doc = Html::parse_document(&once);
        let sel = Selector::parse("pre").unwrap();
        let texts: Vec<String> = doc.select(&sel).map(|el| el.text().collect()).collect();
        assert_eq!(texts, vec!["\ncode".to_string(), "\nwrapped".to_string()]);
    }

    #[test]
    fn test_raw_text_elements_dropped() {
        let html = "<body><xmp>a &amp; <b></xmp><noembed>x &lt; y</noembed><p>kept</p></body>";
        let once = preprocess_for_list(html);
        assert!(!once.contains("xmp"));
        assert!(!once.contains("noembed"));
        assert!(once.contains("<p>kept</p>"));
        assert_eq!(preprocess_for_list(&once), once);
    }

    #[test]
    fn test_noise_detection() {
        let doc = Html::parse_document(
            r#"<div class="advertisement">x</div><p class="comment">y</p><p style="DISPLAY:NONE">z</p>"#,
        );
        let sel = Selector::parse("div, p").unwrap();
        let flags: Vec<bool> = doc.select(&sel).map(|el| is_noise(&el)).collect();
        assert_eq!(flags, vec![true, false, true]);
    }
}
