// ABOUTME: Structural node paths (CSS-like selector chains) identifying elements by position.
// ABOUTME: Ancestry is decided on whole segments so `div:nth-child(2)` never prefixes `div:nth-child(20)`.

use scraper::ElementRef;
use std::fmt;

/// Chain of selector segments from the root element down to one element.
///
/// A segment is `tag`, `#id` when present, one `.class` per class (sorted)
/// and `:nth-child(n)` for every element that has an element parent.
/// Ordering is lexicographic over segments, which keeps every descendant
/// directly after its ancestors when paths are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// Build the path of an element by walking up to the root element.
    pub fn of(element: &ElementRef) -> Self {
        let mut segments = Vec::new();
        let mut current = Some(*element);
        while let Some(el) = current {
            segments.push(segment(&el));
            current = el.parent().and_then(ElementRef::wrap);
        }
        segments.reverse();
        Self { segments }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Strict ancestry: `self` is a proper segment prefix of `other`.
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        self.segments.len() < other.segments.len() && other.segments.starts_with(&self.segments)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join(">"))
    }
}

/// Tag plus sorted classes, without id or position.
///
/// Repeated list items usually share this even when their ids differ.
pub fn alias(element: &ElementRef) -> String {
    let mut out = element.value().name().to_lowercase();
    for class in sorted_classes(element) {
        out.push('.');
        out.push_str(class);
    }
    out
}

fn segment(element: &ElementRef) -> String {
    let el = element.value();
    let mut out = el.name().to_lowercase();
    if let Some(id) = el.id() {
        if !id.trim().is_empty() {
            out.push('#');
            out.push_str(id.trim());
        }
    }
    for class in sorted_classes(element) {
        out.push('.');
        out.push_str(class);
    }
    if element.parent().and_then(ElementRef::wrap).is_some() {
        let position = element
            .prev_siblings()
            .filter(|node| node.value().is_element())
            .count()
            + 1;
        out.push_str(&format!(":nth-child({})", position));
    }
    out
}

fn sorted_classes<'a>(element: &ElementRef<'a>) -> Vec<&'a str> {
    let mut classes: Vec<&str> = element.value().classes().collect();
    classes.sort_unstable();
    classes.dedup();
    classes
}
