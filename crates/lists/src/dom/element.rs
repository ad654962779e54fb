// ABOUTME: Feature decoration of DOM elements: sibling counts, parent paths, anchor groups, similarity.
// ABOUTME: Produces the read-only DecoratedNode values consumed by the list extraction pipeline.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

use super::normalize_spaces;
use super::selector::NodePath;
use super::similarity::{signature, similarity};

/// A link-bearing descendant of a decorated node.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorDescendant {
    pub text: String,
    pub attrib: HashMap<String, String>,
    /// Tag chain from the decorated node (exclusive) to the anchor, e.g. `div/h3/a`.
    pub path: String,
}

impl AnchorDescendant {
    pub fn new(text: impl Into<String>, href: Option<&str>, path: impl Into<String>) -> Self {
        let mut attrib = HashMap::new();
        if let Some(href) = href {
            attrib.insert("href".to_string(), href.to_string());
        }
        Self {
            text: text.into(),
            attrib,
            path: path.into(),
        }
    }

    pub fn href(&self) -> Option<&str> {
        self.attrib.get("href").map(String::as_str)
    }

    /// Length of the anchor text in chars.
    pub fn text_length(&self) -> usize {
        self.text.chars().count()
    }
}

/// An element together with the signals list detection is computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct DecoratedNode {
    pub tag: String,
    pub selector: NodePath,
    pub parent_selector: NodePath,
    pub number_of_siblings: usize,
    pub similarity_with_siblings: f64,
    pub a_descendants: Vec<AnchorDescendant>,
    pub a_descendants_group_text_min_length: f64,
    pub a_descendants_group_text_max_length: f64,
}

impl DecoratedNode {
    /// Assemble a node and derive the grouped anchor text lengths from `a_descendants`.
    pub fn new(
        tag: impl Into<String>,
        selector: NodePath,
        parent_selector: NodePath,
        number_of_siblings: usize,
        similarity_with_siblings: f64,
        a_descendants: Vec<AnchorDescendant>,
    ) -> Self {
        let (min, max) = group_text_length_bounds(&a_descendants);
        Self {
            tag: tag.into(),
            selector,
            parent_selector,
            number_of_siblings,
            similarity_with_siblings,
            a_descendants,
            a_descendants_group_text_min_length: min,
            a_descendants_group_text_max_length: max,
        }
    }
}

/// Min and max over the mean text length of anchors sharing a path.
fn group_text_length_bounds(anchors: &[AnchorDescendant]) -> (f64, f64) {
    // (path, total length, count) in first-seen order
    let mut groups: Vec<(&str, usize, usize)> = Vec::new();
    for anchor in anchors {
        match groups.iter().position(|(path, _, _)| *path == anchor.path) {
            Some(i) => {
                groups[i].1 += anchor.text_length();
                groups[i].2 += 1;
            }
            None => groups.push((anchor.path.as_str(), anchor.text_length(), 1)),
        }
    }

    let means = groups
        .iter()
        .map(|(_, total, count)| *total as f64 / *count as f64);
    means.fold(None, |acc: Option<(f64, f64)>, mean| match acc {
        Some((min, max)) => Some((min.min(mean), max.max(mean))),
        None => Some((mean, mean)),
    })
    .unwrap_or((0.0, 0.0))
}

/// Decorate every element below `<body>` (or the root element when there is none),
/// in document order.
pub fn decorate(doc: &Html) -> Vec<DecoratedNode> {
    let scope = Selector::parse("body")
        .ok()
        .and_then(|sel| doc.select(&sel).next())
        .unwrap_or_else(|| doc.root_element());

    let mut decorator = Decorator::default();
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .map(|element| decorator.decorate_element(&element))
        .collect()
}

#[derive(Default)]
struct Decorator {
    signatures: HashMap<NodeId, String>,
    paths: HashMap<NodeId, NodePath>,
}

impl Decorator {
    fn signature_of(&mut self, element: &ElementRef) -> &str {
        self.signatures
            .entry(element.id())
            .or_insert_with(|| signature(element))
    }

    fn path_of(&mut self, element: &ElementRef) -> NodePath {
        self.paths
            .entry(element.id())
            .or_insert_with(|| NodePath::of(element))
            .clone()
    }

    fn decorate_element(&mut self, element: &ElementRef) -> DecoratedNode {
        let parent = element.parent().and_then(ElementRef::wrap);
        let siblings: Vec<ElementRef> = parent
            .map(|p| {
                p.children()
                    .filter_map(ElementRef::wrap)
                    .filter(|sibling| sibling.id() != element.id())
                    .collect()
            })
            .unwrap_or_default();

        let own_signature = self.signature_of(element).to_string();
        let similarity_with_siblings = if siblings.is_empty() {
            0.0
        } else {
            let total: f64 = siblings
                .iter()
                .map(|sibling| similarity(&own_signature, self.signature_of(sibling)))
                .sum();
            total / siblings.len() as f64
        };

        let a_descendants = element
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name().eq_ignore_ascii_case("a"))
            .map(|anchor| anchor_descendant(element, &anchor))
            .collect();

        let parent_selector = parent.map(|p| self.path_of(&p)).unwrap_or_default();

        DecoratedNode::new(
            element.value().name().to_lowercase(),
            self.path_of(element),
            parent_selector,
            siblings.len(),
            similarity_with_siblings,
            a_descendants,
        )
    }
}

fn anchor_descendant(ancestor: &ElementRef, anchor: &ElementRef) -> AnchorDescendant {
    let attrib = anchor
        .value()
        .attrs()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AnchorDescendant {
        text: normalize_spaces(&anchor.text().collect::<String>()),
        attrib,
        path: relative_path(ancestor, anchor),
    }
}

fn relative_path(ancestor: &ElementRef, descendant: &ElementRef) -> String {
    let mut tags = Vec::new();
    let mut current = Some(*descendant);
    while let Some(el) = current {
        if el.id() == ancestor.id() {
            break;
        }
        tags.push(el.value().name().to_lowercase());
        current = el.parent().and_then(ElementRef::wrap);
    }
    tags.reverse();
    tags.join("/")
}
