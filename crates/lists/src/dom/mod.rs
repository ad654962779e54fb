// ABOUTME: DOM preparation and per-node feature computation for list extraction.
// ABOUTME: Cleans markup, derives structural node paths and decorates elements with list signals.

//! DOM utilities for list extraction.
//!
//! The extractor never looks at raw markup directly. Pages go through
//! [`preprocess::preprocess_for_list`] and are then turned into
//! [`element::DecoratedNode`] values carrying the read-only signals the
//! candidate filter, scorer and title model work from.

pub mod element;
pub mod preprocess;
pub mod selector;
pub mod similarity;

/// Normalize whitespace in text
pub fn normalize_spaces(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
