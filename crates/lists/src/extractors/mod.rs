// ABOUTME: The list detection pipeline: candidate filter, cluster scorer and title extractor.
// ABOUTME: ListExtractor in `list` wires the stages together.

//! List extraction module.
//!
//! Submodules, in pipeline order:
//! - `candidates`: filters decorated nodes and groups them by parent selector.
//! - `scoring`: scores clusters and chooses the best one.
//! - `title`: picks the title path inside the chosen cluster and emits items.
//! - `list`: the `ListExtractor` entry point.

pub mod candidates;
pub mod list;
pub mod scoring;
pub mod title;
