// ABOUTME: Title extractor: votes for the anchor path most likely to hold item titles, then emits items.
// ABOUTME: Title likelihood is a Gaussian over anchor text length centered on the configured average.

use std::collections::HashMap;
use std::f64::consts::PI;

use tracing::{debug, trace};

use crate::dom::element::DecoratedNode;
use crate::error::ExtractError;
use crate::result::ListItem;

/// Spread of the title length distribution, in chars.
pub const TITLE_LENGTH_SIGMA: f64 = 6.0;

/// Probability density of a title having `length` chars.
pub fn probability_of_title_with_length(length: usize, avg_length: f64) -> f64 {
    let sigma = TITLE_LENGTH_SIGMA;
    let delta = length as f64 - avg_length;
    (-(delta * delta) / (2.0 * sigma * sigma)).exp() / ((2.0 * PI).sqrt() * sigma)
}

/// Path whose anchors have the highest mean title probability across the cluster.
///
/// Ties go to the path seen first. `None` when the cluster has no anchors.
pub fn best_title_path(cluster: &[DecoratedNode], avg_length: f64) -> Option<String> {
    // path -> (sum, count), ordered by first appearance
    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for node in cluster {
        for anchor in &node.a_descendants {
            let probability = probability_of_title_with_length(anchor.text_length(), avg_length);
            let entry = totals.entry(anchor.path.as_str()).or_insert_with(|| {
                order.push(anchor.path.as_str());
                (0.0, 0)
            });
            entry.0 += probability;
            entry.1 += 1;
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for path in order {
        let (sum, count) = totals[path];
        let mean = sum / count as f64;
        if best.map_or(true, |(_, top)| mean > top) {
            best = Some((path, mean));
        }
    }
    best.map(|(path, _)| path.to_string())
}

/// Make protocol-relative URLs absolute; everything else passes through.
pub fn normalize_url(url: &str) -> String {
    if url.starts_with("//") {
        format!("http:{}", url)
    } else {
        url.to_string()
    }
}

/// Emit one item per anchor on the best title path that carries an href.
///
/// The href is emitted as written; a blank one counts as missing.
pub fn extract_from_cluster(
    cluster: &[DecoratedNode],
    avg_length: f64,
) -> Result<Vec<ListItem>, ExtractError> {
    let best_path = best_title_path(cluster, avg_length)
        .ok_or_else(|| ExtractError::no_title_path("ExtractFromCluster"))?;
    debug!(best_path = %best_path, "best title path");

    let mut items = Vec::new();
    for node in cluster {
        for anchor in node.a_descendants.iter().filter(|a| a.path == best_path) {
            let href = match anchor.href() {
                Some(href) if !href.trim().is_empty() => href,
                _ => {
                    trace!(title = %anchor.text, "skipping anchor without href");
                    continue;
                }
            };
            items.push(ListItem::new(anchor.text.clone(), normalize_url(href)));
        }
    }
    Ok(items)
}
