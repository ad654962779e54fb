// ABOUTME: Merges candidate groups whose parent selectors are near-identical into clusters.
// ABOUTME: Defines the Clusterer seam and the default greedy selector-similarity implementation.

use std::collections::BTreeMap;

use crate::dom::element::DecoratedNode;
use crate::dom::selector::NodePath;
use crate::dom::similarity::similarity;

/// Candidate nodes grouped by their parent selector, sorted by selector.
pub type CandidateGroups = BTreeMap<NodePath, Vec<DecoratedNode>>;

/// Cluster id to member nodes, iterated in ascending id order.
pub type Clusters = BTreeMap<usize, Vec<DecoratedNode>>;

/// Default similarity two selectors must exceed to share a cluster.
pub const CLUSTER_THRESHOLD: f64 = 0.8;

/// Groups selector groups into clusters of structurally equivalent lists.
///
/// Implementations must place every input node in exactly one cluster.
pub trait Clusterer {
    fn cluster(&self, groups: CandidateGroups) -> Clusters;
}

/// Greedy clustering on the rendered parent selectors.
///
/// Selectors are visited in ascending order; each joins the first cluster
/// whose every member it resembles above `threshold`, or opens a new one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorClusterer {
    pub threshold: f64,
}

impl Default for SelectorClusterer {
    fn default() -> Self {
        Self {
            threshold: CLUSTER_THRESHOLD,
        }
    }
}

impl SelectorClusterer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Cluster id for each selector, in input order.
    pub fn assign(&self, selectors: &[String]) -> Vec<usize> {
        let mut clusters: Vec<Vec<&str>> = Vec::new();
        let mut ids = Vec::with_capacity(selectors.len());
        for selector in selectors {
            let found = clusters.iter().position(|members| {
                members
                    .iter()
                    .all(|member| similarity(selector, member) > self.threshold)
            });
            match found {
                Some(id) => {
                    clusters[id].push(selector.as_str());
                    ids.push(id);
                }
                None => {
                    clusters.push(vec![selector.as_str()]);
                    ids.push(clusters.len() - 1);
                }
            }
        }
        ids
    }
}

impl Clusterer for SelectorClusterer {
    fn cluster(&self, groups: CandidateGroups) -> Clusters {
        let selectors: Vec<String> = groups.keys().map(ToString::to_string).collect();
        let ids = self.assign(&selectors);

        let mut clusters = Clusters::new();
        for ((_, nodes), id) in groups.into_iter().zip(ids) {
            clusters.entry(id).or_default().extend(nodes);
        }
        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(parent: &NodePath, n: usize) -> DecoratedNode {
        DecoratedNode::new("li", parent.clone(), parent.clone(), n, 1.0, Vec::new())
    }

    #[test]
    fn test_assign_merges_positional_variants() {
        let clusterer = SelectorClusterer::default();
        let ids = clusterer.assign(&[
            "html>body:nth-child(2)>div.main:nth-child(1)>ul.news:nth-child(1)".to_string(),
            "html>body:nth-child(2)>div.main:nth-child(1)>ul.news:nth-child(2)".to_string(),
            "html>body:nth-child(2)>nav:nth-child(3)".to_string(),
        ]);
        assert_eq!(ids, vec![0, 0, 1]);
    }

    #[test]
    fn test_cluster_keeps_every_node_once() {
        let a = NodePath::from_segments(["html", "body:nth-child(2)", "ul.news:nth-child(1)"]);
        let b = NodePath::from_segments(["html", "body:nth-child(2)", "ul.news:nth-child(2)"]);
        let c = NodePath::from_segments([
            "html",
            "body:nth-child(2)",
            "div#sidebar.links:nth-child(3)",
            "table.prices:nth-child(1)",
        ]);

        let mut groups = CandidateGroups::new();
        groups.insert(a.clone(), (0..5).map(|i| node(&a, i)).collect());
        groups.insert(b.clone(), (0..6).map(|i| node(&b, i)).collect());
        groups.insert(c.clone(), (0..7).map(|i| node(&c, i)).collect());

        let clusters = SelectorClusterer::default().cluster(groups);
        let sizes: Vec<usize> = clusters.values().map(Vec::len).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 18);
        assert_eq!(clusters.len(), 2);
        // the sidebar selector sorts first, so its group opens cluster 0
        assert_eq!(sizes, vec![7, 11]);
    }

    #[test]
    fn test_empty_groups() {
        assert!(SelectorClusterer::default()
            .cluster(CandidateGroups::new())
            .is_empty());
    }
}
