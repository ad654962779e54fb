// ABOUTME: Cluster scorer: rates each cluster by sibling similarity and size, picks the best one.
// ABOUTME: An empty cluster map is reported as NoClusters instead of falling back to a default.

use tracing::debug;

use crate::cluster::Clusters;
use crate::dom::element::DecoratedNode;
use crate::error::ExtractError;

/// Score summary for one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterScore {
    pub cluster_id: usize,
    pub avg_similarity_with_siblings: f64,
    pub number_of_elements: usize,
    pub score: f64,
}

/// `avg_similarity × log10(number_of_elements + 1)`
pub fn cluster_score(avg_similarity_with_siblings: f64, number_of_elements: usize) -> f64 {
    avg_similarity_with_siblings * ((number_of_elements + 1) as f64).log10()
}

pub fn score_cluster(cluster_id: usize, cluster: &[DecoratedNode]) -> ClusterScore {
    let number_of_elements = cluster.len();
    let avg_similarity_with_siblings = if cluster.is_empty() {
        0.0
    } else {
        cluster
            .iter()
            .map(|node| node.similarity_with_siblings)
            .sum::<f64>()
            / number_of_elements as f64
    };
    ClusterScore {
        cluster_id,
        avg_similarity_with_siblings,
        number_of_elements,
        score: cluster_score(avg_similarity_with_siblings, number_of_elements),
    }
}

/// Pick the cluster with the strictly greatest score; on ties the lowest id wins.
pub fn choose_best_cluster(
    clusters: &Clusters,
) -> Result<(ClusterScore, &[DecoratedNode]), ExtractError> {
    let mut best: Option<(ClusterScore, &[DecoratedNode])> = None;
    for (&cluster_id, cluster) in clusters {
        let score = score_cluster(cluster_id, cluster);
        debug!(
            cluster_id,
            avg_similarity_with_siblings = score.avg_similarity_with_siblings,
            number_of_elements = score.number_of_elements,
            score = score.score,
            "cluster score"
        );
        let better = match &best {
            Some((current, _)) => score.score > current.score,
            None => true,
        };
        if better {
            best = Some((score, cluster.as_slice()));
        }
    }
    best.ok_or_else(|| ExtractError::no_clusters("ChooseBestCluster"))
}
