// ABOUTME: ListExtractor runs filter, clustering, scoring and title extraction over one page.
// ABOUTME: Also provides the `extract_list` convenience that maps "no list" outcomes to an empty Vec.

use scraper::Html;
use tracing::debug;

use crate::cluster::{Clusterer, Clusters, SelectorClusterer};
use crate::dom::element::{decorate, DecoratedNode};
use crate::dom::preprocess::preprocess_for_list;
use crate::error::ExtractError;
use crate::extractors::candidates::{group_candidates, prune_ancestors};
use crate::extractors::scoring::choose_best_cluster;
use crate::extractors::title::extract_from_cluster;
use crate::options::ListOptions;
use crate::result::ListItem;

/// Detects the repeated item list of an index page.
///
/// Holds only immutable configuration, so one instance can serve any number
/// of pages, from any number of threads.
#[derive(Debug, Clone)]
pub struct ListExtractor<C = SelectorClusterer> {
    opts: ListOptions,
    clusterer: C,
}

impl ListExtractor {
    pub fn new(opts: ListOptions) -> Self {
        Self {
            opts,
            clusterer: SelectorClusterer::default(),
        }
    }
}

impl Default for ListExtractor {
    fn default() -> Self {
        Self::new(ListOptions::default())
    }
}

impl<C: Clusterer> ListExtractor<C> {
    /// Use a custom clustering strategy.
    pub fn with_clusterer(opts: ListOptions, clusterer: C) -> Self {
        Self { opts, clusterer }
    }

    pub fn options(&self) -> &ListOptions {
        &self.opts
    }

    /// Filter, prune and cluster decorated nodes.
    pub fn build_clusters(&self, nodes: Vec<DecoratedNode>) -> Result<Clusters, ExtractError> {
        let total = nodes.len();
        let groups = prune_ancestors(group_candidates(nodes, &self.opts));
        debug!(nodes = total, groups = groups.len(), "candidate groups");
        if groups.is_empty() {
            return Err(ExtractError::no_candidate_nodes("BuildClusters"));
        }
        Ok(self.clusterer.cluster(groups))
    }

    /// Run the pipeline on already decorated nodes.
    pub fn process_nodes(
        &self,
        nodes: Vec<DecoratedNode>,
    ) -> Result<Vec<ListItem>, ExtractError> {
        let clusters = self.build_clusters(nodes)?;
        let (score, best) = choose_best_cluster(&clusters)?;
        debug!(
            cluster_id = score.cluster_id,
            elements = score.number_of_elements,
            "best cluster"
        );
        extract_from_cluster(best, self.opts.avg_length())
    }

    /// Run the pipeline on a document that already went through preprocessing.
    pub fn process(&self, doc: &Html) -> Result<Vec<ListItem>, ExtractError> {
        self.process_nodes(decorate(doc))
    }

    /// Preprocess raw markup, parse it and run the pipeline.
    pub fn extract(&self, html: &str) -> Result<Vec<ListItem>, ExtractError> {
        let cleaned = preprocess_for_list(html);
        let doc = Html::parse_document(&cleaned);
        self.process(&doc)
    }
}

/// Extract the list of an index page with default thresholds.
///
/// Pages without a detectable list yield an empty Vec.
pub fn extract_list(html: &str) -> Vec<ListItem> {
    match ListExtractor::default().extract(html) {
        Ok(items) => items,
        Err(err) => {
            debug!(error = %err, "no list extracted");
            Vec::new()
        }
    }
}
