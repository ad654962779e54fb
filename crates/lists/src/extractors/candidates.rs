// ABOUTME: Candidate filter: keeps nodes that can head a list item and groups them by parent selector.
// ABOUTME: Also prunes groups whose parent is an ancestor of another kept group's parent.

use crate::cluster::CandidateGroups;
use crate::dom::element::DecoratedNode;
use crate::dom::selector::NodePath;
use crate::options::ListOptions;

/// Whether a node can be one item of a list under `opts`.
pub fn is_candidate(node: &DecoratedNode, opts: &ListOptions) -> bool {
    // not enough siblings to form a list
    if node.number_of_siblings + 1 < opts.min_number {
        return false;
    }
    // every anchor group is already longer than a title can be
    if node.a_descendants_group_text_min_length > opts.max_length as f64 {
        return false;
    }
    // every anchor group is already shorter than a title can be
    if node.a_descendants_group_text_max_length < opts.min_length as f64 {
        return false;
    }
    node.similarity_with_siblings >= opts.similarity_threshold
}

/// Keep qualifying nodes, grouped by parent selector in document order.
pub fn group_candidates<I>(nodes: I, opts: &ListOptions) -> CandidateGroups
where
    I: IntoIterator<Item = DecoratedNode>,
{
    let mut groups = CandidateGroups::new();
    for node in nodes.into_iter().filter(|n| is_candidate(n, opts)) {
        groups
            .entry(node.parent_selector.clone())
            .or_default()
            .push(node);
    }
    groups
}

/// Drop every group whose selector is an ancestor of another kept selector.
///
/// Selectors are walked in reverse sorted order carrying the previously seen
/// one, which is always a descendant when any descendant exists.
pub fn prune_ancestors(mut groups: CandidateGroups) -> CandidateGroups {
    let selectors: Vec<NodePath> = groups.keys().cloned().collect();
    let mut last: Option<&NodePath> = None;
    let mut dropped = Vec::new();
    for selector in selectors.iter().rev() {
        if let Some(last) = last {
            if !selector.is_empty() && selector.is_ancestor_of(last) {
                dropped.push(selector);
            }
        }
        last = Some(selector);
    }
    for selector in dropped {
        groups.remove(selector);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::element::AnchorDescendant;
    use pretty_assertions::assert_eq;

    fn path(segments: &[&str]) -> NodePath {
        NodePath::from_segments(segments.iter().copied())
    }

    fn item(parent: &NodePath, siblings: usize, similarity: f64, title: &str) -> DecoratedNode {
        DecoratedNode::new(
            "li",
            NodePath::default(),
            parent.clone(),
            siblings,
            similarity,
            vec![AnchorDescendant::new(title, Some("/x"), "a")],
        )
    }

    #[test]
    fn test_rejects_too_few_siblings() {
        let opts = ListOptions::default();
        let parent = path(&["html", "ul"]);
        assert!(!is_candidate(&item(&parent, 3, 1.0, "A fine headline"), &opts));
        assert!(is_candidate(&item(&parent, 4, 1.0, "A fine headline"), &opts));
    }

    #[test]
    fn test_rejects_out_of_range_lengths() {
        let opts = ListOptions::default();
        let parent = path(&["html", "ul"]);
        assert!(!is_candidate(&item(&parent, 9, 1.0, "Home"), &opts));
        let long = "x".repeat(36);
        assert!(!is_candidate(&item(&parent, 9, 1.0, &long), &opts));
        assert!(is_candidate(&item(&parent, 9, 1.0, &"x".repeat(35)), &opts));
        assert!(is_candidate(&item(&parent, 9, 1.0, &"x".repeat(8)), &opts));
    }

    #[test]
    fn test_rejects_nodes_without_anchors() {
        let opts = ListOptions::default();
        let node = DecoratedNode::new("li", NodePath::default(), path(&["ul"]), 9, 1.0, vec![]);
        assert!(!is_candidate(&node, &opts));
    }

    #[test]
    fn test_rejects_dissimilar_siblings() {
        let opts = ListOptions::default();
        let parent = path(&["html", "ul"]);
        assert!(!is_candidate(&item(&parent, 9, 0.79, "A fine headline"), &opts));
        assert!(is_candidate(&item(&parent, 9, 0.8, "A fine headline"), &opts));
    }

    #[test]
    fn test_groups_never_hold_small_lists() {
        let opts = ListOptions::default();
        let parent = path(&["html", "ul"]);
        let nodes: Vec<DecoratedNode> = (0..12)
            .map(|n| item(&parent, n, 1.0, "A fine headline"))
            .collect();
        let groups = group_candidates(nodes, &opts);
        for nodes in groups.values() {
            assert!(nodes.iter().all(|n| n.number_of_siblings + 1 >= opts.min_number));
        }
        assert_eq!(groups[&parent].len(), 8);
    }

    #[test]
    fn test_prune_drops_ancestors() {
        let outer = path(&["html", "body", "div"]);
        let inner = path(&["html", "body", "div", "ul"]);
        let deeper = path(&["html", "body", "div", "ul", "li", "ol"]);
        let other = path(&["html", "body", "table"]);

        let mut groups = CandidateGroups::new();
        for p in [&outer, &inner, &deeper, &other] {
            groups.insert(p.clone(), vec![item(p, 5, 1.0, "A fine headline")]);
        }

        let pruned = prune_ancestors(groups);
        let kept: Vec<&NodePath> = pruned.keys().collect();
        assert_eq!(kept, vec![&deeper, &other]);

        for a in pruned.keys() {
            for b in pruned.keys() {
                assert!(!a.is_ancestor_of(b));
            }
        }
    }

    #[test]
    fn test_prune_keeps_textual_lookalikes() {
        let div = path(&["html", "body", "div"]);
        let divider = path(&["html", "body", "divider"]);
        assert!(divider.to_string().starts_with(&div.to_string()));

        let mut groups = CandidateGroups::new();
        groups.insert(div.clone(), vec![item(&div, 5, 1.0, "A fine headline")]);
        groups.insert(divider.clone(), vec![item(&divider, 5, 1.0, "A fine headline")]);

        let kept: Vec<NodePath> = prune_ancestors(groups).into_keys().collect();
        assert_eq!(kept, vec![div, divider]);
    }
}
