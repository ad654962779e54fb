// ABOUTME: String and element similarity used for sibling comparison and selector clustering.
// ABOUTME: Normalized Levenshtein ratio over chars plus a structural element signature.

use scraper::ElementRef;

use super::selector::alias;

/// Edit distance between two strings, counted in chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Similarity in [0, 1]; 0 when either side is empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let longest = a.chars().count().max(b.chars().count());
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Structural signature of an element: alias plus ordered direct child tags,
/// e.g. `li.item[div,a]`.
pub fn signature(element: &ElementRef) -> String {
    let children: Vec<String> = element
        .children()
        .filter_map(ElementRef::wrap)
        .map(|child| child.value().name().to_lowercase())
        .collect();
    format!("{}[{}]", alias(element), children.join(","))
}
