// ABOUTME: ListItem and ListPage structs holding extracted title/link pairs from an index page.
// ABOUTME: Includes markdown and plain-text formatting helpers.

use serde::{Deserialize, Serialize};

/// One entry of an extracted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub title: String,
    pub url: String,
}

impl ListItem {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// The result of extracting a list from a page.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListPage {
    pub url: String,
    pub domain: String,
    pub items: Vec<ListItem>,
}

impl ListPage {
    /// Format the items as a markdown bullet list.
    pub fn format_markdown(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("- [{}]({})", escape_markdown_label(&item.title), item.url))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the items as tab separated `title\turl` lines.
    pub fn format_text(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{}\t{}", item.title, item.url))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns true if no list items were extracted.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

fn escape_markdown_label(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}
