// ABOUTME: Main library entry point for list extraction from HTML index pages.
// ABOUTME: Re-exports the public API: Client, ListExtractor, ListItem, ListPage, ExtractError and options.

//! Lists - detects the repeated item list of an index page (news front pages,
//! blog archives, search results) and returns its title/link pairs.
//!
//! The core pipeline is synchronous and works on markup you already have:
//!
//! ```
//! use digests_lists::extract_list;
//!
//! let html = "<html><body><p>No list here</p></body></html>";
//! assert!(extract_list(html).is_empty());
//! ```
//!
//! The [`Client`] adds fetching on top:
//!
//! ```no_run
//! use digests_lists::{Client, ExtractError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ExtractError> {
//!     let client = Client::builder().build();
//!     let page = client.extract("https://example.com/news").await?;
//!     println!("{}", page.format_markdown());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod cluster;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod options;
pub mod resource;
pub mod result;

pub use crate::client::Client;
pub use crate::cluster::{Clusterer, SelectorClusterer};
pub use crate::error::{ErrorCode, ExtractError};
pub use crate::extractors::list::{extract_list, ListExtractor};
pub use crate::options::{ClientBuilder, ListOptions, Options, OutputFormat};
pub use crate::result::{ListItem, ListPage};
