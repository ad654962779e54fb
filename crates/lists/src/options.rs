// ABOUTME: Configuration for list extraction: ListOptions thresholds, client Options and ClientBuilder.
// ABOUTME: ClientBuilder provides a fluent API for constructing Client instances with custom settings.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::client::Client;

/// Minimum number of sibling items (self included) a list must have.
pub const LIST_MIN_NUMBER: usize = 5;
/// Shortest acceptable average title length.
pub const LIST_MIN_LENGTH: usize = 8;
/// Longest acceptable average title length.
pub const LIST_MAX_LENGTH: usize = 35;
/// Minimum mean similarity between an item and its siblings.
pub const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Thresholds driving candidate filtering and the title length model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListOptions {
    pub min_number: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub similarity_threshold: f64,
}

impl ListOptions {
    /// Center of the title length distribution.
    pub fn avg_length(&self) -> f64 {
        (self.min_length + self.max_length) as f64 / 2.0
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            min_number: LIST_MIN_NUMBER,
            min_length: LIST_MIN_LENGTH,
            max_length: LIST_MAX_LENGTH,
            similarity_threshold: SIMILARITY_THRESHOLD,
        }
    }
}

/// The serialization used when rendering a ListPage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Text => "text",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => OutputFormat::Markdown,
            "text" | "txt" => OutputFormat::Text,
            _ => OutputFormat::Json,
        }
    }
}

/// Configuration options for the list client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub allow_private_networks: bool,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
    pub list: ListOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "DigestsLists/1.0".to_string(),
            allow_private_networks: false,
            http_client: None,
            headers: HashMap::new(),
            list: ListOptions::default(),
        }
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Allow or disallow requests to private networks.
    pub fn allow_private_networks(mut self, allow: bool) -> Self {
        self.opts.allow_private_networks = allow;
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Replace all extraction thresholds at once.
    pub fn list_options(mut self, list: ListOptions) -> Self {
        self.opts.list = list;
        self
    }

    pub fn min_number(mut self, min_number: usize) -> Self {
        self.opts.list.min_number = min_number;
        self
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.opts.list.min_length = min_length;
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.opts.list.max_length = max_length;
        self
    }

    pub fn similarity_threshold(mut self, threshold: f64) -> Self {
        self.opts.list.similarity_threshold = threshold;
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Client {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
