// ABOUTME: Error types for list extraction including the ErrorCode enum and ExtractError struct.
// ABOUTME: Separates "page has no list" outcomes from fetch and URL failures.

use std::fmt;

/// Error codes representing the different ways an extraction can end without a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Fetch,
    Timeout,
    Ssrf,
    /// No node passed the sibling-count, length and similarity filter.
    NoCandidateNodes,
    /// Candidate groups existed but no cluster was produced to score.
    NoClusters,
    /// The chosen cluster carried no anchor descendants.
    NoTitlePath,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidUrl => "invalid URL",
            ErrorCode::Fetch => "fetch error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Ssrf => "SSRF blocked",
            ErrorCode::NoCandidateNodes => "no list candidates",
            ErrorCode::NoClusters => "no list clusters",
            ErrorCode::NoTitlePath => "no title path",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lists: {}", self.op)?;
        if !self.url.is_empty() {
            write!(f, " {}", self.url)?;
        }
        write!(f, ": {}", self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl ExtractError {
    fn new(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Fetch error.
    pub fn fetch(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Fetch, url, op, source)
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Timeout, url, op, source)
    }

    /// Create an SSRF error.
    pub fn ssrf(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Ssrf, url, op, source)
    }

    /// Create a NoCandidateNodes error. The core has no URL context, callers attach it.
    pub fn no_candidate_nodes(op: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoCandidateNodes, String::new(), op, None)
    }

    /// Create a NoClusters error.
    pub fn no_clusters(op: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoClusters, String::new(), op, None)
    }

    /// Create a NoTitlePath error.
    pub fn no_title_path(op: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoTitlePath, String::new(), op, None)
    }

    /// Attach the page URL to an error raised without one.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        if self.url.is_empty() {
            self.url = url.into();
        }
        self
    }

    /// Returns true when the page was processed but holds no extractable list.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.code,
            ErrorCode::NoCandidateNodes | ErrorCode::NoClusters | ErrorCode::NoTitlePath
        )
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is an SSRF error.
    pub fn is_ssrf(&self) -> bool {
        self.code == ErrorCode::Ssrf
    }

    /// Returns true if this is a Fetch error.
    pub fn is_fetch(&self) -> bool {
        self.code == ErrorCode::Fetch
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }
}
