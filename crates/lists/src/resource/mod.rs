// ABOUTME: Fetches index pages over HTTP for list extraction.
// ABOUTME: Guards against private-network targets, caps body size and decodes charsets.

use std::collections::HashMap;
use std::net::IpAddr;

use bytes::Bytes;
use ipnet::{Ipv4Net, Ipv6Net};
use once_cell::sync::Lazy;
use tracing::debug;
use url::Url;

use crate::error::ExtractError;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

static PRIVATE_V4: Lazy<Vec<Ipv4Net>> = Lazy::new(|| {
    [
        "10.0.0.0/8",
        "172.16.0.0/12",
        "192.168.0.0/16",
        "127.0.0.0/8",
        "169.254.0.0/16",
    ]
    .iter()
    .filter_map(|net| net.parse().ok())
    .collect()
});

static PRIVATE_V6: Lazy<Vec<Ipv6Net>> = Lazy::new(|| {
    ["fc00::/7", "fe80::/10"]
        .iter()
        .filter_map(|net| net.parse().ok())
        .collect()
});

/// Options for fetching a page.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
    pub allow_private_networks: bool,
    pub parse_non_200: bool,
}

/// Result of a successful fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as text, using the charset of the content-type header when known.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Private, loopback and link-local ranges.
pub fn is_private_ip(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(ip) => PRIVATE_V4.iter().any(|net| net.contains(ip)),
        IpAddr::V6(ip) => ip.is_loopback() || PRIVATE_V6.iter().any(|net| net.contains(ip)),
    }
}

/// Decode body bytes using the declared charset, falling back to detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let declared = content_type
        .and_then(extract_charset)
        .and_then(|charset| encoding_rs::Encoding::for_label(charset.as_bytes()));
    let encoding = declared.unwrap_or_else(|| {
        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(body, true);
        detector.guess(None, true)
    });
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract the charset value from a Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    content_type.to_lowercase().split(';').find_map(|part| {
        part.trim()
            .strip_prefix("charset=")
            .map(|charset| charset.trim_matches('"').trim_matches('\'').to_string())
    })
}

/// Reject `target` when it names or resolves to a private address.
async fn ensure_public(target: &Url, url: &str, reason: &str) -> Result<(), ExtractError> {
    let Some(host) = target.host_str() else {
        return Ok(());
    };
    let blocked = || ExtractError::ssrf(url, "Fetch", Some(anyhow::anyhow!("{}", reason)));

    // bracketed IPv6 hosts come back with their brackets
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if let Ok(ip) = bare.parse::<IpAddr>() {
        return if is_private_ip(&ip) {
            Err(blocked())
        } else {
            Ok(())
        };
    }

    let port = target.port_or_known_default().unwrap_or(80);
    let addrs = tokio::net::lookup_host((host, port)).await.map_err(|e| {
        ExtractError::fetch(url, "Fetch", Some(anyhow::anyhow!("DNS lookup failed: {}", e)))
    })?;
    for socket_addr in addrs {
        if is_private_ip(&socket_addr.ip()) {
            return Err(blocked());
        }
    }
    Ok(())
}

/// Fetch a page from the given URL.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, ExtractError> {
    if url.is_empty() {
        return Err(ExtractError::invalid_url(url, "Fetch", None));
    }

    let parsed_url = Url::parse(url).map_err(|e| {
        ExtractError::invalid_url(url, "Fetch", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
        return Err(ExtractError::invalid_url(
            url,
            "Fetch",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    if !opts.allow_private_networks {
        ensure_public(&parsed_url, url, "private IP addresses are not allowed").await?;
    }

    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            ExtractError::timeout(url, "Fetch", Some(anyhow::anyhow!("request timed out: {}", e)))
        } else {
            ExtractError::fetch(url, "Fetch", Some(anyhow::anyhow!("request failed: {}", e)))
        }
    })?;

    // redirects may have moved us somewhere private
    if !opts.allow_private_networks {
        ensure_public(
            response.url(),
            url,
            "redirect to private IP address is not allowed",
        )
        .await?;
    }

    if let Some(len) = response.content_length() {
        if len as usize > MAX_CONTENT_LENGTH {
            return Err(ExtractError::fetch(
                url,
                "Fetch",
                Some(anyhow::anyhow!("content too large")),
            ));
        }
    }

    let status = response.status().as_u16();
    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = response.bytes().await.map_err(|e| {
        ExtractError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("failed to read body: {}", e)),
        )
    })?;

    if body.len() > MAX_CONTENT_LENGTH {
        return Err(ExtractError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("content too large")),
        ));
    }

    if status != 200 && !opts.parse_non_200 {
        return Err(ExtractError::fetch(
            url,
            "Fetch",
            Some(anyhow::anyhow!("HTTP status {}", status)),
        ));
    }

    debug!(url, final_url = %final_url, status, bytes = body.len(), "fetched page");
    Ok(FetchResult {
        status,
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;

    fn create_test_client() -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent("test-agent")
            .build()
            .unwrap()
    }

    fn local_opts() -> FetchOptions {
        FetchOptions {
            allow_private_networks: true,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_ok_utf8() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/news");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<ul><li>héllo</li></ul>");
        });

        let result = fetch(&create_test_client(), &server.url("/news"), &local_opts())
            .await
            .expect("fetch should succeed");
        mock.assert();

        assert_eq!(result.status, 200);
        assert_eq!(result.text(), "<ul><li>héllo</li></ul>");
        assert_eq!(
            result.content_type.as_deref(),
            Some("text/html; charset=utf-8")
        );
    }

    #[tokio::test]
    async fn test_fetch_non_200_rejected() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("not found");
        });

        let err = fetch(&create_test_client(), &server.url("/missing"), &local_opts())
            .await
            .expect_err("should fail on 404");
        mock.assert();
        assert!(err.is_fetch());
    }

    #[tokio::test]
    async fn test_fetch_non_200_allowed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("not found");
        });

        let opts = FetchOptions {
            parse_non_200: true,
            ..local_opts()
        };
        let result = fetch(&create_test_client(), &server.url("/missing"), &opts)
            .await
            .expect("fetch should succeed with parse_non_200");
        assert_eq!(result.status, 404);
    }

    #[tokio::test]
    async fn test_fetch_sends_custom_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/h").header("x-token", "abc");
            then.status(200).body("ok");
        });

        let mut opts = local_opts();
        opts.headers.insert("x-token".to_string(), "abc".to_string());
        fetch(&create_test_client(), &server.url("/h"), &opts)
            .await
            .expect("fetch should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn test_private_ip_block() {
        let server = MockServer::start();
        let url = format!("http://127.0.0.1:{}/news", server.port());

        let err = fetch(&create_test_client(), &url, &FetchOptions::default())
            .await
            .expect_err("should fail on private IP");
        assert!(err.is_ssrf());
    }

    #[tokio::test]
    async fn test_rejects_bad_urls() {
        let client = create_test_client();
        let opts = FetchOptions::default();

        assert!(fetch(&client, "", &opts).await.unwrap_err().is_invalid_url());
        assert!(fetch(&client, "not a url", &opts)
            .await
            .unwrap_err()
            .is_invalid_url());
        assert!(fetch(&client, "ftp://example.com/", &opts)
            .await
            .unwrap_err()
            .is_invalid_url());
    }

    #[test]
    fn test_is_private_ip() {
        assert!(is_private_ip(&"10.1.2.3".parse().unwrap()));
        assert!(is_private_ip(&"172.31.255.255".parse().unwrap()));
        assert!(is_private_ip(&"192.168.0.1".parse().unwrap()));
        assert!(is_private_ip(&"127.0.0.1".parse().unwrap()));
        assert!(is_private_ip(&"169.254.0.1".parse().unwrap()));
        assert!(is_private_ip(&"::1".parse().unwrap()));
        assert!(is_private_ip(&"fd00::1".parse().unwrap()));
        assert!(is_private_ip(&"fe80::1".parse().unwrap()));

        assert!(!is_private_ip(&"8.8.8.8".parse().unwrap()));
        assert!(!is_private_ip(&"172.32.0.1".parse().unwrap()));
        assert!(!is_private_ip(&"2001:4860:4860::8888".parse().unwrap()));
    }

    #[test]
    fn test_extract_charset() {
        assert_eq!(
            extract_charset("text/html; charset=GBK"),
            Some("gbk".to_string())
        );
        assert_eq!(
            extract_charset("text/html; charset=\"utf-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(extract_charset("text/html"), None);
    }

    #[test]
    fn test_decode_declared_charset() {
        // "新闻" in GBK
        let gbk: &[u8] = &[0xd0, 0xc2, 0xce, 0xc5];
        assert_eq!(decode_body(gbk, Some("text/html; charset=gbk")), "新闻");
    }

    #[test]
    fn test_decode_detects_latin1() {
        let latin1: &[u8] = &[0x63, 0x61, 0x66, 0xe9];
        assert_eq!(decode_body(latin1, None), "café");
    }
}
