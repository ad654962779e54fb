// ABOUTME: The Client struct that fetches index pages and runs list extraction on them.
// ABOUTME: Provides async extract() for URLs and extract_html() for markup already in hand.

use std::net::ToSocketAddrs;

use tracing::{info, instrument};
use url::Url;

use crate::error::ExtractError;
use crate::extractors::list::ListExtractor;
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, is_private_ip, FetchOptions};
use crate::result::ListPage;

/// Lowercased host of `url`, empty when it has none.
fn domain_of(url: &Url) -> String {
    url.host_str().map(|h| h.to_lowercase()).unwrap_or_default()
}

/// The list extraction client.
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
    extractor: ListExtractor,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            let allow_private = opts.allow_private_networks;
            let redirect_policy = reqwest::redirect::Policy::custom(move |attempt| {
                if attempt.previous().len() > 10 {
                    return attempt.error("too many redirects");
                }
                if allow_private {
                    return attempt.follow();
                }
                let next = attempt.url().clone();
                let Some(host) = next.host_str() else {
                    return attempt.follow();
                };
                let bare = host.trim_start_matches('[').trim_end_matches(']');
                if let Ok(ip) = bare.parse::<std::net::IpAddr>() {
                    if is_private_ip(&ip) {
                        return attempt.error("redirect to private IP blocked");
                    }
                    return attempt.follow();
                }
                // the policy callback is sync, so resolve with the blocking resolver
                let port = next.port_or_known_default().unwrap_or(80);
                match (host, port).to_socket_addrs() {
                    Ok(mut addrs) => {
                        if addrs.any(|sa| is_private_ip(&sa.ip())) {
                            attempt.error("redirect to private IP blocked")
                        } else {
                            attempt.follow()
                        }
                    }
                    Err(_) => attempt.error("DNS lookup failed during redirect"),
                }
            });

            reqwest::Client::builder()
                .redirect(redirect_policy)
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        let extractor = ListExtractor::new(opts.list);

        Self {
            opts,
            http_client,
            extractor,
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Fetch `url` and extract its list.
    ///
    /// Items are reported against the final URL after redirects.
    #[instrument(skip(self))]
    pub async fn extract(&self, url: &str) -> Result<ListPage, ExtractError> {
        if url.is_empty() {
            return Err(ExtractError::invalid_url(url, "Extract", None));
        }
        if Url::parse(url).is_err() {
            return Err(ExtractError::invalid_url(
                url,
                "Extract",
                Some(anyhow::anyhow!("malformed URL")),
            ));
        }

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
            allow_private_networks: self.opts.allow_private_networks,
            parse_non_200: false,
        };
        let fetched = fetch(&self.http_client, url, &fetch_opts).await?;
        info!(
            final_url = %fetched.final_url,
            status = fetched.status,
            bytes = fetched.body.len(),
            "fetched index page"
        );

        let html = fetched.text();
        self.extract_html(&html, &fetched.final_url)
    }

    /// Extract the list from `html`, using `url` as the page's address.
    pub fn extract_html(&self, html: &str, url: &str) -> Result<ListPage, ExtractError> {
        if html.is_empty() {
            return Err(ExtractError::invalid_url(
                url,
                "ExtractHTML",
                Some(anyhow::anyhow!("empty HTML")),
            ));
        }
        if url.is_empty() {
            return Err(ExtractError::invalid_url(url, "ExtractHTML", None));
        }
        let parsed_url = Url::parse(url).map_err(|_| {
            ExtractError::invalid_url(url, "ExtractHTML", Some(anyhow::anyhow!("malformed URL")))
        })?;

        let items = self.extractor.extract(html).map_err(|e| e.with_url(url))?;
        Ok(ListPage {
            url: url.to_string(),
            domain: domain_of(&parsed_url),
            items,
        })
    }
}
