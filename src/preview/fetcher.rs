//! Link preview fetcher.
//!
//! Fetches a page with a single bounded GET and hands the body to the
//! metadata extractor. No retries and no caching.

use std::net::IpAddr;
use std::time::Duration;

use reqwest::redirect::{Attempt, Policy};
use reqwest::Client;

use super::extractor::extract;
use super::types::LinkPreview;
use crate::config::PreviewConfig;
use crate::error::{Error, Result};

/// Fetches remote pages and extracts their preview metadata.
#[derive(Debug, Clone)]
pub struct LinkPreviewer {
    client: Client,
    max_body_bytes: u64,
    block_private_hosts: bool,
}

impl LinkPreviewer {
    /// Create a previewer with the given settings.
    pub fn new(config: &PreviewConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(redirect_policy(config.max_redirects, config.block_private_hosts))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
            block_private_hosts: config.block_private_hosts,
        })
    }

    /// Fetch `url` and extract its preview.
    ///
    /// Non-2xx responses are still parsed; many error pages carry usable
    /// metadata.
    pub async fn preview(&self, url: &str) -> Result<LinkPreview> {
        let url = self.validate(url)?;
        self.fetch(url).await
    }

    /// Fetch an already validated URL.
    async fn fetch(&self, url: url::Url) -> Result<LinkPreview> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Network(format!("failed to fetch {}: {}", url, error_chain(&e))))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Link preview target returned non-success status");
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_body_bytes {
                return Err(Error::Read(format!(
                    "page too large: {} bytes (max {} bytes)",
                    content_length, self.max_body_bytes
                )));
            }
        }

        // Content-Length may be absent or wrong; enforce the cap while reading
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::Read(format!("failed to read response: {}", e)))?
        {
            if (body.len() + chunk.len()) as u64 > self.max_body_bytes {
                return Err(Error::Read(format!(
                    "page too large: more than {} bytes",
                    self.max_body_bytes
                )));
            }
            body.extend_from_slice(&chunk);
        }

        let html = String::from_utf8_lossy(&body);
        let preview = extract(&html);

        tracing::debug!(url = %url, title = %preview.title, "Link preview extracted");
        Ok(preview)
    }

    /// Check that `url` is a fetchable http(s) URL.
    fn validate(&self, url: &str) -> Result<url::Url> {
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::InvalidInput("url is required".to_string()));
        }

        let parsed =
            url::Url::parse(url).map_err(|e| Error::InvalidInput(format!("invalid URL: {}", e)))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::InvalidInput(format!(
                    "unsupported URL scheme: {}",
                    scheme
                )));
            }
        }

        let host = parsed
            .host()
            .ok_or_else(|| Error::InvalidInput("URL has no host".to_string()))?;

        if self.block_private_hosts && is_forbidden_host(&host) {
            return Err(Error::InvalidInput(format!("forbidden host: {}", host)));
        }

        Ok(parsed)
    }
}

/// Redirect policy applying the hop limit and, when enabled, the host check
/// to every redirect target.
fn redirect_policy(max_redirects: usize, block_private_hosts: bool) -> Policy {
    Policy::custom(move |attempt: Attempt| {
        if attempt.previous().len() > max_redirects {
            return attempt.error(format!("too many redirects (max {})", max_redirects));
        }

        if block_private_hosts {
            let forbidden = match attempt.url().host() {
                Some(host) => is_forbidden_host(&host),
                None => true,
            };
            if forbidden {
                let message = format!("redirect to forbidden host: {}", attempt.url());
                return attempt.error(message);
            }
        }

        attempt.follow()
    })
}

/// Format an error with its sources, e.g. a redirect refusal behind a
/// reqwest error.
fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Check if a URL host is on the local network.
fn is_forbidden_host(host: &url::Host<&str>) -> bool {
    match host {
        url::Host::Domain(domain) => is_forbidden_hostname(domain),
        url::Host::Ipv4(ip) => is_private_ip(&IpAddr::V4(*ip)),
        url::Host::Ipv6(ip) => is_private_ip(&IpAddr::V6(*ip)),
    }
}

/// Check if a hostname points at the local network.
fn is_forbidden_hostname(host: &str) -> bool {
    // `localhost.` is the fully qualified form of `localhost`
    let host = host.trim_end_matches('.').to_lowercase();
    if host == "localhost" {
        return true;
    }

    [".local", ".localhost", ".internal", ".lan", ".home"]
        .iter()
        .any(|suffix| host.ends_with(suffix))
}

/// Check if an IP address is loopback, private or otherwise non-routable.
fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            ipv4.is_loopback()
                || ipv4.is_private()
                || ipv4.is_link_local()
                || ipv4.is_broadcast()
                || ipv4.is_unspecified()
                // 100.64.0.0/10 carrier-grade NAT
                || (octets[0] == 100 && (64..=127).contains(&octets[1]))
        }
        IpAddr::V6(ipv6) => {
            let segments = ipv6.segments();
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                // fc00::/7 unique local
                || (segments[0] & 0xfe00) == 0xfc00
                // fe80::/10 link-local
                || (segments[0] & 0xffc0) == 0xfe80
                || ipv6.to_ipv4_mapped().is_some_and(|v4| is_private_ip(&IpAddr::V4(v4)))
        }
    }
}
