//! Upstream URL checks
//!
//! The completion API key is sent to whatever base URL is configured, so the
//! URL is vetted before the server starts.

use std::net::IpAddr;
use thiserror::Error;
use url::Url;

/// Reasons an upstream base URL is refused
#[derive(Debug, Error)]
pub enum SecurityError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("URL scheme '{0}' is not allowed, only HTTPS is permitted")]
    InvalidScheme(String),

    #[error("Host '{0}' is blocked: internal/private addresses are not allowed")]
    BlockedHost(String),

    #[error("URL must have a host")]
    MissingHost,
}

/// Hostnames that never receive the API key
const BLOCKED_HOSTNAMES: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "ip6-localhost",
    "ip6-loopback",
    "metadata.google.internal",
    "metadata.goog",
];

/// Validate the completion API base URL.
///
/// With `allow_insecure` unset the URL must be HTTPS to a public host. Setting
/// it admits plain HTTP, loopback and private ranges for local development.
/// Cloud metadata endpoints are refused either way.
pub fn validate_upstream_url(url_str: &str, allow_insecure: bool) -> Result<Url, SecurityError> {
    let url = Url::parse(url_str)?;

    match url.scheme() {
        "https" => {}
        "http" if allow_insecure => {}
        scheme => return Err(SecurityError::InvalidScheme(scheme.to_string())),
    }

    let host = url.host_str().ok_or(SecurityError::MissingHost)?;
    let host_lower = host.trim_start_matches('[').trim_end_matches(']').to_lowercase();

    let is_metadata = host_lower.starts_with("metadata.");
    let blocked_name = BLOCKED_HOSTNAMES
        .iter()
        .any(|blocked| host_lower == *blocked || host_lower.ends_with(&format!(".{}", blocked)));
    if blocked_name && (is_metadata || !allow_insecure) {
        return Err(SecurityError::BlockedHost(host.to_string()));
    }

    if let Ok(ip) = host_lower.parse::<IpAddr>() {
        if is_link_local(&ip) {
            return Err(SecurityError::BlockedHost(host.to_string()));
        }
        if !allow_insecure && (ip.is_loopback() || is_private_ip(&ip)) {
            return Err(SecurityError::BlockedHost(host.to_string()));
        }
    }

    Ok(url)
}

/// RFC 1918, carrier-grade NAT, 0.0.0.0/8 and IPv6 unique-local ranges
fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let octets = v4.octets();
            v4.is_private() || (octets[0] == 100 && (octets[1] & 0xC0) == 64) || octets[0] == 0
        }
        IpAddr::V6(v6) => (v6.segments()[0] & 0xfe00) == 0xfc00,
    }
}

/// 169.254.0.0/16 and fe80::/10; covers the cloud metadata address
fn is_link_local(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            let octets = v4.octets();
            octets[0] == 169 && octets[1] == 254
        }
        IpAddr::V6(v6) => (v6.segments()[0] & 0xffc0) == 0xfe80,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_openrouter_url_accepted() {
        assert!(validate_upstream_url("https://openrouter.ai/api/v1", false).is_ok());
    }

    #[test]
    fn test_http_needs_insecure() {
        let result = validate_upstream_url("http://openrouter.ai/api/v1", false);
        assert!(matches!(result, Err(SecurityError::InvalidScheme(_))));
        assert!(validate_upstream_url("http://openrouter.ai/api/v1", true).is_ok());
    }

    #[test]
    fn test_other_schemes_refused() {
        let result = validate_upstream_url("ftp://openrouter.ai/api/v1", true);
        assert!(matches!(result, Err(SecurityError::InvalidScheme(_))));
    }

    #[test]
    fn test_garbage_refused() {
        let result = validate_upstream_url("not a url", true);
        assert!(matches!(result, Err(SecurityError::InvalidUrl(_))));
    }

    #[test]
    fn test_loopback_and_private_need_insecure() {
        for url in [
            "https://localhost:8080/v1",
            "https://127.0.0.1:8080/v1",
            "https://10.0.0.5/v1",
            "https://192.168.1.1/v1",
            "https://[::1]:9000/v1",
        ] {
            assert!(
                matches!(validate_upstream_url(url, false), Err(SecurityError::BlockedHost(_))),
                "{url} should be blocked"
            );
            assert!(validate_upstream_url(url, true).is_ok(), "{url} should pass when insecure");
        }
    }

    #[test]
    fn test_metadata_always_refused() {
        for url in [
            "http://169.254.169.254/latest/meta-data/",
            "http://metadata.google.internal/computeMetadata/v1",
        ] {
            assert!(validate_upstream_url(url, true).is_err(), "{url} should be blocked");
        }
    }
}
