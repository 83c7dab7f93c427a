//! Client identity used as the session key.

use axum::http::{header, HeaderMap};
use std::net::SocketAddr;

pub const UNKNOWN_IP: &str = "unknown_ip";
pub const UNKNOWN_UA: &str = "unknown_ua";

/// `{ip}|{user-agent}`: first `x-forwarded-for` hop, else the peer address.
pub fn fingerprint(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_IP.to_string());

    let ua = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_UA);

    format!("{}|{}", ip, ua)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_wins_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        let peer: SocketAddr = "127.0.0.1:5555".parse().unwrap();
        assert_eq!(fingerprint(&headers, Some(peer)), "203.0.113.7|Mozilla/5.0");
    }

    #[test]
    fn test_peer_address_fallback() {
        let peer: SocketAddr = "192.0.2.1:40000".parse().unwrap();
        assert_eq!(
            fingerprint(&HeaderMap::new(), Some(peer)),
            "192.0.2.1|unknown_ua"
        );
    }

    #[test]
    fn test_unknown_everything() {
        assert_eq!(fingerprint(&HeaderMap::new(), None), "unknown_ip|unknown_ua");
    }
}
