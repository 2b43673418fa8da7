//! Client address derivation from forwarding headers.

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Derive the client IP for the audit trail.
///
/// Order: first entry of `X-Forwarded-For`, then `X-Real-IP`, then the raw
/// peer address. Returns "unknown" when nothing is available (e.g. in-process
/// test requests without connect info).
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return first.to_string();
        }
    }

    if let Some(real_ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return real_ip.to_string();
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
