//! Connectivity probes and URL helpers.
//!
//! Socket timeouts are scoped to the socket created for each call; nothing
//! here mutates process-wide defaults.

use crate::error::NetworkError;
use std::net::{IpAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::time::Duration;
use url::Url;

/// URL components, all transient strings. `params` carries the `;`-suffix of
/// the last path segment when present (rarely used, kept for completeness).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    pub authority: String,
    pub path: String,
    pub params: String,
    pub query: String,
    pub fragment: String,
}

/// Probe reachability with a single TCP connect attempt. Defaults of
/// 8.8.8.8:53 make this an internet check; any socket error means false.
pub fn check_internet_connection(host: &str, port: u16, timeout: Duration) -> bool {
    connect_probe(host, port, timeout).is_ok()
}

/// True when a TCP connection to `host:port` succeeds within the timeout.
pub fn is_port_open(host: &str, port: u16, timeout: Duration) -> bool {
    connect_probe(host, port, timeout).is_ok()
}

fn connect_probe(host: &str, port: u16, timeout: Duration) -> std::io::Result<TcpStream> {
    let mut addrs = (host, port).to_socket_addrs()?;
    let addr = addrs.next().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "no address resolved")
    })?;
    TcpStream::connect_timeout(&addr, timeout)
}

/// Discover the local IP address the routing table would use to reach the
/// internet. Connecting a UDP socket does not send a packet; it only binds
/// the local endpoint, which is then read back. None on any failure.
pub fn get_ip_address() -> Option<IpAddr> {
    let socket = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
    socket.connect(("8.8.8.8", 80)).ok()?;
    Some(socket.local_addr().ok()?.ip())
}

/// A URL is valid when both its scheme and its authority are non-empty.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => !parsed.scheme().is_empty() && parsed.has_host(),
        Err(_) => false,
    }
}

/// Split a URL into its components.
pub fn parse_url(url: &str) -> Result<ParsedUrl, NetworkError> {
    let parsed = Url::parse(url).map_err(|source| NetworkError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let full_path = parsed.path().to_string();
    // Path parameters: everything after the first ';' of the last segment.
    let last_segment = full_path.rfind('/').map_or(0, |i| i + 1);
    let (path, params) = match full_path[last_segment..].find(';') {
        Some(offset) => {
            let split = last_segment + offset;
            (
                full_path[..split].to_string(),
                full_path[split + 1..].to_string(),
            )
        }
        None => (full_path, String::new()),
    };

    Ok(ParsedUrl {
        scheme: parsed.scheme().to_string(),
        authority: parsed.authority().to_string(),
        path,
        params,
        query: parsed.query().unwrap_or("").to_string(),
        fragment: parsed.fragment().unwrap_or("").to_string(),
    })
}

/// Append percent-encoded query parameters to a base URL. A base that
/// already carries a `?` gets `&` as the separator; empty parameter lists
/// leave the base untouched.
pub fn build_url(base: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return base.to_string();
    }
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}

/// Extract the authority (netloc) from a URL, or None when it does not parse.
pub fn get_domain_from_url(url: &str) -> Option<String> {
    Url::parse(url).ok().map(|u| u.authority().to_string())
}

/// Percent-encode a string.
pub fn encode_url(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Decode a percent-encoded string. Malformed escapes are left as-is.
pub fn decode_url(value: &str) -> String {
    urlencoding::decode(value)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| value.to_string())
}

/// Hostname of the current machine.
pub fn get_hostname() -> String {
    gethostname::gethostname().to_string_lossy().into_owned()
}
