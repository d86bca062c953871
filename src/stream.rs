//! Option set for a stream/socket transport.

use std::fmt;

use crate::util::DebugHeaderLines;

/// Options for a stream transport, grouped per wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamOptions {
    /// The `http` wrapper options.
    pub http: HttpOptions,
}

/// Options of the `http` stream wrapper.
///
/// Fields left as `None` are not sent to the transport, which then uses its
/// own default.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HttpOptions {
    /// Request method.
    pub method: Option<String>,
    /// Request header lines, in the order they are sent.
    pub header: Vec<String>,
    /// Proxy as `tcp://host:port` or `ssl://host:port`.
    pub proxy: Option<String>,
    /// Send the absolute request uri. Proxies need this.
    pub request_fulluri: Option<bool>,
    /// Maximum number of redirects to follow.
    pub max_redirects: Option<u32>,
    /// Whether to follow `Location` redirects.
    pub follow_location: Option<bool>,
}

impl HttpOptions {
    /// Whether a header with this name is present, ignoring case.
    pub fn has_header(&self, name: &str) -> bool {
        self.header.iter().any(|line| {
            line.split_once(':')
                .map(|(n, _)| n.trim().eq_ignore_ascii_case(name))
                .unwrap_or(false)
        })
    }
}

impl fmt::Debug for HttpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpOptions")
            .field("method", &self.method)
            .field("header", &DebugHeaderLines(&self.header))
            .field("proxy", &self.proxy)
            .field("request_fulluri", &self.request_fulluri)
            .field("max_redirects", &self.max_redirects)
            .field("follow_location", &self.follow_location)
            .finish()
    }
}
