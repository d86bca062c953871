use std::net::IpAddr;

use ipnet::IpNet;

/// Helps us match hostnames to patterns - mainly used for NO_PROXY support.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum HostnameMatcher {
    /// `*` matches every host.
    Any,
    /// Matches the pattern literally, ignoring ASCII case.
    Literal(String),
    /// `.example.com` matches `example.com` and all its subdomains.
    Suffix(String),
    /// Matches an IP address, however the host spells it.
    Address(IpAddr),
    /// Matches any IP address within a CIDR block.
    Network(IpNet),
}

impl HostnameMatcher {
    /// Parse a pattern without port. Brackets around IPv6 are already gone.
    pub fn parse(pattern: &str) -> Self {
        if pattern == "*" {
            return Self::Any;
        }
        if let Ok(net) = pattern.parse::<IpNet>() {
            return Self::Network(net);
        }
        if let Ok(addr) = pattern.parse::<IpAddr>() {
            return Self::Address(addr);
        }
        if let Some(domain) = pattern.strip_prefix('.') {
            return Self::Suffix(domain.to_ascii_lowercase());
        }
        Self::Literal(pattern.to_ascii_lowercase())
    }

    /// `hostname` as it appears in a uri, IPv6 possibly in brackets.
    pub fn matches(&self, hostname: &str) -> bool {
        let hostname = hostname
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(hostname);

        match self {
            Self::Any => true,
            Self::Literal(lit) => lit.eq_ignore_ascii_case(hostname),
            Self::Suffix(domain) => {
                let hostname = hostname.to_ascii_lowercase();
                hostname == *domain
                    || hostname
                        .strip_suffix(domain.as_str())
                        .map(|rest| rest.ends_with('.'))
                        .unwrap_or(false)
            }
            Self::Address(addr) => hostname.parse::<IpAddr>().ok() == Some(*addr),
            Self::Network(net) => hostname
                .parse::<IpAddr>()
                .map(|ip| net.contains(&ip))
                .unwrap_or(false),
        }
    }
}
