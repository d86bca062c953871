use crate::hostname_matcher::HostnameMatcher;

/// The `no_proxy` exclusion list.
///
/// Entries are separated by commas or whitespace. Each entry is a host with an
/// optional `:port`:
///
/// * `*` excludes every request
/// * `repo.org` excludes that host on any port, ignoring case
/// * `repo.org:443` excludes that host only when the request port is 443
/// * `.repo.org` excludes `repo.org` and all its subdomains
/// * `10.0.0.1`, `[::1]`, `10.0.0.0/8` exclude by IP address or block
///
/// An entry without port matches regardless of the request port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoProxy {
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    matcher: HostnameMatcher,
    port: Option<u16>,
}

impl NoProxy {
    /// Parse a `no_proxy` value.
    pub fn parse(list: &str) -> Self {
        let entries = list
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .filter_map(Entry::parse)
            .collect();

        NoProxy { entries }
    }

    /// Tells if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tells if a request to `host` on `port` is excluded.
    pub fn matches(&self, host: &str, port: u16) -> bool {
        self.entries.iter().any(|e| e.matches(host, port))
    }
}

impl Entry {
    fn parse(entry: &str) -> Option<Self> {
        if entry == "*" {
            return Some(Entry {
                matcher: HostnameMatcher::Any,
                port: None,
            });
        }

        let (host, port) = split_port(entry);
        if host.is_empty() {
            return None;
        }

        Some(Entry {
            matcher: HostnameMatcher::parse(host),
            port,
        })
    }

    fn matches(&self, host: &str, port: u16) -> bool {
        self.port.map_or(true, |p| p == port) && self.matcher.matches(host)
    }
}

// Entries like `[::1]:443`, `repo.org:443` or a bare `::1`. Anything that
// doesn't end in a valid port is taken as host only.
fn split_port(entry: &str) -> (&str, Option<u16>) {
    if let Some(rest) = entry.strip_prefix('[') {
        let Some((host, after)) = rest.split_once(']') else {
            return (entry, None);
        };
        return match after.strip_prefix(':').map(str::parse::<u16>) {
            Some(Ok(port)) => (host, Some(port)),
            _ if after.is_empty() => (host, None),
            _ => (entry, None),
        };
    }

    // More than one colon is an unbracketed IPv6 address.
    if entry.matches(':').count() != 1 {
        return (entry, None);
    }

    match entry.rsplit_once(':') {
        Some((host, port)) => match port.parse::<u16>() {
            Ok(port) => (host, Some(port)),
            Err(_) => (entry, None),
        },
        None => (entry, None),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn port_specific_entry() {
        let n = NoProxy::parse("repo.org:443");
        assert!(n.matches("repo.org", 443));
        assert!(!n.matches("repo.org", 80));
    }

    #[test]
    fn entry_without_port_matches_any_port() {
        let n = NoProxy::parse("repo.org");
        assert!(n.matches("repo.org", 80));
        assert!(n.matches("repo.org", 443));
        assert!(n.matches("REPO.org", 8080));
        assert!(!n.matches("other.org", 80));
    }

    #[test]
    fn wildcard_matches_everything() {
        let n = NoProxy::parse("*");
        assert!(n.matches("repo.org", 80));
        assert!(n.matches("[::1]", 443));
    }

    #[test]
    fn wildcard_with_port_checks_port() {
        let n = NoProxy::parse("*:443");
        assert!(n.matches("repo.org", 443));
        assert!(n.matches("[::1]", 443));
        assert!(!n.matches("repo.org", 80));
    }

    #[test]
    fn separators() {
        let n = NoProxy::parse(" a.com,b.com  c.com,\t,d.com:8080 ");
        assert!(n.matches("a.com", 80));
        assert!(n.matches("b.com", 80));
        assert!(n.matches("c.com", 80));
        assert!(n.matches("d.com", 8080));
        assert!(!n.matches("d.com", 80));
        assert_eq!(n.entries.len(), 4);
    }

    #[test]
    fn empty_list() {
        let n = NoProxy::parse("");
        assert!(n.is_empty());
        assert!(!n.matches("repo.org", 80));

        assert!(NoProxy::parse(" , ").is_empty());
    }

    #[test]
    fn ipv6_entries() {
        let n = NoProxy::parse("[::1]:8080");
        assert!(n.matches("[::1]", 8080));
        assert!(!n.matches("[::1]", 80));

        let n = NoProxy::parse("::1");
        assert!(n.matches("[::1]", 80));

        let n = NoProxy::parse("[fd00::]");
        assert!(n.matches("[fd00::]", 443));
    }

    #[test]
    fn network_with_port() {
        let n = NoProxy::parse("10.0.0.0/8:443");
        assert!(n.matches("10.1.2.3", 443));
        assert!(!n.matches("10.1.2.3", 80));
    }

    #[test]
    fn bad_port_is_literal() {
        let n = NoProxy::parse("repo.org:abc");
        assert!(!n.matches("repo.org", 80));
        assert!(n.matches("repo.org:abc", 80));
    }

    #[test]
    fn split_port_forms() {
        assert_eq!(split_port("repo.org:443"), ("repo.org", Some(443)));
        assert_eq!(split_port("repo.org"), ("repo.org", None));
        assert_eq!(split_port("[::1]:80"), ("::1", Some(80)));
        assert_eq!(split_port("[::1]"), ("::1", None));
        assert_eq!(split_port("fe80::1"), ("fe80::1", None));
        assert_eq!(split_port("repo.org:99999"), ("repo.org:99999", None));
    }
}
