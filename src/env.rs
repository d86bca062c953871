//! Environment variables read for proxy configuration.

use std::collections::HashMap;

/// Proxy for `http` requests.
pub const HTTP_PROXY: &str = "http_proxy";
/// Proxy for `https` requests.
pub const HTTPS_PROXY: &str = "https_proxy";
/// Fallback for [`HTTP_PROXY`] in CGI environments.
///
/// CGI exposes a request header `Proxy:` as `HTTP_PROXY`, so a client could
/// set it. This name can't be set from a request.
pub const CGI_HTTP_PROXY: &str = "cgi_http_proxy";
/// The exclusion list.
pub const NO_PROXY: &str = "no_proxy";

/// A source of environment variables.
///
/// [`SystemEnv`] reads the process environment. A `HashMap` or a closure
/// stands in for it in tests or embedded use.
pub trait EnvSource {
    /// The value of `name`, if set.
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Looks up `name` in lower case, then upper case.
///
/// Empty values count as unset. Returns the value with the name it was
/// found under.
pub(crate) fn lookup(env: &impl EnvSource, name: &str) -> Option<(String, String)> {
    [name.to_ascii_lowercase(), name.to_ascii_uppercase()]
        .into_iter()
        .find_map(|n| env.var(&n).filter(|v| !v.is_empty()).map(|v| (v, n)))
}

/// Like [`lookup()`], and for `http_proxy` falls back to `cgi_http_proxy`.
pub(crate) fn lookup_proxy(env: &impl EnvSource, name: &str) -> Option<(String, String)> {
    let found = lookup(env, name);

    if found.is_none() && name == HTTP_PROXY {
        let cgi = lookup(env, CGI_HTTP_PROXY);
        if let Some((_, n)) = &cgi {
            trace!("Using {} as {} is not set", n, name);
        }
        return cgi;
    }

    found
}
