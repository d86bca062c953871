use std::sync::{Arc, Mutex, PoisonError};

use http::Uri;
use once_cell::sync::Lazy;

use crate::env::{self, EnvSource, SystemEnv};
use crate::no_proxy::NoProxy;
use crate::proxy::ProxyItem;
use crate::request_proxy::RequestProxy;
use crate::util::{AuthorityExt, SchemeExt, UriExt};
use crate::Error;

static INSTANCE: Lazy<Mutex<Option<Arc<ProxyManager>>>> = Lazy::new(|| Mutex::new(None));

/// Decides which proxy, if any, applies to a request.
///
/// A `ProxyManager` is a snapshot of the proxy environment variables:
/// `http_proxy`, `https_proxy` (falling back to `cgi_http_proxy` for http)
/// and `no_proxy`. Lower case names win over upper case ones. There is no
/// fallback between the http and https proxies.
///
/// A bad proxy value does not fail the snapshot. The error is kept and
/// returned from [`proxy_for_request()`](Self::proxy_for_request) for
/// requests of that scheme.
///
/// ```
/// use std::collections::HashMap;
/// use envproxy::ProxyManager;
///
/// let mut env = HashMap::new();
/// env.insert("https_proxy".to_string(), "http://proxy.com:3128".to_string());
/// env.insert("no_proxy".to_string(), "localhost".to_string());
///
/// let manager = ProxyManager::with_env(&env);
///
/// let proxy = manager.proxy_for_request("https://repo.org/packages.json")?;
/// assert_eq!(proxy.status(), "http://proxy.com:3128");
///
/// let proxy = manager.proxy_for_request("https://localhost/")?;
/// assert!(proxy.is_excluded_by_no_proxy());
/// # Ok::<_, envproxy::Error>(())
/// ```
#[derive(Debug)]
pub struct ProxyManager {
    http: Result<Option<ProxyItem>, Error>,
    https: Result<Option<ProxyItem>, Error>,
    no_proxy: NoProxy,
}

impl ProxyManager {
    /// The process-wide manager, snapshotting the environment on first use.
    ///
    /// Later changes to the environment are not seen until [`reset()`](Self::reset).
    pub fn instance() -> Arc<ProxyManager> {
        let mut lock = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
        lock.get_or_insert_with(|| Arc::new(ProxyManager::from_env()))
            .clone()
    }

    /// Drops the process-wide snapshot, so the next [`instance()`](Self::instance)
    /// reads the environment again.
    ///
    /// Meant for tests and reconfiguration. Managers already handed out keep
    /// their snapshot.
    pub fn reset() {
        let mut lock = INSTANCE.lock().unwrap_or_else(PoisonError::into_inner);
        if lock.take().is_some() {
            debug!("Proxy environment snapshot reset");
        }
    }

    /// Snapshot of the process environment.
    pub fn from_env() -> Self {
        Self::with_env(&SystemEnv)
    }

    /// Snapshot of the given environment.
    pub fn with_env(source: &impl EnvSource) -> Self {
        let http = read_proxy(source, env::HTTP_PROXY);
        let https = read_proxy(source, env::HTTPS_PROXY);

        let no_proxy = env::lookup(source, env::NO_PROXY)
            .map(|(v, _)| NoProxy::parse(&v))
            .unwrap_or_default();

        ProxyManager {
            http,
            https,
            no_proxy,
        }
    }

    /// The proxy decision for a request to `url`.
    ///
    /// Only `http` and `https` requests can be proxied, other schemes get
    /// [`RequestProxy::none()`]. Fails with [`Error::BadUri`] if `url` has no
    /// scheme or host or an invalid port, and with [`Error::Config`] if the
    /// proxy variable for the request scheme holds a bad value.
    pub fn proxy_for_request(&self, url: &str) -> Result<RequestProxy, Error> {
        let uri: Uri = url
            .parse()
            .map_err(|e| Error::BadUri(format!("{}: {}", url, e)))?;
        uri.ensure_full_url()?;

        // unwraps are ok because ensure_full_url() checks them.
        let scheme = uri.scheme_str().unwrap().to_ascii_lowercase();
        let authority = uri.authority().unwrap();

        let host = authority.host_str();
        let port = match authority.port_str().filter(|p| !p.is_empty()) {
            Some(p) => p
                .parse::<u16>()
                .map_err(|_| Error::BadUri(format!("{}: invalid port", url)))?,
            None => scheme.default_port().unwrap_or_default(),
        };

        let item = match scheme.as_str() {
            "http" => &self.http,
            "https" => &self.https,
            _ => return Ok(RequestProxy::none()),
        };

        let item = match item {
            Ok(Some(item)) => item,
            Ok(None) => return Ok(RequestProxy::none()),
            Err(e) => return Err(Error::unusable(e)),
        };

        if self.no_proxy.matches(host, port) {
            trace!("{}:{} excluded by no_proxy", host, port);
            return Ok(RequestProxy::excluded_by_no_proxy());
        }

        Ok(item.to_request_proxy(&scheme))
    }

    /// The `no_proxy` list of this snapshot.
    pub fn no_proxy(&self) -> &NoProxy {
        &self.no_proxy
    }
}

fn read_proxy(source: &impl EnvSource, name: &str) -> Result<Option<ProxyItem>, Error> {
    let Some((value, found_as)) = env::lookup_proxy(source, name) else {
        return Ok(None);
    };

    match ProxyItem::new(&value, &found_as) {
        Ok(item) => {
            debug!("Proxy from {}: {}", found_as, item.safe_url());
            Ok(Some(item))
        }
        Err(e) => {
            debug!("Proxy from {} is unusable: {}", found_as, e);
            Err(e)
        }
    }
}
