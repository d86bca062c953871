//! Option set for a curl-style transport.

use std::fmt;
use std::path::PathBuf;

/// SSL settings of the caller, used for proxies reached over TLS.
///
/// Only pass these when the curl backend supports the proxy CA options
/// (libcurl 7.52.0 and later). Otherwise use `SslOptions::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SslOptions {
    /// CA bundle file.
    pub cafile: Option<PathBuf>,
    /// Directory of CA certificates.
    pub capath: Option<PathBuf>,
}

/// Proxy authentication method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CurlAuth {
    /// HTTP Basic.
    Basic,
}

impl CurlAuth {
    /// The libcurl bitmask value (`CURLAUTH_BASIC`).
    pub fn code(&self) -> i64 {
        match self {
            CurlAuth::Basic => 1,
        }
    }
}

/// The curl options this crate sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CurlOpt {
    /// `CURLOPT_PROXY`
    Proxy,
    /// `CURLOPT_NOPROXY`
    NoProxy,
    /// `CURLOPT_PROXYAUTH`
    ProxyAuth,
    /// `CURLOPT_PROXYUSERPWD`
    ProxyUserPwd,
    /// `CURLOPT_PROXY_CAINFO`
    ProxyCaInfo,
    /// `CURLOPT_PROXY_CAPATH`
    ProxyCaPath,
}

impl CurlOpt {
    /// The libcurl option id.
    pub fn code(&self) -> u32 {
        match self {
            CurlOpt::Proxy => 10004,
            CurlOpt::NoProxy => 10177,
            CurlOpt::ProxyAuth => 111,
            CurlOpt::ProxyUserPwd => 10006,
            CurlOpt::ProxyCaInfo => 10246,
            CurlOpt::ProxyCaPath => 10247,
        }
    }
}

/// Value of a curl option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurlValue {
    /// String options (`CURLOPTTYPE_STRINGPOINT`).
    Str(String),
    /// Long options (`CURLOPTTYPE_LONG`).
    Long(i64),
}

/// Proxy related curl options for one request.
///
/// An empty `proxy` is deliberate: it stops curl from picking up a proxy on
/// its own from the environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CurlOptions {
    /// `CURLOPT_PROXY`
    pub proxy: String,
    /// `CURLOPT_NOPROXY`, set to `""` when a proxy applies.
    pub no_proxy: Option<String>,
    /// `CURLOPT_PROXYAUTH`
    pub proxy_auth: Option<CurlAuth>,
    /// `CURLOPT_PROXYUSERPWD`, percent-encoded `user:password`.
    pub proxy_userpwd: Option<String>,
    /// `CURLOPT_PROXY_CAINFO`
    pub proxy_cainfo: Option<PathBuf>,
    /// `CURLOPT_PROXY_CAPATH`
    pub proxy_capath: Option<PathBuf>,
}

impl CurlOptions {
    /// The options as `(option, value)` pairs, ready for `curl_easy_setopt`.
    ///
    /// Unset options are left out.
    pub fn to_pairs(&self) -> Vec<(CurlOpt, CurlValue)> {
        let mut pairs = vec![(CurlOpt::Proxy, CurlValue::Str(self.proxy.clone()))];

        if let Some(v) = &self.no_proxy {
            pairs.push((CurlOpt::NoProxy, CurlValue::Str(v.clone())));
        }
        if let Some(v) = self.proxy_auth {
            pairs.push((CurlOpt::ProxyAuth, CurlValue::Long(v.code())));
        }
        if let Some(v) = &self.proxy_userpwd {
            pairs.push((CurlOpt::ProxyUserPwd, CurlValue::Str(v.clone())));
        }
        if let Some(v) = &self.proxy_cainfo {
            let v = v.to_string_lossy().into_owned();
            pairs.push((CurlOpt::ProxyCaInfo, CurlValue::Str(v)));
        }
        if let Some(v) = &self.proxy_capath {
            let v = v.to_string_lossy().into_owned();
            pairs.push((CurlOpt::ProxyCaPath, CurlValue::Str(v)));
        }

        pairs
    }
}

impl fmt::Debug for CurlOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurlOptions")
            .field("proxy", &self.proxy)
            .field("no_proxy", &self.no_proxy)
            .field("proxy_auth", &self.proxy_auth)
            .field("proxy_userpwd", &self.proxy_userpwd.as_ref().map(|_| "***"))
            .field("proxy_cainfo", &self.proxy_cainfo)
            .field("proxy_capath", &self.proxy_capath)
            .finish()
    }
}
