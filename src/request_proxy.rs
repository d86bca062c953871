use std::fmt;

use crate::curl::{CurlAuth, CurlOptions, SslOptions};
use crate::error::UNUSABLE_PROXY;
use crate::proxy::Proto;
use crate::stream::StreamOptions;
use crate::Error;

const EXCLUDED_STATUS: &str = "excluded by no_proxy";

/// The proxy decision for one request.
///
/// Either a proxy applies, no proxy is configured for the request scheme, or
/// the request host is excluded by `no_proxy`. In the last two cases the
/// transport options still switch off any proxy the backend would otherwise
/// pick up on its own.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestProxy {
    mode: Mode,
}

#[derive(Clone, PartialEq, Eq)]
enum Mode {
    None,
    Excluded,
    Active(Box<Active>),
}

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Active {
    pub proto: Proto,
    pub request_scheme: String,
    pub url: String,
    pub curl_auth: Option<String>,
    pub context_url: String,
    pub header_auth: Option<String>,
    pub safe_url: String,
}

impl RequestProxy {
    pub(crate) fn active(active: Active) -> Self {
        RequestProxy {
            mode: Mode::Active(Box::new(active)),
        }
    }

    /// No proxy is configured for the request.
    pub fn none() -> Self {
        RequestProxy { mode: Mode::None }
    }

    /// A proxy is configured, but `no_proxy` excludes the request host.
    pub fn excluded_by_no_proxy() -> Self {
        RequestProxy {
            mode: Mode::Excluded,
        }
    }

    /// Tells if the request host matched a `no_proxy` entry.
    pub fn is_excluded_by_no_proxy(&self) -> bool {
        matches!(self.mode, Mode::Excluded)
    }

    /// Tells if a proxy applies to the request.
    pub fn is_active(&self) -> bool {
        matches!(self.mode, Mode::Active(_))
    }

    /// Tells if the proxy itself is reached over TLS.
    ///
    /// This is about the proxy url scheme, not the request scheme.
    pub fn is_secure(&self) -> bool {
        match &self.mode {
            Mode::Active(a) => a.proto == Proto::HTTPS,
            _ => false,
        }
    }

    /// Status for logs and progress output. Never contains credentials.
    ///
    /// * `""` when no proxy is configured
    /// * `"excluded by no_proxy"` when excluded
    /// * the proxy url, with `***@` in place of credentials, otherwise
    pub fn status(&self) -> &str {
        match &self.mode {
            Mode::None => "",
            Mode::Excluded => EXCLUDED_STATUS,
            Mode::Active(a) => &a.safe_url,
        }
    }

    /// Like [`status()`](Self::status), with the proxy url substituted into
    /// `format` at its `%s` placeholder.
    ///
    /// ```
    /// use envproxy::ProxyItem;
    ///
    /// let proxy = ProxyItem::new("http://proxy.com", "http_proxy")?
    ///     .to_request_proxy("http");
    ///
    /// assert_eq!(proxy.status_fmt("using proxy (%s)")?, "using proxy (http://proxy.com:80)");
    /// # Ok::<_, envproxy::Error>(())
    /// ```
    ///
    /// An empty `format` is the same as no format. Any other format must hold
    /// exactly one `%s`, or this fails with [`Error::StatusFormat`].
    pub fn status_fmt(&self, format: &str) -> Result<String, Error> {
        if format.is_empty() {
            return Ok(self.status().to_string());
        }

        if format.matches("%s").count() != 1 {
            return Err(Error::StatusFormat(
                "format must contain a single %s placeholder".into(),
            ));
        }

        Ok(match &self.mode {
            Mode::Active(a) => format.replacen("%s", &a.safe_url, 1),
            _ => self.status().to_string(),
        })
    }

    /// Proxy options for a curl-style transport.
    ///
    /// `ssl` is forwarded as the proxy CA settings when the proxy is reached
    /// over TLS. Pass `SslOptions::default()` if the curl backend can't do
    /// that.
    pub fn curl_options(&self, ssl: &SslOptions) -> CurlOptions {
        let Mode::Active(a) = &self.mode else {
            // An explicit empty proxy overrides whatever curl finds in the
            // environment.
            return CurlOptions::default();
        };

        let mut opts = CurlOptions {
            proxy: a.url.clone(),
            // no_proxy is already decided, curl must not do it again.
            no_proxy: Some(String::new()),
            ..Default::default()
        };

        if let Some(auth) = &a.curl_auth {
            opts.proxy_auth = Some(CurlAuth::Basic);
            opts.proxy_userpwd = Some(auth.clone());
        }

        if a.proto == Proto::HTTPS {
            opts.proxy_cainfo = ssl.cafile.clone();
            opts.proxy_capath = ssl.capath.clone();
        }

        opts
    }

    /// Adds the proxy to the options of a stream transport.
    ///
    /// Sets `http.proxy` and `http.request_fulluri`, and appends a
    /// `Proxy-Authorization` header after the existing ones when the proxy url
    /// has credentials. Options are returned unchanged when no proxy applies.
    ///
    /// Fails with [`Error::Transport`] for a `socks5` proxy, or for an `https`
    /// request through an `https` proxy. The stream transport can do neither.
    pub fn add_context_options(
        &self,
        mut options: StreamOptions,
    ) -> Result<StreamOptions, Error> {
        let Mode::Active(a) = &self.mode else {
            return Ok(options);
        };

        if a.proto == Proto::SOCKS5 {
            return Err(Error::Transport(format!(
                "{}the socks5 protocol requires the curl transport ({})",
                UNUSABLE_PROXY, a.safe_url
            )));
        }

        if a.proto == Proto::HTTPS && a.request_scheme.eq_ignore_ascii_case("https") {
            return Err(Error::Transport(format!(
                "{}https requests through an https proxy require the curl transport ({})",
                UNUSABLE_PROXY, a.safe_url
            )));
        }

        options.http.proxy = Some(a.context_url.clone());
        options.http.request_fulluri = Some(true);

        if let Some(auth) = &a.header_auth {
            options
                .http
                .header
                .push(format!("Proxy-Authorization: Basic {}", auth));
        }

        Ok(options)
    }
}

impl fmt::Debug for RequestProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.mode {
            Mode::None => write!(f, "RequestProxy::None"),
            Mode::Excluded => write!(f, "RequestProxy::Excluded"),
            Mode::Active(a) => f
                .debug_struct("RequestProxy")
                .field("proto", &a.proto)
                .field("request_scheme", &a.request_scheme)
                .field("url", &a.safe_url)
                .finish(),
        }
    }
}
