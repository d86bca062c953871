#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![deny(missing_docs)]
//! Proxy settings from the environment, for HTTP clients.
//!
//! envproxy reads `http_proxy`, `https_proxy` and `no_proxy` (and their upper
//! case and CGI variants), decides which proxy applies to a request, and turns
//! that decision into options for two kinds of transport:
//!
//! * a curl-style transport, through [`CurlOptions`]
//! * a stream/socket transport, through [`StreamOptions`]
//!
//! It does no I/O itself.
//!
//! ## Usage
//!
//! ```no_run
//! use envproxy::{ProxyManager, SslOptions, StreamOptions};
//!
//! let proxy = ProxyManager::instance().proxy_for_request("https://example.com/file")?;
//!
//! // Safe to log, credentials are redacted.
//! println!("proxy: {}", proxy.status());
//!
//! // For a curl transport.
//! let curl = proxy.curl_options(&SslOptions::default());
//!
//! // Or for a stream transport.
//! let stream = proxy.add_context_options(StreamOptions::default())?;
//! # Ok::<_, envproxy::Error>(())
//! ```
//!
//! ## Environment
//!
//! | Variable                                 | Used for                        |
//! |------------------------------------------|---------------------------------|
//! | `http_proxy`, `HTTP_PROXY`               | `http` requests                 |
//! | `cgi_http_proxy`, `CGI_HTTP_PROXY`       | `http` requests, if none above  |
//! | `https_proxy`, `HTTPS_PROXY`             | `https` requests                |
//! | `no_proxy`, `NO_PROXY`                   | hosts to reach without proxy    |
//!
//! Lower case names win over upper case. `https` requests never fall back to
//! the `http` proxy or the other way around. See [`NoProxy`] for the
//! exclusion list format.
//!
//! The process-wide [`ProxyManager::instance()`] reads the environment once.
//! Use [`ProxyManager::reset()`] to read it again, or
//! [`ProxyManager::with_env()`] for a manager over any [`EnvSource`].
//!
//! ## Errors
//!
//! A bad proxy variable doesn't fail anything until a request of that scheme
//! asks for a proxy. It then fails with an [`Error::Config`] starting with
//! `Unable to use a proxy: `.

#[macro_use]
extern crate log;

pub use curl::{CurlAuth, CurlOpt, CurlOptions, CurlValue, SslOptions};
pub use env::{EnvSource, SystemEnv};
pub use error::Error;
pub use manager::ProxyManager;
pub use no_proxy::NoProxy;
pub use options::OptionsBuilder;
pub use proxy::{Proto, ProxyItem};
pub use request_proxy::RequestProxy;
pub use stream::{HttpOptions, StreamOptions};

pub mod curl;
pub mod env;
mod error;
mod hostname_matcher;
mod manager;
mod no_proxy;
mod options;
mod proxy;
mod request_proxy;
pub mod stream;
mod util;
