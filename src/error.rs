use std::error;
use std::fmt;

/// Prefix on every error raised because a configured proxy cannot be used.
pub(crate) const UNUSABLE_PROXY: &str = "Unable to use a proxy: ";

/// Errors from envproxy.
///
/// None of the messages ever carry proxy credentials. Messages name the
/// environment variable a bad value came from, never the value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The proxy string could not be parsed, or it contains control
    /// characters (`\r`, `\n`, `\t`).
    Syntax(String),

    /// The proxy string parsed, but is not usable as a proxy.
    ///
    /// Missing host, missing or invalid port, or a scheme other than
    /// `http`, `https` or `socks5`. Errors deferred from reading the
    /// environment are also reported with this variant, prefixed with
    /// `Unable to use a proxy: `.
    Config(String),

    /// A resolved proxy cannot be honored by the requested transport.
    ///
    /// For example a `socks5` proxy on the stream transport, or an `https`
    /// request through an `https` proxy.
    Transport(String),

    /// A status format string without a single `%s` placeholder.
    StatusFormat(String),

    /// The request url could not be understood.
    BadUri(String),
}

impl Error {
    /// Wraps an error from reading the environment so it reads as a failure to
    /// use the proxy, keeping the original cause in the message.
    pub(crate) fn unusable(cause: &Error) -> Error {
        Error::Config(format!("{}{}", UNUSABLE_PROXY, cause.message()))
    }

    /// The bare message, without the kind.
    pub fn message(&self) -> &str {
        match self {
            Error::Syntax(m)
            | Error::Config(m)
            | Error::Transport(m)
            | Error::StatusFormat(m)
            | Error::BadUri(m) => m,
        }
    }

    /// Tells if this error means a configured proxy could not be used.
    ///
    /// Useful for hinting users towards their `http_proxy`/`https_proxy`
    /// settings.
    pub fn is_unusable_proxy(&self) -> bool {
        self.message().starts_with(UNUSABLE_PROXY)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax(v) => write!(f, "syntax: {}", v),
            Error::Config(v) => write!(f, "config: {}", v),
            Error::Transport(v) => write!(f, "transport: {}", v),
            Error::StatusFormat(v) => write!(f, "status format: {}", v),
            Error::BadUri(v) => write!(f, "bad uri: {}", v),
        }
    }
}

impl error::Error for Error {}
