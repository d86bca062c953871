use std::borrow::Cow;
use std::fmt;

use http::uri::Authority;
use http::Uri;
use percent_encoding::percent_decode_str;

use crate::Error;

pub(crate) trait AuthorityExt {
    fn userinfo(&self) -> Option<&str>;
    fn username(&self) -> Option<&str>;
    fn password(&self) -> Option<&str>;
    fn host_str(&self) -> &str;
    fn port_str(&self) -> Option<&str>;
}

// NB: Treating &str with direct indexes is OK, since Uri parsed the Authority,
// and ensured it's all ASCII (or %-encoded).
impl AuthorityExt for Authority {
    fn userinfo(&self) -> Option<&str> {
        let s = self.as_str();
        s.rfind('@').map(|i| &s[..i])
    }

    // Userinfo splits on the first ':', anything after belongs to the password.
    fn username(&self) -> Option<&str> {
        self.userinfo()
            .map(|a| a.split_once(':').map(|(u, _)| u).unwrap_or(a))
    }

    fn password(&self) -> Option<&str> {
        self.userinfo()
            .and_then(|a| a.split_once(':').map(|(_, p)| p))
    }

    fn host_str(&self) -> &str {
        let hp = host_port(self.as_str());
        if hp.starts_with('[') {
            return hp.find(']').map(|i| &hp[..=i]).unwrap_or(hp);
        }
        hp.split(':').next().unwrap_or(hp)
    }

    fn port_str(&self) -> Option<&str> {
        let hp = host_port(self.as_str());
        let after_host = if hp.starts_with('[') {
            &hp[hp.find(']')? + 1..]
        } else {
            &hp[hp.find(':')?..]
        };
        after_host.strip_prefix(':')
    }
}

fn host_port(authority: &str) -> &str {
    authority.rsplit('@').next().unwrap_or(authority)
}

pub(crate) trait SchemeExt {
    fn default_port(&self) -> Option<u16>;
}

impl SchemeExt for str {
    fn default_port(&self) -> Option<u16> {
        if self.eq_ignore_ascii_case("https") {
            Some(443)
        } else if self.eq_ignore_ascii_case("http") {
            Some(80)
        } else {
            None
        }
    }
}

pub(crate) trait UriExt {
    fn ensure_full_url(&self) -> Result<(), Error>;
}

impl UriExt for Uri {
    fn ensure_full_url(&self) -> Result<(), Error> {
        self.scheme()
            .ok_or_else(|| Error::BadUri(format!("{} is missing scheme", self)))?;

        let authority = self
            .authority()
            .ok_or_else(|| Error::BadUri(format!("{} is missing host/port", self)))?;

        if authority.host_str().is_empty() {
            return Err(Error::BadUri(format!("{} is missing host", self)));
        }

        Ok(())
    }
}

/// Raw bytes of a percent-encoded userinfo part.
pub(crate) fn percent_decode(s: &str) -> Cow<'_, [u8]> {
    percent_decode_str(s).into()
}

/// Wrapper to only log non-sensitive header lines.
pub(crate) struct DebugHeaderLines<'a>(pub &'a [String]);

const SENSITIVE_HEADERS: &[&str] = &["authorization", "proxy-authorization", "cookie"];

impl<'a> fmt::Debug for DebugHeaderLines<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_list();
        for line in self.0 {
            let name = line.split(':').next().unwrap_or_default().trim();
            if SENSITIVE_HEADERS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(name))
            {
                debug.entry(&format_args!("{}: <REDACTED>", name));
            } else {
                debug.entry(line);
            }
        }
        debug.finish()
    }
}
