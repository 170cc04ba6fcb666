//! Remote host and app token

use std::fmt;

/// Environment variable holding the Socrata app token.
pub const APP_TOKEN_ENV: &str = "SODAPY_APPTOKEN";

/// Where requests go and with what authorization.
///
/// The token is opaque: it is never parsed or validated, only forwarded.
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    token: Option<String>,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, token: Option<String>) -> Self {
        Self {
            host: host.into(),
            token,
        }
    }

    /// Endpoint without an app token. The remote throttles such requests.
    pub fn anonymous(host: impl Into<String>) -> Self {
        Self::new(host, None)
    }

    /// Reads the token from `SODAPY_APPTOKEN`. Unset or empty means no token.
    pub fn from_env(host: impl Into<String>) -> Self {
        let token = std::env::var(APP_TOKEN_ENV).ok().filter(|t| !t.is_empty());
        Self::new(host, token)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("host", &self.host)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
