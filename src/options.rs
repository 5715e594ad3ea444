//! Per-request execution options.
//!
//! [`RequestOptions`] carries the configuration the transport applies when
//! it opens a connection: the connect timeout and an optional HTTP proxy.
//! Unlike the request itself, options need no validation, so they are a
//! plain config struct with public fields and a `Default`.

use std::fmt;
use std::time::Duration;

/// Connect timeout applied when none is configured explicitly.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Execution options recognized by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Connect timeout for the network exchange.
    pub timeout: Duration,
    /// Optional HTTP proxy the connection is routed through.
    pub proxy: Option<ProxySettings>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
        }
    }
}

impl RequestOptions {
    /// Options with the default timeout and no proxy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Route the connection through `proxy`.
    #[must_use]
    pub fn proxy(mut self, proxy: ProxySettings) -> Self {
        self.proxy = Some(proxy);
        self
    }
}

/// An HTTP proxy endpoint (host and port).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    /// Proxy host name or address.
    pub host: String,
    /// Proxy port.
    pub port: u16,
}

impl ProxySettings {
    /// Proxy settings for `host:port`.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
