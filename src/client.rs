//! Transport adapter: executes a [`Request`] and produces a [`Response`].
//!
//! [`Transport`] is the sole boundary the request/response core depends on.
//! [`Client`] is its default implementation, backed by a blocking HTTP
//! stack: it resolves the final URL through the query engine, opens one
//! connection per execution (directly or through the configured proxy),
//! applies headers, body, and connect timeout, and wraps the result into an
//! immutable [`Response`].

use std::time::Instant;

use tracing::{debug, trace};

use crate::action::Action;
use crate::error::Error;
use crate::query::{self, ParameterMap};
use crate::request::Request;
use crate::response::Response;

/// The transport contract.
///
/// Implementations take a finalized [`Request`], perform exactly one network
/// exchange, and return a [`Response`] -- or a single execution error
/// wrapping the underlying cause. No partial response is ever produced, and
/// a failed attempt is never retried.
pub trait Transport {
    /// Execute `request`, blocking until the full response body is read or
    /// the exchange fails.
    fn execute(&self, request: &Request) -> crate::Result<Response>;
}

/// Default [`Transport`] over a blocking HTTP stack.
///
/// `Client` holds no state: every execution builds its own connection,
/// uses it, and drops it on every exit path, so concurrent calls with
/// independent requests are fully isolated.
#[derive(Debug, Clone, Copy, Default)]
pub struct Client;

impl Client {
    /// A new transport.
    pub fn new() -> Self {
        Self
    }

    /// Execute `request`. Inherent twin of [`Transport::execute`] so
    /// callers don't need the trait in scope.
    pub fn execute(&self, request: &Request) -> crate::Result<Response> {
        let url = resolve_target(request);
        debug!(action = %request.action(), url = %url, "executing request");

        let mut builder =
            reqwest::blocking::Client::builder().connect_timeout(request.options().timeout);
        if let Some(proxy) = &request.options().proxy {
            let proxy = reqwest::Proxy::all(format!("http://{proxy}"))
                .map_err(|e| Error::execute("invalid proxy settings").with_source(e))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| Error::execute("failed to prepare connection").with_source(e))?;

        let mut call = client.request(wire_method(request.action()), url.as_str());
        for (name, values) in request.headers() {
            for value in values.iter().flatten() {
                call = call.header(name.as_str(), value.as_str());
            }
        }
        if request.sends_body() {
            if let Some(body) = request.body() {
                call = call.body(body.to_owned());
            }
        }

        // Duration covers the execute+read phase only; request preparation
        // above is excluded.
        let started = Instant::now();
        let reply = call
            .send()
            .map_err(|e| Error::execute("request execution failed").with_source(e))?;
        let code = reply.status().as_u16();
        let message = reply.status().canonical_reason().map(str::to_owned);
        let headers = collect_headers(reply.headers());
        let body = reply
            .text()
            .map_err(|e| Error::execute("failed to read response body").with_source(e))?;
        let duration = started.elapsed();

        debug!(code, duration_ms = duration.as_millis() as u64, "response received");
        Ok(Response::new(code, message, body, headers, duration))
    }
}

impl Transport for Client {
    fn execute(&self, request: &Request) -> crate::Result<Response> {
        Client::execute(self, request)
    }
}

/// Resolve the final URL for `request`.
///
/// With an empty parameter map the target is used verbatim. Otherwise the
/// query string already present in the target is parsed, merged with the
/// request's parameters (target values first), and the serialized result is
/// appended to the stripped target. The stored target is never modified.
fn resolve_target(request: &Request) -> String {
    if request.parameters().is_empty() {
        return request.target().to_owned();
    }

    let existing = query::extract_query_parameters(request.target());
    let merged = query::merge_query_parameters([&existing, request.parameters()]);
    let resolved = format!(
        "{}{}",
        query::strip_query_string(request.target()),
        query::create_query_string(&merged)
    );
    trace!(original = request.target(), resolved = %resolved, "resolved request target");
    resolved
}

/// Map an [`Action`] onto the wire method of the backing stack.
fn wire_method(action: Action) -> reqwest::Method {
    match action {
        Action::Get => reqwest::Method::GET,
        Action::Head => reqwest::Method::HEAD,
        Action::Post => reqwest::Method::POST,
        Action::Put => reqwest::Method::PUT,
        Action::Delete => reqwest::Method::DELETE,
        Action::Connect => reqwest::Method::CONNECT,
        Action::Options => reqwest::Method::OPTIONS,
        Action::Trace => reqwest::Method::TRACE,
        Action::Patch => reqwest::Method::PATCH,
    }
}

/// Collect received headers into a [`ParameterMap`], preserving repeated
/// names. Values that are not valid UTF-8 are converted lossily.
fn collect_headers(headers: &reqwest::header::HeaderMap) -> ParameterMap {
    let mut map = ParameterMap::new();
    for (name, value) in headers {
        let text = match value.to_str() {
            Ok(text) => text.to_owned(),
            Err(_) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
        };
        map.entry(name.as_str().to_owned()).or_default().push(Some(text));
    }
    map
}
