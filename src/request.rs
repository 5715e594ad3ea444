//! Request value and builder.
//!
//! [`Request`] is a fully-built, immutable request description. Obtain one
//! through [`Request::builder()`], configure the mutable [`RequestBuilder`]
//! stage with chained setters, and finalize with
//! [`build()`](RequestBuilder::build), which validates and hands back the
//! read-only value. The builder is consumed by finalization -- the mutable
//! stage is never reachable from a built request.

use tracing::debug;

use crate::action::Action;
use crate::error::Error;
use crate::options::RequestOptions;
use crate::query::ParameterMap;

// ---------------------------------------------------------------------------
// Request -- a fully-built, immutable request description
// ---------------------------------------------------------------------------

/// A validated, execution-ready HTTP request.
///
/// Created via [`RequestBuilder::build()`] and never mutated afterwards.
/// All accessors return shared views of internal state; with no mutating
/// methods on the type, callers cannot alter a request once built, so
/// instances are freely shareable across concurrent executions.
#[derive(Debug, Clone)]
pub struct Request {
    target: String,
    action: Action,
    body: Option<String>,
    parameters: ParameterMap,
    headers: ParameterMap,
    options: RequestOptions,
}

impl Request {
    /// Start building a request.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    /// The absolute target URL, exactly as given to the builder.
    ///
    /// Query parameters added via the builder are merged into this URL at
    /// execution time; the stored target itself is never rewritten.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The HTTP action.
    pub fn action(&self) -> Action {
        self.action
    }

    /// The request body, if one was set.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Query parameters to merge into the target URL at execution time.
    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    /// Request headers. Multiple values per name are preserved.
    pub fn headers(&self) -> &ParameterMap {
        &self.headers
    }

    /// Execution options.
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Whether executing this request sends a body: true only when the
    /// action supports a request body *and* the body is non-blank.
    pub fn sends_body(&self) -> bool {
        self.action.supports_request_body()
            && self.body.as_deref().is_some_and(|body| !body.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// RequestBuilder -- the mutable staging area
// ---------------------------------------------------------------------------

/// Mutable staging area for a [`Request`].
///
/// Every setter consumes and returns the builder for chaining.
/// [`build()`](Self::build) validates the staged fields and produces the
/// immutable value; only `target` and `action` are required.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    target: Option<String>,
    action: Option<Action>,
    body: Option<String>,
    parameters: ParameterMap,
    headers: ParameterMap,
    options: RequestOptions,
}

impl RequestBuilder {
    /// An empty builder. Equivalent to [`Request::builder()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the absolute target URL. Must start with `http://` or
    /// `https://` -- checked by [`build()`](Self::build).
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the HTTP action. Required.
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the request body. Only sent when the action supports one and the
    /// body is non-blank; see [`Request::sends_body()`].
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Append a query parameter. Repeated names accumulate values in call
    /// order; existing values are never overwritten.
    ///
    /// A blank `name` is silently ignored (a nameless query parameter
    /// cannot be serialized). The same guard applies to
    /// [`header()`](Self::header).
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        append_entry(&mut self.parameters, name.into(), Some(value.into()), "parameter");
        self
    }

    /// Replace the staged parameter map wholesale.
    ///
    /// Use this to stage valueless (`None`) parameters, which
    /// [`parameter()`](Self::parameter) cannot express.
    pub fn parameters(mut self, parameters: ParameterMap) -> Self {
        self.parameters = parameters;
        self
    }

    /// Append a header. Repeated names accumulate values in call order;
    /// existing values are never overwritten. Blank names are silently
    /// ignored, matching [`parameter()`](Self::parameter).
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        append_entry(&mut self.headers, name.into(), Some(value.into()), "header");
        self
    }

    /// Replace the staged header map wholesale.
    pub fn headers(mut self, headers: ParameterMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set the execution options.
    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the staged fields and produce an immutable [`Request`].
    ///
    /// Checks run in a fixed order and the first failure wins, each with a
    /// distinct message:
    ///
    /// 1. target not set
    /// 2. target blank after trimming
    /// 3. target not starting with `http://` or `https://`
    /// 4. action not set
    ///
    /// Body, parameters, headers, and options are optional and default to
    /// empty/default values.
    pub fn build(self) -> Result<Request, Error> {
        let Some(target) = self.target else {
            return Err(Error::builder("target is not set"));
        };
        if target.trim().is_empty() {
            return Err(Error::builder("target cannot be blank"));
        }
        if !target.starts_with("http://") && !target.starts_with("https://") {
            return Err(Error::builder("target must start with http:// or https://"));
        }
        let Some(action) = self.action else {
            return Err(Error::builder("action is not set"));
        };

        Ok(Request {
            target,
            action,
            body: self.body,
            parameters: self.parameters,
            headers: self.headers,
            options: self.options,
        })
    }
}

/// Append `value` under `name`, creating the sequence on first use. Blank
/// names are dropped with a debug event rather than an error.
fn append_entry(map: &mut ParameterMap, name: String, value: Option<String>, what: &str) {
    if name.trim().is_empty() {
        debug!(what, "ignoring entry with blank name");
        return;
    }
    map.entry(name).or_default().push(value);
}
