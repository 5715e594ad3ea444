//! Response value.
//!
//! [`Response`] is the immutable result of one executed request: status
//! line, body, headers, and the wall-clock duration of the execute+read
//! phase. Size metrics are derived on demand from the stored strings.

use std::time::Duration;

use cookie::Cookie;

use crate::query::ParameterMap;

/// An immutable HTTP response.
///
/// Produced exactly once per execution by the transport. Like
/// [`Request`](crate::Request), the value has no mutating methods, so it can
/// be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Response {
    code: u16,
    message: Option<String>,
    body: String,
    headers: ParameterMap,
    duration: Duration,
}

impl Response {
    /// Assemble a response from the parts of a finished network exchange.
    pub fn new(
        code: u16,
        message: Option<String>,
        body: impl Into<String>,
        headers: ParameterMap,
        duration: Duration,
    ) -> Self {
        Self {
            code,
            message,
            body: body.into(),
            headers,
            duration,
        }
    }

    /// The HTTP status code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The status message, when one is known for the code.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The response body. Empty when the server sent none.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Response headers. Multiple values per name are preserved.
    pub fn headers(&self) -> &ParameterMap {
        &self.headers
    }

    /// Wall-clock duration of the execute+read phase only. Connection
    /// setup is not included.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// UTF-8 byte length of the body.
    pub fn body_bytes_count(&self) -> u64 {
        self.body.len() as u64
    }

    /// UTF-8 byte length of the headers: the sum over every header name and
    /// every present value.
    pub fn headers_bytes_count(&self) -> u64 {
        self.headers
            .iter()
            .map(|(name, values)| {
                name.len() as u64 + values.iter().flatten().map(|value| value.len() as u64).sum::<u64>()
            })
            .sum()
    }

    /// UTF-8 byte length of body and headers combined.
    pub fn bytes_count(&self) -> u64 {
        self.body_bytes_count() + self.headers_bytes_count()
    }

    /// Cookies parsed from the `Set-Cookie` header values, if any.
    ///
    /// Each value is parsed independently; values that do not parse are
    /// skipped. This is a thin pass-through -- nothing is stored, matched
    /// against domains, or sent back on later requests.
    pub fn cookies(&self) -> Vec<Cookie<'static>> {
        self.headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("set-cookie"))
            .flat_map(|(_, values)| values.iter().flatten())
            .filter_map(|value| Cookie::parse(value.clone()).ok())
            .collect()
    }
}
