//! HTTP request actions.
//!
//! [`Action`] is the closed set of methods a [`Request`](crate::Request) can
//! carry. Each variant knows whether it sends a request body and whether a
//! response body is expected, queried through total `const fn`s -- there is
//! no open-ended extension point.

use std::fmt;

/// An HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// `GET`
    Get,
    /// `HEAD`
    Head,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `CONNECT`
    Connect,
    /// `OPTIONS`
    Options,
    /// `TRACE`
    Trace,
    /// `PATCH`
    Patch,
}

impl Action {
    /// Every action, in wire-name order.
    pub const ALL: [Action; 9] = [
        Action::Get,
        Action::Head,
        Action::Post,
        Action::Put,
        Action::Delete,
        Action::Connect,
        Action::Options,
        Action::Trace,
        Action::Patch,
    ];

    /// Whether a request with this action carries a request body.
    pub const fn supports_request_body(self) -> bool {
        matches!(self, Action::Post | Action::Put | Action::Delete | Action::Patch)
    }

    /// Whether a response to this action is expected to carry a body.
    pub const fn supports_response_body(self) -> bool {
        !matches!(self, Action::Head | Action::Trace)
    }

    /// The uppercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Get => "GET",
            Action::Head => "HEAD",
            Action::Post => "POST",
            Action::Put => "PUT",
            Action::Delete => "DELETE",
            Action::Connect => "CONNECT",
            Action::Options => "OPTIONS",
            Action::Trace => "TRACE",
            Action::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
