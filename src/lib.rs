//! courier -- a small, blocking HTTP client core.
//!
//! courier builds immutable, validated request descriptions, executes them
//! against a remote target (optionally through an HTTP proxy), and returns a
//! structured response with timing and size metadata. The heart of the crate
//! is the query-string subsystem: parsing, merging, stripping, and
//! re-encoding query parameters without losing multi-valued entries along
//! the way.
//!
//! # Example
//!
//! ```no_run
//! use courier::{Action, Request};
//!
//! fn main() -> courier::Result<()> {
//!     let request = Request::builder()
//!         .target("https://api.example.com/search?q=rust")
//!         .action(Action::Get)
//!         .parameter("page", "2")
//!         .header("accept", "application/json")
//!         .build()?;
//!
//!     // Executes GET https://api.example.com/search?q=rust&page=2
//!     let response = courier::execute(&request)?;
//!     println!(
//!         "{} in {:?} ({} bytes)",
//!         response.code(),
//!         response.duration(),
//!         response.bytes_count()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! # Design
//!
//! * [`Request`] and [`Response`] are immutable values; the mutable
//!   [`RequestBuilder`] stage is consumed by a validating
//!   [`build()`](RequestBuilder::build).
//! * The [`query`] module is a set of pure functions -- the transport
//!   composes them to merge a target's existing query string with the
//!   request's parameter map at execution time.
//! * [`Transport`] is the single collaborator boundary for network I/O;
//!   [`Client`] is its default blocking implementation. One connection per
//!   execution, no pooling, no retries, no shared state.

#![deny(missing_docs)]

mod action;
mod client;
pub mod encoding;
mod error;
mod options;
pub mod query;
mod request;
mod response;

pub use action::Action;
pub use client::{Client, Transport};
pub use error::Error;
pub use options::{ProxySettings, RequestOptions, DEFAULT_TIMEOUT};
pub use query::ParameterMap;
pub use request::{Request, RequestBuilder};
pub use response::Response;

/// A `Result` alias where the `Err` case is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Execute `request` with a default [`Client`].
///
/// Shortcut for one-off calls; construct a [`Client`] yourself to reuse a
/// transport value (it is stateless either way).
pub fn execute(request: &Request) -> Result<Response> {
    Client::new().execute(request)
}
