//! Error type for courier.
//!
//! Provides [`Error`] with a two-way kind classification matching the two
//! failure classes of the crate: construction failures raised by
//! [`RequestBuilder::build()`](crate::RequestBuilder::build), and execution
//! failures raised by the transport. Query the class via
//! [`is_builder()`](Error::is_builder) / [`is_execute()`](Error::is_execute).

use std::fmt;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type for courier operations.
///
/// Construction errors are always recoverable by fixing the builder inputs
/// and retrying. Execution errors wrap the underlying transport cause (DNS,
/// connect, timeout, read) as a single opaque failure -- the cause is
/// reachable through [`std::error::Error::source`], but the crate does not
/// classify network failures any further.
pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<BoxError>,
}

/// Classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    /// Request construction error (builder validation).
    Builder,
    /// Request execution error (connect, proxy, write, read).
    Execute,
}

impl Error {
    /// Returns `true` if this error was raised while building a request.
    pub fn is_builder(&self) -> bool {
        matches!(self.kind, ErrorKind::Builder)
    }

    /// Returns `true` if this error was raised while executing a request.
    pub fn is_execute(&self) -> bool {
        matches!(self.kind, ErrorKind::Execute)
    }

    /// The human-readable detail message.
    pub fn message(&self) -> &str {
        &self.message
    }

    // -- Internal constructors --

    /// Shared constructor for errors without a source.
    fn with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a construction-phase error.
    pub(crate) fn builder(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Builder, message)
    }

    /// Create an execution-phase error.
    pub(crate) fn execute(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Execute, message)
    }

    /// Attach a source error (builder pattern).
    ///
    /// Stores the underlying cause so that [`std::error::Error::source`]
    /// returns it, making error chains inspectable by callers.
    #[must_use]
    pub(crate) fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Builder => write!(f, "request could not be created: {}", self.message),
            ErrorKind::Execute => write!(f, "request could not be executed: {}", self.message),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("source", &self.source)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| &**e as &(dyn std::error::Error + 'static))
    }
}

// Ensure Error is shareable across threads (concurrent executions hold
// independent Results).
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
};
