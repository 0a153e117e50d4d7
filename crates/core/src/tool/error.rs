use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::{self, Display};

/// What went wrong with a tool call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The arguments don't match the tool's input.
    InvalidInput,
    /// The tool ran and failed.
    ExecutionError,
    /// No tool is registered under the requested name.
    NotFound,
}

impl ErrorKind {
    /// Returns a short human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "Invalid input",
            ErrorKind::ExecutionError => "Execution error",
            ErrorKind::NotFound => "Tool not found",
        }
    }
}

impl Display for ErrorKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed tool call, reported back to the model as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Error {
    kind: ErrorKind,
    reason: Option<String>,
}

impl Error {
    #[inline]
    fn new(kind: ErrorKind) -> Self {
        Self { kind, reason: None }
    }

    /// Creates an `InvalidInput` error.
    #[inline]
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates an `ExecutionError` error.
    #[inline]
    pub fn execution_error() -> Self {
        Self::new(ErrorKind::ExecutionError)
    }

    /// Creates a `NotFound` error naming the missing tool.
    pub fn unknown_tool(name: &str) -> Self {
        Self::new(ErrorKind::NotFound)
            .with_reason(format!("no tool named `{name}`"))
    }

    /// Replaces the reason of the error.
    #[inline]
    pub fn with_reason<S: Into<String>>(mut self, reason: S) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns the kind of the error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the reason, falling back to the kind's label.
    pub fn reason(&self) -> Cow<'_, str> {
        self.reason
            .as_deref()
            .map_or(Cow::Borrowed(self.kind.as_str()), Cow::Borrowed)
    }
}

/// Arguments that fail to deserialize are the caller's fault.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_input().with_reason(err.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {reason}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl StdError for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_and_display() {
        let err = Error::invalid_input();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.reason(), "Invalid input");
        assert_eq!(err.to_string(), "Invalid input");

        let err = Error::unknown_tool("foo");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.reason(), "no tool named `foo`");
        assert_eq!(err.to_string(), "Tool not found: no tool named `foo`");
    }

    #[test]
    fn test_from_json_error() {
        let json_err =
            serde_json::from_str::<u32>("\"ten\"").unwrap_err();
        let err = Error::from(json_err);
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.reason().contains("invalid type"));
    }

    #[test]
    fn test_with_reason_replaces() {
        let err = Error::execution_error()
            .with_reason("first")
            .with_reason("second");
        assert_eq!(err.reason(), "second");
    }
}
