//! Failure taxonomy of compiler-interface calls and proxy construction

use serde::{Deserialize, Serialize};

/// Result type of every compiler-interface operation
pub type CiResult<T> = Result<T, CiError>;

/// Kind of an unchecked runtime failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuntimeErrorKind {
    IllegalArgument,
    IllegalState,
    Arithmetic,
    ClassCast,
    NullPointer,
    IndexOutOfBounds,
    UnsupportedOperation,
}

impl RuntimeErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            RuntimeErrorKind::IllegalArgument => "IllegalArgument",
            RuntimeErrorKind::IllegalState => "IllegalState",
            RuntimeErrorKind::Arithmetic => "Arithmetic",
            RuntimeErrorKind::ClassCast => "ClassCast",
            RuntimeErrorKind::NullPointer => "NullPointer",
            RuntimeErrorKind::IndexOutOfBounds => "IndexOutOfBounds",
            RuntimeErrorKind::UnsupportedOperation => "UnsupportedOperation",
        }
    }
}

impl std::fmt::Display for RuntimeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure raised by a compiler-interface operation, a handler or the
/// interception layer itself.
///
/// `Runtime`, `Fatal` and `UndeclaredChecked` are unchecked: they may leave
/// any operation. `Checked` and `InvocationTarget` are checked: interface
/// operations never declare them, so the dispatch entry point wraps them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CiError {
    /// Unchecked runtime failure
    #[error("{kind}: {message}")]
    Runtime {
        /// Failure kind
        kind: RuntimeErrorKind,
        /// Detail message
        message: String,
    },

    /// Unrecoverable failure
    #[error("Fatal error: {0}")]
    Fatal(String),

    /// Checked failure raised by handler internals
    #[error("Checked failure: {0}")]
    Checked(String),

    /// The real call failed; carries the original failure
    #[error("Invocation failed: {0}")]
    InvocationTarget(Box<CiError>),

    /// A checked failure escaped through an operation that does not declare it
    #[error("Undeclared checked failure: {0}")]
    UndeclaredChecked(Box<CiError>),
}

impl CiError {
    pub fn runtime(kind: RuntimeErrorKind, message: impl Into<String>) -> Self {
        CiError::Runtime {
            kind,
            message: message.into(),
        }
    }

    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::runtime(RuntimeErrorKind::IllegalArgument, message)
    }

    pub fn class_cast(message: impl Into<String>) -> Self {
        Self::runtime(RuntimeErrorKind::ClassCast, message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::runtime(RuntimeErrorKind::UnsupportedOperation, message)
    }

    /// Whether this failure may propagate through an operation unchanged
    pub fn is_unchecked(&self) -> bool {
        matches!(
            self,
            CiError::Runtime { .. } | CiError::Fatal(_) | CiError::UndeclaredChecked(_)
        )
    }

    /// Directly wrapped failure, if any
    pub fn cause(&self) -> Option<&CiError> {
        match self {
            CiError::InvocationTarget(cause) | CiError::UndeclaredChecked(cause) => Some(cause),
            _ => None,
        }
    }

    /// Innermost failure of the wrapper chain
    pub fn root_cause(&self) -> &CiError {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Runtime kind, for `Runtime` failures
    pub fn runtime_kind(&self) -> Option<RuntimeErrorKind> {
        match self {
            CiError::Runtime { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Fatal construction-time errors of the proxy layer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxyError {
    /// A symbolic method does not exist on any candidate receiver interface
    #[error("Method not found: {method} in {receivers}")]
    MethodNotFound {
        /// Rendered symbolic method
        method: String,
        /// Candidate interfaces, comma separated
        receivers: String,
    },

    /// Requested interface is outside the closed proxyable set
    #[error("Unsupported proxy interface: {0}")]
    UnsupportedInterface(String),
}
