//! Invokable methods and failure normalization

use std::any::Any;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::warn;

use crate::error::{CiError, CiResult};
use crate::meta::{MetaObject, Value};

/// Performs one operation on a concrete receiver with unpacked arguments
pub type InvokeFn = fn(&MetaObject, &[Value]) -> CiResult<Value>;

/// The real call of one operation, paired with its symbolic identity
#[derive(Clone, Copy)]
pub struct InvokableMethod {
    invoke: InvokeFn,
}

impl InvokableMethod {
    pub const fn new(invoke: InvokeFn) -> Self {
        InvokableMethod { invoke }
    }

    /// Calls the operation on `receiver`; failures are returned as raised
    pub fn invoke(&self, receiver: &MetaObject, args: &[Value]) -> CiResult<Value> {
        (self.invoke)(receiver, args)
    }

    /// Wraps this invokable so that every failure surfaces as
    /// [`CiError::InvocationTarget`]
    pub const fn wrap_invocation_failures(self) -> NormalizedInvokable {
        NormalizedInvokable { inner: self }
    }
}

impl fmt::Debug for InvokableMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvokableMethod").finish_non_exhaustive()
    }
}

/// An invokable whose failures, panics included, all surface as
/// `CiError::InvocationTarget` carrying the original failure
#[derive(Clone, Copy, Debug)]
pub struct NormalizedInvokable {
    inner: InvokableMethod,
}

impl NormalizedInvokable {
    /// Calls the operation on `receiver`. `None` stands for no arguments.
    pub fn invoke(&self, receiver: &MetaObject, args: Option<&[Value]>) -> CiResult<Value> {
        let args = args.unwrap_or(&[]);
        match catch_unwind(AssertUnwindSafe(|| self.inner.invoke(receiver, args))) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(cause)) => Err(CiError::InvocationTarget(Box::new(cause))),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(receiver = receiver.kind().name(), %message, "real call panicked");
                Err(CiError::InvocationTarget(Box::new(CiError::Fatal(message))))
            }
        }
    }

    pub fn inner(&self) -> InvokableMethod {
        self.inner
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Failure for a receiver that does not implement the operation's interface
pub fn receiver_mismatch(interface: &str, receiver: &MetaObject) -> CiError {
    CiError::class_cast(format!(
        "{} cannot be cast to {}",
        receiver.kind().name(),
        interface
    ))
}

/// Checks that exactly `expected` arguments were supplied
pub fn check_arity(method: &str, args: &[Value], expected: usize) -> CiResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CiError::illegal_argument(format!(
            "{} expects {} argument(s), got {}",
            method,
            expected,
            args.len()
        )))
    }
}
