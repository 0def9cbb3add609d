//! Invocation handler contract

use crate::error::CiResult;
use crate::meta::Value;
use crate::proxy::{CompilationProxy, NormalizedInvokable, SymbolicMethod};

/// Decides how each proxied call is answered.
///
/// Called exactly once per proxied call, synchronously on the calling
/// thread. A handler may forward to a real object through `invokable`,
/// answer with a recorded result, or fail. Calls may arrive concurrently
/// from several threads and reentrantly from within `handle`; any
/// synchronization of handler state is up to the handler.
pub trait InvocationHandler: Send + Sync {
    /// `args` is `None` for operations without arguments
    fn handle(
        &self,
        proxy: &dyn CompilationProxy,
        method: &SymbolicMethod,
        invokable: NormalizedInvokable,
        args: Option<&[Value]>,
    ) -> CiResult<Value>;
}
