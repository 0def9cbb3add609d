//! Dispatch entry point
//!
//! The single function every proxy operation calls. It hands the call to the
//! proxy's handler and reconciles the handler's failures with what interface
//! operations may raise: unchecked failures pass through untouched, checked
//! ones are wrapped in `CiError::UndeclaredChecked`.

use tracing::{debug, trace};

use crate::error::{CiError, CiResult};
use crate::meta::Value;
use crate::proxy::{CompilationProxy, NormalizedInvokable, SymbolicMethod};

/// Routes one proxied call through the proxy's handler
pub fn handle(
    proxy: &dyn CompilationProxy,
    method: &SymbolicMethod,
    invokable: NormalizedInvokable,
    args: Vec<Value>,
) -> CiResult<Value> {
    let args = if args.is_empty() { None } else { Some(args.as_slice()) };
    trace!(
        interface = proxy.interface().name(),
        %method,
        argc = args.map_or(0, <[crate::meta::Value]>::len),
        "dispatching proxied call"
    );

    match proxy.handler().handle(proxy, method, invokable, args) {
        Ok(value) => Ok(value),
        Err(err) if err.is_unchecked() => Err(err),
        Err(err) => {
            debug!(interface = proxy.interface().name(), %method, error = %err, "wrapping checked failure");
            Err(CiError::UndeclaredChecked(Box::new(err)))
        }
    }
}
