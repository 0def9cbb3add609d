//! Forwarding handler

use std::sync::Arc;

use tracing::trace;

use crate::error::CiResult;
use crate::meta::{MetaObject, Value};
use crate::proxy::{create_proxy, CompilationProxy, InvocationHandler, NormalizedInvokable, SymbolicMethod};

/// Forwards every call to a real object living in this process
pub struct ForwardingHandler {
    target: MetaObject,
}

impl ForwardingHandler {
    pub fn new(target: MetaObject) -> Self {
        ForwardingHandler { target }
    }

    /// Proxy of the same kind as `target` whose calls all reach `target`
    pub fn proxy_for(target: MetaObject) -> MetaObject {
        let kind = target.kind();
        create_proxy(kind, Arc::new(ForwardingHandler::new(target)))
    }

    pub fn target(&self) -> &MetaObject {
        &self.target
    }
}

impl InvocationHandler for ForwardingHandler {
    fn handle(
        &self,
        _proxy: &dyn CompilationProxy,
        method: &SymbolicMethod,
        invokable: NormalizedInvokable,
        args: Option<&[Value]>,
    ) -> CiResult<Value> {
        trace!(%method, target = ?self.target, "forwarding");
        invokable.invoke(&self.target, args)
    }
}
