//! Proxy marker and the operations every proxy shares

use crate::error::CiResult;
use crate::meta::{CompilerObject, CompilerObjectMethods, FromValue, MetaObject, Value};
use crate::proxy::invokable::check_arity;
use crate::proxy::{
    dispatch, ConstantProxy, InterfaceDescriptor, InterfaceKind, InvocationHandler, InvokableMethod, MethodSignature,
    ResolvedJavaTypeProxy, SymbolicMethod,
};

/// Marker of proxy objects.
///
/// A proxy holds its handler and nothing else. Identity operations and
/// `unproxify` go through the handler like any other operation.
pub trait CompilationProxy: CompilerObject {
    fn handler(&self) -> &dyn InvocationHandler;

    /// Interface implemented by this proxy
    fn interface(&self) -> InterfaceKind;

    /// Resolved type family view, for the object and primitive type proxies
    fn as_resolved_java_type_proxy(&self) -> Option<&dyn ResolvedJavaTypeProxy> {
        None
    }

    /// Constant family view, for the object and metaspace constant proxies
    fn as_constant_proxy(&self) -> Option<&dyn ConstantProxy> {
        None
    }
}

impl dyn CompilationProxy + '_ {
    /// The real object behind this proxy, if the handler knows one in this
    /// process
    pub fn unproxify(&self) -> CiResult<Option<MetaObject>> {
        let result = dispatch::handle(
            self,
            &CompilationProxyMethods::UNPROXIFY_METHOD,
            CompilationProxyMethods::UNPROXIFY_INVOKABLE.wrap_invocation_failures(),
            Vec::new(),
        )?;
        FromValue::from_value(&result)
    }
}

/// Proxy table of [`CompilationProxy`].
pub struct CompilationProxyMethods;

impl CompilationProxyMethods {
    pub const DESCRIPTOR: InterfaceDescriptor = InterfaceDescriptor {
        name: "CompilationProxy",
        methods: &[MethodSignature {
            name: "unproxify",
            params: &[],
            proxied: true,
        }],
        supers: &[&CompilerObjectMethods::DESCRIPTOR],
        symbols: &[Self::UNPROXIFY_METHOD],
    };

    pub const UNPROXIFY_METHOD: SymbolicMethod = SymbolicMethod::from_static("unproxify", &[]);
    /// The receiver is the real object
    pub const UNPROXIFY_INVOKABLE: InvokableMethod = InvokableMethod::new(|receiver, args| {
        check_arity("unproxify", args, 0)?;
        Ok(Value::Object(receiver.clone()))
    });
}

pub(crate) fn equals(proxy: &dyn CompilationProxy, other: &Value) -> CiResult<bool> {
    let result = dispatch::handle(
        proxy,
        &CompilerObjectMethods::EQUALS_METHOD,
        CompilerObjectMethods::EQUALS_INVOKABLE.wrap_invocation_failures(),
        vec![other.clone()],
    )?;
    FromValue::from_value(&result)
}

pub(crate) fn hash_code(proxy: &dyn CompilationProxy) -> CiResult<i32> {
    let result = dispatch::handle(
        proxy,
        &CompilerObjectMethods::HASH_CODE_METHOD,
        CompilerObjectMethods::HASH_CODE_INVOKABLE.wrap_invocation_failures(),
        Vec::new(),
    )?;
    FromValue::from_value(&result)
}

pub(crate) fn to_display_string(proxy: &dyn CompilationProxy) -> CiResult<String> {
    let result = dispatch::handle(
        proxy,
        &CompilerObjectMethods::TO_DISPLAY_STRING_METHOD,
        CompilerObjectMethods::TO_DISPLAY_STRING_INVOKABLE.wrap_invocation_failures(),
        Vec::new(),
    )?;
    FromValue::from_value(&result)
}
