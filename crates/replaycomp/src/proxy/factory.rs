//! Proxy factory over the closed interface set

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::ProxyError;
use crate::meta::*;
use crate::proxy::*;

/// Token of a proxyable interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    VmConfigAccess,
    MetaAccessProvider,
    ConstantReflectionProvider,
    MethodHandleAccessProvider,
    MemoryAccessProvider,
    CodeCacheProvider,
    CompilerProfiler,
    ResolvedPrimitiveType,
    ResolvedObjectType,
    ResolvedJavaMethod,
    ResolvedJavaField,
    Signature,
    ConstantPool,
    ProfilingInfo,
    VmProfilingInfo,
    SpeculationLog,
    ObjectConstant,
    MetaspaceConstant,
    InstalledCode,
    TrustPredicate,
}

impl InterfaceKind {
    pub const ALL: [InterfaceKind; 20] = [
        InterfaceKind::VmConfigAccess,
        InterfaceKind::MetaAccessProvider,
        InterfaceKind::ConstantReflectionProvider,
        InterfaceKind::MethodHandleAccessProvider,
        InterfaceKind::MemoryAccessProvider,
        InterfaceKind::CodeCacheProvider,
        InterfaceKind::CompilerProfiler,
        InterfaceKind::ResolvedPrimitiveType,
        InterfaceKind::ResolvedObjectType,
        InterfaceKind::ResolvedJavaMethod,
        InterfaceKind::ResolvedJavaField,
        InterfaceKind::Signature,
        InterfaceKind::ConstantPool,
        InterfaceKind::ProfilingInfo,
        InterfaceKind::VmProfilingInfo,
        InterfaceKind::SpeculationLog,
        InterfaceKind::ObjectConstant,
        InterfaceKind::MetaspaceConstant,
        InterfaceKind::InstalledCode,
        InterfaceKind::TrustPredicate,
    ];

    /// Interface name, e.g. `ResolvedJavaField`
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Token of the interface with the given name
    pub fn from_name(name: &str) -> Result<InterfaceKind, ProxyError> {
        InterfaceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| ProxyError::UnsupportedInterface(name.to_string()))
    }

    /// Declared surface of the interface
    pub fn descriptor(self) -> &'static InterfaceDescriptor {
        match self {
            InterfaceKind::VmConfigAccess => &VmConfigAccessMethods::DESCRIPTOR,
            InterfaceKind::MetaAccessProvider => &MetaAccessProviderMethods::DESCRIPTOR,
            InterfaceKind::ConstantReflectionProvider => &ConstantReflectionProviderMethods::DESCRIPTOR,
            InterfaceKind::MethodHandleAccessProvider => &MethodHandleAccessProviderMethods::DESCRIPTOR,
            InterfaceKind::MemoryAccessProvider => &MemoryAccessProviderMethods::DESCRIPTOR,
            InterfaceKind::CodeCacheProvider => &CodeCacheProviderMethods::DESCRIPTOR,
            InterfaceKind::CompilerProfiler => &CompilerProfilerMethods::DESCRIPTOR,
            InterfaceKind::ResolvedPrimitiveType => &ResolvedPrimitiveTypeMethods::DESCRIPTOR,
            InterfaceKind::ResolvedObjectType => &ResolvedObjectTypeMethods::DESCRIPTOR,
            InterfaceKind::ResolvedJavaMethod => &ResolvedJavaMethodMethods::DESCRIPTOR,
            InterfaceKind::ResolvedJavaField => &ResolvedJavaFieldMethods::DESCRIPTOR,
            InterfaceKind::Signature => &SignatureMethods::DESCRIPTOR,
            InterfaceKind::ConstantPool => &ConstantPoolMethods::DESCRIPTOR,
            InterfaceKind::ProfilingInfo => &ProfilingInfoMethods::DESCRIPTOR,
            InterfaceKind::VmProfilingInfo => &VmProfilingInfoMethods::DESCRIPTOR,
            InterfaceKind::SpeculationLog => &SpeculationLogMethods::DESCRIPTOR,
            InterfaceKind::ObjectConstant => &ObjectConstantMethods::DESCRIPTOR,
            InterfaceKind::MetaspaceConstant => &MetaspaceConstantMethods::DESCRIPTOR,
            InterfaceKind::InstalledCode => &InstalledCodeMethods::DESCRIPTOR,
            InterfaceKind::TrustPredicate => &TrustPredicateMethods::DESCRIPTOR,
        }
    }

    /// Symbolic identity of an operation of this interface (inherited ones
    /// included), checked against the declared surface
    pub fn lookup_method(self, name: &str, params: &[&str]) -> Result<SymbolicMethod, ProxyError> {
        SymbolicMethod::verified(name, params, &[self.descriptor(), &CompilationProxyMethods::DESCRIPTOR])
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Creates the proxy of `kind`, answering every call through `handler`
pub fn create_proxy(kind: InterfaceKind, handler: Arc<dyn InvocationHandler>) -> MetaObject {
    debug!(interface = kind.name(), "creating proxy");
    match kind {
        InterfaceKind::VmConfigAccess => MetaObject::VmConfigAccess(Arc::new(VmConfigAccessProxy::new(handler))),
        InterfaceKind::MetaAccessProvider => {
            MetaObject::MetaAccessProvider(Arc::new(MetaAccessProviderProxy::new(handler)))
        }
        InterfaceKind::ConstantReflectionProvider => {
            MetaObject::ConstantReflectionProvider(Arc::new(ConstantReflectionProviderProxy::new(handler)))
        }
        InterfaceKind::MethodHandleAccessProvider => {
            MetaObject::MethodHandleAccessProvider(Arc::new(MethodHandleAccessProviderProxy::new(handler)))
        }
        InterfaceKind::MemoryAccessProvider => {
            MetaObject::MemoryAccessProvider(Arc::new(MemoryAccessProviderProxy::new(handler)))
        }
        InterfaceKind::CodeCacheProvider => {
            MetaObject::CodeCacheProvider(Arc::new(CodeCacheProviderProxy::new(handler)))
        }
        InterfaceKind::CompilerProfiler => MetaObject::CompilerProfiler(Arc::new(CompilerProfilerProxy::new(handler))),
        InterfaceKind::ResolvedPrimitiveType => {
            MetaObject::ResolvedPrimitiveType(Arc::new(ResolvedPrimitiveTypeProxy::new(handler)))
        }
        InterfaceKind::ResolvedObjectType => {
            MetaObject::ResolvedObjectType(Arc::new(ResolvedObjectTypeProxy::new(handler)))
        }
        InterfaceKind::ResolvedJavaMethod => {
            MetaObject::ResolvedJavaMethod(Arc::new(ResolvedJavaMethodProxy::new(handler)))
        }
        InterfaceKind::ResolvedJavaField => MetaObject::ResolvedJavaField(Arc::new(ResolvedJavaFieldProxy::new(handler))),
        InterfaceKind::Signature => MetaObject::Signature(Arc::new(SignatureProxy::new(handler))),
        InterfaceKind::ConstantPool => MetaObject::ConstantPool(Arc::new(ConstantPoolProxy::new(handler))),
        InterfaceKind::ProfilingInfo => MetaObject::ProfilingInfo(Arc::new(ProfilingInfoProxy::new(handler))),
        InterfaceKind::VmProfilingInfo => MetaObject::VmProfilingInfo(Arc::new(VmProfilingInfoProxy::new(handler))),
        InterfaceKind::SpeculationLog => MetaObject::SpeculationLog(Arc::new(SpeculationLogProxy::new(handler))),
        InterfaceKind::ObjectConstant => MetaObject::ObjectConstant(Arc::new(ObjectConstantProxy::new(handler))),
        InterfaceKind::MetaspaceConstant => {
            MetaObject::MetaspaceConstant(Arc::new(MetaspaceConstantProxy::new(handler)))
        }
        InterfaceKind::InstalledCode => MetaObject::InstalledCode(Arc::new(InstalledCodeProxy::new(handler))),
        InterfaceKind::TrustPredicate => MetaObject::TrustPredicate(Arc::new(TrustPredicateProxy::new(handler))),
    }
}

/// Creates the proxy of the interface named `name`; names outside the
/// closed set fail without constructing anything
pub fn create_proxy_by_name(name: &str, handler: Arc<dyn InvocationHandler>) -> Result<MetaObject, ProxyError> {
    let kind = InterfaceKind::from_name(name)?;
    Ok(create_proxy(kind, handler))
}

/// Checks every proxied symbolic method of the closed set against the
/// declared surface of its interface. Returns the number of identities
/// checked.
pub fn verify_declarations() -> Result<usize, ProxyError> {
    let mut checked = 0;
    let mut stack: Vec<&'static InterfaceDescriptor> = InterfaceKind::ALL.iter().map(|kind| kind.descriptor()).collect();
    stack.push(&CompilationProxyMethods::DESCRIPTOR);
    let mut visited: Vec<&'static str> = Vec::new();

    while let Some(descriptor) = stack.pop() {
        if visited.contains(&descriptor.name) {
            continue;
        }
        visited.push(descriptor.name);

        for symbol in descriptor.symbols {
            let params: Vec<&str> = symbol.params().collect();
            let verified = SymbolicMethod::verified(symbol.name(), &params, &[descriptor])?;
            let declared = descriptor
                .methods
                .iter()
                .find(|signature| signature.matches(&verified))
                .is_some_and(|signature| signature.proxied);
            if !declared {
                return Err(ProxyError::MethodNotFound {
                    method: verified.to_string(),
                    receivers: descriptor.name.to_string(),
                });
            }
            checked += 1;
        }
        stack.extend(descriptor.supers.iter().copied());
    }
    Ok(checked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CiResult;

    struct Unanswered;

    impl InvocationHandler for Unanswered {
        fn handle(
            &self,
            _proxy: &dyn CompilationProxy,
            _method: &SymbolicMethod,
            _invokable: NormalizedInvokable,
            _args: Option<&[Value]>,
        ) -> CiResult<Value> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn test_every_kind_creates_its_proxy() {
        let handler: Arc<dyn InvocationHandler> = Arc::new(Unanswered);
        for kind in InterfaceKind::ALL {
            let object = create_proxy(kind, handler.clone());
            assert_eq!(object.kind(), kind);
            assert!(object.is_proxy());
            let proxy = object.as_compiler_object().as_compilation_proxy().unwrap();
            assert_eq!(proxy.interface(), kind);
        }
    }

    #[test]
    fn test_names_round_trip() {
        for kind in InterfaceKind::ALL {
            assert_eq!(InterfaceKind::from_name(kind.name()).unwrap(), kind);
        }
        assert_eq!(InterfaceKind::ResolvedJavaField.to_string(), "ResolvedJavaField");
    }

    #[test]
    fn test_unsupported_name() {
        let handler: Arc<dyn InvocationHandler> = Arc::new(Unanswered);
        let err = create_proxy_by_name("ResolvedJavaType", handler.clone()).unwrap_err();
        assert_eq!(err, ProxyError::UnsupportedInterface("ResolvedJavaType".into()));

        let object = create_proxy_by_name("Signature", handler).unwrap();
        assert!(object.as_signature().is_some());
    }

    #[test]
    fn test_declarations_consistent() {
        let checked = verify_declarations().unwrap();
        assert!(checked > 100, "only {checked} symbolic methods checked");
    }

    #[test]
    fn test_lookup_method() {
        let method = InterfaceKind::ResolvedObjectType
            .lookup_method("is_assignable_from", &["JavaTypeRef"])
            .unwrap();
        assert_eq!(method, ResolvedJavaTypeMethods::IS_ASSIGNABLE_FROM_METHOD);

        assert!(InterfaceKind::Signature.lookup_method("unproxify", &[]).is_ok());
        assert!(InterfaceKind::Signature.lookup_method("equals", &["Value"]).is_ok());
    }

    #[cfg(not(feature = "minimal-footprint"))]
    #[test]
    fn test_lookup_method_drift() {
        assert!(InterfaceKind::Signature.lookup_method("get_parameter_count", &["i32"]).is_err());
    }

    #[test]
    fn test_defaulted_operations_not_proxied() {
        let descriptor = InterfaceKind::ResolvedJavaField.descriptor();
        let is_static = descriptor.methods.iter().find(|m| m.name == "is_static").unwrap();
        assert!(!is_static.proxied);
        assert!(!descriptor.symbols.iter().any(|s| s.name() == "is_static"));

        let all = InterfaceKind::ResolvedObjectType.descriptor().all_methods();
        assert!(all.iter().any(|m| m.name == "get_name"));
        assert!(all.iter().any(|m| m.name == "equals"));
        assert!(InterfaceKind::VmProfilingInfo
            .descriptor()
            .extends(InterfaceKind::ProfilingInfo.descriptor()));
    }
}
