//! Proxy structs, one per interface of the closed set
//!
//! Each struct holds only its handler. The interface operations themselves
//! are implemented next to each interface trait by `#[compilation_proxy]`.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::CiResult;
use crate::meta::{CompilerObject, Constant, ResolvedJavaType, Value};
use crate::proxy::{base, CompilationProxy, InterfaceKind, InvocationHandler};

macro_rules! compilation_proxies {
    ($($(#[$doc:meta])* $proxy:ident => $kind:ident $(, $family:ident -> $family_trait:ident)?;)*) => {
        $(
            $(#[$doc])*
            pub struct $proxy {
                handler: Arc<dyn InvocationHandler>,
            }

            impl $proxy {
                pub fn new(handler: Arc<dyn InvocationHandler>) -> Self {
                    debug!(interface = InterfaceKind::$kind.name(), "created proxy");
                    $proxy { handler }
                }
            }

            impl fmt::Debug for $proxy {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($proxy)).finish_non_exhaustive()
                }
            }

            impl CompilerObject for $proxy {
                fn equals(&self, other: &Value) -> CiResult<bool> {
                    base::equals(self, other)
                }

                fn hash_code(&self) -> CiResult<i32> {
                    base::hash_code(self)
                }

                fn to_display_string(&self) -> CiResult<String> {
                    base::to_display_string(self)
                }

                fn as_compilation_proxy(&self) -> Option<&dyn CompilationProxy> {
                    Some(self)
                }
            }

            impl CompilationProxy for $proxy {
                fn handler(&self) -> &dyn InvocationHandler {
                    &*self.handler
                }

                fn interface(&self) -> InterfaceKind {
                    InterfaceKind::$kind
                }

                $(
                    fn $family(&self) -> Option<&dyn $family_trait> {
                        Some(self)
                    }
                )?
            }
        )*
    };
}

compilation_proxies! {
    VmConfigAccessProxy => VmConfigAccess;
    MetaAccessProviderProxy => MetaAccessProvider;
    ConstantReflectionProviderProxy => ConstantReflectionProvider;
    MethodHandleAccessProviderProxy => MethodHandleAccessProvider;
    MemoryAccessProviderProxy => MemoryAccessProvider;
    CodeCacheProviderProxy => CodeCacheProvider;
    CompilerProfilerProxy => CompilerProfiler;
    /// Member of the resolved type proxy family
    ResolvedPrimitiveTypeProxy => ResolvedPrimitiveType, as_resolved_java_type_proxy -> ResolvedJavaTypeProxy;
    /// Member of the resolved type proxy family
    ResolvedObjectTypeProxy => ResolvedObjectType, as_resolved_java_type_proxy -> ResolvedJavaTypeProxy;
    ResolvedJavaMethodProxy => ResolvedJavaMethod;
    ResolvedJavaFieldProxy => ResolvedJavaField;
    SignatureProxy => Signature;
    ConstantPoolProxy => ConstantPool;
    ProfilingInfoProxy => ProfilingInfo;
    VmProfilingInfoProxy => VmProfilingInfo;
    SpeculationLogProxy => SpeculationLog;
    /// Member of the constant proxy family
    ObjectConstantProxy => ObjectConstant, as_constant_proxy -> ConstantProxy;
    /// Member of the constant proxy family
    MetaspaceConstantProxy => MetaspaceConstant, as_constant_proxy -> ConstantProxy;
    InstalledCodeProxy => InstalledCode;
    TrustPredicateProxy => TrustPredicate;
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::ResolvedObjectTypeProxy {}
    impl Sealed for super::ResolvedPrimitiveTypeProxy {}
    impl Sealed for super::ObjectConstantProxy {}
    impl Sealed for super::MetaspaceConstantProxy {}
}

/// Proxies of resolved types. Implemented only by
/// [`ResolvedObjectTypeProxy`] and [`ResolvedPrimitiveTypeProxy`].
pub trait ResolvedJavaTypeProxy: CompilationProxy + ResolvedJavaType + sealed::Sealed {}

impl ResolvedJavaTypeProxy for ResolvedObjectTypeProxy {}
impl ResolvedJavaTypeProxy for ResolvedPrimitiveTypeProxy {}

/// Proxies of object-denoting constants. Implemented only by
/// [`ObjectConstantProxy`] and [`MetaspaceConstantProxy`].
pub trait ConstantProxy: CompilationProxy + Constant + sealed::Sealed {}

impl ConstantProxy for ObjectConstantProxy {}
impl ConstantProxy for MetaspaceConstantProxy {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::meta::{JavaConstant, MetaObject};
    use crate::proxy::{create_proxy, NormalizedInvokable, SymbolicMethod};

    /// Answers every call with the name of the called operation
    struct Echo;

    impl InvocationHandler for Echo {
        fn handle(
            &self,
            _proxy: &dyn CompilationProxy,
            method: &SymbolicMethod,
            _invokable: NormalizedInvokable,
            _args: Option<&[Value]>,
        ) -> CiResult<Value> {
            Ok(Value::String(method.name().to_string()))
        }
    }

    fn proxy(kind: InterfaceKind) -> MetaObject {
        create_proxy(kind, Arc::new(Echo))
    }

    #[test]
    fn test_resolved_type_family() {
        for kind in [InterfaceKind::ResolvedObjectType, InterfaceKind::ResolvedPrimitiveType] {
            let object = proxy(kind);
            let family = object.as_resolved_java_type_proxy().unwrap();
            assert_eq!(family.get_name().unwrap(), "get_name");
            assert_eq!((family as &dyn CompilationProxy).interface(), kind);

            let ty = object.java_type().unwrap();
            let via_ref = ty.as_proxy().unwrap();
            assert_eq!((via_ref as &dyn CompilationProxy).interface(), kind);
            assert!(object.as_constant_proxy().is_none());
        }
    }

    #[test]
    fn test_constant_family() {
        for kind in [InterfaceKind::ObjectConstant, InterfaceKind::MetaspaceConstant] {
            let object = proxy(kind);
            let family = object.as_constant_proxy().unwrap();
            assert_eq!(family.to_value_string().unwrap(), "to_value_string");
            assert_eq!((family as &dyn CompilationProxy).interface(), kind);
            assert!(object.as_resolved_java_type_proxy().is_none());
        }

        let constant = match proxy(InterfaceKind::ObjectConstant) {
            MetaObject::ObjectConstant(object) => JavaConstant::Object(object),
            other => panic!("unexpected {:?}", other),
        };
        assert!(constant.as_proxy().is_some());
        assert!(JavaConstant::for_int(1).as_proxy().is_none());
        assert!(JavaConstant::Null.as_proxy().is_none());
    }

    #[test]
    fn test_other_kinds_outside_families() {
        for kind in InterfaceKind::ALL {
            let object = proxy(kind);
            let in_type_family = matches!(
                kind,
                InterfaceKind::ResolvedObjectType | InterfaceKind::ResolvedPrimitiveType
            );
            let in_constant_family = matches!(kind, InterfaceKind::ObjectConstant | InterfaceKind::MetaspaceConstant);
            assert_eq!(object.as_resolved_java_type_proxy().is_some(), in_type_family);
            assert_eq!(object.as_constant_proxy().is_some(), in_constant_family);
        }
    }
}
