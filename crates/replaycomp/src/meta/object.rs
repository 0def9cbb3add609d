//! Base compiler object and the closed interface sum type

use std::fmt;
use std::sync::Arc;

use crate::error::CiResult;
use crate::meta::{
    CodeCacheProvider, CompilerProfiler, Constant, ConstantPool, ConstantReflectionProvider, FromValue,
    InstalledCode, JavaTypeRef, MemoryAccessProvider, MetaAccessProvider, MetaspaceConstant,
    MethodHandleAccessProvider, ObjectConstant, ProfilingInfo, ResolvedJavaField, ResolvedJavaMethod,
    ResolvedJavaType, ResolvedObjectType, ResolvedPrimitiveType, Signature, SpeculationLog, ToValue,
    TrustPredicate, Value, VmConfigAccess, VmProfilingInfo,
};
use crate::proxy::invokable::check_arity;
use crate::proxy::{
    CompilationProxy, ConstantProxy, InterfaceDescriptor, InterfaceKind, InvokableMethod, MethodSignature,
    ResolvedJavaTypeProxy, SymbolicMethod,
};

/// Base of every compiler-interface object.
///
/// The identity operations default to object identity for real objects.
/// Proxies override them to route through their handler, so the handler
/// decides what equality, hashing and display mean for a proxy.
pub trait CompilerObject: Send + Sync {
    fn equals(&self, other: &Value) -> CiResult<bool> {
        Ok(match other {
            Value::Object(object) => std::ptr::addr_eq(
                self as *const Self,
                object.as_compiler_object() as *const dyn CompilerObject,
            ),
            _ => false,
        })
    }

    fn hash_code(&self) -> CiResult<i32> {
        let address = (self as *const Self).cast::<()>() as usize as u64;
        Ok((address ^ (address >> 32)) as i32)
    }

    fn to_display_string(&self) -> CiResult<String> {
        Ok(format!(
            "{}@{:x}",
            std::any::type_name::<Self>(),
            (self as *const Self).cast::<()>() as usize
        ))
    }

    /// The proxy view of this object, `None` for real objects
    fn as_compilation_proxy(&self) -> Option<&dyn CompilationProxy> {
        None
    }
}

/// Proxy table of [`CompilerObject`].
pub struct CompilerObjectMethods;

impl CompilerObjectMethods {
    pub const DESCRIPTOR: InterfaceDescriptor = InterfaceDescriptor {
        name: "CompilerObject",
        methods: &[
            MethodSignature {
                name: "equals",
                params: &["Value"],
                proxied: true,
            },
            MethodSignature {
                name: "hash_code",
                params: &[],
                proxied: true,
            },
            MethodSignature {
                name: "to_display_string",
                params: &[],
                proxied: true,
            },
        ],
        supers: &[],
        symbols: &[Self::EQUALS_METHOD, Self::HASH_CODE_METHOD, Self::TO_DISPLAY_STRING_METHOD],
    };

    pub const EQUALS_METHOD: SymbolicMethod = SymbolicMethod::from_static("equals", &["Value"]);
    pub const EQUALS_INVOKABLE: InvokableMethod = InvokableMethod::new(|receiver, args| {
        check_arity("equals", args, 1)?;
        let other = Value::from_value(&args[0])?;
        Ok(receiver.as_compiler_object().equals(&other)?.to_value())
    });

    pub const HASH_CODE_METHOD: SymbolicMethod = SymbolicMethod::from_static("hash_code", &[]);
    pub const HASH_CODE_INVOKABLE: InvokableMethod = InvokableMethod::new(|receiver, args| {
        check_arity("hash_code", args, 0)?;
        Ok(receiver.as_compiler_object().hash_code()?.to_value())
    });

    pub const TO_DISPLAY_STRING_METHOD: SymbolicMethod = SymbolicMethod::from_static("to_display_string", &[]);
    pub const TO_DISPLAY_STRING_INVOKABLE: InvokableMethod = InvokableMethod::new(|receiver, args| {
        check_arity("to_display_string", args, 0)?;
        Ok(receiver.as_compiler_object().to_display_string()?.to_value())
    });
}

macro_rules! meta_objects {
    ($($variant:ident => $as_ref:ident, $to_arc:ident $([$($sub:ident),*])?;)*) => {
        /// A compiler-interface object of one of the closed set of kinds.
        ///
        /// Equality is object identity.
        #[derive(Clone)]
        pub enum MetaObject {
            $($variant(Arc<dyn $variant>),)*
        }

        impl MetaObject {
            /// Interface kind of this object
            pub fn kind(&self) -> InterfaceKind {
                match self {
                    $(MetaObject::$variant(_) => InterfaceKind::$variant,)*
                }
            }

            pub fn as_compiler_object(&self) -> &dyn CompilerObject {
                match self {
                    $(MetaObject::$variant(object) => &**object,)*
                }
            }

            $(
                pub fn $as_ref(&self) -> Option<&dyn $variant> {
                    match self {
                        MetaObject::$variant(object) => Some(&**object),
                        $($(MetaObject::$sub(object) => Some(&**object as &dyn $variant),)*)?
                        _ => None,
                    }
                }

                pub fn $to_arc(&self) -> Option<Arc<dyn $variant>> {
                    match self {
                        MetaObject::$variant(object) => Some(object.clone()),
                        $($(MetaObject::$sub(object) => Some(object.clone() as Arc<dyn $variant>),)*)?
                        _ => None,
                    }
                }
            )*
        }

        $(
            impl From<Arc<dyn $variant>> for MetaObject {
                fn from(object: Arc<dyn $variant>) -> Self {
                    MetaObject::$variant(object)
                }
            }

            impl ToValue for Arc<dyn $variant> {
                fn to_value(&self) -> Value {
                    Value::Object(MetaObject::$variant(self.clone()))
                }
            }

            impl FromValue for Arc<dyn $variant> {
                fn from_value(value: &Value) -> CiResult<Self> {
                    match value {
                        Value::Object(object) => object
                            .$to_arc()
                            .ok_or_else(|| crate::meta::value::mismatch(stringify!($variant), value)),
                        _ => Err(crate::meta::value::mismatch(stringify!($variant), value)),
                    }
                }
            }
        )*
    };
}

meta_objects! {
    VmConfigAccess => as_vm_config_access, vm_config_access;
    MetaAccessProvider => as_meta_access_provider, meta_access_provider;
    ConstantReflectionProvider => as_constant_reflection_provider, constant_reflection_provider;
    MethodHandleAccessProvider => as_method_handle_access_provider, method_handle_access_provider;
    MemoryAccessProvider => as_memory_access_provider, memory_access_provider;
    CodeCacheProvider => as_code_cache_provider, code_cache_provider;
    CompilerProfiler => as_compiler_profiler, compiler_profiler;
    ResolvedPrimitiveType => as_resolved_primitive_type, resolved_primitive_type;
    ResolvedObjectType => as_resolved_object_type, resolved_object_type;
    ResolvedJavaMethod => as_resolved_java_method, resolved_java_method;
    ResolvedJavaField => as_resolved_java_field, resolved_java_field;
    Signature => as_signature, signature;
    ConstantPool => as_constant_pool, constant_pool;
    ProfilingInfo => as_profiling_info, profiling_info [VmProfilingInfo];
    VmProfilingInfo => as_vm_profiling_info, vm_profiling_info;
    SpeculationLog => as_speculation_log, speculation_log;
    ObjectConstant => as_object_constant, object_constant;
    MetaspaceConstant => as_metaspace_constant, metaspace_constant;
    InstalledCode => as_installed_code, installed_code;
    TrustPredicate => as_trust_predicate, trust_predicate;
}

impl MetaObject {
    /// Receiver view for operations of the resolved type family
    pub fn as_resolved_java_type(&self) -> Option<&dyn ResolvedJavaType> {
        match self {
            MetaObject::ResolvedObjectType(object) => Some(&**object as &dyn ResolvedJavaType),
            MetaObject::ResolvedPrimitiveType(object) => Some(&**object as &dyn ResolvedJavaType),
            _ => None,
        }
    }

    pub fn java_type(&self) -> Option<JavaTypeRef> {
        match self {
            MetaObject::ResolvedObjectType(object) => Some(JavaTypeRef::Object(object.clone())),
            MetaObject::ResolvedPrimitiveType(object) => Some(JavaTypeRef::Primitive(object.clone())),
            _ => None,
        }
    }

    /// Receiver view for operations of the constant family
    pub fn as_constant(&self) -> Option<&dyn Constant> {
        match self {
            MetaObject::ObjectConstant(object) => Some(&**object as &dyn Constant),
            MetaObject::MetaspaceConstant(object) => Some(&**object as &dyn Constant),
            _ => None,
        }
    }

    /// Proxy view for the resolved type family
    pub fn as_resolved_java_type_proxy(&self) -> Option<&dyn ResolvedJavaTypeProxy> {
        self.as_compiler_object().as_compilation_proxy()?.as_resolved_java_type_proxy()
    }

    /// Proxy view for the constant family
    pub fn as_constant_proxy(&self) -> Option<&dyn ConstantProxy> {
        self.as_compiler_object().as_compilation_proxy()?.as_constant_proxy()
    }

    pub fn is_proxy(&self) -> bool {
        self.as_compiler_object().as_compilation_proxy().is_some()
    }

    /// The real object behind this one.
    ///
    /// Real objects answer themselves. Proxies ask their handler, which may
    /// not know a local object and answer `None`.
    pub fn unproxify(&self) -> CiResult<Option<MetaObject>> {
        match self.as_compiler_object().as_compilation_proxy() {
            Some(proxy) => proxy.unproxify(),
            None => Ok(Some(self.clone())),
        }
    }

    fn address(&self) -> *const () {
        (self.as_compiler_object() as *const dyn CompilerObject).cast::<()>()
    }
}

impl PartialEq for MetaObject {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl fmt::Debug for MetaObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_proxy() { "Proxy" } else { "" };
        write!(f, "{}{}@{:p}", self.kind().name(), marker, self.address())
    }
}
