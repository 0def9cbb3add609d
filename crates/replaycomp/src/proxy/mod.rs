//! Interception core
//!
//! Every operation of a proxy packs itself as
//! `(SymbolicMethod, NormalizedInvokable, arguments)` and goes through
//! [`dispatch::handle`] to the proxy's [`InvocationHandler`]:
//!
//! ```text
//! caller -> XProxy::op(args)
//!        -> dispatch::handle(proxy, OP_METHOD, OP_INVOKABLE.wrap_invocation_failures(), args)
//!        -> handler.handle(proxy, method, invokable, args)
//!             forward:    invokable.invoke(real_object, args)
//!             substitute: recorded value
//!             fail:       error
//!        <- failure normalization <- FromValue
//! ```
//!
//! No operation is resolved at runtime by name: every symbolic method is
//! paired at build time with a function pointer performing the real call.

pub mod base;
pub mod descriptor;
pub mod dispatch;
pub mod factory;
pub mod handler;
pub mod invokable;
pub mod proxies;
pub mod symbolic;

pub use base::{CompilationProxy, CompilationProxyMethods};
pub use descriptor::{InterfaceDescriptor, MethodSignature};
pub use factory::{create_proxy, create_proxy_by_name, verify_declarations, InterfaceKind};
pub use handler::InvocationHandler;
pub use invokable::{InvokableMethod, InvokeFn, NormalizedInvokable};
pub use proxies::{
    CodeCacheProviderProxy, CompilerProfilerProxy, ConstantProxy, ConstantPoolProxy,
    ConstantReflectionProviderProxy, InstalledCodeProxy, MemoryAccessProviderProxy, MetaAccessProviderProxy,
    MetaspaceConstantProxy, MethodHandleAccessProviderProxy, ObjectConstantProxy, ProfilingInfoProxy,
    ResolvedJavaFieldProxy, ResolvedJavaMethodProxy, ResolvedJavaTypeProxy, ResolvedObjectTypeProxy,
    ResolvedPrimitiveTypeProxy, SignatureProxy, SpeculationLogProxy, TrustPredicateProxy, VmConfigAccessProxy,
    VmProfilingInfoProxy,
};
pub use symbolic::SymbolicMethod;
