//! Compiler-interface surface
//!
//! The closed set of interfaces the compiler queries while compiling, the
//! plain data records they exchange, and the boxed value model used to carry
//! arguments and results across the interception boundary:
//!
//! - [`CompilerObject`]: base of every interface (identity operations)
//! - [`MetaObject`]: sum type over the closed interface set
//! - [`Value`]: boxed argument/result, with [`ToValue`] / [`FromValue`]
//! - one trait per interface, each annotated with `#[compilation_proxy]`

pub mod code;
pub mod constant;
pub mod constant_pool;
pub mod data;
pub mod field;
pub mod method;
pub mod object;
pub mod profiler;
pub mod profiling;
pub mod providers;
pub mod signature;
pub mod speculation;
pub mod types;
pub mod value;

pub use code::{CodeCacheProvider, CodeCacheProviderMethods, InstalledCode, InstalledCodeMethods};
pub use constant::{
    Constant, ConstantMethods, JavaConstant, MetaspaceConstant, MetaspaceConstantMethods, ObjectConstant,
    ObjectConstantMethods, PrimitiveConstant,
};
pub use constant_pool::{ConstantPool, ConstantPoolMethods};
pub use data::{
    modifiers, CompiledCode, DeoptimizationAction, DeoptimizationReason, ExceptionHandler, JavaKind,
    JavaMethodProfile, JavaTypeProfile, LineNumberTable, MethodHandleIntrinsic, ProfiledMethod, ProfiledType,
    Speculation, SpeculationReason, StackTraceElement, TriState,
};
pub use field::{ResolvedJavaField, ResolvedJavaFieldMethods};
pub use method::{ResolvedJavaMethod, ResolvedJavaMethodMethods};
pub use object::{CompilerObject, CompilerObjectMethods, MetaObject};
pub use profiler::{CompilerProfiler, CompilerProfilerMethods};
pub use profiling::{ProfilingInfo, ProfilingInfoMethods, VmProfilingInfo, VmProfilingInfoMethods};
pub use providers::{
    ConstantReflectionProvider, ConstantReflectionProviderMethods, MemoryAccessProvider,
    MemoryAccessProviderMethods, MetaAccessProvider, MetaAccessProviderMethods, MethodHandleAccessProvider,
    MethodHandleAccessProviderMethods, TrustPredicate, TrustPredicateMethods, VmConfigAccess,
    VmConfigAccessMethods,
};
pub use signature::{Signature, SignatureMethods};
pub use speculation::{SpeculationLog, SpeculationLogMethods};
pub use types::{
    JavaTypeRef, ResolvedJavaType, ResolvedJavaTypeMethods, ResolvedObjectType, ResolvedObjectTypeMethods,
    ResolvedPrimitiveType, ResolvedPrimitiveTypeMethods,
};
pub use value::{FromValue, ToValue, Value};
