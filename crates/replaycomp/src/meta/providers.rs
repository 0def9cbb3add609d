//! Runtime-wide providers
//!
//! Singletons the compiler obtains once per compilation: VM configuration,
//! metadata lookup, constant reflection, method handle and raw memory
//! access, and the intrinsification trust predicate.

use std::sync::Arc;

use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::{
    CompilerObject, CompilerObjectMethods, DeoptimizationAction, DeoptimizationReason, JavaConstant, JavaKind,
    JavaTypeRef, MethodHandleIntrinsic, ResolvedJavaField, ResolvedJavaMethod, Speculation, SpeculationLog,
};
use crate::proxy::{
    ConstantReflectionProviderProxy, MemoryAccessProviderProxy, MetaAccessProviderProxy,
    MethodHandleAccessProviderProxy, TrustPredicateProxy, VmConfigAccessProxy,
};

/// Named VM configuration values
#[compilation_proxy(receiver = as_vm_config_access, proxies(VmConfigAccessProxy))]
pub trait VmConfigAccess: CompilerObject {
    fn get_field_offset(&self, name: &str) -> CiResult<i32>;
    fn get_field_address(&self, name: &str) -> CiResult<i64>;
    fn get_field_value(&self, name: &str) -> CiResult<Option<i64>>;
    fn get_constant(&self, name: &str) -> CiResult<Option<i64>>;
    fn get_address(&self, name: &str) -> CiResult<i64>;
    fn get_flag(&self, name: &str) -> CiResult<Option<i64>>;

    fn get_constant_or(&self, name: &str, default: i64) -> CiResult<i64> {
        Ok(self.get_constant(name)?.unwrap_or(default))
    }
}

/// Lookup of types and encoding of deoptimization metadata
#[compilation_proxy(receiver = as_meta_access_provider, proxies(MetaAccessProviderProxy))]
pub trait MetaAccessProvider: CompilerObject {
    /// Type with the given internal name
    fn lookup_java_type(&self, name: &str) -> CiResult<JavaTypeRef>;
    fn lookup_java_type_of_constant(&self, constant: &JavaConstant) -> CiResult<Option<JavaTypeRef>>;
    fn encode_deopt_action_and_reason(
        &self,
        action: DeoptimizationAction,
        reason: DeoptimizationReason,
        debug_id: i32,
    ) -> CiResult<JavaConstant>;
    fn decode_deopt_reason(&self, constant: &JavaConstant) -> CiResult<DeoptimizationReason>;
    fn decode_deopt_action(&self, constant: &JavaConstant) -> CiResult<DeoptimizationAction>;
    fn decode_debug_id(&self, constant: &JavaConstant) -> CiResult<i32>;
    fn encode_speculation(&self, speculation: &Speculation) -> CiResult<JavaConstant>;
    fn decode_speculation(&self, constant: &JavaConstant, log: &Arc<dyn SpeculationLog>) -> CiResult<Speculation>;
    fn get_array_base_offset(&self, kind: JavaKind) -> CiResult<i32>;
    fn get_array_index_scale(&self, kind: JavaKind) -> CiResult<i32>;
    fn get_memory_size(&self, constant: &JavaConstant) -> CiResult<i64>;
}

/// Reads of runtime constants
#[compilation_proxy(receiver = as_constant_reflection_provider, proxies(ConstantReflectionProviderProxy))]
pub trait ConstantReflectionProvider: CompilerObject {
    /// `None` when equality cannot be decided
    fn constant_equals(&self, x: &JavaConstant, y: &JavaConstant) -> CiResult<Option<bool>>;
    fn read_array_length(&self, array: &JavaConstant) -> CiResult<Option<i32>>;
    fn read_array_element(&self, array: &JavaConstant, index: i32) -> CiResult<Option<JavaConstant>>;
    fn read_field_value(
        &self,
        field: &Arc<dyn ResolvedJavaField>,
        receiver: &JavaConstant,
    ) -> CiResult<Option<JavaConstant>>;
    fn box_primitive(&self, source: &JavaConstant) -> CiResult<Option<JavaConstant>>;
    fn unbox_primitive(&self, source: &JavaConstant) -> CiResult<Option<JavaConstant>>;
    fn for_string(&self, value: &str) -> CiResult<JavaConstant>;
    fn as_java_type(&self, constant: &JavaConstant) -> CiResult<Option<JavaTypeRef>>;
    fn get_method_handle_access(&self) -> CiResult<Arc<dyn MethodHandleAccessProvider>>;
    fn get_memory_access_provider(&self) -> CiResult<Arc<dyn MemoryAccessProvider>>;
}

/// Method handle intrinsics and their targets
#[compilation_proxy(receiver = as_method_handle_access_provider, proxies(MethodHandleAccessProviderProxy))]
pub trait MethodHandleAccessProvider: CompilerObject {
    fn lookup_method_handle_intrinsic(
        &self,
        method: &Arc<dyn ResolvedJavaMethod>,
    ) -> CiResult<Option<MethodHandleIntrinsic>>;
    fn resolve_invoke_basic_target(
        &self,
        method_handle: &JavaConstant,
        force_bytecode_generation: bool,
    ) -> CiResult<Option<Arc<dyn ResolvedJavaMethod>>>;
    fn resolve_link_to_target(&self, member_name: &JavaConstant) -> CiResult<Option<Arc<dyn ResolvedJavaMethod>>>;
}

/// Raw reads relative to a base constant
#[compilation_proxy(receiver = as_memory_access_provider, proxies(MemoryAccessProviderProxy))]
pub trait MemoryAccessProvider: CompilerObject {
    fn read_primitive_constant(
        &self,
        kind: JavaKind,
        base: &JavaConstant,
        displacement: i64,
        bits: i32,
    ) -> CiResult<Option<JavaConstant>>;
    fn read_object_constant(&self, base: &JavaConstant, displacement: i64) -> CiResult<Option<JavaConstant>>;
    fn read_narrow_object_constant(&self, base: &JavaConstant, displacement: i64) -> CiResult<Option<JavaConstant>>;
    fn read_klass_pointer_constant(&self, base: &JavaConstant, displacement: i64) -> CiResult<Option<JavaConstant>>;
}

/// Decides which types may have their methods intrinsified
#[compilation_proxy(receiver = as_trust_predicate, proxies(TrustPredicateProxy))]
pub trait TrustPredicate: CompilerObject {
    fn test(&self, ty: &JavaTypeRef) -> CiResult<bool>;
}
