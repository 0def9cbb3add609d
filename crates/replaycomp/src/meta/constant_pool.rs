use std::sync::Arc;

use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::{
    CompilerObject, CompilerObjectMethods, JavaConstant, JavaTypeRef, ResolvedJavaField, ResolvedJavaMethod, Signature,
};
use crate::proxy::ConstantPoolProxy;

/// Symbolic references of a class, indexed by constant pool index (`cpi`)
#[compilation_proxy(receiver = as_constant_pool, proxies(ConstantPoolProxy))]
pub trait ConstantPool: CompilerObject {
    fn length(&self) -> CiResult<i32>;
    fn load_referenced_type(&self, cpi: i32, opcode: i32, initialize: bool) -> CiResult<()>;
    fn lookup_type(&self, cpi: i32, opcode: i32) -> CiResult<Option<JavaTypeRef>>;
    fn lookup_method(
        &self,
        cpi: i32,
        opcode: i32,
        caller: Option<Arc<dyn ResolvedJavaMethod>>,
    ) -> CiResult<Option<Arc<dyn ResolvedJavaMethod>>>;
    fn lookup_field(
        &self,
        cpi: i32,
        method: &Arc<dyn ResolvedJavaMethod>,
        opcode: i32,
    ) -> CiResult<Option<Arc<dyn ResolvedJavaField>>>;
    fn lookup_constant(&self, cpi: i32, resolve: bool) -> CiResult<Option<JavaConstant>>;
    fn lookup_utf8(&self, cpi: i32) -> CiResult<String>;
    fn lookup_signature(&self, cpi: i32) -> CiResult<Arc<dyn Signature>>;
}
