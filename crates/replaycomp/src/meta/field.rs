use std::sync::Arc;

use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::data::modifiers;
use crate::meta::{CompilerObject, CompilerObjectMethods, JavaConstant, JavaTypeRef, ResolvedObjectType};
use crate::proxy::ResolvedJavaFieldProxy;

/// A resolved field of a class
#[compilation_proxy(receiver = as_resolved_java_field, proxies(ResolvedJavaFieldProxy))]
pub trait ResolvedJavaField: CompilerObject {
    fn get_name(&self) -> CiResult<String>;
    fn get_type(&self) -> CiResult<JavaTypeRef>;
    /// Byte offset of the field within its holder
    fn get_offset(&self) -> CiResult<i32>;
    fn get_modifiers(&self) -> CiResult<i32>;
    fn is_internal(&self) -> CiResult<bool>;
    fn is_synthetic(&self) -> CiResult<bool>;
    fn is_stable(&self) -> CiResult<bool>;
    fn get_declaring_class(&self) -> CiResult<Arc<dyn ResolvedObjectType>>;
    fn get_constant_value(&self) -> CiResult<Option<JavaConstant>>;

    fn is_static(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::STATIC))
    }

    fn is_final(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::FINAL))
    }

    fn is_volatile(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::VOLATILE))
    }
}
