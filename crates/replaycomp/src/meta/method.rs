use std::sync::Arc;

use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::data::modifiers;
use crate::meta::{
    CompilerObject, CompilerObjectMethods, ConstantPool, ExceptionHandler, JavaConstant, JavaTypeRef, LineNumberTable,
    ProfilingInfo, ResolvedObjectType, Signature, SpeculationLog, StackTraceElement,
};
use crate::proxy::ResolvedJavaMethodProxy;

/// A resolved method or constructor
#[compilation_proxy(receiver = as_resolved_java_method, proxies(ResolvedJavaMethodProxy))]
pub trait ResolvedJavaMethod: CompilerObject {
    fn get_name(&self) -> CiResult<String>;
    fn get_signature(&self) -> CiResult<Arc<dyn Signature>>;
    fn get_declaring_class(&self) -> CiResult<Arc<dyn ResolvedObjectType>>;
    fn get_modifiers(&self) -> CiResult<i32>;
    /// Bytecode of the method, `None` if it has none
    fn get_code(&self) -> CiResult<Option<Vec<u8>>>;
    fn get_code_size(&self) -> CiResult<i32>;
    fn get_max_locals(&self) -> CiResult<i32>;
    fn get_max_stack_size(&self) -> CiResult<i32>;
    fn is_constructor(&self) -> CiResult<bool>;
    fn is_class_initializer(&self) -> CiResult<bool>;
    fn is_synthetic(&self) -> CiResult<bool>;
    fn is_default(&self) -> CiResult<bool>;
    fn can_be_statically_bound(&self) -> CiResult<bool>;
    fn can_be_inlined(&self) -> CiResult<bool>;
    fn has_never_inline_directive(&self) -> CiResult<bool>;
    fn get_exception_handlers(&self) -> CiResult<Vec<ExceptionHandler>>;
    fn as_stack_trace_element(&self, bci: i32) -> CiResult<Option<StackTraceElement>>;
    fn get_profiling_info(&self, include_normal: bool, include_osr: bool) -> CiResult<Option<Arc<dyn ProfilingInfo>>>;
    fn get_constant_pool(&self) -> CiResult<Arc<dyn ConstantPool>>;
    fn get_line_number_table(&self) -> CiResult<Option<LineNumberTable>>;
    fn is_in_virtual_method_table(&self, resolved: &JavaTypeRef) -> CiResult<bool>;
    fn vtable_entry_offset(&self, resolved: &JavaTypeRef) -> CiResult<i32>;
    fn intrinsic_id(&self) -> CiResult<i32>;
    fn has_code_at_level(&self, entry_bci: i32, level: i32) -> CiResult<bool>;
    fn get_encoding(&self) -> CiResult<JavaConstant>;
    fn get_speculation_log(&self) -> CiResult<Option<Arc<dyn SpeculationLog>>>;

    fn is_static(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::STATIC))
    }

    fn is_final(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::FINAL))
    }

    fn is_abstract(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::ABSTRACT))
    }

    fn is_native(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::NATIVE))
    }

    fn is_varargs(&self) -> CiResult<bool> {
        Ok(modifiers::has(self.get_modifiers()?, modifiers::VARARGS))
    }

    fn has_bytecodes(&self) -> CiResult<bool> {
        Ok(self.get_code_size()? > 0 && !self.is_abstract()? && !self.is_native()?)
    }

    /// Source line of `bci`, or -1 when unknown
    fn get_line_number(&self, bci: i32) -> CiResult<i32> {
        Ok(self
            .get_line_number_table()?
            .map(|table| table.get_line_number(bci))
            .unwrap_or(-1))
    }
}
