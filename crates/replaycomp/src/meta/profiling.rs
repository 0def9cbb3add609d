//! Profiling information
//!
//! `VmProfilingInfo` extends the portable profile with counters specific to
//! the host VM. Both are proxyable kinds of their own.

use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::{
    CompilerObject, CompilerObjectMethods, DeoptimizationReason, JavaMethodProfile, JavaTypeProfile, TriState,
};
use crate::proxy::{ProfilingInfoProxy, VmProfilingInfoProxy};

#[compilation_proxy(receiver = as_profiling_info, proxies(ProfilingInfoProxy, VmProfilingInfoProxy))]
pub trait ProfilingInfo: CompilerObject {
    fn get_code_size(&self) -> CiResult<i32>;
    fn get_branch_taken_probability(&self, bci: i32) -> CiResult<f64>;
    fn get_switch_probabilities(&self, bci: i32) -> CiResult<Option<Vec<f64>>>;
    fn get_type_profile(&self, bci: i32) -> CiResult<Option<JavaTypeProfile>>;
    fn get_method_profile(&self, bci: i32) -> CiResult<Option<JavaMethodProfile>>;
    fn get_exception_seen(&self, bci: i32) -> CiResult<TriState>;
    fn get_null_seen(&self, bci: i32) -> CiResult<TriState>;
    /// Execution count at `bci`, or -1 if unknown
    fn get_execution_count(&self, bci: i32) -> CiResult<i32>;
    fn get_deoptimization_count(&self, reason: DeoptimizationReason) -> CiResult<i32>;
    fn set_compiler_ir_size(&self, ir_type: &str, size: i32) -> CiResult<bool>;
    fn get_compiler_ir_size(&self, ir_type: &str) -> CiResult<i32>;
    fn is_mature(&self) -> CiResult<bool>;
    fn set_mature(&self) -> CiResult<()>;

    fn is_exception_seen(&self, bci: i32) -> CiResult<bool> {
        Ok(self.get_exception_seen(bci)? == TriState::True)
    }
}

#[compilation_proxy(receiver = as_vm_profiling_info, proxies(VmProfilingInfoProxy))]
pub trait VmProfilingInfo: ProfilingInfo {
    fn get_decompile_count(&self) -> CiResult<i32>;
    fn get_overflow_recompile_count(&self) -> CiResult<i32>;
    fn get_overflow_trap_count(&self) -> CiResult<i32>;
}
