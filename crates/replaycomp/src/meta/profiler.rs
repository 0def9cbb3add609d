use std::sync::Arc;

use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::{CompilerObject, CompilerObjectMethods, ResolvedJavaMethod};
use crate::proxy::CompilerProfilerProxy;

/// Receives compiler phase and inlining events
#[compilation_proxy(receiver = as_compiler_profiler, proxies(CompilerProfilerProxy))]
pub trait CompilerProfiler: CompilerObject {
    fn get_ticks(&self, event_kind: &str) -> CiResult<i64>;
    fn notify_compiler_phase_event(
        &self,
        compile_id: i32,
        time: i64,
        phase_name: &str,
        nesting_level: i32,
    ) -> CiResult<()>;
    fn notify_compiler_inlining_event(
        &self,
        compile_id: i32,
        caller: &Arc<dyn ResolvedJavaMethod>,
        callee: &Arc<dyn ResolvedJavaMethod>,
        succeeded: bool,
        message: &str,
        bci: i32,
    ) -> CiResult<()>;
}
