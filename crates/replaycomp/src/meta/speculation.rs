use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::{CompilerObject, CompilerObjectMethods, JavaConstant, Speculation, SpeculationReason};
use crate::proxy::SpeculationLogProxy;

/// Speculations made by compiled code and the ones that failed
#[compilation_proxy(receiver = as_speculation_log, proxies(SpeculationLogProxy))]
pub trait SpeculationLog: CompilerObject {
    fn collect_failed_speculations(&self) -> CiResult<()>;
    fn may_speculate(&self, reason: &SpeculationReason) -> CiResult<bool>;
    fn speculate(&self, reason: &SpeculationReason) -> CiResult<Speculation>;
    fn has_speculations(&self) -> CiResult<bool>;
    fn lookup_speculation(&self, constant: &JavaConstant) -> CiResult<Speculation>;
}
