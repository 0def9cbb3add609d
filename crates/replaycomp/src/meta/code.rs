//! Code cache and installed code

use std::sync::Arc;

use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::{CompiledCode, CompilerObject, CompilerObjectMethods, ResolvedJavaMethod};
use crate::proxy::{CodeCacheProviderProxy, InstalledCodeProxy};

#[compilation_proxy(receiver = as_code_cache_provider, proxies(CodeCacheProviderProxy))]
pub trait CodeCacheProvider: CompilerObject {
    /// Installs compiled code, for `method` or as a stub when `method` is `None`
    fn install_code(
        &self,
        method: Option<Arc<dyn ResolvedJavaMethod>>,
        compiled_code: &CompiledCode,
        installed_code: Option<Arc<dyn InstalledCode>>,
        is_default: bool,
    ) -> CiResult<Arc<dyn InstalledCode>>;
    fn invalidate_installed_code(&self, code: &Arc<dyn InstalledCode>) -> CiResult<()>;
    fn interpreter_frame_size(&self, method: &Arc<dyn ResolvedJavaMethod>, bci: i32) -> CiResult<i32>;
    fn get_max_call_target_offset(&self, address: i64) -> CiResult<i64>;
    fn should_debug_non_safepoints(&self) -> CiResult<bool>;
    fn disassemble(&self, code: &Arc<dyn InstalledCode>) -> CiResult<Option<String>>;
    fn get_target_architecture(&self) -> CiResult<String>;
}

/// Machine code installed in the code cache
#[compilation_proxy(receiver = as_installed_code, proxies(InstalledCodeProxy))]
pub trait InstalledCode: CompilerObject {
    fn get_name(&self) -> CiResult<String>;
    fn get_start(&self) -> CiResult<i64>;
    fn get_address(&self) -> CiResult<i64>;
    fn is_valid(&self) -> CiResult<bool>;
    fn is_alive(&self) -> CiResult<bool>;
    fn invalidate(&self, deoptimize: bool) -> CiResult<()>;
    fn get_code(&self) -> CiResult<Option<Vec<u8>>>;
}
