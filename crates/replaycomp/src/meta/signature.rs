use replaycomp_macros::compilation_proxy;

use crate::error::CiResult;
use crate::meta::{CompilerObject, CompilerObjectMethods, JavaKind, JavaTypeRef};
use crate::proxy::SignatureProxy;

/// Parameter and return types of a method
#[compilation_proxy(receiver = as_signature, proxies(SignatureProxy))]
pub trait Signature: CompilerObject {
    /// Number of parameters, counting the receiver if `receiver` is set
    fn get_parameter_count(&self, receiver: bool) -> CiResult<i32>;
    /// Resolved type of parameter `index`, `None` if it is unresolved
    fn get_parameter_type(&self, index: i32, accessing_class: Option<JavaTypeRef>) -> CiResult<Option<JavaTypeRef>>;
    fn get_parameter_kind(&self, index: i32) -> CiResult<JavaKind>;
    fn get_return_type(&self, accessing_class: Option<JavaTypeRef>) -> CiResult<Option<JavaTypeRef>>;
    fn get_return_kind(&self) -> CiResult<JavaKind>;
    fn to_method_descriptor(&self) -> CiResult<String>;

    fn get_parameter_kinds(&self) -> CiResult<Vec<JavaKind>> {
        (0..self.get_parameter_count(false)?)
            .map(|index| self.get_parameter_kind(index))
            .collect()
    }

    /// Stack slots taken by the parameters
    fn get_parameter_slots(&self, with_receiver: bool) -> CiResult<i32> {
        let mut slots = if with_receiver { 1 } else { 0 };
        for kind in self.get_parameter_kinds()? {
            slots += kind.slot_count();
        }
        Ok(slots)
    }
}
