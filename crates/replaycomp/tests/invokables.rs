//! Generated invokables against direct calls on real objects

use std::sync::Arc;

use replaycomp::meta::{
    CompilerObject, CompilerObjectMethods, DeoptimizationReason, JavaKind, JavaMethodProfile, JavaTypeProfile,
    ProfilingInfo, ProfilingInfoMethods, TriState, VmProfilingInfo, VmProfilingInfoMethods,
};
use replaycomp::proxy::{CompilationProxyMethods, InterfaceDescriptor};
use replaycomp::{verify_declarations, CiError, CiResult, InterfaceKind, MetaObject, RuntimeErrorKind, SymbolicMethod, Value};

struct Profile {
    mature: parking_lot::Mutex<bool>,
}

impl Profile {
    fn object() -> MetaObject {
        MetaObject::VmProfilingInfo(Arc::new(Profile {
            mature: parking_lot::Mutex::new(false),
        }))
    }
}

impl CompilerObject for Profile {}

impl ProfilingInfo for Profile {
    fn get_code_size(&self) -> CiResult<i32> {
        Ok(42)
    }
    fn get_branch_taken_probability(&self, bci: i32) -> CiResult<f64> {
        if bci < 0 {
            return Err(CiError::runtime(RuntimeErrorKind::IndexOutOfBounds, format!("bci {}", bci)));
        }
        Ok(0.25)
    }
    fn get_switch_probabilities(&self, _bci: i32) -> CiResult<Option<Vec<f64>>> {
        Ok(Some(vec![0.5, 0.5]))
    }
    fn get_type_profile(&self, _bci: i32) -> CiResult<Option<JavaTypeProfile>> {
        Ok(None)
    }
    fn get_method_profile(&self, _bci: i32) -> CiResult<Option<JavaMethodProfile>> {
        Ok(None)
    }
    fn get_exception_seen(&self, _bci: i32) -> CiResult<TriState> {
        Ok(TriState::True)
    }
    fn get_null_seen(&self, _bci: i32) -> CiResult<TriState> {
        Ok(TriState::False)
    }
    fn get_execution_count(&self, bci: i32) -> CiResult<i32> {
        Ok(bci * 10)
    }
    fn get_deoptimization_count(&self, _reason: DeoptimizationReason) -> CiResult<i32> {
        Ok(1)
    }
    fn set_compiler_ir_size(&self, _ir_type: &str, _size: i32) -> CiResult<bool> {
        Ok(true)
    }
    fn get_compiler_ir_size(&self, ir_type: &str) -> CiResult<i32> {
        Ok(ir_type.len() as i32)
    }
    fn is_mature(&self) -> CiResult<bool> {
        Ok(*self.mature.lock())
    }
    fn set_mature(&self) -> CiResult<()> {
        *self.mature.lock() = true;
        Ok(())
    }
}

impl VmProfilingInfo for Profile {
    fn get_decompile_count(&self) -> CiResult<i32> {
        Ok(2)
    }
    fn get_overflow_recompile_count(&self) -> CiResult<i32> {
        Ok(0)
    }
    fn get_overflow_trap_count(&self) -> CiResult<i32> {
        Ok(5)
    }
}

#[test]
fn test_invokables_match_direct_calls() {
    let real = Profile::object();
    let direct = real.as_profiling_info().unwrap();

    let size = ProfilingInfoMethods::GET_CODE_SIZE_INVOKABLE.invoke(&real, &[]).unwrap();
    assert_eq!(size, Value::Int(direct.get_code_size().unwrap()));

    let count = ProfilingInfoMethods::GET_EXECUTION_COUNT_INVOKABLE
        .invoke(&real, &[Value::Int(3)])
        .unwrap();
    assert_eq!(count, Value::Int(direct.get_execution_count(3).unwrap()));

    let switches = ProfilingInfoMethods::GET_SWITCH_PROBABILITIES_INVOKABLE
        .invoke(&real, &[Value::Int(0)])
        .unwrap();
    assert_eq!(switches, Value::Array(vec![Value::Double(0.5), Value::Double(0.5)]));

    let ir = ProfilingInfoMethods::GET_COMPILER_IR_SIZE_INVOKABLE
        .invoke(&real, &[Value::String("graal".into())])
        .unwrap();
    assert_eq!(ir, Value::Int(5));

    let seen = ProfilingInfoMethods::GET_EXCEPTION_SEEN_INVOKABLE
        .invoke(&real, &[Value::Int(1)])
        .unwrap();
    assert_eq!(seen, Value::TriState(TriState::True));

    let traps = VmProfilingInfoMethods::GET_OVERFLOW_TRAP_COUNT_INVOKABLE.invoke(&real, &[]).unwrap();
    assert_eq!(traps, Value::Int(5));
}

#[test]
fn test_invokable_side_effects_reach_receiver() {
    let real = Profile::object();
    assert_eq!(
        ProfilingInfoMethods::SET_MATURE_INVOKABLE.invoke(&real, &[]).unwrap(),
        Value::Null
    );
    assert!(real.as_profiling_info().unwrap().is_mature().unwrap());
}

#[test]
fn test_invokable_argument_checks() {
    let real = Profile::object();

    let err = ProfilingInfoMethods::GET_EXECUTION_COUNT_INVOKABLE.invoke(&real, &[]).unwrap_err();
    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::IllegalArgument));

    let err = ProfilingInfoMethods::GET_EXECUTION_COUNT_INVOKABLE
        .invoke(&real, &[Value::Bool(true)])
        .unwrap_err();
    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::ClassCast));

    let field_receiver = replaycomp::create_proxy(
        InterfaceKind::ResolvedJavaField,
        Arc::new(replaycomp::ForwardingHandler::new(real.clone())),
    );
    let err = VmProfilingInfoMethods::GET_DECOMPILE_COUNT_INVOKABLE
        .invoke(&field_receiver, &[])
        .unwrap_err();
    assert_eq!(err.runtime_kind(), Some(RuntimeErrorKind::ClassCast));
    assert!(err.to_string().contains("ResolvedJavaField cannot be cast to VmProfilingInfo"));
}

#[test]
fn test_normalized_invokable_wraps_failures() {
    let real = Profile::object();
    let normalized = ProfilingInfoMethods::GET_BRANCH_TAKEN_PROBABILITY_INVOKABLE.wrap_invocation_failures();

    assert_eq!(normalized.invoke(&real, Some(&[Value::Int(4)])).unwrap(), Value::Double(0.25));

    let err = normalized.invoke(&real, Some(&[Value::Int(-1)])).unwrap_err();
    assert!(matches!(&err, CiError::InvocationTarget(_)));
    assert_eq!(err.root_cause().runtime_kind(), Some(RuntimeErrorKind::IndexOutOfBounds));

    let err = normalized.invoke(&real, None).unwrap_err();
    assert!(matches!(&err, CiError::InvocationTarget(_)));
    assert_eq!(err.root_cause().runtime_kind(), Some(RuntimeErrorKind::IllegalArgument));
}

#[test]
fn test_identity_invokables_on_real_objects() {
    let real = Profile::object();
    let other = Profile::object();

    let equal = CompilerObjectMethods::EQUALS_INVOKABLE
        .invoke(&real, &[Value::Object(real.clone())])
        .unwrap();
    assert_eq!(equal, Value::Bool(true));
    let equal = CompilerObjectMethods::EQUALS_INVOKABLE
        .invoke(&real, &[Value::Object(other)])
        .unwrap();
    assert_eq!(equal, Value::Bool(false));

    let unwrapped = CompilationProxyMethods::UNPROXIFY_INVOKABLE.invoke(&real, &[]).unwrap();
    assert_eq!(unwrapped, Value::Object(real));
}

#[test]
fn test_symbolic_identities() {
    assert_eq!(
        ProfilingInfoMethods::GET_DEOPTIMIZATION_COUNT_METHOD,
        SymbolicMethod::new("get_deoptimization_count", ["DeoptimizationReason"])
    );
    assert_eq!(
        ProfilingInfoMethods::SET_COMPILER_IR_SIZE_METHOD,
        SymbolicMethod::new("set_compiler_ir_size", ["String", "i32"])
    );
    assert_eq!(
        ProfilingInfoMethods::SET_COMPILER_IR_SIZE_METHOD,
        SymbolicMethod::synthesize(
            "set_compiler_ir_size",
            &[std::any::type_name::<&str>(), std::any::type_name::<i32>()]
        )
    );

    let vm: &InterfaceDescriptor = InterfaceKind::VmProfilingInfo.descriptor();
    assert!(vm.declares(&ProfilingInfoMethods::GET_CODE_SIZE_METHOD));
    assert!(vm.declares(&CompilerObjectMethods::HASH_CODE_METHOD));
    assert!(!vm.declares(&SymbolicMethod::new("get_code_size", ["i32"])));
}

#[test]
fn test_declarations_verify() {
    let checked = verify_declarations().unwrap();
    let expected: usize = InterfaceKind::ALL
        .iter()
        .map(|kind| kind.descriptor().symbols.len())
        .sum();
    // Base interfaces and CompilerObject/CompilationProxy add their own
    assert!(checked > expected);
}

#[test]
fn test_data_through_values() {
    let kinds = vec![JavaKind::Int, JavaKind::Object];
    let value = replaycomp::ToValue::to_value(&kinds);
    let back: Vec<JavaKind> = replaycomp::FromValue::from_value(&value).unwrap();
    assert_eq!(back, kinds);
}
