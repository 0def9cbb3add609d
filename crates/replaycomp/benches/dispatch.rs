use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use replaycomp::meta::{CompilerObject, JavaKind, Signature, SignatureMethods};
use replaycomp::{
    create_proxy, CiResult, CompilationProxy, ForwardingHandler, InterfaceKind, InvocationHandler, JavaTypeRef,
    MetaObject, NormalizedInvokable, RecordingConfig, RecordingHandler, SymbolicMethod, Value,
};

struct Descriptor;

impl CompilerObject for Descriptor {}

impl Signature for Descriptor {
    fn get_parameter_count(&self, receiver: bool) -> CiResult<i32> {
        Ok(if receiver { 3 } else { 2 })
    }
    fn get_parameter_type(&self, _index: i32, _accessing_class: Option<JavaTypeRef>) -> CiResult<Option<JavaTypeRef>> {
        Ok(None)
    }
    fn get_parameter_kind(&self, _index: i32) -> CiResult<JavaKind> {
        Ok(JavaKind::Int)
    }
    fn get_return_type(&self, _accessing_class: Option<JavaTypeRef>) -> CiResult<Option<JavaTypeRef>> {
        Ok(None)
    }
    fn get_return_kind(&self) -> CiResult<JavaKind> {
        Ok(JavaKind::Void)
    }
    fn to_method_descriptor(&self) -> CiResult<String> {
        Ok("(II)V".to_string())
    }
}

struct Constant;

impl InvocationHandler for Constant {
    fn handle(
        &self,
        _proxy: &dyn CompilationProxy,
        _method: &SymbolicMethod,
        _invokable: NormalizedInvokable,
        _args: Option<&[Value]>,
    ) -> CiResult<Value> {
        Ok(Value::Int(2))
    }
}

fn real() -> MetaObject {
    MetaObject::Signature(Arc::new(Descriptor))
}

fn bench_direct(c: &mut Criterion) {
    let object = real();
    let signature = object.as_signature().unwrap();

    c.bench_function("direct_call", |b| {
        b.iter(|| signature.get_parameter_count(black_box(false)).unwrap());
    });

    c.bench_function("invokable_call", |b| {
        let args = [Value::Bool(false)];
        b.iter(|| {
            SignatureMethods::GET_PARAMETER_COUNT_INVOKABLE
                .invoke(&object, black_box(&args))
                .unwrap()
        });
    });
}

fn bench_proxied(c: &mut Criterion) {
    let mut group = c.benchmark_group("proxied");

    let constant = create_proxy(InterfaceKind::Signature, Arc::new(Constant));
    group.bench_with_input(BenchmarkId::new("get_parameter_count", "constant"), &constant, |b, proxy| {
        let signature = proxy.as_signature().unwrap();
        b.iter(|| signature.get_parameter_count(black_box(false)).unwrap());
    });

    let forwarding = ForwardingHandler::proxy_for(real());
    group.bench_with_input(BenchmarkId::new("get_parameter_count", "forwarding"), &forwarding, |b, proxy| {
        let signature = proxy.as_signature().unwrap();
        b.iter(|| signature.get_parameter_count(black_box(false)).unwrap());
    });

    let config = RecordingConfig {
        record_arguments: true,
        max_calls: 0,
    };
    let recording = create_proxy(
        InterfaceKind::Signature,
        Arc::new(RecordingHandler::with_config(ForwardingHandler::new(real()), config)),
    );
    group.bench_with_input(BenchmarkId::new("get_parameter_count", "recording"), &recording, |b, proxy| {
        let signature = proxy.as_signature().unwrap();
        b.iter(|| signature.get_parameter_count(black_box(false)).unwrap());
    });

    group.finish();
}

fn bench_symbolic(c: &mut Criterion) {
    c.bench_function("symbolic_verified", |b| {
        b.iter(|| {
            InterfaceKind::Signature
                .lookup_method(black_box("get_parameter_count"), &["bool"])
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_direct, bench_proxied, bench_symbolic);
criterion_main!(benches);
