//! Dispatch and rebinding throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rebind_core::{arg, ContractDescriptor, MethodDecl, ParamKind, Value};
use rebind_registry::{Callable, ContractRegistry, TypeCatalog};

fn setup() -> (
    std::sync::Arc<ContractRegistry>,
    rebind_registry::DispatchProxy,
    rebind_core::MethodSignature,
) {
    let int2 = vec![ParamKind::Integer, ParamKind::Integer];
    let contract = ContractDescriptor::interface("Calculator")
        .method(MethodDecl::new("add", int2.clone()).returns(ParamKind::Integer));
    let (registry, proxy) =
        ContractRegistry::create(contract, TypeCatalog::shared()).expect("valid contract");
    let add = registry.signature("add", &int2).expect("declared");
    registry
        .bind_static(
            &add,
            Callable::function(|args| {
                Ok(Value::Int(arg::<i64>(args, 0)? + arg::<i64>(args, 1)?))
            }),
        )
        .expect("bind");
    (registry, proxy, add)
}

fn bench_dispatch(c: &mut Criterion) {
    let (_registry, proxy, add) = setup();
    let args = [Value::Int(2), Value::Int(3)];

    c.bench_function("dispatch_bound", |b| {
        b.iter(|| proxy.dispatch(black_box(&add), black_box(&args)))
    });
    c.bench_function("call_by_name", |b| {
        b.iter(|| proxy.call(black_box("add"), black_box(&args)))
    });
}

fn bench_rebind(c: &mut Criterion) {
    let (registry, _proxy, add) = setup();
    let target = Callable::function(|_| Ok(Value::Int(0)));

    c.bench_function("bind_static", |b| {
        b.iter(|| registry.bind_static(black_box(&add), target.clone()))
    });
}

criterion_group!(benches, bench_dispatch, bench_rebind);
criterion_main!(benches);
