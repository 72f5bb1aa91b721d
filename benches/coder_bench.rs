use criterion::{black_box, criterion_group, criterion_main, Criterion};

use abicoder::prelude::*;

fn record_coder() -> Coder {
    get_coder(&Descriptor::new("tuple").with_components(vec![
        Descriptor::new("uint"),
        Descriptor::new("uint32[]").named("scores"),
        Descriptor::new("string").named("name"),
        Descriptor::new("bytes10").named("data"),
    ]))
    .unwrap()
}

fn record_value() -> Value {
    Value::Array(vec![
        Value::from(0x123),
        Value::Array((0..64).map(Value::from).collect()),
        Value::from("Hello, world!"),
        Value::bytes((0u8..10).collect::<Vec<_>>()),
    ])
}

fn resolve_bench(c: &mut Criterion) {
    c.bench_function("resolve_bench", |b| b.iter(|| black_box(record_coder())));
}

fn encode_bench(c: &mut Criterion) {
    let coder = record_coder();
    let value = record_value();
    c.bench_function("encode_bench", move |b| {
        b.iter(|| black_box(coder.encode(&value)))
    });
}

fn decode_bench(c: &mut Criterion) {
    let coder = record_coder();
    let bytes = coder.encode(&record_value()).unwrap().into_vec();
    c.bench_function("decode_bench", move |b| {
        b.iter(|| black_box(coder.decode_bytes(&bytes)))
    });
}

fn fixed_bench(c: &mut Criterion) {
    let coder = get_coder(&Descriptor::new("fixed")).unwrap();
    let value = Value::from("-12.9");
    c.bench_function("fixed_bench", move |b| {
        b.iter(|| black_box(coder.encode(&value)))
    });
}

criterion_group! {
    name = coder_benches;
    config = Criterion::default();
    targets = resolve_bench, encode_bench, decode_bench, fixed_bench
}

criterion_main!(coder_benches);
