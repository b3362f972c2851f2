use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kvstore::{Container, DumpFormat, Entry, FileFormat};

const NUM_ITEMS: usize = 100_000;

// ========== 辅助函数 ==========

fn generate_key(i: usize) -> String {
    format!("key_{:010}", i)
}

fn generate_value(i: usize) -> String {
    format!("value_{:010}", i)
}

fn filled_container(n: usize) -> Container {
    let mut container = Container::new();
    for i in 0..n {
        container
            .push(Entry::new(generate_key(i), generate_value(i)).unwrap())
            .unwrap();
    }
    container
}

// ========== 1. 顺序写入 ==========

fn benchmark_sequential_push(c: &mut Criterion) {
    c.bench_function("sequential_push", |b| {
        b.iter(|| black_box(filled_container(NUM_ITEMS)))
    });
}

// ========== 2. 顺序读取 ==========

fn benchmark_sequential_get(c: &mut Criterion) {
    let container = filled_container(NUM_ITEMS);
    c.bench_function("sequential_get", |b| {
        b.iter(|| {
            for i in 0..NUM_ITEMS {
                black_box(container.get(generate_key(i)));
            }
        })
    });
}

// ========== 3. 导入 ini 文本 ==========

fn benchmark_push_ini(c: &mut Criterion) {
    let content: String = (0..NUM_ITEMS)
        .map(|i| format!("{} = {}\n", generate_key(i), generate_value(i)))
        .collect();
    c.bench_function("push_ini", |b| {
        b.iter(|| {
            let mut container = Container::new();
            container.push_str(&content, FileFormat::Ini).unwrap();
            black_box(container)
        })
    });
}

// ========== 4. 各格式导出 ==========

fn benchmark_dump(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump");
    let container = filled_container(NUM_ITEMS);

    for format in [DumpFormat::Array, DumpFormat::Json, DumpFormat::Ini, DumpFormat::Xml] {
        group.bench_with_input(BenchmarkId::from_parameter(format), &format, |b, format| {
            b.iter(|| black_box(container.dump(*format).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_sequential_push,
    benchmark_sequential_get,
    benchmark_push_ini,
    benchmark_dump
);
criterion_main!(benches);
