pub mod operations;

pub fn register_benchmarks(c: &mut criterion::Criterion) {
    operations::register_benchmarks(c);
}
