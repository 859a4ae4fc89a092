pub mod insert_remove;
pub mod traversal;

pub fn register_benchmarks(c: &mut criterion::Criterion) {
    insert_remove::register_benchmarks(c);
    traversal::register_benchmarks(c);
}
