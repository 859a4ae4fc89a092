use criterion::{criterion_group, criterion_main};

mod index;
mod tree;

use index::register_benchmarks as register_index_benchmarks;
use tree::register_benchmarks as register_tree_benchmarks;

criterion_group!(benches, register_tree_benchmarks, register_index_benchmarks);

criterion_main!(benches);
