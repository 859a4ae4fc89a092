use criterion::Criterion;
use ordertree_rs::{CostData, Order, OrderIndex, TradeData};
use std::hint::black_box;

fn order(i: u32) -> Order {
    let cost = CostData::new(1_000 + i64::from(i % 100), 10);
    let trade = TradeData::new(3, i, 1);
    if i % 2 == 0 {
        Order::new_buy(cost, trade).expect("non-zero amount")
    } else {
        Order::new_sell(cost, trade).expect("non-zero amount")
    }
}

/// Register benchmarks for the owning index
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderIndex - Operations");

    group.bench_function("insert_1000", |b| {
        b.iter(|| {
            let mut index = OrderIndex::with_capacity(1_000);
            for i in 0..1_000 {
                let _ = black_box(index.insert(order(i)));
            }
            index
        })
    });

    group.bench_function("insert_cancel_1000", |b| {
        b.iter(|| {
            let mut index = OrderIndex::with_capacity(1_000);
            for i in 0..1_000 {
                let _ = index.insert(order(i));
            }
            for i in 0..1_000 {
                let delete = Order::new_delete(TradeData::new(3, i, 1));
                let _ = black_box(index.cancel(&delete));
            }
            index
        })
    });

    group.bench_function("fill_best_sell", |b| {
        b.iter(|| {
            let mut index = OrderIndex::with_capacity(1_000);
            for i in 0..1_000 {
                let _ = index.insert(order(i));
            }
            while let Some(best) = index.best_sell() {
                let _ = black_box(index.fill(best, 10));
            }
            index
        })
    });

    group.bench_function("snapshot_depth_10", |b| {
        let mut index = OrderIndex::with_capacity(1_000);
        for i in 0..1_000 {
            let _ = index.insert(order(i));
        }
        b.iter(|| black_box(index.snapshot(10)))
    });

    group.finish();
}
