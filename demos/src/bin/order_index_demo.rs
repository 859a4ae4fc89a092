// demos/src/bin/order_index_demo.rs

use ordertree_rs::{CostData, IndexError, Order, OrderIndex, TradeData, setup_logger};
use tracing::{error, info};

fn main() {
    setup_logger();
    info!("OrderIndex demo");

    if let Err(e) = run() {
        error!("Demo failed: {}", e);
    }
}

fn run() -> Result<(), IndexError> {
    let mut index = OrderIndex::with_capacity(64);

    for i in 0..5u32 {
        let price = 9_900 + i64::from(i) * 20;
        let buy = Order::new_buy(CostData::new(price, 10 + i * 5), TradeData::new(1, i, 42))?;
        index.insert(buy)?;

        let price = 10_000 + i64::from(i) * 20;
        let sell = Order::new_sell(CostData::new(price, 10 + i * 5), TradeData::new(2, i, 42))?;
        index.insert(sell)?;
    }
    display_state(&index);

    // Consume the best sell in two steps
    if let Some(best) = index.best_sell() {
        index.fill(best, 4)?;
        info!(
            "Partially filled: {}",
            ordertree_rs::order::describe(index.get(best))
        );
        if let Some(done) = index.fill(best, 6)? {
            info!("Fully filled and removed: {}", done);
        }
    }

    // Cancel a buy by trader/trade id
    let delete = Order::new_delete(TradeData::new(1, 3, 42));
    match index.cancel(&delete)? {
        Some(order) => info!("Cancelled: {}", order),
        None => info!("Nothing to cancel for trade 3"),
    }

    index.verify()?;
    display_state(&index);

    let json = index.snapshot(3).to_json()?;
    info!("Snapshot JSON: {}", json);
    Ok(())
}

fn display_state(index: &OrderIndex) {
    let snapshot = index.snapshot(10);
    info!("\nOrderIndex with {} orders", snapshot.orders);
    info!("Best buy: {:?}", snapshot.best_buy());
    info!("Best sell: {:?}", snapshot.best_sell());
    info!("Spread: {:?}", snapshot.spread());
    for level in &snapshot.sells {
        info!(
            "  SELL {:>6} x {:<4} ({} orders)",
            level.price, level.amount, level.orders
        );
    }
    for level in &snapshot.buys {
        info!(
            "  BUY  {:>6} x {:<4} ({} orders)",
            level.price, level.amount, level.orders
        );
    }
}
