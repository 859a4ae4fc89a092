// demos/src/bin/dual_index_walkthrough.rs

use ordertree_rs::{
    CostData, IndexError, IndexKind, NodeRef, Order, OrderArena, TradeData, Tree, setup_logger,
};
use tracing::{error, info};

fn main() {
    setup_logger();
    info!("Dual index walkthrough");

    if let Err(e) = run() {
        error!("Walkthrough failed: {}", e);
    }
}

fn run() -> Result<(), IndexError> {
    let mut arena = OrderArena::new();
    let mut prices = Tree::price();
    let mut guids = Tree::guid();

    // One allocation per order, linked into both trees
    for (trade_id, price) in [(1, 100), (2, 90), (3, 110), (4, 90)] {
        let order = Order::new_buy(CostData::new(price, 10), TradeData::new(7, trade_id, 1))?;
        let handle = arena.insert(order);
        guids.insert(&mut arena, handle)?;
        prices.insert(&mut arena, handle)?;
        info!("Indexed {} as {}", arena[handle], handle);
    }

    info!("\nPrice order:");
    for handle in prices.iter(&arena) {
        info!("  {}", arena[handle]);
    }

    // From the cheapest price node, hop to its sibling guid node
    if let Some(cheapest) = prices.min(&arena) {
        let sibling = NodeRef::new(cheapest, IndexKind::Price).sibling();
        if let Some(node) = arena.node(sibling) {
            info!("Cheapest order has guid {} in {}", node.key(), guids.id());
        }
    }

    // A colliding guid is rejected and leaves the guid tree unchanged
    let clash = arena.insert(Order::new_sell(CostData::new(95, 5), TradeData::new(7, 2, 1))?);
    match guids.insert(&mut arena, clash) {
        Ok(()) => info!("Unexpectedly accepted duplicate guid"),
        Err(e) => info!("Rejected: {}", e),
    }
    arena.remove(clash)?;

    // Cancelling trade 2: look it up by guid, unlink from both trees, release it
    let delete = Order::new_delete(TradeData::new(7, 2, 1));
    if let Some(handle) = guids.find(&arena, delete.guid()) {
        prices.remove(&mut arena, handle)?;
        guids.remove(&mut arena, handle)?;
        let order = arena.remove(handle)?;
        info!("Cancelled {}", order);
    }

    prices.verify(&arena)?;
    guids.verify(&arena)?;
    info!("Remaining prices: {:?}", prices.keys(&arena));
    Ok(())
}
