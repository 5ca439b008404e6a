//! Plain-text rendering for the terminal.

use restock_core::ProductRecord;
use restock_planner::InventoryDecision;

pub fn product(p: &ProductRecord) {
    println!("SKU:       {}", p.sku);
    println!("Brand:     {}", p.brand);
    println!("Category:  {}", p.category);
    println!("Segment:   {}", p.segment);
    println!("Pack type: {}", p.pack_type);
    println!("Channel:   {}", p.channel);
    println!("Region:    {}", p.region);
    println!("Price:     {:.2}", p.price_unit);
    println!("Promotion: {}", if p.promotion_flag { "yes" } else { "no" });
    println!("Lead time: {} day(s)", p.delivery_days);
}

pub fn decision(d: &InventoryDecision) {
    let r = &d.recommendation;

    println!("{} on {} (stock {})", d.sku, d.date, d.stock);
    println!();
    println!("Predicted demand:            {:.2} units", d.demand.units);
    if d.demand.clamped {
        println!("  (model returned {:.2}; clamped to 0)", d.demand.raw);
    }
    println!("Safety stock:                {:.2} units", r.safety_stock);
    println!("Reorder point (ROP):         {:.2} units", r.reorder_point);
    println!("Recommended inventory level: {:.2} units", r.recommended_inventory);
    println!();
    if r.should_reorder {
        println!("REORDER: stock is below the reorder point");
    } else {
        println!("OK: stock is sufficient, no immediate reorder needed");
    }
}
