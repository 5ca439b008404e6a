//! End-to-end decisions over a CSV sales export and JSON artifacts.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;

use restock_catalog::SalesStore;
use restock_core::{PlanError, Sku};
use restock_forecast::{Artifacts, FEATURE_NAMES, read_model, read_vocabulary};
use restock_inventory::{InventoryPolicy, VolatilityScope};
use restock_planner::{Planner, PlanningError, PlanningService};

const SALES: &str = "\
date,sku,brand,segment,category,channel,region,pack_type,price_unit,promotion_flag,delivery_days,stock_available,delivered_qty,units_sold
2024-05-01,A1,Brand-A,Milk-Seg1,Milk,Retail,PL-Central,Single,2.00,0,5,150,0,10
2024-05-02,A1,Brand-A,Milk-Seg1,Milk,Retail,PL-Central,Single,2.00,0,5,140,0,30
2024-05-03,A1,Brand-A,Milk-Seg1,Milk,Retail,PL-Central,Single,2.00,1,5,110,0,20
2024-05-01,B2,Brand-B,Yog-Seg1,Yogurt,Discount,PL-North,Multipack,3.50,0,0,60,0,50
2024-05-02,C3,Brand-C,Juice-Seg1,Juice,Retail,PL-South,Single,1.20,0,2,10,0,5
";

fn vocabulary_json() -> String {
    json!({
        "sku": ["A1", "B2"],
        "brand": ["Brand-A", "Brand-B"],
        "segment": ["Milk-Seg1", "Yog-Seg1"],
        "category": ["Milk", "Yogurt"],
        "channel": ["Discount", "Retail"],
        "region": ["PL-Central", "PL-North"],
        "pack_type": ["Multipack", "Single"],
    })
    .to_string()
}

/// Forest with one stump on `sku`: code 0 (A1) → 20 units, otherwise 50.
fn model_json() -> String {
    json!({
        "kind": "forest",
        "feature_names": FEATURE_NAMES,
        "trees": [{"nodes": [
            {"split": {"feature": 0, "threshold": 0.5, "left": 1, "right": 2}},
            {"leaf": 20.0},
            {"leaf": 50.0}
        ]}]
    })
    .to_string()
}

fn service(scope: VolatilityScope) -> PlanningService<SalesStore, SalesStore> {
    let vocab = read_vocabulary(vocabulary_json().as_bytes()).unwrap();
    let model = read_model(model_json().as_bytes()).unwrap();
    let artifacts = Artifacts::new(Arc::new(vocab), Arc::new(model)).unwrap();
    let planner = Arc::new(Planner::new(artifacts, InventoryPolicy::default()));
    let store = Arc::new(SalesStore::from_reader(SALES.as_bytes()).unwrap());

    PlanningService::new(planner, store.clone(), store).with_volatility_scope(scope)
}

fn sku(s: &str) -> Sku {
    Sku::new(s).unwrap()
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()
}

#[test]
fn per_sku_decision_matches_hand_computation() {
    // A1 history 10, 30, 20 → sample σ = 10; demand 20; lead time 5
    let d = service(VolatilityScope::PerSku)
        .decide(&sku("A1"), date(), 100)
        .unwrap();

    assert_eq!(d.demand.units, 20.0);
    assert!((d.sigma - 10.0).abs() < 1e-12);
    assert!((d.recommendation.safety_stock - 16.5).abs() < 1e-9);
    assert!((d.recommendation.reorder_point - 116.5).abs() < 1e-9);
    assert!((d.recommendation.recommended_inventory - 36.5).abs() < 1e-9);
    assert!(d.recommendation.should_reorder);
    assert!(d.features.promotion_flag, "latest row carries the promotion");
}

#[test]
fn zero_lead_time_never_reorders_without_volatility() {
    // B2 has a single observation (σ = 0) and delivery_days = 0.
    let svc = service(VolatilityScope::PerSku);
    for stock in [0, 1, 500] {
        let d = svc.decide(&sku("B2"), date(), stock).unwrap();
        assert_eq!(d.demand.units, 50.0);
        assert_eq!(d.recommendation.reorder_point, 0.0);
        assert_eq!(d.recommendation.recommended_inventory, 50.0);
        assert!(!d.recommendation.should_reorder);
    }
}

#[test]
fn global_scope_uses_every_sku() {
    let svc = service(VolatilityScope::Global);
    let d = svc.decide(&sku("A1"), date(), 100).unwrap();

    let all = [10.0f64, 30.0, 20.0, 50.0, 5.0];
    let mean = all.iter().sum::<f64>() / all.len() as f64;
    let var = all.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (all.len() - 1) as f64;
    assert!((d.sigma - var.sqrt()).abs() < 1e-9);
}

#[test]
fn sku_outside_training_vocabulary_is_unknown_category() {
    let err = service(VolatilityScope::Global)
        .decide(&sku("C3"), date(), 1)
        .unwrap_err();
    assert_eq!(
        err,
        PlanningError::Plan(PlanError::unknown_category("sku", "C3"))
    );
}

#[test]
fn decisions_are_deterministic() {
    let svc = service(VolatilityScope::PerSku);
    let a = svc.decide(&sku("A1"), date(), 42).unwrap();
    let b = svc.decide(&sku("A1"), date(), 42).unwrap();
    assert_eq!(a, b);
}
