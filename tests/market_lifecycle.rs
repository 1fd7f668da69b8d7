/// Integration tests for the market engine: seeding, trading pressure,
/// mean-reversion ticks, and durability of the economy collection on disk.
use std::sync::Arc;

use grimvale::clock::ManualClock;
use grimvale::config::EconomyConfig;
use grimvale::rpg::economy::{EconomyEngine, ECONOMY_COLLECTION};
use grimvale::storage::JsonStore;
use tempfile::TempDir;

fn setup() -> (TempDir, Arc<ManualClock>, EconomyEngine) {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().unwrap();
    let clock = Arc::new(ManualClock::new(chrono::Utc::now()));
    let store = Arc::new(JsonStore::open_with_clock(dir.path(), clock.clone()).unwrap());
    let engine = EconomyEngine::with_clock(store, EconomyConfig::default(), clock.clone());
    (dir, clock, engine)
}

#[tokio::test]
async fn buy_pressure_raises_sell_pressure_lowers() {
    let (_dir, _clock, engine) = setup();
    engine.load_economy().await.unwrap();

    let base = engine.get_price_entry("iron_sword").unwrap().base_price;
    assert_eq!(base, 120);

    engine.record_buy("iron_sword", 1).await.unwrap();
    let after_buy = engine.get_price_entry("iron_sword").unwrap().current_price;
    assert!(after_buy > base);

    for _ in 0..8 {
        engine.record_sell("iron_sword", 2).await.unwrap();
    }
    let after_sells = engine.get_price_entry("iron_sword").unwrap().current_price;
    assert!(after_sells < base, "sell flood pushes below equilibrium");
}

#[tokio::test]
async fn sell_price_stays_below_buy_price() {
    let (_dir, _clock, engine) = setup();
    engine.load_economy().await.unwrap();

    for item in ["iron_sword", "health_potion", "flame_blade", "void_scythe"] {
        let buy = engine.get_buy_price(item);
        let sell = engine.get_sell_price(item);
        assert!(sell < buy, "{item}: sell {sell} must undercut buy {buy}");
    }
}

#[tokio::test]
async fn tick_converges_back_to_base() {
    let (_dir, _clock, engine) = setup();
    engine.load_economy().await.unwrap();

    engine.record_buy("mega_potion", 12).await.unwrap();
    let inflated = engine.get_price_entry("mega_potion").unwrap().current_price;
    let base = engine.get_price_entry("mega_potion").unwrap().base_price;
    assert!(inflated > base);

    for _ in 0..80 {
        engine.economy_tick().await.unwrap();
    }
    let settled = engine.get_price_entry("mega_potion").unwrap().current_price;
    assert!(
        (settled - base).abs() < (inflated - base),
        "price drifted back toward base: {inflated} -> {settled} (base {base})"
    );
}

#[tokio::test]
async fn market_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = Arc::new(JsonStore::open(dir.path()).unwrap());
        let engine = EconomyEngine::new(store, EconomyConfig::default());
        engine.load_economy().await.unwrap();
        engine.record_buy("iron_sword", 3).await.unwrap();
    }

    // A fresh store over the same directory sees the committed state.
    let store = Arc::new(JsonStore::open(dir.path()).unwrap());
    let engine = EconomyEngine::new(store, EconomyConfig::default());
    let entry = engine.get_price_entry("iron_sword").unwrap();
    assert!((entry.demand - 1.75).abs() < 1e-9, "demand persisted");
    assert!(entry.current_price > entry.base_price);
}

#[tokio::test]
async fn stale_tmp_file_never_shadows_committed_data() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(JsonStore::open(dir.path()).unwrap());
    let engine = EconomyEngine::new(store, EconomyConfig::default());
    engine.load_economy().await.unwrap();

    // Simulate a crash that left a half-written temp file behind.
    std::fs::write(
        dir.path().join(format!("{ECONOMY_COLLECTION}.json.tmp")),
        b"{\"iron_sword\": {\"currentPri",
    )
    .unwrap();

    let entry = engine.get_price_entry("iron_sword").unwrap();
    assert_eq!(entry.current_price, 120, "committed state untouched");

    // The next committed write replaces the stale temp file.
    engine.record_buy("iron_sword", 1).await.unwrap();
    assert_eq!(engine.get_price_entry("iron_sword").unwrap().current_price, 121);
}

#[tokio::test]
async fn concurrent_buys_are_all_counted() {
    let (_dir, _clock, engine) = setup();
    engine.load_economy().await.unwrap();
    let engine = Arc::new(engine);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = engine.clone();
        handles.push(tokio::spawn(async move {
            engine.record_buy("health_potion", 1).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // 8 buys at 0.25 impact each: demand 1.0 -> 3.0 with no lost updates.
    let entry = engine.get_price_entry("health_potion").unwrap();
    assert!((entry.demand - 3.0).abs() < 1e-9, "demand was {}", entry.demand);
}
