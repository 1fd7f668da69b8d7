//! Supply-and-demand market engine with world events and a rotating shop.
//!
//! Every item carries a base price (its equilibrium) and a live price derived
//! from pressure: `ratio = (demand + 1) / (supply + 1)`, `delta = (ratio - 1) *
//! volatility`, `price = base * clamp(1 + delta, floor, cap)`. Buys push demand
//! up, sells push supply up, and a periodic tick decays both toward neutral
//! while nudging the price back toward base. World events layer global
//! multipliers on top without touching the persisted table.
//!
//! All mutation goes through [`JsonStore::update_collection_as`], so two
//! concurrent trades against the same item serialize instead of losing one
//! update.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::clock::{Clock, SystemClock};
use crate::config::EconomyConfig;
use crate::rng::{clamp_f64, pick_n, trend, weighted_pick, Trend};
use crate::rpg::items::ItemCatalog;
use crate::storage::{JsonStore, StoreError};

pub const ECONOMY_COLLECTION: &str = "economy";
pub const WORLD_COLLECTION: &str = "world";
const WORLD_RECORD_ID: &str = "current";

/// Prices kept per entry for trend display.
const PRICE_HISTORY_LEN: usize = 5;

/// Demand and supply pressure are confined to this band.
const PRESSURE_MAX: f64 = 5.0;

// ── Market entries ───────────────────────────────────────────────────────────

/// One item's persisted market state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketEntry {
    pub item_id: String,
    pub base_price: i64,
    pub current_price: i64,
    pub demand: f64,
    pub supply: f64,
    pub volatility: f64,
    pub last_updated: i64,
    pub history: Vec<i64>,
}

/// Recompute the live price from pressure and append it to the history.
fn recalc_price(entry: &mut MarketEntry, config: &EconomyConfig, now_ms: i64) {
    let pressure_ratio = (entry.demand + 1.0) / (entry.supply + 1.0);
    let delta = (pressure_ratio - 1.0) * entry.volatility;
    let multiplier = clamp_f64(1.0 + delta, config.price_floor, config.price_cap);
    entry.current_price = ((entry.base_price as f64 * multiplier).floor() as i64).max(1);

    entry.history.push(entry.current_price);
    let len = entry.history.len();
    if len > PRICE_HISTORY_LEN {
        entry.history.drain(..len - PRICE_HISTORY_LEN);
    }
    entry.last_updated = now_ms;
}

// ── World events ─────────────────────────────────────────────────────────────

/// Global multipliers a world event applies while active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventEffects {
    pub buy_price_mult: f64,
    pub sell_price_mult: f64,
    pub loot_mult: f64,
    pub exp_mult: f64,
    pub volatility_mult: f64,
}

const NEUTRAL_EFFECTS: EventEffects = EventEffects {
    buy_price_mult: 1.0,
    sell_price_mult: 1.0,
    loot_mult: 1.0,
    exp_mult: 1.0,
    volatility_mult: 1.0,
};

#[derive(Debug, Clone, Copy)]
pub struct WorldEventDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Selection weight when a new event is rolled.
    pub weight: u32,
    pub duration_mins: i64,
    pub effects: EventEffects,
}

/// Every event the world can roll, including the calm default.
pub const WORLD_EVENTS: &[WorldEventDef] = &[
    WorldEventDef {
        id: "none",
        name: "Peaceful Times",
        description: "Nothing special. The market is calm.",
        weight: 35,
        duration_mins: 60,
        effects: NEUTRAL_EFFECTS,
    },
    WorldEventDef {
        id: "gold_rush",
        name: "Gold Rush",
        description: "Gold mines overflow. Sell prices x1.5!",
        weight: 15,
        duration_mins: 30,
        effects: EventEffects {
            sell_price_mult: 1.5,
            ..NEUTRAL_EFFECTS
        },
    },
    WorldEventDef {
        id: "scarcity",
        name: "Resource Scarcity",
        description: "Supplies are short. Buy prices x1.3!",
        weight: 12,
        duration_mins: 25,
        effects: EventEffects {
            buy_price_mult: 1.3,
            ..NEUTRAL_EFFECTS
        },
    },
    WorldEventDef {
        id: "monster_invasion",
        name: "Monster Invasion",
        description: "Monsters flood the land. Loot x1.5, EXP x1.2!",
        weight: 12,
        duration_mins: 45,
        effects: EventEffects {
            loot_mult: 1.5,
            exp_mult: 1.2,
            ..NEUTRAL_EFFECTS
        },
    },
    WorldEventDef {
        id: "divine_blessing",
        name: "Divine Blessing",
        description: "The gods smile. All EXP x1.5!",
        weight: 12,
        duration_mins: 30,
        effects: EventEffects {
            exp_mult: 1.5,
            ..NEUTRAL_EFFECTS
        },
    },
    WorldEventDef {
        id: "trade_fair",
        name: "Grand Trade Fair",
        description: "Merchants flood the market. Buy prices x0.85!",
        weight: 8,
        duration_mins: 30,
        effects: EventEffects {
            buy_price_mult: 0.85,
            ..NEUTRAL_EFFECTS
        },
    },
    WorldEventDef {
        id: "ancient_curse",
        name: "Ancient Curse",
        description: "Dark magic blankets the land. All prices volatile!",
        weight: 6,
        duration_mins: 20,
        effects: EventEffects {
            volatility_mult: 1.5,
            ..NEUTRAL_EFFECTS
        },
    },
];

/// Look up an event definition; unknown ids resolve to the calm default.
pub fn world_event_def(id: &str) -> &'static WorldEventDef {
    WORLD_EVENTS
        .iter()
        .find(|e| e.id == id)
        .unwrap_or(&WORLD_EVENTS[0])
}

/// The persisted world record (`world/current`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorldEventState {
    pub event_id: String,
    pub started_at: i64,
    pub ends_at: i64,
}

impl Default for WorldEventState {
    fn default() -> Self {
        Self {
            event_id: "none".to_string(),
            started_at: 0,
            ends_at: 0,
        }
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

struct ShopCache {
    items: Vec<String>,
    generated_at: Option<DateTime<Utc>>,
}

/// The market engine. Cheap to share behind an `Arc`; all methods take `&self`.
pub struct EconomyEngine {
    store: Arc<JsonStore>,
    items: ItemCatalog,
    config: EconomyConfig,
    clock: Arc<dyn Clock>,
    shop_cache: StdMutex<ShopCache>,
}

impl EconomyEngine {
    pub fn new(store: Arc<JsonStore>, config: EconomyConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Construct with an injected clock. Tests use this to expire world events
    /// and shop rotations without sleeping.
    pub fn with_clock(store: Arc<JsonStore>, config: EconomyConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            items: ItemCatalog::builtin(),
            config,
            clock,
            shop_cache: StdMutex::new(ShopCache {
                items: Vec::new(),
                generated_at: None,
            }),
        }
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    // ── Initialization ───────────────────────────────────────────────────────

    /// A fresh market table covering every catalog item at equilibrium.
    pub fn build_initial_economy(&self) -> HashMap<String, MarketEntry> {
        let now = self.clock.now_millis();
        self.items
            .all()
            .map(|item| {
                let base_price = ItemCatalog::market_base_price(item);
                (
                    item.id.to_string(),
                    MarketEntry {
                        item_id: item.id.to_string(),
                        base_price,
                        current_price: base_price,
                        demand: 1.0,
                        supply: 1.0,
                        volatility: item.rarity.volatility(),
                        last_updated: now,
                        history: vec![base_price],
                    },
                )
            })
            .collect()
    }

    /// Load the market table, seeding it on first boot.
    pub async fn load_economy(&self) -> Result<HashMap<String, MarketEntry>, StoreError> {
        let existing = self.store.read_collection_as::<MarketEntry>(ECONOMY_COLLECTION);
        if !existing.is_empty() {
            return Ok(existing);
        }
        info!("economy: seeding initial market table");
        let initial = self.build_initial_economy();
        let seeded = initial.clone();
        self.store
            .update_collection_as::<MarketEntry, _>(ECONOMY_COLLECTION, move |map| {
                // Another task may have seeded between our read and this lock.
                if map.is_empty() {
                    *map = seeded;
                }
            })
            .await?;
        Ok(self.store.read_collection_as(ECONOMY_COLLECTION))
    }

    /// Drop all live state and rebuild the table at equilibrium. Admin-only.
    pub async fn reset_economy(&self) -> Result<usize, StoreError> {
        let initial = self.build_initial_economy();
        let count = initial.len();
        self.store
            .update_collection_as::<MarketEntry, _>(ECONOMY_COLLECTION, move |map| {
                *map = initial;
            })
            .await?;
        info!("economy: reset to initial state ({count} entries)");
        Ok(count)
    }

    // ── Trades ───────────────────────────────────────────────────────────────

    /// Record a buy: demand rises, the price is recalculated, and the unit
    /// price the player pays (world event applied) is returned. Unknown items
    /// and non-positive quantities are a no-op returning 0.
    pub async fn record_buy(&self, item_id: &str, qty: i64) -> Result<i64, StoreError> {
        if qty <= 0 {
            return Ok(0);
        }
        let event_mult = self.current_event().effects.buy_price_mult;
        let now = self.clock.now_millis();
        let config = self.config.clone();
        let id = item_id.to_string();
        let price = self
            .store
            .update_collection_as::<MarketEntry, i64>(ECONOMY_COLLECTION, move |map| {
                let Some(entry) = map.get_mut(&id) else {
                    return 0;
                };
                entry.demand =
                    (entry.demand + config.demand_impact * qty as f64).min(PRESSURE_MAX);
                recalc_price(entry, &config, now);
                entry.current_price
            })
            .await?;
        Ok(((price as f64) * event_mult).floor() as i64)
    }

    /// Record a sell: supply rises, the price is recalculated, and the unit
    /// price the shop pays (sell ratio and world event applied) is returned.
    pub async fn record_sell(&self, item_id: &str, qty: i64) -> Result<i64, StoreError> {
        if qty <= 0 {
            return Ok(0);
        }
        let event_mult = self.current_event().effects.sell_price_mult;
        let now = self.clock.now_millis();
        let config = self.config.clone();
        let sell_ratio = self.config.shop_sell_ratio;
        let id = item_id.to_string();
        let price = self
            .store
            .update_collection_as::<MarketEntry, i64>(ECONOMY_COLLECTION, move |map| {
                let Some(entry) = map.get_mut(&id) else {
                    return 0;
                };
                entry.supply =
                    (entry.supply + config.supply_impact * qty as f64).min(PRESSURE_MAX);
                recalc_price(entry, &config, now);
                entry.current_price
            })
            .await?;
        Ok(((price as f64) * sell_ratio * event_mult).floor() as i64)
    }

    // ── Quotes ───────────────────────────────────────────────────────────────

    /// Current unit price a buyer pays, world event included. During an
    /// `ancient_curse` the quote jitters around the live price.
    pub fn get_buy_price(&self, item_id: &str) -> i64 {
        self.get_buy_price_with(item_id, &mut rand::thread_rng())
    }

    pub fn get_buy_price_with(&self, item_id: &str, rng: &mut impl Rng) -> i64 {
        let Some(entry) = self.get_price_entry(item_id) else {
            return 0;
        };
        let effects = self.current_event().effects;
        if (effects.volatility_mult - 1.0).abs() > f64::EPSILON {
            let jitter = 1.0 + (rng.gen::<f64>() - 0.5) * effects.volatility_mult * 0.2;
            let boosted = clamp_f64(entry.current_price as f64 * jitter, 1.0, 999_999.0);
            return (boosted * effects.buy_price_mult).floor() as i64;
        }
        (entry.current_price as f64 * effects.buy_price_mult).floor() as i64
    }

    /// Current unit price the shop pays a seller.
    pub fn get_sell_price(&self, item_id: &str) -> i64 {
        let Some(entry) = self.get_price_entry(item_id) else {
            return 0;
        };
        let effects = self.current_event().effects;
        (entry.current_price as f64 * self.config.shop_sell_ratio * effects.sell_price_mult)
            .floor() as i64
    }

    /// The full persisted entry, for display.
    pub fn get_price_entry(&self, item_id: &str) -> Option<MarketEntry> {
        self.store.get_doc(ECONOMY_COLLECTION, item_id)
    }

    /// Price direction relative to equilibrium.
    pub fn price_trend(&self, item_id: &str) -> Option<Trend> {
        self.get_price_entry(item_id)
            .map(|e| trend(e.current_price, e.base_price))
    }

    // ── Tick ─────────────────────────────────────────────────────────────────

    /// Periodic mean-reversion pass, driven by an external scheduler. Demand
    /// and supply decay toward neutral, the price drifts toward base, and the
    /// pressure formula is re-applied. Returns how many prices moved.
    pub async fn economy_tick(&self) -> Result<usize, StoreError> {
        let now = self.clock.now_millis();
        let config = self.config.clone();
        let changed = self
            .store
            .update_collection_as::<MarketEntry, usize>(ECONOMY_COLLECTION, move |map| {
                let mut changed = 0;
                for entry in map.values_mut() {
                    let prev_price = entry.current_price;

                    entry.demand += (1.0 - entry.demand) * config.demand_decay_rate;
                    entry.supply += (1.0 - entry.supply) * config.demand_decay_rate;

                    let drifted = entry.current_price as f64
                        + (entry.base_price - entry.current_price) as f64
                            * config.mean_reversion_rate;
                    entry.current_price = (drifted.floor() as i64).max(1);

                    recalc_price(entry, &config, now);

                    if entry.current_price != prev_price {
                        changed += 1;
                    }
                }
                changed
            })
            .await?;
        debug!("economy: tick completed, {changed} prices moved");
        Ok(changed)
    }

    // ── World events ─────────────────────────────────────────────────────────

    /// The persisted world state; a default calm state when none was rolled yet.
    pub fn get_world_state(&self) -> WorldEventState {
        self.store
            .get_doc(WORLD_COLLECTION, WORLD_RECORD_ID)
            .unwrap_or_else(|| {
                let now = self.clock.now_millis();
                WorldEventState {
                    event_id: "none".to_string(),
                    started_at: now,
                    ends_at: now + 60 * 60 * 1000,
                }
            })
    }

    /// The event currently in effect. Expiry is lazy: a past `ends_at` means
    /// calm until the scheduler rolls the next event.
    pub fn current_event(&self) -> &'static WorldEventDef {
        let state = self.get_world_state();
        if self.clock.now_millis() > state.ends_at {
            return &WORLD_EVENTS[0];
        }
        world_event_def(&state.event_id)
    }

    /// Roll and persist a new world event.
    pub async fn roll_world_event(&self) -> Result<&'static WorldEventDef, StoreError> {
        self.roll_world_event_with(&mut rand::thread_rng()).await
    }

    pub async fn roll_world_event_with(
        &self,
        rng: &mut impl Rng,
    ) -> Result<&'static WorldEventDef, StoreError> {
        let weighted: Vec<(&'static WorldEventDef, u32)> =
            WORLD_EVENTS.iter().map(|e| (e, e.weight)).collect();
        let event = *weighted_pick(rng, &weighted).unwrap_or(&&WORLD_EVENTS[0]);
        let now = self.clock.now_millis();
        let state = WorldEventState {
            event_id: event.id.to_string(),
            started_at: now,
            ends_at: now + event.duration_mins * 60 * 1000,
        };
        self.store
            .set_doc(WORLD_COLLECTION, WORLD_RECORD_ID, &state)
            .await?;
        info!(
            "economy: world event {} started for {} minutes",
            event.id, event.duration_mins
        );
        Ok(event)
    }

    /// Roll a replacement if the current event has expired, otherwise keep it.
    pub async fn check_and_rotate_world_event(
        &self,
    ) -> Result<&'static WorldEventDef, StoreError> {
        let state = self.get_world_state();
        if self.clock.now_millis() > state.ends_at {
            return self.roll_world_event().await;
        }
        Ok(world_event_def(&state.event_id))
    }

    // ── Shop rotation ────────────────────────────────────────────────────────

    /// Item ids the shop currently stocks: every consumable plus a random
    /// selection of equipment, re-rolled once the rotation TTL lapses.
    pub fn shop_inventory(&self) -> Vec<String> {
        self.shop_inventory_with(&mut rand::thread_rng())
    }

    pub fn shop_inventory_with(&self, rng: &mut impl Rng) -> Vec<String> {
        let now = self.clock.now();
        let mut cache = self.shop_cache.lock().expect("shop cache poisoned");
        if let Some(generated_at) = cache.generated_at {
            let age = (now - generated_at).num_seconds();
            if age < self.config.shop_rotation_secs && !cache.items.is_empty() {
                return cache.items.clone();
            }
        }

        let mut stocked: Vec<String> = self
            .items
            .by_kind(crate::rpg::types::ItemKind::Consumable)
            .into_iter()
            .map(|i| i.id.to_string())
            .collect();
        let equipment: Vec<String> = self
            .items
            .all()
            .filter(|i| i.kind.is_equipment())
            .map(|i| i.id.to_string())
            .collect();
        stocked.extend(pick_n(rng, &equipment, self.config.shop_equipment_slots));

        cache.items = stocked.clone();
        cache.generated_at = Some(now);
        debug!("economy: shop rotated, {} items stocked", stocked.len());
        stocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn engine() -> (TempDir, Arc<ManualClock>, EconomyEngine) {
        let dir = TempDir::new().expect("tempdir");
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = Arc::new(JsonStore::open_with_clock(dir.path(), clock.clone()).expect("store"));
        let engine = EconomyEngine::with_clock(store, EconomyConfig::default(), clock.clone());
        (dir, clock, engine)
    }

    #[tokio::test]
    async fn seeding_covers_every_item_at_equilibrium() {
        let (_dir, _clock, engine) = engine();
        let economy = engine.load_economy().await.unwrap();
        assert_eq!(economy.len(), engine.items().all().count());
        let sword = &economy["iron_sword"];
        assert_eq!(sword.base_price, 120);
        assert_eq!(sword.current_price, 120);
        assert_eq!(sword.demand, 1.0);
        assert_eq!(sword.history, vec![120]);
    }

    #[tokio::test]
    async fn single_buy_nudges_price_up() {
        let (_dir, _clock, engine) = engine();
        engine.load_economy().await.unwrap();

        // demand 1.0 -> 1.25; ratio 2.25/2 = 1.125; delta 0.125 * 0.08 = 0.01
        let paid = engine.record_buy("iron_sword", 1).await.unwrap();
        assert_eq!(paid, 121);

        let entry = engine.get_price_entry("iron_sword").unwrap();
        assert_eq!(entry.current_price, 121);
        assert!((entry.demand - 1.25).abs() < 1e-9);
        assert_eq!(entry.history, vec![120, 121]);
    }

    #[tokio::test]
    async fn bulk_sell_drops_price_and_pays_sell_ratio() {
        let (_dir, _clock, engine) = engine();
        engine.load_economy().await.unwrap();

        // supply 1.0 -> 2.0; ratio 2/3; delta = -1/3 * 0.08; mult ~0.97333
        let received = engine.record_sell("iron_sword", 4).await.unwrap();
        let entry = engine.get_price_entry("iron_sword").unwrap();
        assert_eq!(entry.current_price, 116);
        assert_eq!(received, (116.0_f64 * 0.6).floor() as i64);
    }

    #[tokio::test]
    async fn unknown_item_and_bad_qty_are_noops() {
        let (_dir, _clock, engine) = engine();
        engine.load_economy().await.unwrap();
        assert_eq!(engine.record_buy("philosopher_stone", 1).await.unwrap(), 0);
        assert_eq!(engine.record_buy("iron_sword", 0).await.unwrap(), 0);
        assert_eq!(engine.record_sell("iron_sword", -3).await.unwrap(), 0);
        assert_eq!(engine.get_buy_price("philosopher_stone"), 0);
    }

    #[tokio::test]
    async fn demand_and_supply_saturate() {
        let (_dir, _clock, engine) = engine();
        engine.load_economy().await.unwrap();
        engine.record_buy("iron_sword", 1000).await.unwrap();
        let entry = engine.get_price_entry("iron_sword").unwrap();
        assert_eq!(entry.demand, 5.0);
    }

    #[tokio::test]
    async fn tick_reverts_toward_base() {
        let (_dir, _clock, engine) = engine();
        engine.load_economy().await.unwrap();
        engine.record_buy("void_scythe", 20).await.unwrap();
        let inflated = engine.get_price_entry("void_scythe").unwrap().current_price;
        assert!(inflated > 125_000);

        let mut last = inflated;
        for _ in 0..60 {
            engine.economy_tick().await.unwrap();
            let now = engine.get_price_entry("void_scythe").unwrap().current_price;
            assert!(now <= last, "price must fall monotonically toward base");
            last = now;
        }
        let settled = engine.get_price_entry("void_scythe").unwrap();
        assert!(
            (settled.current_price - settled.base_price).abs() < inflated - settled.base_price,
            "price moved toward equilibrium"
        );
        assert!(settled.demand < 1.02, "demand decayed toward neutral");
        assert_eq!(settled.history.len(), PRICE_HISTORY_LEN);
    }

    #[tokio::test]
    async fn world_event_expires_lazily() {
        let (_dir, clock, engine) = engine();
        engine.load_economy().await.unwrap();

        // Pin the world record to gold_rush for 30 minutes.
        let now = clock.now_millis();
        let state = WorldEventState {
            event_id: "gold_rush".to_string(),
            started_at: now,
            ends_at: now + 30 * 60 * 1000,
        };
        engine
            .store
            .set_doc(WORLD_COLLECTION, WORLD_RECORD_ID, &state)
            .await
            .unwrap();

        let base_sell = (120.0_f64 * 0.6).floor() as i64;

        clock.advance(Duration::minutes(10));
        assert_eq!(engine.current_event().id, "gold_rush");
        assert_eq!(
            engine.get_sell_price("iron_sword"),
            (base_sell as f64 * 1.5).floor() as i64
        );

        clock.advance(Duration::minutes(21));
        assert_eq!(engine.current_event().id, "none", "expired event is calm");
        assert_eq!(engine.get_sell_price("iron_sword"), base_sell);
    }

    #[tokio::test]
    async fn curse_jitters_buy_quotes_without_touching_state() {
        let (_dir, clock, engine) = engine();
        engine.load_economy().await.unwrap();
        let now = clock.now_millis();
        let state = WorldEventState {
            event_id: "ancient_curse".to_string(),
            started_at: now,
            ends_at: now + 20 * 60 * 1000,
        };
        engine
            .store
            .set_doc(WORLD_COLLECTION, WORLD_RECORD_ID, &state)
            .await
            .unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let mut distinct = std::collections::HashSet::new();
        for _ in 0..50 {
            let quote = engine.get_buy_price_with("iron_sword", &mut rng);
            // +/- 15% of 120
            assert!((102..=138).contains(&quote), "quote out of band: {quote}");
            distinct.insert(quote);
        }
        assert!(distinct.len() > 1, "curse quotes must vary");
        assert_eq!(
            engine.get_price_entry("iron_sword").unwrap().current_price,
            120,
            "jitter never persists"
        );
    }

    #[tokio::test]
    async fn rotation_rolls_a_known_event() {
        let (_dir, clock, engine) = engine();
        let first = engine.check_and_rotate_world_event().await.unwrap();
        assert!(WORLD_EVENTS.iter().any(|e| e.id == first.id));

        // Within the event's window the same event is kept.
        let kept = engine.check_and_rotate_world_event().await.unwrap();
        assert_eq!(kept.id, first.id);

        clock.advance(Duration::minutes(61));
        let rolled = engine.check_and_rotate_world_event().await.unwrap();
        assert!(WORLD_EVENTS.iter().any(|e| e.id == rolled.id));
    }

    #[tokio::test]
    async fn shop_rotates_on_ttl() {
        let (_dir, clock, engine) = engine();
        let mut rng = StdRng::seed_from_u64(42);
        let first = engine.shop_inventory_with(&mut rng);

        let consumables = engine
            .items()
            .by_kind(crate::rpg::types::ItemKind::Consumable)
            .len();
        assert_eq!(first.len(), consumables + 6);
        for id in engine
            .items()
            .by_kind(crate::rpg::types::ItemKind::Consumable)
        {
            assert!(first.contains(&id.id.to_string()), "missing {}", id.id);
        }

        // Within the TTL the cached rotation is returned.
        let again = engine.shop_inventory_with(&mut rng);
        assert_eq!(first, again);

        clock.advance(Duration::seconds(3601));
        let rotated = engine.shop_inventory_with(&mut rng);
        assert_eq!(rotated.len(), consumables + 6);
    }

    #[tokio::test]
    async fn reset_rebuilds_equilibrium() {
        let (_dir, _clock, engine) = engine();
        engine.load_economy().await.unwrap();
        engine.record_buy("iron_sword", 10).await.unwrap();
        assert_ne!(
            engine.get_price_entry("iron_sword").unwrap().current_price,
            120
        );
        engine.reset_economy().await.unwrap();
        let entry = engine.get_price_entry("iron_sword").unwrap();
        assert_eq!(entry.current_price, 120);
        assert_eq!(entry.demand, 1.0);
    }
}
