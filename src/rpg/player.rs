//! Player records: creation, progression, inventory, and persistence.
//!
//! A player document lives in the `players` collection. Older documents are
//! forward-compatible: every field added since launch carries a serde default,
//! so loading an old record silently fills in the missing pieces.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::config::RpgConfig;
use crate::rng::rand_int;
use crate::rpg::errors::GameError;
use crate::rpg::items::ItemCatalog;
use crate::rpg::skills::SkillBook;
use crate::rpg::status::StatusEffect;
use crate::rpg::types::StatBonus;
use crate::storage::{JsonStore, StoreError, UPDATED_AT_FIELD};

pub const PLAYERS_COLLECTION: &str = "players";

/// One stack of items in a player's bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InventorySlot {
    pub item_id: String,
    pub qty: i64,
}

/// The four equipment slots. Values are item ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Equipment {
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub helmet: Option<String>,
    pub accessory: Option<String>,
}

impl Equipment {
    pub fn equipped(&self) -> impl Iterator<Item = &String> {
        [&self.weapon, &self.armor, &self.helmet, &self.accessory]
            .into_iter()
            .flatten()
    }
}

/// A summoned ally that lends its stats for a limited number of battles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummonRecord {
    pub name: String,
    /// Battles remaining before the summon departs.
    pub uses: i64,
    pub stats: StatBonus,
}

impl Default for SummonRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            uses: 0,
            stats: StatBonus::default(),
        }
    }
}

/// Lifetime counters, shown on profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifetimeStats {
    pub monsters_killed: i64,
    pub battles_won: i64,
    pub battles_lost: i64,
    pub total_damage_dealt: i64,
}

/// The persisted player document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    pub class: String,
    /// Advanced job, empty until a job change. Checked against the job lines
    /// for battle passives.
    pub job: String,
    pub rank: String,
    pub level: u32,
    pub exp: i64,
    pub exp_to_next: i64,
    pub hp: i64,
    pub max_hp: i64,
    pub mana: i64,
    pub max_mana: i64,
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub gold: i64,
    pub inventory: Vec<InventorySlot>,
    pub equipment: Equipment,
    pub skills: Vec<String>,
    pub skill_cooldowns: HashMap<String, u32>,
    pub status_effects: Vec<StatusEffect>,
    /// 0 = not awakened. Tiers unlock battle passives.
    pub awakening_tier: u32,
    pub pet_bonus: Option<StatBonus>,
    pub title_bonus: Option<StatBonus>,
    pub active_summon: Option<SummonRecord>,
    pub stats: LifetimeStats,
    pub created_at: i64,
    /// Stamp from the last committed write, used for the guarded save.
    #[serde(rename = "_updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl PlayerRecord {
    /// Create a fresh level-1 record for a configured class.
    pub fn new(
        id: &str,
        name: &str,
        class: &str,
        config: &RpgConfig,
        book: &SkillBook,
    ) -> Result<Self, GameError> {
        let base = config
            .classes
            .get(class)
            .ok_or_else(|| GameError::UnknownClass(class.to_string()))?;
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            class: class.to_string(),
            job: String::new(),
            rank: rank_for_level(1).to_string(),
            level: 1,
            exp: 0,
            exp_to_next: exp_required(1, config),
            hp: base.hp,
            max_hp: base.hp,
            mana: base.mana,
            max_mana: base.mana,
            attack: base.attack,
            defense: base.defense,
            speed: base.speed,
            gold: 100,
            inventory: vec![InventorySlot {
                item_id: "health_potion".to_string(),
                qty: 3,
            }],
            equipment: Equipment::default(),
            skills: book
                .starters_for_class(class)
                .into_iter()
                .map(str::to_string)
                .collect(),
            skill_cooldowns: HashMap::new(),
            status_effects: Vec::new(),
            awakening_tier: 0,
            pet_bonus: None,
            title_bonus: None,
            active_summon: None,
            stats: LifetimeStats::default(),
            created_at: chrono::Utc::now().timestamp_millis(),
            updated_at: None,
        })
    }

    // ── Inventory ────────────────────────────────────────────────────────────

    pub fn item_count(&self, item_id: &str) -> i64 {
        self.inventory
            .iter()
            .filter(|s| s.item_id == item_id)
            .map(|s| s.qty)
            .sum()
    }

    pub fn has_item(&self, item_id: &str, qty: i64) -> bool {
        self.item_count(item_id) >= qty
    }

    pub fn add_item(&mut self, item_id: &str, qty: i64) {
        if qty <= 0 {
            return;
        }
        match self.inventory.iter_mut().find(|s| s.item_id == item_id) {
            Some(slot) => slot.qty += qty,
            None => self.inventory.push(InventorySlot {
                item_id: item_id.to_string(),
                qty,
            }),
        }
    }

    /// Remove `qty` of an item. Returns false (and removes nothing) when the
    /// player does not hold enough.
    pub fn remove_item(&mut self, item_id: &str, qty: i64) -> bool {
        if qty <= 0 || self.item_count(item_id) < qty {
            return false;
        }
        if let Some(slot) = self.inventory.iter_mut().find(|s| s.item_id == item_id) {
            slot.qty -= qty;
        }
        self.inventory.retain(|s| s.qty > 0);
        true
    }

    // ── Derived stats ────────────────────────────────────────────────────────

    /// Total additive bonus from equipment, pet, title, and an active summon.
    pub fn total_bonus(&self, catalog: &ItemCatalog) -> StatBonus {
        let mut total = StatBonus::default();
        for item_id in self.equipment.equipped() {
            if let Some(item) = catalog.get(item_id) {
                total += item.stats;
            }
        }
        if let Some(pet) = self.pet_bonus {
            total += pet;
        }
        if let Some(title) = self.title_bonus {
            total += title;
        }
        if let Some(summon) = &self.active_summon {
            if summon.uses > 0 {
                total += summon.stats;
            }
        }
        total
    }

    // ── Progression ──────────────────────────────────────────────────────────

    /// Grant experience and resolve any level-ups. Returns human-readable
    /// progression messages (level ups, stat gains, rank changes).
    pub fn award_exp(
        &mut self,
        amount: i64,
        config: &RpgConfig,
        rng: &mut impl Rng,
    ) -> Vec<String> {
        let mut messages = Vec::new();
        if amount <= 0 {
            return messages;
        }
        self.exp += amount;

        while self.exp >= self.exp_to_next && self.level < config.max_level {
            self.exp -= self.exp_to_next;
            self.level += 1;

            let hp_gain = rand_int(rng, 8, 14);
            let mana_gain = rand_int(rng, 3, 7);
            let atk_gain = rand_int(rng, 1, 3);
            let def_gain = rand_int(rng, 1, 2);
            self.max_hp += hp_gain;
            self.max_mana += mana_gain;
            self.attack += atk_gain;
            self.defense += def_gain;
            // Level-up fully restores the player.
            self.hp = self.max_hp;
            self.mana = self.max_mana;
            self.exp_to_next = exp_required(self.level, config);

            messages.push(format!(
                "Level up! You are now level {} (+{hp_gain} HP, +{mana_gain} MP, +{atk_gain} ATK, +{def_gain} DEF)",
                self.level
            ));

            let new_rank = rank_for_level(self.level);
            if new_rank != self.rank {
                self.rank = new_rank.to_string();
                messages.push(format!("Rank up! You reached rank {new_rank}"));
            }
        }
        if self.level >= config.max_level {
            self.exp = self.exp.min(self.exp_to_next);
        }
        messages
    }
}

/// Experience needed to go from `level` to `level + 1`.
pub fn exp_required(level: u32, config: &RpgConfig) -> i64 {
    let scaled =
        config.base_exp_per_level as f64 * config.exp_scaling_factor.powi(level as i32 - 1);
    scaled.floor() as i64
}

/// Hunter rank for a level. Thresholds are fixed.
pub fn rank_for_level(level: u32) -> &'static str {
    match level {
        0..=9 => "E",
        10..=24 => "D",
        25..=49 => "C",
        50..=74 => "B",
        75..=89 => "A",
        _ => "S",
    }
}

// ── Persistence ──────────────────────────────────────────────────────────────

/// Create and persist a new player. Fails with [`GameError::PlayerExists`] when
/// the id is already registered; the check and insert happen under the
/// collection lock, so two concurrent registrations cannot both win.
pub async fn create_player(
    store: &JsonStore,
    id: &str,
    name: &str,
    class: &str,
    config: &RpgConfig,
    book: &SkillBook,
) -> Result<PlayerRecord, GameError> {
    let player = PlayerRecord::new(id, name, class, config, book)?;
    let value = serde_json::to_value(&player).map_err(StoreError::from)?;
    let id_owned = id.to_string();
    store
        .update_collection(PLAYERS_COLLECTION, move |map| {
            if map.contains_key(&id_owned) {
                return Err(GameError::PlayerExists(id_owned));
            }
            map.insert(id_owned, value);
            Ok(())
        })
        .await
        .map_err(GameError::from)??;
    Ok(player)
}

/// Load a player record, or `None` when unregistered.
pub fn load_player(store: &JsonStore, id: &str) -> Option<PlayerRecord> {
    store.get_doc(PLAYERS_COLLECTION, id)
}

/// Persist a player with the optimistic-concurrency stamp captured at load.
/// The record's stamp is refreshed from the committed write.
pub async fn save_player(store: &JsonStore, player: &mut PlayerRecord) -> Result<(), GameError> {
    let value = serde_json::to_value(&*player).map_err(StoreError::from)?;
    let written = store
        .set_record_guarded(PLAYERS_COLLECTION, &player.id, value, player.updated_at)
        .await?;
    player.updated_at = written.get(UPDATED_AT_FIELD).and_then(Value::as_i64);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> RpgConfig {
        RpgConfig::default()
    }

    #[test]
    fn new_player_matches_class_base() {
        let player =
            PlayerRecord::new("p1", "Aria", "Warrior", &config(), &SkillBook::builtin()).unwrap();
        assert_eq!(player.max_hp, 150);
        assert_eq!(player.attack, 18);
        assert_eq!(player.rank, "E");
        assert_eq!(player.gold, 100);
        assert_eq!(player.item_count("health_potion"), 3);
        assert!(player.skills.contains(&"power_strike".to_string()));
    }

    #[test]
    fn unknown_class_is_an_error() {
        let err = PlayerRecord::new("p1", "Aria", "Necromancer", &config(), &SkillBook::builtin())
            .unwrap_err();
        assert!(matches!(err, GameError::UnknownClass(_)));
    }

    #[test]
    fn exp_curve_and_ranks() {
        let config = config();
        assert_eq!(exp_required(1, &config), 100);
        assert!(exp_required(10, &config) > exp_required(5, &config));
        assert_eq!(rank_for_level(1), "E");
        assert_eq!(rank_for_level(10), "D");
        assert_eq!(rank_for_level(25), "C");
        assert_eq!(rank_for_level(50), "B");
        assert_eq!(rank_for_level(75), "A");
        assert_eq!(rank_for_level(90), "S");
    }

    #[test]
    fn award_exp_levels_up_and_heals() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(17);
        let mut player =
            PlayerRecord::new("p1", "Aria", "Mage", &config, &SkillBook::builtin()).unwrap();
        player.hp = 10;

        let messages = player.award_exp(250, &config, &mut rng);
        assert!(player.level >= 2);
        assert_eq!(player.hp, player.max_hp, "level up restores HP");
        assert!(messages.iter().any(|m| m.contains("Level up")));
    }

    #[test]
    fn rank_up_message_fires_at_threshold() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(3);
        let mut player =
            PlayerRecord::new("p1", "Aria", "Archer", &config, &SkillBook::builtin()).unwrap();
        player.level = 9;
        player.exp_to_next = 10;
        let messages = player.award_exp(10, &config, &mut rng);
        assert_eq!(player.rank, "D");
        assert!(messages.iter().any(|m| m.contains("Rank up")));
    }

    #[test]
    fn inventory_add_remove() {
        let mut player =
            PlayerRecord::new("p1", "Aria", "Warrior", &config(), &SkillBook::builtin()).unwrap();
        player.add_item("wolf_fang", 2);
        assert_eq!(player.item_count("wolf_fang"), 2);
        assert!(!player.remove_item("wolf_fang", 3), "cannot overdraw");
        assert!(player.remove_item("wolf_fang", 2));
        assert_eq!(player.item_count("wolf_fang"), 0);
        assert!(!player.inventory.iter().any(|s| s.item_id == "wolf_fang"));
    }

    #[test]
    fn total_bonus_layers_all_sources() {
        let catalog = ItemCatalog::builtin();
        let mut player =
            PlayerRecord::new("p1", "Aria", "Warrior", &config(), &SkillBook::builtin()).unwrap();
        player.equipment.weapon = Some("iron_sword".to_string());
        player.pet_bonus = Some(StatBonus {
            attack: 3,
            ..Default::default()
        });
        player.active_summon = Some(SummonRecord {
            name: "Stone Sentinel".to_string(),
            uses: 2,
            stats: StatBonus {
                defense: 5,
                ..Default::default()
            },
        });
        let bonus = player.total_bonus(&catalog);
        assert_eq!(bonus.attack, 8 + 3);
        assert_eq!(bonus.defense, 5);

        player.active_summon.as_mut().unwrap().uses = 0;
        let bonus = player.total_bonus(&catalog);
        assert_eq!(bonus.defense, 0, "spent summon contributes nothing");
    }

    #[test]
    fn old_documents_deserialize_with_defaults() {
        // A record written before awakening/summons existed.
        let raw = serde_json::json!({
            "id": "p1",
            "name": "Aria",
            "class": "Warrior",
            "level": 4,
            "hp": 100, "maxHp": 120,
            "gold": 50
        });
        let player: PlayerRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(player.awakening_tier, 0);
        assert!(player.active_summon.is_none());
        assert!(player.status_effects.is_empty());
        assert_eq!(player.max_hp, 120);
    }

    #[tokio::test]
    async fn create_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let config = config();
        let book = SkillBook::builtin();

        let mut player = create_player(&store, "p1", "Aria", "Assassin", &config, &book)
            .await
            .unwrap();
        let dup = create_player(&store, "p1", "Imposter", "Mage", &config, &book).await;
        assert!(matches!(dup, Err(GameError::PlayerExists(_))));

        player.gold += 40;
        save_player(&store, &mut player).await.unwrap();
        assert!(player.updated_at.is_some(), "save refreshes the stamp");

        let loaded = load_player(&store, "p1").unwrap();
        assert_eq!(loaded.gold, 140);
        assert_eq!(loaded.class, "Assassin");
        assert_eq!(loaded.updated_at, player.updated_at);
    }
}
