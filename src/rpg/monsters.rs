//! Monster registry, level scaling, and loot rolls.
//!
//! Loot tables are rolled entry by entry: every entry gets an independent
//! Bernoulli trial at `(weight + luck*5)/100`, so a single kill can drop
//! anything from nothing to the whole table. This is deliberately not a
//! single weighted pick.

use std::collections::HashMap;

use rand::Rng;

use crate::rng::{chance, pick, rand_int};
use crate::rpg::types::Element;

/// One row of a monster's loot table.
#[derive(Debug, Clone, Copy)]
pub struct LootEntry {
    pub item_id: &'static str,
    /// Base drop chance in percent.
    pub weight: u32,
    /// Inclusive quantity range.
    pub qty: (i64, i64),
}

/// An item drop produced by [`MonsterCatalog::roll_loot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LootDrop {
    pub item_id: String,
    pub qty: i64,
}

/// Static (or scaled) monster definition.
#[derive(Debug, Clone)]
pub struct MonsterDef {
    pub id: &'static str,
    pub name: &'static str,
    pub level: u32,
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub element: Element,
    pub skills: &'static [&'static str],
    pub loot_table: &'static [LootEntry],
    pub exp_reward: i64,
    /// Inclusive gold range dropped on defeat.
    pub gold_reward: (i64, i64),
    pub elite: bool,
    pub boss: bool,
}

const fn entry(item_id: &'static str, weight: u32, qty: (i64, i64)) -> LootEntry {
    LootEntry {
        item_id,
        weight,
        qty,
    }
}

/// Read-only monster lookup table.
pub struct MonsterCatalog {
    monsters: HashMap<&'static str, MonsterDef>,
}

impl MonsterCatalog {
    pub fn builtin() -> Self {
        use Element::*;

        const FOREST_WOLF_LOOT: &[LootEntry] = &[
            entry("wolf_fang", 50, (1, 2)),
            entry("health_potion", 30, (1, 1)),
            entry("iron_sword", 5, (1, 1)),
        ];
        const GOBLIN_SCOUT_LOOT: &[LootEntry] = &[
            entry("health_potion", 40, (1, 1)),
            entry("ancient_rune", 15, (1, 1)),
            entry("iron_helm", 5, (1, 1)),
        ];
        const CAVE_BAT_LOOT: &[LootEntry] = &[
            entry("health_potion", 40, (1, 1)),
            entry("antidote", 20, (1, 1)),
        ];
        const SLIME_LOOT: &[LootEntry] = &[
            entry("health_potion", 60, (1, 2)),
            entry("antidote", 25, (1, 1)),
        ];
        const DARK_KNIGHT_LOOT: &[LootEntry] = &[
            entry("iron_plate", 25, (1, 1)),
            entry("iron_sword", 20, (1, 1)),
            entry("mega_potion", 30, (1, 2)),
            entry("monster_core", 15, (1, 1)),
        ];
        const FIRE_ELEMENTAL_LOOT: &[LootEntry] = &[
            entry("ancient_rune", 30, (1, 2)),
            entry("flame_blade", 10, (1, 1)),
            entry("mana_elixir", 25, (1, 1)),
        ];
        const ICE_GOLEM_LOOT: &[LootEntry] = &[
            entry("mana_elixir", 30, (1, 2)),
            entry("ancient_rune", 20, (1, 3)),
            entry("monster_core", 20, (1, 1)),
        ];
        const SHADOW_ASSASSIN_LOOT: &[LootEntry] = &[
            entry("shadow_fang", 8, (1, 1)),
            entry("swift_amulet", 12, (1, 1)),
            entry("mega_potion", 30, (1, 2)),
        ];
        const ANCIENT_DRAGON_LOOT: &[LootEntry] = &[
            entry("dragon_scale", 15, (1, 1)),
            entry("dragon_scale_mat", 25, (1, 3)),
            entry("dragon_eye", 5, (1, 1)),
            entry("void_crystal", 8, (1, 1)),
            entry("elixir_of_power", 20, (1, 2)),
        ];
        const VOID_LICH_LOOT: &[LootEntry] = &[
            entry("void_crystal", 20, (1, 2)),
            entry("void_scythe", 5, (1, 1)),
            entry("ancient_rune", 30, (2, 5)),
        ];
        const ALPHA_WOLF_LOOT: &[LootEntry] = &[
            entry("wolf_fang", 70, (2, 4)),
            entry("health_potion", 30, (2, 3)),
            entry("swift_amulet", 10, (1, 1)),
        ];
        const GOBLIN_KING_LOOT: &[LootEntry] = &[
            entry("iron_plate", 20, (1, 1)),
            entry("health_ring", 25, (1, 1)),
            entry("ancient_rune", 20, (1, 2)),
        ];
        const OVERLORD_LOOT: &[LootEntry] = &[
            entry("void_crystal", 15, (1, 2)),
            entry("dragon_scale_mat", 20, (1, 3)),
            entry("void_scythe", 5, (1, 1)),
            entry("elixir_of_power", 25, (2, 4)),
            entry("ancient_rune", 20, (3, 6)),
        ];
        const VAMPIRE_LORD_LOOT: &[LootEntry] = &[
            entry("monster_core", 40, (1, 2)),
            entry("void_crystal", 10, (1, 1)),
            entry("mega_potion", 30, (1, 2)),
        ];
        const PHOENIX_LOOT: &[LootEntry] = &[
            entry("dragon_scale_mat", 30, (1, 2)),
            entry("dragon_eye", 8, (1, 1)),
            entry("elixir_of_power", 25, (1, 3)),
        ];

        let defs = vec![
            // ── Tier 1 (levels 1-10) ─────────────────────────────────────────
            MonsterDef {
                id: "forest_wolf",
                name: "Forest Wolf",
                level: 3,
                hp: 60,
                attack: 12,
                defense: 4,
                speed: 14,
                element: Neutral,
                skills: &["bite", "howl"],
                loot_table: FOREST_WOLF_LOOT,
                exp_reward: 25,
                gold_reward: (8, 15),
                elite: false,
                boss: false,
            },
            MonsterDef {
                id: "goblin_scout",
                name: "Goblin Scout",
                level: 2,
                hp: 40,
                attack: 10,
                defense: 3,
                speed: 18,
                element: Neutral,
                skills: &["slash"],
                loot_table: GOBLIN_SCOUT_LOOT,
                exp_reward: 18,
                gold_reward: (5, 12),
                elite: false,
                boss: false,
            },
            MonsterDef {
                id: "cave_bat",
                name: "Cave Bat",
                level: 1,
                hp: 25,
                attack: 8,
                defense: 2,
                speed: 22,
                element: Wind,
                skills: &["sonic_screech"],
                loot_table: CAVE_BAT_LOOT,
                exp_reward: 10,
                gold_reward: (3, 8),
                elite: false,
                boss: false,
            },
            MonsterDef {
                id: "slime",
                name: "Slime",
                level: 1,
                hp: 35,
                attack: 5,
                defense: 8,
                speed: 5,
                element: Water,
                skills: &["acid_splash"],
                loot_table: SLIME_LOOT,
                exp_reward: 8,
                gold_reward: (2, 6),
                elite: false,
                boss: false,
            },
            // ── Tier 2 (levels 10-25) ────────────────────────────────────────
            MonsterDef {
                id: "dark_knight",
                name: "Dark Knight",
                level: 15,
                hp: 220,
                attack: 32,
                defense: 20,
                speed: 10,
                element: Neutral,
                skills: &["power_strike", "shield_bash"],
                loot_table: DARK_KNIGHT_LOOT,
                exp_reward: 120,
                gold_reward: (35, 60),
                elite: false,
                boss: false,
            },
            MonsterDef {
                id: "fire_elemental",
                name: "Fire Elemental",
                level: 18,
                hp: 180,
                attack: 40,
                defense: 10,
                speed: 15,
                element: Fire,
                skills: &["fireball"],
                loot_table: FIRE_ELEMENTAL_LOOT,
                exp_reward: 140,
                gold_reward: (40, 75),
                elite: false,
                boss: false,
            },
            MonsterDef {
                id: "ice_golem",
                name: "Ice Golem",
                level: 20,
                hp: 350,
                attack: 28,
                defense: 35,
                speed: 5,
                element: Water,
                skills: &["blizzard"],
                loot_table: ICE_GOLEM_LOOT,
                exp_reward: 180,
                gold_reward: (50, 90),
                elite: false,
                boss: false,
            },
            MonsterDef {
                id: "shadow_assassin",
                name: "Shadow Assassin",
                level: 22,
                hp: 160,
                attack: 50,
                defense: 12,
                speed: 30,
                element: Neutral,
                skills: &["backstab"],
                loot_table: SHADOW_ASSASSIN_LOOT,
                exp_reward: 200,
                gold_reward: (60, 100),
                elite: false,
                boss: false,
            },
            // ── Tier 3 (levels 30-60) ────────────────────────────────────────
            MonsterDef {
                id: "ancient_dragon",
                name: "Ancient Dragon",
                level: 45,
                hp: 1200,
                attack: 95,
                defense: 55,
                speed: 20,
                element: Fire,
                skills: &["dragon_breath", "fireball"],
                loot_table: ANCIENT_DRAGON_LOOT,
                exp_reward: 1500,
                gold_reward: (400, 800),
                elite: false,
                boss: false,
            },
            MonsterDef {
                id: "void_lich",
                name: "Void Lich",
                level: 55,
                hp: 900,
                attack: 120,
                defense: 30,
                speed: 18,
                element: Neutral,
                skills: &["void_bolt", "death_mark"],
                loot_table: VOID_LICH_LOOT,
                exp_reward: 2000,
                gold_reward: (600, 1200),
                elite: false,
                boss: false,
            },
            // ── Elite variants ───────────────────────────────────────────────
            MonsterDef {
                id: "alpha_wolf",
                name: "Alpha Wolf",
                level: 8,
                hp: 150,
                attack: 28,
                defense: 12,
                speed: 20,
                element: Neutral,
                skills: &["bite", "howl"],
                loot_table: ALPHA_WOLF_LOOT,
                exp_reward: 80,
                gold_reward: (20, 40),
                elite: true,
                boss: false,
            },
            MonsterDef {
                id: "goblin_king",
                name: "Goblin King",
                level: 10,
                hp: 180,
                attack: 22,
                defense: 15,
                speed: 12,
                element: Neutral,
                skills: &["slash", "power_strike"],
                loot_table: GOBLIN_KING_LOOT,
                exp_reward: 100,
                gold_reward: (50, 90),
                elite: true,
                boss: false,
            },
            // ── Bosses ───────────────────────────────────────────────────────
            MonsterDef {
                id: "dungeon_overlord",
                name: "Dungeon Overlord",
                level: 30,
                hp: 600,
                attack: 75,
                defense: 40,
                speed: 15,
                element: Neutral,
                skills: &["power_strike", "berserker_rage", "death_mark"],
                loot_table: OVERLORD_LOOT,
                exp_reward: 800,
                gold_reward: (200, 400),
                elite: false,
                boss: true,
            },
            MonsterDef {
                id: "vampire_lord",
                name: "Vampire Lord",
                level: 25,
                hp: 800,
                attack: 55,
                defense: 35,
                speed: 40,
                element: Dark,
                skills: &["blood_drain"],
                loot_table: VAMPIRE_LORD_LOOT,
                exp_reward: 192,
                gold_reward: (140, 245),
                elite: true,
                boss: true,
            },
            MonsterDef {
                id: "phoenix",
                name: "Phoenix",
                level: 62,
                hp: 2600,
                attack: 120,
                defense: 50,
                speed: 80,
                element: Fire,
                skills: &["fireball", "dragon_breath"],
                loot_table: PHOENIX_LOOT,
                exp_reward: 760,
                gold_reward: (560, 910),
                elite: true,
                boss: true,
            },
        ];

        let monsters = defs.into_iter().map(|d| (d.id, d)).collect();
        Self { monsters }
    }

    pub fn get(&self, id: &str) -> Option<&MonsterDef> {
        self.monsters.get(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &MonsterDef> {
        self.monsters.values()
    }

    /// Non-elite, non-boss monsters suitable for a player level (base level up
    /// to five above the player is allowed).
    pub fn monsters_for_level(&self, level: u32) -> Vec<&MonsterDef> {
        let mut pool: Vec<_> = self
            .monsters
            .values()
            .filter(|m| !m.boss && !m.elite && m.level <= level + 5)
            .collect();
        pool.sort_by_key(|m| m.id);
        pool
    }

    /// Pick and scale a random encounter for a player. Rolls the elite pool
    /// first at `elite_chance`; falls back to the level-appropriate pool, and to
    /// the weakest scout if even that is empty.
    pub fn random_monster(
        &self,
        rng: &mut impl Rng,
        player_level: u32,
        elite_chance: f64,
    ) -> MonsterDef {
        if chance(rng, elite_chance) {
            let mut elites: Vec<_> = self
                .monsters
                .values()
                .filter(|m| m.elite && !m.boss && m.level <= player_level + 5)
                .collect();
            elites.sort_by_key(|m| m.id);
            if let Some(elite) = pick(rng, &elites) {
                return scale_monster(elite, player_level);
            }
        }
        let pool = self.monsters_for_level(player_level);
        match pick(rng, &pool) {
            Some(monster) => scale_monster(monster, player_level),
            None => scale_monster(
                self.monsters.get("goblin_scout").expect("builtin scout"),
                player_level,
            ),
        }
    }
}

/// Scale a monster up toward the player's level: +8% hp/attack/defense/gold per
/// level above its base, +5% exp. Monsters never scale down.
pub fn scale_monster(base: &MonsterDef, player_level: u32) -> MonsterDef {
    let level_diff = player_level.saturating_sub(base.level) as f64;
    let scale = 1.0 + level_diff * 0.08;
    let exp_scale = 1.0 + level_diff * 0.05;

    let mut scaled = base.clone();
    scaled.hp = (base.hp as f64 * scale).floor() as i64;
    scaled.attack = (base.attack as f64 * scale).floor() as i64;
    scaled.defense = (base.defense as f64 * scale).floor() as i64;
    scaled.exp_reward = (base.exp_reward as f64 * exp_scale).floor() as i64;
    scaled.gold_reward = (
        (base.gold_reward.0 as f64 * scale).floor() as i64,
        (base.gold_reward.1 as f64 * scale).floor() as i64,
    );
    scaled
}

/// Roll the monster's loot table: one independent trial per entry at
/// `(weight + luck_bonus*5)` percent. Returns zero or more drops.
pub fn roll_loot(monster: &MonsterDef, luck_bonus: f64, rng: &mut impl Rng) -> Vec<LootDrop> {
    let mut drops = Vec::new();
    for entry in monster.loot_table {
        let p = (entry.weight as f64 + luck_bonus * 5.0) / 100.0;
        if chance(rng, p) {
            let qty = rand_int(rng, entry.qty.0, entry.qty.1);
            drops.push(LootDrop {
                item_id: entry.item_id.to_string(),
                qty,
            });
        }
    }
    drops
}

/// Roll a gold reward in the monster's inclusive range.
pub fn roll_gold(monster: &MonsterDef, rng: &mut impl Rng) -> i64 {
    rand_int(rng, monster.gold_reward.0, monster.gold_reward.1)
}
