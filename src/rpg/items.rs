//! Item registry: the read-only table both engines consult.
//!
//! Definitions are plain data. Rarity drives the fixed price-multiplier and
//! volatility tables in [`Rarity`]; nothing here is computed at runtime beyond
//! building the lookup map once.

use std::collections::HashMap;

use rand::Rng;

use crate::rng::weighted_pick;
use crate::rpg::types::{Element, ItemKind, Rarity, StatBonus};

/// Static definition of a tradable/equippable item.
#[derive(Debug, Clone)]
pub struct ItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ItemKind,
    pub rarity: Rarity,
    /// Gold value before the rarity price multiplier.
    pub base_value: i64,
    pub element: Element,
    /// Stat bonuses granted while equipped.
    pub stats: StatBonus,
    pub description: &'static str,
}

/// Drop weights used by [`ItemCatalog::roll_rarity`].
const RARITY_WEIGHTS: [(Rarity, u32); 5] = [
    (Rarity::Common, 55),
    (Rarity::Rare, 25),
    (Rarity::Epic, 12),
    (Rarity::Legendary, 6),
    (Rarity::Mythic, 2),
];

/// Read-only item lookup table.
pub struct ItemCatalog {
    items: HashMap<&'static str, ItemDef>,
}

fn def(
    id: &'static str,
    name: &'static str,
    kind: ItemKind,
    rarity: Rarity,
    base_value: i64,
    description: &'static str,
) -> ItemDef {
    ItemDef {
        id,
        name,
        kind,
        rarity,
        base_value,
        element: Element::Neutral,
        stats: StatBonus::default(),
        description,
    }
}

impl ItemCatalog {
    /// The built-in registry.
    pub fn builtin() -> Self {
        use ItemKind::*;
        use Rarity::*;

        let defs = vec![
            // ── Weapons ──────────────────────────────────────────────────────
            ItemDef {
                stats: StatBonus {
                    attack: 8,
                    ..Default::default()
                },
                ..def(
                    "iron_sword",
                    "Iron Sword",
                    Weapon,
                    Common,
                    120,
                    "A basic but reliable iron sword.",
                )
            },
            ItemDef {
                element: Element::Fire,
                stats: StatBonus {
                    attack: 18,
                    speed: 2,
                    ..Default::default()
                },
                ..def(
                    "flame_blade",
                    "Flame Blade",
                    Weapon,
                    Rare,
                    450,
                    "A sword wreathed in eternal fire.",
                )
            },
            ItemDef {
                element: Element::Wind,
                stats: StatBonus {
                    attack: 15,
                    speed: 5,
                    ..Default::default()
                },
                ..def(
                    "storm_bow",
                    "Storm Bow",
                    Weapon,
                    Rare,
                    400,
                    "Arrows fly like lightning.",
                )
            },
            ItemDef {
                stats: StatBonus {
                    attack: 20,
                    max_mana: 40,
                    ..Default::default()
                },
                ..def(
                    "arcane_staff",
                    "Arcane Staff",
                    Weapon,
                    Rare,
                    480,
                    "Channels arcane power efficiently.",
                )
            },
            ItemDef {
                stats: StatBonus {
                    attack: 28,
                    speed: 8,
                    crit_bonus: 0.10,
                    ..Default::default()
                },
                ..def(
                    "shadow_fang",
                    "Shadow Fang",
                    Weapon,
                    Epic,
                    1200,
                    "Forged in shadow. Strikes before enemies react.",
                )
            },
            ItemDef {
                stats: StatBonus {
                    attack: 55,
                    speed: 10,
                    crit_bonus: 0.15,
                    ..Default::default()
                },
                ..def(
                    "void_scythe",
                    "Void Scythe",
                    Weapon,
                    Legendary,
                    5000,
                    "A weapon that devours the souls of the fallen.",
                )
            },
            ItemDef {
                stats: StatBonus {
                    attack: 100,
                    speed: 20,
                    max_hp: 50,
                    crit_bonus: 0.25,
                    ..Default::default()
                },
                ..def(
                    "gods_edge",
                    "God's Edge",
                    Weapon,
                    Mythic,
                    50000,
                    "A blade said to have split the sky itself.",
                )
            },
            // ── Armor ────────────────────────────────────────────────────────
            ItemDef {
                stats: StatBonus {
                    defense: 6,
                    ..Default::default()
                },
                ..def(
                    "leather_vest",
                    "Leather Vest",
                    Armor,
                    Common,
                    80,
                    "Light protection from beast claws.",
                )
            },
            ItemDef {
                stats: StatBonus {
                    defense: 14,
                    speed: -2,
                    ..Default::default()
                },
                ..def(
                    "iron_plate",
                    "Iron Plate",
                    Armor,
                    Common,
                    150,
                    "Heavy iron plating. Slows you down.",
                )
            },
            ItemDef {
                stats: StatBonus {
                    defense: 5,
                    attack: 5,
                    max_mana: 60,
                    ..Default::default()
                },
                ..def(
                    "mage_robe",
                    "Arcane Robe",
                    Armor,
                    Rare,
                    360,
                    "Woven from concentrated mana crystals.",
                )
            },
            ItemDef {
                element: Element::Fire,
                stats: StatBonus {
                    defense: 35,
                    max_hp: 80,
                    ..Default::default()
                },
                ..def(
                    "dragon_scale",
                    "Dragon Scale Armor",
                    Armor,
                    Epic,
                    2200,
                    "Scales shed by an ancient fire dragon.",
                )
            },
            ItemDef {
                stats: StatBonus {
                    defense: 60,
                    max_hp: 150,
                    speed: -3,
                    ..Default::default()
                },
                ..def(
                    "void_plate",
                    "Void Plate",
                    Armor,
                    Legendary,
                    6000,
                    "Armor pulled from the void between worlds.",
                )
            },
            // ── Helmets ──────────────────────────────────────────────────────
            ItemDef {
                stats: StatBonus {
                    defense: 5,
                    max_hp: 10,
                    ..Default::default()
                },
                ..def(
                    "iron_helm",
                    "Iron Helm",
                    Helmet,
                    Common,
                    90,
                    "Protects the skull, mostly.",
                )
            },
            ItemDef {
                stats: StatBonus {
                    attack: 10,
                    defense: 8,
                    max_mana: 100,
                    ..Default::default()
                },
                ..def(
                    "crown_of_wisdom",
                    "Crown of Wisdom",
                    Helmet,
                    Epic,
                    1800,
                    "Said to amplify the mind of the wearer.",
                )
            },
            // ── Accessories ──────────────────────────────────────────────────
            ItemDef {
                stats: StatBonus {
                    max_hp: 30,
                    ..Default::default()
                },
                ..def(
                    "health_ring",
                    "Ring of Vitality",
                    Accessory,
                    Common,
                    100,
                    "A warm ring that pulses with life energy.",
                )
            },
            ItemDef {
                element: Element::Wind,
                stats: StatBonus {
                    speed: 10,
                    ..Default::default()
                },
                ..def(
                    "swift_amulet",
                    "Swift Amulet",
                    Accessory,
                    Rare,
                    320,
                    "Move like the wind.",
                )
            },
            ItemDef {
                element: Element::Fire,
                stats: StatBonus {
                    attack: 20,
                    speed: 15,
                    max_hp: 50,
                    crit_bonus: 0.20,
                    ..Default::default()
                },
                ..def(
                    "dragon_eye",
                    "Dragon's Eye",
                    Accessory,
                    Legendary,
                    8000,
                    "The crystallized eye of a slain dragon.",
                )
            },
            // ── Consumables ──────────────────────────────────────────────────
            def(
                "health_potion",
                "Health Potion",
                Consumable,
                Common,
                50,
                "Restores 60 HP instantly.",
            ),
            def(
                "mega_potion",
                "Mega Potion",
                Consumable,
                Rare,
                180,
                "Fully restores HP for most adventurers.",
            ),
            def(
                "mana_elixir",
                "Mana Elixir",
                Consumable,
                Rare,
                150,
                "Restores 100 mana immediately.",
            ),
            def(
                "elixir_of_power",
                "Elixir of Power",
                Consumable,
                Epic,
                600,
                "The alchemist's masterwork.",
            ),
            def(
                "antidote",
                "Antidote",
                Consumable,
                Common,
                40,
                "Neutralizes all poisons.",
            ),
            // ── Materials ────────────────────────────────────────────────────
            def(
                "wolf_fang",
                "Wolf Fang",
                Material,
                Common,
                25,
                "A sharp fang. Used in weapon crafting.",
            ),
            def(
                "ancient_rune",
                "Ancient Rune",
                Material,
                Rare,
                200,
                "Inscribed by a forgotten civilization.",
            ),
            def(
                "monster_core",
                "Monster Core",
                Material,
                Rare,
                150,
                "The crystallized essence of a slain monster.",
            ),
            def(
                "dragon_scale_mat",
                "Dragon Scale (Material)",
                Material,
                Epic,
                800,
                "Crafting material from dragon hide.",
            ),
            def(
                "void_crystal",
                "Void Crystal",
                Material,
                Legendary,
                3000,
                "A crystallized fragment of nothingness.",
            ),
        ];

        let items = defs.into_iter().map(|d| (d.id, d)).collect();
        Self { items }
    }

    pub fn get(&self, id: &str) -> Option<&ItemDef> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &ItemDef> {
        self.items.values()
    }

    pub fn by_kind(&self, kind: ItemKind) -> Vec<&ItemDef> {
        let mut out: Vec<_> = self.items.values().filter(|i| i.kind == kind).collect();
        out.sort_by_key(|i| i.id);
        out
    }

    pub fn by_rarity(&self, rarity: Rarity) -> Vec<&ItemDef> {
        let mut out: Vec<_> = self.items.values().filter(|i| i.rarity == rarity).collect();
        out.sort_by_key(|i| i.id);
        out
    }

    /// Market base price: base value times the rarity multiplier, floored.
    pub fn market_base_price(item: &ItemDef) -> i64 {
        (item.base_value as f64 * item.rarity.price_multiplier()).floor() as i64
    }

    /// Roll a drop rarity. `luck_bonus` shifts weight away from Common toward
    /// the higher tiers.
    pub fn roll_rarity(&self, rng: &mut impl Rng, luck_bonus: f64) -> Rarity {
        let weights: Vec<(Rarity, u32)> = RARITY_WEIGHTS
            .iter()
            .map(|&(rarity, weight)| {
                let adjusted = if rarity == Rarity::Common {
                    ((weight as f64) - luck_bonus * 10.0).max(5.0)
                } else {
                    (weight as f64) + luck_bonus * 2.0
                };
                (rarity, adjusted.round() as u32)
            })
            .collect();
        *weighted_pick(rng, &weights).expect("rarity table is non-empty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn builtin_catalog_lookups() {
        let catalog = ItemCatalog::builtin();
        let sword = catalog.get("iron_sword").expect("present");
        assert_eq!(sword.base_value, 120);
        assert_eq!(sword.rarity, Rarity::Common);
        assert!(catalog.get("nonexistent").is_none());
    }

    #[test]
    fn market_base_price_applies_rarity_multiplier() {
        let catalog = ItemCatalog::builtin();
        let sword = catalog.get("iron_sword").unwrap();
        assert_eq!(ItemCatalog::market_base_price(sword), 120); // Common x1
        let scythe = catalog.get("void_scythe").unwrap();
        assert_eq!(ItemCatalog::market_base_price(scythe), 125_000); // Legendary x25
    }

    #[test]
    fn by_kind_partitions() {
        let catalog = ItemCatalog::builtin();
        let consumables = catalog.by_kind(ItemKind::Consumable);
        assert!(consumables.iter().all(|i| i.kind == ItemKind::Consumable));
        assert!(consumables.iter().any(|i| i.id == "health_potion"));
    }

    #[test]
    fn luck_shifts_rarity_away_from_common() {
        let mut rng = StdRng::seed_from_u64(17);
        let catalog = ItemCatalog::builtin();
        let commons_no_luck = (0..2000)
            .filter(|_| catalog.roll_rarity(&mut rng, 0.0) == Rarity::Common)
            .count();
        let commons_lucky = (0..2000)
            .filter(|_| catalog.roll_rarity(&mut rng, 5.0) == Rarity::Common)
            .count();
        assert!(commons_lucky < commons_no_luck);
    }
}
