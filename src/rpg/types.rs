//! Small shared vocabulary types used across catalogs, economy, and battle.

use serde::{Deserialize, Serialize};

/// Elemental affinity of items, monsters, and attacks.
///
/// The matchup chart is a fixed cycle: fire beats earth, water beats fire,
/// earth beats wind, wind beats water, each at 2.0x one way and 0.5x the
/// other. Everything else (including the exotic boss elements) is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Wind,
    Dark,
    Light,
    Void,
    #[default]
    Neutral,
}

impl Element {
    /// Damage multiplier when `self` attacks `defender`.
    pub fn multiplier_against(self, defender: Element) -> f64 {
        use Element::*;
        match (self, defender) {
            (Fire, Earth) | (Water, Fire) | (Earth, Wind) | (Wind, Water) => 2.0,
            (Fire, Water) | (Water, Earth) | (Earth, Fire) | (Wind, Earth) => 0.5,
            _ => 1.0,
        }
    }
}

/// Item rarity tier. Drives the fixed price-multiplier and volatility tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// Multiplier applied to an item's base value to derive its market base price.
    pub fn price_multiplier(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Rare => 3.0,
            Rarity::Epic => 8.0,
            Rarity::Legendary => 25.0,
            Rarity::Mythic => 100.0,
        }
    }

    /// How fast the market price moves under pressure for this tier.
    pub fn volatility(self) -> f64 {
        match self {
            Rarity::Common => 0.08,
            Rarity::Rare => 0.18,
            Rarity::Epic => 0.35,
            Rarity::Legendary => 0.60,
            Rarity::Mythic => 0.90,
        }
    }
}

/// Broad item category. Shop rotation stocks all consumables plus a random
/// selection of equipment kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Helmet,
    Accessory,
    Consumable,
    Material,
}

impl ItemKind {
    pub fn is_equipment(self) -> bool {
        matches!(
            self,
            ItemKind::Weapon | ItemKind::Armor | ItemKind::Helmet | ItemKind::Accessory
        )
    }
}

/// Additive stat bonuses contributed by equipment, pets, titles, or summons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBonus {
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
    pub hp: i64,
    pub max_hp: i64,
    pub max_mana: i64,
    pub crit_bonus: f64,
}

impl std::ops::AddAssign for StatBonus {
    fn add_assign(&mut self, rhs: Self) {
        self.attack += rhs.attack;
        self.defense += rhs.defense;
        self.speed += rhs.speed;
        self.hp += rhs.hp;
        self.max_hp += rhs.max_hp;
        self.max_mana += rhs.max_mana;
        self.crit_bonus += rhs.crit_bonus;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_cycle_is_symmetric() {
        use Element::*;
        for (strong, weak) in [(Fire, Earth), (Water, Fire), (Earth, Wind), (Wind, Water)] {
            assert_eq!(strong.multiplier_against(weak), 2.0);
            assert_eq!(weak.multiplier_against(strong), 0.5);
        }
        assert_eq!(Fire.multiplier_against(Fire), 1.0);
        assert_eq!(Dark.multiplier_against(Fire), 1.0);
        assert_eq!(Neutral.multiplier_against(Water), 1.0);
    }

    #[test]
    fn rarity_tables_are_fixed() {
        assert_eq!(Rarity::Common.price_multiplier(), 1.0);
        assert_eq!(Rarity::Mythic.price_multiplier(), 100.0);
        assert_eq!(Rarity::Common.volatility(), 0.08);
        assert_eq!(Rarity::Mythic.volatility(), 0.90);
    }
}
