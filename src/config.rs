//! # Configuration Management Module
//!
//! Tuning knobs for the economy and battle engines, loadable from a TOML file
//! with sensible defaults for every value. The embedding bot typically ships a
//! `grimvale.toml` next to its own configuration; when the file is absent the
//! defaults below apply unchanged.
//!
//! ## Configuration File Format
//!
//! ```toml
//! [economy]
//! tick_interval_mins = 5
//! mean_reversion_rate = 0.02
//! demand_decay_rate = 0.1
//! shop_sell_ratio = 0.6
//!
//! [rpg]
//! crit_chance_base = 0.10
//! miss_chance_base = 0.05
//! damage_variance = 0.15
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Economy engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// How often the external scheduler is expected to call `economy_tick`, minutes.
    /// Informational; the engine never self-schedules.
    pub tick_interval_mins: u32,
    /// Fraction of the gap to base price closed per tick.
    pub mean_reversion_rate: f64,
    /// Fraction of the gap to neutral (1.0) closed per tick for demand and supply.
    pub demand_decay_rate: f64,
    /// How much one bought/sold unit moves demand/supply.
    pub demand_impact: f64,
    pub supply_impact: f64,
    /// What the shop pays relative to current price when players sell.
    pub shop_sell_ratio: f64,
    /// Bounds on the pressure multiplier applied to base price.
    pub price_cap: f64,
    pub price_floor: f64,
    /// Shop rotation TTL in seconds and how many equipment pieces rotate in.
    pub shop_rotation_secs: i64,
    pub shop_equipment_slots: usize,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            tick_interval_mins: 5,
            mean_reversion_rate: 0.02,
            demand_decay_rate: 0.1,
            demand_impact: 0.25,
            supply_impact: 0.25,
            shop_sell_ratio: 0.6,
            price_cap: 10.0,
            price_floor: 0.1,
            shop_rotation_secs: 60 * 60,
            shop_equipment_slots: 6,
        }
    }
}

/// Base stats a class starts with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassBase {
    pub hp: i64,
    pub mana: i64,
    pub attack: i64,
    pub defense: i64,
    pub speed: i64,
}

/// Battle and progression tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpgConfig {
    pub max_level: u32,
    pub base_exp_per_level: i64,
    pub exp_scaling_factor: f64,
    pub crit_chance_base: f64,
    pub miss_chance_base: f64,
    pub damage_variance: f64,
    /// Starting stats per class. Keys are class names (`Warrior`, `Mage`, ...).
    pub classes: HashMap<String, ClassBase>,
}

impl Default for RpgConfig {
    fn default() -> Self {
        let mut classes = HashMap::new();
        classes.insert(
            "Warrior".to_string(),
            ClassBase {
                hp: 150,
                mana: 60,
                attack: 18,
                defense: 15,
                speed: 10,
            },
        );
        classes.insert(
            "Mage".to_string(),
            ClassBase {
                hp: 80,
                mana: 200,
                attack: 25,
                defense: 6,
                speed: 12,
            },
        );
        classes.insert(
            "Archer".to_string(),
            ClassBase {
                hp: 100,
                mana: 80,
                attack: 22,
                defense: 8,
                speed: 20,
            },
        );
        classes.insert(
            "Assassin".to_string(),
            ClassBase {
                hp: 90,
                mana: 100,
                attack: 28,
                defense: 7,
                speed: 25,
            },
        );
        classes.insert(
            "Summoner".to_string(),
            ClassBase {
                hp: 85,
                mana: 180,
                attack: 20,
                defense: 9,
                speed: 15,
            },
        );
        Self {
            max_level: 100,
            base_exp_per_level: 100,
            exp_scaling_factor: 1.15,
            crit_chance_base: 0.10,
            miss_chance_base: 0.05,
            damage_variance: 0.15,
            classes,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub economy: EconomyConfig,
    pub rpg: RpgConfig,
}

impl GameConfig {
    /// Load configuration from a TOML file. A missing file yields the defaults;
    /// an unreadable or malformed file is an error the caller should surface.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path).await {
            Ok(raw) => {
                let config: GameConfig = toml::from_str(&raw)
                    .with_context(|| format!("invalid config file {}", path.display()))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("config {} not found, using defaults", path.display());
                Ok(GameConfig::default())
            }
            Err(e) => Err(e).with_context(|| format!("failed reading {}", path.display())),
        }
    }

    /// Write a default configuration file for operators to edit.
    pub async fn create_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let rendered =
            toml::to_string_pretty(&GameConfig::default()).context("serializing defaults")?;
        fs::write(path.as_ref(), rendered).await?;
        Ok(())
    }
}
