//! Status effects: named, possibly duration-limited combat modifiers.
//!
//! Each effect is a tagged variant carrying only the fields it needs, resolved
//! with exhaustive matches in the battle code. An entity never holds two
//! effects with the same id; re-applying an id replaces the old instance.

use serde::{Deserialize, Serialize};

/// What an effect does each turn or while present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EffectKind {
    /// Skip the afflicted side's action.
    Stun,
    /// Damage applied at the start of each of the holder's turns.
    DamageOverTime { per_turn: i64 },
    /// Multiplies outgoing attack.
    AttackMult { factor: f64 },
    /// Multiplies effective defense.
    DefenseMult { factor: f64 },
    /// Multiplies speed (miss calculations).
    SpeedMult { factor: f64 },
    /// Additive critical chance.
    CritBonus { amount: f64 },
    /// Next attack is always critical.
    GuaranteedCrit,
    /// Multiplies damage the holder receives.
    DamageReceivedMult { factor: f64 },
    /// Flat pool absorbing incoming damage before HP.
    AbsorbShield { remaining: i64 },
    /// The holder dodges the next attack outright.
    DodgeNextAttack,
    /// Fraction of received damage reflected back at the attacker.
    Counter { percent: f64 },
}

/// A named effect instance attached to a battle entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: String,
    /// Remaining turns; `None` lasts the whole battle.
    pub duration: Option<u32>,
    #[serde(flatten)]
    pub kind: EffectKind,
}

impl StatusEffect {
    pub fn new(id: impl Into<String>, duration: Option<u32>, kind: EffectKind) -> Self {
        Self {
            id: id.into(),
            duration,
            kind,
        }
    }

    pub fn stun(duration: u32) -> Self {
        Self::new("stun", Some(duration), EffectKind::Stun)
    }

    pub fn burn(per_turn: i64, duration: u32) -> Self {
        Self::new(
            "burn",
            Some(duration),
            EffectKind::DamageOverTime { per_turn },
        )
    }

    pub fn poison(per_turn: i64, duration: u32) -> Self {
        Self::new(
            "poison",
            Some(duration),
            EffectKind::DamageOverTime { per_turn },
        )
    }
}

/// Attach an effect, replacing any existing effect with the same id.
pub fn apply_effect(effects: &mut Vec<StatusEffect>, effect: StatusEffect) {
    effects.retain(|e| e.id != effect.id);
    effects.push(effect);
}

/// Outcome of ticking an entity's effects at the start of its turn.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TickOutcome {
    /// Total damage-over-time applied this tick.
    pub dot_damage: i64,
    /// Effect ids that expired and were removed.
    pub expired: Vec<String>,
}

/// Apply DoT, decrement durations, and drop expired effects. An effect whose
/// duration reaches zero after ticking is removed at the end of this tick.
pub fn tick_effects(effects: &mut Vec<StatusEffect>) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    let mut remaining = Vec::with_capacity(effects.len());
    for mut effect in effects.drain(..) {
        if let EffectKind::DamageOverTime { per_turn } = effect.kind {
            outcome.dot_damage += per_turn;
        }
        match effect.duration {
            Some(turns) => {
                let left = turns.saturating_sub(1);
                if left > 0 {
                    effect.duration = Some(left);
                    remaining.push(effect);
                } else {
                    outcome.expired.push(effect.id);
                }
            }
            None => remaining.push(effect),
        }
    }
    *effects = remaining;
    outcome
}

/// Product of all attack multipliers currently held.
pub fn attack_mult(effects: &[StatusEffect]) -> f64 {
    effects
        .iter()
        .filter_map(|e| match e.kind {
            EffectKind::AttackMult { factor } => Some(factor),
            _ => None,
        })
        .product()
}

pub fn defense_mult(effects: &[StatusEffect]) -> f64 {
    effects
        .iter()
        .filter_map(|e| match e.kind {
            EffectKind::DefenseMult { factor } => Some(factor),
            _ => None,
        })
        .product()
}

pub fn speed_mult(effects: &[StatusEffect]) -> f64 {
    effects
        .iter()
        .filter_map(|e| match e.kind {
            EffectKind::SpeedMult { factor } => Some(factor),
            _ => None,
        })
        .product()
}

/// Additional crit chance from effects.
pub fn crit_bonus(effects: &[StatusEffect]) -> f64 {
    effects
        .iter()
        .filter_map(|e| match e.kind {
            EffectKind::CritBonus { amount } => Some(amount),
            _ => None,
        })
        .sum()
}

pub fn has_guaranteed_crit(effects: &[StatusEffect]) -> bool {
    effects
        .iter()
        .any(|e| matches!(e.kind, EffectKind::GuaranteedCrit))
}

/// Consume a one-shot guaranteed-crit effect after the attack lands.
pub fn consume_guaranteed_crit(effects: &mut Vec<StatusEffect>) {
    effects.retain(|e| !matches!(e.kind, EffectKind::GuaranteedCrit));
}

pub fn is_stunned(effects: &[StatusEffect]) -> bool {
    effects.iter().any(|e| matches!(e.kind, EffectKind::Stun))
}

/// Multiplier on damage the holder receives.
pub fn damage_received_mult(effects: &[StatusEffect]) -> f64 {
    effects
        .iter()
        .filter_map(|e| match e.kind {
            EffectKind::DamageReceivedMult { factor } => Some(factor),
            _ => None,
        })
        .product()
}

/// Route `damage` through any absorb shields, draining them in place. Returns
/// the damage that actually reaches HP. Fully drained shields are removed.
pub fn absorb_damage(effects: &mut Vec<StatusEffect>, mut damage: i64) -> i64 {
    for effect in effects.iter_mut() {
        if damage <= 0 {
            break;
        }
        if let EffectKind::AbsorbShield { remaining } = &mut effect.kind {
            let absorbed = damage.min(*remaining);
            *remaining -= absorbed;
            damage -= absorbed;
        }
    }
    effects.retain(|e| !matches!(e.kind, EffectKind::AbsorbShield { remaining: 0 }));
    damage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_replaces() {
        let mut effects = Vec::new();
        apply_effect(&mut effects, StatusEffect::burn(5, 3));
        apply_effect(&mut effects, StatusEffect::burn(9, 2));
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].kind, EffectKind::DamageOverTime { per_turn: 9 });
    }

    #[test]
    fn tick_applies_dot_and_expires() {
        let mut effects = vec![StatusEffect::burn(7, 2), StatusEffect::stun(1)];
        let outcome = tick_effects(&mut effects);
        assert_eq!(outcome.dot_damage, 7);
        assert_eq!(outcome.expired, vec!["stun".to_string()]);
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].duration, Some(1));

        let outcome = tick_effects(&mut effects);
        assert_eq!(outcome.dot_damage, 7, "dot applies on its final tick too");
        assert!(effects.is_empty());
    }

    #[test]
    fn indefinite_effects_survive_ticks() {
        let mut effects = vec![StatusEffect::new(
            "death_mark",
            None,
            EffectKind::DamageReceivedMult { factor: 1.5 },
        )];
        for _ in 0..10 {
            tick_effects(&mut effects);
        }
        assert_eq!(effects.len(), 1);
        assert_eq!(damage_received_mult(&effects), 1.5);
    }

    #[test]
    fn multipliers_combine_as_products() {
        let effects = vec![
            StatusEffect::new("atk_up", Some(3), EffectKind::AttackMult { factor: 1.5 }),
            StatusEffect::new("weaken", Some(3), EffectKind::AttackMult { factor: 0.8 }),
        ];
        assert!((attack_mult(&effects) - 1.2).abs() < 1e-9);
        assert_eq!(defense_mult(&effects), 1.0);
    }

    #[test]
    fn shield_absorbs_then_drains() {
        let mut effects = vec![StatusEffect::new(
            "shield",
            Some(3),
            EffectKind::AbsorbShield { remaining: 100 },
        )];
        assert_eq!(absorb_damage(&mut effects, 60), 0);
        assert_eq!(absorb_damage(&mut effects, 60), 20);
        assert!(effects.is_empty(), "drained shield is removed");
    }
}
