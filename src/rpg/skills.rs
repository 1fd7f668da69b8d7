//! Skill definitions, referenced by id and resolved at battle time.
//!
//! A skill is data: a mana cost, a cooldown, and an effect description the
//! battle engine interprets. Unknown ids never error; the battle engine falls
//! back to a basic attack, so stale ids in old player records stay harmless.

use std::collections::HashMap;

use crate::rpg::status::{EffectKind, StatusEffect};
use crate::rpg::types::Element;

/// A status applied by a skill, with an application chance and an optional
/// rescale of DoT damage relative to the damage the skill dealt.
#[derive(Debug, Clone)]
pub struct StatusProc {
    pub chance: f64,
    pub effect: StatusEffect,
    /// When set, a `DamageOverTime` effect's per-turn damage is recomputed as
    /// this fraction of the damage actually dealt.
    pub scale_with_damage: Option<f64>,
}

impl StatusProc {
    fn always(effect: StatusEffect) -> Self {
        Self {
            chance: 1.0,
            effect,
            scale_with_damage: None,
        }
    }
}

/// What a skill does when it resolves.
#[derive(Debug, Clone)]
pub enum SkillEffect {
    /// Direct damage: `hits x (attack x attack_mult - defense x defense_factor)`,
    /// each hit floored at 1, with an optional status applied to the target.
    Damage {
        attack_mult: f64,
        defense_factor: f64,
        hits: u32,
        status: Option<StatusProc>,
    },
    /// Buffs applied to the user.
    SelfBuff { effects: Vec<StatusEffect> },
}

#[derive(Debug, Clone)]
pub struct SkillDef {
    pub id: &'static str,
    pub name: &'static str,
    /// Classes that learn this skill; empty means monster-only.
    pub classes: &'static [&'static str],
    pub mana_cost: i64,
    pub cooldown: u32,
    pub element: Element,
    pub effect: SkillEffect,
}

/// Read-only skill lookup table.
pub struct SkillBook {
    skills: HashMap<&'static str, SkillDef>,
}

impl SkillBook {
    pub fn builtin() -> Self {
        use Element::*;
        use SkillEffect::*;

        fn strike(
            id: &'static str,
            name: &'static str,
            classes: &'static [&'static str],
            mana_cost: i64,
            cooldown: u32,
            element: Element,
            attack_mult: f64,
            defense_factor: f64,
        ) -> SkillDef {
            SkillDef {
                id,
                name,
                classes,
                mana_cost,
                cooldown,
                element,
                effect: Damage {
                    attack_mult,
                    defense_factor,
                    hits: 1,
                    status: None,
                },
            }
        }

        let defs = vec![
            // ── Warrior ──────────────────────────────────────────────────────
            strike(
                "power_strike",
                "Power Strike",
                &["Warrior"],
                15,
                2,
                Neutral,
                1.5,
                0.5,
            ),
            SkillDef {
                id: "shield_bash",
                name: "Shield Bash",
                classes: &["Warrior"],
                mana_cost: 10,
                cooldown: 3,
                element: Neutral,
                effect: Damage {
                    attack_mult: 0.8,
                    defense_factor: 1.0,
                    hits: 1,
                    status: Some(StatusProc::always(StatusEffect::stun(1))),
                },
            },
            SkillDef {
                id: "berserker_rage",
                name: "Berserker Rage",
                classes: &["Warrior"],
                mana_cost: 30,
                cooldown: 5,
                element: Neutral,
                effect: SelfBuff {
                    effects: vec![
                        StatusEffect::new(
                            "atk_up",
                            Some(3),
                            EffectKind::AttackMult { factor: 1.5 },
                        ),
                        StatusEffect::new(
                            "def_down",
                            Some(3),
                            EffectKind::DefenseMult { factor: 0.7 },
                        ),
                    ],
                },
            },
            // ── Mage ─────────────────────────────────────────────────────────
            SkillDef {
                id: "fireball",
                name: "Fireball",
                classes: &["Mage"],
                mana_cost: 25,
                cooldown: 2,
                element: Fire,
                effect: Damage {
                    attack_mult: 1.7,
                    defense_factor: 0.5,
                    hits: 1,
                    status: Some(StatusProc {
                        chance: 0.3,
                        effect: StatusEffect::burn(0, 3),
                        scale_with_damage: Some(0.1),
                    }),
                },
            },
            strike(
                "arcane_bolt",
                "Arcane Bolt",
                &["Mage"],
                12,
                1,
                Neutral,
                1.2,
                0.6,
            ),
            SkillDef {
                id: "blizzard",
                name: "Blizzard",
                classes: &["Mage"],
                mana_cost: 40,
                cooldown: 4,
                element: Water,
                effect: Damage {
                    attack_mult: 2.0,
                    defense_factor: 0.4,
                    hits: 1,
                    status: Some(StatusProc::always(StatusEffect::new(
                        "slow",
                        Some(2),
                        EffectKind::SpeedMult { factor: 0.5 },
                    ))),
                },
            },
            SkillDef {
                id: "mana_shield",
                name: "Mana Shield",
                classes: &["Mage"],
                mana_cost: 20,
                cooldown: 4,
                element: Neutral,
                effect: SelfBuff {
                    effects: vec![StatusEffect::new(
                        "shield",
                        Some(3),
                        EffectKind::AbsorbShield { remaining: 150 },
                    )],
                },
            },
            // ── Archer ───────────────────────────────────────────────────────
            SkillDef {
                id: "rapid_shot",
                name: "Rapid Shot",
                classes: &["Archer"],
                mana_cost: 18,
                cooldown: 2,
                element: Wind,
                effect: Damage {
                    attack_mult: 0.6,
                    defense_factor: 0.3,
                    hits: 3,
                    status: None,
                },
            },
            SkillDef {
                id: "eagle_eye",
                name: "Eagle Eye",
                classes: &["Archer"],
                mana_cost: 15,
                cooldown: 3,
                element: Neutral,
                effect: SelfBuff {
                    effects: vec![StatusEffect::new(
                        "guaranteed_crit",
                        Some(1),
                        EffectKind::GuaranteedCrit,
                    )],
                },
            },
            SkillDef {
                id: "poison_arrow",
                name: "Poison Arrow",
                classes: &["Archer"],
                mana_cost: 20,
                cooldown: 3,
                element: Neutral,
                effect: Damage {
                    attack_mult: 1.1,
                    defense_factor: 0.5,
                    hits: 1,
                    status: Some(StatusProc {
                        chance: 1.0,
                        effect: StatusEffect::poison(0, 4),
                        scale_with_damage: Some(0.15),
                    }),
                },
            },
            // ── Assassin ─────────────────────────────────────────────────────
            strike(
                "backstab",
                "Backstab",
                &["Assassin"],
                16,
                2,
                Neutral,
                1.6,
                0.3,
            ),
            SkillDef {
                id: "shadowstep",
                name: "Shadowstep",
                classes: &["Assassin"],
                mana_cost: 14,
                cooldown: 3,
                element: Neutral,
                effect: SelfBuff {
                    effects: vec![StatusEffect::new(
                        "shadowstep",
                        Some(2),
                        EffectKind::DodgeNextAttack,
                    )],
                },
            },
            // ── Monster-only ─────────────────────────────────────────────────
            strike("bite", "Bite", &[], 5, 1, Neutral, 1.2, 0.4),
            SkillDef {
                id: "howl",
                name: "Howl",
                classes: &[],
                mana_cost: 8,
                cooldown: 3,
                element: Neutral,
                effect: SelfBuff {
                    effects: vec![StatusEffect::new(
                        "howl",
                        Some(2),
                        EffectKind::AttackMult { factor: 1.2 },
                    )],
                },
            },
            strike("slash", "Slash", &[], 5, 1, Neutral, 1.1, 0.5),
            SkillDef {
                id: "sonic_screech",
                name: "Sonic Screech",
                classes: &[],
                mana_cost: 10,
                cooldown: 2,
                element: Wind,
                effect: Damage {
                    attack_mult: 0.9,
                    defense_factor: 0.2,
                    hits: 1,
                    status: Some(StatusProc::always(StatusEffect::new(
                        "slow",
                        Some(2),
                        EffectKind::SpeedMult { factor: 0.7 },
                    ))),
                },
            },
            SkillDef {
                id: "acid_splash",
                name: "Acid Splash",
                classes: &[],
                mana_cost: 8,
                cooldown: 2,
                element: Water,
                effect: Damage {
                    attack_mult: 0.8,
                    defense_factor: 0.3,
                    hits: 1,
                    status: Some(StatusProc::always(StatusEffect::new(
                        "corroded",
                        Some(2),
                        EffectKind::DefenseMult { factor: 0.85 },
                    ))),
                },
            },
            SkillDef {
                id: "dragon_breath",
                name: "Dragon Breath",
                classes: &[],
                mana_cost: 30,
                cooldown: 3,
                element: Fire,
                effect: Damage {
                    attack_mult: 1.8,
                    defense_factor: 0.4,
                    hits: 1,
                    status: Some(StatusProc {
                        chance: 1.0,
                        effect: StatusEffect::burn(0, 2),
                        scale_with_damage: Some(0.1),
                    }),
                },
            },
            strike("void_bolt", "Void Bolt", &[], 20, 2, Neutral, 1.5, 0.2),
            SkillDef {
                id: "death_mark",
                name: "Death Mark",
                classes: &[],
                mana_cost: 25,
                cooldown: 4,
                element: Neutral,
                effect: Damage {
                    attack_mult: 0.6,
                    defense_factor: 0.5,
                    hits: 1,
                    status: Some(StatusProc::always(StatusEffect::new(
                        "death_mark",
                        Some(3),
                        EffectKind::DamageReceivedMult { factor: 1.3 },
                    ))),
                },
            },
            strike("blood_drain", "Blood Drain", &[], 15, 2, Element::Dark, 1.2, 0.4),
        ];

        let skills = defs.into_iter().map(|d| (d.id, d)).collect();
        Self { skills }
    }

    pub fn get(&self, id: &str) -> Option<&SkillDef> {
        self.skills.get(id)
    }

    /// Skills a class can learn at creation.
    pub fn starters_for_class(&self, class: &str) -> Vec<&'static str> {
        match class {
            "Warrior" => vec!["power_strike", "shield_bash"],
            "Mage" => vec!["fireball", "arcane_bolt"],
            "Archer" => vec!["rapid_shot", "eagle_eye"],
            "Assassin" => vec!["backstab", "shadowstep"],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_and_unknown() {
        let book = SkillBook::builtin();
        assert!(book.get("power_strike").is_some());
        assert!(book.get("spell_of_undefined_behavior").is_none());
    }

    #[test]
    fn monster_skill_ids_resolve() {
        let book = SkillBook::builtin();
        let catalog = crate::rpg::monsters::MonsterCatalog::builtin();
        for monster in catalog.all() {
            for skill_id in monster.skills {
                assert!(
                    book.get(skill_id).is_some(),
                    "{} references unknown skill {skill_id}",
                    monster.id
                );
            }
        }
    }

    #[test]
    fn starters_are_known_skills() {
        let book = SkillBook::builtin();
        for class in ["Warrior", "Mage", "Archer", "Assassin"] {
            for id in book.starters_for_class(class) {
                assert!(book.get(id).is_some());
            }
        }
    }
}
