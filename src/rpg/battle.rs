//! Turn-based battle engine.
//!
//! A battle is resolved in full by one call: the engine never persists
//! anything itself. It returns a [`BattleOutcome`] with the narration log and
//! every post-battle mutation the caller should apply to the player record via
//! [`BattleEngine::apply_rewards`].
//!
//! Round structure (max [`MAX_ROUNDS`]):
//! 1. status effects tick for the acting side (DoT, expiry), then a death check
//! 2. a stunned actor skips its action
//! 3. the action resolves: a chosen skill on the opening turn, otherwise a
//!    basic attack with miss/crit/variance/elemental modifiers
//! 4. cooldowns tick down at the end of the round
//!
//! Hitting the round cap without a kill counts as a defeat for the player; a
//! monster you cannot put down has effectively beaten you.

use std::collections::HashMap;

use log::debug;
use rand::Rng;

use crate::config::RpgConfig;
use crate::rng::{apply_variance, chance, clamp_f64, pick, weighted_pick};
use crate::rpg::items::ItemCatalog;
use crate::rpg::monsters::{roll_gold, roll_loot, LootDrop, MonsterDef};
use crate::rpg::player::PlayerRecord;
use crate::rpg::skills::{SkillBook, SkillDef, SkillEffect};
use crate::rpg::status::{self, EffectKind, StatusEffect};
use crate::rpg::types::Element;

pub const MAX_ROUNDS: u32 = 20;
const CRIT_MULT: f64 = 1.8;
const MISS_FLOOR: f64 = 0.02;
const MISS_CAP: f64 = 0.4;
/// Flat casting pool monsters draw from; they have no persisted mana.
const MONSTER_MANA: i64 = 100;
/// Chance a monster opens its turn with a skill instead of a basic attack.
const MONSTER_SKILL_CHANCE: f64 = 0.3;

// Job advancement lines, matched against `PlayerRecord::job` for passives.
const ASSASSIN_LINE: &[&str] = &["Assassin", "Shadow", "Phantom", "Reaper", "Death God", "Sin Eater"];
const ARCHER_LINE: &[&str] = &["Archer", "Ranger", "Sniper", "God Archer", "Beastmaster", "Wild Emperor"];
const BERSERKER_LINE: &[&str] = &["Berserker", "Chaos Lord"];
const PALADIN_LINE: &[&str] = &["Paladin", "Dragon Knight"];
const SNIPER_LINE: &[&str] = &["Sniper", "God Archer"];
const DEATH_GOD_LINE: &[&str] = &["Death God", "Sin Eater"];

fn in_line(line: &[&str], job: &str) -> bool {
    line.iter().any(|j| *j == job)
}

// ── Battle events ────────────────────────────────────────────────────────────

struct BattleEventDef {
    id: &'static str,
    weight: u32,
    message: Option<&'static str>,
}

/// One ambient event is rolled per battle before the first round.
const BATTLE_EVENTS: &[BattleEventDef] = &[
    BattleEventDef {
        id: "nothing",
        weight: 60,
        message: None,
    },
    BattleEventDef {
        id: "adrenaline",
        weight: 10,
        message: Some("Adrenaline surges through you! Attack +20% this battle."),
    },
    BattleEventDef {
        id: "focus",
        weight: 8,
        message: Some("Your mind sharpens. Critical chance +10% this battle."),
    },
    BattleEventDef {
        id: "cursed_ground",
        weight: 6,
        message: Some("Cursed ground saps both fighters. Defense -10% for everyone."),
    },
    BattleEventDef {
        id: "blessed_wind",
        weight: 6,
        message: Some("A blessed wind follows you, mending 10 HP each round."),
    },
    BattleEventDef {
        id: "rage",
        weight: 5,
        message: Some("The monster flies into a rage! Its attack rises 15%."),
    },
    BattleEventDef {
        id: "rare_encounter",
        weight: 5,
        message: Some("A rare encounter! Victory here pays half again as much."),
    },
];

// ── Inputs and outputs ───────────────────────────────────────────────────────

/// Caller-side battle parameters.
#[derive(Debug, Clone)]
pub struct BattleOptions {
    /// Skill to open with on the first turn. Unknown, unlearned, unaffordable,
    /// or cooling-down skills silently fall back to a basic attack.
    pub skill_id: Option<String>,
    /// World-event multiplier on loot quantity.
    pub loot_mult: f64,
    /// World-event multiplier on experience.
    pub exp_mult: f64,
}

impl Default for BattleOptions {
    fn default() -> Self {
        Self {
            skill_id: None,
            loot_mult: 1.0,
            exp_mult: 1.0,
        }
    }
}

/// What the player walks away with (or loses).
#[derive(Debug, Clone, Default)]
pub struct BattleRewards {
    /// Negative on defeat: a tenth of the player's gold.
    pub gold: i64,
    pub exp: i64,
    pub loot: Vec<LootDrop>,
}

/// The full result of a resolved battle.
#[derive(Debug, Clone)]
pub struct BattleOutcome {
    pub player_won: bool,
    pub rounds: u32,
    /// Narration, one line per notable action.
    pub log: Vec<String>,
    pub rewards: BattleRewards,
    pub final_hp: i64,
    pub final_mana: i64,
    pub monster_final_hp: i64,
    /// Total damage the player dealt.
    pub total_damage: i64,
    /// The ambient event rolled for this battle.
    pub event_id: &'static str,
    /// Cooldowns as they stand after the battle, to persist on the record.
    pub skill_cooldowns: HashMap<String, u32>,
}

// ── Combatants ───────────────────────────────────────────────────────────────

struct Combatant {
    name: String,
    attack: i64,
    defense: i64,
    speed: i64,
    hp: i64,
    max_hp: i64,
    mana: i64,
    element: Element,
    effects: Vec<StatusEffect>,
    cooldowns: HashMap<String, u32>,
    skills: Vec<String>,
    crit_bonus: f64,
    never_misses: bool,
    mends_each_third_round: bool,
    awakening_tier: u32,
}

impl Combatant {
    fn effective_defense(&self) -> i64 {
        (self.defense as f64 * status::defense_mult(&self.effects)).floor() as i64
    }

    fn effective_speed(&self) -> i64 {
        (self.speed as f64 * status::speed_mult(&self.effects)).floor() as i64
    }

    /// Awakened fighters hit harder once below half health.
    fn awakening_mult(&self) -> f64 {
        if self.awakening_tier >= 2 && self.hp * 2 < self.max_hp {
            1.15
        } else {
            1.0
        }
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

pub struct BattleEngine {
    items: ItemCatalog,
    skills: SkillBook,
    config: RpgConfig,
}

impl BattleEngine {
    pub fn new(config: RpgConfig) -> Self {
        Self {
            items: ItemCatalog::builtin(),
            skills: SkillBook::builtin(),
            config,
        }
    }

    pub fn items(&self) -> &ItemCatalog {
        &self.items
    }

    pub fn skills(&self) -> &SkillBook {
        &self.skills
    }

    /// Resolve a battle with the ambient RNG.
    pub fn execute(
        &self,
        player: &PlayerRecord,
        monster: &MonsterDef,
        opts: &BattleOptions,
    ) -> BattleOutcome {
        self.execute_with_rng(player, monster, opts, &mut rand::thread_rng())
    }

    /// Resolve a battle with a caller-supplied RNG (tests pass a seeded one).
    pub fn execute_with_rng(
        &self,
        player: &PlayerRecord,
        monster: &MonsterDef,
        opts: &BattleOptions,
        rng: &mut impl Rng,
    ) -> BattleOutcome {
        let mut log = Vec::new();
        let mut hero = self.build_hero(player);
        let mut foe = build_foe(monster);

        let event = roll_event(rng);
        apply_event(event.id, &mut hero, &mut foe);
        if let Some(message) = event.message {
            log.push(message.to_string());
        }
        log.push(format!("{} engages {}!", hero.name, foe.name));

        let player_first =
            hero.effective_speed() >= foe.effective_speed() || chance(rng, 0.6);

        let mut total_damage = 0i64;
        let mut rounds = 0u32;
        let mut hero_down = false;
        let mut foe_down = false;
        let mut opening_skill = opts.skill_id.clone();

        for round in 1..=MAX_ROUNDS {
            rounds = round;

            if event.id == "blessed_wind" && round > 1 && hero.hp > 0 {
                let healed = (hero.max_hp - hero.hp).min(10);
                if healed > 0 {
                    hero.hp += healed;
                    log.push(format!("The blessed wind restores {healed} HP."));
                }
            }

            let order: [bool; 2] = if player_first {
                [true, false]
            } else {
                [false, true]
            };
            for hero_acts in order {
                if hero_acts {
                    if self.hero_turn(
                        &mut hero,
                        &mut foe,
                        round,
                        &mut opening_skill,
                        &mut total_damage,
                        &mut log,
                        rng,
                    ) {
                        hero_down = true;
                    }
                } else if self.foe_turn(&mut hero, &mut foe, &mut log, rng) {
                    hero_down = true;
                }
                // A counter reflection can fell the attacker on their own swing.
                if hero.hp <= 0 {
                    hero_down = true;
                }
                if foe.hp <= 0 {
                    foe_down = true;
                }
                if hero_down || foe_down {
                    break;
                }
            }

            // Cooldowns tick every round, including the one the battle ends on.
            for remaining in hero.cooldowns.values_mut() {
                *remaining = remaining.saturating_sub(1);
            }
            if hero_down || foe_down {
                break;
            }
        }

        let player_won = foe_down && !hero_down;
        let rewards = if player_won {
            log.push(format!("{} is defeated!", foe.name));
            self.victory_rewards(monster, event.id, opts, rng)
        } else {
            if !hero_down {
                log.push(format!(
                    "{} outlasts you; you are forced to retreat.",
                    foe.name
                ));
            } else {
                log.push(format!("{} falls in battle...", hero.name));
            }
            BattleRewards {
                gold: -(player.gold / 10),
                exp: 0,
                loot: Vec::new(),
            }
        };

        debug!(
            "battle: {} vs {} -> {} in {rounds} rounds (event {})",
            player.id,
            monster.id,
            if player_won { "win" } else { "loss" },
            event.id
        );

        BattleOutcome {
            player_won,
            rounds,
            log,
            rewards,
            final_hp: hero.hp.max(0),
            final_mana: hero.mana.max(0),
            monster_final_hp: foe.hp.max(0),
            total_damage,
            event_id: event.id,
            skill_cooldowns: hero.cooldowns,
        }
    }

    /// Fold a battle outcome back into the player record. Returns progression
    /// messages (level ups, summon departure) to append to the battle log.
    pub fn apply_rewards(
        &self,
        player: &mut PlayerRecord,
        outcome: &BattleOutcome,
        rng: &mut impl Rng,
    ) -> Vec<String> {
        let mut messages = Vec::new();

        // Survivors keep their remaining HP; the fallen crawl back at 1.
        player.hp = outcome.final_hp.max(1);
        player.mana = outcome.final_mana;
        player.skill_cooldowns = outcome.skill_cooldowns.clone();
        // Status effects are battle-scoped.
        player.status_effects.clear();

        player.gold = (player.gold + outcome.rewards.gold).max(0);
        for drop in &outcome.rewards.loot {
            player.add_item(&drop.item_id, drop.qty);
        }

        if outcome.player_won {
            player.stats.battles_won += 1;
            player.stats.monsters_killed += 1;
        } else {
            player.stats.battles_lost += 1;
        }
        player.stats.total_damage_dealt += outcome.total_damage;

        messages.extend(player.award_exp(outcome.rewards.exp, &self.config, rng));

        if let Some(summon) = player.active_summon.as_mut() {
            if summon.uses > 0 {
                summon.uses -= 1;
            }
            if summon.uses <= 0 {
                messages.push(format!("{} has departed.", summon.name));
                player.active_summon = None;
            }
        }

        messages
    }

    // ── Combatant construction ───────────────────────────────────────────────

    fn build_hero(&self, player: &PlayerRecord) -> Combatant {
        let bonus = player.total_bonus(&self.items);
        let mut attack = player.attack + bonus.attack;
        let mut defense = player.defense + bonus.defense;
        let speed = player.speed + bonus.speed;
        let max_hp = player.max_hp + bonus.max_hp;
        let mut crit_bonus = bonus.crit_bonus;

        let job = player.job.as_str();
        if in_line(BERSERKER_LINE, job) {
            attack = (attack as f64 * 1.1).floor() as i64;
            defense = (defense as f64 * 0.9).floor() as i64;
        }
        if in_line(ASSASSIN_LINE, job) {
            crit_bonus += 0.12;
        }
        if in_line(ARCHER_LINE, job) {
            crit_bonus += 0.06;
        }
        if in_line(DEATH_GOD_LINE, job) {
            crit_bonus += 0.08;
        }

        // The player's attack element comes from the equipped weapon.
        let element = player
            .equipment
            .weapon
            .as_deref()
            .and_then(|id| self.items.get(id))
            .map(|item| item.element)
            .unwrap_or_default();

        Combatant {
            name: player.name.clone(),
            attack,
            defense,
            speed,
            hp: player.hp.min(max_hp),
            max_hp,
            mana: player.mana,
            element,
            effects: player.status_effects.clone(),
            cooldowns: player.skill_cooldowns.clone(),
            skills: player.skills.clone(),
            crit_bonus,
            never_misses: in_line(SNIPER_LINE, job),
            mends_each_third_round: in_line(PALADIN_LINE, job),
            awakening_tier: player.awakening_tier,
        }
    }

    // ── Turns ────────────────────────────────────────────────────────────────

    /// Returns true when the hero dies during this turn.
    #[allow(clippy::too_many_arguments)]
    fn hero_turn(
        &self,
        hero: &mut Combatant,
        foe: &mut Combatant,
        round: u32,
        opening_skill: &mut Option<String>,
        total_damage: &mut i64,
        log: &mut Vec<String>,
        rng: &mut impl Rng,
    ) -> bool {
        if tick_and_check(hero, log) {
            return true;
        }

        // Paladin-line passive: self-mend every third round.
        if hero.mends_each_third_round && round % 3 == 0 {
            let mend = ((hero.max_hp as f64 * 0.05).floor() as i64)
                .min(hero.max_hp - hero.hp)
                .max(0);
            if mend > 0 {
                hero.hp += mend;
                log.push(format!("{}'s holy vow mends {mend} HP.", hero.name));
            }
        }

        if status::is_stunned(&hero.effects) {
            log.push(format!("{} is stunned and cannot act!", hero.name));
            return false;
        }

        if round == 1 {
            if let Some(skill_id) = opening_skill.take() {
                if let Some(skill) = self.usable_skill(hero, &skill_id) {
                    hero.mana -= skill.mana_cost;
                    hero.cooldowns.insert(skill_id, skill.cooldown);
                    let dealt = resolve_skill(hero, foe, &skill, rng, log);
                    *total_damage += dealt;
                    return false;
                }
                log.push(format!("{} cannot use that skill right now.", hero.name));
            }
        }

        let dealt = self.basic_attack(hero, foe, rng, log);
        *total_damage += dealt;
        false
    }

    fn usable_skill(&self, hero: &Combatant, skill_id: &str) -> Option<SkillDef> {
        if !hero.skills.iter().any(|s| s == skill_id) {
            return None;
        }
        let skill = self.skills.get(skill_id)?;
        if hero.mana < skill.mana_cost {
            return None;
        }
        if hero.cooldowns.get(skill_id).copied().unwrap_or(0) > 0 {
            return None;
        }
        Some(skill.clone())
    }

    /// Returns true when the hero dies during the foe's turn.
    fn foe_turn(
        &self,
        hero: &mut Combatant,
        foe: &mut Combatant,
        log: &mut Vec<String>,
        rng: &mut impl Rng,
    ) -> bool {
        if tick_and_check(foe, log) {
            return false;
        }

        // Tier-3 awakening: a tenth of enemy actions simply fail.
        if hero.awakening_tier >= 3 && chance(rng, 0.10) {
            log.push(format!(
                "{}'s attack is negated by your awakened aura!",
                foe.name
            ));
            return false;
        }

        if status::is_stunned(&foe.effects) {
            log.push(format!("{} is stunned and cannot act!", foe.name));
            return false;
        }

        if !foe.skills.is_empty() && chance(rng, MONSTER_SKILL_CHANCE) {
            let skill_ids = foe.skills.clone();
            if let Some(skill_id) = pick(rng, &skill_ids) {
                if let Some(skill) = self.skills.get(skill_id) {
                    if foe.mana >= skill.mana_cost {
                        foe.mana -= skill.mana_cost;
                        let skill = skill.clone();
                        resolve_skill(foe, hero, &skill, rng, log);
                        return hero.hp <= 0;
                    }
                }
            }
        }

        self.basic_attack(foe, hero, rng, log);
        hero.hp <= 0
    }

    // ── Attacks ──────────────────────────────────────────────────────────────

    /// A plain attack: miss roll, crit roll, variance, defense soak, element.
    /// Returns the damage that reached the defender's HP.
    fn basic_attack(
        &self,
        attacker: &mut Combatant,
        defender: &mut Combatant,
        rng: &mut impl Rng,
        log: &mut Vec<String>,
    ) -> i64 {
        if self.attack_misses(attacker, defender, rng) {
            log.push(format!("{} attacks... and misses!", attacker.name));
            return 0;
        }

        let crit = self.attack_crits(attacker, rng);
        if crit {
            status::consume_guaranteed_crit(&mut attacker.effects);
        }

        let mut mult = status::attack_mult(&attacker.effects) * attacker.awakening_mult();
        if crit {
            mult *= CRIT_MULT;
        }
        let swung = apply_variance(
            rng,
            ((attacker.attack as f64 * mult).floor() as i64).max(1),
            self.config.damage_variance,
        );
        let soaked = (swung - defender.effective_defense() / 2).max(1);
        let elemental = attacker.element.multiplier_against(defender.element);
        let raw = ((soaked as f64 * elemental).floor() as i64).max(1);

        let dealt = deliver(attacker, defender, raw, log);
        if dealt > 0 {
            let mut line = format!("{} hits {} for {dealt} damage", attacker.name, defender.name);
            if crit {
                line.push_str(" (critical!)");
            }
            if elemental > 1.0 {
                line.push_str(" (super effective!)");
            } else if elemental < 1.0 {
                line.push_str(" (not very effective)");
            }
            log.push(line);
        }
        dealt
    }

    fn attack_misses(
        &self,
        attacker: &Combatant,
        defender: &Combatant,
        rng: &mut impl Rng,
    ) -> bool {
        if attacker.never_misses {
            return false;
        }
        let speed_gap = (defender.effective_speed() - attacker.effective_speed()) as f64;
        let p = clamp_f64(
            self.config.miss_chance_base + speed_gap * 0.01,
            MISS_FLOOR,
            MISS_CAP,
        );
        chance(rng, p)
    }

    fn attack_crits(&self, attacker: &Combatant, rng: &mut impl Rng) -> bool {
        if status::has_guaranteed_crit(&attacker.effects) {
            return true;
        }
        let p = self.config.crit_chance_base
            + attacker.crit_bonus
            + status::crit_bonus(&attacker.effects);
        chance(rng, p)
    }

    // ── Rewards ──────────────────────────────────────────────────────────────

    fn victory_rewards(
        &self,
        monster: &MonsterDef,
        event_id: &str,
        opts: &BattleOptions,
        rng: &mut impl Rng,
    ) -> BattleRewards {
        let mut gold = roll_gold(monster, rng);
        let mut exp = (monster.exp_reward as f64 * opts.exp_mult).floor() as i64;
        let mut loot = roll_loot(monster, 0.0, rng);

        if (opts.loot_mult - 1.0).abs() > f64::EPSILON {
            for drop in &mut loot {
                drop.qty = ((drop.qty as f64 * opts.loot_mult).floor() as i64).max(1);
            }
        }
        if event_id == "rare_encounter" {
            gold = (gold as f64 * 1.5).floor() as i64;
            exp = (exp as f64 * 1.5).floor() as i64;
        }

        BattleRewards { gold, exp, loot }
    }
}

// ── Free helpers ─────────────────────────────────────────────────────────────

fn build_foe(monster: &MonsterDef) -> Combatant {
    Combatant {
        name: monster.name.to_string(),
        attack: monster.attack,
        defense: monster.defense,
        speed: monster.speed,
        hp: monster.hp,
        max_hp: monster.hp,
        mana: MONSTER_MANA,
        element: monster.element,
        effects: Vec::new(),
        cooldowns: HashMap::new(),
        skills: monster.skills.iter().map(|s| s.to_string()).collect(),
        crit_bonus: 0.0,
        never_misses: false,
        mends_each_third_round: false,
        awakening_tier: 0,
    }
}

fn roll_event(rng: &mut impl Rng) -> &'static BattleEventDef {
    let weighted: Vec<(&'static BattleEventDef, u32)> =
        BATTLE_EVENTS.iter().map(|e| (e, e.weight)).collect();
    weighted_pick(rng, &weighted).copied().unwrap_or(&BATTLE_EVENTS[0])
}

fn apply_event(event_id: &str, hero: &mut Combatant, foe: &mut Combatant) {
    match event_id {
        "adrenaline" => hero.attack = (hero.attack as f64 * 1.2).floor() as i64,
        "focus" => hero.crit_bonus += 0.10,
        "rage" => foe.attack = (foe.attack as f64 * 1.15).floor() as i64,
        "cursed_ground" => {
            hero.defense = (hero.defense as f64 * 0.9).floor() as i64;
            foe.defense = (foe.defense as f64 * 0.9).floor() as i64;
        }
        _ => {}
    }
}

/// Tick the combatant's effects and report whether DoT killed it.
fn tick_and_check(combatant: &mut Combatant, log: &mut Vec<String>) -> bool {
    let outcome = status::tick_effects(&mut combatant.effects);
    if outcome.dot_damage > 0 {
        combatant.hp -= outcome.dot_damage;
        log.push(format!(
            "{} suffers {} damage from lingering effects",
            combatant.name, outcome.dot_damage
        ));
    }
    combatant.hp <= 0
}

/// Route damage through dodge, received-damage multipliers, and shields.
/// Counter effects reflect a share straight back at the attacker.
fn deliver(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    damage: i64,
    log: &mut Vec<String>,
) -> i64 {
    if let Some(pos) = defender
        .effects
        .iter()
        .position(|e| matches!(e.kind, EffectKind::DodgeNextAttack))
    {
        defender.effects.remove(pos);
        log.push(format!("{} dodges the attack!", defender.name));
        return 0;
    }

    let adjusted = ((damage as f64 * status::damage_received_mult(&defender.effects)).floor()
        as i64)
        .max(0);
    let through = status::absorb_damage(&mut defender.effects, adjusted);
    if through < adjusted {
        log.push(format!(
            "{}'s shield absorbs {} damage",
            defender.name,
            adjusted - through
        ));
    }
    defender.hp -= through;

    let counter: f64 = defender
        .effects
        .iter()
        .filter_map(|e| match e.kind {
            EffectKind::Counter { percent } => Some(percent),
            _ => None,
        })
        .sum();
    if counter > 0.0 && through > 0 {
        let reflected = ((through as f64 * counter).floor() as i64).max(1);
        attacker.hp -= reflected;
        log.push(format!(
            "{} counters for {reflected} damage!",
            defender.name
        ));
    }

    through
}

/// Resolve a skill for either side. Returns total damage dealt.
fn resolve_skill(
    user: &mut Combatant,
    target: &mut Combatant,
    skill: &SkillDef,
    rng: &mut impl Rng,
    log: &mut Vec<String>,
) -> i64 {
    match &skill.effect {
        SkillEffect::Damage {
            attack_mult,
            defense_factor,
            hits,
            status: proc,
        } => {
            let user_mult = status::attack_mult(&user.effects) * user.awakening_mult();
            let mut total = 0i64;
            for _ in 0..*hits {
                let raw = ((user.attack as f64 * attack_mult * user_mult).floor() as i64
                    - (target.effective_defense() as f64 * defense_factor).floor() as i64)
                    .max(1);
                total += deliver(user, target, raw, log);
            }
            log.push(format!(
                "{} uses {} on {} for {total} damage",
                user.name, skill.name, target.name
            ));

            if let Some(proc) = proc {
                if chance(rng, proc.chance) {
                    let mut effect = proc.effect.clone();
                    if let (Some(fraction), EffectKind::DamageOverTime { per_turn }) =
                        (proc.scale_with_damage, &mut effect.kind)
                    {
                        *per_turn = ((total as f64 * fraction).floor() as i64).max(1);
                    }
                    log.push(format!("{} is afflicted by {}!", target.name, effect.id));
                    status::apply_effect(&mut target.effects, effect);
                }
            }
            total
        }
        SkillEffect::SelfBuff { effects } => {
            for effect in effects {
                status::apply_effect(&mut user.effects, effect.clone());
            }
            log.push(format!("{} uses {}!", user.name, skill.name));
            0
        }
    }
}
