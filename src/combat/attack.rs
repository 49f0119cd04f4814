//! Ranged and melee attack resolution
//!
//! Both attacks share one armor check: the final roll is compared against the
//! defender's effective armor. A roll that meets it is dealt in full as HP
//! damage; a roll below it strips plates instead.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::character::{ActiveEffect, AttackKind, Character, DamageType, EffectKind};
use crate::combat::log::CombatLog;
use crate::core::config::WarConfig;
use crate::core::dice::RandomSource;

/// Primary attack, or the free extra attack granted by Snap Fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    Primary,
    /// Costs no bullet; the roll loses `penalty` (floored at 1)
    Bonus { penalty: u32 },
}

impl Strike {
    pub fn bonus(config: &WarConfig) -> Self {
        Self::Bonus {
            penalty: config.bonus_attack_penalty,
        }
    }

    pub fn is_bonus(self) -> bool {
        matches!(self, Self::Bonus { .. })
    }
}

/// What a resolved attack did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub roll: u32,
    pub effective_armor: u32,
    /// Roll met the armor; damage went to HP
    pub hit: bool,
    /// HP and temporary HP the defender lost
    pub damage_dealt: u32,
    pub armor_lost: u32,
    /// HP and temporary HP the attacker lost (recoil, retaliation)
    pub self_damage: u32,
    pub defender_defeated: bool,
    pub attacker_defeated: bool,
}

/// Attacker-side modifiers read once, before they are spent
#[derive(Debug, Default)]
struct AttackModifiers {
    roll_bonus: i64,
    armor_ignore: u32,
    roll_twice: bool,
    ricochet: bool,
    heavy_strike: Option<(u32, u32)>,
    cripple: Option<i32>,
    armor_ignore_source: Option<Card>,
}

impl AttackModifiers {
    fn read(attacker: &Character, kind: AttackKind) -> Self {
        let mut mods = Self {
            roll_bonus: i64::from(attacker.class.attack_bonus(kind)),
            ..Self::default()
        };
        for effect in &attacker.active_effects {
            match effect.kind {
                EffectKind::AttackBonus { attack, amount }
                    if attack.map_or(true, |a| a == kind) =>
                {
                    mods.roll_bonus += i64::from(amount);
                }
                EffectKind::ArmorIgnore { attack, amount } if attack == kind => {
                    mods.armor_ignore += amount;
                    mods.armor_ignore_source = Some(effect.card);
                }
                EffectKind::RollTwice if kind == AttackKind::Ranged => mods.roll_twice = true,
                EffectKind::Ricochet if kind == AttackKind::Ranged => mods.ricochet = true,
                EffectKind::HeavyStrike { damage, recoil } if kind == AttackKind::Melee => {
                    mods.heavy_strike = Some((damage, recoil));
                }
                EffectKind::CrippleOnHit { penalty } if kind == AttackKind::Melee => {
                    mods.cripple = Some(penalty);
                }
                _ => {}
            }
        }
        mods
    }
}

/// Ranged attack: spends one bullet unless this is the bonus strike.
///
/// Returns `None` (log only) when the gun cannot fire.
pub fn perform_ranged_attack<R: RandomSource + ?Sized>(
    attacker: &mut Character,
    defender: &mut Character,
    strike: Strike,
    rng: &mut R,
    log: &mut CombatLog,
) -> Option<AttackOutcome> {
    let gun_works = attacker.has_ranged_weapon && attacker.gun_points > 0;
    let ready = match strike {
        Strike::Primary => attacker.can_shoot(),
        Strike::Bonus { .. } => gun_works,
    };
    if !ready {
        log.push(format!(
            "{} cannot perform ranged attack - no ammo or weapon",
            attacker.name
        ));
        return None;
    }
    if !strike.is_bonus() {
        attacker.spend_bullets(1);
    }
    Some(resolve_attack(attacker, defender, AttackKind::Ranged, strike, rng, log))
}

/// Melee attack; always possible
pub fn perform_melee_attack<R: RandomSource + ?Sized>(
    attacker: &mut Character,
    defender: &mut Character,
    strike: Strike,
    rng: &mut R,
    log: &mut CombatLog,
) -> AttackOutcome {
    resolve_attack(attacker, defender, AttackKind::Melee, strike, rng, log)
}

/// Dispatch on attack kind
pub fn perform_attack<R: RandomSource + ?Sized>(
    attacker: &mut Character,
    defender: &mut Character,
    kind: AttackKind,
    strike: Strike,
    rng: &mut R,
    log: &mut CombatLog,
) -> Option<AttackOutcome> {
    match kind {
        AttackKind::Ranged => perform_ranged_attack(attacker, defender, strike, rng, log),
        AttackKind::Melee => Some(perform_melee_attack(attacker, defender, strike, rng, log)),
    }
}

fn resolve_attack<R: RandomSource + ?Sized>(
    attacker: &mut Character,
    defender: &mut Character,
    kind: AttackKind,
    strike: Strike,
    rng: &mut R,
    log: &mut CombatLog,
) -> AttackOutcome {
    let attacker_was_alive = attacker.is_alive();
    let defender_was_alive = defender.is_alive();
    let mods = AttackModifiers::read(attacker, kind);
    attacker.spend_attack_effects(kind);

    let dice = match kind {
        AttackKind::Ranged => attacker.ranged_damage_dice,
        AttackKind::Melee => attacker.melee_damage_dice,
    };

    // Step 1: roll
    let base = if mods.roll_twice {
        let first = dice.roll(rng);
        let second = dice.roll(rng);
        let best = first.max(second);
        log.push(format!(
            "{} uses Volley - rolls twice, takes higher ({})",
            attacker.name, best
        ));
        best
    } else {
        dice.roll(rng)
    };
    let mut roll = (i64::from(base) + mods.roll_bonus).max(0) as u32;
    if let Strike::Bonus { penalty } = strike {
        roll = roll.saturating_sub(penalty).max(1);
        log.push(format!("Snap Fire penalty: -{} (minimum 1)", penalty));
    }
    log.push(format!("{} {} attack roll: {}", attacker.name, kind, roll));

    // Step 2: armor check
    let total_armor = defender.total_armor();
    let effective_armor = total_armor.saturating_sub(mods.armor_ignore);
    match mods.armor_ignore_source {
        Some(card) if mods.armor_ignore > 0 => log.push(format!(
            "vs {}'s armor: {} ({} -{} from {})",
            defender.name,
            effective_armor,
            total_armor,
            mods.armor_ignore,
            card.name()
        )),
        _ => log.push(format!("vs {}'s armor: {}", defender.name, effective_armor)),
    }

    let mut outcome = AttackOutcome {
        roll,
        effective_armor,
        hit: roll >= effective_armor,
        ..AttackOutcome::default()
    };

    // Step 3: apply
    if outcome.hit {
        let mut damage = roll;
        if let Some((extra, _)) = mods.heavy_strike {
            damage += extra;
            log.push(format!("Overhead Strike adds {} damage", extra));
        }
        if mods.ricochet && total_armor > 0 {
            damage += 1;
            log.push(format!("Ricochet deals 1 additional damage to {}", defender.name));
        }
        let reduction: u32 = defender
            .active_effects
            .iter()
            .filter_map(|e| match e.kind {
                EffectKind::DamageReduction { attack, amount } if attack == kind => Some(amount),
                _ => None,
            })
            .sum();
        if reduction > 0 {
            damage = damage.saturating_sub(reduction);
            log.push(format!("{}'s Parry reduces {} damage by {}", defender.name, kind, reduction));
        }

        let split = defender.take_damage(damage);
        outcome.damage_dealt += split.total();
        if split.to_temp > 0 {
            log.push(format!(
                "{} takes {} damage ({} to temp HP, {} to HP)",
                defender.name,
                split.total(),
                split.to_temp,
                split.to_hp
            ));
        } else {
            log.push(format!("{} takes {} damage to HP", defender.name, split.to_hp));
        }
        // A landed hit counts even when temp HP soaks all of it
        defender.last_damage_type = DamageType::from(kind);
        if let Some(penalty) = mods.cripple {
            let cripple = EffectKind::AttackBonus {
                attack: None,
                amount: penalty,
            };
            defender.add_effect(ActiveEffect::new(
                Card::DeadlySlice,
                attacker.id,
                attacker.name.clone(),
                cripple,
            ));
            log.push(format!(
                "{} will have {} attack on their next action",
                defender.name, penalty
            ));
        }
    } else {
        let plates = match kind {
            AttackKind::Melee => attacker.class.armor_break(),
            AttackKind::Ranged => 1,
        };
        let loss = defender.lose_armor(plates);
        outcome.armor_lost = loss.total();
        if plates > 1 {
            log.push(format!("{} removes additional armor plate", attacker.class));
        }
        if loss.temp > 0 {
            log.push(format!("{} loses {} temporary armor plates", defender.name, loss.temp));
        }
        if loss.plates > 0 {
            log.push(format!("{} loses {} armor plates", defender.name, loss.plates));
        }

        if mods.ricochet {
            let split = defender.take_damage(1);
            outcome.damage_dealt += split.total();
            if split.to_hp > 0 {
                defender.last_damage_type = DamageType::from(kind);
            }
            log.push(format!("Ricochet deals 1 damage to {} after hitting armor", defender.name));
        }
        if let Some((_, recoil)) = mods.heavy_strike {
            outcome.self_damage += attacker.take_damage(recoil).total();
            log.push(format!(
                "{} takes {} self-damage from Overhead Strike",
                attacker.name, recoil
            ));
        }
    }

    // Step 4: defender reactions
    let retaliation: u32 = defender
        .active_effects
        .iter()
        .filter_map(|e| match e.kind {
            EffectKind::Retaliation { damage } => Some(damage),
            _ => None,
        })
        .sum();
    if retaliation > 0 {
        outcome.self_damage += attacker.take_damage(retaliation).total();
        log.push(format!(
            "{} takes {} retaliation damage from {}",
            attacker.name, retaliation, defender.name
        ));
    }

    outcome.defender_defeated = defender_was_alive && !defender.is_alive();
    outcome.attacker_defeated = attacker_was_alive && !attacker.is_alive();
    if outcome.defender_defeated {
        log.push(format!("{} has been defeated!", defender.name));
    }
    if outcome.attacker_defeated {
        log.push(format!("{} has been defeated!", attacker.name));
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;
    use crate::core::dice::ScriptedRolls;
    use crate::core::types::CharacterId;

    fn make(class: CharacterClass, name: &str) -> Character {
        Character::from_class(CharacterId::new(), name, class)
    }

    fn give(character: &mut Character, card: Card) {
        let kind = EffectKind::for_card(card).unwrap();
        let id = character.id;
        let name = character.name.clone();
        character.add_effect(ActiveEffect::new(card, id, name, kind));
    }

    fn shoot(
        attacker: &mut Character,
        defender: &mut Character,
        rng: &mut ScriptedRolls,
        log: &mut CombatLog,
    ) -> Option<AttackOutcome> {
        perform_ranged_attack(attacker, defender, Strike::Primary, rng, log)
    }

    fn swing(
        attacker: &mut Character,
        defender: &mut Character,
        rng: &mut ScriptedRolls,
        log: &mut CombatLog,
    ) -> AttackOutcome {
        perform_melee_attack(attacker, defender, Strike::Primary, rng, log)
    }

    #[test]
    fn test_ranged_miss_strips_one_plate() {
        let mut engineer = make(CharacterClass::Engineer, "Juno");
        let mut target = make(CharacterClass::Shooter, "Tam");
        let mut rng = ScriptedRolls::new().with_dice([2]);
        let mut log = CombatLog::new();

        let outcome = shoot(&mut engineer, &mut target, &mut rng, &mut log).unwrap();
        assert!(!outcome.hit);
        assert_eq!(target.armor_plates, 3);
        assert_eq!(target.hp, 10);
        assert_eq!(engineer.bullet_tokens, 3);
    }

    #[test]
    fn test_shooter_bonus_applies_to_roll() {
        let mut shooter = make(CharacterClass::Shooter, "Vex");
        let mut target = make(CharacterClass::Brute, "Ox");
        target.armor_plates = 3;
        let mut rng = ScriptedRolls::new().with_dice([4]);
        let mut log = CombatLog::new();

        let outcome = shoot(&mut shooter, &mut target, &mut rng, &mut log).unwrap();
        assert_eq!(outcome.roll, 5);
        assert!(outcome.hit);
        assert_eq!(target.hp, 7);
        assert_eq!(target.last_damage_type, DamageType::Ranged);
    }

    #[test]
    fn test_ranged_attack_needs_ammo() {
        let mut shooter = make(CharacterClass::Shooter, "Vex");
        shooter.bullet_tokens = 0;
        let mut target = make(CharacterClass::Brute, "Ox");
        let before = target.clone();
        let mut rng = ScriptedRolls::new();
        let mut log = CombatLog::new();
        assert!(shoot(&mut shooter, &mut target, &mut rng, &mut log).is_none());
        assert_eq!(target, before);
        assert!(log.mentions("no ammo or weapon"));
    }

    #[test]
    fn test_careful_shot_lowers_armor_and_is_spent() {
        let mut shooter = make(CharacterClass::Engineer, "Juno");
        give(&mut shooter, Card::CarefulShot);
        let mut target = make(CharacterClass::Tinkerer, "Pell");
        let mut rng = ScriptedRolls::new().with_dice([2]);
        let mut log = CombatLog::new();
        target.armor_plates = 3;

        let outcome = shoot(&mut shooter, &mut target, &mut rng, &mut log).unwrap();
        assert_eq!(outcome.effective_armor, 2);
        assert!(outcome.hit);
        assert!(shooter.active_effects.is_empty());
        assert!(log.mentions("-1 from Careful Shot"));
    }

    #[test]
    fn test_volley_keeps_higher_roll() {
        let mut shooter = make(CharacterClass::Engineer, "Juno");
        give(&mut shooter, Card::Volley);
        let mut target = make(CharacterClass::Brute, "Ox");
        let mut rng = ScriptedRolls::new().with_dice([1, 4]);
        let mut log = CombatLog::new();
        let outcome = shoot(&mut shooter, &mut target, &mut rng, &mut log).unwrap();
        assert_eq!(outcome.roll, 4);
    }

    #[test]
    fn test_ricochet_chips_through_armor() {
        let mut shooter = make(CharacterClass::Engineer, "Juno");
        give(&mut shooter, Card::Ricochet);
        let mut target = make(CharacterClass::Brute, "Ox");
        let mut rng = ScriptedRolls::new().with_dice([1]);
        let mut log = CombatLog::new();
        shoot(&mut shooter, &mut target, &mut rng, &mut log);
        assert_eq!(target.armor_plates, 5);
        assert_eq!(target.hp, 11);
    }

    #[test]
    fn test_breaker_strips_two_plates() {
        let mut breaker = make(CharacterClass::Breaker, "Kass");
        let mut target = make(CharacterClass::Brute, "Ox");
        let mut rng = ScriptedRolls::new().with_dice([3]);
        let mut log = CombatLog::new();
        let outcome = swing(&mut breaker, &mut target, &mut rng, &mut log);
        assert_eq!(outcome.armor_lost, 2);
        assert_eq!(target.armor_plates, 4);
    }

    #[test]
    fn test_temp_plates_lost_first() {
        let mut brute = make(CharacterClass::Brute, "Ox");
        let mut target = make(CharacterClass::Breaker, "Kass");
        target.temp_armor_plates = 2;
        let mut rng = ScriptedRolls::new().with_dice([1]);
        let mut log = CombatLog::new();
        swing(&mut brute, &mut target, &mut rng, &mut log);
        assert_eq!(target.temp_armor_plates, 1);
        assert_eq!(target.armor_plates, 6);
    }

    #[test]
    fn test_overhead_strike_recoil_on_armor() {
        let mut brute = make(CharacterClass::Brute, "Ox");
        give(&mut brute, Card::OverheadStrike);
        let mut target = make(CharacterClass::Breaker, "Kass");
        let mut rng = ScriptedRolls::new().with_dice([2]);
        let mut log = CombatLog::new();
        let outcome = swing(&mut brute, &mut target, &mut rng, &mut log);
        assert!(!outcome.hit);
        assert_eq!(brute.hp, 11);
        assert_eq!(outcome.self_damage, 1);
    }

    #[test]
    fn test_overhead_strike_adds_damage_on_hit() {
        let mut brute = make(CharacterClass::Brute, "Ox");
        give(&mut brute, Card::OverheadStrike);
        let mut target = make(CharacterClass::Tinkerer, "Pell");
        target.armor_plates = 0;
        let mut rng = ScriptedRolls::new().with_dice([3]);
        let mut log = CombatLog::new();
        let outcome = swing(&mut brute, &mut target, &mut rng, &mut log);
        // 3 + Brute 1 + Overhead 2
        assert_eq!(outcome.damage_dealt, 6);
        assert_eq!(target.hp, 3);
    }

    #[test]
    fn test_deadly_slice_cripples_defender() {
        let mut breaker = make(CharacterClass::Breaker, "Kass");
        give(&mut breaker, Card::DeadlySlice);
        let mut target = make(CharacterClass::Shooter, "Tam");
        target.armor_plates = 1;
        let mut rng = ScriptedRolls::new().with_dice([4]);
        let mut log = CombatLog::new();
        swing(&mut breaker, &mut target, &mut rng, &mut log);
        assert!(target.has_effect(|k| matches!(k, EffectKind::AttackBonus { amount: -1, .. })));
        assert!(breaker.active_effects.is_empty());
    }

    #[test]
    fn test_hit_absorbed_by_temp_hp_still_lands() {
        let mut breaker = make(CharacterClass::Breaker, "Kass");
        give(&mut breaker, Card::DeadlySlice);
        let mut target = make(CharacterClass::Shooter, "Tam");
        target.armor_plates = 0;
        target.temp_hp = 10;
        let mut rng = ScriptedRolls::new().with_dice([4]);
        let mut log = CombatLog::new();
        let outcome = swing(&mut breaker, &mut target, &mut rng, &mut log);
        assert!(outcome.hit);
        assert_eq!(target.hp, target.max_hp);
        assert_eq!(target.temp_hp, 6);
        assert_eq!(target.last_damage_type, DamageType::Melee);
        assert!(target.has_effect(|k| matches!(k, EffectKind::AttackBonus { amount: -1, .. })));
    }

    #[test]
    fn test_parry_and_retaliation() {
        let mut brute = make(CharacterClass::Brute, "Ox");
        let mut target = make(CharacterClass::Breaker, "Kass");
        target.armor_plates = 0;
        give(&mut target, Card::Parry);
        give(&mut target, Card::Retaliation);
        let mut rng = ScriptedRolls::new().with_dice([4]);
        let mut log = CombatLog::new();
        let outcome = swing(&mut brute, &mut target, &mut rng, &mut log);
        // 4 + 1 Brute - 1 Parry
        assert_eq!(outcome.damage_dealt, 4);
        assert_eq!(brute.hp, 10);
        assert_eq!(target.active_effects.len(), 2);
    }

    #[test]
    fn test_bonus_strike_is_free_and_penalised() {
        let mut shooter = make(CharacterClass::Engineer, "Juno");
        shooter.bullet_tokens = 0;
        let mut target = make(CharacterClass::Brute, "Ox");
        let mut rng = ScriptedRolls::new().with_dice([2]);
        let mut log = CombatLog::new();
        let outcome = perform_ranged_attack(
            &mut shooter,
            &mut target,
            Strike::Bonus { penalty: 2 },
            &mut rng,
            &mut log,
        )
        .unwrap();
        assert_eq!(outcome.roll, 1);
        assert_eq!(shooter.bullet_tokens, 0);
    }

    #[test]
    fn test_defeat_logged_once() {
        let mut brute = make(CharacterClass::Brute, "Ox");
        let mut target = make(CharacterClass::Engineer, "Juno");
        target.armor_plates = 0;
        target.hp = 2;
        let mut rng = ScriptedRolls::new().with_dice([6, 6]);
        let mut log = CombatLog::new();
        let first = swing(&mut brute, &mut target, &mut rng, &mut log);
        assert!(first.defender_defeated);
        let second = swing(&mut brute, &mut target, &mut rng, &mut log);
        assert!(!second.defender_defeated);
        assert_eq!(target.hp, 0);
        let defeats = log.lines().iter().filter(|l| l.contains("defeated")).count();
        assert_eq!(defeats, 1);
    }
}
