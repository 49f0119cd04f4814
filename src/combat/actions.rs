//! Defend, reload and repair

use crate::character::{Character, EffectKind, RepairKind};
use crate::combat::log::CombatLog;
use crate::core::dice::{Dice, RandomSource};

/// Temporary plates granted by a plain Defend
pub const DEFEND_PLATES: u32 = 2;
/// Die rolled against gun points on every reload
pub const GUN_WEAR_DICE: Dice = Dice::D4;

/// Gain temporary plates; Patience (if active) adds its bonus and is spent
pub fn perform_defend(character: &mut Character, log: &mut CombatLog) -> u32 {
    let mut plates = DEFEND_PLATES;
    if let Some(effect) = character.take_effect(|k| matches!(k, EffectKind::DefendBonus { .. })) {
        if let EffectKind::DefendBonus { plates: extra } = effect.kind {
            plates += extra;
            log.push(format!("Patience grants additional +{} armor plates", extra));
        }
    }
    character.temp_armor_plates += plates;
    log.push(format!(
        "{} defends, gaining +{} temporary armor plates",
        character.name, plates
    ));
    plates
}

/// Refill bullets, then roll wear against the gun.
///
/// Returns `false` (log only) for a character without a working gun.
pub fn perform_reload<R: RandomSource + ?Sized>(
    character: &mut Character,
    rng: &mut R,
    log: &mut CombatLog,
) -> bool {
    if !character.has_ranged_weapon {
        log.push(format!("{} has no ranged weapon to reload", character.name));
        return false;
    }

    character.refill_bullets();
    log.push(format!(
        "{} reloads {} bullets",
        character.name, character.max_bullet_tokens
    ));

    let roll = GUN_WEAR_DICE.roll(rng);
    let reduction = character.class.gun_wear_reduction();
    let wear = roll.saturating_sub(reduction);
    if reduction > 0 {
        log.push(format!(
            "{} reduces gun damage: {} -{} = {}",
            character.class, roll, reduction, wear
        ));
    }

    let destroyed = character.wear_gun(wear);
    log.push(format!(
        "Gun takes {} damage ({}/{} GP remaining)",
        wear, character.gun_points, character.max_gun_points
    ));
    if destroyed {
        log.push(format!("{}'s gun is destroyed!", character.name));
    }
    true
}

/// Spend junk tokens to restore armor plates or gun points.
///
/// The repairer pays; the recipient (the repairer itself when `None`) gets
/// `tokens x` the repairer's multiplier, capped at its max. Returns the amount
/// restored, or `None` if the repairer cannot pay.
pub fn perform_repair(
    repairer: &mut Character,
    recipient: Option<&mut Character>,
    kind: RepairKind,
    tokens: u32,
    log: &mut CombatLog,
) -> Option<u32> {
    if tokens == 0 || !repairer.spend_junk(tokens) {
        log.push(format!(
            "{} doesn't have enough junk tokens ({} needed, {} held)",
            repairer.name, tokens, repairer.junk_tokens
        ));
        return None;
    }

    let multiplier = repairer.class.repair_multiplier(kind);
    if multiplier > 1 {
        log.push(format!("{} doubles {} repair efficiency", repairer.class, kind));
    }
    let amount = tokens.saturating_mul(multiplier);
    let repairer_name = repairer.name.clone();
    let self_repair = recipient.is_none();

    let target = match recipient {
        Some(other) => other,
        None => repairer,
    };
    let restored = match kind {
        RepairKind::Armor => target.restore_armor(amount),
        RepairKind::Gun => {
            let was_disabled = !target.has_ranged_weapon;
            let restored = target.restore_gun(amount);
            if was_disabled && target.has_ranged_weapon {
                log.push(format!("{}'s gun is restored to working condition!", target.name));
            }
            restored
        }
    };

    if self_repair {
        log.push(format!(
            "{} repairs {} {} using {} junk tokens",
            repairer_name, restored, kind, tokens
        ));
    } else {
        log.push(format!(
            "{} repairs {} {} on {} using {} junk tokens",
            repairer_name, restored, kind, target.name, tokens
        ));
    }
    Some(restored)
}

/// Two distinct mutable elements of one slice
pub fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a >= items.len() || b >= items.len() {
        return None;
    }
    if a < b {
        let (left, right) = items.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = items.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}
