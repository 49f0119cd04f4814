//! Per-turn action selection
//!
//! One call runs a whole character turn in priority order:
//! card play -> specialist repair -> gun upkeep -> attack or defend -> bonus attack.

use serde::{Deserialize, Serialize};

use crate::ai::targeting::{plan_support_repair, select_target, support_card_target};
use crate::cards::Card;
use crate::character::{AttackKind, Character, EffectKind, RepairKind, Role};
use crate::combat::{
    pair_mut, perform_attack, perform_defend, perform_reload, perform_repair, play_card, CombatLog,
    Strike,
};
use crate::core::config::WarConfig;
use crate::core::dice::RandomSource;
use crate::core::types::CharacterId;

/// Primary action a turn ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    /// Character was already down
    Skipped,
    Repaired { recipient: CharacterId, kind: RepairKind },
    Reloaded,
    /// Broken gun and no junk: the turn went into a junk card
    Scavenged,
    Attacked {
        target: CharacterId,
        kind: AttackKind,
        bonus_attack: bool,
    },
    Defended,
    /// Wanted to attack but no enemy was standing
    NoTarget,
}

/// Run the turn of `team[actor]` against `enemies`
pub fn take_turn<R: RandomSource + ?Sized>(
    team: &mut [Character],
    actor: usize,
    enemies: &mut [Character],
    config: &WarConfig,
    rng: &mut R,
    log: &mut CombatLog,
) -> TurnAction {
    match team.get(actor) {
        Some(c) if c.is_alive() => log.push(format!("{}'s Turn:", c.name)),
        _ => return TurnAction::Skipped,
    }

    play_cards(team, actor, config, rng, log);

    if let Some(action) = specialist_repair(team, actor, config, log) {
        return action;
    }
    if let Some(action) = gun_upkeep(team, actor, config, rng, log) {
        return action;
    }

    let me = &team[actor];
    let role = me.class.role();
    let attacks = match role {
        Role::Ranged => true,
        Role::Melee => rng.chance() < config.melee_attack_chance,
        Role::Support => rng.chance() < config.support_attack_chance,
    };
    let choice = if attacks { "attack" } else { "defend" };
    tracing::debug!("{} ({:?}) chooses to {}", me.name, role, choice);

    if !attacks {
        perform_defend(&mut team[actor], log);
        return TurnAction::Defended;
    }

    let Some(target) = select_target(me, enemies, rng) else {
        log.push(format!("{} finds no one left to attack", me.name));
        return TurnAction::NoTarget;
    };
    let kind = if role != Role::Melee && me.can_shoot() {
        AttackKind::Ranged
    } else {
        AttackKind::Melee
    };

    let attacker = &mut team[actor];
    let defender = &mut enemies[target];
    perform_attack(attacker, defender, kind, Strike::Primary, rng, log);

    let mut bonus_attack = false;
    if attacker.is_alive()
        && defender.is_alive()
        && attacker.take_effect(|k| *k == EffectKind::BonusAttack).is_some()
    {
        log.push(format!("{} follows up with Snap Fire", attacker.name));
        perform_attack(attacker, defender, kind, Strike::bonus(config), rng, log);
        bonus_attack = true;
    }

    TurnAction::Attacked {
        target: defender.id,
        kind,
        bonus_attack,
    }
}

/// Maybe play one card, plus one more if it granted junk
fn play_cards<R: RandomSource + ?Sized>(
    team: &mut [Character],
    actor: usize,
    config: &WarConfig,
    rng: &mut R,
    log: &mut CombatLog,
) {
    if team[actor].cards.is_empty() || rng.chance() >= config.card_play_chance {
        return;
    }
    let Some(card) = choose_card(team, actor, None, rng) else {
        return;
    };
    let target = support_card_target(team, actor, card);
    let played = play_card(team, actor, card, target, log);

    if played && card.grants_junk() {
        if let Some(bonus) = choose_card(team, actor, Some(card), rng) {
            log.push(format!("{} plays a bonus card", team[actor].name));
            let target = support_card_target(team, actor, bonus);
            play_card(team, actor, bonus, target, log);
        }
    }
}

/// Random playable card other than `exclude`; a repair specialist out of junk
/// prefers junk cards
fn choose_card<R: RandomSource + ?Sized>(
    team: &[Character],
    actor: usize,
    exclude: Option<Card>,
    rng: &mut R,
) -> Option<Card> {
    let me = &team[actor];
    let playable: Vec<Card> = me
        .cards
        .iter()
        .copied()
        .filter(|&card| Some(card) != exclude)
        .filter(|&card| !me.has_own_card_effect(card) && me.bullet_tokens >= card.bullet_cost())
        .collect();
    if playable.is_empty() {
        return None;
    }

    if me.junk_tokens == 0 && plan_support_repair(team, actor).is_some() {
        let junk: Vec<Card> = playable.iter().copied().filter(|c| c.grants_junk()).collect();
        if !junk.is_empty() {
            return Some(junk[rng.pick_index(junk.len())]);
        }
    }

    Some(playable[rng.pick_index(playable.len())])
}

fn repair_tokens(character: &Character, config: &WarConfig) -> u32 {
    character.junk_tokens.min(config.max_repair_tokens)
}

/// Repair specialists with junk fix the most urgent ally and end their turn
fn specialist_repair(
    team: &mut [Character],
    actor: usize,
    config: &WarConfig,
    log: &mut CombatLog,
) -> Option<TurnAction> {
    if team[actor].junk_tokens == 0 {
        return None;
    }
    let plan = plan_support_repair(team, actor)?;
    let tokens = repair_tokens(&team[actor], config);
    tracing::debug!("{} repairs {} for slot {}", team[actor].name, plan.kind, plan.recipient);

    let recipient = if plan.recipient == actor {
        perform_repair(&mut team[actor], None, plan.kind, tokens, log);
        team[actor].id
    } else {
        let (me, ally) = pair_mut(team, actor, plan.recipient)?;
        perform_repair(me, Some(&mut *ally), plan.kind, tokens, log);
        ally.id
    };

    Some(TurnAction::Repaired {
        recipient,
        kind: plan.kind,
    })
}

/// Gun classes fix a destroyed gun or reload an empty one before fighting
fn gun_upkeep<R: RandomSource + ?Sized>(
    team: &mut [Character],
    actor: usize,
    config: &WarConfig,
    rng: &mut R,
    log: &mut CombatLog,
) -> Option<TurnAction> {
    let me = &mut team[actor];
    if !me.class.has_ranged_weapon() {
        return None;
    }

    if me.gun_points == 0 {
        if me.junk_tokens > 0 {
            let tokens = repair_tokens(me, config);
            perform_repair(me, None, RepairKind::Gun, tokens, log);
            return Some(TurnAction::Repaired {
                recipient: me.id,
                kind: RepairKind::Gun,
            });
        }
        let junk_card = me.cards.iter().copied().find(|c| c.grants_junk())?;
        play_card(team, actor, junk_card, None, log);
        return Some(TurnAction::Scavenged);
    }

    if me.has_ranged_weapon && me.bullet_tokens == 0 {
        perform_reload(me, rng, log);
        return Some(TurnAction::Reloaded);
    }

    None
}
