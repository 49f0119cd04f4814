//! Card play

use crate::cards::Card;
use crate::character::{ActiveEffect, Character, EffectKind};
use crate::combat::log::CombatLog;
use crate::core::types::CharacterId;

/// HP restored by Triage
pub const TRIAGE_HEAL: u32 = 2;
/// Temporary HP granted by Juicing
pub const JUICING_TEMP_HP: u32 = 2;

/// Index of the character a support card lands on.
///
/// Unknown or dead targets fall back to the actor.
fn resolve_target(team: &[Character], actor: usize, target: Option<CharacterId>) -> usize {
    target
        .and_then(|id| team.iter().position(|c| c.id == id && c.is_alive()))
        .unwrap_or(actor)
}

/// Play `card` from the hand of `team[actor]`.
///
/// `team` is the actor's own roster; Triage and Juicing may land on any living
/// member of it. Returns whether the card was played. A card that is not in
/// hand or that needs more bullets than are loaded stays put and only logs.
pub fn play_card(
    team: &mut [Character],
    actor: usize,
    card: Card,
    target: Option<CharacterId>,
    log: &mut CombatLog,
) -> bool {
    let Some(player) = team.get_mut(actor) else {
        return false;
    };
    let name = player.name.clone();

    if !player.cards.contains(&card) {
        log.push(format!("{} does not hold {}", name, card.name()));
        return false;
    }

    let cost = card.bullet_cost();
    if cost > 0 && !player.spend_bullets(cost) {
        log.push(format!(
            "{} needs {} bullet tokens to play {} (has {})",
            name,
            cost,
            card.name(),
            player.bullet_tokens
        ));
        return false;
    }

    player.remove_card(card);
    log.push(format!("{} plays {}", name, card));
    if cost > 0 {
        log.push(format!(
            "{} spends {} bullet tokens ({} left)",
            name, cost, player.bullet_tokens
        ));
    }

    match card {
        Card::JunkMaterial | Card::ScrapScan => {
            player.junk_tokens += 1;
            let verb = if card == Card::ScrapScan { "finds" } else { "gains" };
            log.push(format!(
                "{} {} 1 Junk Token ({} total)",
                name, verb, player.junk_tokens
            ));
        }
        Card::Triage => {
            let index = resolve_target(team, actor, target);
            let healed = team[index].heal(TRIAGE_HEAL);
            if index == actor {
                log.push(format!("{} heals self for {} HP", name, healed));
            } else {
                log.push(format!("{} heals {} for {} HP", name, team[index].name, healed));
            }
        }
        Card::Juicing => {
            let index = resolve_target(team, actor, target);
            let recipient = &mut team[index];
            recipient.temp_hp = recipient.temp_hp.saturating_add(JUICING_TEMP_HP);
            if index == actor {
                log.push(format!("{} gains {} temporary HP", name, JUICING_TEMP_HP));
            } else {
                log.push(format!(
                    "{} gives {} {} temporary HP",
                    name, recipient.name, JUICING_TEMP_HP
                ));
            }
        }
        _ => {
            if let Some(kind) = EffectKind::for_card(card) {
                let id = player.id;
                player.add_effect(ActiveEffect::new(card, id, name.clone(), kind));
                match kind {
                    EffectKind::Retaliation { damage } => log.push(format!(
                        "{} activates retaliation - attackers will take {} damage",
                        name, damage
                    )),
                    _ => log.push(format!("{} readies {}", name, card.name())),
                }
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::CharacterClass;

    fn shooter(name: &str) -> Character {
        Character::from_class(CharacterId::new(), name, CharacterClass::Shooter)
    }

    fn team() -> Vec<Character> {
        vec![
            Character::from_class(CharacterId::new(), "Pell", CharacterClass::Tinkerer),
            Character::from_class(CharacterId::new(), "Rook", CharacterClass::Brute),
        ]
    }

    #[test]
    fn test_junk_card_grants_token() {
        let mut team = team();
        team[0].cards = vec![Card::JunkMaterial, Card::ScrapScan];
        let mut log = CombatLog::new();
        assert!(play_card(&mut team, 0, Card::JunkMaterial, None, &mut log));
        assert!(play_card(&mut team, 0, Card::ScrapScan, None, &mut log));
        assert_eq!(team[0].junk_tokens, 2);
        assert!(team[0].cards.is_empty());
        assert!(log.mentions("2 total"));
    }

    #[test]
    fn test_triage_heals_ally_capped() {
        let mut team = team();
        team[0].cards = vec![Card::Triage];
        team[1].hp = 11;
        let ally = team[1].id;
        let mut log = CombatLog::new();
        play_card(&mut team, 0, Card::Triage, Some(ally), &mut log);
        assert_eq!(team[1].hp, 12);
        assert!(log.mentions("heals Rook for 1 HP"));
    }

    #[test]
    fn test_dead_target_falls_back_to_self() {
        let mut team = team();
        team[0].cards = vec![Card::Juicing];
        team[1].hp = 0;
        let ally = team[1].id;
        let mut log = CombatLog::new();
        play_card(&mut team, 0, Card::Juicing, Some(ally), &mut log);
        assert_eq!(team[0].temp_hp, 2);
        assert_eq!(team[1].temp_hp, 0);
    }

    #[test]
    fn test_costed_card_without_bullets_stays_in_hand() {
        let mut team = vec![shooter("Vex")];
        team[0].cards = vec![Card::Volley];
        team[0].bullet_tokens = 1;
        let mut log = CombatLog::new();
        assert!(!play_card(&mut team, 0, Card::Volley, None, &mut log));
        assert_eq!(team[0].cards, vec![Card::Volley]);
        assert_eq!(team[0].bullet_tokens, 1);
        assert!(team[0].active_effects.is_empty());
        assert!(log.mentions("needs 2 bullet tokens"));
    }

    #[test]
    fn test_costed_card_spends_bullets() {
        let mut team = vec![shooter("Vex")];
        team[0].cards = vec![Card::SnapFire];
        let mut log = CombatLog::new();
        assert!(play_card(&mut team, 0, Card::SnapFire, None, &mut log));
        assert_eq!(team[0].bullet_tokens, 2);
        assert!(team[0].has_effect(|k| *k == EffectKind::BonusAttack));
    }

    #[test]
    fn test_card_not_in_hand_rejected() {
        let mut team = team();
        let mut log = CombatLog::new();
        assert!(!play_card(&mut team, 0, Card::Parry, None, &mut log));
        assert!(team[0].active_effects.is_empty());
        assert!(log.mentions("does not hold Parry"));
    }

    #[test]
    fn test_retaliation_registers_effect() {
        let mut team = team();
        team[1].cards = vec![Card::Retaliation];
        let mut log = CombatLog::new();
        play_card(&mut team, 1, Card::Retaliation, None, &mut log);
        let effect = &team[1].active_effects[0];
        assert_eq!(effect.kind, EffectKind::Retaliation { damage: 2 });
        assert_eq!(effect.source_id, team[1].id);
        assert_eq!(effect.turns_remaining, 1);
    }
}
