//! Target selection for attacks, support cards and repairs

use crate::cards::Card;
use crate::character::{Character, CharacterClass, RepairKind, Role};
use crate::core::dice::RandomSource;
use crate::core::types::CharacterId;

/// Pick the enemy to attack.
///
/// Melee-role attackers must pick a living melee-role enemy while any remain.
/// Everyone else (and melee attackers once the enemy front line is gone)
/// picks uniformly among living enemies. Returns the enemy's index.
pub fn select_target<R: RandomSource + ?Sized>(
    attacker: &Character,
    enemies: &[Character],
    rng: &mut R,
) -> Option<usize> {
    let alive: Vec<usize> = enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive())
        .map(|(i, _)| i)
        .collect();
    if alive.is_empty() {
        return None;
    }

    if attacker.class.role() == Role::Melee {
        let front: Vec<usize> = alive
            .iter()
            .copied()
            .filter(|&i| enemies[i].class.role() == Role::Melee)
            .collect();
        if !front.is_empty() {
            return Some(front[rng.pick_index(front.len())]);
        }
    }

    Some(alive[rng.pick_index(alive.len())])
}

/// Recipient for a card that can land on an ally.
///
/// Triage goes to the most wounded living teammate (self included); Juicing
/// and every other card target the player. `None` means self.
pub fn support_card_target(team: &[Character], actor: usize, card: Card) -> Option<CharacterId> {
    match card {
        Card::Triage => team
            .iter()
            .filter(|c| c.is_alive() && c.hp < c.max_hp)
            .max_by_key(|c| c.max_hp - c.hp)
            .map(|c| c.id),
        _ => team.get(actor).map(|c| c.id),
    }
}

/// Repair a support specialist wants to make this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairPlan {
    pub recipient: usize,
    pub kind: RepairKind,
}

/// Most urgent repair for the specialist at `team[actor]`.
///
/// Scavengers look after the guns of living Shooters and Engineers; Tinkerers
/// look after the plates of the front line, falling back to their own.
pub fn plan_support_repair(team: &[Character], actor: usize) -> Option<RepairPlan> {
    let me = team.get(actor)?;
    let kind = me.class.repair_specialty()?;

    let allies = team
        .iter()
        .enumerate()
        .filter(|(i, c)| *i != actor && c.is_alive());

    match kind {
        RepairKind::Gun => allies
            .filter(|(_, c)| {
                matches!(c.class, CharacterClass::Shooter | CharacterClass::Engineer)
                    && c.gun_points < c.max_gun_points
            })
            .min_by_key(|(_, c)| c.gun_points)
            .map(|(i, _)| RepairPlan { recipient: i, kind }),
        RepairKind::Armor => allies
            .filter(|(_, c)| c.class.fights_in_melee() && c.armor_plates < c.max_armor_plates)
            .min_by_key(|(_, c)| c.armor_plates)
            .map(|(i, _)| RepairPlan { recipient: i, kind })
            .or_else(|| {
                (me.armor_plates < me.max_armor_plates).then_some(RepairPlan {
                    recipient: actor,
                    kind,
                })
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::{ScriptedRolls, SeededRng};

    fn make(class: CharacterClass, name: &str) -> Character {
        Character::from_class(CharacterId::new(), name, class)
    }

    #[test]
    fn test_melee_targets_front_line_first() {
        let brute = make(CharacterClass::Brute, "Ox");
        let enemies = vec![
            make(CharacterClass::Shooter, "A"),
            make(CharacterClass::Breaker, "B"),
            make(CharacterClass::Engineer, "C"),
        ];
        let mut rng = SeededRng::seeded(1);
        for _ in 0..30 {
            assert_eq!(select_target(&brute, &enemies, &mut rng), Some(1));
        }
    }

    #[test]
    fn test_melee_falls_back_to_anyone() {
        let brute = make(CharacterClass::Brute, "Ox");
        let mut enemies = vec![
            make(CharacterClass::Shooter, "A"),
            make(CharacterClass::Breaker, "B"),
        ];
        enemies[1].hp = 0;
        let mut rng = ScriptedRolls::new().with_picks([0]);
        assert_eq!(select_target(&brute, &enemies, &mut rng), Some(0));
    }

    #[test]
    fn test_ranged_picks_among_living() {
        let shooter = make(CharacterClass::Shooter, "Vex");
        let mut enemies = vec![
            make(CharacterClass::Brute, "A"),
            make(CharacterClass::Brute, "B"),
            make(CharacterClass::Brute, "C"),
        ];
        enemies[0].hp = 0;
        let mut rng = ScriptedRolls::new().with_picks([1]);
        assert_eq!(select_target(&shooter, &enemies, &mut rng), Some(2));
    }

    #[test]
    fn test_no_living_enemies() {
        let shooter = make(CharacterClass::Shooter, "Vex");
        let mut enemies = vec![make(CharacterClass::Brute, "A")];
        enemies[0].hp = 0;
        let mut rng = ScriptedRolls::new();
        assert_eq!(select_target(&shooter, &enemies, &mut rng), None);
    }

    #[test]
    fn test_triage_targets_most_wounded() {
        let mut team = vec![
            make(CharacterClass::Tinkerer, "Pell"),
            make(CharacterClass::Brute, "Ox"),
            make(CharacterClass::Shooter, "Vex"),
        ];
        team[1].hp = 9;
        team[2].hp = 4;
        assert_eq!(support_card_target(&team, 0, Card::Triage), Some(team[2].id));
        assert_eq!(support_card_target(&team, 0, Card::Juicing), Some(team[0].id));
    }

    #[test]
    fn test_scavenger_plans_gun_repair() {
        let mut team = vec![
            make(CharacterClass::Scavenger, "Rat"),
            make(CharacterClass::Shooter, "Vex"),
            make(CharacterClass::Engineer, "Juno"),
        ];
        team[1].gun_points = 3;
        team[2].gun_points = 1;
        assert_eq!(
            plan_support_repair(&team, 0),
            Some(RepairPlan {
                recipient: 2,
                kind: RepairKind::Gun
            })
        );
        team[0].gun_points = 0;
        team[1].gun_points = 4;
        team[2].gun_points = 4;
        // Scavengers never plan their own gun here
        assert_eq!(plan_support_repair(&team, 0), None);
    }

    #[test]
    fn test_tinkerer_falls_back_to_self() {
        let mut team = vec![
            make(CharacterClass::Tinkerer, "Pell"),
            make(CharacterClass::Brute, "Ox"),
        ];
        assert_eq!(plan_support_repair(&team, 0), None);
        team[0].armor_plates = 1;
        assert_eq!(plan_support_repair(&team, 0).map(|p| p.recipient), Some(0));
        team[1].armor_plates = 2;
        assert_eq!(plan_support_repair(&team, 0).map(|p| p.recipient), Some(1));
    }

    #[test]
    fn test_non_specialists_plan_nothing() {
        let mut team = vec![
            make(CharacterClass::Brute, "Ox"),
            make(CharacterClass::Breaker, "Kass"),
        ];
        team[1].armor_plates = 0;
        assert_eq!(plan_support_repair(&team, 0), None);
    }
}
