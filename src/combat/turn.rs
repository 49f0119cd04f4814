//! Turn start bookkeeping

use crate::character::Character;
use crate::combat::log::CombatLog;

/// Expire spent effects, age the rest and clear temporary buffers.
///
/// Effects whose timer already reached 0 are removed and logged; survivors
/// lose one turn. Temporary HP and plates never outlive the owner's turn start.
pub fn start_turn(character: &mut Character, log: &mut CombatLog) {
    let name = character.name.clone();
    character.active_effects.retain_mut(|effect| {
        if effect.turns_remaining == 0 {
            log.push(format!("{}: {} expires", name, effect.card.name()));
            false
        } else {
            effect.turns_remaining -= 1;
            true
        }
    });

    character.temp_hp = 0;
    character.temp_armor_plates = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::character::{ActiveEffect, CharacterClass, EffectKind};
    use crate::core::types::CharacterId;

    #[test]
    fn test_effect_lives_one_opponent_turn() {
        let mut c = Character::from_class(CharacterId::new(), "Ossa", CharacterClass::Brute);
        let kind = EffectKind::for_card(Card::Parry).unwrap();
        c.add_effect(ActiveEffect::new(Card::Parry, c.id, "Ossa", kind));
        c.temp_hp = 2;
        c.temp_armor_plates = 4;

        let mut log = CombatLog::new();
        start_turn(&mut c, &mut log);
        assert_eq!(c.active_effects.len(), 1);
        assert_eq!(c.active_effects[0].turns_remaining, 0);
        assert_eq!((c.temp_hp, c.temp_armor_plates), (0, 0));
        assert!(log.is_empty());

        start_turn(&mut c, &mut log);
        assert!(c.active_effects.is_empty());
        assert!(log.mentions("Ossa: Parry expires"));
    }
}
