//! Character aggregate
//!
//! Every resource mutator clamps at the point of mutation, so a character can
//! never leave its valid ranges.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::character::class::{AttackKind, CharacterClass, MAX_BULLET_TOKENS, MAX_GUN_POINTS};
use crate::character::effects::{ActiveEffect, EffectKind};
use crate::core::dice::Dice;
use crate::core::types::CharacterId;

/// Kind of the most recent HP damage taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    #[default]
    None,
    Melee,
    Ranged,
}

impl From<AttackKind> for DamageType {
    fn from(kind: AttackKind) -> Self {
        match kind {
            AttackKind::Melee => Self::Melee,
            AttackKind::Ranged => Self::Ranged,
        }
    }
}

/// How incoming damage was split between temporary and real HP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageSplit {
    pub to_temp: u32,
    pub to_hp: u32,
}

impl DamageSplit {
    pub fn total(&self) -> u32 {
        self.to_temp + self.to_hp
    }
}

/// How lost armor was split between temporary and real plates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArmorLoss {
    pub temp: u32,
    pub plates: u32,
}

impl ArmorLoss {
    pub fn total(&self) -> u32 {
        self.temp + self.plates
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub class: CharacterClass,
    /// Cosmetic rank
    pub tier: u32,

    pub hp: u32,
    pub max_hp: u32,
    pub temp_hp: u32,

    pub armor_plates: u32,
    pub max_armor_plates: u32,
    pub temp_armor_plates: u32,

    pub has_ranged_weapon: bool,
    pub bullet_tokens: u32,
    pub max_bullet_tokens: u32,
    pub gun_points: u32,
    pub max_gun_points: u32,

    pub junk_tokens: u32,

    /// Current hand; refilled every round
    pub cards: Vec<Card>,
    pub active_effects: Vec<ActiveEffect>,
    pub last_damage_type: DamageType,

    pub melee_damage_dice: Dice,
    pub ranged_damage_dice: Dice,
}

impl Character {
    /// Fresh character with every stat taken from the class tables
    pub fn from_class(id: CharacterId, name: impl Into<String>, class: CharacterClass) -> Self {
        let has_gun = class.has_ranged_weapon();
        Self {
            id,
            name: name.into(),
            class,
            tier: 1,
            hp: class.base_hp(),
            max_hp: class.base_hp(),
            temp_hp: 0,
            armor_plates: class.base_armor_plates(),
            max_armor_plates: class.base_armor_plates(),
            temp_armor_plates: 0,
            has_ranged_weapon: has_gun,
            bullet_tokens: if has_gun { MAX_BULLET_TOKENS } else { 0 },
            max_bullet_tokens: MAX_BULLET_TOKENS,
            gun_points: if has_gun { MAX_GUN_POINTS } else { 0 },
            max_gun_points: MAX_GUN_POINTS,
            junk_tokens: 0,
            cards: Vec::new(),
            active_effects: Vec::new(),
            last_damage_type: DamageType::None,
            melee_damage_dice: class.melee_damage_dice(),
            ranged_damage_dice: class.ranged_damage_dice(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Plates an attack has to beat, before card modifiers
    pub fn total_armor(&self) -> u32 {
        self.armor_plates.saturating_add(self.temp_armor_plates)
    }

    /// Gun is intact, loaded and not destroyed
    pub fn can_shoot(&self) -> bool {
        self.has_ranged_weapon && self.gun_points > 0 && self.bullet_tokens > 0
    }

    /// Absorb damage with temporary HP first, then real HP (floored at 0)
    pub fn take_damage(&mut self, amount: u32) -> DamageSplit {
        let to_temp = amount.min(self.temp_hp);
        self.temp_hp -= to_temp;
        let to_hp = (amount - to_temp).min(self.hp);
        self.hp -= to_hp;
        DamageSplit { to_temp, to_hp }
    }

    /// Restore HP up to the maximum; returns the amount actually healed
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += healed;
        healed
    }

    /// Strip plates, temporary ones first
    pub fn lose_armor(&mut self, amount: u32) -> ArmorLoss {
        let temp = amount.min(self.temp_armor_plates);
        self.temp_armor_plates -= temp;
        let plates = (amount - temp).min(self.armor_plates);
        self.armor_plates -= plates;
        ArmorLoss { temp, plates }
    }

    /// Restore permanent plates up to the maximum; returns plates restored
    pub fn restore_armor(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_armor_plates.saturating_sub(self.armor_plates));
        self.armor_plates += restored;
        restored
    }

    /// Restore gun points up to the maximum. A destroyed gun that comes back
    /// above 0 is re-enabled with a full load. Returns points restored.
    pub fn restore_gun(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_gun_points.saturating_sub(self.gun_points));
        self.gun_points += restored;
        if self.gun_points > 0 && !self.has_ranged_weapon {
            self.has_ranged_weapon = true;
            self.bullet_tokens = self.max_bullet_tokens;
        }
        restored
    }

    /// Wear the gun down; a gun at 0 points is disabled and emptied.
    /// Returns true if this call destroyed the gun.
    pub fn wear_gun(&mut self, amount: u32) -> bool {
        let was_working = self.gun_points > 0;
        self.gun_points = self.gun_points.saturating_sub(amount);
        if self.gun_points == 0 {
            self.has_ranged_weapon = false;
            self.bullet_tokens = 0;
        }
        was_working && self.gun_points == 0
    }

    /// Spend bullets if enough are loaded
    pub fn spend_bullets(&mut self, amount: u32) -> bool {
        if self.bullet_tokens < amount {
            return false;
        }
        self.bullet_tokens -= amount;
        true
    }

    pub fn refill_bullets(&mut self) {
        self.bullet_tokens = self.max_bullet_tokens;
    }

    pub fn spend_junk(&mut self, amount: u32) -> bool {
        if self.junk_tokens < amount {
            return false;
        }
        self.junk_tokens -= amount;
        true
    }

    pub fn has_effect(&self, matches: impl Fn(&EffectKind) -> bool) -> bool {
        self.active_effects.iter().any(|e| matches(&e.kind))
    }

    /// Whether an effect from `card` that this character registered is still active
    pub fn has_own_card_effect(&self, card: Card) -> bool {
        self.active_effects
            .iter()
            .any(|e| e.card == card && e.source_id == self.id)
    }

    pub fn add_effect(&mut self, effect: ActiveEffect) {
        self.active_effects.push(effect);
    }

    /// Drop every effect an attack of `kind` just used
    pub fn spend_attack_effects(&mut self, kind: AttackKind) {
        self.active_effects.retain(|e| !e.kind.spent_by_attack(kind));
    }

    /// Drop the first effect matching `matches`; returns it if found
    pub fn take_effect(&mut self, matches: impl Fn(&EffectKind) -> bool) -> Option<ActiveEffect> {
        let index = self.active_effects.iter().position(|e| matches(&e.kind))?;
        Some(self.active_effects.remove(index))
    }

    pub fn remove_card(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|c| *c == card) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }

    /// Every resource within range and the gun state coherent
    pub fn is_consistent(&self) -> bool {
        self.max_hp >= 1
            && self.hp <= self.max_hp
            && self.armor_plates <= self.max_armor_plates
            && self.bullet_tokens <= self.max_bullet_tokens
            && self.gun_points <= self.max_gun_points
            && (self.gun_points > 0 || (!self.has_ranged_weapon && self.bullet_tokens == 0))
    }
}
