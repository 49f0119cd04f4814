//! Timed status modifiers attached to a character
//!
//! The card that produced an effect is kept for logging only; resolution
//! reads the typed [`EffectKind`].

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::character::class::AttackKind;
use crate::core::types::CharacterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectKind {
    /// Lowers the defender's effective armor for the owner's next attack
    ArmorIgnore { attack: AttackKind, amount: u32 },
    /// Added to the owner's next attack roll (`attack: None` applies to either kind)
    AttackBonus { attack: Option<AttackKind>, amount: i32 },
    /// Next ranged attack rolls twice and keeps the higher
    RollTwice,
    /// One extra attack right after the primary attack
    BonusAttack,
    /// Next ranged attack deals 1 extra HP when armor is involved
    Ricochet,
    /// Next melee hit deals extra damage; a blow into armor hurts the owner
    HeavyStrike { damage: u32, recoil: u32 },
    /// Next melee hit leaves the defender with an attack penalty
    CrippleOnHit { penalty: i32 },
    /// Next Defend grants extra temporary plates
    DefendBonus { plates: u32 },
    /// Incoming damage of the given kind is reduced while active
    DamageReduction { attack: AttackKind, amount: u32 },
    /// Attackers of the owner take damage while active
    Retaliation { damage: u32 },
}

impl EffectKind {
    /// Effect registered when `card` is played, if the card works through one
    pub fn for_card(card: Card) -> Option<Self> {
        let kind = match card {
            Card::CarefulShot => Self::ArmorIgnore {
                attack: AttackKind::Ranged,
                amount: 1,
            },
            Card::Volley => Self::RollTwice,
            Card::SnapFire => Self::BonusAttack,
            Card::TakeAim => Self::AttackBonus {
                attack: Some(AttackKind::Ranged),
                amount: 1,
            },
            Card::Ricochet => Self::Ricochet,
            Card::Patience => Self::DefendBonus { plates: 2 },
            Card::Feint => Self::ArmorIgnore {
                attack: AttackKind::Melee,
                amount: 1,
            },
            Card::OverheadStrike => Self::HeavyStrike {
                damage: 2,
                recoil: 1,
            },
            Card::DeadlySlice => Self::CrippleOnHit { penalty: -1 },
            Card::Parry => Self::DamageReduction {
                attack: AttackKind::Melee,
                amount: 1,
            },
            Card::Retaliation => Self::Retaliation { damage: 2 },
            Card::JunkMaterial | Card::Triage | Card::ScrapScan | Card::Juicing => return None,
        };
        Some(kind)
    }

    /// Whether an attack of `kind` by the owner reads (and so spends) this effect
    pub fn spent_by_attack(&self, kind: AttackKind) -> bool {
        match self {
            Self::ArmorIgnore { attack, .. } => *attack == kind,
            Self::AttackBonus { attack, .. } => attack.map_or(true, |a| a == kind),
            Self::RollTwice | Self::Ricochet => kind == AttackKind::Ranged,
            Self::HeavyStrike { .. } | Self::CrippleOnHit { .. } => kind == AttackKind::Melee,
            Self::BonusAttack
            | Self::DefendBonus { .. }
            | Self::DamageReduction { .. }
            | Self::Retaliation { .. } => false,
        }
    }
}

/// A timed modifier owned by exactly one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub card: Card,
    pub source_id: CharacterId,
    pub source_name: String,
    pub turns_remaining: u32,
    pub kind: EffectKind,
}

/// Turns a freshly registered effect survives
pub const EFFECT_DURATION: u32 = 1;

impl ActiveEffect {
    pub fn new(
        card: Card,
        source_id: CharacterId,
        source_name: impl Into<String>,
        kind: EffectKind,
    ) -> Self {
        Self {
            card,
            source_id,
            source_name: source_name.into(),
            turns_remaining: EFFECT_DURATION,
            kind,
        }
    }
}
