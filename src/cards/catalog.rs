//! The fifteen effect cards and the decks they belong to

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{Result, WarError};

/// Card decks. Each holds five consecutive card ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Deck {
    Ranged,
    Melee,
    Support,
}

impl Deck {
    pub const ALL: [Deck; 3] = [Deck::Ranged, Deck::Melee, Deck::Support];

    pub fn cards(self) -> &'static [Card] {
        match self {
            Self::Ranged => &ALL_CARDS[0..5],
            Self::Melee => &ALL_CARDS[5..10],
            Self::Support => &ALL_CARDS[10..15],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ranged => "RANGED",
            Self::Melee => "MELEE",
            Self::Support => "SUPPORT",
        }
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Effect card, serialized as its numeric id (1..=15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Card {
    CarefulShot = 1,
    Volley = 2,
    SnapFire = 3,
    TakeAim = 4,
    Ricochet = 5,
    Patience = 6,
    Feint = 7,
    OverheadStrike = 8,
    DeadlySlice = 9,
    Parry = 10,
    JunkMaterial = 11,
    Triage = 12,
    ScrapScan = 13,
    Retaliation = 14,
    Juicing = 15,
}

/// Every card in id order
pub const ALL_CARDS: [Card; 15] = [
    Card::CarefulShot,
    Card::Volley,
    Card::SnapFire,
    Card::TakeAim,
    Card::Ricochet,
    Card::Patience,
    Card::Feint,
    Card::OverheadStrike,
    Card::DeadlySlice,
    Card::Parry,
    Card::JunkMaterial,
    Card::Triage,
    Card::ScrapScan,
    Card::Retaliation,
    Card::Juicing,
];

/// Bullet tokens spent when Volley or Snap Fire is played
pub const COSTED_CARD_BULLETS: u32 = 2;

impl Card {
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            1..=15 => Ok(ALL_CARDS[usize::from(id - 1)]),
            _ => Err(WarError::UnknownCard(id)),
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CarefulShot => "Careful Shot",
            Self::Volley => "Volley",
            Self::SnapFire => "Snap Fire",
            Self::TakeAim => "Take Aim",
            Self::Ricochet => "Ricochet",
            Self::Patience => "Patience",
            Self::Feint => "Feint",
            Self::OverheadStrike => "Overhead Strike",
            Self::DeadlySlice => "Deadly Slice",
            Self::Parry => "Parry",
            Self::JunkMaterial => "Junk Material",
            Self::Triage => "Triage",
            Self::ScrapScan => "Scrap Scan",
            Self::Retaliation => "Retaliation",
            Self::Juicing => "Juicing",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::CarefulShot => "Your next ranged attack ignores 1 Armor",
            Self::Volley => "Roll your attack twice, choose the higher. Costs 2 Bullet Tokens",
            Self::SnapFire => {
                "One additional Attack immediately, but with a damage penalty (min 1). \
                 Costs 2 Bullet Tokens"
            }
            Self::TakeAim => "+1 to your next ranged attack roll",
            Self::Ricochet => "If your attack damages armor, it deals 1 HP to enemy",
            Self::Patience => {
                "If you use the DEFEND action this turn, you gain an additional \
                 +2 ARMOR PLATES temporarily"
            }
            Self::Feint => "Your next melee attack ignores 1 Armor",
            Self::OverheadStrike => {
                "+2 damage against an enemy, but if you hit their ARMOR PLATES, \
                 you take 1 self-damage"
            }
            Self::DeadlySlice => {
                "If you damage a profile's HP, they receive -1 ATTACK on their next action"
            }
            Self::Parry => "Until your next turn, reduce all melee damage taken by 1",
            Self::JunkMaterial => "Gain 1 Junk Material (used for gun or armor repair)",
            Self::Triage => "Restore 2 HP to yourself or an ally",
            Self::ScrapScan => "Find 1 Junk item",
            Self::Retaliation => {
                "2 HP damage to the profile that attacks you, \
                 lasts until the beginning of your next turn"
            }
            Self::Juicing => {
                "Give an ally or yourself +2 Temporary Hitpoints, \
                 lasting until the start of their next turn"
            }
        }
    }

    pub fn deck(self) -> Deck {
        match self.id() {
            1..=5 => Deck::Ranged,
            6..=10 => Deck::Melee,
            _ => Deck::Support,
        }
    }

    /// Cards that immediately grant a junk token
    pub fn grants_junk(self) -> bool {
        matches!(self, Self::JunkMaterial | Self::ScrapScan)
    }

    /// Bullet tokens spent when the card is played
    pub fn bullet_cost(self) -> u32 {
        match self {
            Self::Volley | Self::SnapFire => COSTED_CARD_BULLETS,
            _ => 0,
        }
    }
}

impl TryFrom<u8> for Card {
    type Error = WarError;

    fn try_from(id: u8) -> Result<Self> {
        Self::from_id(id)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.id()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.name(), self.description())
    }
}
