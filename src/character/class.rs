//! Character classes and their base stat tables

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Deck;
use crate::core::dice::Dice;
use crate::core::error::{Result, WarError};

/// Combat role. Drives targeting and the attack/defend split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Ranged,
    Melee,
    Support,
}

/// Damage source of an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    Melee,
    Ranged,
}

impl fmt::Display for AttackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Melee => f.write_str("melee"),
            Self::Ranged => f.write_str("ranged"),
        }
    }
}

/// What a junk-token repair restores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepairKind {
    Armor,
    Gun,
}

impl fmt::Display for RepairKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Armor => f.write_str("armor plates"),
            Self::Gun => f.write_str("gun points"),
        }
    }
}

/// Character class, serialized as its numeric id (1..=6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum CharacterClass {
    Shooter = 1,
    Engineer = 2,
    Scavenger = 3,
    Tinkerer = 4,
    Brute = 5,
    Breaker = 6,
}

/// Bullet capacity of every gun
pub const MAX_BULLET_TOKENS: u32 = 4;
/// Durability of every gun
pub const MAX_GUN_POINTS: u32 = 4;

impl CharacterClass {
    pub const ALL: [CharacterClass; 6] = [
        CharacterClass::Shooter,
        CharacterClass::Engineer,
        CharacterClass::Scavenger,
        CharacterClass::Tinkerer,
        CharacterClass::Brute,
        CharacterClass::Breaker,
    ];

    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            1..=6 => Ok(Self::ALL[usize::from(id - 1)]),
            _ => Err(WarError::UnknownClass(id)),
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Shooter => "Shooter",
            Self::Engineer => "Engineer",
            Self::Scavenger => "Scavenger",
            Self::Tinkerer => "Tinkerer",
            Self::Brute => "Brute",
            Self::Breaker => "Breaker",
        }
    }

    pub fn role(self) -> Role {
        match self {
            Self::Shooter | Self::Engineer | Self::Scavenger => Role::Ranged,
            Self::Tinkerer => Role::Support,
            Self::Brute | Self::Breaker => Role::Melee,
        }
    }

    /// Front-line classes whose armor a Tinkerer maintains (Tinkerer included)
    pub fn fights_in_melee(self) -> bool {
        matches!(self, Self::Tinkerer | Self::Brute | Self::Breaker)
    }

    /// Deck the class draws its hand from
    pub fn deck(self) -> Deck {
        match self {
            Self::Shooter | Self::Engineer => Deck::Ranged,
            Self::Scavenger | Self::Tinkerer => Deck::Support,
            Self::Brute | Self::Breaker => Deck::Melee,
        }
    }

    pub fn base_hp(self) -> u32 {
        match self {
            Self::Shooter => 10,
            Self::Engineer => 8,
            Self::Scavenger => 9,
            Self::Tinkerer => 9,
            Self::Brute => 12,
            Self::Breaker => 10,
        }
    }

    pub fn base_armor_plates(self) -> u32 {
        match self {
            Self::Shooter | Self::Engineer | Self::Scavenger => 4,
            Self::Tinkerer => 3,
            Self::Brute | Self::Breaker => 6,
        }
    }

    /// Whether the class starts with a gun
    pub fn has_ranged_weapon(self) -> bool {
        matches!(self, Self::Shooter | Self::Engineer | Self::Scavenger)
    }

    pub fn melee_damage_dice(self) -> Dice {
        Dice::D6
    }

    pub fn ranged_damage_dice(self) -> Dice {
        Dice::D4
    }

    /// Passive bonus added to attack rolls of the given kind
    pub fn attack_bonus(self, kind: AttackKind) -> u32 {
        match (self, kind) {
            (Self::Shooter, AttackKind::Ranged) | (Self::Brute, AttackKind::Melee) => 1,
            _ => 0,
        }
    }

    /// Armor plates stripped when a melee attack lands on armor
    pub fn armor_break(self) -> u32 {
        match self {
            Self::Breaker => 2,
            _ => 1,
        }
    }

    /// Amount subtracted from the gun wear roll on reload
    pub fn gun_wear_reduction(self) -> u32 {
        match self {
            Self::Engineer => 1,
            _ => 0,
        }
    }

    /// Repair this class doubles
    pub fn repair_specialty(self) -> Option<RepairKind> {
        match self {
            Self::Scavenger => Some(RepairKind::Gun),
            Self::Tinkerer => Some(RepairKind::Armor),
            _ => None,
        }
    }

    pub fn repair_multiplier(self, kind: RepairKind) -> u32 {
        if self.repair_specialty() == Some(kind) {
            2
        } else {
            1
        }
    }
}

impl TryFrom<u8> for CharacterClass {
    type Error = WarError;

    fn try_from(id: u8) -> Result<Self> {
        Self::from_id(id)
    }
}

impl From<CharacterClass> for u8 {
    fn from(class: CharacterClass) -> Self {
        class.id()
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
