//! Versioned load-time migration of stored character records
//!
//! Stored rosters come from older tools with camelCase keys and any subset of
//! fields present. Each record is migrated once, at load, into a fully
//! populated and clamped [`Character`]; the resolver never defaults fields.
//!
//! Schema versions:
//! - 1: legacy sheet (`armor` 1..3, `con`, `initiative`, ten-card ids)
//! - 2: plate/bullet/gun sheet (current)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cards::Card;
use crate::character::class::CharacterClass;
use crate::character::effects::{ActiveEffect, EffectKind};
use crate::character::model::{Character, DamageType};
use crate::core::dice::Dice;
use crate::core::error::{Result, WarError};
use crate::core::types::CharacterId;

pub const CURRENT_SCHEMA_VERSION: u32 = 2;

/// Largest stored value accepted for an open-ended stat (HP, plates, tokens)
pub const MAX_STORED_STAT: u32 = 10_000;

/// Loosely typed effect record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredEffect {
    pub card_id: u8,
    pub source_profile_id: Option<String>,
    pub source_profile_name: Option<String>,
    pub turns_remaining: Option<i64>,
    pub effect_type: Option<String>,
    pub value: Option<i64>,
}

/// Loosely typed character record as found in saved rosters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredCharacter {
    pub schema_version: Option<u32>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub class: Option<u8>,
    pub tier: Option<i64>,

    pub hp: Option<i64>,
    pub max_hp: Option<i64>,
    pub temp_hp: Option<i64>,

    // version 1 only
    pub armor: Option<i64>,
    pub temp_armor: Option<i64>,
    pub con: Option<i64>,
    pub initiative: Option<i64>,

    pub armor_plates: Option<i64>,
    pub max_armor_plates: Option<i64>,
    pub temp_armor_plates: Option<i64>,

    pub has_ranged_weapon: Option<bool>,
    pub bullet_tokens: Option<i64>,
    pub gun_points: Option<i64>,
    pub junk_tokens: Option<i64>,

    pub cards: Option<Vec<u8>>,
    pub active_effects: Option<Vec<StoredEffect>>,
    pub last_damage_type: Option<DamageType>,

    pub melee_damage_dice: Option<String>,
    pub ranged_damage_dice: Option<String>,
}

impl StoredCharacter {
    /// Explicit version, else inferred from which fields are present
    pub fn detect_version(&self) -> u32 {
        if let Some(version) = self.schema_version {
            return version;
        }
        let has_v2_fields = self.armor_plates.is_some()
            || self.bullet_tokens.is_some()
            || self.gun_points.is_some()
            || self.has_ranged_weapon.is_some();
        let has_v1_fields =
            self.armor.is_some() || self.initiative.is_some() || self.con.is_some();
        if !has_v2_fields && has_v1_fields {
            1
        } else {
            CURRENT_SCHEMA_VERSION
        }
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

/// Open-ended stat: negatives floor at 0, values above [`MAX_STORED_STAT`] are rejected
fn bounded_stat(field: &str, value: i64) -> Result<u32> {
    if value > i64::from(MAX_STORED_STAT) {
        return Err(WarError::InvalidSetup(format!(
            "{} of {} exceeds the limit of {}",
            field, value, MAX_STORED_STAT
        )));
    }
    Ok(clamp_u32(value))
}

fn optional_stat(field: &str, value: Option<i64>) -> Result<Option<u32>> {
    value.map(|v| bounded_stat(field, v)).transpose()
}

fn parse_id(raw: Option<&str>) -> Option<CharacterId> {
    raw.and_then(|s| Uuid::parse_str(s).ok()).map(CharacterId)
}

/// Migrate one record into a schema-valid character
pub fn migrate_character(record: &StoredCharacter) -> Result<Character> {
    let version = record.detect_version();
    let mut character = match version {
        1 => migrate_v1(record)?,
        2 => migrate_v2(record)?,
        other => return Err(WarError::UnsupportedSchema(other)),
    };
    normalize(&mut character);
    Ok(character)
}

/// Migrate a whole roster, failing on the first invalid record
pub fn migrate_roster(records: &[StoredCharacter]) -> Result<Vec<Character>> {
    records.iter().map(migrate_character).collect()
}

fn base_character(record: &StoredCharacter) -> Result<Character> {
    let class = match record.class {
        Some(id) => CharacterClass::from_id(id)?,
        None => CharacterClass::Shooter,
    };
    let id = match parse_id(record.id.as_deref()) {
        Some(id) => id,
        None => {
            tracing::warn!("Record {:?} has no usable id; assigning a new one", record.name);
            CharacterId::new()
        }
    };
    let name = record.name.clone().unwrap_or_else(|| class.name().to_string());

    let mut character = Character::from_class(id, name, class);
    if let Some(tier) = optional_stat("tier", record.tier)? {
        character.tier = tier.max(1);
    }
    if let Some(max_hp) = optional_stat("maxHp", record.max_hp)? {
        character.max_hp = max_hp.max(1);
    }
    character.hp = optional_stat("hp", record.hp)?.unwrap_or(character.max_hp);
    character.temp_hp = optional_stat("tempHp", record.temp_hp)?.unwrap_or(0);
    Ok(character)
}

/// Legacy sheets: armor scale and card ids meant different things, so armor
/// resets to the class table and hands and effects are dropped.
fn migrate_v1(record: &StoredCharacter) -> Result<Character> {
    let mut character = base_character(record)?;
    character.temp_armor_plates = optional_stat("tempArmor", record.temp_armor)?.unwrap_or(0);
    Ok(character)
}

fn migrate_v2(record: &StoredCharacter) -> Result<Character> {
    let mut character = base_character(record)?;

    if let Some(max_plates) = optional_stat("maxArmorPlates", record.max_armor_plates)? {
        character.max_armor_plates = max_plates;
    }
    character.armor_plates =
        optional_stat("armorPlates", record.armor_plates)?.unwrap_or(character.max_armor_plates);
    character.temp_armor_plates =
        optional_stat("tempArmorPlates", record.temp_armor_plates)?.unwrap_or(0);

    if let Some(has_gun) = record.has_ranged_weapon {
        character.has_ranged_weapon = has_gun;
    }
    if let Some(gun_points) = record.gun_points {
        character.gun_points = clamp_u32(gun_points);
    }
    if let Some(bullets) = record.bullet_tokens {
        character.bullet_tokens = clamp_u32(bullets);
    }
    character.junk_tokens = optional_stat("junkTokens", record.junk_tokens)?.unwrap_or(0);

    if let Some(cards) = &record.cards {
        character.cards = cards
            .iter()
            .map(|id| Card::from_id(*id))
            .collect::<Result<Vec<_>>>()?;
    }

    if let Some(effects) = &record.active_effects {
        let mut migrated = Vec::with_capacity(effects.len());
        for stored in effects {
            if let Some(effect) = migrate_effect(stored, &character)? {
                migrated.push(effect);
            }
        }
        character.active_effects = migrated;
    }

    if let Some(kind) = record.last_damage_type {
        character.last_damage_type = kind;
    }
    if let Some(text) = &record.melee_damage_dice {
        character.melee_damage_dice = Dice::parse(text)?;
    }
    if let Some(text) = &record.ranged_damage_dice {
        character.ranged_damage_dice = Dice::parse(text)?;
    }

    Ok(character)
}

fn migrate_effect(stored: &StoredEffect, owner: &Character) -> Result<Option<ActiveEffect>> {
    let card = Card::from_id(stored.card_id)?;
    let kind = match stored.effect_type.as_deref() {
        Some("attack_bonus") => Some(EffectKind::AttackBonus {
            attack: None,
            amount: stored.value.unwrap_or(-1).clamp(-10, 10) as i32,
        }),
        _ => EffectKind::for_card(card),
    };
    let Some(kind) = kind else {
        return Ok(None);
    };

    Ok(Some(ActiveEffect {
        card,
        source_id: parse_id(stored.source_profile_id.as_deref()).unwrap_or(owner.id),
        source_name: stored
            .source_profile_name
            .clone()
            .unwrap_or_else(|| owner.name.clone()),
        turns_remaining: stored.turns_remaining.map_or(0, clamp_u32),
        kind,
    }))
}

/// Clamp every resource into range and make the gun state coherent
fn normalize(character: &mut Character) {
    character.max_hp = character.max_hp.max(1);
    character.hp = character.hp.min(character.max_hp);
    character.armor_plates = character.armor_plates.min(character.max_armor_plates);
    character.gun_points = character.gun_points.min(character.max_gun_points);
    character.bullet_tokens = character.bullet_tokens.min(character.max_bullet_tokens);
    if character.gun_points == 0 || !character.has_ranged_weapon {
        character.has_ranged_weapon = character.gun_points > 0 && character.has_ranged_weapon;
        character.bullet_tokens = 0;
    }
}
