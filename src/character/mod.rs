//! Characters: class tables, the character aggregate, effects and loading

pub mod class;
pub mod effects;
pub mod factory;
pub mod migration;
pub mod model;

pub use class::{AttackKind, CharacterClass, RepairKind, Role, MAX_BULLET_TOKENS, MAX_GUN_POINTS};
pub use effects::{ActiveEffect, EffectKind, EFFECT_DURATION};
pub use factory::{
    create_blank_profile, generate_profile, update_character_class, BLANK_PROFILE_NAME,
};
pub use migration::{
    migrate_character, migrate_roster, StoredCharacter, StoredEffect, CURRENT_SCHEMA_VERSION,
    MAX_STORED_STAT,
};
pub use model::{ArmorLoss, Character, DamageSplit, DamageType};
