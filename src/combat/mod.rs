//! Combat resolver: turn start, card play, attacks and utility actions
//!
//! Every resolver mutates the characters it is handed in place and appends to
//! a [`CombatLog`]. Illegal or unaffordable actions are no-ops with a log line.

pub mod actions;
pub mod attack;
pub mod log;
pub mod play;
pub mod turn;

pub use actions::{
    pair_mut, perform_defend, perform_reload, perform_repair, DEFEND_PLATES, GUN_WEAR_DICE,
};
pub use attack::{
    perform_attack, perform_melee_attack, perform_ranged_attack, AttackOutcome, Strike,
};
pub use log::CombatLog;
pub use play::{play_card, JUICING_TEMP_HP, TRIAGE_HEAL};
pub use turn::start_turn;
