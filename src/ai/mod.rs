//! Automated decision making for every character turn

pub mod policy;
pub mod targeting;

pub use policy::{take_turn, TurnAction};
pub use targeting::{plan_support_repair, select_target, support_card_target, RepairPlan};
