//! Boarding War - Turn-Based Squad Combat Simulator

pub mod ai;
pub mod cards;
pub mod character;
pub mod combat;
pub mod core;
pub mod war;
