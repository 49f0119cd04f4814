//! Card catalog and hand drawing

pub mod catalog;
pub mod draw;

pub use catalog::{Card, Deck, ALL_CARDS, COSTED_CARD_BULLETS};
pub use draw::{draw_cards, draw_from_deck, draw_mixed, draw_source, HAND_SIZE};
