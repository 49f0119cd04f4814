//! Hand drawing

use crate::cards::catalog::{Card, Deck, ALL_CARDS};
use crate::character::class::CharacterClass;
use crate::core::config::DrawMode;
use crate::core::dice::RandomSource;

/// Cards in a freshly drawn hand
pub const HAND_SIZE: usize = 2;

/// Two cards from one deck, drawn with replacement (duplicates allowed)
pub fn draw_from_deck<R: RandomSource + ?Sized>(deck: Deck, rng: &mut R) -> Vec<Card> {
    let cards = deck.cards();
    (0..HAND_SIZE)
        .map(|_| cards[rng.pick_index(cards.len())])
        .collect()
}

/// Two distinct cards from the full catalog
pub fn draw_mixed<R: RandomSource + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut pool: Vec<Card> = ALL_CARDS.to_vec();
    let mut hand = Vec::with_capacity(HAND_SIZE);
    for _ in 0..HAND_SIZE {
        let index = rng.pick_index(pool.len());
        hand.push(pool.swap_remove(index));
    }
    hand
}

/// Hand for `class` under the configured draw mode
pub fn draw_cards<R: RandomSource + ?Sized>(
    class: CharacterClass,
    mode: DrawMode,
    rng: &mut R,
) -> Vec<Card> {
    match mode {
        DrawMode::Class => draw_from_deck(class.deck(), rng),
        DrawMode::Mixed => draw_mixed(rng),
    }
}

/// Label used in round logs for where a hand came from
pub fn draw_source(class: CharacterClass, mode: DrawMode) -> &'static str {
    match mode {
        DrawMode::Class => class.deck().name(),
        DrawMode::Mixed => "MIXED",
    }
}
