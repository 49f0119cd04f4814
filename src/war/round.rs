//! One war round and the end-of-war tally
//!
//! Round flow: turn start + fresh hands for every living character ->
//! alternating turns (first roster member 0, second roster member 0, ...) ->
//! end-of-round summary -> war-active check.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::ai::take_turn;
use crate::cards::{draw_cards, draw_source};
use crate::combat::{start_turn, CombatLog};
use crate::core::config::WarConfig;
use crate::core::dice::RandomSource;
use crate::core::types::{CharacterId, RoundNumber, Side};
use crate::war::roster::Roster;

/// How a finished war came out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarOutcome {
    Winner(Side),
    Draw,
}

/// Remaining HP per side when the war ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalTally {
    pub first_name: String,
    pub first_hp: u32,
    pub second_name: String,
    pub second_hp: u32,
    pub outcome: WarOutcome,
}

impl FinalTally {
    pub fn winner_name(&self) -> Option<&str> {
        match self.outcome {
            WarOutcome::Winner(Side::First) => Some(&self.first_name),
            WarOutcome::Winner(Side::Second) => Some(&self.second_name),
            WarOutcome::Draw => None,
        }
    }

    pub fn write_to(&self, log: &mut CombatLog) {
        log.push("=== FINAL TALLY ===");
        log.push(format!("{}: {} total HP remaining", self.first_name, self.first_hp));
        log.push(format!("{}: {} total HP remaining", self.second_name, self.second_hp));
        match self.outcome {
            WarOutcome::Winner(Side::First) => log.push(format!(
                "{} WINS! ({} HP vs {} HP)",
                self.first_name, self.first_hp, self.second_hp
            )),
            WarOutcome::Winner(Side::Second) => log.push(format!(
                "{} WINS! ({} HP vs {} HP)",
                self.second_name, self.second_hp, self.first_hp
            )),
            WarOutcome::Draw if self.first_hp == 0 => log.push("DRAW! Both groups eliminated"),
            WarOutcome::Draw => log.push(format!("DRAW! Both groups hold {} HP", self.first_hp)),
        }
    }
}

/// Both sides still have living HP on the field
pub fn is_war_active(first: &Roster, second: &Roster) -> bool {
    first.total_hp() > 0 && second.total_hp() > 0
}

/// Higher remaining living HP wins; equal totals draw
pub fn tally(first: &Roster, second: &Roster) -> FinalTally {
    let first_hp = first.total_hp();
    let second_hp = second.total_hp();
    let outcome = if first_hp > second_hp {
        WarOutcome::Winner(Side::First)
    } else if second_hp > first_hp {
        WarOutcome::Winner(Side::Second)
    } else {
        WarOutcome::Draw
    };
    FinalTally {
        first_name: first.name.clone(),
        first_hp,
        second_name: second.name.clone(),
        second_hp,
        outcome,
    }
}

/// What a round produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: RoundNumber,
    pub log: CombatLog,
    /// The war ended during or at the end of this round
    pub is_complete: bool,
    pub tally: Option<FinalTally>,
}

impl RoundReport {
    pub fn outcome(&self) -> Option<WarOutcome> {
        self.tally.as_ref().map(|t| t.outcome)
    }
}

fn prepare_roster<R: RandomSource + ?Sized>(
    roster: &mut Roster,
    config: &WarConfig,
    rng: &mut R,
    log: &mut CombatLog,
) {
    for character in roster.members.iter_mut().filter(|c| c.is_alive()) {
        start_turn(character, log);
        character.cards = draw_cards(character.class, config.draw_mode, rng);
        let names: Vec<&str> = character.cards.iter().map(|c| c.name()).collect();
        log.push(format!(
            "{} draws from {} deck: {}",
            character.name,
            draw_source(character.class, config.draw_mode),
            names.join(", ")
        ));
    }
}

fn living_ids(roster: &Roster) -> Vec<CharacterId> {
    roster.living().map(|c| c.id).collect()
}

fn index_by_id(roster: &Roster) -> AHashMap<CharacterId, usize> {
    roster
        .members
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id, i))
        .collect()
}

fn finish(first: &Roster, second: &Roster, round: RoundNumber, mut log: CombatLog) -> RoundReport {
    let tally = tally(first, second);
    tally.write_to(&mut log);
    tracing::info!(
        "War over after round {}: {} {} HP, {} {} HP ({:?})",
        round,
        tally.first_name,
        tally.first_hp,
        tally.second_name,
        tally.second_hp,
        tally.outcome
    );
    RoundReport {
        round,
        log,
        is_complete: true,
        tally: Some(tally),
    }
}

/// Resolve round `round` between two rosters, mutating them in place.
///
/// The round cap in `config` ends the war with a tally once round
/// `max_rounds` has been played.
pub fn simulate_war_round<R: RandomSource + ?Sized>(
    first: &mut Roster,
    second: &mut Roster,
    round: RoundNumber,
    config: &WarConfig,
    rng: &mut R,
) -> RoundReport {
    let mut log = CombatLog::new();
    log.push(format!("--- ROUND {} ---", round));

    if !is_war_active(first, second) {
        return finish(first, second, round, log);
    }

    prepare_roster(first, config, rng, &mut log);
    prepare_roster(second, config, rng, &mut log);

    // Turn order is fixed by who was standing when the round began
    let first_order = living_ids(first);
    let second_order = living_ids(second);
    let first_index = index_by_id(first);
    let second_index = index_by_id(second);

    for slot in 0..first_order.len().max(second_order.len()) {
        if let Some(index) = first_order.get(slot).and_then(|id| first_index.get(id)) {
            take_turn(&mut first.members, *index, &mut second.members, config, rng, &mut log);
        }
        if let Some(index) = second_order.get(slot).and_then(|id| second_index.get(id)) {
            take_turn(&mut second.members, *index, &mut first.members, config, rng, &mut log);
        }
    }

    log.push(format!(
        "End of Round {}: {} {} alive, {} {} alive",
        round,
        first.name,
        first.alive_count(),
        second.name,
        second.alive_count()
    ));
    tracing::debug!(
        "Round {} done: {} {} HP, {} {} HP",
        round,
        first.name,
        first.total_hp(),
        second.name,
        second.total_hp()
    );

    if !is_war_active(first, second) {
        return finish(first, second, round, log);
    }
    if round >= config.max_rounds {
        log.push(format!("Round limit of {} reached", config.max_rounds));
        return finish(first, second, round, log);
    }

    log.push(format!("--- ROUND {} COMPLETE ---", round));
    RoundReport {
        round,
        log,
        is_complete: false,
        tally: None,
    }
}
