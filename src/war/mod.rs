//! War orchestration: rosters, rounds and the war state machine

pub mod roster;
pub mod round;
pub mod state;

pub use roster::{load_roster_book, parse_roster_book, random_roster, Roster, RosterBook};
pub use round::{is_war_active, simulate_war_round, tally, FinalTally, RoundReport, WarOutcome};
pub use state::{War, WarPhase};
