//! War state machine
//!
//! Idle -> RoundInProgress -> Paused -> (RoundInProgress | Ended).
//! A war owns both rosters from `start` until it ends or is reset; callers
//! read them back through the accessors or [`War::sync_into`].

use serde::{Deserialize, Serialize};

use crate::combat::CombatLog;
use crate::core::config::WarConfig;
use crate::core::dice::RandomSource;
use crate::core::error::{Result, WarError};
use crate::core::types::RoundNumber;
use crate::war::roster::{Roster, RosterBook};
use crate::war::round::{simulate_war_round, FinalTally, RoundReport};

/// War phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WarPhase {
    #[default]
    Idle,
    RoundInProgress,
    /// Round finished; waiting for `continue_war`
    Paused,
    Ended,
}

pub struct War<R: RandomSource> {
    config: WarConfig,
    rng: R,
    phase: WarPhase,
    round: RoundNumber,
    rosters: Option<(Roster, Roster)>,
    log: CombatLog,
    tally: Option<FinalTally>,
}

impl<R: RandomSource> War<R> {
    /// New idle war; fails on an invalid config
    pub fn new(config: WarConfig, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            phase: WarPhase::Idle,
            round: 0,
            rosters: None,
            log: CombatLog::new(),
            tally: None,
        })
    }

    pub fn phase(&self) -> WarPhase {
        self.phase
    }

    pub fn round(&self) -> RoundNumber {
        self.round
    }

    pub fn config(&self) -> &WarConfig {
        &self.config
    }

    /// Every log line since `start`
    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn tally(&self) -> Option<&FinalTally> {
        self.tally.as_ref()
    }

    pub fn rosters(&self) -> Option<(&Roster, &Roster)> {
        self.rosters.as_ref().map(|(a, b)| (a, b))
    }

    /// Snapshot two named rosters and play round 1
    pub fn start(&mut self, book: &RosterBook, first: &str, second: &str) -> Result<RoundReport> {
        if matches!(self.phase, WarPhase::RoundInProgress | WarPhase::Paused) {
            return Err(WarError::InvalidTransition(format!(
                "cannot start a war while {:?}",
                self.phase
            )));
        }
        if first == second {
            return Err(WarError::InvalidSetup(format!(
                "a roster cannot fight itself ({})",
                first
            )));
        }

        let first = book.roster(first)?;
        let second = book.roster(second)?;
        for roster in [&first, &second] {
            if roster.is_empty() {
                return Err(WarError::InvalidSetup(format!("roster {} is empty", roster.name)));
            }
        }

        self.log = CombatLog::new();
        self.log
            .push(format!("=== WAR BEGINS: {} vs {} ===", first.name, second.name));
        tracing::info!(
            "War started: {} ({} members) vs {} ({} members)",
            first.name,
            first.len(),
            second.name,
            second.len()
        );

        self.rosters = Some((first, second));
        self.tally = None;
        self.round = 1;
        Ok(self.play_round())
    }

    /// Resume after a pause with the next round
    pub fn continue_war(&mut self) -> Result<RoundReport> {
        if self.phase != WarPhase::Paused {
            return Err(WarError::InvalidTransition(format!(
                "continue requires a paused war, not {:?}",
                self.phase
            )));
        }
        self.round += 1;
        Ok(self.play_round())
    }

    /// Keep continuing until the war ends
    pub fn run_to_end(&mut self) -> Result<FinalTally> {
        while self.phase == WarPhase::Paused {
            self.continue_war()?;
        }
        self.tally.clone().ok_or_else(|| {
            WarError::InvalidTransition(format!("no war to finish ({:?})", self.phase))
        })
    }

    /// Drop the current war and return to Idle
    pub fn reset(&mut self) {
        self.phase = WarPhase::Idle;
        self.round = 0;
        self.rosters = None;
        self.log = CombatLog::new();
        self.tally = None;
    }

    /// Write the current roster state back into `book`
    pub fn sync_into(&self, book: &mut RosterBook) {
        if let Some((first, second)) = &self.rosters {
            book.store(first);
            book.store(second);
        }
    }

    pub fn into_rosters(self) -> Option<(Roster, Roster)> {
        self.rosters
    }

    fn play_round(&mut self) -> RoundReport {
        let Some((first, second)) = self.rosters.as_mut() else {
            self.phase = WarPhase::Idle;
            return RoundReport {
                round: self.round,
                log: CombatLog::new(),
                is_complete: true,
                tally: None,
            };
        };

        self.phase = WarPhase::RoundInProgress;
        let report = simulate_war_round(first, second, self.round, &self.config, &mut self.rng);
        self.log.extend(report.log.clone());

        if report.is_complete {
            self.phase = WarPhase::Ended;
            self.tally = report.tally.clone();
        } else {
            self.phase = WarPhase::Paused;
        }
        report
    }
}
