//! Ordered, human-readable combat log

use serde::{Deserialize, Serialize};

/// Lines produced while resolving turns, in the order they happened
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatLog {
    lines: Vec<String>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::trace!(target: "boarding_war::combat", "{}", line);
        self.lines.push(line);
    }

    /// Append another log, keeping order
    pub fn extend(&mut self, other: CombatLog) {
        self.lines.extend(other.lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether any line contains `needle`
    pub fn mentions(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}
