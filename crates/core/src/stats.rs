//! Split timing statistics and end-of-round summaries.

use std::fmt;

use serde::Serialize;

use crate::types::{Outcome, ShapeKind};

/// One successful hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitRecord {
    pub index: usize,
    pub row: u8,
    pub col: u8,
    /// Milliseconds since the previous hit (or the reveal, for the first hit)
    pub split_ms: u64,
    /// Milliseconds since the reveal
    pub cumulative_ms: u64,
    pub kind: ShapeKind,
}

/// Aggregate view of a split list
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SplitStats {
    pub count: usize,
    /// Split of the most recent hit
    pub last_ms: Option<u64>,
    pub best_ms: Option<u64>,
    pub average_ms: Option<f64>,
    pub worst_ms: Option<u64>,
    pub total_ms: u64,
}

impl SplitStats {
    pub fn from_splits(splits: &[SplitRecord]) -> Self {
        if splits.is_empty() {
            return Self::default();
        }

        let total_ms: u64 = splits.iter().map(|s| s.split_ms).sum();
        Self {
            count: splits.len(),
            last_ms: splits.last().map(|s| s.split_ms),
            best_ms: splits.iter().map(|s| s.split_ms).min(),
            average_ms: Some(total_ms as f64 / splits.len() as f64),
            worst_ms: splits.iter().map(|s| s.split_ms).max(),
            total_ms,
        }
    }
}

/// Final report of a finished round
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub outcome: Outcome,
    pub hits: u32,
    pub mistakes: u32,
    pub lives_left: u8,
    pub stats: SplitStats,
    pub splits: Vec<SplitRecord>,
}

impl RoundSummary {
    pub fn new(outcome: Outcome, mistakes: u32, lives_left: u8, splits: Vec<SplitRecord>) -> Self {
        Self {
            outcome,
            hits: splits.len() as u32,
            mistakes,
            lives_left,
            stats: SplitStats::from_splits(&splits),
            splits,
        }
    }
}

/// `1234` → `"1234 ms"`, missing values as an em placeholder
pub fn format_ms(ms: Option<u64>) -> String {
    match ms {
        Some(ms) => format!("{} ms", ms),
        None => "—".to_string(),
    }
}

impl fmt::Display for RoundSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self.outcome {
            Outcome::Success => "Round clear",
            Outcome::Failure => "Out of lives",
        };
        writeln!(
            f,
            "{}: {} hits, {} mistakes, total {} ms",
            title, self.hits, self.mistakes, self.stats.total_ms
        )?;
        writeln!(
            f,
            "best {} / avg {} / worst {}",
            format_ms(self.stats.best_ms),
            format_ms(self.stats.average_ms.map(|a| a.round() as u64)),
            format_ms(self.stats.worst_ms)
        )?;
        for (n, s) in self.splits.iter().enumerate() {
            writeln!(
                f,
                "#{:<2} {:<8} r{}c{}  +{} ms  ({} ms)",
                n + 1,
                s.kind.as_str(),
                s.row + 1,
                s.col + 1,
                s.split_ms,
                s.cumulative_ms
            )?;
        }
        Ok(())
    }
}
