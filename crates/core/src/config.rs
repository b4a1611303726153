//! Round configuration
//!
//! Every tunable of a round lives in [`RoomConfig`]. Defaults come from the constants in
//! `reaction-room-types`; a JSON document can override any subset of fields.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{
    ShapeKind, COMPLETION_HITS, COUNTDOWN_FROM, COUNT_DELAY_MS, EVENT_LOG_CAPACITY, GRID_COLS,
    GRID_ROWS, LOCK_PLAN_ATTEMPTS, OCCUPANCY_MAX, OCCUPANCY_MIN, REVEAL_DELAY_MS, START_LIVES,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: u8, cols: u8 },
    #[error("occupancy range must satisfy 0 <= min <= max <= 1 (got {min}..={max})")]
    InvalidOccupancy { min: f64, max: f64 },
    #[error("no shape kind has a positive spawn weight")]
    NoSpawnableKind,
    #[error("no spawnable shape kind can be a target")]
    NoTargetableKind,
    #[error("completion hit count must be positive")]
    ZeroCompletion,
    #[error("starting lives must be positive")]
    ZeroLives,
    #[error("countdown must start above zero")]
    ZeroCountdown,
    #[error("invalid config document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fraction of the grid filled at population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OccupancyRange {
    pub min: f64,
    pub max: f64,
}

impl OccupancyRange {
    pub const fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }
}

/// How a safe kind reacts to a click
///
/// Variants of the game disagree here, so both behaviours are knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeRule {
    /// Clicking it on the locked line costs nothing
    pub immune_to_lock: bool,
    /// Clicking it moves the lock to the planned next line
    pub advances_lock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomConfig {
    pub rows: u8,
    pub cols: u8,
    pub occupancy: OccupancyRange,
    pub count_delay_ms: u32,
    pub reveal_delay_ms: u32,
    pub countdown_from: u8,
    pub lives: u8,
    pub completion_hits: u32,
    pub lock_plan_attempts: u32,
    pub event_log_capacity: usize,
    /// Spawn weight per kind; missing kinds weigh 0
    pub weights: BTreeMap<ShapeKind, u32>,
    /// Minimum count per kind placed before the weighted fill
    pub guaranteed: BTreeMap<ShapeKind, u32>,
    /// Kinds that are never announced as the target
    pub non_target: BTreeSet<ShapeKind>,
    /// Safe kinds and their click behaviour
    pub safe: BTreeMap<ShapeKind, SafeRule>,
    /// Kind that reveals the planned next lock when clicked off-target
    pub hint: Option<ShapeKind>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        let weights = BTreeMap::from([
            (ShapeKind::Circle, 3),
            (ShapeKind::Ring, 2),
            (ShapeKind::Square, 3),
            (ShapeKind::Cross, 2),
            (ShapeKind::Triangle, 3),
            (ShapeKind::Star, 2),
            (ShapeKind::Spade, 1),
            (ShapeKind::Heart, 1),
            (ShapeKind::Club, 1),
            (ShapeKind::Diamond, 1),
            (ShapeKind::Shield, 1),
            (ShapeKind::Bolt, 0),
            (ShapeKind::Eye, 0),
        ]);
        let guaranteed = BTreeMap::from([
            (ShapeKind::Shield, 1),
            (ShapeKind::Bolt, 1),
            (ShapeKind::Eye, 1),
        ]);
        let safe = BTreeMap::from([
            (
                ShapeKind::Shield,
                SafeRule {
                    immune_to_lock: true,
                    advances_lock: true,
                },
            ),
            (
                ShapeKind::Bolt,
                SafeRule {
                    immune_to_lock: false,
                    advances_lock: false,
                },
            ),
        ]);

        Self {
            rows: GRID_ROWS,
            cols: GRID_COLS,
            occupancy: OccupancyRange {
                min: OCCUPANCY_MIN,
                max: OCCUPANCY_MAX,
            },
            count_delay_ms: COUNT_DELAY_MS,
            reveal_delay_ms: REVEAL_DELAY_MS,
            countdown_from: COUNTDOWN_FROM,
            lives: START_LIVES,
            completion_hits: COMPLETION_HITS,
            lock_plan_attempts: LOCK_PLAN_ATTEMPTS,
            event_log_capacity: EVENT_LOG_CAPACITY,
            weights,
            guaranteed,
            non_target: BTreeSet::from([ShapeKind::Shield, ShapeKind::Bolt]),
            safe,
            hint: Some(ShapeKind::Eye),
        }
    }
}

impl RoomConfig {
    /// Parse a JSON document and validate it
    ///
    /// Fields missing from the document keep their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: RoomConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let OccupancyRange { min, max } = self.occupancy;
        if !(min.is_finite() && max.is_finite() && 0.0 <= min && min <= max && max <= 1.0) {
            return Err(ConfigError::InvalidOccupancy { min, max });
        }

        if self.weights.values().all(|&w| w == 0) {
            return Err(ConfigError::NoSpawnableKind);
        }
        let targetable = self
            .weights
            .iter()
            .any(|(kind, &w)| w > 0 && self.is_targetable(*kind));
        if !targetable {
            return Err(ConfigError::NoTargetableKind);
        }

        if self.completion_hits == 0 {
            return Err(ConfigError::ZeroCompletion);
        }
        if self.lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.countdown_from == 0 {
            return Err(ConfigError::ZeroCountdown);
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Dense weight table indexed by [`ShapeKind::index`]
    pub fn weight_table(&self) -> [u32; ShapeKind::COUNT] {
        let mut table = [0u32; ShapeKind::COUNT];
        for (kind, &w) in &self.weights {
            table[kind.index()] = w;
        }
        table
    }

    pub fn is_targetable(&self, kind: ShapeKind) -> bool {
        !self.non_target.contains(&kind) && !self.safe.contains_key(&kind)
    }

    pub fn safe_rule(&self, kind: ShapeKind) -> Option<SafeRule> {
        self.safe.get(&kind).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = RoomConfig::default();
        config.validate().unwrap();
        assert_eq!(config.cell_count(), 30);
        assert_eq!(config.weight_table()[ShapeKind::Eye.index()], 0);
        assert!(!config.is_targetable(ShapeKind::Shield));
        assert!(config.is_targetable(ShapeKind::Eye));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RoomConfig::from_json_str(
            r#"{ "rows": 10, "occupancy": { "min": 0.62, "max": 0.62 }, "weights": { "star": 4 } }"#,
        )
        .unwrap();
        assert_eq!(config.rows, 10);
        assert_eq!(config.cols, GRID_COLS);
        assert_eq!(config.occupancy, OccupancyRange::fixed(0.62));
        assert_eq!(config.weights.len(), 1);
        assert_eq!(config.lives, START_LIVES);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = RoomConfig::from_json_str(r#"{ "weights": { "hexagon": 1 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(RoomConfig::from_json_str(r#"{ "speed": 3 }"#).is_err());
    }

    #[test]
    fn invalid_occupancy_is_rejected() {
        let config = RoomConfig {
            occupancy: OccupancyRange { min: 0.8, max: 0.5 },
            ..RoomConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidOccupancy { .. })
        ));
    }

    #[test]
    fn only_safe_kinds_spawnable_is_rejected() {
        let config = RoomConfig {
            weights: BTreeMap::from([(ShapeKind::Shield, 2)]),
            ..RoomConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoTargetableKind)
        ));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let config = RoomConfig {
            rows: 0,
            ..RoomConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyGrid { .. })));
    }
}
