//! Short-lived highlight of the shape behind the last mistake.

use crate::core::RoomEvent;
use crate::types::{ShapeKind, MISS_FLASH_MS};

/// Tracks which shape kind, if any, is flashing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MissFlash {
    kind: Option<ShapeKind>,
    until_ms: u64,
}

impl MissFlash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a flash on a miss or lock penalty; a new round clears it.
    pub fn observe(&mut self, event: &RoomEvent, now_ms: u64) {
        match *event {
            RoomEvent::Miss { kind, .. } | RoomEvent::LockPenalty { kind, .. } => {
                self.kind = Some(kind);
                self.until_ms = now_ms + MISS_FLASH_MS as u64;
            }
            RoomEvent::RoundStarted { .. } => self.kind = None,
            _ => {}
        }
    }

    /// The flashing kind at `now_ms`
    pub fn active(&self, now_ms: u64) -> Option<ShapeKind> {
        self.kind.filter(|_| now_ms < self.until_ms)
    }

    /// When the current flash ends; the runner redraws then
    pub fn due(&self, now_ms: u64) -> Option<u64> {
        self.active(now_ms).map(|_| self.until_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_flashes_for_a_while() {
        let mut flash = MissFlash::new();
        assert_eq!(flash.active(0), None);

        flash.observe(
            &RoomEvent::Miss {
                index: 3,
                kind: ShapeKind::Heart,
                lives: 2,
            },
            1_000,
        );
        assert_eq!(flash.active(1_000), Some(ShapeKind::Heart));
        assert_eq!(flash.active(1_199), Some(ShapeKind::Heart));
        assert_eq!(flash.due(1_100), Some(1_200));
        assert_eq!(flash.active(1_200), None);
        assert_eq!(flash.due(1_200), None);
    }

    #[test]
    fn test_lock_penalty_replaces_flash() {
        let mut flash = MissFlash::new();
        flash.observe(
            &RoomEvent::Miss {
                index: 0,
                kind: ShapeKind::Heart,
                lives: 2,
            },
            0,
        );
        flash.observe(
            &RoomEvent::LockPenalty {
                index: 1,
                kind: ShapeKind::Star,
                lives: 1,
            },
            150,
        );
        assert_eq!(flash.active(300), Some(ShapeKind::Star));
    }

    #[test]
    fn test_new_round_clears_flash() {
        let mut flash = MissFlash::new();
        flash.observe(
            &RoomEvent::Miss {
                index: 0,
                kind: ShapeKind::Club,
                lives: 2,
            },
            0,
        );
        flash.observe(&RoomEvent::RoundStarted { round: 2 }, 10);
        assert_eq!(flash.active(20), None);

        flash.observe(
            &RoomEvent::Hit {
                index: 0,
                kind: ShapeKind::Club,
                split_ms: 5,
            },
            30,
        );
        assert_eq!(flash.active(40), None);
    }
}
