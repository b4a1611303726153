//! Target selector - which shape is live next
//!
//! Selection filters the kinds still on the board through three exclusions (never-target
//! kinds, the one-shot forbid set, kinds already used this round) and then prefers kinds that
//! have at least two live tiles left. The used set is relaxed instead of leaving the round
//! without a target; the forbid set never is, so callers decide what to do when only
//! forbidden kinds remain.

use crate::board::Board;
use crate::rng::SimpleRng;
use crate::types::ShapeKind;

/// Compact set of shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KindSet(u16);

impl KindSet {
    pub const EMPTY: KindSet = KindSet(0);

    pub fn insert(&mut self, kind: ShapeKind) {
        self.0 |= 1 << kind.index();
    }

    pub fn remove(&mut self, kind: ShapeKind) {
        self.0 &= !(1 << kind.index());
    }

    pub fn contains(&self, kind: ShapeKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = ShapeKind> + '_ {
        ShapeKind::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

impl FromIterator<ShapeKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = ShapeKind>>(iter: I) -> Self {
        let mut set = KindSet::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

/// Result of a target selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub kind: Option<ShapeKind>,
    /// The used set was cleared to find a candidate
    pub relaxed_used: bool,
}

/// Pick the next target kind
///
/// `used` is cleared in place when it is the only thing standing between the pool and an
/// empty result. Forbidden kinds are never returned; pass [`KindSet::EMPTY`] to lift the ban.
pub fn choose(
    candidates: &[ShapeKind],
    forbid: KindSet,
    used: &mut KindSet,
    non_target: KindSet,
    board: &Board,
    rng: &mut SimpleRng,
) -> Choice {
    let filter = |forbid: KindSet, used: KindSet| -> Vec<ShapeKind> {
        candidates
            .iter()
            .copied()
            .filter(|k| !non_target.contains(*k) && !forbid.contains(*k) && !used.contains(*k))
            .collect()
    };

    let mut relaxed_used = false;

    let mut pool = filter(forbid, *used);
    if pool.is_empty() && !used.is_empty() {
        used.clear();
        relaxed_used = true;
        pool = filter(forbid, *used);
    }

    let plenty: Vec<ShapeKind> = pool
        .iter()
        .copied()
        .filter(|k| board.available_count(*k) >= 2)
        .collect();
    let final_pool = if plenty.is_empty() { &pool } else { &plenty };

    Choice {
        kind: rng.pick(final_pool),
        relaxed_used,
    }
}

/// Kinds banned from the very next selection after `last` was hit
///
/// ```
/// use reaction_room_core::target::forbid_after;
/// use reaction_room_core::types::ShapeKind;
///
/// assert!(forbid_after(ShapeKind::Ring).contains(ShapeKind::Circle));
/// let after_heart = forbid_after(ShapeKind::Heart);
/// assert_eq!(after_heart.len(), 3);
/// assert!(!after_heart.contains(ShapeKind::Heart));
/// assert!(forbid_after(ShapeKind::Star).is_empty());
/// ```
pub fn forbid_after(last: ShapeKind) -> KindSet {
    let mut set = KindSet::EMPTY;
    if let Some(other) = last.pair() {
        set.insert(other);
    }
    if last.is_suit() {
        for kind in ShapeKind::ALL {
            if kind.is_suit() && kind != last {
                set.insert(kind);
            }
        }
    }
    set
}
