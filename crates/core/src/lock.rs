//! Lock planner - the moving penalty line
//!
//! One full row or column is "locked" at a time: clicking a shape on it costs a life. A second
//! line is planned ahead so it can be shown as a hint, and becomes the current lock on the
//! next correct hit, penalty, or lock-advancing safe click.
//!
//! Planning is a bounded search: candidate lines are drawn without repetition, and the first
//! one that misses every cell in the avoid set wins. When the budget runs out the planner
//! settles for [`FALLBACK_LOCK`].

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::{Axis, Lock};

/// Line used when no candidate avoids the requested cells
pub const FALLBACK_LOCK: Lock = Lock::new(Axis::Row, 0);

/// Longest possible line (grid dimensions are `u8`)
pub const MAX_LINE: usize = u8::MAX as usize;

#[derive(Debug, Clone, PartialEq)]
pub struct LockPlanner {
    rows: u8,
    cols: u8,
    attempts: u32,
    current: Option<Lock>,
    next: Option<Lock>,
    hint_visible: bool,
}

impl LockPlanner {
    pub fn new(rows: u8, cols: u8, attempts: u32) -> Self {
        Self {
            rows,
            cols,
            attempts,
            current: None,
            next: None,
            hint_visible: false,
        }
    }

    pub fn current(&self) -> Option<Lock> {
        self.current
    }

    pub fn next(&self) -> Option<Lock> {
        self.next
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    /// Total number of distinct lines on the grid
    pub fn line_count(&self) -> u32 {
        self.rows as u32 + self.cols as u32
    }

    /// The n-th line: rows first, then columns
    fn line(&self, n: u32) -> Lock {
        if n < self.rows as u32 {
            Lock::new(Axis::Row, n as u8)
        } else {
            Lock::new(Axis::Col, (n - self.rows as u32) as u8)
        }
    }

    /// All cell indices on the given line
    pub fn coverage(&self, lock: Lock) -> ArrayVec<usize, MAX_LINE> {
        let mut out = ArrayVec::new();
        let cols = self.cols as usize;
        match lock.axis {
            Axis::Row if lock.index < self.rows => {
                let start = lock.index as usize * cols;
                out.extend(start..start + cols);
            }
            Axis::Col if lock.index < self.cols => {
                out.extend((0..self.rows as usize).map(|r| r * cols + lock.index as usize));
            }
            _ => {}
        }
        out
    }

    fn row_col(&self, index: usize) -> (u8, u8) {
        let cols = self.cols.max(1) as usize;
        ((index / cols) as u8, (index % cols) as u8)
    }

    fn touches(&self, lock: Lock, cells: &[usize]) -> bool {
        self.coverage(lock).iter().any(|i| cells.contains(i))
    }

    /// A line that misses every cell in `avoid`, or [`FALLBACK_LOCK`]
    pub fn plan_avoiding(&self, avoid: &[usize], rng: &mut SimpleRng) -> Lock {
        let mut candidates: Vec<u32> = (0..self.line_count()).collect();
        rng.shuffle(&mut candidates);

        let budget = (self.attempts as usize).min(candidates.len());
        for &n in &candidates[..budget] {
            let lock = self.line(n);
            if !self.touches(lock, avoid) {
                return lock;
            }
        }

        tracing::debug!(
            avoid = avoid.len(),
            budget,
            "lock planning exhausted; using fallback line"
        );
        FALLBACK_LOCK
    }

    /// Unconstrained random line
    pub fn random_lock(&self, rng: &mut SimpleRng) -> Lock {
        let n = rng.next_range(self.line_count());
        self.line(n)
    }

    /// Place the opening lock of a round and plan the one after it
    pub fn place_initial(&mut self, avoid: &[usize], rng: &mut SimpleRng) -> Lock {
        let lock = self.random_lock(rng);
        self.current = Some(lock);
        self.next = Some(self.plan_avoiding(avoid, rng));
        self.hint_visible = false;
        lock
    }

    /// Promote the planned line to current and plan a new one avoiding `avoid`
    pub fn advance(&mut self, avoid: &[usize], rng: &mut SimpleRng) -> Lock {
        let lock = match self.next.take() {
            Some(next) => next,
            None => self.plan_avoiding(avoid, rng),
        };
        self.current = Some(lock);
        self.next = Some(self.plan_avoiding(avoid, rng));
        self.hint_visible = false;
        lock
    }

    /// Show the planned line until the next advance
    pub fn reveal_hint(&mut self) -> Option<Lock> {
        if self.next.is_some() {
            self.hint_visible = true;
        }
        self.next
    }

    pub fn is_locked(&self, index: usize) -> bool {
        let (row, col) = self.row_col(index);
        self.current.is_some_and(|l| l.covers(row, col))
    }

    pub fn is_on_next(&self, index: usize) -> bool {
        let (row, col) = self.row_col(index);
        self.next.is_some_and(|l| l.covers(row, col))
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.next = None;
        self.hint_visible = false;
    }
}
