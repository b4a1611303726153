//! Game session module - the round state machine
//!
//! [`GameSession`] owns everything a round needs (board, lock planner, timers, RNG) and moves
//! through `Idle → Countdown → Revealed → Ended`. It never reads the clock: every entry
//! point takes `now_ms`, and pending countdown/reveal timers fire from [`GameSession::advance`].

use crate::board::Board;
use crate::config::{ConfigError, RoomConfig};
use crate::events::{EventLog, LockReason, RoomEvent};
use crate::lock::LockPlanner;
use crate::rng::SimpleRng;
use crate::scheduler::{Scheduler, TimerKind};
use crate::snapshot::{RoomSnapshot, TileSnapshot};
use crate::stats::{RoundSummary, SplitRecord, SplitStats};
use crate::target::{self, KindSet};
use crate::types::{Outcome, Phase, RoomAction, ShapeKind};

/// What a click did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not playing, out of range, or an already-found tile
    Ignored,
    /// Empty tile; reports whether the planned lock covers it
    Advisory { on_next_lock: bool },
    /// Safe kind clicked without penalty
    Safe,
    /// Hint kind clicked; the planned lock is now visible
    Hint,
    /// Locked tile clicked
    LockPenalty,
    /// Wrong kind clicked
    Miss,
    /// Target kind clicked
    Hit,
}

/// One player's session: the current round plus history since the last reset
#[derive(Debug, Clone)]
pub struct GameSession {
    config: RoomConfig,
    weights: [u32; ShapeKind::COUNT],
    non_target: KindSet,
    seed: u32,
    rng: SimpleRng,
    board: Board,
    locks: LockPlanner,
    scheduler: Scheduler,
    phase: Phase,
    /// Monotonic round number (increments on every start)
    round: u32,
    countdown: Option<u8>,
    target: Option<ShapeKind>,
    lives: u8,
    hits: u32,
    mistakes: u32,
    /// Kinds already used as target this round
    used: KindSet,
    /// Kinds banned from the next selection only
    forbid: KindSet,
    round_started_ms: u64,
    last_split_ms: u64,
    splits: Vec<SplitRecord>,
    summary: Option<RoundSummary>,
    results_open: bool,
    history: Vec<RoundSummary>,
    events: Vec<RoomEvent>,
    log: EventLog,
}

impl GameSession {
    /// Create a session with the default configuration
    pub fn new(seed: u32) -> Self {
        Self::build(RoomConfig::default(), seed)
    }

    /// Create a session from a validated configuration
    pub fn with_config(config: RoomConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: RoomConfig, seed: u32) -> Self {
        let weights = config.weight_table();
        let non_target = ShapeKind::ALL
            .into_iter()
            .filter(|k| !config.is_targetable(*k))
            .collect();

        Self {
            weights,
            non_target,
            seed,
            rng: SimpleRng::new(seed),
            board: Board::new(config.rows, config.cols),
            locks: LockPlanner::new(config.rows, config.cols, config.lock_plan_attempts),
            scheduler: Scheduler::new(),
            phase: Phase::Idle,
            round: 0,
            countdown: None,
            target: None,
            lives: config.lives,
            hits: 0,
            mistakes: 0,
            used: KindSet::EMPTY,
            forbid: KindSet::EMPTY,
            round_started_ms: 0,
            last_split_ms: 0,
            splits: Vec::new(),
            summary: None,
            results_open: false,
            history: Vec::new(),
            events: Vec::new(),
            log: EventLog::new(config.event_log_capacity),
            config,
        }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn playing(&self) -> bool {
        self.phase == Phase::Revealed
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn countdown(&self) -> Option<u8> {
        self.countdown
    }

    pub fn target(&self) -> Option<ShapeKind> {
        self.target
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn used(&self) -> KindSet {
        self.used
    }

    pub fn forbidden(&self) -> KindSet {
        self.forbid
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn locks(&self) -> &LockPlanner {
        &self.locks
    }

    pub fn splits(&self) -> &[SplitRecord] {
        &self.splits
    }

    /// Live statistics for the round in progress
    pub fn stats(&self) -> SplitStats {
        SplitStats::from_splits(&self.splits)
    }

    /// Summary of the round that just ended
    pub fn summary(&self) -> Option<&RoundSummary> {
        self.summary.as_ref()
    }

    pub fn results_open(&self) -> bool {
        self.results_open
    }

    /// Finished rounds since the last reset, oldest first
    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<RoomEvent> {
        std::mem::take(&mut self.events)
    }

    /// When the next pending timer is due
    pub fn next_timer_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn locks_mut(&mut self) -> &mut LockPlanner {
        &mut self.locks
    }

    #[cfg(test)]
    pub(crate) fn set_target(&mut self, kind: Option<ShapeKind>) {
        self.target = kind;
    }

    /// Apply a player action
    pub fn apply_action(&mut self, action: RoomAction, now_ms: u64) -> bool {
        match action {
            RoomAction::Start => {
                self.start(now_ms);
                true
            }
            RoomAction::Reset => {
                self.reset(now_ms);
                true
            }
            RoomAction::Click(index) => self.click(index as usize, now_ms) != ClickOutcome::Ignored,
            RoomAction::CloseResults => self.close_results(),
            RoomAction::PlayAgain => self.play_again(now_ms),
        }
    }

    /// Begin a new round, discarding any round in progress
    pub fn start(&mut self, now_ms: u64) {
        // Stale countdown/reveal timers must never reach the new round.
        self.scheduler.cancel_all();

        self.round = self.round.wrapping_add(1);
        self.board = Board::new(self.config.rows, self.config.cols);
        let filled = self.board.populate(
            self.config.occupancy,
            &self.weights,
            &self.config.guaranteed,
            &mut self.rng,
        );
        self.locks.clear();

        self.lives = self.config.lives;
        self.hits = 0;
        self.mistakes = 0;
        self.used.clear();
        self.forbid.clear();
        self.splits.clear();
        self.target = None;
        self.summary = None;
        self.results_open = false;
        self.round_started_ms = now_ms;
        self.last_split_ms = now_ms;

        let from = self.config.countdown_from;
        self.countdown = Some(from);
        self.phase = Phase::Countdown;
        self.scheduler.schedule(
            TimerKind::CountdownTick,
            now_ms + self.config.count_delay_ms as u64,
        );

        tracing::info!(round = self.round, filled, "round started");
        self.events.push(RoomEvent::RoundStarted { round: self.round });
        self.events.push(RoomEvent::CountdownChanged(from));
        self.log.push(format!("Round {}: get ready", self.round));
    }

    /// Clear history and the log, then start over
    pub fn reset(&mut self, now_ms: u64) {
        self.history.clear();
        self.log.clear();
        self.start(now_ms);
    }

    /// Dismiss the results panel; returns false outside of an ended round
    pub fn close_results(&mut self) -> bool {
        match self.phase {
            Phase::Ended(_) => {
                self.results_open = false;
                self.phase = Phase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Start the next round from the results panel (or from idle)
    pub fn play_again(&mut self, now_ms: u64) -> bool {
        match self.phase {
            Phase::Ended(_) | Phase::Idle => {
                self.start(now_ms);
                true
            }
            _ => false,
        }
    }

    /// Fire every timer due at `now_ms`; returns true if anything fired
    pub fn advance(&mut self, now_ms: u64) -> bool {
        let mut fired = false;
        while let Some(kind) = self.scheduler.pop_due(now_ms) {
            fired = true;
            match kind {
                TimerKind::CountdownTick => self.countdown_tick(now_ms),
                TimerKind::Reveal => self.reveal(now_ms),
            }
        }
        fired
    }

    fn countdown_tick(&mut self, now_ms: u64) {
        if self.phase != Phase::Countdown {
            return;
        }

        let n = self.countdown.unwrap_or(0).saturating_sub(1);
        if n > 0 {
            self.countdown = Some(n);
            self.events.push(RoomEvent::CountdownChanged(n));
            self.scheduler.schedule(
                TimerKind::CountdownTick,
                now_ms + self.config.count_delay_ms as u64,
            );
        } else {
            self.countdown = None;
            self.scheduler.schedule(
                TimerKind::Reveal,
                now_ms + self.config.reveal_delay_ms as u64,
            );
        }
    }

    fn reveal(&mut self, now_ms: u64) {
        if self.phase != Phase::Countdown {
            return;
        }

        self.target = self.choose_target();
        let avoid = self.target_cells();
        let lock = self.locks.place_initial(&avoid, &mut self.rng);

        self.round_started_ms = now_ms;
        self.last_split_ms = now_ms;
        self.countdown = None;
        self.phase = Phase::Revealed;

        tracing::info!(round = self.round, target = ?self.target, %lock, "target revealed");
        if let Some(kind) = self.target {
            self.events.push(RoomEvent::TargetRevealed(kind));
            self.log.push(format!("Target: {}", kind.as_str()));
        }
        self.log.push(format!("Locked: {}", lock));
    }

    /// Pick the next target
    ///
    /// When nothing is pickable the board is refilled once. The forbid set is lifted only if
    /// the refilled board still offers nothing else.
    fn choose_target(&mut self) -> Option<ShapeKind> {
        if let Some(kind) = self.pick_target(self.forbid) {
            return Some(kind);
        }

        let cells = self.board.refill(&self.weights, &mut self.rng);
        if cells > 0 {
            tracing::debug!(cells, "no target candidate; board refilled");
            self.events.push(RoomEvent::BoardRefilled { cells });
            self.log.push("Board refilled");
            if let Some(kind) = self.pick_target(self.forbid) {
                return Some(kind);
            }
        }

        if self.forbid.is_empty() {
            return None;
        }
        tracing::debug!("only forbidden kinds left; lifting forbid set");
        self.pick_target(KindSet::EMPTY)
    }

    fn pick_target(&mut self, forbid: KindSet) -> Option<ShapeKind> {
        let candidates = self.board.present_kinds();
        let choice = target::choose(
            &candidates,
            forbid,
            &mut self.used,
            self.non_target,
            &self.board,
            &mut self.rng,
        );
        if choice.relaxed_used {
            tracing::debug!("every candidate already used; clearing used set");
        }
        choice.kind
    }

    fn target_cells(&self) -> Vec<usize> {
        match self.target {
            Some(kind) => self.board.cells_of(kind),
            None => Vec::new(),
        }
    }

    fn advance_lock(&mut self, reason: LockReason) {
        let avoid = self.target_cells();
        let current = self.locks.advance(&avoid, &mut self.rng);
        if let Some(next) = self.locks.next() {
            self.events.push(RoomEvent::LockMoved {
                current,
                next,
                reason,
            });
        }
        tracing::debug!(%current, reason = reason.as_str(), "lock advanced");
    }

    /// Handle a click on the cell at `index`
    pub fn click(&mut self, index: usize, now_ms: u64) -> ClickOutcome {
        if self.phase != Phase::Revealed {
            return ClickOutcome::Ignored;
        }
        let Some(tile) = self.board.get(index) else {
            return ClickOutcome::Ignored;
        };

        let Some(kind) = tile.kind else {
            let on_next_lock = self.locks.is_on_next(index);
            self.events.push(RoomEvent::Advisory {
                index,
                on_next_lock,
            });
            self.log.push(if on_next_lock {
                "Empty tile: the next lock covers it"
            } else {
                "Empty tile: clear of the next lock"
            });
            return ClickOutcome::Advisory { on_next_lock };
        };

        if tile.found {
            return ClickOutcome::Ignored;
        }

        let locked = self.locks.is_locked(index);

        if let Some(rule) = self.config.safe_rule(kind) {
            if locked && !rule.immune_to_lock {
                return self.lock_penalty(index, kind, now_ms);
            }
            self.events.push(RoomEvent::SafeUsed { index, kind });
            self.log.push(format!("{} absorbed the click", kind.as_str()));
            if rule.advances_lock {
                self.advance_lock(LockReason::Safe);
            }
            return ClickOutcome::Safe;
        }

        if self.config.hint == Some(kind) && self.target != Some(kind) {
            let next = self.locks.reveal_hint();
            let respawned = self.board.respawn(index, &self.weights, &mut self.rng);
            if let (Some(next), Some(respawned)) = (next, respawned) {
                self.events.push(RoomEvent::HintRevealed { next, respawned });
                self.log.push(format!("Hint: next lock is {}", next));
            }
            return ClickOutcome::Hint;
        }

        if locked {
            return self.lock_penalty(index, kind, now_ms);
        }

        if self.target != Some(kind) {
            self.lose_life();
            self.events.push(RoomEvent::Miss {
                index,
                kind,
                lives: self.lives,
            });
            self.log
                .push(format!("Miss ({}). Lives left: {}", kind.as_str(), self.lives));
            self.after_mistake(now_ms);
            return ClickOutcome::Miss;
        }

        self.hit(index, kind, now_ms);
        ClickOutcome::Hit
    }

    fn lock_penalty(&mut self, index: usize, kind: ShapeKind, now_ms: u64) -> ClickOutcome {
        self.lose_life();
        self.events.push(RoomEvent::LockPenalty {
            index,
            kind,
            lives: self.lives,
        });
        self.log
            .push(format!("Locked tile! Lives left: {}", self.lives));
        self.after_mistake(now_ms);
        ClickOutcome::LockPenalty
    }

    fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.mistakes += 1;
    }

    fn after_mistake(&mut self, now_ms: u64) {
        if self.lives == 0 {
            self.end(Outcome::Failure, now_ms);
        } else {
            self.advance_lock(LockReason::Penalty);
        }
    }

    fn hit(&mut self, index: usize, kind: ShapeKind, now_ms: u64) {
        self.board.mark_found(index);

        let split_ms = now_ms.saturating_sub(self.last_split_ms);
        self.last_split_ms = self.last_split_ms.max(now_ms);
        let cumulative_ms = self.splits.last().map_or(0, |s| s.cumulative_ms) + split_ms;
        let (row, col) = self.board.row_col(index);
        self.splits.push(SplitRecord {
            index,
            row,
            col,
            split_ms,
            cumulative_ms,
            kind,
        });
        self.hits += 1;

        self.events.push(RoomEvent::Hit {
            index,
            kind,
            split_ms,
        });
        self.log
            .push(format!("Hit {} in {} ms", kind.as_str(), split_ms));

        if self.hits >= self.config.completion_hits {
            self.end(Outcome::Success, now_ms);
            return;
        }

        self.used.insert(kind);
        self.forbid = target::forbid_after(kind);
        self.target = self.choose_target();
        if let Some(next) = self.target {
            self.events.push(RoomEvent::TargetChanged(next));
            self.log.push(format!("Target: {}", next.as_str()));
        }
        self.advance_lock(LockReason::Correct);
    }

    fn end(&mut self, outcome: Outcome, now_ms: u64) {
        self.phase = Phase::Ended(outcome);
        self.scheduler.cancel_all();
        self.locks.clear();

        let summary = RoundSummary::new(outcome, self.mistakes, self.lives, self.splits.clone());
        tracing::info!(
            round = self.round,
            outcome = outcome.as_str(),
            hits = summary.hits,
            total_ms = summary.stats.total_ms,
            elapsed_ms = now_ms.saturating_sub(self.round_started_ms),
            "round ended"
        );

        self.log.push(match outcome {
            Outcome::Success => format!("Round clear in {} ms", summary.stats.total_ms),
            Outcome::Failure => "Out of lives. Round over.".to_string(),
        });
        self.events.push(RoomEvent::RoundEnded(outcome));
        self.history.push(summary.clone());
        self.summary = Some(summary);
        self.results_open = true;
    }

    /// Fill `out` with the current state, reusing its allocations
    pub fn snapshot_into(&self, out: &mut RoomSnapshot) {
        out.rows = self.board.rows();
        out.cols = self.board.cols();

        let current = self.locks.current();
        let next = self.locks.next();
        let hint = self.locks.hint_visible();
        out.tiles.clear();
        out.tiles
            .extend(self.board.tiles().iter().enumerate().map(|(i, tile)| {
                let (row, col) = self.board.row_col(i);
                TileSnapshot {
                    kind: tile.kind,
                    found: tile.found,
                    locked: current.is_some_and(|l| l.covers(row, col)),
                    hinted: hint && next.is_some_and(|l| l.covers(row, col)),
                }
            }));

        out.phase = self.phase;
        out.round = self.round;
        out.seed = self.seed;
        out.countdown = self.countdown;
        out.target = self.target;
        out.lives = self.lives;
        out.max_lives = self.config.lives;
        out.hits = self.hits;
        out.completion_hits = self.config.completion_hits;
        out.mistakes = self.mistakes;
        out.stats = self.stats();
        out.current_lock = current;
        out.next_lock = if hint { next } else { None };
        out.results = if self.results_open {
            self.summary.clone()
        } else {
            None
        };
        out.log.clear();
        out.log.extend(self.log.iter().map(str::to_owned));
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        let mut s = RoomSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
