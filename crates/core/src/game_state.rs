//! Game state module - the session state machine
//!
//! This module ties together the board, the current piece, the randomizer and
//! scoring. A session cycles `Falling -> LockPending -> (LineClearing) ->`
//! spawn, with `Paused` orthogonal to all of it and `GameOver` terminal until a
//! restart. Spawning happens inside the transition that ends the previous
//! piece, so it never shows up as a resting phase.
//!
//! Time only advances through [`GameState::update`], which takes the elapsed
//! milliseconds since the previous call. Player input goes through
//! [`GameState::apply`]; illegal moves return `false` and change nothing.

use log::{debug, info, trace};

use crate::board::Board;
use crate::config::RulesConfig;
use crate::piece::Piece;
use crate::pieces::try_rotate;
use crate::rng::Randomizer;
use crate::scoring::{line_clear_score, LevelProgress};
use crate::snapshot::GameSnapshot;
use crate::types::{Command, PieceKind};

/// Where the session is in its piece lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The current piece falls one row every fall interval.
    Falling,
    /// The last downward step failed; the lock timer is running.
    LockPending,
    /// Full rows are animating out; there is no current piece.
    LineClearing,
    /// Spawn or lock-out failed. Only a restart leaves this phase.
    GameOver,
}

/// Notifications for the presentation layer.
///
/// Queued by the engine and drained with [`GameState::drain_events`]; nothing
/// in the engine depends on whether they are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    PieceLocked { kind: PieceKind },
    LinesCleared { rows: Vec<usize>, points: u32 },
    LevelUp { level: u32 },
    GameOver { score: u32 },
    Restarted,
}

/// Per-session counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Pieces spawned, indexed by [`PieceKind::index`].
    pub spawned: [u32; 7],
    /// Time spent unpaused and not game over.
    pub play_time_ms: u64,
}

impl Stats {
    pub fn total_spawned(&self) -> u32 {
        self.spawned.iter().sum()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    rules: RulesConfig,
    board: Board,
    randomizer: Randomizer,
    current: Option<Piece>,
    next: PieceKind,
    phase: Phase,
    paused: bool,
    quit_requested: bool,
    score: u32,
    lines: u32,
    progress: LevelProgress,
    fall_timer_ms: u32,
    lock_timer_ms: u32,
    lock_resets: u32,
    clear_timer_ms: u32,
    clearing_rows: Vec<usize>,
    events: Vec<GameEvent>,
    stats: Stats,
}

impl GameState {
    /// Create a session with the given rules and randomizer seed.
    ///
    /// The rules must pass [`RulesConfig::validate`].
    pub fn new(rules: RulesConfig, seed: u32) -> Self {
        debug_assert!(rules.validate().is_ok(), "invalid rules: {:?}", rules.validate());

        let mut randomizer = Randomizer::new(seed);
        let next = randomizer.next_kind();
        let mut state = Self {
            board: Board::with_size(rules.board_width, rules.board_height),
            progress: LevelProgress::new(&rules),
            rules,
            randomizer,
            current: None,
            next,
            phase: Phase::Falling,
            paused: false,
            quit_requested: false,
            score: 0,
            lines: 0,
            fall_timer_ms: 0,
            lock_timer_ms: 0,
            lock_resets: 0,
            clear_timer_ms: 0,
            clearing_rows: Vec::new(),
            events: Vec::new(),
            stats: Stats::default(),
        };
        state.spawn();
        state
    }

    /// Create a session with the default rules.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(RulesConfig::default(), seed)
    }

    /// Throw the session away and start over on an empty board.
    ///
    /// The randomizer keeps running, so a restart does not replay the previous
    /// piece sequence.
    pub fn restart(&mut self) {
        info!(
            "restart (score {}, level {}, lines {})",
            self.score,
            self.level(),
            self.lines
        );
        let first = self.randomizer.next_kind();

        self.board = Board::with_size(self.rules.board_width, self.rules.board_height);
        self.current = None;
        self.next = first;
        self.paused = false;
        self.score = 0;
        self.lines = 0;
        self.progress = LevelProgress::new(&self.rules);
        self.fall_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;
        self.clear_timer_ms = 0;
        self.clearing_rows.clear();
        self.stats = Stats::default();
        self.events.clear();
        self.events.push(GameEvent::Restarted);

        self.spawn();
    }

    /// Replace the active piece with the queued one and draw a new one.
    ///
    /// Returns false, and ends the game, if the spawn position is blocked.
    /// Only an active piece can be replaced: during a line clear or after game
    /// over this does nothing and returns false.
    pub fn spawn_next(&mut self) -> bool {
        if !matches!(self.phase, Phase::Falling | Phase::LockPending) {
            return false;
        }
        self.spawn()
    }

    fn spawn(&mut self) -> bool {
        let kind = self.next;
        self.next = self.randomizer.next_kind();
        self.stats.spawned[kind.index()] += 1;

        let piece = Piece::new(kind, self.rules.spawn_x, self.rules.spawn_y);
        self.current = Some(piece);
        self.fall_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.lock_resets = 0;

        if !self.board.is_valid_position(&piece) {
            debug!("spawn of {:?} blocked", kind);
            self.enter_game_over();
            return false;
        }

        debug!("spawned {:?}, next {:?}", kind, self.next);
        self.phase = Phase::Falling;
        true
    }

    /// Apply a player command.
    ///
    /// Gameplay commands are ignored (returning false) while paused, during a
    /// line clear, or after game over. Pause, restart and quit always apply.
    pub fn apply(&mut self, command: Command) -> bool {
        if !command.is_meta() && !self.accepts_input() {
            trace!(
                "{} ignored in {:?} (paused: {})",
                command.as_str(),
                self.phase,
                self.paused
            );
            return false;
        }

        match command {
            Command::MoveLeft => self.try_shift(-1),
            Command::MoveRight => self.try_shift(1),
            Command::SoftDrop => self.soft_drop(),
            Command::RotateCw => self.rotate(true),
            Command::RotateCcw => self.rotate(false),
            Command::HardDrop => self.hard_drop(),
            Command::TogglePause => {
                self.paused = !self.paused;
                debug!("paused: {}", self.paused);
                true
            }
            Command::Restart => {
                self.restart();
                true
            }
            Command::Quit => {
                self.quit_requested = true;
                true
            }
        }
    }

    fn accepts_input(&self) -> bool {
        !self.paused
            && matches!(self.phase, Phase::Falling | Phase::LockPending)
            && self.current.is_some()
    }

    /// Advance timers by `elapsed_ms`.
    pub fn update(&mut self, elapsed_ms: u32) {
        if self.paused || self.phase == Phase::GameOver {
            return;
        }
        self.stats.play_time_ms += elapsed_ms as u64;

        match self.phase {
            Phase::Falling => {
                self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
                let interval = self.progress.fall_interval_ms();
                while self.fall_timer_ms >= interval {
                    self.fall_timer_ms -= interval;
                    if !self.step_down() {
                        self.enter_lock_pending();
                        break;
                    }
                }
            }
            Phase::LockPending => {
                self.lock_timer_ms = self.lock_timer_ms.saturating_add(elapsed_ms);
                if self.lock_timer_ms >= self.rules.lock_delay_ms {
                    self.lock_current();
                }
            }
            Phase::LineClearing => {
                self.clear_timer_ms = self.clear_timer_ms.saturating_add(elapsed_ms);
                if self.clear_timer_ms >= self.rules.line_clear_ms {
                    self.finish_line_clear();
                }
            }
            Phase::GameOver => {}
        }
    }

    /// Move the current piece down one row if the board allows it.
    fn step_down(&mut self) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let candidate = piece.moved(0, 1);
        if self.board.is_valid_position(&candidate) {
            self.current = Some(candidate);
            true
        } else {
            false
        }
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let candidate = piece.moved(dx, 0);
        if !self.board.is_valid_position(&candidate) {
            trace!("shift {} blocked", dx);
            return false;
        }
        self.current = Some(candidate);
        self.after_maneuver();
        true
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let board = &self.board;
        match try_rotate(&piece, clockwise, |p| board.is_valid_position(p)) {
            Some((rotated, kick)) => {
                if kick != (0, 0) {
                    trace!("{:?} kicked by {:?}", piece.kind, kick);
                }
                self.current = Some(rotated);
                self.after_maneuver();
                true
            }
            None => false,
        }
    }

    /// A successful shift or rotation restarts the lock delay, and a piece
    /// maneuvered off its ledge starts falling again.
    fn after_maneuver(&mut self) {
        if self.phase != Phase::LockPending {
            return;
        }
        let capped = self
            .rules
            .max_lock_resets
            .is_some_and(|max| self.lock_resets >= max);
        if !capped {
            self.lock_timer_ms = 0;
            self.lock_resets += 1;
        }
        if self.can_fall() {
            self.phase = Phase::Falling;
            self.fall_timer_ms = 0;
        }
    }

    fn can_fall(&self) -> bool {
        self.current
            .is_some_and(|p| self.board.is_valid_position(&p.moved(0, 1)))
    }

    fn soft_drop(&mut self) -> bool {
        if self.step_down() {
            return true;
        }
        if self.phase == Phase::Falling {
            self.enter_lock_pending();
        }
        false
    }

    fn hard_drop(&mut self) -> bool {
        let mut distance = 0;
        while self.step_down() {
            distance += 1;
        }
        trace!("hard drop {} rows", distance);
        self.lock_current();
        true
    }

    fn enter_lock_pending(&mut self) {
        self.phase = Phase::LockPending;
        self.lock_timer_ms = 0;
        self.fall_timer_ms = 0;
    }

    /// Merge the current piece into the board and decide what comes next.
    fn lock_current(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        let fully_visible = self.board.place(&piece);
        self.events.push(GameEvent::PieceLocked { kind: piece.kind });
        debug!(
            "locked {:?} at ({}, {}) r{}",
            piece.kind, piece.x, piece.y, piece.rotation
        );

        if !fully_visible {
            debug!("{:?} locked above the board", piece.kind);
            self.enter_game_over();
            return;
        }

        let rows = self.board.full_rows();
        if rows.is_empty() {
            self.spawn();
            return;
        }

        let points = line_clear_score(&self.rules.line_scores, rows.len(), self.level());
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows.len() as u32);

        let gained = self.progress.advance(self.score, &self.rules);
        if gained > 0 {
            info!(
                "level {} (fall interval {} ms)",
                self.level(),
                self.progress.fall_interval_ms()
            );
            self.events.push(GameEvent::LevelUp { level: self.level() });
        }

        debug!("clearing rows {:?} for {} points", rows, points);
        self.board.mark_pending(&rows);
        self.events.push(GameEvent::LinesCleared {
            rows: rows.clone(),
            points,
        });
        self.clearing_rows = rows;
        self.clear_timer_ms = 0;
        self.phase = Phase::LineClearing;
    }

    fn finish_line_clear(&mut self) {
        let rows = std::mem::take(&mut self.clearing_rows);
        self.board.clear_rows(&rows);
        self.clear_timer_ms = 0;
        self.spawn();
    }

    fn enter_game_over(&mut self) {
        info!(
            "game over: score {}, level {}, lines {}",
            self.score,
            self.level(),
            self.lines
        );
        self.phase = Phase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups; edits bypass the state machine.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    /// Cells covered by the current piece.
    pub fn current_blocks(&self) -> Option<[(i8, i8); 4]> {
        self.current.map(|p| p.blocks())
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    /// Replace the queued piece (scripted setups and tests).
    pub fn set_next(&mut self, kind: PieceKind) {
        self.next = kind;
    }

    /// Landing preview of the current piece; derived on every call.
    pub fn ghost(&self) -> Option<Piece> {
        self.current.and_then(|p| self.board.ghost(&p))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn next_level_score(&self) -> u32 {
        self.progress.next_level_score()
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.progress.fall_interval_ms()
    }

    pub fn lock_timer_ms(&self) -> u32 {
        self.lock_timer_ms
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Rows in the line-clear animation, top to bottom.
    pub fn clearing_rows(&self) -> &[usize] {
        &self.clearing_rows
    }

    /// Line-clear animation progress in `[0, 1]`, if one is running.
    pub fn clear_progress(&self) -> Option<f32> {
        if self.phase != Phase::LineClearing {
            return None;
        }
        if self.rules.line_clear_ms == 0 {
            return Some(1.0);
        }
        Some((self.clear_timer_ms as f32 / self.rules.line_clear_ms as f32).min(1.0))
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.current = self.current;
        out.ghost = self.ghost();
        out.next = self.next;
        out.phase = self.phase;
        out.paused = self.paused;
        out.score = self.score;
        out.level = self.level();
        out.lines = self.lines;
        out.next_level_score = self.next_level_score();
        out.clearing_rows.clear();
        out.clearing_rows.extend_from_slice(&self.clearing_rows);
        out.clear_progress = self.clear_progress().unwrap_or(0.0);
        out.top_row_occupied = self.board.is_top_row_occupied();
        out.column_heights.clear();
        out.column_heights
            .extend((0..self.board.width() as usize).map(|x| self.board.column_height(x)));
        out.holes = self.board.holes();
        out.bumpiness = self.board.bumpiness();
        out.stats = self.stats;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_seed(1)
    }
}
