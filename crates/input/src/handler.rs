//! Key-repeat handler for terminal environments.
//!
//! Held left/right/down keys repeat after a delay at a fixed interval. Time is
//! fed in as elapsed milliseconds, like the engine's `update`. Terminals that
//! never send key-release events are covered by a release timeout: a held key
//! with no fresh press for that long is treated as released.

use arrayvec::ArrayVec;

use crate::map::is_repeatable;
use crate::types::{Command, KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS};

/// Most repeats a single `update` can emit.
pub const MAX_REPEATS: usize = 32;

// Without key-release events a tap looks like a hold. Timing out no later than
// the repeat delay keeps a single tap from ever repeating.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = KEY_REPEAT_DELAY_MS;

/// Timers for one held key.
#[derive(Debug, Clone, Copy, Default)]
struct Held {
    delay_timer: u32,
    repeat_accumulator: u32,
}

impl Held {
    /// Advance by `elapsed_ms`, returning how many repeats fired.
    fn advance(&mut self, elapsed_ms: u32, delay: u32, interval: u32) -> u32 {
        let prev = self.delay_timer;
        self.delay_timer = self.delay_timer.saturating_add(elapsed_ms);
        if self.delay_timer < delay {
            return 0;
        }
        let excess = if prev < delay {
            self.delay_timer - delay
        } else {
            elapsed_ms
        };
        self.repeat_accumulator += excess;
        let fired = self.repeat_accumulator / interval;
        self.repeat_accumulator %= interval;
        fired
    }
}

/// Tracks held keys and produces repeat commands.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// `MoveLeft` or `MoveRight` while one is held.
    horizontal: Option<(Command, Held)>,
    down: Option<Held>,
    idle_ms: u32,
    delay_ms: u32,
    interval_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(KEY_REPEAT_DELAY_MS, KEY_REPEAT_INTERVAL_MS)
    }

    /// # Panics
    ///
    /// Panics if `interval_ms` is zero.
    pub fn with_config(delay_ms: u32, interval_ms: u32) -> Self {
        assert!(interval_ms > 0, "repeat interval must be positive");
        Self {
            horizontal: None,
            down: None,
            idle_ms: 0,
            delay_ms,
            interval_ms,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Register a key press.
    ///
    /// Returns the command to apply now: non-repeating commands always pass
    /// through, repeating ones only on the first press of a hold.
    pub fn press(&mut self, command: Command) -> Option<Command> {
        if !is_repeatable(command) {
            return Some(command);
        }
        self.idle_ms = 0;

        match command {
            Command::SoftDrop => {
                if self.down.is_some() {
                    return None;
                }
                self.down = Some(Held::default());
            }
            _ => {
                if matches!(self.horizontal, Some((held, _)) if held == command) {
                    return None;
                }
                // Pressing the opposite direction takes over.
                self.horizontal = Some((command, Held::default()));
            }
        }
        Some(command)
    }

    pub fn release(&mut self, command: Command) {
        match command {
            Command::SoftDrop => self.down = None,
            Command::MoveLeft | Command::MoveRight => {
                if matches!(self.horizontal, Some((held, _)) if held == command) {
                    self.horizontal = None;
                }
            }
            _ => {}
        }
    }

    pub fn is_held(&self, command: Command) -> bool {
        match command {
            Command::SoftDrop => self.down.is_some(),
            _ => matches!(self.horizontal, Some((held, _)) if held == command),
        }
    }

    /// Advance timers and collect the repeats that fired, oldest first.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Command, MAX_REPEATS> {
        let mut commands = ArrayVec::new();

        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if self.idle_ms > self.key_release_timeout_ms {
            self.horizontal = None;
            self.down = None;
        }

        let (delay, interval) = (self.delay_ms, self.interval_ms);
        if let Some((command, held)) = self.horizontal.as_mut() {
            for _ in 0..held.advance(elapsed_ms, delay, interval) {
                let _ = commands.try_push(*command);
            }
        }
        if let Some(held) = self.down.as_mut() {
            for _ in 0..held.advance(elapsed_ms, delay, interval) {
                let _ = commands.try_push(Command::SoftDrop);
            }
        }

        commands
    }

    /// Forget every held key.
    pub fn reset(&mut self) {
        self.horizontal = None;
        self.down = None;
        self.idle_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
