// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The delay and sound timers, counting down at 60 Hz of wall-clock time

use std::time::{Duration, Instant};

/// Time between two timer ticks (1/60th of a second)
pub const TIMER_PERIOD: Duration = Duration::from_nanos(16_666_667);

/// Falling further behind than this resets the tick schedule
const MAX_LAG: Duration = Duration::from_secs(1);

/// The delay and sound timers.
///
/// Instructions only ever *set* the counters; only [Timers::tick] decrements them.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timers {
    delay: u8,
    sound: u8,
    last: Option<Instant>,
}

impl Timers {
    /// Constructs a new set of timers, both at zero
    pub fn new() -> Self {
        Timers::default()
    }

    /// Gets the value of the delay timer
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the value of the sound timer
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Sets the delay timer
    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    /// Sets the sound timer
    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    /// Returns true while the sound timer is running (the tone should play)
    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }

    /// Decrements each nonzero timer by one
    ///
    /// # Examples
    /// ```rust
    /// # use chip8vm::cpu::timer::Timers;
    /// let mut timers = Timers::new();
    /// timers.set_delay(2);
    /// timers.tick();
    /// timers.tick();
    /// timers.tick();
    /// assert_eq!(0, timers.delay());
    /// ```
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Ticks once if a full [TIMER_PERIOD] has passed since the last tick.
    ///
    /// The first call only starts the schedule. Returns whether a tick happened.
    ///
    /// # Examples
    /// ```rust
    /// # use chip8vm::cpu::timer::{Timers, TIMER_PERIOD};
    /// # use std::time::Instant;
    /// let mut timers = Timers::new();
    /// timers.set_sound(5);
    /// let start = Instant::now();
    /// assert!(!timers.tick_if_due(start));
    /// assert!(!timers.tick_if_due(start + TIMER_PERIOD / 2));
    /// assert!(timers.tick_if_due(start + TIMER_PERIOD));
    /// assert_eq!(4, timers.sound());
    /// ```
    pub fn tick_if_due(&mut self, now: Instant) -> bool {
        let Some(last) = self.last else {
            self.last = Some(now);
            return false;
        };
        let elapsed = now.saturating_duration_since(last);
        if elapsed < TIMER_PERIOD {
            return false;
        }
        self.tick();
        self.last = Some(if elapsed > MAX_LAG {
            now
        } else {
            last + TIMER_PERIOD
        });
        true
    }

    /// Zeroes both timers and restarts the tick schedule
    pub fn reset(&mut self) {
        *self = Timers::default();
    }
}

impl PartialEq for Timers {
    /// Compares the counters. When the last tick happened is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.delay == other.delay && self.sound == other.sound
    }
}

impl Eq for Timers {}
