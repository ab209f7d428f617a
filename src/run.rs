// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The main loop, which interleaves timer ticks and instructions on one thread

use crate::{
    cpu::{timer::TIMER_PERIOD, Step},
    error::{Error, Result},
    io::{Beeper, Input, Present},
    Chip8,
};
use owo_colors::OwoColorize;
use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

/// Default instructions per second
pub const DEFAULT_SPEED: u32 = 700;

/// Falling further behind than this resets the instruction schedule
const MAX_LAG: Duration = Duration::from_millis(250);

/// Paces instruction execution against the wall clock
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    period: Duration,
    next: Option<Instant>,
}

impl Clock {
    /// Constructs a clock which allows `speed` instructions per second
    pub fn new(speed: u32) -> Self {
        Clock {
            period: Duration::from_secs(1) / speed.max(1),
            next: None,
        }
    }

    /// Returns true, and schedules the following instruction, if an instruction is due.
    ///
    /// The first call is always due.
    pub fn is_due(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now < next => false,
            Some(next) if now.saturating_duration_since(next) <= MAX_LAG => {
                self.next = Some(next + self.period);
                true
            }
            _ => {
                self.next = Some(now + self.period);
                true
            }
        }
    }

    /// How long until the next instruction is due
    pub fn until_next(&self, now: Instant) -> Duration {
        self.next
            .map(|next| next.saturating_duration_since(now))
            .unwrap_or_default()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}

impl PartialEq for Clock {
    /// Compares speeds. When the next instruction is due is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.period == other.period
    }
}

impl Eq for Clock {}

/// What happened during one [Chip8::step_at]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tick {
    /// The timers were decremented
    pub timer: bool,
    /// The CPU was ticked, with this result
    pub step: Option<Step>,
    /// The CPU hit a breakpoint, at this address, before this word
    pub breakpoint: Option<(u16, u16)>,
}

impl Chip8 {
    /// Makes one scheduling decision at time `now`: ticks the timers if they're due,
    /// then runs one instruction if one is due.
    ///
    /// Timers keep ticking while the CPU waits on a key.
    /// A breakpoint hit pauses the CPU, and is reported in [Tick::breakpoint]
    /// rather than as an error.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// # use std::time::{Duration, Instant};
    /// let mut ch8 = Chip8::new(CPU::default(), 1000);
    /// ch8.cpu.load_program_bytes(&[0x60, 0x05]).unwrap();
    /// let start = Instant::now();
    /// let tick = ch8.step_at(start).unwrap();
    /// assert_eq!(Some(Step::Executed(Insn::LoadImm { B: 5, x: 0 })), tick.step);
    /// // the next instruction isn't due for another millisecond
    /// assert_eq!(None, ch8.step_at(start + Duration::from_micros(500)).unwrap().step);
    /// ```
    pub fn step_at(&mut self, now: Instant) -> Result<Tick> {
        let timer = self.cpu.timers_mut().tick_if_due(now);
        let mut tick = Tick {
            timer,
            ..Default::default()
        };
        if self.clock.is_due(now) {
            match self.cpu.tick(&mut self.screen) {
                Ok(step) => tick.step = Some(step),
                Err(Error::BreakpointHit { addr, next }) => tick.breakpoint = Some((addr, next)),
                Err(e) => return Err(e),
            }
        }
        Ok(tick)
    }

    /// Runs the machine until `running` is cleared, a frontend asks to quit,
    /// or the CPU faults.
    ///
    /// Input is polled, and changed frames are presented, once per timer tick.
    /// The beeper is switched on and off as the sound timer starts and stops.
    pub fn run(
        &mut self,
        running: &AtomicBool,
        present: &mut impl Present,
        input: &mut impl Input,
        beeper: &mut impl Beeper,
    ) -> Result<()> {
        let mut beeping = false;
        while running.load(Ordering::Acquire) {
            let tick = self.step_at(Instant::now())?;
            if let Some((addr, next)) = tick.breakpoint {
                eprintln!(
                    "{}",
                    format_args!("Breakpoint hit: {addr:03x} ({next:04x})").yellow()
                );
            }
            if beeping != self.cpu.timers().is_sounding() {
                beeping = !beeping;
                beeper.set_beep(beeping)?;
            }
            if tick.timer {
                if !input.poll(self)? {
                    break;
                }
                if let Some(frame) = self.screen.take_frame() {
                    if !present.present(&frame)? {
                        break;
                    }
                }
            }
            std::thread::sleep(self.clock.until_next(Instant::now()).min(TIMER_PERIOD / 4));
        }
        if beeping {
            beeper.set_beep(false)?;
        }
        Ok(())
    }
}
