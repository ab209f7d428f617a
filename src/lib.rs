// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! This crate implements a Chip-8 virtual machine: the fetch-decode-execute engine,
//! its 60 Hz timers, the 64x32 XOR framebuffer, and the quirks which select between
//! the original COSMAC VIP semantics and the ones most modern interpreters settled on.
//!
//! Windowing, audio, and keyboard polling are left to the frontend, through the
//! traits in [io].

pub mod cpu;
pub mod error;
pub mod io;
pub mod run;
pub mod screen;

pub use cpu::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    mem::Mem,
    mode::Mode,
    quirks::Quirks,
    timer::Timers,
    Step, CPU,
};
pub use error::Result;
pub use io::{Beeper, Input, Present};
pub use run::{Clock, Tick};
pub use screen::{Frame, Screen, Update};

/// The whole machine: a [CPU], the [Screen] it draws to, and the [Clock] that paces it
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chip8 {
    /// The CPU, which owns memory, registers, timers, and key state
    pub cpu: CPU,
    /// The display
    pub screen: Screen,
    /// Paces instruction execution
    pub clock: Clock,
}

impl Chip8 {
    /// Constructs a new [Chip8] from a [CPU], running `speed` instructions per second
    pub fn new(cpu: CPU, speed: u32) -> Self {
        Chip8 {
            cpu,
            screen: Screen::new(),
            clock: Clock::new(speed),
        }
    }
}
