// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for chip8vm

use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chip8vm.
#[derive(Debug, Error)]
pub enum Error {
    /// A call was made while all 16 stack entries were in use
    #[error("stack overflow at {pc:03x} ({word:04x})")]
    StackOverflow {
        /// The address of the offending instruction
        pc: u16,
        /// The offending word
        word: u16,
    },
    /// A return was made with nothing on the stack
    #[error("stack underflow at {pc:03x} ({word:04x})")]
    StackUnderflow {
        /// The address of the offending instruction
        pc: u16,
        /// The offending word
        word: u16,
    },
    /// Represents a breakpoint being hit
    #[error("breakpoint hit: {addr:03x} ({next:04x})")]
    BreakpointHit {
        /// The address of the breakpoint
        addr: u16,
        /// The instruction after the breakpoint
        next: u16,
    },
    /// The program does not fit in program memory
    #[error("program is {len} bytes, but only {max} bytes are available")]
    ProgramTooLarge {
        /// Length of the rejected program
        len: usize,
        /// Size of program memory
        max: usize,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Tried to convert string into mode, but it did not match.
    #[error("no suitable conversion of \"{mode}\" into Mode")]
    InvalidMode {
        /// The string which failed to become a mode
        mode: String,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "minifb")]
    /// Error originated in [minifb]
    #[error(transparent)]
    MinifbError(#[from] minifb::Error),
}

impl Error {
    /// Returns true if the error halts the machine
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::BreakpointHit { .. })
    }
}
