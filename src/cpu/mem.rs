// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the CPU's memory
//!
//! Contains some handy utils for reading and writing

use crate::error::{Error, Result};
use owo_colors::{OwoColorize, Style};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
};

/// Size of the address space
pub const MEM_SIZE: usize = 0x1000;
/// Address of the first font glyph
pub const FONT_ADDR: u16 = 0x050;
/// Address of the first byte of the program, and the initial pc
pub const PROGRAM_ADDR: u16 = 0x200;
/// Every address is masked to 12 bits
const ADDR_MASK: u16 = (MEM_SIZE - 1) as u16;

/// Five-byte glyphs for the hex digits `0` through `F`
pub const CHARSET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// The range of addresses covered by this region
    pub fn range(self) -> Range<usize> {
        match self {
            Region::Charset => FONT_ADDR as usize..FONT_ADDR as usize + CHARSET.len(),
            Region::Program => PROGRAM_ADDR as usize..MEM_SIZE,
        }
    }
}

/// The 4 KiB address space of the Chip-8
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mem {
    memory: Vec<u8>,
}

impl Mem {
    /// Constructs a new mem, with the charset loaded
    /// # Examples
    /// ```rust
    ///# use chip8vm::cpu::mem::*;
    ///     let mem = Mem::new();
    ///     assert_eq!(0xF0, mem.read(FONT_ADDR));
    ///     assert_eq!(0x00, mem.read(PROGRAM_ADDR));
    /// ```
    pub fn new() -> Self {
        let mut memory = vec![0; MEM_SIZE];
        memory[Region::Charset.range()].copy_from_slice(&CHARSET);
        Mem { memory }
    }

    /// Reads the byte at `addr`, masked into the address space
    #[inline(always)]
    pub fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDR_MASK) as usize]
    }

    /// Writes a byte to `addr`, masked into the address space
    #[inline(always)]
    pub fn write(&mut self, addr: u16, data: u8) {
        self.memory[(addr & ADDR_MASK) as usize] = data;
    }

    /// Reads a big-endian word at `addr`. Both halves are masked independently,
    /// so a word at `0xfff` wraps around to `0x000`.
    /// # Examples
    /// ```rust
    ///# use chip8vm::cpu::mem::*;
    ///     let mut mem = Mem::new();
    ///     mem.write(0x200, 0x12);
    ///     mem.write(0x201, 0x34);
    ///     assert_eq!(0x1234, mem.read_word(0x200));
    /// ```
    #[inline(always)]
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_be_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    /// Gets the entire address space as a slice
    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }

    /// Gets a slice of a named [Region] of memory
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Gets a mutable slice of a named [Region] of memory
    pub fn get_region_mut(&mut self, name: Region) -> &mut [u8] {
        &mut self.memory[name.range()]
    }

    /// Loads data into the start of a named [Region].
    ///
    /// Returns [Error::ProgramTooLarge] if the data doesn't fit, leaving the region untouched.
    /// # Examples
    /// ```rust
    ///# use chip8vm::{cpu::mem::*, error::Result};
    ///# fn main() -> Result<()> {
    ///     let mut mem = Mem::new();
    ///     mem.load_region(Region::Program, b"Hello, world!")?;
    ///     assert_eq!(b'H', mem.read(0x200));
    ///     assert!(mem.load_region(Region::Program, &[0; 0xe01]).is_err());
    ///#    Ok(())
    ///# }
    /// ```
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        let region = self.get_region_mut(name);
        if data.len() > region.len() {
            return Err(Error::ProgramTooLarge {
                len: data.len(),
                max: region.len(),
            });
        }
        region[..data.len()].copy_from_slice(data);
        Ok(self)
    }

    /// Fills a [Region] with zeroes
    pub fn clear_region(&mut self, name: Region) -> &mut Self {
        self.get_region_mut(name).fill(0);
        self
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Mem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Green phosphor style formatting, for taste
        let term: Style = Style::new().bold().green().on_black();
        for (index, row) in self.memory.chunks(16).enumerate() {
            // skip blank lines
            if row.iter().all(|&byte| byte == 0) {
                continue;
            }
            write!(f, "{:>03x}{} ", (index * 16).style(term), ":".style(term))?;
            for (col, byte) in row.iter().enumerate() {
                write!(f, "{byte:02x}")?;
                match col {
                    0x7 => write!(f, "  ")?,
                    0xf => writeln!(f)?,
                    _ if col % 2 == 1 => write!(f, " ")?,
                    _ => (),
                }
            }
        }
        Ok(())
    }
}
