// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Contains the definition of a Chip-8 [Insn]

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::Display;

#[allow(non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A decoded Chip-8 instruction, with its operands extracted
///
/// Words which match none of these patterns (including `0aaa` machine routines)
/// fail to decode, and are skipped by the CPU.
pub enum Insn {
    /// | 00e0 | Clear screen memory to 0s
    #[opcode = "0x00e0"]
    Cls,
    /// | 00ee | Return from subroutine
    #[opcode = "0x00ee"]
    Ret,
    /// | 1aaa | Jumps to an absolute address
    #[opcode = "0x1AAA"]
    Jump { A: u16 },
    /// | 2aaa | Pushes pc onto the stack, then jumps to a
    #[opcode = "0x2AAA"]
    Call { A: u16 },
    /// | 3xbb | Skips next instruction if register X == b
    #[opcode = "0x3xBB"]
    SkipEqImm { B: u8, x: usize },
    /// | 4xbb | Skips next instruction if register X != b
    #[opcode = "0x4xBB"]
    SkipNeImm { B: u8, x: usize },
    /// | 5xy0 | Skip next instruction if vX == vY
    #[opcode = "0x5xy0"]
    SkipEq { y: usize, x: usize },
    /// | 6xbb | Loads immediate byte b into register vX
    #[opcode = "0x6xBB"]
    LoadImm { B: u8, x: usize },
    /// | 7xbb | Adds immediate byte b to register vX
    #[opcode = "0x7xBB"]
    AddImm { B: u8, x: usize },
    /// | 8xy0 | Loads the value of y into x
    #[opcode = "0x8xy0"]
    Load { y: usize, x: usize },
    /// | 8xy1 | Performs bitwise or of vX and vY, and stores the result in vX
    #[opcode = "0x8xy1"]
    Or { y: usize, x: usize },
    /// | 8xy2 | Performs bitwise and of vX and vY, and stores the result in vX
    #[opcode = "0x8xy2"]
    And { y: usize, x: usize },
    /// | 8xy3 | Performs bitwise xor of vX and vY, and stores the result in vX
    #[opcode = "0x8xy3"]
    Xor { y: usize, x: usize },
    /// | 8xy4 | Performs addition of vX and vY, and stores the result in vX
    #[opcode = "0x8xy4"]
    Add { y: usize, x: usize },
    /// | 8xy5 | Performs subtraction of vX and vY, and stores the result in vX
    #[opcode = "0x8xy5"]
    Sub { y: usize, x: usize },
    /// | 8xy6 | Performs bitwise right shift of vX (or vY)
    #[opcode = "0x8xy6"]
    Shr { y: usize, x: usize },
    /// | 8xy7 | Performs subtraction of vY and vX, and stores the result in vX
    #[opcode = "0x8xy7"]
    SubN { y: usize, x: usize },
    /// | 8xyE | Performs bitwise left shift of vX (or vY)
    #[opcode = "0x8xye"]
    Shl { y: usize, x: usize },
    /// | 9xy0 | Skip next instruction if vX != vY
    #[opcode = "0x9xy0"]
    SkipNe { y: usize, x: usize },
    /// | Aaaa | Load address #a into register I
    #[opcode = "0xaAAA"]
    LoadI { A: u16 },
    /// | Baaa | Jump to &adr + v0 (or vX)
    #[opcode = "0xbAAA"]
    JumpIndexed { A: u16 },
    /// | Cxbb | Stores a random number & the provided byte into vX
    #[opcode = "0xcxBB"]
    Rand { B: u8, x: usize },
    /// | Dxyn | Draws n-byte sprite to the screen at coordinates (vX, vY)
    #[opcode = "0xdxyn"]
    Draw { y: usize, x: usize, n: u8 },
    /// | eX9e | Skip next instruction if key vX is held
    #[opcode = "0xex9e"]
    SkipKey { x: usize },
    /// | eXa1 | Skip next instruction if key vX is not held
    #[opcode = "0xexa1"]
    SkipNotKey { x: usize },
    /// | fX07 | Set vX to value in delay timer
    #[opcode = "0xfx07"]
    GetDelay { x: usize },
    /// | fX0a | Wait for input, store key in vX
    #[opcode = "0xfx0a"]
    WaitKey { x: usize },
    /// | fX15 | Set delay timer to the value in vX
    #[opcode = "0xfx15"]
    SetDelay { x: usize },
    /// | fX18 | Set sound timer to the value in vX
    #[opcode = "0xfx18"]
    SetSound { x: usize },
    /// | fX1e | Add vX to I
    #[opcode = "0xfx1e"]
    AddI { x: usize },
    /// | fX29 | Load sprite for character x into I
    #[opcode = "0xfx29"]
    Font { x: usize },
    /// | fX33 | BCD convert X into I[0..3]
    #[opcode = "0xfx33"]
    Bcd { x: usize },
    /// | fX55 | DMA Stor from registers 0..=X to I
    #[opcode = "0xfx55"]
    Store { x: usize },
    /// | fX65 | DMA Load from I to registers 0..=X
    #[opcode = "0xfx65"]
    Restore { x: usize },
}

impl Insn {
    /// Decodes a single big-endian word, returning [None] if it isn't an instruction
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// assert_eq!(Some(Insn::Draw { x: 0, y: 1, n: 5 }), Insn::from_word(0xd015));
    /// assert_eq!(None, Insn::from_word(0x800f));
    /// ```
    pub fn from_word(word: u16) -> Option<Insn> {
        Insn::decode(&word.to_be_bytes())
            .ok()
            .map(|(_, insn)| insn)
    }
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::Cls                => write!(f, "cls    "),
            Insn::Ret                => write!(f, "ret    "),
            Insn::Jump { A }         => write!(f, "jp     {A:03x}"),
            Insn::Call { A }         => write!(f, "call   {A:03x}"),
            Insn::SkipEqImm { B, x } => write!(f, "se     v{x:X}, #{B:02x}"),
            Insn::SkipNeImm { B, x } => write!(f, "sne    v{x:X}, #{B:02x}"),
            Insn::SkipEq { y, x }    => write!(f, "se     v{x:X}, v{y:X}"),
            Insn::LoadImm { B, x }   => write!(f, "ld     v{x:X}, #{B:02x}"),
            Insn::AddImm { B, x }    => write!(f, "add    v{x:X}, #{B:02x}"),
            Insn::Load { y, x }      => write!(f, "ld     v{x:X}, v{y:X}"),
            Insn::Or { y, x }        => write!(f, "or     v{x:X}, v{y:X}"),
            Insn::And { y, x }       => write!(f, "and    v{x:X}, v{y:X}"),
            Insn::Xor { y, x }       => write!(f, "xor    v{x:X}, v{y:X}"),
            Insn::Add { y, x }       => write!(f, "add    v{x:X}, v{y:X}"),
            Insn::Sub { y, x }       => write!(f, "sub    v{x:X}, v{y:X}"),
            Insn::Shr { y, x }       => write!(f, "shr    v{x:X}, v{y:X}"),
            Insn::SubN { y, x }      => write!(f, "subn   v{x:X}, v{y:X}"),
            Insn::Shl { y, x }       => write!(f, "shl    v{x:X}, v{y:X}"),
            Insn::SkipNe { y, x }    => write!(f, "sne    v{x:X}, v{y:X}"),
            Insn::LoadI { A }        => write!(f, "ld     I, ${A:03x}"),
            Insn::JumpIndexed { A }  => write!(f, "jp     v0, ${A:03x}"),
            Insn::Rand { B, x }      => write!(f, "rnd    v{x:X}, #{B:02x}"),
            Insn::Draw { y, x, n }   => write!(f, "drw    v{x:X}, v{y:X}, #{n:x}"),
            Insn::SkipKey { x }      => write!(f, "skp    v{x:X}"),
            Insn::SkipNotKey { x }   => write!(f, "sknp   v{x:X}"),
            Insn::GetDelay { x }     => write!(f, "ld     v{x:X}, DT"),
            Insn::WaitKey { x }      => write!(f, "ld     v{x:X}, K"),
            Insn::SetDelay { x }     => write!(f, "ld     DT, v{x:X}"),
            Insn::SetSound { x }     => write!(f, "ld     ST, v{x:X}"),
            Insn::AddI { x }         => write!(f, "add    I, v{x:X}"),
            Insn::Font { x }         => write!(f, "ld     F, v{x:X}"),
            Insn::Bcd { x }          => write!(f, "ld     B, v{x:X}"),
            Insn::Store { x }        => write!(f, "ld     [I], v{x:X}"),
            Insn::Restore { x }      => write!(f, "ld     v{x:X}, [I]"),
        }
    }
}
