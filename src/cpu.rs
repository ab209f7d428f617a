// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


mod behavior;
pub mod flags;
pub mod instruction;
pub mod mem;
pub mod mode;
pub mod quirks;
pub mod timer;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    mem::{Mem, Region, PROGRAM_ADDR},
    quirks::Quirks,
    timer::Timers,
};
use crate::{
    error::{Error, Result},
    screen::Screen,
};
use owo_colors::OwoColorize;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::Debug;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Maximum depth of the call stack
pub const STACK_DEPTH: usize = 16;

/// The outcome of a single [CPU::tick]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// The instruction ran to completion
    Executed(Insn),
    /// The word at pc was not an instruction, and was skipped
    Skipped(u16),
    /// `Fx0A` is waiting for a key to be pressed; nothing was fetched
    AwaitingKey,
    /// The CPU is paused; nothing was fetched
    Paused,
}

/// Represents the internal state of the CPU interpreter
#[derive(Clone)]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes debug and pause state.
    pub flags: Flags,
    quirks: Quirks,
    // memory
    mem: Mem,
    stack: Vec<Adr>,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    timers: Timers,
    // I/O
    keys: [bool; 16],
    // Execution data
    cycle: usize,
    breakpoints: Vec<Adr>,
    rng: StdRng,
    disassembler: Dis,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the given [Quirks], which stay fixed for its lifetime
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let cpu = CPU::new(Mode::Cosmac.into());
    /// assert_eq!(true, cpu.quirks().store_inc);
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn new(quirks: Quirks) -> Self {
        Self::with_rng(quirks, StdRng::from_entropy())
    }

    /// Constructs a new CPU whose random number generator is seeded with `seed`,
    /// so that `Cxbb` is reproducible
    pub fn with_seed(quirks: Quirks, seed: u64) -> Self {
        Self::with_rng(quirks, StdRng::seed_from_u64(seed))
    }

    fn with_rng(quirks: Quirks, rng: StdRng) -> Self {
        CPU {
            flags: Flags::default(),
            quirks,
            mem: Mem::new(),
            stack: Vec::with_capacity(STACK_DEPTH),
            pc: PROGRAM_ADDR,
            i: 0,
            v: [0; 16],
            timers: Timers::new(),
            keys: [false; 16],
            cycle: 0,
            breakpoints: vec![],
            rng,
            disassembler: Dis::default(),
        }
    }

    /// Loads a program into the CPU's program space
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.load_program_bytes(&std::fs::read(rom)?)
    }

    /// Loads bytes into the CPU's program space, clearing what was there.
    ///
    /// Returns [Error::ProgramTooLarge] if the program is larger than 3584 bytes.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[0x12, 0x00]).unwrap();
    /// assert_eq!(0x1200, cpu.mem().read_word(0x200));
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        self.mem
            .clear_region(Region::Program)
            .load_region(Region::Program, rom)?;
        Ok(self)
    }

    /// Presses a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// If the CPU is waiting on `Fx0A`, the first newly pressed key is recorded
    /// in [Flags::lastkey].
    ///
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    ///
    /// // press key `7`
    /// let did_press = cpu.press(0x7).unwrap();
    /// assert!(did_press);
    ///
    /// // press key `7` again, even though it's already pressed
    /// let did_press = cpu.press(0x7).unwrap();
    /// // it was already pressed, so nothing's changed.
    /// assert!(!did_press);
    /// ```
    pub fn press(&mut self, key: usize) -> Result<bool> {
        let Some(keyref) = self.keys.get_mut(key) else {
            return Err(Error::InvalidKey { key });
        };
        if *keyref {
            return Ok(false);
        }
        *keyref = true;
        if self.flags.is_keypaused() && self.flags.lastkey.is_none() {
            self.flags.lastkey = Some(key);
        }
        Ok(true)
    }

    /// Releases a key, and reports whether the key's state changed.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// // press key `7`
    /// cpu.press(0x7).unwrap();
    /// // release key `7`
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(changed); // key released
    /// // try releasing `7` again
    /// let changed = cpu.release(0x7).unwrap();
    /// assert!(!changed); // key was not held
    /// ```
    pub fn release(&mut self, key: usize) -> Result<bool> {
        let Some(keyref) = self.keys.get_mut(key) else {
            return Err(Error::InvalidKey { key });
        };
        Ok(std::mem::replace(keyref, false))
    }

    /// Returns true if the key is held
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or_default()
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the return addresses on the call stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        &self.stack
    }

    /// Gets the [Quirks] this CPU was constructed with
    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// Gets the CPU's memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the delay and sound [Timers]
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Gets the delay and sound [Timers] mutably, for the timer clock to tick
    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.timers.sound()
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.timers.delay()
    }

    /// Gets the number of instructions the CPU has fetched
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Soft resets the CPU, releasing keypause, emptying the stack, and
    /// reinitializing the program counter to 0x200
    ///
    /// Registers, timers and memory are left alone.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.flags.keypause = Some(0);
    /// cpu.soft_reset();
    /// assert_eq!(0x200, cpu.pc());
    /// assert_eq!(None, cpu.flags.keypause);
    /// assert!(cpu.stack().is_empty());
    /// ```
    pub fn soft_reset(&mut self) {
        self.pc = PROGRAM_ADDR;
        self.stack.clear();
        self.flags.keypause = None;
        self.flags.lastkey = None;
    }

    /// Resets the emulator.
    ///
    /// Touches the [Flags] (keypause and lastkey), stack, pc, registers,
    /// timers, keys, and cycle count.
    ///
    /// Does not touch [Quirks], breakpoints, or memory.
    pub fn reset(&mut self) {
        self.flags = Flags {
            keypause: None,
            lastkey: None,
            ..self.flags
        };
        self.stack.clear();
        self.pc = PROGRAM_ADDR;
        self.i = 0;
        self.v = [0; 16];
        self.timers.reset();
        self.keys = [false; 16];
        self.cycle = 0;
    }

    /// Set a breakpoint
    pub fn set_break(&mut self, point: Adr) -> &mut Self {
        if !self.breakpoints.contains(&point) {
            self.breakpoints.push(point)
        }
        self
    }

    /// Unset a breakpoint
    pub fn unset_break(&mut self, point: Adr) -> &mut Self {
        self.breakpoints.retain(|&bp| bp != point);
        self
    }

    /// Gets a slice of breakpoints
    pub fn breakpoints(&self) -> &[Adr] {
        self.breakpoints.as_slice()
    }

    /// Unpauses the emulator for a single tick,
    /// even if cpu.flags.pause is set.
    ///
    /// NOTE: does not tick the timers
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// let mut screen = Screen::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.flags.pause = true;
    /// cpu.singlestep(&mut screen).unwrap();
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// assert!(cpu.flags.pause);
    /// ```
    pub fn singlestep(&mut self, screen: &mut Screen) -> Result<Step> {
        self.flags.pause = false;
        let step = self.tick(screen);
        self.flags.pause = true;
        step
    }

    /// Runs up to `steps` ticks, stopping early on error
    ///
    /// NOTE: does not tick the timers
    pub fn multistep(&mut self, screen: &mut Screen, steps: usize) -> Result<&mut Self> {
        for _ in 0..steps {
            self.tick(screen)?;
        }
        Ok(self)
    }

    /// Executes a single instruction
    ///
    /// While `Fx0A` is pending, nothing is fetched until a key is pressed.
    ///
    /// Returns [Error::StackOverflow] or [Error::StackUnderflow] if a call or return
    /// faulted. The CPU is paused, with pc left on the faulting instruction.
    ///
    /// Returns [Error::BreakpointHit] if a breakpoint was hit after the instruction executed.
    /// This result contains information about the breakpoint, but can be safely ignored.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// let mut screen = Screen::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// let step = cpu.tick(&mut screen)
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(Step::Executed(Insn::Cls), step);
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Words which aren't instructions are skipped.
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// let mut screen = Screen::default();
    /// cpu.load_program_bytes(&[
    ///     0xff, 0xff, // invalid!
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// assert_eq!(Step::Skipped(0xffff), cpu.tick(&mut screen).unwrap());
    /// assert_eq!(0x202, cpu.pc());
    /// ```
    pub fn tick(&mut self, screen: &mut Screen) -> Result<Step> {
        // Do nothing if paused
        if self.flags.pause {
            return Ok(Step::Paused);
        }
        if let Some(x) = self.flags.keypause {
            let Some(key) = self.flags.lastkey.take() else {
                return Ok(Step::AwaitingKey);
            };
            self.flags.keypause = None;
            self.v[x] = key as u8;
            return Ok(Step::Executed(Insn::WaitKey { x }));
        }
        self.cycle += 1;
        // fetch opcode
        let word = self.mem.read_word(self.pc);

        // Print opcode disassembly:
        if self.flags.debug {
            std::eprintln!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                self.pc,
                self.disassembler.once(word)
            );
        }

        self.pc = self.pc.wrapping_add(2);
        // decode opcode
        let step = match Insn::from_word(word) {
            Some(insn) => {
                if let Err(e) = self.execute(screen, insn) {
                    self.pc = self.pc.wrapping_sub(2);
                    self.flags.pause = true;
                    return Err(e);
                }
                match self.flags.keypause {
                    Some(_) => Step::AwaitingKey,
                    None => Step::Executed(insn),
                }
            }
            None => Step::Skipped(word),
        };

        // process breakpoints
        if self.breakpoints.contains(&self.pc) {
            self.flags.pause = true;
            return Err(Error::BreakpointHit {
                addr: self.pc,
                next: self.mem.read_word(self.pc),
            });
        }
        Ok(step)
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::eprintln!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.timers.delay(),
            self.timers.sound(),
            self.cycle,
        );
    }
}

impl PartialEq for CPU {
    /// Compares architectural state. The random number generator is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
            && self.quirks == other.quirks
            && self.mem == other.mem
            && self.stack == other.stack
            && self.pc == other.pc
            && self.i == other.i
            && self.v == other.v
            && self.timers == other.timers
            && self.keys == other.keys
            && self.cycle == other.cycle
            && self.breakpoints == other.breakpoints
    }
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("quirks", &self.quirks)
            .field("stack", &self.stack)
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("timers", &self.timers)
            .field("keys", &self.keys)
            .field("cycle", &self.cycle)
            .field("breakpoints", &self.breakpoints)
            .finish_non_exhaustive()
    }
}

impl Default for CPU {
    /// Constructs a new CPU with the default [Quirks]
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0050` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    ///
    /// # Examples
    /// ```rust
    /// use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU::new(Quirks::default())
    }
}
