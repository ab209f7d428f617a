// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! chip8vm: runs a Chip-8 ROM in a window

mod ui;

use chip8vm::{error::Result, io::Bell, run::DEFAULT_SPEED, *};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{path::PathBuf, sync::atomic::AtomicBool};
use ui::*;

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    if let Err(e) = run(options) {
        eprintln!("{}", e.bold().red());
    }
    Ok(())
}

/// Parses a hexadecimal string into a u16
fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value, 16)
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run.", required, free)]
    pub file: PathBuf,
    #[options(help = "Print this help message.")]
    help: bool,
    #[options(help = "Enable debug mode at startup.")]
    pub debug: bool,
    #[options(help = "Enable pause mode at startup.")]
    pub pause: bool,

    #[options(
        short = "S",
        help = "Set the number of instructions per second.",
        meta = "IPS"
    )]
    pub speed: Option<u32>,
    #[options(no_short, help = "Seed the random number generator.")]
    pub seed: Option<u64>,

    #[options(help = "Run in (Cosmac, Modern) mode.")]
    pub mode: Option<Mode>,

    #[options(
        short = "v",
        help = "Toggle COSMAC style right shift, which shifts vY into vX."
    )]
    pub shift_right: bool,
    #[options(
        short = "l",
        help = "Toggle COSMAC style left shift, which shifts vY into vX."
    )]
    pub shift_left: bool,
    #[options(
        short = "b",
        help = "Toggle COSMAC style indexed jump, which is indexed relative to v0."
    )]
    pub jumping: bool,
    #[options(short = "s", help = "Toggle COSMAC style Fx55, which advances I.")]
    pub store: bool,
    #[options(short = "o", help = "Toggle COSMAC style Fx65, which advances I.")]
    pub load: bool,

    #[options(
        long = "break",
        no_short,
        help = "Set breakpoints for the emulator to stop at.",
        parse(try_from_str = "parse_hex"),
        meta = "BP"
    )]
    pub breakpoints: Vec<u16>,
}

impl Arguments {
    /// The mode's preset, with each requested quirk flipped
    fn quirks(&self) -> Quirks {
        let mut quirks = self.mode.map(Quirks::from).unwrap_or_default();
        quirks.shift_right ^= self.shift_right;
        quirks.shift_left ^= self.shift_left;
        quirks.jump_offset ^= self.jumping;
        quirks.store_inc ^= self.store;
        quirks.load_inc ^= self.load;
        quirks
    }
}

fn run(options: Arguments) -> Result<()> {
    let quirks = options.quirks();
    let mut cpu = match options.seed {
        Some(seed) => CPU::with_seed(quirks, seed),
        None => CPU::new(quirks),
    };
    cpu.load_program(&options.file)?;
    cpu.flags.debug = options.debug;
    cpu.flags.pause = options.pause;
    for &bp in &options.breakpoints {
        cpu.set_break(bp);
    }
    let mut ch8 = Chip8::new(cpu, options.speed.unwrap_or(DEFAULT_SPEED));
    let (mut display, mut keyboard) = UIBuilder::new(&options.file).build()?;
    let running = AtomicBool::new(true);
    ch8.run(&running, &mut display, &mut keyboard, &mut Bell)
}
