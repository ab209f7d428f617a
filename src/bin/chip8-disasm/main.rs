// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Lists the instructions in a Chip-8 ROM

use chip8vm::{cpu::mem::PROGRAM_ADDR, error::Result, *};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Show help text")]
    help: bool,
    #[options(help = "Load a ROM to disassemble", free, required)]
    pub file: PathBuf,
    #[options(help = "Start disassembling at offset...")]
    pub offset: usize,
    #[options(help = "Don't colorize the listing")]
    pub plain: bool,
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let contents = read(&options.file)?;
    let disassembler = if options.plain {
        Dis::plain()
    } else {
        Dis::default()
    };
    let program = contents.get(options.offset..).unwrap_or_default();
    for (idx, word) in program.chunks_exact(2).enumerate() {
        let word = u16::from_be_bytes([word[0], word[1]]);
        let addr = PROGRAM_ADDR as usize + options.offset + 2 * idx;
        if options.plain {
            println!("{addr:03x}: {} {word:04x}", disassembler.once(word));
        } else {
            println!(
                "{:03x}: {} {:04x}",
                addr,
                disassembler.once(word),
                word.bright_black(),
            );
        }
    }
    Ok(())
}
