// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Selects a preset of [Quirks](super::Quirks)

use crate::error::Error;
use std::str::FromStr;

/// Selects a preset for the interpreter's quirks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// COSMAC VIP behavior: every quirk enabled
    Cosmac,
    /// CHIP-48 and later: every quirk disabled
    #[default]
    Modern,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cosmac" | "vip" | "original" | "chip8" | "chip-8" => Ok(Mode::Cosmac),
            "modern" | "chip48" | "chip-48" => Ok(Mode::Modern),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}
