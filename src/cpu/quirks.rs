// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Controls the [Quirks] behavior of the CPU on a granular level.

use super::mode::Mode;

/// Controls the quirk behavior of the CPU on a granular level.
///
/// `true` is Cosmac-VIP-like behavior, `false` is the behavior most modern
/// interpreters settled on. Once handed to [CPU::new](super::CPU::new), the
/// quirks are fixed for the lifetime of that CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quirks {
    /// `8xy6` copies vY into vX before shifting right
    pub shift_right: bool,
    /// `8xyE` copies vY into vX before shifting left
    pub shift_left: bool,
    /// `Baaa` jumps to `a` + v0, instead of `a` + v`X` where X is the high nibble of `a`
    pub jump_offset: bool,
    /// `Fx55` leaves I advanced by X
    pub store_inc: bool,
    /// `Fx65` leaves I advanced by X
    pub load_inc: bool,
}

impl From<bool> for Quirks {
    fn from(value: bool) -> Self {
        Quirks {
            shift_right: value,
            shift_left: value,
            jump_offset: value,
            store_inc: value,
            load_inc: value,
        }
    }
}

impl From<Mode> for Quirks {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Cosmac => true.into(),
            Mode::Modern => false.into(),
        }
    }
}

impl Default for Quirks {
    /// Original shift and jump behavior, modern memory behavior
    fn default() -> Self {
        Quirks {
            shift_right: true,
            shift_left: true,
            jump_offset: true,
            store_inc: false,
            load_inc: false,
        }
    }
}
