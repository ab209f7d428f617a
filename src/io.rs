// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Interfaces to the frontend: presentation, key input, and the buzzer

use crate::{error::Result, screen::Frame, Chip8};
use std::sync::mpsc::Sender;

/// Shows [Frame]s to the user
pub trait Present {
    /// Presents a frame. Returns `false` if the user asked to quit.
    fn present(&mut self, frame: &Frame) -> Result<bool>;
}

/// Feeds key state to the [CPU](crate::CPU)
pub trait Input {
    /// Polls the keyboard, calling [CPU::press](crate::CPU::press) and
    /// [CPU::release](crate::CPU::release) on the 16 Chip-8 keys as they change.
    /// Returns `false` if the user asked to quit.
    fn poll(&mut self, ch8: &mut Chip8) -> Result<bool>;
}

/// Turns the tone on and off. The tone itself is the frontend's business.
pub trait Beeper {
    /// Starts or stops the tone
    fn set_beep(&mut self, on: bool) -> Result<()>;
}

/// Hands frames to a presenter on another thread.
///
/// Each [Frame] is an owned snapshot, so the receiver never sees a half-drawn screen.
impl Present for Sender<Frame> {
    fn present(&mut self, frame: &Frame) -> Result<bool> {
        Ok(self.send(frame.clone()).is_ok())
    }
}

/// Rings the terminal bell when the tone starts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bell;

impl Beeper for Bell {
    fn set_beep(&mut self, on: bool) -> Result<()> {
        use std::io::Write;
        if on {
            let mut stderr = std::io::stderr();
            stderr.write_all(b"\x07")?;
            stderr.flush()?;
        }
        Ok(())
    }
}
