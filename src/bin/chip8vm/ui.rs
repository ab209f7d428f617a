// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(missing_docs)]
//! Platform-specific IO/UI code, and some debug functionality.

use chip8vm::{
    error::{Error, Result},
    screen::{HEIGHT, WIDTH},
    Chip8, Frame, Input, Present,
};
use minifb::{Key, Scale, ScaleMode, Window, WindowOptions};
use std::{cell::RefCell, path::Path, rc::Rc};

/// Maps the 16 Chip-8 keys, by value, onto the left side of a QWERTY keyboard
///
/// ```text
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D  ->  Q W E R
/// 7 8 9 E      A S D F
/// A 0 B F      Z X C V
/// ```
pub const KEYMAP: [Key; 16] = [
    Key::X,
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Q,
    Key::W,
    Key::E,
    Key::A,
    Key::S,
    Key::D,
    Key::Z,
    Key::C,
    Key::Key4,
    Key::R,
    Key::F,
    Key::V,
];

/// Finds the Chip-8 key bound to a physical key
pub fn identify_key(key: Key) -> Option<usize> {
    KEYMAP.iter().position(|&k| k == key)
}

#[derive(Clone, Debug)]
pub struct UIBuilder {
    pub width: usize,
    pub height: usize,
    pub name: String,
    pub window_options: WindowOptions,
}

impl UIBuilder {
    pub fn new(rom: impl AsRef<Path>) -> Self {
        let name = rom
            .as_ref()
            .file_name()
            .map(|name| format!("chip8vm: {}", name.to_string_lossy()))
            .unwrap_or_else(|| "chip8vm".into());
        UIBuilder {
            name,
            ..Default::default()
        }
    }
    /// Opens the window, returning its [Display] and [Keyboard] halves
    pub fn build(&self) -> Result<(Display, Keyboard)> {
        let mut window = Window::new(&self.name, self.width, self.height, self.window_options)?;
        // the run loop does its own pacing
        window.limit_update_rate(None);
        let window = Rc::new(RefCell::new(window));
        let mut display = Display {
            window: window.clone(),
            fb: FrameBuffer::new(self.width, self.height),
        };
        display.fb.show(&mut display.window.borrow_mut())?;
        let keyboard = Keyboard {
            window,
            held: vec![],
            paused: None,
        };
        Ok((display, keyboard))
    }
}

impl Default for UIBuilder {
    fn default() -> Self {
        UIBuilder {
            width: WIDTH,
            height: HEIGHT,
            name: "chip8vm".into(),
            window_options: WindowOptions {
                title: true,
                resize: false,
                scale: Scale::X16,
                scale_mode: ScaleMode::AspectRatioStretch,
                none: true,
                ..Default::default()
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBufferFormat {
    pub fg: u32,
    pub bg: u32,
}

impl Default for FrameBufferFormat {
    fn default() -> Self {
        FrameBufferFormat {
            fg: 0x0011a434,
            bg: 0x001E2431,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameBuffer {
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    format: FrameBufferFormat,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let format = FrameBufferFormat::default();
        FrameBuffer {
            buffer: vec![format.bg; width * height],
            width,
            height,
            format,
        }
    }
    pub fn render(&mut self, frame: &Frame) {
        for (pixel, &on) in self.buffer.iter_mut().zip(frame.pixels.iter()) {
            *pixel = if on { self.format.fg } else { self.format.bg };
        }
    }
    pub fn show(&self, window: &mut Window) -> Result<()> {
        window.update_with_buffer(&self.buffer, self.width, self.height)?;
        Ok(())
    }
}

/// Draws [Frame]s into the window
#[derive(Debug)]
pub struct Display {
    window: Rc<RefCell<Window>>,
    fb: FrameBuffer,
}

impl Present for Display {
    fn present(&mut self, frame: &Frame) -> Result<bool> {
        let mut window = self.window.borrow_mut();
        if !window.is_open() {
            return Ok(false);
        }
        self.fb.render(frame);
        self.fb.show(&mut window)?;
        Ok(true)
    }
}

/// Reads the window's keyboard into the Chip-8, and handles the debug keys
#[derive(Debug)]
pub struct Keyboard {
    window: Rc<RefCell<Window>>,
    held: Vec<Key>,
    paused: Option<bool>,
}

impl Keyboard {
    fn update_title(&mut self, ch8: &Chip8) {
        let paused = ch8.cpu.flags.pause;
        if self.paused != Some(paused) {
            self.paused = Some(paused);
            let title = if paused { "chip8vm ⏸" } else { "chip8vm ▶" };
            self.window.borrow_mut().set_title(title);
        }
    }

    /// Handles a debug key. Returns false if the key isn't one.
    fn debug_key(&mut self, key: Key, ch8: &mut Chip8) -> Result<bool> {
        match key {
            Key::F1 | Key::Comma => ch8.cpu.dump(),
            Key::F2 | Key::Period => ch8.screen.print_screen()?,
            Key::F3 => eprintln!("{}", ch8.cpu.mem()),
            Key::F4 | Key::Slash => {
                ch8.cpu.flags.debug();
                eprintln!(
                    "Debug {}.",
                    if ch8.cpu.flags.debug { "enabled" } else { "disabled" }
                );
            }
            Key::F5 | Key::Backslash => {
                ch8.cpu.flags.pause();
                eprintln!(
                    "{}.",
                    if ch8.cpu.flags.pause { "Paused" } else { "Unpaused" }
                );
            }
            Key::F6 | Key::Enter => match ch8.cpu.singlestep(&mut ch8.screen) {
                Ok(step) => eprintln!("Step: {step:?}"),
                Err(Error::BreakpointHit { addr, next }) => {
                    eprintln!("Step: breakpoint hit: {addr:03x} ({next:04x})")
                }
                Err(e) => return Err(e),
            },
            Key::F7 => {
                eprintln!("Set breakpoint {:03x}.", ch8.cpu.pc());
                let pc = ch8.cpu.pc();
                ch8.cpu.set_break(pc);
            }
            Key::F8 => {
                eprintln!("Unset breakpoint {:03x}.", ch8.cpu.pc());
                let pc = ch8.cpu.pc();
                ch8.cpu.unset_break(pc);
            }
            Key::F9 | Key::Delete => {
                eprintln!("Reset state.cpu {:03x}", ch8.cpu.pc());
                ch8.cpu.reset();
                ch8.screen.clear();
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl Input for Keyboard {
    fn poll(&mut self, ch8: &mut Chip8) -> Result<bool> {
        let keys = {
            let mut window = self.window.borrow_mut();
            window.update();
            if !window.is_open() {
                return Ok(false);
            }
            window.get_keys()
        };
        for &key in self.held.iter().filter(|&key| !keys.contains(key)) {
            if let Some(key) = identify_key(key) {
                ch8.cpu.release(key)?;
            }
        }
        let pressed: Vec<Key> = keys
            .iter()
            .copied()
            .filter(|key| !self.held.contains(key))
            .collect();
        for key in pressed {
            if key == Key::Escape {
                return Ok(false);
            }
            if self.debug_key(key, ch8)? {
                continue;
            }
            if let Some(key) = identify_key(key) {
                ch8.cpu.press(key)?;
            }
        }
        self.held = keys;
        self.update_title(ch8);
        Ok(true)
    }
}
