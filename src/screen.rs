// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use crate::error::Result;

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// What changed on the [Screen] since the presenter last looked at it
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Update {
    /// The whole screen was cleared
    Cleared,
    /// At least one pixel was toggled by a draw
    Drawn,
}

/// The 64x32 monochrome display
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Screen {
    pixels: Vec<bool>,
    update: Option<Update>,
}

/// A snapshot of the [Screen], safe to hand to a presenter on another thread
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Row-major pixels, `WIDTH * HEIGHT` long
    pub pixels: Vec<bool>,
    /// The reason this frame was taken
    pub update: Update,
}

impl Frame {
    /// Gets the pixel at (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[(y % HEIGHT) * WIDTH + x % WIDTH]
    }
}

impl Screen {
    /// Constructs a blank screen
    pub fn new() -> Self {
        Screen {
            pixels: vec![false; WIDTH * HEIGHT],
            update: None,
        }
    }

    /// Gets the pixel at (x, y). Coordinates wrap around the edges.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[(y % HEIGHT) * WIDTH + x % WIDTH]
    }

    /// Gets the pixels in row-major order
    pub fn as_slice(&self) -> &[bool] {
        &self.pixels
    }

    /// Turns every pixel off.
    ///
    /// Any pending [Update::Drawn] is replaced by [Update::Cleared].
    pub fn clear(&mut self) {
        self.pixels.fill(false);
        self.update = Some(Update::Cleared);
    }

    /// XORs an 8-pixel-wide sprite onto the screen at (x, y), wrapping at the edges.
    ///
    /// Returns true if any pixel was turned off.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut screen = Screen::new();
    /// assert!(!screen.draw_sprite(62, 31, &[0b1100_0000, 0b1000_0000]));
    /// assert!(screen.get(63, 31) && screen.get(62, 31) && screen.get(62, 0));
    /// assert!(screen.draw_sprite(62, 31, &[0b1000_0000]));
    /// assert!(!screen.get(62, 31));
    /// ```
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, &byte) in sprite.iter().enumerate() {
            for col in 0..8 {
                if byte & (0x80 >> col) == 0 {
                    continue;
                }
                let pixel = &mut self.pixels[(y + row) % HEIGHT * WIDTH + (x + col) % WIDTH];
                collision |= *pixel;
                *pixel = !*pixel;
                if self.update.is_none() {
                    self.update = Some(Update::Drawn);
                }
            }
        }
        collision
    }

    /// Returns true if the screen changed since the last [Screen::take_frame]
    pub fn is_dirty(&self) -> bool {
        self.update.is_some()
    }

    /// Gets the pending update, if any, without consuming it
    pub fn update(&self) -> Option<Update> {
        self.update
    }

    /// Takes a [Frame] if the screen changed, and marks the screen clean
    pub fn take_frame(&mut self) -> Option<Frame> {
        let update = self.update.take()?;
        Some(Frame {
            pixels: self.pixels.clone(),
            update,
        })
    }

    /// Prints the screen to stdout
    pub fn print_screen(&self) -> Result<()> {
        // draw with the drawille library, if available
        #[cfg(feature = "drawille")]
        {
            use drawille::Canvas;
            let mut canvas = Canvas::new(WIDTH as u32, HEIGHT as u32);
            for (idx, &on) in self.pixels.iter().enumerate() {
                if on {
                    canvas.set((idx % WIDTH) as u32, (idx / WIDTH) as u32);
                }
            }
            println!("{}", canvas.frame());
        }
        #[cfg(not(feature = "drawille"))]
        for row in self.pixels.chunks(WIDTH) {
            println!(
                "{}",
                row.iter()
                    .map(|&on| if on { '█' } else { ' ' })
                    .collect::<String>()
            );
        }
        Ok(())
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_screen_is_clean() {
        let screen = Screen::new();
        assert!(!screen.is_dirty());
        assert!(screen.as_slice().iter().all(|&p| !p));
    }

    #[test]
    fn draw_marks_dirty() {
        let mut screen = Screen::new();
        screen.draw_sprite(0, 0, &[0x80]);
        assert_eq!(Some(Update::Drawn), screen.update());
        let frame = screen.take_frame().expect("screen should be dirty");
        assert!(frame.get(0, 0));
        assert!(!screen.is_dirty());
        assert_eq!(None, screen.take_frame());
    }

    #[test]
    fn empty_sprite_changes_nothing() {
        let mut screen = Screen::new();
        assert!(!screen.draw_sprite(10, 10, &[0, 0, 0]));
        assert!(!screen.is_dirty());
    }

    #[test]
    fn clear_replaces_pending_draw() {
        let mut screen = Screen::new();
        screen.draw_sprite(3, 4, &[0xff; 4]);
        screen.clear();
        assert_eq!(Some(Update::Cleared), screen.update());
        assert!(screen.as_slice().iter().all(|&p| !p));
        // a draw after the clear keeps the clear pending
        screen.draw_sprite(3, 4, &[0xff]);
        assert_eq!(Some(Update::Cleared), screen.update());
    }

    #[test]
    fn sprites_wrap_on_both_axes() {
        let mut screen = Screen::new();
        screen.draw_sprite(60, 30, &[0xff; 4]);
        for (x, y) in [(60, 30), (63, 31), (0, 0), (3, 1), (0, 30)] {
            assert!(screen.get(x, y), "({x}, {y}) should be lit");
        }
        assert!(!screen.get(4, 0));
        assert!(!screen.get(60, 2));
    }

    #[test]
    fn double_draw_erases() {
        let mut screen = Screen::new();
        assert!(!screen.draw_sprite(5, 5, &[0xf0, 0x90]));
        assert!(screen.draw_sprite(5, 5, &[0xf0, 0x90]));
        assert!(screen.as_slice().iter().all(|&p| !p));
    }
}
