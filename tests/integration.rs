//! Runs small programs end to end, through the public API
use chip8vm::{screen::WIDTH, *};
use std::{
    sync::{atomic::AtomicBool, mpsc::channel},
    time::{Duration, Instant},
};

/// Draws the `0` glyph at (5, 5), then spins forever
const GLYPH_ROM: &[u8] = &[
    0x60, 0x05, // ld v0, #05
    0x61, 0x05, // ld v1, #05
    0xa0, 0x50, // ld I, 050
    0xd0, 0x15, // drw v0, v1, #5
    0x12, 0x08, // jp 208
];

/// Asserts that `pattern` is drawn at (x, y), and nothing else is
fn assert_glyph(pixels: &[bool], x: usize, y: usize, pattern: &[u8]) {
    for (idx, &on) in pixels.iter().enumerate() {
        let (px, py) = (idx % WIDTH, idx / WIDTH);
        let expected = (x..x + 8).contains(&px)
            && (y..y + pattern.len()).contains(&py)
            && pattern[py - y] & (0x80 >> (px - x)) != 0;
        assert_eq!(expected, on, "pixel ({px}, {py})");
    }
}

/// Records every frame it's shown, and asks to stop after `limit` of them
#[derive(Debug, Default)]
struct Recorder {
    frames: Vec<Frame>,
    limit: usize,
}

impl Present for Recorder {
    fn present(&mut self, frame: &Frame) -> Result<bool> {
        self.frames.push(frame.clone());
        Ok(self.frames.len() < self.limit)
    }
}

/// Presses `press` once the CPU waits on a key, and stops after `limit` polls
#[derive(Debug, Default)]
struct Script {
    polls: usize,
    limit: usize,
    press: Option<usize>,
}

impl Input for Script {
    fn poll(&mut self, ch8: &mut Chip8) -> Result<bool> {
        self.polls += 1;
        if ch8.cpu.flags.is_keypaused() {
            if let Some(key) = self.press.take() {
                ch8.cpu.press(key)?;
            }
        }
        Ok(self.polls < self.limit)
    }
}

/// Records each time the tone is switched
#[derive(Debug, Default)]
struct Tones(Vec<bool>);

impl Beeper for Tones {
    fn set_beep(&mut self, on: bool) -> Result<()> {
        self.0.push(on);
        Ok(())
    }
}

#[test]
fn draws_glyph_and_stays_stable() {
    let mut ch8 = Chip8::default();
    ch8.cpu.load_program_bytes(GLYPH_ROM).unwrap();
    ch8.cpu.multistep(&mut ch8.screen, 4).unwrap();
    let frame = ch8.screen.take_frame().expect("drawing should dirty the screen");
    assert_eq!(Update::Drawn, frame.update);
    assert_glyph(&frame.pixels, 5, 5, &[0xf0, 0x90, 0x90, 0x90, 0xf0]);
    assert_eq!(0, ch8.cpu.v()[0xf]);
    // the jump loop never touches the screen again
    ch8.cpu.multistep(&mut ch8.screen, 1000).unwrap();
    assert_eq!(None, ch8.screen.take_frame());
    assert_eq!(0x208, ch8.cpu.pc());
    assert_glyph(ch8.screen.as_slice(), 5, 5, &[0xf0, 0x90, 0x90, 0x90, 0xf0]);
}

#[test]
fn run_presents_drawn_frame() {
    let mut ch8 = Chip8::default();
    ch8.cpu.load_program_bytes(GLYPH_ROM).unwrap();
    let mut recorder = Recorder {
        limit: 1,
        ..Default::default()
    };
    let mut input = Script {
        limit: 600,
        ..Default::default()
    };
    ch8.run(&AtomicBool::new(true), &mut recorder, &mut input, &mut Tones::default())
        .unwrap();
    assert_eq!(1, recorder.frames.len());
    assert_glyph(&recorder.frames[0].pixels, 5, 5, &[0xf0, 0x90, 0x90, 0x90, 0xf0]);
}

#[test]
fn run_stops_when_not_running() {
    let mut ch8 = Chip8::default();
    ch8.cpu.load_program_bytes(GLYPH_ROM).unwrap();
    ch8.run(
        &AtomicBool::new(false),
        &mut Recorder::default(),
        &mut Script::default(),
        &mut Tones::default(),
    )
    .unwrap();
    assert_eq!(0, ch8.cpu.cycle());
}

#[test]
fn run_sends_frames_over_channel() {
    let mut ch8 = Chip8::default();
    ch8.cpu.load_program_bytes(GLYPH_ROM).unwrap();
    let (mut tx, rx) = channel();
    let mut input = Script {
        limit: 5,
        ..Default::default()
    };
    ch8.run(&AtomicBool::new(true), &mut tx, &mut input, &mut Tones::default())
        .unwrap();
    let frames: Vec<Frame> = rx.try_iter().collect();
    assert_eq!(1, frames.len());
    assert_eq!(Update::Drawn, frames[0].update);
}

#[test]
fn run_waits_for_key() {
    let mut ch8 = Chip8::default();
    ch8.cpu
        .load_program_bytes(&[
            0xf0, 0x0a, // ld v0, K
            0xf0, 0x29, // ld F, v0
            0x61, 0x00, // ld v1, #00
            0xd1, 0x15, // drw v1, v1, #5
            0x12, 0x08, // jp 208
        ])
        .unwrap();
    let mut recorder = Recorder {
        limit: 1,
        ..Default::default()
    };
    let mut input = Script {
        limit: 600,
        press: Some(0xb),
        ..Default::default()
    };
    ch8.run(&AtomicBool::new(true), &mut recorder, &mut input, &mut Tones::default())
        .unwrap();
    assert_eq!(0xb, ch8.cpu.v()[0]);
    assert_eq!(1, recorder.frames.len());
    assert_glyph(&recorder.frames[0].pixels, 0, 0, &[0xe0, 0x90, 0xe0, 0x90, 0xe0]);
}

#[test]
fn run_switches_beeper_on_transitions() {
    let mut ch8 = Chip8::default();
    ch8.cpu
        .load_program_bytes(&[
            0x60, 0x05, // ld v0, #05
            0xf0, 0x18, // ld ST, v0
            0x12, 0x04, // jp 204
        ])
        .unwrap();
    let mut tones = Tones::default();
    let mut input = Script {
        limit: 20,
        ..Default::default()
    };
    ch8.run(&AtomicBool::new(true), &mut Recorder::default(), &mut input, &mut tones)
        .unwrap();
    assert_eq!(vec![true, false], tones.0);
    assert_eq!(0, ch8.cpu.sound());
}

#[test]
fn stack_fault_stops_run() {
    let mut ch8 = Chip8::default();
    ch8.cpu.load_program_bytes(&[0x22, 0x00]).unwrap(); // call 200, forever
    let result = ch8.run(
        &AtomicBool::new(true),
        &mut Recorder::default(),
        &mut Script {
            limit: 600,
            ..Default::default()
        },
        &mut Tones::default(),
    );
    assert!(matches!(
        result,
        Err(error::Error::StackOverflow { pc: 0x200, word: 0x2200 })
    ));
    assert_eq!(16, ch8.cpu.stack().len());
    assert!(ch8.cpu.flags.pause);
}

#[test]
fn seeded_runs_agree() {
    let rom = [
        0xc0, 0xff, // rnd v0, #ff
        0xc1, 0xff, // rnd v1, #ff
        0xa0, 0x50, // ld I, 050
        0xd0, 0x15, // drw v0, v1, #5
        0x62, 0x1e, // ld v2, #1e
        0xf2, 0x15, // ld DT, v2
        0x12, 0x0c, // jp 20c
    ];
    let run = |start: Instant| {
        let mut ch8 = Chip8::new(CPU::with_seed(Quirks::default(), 1), 1000);
        ch8.cpu.load_program_bytes(&rom).unwrap();
        for ms in 0..100 {
            ch8.step_at(start + Duration::from_millis(ms)).unwrap();
        }
        ch8
    };
    let now = Instant::now();
    let (early, late) = (run(now), run(now + Duration::from_secs(3)));
    assert_eq!(early.cpu, late.cpu);
    assert_eq!(early.screen, late.screen);
    assert_eq!(early, late);
    assert!(early.cpu.delay() < 0x1e);
}
