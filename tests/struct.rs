//! Testing methods on chip8vm's structs
use chip8vm::{error::Error, *};
use std::{collections::hash_map::DefaultHasher, hash::Hash, str::FromStr};

#[test]
fn chip8() {
    let ch8 = Chip8::default(); // Default
    let ch82 = ch8.clone(); // Clone
    assert_eq!(ch8, ch82); // PartialEq
    println!("{ch8:?}"); // Debug
}

#[test]
fn error() {
    let error = Error::StackOverflow {
        pc: 0x2fe,
        word: 0x2300,
    };
    assert_eq!("stack overflow at 2fe (2300)", error.to_string());
    assert!(error.is_fatal());
    assert!(!Error::BreakpointHit {
        addr: 0x200,
        next: 0x00e0
    }
    .is_fatal());
}

mod cpu {
    use super::*;

    #[test]
    fn press_invalid_key() {
        let mut cpu = CPU::default();
        assert!(matches!(cpu.press(0x10), Err(Error::InvalidKey { key: 0x10 })));
        assert!(matches!(cpu.release(0x10), Err(Error::InvalidKey { key: 0x10 })));
        assert!(!cpu.is_pressed(0x10));
    }

    #[test]
    fn set_invalid_register() {
        let mut cpu = CPU::default();
        assert!(matches!(cpu.set_v(0x10, 1), Err(Error::InvalidRegister { reg: 0x10 })));
        assert!(cpu.set_v(0xf, 1).is_ok());
        assert_eq!(1, cpu.v()[0xf]);
    }

    #[test]
    fn breakpoints() {
        let mut cpu = CPU::default();
        cpu.set_break(0x204).set_break(0x208).set_break(0x204);
        assert_eq!(&[0x204, 0x208], cpu.breakpoints());
        cpu.unset_break(0x204);
        assert_eq!(&[0x208], cpu.breakpoints());
    }

    #[test]
    fn program_too_large() {
        let mut cpu = CPU::default();
        assert!(cpu.load_program_bytes(&[0x12; 0xe00]).is_ok());
        assert!(matches!(
            cpu.load_program_bytes(&[0x12; 0xe01]),
            Err(Error::ProgramTooLarge {
                len: 0xe01,
                max: 0xe00
            })
        ));
        // the failed load leaves the previous program in place
        assert_eq!(0x1212, cpu.mem().read_word(0xffe));
    }

    #[test]
    fn load_program_missing_file() {
        let mut cpu = CPU::default();
        assert!(matches!(
            cpu.load_program("this/file/does/not/exist.ch8"),
            Err(Error::IoError(_))
        ));
    }

    #[test]
    fn program_is_replaced() {
        let mut cpu = CPU::default();
        cpu.load_program_bytes(&[0xaa; 8]).unwrap();
        cpu.load_program_bytes(&[0x12, 0x00]).unwrap();
        assert_eq!(0x1200, cpu.mem().read_word(0x200));
        assert_eq!(0x0000, cpu.mem().read_word(0x202));
    }

    #[test]
    fn charset_is_loaded() {
        let cpu = CPU::default();
        assert_eq!(
            &[0xf0, 0x80, 0xf0, 0x80, 0x80],
            &cpu.mem().as_slice()[0x50 + 5 * 0xf..0x50 + 5 * 0x10]
        );
    }

    #[test]
    fn quirks_are_kept() {
        let cpu = CPU::new(Mode::Cosmac.into());
        assert_eq!(Quirks::from(true), cpu.quirks());
        assert_eq!(cpu.quirks(), cpu.clone().quirks());
    }

    #[test]
    fn dump() {
        CPU::default().dump();
    }
}

mod mode {
    use super::*;

    #[test]
    fn from_str() {
        for name in ["cosmac", "VIP", "chip-8", "Chip8"] {
            assert_eq!(Mode::Cosmac, Mode::from_str(name).unwrap());
        }
        for name in ["modern", "Chip-48", "chip48"] {
            assert_eq!(Mode::Modern, Mode::from_str(name).unwrap());
        }
        assert!(matches!(
            Mode::from_str("xochip"),
            Err(Error::InvalidMode { mode }) if mode == "xochip"
        ));
    }

    #[test]
    fn into_quirks() {
        assert_eq!(Quirks::from(true), Quirks::from(Mode::Cosmac));
        assert_eq!(Quirks::from(false), Quirks::from(Mode::Modern));
        assert_eq!(Mode::Modern, Mode::default());
    }
}

mod quirks {
    use super::*;

    #[test]
    fn default() {
        let quirks = Quirks::default();
        assert!(quirks.shift_right && quirks.shift_left && quirks.jump_offset);
        assert!(!quirks.store_inc && !quirks.load_inc);
    }
}

mod screen {
    use super::*;

    #[test]
    fn clear_is_reported() {
        let mut screen = Screen::default();
        screen.draw_sprite(0, 0, &[0x80]);
        screen.clear();
        let frame = screen.take_frame().unwrap();
        assert_eq!(Update::Cleared, frame.update);
        assert!(frame.pixels.iter().all(|&p| !p));
        assert_eq!(None, screen.take_frame());
    }

    #[test]
    fn print_screen() {
        let mut screen = Screen::default();
        screen.draw_sprite(4, 4, &[0xf0, 0x90, 0x90, 0x90, 0xf0]);
        screen.print_screen().unwrap();
    }

    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Screen::default().hash(&mut hasher);
        println!("{hasher:?}");
    }
}

mod insn {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            "drw    v0, v1, #5",
            Insn::Draw { x: 0, y: 1, n: 5 }.to_string()
        );
    }

    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Insn::Cls.hash(&mut hasher);
        println!("{hasher:?}");
    }

    #[test]
    fn plain_disassembly() {
        let dis = Dis::plain();
        assert!(dis.once(0xa050).contains("050"));
        assert!(dis.once(0xffff).contains("ffff"));
    }
}

mod flags {
    use super::*;

    #[test]
    fn toggles() {
        let mut flags = Flags::default();
        flags.debug();
        flags.pause();
        assert!(flags.debug && flags.pause);
        flags.pause();
        assert!(!flags.pause);
        assert!(!flags.is_keypaused());
    }
}

mod timers {
    use super::*;

    #[test]
    fn count_down() {
        let mut timers = Timers::new();
        timers.set_delay(3);
        timers.set_sound(1);
        assert!(timers.is_sounding());
        for _ in 0..5 {
            timers.tick();
        }
        assert_eq!((0, 0), (timers.delay(), timers.sound()));
        assert!(!timers.is_sounding());
    }
}
