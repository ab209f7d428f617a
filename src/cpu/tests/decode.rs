// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Exercises the instruction decode logic.
use super::*;

const INDX: &[u8; 16] = b"\0\x01\x02\x03\x04\x05\x06\x07\x08\x09\x0a\x0b\x0c\x0d\x0e\x0f";

/// runs one arbitrary operation on a brand new CPU
/// returns the CPU, and the outcome of the tick, for inspection
fn step_single_op(op: &[u8]) -> (CPU, Result<Step>) {
    let (mut cpu, mut screen) = setup_quirks(Quirks::from(false));
    cpu.load_program_bytes(op).unwrap();
    cpu.v = *INDX;
    let step = cpu.tick(&mut screen);
    (cpu, step)
}

/// runs one arbitrary operation on a brand new CPU
/// returns the CPU for inspection
fn run_single_op(op: &[u8]) -> CPU {
    let (cpu, step) = step_single_op(op);
    match step.unwrap() {
        Step::Skipped(word) => panic!("{word:04x} did not decode"),
        _ => cpu,
    }
}

/// asserts that an operation is skipped, and is otherwise a no-op
fn skipped(op: &[u8]) {
    let (cpu, step) = step_single_op(op);
    assert_eq!(Step::Skipped(u16::from_be_bytes([op[0], op[1]])), step.unwrap());
    assert_eq!(0x202, cpu.pc);
    assert_eq!(INDX, &cpu.v);
}

#[rustfmt::skip]
mod sys {
    use super::*;
    #[test] fn cls()   { run_single_op(b"\x00\xe0"); }
    #[test] fn ret()   { assert!(matches!(step_single_op(b"\x00\xee").1, Err(Error::StackUnderflow { .. }))); }
    #[test] fn u0420() { skipped(b"\x04\x20"); }
    #[test] fn u0000() { skipped(b"\x00\x00"); }
}
#[rustfmt::skip]
mod jump {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x12\x30").pc); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\x12\x31").pc); }
}
#[rustfmt::skip]
mod call {
    use super::*;
    #[test] fn aligned()   { assert_eq!(0x230, run_single_op(b"\x22\x30").pc); }
    #[test] fn unaligned() { assert_eq!(0x231, run_single_op(b"\x22\x31").pc); }
    #[test] fn pushes()    { assert_eq!(vec![0x202], run_single_op(b"\x22\x30").stack); }
}
#[rustfmt::skip]
mod skeb {
    use super::*;
    #[test] fn skip()    { assert_eq!(0x204, run_single_op(b"\x30\x00").pc); }
    #[test] fn no_skip() { assert_eq!(0x202, run_single_op(b"\x30\x01").pc); }
}
#[rustfmt::skip]
mod sneb {
    use super::*;
    #[test] fn skip()   { assert_eq!(0x204, run_single_op(b"\x40\x01").pc); }
    #[test] fn noskip() { assert_eq!(0x202, run_single_op(b"\x40\x00").pc); }
}
#[rustfmt::skip]
mod se {
    use super::*;
    #[test] fn skip()   { assert_eq!(0x204, run_single_op(b"\x50\x00").pc); }
    #[test] fn noskip() { assert_eq!(0x202, run_single_op(b"\x50\x10").pc); }
    #[test] fn u5ffn()  { for n in 1..=0xf { skipped(&[0x5f, 0xf0 | n]); } }
}
#[rustfmt::skip]
mod mov {
    use super::*;
    #[test] fn ld()  { assert_eq!(0x5b, run_single_op(b"\x6a\x5b").v[0xa]); }
    #[test] fn add() { assert_eq!(0x0b, run_single_op(b"\x7a\x01").v[0xa]); }
}
#[rustfmt::skip]
mod alu {
    use super::*;
    #[test] fn ld()   { let c = run_single_op(b"\x8a\xb0"); assert_eq!((0x0b, 0x0f), (c.v[0xa], c.v[0xf])); }
    #[test] fn or()   { let c = run_single_op(b"\x8a\xb1"); assert_eq!((0x0b, 0x0f), (c.v[0xa], c.v[0xf])); }
    #[test] fn and()  { let c = run_single_op(b"\x8a\xb2"); assert_eq!((0x0a, 0x0f), (c.v[0xa], c.v[0xf])); }
    #[test] fn xor()  { let c = run_single_op(b"\x8a\xb3"); assert_eq!((0x01, 0x0f), (c.v[0xa], c.v[0xf])); }
    #[test] fn add()  { let c = run_single_op(b"\x8a\xb4"); assert_eq!((0x15, 0x00), (c.v[0xa], c.v[0xf])); }
    #[test] fn sub()  { let c = run_single_op(b"\x8a\xb5"); assert_eq!((0xff, 0x00), (c.v[0xa], c.v[0xf])); }
    #[test] fn shr()  { let c = run_single_op(b"\x8a\xb6"); assert_eq!((0x05, 0x00), (c.v[0xa], c.v[0xf])); }
    #[test] fn subn() { let c = run_single_op(b"\x8a\xb7"); assert_eq!((0x01, 0x01), (c.v[0xa], c.v[0xf])); }
    #[test] fn shl()  { let c = run_single_op(b"\x8a\xbe"); assert_eq!((0x14, 0x00), (c.v[0xa], c.v[0xf])); }
    #[test] fn u8abn() { for n in [8, 9, 0xa, 0xb, 0xc, 0xd, 0xf] { skipped(&[0x8a, 0xb0 | n]); } }
}
#[rustfmt::skip]
mod sne {
    use super::*;
    #[test] fn skip()   { assert_eq!(0x204, run_single_op(b"\x90\x10").pc); }
    #[test] fn noskip() { assert_eq!(0x202, run_single_op(b"\x90\x00").pc); }
    #[test] fn u9ffn()  { for n in 1..=0xf { skipped(&[0x9f, 0xf0 | n]); } }
}
#[rustfmt::skip]
mod i {
    use super::*;
    #[test] fn ld()   { assert_eq!(0x123, run_single_op(b"\xa1\x23").i); }
    #[test] fn add()  { assert_eq!(0x004, run_single_op(b"\xf4\x1e").i); }
    #[test] fn font() { assert_eq!(0x06e, run_single_op(b"\xf6\x29").i); }
}
#[rustfmt::skip]
mod jv {
    use super::*;
    #[test] fn by_high_nibble() { assert_eq!(0x348, run_single_op(b"\xb3\x45").pc); }
}
#[rustfmt::skip]
mod rnd {
    use super::*;
    #[test] fn masked_out() { assert_eq!(0, run_single_op(b"\xc5\x00").v[5]); }
}
#[rustfmt::skip]
mod drw {
    use super::*;
    #[test] fn draw() { assert_eq!(0, run_single_op(b"\xd0\x15").v[0xf]); }
}
#[rustfmt::skip]
mod key {
    use super::*;
    #[test] fn skp()   { assert_eq!(0x202, run_single_op(b"\xe0\x9e").pc); }
    #[test] fn sknp()  { assert_eq!(0x204, run_single_op(b"\xe0\xa1").pc); }
    #[test] fn u_e0ff() { skipped(b"\xe0\xff"); }
    #[test] fn wait()  { assert_eq!(Step::AwaitingKey, step_single_op(b"\xf5\x0a").1.unwrap()); }
}
#[rustfmt::skip]
mod io {
    use super::*;
    #[test] fn get_delay() { assert_eq!(0, run_single_op(b"\xf7\x07").v[7]); }
    #[test] fn set_delay() { assert_eq!(2, run_single_op(b"\xf2\x15").delay()); }
    #[test] fn set_sound() { assert_eq!(3, run_single_op(b"\xf3\x18").sound()); }
    #[test] fn bcd()       { assert_eq!(&[0, 1, 0], &run_single_op(b"\xfa\x33").mem.as_slice()[0..3]); }
    #[test] fn store()     { assert_eq!(&[0, 1, 2, 3, 0], &run_single_op(b"\xf3\x55").mem.as_slice()[0..5]); }
    #[test] fn restore()   { assert_eq!(&[0, 0, 0, 3], &run_single_op(b"\xf2\x65").v[0..4]); }
    #[test] fn u_fff0()    { skipped(b"\xff\xf0"); }
}
