// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each Chip-8 [Insn]

use super::{mem::FONT_ADDR, *};
use rand::Rng;

impl CPU {
    /// Executes a single [Insn]
    #[rustfmt::skip]
    #[inline(always)]
    pub(super) fn execute(&mut self, screen: &mut Screen, instruction: Insn) -> Result<()> {
        match instruction {
            Insn::Cls                   => self.clear_screen(screen),
            Insn::Ret                   => self.ret()?,
            Insn::Jump        {       A } => self.jump(A),
            Insn::Call        {       A } => self.call(A)?,
            Insn::SkipEqImm   {    x, B } => self.skip_equals_immediate(x, B),
            Insn::SkipNeImm   {    x, B } => self.skip_not_equals_immediate(x, B),
            Insn::SkipEq      { y, x    } => self.skip_equals(x, y),
            Insn::LoadImm     {    x, B } => self.load_immediate(x, B),
            Insn::AddImm      {    x, B } => self.add_immediate(x, B),
            Insn::Load        { y, x    } => self.load(x, y),
            Insn::Or          { y, x    } => self.or(x, y),
            Insn::And         { y, x    } => self.and(x, y),
            Insn::Xor         { y, x    } => self.xor(x, y),
            Insn::Add         { y, x    } => self.add(x, y),
            Insn::Sub         { y, x    } => self.sub(x, y),
            Insn::Shr         { y, x    } => self.shift_right(x, y),
            Insn::SubN        { y, x    } => self.backwards_sub(x, y),
            Insn::Shl         { y, x    } => self.shift_left(x, y),
            Insn::SkipNe      { y, x    } => self.skip_not_equals(x, y),
            Insn::LoadI       {       A } => self.load_i_immediate(A),
            Insn::JumpIndexed {       A } => self.jump_indexed(A),
            Insn::Rand        {    x, B } => self.rand(x, B),
            Insn::Draw        { y, x, n } => self.draw(x, y, n, screen),
            Insn::SkipKey     {    x    } => self.skip_key_equals(x),
            Insn::SkipNotKey  {    x    } => self.skip_key_not_equals(x),
            Insn::GetDelay    {    x    } => self.load_delay_timer(x),
            Insn::WaitKey     {    x    } => self.wait_for_key(x),
            Insn::SetDelay    {    x    } => self.store_delay_timer(x),
            Insn::SetSound    {    x    } => self.store_sound_timer(x),
            Insn::AddI        {    x    } => self.add_i(x),
            Insn::Font        {    x    } => self.load_sprite(x),
            Insn::Bcd         {    x    } => self.bcd_convert(x),
            Insn::Store       {    x    } => self.store_dma(x),
            Insn::Restore     {    x    } => self.load_dma(x),
        }
        Ok(())
    }

    /// The address and word of the instruction currently executing
    fn current(&self) -> (Adr, u16) {
        let pc = self.pc.wrapping_sub(2);
        (pc, self.mem.read_word(pc))
    }
}

/// |`0aaa`| Issues a "System call" (ML routine)
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`00e0`| Clear screen memory to all 0       |
/// |`00ee`| Return from subroutine             |
impl CPU {
    /// |`00e0`| Clears the screen memory to 0
    #[inline(always)]
    pub(super) fn clear_screen(&mut self, screen: &mut Screen) {
        screen.clear();
    }
    /// |`00ee`| Returns from subroutine
    ///
    /// Returning with an empty stack is an [Error::StackUnderflow]
    #[inline(always)]
    pub(super) fn ret(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(addr) => {
                self.pc = addr;
                Ok(())
            }
            None => {
                let (pc, word) = self.current();
                Err(Error::StackUnderflow { pc, word })
            }
        }
    }
}

/// |`1aaa`| Sets pc to an absolute address
impl CPU {
    /// |`1aaa`| Sets the program counter to an absolute address
    #[inline(always)]
    pub(super) fn jump(&mut self, a: Adr) {
        self.pc = a;
    }
}

/// |`2aaa`| Pushes pc onto the stack, then jumps to a
impl CPU {
    /// |`2aaa`| Pushes pc onto the stack, then jumps to a
    ///
    /// Calling with [STACK_DEPTH] addresses on the stack is an [Error::StackOverflow]
    #[inline(always)]
    pub(super) fn call(&mut self, a: Adr) -> Result<()> {
        if self.stack.len() >= STACK_DEPTH {
            let (pc, word) = self.current();
            return Err(Error::StackOverflow { pc, word });
        }
        self.stack.push(self.pc);
        self.pc = a;
        Ok(())
    }
}

/// |`3xbb`| Skips next instruction if register X == b
impl CPU {
    /// |`3xbb`| Skips the next instruction if register X == b
    #[inline(always)]
    pub(super) fn skip_equals_immediate(&mut self, x: Reg, b: u8) {
        if self.v[x] == b {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`4xbb`| Skips next instruction if register X != b
impl CPU {
    /// |`4xbb`| Skips the next instruction if register X != b
    #[inline(always)]
    pub(super) fn skip_not_equals_immediate(&mut self, x: Reg, b: u8) {
        if self.v[x] != b {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`5xy0`| Skip next instruction if vX == vY
impl CPU {
    /// |`5xy0`| Skips the next instruction if register X == register Y
    #[inline(always)]
    pub(super) fn skip_equals(&mut self, x: Reg, y: Reg) {
        if self.v[x] == self.v[y] {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`6xbb`| Loads immediate byte b into register vX
impl CPU {
    /// |`6xbb`| Loads immediate byte b into register vX
    #[inline(always)]
    pub(super) fn load_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = b;
    }
}

/// |`7xbb`| Adds immediate byte b to register vX
impl CPU {
    /// |`7xbb`| Adds immediate byte b to register vX. Does not touch vF.
    #[inline(always)]
    pub(super) fn add_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = self.v[x].wrapping_add(b);
    }
}

/// |`8xyn`| Performs ALU operation
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`8xy0`| X = Y                              |
/// |`8xy1`| X = X \| Y                         |
/// |`8xy2`| X = X & Y                          |
/// |`8xy3`| X = X ^ Y                          |
/// |`8xy4`| X = X + Y; Set vF=carry            |
/// |`8xy5`| X = X - Y; Set vF=(X > Y)          |
/// |`8xy6`| X = X >> 1; Set vF=shifted bit     |
/// |`8xy7`| X = Y - X; Set vF=(X < Y)          |
/// |`8xyE`| X = X << 1; Set vF=shifted bit     |
///
/// vF is always written last, so the flag wins when X is `F`.
impl CPU {
    /// |`8xy0`| Loads the value of y into x
    #[inline(always)]
    pub(super) fn load(&mut self, x: Reg, y: Reg) {
        self.v[x] = self.v[y];
    }
    /// |`8xy1`| Performs bitwise or of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn or(&mut self, x: Reg, y: Reg) {
        self.v[x] |= self.v[y];
    }
    /// |`8xy2`| Performs bitwise and of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn and(&mut self, x: Reg, y: Reg) {
        self.v[x] &= self.v[y];
    }
    /// |`8xy3`| Performs bitwise xor of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn xor(&mut self, x: Reg, y: Reg) {
        self.v[x] ^= self.v[y];
    }
    /// |`8xy4`| Performs addition of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn add(&mut self, x: Reg, y: Reg) {
        let carry;
        (self.v[x], carry) = self.v[x].overflowing_add(self.v[y]);
        self.v[0xf] = carry.into();
    }
    /// |`8xy5`| Performs subtraction of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn sub(&mut self, x: Reg, y: Reg) {
        let flag = self.v[x] > self.v[y];
        self.v[x] = self.v[x].wrapping_sub(self.v[y]);
        self.v[0xf] = flag.into();
    }
    /// |`8xy6`| Performs bitwise right shift of vX
    ///
    /// # Quirk
    /// On the original chip-8 interpreter, this shifts vY and stores the result in vX
    #[inline(always)]
    pub(super) fn shift_right(&mut self, x: Reg, y: Reg) {
        if self.quirks.shift_right {
            self.v[x] = self.v[y];
        }
        let shift_out = self.v[x] & 1;
        self.v[x] >>= 1;
        self.v[0xf] = shift_out;
    }
    /// |`8xy7`| Performs subtraction of vY and vX, and stores the result in vX
    #[inline(always)]
    pub(super) fn backwards_sub(&mut self, x: Reg, y: Reg) {
        let flag = self.v[x] < self.v[y];
        self.v[x] = self.v[y].wrapping_sub(self.v[x]);
        self.v[0xf] = flag.into();
    }
    /// |`8xyE`| Performs bitwise left shift of vX
    ///
    /// # Quirk
    /// On the original chip-8 interpreter, this shifts vY and stores the result in vX
    #[inline(always)]
    pub(super) fn shift_left(&mut self, x: Reg, y: Reg) {
        if self.quirks.shift_left {
            self.v[x] = self.v[y];
        }
        let shift_out = self.v[x] >> 7;
        self.v[x] <<= 1;
        self.v[0xf] = shift_out;
    }
}

/// |`9xy0`| Skip next instruction if vX != vY
impl CPU {
    /// |`9xy0`| Skip next instruction if X != y
    #[inline(always)]
    pub(super) fn skip_not_equals(&mut self, x: Reg, y: Reg) {
        if self.v[x] != self.v[y] {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`Aaaa`| Load address #a into register I
impl CPU {
    /// |`Aadr`| Load address #adr into register I
    #[inline(always)]
    pub(super) fn load_i_immediate(&mut self, a: Adr) {
        self.i = a;
    }
}

/// |`Baaa`| Jump to &adr + v0
impl CPU {
    /// |`Badr`| Jump to &adr + v0
    ///
    /// # Quirk
    /// On the Chip-48 and later, this jumps to &adr + vX,
    /// where X is the high nibble of adr
    #[inline(always)]
    pub(super) fn jump_indexed(&mut self, a: Adr) {
        let reg = if self.quirks.jump_offset {
            0
        } else {
            a as Reg >> 8 & 0xf
        };
        self.pc = a.wrapping_add(self.v[reg] as Adr);
    }
}

/// |`Cxbb`| Stores a random number & the provided byte into vX
impl CPU {
    /// |`Cxbb`| Stores a random number & the provided byte into vX
    #[inline(always)]
    pub(super) fn rand(&mut self, x: Reg, b: u8) {
        self.v[x] = self.rng.gen::<u8>() & b;
    }
}

/// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
impl CPU {
    /// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
    ///
    /// The starting coordinates are taken modulo the screen size, and the sprite
    /// wraps around the edges of the screen. vF is set if any pixel was erased.
    #[inline(always)]
    pub(super) fn draw(&mut self, x: Reg, y: Reg, n: Nib, screen: &mut Screen) {
        use crate::screen::{HEIGHT, WIDTH};
        let (x, y) = (self.v[x] as usize % WIDTH, self.v[y] as usize % HEIGHT);
        let sprite: Vec<u8> = (0..n as Adr)
            .map(|row| self.mem.read(self.i.wrapping_add(row)))
            .collect();
        self.v[0xf] = 0;
        if screen.draw_sprite(x, y, &sprite) {
            self.v[0xf] = 1;
        }
    }
}

/// |`Exbb`| Skips instruction on value of keypress
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`eX9e`| Skip next instruction if key == vX |
/// |`eXa1`| Skip next instruction if key != vX |
impl CPU {
    /// |`Ex9E`| Skip next instruction if key == vX
    #[inline(always)]
    pub(super) fn skip_key_equals(&mut self, x: Reg) {
        if self.keys[self.v[x] as usize & 0xf] {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`ExA1`| Skip next instruction if key != vX
    #[inline(always)]
    pub(super) fn skip_key_not_equals(&mut self, x: Reg) {
        if !self.keys[self.v[x] as usize & 0xf] {
            self.pc = self.pc.wrapping_add(2);
        }
    }
}

/// |`Fxbb`| Performs IO
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`fX07`| Set vX to value in delay timer     |
/// |`fX0a`| Wait for input, store key in vX    |
/// |`fX15`| Set delay timer to the value in vX |
/// |`fX18`| Set sound timer to the value in vX |
/// |`fX1e`| Add vX to I                        |
/// |`fX29`| Load sprite for character x into I |
/// |`fX33`| BCD convert X into I[0..3]         |
/// |`fX55`| DMA Stor from I to registers 0..=X |
/// |`fX65`| DMA Load from I to registers 0..=X |
impl CPU {
    /// |`Fx07`| Get the current DT, and put it in vX
    /// ```py
    /// vX = DT
    /// ```
    #[inline(always)]
    pub(super) fn load_delay_timer(&mut self, x: Reg) {
        self.v[x] = self.timers.delay();
    }
    /// |`Fx0A`| Wait for key, then vX = K
    ///
    /// Only keys pressed after this point count. [CPU::tick] finishes the wait.
    #[inline(always)]
    pub(super) fn wait_for_key(&mut self, x: Reg) {
        self.flags.lastkey = None;
        self.flags.keypause = Some(x);
    }
    /// |`Fx15`| Load vX into DT
    /// ```py
    /// DT = vX
    /// ```
    #[inline(always)]
    pub(super) fn store_delay_timer(&mut self, x: Reg) {
        self.timers.set_delay(self.v[x]);
    }
    /// |`Fx18`| Load vX into ST
    /// ```py
    /// ST = vX;
    /// ```
    #[inline(always)]
    pub(super) fn store_sound_timer(&mut self, x: Reg) {
        self.timers.set_sound(self.v[x]);
    }
    /// |`Fx1e`| Add vX to I, setting vF when I leaves the address space
    /// ```py
    /// I += vX;
    /// vF = I > 0xfff;
    /// ```
    #[inline(always)]
    pub(super) fn add_i(&mut self, x: Reg) {
        self.i = self.i.wrapping_add(self.v[x] as Adr);
        self.v[0xf] = (self.i > 0xfff).into();
    }
    /// |`Fx29`| Load sprite for character x into I
    /// ```py
    /// I = sprite(X);
    /// ```
    #[inline(always)]
    pub(super) fn load_sprite(&mut self, x: Reg) {
        self.i = FONT_ADDR + 5 * (self.v[x] & 0xf) as Adr;
    }
    /// |`Fx33`| BCD convert X into I`[0..3]`
    #[inline(always)]
    pub(super) fn bcd_convert(&mut self, x: Reg) {
        let x = self.v[x];
        self.mem.write(self.i, x / 100);
        self.mem.write(self.i.wrapping_add(1), x / 10 % 10);
        self.mem.write(self.i.wrapping_add(2), x % 10);
    }
    /// |`Fx55`| DMA Stor from I to registers 0..=X
    ///
    /// # Quirk
    /// With [Quirks::store_inc], I is left advanced by X after the transfer.
    #[inline(always)]
    pub(super) fn store_dma(&mut self, x: Reg) {
        for reg in 0..=x {
            self.mem.write(self.i.wrapping_add(reg as Adr), self.v[reg]);
        }
        if self.quirks.store_inc {
            self.i = self.i.wrapping_add(x as Adr);
        }
    }
    /// |`Fx65`| DMA Load from I to registers 0..=X
    ///
    /// # Quirk
    /// With [Quirks::load_inc], I is left advanced by X after the transfer.
    #[inline(always)]
    pub(super) fn load_dma(&mut self, x: Reg) {
        for reg in 0..=x {
            self.v[reg] = self.mem.read(self.i.wrapping_add(reg as Adr));
        }
        if self.quirks.load_inc {
            self.i = self.i.wrapping_add(x as Adr);
        }
    }
}
