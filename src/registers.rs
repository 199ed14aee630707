use crate::constants::{ADDRESS_MASK, PROGRAM_START, REGISTER_COUNT, STACK_SIZE};
use crate::error::{Chip8Error, Result};

/// # Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter
/// - (sp) an 8-bit stack pointer into a 16-entry stack of return addresses
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_SIZE],
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_SIZE],
        }
    }

    /// Moves the program counter forward by `bytes`, wrapping within the address space.
    pub fn step(&mut self, bytes: u16) {
        self.jump(self.pc.wrapping_add(bytes));
    }

    pub fn jump(&mut self, address: u16) {
        self.pc = address & ADDRESS_MASK;
    }

    /// Saves the current PC and jumps to `address`.
    pub fn call(&mut self, address: u16) -> Result<()> {
        let depth = self.sp as usize;
        if depth == STACK_SIZE {
            return Err(Chip8Error::StackOverflow { pc: self.pc });
        }
        self.stack[depth] = self.pc;
        self.sp += 1;
        self.jump(address);
        Ok(())
    }

    /// Pops the most recent call site and resumes at the instruction after it.
    pub fn ret(&mut self) -> Result<()> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        let call_site = self.stack[self.sp as usize];
        self.jump(call_site);
        self.step(2);
        Ok(())
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
