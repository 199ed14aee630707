use thiserror::Error;

use crate::constants::{MAX_ROM_SIZE, STACK_SIZE};

/// Everything the interpreter can refuse to do.
///
/// Undefined opcodes are not errors; they execute as no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("ROM is too large ({size} bytes), at most {} bytes fit in memory", MAX_ROM_SIZE)]
    RomTooLarge { size: usize },

    #[error("stack overflow: call at {pc:#05X} exceeds {} nested subroutines", STACK_SIZE)]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("key {0:#X} is not on the 16-key keypad")]
    InvalidKey(u8),
}

pub type Result<T> = std::result::Result<T, Chip8Error>;
