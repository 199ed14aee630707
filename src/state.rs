use crate::keypad::{Keypad, Mode};
use crate::memory::Memory;
use crate::registers::Registers;
use crate::screen::Screen;
use crate::timers::{Sound, Timers};

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// - `registers`: V0..VF, I, the program counter and the call stack
/// - `timers`: the delay and sound timers
/// - `mode`: whether execution is stalled waiting on a key
///
/// ## Memory
/// - 4096 bytes of addressable memory with the sprite sheet at the bottom
/// - a 64x32 screen
///
/// ## Input
/// - the pressed status of keys 0..F
///
/// ## Output
/// - the screen's redraw flag and the pending `sound` both wait on the host
///
/// Instructions execute against a copy of the state, so a faulting instruction
/// never leaves a half-applied state behind.
#[derive(Copy, Clone, Debug)]
pub struct State {
    pub registers: Registers,
    pub memory: Memory,
    pub screen: Screen,
    pub timers: Timers,
    pub sound: Sound,
    pub keypad: Keypad,
    pub mode: Mode,
}

impl State {
    pub fn new() -> Self {
        State {
            registers: Registers::new(),
            memory: Memory::new(),
            screen: Screen::new(),
            timers: Timers::default(),
            sound: Sound::default(),
            keypad: Keypad::default(),
            mode: Mode::Running,
        }
    }

    /// Shorthand for the common case of finishing an instruction by stepping the PC.
    pub fn advance(mut self, bytes: u16) -> Self {
        self.registers.step(bytes);
        self
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
