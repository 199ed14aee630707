//! A CHIP-8 interpreter core.
//!
//! [`Chip8`] owns the whole machine. A host drives it by calling
//! [`Chip8::cycle`] at whatever rate it likes, [`Chip8::tick_timers`] at
//! [`TIMER_FREQUENCY`], and forwarding key events through [`Chip8::set_key`].
//! Rendering and audio are left to the host: it polls [`Chip8::get_frame`] and
//! [`Chip8::sound_pending`] and acknowledges each once handled.

pub use chip8::Chip8;
pub use constants::TIMER_FREQUENCY;
pub use error::{Chip8Error, Result};
pub use screen::FrameBuffer;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod registers;
mod screen;
mod state;
mod timers;
