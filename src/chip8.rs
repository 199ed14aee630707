use log::{debug, info, warn};

use crate::constants::KEY_COUNT;
use crate::error::{Chip8Error, Result};
use crate::instruction::Instruction;
use crate::keypad::Mode;
use crate::opcode::Opcode;
use crate::screen::FrameBuffer;
use crate::state::State;

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks the current `state` and supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
/// - noticing when it wants to beep
///
/// Nothing here keeps time; the host decides how often to `cycle` and must
/// `tick_timers` at `TIMER_FREQUENCY`.
#[derive(Debug)]
pub struct Chip8 {
    state: State,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
        }
    }

    /// Resets everything: memory, registers, stack, screen, timers and keys.
    /// The sprite sheet is reloaded and the PC points back at the start of the program.
    pub fn initialize(&mut self) {
        self.state = State::new();
    }

    /// Copies a rom into memory at the start of the program area.
    ///
    /// # Arguments
    /// * `rom` the raw bytes of a Chip-8 program
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.state.memory.load_rom(rom)?;
        info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Advances the CPU by a single cycle
    /// - does nothing while awaiting a keypress
    /// - otherwise gets, decodes and executes the next opcode
    ///
    /// A stack fault leaves the machine exactly as it was before the cycle.
    pub fn cycle(&mut self) -> Result<()> {
        if let Mode::AwaitingKey { .. } = self.state.mode {
            return Ok(());
        }
        let op = self.get_op();
        match Instruction::from(op).execute(&self.state) {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(e) => {
                warn!("opcode {} faulted: {}", op, e);
                Err(e)
            }
        }
    }

    /// Decrements both timers towards zero.
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
    }

    /// Set the pressed status of a key
    ///
    /// A press while the CPU is awaiting a key completes that FX0A: the key is
    /// stored in its register and execution resumes at the next instruction.
    ///
    /// # Arguments
    /// * `key` the keypad index 0..F
    /// * `pressed` whether the key went down or up
    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        if key as usize >= KEY_COUNT {
            warn!("ignoring key {:#X}", key);
            return Err(Chip8Error::InvalidKey(key));
        }
        self.state.keypad.set(key, pressed);

        if let (Mode::AwaitingKey { register }, true) = (self.state.mode, pressed) {
            debug!("key {:X} resumes execution into V{:X}", key, register);
            self.state.registers.v[register] = key;
            self.state.mode = Mode::Running;
            self.state.registers.step(0x2);
        }
        Ok(())
    }

    pub fn key_press(&mut self, key: u8) -> Result<()> {
        self.set_key(key, true)
    }

    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.set_key(key, false)
    }

    /// Whether execution is stalled on FX0A.
    pub fn is_awaiting_key(&self) -> bool {
        self.state.mode != Mode::Running
    }

    /// Whether the pixel at (x, y) is lit; coordinates off screen are never lit.
    pub fn is_pixel(&self, x: usize, y: usize) -> bool {
        self.state.screen.pixel(x, y)
    }

    pub fn needs_redraw(&self) -> bool {
        self.state.screen.redraw
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&self) -> Option<FrameBuffer> {
        if self.state.screen.redraw {
            Some(self.state.screen.frame_buffer)
        } else {
            None
        }
    }

    /// Call once the current frame has been rendered.
    pub fn acknowledge_redraw(&mut self) {
        self.state.screen.redraw = false;
    }

    pub fn sound_pending(&self) -> bool {
        self.state.sound.pending
    }

    /// How many timer ticks the last requested beep should last.
    pub fn sound_duration(&self) -> u8 {
        self.state.sound.duration
    }

    /// Call once the pending beep has been handed to the audio device.
    pub fn acknowledge_sound(&mut self) {
        self.state.sound.acknowledge();
    }

    /// Gets the opcode currently pointed at by the pc.
    fn get_op(&self) -> Opcode {
        self.state.memory.fetch(self.state.registers.pc)
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_ROM_SIZE, STACK_SIZE};

    fn with_rom(rom: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::new();
        chip8.load_rom(rom).unwrap();
        chip8
    }

    #[test]
    fn test_chip8_gets_op() {
        let chip8 = with_rom(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op(), Opcode(0xAABB));
    }

    #[test]
    fn test_initialize_resets_state() {
        let mut chip8 = with_rom(&[0x61, 0x22, 0xF1, 0x15]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        chip8.key_press(0x3).unwrap();
        chip8.acknowledge_redraw();

        chip8.initialize();
        assert_eq!(chip8.state.registers.pc, 0x200);
        assert_eq!(chip8.state.registers.v, [0; 16]);
        assert_eq!(chip8.state.timers.delay, 0);
        assert_eq!(chip8.state.memory.read(0x200), 0x0);
        assert_eq!(chip8.state.memory.read(0x000), 0xF0);
        assert!(!chip8.state.keypad.is_pressed(0x3));
        assert!(chip8.needs_redraw());
    }

    #[test]
    fn test_rejects_oversized_rom() {
        let mut chip8 = Chip8::new();
        let rom = vec![0x0; MAX_ROM_SIZE + 1];
        assert_eq!(
            chip8.load_rom(&rom),
            Err(Chip8Error::RomTooLarge { size: MAX_ROM_SIZE + 1 })
        );
    }

    #[test]
    fn test_cycles_while_no_register_needs_key() {
        // cls
        let mut chip8 = with_rom(&[0x00, 0xE0]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.pc, 0x202);
    }

    #[test]
    fn test_unknown_opcode_is_skipped() {
        let mut chip8 = with_rom(&[0x01, 0x23]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.pc, 0x202);
    }

    #[test]
    fn test_set_const_then_skip_equal_registers() {
        // V1 = 0x42; V2 = 0x42; skip if V1 == V2
        let mut chip8 = with_rom(&[0x61, 0x42, 0x62, 0x42, 0x51, 0x20]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.v[0x1], 0x42);
        assert_eq!(chip8.state.registers.pc, 0x202);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.pc, 0x208);
    }

    #[test]
    fn test_call_and_return() {
        let mut rom = vec![0x0; 0x10];
        // 0x200: call 0x20A
        rom[0x0..0x2].copy_from_slice(&[0x22, 0x0A]);
        // 0x20A: ret
        rom[0xA..0xC].copy_from_slice(&[0x00, 0xEE]);
        let mut chip8 = with_rom(&rom);

        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.pc, 0x20A);
        assert_eq!(chip8.state.registers.sp, 1);
        assert_eq!(chip8.state.registers.stack[0], 0x200);

        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.pc, 0x202);
        assert_eq!(chip8.state.registers.sp, 0);
    }

    #[test]
    fn test_recursion_faults_without_changing_state() {
        // 0x200: call 0x200
        let mut chip8 = with_rom(&[0x22, 0x00]);
        for _ in 0..STACK_SIZE {
            chip8.cycle().unwrap();
        }
        assert_eq!(
            chip8.cycle(),
            Err(Chip8Error::StackOverflow { pc: 0x200 })
        );
        assert_eq!(chip8.state.registers.sp as usize, STACK_SIZE);
        assert_eq!(chip8.state.registers.pc, 0x200);
    }

    #[test]
    fn test_return_without_call_faults() {
        let mut chip8 = with_rom(&[0x00, 0xEE]);
        assert_eq!(chip8.cycle(), Err(Chip8Error::StackUnderflow { pc: 0x200 }));
        assert_eq!(chip8.state.registers.pc, 0x200);
    }

    #[test]
    fn test_waits_for_key() {
        // V5 = key; V6 = 0x1
        let mut chip8 = with_rom(&[0xF5, 0x0A, 0x66, 0x01]);
        for _ in 0..3 {
            chip8.cycle().unwrap();
            assert!(chip8.is_awaiting_key());
            assert_eq!(chip8.state.registers.pc, 0x200);
        }
        assert_eq!(chip8.state.registers.v[0x6], 0x0);

        chip8.key_press(0xC).unwrap();
        assert!(!chip8.is_awaiting_key());
        assert_eq!(chip8.state.registers.v[0x5], 0xC);
        assert_eq!(chip8.state.registers.pc, 0x202);

        // a second press must not advance again
        chip8.key_release(0xC).unwrap();
        chip8.key_press(0xD).unwrap();
        assert_eq!(chip8.state.registers.pc, 0x202);

        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.v[0x6], 0x1);
        assert_eq!(chip8.state.registers.pc, 0x204);
    }

    #[test]
    fn test_release_doesnt_resume() {
        let mut chip8 = with_rom(&[0xF5, 0x0A]);
        chip8.cycle().unwrap();
        chip8.key_release(0x2).unwrap();
        assert!(chip8.is_awaiting_key());
        assert_eq!(chip8.state.registers.pc, 0x200);
    }

    #[test]
    fn test_captures_key_presses() {
        let mut chip8 = Chip8::new();
        chip8.state.mode = Mode::AwaitingKey { register: 0x1 };
        chip8.key_press(0xE).unwrap();
        assert_eq!(chip8.state.mode, Mode::Running);
        assert_eq!(chip8.state.registers.v[0x1], 0xE);
    }

    #[test]
    fn test_rejects_invalid_keys() {
        let mut chip8 = with_rom(&[0xF5, 0x0A]);
        chip8.cycle().unwrap();
        let keypad = chip8.state.keypad;

        assert_eq!(chip8.key_press(0x10), Err(Chip8Error::InvalidKey(0x10)));
        assert_eq!(chip8.key_release(0xFF), Err(Chip8Error::InvalidKey(0xFF)));
        assert_eq!(chip8.state.keypad, keypad);
        assert_eq!(chip8.state.mode, Mode::AwaitingKey { register: 0x5 });
        assert_eq!(chip8.state.registers.v[0x5], 0x0);
        assert_eq!(chip8.state.registers.pc, 0x200);
    }

    #[test]
    fn test_doesnt_cycle_while_register_needs_key() {
        let mut chip8 = with_rom(&[0x00, 0xE0]);
        chip8.state.mode = Mode::AwaitingKey { register: 0x1 };
        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.pc, 0x200);
    }

    #[test]
    fn test_timers_tick_down_and_stop() {
        // V1 = 60; DT = V1
        let mut chip8 = with_rom(&[0x61, 0x3C, 0xF1, 0x15]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        for _ in 0..60 {
            chip8.tick_timers();
        }
        assert_eq!(chip8.state.timers.delay, 0);
        chip8.tick_timers();
        assert_eq!(chip8.state.timers.delay, 0);
    }

    #[test]
    fn test_sound_signal() {
        // V1 = 0x1E; ST = V1
        let mut chip8 = with_rom(&[0x61, 0x1E, 0xF1, 0x18]);
        chip8.cycle().unwrap();
        assert!(!chip8.sound_pending());
        chip8.cycle().unwrap();
        assert!(chip8.sound_pending());
        assert_eq!(chip8.sound_duration(), 0x1E);
        chip8.acknowledge_sound();
        assert!(!chip8.sound_pending());
    }

    #[test]
    fn test_frame_until_acknowledged() {
        let mut chip8 = Chip8::new();
        assert!(chip8.get_frame().is_some());
        chip8.acknowledge_redraw();
        assert!(chip8.get_frame().is_none());
    }

    #[test]
    fn test_clear_then_draw_then_redraw() {
        let mut rom = vec![
            0x00, 0xE0, // cls
            0xA2, 0x0A, // I = 0x20A
            0xD0, 0x12, // draw V0, V1, 2 rows
            0xD0, 0x12, // draw again
            0x00, 0x00, // padding
            0b1010_0000,
            0b0101_0000,
        ];
        rom.resize(0x10, 0x0);
        let mut chip8 = with_rom(&rom);
        chip8.cycle().unwrap();
        chip8.acknowledge_redraw();
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();

        assert!(chip8.needs_redraw());
        assert!(chip8.is_pixel(0, 0));
        assert!(!chip8.is_pixel(1, 0));
        assert!(chip8.is_pixel(2, 0));
        assert!(!chip8.is_pixel(0, 1));
        assert!(chip8.is_pixel(1, 1));
        assert!(chip8.is_pixel(3, 1));
        assert_eq!(chip8.state.registers.v[0xF], 0x0);

        chip8.cycle().unwrap();
        assert_eq!(chip8.state.registers.v[0xF], 0x1);
        assert!((0..8).all(|x| !chip8.is_pixel(x, 0) && !chip8.is_pixel(x, 1)));
    }

    #[test]
    fn test_is_pixel_off_screen() {
        let chip8 = Chip8::new();
        assert!(!chip8.is_pixel(64, 0));
        assert!(!chip8.is_pixel(0, 32));
    }
}
