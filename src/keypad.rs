use crate::constants::KEY_COUNT;

/// # Keypad
/// Pressed status of the sixteen hexadecimal keys 0..F.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad([bool; KEY_COUNT]);

impl Keypad {
    /// Keys off the keypad are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(state) = self.0.get_mut(key as usize) {
            *state = pressed;
        }
    }

    /// Keys are looked up from register values, so only the low nibble counts.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.0[(key & 0xF) as usize]
    }

    /// The lowest pressed key, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        self.0.iter().position(|&pressed| pressed).map(|key| key as u8)
    }
}

/// Whether the CPU is executing or stalled on FX0A.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Running,
    /// The next key press is written to V[register] and execution resumes.
    AwaitingKey { register: usize },
}
