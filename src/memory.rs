use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::{Chip8Error, Result};
use crate::opcode::Opcode;

/// # Memory
/// 4096 bytes of addressable memory.
///
/// ```text
/// 0x000..0x050  sprite sheet
/// 0x050..0x200  reserved
/// 0x200..0x1000 program
/// ```
///
/// Addresses wrap modulo `MEMORY_SIZE`, so no access can fall outside the array.
#[derive(Copy, Clone, Debug)]
pub struct Memory([u8; MEMORY_SIZE]);

impl Memory {
    /// Zeroed memory with the sprite sheet loaded.
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory(bytes)
    }

    pub fn read(&self, address: u16) -> u8 {
        self.0[address as usize % MEMORY_SIZE]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.0[address as usize % MEMORY_SIZE] = value;
    }

    /// Reads the big-endian opcode at `address`.
    pub fn fetch(&self, address: u16) -> Opcode {
        Opcode::from_bytes(self.read(address), self.read(address.wrapping_add(1)))
    }

    /// Copies `rom` verbatim to `PROGRAM_START`.
    /// Memory is left untouched if the rom doesn't fit.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge { size: rom.len() });
        }
        let start = PROGRAM_START as usize;
        self.0[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
