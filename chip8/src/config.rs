use std::path::PathBuf;

use clap::Parser;

pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 10;
pub const DEFAULT_SPEED: u8 = 6;

/// Cycles per millisecond at the slowest speed; each speed step doubles it.
const MIN_CYCLES_PER_MS: f64 = 0.015625;

pub const DEFAULT_SCALE: u32 = 10;
pub const DEFAULT_VOLUME: u8 = 32;

/// Runs a Chip-8 ROM in an SDL2 window.
///
/// Keys 1-4, Q-R, A-F and Z-V form the keypad. `-` and `=` change speed, Escape quits.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Settings {
    /// Path to the ROM file to run
    pub rom: PathBuf,

    /// Emulation speed from 1 to 10; 6 runs 500 instructions per second
    #[arg(short, long, default_value_t = DEFAULT_SPEED,
          value_parser = clap::value_parser!(u8).range(1..=10))]
    pub speed: u8,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = DEFAULT_SCALE,
          value_parser = clap::value_parser!(u32).range(1..=40))]
    pub scale: u32,

    /// Beep volume from 0 to 127
    #[arg(long, default_value_t = DEFAULT_VOLUME,
          value_parser = clap::value_parser!(u8).range(0..=127))]
    pub volume: u8,
}

/// An emulation speed level, clamped to `MIN_SPEED..=MAX_SPEED`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Speed(u8);

impl Speed {
    pub fn new(level: u8) -> Self {
        Speed(level.max(MIN_SPEED).min(MAX_SPEED))
    }

    pub fn level(self) -> u8 {
        self.0
    }

    pub fn faster(self) -> Self {
        Speed::new(self.0 + 1)
    }

    pub fn slower(self) -> Self {
        Speed::new(self.0 - 1)
    }

    pub fn cycles_per_ms(self) -> f64 {
        MIN_CYCLES_PER_MS * f64::from(1u32 << (self.0 - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_speed_is_500hz() {
        assert_eq!(Speed::new(DEFAULT_SPEED).cycles_per_ms(), 0.5);
    }

    #[test]
    fn test_speed_doubles_per_level() {
        assert_eq!(Speed::new(1).cycles_per_ms(), 0.015625);
        assert_eq!(Speed::new(10).cycles_per_ms(), 8.0);
    }

    #[test]
    fn test_speed_is_clamped() {
        assert_eq!(Speed::new(0), Speed::new(MIN_SPEED));
        assert_eq!(Speed::new(MAX_SPEED).faster(), Speed::new(MAX_SPEED));
        assert_eq!(Speed::new(MIN_SPEED).slower(), Speed::new(MIN_SPEED));
        assert_eq!(Speed::new(4).faster().level(), 5);
    }

    #[test]
    fn test_parses_rom_and_defaults() {
        let settings = Settings::try_parse_from(&["chip8", "pong.ch8"]).unwrap();
        assert_eq!(settings.rom, PathBuf::from("pong.ch8"));
        assert_eq!(settings.speed, DEFAULT_SPEED);
        assert_eq!(settings.scale, DEFAULT_SCALE);
        assert_eq!(settings.volume, DEFAULT_VOLUME);
    }

    #[test]
    fn test_requires_rom() {
        assert!(Settings::try_parse_from(&["chip8"]).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_speed() {
        assert!(Settings::try_parse_from(&["chip8", "--speed", "11", "pong.ch8"]).is_err());
        let settings = Settings::try_parse_from(&["chip8", "-s", "3", "pong.ch8"]).unwrap();
        assert_eq!(settings.speed, 3);
    }

    #[test]
    fn test_volume_fits_a_sample() {
        assert!(Settings::try_parse_from(&["chip8", "--volume", "128", "pong.ch8"]).is_err());
        let settings =
            Settings::try_parse_from(&["chip8", "--volume", "127", "pong.ch8"]).unwrap();
        assert_eq!(settings.volume, 127);
    }
}
