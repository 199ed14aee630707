use anyhow::{anyhow, Result};
use log::info;
use sdl2::audio::{AudioQueue, AudioSpecDesired};

use chip8_vm::TIMER_FREQUENCY;

const SAMPLE_FREQUENCY: i32 = 22050;
const TONE_FREQUENCY: i32 = 960;

/// Samples per half wave of the tone.
const HALF_PERIOD: usize = (SAMPLE_FREQUENCY / TONE_FREQUENCY / 2) as usize;

/// # Beeper
/// Plays the Chip-8 beep: a mono square wave queued on an SDL2 audio device.
///
/// Each beep replaces whatever is still queued, so a new FX18 cuts the previous one short.
pub struct Beeper {
    queue: AudioQueue<i16>,
    amplitude: i16,
}

impl Beeper {
    /// Opens the default audio device.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context
    /// * `volume` loudness from 0 to 127
    pub fn new(sdl: &sdl2::Sdl, volume: u8) -> Result<Self> {
        let audio = sdl.audio().map_err(|e| anyhow!(e))?;
        let spec = AudioSpecDesired {
            freq: Some(SAMPLE_FREQUENCY),
            channels: Some(1),
            samples: Some(2048),
        };
        let queue = audio
            .open_queue::<i16, _>(None, &spec)
            .map_err(|e| anyhow!(e))?;
        queue.resume();
        info!("opened audio device at {}Hz", queue.spec().freq);

        Ok(Beeper {
            queue,
            amplitude: amplitude(volume),
        })
    }

    /// Beeps for `duration` timer ticks.
    pub fn beep(&self, duration: u8) -> Result<()> {
        self.queue.clear();
        let samples = square_wave(beep_length(duration), self.amplitude);
        self.queue.queue_audio(&samples).map_err(|e| anyhow!(e))
    }
}

fn amplitude(volume: u8) -> i16 {
    i16::from(volume.min(127)) << 8
}

/// Samples needed to sound for `duration` ticks of the sound timer.
fn beep_length(duration: u8) -> usize {
    SAMPLE_FREQUENCY as usize * usize::from(duration) / TIMER_FREQUENCY as usize
}

fn square_wave(length: usize, amplitude: i16) -> Vec<i16> {
    (0..length)
        .map(|i| {
            if (i / HALF_PERIOD) % 2 == 0 {
                amplitude
            } else {
                -amplitude
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beep_length_is_in_ticks() {
        assert_eq!(beep_length(60), SAMPLE_FREQUENCY as usize);
        assert_eq!(beep_length(0), 0);
    }

    #[test]
    fn test_square_wave_alternates() {
        let wave = square_wave(HALF_PERIOD * 3, 0x100);
        assert!(wave[..HALF_PERIOD].iter().all(|&s| s == 0x100));
        assert!(wave[HALF_PERIOD..HALF_PERIOD * 2].iter().all(|&s| s == -0x100));
        assert!(wave[HALF_PERIOD * 2..].iter().all(|&s| s == 0x100));
    }

    #[test]
    fn test_amplitude_never_overflows() {
        assert_eq!(amplitude(32), 0x2000);
        assert_eq!(amplitude(255), 0x7F00);
        assert_eq!(amplitude(0), 0);
    }
}
