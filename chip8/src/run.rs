use std::fs;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use log::{error, info};
use sdl2::event::Event;

use chip8_vm::Chip8;
use display::Display;

use crate::audio::Beeper;
use crate::config::{Settings, Speed};
use crate::keymap::{hotkey, keymap, Hotkey};
use crate::pacer::Pacer;

/// How long to sleep when no cycle is due yet.
const IDLE: Duration = Duration::from_millis(1);

pub fn run(settings: Settings) -> Result<()> {
    let mut chip8: Chip8 = Chip8::new();
    chip8.initialize();

    // Load ROM
    let rom = fs::read(&settings.rom)
        .with_context(|| format!("unable to read ROM {}", settings.rom.display()))?;
    chip8
        .load_rom(&rom)
        .with_context(|| format!("unable to load ROM {}", settings.rom.display()))?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, settings.scale)?;
    let beeper = Beeper::new(&sdl, settings.volume)?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // Set initial timing
    let mut speed = Speed::new(settings.speed);
    let mut pacer = Pacer::new(speed);
    let mut last_cycle = Instant::now();

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => match (keymap(key), hotkey(key)) {
                    (Some(kc), _) => chip8.key_press(kc)?,
                    (_, Some(Hotkey::Quit)) => break 'event,
                    (_, Some(Hotkey::Slower)) => {
                        speed = speed.slower();
                        info!("speed {}", speed.level());
                    }
                    (_, Some(Hotkey::Faster)) => {
                        speed = speed.faster();
                        info!("speed {}", speed.level());
                    }
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match keymap(key) {
                    Some(kc) => chip8.key_release(kc)?,
                    None => continue,
                },
                _ => continue,
            };
        }
        pacer.set_speed(speed);

        // Update state
        let now = Instant::now();
        let (cycles, ticks) = pacer.advance(now - last_cycle);
        last_cycle = now;

        for _ in 0..ticks {
            chip8.tick_timers();
        }
        for _ in 0..cycles {
            if let Err(e) = chip8.cycle() {
                error!("halting: {}", e);
                return Err(e.into());
            }
        }

        // If the draw flag is set, render the current frame and unset it
        if let Some(frame) = chip8.get_frame() {
            display.render(&frame)?;
            chip8.acknowledge_redraw();
        }

        if chip8.sound_pending() {
            beeper.beep(chip8.sound_duration())?;
            chip8.acknowledge_sound();
        }

        if cycles == 0 {
            std::thread::sleep(IDLE);
        }
    }

    info!("window closed, exiting");
    Ok(())
}
