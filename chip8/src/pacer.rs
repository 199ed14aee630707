use std::time::Duration;

use chip8_vm::TIMER_FREQUENCY;

use crate::config::Speed;

/// Time between two timer ticks.
const TIMER_PERIOD: Duration = Duration::from_nanos(1_000_000_000 / TIMER_FREQUENCY as u64);

/// Elapsed time beyond this is dropped rather than caught up on, e.g. after the window was dragged.
const MAX_CATCH_UP: Duration = Duration::from_millis(250);

/// # Pacer
/// Turns wall-clock time into work for the Chip-8:
/// - CPU cycles, at a rate set by the current `Speed`
/// - timer ticks, at a steady 60Hz regardless of speed
///
/// Fractions of a cycle or tick carry over to the next call so nothing drifts.
pub struct Pacer {
    cycles_per_ms: f64,
    owed_cycles: f64,
    since_tick: Duration,
}

impl Pacer {
    pub fn new(speed: Speed) -> Self {
        Pacer {
            cycles_per_ms: speed.cycles_per_ms(),
            owed_cycles: 0.0,
            since_tick: Duration::from_secs(0),
        }
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.cycles_per_ms = speed.cycles_per_ms();
    }

    /// Accounts for `elapsed` time and returns (cycles, timer ticks) now due.
    pub fn advance(&mut self, elapsed: Duration) -> (u32, u32) {
        let elapsed = elapsed.min(MAX_CATCH_UP);

        let elapsed_ms = elapsed.as_nanos() as f64 / 1_000_000.0;
        self.owed_cycles += elapsed_ms * self.cycles_per_ms;
        let cycles = self.owed_cycles.floor();
        self.owed_cycles -= cycles;

        self.since_tick += elapsed;
        let mut ticks = 0;
        while self.since_tick >= TIMER_PERIOD {
            self.since_tick -= TIMER_PERIOD;
            ticks += 1;
        }

        (cycles as u32, ticks)
    }
}
