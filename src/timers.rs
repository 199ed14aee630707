/// # Timers
/// Two 8-bit counters that count down to zero, once per tick.
/// The host is expected to tick them at `TIMER_FREQUENCY`, independently of the CPU.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }
}

/// A request for the host to beep, raised by FX18.
///
/// `duration` is the value FX18 loaded into the sound timer, i.e. the beep length in ticks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Sound {
    pub pending: bool,
    pub duration: u8,
}

impl Sound {
    pub fn trigger(&mut self, duration: u8) {
        self.pending = true;
        self.duration = duration;
    }

    pub fn acknowledge(&mut self) {
        self.pending = false;
    }
}
