use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_WIDTH};

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[bool; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Screen
/// 64x32 monochrome pixels plus a flag telling the host the frame changed.
///
/// Pixels are only ever toggled (XOR) or cleared; the redraw flag stays raised
/// until the host acknowledges it.
#[derive(Copy, Clone, Debug)]
pub struct Screen {
    pub frame_buffer: FrameBuffer,
    pub redraw: bool,
}

impl Screen {
    /// A blank screen that still needs drawing once.
    pub fn new() -> Self {
        Screen {
            frame_buffer: [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            redraw: true,
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [[false; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.redraw = true;
    }

    /// Whether the pixel at (x, y) is lit; anything off screen is dark.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// XORs one 8-pixel sprite row onto the screen at (x, y), wrapping around both edges.
    /// Returns whether any lit pixel was turned off.
    pub fn draw_row(&mut self, x: usize, y: usize, row: u8) -> bool {
        let y = y % DISPLAY_HEIGHT;
        let mut collision = false;
        for bit in 0..SPRITE_WIDTH {
            if (row >> (SPRITE_WIDTH - 1 - bit)) & 0x1 == 0 {
                continue;
            }
            let pixel = &mut self.frame_buffer[y][(x + bit) % DISPLAY_WIDTH];
            collision |= *pixel;
            *pixel ^= true;
        }
        self.redraw = true;
        collision
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}
