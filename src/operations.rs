use log::debug;

use crate::constants::{FLAG_REGISTER, GLYPH_SIZE};
use crate::error::Result;
use crate::keypad::Mode;
use crate::opcode::Opcode;
use crate::state::State;

/// Steps over the next instruction when `condition` holds.
fn skip_if(state: State, condition: bool) -> State {
    state.advance(if condition { 0x4 } else { 0x2 })
}

/// Writes `result` to Vx, then `flag` to VF; with x == F the flag wins.
fn set_with_flag(mut state: State, x: usize, result: u8, flag: bool) -> State {
    state.registers.v[x] = result;
    state.registers.v[FLAG_REGISTER] = u8::from(flag);
    state.advance(0x2)
}

/// clear
pub fn clr(mut state: State) -> State {
    state.screen.clear();
    state.advance(0x2)
}

/// PC = STACK.pop() + 2
pub fn rts(mut state: State) -> Result<State> {
    state.registers.ret()?;
    Ok(state)
}

/// PC = addr
pub fn jump(mut state: State, addr: u16) -> State {
    state.registers.jump(addr);
    state
}

/// STACK.push(PC); PC = addr
pub fn call(mut state: State, addr: u16) -> Result<State> {
    state.registers.call(addr)?;
    Ok(state)
}

/// if Vx == kk then pc += 2
pub fn ske(state: State, x: usize, kk: u8) -> State {
    let equal = state.registers.v[x] == kk;
    skip_if(state, equal)
}

/// if Vx != kk then pc += 2
pub fn skne(state: State, x: usize, kk: u8) -> State {
    let unequal = state.registers.v[x] != kk;
    skip_if(state, unequal)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: State, x: usize, y: usize) -> State {
    let equal = state.registers.v[x] == state.registers.v[y];
    skip_if(state, equal)
}

/// Vx = kk
pub fn load(mut state: State, x: usize, kk: u8) -> State {
    state.registers.v[x] = kk;
    state.advance(0x2)
}

/// Vx += kk
/// Overflow wraps and VF is left alone
pub fn add(mut state: State, x: usize, kk: u8) -> State {
    state.registers.v[x] = state.registers.v[x].wrapping_add(kk);
    state.advance(0x2)
}

/// Vx = Vy
pub fn mv(mut state: State, x: usize, y: usize) -> State {
    state.registers.v[x] = state.registers.v[y];
    state.advance(0x2)
}

/// Vx |= Vy
pub fn or(mut state: State, x: usize, y: usize) -> State {
    state.registers.v[x] |= state.registers.v[y];
    state.advance(0x2)
}

/// Vx &= Vy
pub fn and(mut state: State, x: usize, y: usize) -> State {
    state.registers.v[x] &= state.registers.v[y];
    state.advance(0x2)
}

/// Vx ^= Vy
pub fn xor(mut state: State, x: usize, y: usize) -> State {
    state.registers.v[x] ^= state.registers.v[y];
    state.advance(0x2)
}

/// Vx += Vy; VF = overflow
pub fn addr(state: State, x: usize, y: usize) -> State {
    let (res, over) = state.registers.v[x].overflowing_add(state.registers.v[y]);
    set_with_flag(state, x, res, over)
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: State, x: usize, y: usize) -> State {
    let (res, under) = state.registers.v[x].overflowing_sub(state.registers.v[y]);
    set_with_flag(state, x, res, !under)
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(state: State, x: usize) -> State {
    let vx = state.registers.v[x];
    set_with_flag(state, x, vx >> 1, vx & 0x1 == 0x1)
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: State, x: usize, y: usize) -> State {
    let (res, under) = state.registers.v[y].overflowing_sub(state.registers.v[x]);
    set_with_flag(state, x, res, !under)
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(state: State, x: usize) -> State {
    let vx = state.registers.v[x];
    set_with_flag(state, x, vx << 1, vx & 0x80 == 0x80)
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: State, x: usize, y: usize) -> State {
    let unequal = state.registers.v[x] != state.registers.v[y];
    skip_if(state, unequal)
}

/// I = addr
pub fn loadi(mut state: State, addr: u16) -> State {
    state.registers.i = addr;
    state.advance(0x2)
}

/// PC = V0 + addr
pub fn jumpi(mut state: State, addr: u16) -> State {
    let target = u16::from(state.registers.v[0x0]) + addr;
    state.registers.jump(target);
    state
}

/// Vx = rand_byte & kk
pub fn random(mut state: State, x: usize, kk: u8) -> State {
    let rand_byte: u8 = rand::random();
    state.registers.v[x] = rand_byte & kk;
    state.advance(0x2)
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in memory I..I+n onto the screen at Vx, Vy with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(mut state: State, x: usize, y: usize, n: u8) -> State {
    let left = state.registers.v[x] as usize;
    let top = state.registers.v[y] as usize;
    let mut collision = false;

    for row in 0..u16::from(n) {
        let byte = state.memory.read(state.registers.i.wrapping_add(row));
        collision |= state.screen.draw_row(left, top + row as usize, byte);
    }

    state.screen.redraw = true;
    state.registers.v[FLAG_REGISTER] = u8::from(collision);
    state.advance(0x2)
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: State, x: usize) -> State {
    let pressed = state.keypad.is_pressed(state.registers.v[x]);
    skip_if(state, pressed)
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: State, x: usize) -> State {
    let pressed = state.keypad.is_pressed(state.registers.v[x]);
    skip_if(state, !pressed)
}

/// Vx = DT
pub fn moved(mut state: State, x: usize) -> State {
    state.registers.v[x] = state.timers.delay;
    state.advance(0x2)
}

/// Vx = key
/// Takes the lowest key already held down; otherwise stalls until `Chip8::set_key` sees a press
pub fn keyd(mut state: State, x: usize) -> State {
    match state.keypad.first_pressed() {
        Some(key) => {
            state.registers.v[x] = key;
            state.advance(0x2)
        }
        None => {
            debug!("waiting for a key press into V{:X}", x);
            state.mode = Mode::AwaitingKey { register: x };
            state
        }
    }
}

/// DT = Vx
pub fn loads(mut state: State, x: usize) -> State {
    state.timers.delay = state.registers.v[x];
    state.advance(0x2)
}

/// ST = Vx
/// Also asks the host to beep for Vx ticks
pub fn ld(mut state: State, x: usize) -> State {
    let duration = state.registers.v[x];
    state.timers.sound = duration;
    state.sound.trigger(duration);
    state.advance(0x2)
}

/// I += Vx
pub fn addi(mut state: State, x: usize) -> State {
    state.registers.i = state.registers.i.wrapping_add(u16::from(state.registers.v[x]));
    state.advance(0x2)
}

/// I = Vx * 5
/// Set I to the memory address of the sprite for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(mut state: State, x: usize) -> State {
    state.registers.i = u16::from(state.registers.v[x] & 0xF) * GLYPH_SIZE;
    state.advance(0x2)
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(mut state: State, x: usize) -> State {
    let vx = state.registers.v[x];
    let i = state.registers.i;
    for (offset, digit) in [vx / 100, vx / 10 % 10, vx % 10].iter().enumerate() {
        state.memory.write(i.wrapping_add(offset as u16), *digit);
    }
    state.advance(0x2)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(mut state: State, x: usize) -> State {
    let i = state.registers.i;
    for register in 0..=x {
        state
            .memory
            .write(i.wrapping_add(register as u16), state.registers.v[register]);
    }
    state.advance(0x2)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(mut state: State, x: usize) -> State {
    let i = state.registers.i;
    for register in 0..=x {
        state.registers.v[register] = state.memory.read(i.wrapping_add(register as u16));
    }
    state.advance(0x2)
}

/// Anything undefined is skipped over
pub fn nop(state: State, op: Opcode) -> State {
    debug!("skipping unknown opcode {} at {:#05X}", op, state.registers.pc);
    state.advance(0x2)
}
