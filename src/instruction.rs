use crate::error::Result;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A decoded opcode with its operands pulled out.
///
/// `x` and `y` index registers, `kk` is an immediate byte, `n` a nibble and
/// `addr` a 12-bit address.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1nnn
    Jump { addr: u16 },
    /// 2nnn
    Call { addr: u16 },
    /// 3xkk
    SkipEq { x: usize, kk: u8 },
    /// 4xkk
    SkipNe { x: usize, kk: u8 },
    /// 5xy0
    SkipEqReg { x: usize, y: usize },
    /// 6xkk
    Load { x: usize, kk: u8 },
    /// 7xkk
    Add { x: usize, kk: u8 },
    /// 8xy0
    Move { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    AddReg { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6
    ShiftRight { x: usize },
    /// 8xy7
    SubN { x: usize, y: usize },
    /// 8xyE
    ShiftLeft { x: usize },
    /// 9xy0
    SkipNeReg { x: usize, y: usize },
    /// Annn
    LoadIndex { addr: u16 },
    /// Bnnn
    JumpOffset { addr: u16 },
    /// Cxkk
    Random { x: usize, kk: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E
    SkipPressed { x: usize },
    /// ExA1
    SkipReleased { x: usize },
    /// Fx07
    GetDelay { x: usize },
    /// Fx0A
    WaitKey { x: usize },
    /// Fx15
    SetDelay { x: usize },
    /// Fx18
    SetSound { x: usize },
    /// Fx1E
    AddIndex { x: usize },
    /// Fx29
    Glyph { x: usize },
    /// Fx33
    Bcd { x: usize },
    /// Fx55
    Store { x: usize },
    /// Fx65
    Read { x: usize },
    /// Anything else; executes as a no-op
    Unknown(Opcode),
}

impl From<Opcode> for Instruction {
    /// Selects the correct Instruction for a given Opcode
    fn from(op: Opcode) -> Self {
        let x = op.x() as usize;
        let y = op.y() as usize;
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, ..) => Instruction::Jump { addr: op.addr() },
            (0x2, ..) => Instruction::Call { addr: op.addr() },
            (0x3, ..) => Instruction::SkipEq { x, kk: op.kk() },
            (0x4, ..) => Instruction::SkipNe { x, kk: op.kk() },
            (0x5, .., 0x0) => Instruction::SkipEqReg { x, y },
            (0x6, ..) => Instruction::Load { x, kk: op.kk() },
            (0x7, ..) => Instruction::Add { x, kk: op.kk() },
            (0x8, .., 0x0) => Instruction::Move { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddReg { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::ShiftRight { x },
            (0x8, .., 0x7) => Instruction::SubN { x, y },
            (0x8, .., 0xE) => Instruction::ShiftLeft { x },
            (0x9, .., 0x0) => Instruction::SkipNeReg { x, y },
            (0xA, ..) => Instruction::LoadIndex { addr: op.addr() },
            (0xB, ..) => Instruction::JumpOffset { addr: op.addr() },
            (0xC, ..) => Instruction::Random { x, kk: op.kk() },
            (0xD, ..) => Instruction::Draw { x, y, n: op.n() },
            (0xE, _, 0x9, 0xE) => Instruction::SkipPressed { x },
            (0xE, _, 0xA, 0x1) => Instruction::SkipReleased { x },
            (0xF, _, 0x0, 0x7) => Instruction::GetDelay { x },
            (0xF, _, 0x0, 0xA) => Instruction::WaitKey { x },
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, _, 0x1, 0x8) => Instruction::SetSound { x },
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex { x },
            (0xF, _, 0x2, 0x9) => Instruction::Glyph { x },
            (0xF, _, 0x3, 0x3) => Instruction::Bcd { x },
            (0xF, _, 0x5, 0x5) => Instruction::Store { x },
            (0xF, _, 0x6, 0x5) => Instruction::Read { x },
            _ => Instruction::Unknown(op),
        }
    }
}

impl Instruction {
    /// Runs the instruction against a copy of `state` and returns the result.
    ///
    /// On error `state` is untouched and nothing else has happened.
    pub fn execute(self, state: &State) -> Result<State> {
        let state = *state;
        let next = match self {
            Instruction::Clear => clr(state),
            Instruction::Return => rts(state)?,
            Instruction::Jump { addr } => jump(state, addr),
            Instruction::Call { addr } => call(state, addr)?,
            Instruction::SkipEq { x, kk } => ske(state, x, kk),
            Instruction::SkipNe { x, kk } => skne(state, x, kk),
            Instruction::SkipEqReg { x, y } => skre(state, x, y),
            Instruction::Load { x, kk } => load(state, x, kk),
            Instruction::Add { x, kk } => add(state, x, kk),
            Instruction::Move { x, y } => mv(state, x, y),
            Instruction::Or { x, y } => or(state, x, y),
            Instruction::And { x, y } => and(state, x, y),
            Instruction::Xor { x, y } => xor(state, x, y),
            Instruction::AddReg { x, y } => addr(state, x, y),
            Instruction::Sub { x, y } => sub(state, x, y),
            Instruction::ShiftRight { x } => shr(state, x),
            Instruction::SubN { x, y } => subn(state, x, y),
            Instruction::ShiftLeft { x } => shl(state, x),
            Instruction::SkipNeReg { x, y } => skrne(state, x, y),
            Instruction::LoadIndex { addr } => loadi(state, addr),
            Instruction::JumpOffset { addr } => jumpi(state, addr),
            Instruction::Random { x, kk } => random(state, x, kk),
            Instruction::Draw { x, y, n } => draw(state, x, y, n),
            Instruction::SkipPressed { x } => skpr(state, x),
            Instruction::SkipReleased { x } => skup(state, x),
            Instruction::GetDelay { x } => moved(state, x),
            Instruction::WaitKey { x } => keyd(state, x),
            Instruction::SetDelay { x } => loads(state, x),
            Instruction::SetSound { x } => ld(state, x),
            Instruction::AddIndex { x } => addi(state, x),
            Instruction::Glyph { x } => ldspr(state, x),
            Instruction::Bcd { x } => bcd(state, x),
            Instruction::Store { x } => stor(state, x),
            Instruction::Read { x } => read(state, x),
            Instruction::Unknown(op) => nop(state, op),
        };
        Ok(next)
    }
}
