use crate::bits::{word, OpcodeFields};
use crate::error::DecodeError;
use crate::types::Instruction;

/// Decodes one instruction word.
///
/// Decoding is strict: `5XYn`/`9XYn` with a non-zero `n`, `0NNN` machine
/// routines other than `00E0`/`00EE`, and unassigned `EXNN` words are
/// reported as unknown rather than executed as the nearest known form.
pub fn decode(instruction: u16) -> Result<Instruction, DecodeError> {
    let x = instruction.x();
    let y = instruction.y();
    match instruction.family() {
        0x0 => match instruction.nnn() {
            0x0e0 => Ok(Instruction::ClearScreen),
            0x0ee => Ok(Instruction::Return),
            _ => Err(DecodeError::Unknown(instruction)),
        },
        0x1 => Ok(Instruction::Jump { dest: instruction.nnn() }),
        0x2 => Ok(Instruction::Call { dest: instruction.nnn() }),
        0x3 => Ok(Instruction::SkipIfByte { register: x, value: instruction.nn(), equal: true }),
        0x4 => Ok(Instruction::SkipIfByte { register: x, value: instruction.nn(), equal: false }),
        0x5 if instruction.n() == 0 => Ok(Instruction::SkipIfRegisters { x_r: x, y_r: y, equal: true }),
        0x6 => Ok(Instruction::SetRegister { register: x, value: instruction.nn() }),
        0x7 => Ok(Instruction::AddToRegister { register: x, value: instruction.nn() }),
        0x8 => decode_logical(instruction),
        0x9 if instruction.n() == 0 => Ok(Instruction::SkipIfRegisters { x_r: x, y_r: y, equal: false }),
        0xa => Ok(Instruction::SetIndexRegister { value: instruction.nnn() }),
        0xb => Ok(Instruction::JumpWithOffset { register: x, dest: instruction.nnn() }),
        0xc => Ok(Instruction::Random { register: x, mask: instruction.nn() }),
        0xd => Ok(Instruction::Draw { x_r: x, y_r: y, height: instruction.n() }),
        0xe => match instruction.nn() {
            0x9e => Ok(Instruction::SkipIfKey { register: x, pressed: true }),
            0xa1 => Ok(Instruction::SkipIfKey { register: x, pressed: false }),
            _ => Err(DecodeError::Unknown(instruction)),
        },
        0xf => decode_system(instruction),
        _ => Err(DecodeError::Unknown(instruction)),
    }
}

/// Family 0x8, selected by the low nibble.
fn decode_logical(instruction: u16) -> Result<Instruction, DecodeError> {
    let x_r = instruction.x();
    let y_r = instruction.y();
    match instruction.n() {
        0x0 => Ok(Instruction::Copy { x_r, y_r }),
        0x1 => Ok(Instruction::Or { x_r, y_r }),
        0x2 => Ok(Instruction::And { x_r, y_r }),
        0x3 => Ok(Instruction::Xor { x_r, y_r }),
        0x4 => Ok(Instruction::AddRegisters { x_r, y_r }),
        0x5 => Ok(Instruction::Subtract { minuend: x_r, subtrahend: y_r, dest: x_r }),
        0x6 => Ok(Instruction::ShiftRight { x_r, y_r }),
        0x7 => Ok(Instruction::Subtract { minuend: y_r, subtrahend: x_r, dest: x_r }),
        0xe => Ok(Instruction::ShiftLeft { x_r, y_r }),
        _ => Err(DecodeError::UnknownLogical(instruction)),
    }
}

/// Family 0xF, selected by the low byte.
fn decode_system(instruction: u16) -> Result<Instruction, DecodeError> {
    let register = instruction.x();
    match instruction.nn() {
        0x07 => Ok(Instruction::ReadDelayTimer { register }),
        0x0a => Ok(Instruction::WaitForKey { register }),
        0x15 => Ok(Instruction::SetDelayTimer { register }),
        0x18 => Ok(Instruction::SetSoundTimer { register }),
        0x1e => Ok(Instruction::AddToIndex { register }),
        0x29 => Ok(Instruction::FontCharacter { register }),
        0x33 => Ok(Instruction::BinaryCodedDecimal { register }),
        0x55 => Ok(Instruction::StoreRegisters { last: register }),
        0x65 => Ok(Instruction::LoadRegisters { last: register }),
        _ => Err(DecodeError::UnknownSystem(instruction)),
    }
}

/// Decodes a program image two bytes at a time, yielding each instruction's address.
/// A trailing odd byte is ignored.
pub fn disassemble(
    program: &[u8],
    origin: u16,
) -> impl Iterator<Item = (u16, Result<Instruction, DecodeError>)> + '_ {
    program.chunks_exact(2).enumerate().map(move |(index, pair)| {
        let address = origin.wrapping_add(index as u16 * 2);
        (address, decode(word(pair[0], pair[1])))
    })
}
