use std::fmt;

use crate::bits::{U12, U4};

/// A decoded instruction. Register operands are register indices, not values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,
    Return,
    Jump { dest: U12 },
    Call { dest: U12 },
    /// Skips the next instruction when `VX == value` equals `equal`.
    SkipIfByte { register: U4, value: u8, equal: bool },
    /// Skips the next instruction when `VX == VY` equals `equal`.
    SkipIfRegisters { x_r: U4, y_r: U4, equal: bool },
    SetRegister { register: U4, value: u8 },
    AddToRegister { register: U4, value: u8 },
    Copy { x_r: U4, y_r: U4 },
    Or { x_r: U4, y_r: U4 },
    And { x_r: U4, y_r: U4 },
    Xor { x_r: U4, y_r: U4 },
    AddRegisters { x_r: U4, y_r: U4 },
    /// `dest = minuend - subtrahend`, VF = no borrow.
    Subtract { minuend: U4, subtrahend: U4, dest: U4 },
    ShiftRight { x_r: U4, y_r: U4 },
    ShiftLeft { x_r: U4, y_r: U4 },
    SetIndexRegister { value: U12 },
    /// `register` is the X nibble of `BXNN`, only used by the modern quirk.
    /// Rendered as `JP VX, nnn`; with the V0 quirk the offset still comes from V0.
    JumpWithOffset { register: U4, dest: U12 },
    Random { register: U4, mask: u8 },
    Draw { x_r: U4, y_r: U4, height: U4 },
    /// Skips the next instruction when the key in VX has pressed state `pressed`.
    SkipIfKey { register: U4, pressed: bool },
    ReadDelayTimer { register: U4 },
    SetDelayTimer { register: U4 },
    SetSoundTimer { register: U4 },
    AddToIndex { register: U4 },
    WaitForKey { register: U4 },
    FontCharacter { register: U4 },
    BinaryCodedDecimal { register: U4 },
    /// Stores V0..=`last` at I.
    StoreRegisters { last: U4 },
    /// Loads V0..=`last` from I.
    LoadRegisters { last: U4 },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump { dest } => write!(f, "JP {:#05x}", dest),
            Call { dest } => write!(f, "CALL {:#05x}", dest),
            SkipIfByte { register, value, equal } => {
                let op = if equal { "SE" } else { "SNE" };
                write!(f, "{} V{:X}, {:#04x}", op, register, value)
            }
            SkipIfRegisters { x_r, y_r, equal } => {
                let op = if equal { "SE" } else { "SNE" };
                write!(f, "{} V{:X}, V{:X}", op, x_r, y_r)
            }
            SetRegister { register, value } => write!(f, "LD V{:X}, {:#04x}", register, value),
            AddToRegister { register, value } => write!(f, "ADD V{:X}, {:#04x}", register, value),
            Copy { x_r, y_r } => write!(f, "LD V{:X}, V{:X}", x_r, y_r),
            Or { x_r, y_r } => write!(f, "OR V{:X}, V{:X}", x_r, y_r),
            And { x_r, y_r } => write!(f, "AND V{:X}, V{:X}", x_r, y_r),
            Xor { x_r, y_r } => write!(f, "XOR V{:X}, V{:X}", x_r, y_r),
            AddRegisters { x_r, y_r } => write!(f, "ADD V{:X}, V{:X}", x_r, y_r),
            Subtract { minuend, subtrahend, dest } if dest == minuend => {
                write!(f, "SUB V{:X}, V{:X}", minuend, subtrahend)
            }
            Subtract { subtrahend, minuend, .. } => {
                write!(f, "SUBN V{:X}, V{:X}", subtrahend, minuend)
            }
            ShiftRight { x_r, y_r } => write!(f, "SHR V{:X}, V{:X}", x_r, y_r),
            ShiftLeft { x_r, y_r } => write!(f, "SHL V{:X}, V{:X}", x_r, y_r),
            SetIndexRegister { value } => write!(f, "LD I, {:#05x}", value),
            JumpWithOffset { register: 0, dest } => write!(f, "JP V0, {:#05x}", dest),
            JumpWithOffset { register, dest } => write!(f, "JP V{:X}, {:#05x}", register, dest),
            Random { register, mask } => write!(f, "RND V{:X}, {:#04x}", register, mask),
            Draw { x_r, y_r, height } => write!(f, "DRW V{:X}, V{:X}, {}", x_r, y_r, height),
            SkipIfKey { register, pressed: true } => write!(f, "SKP V{:X}", register),
            SkipIfKey { register, pressed: false } => write!(f, "SKNP V{:X}", register),
            ReadDelayTimer { register } => write!(f, "LD V{:X}, DT", register),
            SetDelayTimer { register } => write!(f, "LD DT, V{:X}", register),
            SetSoundTimer { register } => write!(f, "LD ST, V{:X}", register),
            AddToIndex { register } => write!(f, "ADD I, V{:X}", register),
            WaitForKey { register } => write!(f, "LD V{:X}, K", register),
            FontCharacter { register } => write!(f, "LD F, V{:X}", register),
            BinaryCodedDecimal { register } => write!(f, "LD B, V{:X}", register),
            StoreRegisters { last } => write!(f, "LD [I], V{:X}", last),
            LoadRegisters { last } => write!(f, "LD V{:X}, [I]", last),
        }
    }
}
