/// Conditions that stop interpretation. The driver decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Chip8Error {
    #[error("stack overflow: call with {depth} return addresses already on the stack")]
    StackOverflow { depth: usize },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("memory access out of bounds at address {address:#06x}")]
    MemoryOutOfBounds { address: usize },

    #[error("program is too large ({size} bytes), max size is {max} bytes")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("key index {0} is outside 0-15")]
    InvalidKey(u8),

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// An instruction word with no implemented meaning. Reported, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("opcode not implemented: {0:#06x}")]
    Unknown(u16),

    #[error("logical opcode not implemented: {0:#06x}")]
    UnknownLogical(u16),

    #[error("system opcode not implemented: {0:#06x}")]
    UnknownSystem(u16),
}

impl DecodeError {
    pub fn opcode(&self) -> u16 {
        match *self {
            DecodeError::Unknown(opcode)
            | DecodeError::UnknownLogical(opcode)
            | DecodeError::UnknownSystem(opcode) => opcode,
        }
    }
}
