//! A CHIP-8 interpreter core. The host drives it: `Chip8::tick` runs one
//! instruction, `Chip8::advance_timers` runs at 60 Hz, key state comes in
//! through `Chip8::set_input` and the framebuffer goes out through
//! `Chip8::framebuffer`.

pub mod bits;
pub mod cadence;
pub mod chip8;
pub mod config;
pub mod decode;
pub mod error;
pub mod framebuffer;
pub mod types;

pub use crate::cadence::Cadence;
pub use crate::chip8::{Chip8, Step, MAX_PROGRAM_SIZE, PROGRAM_START};
pub use crate::config::{Config, Quirks};
pub use crate::decode::{decode, disassemble};
pub use crate::error::{Chip8Error, DecodeError};
pub use crate::framebuffer::Framebuffer;
pub use crate::types::Instruction;
