use crate::error::Chip8Error;
use crate::framebuffer::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

pub const DEFAULT_FONT_OFFSET: u16 = 0x50;
pub const DEFAULT_STACK_DEPTH: usize = 32;

/// Behaviours that differ between historical interpreters. Fixed for the
/// lifetime of a `Chip8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY6`/`8XYE` copy VY into VX before shifting.
    pub shift_copies_vy: bool,
    /// `BNNN` adds V0 instead of VX.
    pub jump_uses_v0: bool,
    /// `FX55`/`FX65` leave I pointing past the last register touched.
    pub memory_advances_index: bool,
    /// `FX1E` sets VF when I goes past 0xFFF.
    pub index_overflow_sets_vf: bool,
}

impl Quirks {
    pub const COSMAC_VIP: Quirks = Quirks {
        shift_copies_vy: true,
        jump_uses_v0: true,
        memory_advances_index: true,
        index_overflow_sets_vf: false,
    };

    pub const MODERN: Quirks = Quirks {
        shift_copies_vy: false,
        jump_uses_v0: false,
        memory_advances_index: false,
        index_overflow_sets_vf: true,
    };
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            shift_copies_vy: false,
            jump_uses_v0: true,
            memory_advances_index: true,
            index_overflow_sets_vf: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub quirks: Quirks,
    pub width: usize,
    pub height: usize,
    /// Address of the 0-F glyphs, must leave them below the program area.
    pub font_offset: u16,
    pub stack_depth: usize,
    /// Fixed seed for `CXNN`. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quirks: Quirks::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_offset: DEFAULT_FONT_OFFSET,
            stack_depth: DEFAULT_STACK_DEPTH,
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), Chip8Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Chip8Error::InvalidConfig("framebuffer dimensions must be non-zero"));
        }
        if self.width > 256 || self.height > 256 {
            return Err(Chip8Error::InvalidConfig("framebuffer dimensions must fit a register"));
        }
        if self.font_offset as usize + crate::chip8::FONT.len() > crate::chip8::PROGRAM_START as usize {
            return Err(Chip8Error::InvalidConfig("font must end below the program area"));
        }
        if self.stack_depth == 0 {
            return Err(Chip8Error::InvalidConfig("stack depth must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, Quirks};
    use crate::error::Chip8Error;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
        assert_eq!(Config::default().stack_depth, 32);
        assert!(Quirks::default().jump_uses_v0);
        assert!(!Quirks::default().shift_copies_vy);
    }

    #[test]
    fn rejects_font_in_program_area() {
        let config = Config { font_offset: 0x1c0, ..Config::default() };
        assert!(matches!(config.validate(), Err(Chip8Error::InvalidConfig(_))));
        let config = Config { font_offset: 0x000, ..Config::default() };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_geometry() {
        let config = Config { width: 0, ..Config::default() };
        assert!(config.validate().is_err());
        let config = Config { stack_depth: 0, ..Config::default() };
        assert!(config.validate().is_err());
    }
}
