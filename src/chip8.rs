use std::ops::Range;

use log;
use rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::bits::{bcd, word};
use crate::config::{Config, Quirks};
use crate::decode::decode;
use crate::error::{Chip8Error, DecodeError};
use crate::framebuffer::Framebuffer;
use crate::types::Instruction;

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = 0xFFF - PROGRAM_START as usize;
pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;
const FLAG: usize = 0xF;
const GLYPH_SIZE: u16 = 5;

pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80  // F
];

/// What a single `tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed(Instruction),
    /// `FX0A` found no pressed key and will be fetched again.
    WaitingForKey,
    /// The word at PC had no meaning; PC has moved past it.
    Skipped(DecodeError),
}

pub struct Chip8 {
    memory: [u8; MEMORY_SIZE],
    registers: [u8; REGISTER_COUNT],
    index_register: u16,
    pc: u16,
    stack: Vec<u16>,
    delay_timer: u8,
    sound_timer: u8,
    framebuffer: Framebuffer,
    keys: [bool; KEY_COUNT],
    config: Config,
    rng: Xoshiro256PlusPlus,
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

impl Chip8 {
    pub fn new() -> Self {
        Self::build(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self, Chip8Error> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        let mut chip8 = Chip8 {
            memory: [0; MEMORY_SIZE],
            registers: [0; REGISTER_COUNT],
            index_register: 0,
            pc: PROGRAM_START,
            stack: Vec::with_capacity(config.stack_depth),
            delay_timer: 0,
            sound_timer: 0,
            framebuffer: Framebuffer::new(config.width, config.height),
            keys: [false; KEY_COUNT],
            config,
            rng,
        };
        let font_start = chip8.config.font_offset as usize;
        chip8.memory[font_start..font_start + FONT.len()].copy_from_slice(&FONT);
        log::debug!(
            "created {}x{} machine, quirks {:?}",
            chip8.config.width,
            chip8.config.height,
            chip8.config.quirks
        );
        chip8
    }

    /// Copies a program image to 0x200.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ProgramTooLarge { size: program.len(), max: MAX_PROGRAM_SIZE });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        log::debug!("loaded {} byte program at {:#05x}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Fetches, decodes and executes one instruction.
    pub fn tick(&mut self) -> Result<Step, Chip8Error> {
        let address = self.pc;
        let raw_instruction = self.fetch()?;
        match decode(raw_instruction) {
            Ok(instruction) => {
                log::trace!("{:#05x}: {:04x} {}", address, raw_instruction, instruction);
                self.execute(instruction)?;
                match instruction {
                    Instruction::WaitForKey { .. } if self.pc == address => Ok(Step::WaitingForKey),
                    _ => Ok(Step::Executed(instruction)),
                }
            }
            Err(error) => {
                log::warn!("{} at {:#05x}", error, address);
                Ok(Step::Skipped(error))
            }
        }
    }

    fn fetch(&mut self) -> Result<u16, Chip8Error> {
        let at = self.pc as usize;
        if at + 1 >= MEMORY_SIZE {
            return Err(Chip8Error::MemoryOutOfBounds { address: at });
        }
        self.pc = self.pc.wrapping_add(2);
        Ok(word(self.memory[at], self.memory[at + 1]))
    }

    /// Applies one decoded instruction. PC is expected to already point past it.
    pub fn execute(&mut self, instruction: Instruction) -> Result<(), Chip8Error> {
        let quirks = self.config.quirks;
        match instruction {
            Instruction::ClearScreen => {
                self.framebuffer.clear();
            }
            Instruction::Return => {
                self.pc = self.stack.pop().ok_or(Chip8Error::StackUnderflow)?;
            }
            Instruction::Jump { dest } => {
                self.pc = dest;
            }
            Instruction::Call { dest } => {
                if self.stack.len() >= self.config.stack_depth {
                    return Err(Chip8Error::StackOverflow { depth: self.stack.len() });
                }
                self.stack.push(self.pc);
                self.pc = dest;
            }
            Instruction::SkipIfByte { register, value, equal } => {
                if (self.registers[register as usize] == value) == equal {
                    self.skip();
                }
            }
            Instruction::SkipIfRegisters { x_r, y_r, equal } => {
                if (self.registers[x_r as usize] == self.registers[y_r as usize]) == equal {
                    self.skip();
                }
            }
            Instruction::SetRegister { register, value } => {
                self.registers[register as usize] = value;
            }
            Instruction::AddToRegister { register, value } => {
                let vx = &mut self.registers[register as usize];
                *vx = vx.wrapping_add(value);
            }
            Instruction::Copy { x_r, y_r } => {
                self.registers[x_r as usize] = self.registers[y_r as usize];
            }
            Instruction::Or { x_r, y_r } => {
                self.registers[x_r as usize] |= self.registers[y_r as usize];
            }
            Instruction::And { x_r, y_r } => {
                self.registers[x_r as usize] &= self.registers[y_r as usize];
            }
            Instruction::Xor { x_r, y_r } => {
                self.registers[x_r as usize] ^= self.registers[y_r as usize];
            }
            Instruction::AddRegisters { x_r, y_r } => {
                let (sum, carry) = self.registers[x_r as usize].overflowing_add(self.registers[y_r as usize]);
                self.set_with_flag(x_r, sum, carry);
            }
            Instruction::Subtract { minuend, subtrahend, dest } => {
                let a = self.registers[minuend as usize];
                let b = self.registers[subtrahend as usize];
                self.set_with_flag(dest, a.wrapping_sub(b), a > b);
            }
            Instruction::ShiftRight { x_r, y_r } => {
                let value = self.shift_source(x_r, y_r, quirks);
                self.set_with_flag(x_r, value >> 1, value & 1 == 1);
            }
            Instruction::ShiftLeft { x_r, y_r } => {
                let value = self.shift_source(x_r, y_r, quirks);
                self.set_with_flag(x_r, value << 1, value >> 7 == 1);
            }
            Instruction::SetIndexRegister { value } => {
                self.index_register = value;
            }
            Instruction::JumpWithOffset { register, dest } => {
                let offset_register = if quirks.jump_uses_v0 { 0 } else { register as usize };
                self.pc = dest + self.registers[offset_register] as u16;
            }
            Instruction::Random { register, mask } => {
                self.registers[register as usize] = (self.rng.next_u32() as u8) & mask;
            }
            Instruction::Draw { x_r, y_r, height } => {
                let x = self.registers[x_r as usize];
                let y = self.registers[y_r as usize];
                // rows clipped at the bottom edge are never read
                let visible = self.framebuffer.height() - y as usize % self.framebuffer.height();
                let sprite = self.memory_range(self.index_register, (height as usize).min(visible))?;
                let collision = self.framebuffer.draw(x, y, &self.memory[sprite]);
                self.registers[FLAG] = collision as u8;
            }
            Instruction::SkipIfKey { register, pressed } => {
                let value = self.registers[register as usize];
                let key = value & 0xF;
                if key != value {
                    log::warn!("invalid input key checked: {:#04x}, using {:X}", value, key);
                }
                if self.keys[key as usize] == pressed {
                    self.skip();
                }
            }
            Instruction::ReadDelayTimer { register } => {
                self.registers[register as usize] = self.delay_timer;
            }
            Instruction::SetDelayTimer { register } => {
                self.delay_timer = self.registers[register as usize];
            }
            Instruction::SetSoundTimer { register } => {
                self.sound_timer = self.registers[register as usize];
            }
            Instruction::AddToIndex { register } => {
                let vx = self.registers[register as usize] as u16;
                let overflow = self.index_register as u32 + vx as u32 > 0xFFF;
                self.index_register = self.index_register.wrapping_add(vx);
                if quirks.index_overflow_sets_vf && overflow {
                    self.registers[FLAG] = 1;
                }
            }
            Instruction::WaitForKey { register } => match self.keys.iter().position(|&pressed| pressed) {
                Some(key) => self.registers[register as usize] = key as u8,
                None => self.pc = self.pc.wrapping_sub(2),
            },
            Instruction::FontCharacter { register } => {
                let character = (self.registers[register as usize] & 0xF) as u16;
                self.index_register = self.config.font_offset + character * GLYPH_SIZE;
            }
            Instruction::BinaryCodedDecimal { register } => {
                let digits = self.memory_range(self.index_register, 3)?;
                self.memory[digits].copy_from_slice(&bcd(self.registers[register as usize]));
            }
            Instruction::StoreRegisters { last } => {
                let count = last as usize + 1;
                let target = self.memory_range(self.index_register, count)?;
                self.memory[target].copy_from_slice(&self.registers[..count]);
                if quirks.memory_advances_index {
                    self.index_register = self.index_register.wrapping_add(count as u16);
                }
            }
            Instruction::LoadRegisters { last } => {
                let count = last as usize + 1;
                let source = self.memory_range(self.index_register, count)?;
                self.registers[..count].copy_from_slice(&self.memory[source]);
                if quirks.memory_advances_index {
                    self.index_register = self.index_register.wrapping_add(count as u16);
                }
            }
        }
        Ok(())
    }

    fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    fn shift_source(&mut self, x_r: u8, y_r: u8, quirks: Quirks) -> u8 {
        if quirks.shift_copies_vy {
            self.registers[x_r as usize] = self.registers[y_r as usize];
        }
        self.registers[x_r as usize]
    }

    /// Writes the result first so VF always ends up holding the flag.
    fn set_with_flag(&mut self, register: u8, value: u8, flag: bool) {
        self.registers[register as usize] = value;
        self.registers[FLAG] = flag as u8;
    }

    fn memory_range(&self, start: u16, len: usize) -> Result<Range<usize>, Chip8Error> {
        let start = start as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(Chip8Error::MemoryOutOfBounds { address: start.max(MEMORY_SIZE) });
        }
        Ok(start..end)
    }

    /// Decrements both timers towards zero. Called at 60 Hz by the driver.
    pub fn advance_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub fn set_input(&mut self, key: u8, pressed: bool) -> Result<(), Chip8Error> {
        let state = self.keys.get_mut(key as usize).ok_or(Chip8Error::InvalidKey(key))?;
        *state = pressed;
        Ok(())
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn display_changed(&self) -> bool {
        self.framebuffer.changed()
    }

    pub fn reset_display_changed(&mut self) {
        self.framebuffer.reset_changed();
    }

    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.registers
    }

    pub fn index_register(&self) -> u16 {
        self.index_register
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn memory(&self) -> &[u8; MEMORY_SIZE] {
        &self.memory
    }

    pub fn quirks(&self) -> Quirks {
        self.config.quirks
    }
}
