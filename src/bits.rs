pub type U4 = u8;
pub type U12 = u16;

/// Gets the nibble (4-bit sequence) at `index` of an instruction word.
///
/// Index 0 is the most significant nibble, so for `0xD12F`:
/// `nibble(i, 0) == 0xD` and `nibble(i, 3) == 0xF`.
pub fn nibble(instruction: u16, index: u8) -> U4 {
    assert!(index <= 3);
    ((instruction >> ((3 - index) * 4)) & 0xF) as U4
}

/// Named operand fields of a raw instruction, using the usual `_XYN` layout.
pub trait OpcodeFields: Copy {
    /// High nibble, selects the opcode family.
    fn family(self) -> U4;
    fn x(self) -> U4;
    fn y(self) -> U4;
    fn n(self) -> U4;
    fn nn(self) -> u8;
    fn nnn(self) -> U12;
}

impl OpcodeFields for u16 {
    fn family(self) -> U4 {
        nibble(self, 0)
    }

    fn x(self) -> U4 {
        nibble(self, 1)
    }

    fn y(self) -> U4 {
        nibble(self, 2)
    }

    fn n(self) -> U4 {
        nibble(self, 3)
    }

    fn nn(self) -> u8 {
        (self & 0xFF) as u8
    }

    fn nnn(self) -> U12 {
        self & 0xFFF
    }
}

/// Joins two bytes into a big-endian instruction word.
pub fn word(high: u8, low: u8) -> u16 {
    (high as u16) << 8 | low as u16
}

/// Sprite row pixels from the most to least significant bit.
pub fn row_pixels(row: u8) -> impl Iterator<Item = bool> {
    (0..8).map(move |column| (row >> (7 - column)) & 1 == 1)
}

/// Hundreds, tens and ones digits of a byte.
pub fn bcd(value: u8) -> [u8; 3] {
    [value / 100, (value / 10) % 10, value % 10]
}
