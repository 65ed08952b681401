use crate::bits::row_pixels;

pub const DEFAULT_WIDTH: usize = 64;
pub const DEFAULT_HEIGHT: usize = 32;

/// Monochrome pixel grid stored row-major in one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    changed: bool,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            cells: vec![false; width * height],
            // the first frame is always presented
            changed: true,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel state at column `x`, row `y`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Rows from top to bottom, each `width` pixels long.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.width)
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    pub fn reset_changed(&mut self) {
        self.changed = false;
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.changed = true;
    }

    /// XORs an 8-pixel-wide sprite onto the grid. The origin wraps around the
    /// grid, the sprite itself is clipped at the right and bottom edges.
    /// Returns whether any pixel went from set to unset.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x = x as usize % self.width;
        let y = y as usize % self.height;
        let mut collision = false;

        for (row_offset, &row) in sprite.iter().enumerate() {
            let pix_y = y + row_offset;
            if pix_y >= self.height {
                break;
            }
            for (column_offset, set) in row_pixels(row).enumerate() {
                let pix_x = x + column_offset;
                if pix_x >= self.width {
                    break;
                }
                if set {
                    let cell = &mut self.cells[pix_y * self.width + pix_x];
                    collision |= *cell;
                    *cell ^= true;
                }
            }
        }

        self.changed = true;
        collision
    }
}
