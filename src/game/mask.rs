//! Per-pixel collision masks.
//!
//! A [`Mask`] records which pixels of an image are opaque. Two masks collide
//! when at least one pixel is set in both once they are placed at their
//! relative screen offset.

use image::RgbaImage;

/// Pixels with an alpha strictly above this value count as solid.
pub const ALPHA_THRESHOLD: u8 = 127;

/// Opaque/transparent bitmap derived from an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Builds a mask from the alpha channel of `image`.
    pub fn from_image(image: &RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let bits = image
            .pixels()
            .map(|pixel| pixel.0[3] > ALPHA_THRESHOLD)
            .collect();
        Self {
            width,
            height,
            bits,
        }
    }

    /// Whether the pixel at `(x, y)` is solid. Out of range pixels are empty.
    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Number of solid pixels.
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Tests whether `other`, placed with its top-left corner at `offset`
    /// relative to this mask's top-left corner, shares a solid pixel with it.
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        let (dx, dy) = offset;
        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = (self.width as i32).min(dx + other.width as i32);
        let y_end = (self.height as i32).min(dy + other.height as i32);

        (y_start..y_end).any(|y| {
            (x_start..x_end).any(|x| self.get(x, y) && other.get(x - dx, y - dy))
        })
    }
}
