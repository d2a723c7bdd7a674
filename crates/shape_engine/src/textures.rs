//! Procedural texture synthesis
//!
//! Generates the four pattern bitmaps an object can select through
//! [`TextureKind`]. Every generator is a pure function of its resolution:
//! the noise pattern uses an integer hash over a lattice instead of an RNG,
//! so the same call always yields the same pixels. The core never reads the
//! pixels back; backends upload them, demos may export them as PNG.

use image::{Rgba, RgbaImage};

use crate::foundation::math::utils::lerp;
use crate::store::TextureKind;

/// Cells per edge in the checkerboard, dot, and stripe patterns
const PATTERN_CELLS: u32 = 8;
/// Lattice cells per edge at the base noise octave
const NOISE_CELLS: u32 = 16;

const LIGHT: u8 = 230;
const DARK: u8 = 40;

/// Synthesize the bitmap for a texture kind, `None` for the untextured kind
pub fn synthesize(kind: TextureKind, resolution: u32) -> Option<RgbaImage> {
    match kind {
        TextureKind::None => None,
        TextureKind::Checkerboard => Some(checkerboard(resolution)),
        TextureKind::Dots => Some(dots(resolution)),
        TextureKind::Stripes => Some(stripes(resolution)),
        TextureKind::Noise => Some(noise(resolution)),
    }
}

/// Alternating light and dark squares
pub fn checkerboard(resolution: u32) -> RgbaImage {
    let cell = (resolution / PATTERN_CELLS).max(1);
    RgbaImage::from_fn(resolution, resolution, |x, y| {
        let tone = if (x / cell + y / cell) % 2 == 0 { LIGHT } else { DARK };
        gray(tone)
    })
}

/// Dark circles on a regular grid over a light background
pub fn dots(resolution: u32) -> RgbaImage {
    let cell = (resolution / PATTERN_CELLS).max(1);
    let radius = cell as f32 * 0.3;
    RgbaImage::from_fn(resolution, resolution, |x, y| {
        let dx = (x % cell) as f32 - cell as f32 / 2.0;
        let dy = (y % cell) as f32 - cell as f32 / 2.0;
        let tone = if (dx * dx + dy * dy).sqrt() < radius { DARK } else { LIGHT };
        gray(tone)
    })
}

/// Vertical bands of alternating tone
pub fn stripes(resolution: u32) -> RgbaImage {
    let band = (resolution / PATTERN_CELLS).max(1);
    RgbaImage::from_fn(resolution, resolution, |x, _y| {
        let tone = if (x / band) % 2 == 0 { LIGHT } else { DARK };
        gray(tone)
    })
}

/// Smooth two-octave value noise
pub fn noise(resolution: u32) -> RgbaImage {
    let freq = NOISE_CELLS as f32 / resolution.max(1) as f32;
    RgbaImage::from_fn(resolution, resolution, |x, y| {
        let (fx, fy) = (x as f32 * freq, y as f32 * freq);
        let value = 0.7 * value_noise(fx, fy) + 0.3 * value_noise(fx * 2.0, fy * 2.0);
        gray(DARK + (value * (LIGHT - DARK) as f32) as u8)
    })
}

fn gray(tone: u8) -> Rgba<u8> {
    Rgba([tone, tone, tone, 255])
}

/// Bilinear value noise over a hashed integer lattice, result in [0, 1]
fn value_noise(x: f32, y: f32) -> f32 {
    let (x0, y0) = (x.floor() as u32, y.floor() as u32);
    let (fx, fy) = (x - x.floor(), y - y.floor());
    let (u, v) = (fade(fx), fade(fy));

    let a = lattice(x0, y0);
    let b = lattice(x0.wrapping_add(1), y0);
    let c = lattice(x0, y0.wrapping_add(1));
    let d = lattice(x0.wrapping_add(1), y0.wrapping_add(1));
    lerp(lerp(a, b, u), lerp(c, d, u), v)
}

fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lattice(x: u32, y: u32) -> f32 {
    let mut h = x.wrapping_mul(0x9E37_79B9) ^ y.wrapping_mul(0x85EB_CA6B);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^= h >> 16;
    (h & 0xFFFF) as f32 / 65535.0
}

/// Precomputed bitmaps for every patterned texture kind
///
/// Backends key uploads off [`TextureKind`]; the library owns the pixel
/// data so patterns are generated once per resolution, not per object.
#[derive(Debug, Clone)]
pub struct TextureLibrary {
    resolution: u32,
    checkerboard: RgbaImage,
    dots: RgbaImage,
    stripes: RgbaImage,
    noise: RgbaImage,
}

impl TextureLibrary {
    /// Generate all four patterns at the given square resolution
    pub fn new(resolution: u32) -> Self {
        log::debug!("textures: generating {resolution}x{resolution} pattern set");
        Self {
            resolution,
            checkerboard: checkerboard(resolution),
            dots: dots(resolution),
            stripes: stripes(resolution),
            noise: noise(resolution),
        }
    }

    /// Side length of every bitmap in the library
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Bitmap for a texture kind; `None` for the untextured kind
    pub fn bitmap(&self, kind: TextureKind) -> Option<&RgbaImage> {
        match kind {
            TextureKind::None => None,
            TextureKind::Checkerboard => Some(&self.checkerboard),
            TextureKind::Dots => Some(&self.dots),
            TextureKind::Stripes => Some(&self.stripes),
            TextureKind::Noise => Some(&self.noise),
        }
    }
}

impl Default for TextureLibrary {
    fn default() -> Self {
        Self::new(256)
    }
}
