//! Placeholder cover generation.
//!
//! Every run gets a fresh identicon-style cover: a random accent color and
//! a random block pattern mirrored around a center column, in the manner of
//! default avatar graphics. The randomness source is injected so tests can
//! use a seeded generator; structure (grid, symmetry) is deterministic.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use rand::Rng;

/// Probability that a pattern cell is filled.
const FILL_PROBABILITY: f64 = 0.7;

#[derive(Debug, Clone)]
pub struct CoverSpec {
    pub width: u32,
    pub height: u32,
    pub block_size: u32,
    pub background: [u8; 3],
}

impl Default for CoverSpec {
    fn default() -> Self {
        Self {
            width: 1264,
            height: 1680,
            block_size: 140,
            background: [255, 255, 255],
        }
    }
}

/// Render a random identicon cover.
///
/// The grid is `floor(w/block) × floor(h/block)` with the width forced odd
/// so a true center column exists; the fill pattern is generated for the
/// left half plus the center column and mirrored to the right.
pub fn generate<R: Rng>(spec: &CoverSpec, rng: &mut R) -> RgbImage {
    let (grid_width, grid_height) = grid_dimensions(spec);
    let mut img = RgbImage::from_pixel(spec.width, spec.height, Rgb(spec.background));
    if grid_width == 0 || grid_height == 0 {
        return img;
    }

    let accent = random_accent(rng);
    tracing::debug!(color = ?accent.0, "cover accent color");

    let half_width = grid_width / 2 + 1;
    let pattern: Vec<Vec<bool>> = (0..grid_height)
        .map(|_| (0..half_width).map(|_| rng.gen_bool(FILL_PROBABILITY)).collect())
        .collect();

    for (row, cells) in pattern.iter().enumerate() {
        for (col, &filled) in cells.iter().enumerate() {
            if !filled {
                continue;
            }
            fill_block(&mut img, col, row, spec.block_size, accent);
            let mirror = grid_width - col - 1;
            if mirror != col {
                fill_block(&mut img, mirror, row, spec.block_size, accent);
            }
        }
    }

    img
}

/// Like [`generate`], but PNG-encoded for packaging.
pub fn render_png<R: Rng>(spec: &CoverSpec, rng: &mut R) -> Result<Vec<u8>, image::ImageError> {
    let img = generate(spec, rng);
    let mut data = Vec::new();
    DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut data), ImageFormat::Png)?;
    Ok(data)
}

fn grid_dimensions(spec: &CoverSpec) -> (usize, usize) {
    let mut grid_width = (spec.width / spec.block_size) as usize;
    if grid_width % 2 == 0 {
        grid_width = grid_width.saturating_sub(1);
    }
    (grid_width, (spec.height / spec.block_size) as usize)
}

/// Accent color drawn uniformly in HSV: vivid (sat 70–100%), mid-bright
/// (value 50–90%), any hue.
fn random_accent<R: Rng>(rng: &mut R) -> Rgb<u8> {
    let hue = rng.gen_range(0..=360) as f32;
    let saturation = rng.gen_range(70..=100) as f32 / 100.0;
    let value = rng.gen_range(50..=90) as f32 / 100.0;
    hsv_to_rgb(hue, saturation, value)
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb<u8> {
    let sector = (hue % 360.0) / 60.0;
    let i = sector.floor();
    let f = sector - i;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match i as u32 % 6 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };
    Rgb([(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8])
}

fn fill_block(img: &mut RgbImage, col: usize, row: usize, block_size: u32, color: Rgb<u8>) {
    let x0 = col as u32 * block_size;
    let y0 = row as u32 * block_size;
    for y in y0..(y0 + block_size).min(img.height()) {
        for x in x0..(x0 + block_size).min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}
