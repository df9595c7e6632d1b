//! Pixel application of parsed filter chains.
//!
//! Each filter function lowers to one of three primitives:
//!
//! | Functions | Primitive |
//! |---|---|
//! | grayscale, sepia, saturate, hue-rotate | 4×5 color matrix |
//! | invert, brightness, contrast | per-channel linear transfer |
//! | blur | Gaussian blur (`image::imageops::blur`) |
//!
//! Color matrices use the standard filter-effects coefficient tables and
//! operate on stored (non-premultiplied) sRGB channel values; alpha passes
//! through unchanged. Transfer functions likewise touch only the color
//! channels. Amount semantics: grayscale/sepia/invert saturate at 1,
//! brightness/contrast/saturate are unbounded above.

use super::expr::{FilterChain, FilterOp};
use image::{DynamicImage, RgbaImage};
use tracing::debug;

/// Apply a filter chain to an image, left to right.
///
/// The identity chain returns the input untouched (no RGBA conversion).
pub fn apply_chain(img: DynamicImage, chain: &FilterChain) -> DynamicImage {
    if chain.is_identity() {
        return img;
    }
    debug!(ops = chain.ops().len(), "Applying filter chain");
    let mut rgba = img.into_rgba8();
    for op in chain.ops() {
        rgba = apply_op(rgba, *op);
    }
    DynamicImage::ImageRgba8(rgba)
}

fn apply_op(img: RgbaImage, op: FilterOp) -> RgbaImage {
    match op {
        FilterOp::Grayscale(a) => color_matrix(img, &grayscale_matrix(a.clamp(0.0, 1.0))),
        FilterOp::Sepia(a) => color_matrix(img, &sepia_matrix(a.clamp(0.0, 1.0))),
        FilterOp::Saturate(s) => color_matrix(img, &saturate_matrix(s)),
        FilterOp::HueRotate(deg) => color_matrix(img, &hue_rotate_matrix(deg)),
        // v' = a·(1 - v) + (1 - a)·v, i.e. slope 1-2a, intercept a
        FilterOp::Invert(a) => {
            let a = a.clamp(0.0, 1.0);
            transfer(img, 1.0 - 2.0 * a, a)
        }
        FilterOp::Brightness(b) => transfer(img, b, 0.0),
        FilterOp::Contrast(c) => transfer(img, c, 0.5 - 0.5 * c),
        FilterOp::Blur(sigma) => {
            if sigma > 0.0 {
                image::imageops::blur(&img, sigma)
            } else {
                img
            }
        }
    }
}

/// Apply a 4×5 row-major color matrix to every pixel.
fn color_matrix(mut img: RgbaImage, m: &[f32; 20]) -> RgbaImage {
    for px in img.pixels_mut() {
        let r = px[0] as f32 / 255.0;
        let g = px[1] as f32 / 255.0;
        let b = px[2] as f32 / 255.0;
        let a = px[3] as f32 / 255.0;
        let r2 = m[0] * r + m[1] * g + m[2] * b + m[3] * a + m[4];
        let g2 = m[5] * r + m[6] * g + m[7] * b + m[8] * a + m[9];
        let b2 = m[10] * r + m[11] * g + m[12] * b + m[13] * a + m[14];
        let a2 = m[15] * r + m[16] * g + m[17] * b + m[18] * a + m[19];
        px[0] = to_channel(r2);
        px[1] = to_channel(g2);
        px[2] = to_channel(b2);
        px[3] = to_channel(a2);
    }
    img
}

/// Apply `v' = slope·v + intercept` to the color channels of every pixel.
fn transfer(mut img: RgbaImage, slope: f32, intercept: f32) -> RgbaImage {
    for px in img.pixels_mut() {
        for i in 0..3 {
            let v = px[i] as f32 / 255.0;
            px[i] = to_channel(slope * v + intercept);
        }
    }
    img
}

#[inline]
fn to_channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Luminance-interpolating desaturation matrix, amount 1 = fully gray.
fn grayscale_matrix(amount: f32) -> [f32; 20] {
    let g = 1.0 - amount;
    [
        0.2126 + 0.7874 * g,
        0.7152 - 0.7152 * g,
        0.0722 - 0.0722 * g,
        0.0,
        0.0,
        0.2126 - 0.2126 * g,
        0.7152 + 0.2848 * g,
        0.0722 - 0.0722 * g,
        0.0,
        0.0,
        0.2126 - 0.2126 * g,
        0.7152 - 0.7152 * g,
        0.0722 + 0.9278 * g,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]
}

/// Sepia-toning matrix, amount 1 = fully toned.
fn sepia_matrix(amount: f32) -> [f32; 20] {
    let t = 1.0 - amount;
    [
        0.393 + 0.607 * t,
        0.769 - 0.769 * t,
        0.189 - 0.189 * t,
        0.0,
        0.0,
        0.349 - 0.349 * t,
        0.686 + 0.314 * t,
        0.168 - 0.168 * t,
        0.0,
        0.0,
        0.272 - 0.272 * t,
        0.534 - 0.534 * t,
        0.131 + 0.869 * t,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]
}

/// Saturation matrix: 0 = grayscale, 1 = identity, >1 oversaturates.
fn saturate_matrix(s: f32) -> [f32; 20] {
    [
        0.213 + 0.787 * s,
        0.715 - 0.715 * s,
        0.072 - 0.072 * s,
        0.0,
        0.0,
        0.213 - 0.213 * s,
        0.715 + 0.285 * s,
        0.072 - 0.072 * s,
        0.0,
        0.0,
        0.213 - 0.213 * s,
        0.715 - 0.715 * s,
        0.072 + 0.928 * s,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]
}

/// Hue rotation matrix for an angle in degrees.
fn hue_rotate_matrix(degrees: f32) -> [f32; 20] {
    let theta = degrees.to_radians();
    let cos_t = theta.cos();
    let sin_t = theta.sin();
    [
        0.213 + 0.787 * cos_t - 0.213 * sin_t,
        0.715 - 0.715 * cos_t - 0.715 * sin_t,
        0.072 - 0.072 * cos_t + 0.928 * sin_t,
        0.0,
        0.0,
        0.213 - 0.213 * cos_t + 0.143 * sin_t,
        0.715 + 0.285 * cos_t + 0.140 * sin_t,
        0.072 - 0.072 * cos_t - 0.283 * sin_t,
        0.0,
        0.0,
        0.213 - 0.213 * cos_t - 0.787 * sin_t,
        0.715 - 0.715 * cos_t + 0.715 * sin_t,
        0.072 + 0.928 * cos_t + 0.072 * sin_t,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]
}
