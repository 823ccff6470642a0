//! # Wheel
//! The "swiss cheese" color wheel: a hue ring around a saturation/value wedge, with a notch cut out
//! of the top of the wedge and a swatch of the current color floating in it.
//!
//! ```ignore
//!          ___ hue ring ___
//!        /   .  notch  .   \
//!       |   .  (swatch) .   |
//!       |  .             .  |
//!       |  .   s/v wedge .  |
//!        \   ...........   /
//!          ---------------
//! ```
//!
//! Angles are in turns, clockwise from the top. Within the wedge, distance from the center is saturation and
//! angle is value, increasing clockwise from the notch. Everything not covered by one of these zones is
//! transparent, and the [`ClipMask`] built from the rendered alpha is the wheel's shape.

use crate::color::{clamp01, normalize_hue, Hsv, Rgb};
use az::{Az, SaturatingAs};

/// Width and height of the rendered wheel, in pixels.
pub const SIZE: usize = 256;

const CENTER: f32 = 128.0;
const OUTER_RADIUS: f32 = 126.0;
const HUE_INNER_RADIUS: f32 = 100.0;
const WEDGE_RADIUS: f32 = 92.0;
/// Half the angular width of the notch in the wedge, in turns.
const NOTCH_HALF_WIDTH: f32 = 1.0 / 12.0;
const SWATCH_DISTANCE: f32 = 60.0;
const SWATCH_RADIUS: f32 = 18.0;
const MARKER_RADIUS: f32 = 4.0;
/// Half thickness of marker strokes, in pixels.
const MARKER_HALF_WIDTH: f32 = 0.75;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Zone {
    /// Transparent - outside the wheel, the gap between ring and wedge, or the notch.
    Outside,
    /// Selects hue.
    HueRing,
    /// Selects saturation and value.
    Wedge,
    /// Displays the current color.
    Swatch,
}

/// Distance from center, and angle in turns clockwise from the top.
fn polar(x: f32, y: f32) -> (f32, f32) {
    let dx = x - CENTER;
    let dy = y - CENTER;
    let turns = normalize_hue(dx.atan2(-dy) / std::f32::consts::TAU);
    (dx.hypot(dy), turns)
}
fn from_polar(distance: f32, turns: f32) -> (f32, f32) {
    let (sin, cos) = (turns * std::f32::consts::TAU).sin_cos();
    (CENTER + distance * sin, CENTER - distance * cos)
}
fn wedge_value(turns: f32) -> f32 {
    (turns - NOTCH_HALF_WIDTH) / (1.0 - 2.0 * NOTCH_HALF_WIDTH)
}
fn wedge_turns(value: f32) -> f32 {
    NOTCH_HALF_WIDTH + value * (1.0 - 2.0 * NOTCH_HALF_WIDTH)
}

/// Find which part of the wheel lies under a point in wheel-local pixel coordinates.
#[must_use]
pub fn zone_at(x: f32, y: f32) -> Zone {
    let (distance, turns) = polar(x, y);
    if !(distance < OUTER_RADIUS) {
        // Also catches NaN
        Zone::Outside
    } else if distance >= HUE_INNER_RADIUS {
        Zone::HueRing
    } else if (x - CENTER).hypot(y - (CENTER - SWATCH_DISTANCE)) < SWATCH_RADIUS {
        Zone::Swatch
    } else if distance < WEDGE_RADIUS
        && (NOTCH_HALF_WIDTH..=1.0 - NOTCH_HALF_WIDTH).contains(&turns)
    {
        Zone::Wedge
    } else {
        Zone::Outside
    }
}

/// Map a point in wheel-local pixel coordinates to a new color, given the current one.
///
/// The hue ring replaces hue, the wedge replaces saturation and value. Anywhere else leaves
/// the color untouched. The result is always normalized.
#[must_use]
pub fn pick(x: f32, y: f32, current: Hsv) -> Hsv {
    let current = current.normalized();
    let (distance, turns) = polar(x, y);
    match zone_at(x, y) {
        Zone::HueRing => Hsv { h: turns, ..current },
        Zone::Wedge => Hsv {
            s: clamp01(distance / WEDGE_RADIUS),
            v: clamp01(wedge_value(turns)),
            ..current
        },
        Zone::Swatch | Zone::Outside => current,
    }
    .normalized()
}

/// Where the s/v marker for a color is drawn, in wheel-local pixel coordinates.
#[must_use]
pub fn wedge_position(color: Hsv) -> (f32, f32) {
    let color = color.normalized();
    from_polar(color.s * WEDGE_RADIUS, wedge_turns(color.v))
}

/// Black or white, whichever stands out against `background`.
fn ink(background: Rgb) -> Rgb {
    if background.luma() > 0.5 {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

/// A square, straight-alpha RGBA8 image of [`SIZE`] by [`SIZE`] pixels.
#[derive(Clone)]
pub struct WheelImage {
    pixels: Vec<[u8; 4]>,
}
impl Default for WheelImage {
    fn default() -> Self {
        Self {
            pixels: vec![[0; 4]; SIZE * SIZE],
        }
    }
}
impl WheelImage {
    /// A fully transparent image.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    /// Render a fresh image for `color`.
    #[must_use]
    pub fn rendered(color: Hsv) -> Self {
        let mut image = Self::new();
        render(&mut image, color);
        image
    }
    #[must_use]
    pub fn size(&self) -> [usize; 2] {
        [SIZE, SIZE]
    }
    /// Pixel at `(x, y)`, or `None` if out of bounds.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= SIZE || y >= SIZE {
            return None;
        }
        self.pixels.get(y * SIZE + x).copied()
    }
    /// Row-major pixels.
    #[must_use]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }
    /// Row-major RGBA bytes, as expected by most image and texture APIs.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

/// Fill `image` with the wheel for `color`, overwriting every pixel.
pub fn render(image: &mut WheelImage, color: Hsv) {
    let color = color.normalized();
    let (marker_x, marker_y) = wedge_position(color);
    let current_rgb = color.to_rgb();

    for (index, pixel) in image.pixels.iter_mut().enumerate() {
        // Sample pixel centers
        let x = (index % SIZE).az::<f32>() + 0.5;
        let y = (index / SIZE).az::<f32>() + 0.5;
        let (distance, turns) = polar(x, y);

        let rgb = match zone_at(x, y) {
            Zone::Outside => {
                *pixel = [0; 4];
                continue;
            }
            Zone::HueRing => {
                let rgb = Hsv::new(turns, 1.0, 1.0).to_rgb();
                // Shortest angle between this pixel and the current hue, as an arc length in pixels.
                let delta = (normalize_hue(turns - color.h + 0.5) - 0.5).abs();
                let arc = delta * std::f32::consts::TAU * distance;
                if arc < 1.0 {
                    ink(rgb)
                } else {
                    rgb
                }
            }
            Zone::Wedge => {
                let rgb = Hsv::new(
                    color.h,
                    clamp01(distance / WEDGE_RADIUS),
                    clamp01(wedge_value(turns)),
                )
                .to_rgb();
                let from_marker = (x - marker_x).hypot(y - marker_y);
                if (from_marker - MARKER_RADIUS).abs() < MARKER_HALF_WIDTH {
                    ink(rgb)
                } else {
                    rgb
                }
            }
            Zone::Swatch => current_rgb,
        };
        let [r, g, b] = rgb.to_rgb8();
        *pixel = [r, g, b, u8::MAX];
    }
}

/// One bit per pixel of a [`WheelImage`], set where the image is opaque enough to be part of the wheel.
/// Used to shape the popup: points outside the mask are outside the popup.
#[derive(Clone, PartialEq, Eq)]
pub struct ClipMask {
    bits: bitvec::vec::BitVec,
}
impl ClipMask {
    /// Alpha at or below this is clipped.
    pub const ALPHA_THRESHOLD: u8 = 127;

    #[must_use]
    pub fn from_alpha(image: &WheelImage) -> Self {
        Self {
            bits: image
                .pixels
                .iter()
                .map(|&[_, _, _, alpha]| alpha > Self::ALPHA_THRESHOLD)
                .collect(),
        }
    }
    /// Is the point, in wheel-local pixel coordinates, within the wheel's shape?
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let in_bounds = |c: f32| (0.0..SIZE.az::<f32>()).contains(&c);
        if !in_bounds(x) || !in_bounds(y) {
            return false;
        }
        let x: usize = x.floor().saturating_as();
        let y: usize = y.floor().saturating_as();
        self.bits.get(y * SIZE + x).is_some_and(|bit| *bit)
    }
    /// Number of pixels within the shape.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }
}
impl std::fmt::Debug for ClipMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipMask")
            .field("opaque", &self.count())
            .finish_non_exhaustive()
    }
}
