//! HSV and RGB color types, and the conversions between them.
//!
//! All channels are unitless floats, conceptually in `[0, 1]`. Hue is measured in turns rather
//! than degrees, so it shares that range.

use az::SaturatingAs;

/// Wrap a hue into `[0, 1)`. Non-finite hues become `0.0`.
#[must_use]
pub fn normalize_hue(h: f32) -> f32 {
    if !h.is_finite() {
        return 0.0;
    }
    let wrapped = h.rem_euclid(1.0);
    // rem_euclid of a tiny negative rounds up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}
/// Clamp into `[0, 1]`. NaN becomes `0.0`.
#[must_use]
pub fn clamp01(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ChannelError {
    #[error("{channel} channel is not finite")]
    NotFinite { channel: Channel },
    #[error("{channel} channel {value} outside of [0, 1]")]
    OutOfRange { channel: Channel, value: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}
impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        })
    }
}

/// Hue, saturation, value.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}
impl Hsv {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
    /// Hue wrapped into `[0, 1)`, saturation and value clamped into `[0, 1]`.
    ///
    /// Saturation and value are clamped, *not* wrapped: an overbright value is just bright.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            h: normalize_hue(self.h),
            s: clamp01(self.s),
            v: clamp01(self.v),
        }
    }
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        hsv_to_rgb(self)
    }
    #[must_use]
    pub fn as_array(self) -> [f32; 3] {
        [self.h, self.s, self.v]
    }
}
impl From<[f32; 3]> for Hsv {
    fn from([h, s, v]: [f32; 3]) -> Self {
        Self { h, s, v }
    }
}

/// Red, green, blue. Gamma is whatever the palette widget uses, we never linearize.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}
impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
    /// Check every channel is a finite number in `[0, 1]`.
    pub fn validated(self) -> Result<Self, ChannelError> {
        for (channel, value) in [
            (Channel::Red, self.r),
            (Channel::Green, self.g),
            (Channel::Blue, self.b),
        ] {
            if !value.is_finite() {
                return Err(ChannelError::NotFinite { channel });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(ChannelError::OutOfRange { channel, value });
            }
        }
        Ok(self)
    }
    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        rgb_to_hsv(self)
    }
    /// Rec.601 weighted brightness. Not perceptual, only good enough to choose black or white ink.
    #[must_use]
    pub fn luma(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
    /// Quantize to 16 bit device channels, rounding to nearest. Out-of-range channels saturate.
    #[must_use]
    pub fn to_device(self) -> DeviceRgb {
        let quantize = |c: f32| (clamp01(c) * 65535.0 + 0.5).saturating_as::<u16>();
        DeviceRgb {
            red: quantize(self.r),
            green: quantize(self.g),
            blue: quantize(self.b),
        }
    }
    #[must_use]
    pub fn from_device(device: DeviceRgb) -> Self {
        Self {
            r: f32::from(device.red) / 65535.0,
            g: f32::from(device.green) / 65535.0,
            b: f32::from(device.blue) / 65535.0,
        }
    }
    /// Quantize to 8 bit channels, rounding to nearest.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f32| (clamp01(c) * 255.0 + 0.5).saturating_as::<u8>();
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
    #[must_use]
    pub fn as_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}
impl From<[f32; 3]> for Rgb {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }
}

/// 16 bit per channel device color, as reported by toolkit color selection widgets.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct DeviceRgb {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

/// Hexcone RGB to HSV. Grays (including black) have zero hue and saturation.
#[must_use]
pub fn rgb_to_hsv(Rgb { r, g, b }: Rgb) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let v = max;
    if max == min {
        return Hsv::new(0.0, 0.0, v);
    }
    let range = max - min;
    let s = range / max;
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    Hsv::new(normalize_hue(h / 6.0), s, v)
}

/// Hexcone HSV to RGB. Hue is wrapped, so any finite hue is accepted.
#[must_use]
pub fn hsv_to_rgb(Hsv { h, s, v }: Hsv) -> Rgb {
    if s == 0.0 {
        return Rgb::new(v, v, v);
    }
    let h6 = normalize_hue(h) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    // A hue just shy of 1.0 can round up to sector 6, which is sector 0 again.
    match sector.saturating_as::<u8>() {
        0 | 6 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

#[cfg(test)]
mod test {
    use super::{clamp01, hsv_to_rgb, normalize_hue, rgb_to_hsv, DeviceRgb, Hsv, Rgb};

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn round_trip_grid() {
        // Every combination of a handful of levels, including the extremes.
        let levels = [0.0, 0.1, 0.25, 0.5, 0.6, 0.99, 1.0];
        for r in levels {
            for g in levels {
                for b in levels {
                    let rgb = Rgb::new(r, g, b);
                    let back = hsv_to_rgb(rgb_to_hsv(rgb));
                    assert!(
                        approx(back.r, r) && approx(back.g, g) && approx(back.b, b),
                        "{rgb:?} came back as {back:?}"
                    );
                }
            }
        }
    }
    #[test]
    fn known_colors() {
        let red = rgb_to_hsv(Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(red, Hsv::new(0.0, 1.0, 1.0));
        let green = rgb_to_hsv(Rgb::new(0.0, 1.0, 0.0));
        assert!(approx(green.h, 1.0 / 3.0));
        let blue = rgb_to_hsv(Rgb::new(0.0, 0.0, 1.0));
        assert!(approx(blue.h, 2.0 / 3.0));
        // Magenta sits just before wrapping back to red
        let magenta = rgb_to_hsv(Rgb::new(1.0, 0.0, 1.0));
        assert!(approx(magenta.h, 5.0 / 6.0));

        let gray = rgb_to_hsv(Rgb::new(0.5, 0.5, 0.5));
        assert_eq!(gray, Hsv::new(0.0, 0.0, 0.5));
        assert_eq!(hsv_to_rgb(Hsv::new(0.7, 0.0, 0.25)), Rgb::new(0.25, 0.25, 0.25));
    }
    #[test]
    fn hue_wraps() {
        for (input, expected) in [
            (0.0, 0.0),
            (0.25, 0.25),
            (1.0, 0.0),
            (1.5, 0.5),
            (-0.25, 0.75),
            (-3.75, 0.25),
            (7.125, 0.125),
        ] {
            let h = normalize_hue(input);
            assert!((0.0..1.0).contains(&h));
            assert!(approx(h, expected), "{input} -> {h}, expected {expected}");
        }
        // Rounds up to 1.0 if done naively.
        assert!((0.0..1.0).contains(&normalize_hue(-1e-9)));
        assert_eq!(normalize_hue(f32::NAN), 0.0);
        assert_eq!(normalize_hue(f32::INFINITY), 0.0);
    }
    #[test]
    fn clamp_identity_in_range() {
        for x in [0.0, 0.001, 0.5, 0.999, 1.0] {
            assert_eq!(clamp01(x), x);
        }
        assert_eq!(clamp01(1.2), 1.0);
        assert_eq!(clamp01(-0.3), 0.0);
        assert_eq!(clamp01(f32::NEG_INFINITY), 0.0);
        assert_eq!(clamp01(f32::NAN), 0.0);
    }
    #[test]
    fn normalize_scenario() {
        let hsv = Hsv::new(1.5, 1.2, -0.3).normalized();
        assert_eq!(hsv, Hsv::new(0.5, 1.0, 0.0));
    }
    #[test]
    fn validate_channels() {
        assert!(Rgb::new(0.0, 0.5, 1.0).validated().is_ok());
        assert_eq!(
            Rgb::new(0.0, 1.5, 0.0).validated(),
            Err(super::ChannelError::OutOfRange {
                channel: super::Channel::Green,
                value: 1.5
            })
        );
        assert!(Rgb::new(f32::NAN, 0.0, 0.0).validated().is_err());
    }
    #[test]
    fn device_channels() {
        assert_eq!(
            Rgb::WHITE.to_device(),
            DeviceRgb {
                red: u16::MAX,
                green: u16::MAX,
                blue: u16::MAX
            }
        );
        assert_eq!(Rgb::BLACK.to_device(), DeviceRgb::default());
        // Rounds to nearest rather than truncating
        assert_eq!(Rgb::new(0.5, 0.0, 0.0).to_device().red, 32768);

        let device = DeviceRgb {
            red: 1234,
            green: 40000,
            blue: 65535,
        };
        assert_eq!(Rgb::from_device(device).to_device(), device);
    }
}
