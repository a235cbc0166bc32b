#![forbid(unsafe_code)]

//! Color primitives: hex parsing, HSL rotation and CIE Lab/LCh math.
//!
//! Colors cross every public boundary as `#rrggbb` (or `#rgb`) strings and
//! live internally as [`Rgb`]. Anything perceptual (darkening, mixing,
//! scales) runs in CIE Lab or its cylindrical form LCh, using the D65 white
//! point. Results that fall outside the sRGB gamut are clipped per channel.

use std::fmt;
use std::str::FromStr;

use crate::error::{PaletteError, Result};

/// Lab lightness removed by one `darken(1.0)` step.
pub const DARKEN_STEP: f64 = 18.0;

// D65 reference white.
const XN: f64 = 0.950_470;
const YN: f64 = 1.0;
const ZN: f64 = 1.088_830;

const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

/// Chroma below this is treated as achromatic (hue undefined).
const ACHROMATIC_CHROMA: f64 = 1e-4;

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// HSL triple: hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// CIE L*a*b* (D65).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Cylindrical Lab. `h` is `None` for achromatic colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: Option<f64>,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    /// Fallback text color used when white does not reach AA contrast.
    pub const NEAR_BLACK: Self = Self::from_u32(0x11_18_27);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value; the top byte is ignored.
    #[inline]
    pub const fn from_u32(packed: u32) -> Self {
        Self::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }

    /// Parse `#rgb` or `#rrggbb`, case-insensitive, surrounding whitespace ignored.
    pub fn parse_hex(input: &str) -> Result<Self> {
        let digits = input
            .trim()
            .strip_prefix('#')
            .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| PaletteError::invalid_color(input))?;

        let nibble = |idx: usize| -> u8 {
            // Validated above: every byte is an ASCII hex digit.
            (digits.as_bytes()[idx] as char).to_digit(16).unwrap_or(0) as u8
        };

        match digits.len() {
            3 => Ok(Self::new(nibble(0) * 17, nibble(1) * 17, nibble(2) * 17)),
            6 => Ok(Self::new(
                nibble(0) << 4 | nibble(1),
                nibble(2) << 4 | nibble(3),
                nibble(4) << 4 | nibble(5),
            )),
            _ => Err(PaletteError::invalid_color(input)),
        }
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Hsl { h: h * 60.0, s, l }
    }

    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        let Hsl { h, s, l } = hsl;
        if s <= 0.0 {
            let v = unit_to_u8(l);
            return Self::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = h.rem_euclid(360.0) / 360.0;
        let channel = |t: f64| -> u8 {
            let t = t.rem_euclid(1.0);
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            unit_to_u8(v)
        };

        Self::new(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
    }

    #[must_use]
    pub fn to_lab(self) -> Lab {
        let r = srgb_to_linear(self.r);
        let g = srgb_to_linear(self.g);
        let b = srgb_to_linear(self.b);

        let fx = lab_f((0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b) / XN);
        let fy = lab_f((0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b) / YN);
        let fz = lab_f((0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b) / ZN);

        Lab {
            l: (116.0 * fy - 16.0).max(0.0),
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    #[must_use]
    pub fn from_lab(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;

        let x = XN * lab_f_inv(fx);
        let y = YN * lab_f_inv(fy);
        let z = ZN * lab_f_inv(fz);

        Self::new(
            linear_to_srgb(3.240_454_2 * x - 1.537_138_5 * y - 0.498_531_4 * z),
            linear_to_srgb(-0.969_266_0 * x + 1.876_010_8 * y + 0.041_556_0 * z),
            linear_to_srgb(0.055_643_4 * x - 0.204_025_9 * y + 1.057_225_2 * z),
        )
    }

    #[must_use]
    pub fn to_lch(self) -> Lch {
        let Lab { l, a, b } = self.to_lab();
        let c = a.hypot(b);
        let h = (c >= ACHROMATIC_CHROMA).then(|| b.atan2(a).to_degrees().rem_euclid(360.0));
        Lch { l, c, h }
    }

    #[must_use]
    pub fn from_lch(lch: Lch) -> Self {
        let (a, b) = match lch.h {
            Some(h) => {
                let rad = h.to_radians();
                (lch.c * rad.cos(), lch.c * rad.sin())
            }
            None => (0.0, 0.0),
        };
        Self::from_lab(Lab { l: lch.l, a, b })
    }

    /// Rotate the HSL hue by `degrees`. Grays have no hue and come back unchanged.
    #[must_use]
    pub fn rotate_hue(self, degrees: f64) -> Self {
        let hsl = self.to_hsl();
        if hsl.s <= 0.0 {
            return self;
        }
        Self::from_hsl(Hsl {
            h: (hsl.h + degrees).rem_euclid(360.0),
            ..hsl
        })
    }

    /// Lower Lab lightness by `amount` steps of [`DARKEN_STEP`].
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        let lab = self.to_lab();
        Self::from_lab(Lab {
            l: lab.l - DARKEN_STEP * amount,
            ..lab
        })
    }

    #[must_use]
    pub fn brighten(self, amount: f64) -> Self {
        self.darken(-amount)
    }

    /// Interpolate toward `other` in Lab. `weight` 0 returns `self`, 1 returns `other`.
    #[must_use]
    pub fn mix_lab(self, other: Rgb, weight: f64) -> Self {
        let w = weight.clamp(0.0, 1.0);
        let from = self.to_lab();
        let to = other.to_lab();
        Self::from_lab(Lab {
            l: lerp(from.l, to.l, w),
            a: lerp(from.a, to.a, w),
            b: lerp(from.b, to.b, w),
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s)
    }
}

/// Evenly spaced colors from `from` to `to` inclusive, interpolated in LCh.
///
/// Hue takes the shorter way around the wheel. When one endpoint is
/// achromatic it borrows the other endpoint's hue so the ramp does not swing
/// through unrelated colors. Endpoints are returned exactly.
#[must_use]
pub fn lch_scale(from: Rgb, to: Rgb, stops: usize) -> Vec<Rgb> {
    match stops {
        0 => Vec::new(),
        1 => vec![from],
        _ => {
            let last = stops - 1;
            let start = from.to_lch();
            let end = to.to_lch();
            (0..stops)
                .map(|i| match i {
                    0 => from,
                    i if i == last => to,
                    i => Rgb::from_lch(interpolate_lch(start, end, i as f64 / last as f64)),
                })
                .collect()
        }
    }
}

fn interpolate_lch(start: Lch, end: Lch, t: f64) -> Lch {
    let h = match (start.h, end.h) {
        (Some(h0), Some(h1)) => {
            let mut dh = h1 - h0;
            if dh > 180.0 {
                dh -= 360.0;
            } else if dh < -180.0 {
                dh += 360.0;
            }
            Some((h0 + t * dh).rem_euclid(360.0))
        }
        (Some(h), None) | (None, Some(h)) => Some(h),
        (None, None) => None,
    };
    Lch {
        l: lerp(start.l, end.l, t),
        c: lerp(start.c, end.c, t),
        h,
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// WCAG/sRGB transfer function, 8-bit channel to linear light.
#[inline]
pub(crate) fn srgb_to_linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(v: f64) -> u8 {
    let encoded = if v <= 0.003_130_8 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    };
    unit_to_u8(encoded)
}

#[inline]
fn unit_to_u8(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > T3 { t.cbrt() } else { t / T2 + T0 }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    if t > T1 { t * t * t } else { T2 * (t - T0) }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}
