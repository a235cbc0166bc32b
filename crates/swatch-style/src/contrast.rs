#![forbid(unsafe_code)]

//! WCAG 2.x contrast utilities and accessible text color selection.
//!
//! Every piece of text drawn over a colored surface goes through
//! [`pick_accessible_text_color`]. The only sanctioned exception is
//! [`subtle_mix`], which deliberately trades contrast for de-emphasis.
//!
//! The `*_hex` functions are the string boundary: they parse their inputs
//! first and fail with [`PaletteError::InvalidColorFormat`](crate::PaletteError)
//! before doing any math.

use crate::color::{Rgb, srgb_to_linear};
use crate::error::Result;

/// WCAG AA minimum for normal body text.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// WCAG AA minimum for large (18pt / 14pt bold) text.
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;

/// Weight used for de-emphasized body text under a heading.
pub const SUBTLE_TEXT_WEIGHT: f64 = 0.85;

/// Relative luminance in `[0, 1]`.
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    0.2126 * srgb_to_linear(color.r)
        + 0.7152 * srgb_to_linear(color.g)
        + 0.0722 * srgb_to_linear(color.b)
}

/// Contrast ratio in `[1, 21]`. Argument order does not matter.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

#[must_use]
pub fn meets_wcag_aa(fg: Rgb, bg: Rgb) -> bool {
    contrast_ratio(fg, bg) >= WCAG_AA_NORMAL_TEXT
}

/// Choose a text color for `background`.
///
/// Candidates are tried in order: `preferred`, white, near-black
/// ([`Rgb::NEAR_BLACK`]). The first one reaching AA contrast wins. If none
/// does (mid-tone backgrounds), the candidate with the highest ratio is
/// returned, earlier candidates winning ties.
#[must_use]
pub fn pick_accessible_text_color(background: Rgb, preferred: Rgb) -> Rgb {
    let candidates = [preferred, Rgb::WHITE, Rgb::NEAR_BLACK];

    let mut best = preferred;
    let mut best_ratio = f64::MIN;
    for candidate in candidates {
        let ratio = contrast_ratio(background, candidate);
        if ratio >= WCAG_AA_NORMAL_TEXT {
            return candidate;
        }
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
    }

    tracing::debug!(
        background = %background,
        preferred = %preferred,
        chosen = %best,
        ratio = best_ratio,
        "no text candidate reaches AA contrast"
    );
    best
}

/// Pull `foreground` toward `background` in Lab.
///
/// `weight` 0 yields the background, 1 the foreground. The result is meant
/// for muted secondary text and carries no contrast guarantee.
#[must_use]
pub fn subtle_mix(background: Rgb, foreground: Rgb, weight: f64) -> Rgb {
    background.mix_lab(foreground, weight)
}

pub fn contrast_ratio_hex(a: &str, b: &str) -> Result<f64> {
    Ok(contrast_ratio(Rgb::parse_hex(a)?, Rgb::parse_hex(b)?))
}

pub fn pick_accessible_text_color_hex(background: &str, preferred: &str) -> Result<String> {
    let background = Rgb::parse_hex(background)?;
    let preferred = Rgb::parse_hex(preferred)?;
    Ok(pick_accessible_text_color(background, preferred).to_hex())
}

pub fn subtle_mix_hex(background: &str, foreground: &str, weight: f64) -> Result<String> {
    let background = Rgb::parse_hex(background)?;
    let foreground = Rgb::parse_hex(foreground)?;
    Ok(subtle_mix(background, foreground, weight).to_hex())
}

/// Text colors for one colored section: an accessible heading and a muted body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionText {
    pub heading: Rgb,
    pub body: Rgb,
}

#[must_use]
pub fn section_text(background: Rgb, preferred: Rgb) -> SectionText {
    let heading = pick_accessible_text_color(background, preferred);
    SectionText {
        heading,
        body: subtle_mix(background, heading, SUBTLE_TEXT_WEIGHT),
    }
}
