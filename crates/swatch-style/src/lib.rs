#![forbid(unsafe_code)]

//! Six-role color palettes for generated starter sites.
//!
//! # Role in the workspace
//! `swatch-style` owns the palette a project is scaffolded with: which six
//! colors it has, how a fresh one is generated from a random seed, how locks
//! protect roles from re-randomization, and which text color is safe to draw
//! over any of them. `swatch-cli` is a thin shell around it.
//!
//! # This crate provides
//! - [`Rgb`] and Lab/LCh color math ([`color`]).
//! - WCAG contrast utilities and [`pick_accessible_text_color`] ([`contrast`]).
//! - The closed [`Role`] set, [`ColorRoles`] and [`LockSet`] ([`roles`]).
//! - [`PaletteEngine`] and the pure palette operations ([`engine`]).
//! - [`ThemeStore`], the single owner of palette state ([`store`]).
//!
//! # Example
//!
//! ```
//! use swatch_style::{PaletteEngine, Role, ThemeStore, contrast_ratio, pick_accessible_text_color};
//!
//! let mut store = ThemeStore::with_engine(PaletteEngine::seeded(7));
//! store.set_lock(Role::Primary, true);
//! let primary = store.colors().primary;
//! store.randomize();
//! assert_eq!(store.colors().primary, primary);
//!
//! let text = pick_accessible_text_color(store.colors().background, store.colors().text);
//! assert!(contrast_ratio(text, store.colors().background) > 1.0);
//! ```

/// Hex parsing and perceptual color math.
pub mod color;
/// WCAG contrast ratio and accessible text selection.
pub mod contrast;
/// Palette generation and pure palette operations.
pub mod engine;
/// Error type shared by every fallible operation.
pub mod error;
/// Role enum, palettes and lock sets.
pub mod roles;
/// Owned theme state with the finalized flag.
pub mod store;

pub use color::{Hsl, Lab, Lch, Rgb, lch_scale};
pub use contrast::{
    SUBTLE_TEXT_WEIGHT, SectionText, WCAG_AA_LARGE_TEXT, WCAG_AA_NORMAL_TEXT, contrast_ratio,
    contrast_ratio_hex, meets_wcag_aa, pick_accessible_text_color, pick_accessible_text_color_hex,
    relative_luminance, section_text, subtle_mix, subtle_mix_hex,
};
pub use engine::{
    PaletteEngine, derive_palette, set_role, set_role_by_name, swap_roles, swap_roles_by_name,
};
pub use error::{PaletteError, Result};
pub use roles::{ColorRoles, LockSet, Role};
pub use store::{ContrastAudit, ContrastCheck, ThemeSnapshot, ThemeStore};
