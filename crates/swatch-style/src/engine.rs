#![forbid(unsafe_code)]

//! Palette generation, lock-aware re-randomization, swaps and edits.
//!
//! # Derivation policy
//!
//! A random palette grows from a single seed color:
//!
//! - `primary`, `secondary`, `accent` are the first three stops of a
//!   five-stop LCh scale running from the seed to the seed with its hue
//!   rotated by +120°.
//! - `background` is the seed darkened by 2.5 Lab steps, `surface` by 1.5.
//! - `text` is [`pick_accessible_text_color`] over `background`, preferring
//!   white.
//!
//! Everything except the seed draw is a pure function ([`derive_palette`]),
//! so a fixed seed color always yields the same palette.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::color::{Rgb, lch_scale};
use crate::contrast::pick_accessible_text_color;
use crate::error::Result;
use crate::roles::{ColorRoles, LockSet, Role};

/// Stops in the seed scale.
pub const SCALE_STOPS: usize = 5;
/// Hue rotation between the two ends of the seed scale.
pub const SCALE_HUE_SHIFT: f64 = 120.0;
pub const BACKGROUND_DARKEN: f64 = 2.5;
pub const SURFACE_DARKEN: f64 = 1.5;

/// Source of fresh palettes.
///
/// Owns its random number generator. Use [`PaletteEngine::seeded`] for
/// reproducible sequences.
#[derive(Debug, Clone)]
pub struct PaletteEngine {
    rng: SmallRng,
}

impl Default for PaletteEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Draw a uniformly random sRGB color.
    pub fn random_seed_color(&mut self) -> Rgb {
        let [r, g, b]: [u8; 3] = self.rng.random();
        Rgb::new(r, g, b)
    }

    pub fn generate_random_palette(&mut self) -> ColorRoles {
        let seed = self.random_seed_color();
        let palette = derive_palette(seed);
        tracing::debug!(seed = %seed, "generated palette");
        palette
    }

    /// Replace every unlocked role with the matching role of a fresh palette.
    ///
    /// Locked roles come back exactly as they were. Callers owning a
    /// "finalized" flag must clear it.
    pub fn randomize_palette(&mut self, current: &ColorRoles, locks: &LockSet) -> ColorRoles {
        let fresh = self.generate_random_palette();
        let mut next = *current;
        for role in Role::ALL {
            if !locks.is_locked(role) {
                *next.slot_mut(role) = fresh.get(role);
            }
        }
        tracing::debug!(
            locked = ?locks.locked_roles().collect::<Vec<_>>(),
            "randomized unlocked roles"
        );
        next
    }
}

/// Build the full six-role palette from one seed color.
#[must_use]
pub fn derive_palette(seed: Rgb) -> ColorRoles {
    let scale = lch_scale(seed, seed.rotate_hue(SCALE_HUE_SHIFT), SCALE_STOPS);
    let background = seed.darken(BACKGROUND_DARKEN);
    let surface = seed.darken(SURFACE_DARKEN);

    ColorRoles {
        primary: scale[0],
        secondary: scale[1],
        accent: scale[2],
        background,
        surface,
        text: pick_accessible_text_color(background, Rgb::WHITE),
    }
}

/// Exchange two roles' colors and lock flags together.
///
/// Swapping a role with itself returns the inputs unchanged.
#[must_use]
pub fn swap_roles(
    current: &ColorRoles,
    locks: &LockSet,
    a: Role,
    b: Role,
) -> (ColorRoles, LockSet) {
    if a == b {
        return (*current, *locks);
    }

    let colors = current.with(a, current.get(b)).with(b, current.get(a));
    let mut next_locks = *locks;
    next_locks.set(a, locks.is_locked(b));
    next_locks.set(b, locks.is_locked(a));

    tracing::debug!(%a, %b, "swapped roles");
    (colors, next_locks)
}

/// [`swap_roles`] for untrusted role names, e.g. drag-and-drop payloads.
pub fn swap_roles_by_name(
    current: &ColorRoles,
    locks: &LockSet,
    a: &str,
    b: &str,
) -> Result<(ColorRoles, LockSet)> {
    let a: Role = a.parse()?;
    let b: Role = b.parse()?;
    Ok(swap_roles(current, locks, a, b))
}

/// Replace one role's color. Does not consult locks.
pub fn set_role(current: &ColorRoles, role: Role, hex: &str) -> Result<ColorRoles> {
    let color = Rgb::parse_hex(hex)?;
    tracing::debug!(%role, color = %color, "set role");
    Ok(current.with(role, color))
}

/// [`set_role`] with the role given by name.
pub fn set_role_by_name(current: &ColorRoles, role: &str, hex: &str) -> Result<ColorRoles> {
    set_role(current, role.parse()?, hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::{WCAG_AA_NORMAL_TEXT, contrast_ratio};
    use crate::error::PaletteError;

    fn hex(s: &str) -> Rgb {
        Rgb::parse_hex(s).unwrap()
    }

    #[test]
    fn derive_palette_pins_the_policy() {
        let palette = derive_palette(hex("#06b6d4"));
        assert_eq!(palette.primary, hex("#06b6d4"));
        assert_eq!(palette.secondary, hex("#00a6ee"));
        assert_eq!(palette.accent, hex("#1e8efb"));
        assert_eq!(palette.background, hex("#00435e"));
        assert_eq!(palette.surface, hex("#006f8b"));
        assert_eq!(palette.text, Rgb::WHITE);
    }

    #[test]
    fn light_seed_gets_dark_text_only_when_white_fails() {
        // White darkened 2.5 steps sits at Lab L 55: too light for white text.
        let palette = derive_palette(Rgb::WHITE);
        assert_eq!(palette.primary, Rgb::WHITE);
        assert!(contrast_ratio(palette.background, Rgb::WHITE) < WCAG_AA_NORMAL_TEXT);
        assert_eq!(palette.text, Rgb::NEAR_BLACK);
    }

    #[test]
    fn primary_is_always_the_seed() {
        let mut engine = PaletteEngine::seeded(7);
        for _ in 0..32 {
            let seed = engine.random_seed_color();
            assert_eq!(derive_palette(seed).primary, seed);
        }
    }

    #[test]
    fn seeded_engines_are_reproducible() {
        let mut a = PaletteEngine::seeded(42);
        let mut b = PaletteEngine::seeded(42);
        for _ in 0..8 {
            assert_eq!(a.generate_random_palette(), b.generate_random_palette());
        }
    }

    #[test]
    fn randomize_keeps_locked_roles() {
        let current = ColorRoles::default();
        let locks = LockSet::from_roles([Role::Primary, Role::Text]);
        let mut engine = PaletteEngine::seeded(3);
        let next = engine.randomize_palette(&current, &locks);
        assert_eq!(next.primary, current.primary);
        assert_eq!(next.text, current.text);
    }

    #[test]
    fn randomize_with_no_locks_matches_a_fresh_palette() {
        let mut reference = PaletteEngine::seeded(11);
        let expected = reference.generate_random_palette();

        let mut engine = PaletteEngine::seeded(11);
        let next = engine.randomize_palette(&ColorRoles::default(), &LockSet::new());
        assert_eq!(next, expected);
    }

    #[test]
    fn randomize_with_everything_locked_is_identity() {
        let current = ColorRoles::default();
        let locks = LockSet::from_roles(Role::ALL);
        let mut engine = PaletteEngine::seeded(5);
        assert_eq!(engine.randomize_palette(&current, &locks), current);
    }

    #[test]
    fn swap_moves_color_and_lock_together() {
        let current = ColorRoles::default();
        let locks = LockSet::from_roles([Role::Primary]);
        let (colors, next_locks) = swap_roles(&current, &locks, Role::Primary, Role::Background);

        assert_eq!(colors.primary, current.background);
        assert_eq!(colors.background, current.primary);
        assert_eq!(colors.accent, current.accent);
        assert!(!next_locks.is_locked(Role::Primary));
        assert!(next_locks.is_locked(Role::Background));
    }

    #[test]
    fn swap_with_self_is_noop() {
        let current = ColorRoles::default();
        let locks = LockSet::from_roles([Role::Primary]);
        assert_eq!(
            swap_roles_by_name(&current, &locks, "primary", "primary").unwrap(),
            (current, locks)
        );
    }

    #[test]
    fn swap_rejects_unknown_roles() {
        let current = ColorRoles::default();
        let locks = LockSet::new();
        assert_eq!(
            swap_roles_by_name(&current, &locks, "primary", "border"),
            Err(PaletteError::invalid_role("border"))
        );
        assert_eq!(
            swap_roles_by_name(&current, &locks, "", "text"),
            Err(PaletteError::invalid_role(""))
        );
    }

    #[test]
    fn set_role_validates_hex() {
        let current = ColorRoles::default();
        let updated = set_role(&current, Role::Accent, "#ABC").unwrap();
        assert_eq!(updated.accent, hex("#aabbcc"));
        assert_eq!(updated.primary, current.primary);

        assert_eq!(
            set_role(&current, Role::Accent, "yellow"),
            Err(PaletteError::invalid_color("yellow"))
        );
        assert_eq!(
            set_role_by_name(&current, "accnt", "#fff"),
            Err(PaletteError::invalid_role("accnt"))
        );
    }
}
