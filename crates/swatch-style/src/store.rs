#![forbid(unsafe_code)]

//! Explicitly owned theme state.
//!
//! [`ThemeStore`] is the single owner of the current palette, its locks and
//! the "finalized" flag. It is created by whoever drives the wizard and
//! handed to collaborators by `&mut`; there is no ambient or global theme.
//!
//! Every successful palette mutation clears `finalized`. A failed operation
//! returns an error and leaves all state exactly as it was.

use crate::color::Rgb;
use crate::contrast::{WCAG_AA_NORMAL_TEXT, contrast_ratio};
use crate::engine::{self, PaletteEngine};
use crate::error::{PaletteError, Result};
use crate::roles::{ColorRoles, LockSet, Role};

/// A copy of the store's observable state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThemeSnapshot {
    pub colors: ColorRoles,
    pub locks: LockSet,
    pub finalized: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ThemeStore {
    colors: ColorRoles,
    locks: LockSet,
    finalized: bool,
    engine: PaletteEngine,
}

impl ThemeStore {
    /// Default palette, nothing locked, not finalized.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_engine(engine: PaletteEngine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: ThemeSnapshot, engine: PaletteEngine) -> Self {
        Self {
            colors: snapshot.colors,
            locks: snapshot.locks,
            finalized: snapshot.finalized,
            engine,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            colors: self.colors,
            locks: self.locks,
            finalized: self.finalized,
        }
    }

    #[must_use]
    pub fn colors(&self) -> &ColorRoles {
        &self.colors
    }

    #[must_use]
    pub fn locks(&self) -> &LockSet {
        &self.locks
    }

    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn finalize(&mut self) {
        self.finalized = true;
        tracing::debug!("palette finalized");
    }

    /// Start over for a new project.
    pub fn reset(&mut self) {
        self.colors = ColorRoles::default();
        self.locks = LockSet::new();
        self.finalized = false;
        tracing::debug!("theme store reset");
    }

    pub fn randomize(&mut self) -> &ColorRoles {
        self.colors = self.engine.randomize_palette(&self.colors, &self.locks);
        self.finalized = false;
        &self.colors
    }

    /// Edit one role. Locked roles are refused with [`PaletteError::RoleLocked`].
    pub fn set_role(&mut self, role: Role, hex: &str) -> Result<Rgb> {
        if self.locks.is_locked(role) {
            tracing::debug!(%role, "refused edit of locked role");
            return Err(PaletteError::RoleLocked { role });
        }
        self.colors = engine::set_role(&self.colors, role, hex)?;
        self.finalized = false;
        Ok(self.colors.get(role))
    }

    pub fn swap(&mut self, a: Role, b: Role) {
        if a == b {
            return;
        }
        (self.colors, self.locks) = engine::swap_roles(&self.colors, &self.locks, a, b);
        self.finalized = false;
    }

    /// [`ThemeStore::swap`] for untrusted role names.
    pub fn swap_named(&mut self, a: &str, b: &str) -> Result<()> {
        let a: Role = a.parse()?;
        let b: Role = b.parse()?;
        self.swap(a, b);
        Ok(())
    }

    /// Flip a role's lock and return the new state.
    pub fn toggle_lock(&mut self, role: Role) -> bool {
        let locked = self.locks.toggle(role);
        self.finalized = false;
        tracing::debug!(%role, locked, "toggled lock");
        locked
    }

    pub fn set_lock(&mut self, role: Role, locked: bool) {
        if self.locks.is_locked(role) != locked {
            self.toggle_lock(role);
        }
    }

    /// Text contrast of the current palette over its own surfaces.
    #[must_use]
    pub fn audit(&self) -> ContrastAudit {
        ContrastAudit::of(&self.colors)
    }
}

/// One foreground/background pairing and how it scores.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContrastCheck {
    pub foreground: Role,
    pub background: Role,
    pub ratio: f64,
    pub passes_aa: bool,
}

/// Contrast of the pairings a generated site actually renders.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContrastAudit {
    pub checks: Vec<ContrastCheck>,
    /// White button labels on the primary color.
    pub white_on_primary: f64,
}

impl ContrastAudit {
    const PAIRINGS: [(Role, Role); 3] = [
        (Role::Text, Role::Background),
        (Role::Text, Role::Surface),
        (Role::Accent, Role::Surface),
    ];

    #[must_use]
    pub fn of(colors: &ColorRoles) -> Self {
        let checks = Self::PAIRINGS
            .into_iter()
            .map(|(foreground, background)| {
                let ratio = contrast_ratio(colors.get(foreground), colors.get(background));
                ContrastCheck {
                    foreground,
                    background,
                    ratio,
                    passes_aa: ratio >= WCAG_AA_NORMAL_TEXT,
                }
            })
            .collect();

        Self {
            checks,
            white_on_primary: contrast_ratio(Rgb::WHITE, colors.primary),
        }
    }

    #[must_use]
    pub fn all_pass(&self) -> bool {
        self.checks.iter().all(|check| check.passes_aa)
    }
}
