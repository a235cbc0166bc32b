#![forbid(unsafe_code)]

//! The fixed six-role palette model.
//!
//! Roles are a closed enum, so "every role is always present" holds by
//! construction: [`ColorRoles`] has one field per role and [`LockSet`] one
//! flag per role.

use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;
use crate::error::{PaletteError, Result};

/// A named color slot in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Background,
    Surface,
    Text,
}

impl Role {
    pub const COUNT: usize = 6;

    pub const ALL: [Role; Self::COUNT] = [
        Role::Primary,
        Role::Secondary,
        Role::Accent,
        Role::Background,
        Role::Surface,
        Role::Text,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Accent => 2,
            Self::Background => 3,
            Self::Surface => 4,
            Self::Text => 5,
        }
    }

    /// Lowercase key, as used in profiles and serialized maps.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Background => "background",
            Self::Surface => "surface",
            Self::Text => "text",
        }
    }

    /// Display label for pickers.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Secondary => "Secondary",
            Self::Accent => "Accent",
            Self::Background => "Background",
            Self::Surface => "Surface",
            Self::Text => "Text",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| PaletteError::invalid_role(s))
    }
}

/// One color per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorRoles {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
}

impl Default for ColorRoles {
    /// The palette a fresh project starts with.
    fn default() -> Self {
        Self {
            primary: Rgb::from_u32(0x06b6d4),
            secondary: Rgb::from_u32(0x64748b),
            accent: Rgb::from_u32(0xeab308),
            background: Rgb::from_u32(0xf1f5f9),
            surface: Rgb::from_u32(0xffffff),
            text: Rgb::from_u32(0x222222),
        }
    }
}

impl ColorRoles {
    #[must_use]
    pub const fn get(&self, role: Role) -> Rgb {
        match role {
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Accent => self.accent,
            Role::Background => self.background,
            Role::Surface => self.surface,
            Role::Text => self.text,
        }
    }

    pub fn slot_mut(&mut self, role: Role) -> &mut Rgb {
        match role {
            Role::Primary => &mut self.primary,
            Role::Secondary => &mut self.secondary,
            Role::Accent => &mut self.accent,
            Role::Background => &mut self.background,
            Role::Surface => &mut self.surface,
            Role::Text => &mut self.text,
        }
    }

    /// Copy with one role replaced.
    #[must_use]
    pub fn with(mut self, role: Role, color: Rgb) -> Self {
        *self.slot_mut(role) = color;
        self
    }

    /// `(role, color)` pairs in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Rgb)> + '_ {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

/// Per-role protection from randomization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LockSet {
    locked: [bool; Role::COUNT],
}

impl LockSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            locked: [false; Role::COUNT],
        }
    }

    #[must_use]
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut locks = Self::new();
        for role in roles {
            locks.set(role, true);
        }
        locks
    }

    #[inline]
    #[must_use]
    pub const fn is_locked(&self, role: Role) -> bool {
        self.locked[role.index()]
    }

    #[inline]
    pub fn set(&mut self, role: Role, locked: bool) {
        self.locked[role.index()] = locked;
    }

    /// Flip the flag and return the new state.
    pub fn toggle(&mut self, role: Role) -> bool {
        let slot = &mut self.locked[role.index()];
        *slot = !*slot;
        *slot
    }

    pub fn locked_roles(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.is_locked(*role))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locked.iter().all(|locked| !locked)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::collections::BTreeMap;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{ColorRoles, LockSet, Role};
    use crate::color::Rgb;

    impl Serialize for Role {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for Role {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(deserializer)?;
            raw.parse().map_err(D::Error::custom)
        }
    }

    impl Serialize for ColorRoles {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_map(self.iter().map(|(role, color)| (role.name(), color)))
        }
    }

    impl<'de> Deserialize<'de> for ColorRoles {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let map = BTreeMap::<Role, Rgb>::deserialize(deserializer)?;
            let mut colors = ColorRoles::default();
            for role in Role::ALL {
                let color = map
                    .get(&role)
                    .ok_or_else(|| D::Error::missing_field(role.name()))?;
                *colors.slot_mut(role) = *color;
            }
            Ok(colors)
        }
    }

    impl Serialize for LockSet {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_map(
                Role::ALL
                    .into_iter()
                    .map(|role| (role.name(), self.is_locked(role))),
            )
        }
    }

    impl<'de> Deserialize<'de> for LockSet {
        /// Absent roles are unlocked.
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let map = BTreeMap::<Role, bool>::deserialize(deserializer)?;
            let mut locks = LockSet::new();
            for (role, locked) in map {
                locks.set(role, locked);
            }
            Ok(locks)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_names_round_trip() {
        for role in Role::ALL {
            assert_eq!(role.name().parse::<Role>().unwrap(), role);
            assert_eq!(role.to_string(), role.name());
            assert_eq!(Role::ALL[role.index()], role);
        }
        assert_eq!("Background".parse::<Role>().unwrap(), Role::Background);
        assert_eq!(" TEXT ".parse::<Role>().unwrap(), Role::Text);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert_eq!(
            "primry".parse::<Role>(),
            Err(PaletteError::invalid_role("primry"))
        );
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn default_palette_matches_start_colors() {
        let palette = ColorRoles::default();
        let hexes: Vec<String> = palette.iter().map(|(_, c)| c.to_hex()).collect();
        assert_eq!(
            hexes,
            ["#06b6d4", "#64748b", "#eab308", "#f1f5f9", "#ffffff", "#222222"]
        );
    }

    #[test]
    fn with_replaces_only_one_role() {
        let base = ColorRoles::default();
        let updated = base.with(Role::Accent, Rgb::BLACK);
        for role in Role::ALL {
            if role == Role::Accent {
                assert_eq!(updated.get(role), Rgb::BLACK);
            } else {
                assert_eq!(updated.get(role), base.get(role));
            }
        }
    }

    #[test]
    fn lock_set_toggles() {
        let mut locks = LockSet::new();
        assert!(locks.is_empty());
        assert!(locks.toggle(Role::Surface));
        assert!(locks.is_locked(Role::Surface));
        assert!(!locks.toggle(Role::Surface));
        assert!(locks.is_empty());

        let locks = LockSet::from_roles([Role::Text, Role::Primary]);
        assert_eq!(
            locks.locked_roles().collect::<Vec<_>>(),
            vec![Role::Primary, Role::Text]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_role_keyed_maps() {
        let json = serde_json::to_value(ColorRoles::default()).unwrap();
        assert_eq!(json["primary"], "#06b6d4");
        assert_eq!(json["text"], "#222222");

        let back: ColorRoles = serde_json::from_value(json).unwrap();
        assert_eq!(back, ColorRoles::default());

        let locks: LockSet = serde_json::from_str(r#"{"accent": true}"#).unwrap();
        assert_eq!(locks, LockSet::from_roles([Role::Accent]));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_incomplete_or_malformed_palettes() {
        let missing = r##"{"primary":"#000000"}"##;
        assert!(serde_json::from_str::<ColorRoles>(missing).is_err());

        let mut full = serde_json::to_value(ColorRoles::default()).unwrap();
        full["border"] = serde_json::json!("#000");
        assert!(serde_json::from_value::<ColorRoles>(full).is_err());

        let mut bad_hex = serde_json::to_value(ColorRoles::default()).unwrap();
        bad_hex["primary"] = serde_json::json!("cyan");
        assert!(serde_json::from_value::<ColorRoles>(bad_hex).is_err());
    }
}
