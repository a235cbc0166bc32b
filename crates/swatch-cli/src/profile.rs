use std::path::Path;

use swatch_style::{ColorRoles, LockSet, Rgb, Role, ThemeSnapshot};

use crate::error::{CliError, Result};

/// Prefix selecting a built-in profile instead of a file path.
pub const BUILTIN_PREFIX: &str = "builtin:";

/// A palette loaded from a `key=value` profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteProfile {
    pub name: String,
    pub snapshot: ThemeSnapshot,
}

const DEFAULT: &str = include_str!("../profiles/default.env");
const MIDNIGHT: &str = include_str!("../profiles/midnight.env");

const BUILTIN_PROFILES: [(&str, &str); 2] = [("default", DEFAULT), ("midnight", MIDNIGHT)];

#[must_use]
pub fn list_profile_names() -> Vec<String> {
    BUILTIN_PROFILES
        .iter()
        .map(|(name, _)| (*name).to_string())
        .collect()
}

pub fn load_builtin(name: &str) -> Result<PaletteProfile> {
    let (_, content) = BUILTIN_PROFILES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .ok_or_else(|| CliError::ProfileNotFound {
            name: name.to_string(),
        })?;

    Ok(PaletteProfile {
        name: name.to_string(),
        snapshot: parse_profile_content(content)?,
    })
}

pub fn load_profile_file(path: &Path) -> Result<PaletteProfile> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(PaletteProfile {
        name: path.display().to_string(),
        snapshot: parse_profile_content(&content)?,
    })
}

/// `None` loads the `default` built-in; `builtin:<name>` a named built-in;
/// anything else is read as a file path.
pub fn resolve_profile(selector: Option<&str>) -> Result<PaletteProfile> {
    match selector {
        None => load_builtin("default"),
        Some(raw) => match raw.strip_prefix(BUILTIN_PREFIX) {
            Some(name) => load_builtin(name),
            None => load_profile_file(Path::new(raw)),
        },
    }
}

/// Parse profile text. Missing roles keep their default color; a repeated
/// key, `locked` included, replaces the earlier value.
pub fn parse_profile_content(content: &str) -> Result<ThemeSnapshot> {
    let mut colors = ColorRoles::default();
    let mut locks = LockSet::new();
    let mut finalized = false;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let invalid = |message: String| CliError::InvalidProfile {
            line: line_no,
            message,
        };

        let Some((key, value_raw)) = line.split_once('=') else {
            return Err(invalid(format!("expected key=value, got {line:?}")));
        };

        let key = key.trim();
        let mut value = value_raw.trim();
        if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
            value = &value[1..value.len() - 1];
        }

        match key {
            "locked" => {
                locks = LockSet::new();
                for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                    let role: Role = name.parse().map_err(|e| invalid(format!("{e}")))?;
                    locks.set(role, true);
                }
            }
            "finalized" => {
                finalized = parse_bool(value).ok_or_else(|| {
                    invalid(format!("finalized: expected a boolean, got {value:?}"))
                })?;
            }
            _ => {
                let role: Role = key
                    .parse()
                    .map_err(|_| invalid(format!("unknown key {key:?}")))?;
                let color = Rgb::parse_hex(value).map_err(|e| invalid(format!("{role}: {e}")))?;
                *colors.slot_mut(role) = color;
            }
        }
    }

    Ok(ThemeSnapshot {
        colors,
        locks,
        finalized,
    })
}

/// Render a snapshot back into profile text.
#[must_use]
pub fn render_profile(snapshot: &ThemeSnapshot) -> String {
    let mut out = String::new();
    for (role, color) in snapshot.colors.iter() {
        out.push_str(&format!("{role}={color}\n"));
    }
    let locked: Vec<&str> = snapshot.locks.locked_roles().map(Role::name).collect();
    out.push_str(&format!("locked={}\n", locked.join(",")));
    out.push_str(&format!("finalized={}\n", snapshot.finalized));
    out
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
