use std::fmt::Write as _;

use serde::Serialize;
use swatch_style::{ContrastAudit, Rgb, Role, SectionText, ThemeSnapshot};

use crate::error::Result;
use crate::profile::render_profile;

/// What a command produced, printable as text or JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    Palette(ThemeSnapshot),
    Contrast {
        a: Rgb,
        b: Rgb,
        ratio: f64,
        passes_aa: bool,
    },
    Color {
        color: Rgb,
    },
    Section(SectionText),
    Audit(ContrastAudit),
    Roles {
        roles: Vec<RoleRow>,
    },
    Profiles {
        names: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRow {
    pub role: Role,
    pub label: &'static str,
    pub color: Rgb,
    pub locked: bool,
}

impl Report {
    pub fn render(&self, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string_pretty(self)?);
        }
        Ok(self.render_text())
    }

    /// Palettes render as profile text so the output can be saved and reloaded.
    #[must_use]
    pub fn render_text(&self) -> String {
        match self {
            Self::Palette(snapshot) => render_profile(snapshot).trim_end().to_string(),
            Self::Contrast {
                a,
                b,
                ratio,
                passes_aa,
            } => format!(
                "{a} vs {b}: {ratio:.2}:1 ({})",
                if *passes_aa { "AA pass" } else { "AA fail" }
            ),
            Self::Color { color } => color.to_string(),
            Self::Section(section) => {
                format!("heading={}\nbody={}", section.heading, section.body)
            }
            Self::Audit(audit) => {
                let mut out = String::new();
                for check in &audit.checks {
                    let _ = writeln!(
                        out,
                        "{:<10} on {:<10} {:>5.2}:1  {}",
                        check.foreground.name(),
                        check.background.name(),
                        check.ratio,
                        if check.passes_aa { "pass" } else { "FAIL" }
                    );
                }
                let _ = write!(out, "white on primary      {:>5.2}:1", audit.white_on_primary);
                out
            }
            Self::Roles { roles } => roles
                .iter()
                .map(|row| {
                    format!(
                        "{:<10} {:<10} {}{}",
                        row.role.name(),
                        row.label,
                        row.color,
                        if row.locked { "  locked" } else { "" }
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Profiles { names } => names.join("\n"),
        }
    }
}
