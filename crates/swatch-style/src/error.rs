use thiserror::Error;

use crate::roles::Role;

pub type Result<T> = std::result::Result<T, PaletteError>;

/// Value-level failures raised at the point of bad input.
///
/// None of these are fatal: the owner of the palette rejects the operation
/// and keeps its prior state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("invalid hex color: {input:?} (expected #rgb or #rrggbb)")]
    InvalidColorFormat { input: String },

    #[error("unknown color role: {name:?}")]
    InvalidRole { name: String },

    #[error("color role {role} is locked")]
    RoleLocked { role: Role },
}

impl PaletteError {
    #[must_use]
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Self::InvalidColorFormat {
            input: input.into(),
        }
    }

    #[must_use]
    pub fn invalid_role(name: impl Into<String>) -> Self {
        Self::InvalidRole { name: name.into() }
    }
}
