//! Ordered scale levels (likelihood, impact, risk).

use serde::{Deserialize, Serialize};

use crate::errors::InvariantError;

/// One step of a scale. `name` and `color` are display payload only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleLevel {
    pub level: u32,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl ScaleLevel {
    pub fn new(level: u32, name: impl Into<String>) -> Self {
        Self {
            level,
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// A scale must list positive levels in strictly ascending order.
/// Empty scales are allowed and produce an empty matrix.
pub fn validate_scale(kind: &str, levels: &[ScaleLevel]) -> Result<(), InvariantError> {
    if let Some(zero) = levels.iter().find(|l| l.level == 0) {
        return Err(InvariantError::InvalidScale {
            reason: format!("{kind} level '{}' must be positive", zero.name),
        });
    }
    if let Some(pair) = levels.windows(2).find(|w| w[0].level >= w[1].level) {
        return Err(InvariantError::InvalidScale {
            reason: format!(
                "{kind} levels must be strictly ascending ({} then {})",
                pair[0].level, pair[1].level
            ),
        });
    }
    Ok(())
}
