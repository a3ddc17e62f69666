use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{ReflowError, ReflowResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Which edges of a node track a future resize of its container.
///
/// `x` keeps the right margin fixed (the left edge moves), `width` lets the node
/// grow with the container, and `y`/`height` are the vertical counterparts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Autoresize {
    /// Left edge follows the container's right edge.
    #[serde(default)]
    pub x: bool,
    /// Top edge follows the container's bottom edge.
    #[serde(default)]
    pub y: bool,
    /// Right edge follows the container's right edge.
    #[serde(default)]
    pub width: bool,
    /// Bottom edge follows the container's bottom edge.
    #[serde(default)]
    pub height: bool,
}

impl Autoresize {
    /// No edge tracks the container.
    pub const NONE: Self = Self {
        x: false,
        y: false,
        width: false,
        height: false,
    };

    /// Width and height track the container (a window's content view).
    pub const FILL: Self = Self {
        x: false,
        y: false,
        width: true,
        height: true,
    };

    fn fill() -> Self {
        Self::FILL
    }
}

/// Spacing and root behaviour shared by every container of a tree.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutConfig {
    /// Margin between a container's border and its content.
    #[serde(default = "default_space")]
    pub outer_space: Vec2,
    /// Gap between neighbouring controls unless an attribute overrides it.
    #[serde(default = "default_space")]
    pub default_space: Vec2,
    /// Autoresize flags of the root container.
    #[serde(default = "Autoresize::fill")]
    pub root_autoresize: Autoresize,
}

fn default_space() -> Vec2 {
    Vec2::new(8.0, 8.0)
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            outer_space: default_space(),
            default_space: default_space(),
            root_autoresize: Autoresize::FILL,
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> ReflowResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ReflowError::validation(format!("invalid layout config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ReflowResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read layout config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Reject negative or non-finite spacing.
    pub fn validate(&self) -> ReflowResult<()> {
        for (name, v) in [
            ("outer_space", self.outer_space),
            ("default_space", self.default_space),
        ] {
            if !v.x.is_finite() || !v.y.is_finite() {
                return Err(ReflowError::validation(format!("{name} must be finite")));
            }
            if v.x < 0.0 || v.y < 0.0 {
                return Err(ReflowError::validation(format!("{name} must be >= 0")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
