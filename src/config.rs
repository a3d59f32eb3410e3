use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{BoothError, BoothResult};

/// Engine configuration.
///
/// Every field has a default, so an empty JSON object (or no file at all) is a valid
/// configuration. Environment variables override file values, see [`BoothConfig::load`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoothConfig {
    /// Small-viewport sizing: canvases shrink and padding tightens.
    pub compact: bool,
    /// Width in pixels of strip-family canvases (classic, grid, holiday, hearts, filmstrip).
    pub strip_width: u32,
    /// Width in pixels of collage canvases.
    pub collage_width: u32,
    /// Longest edge in pixels of the sub-editor preview surface.
    pub preview_max_edge: u32,
    /// Size of the decode thread pool. `None` uses rayon defaults.
    pub decode_threads: Option<usize>,
    /// Seed for default sticker placement.
    pub sticker_seed: u64,
    /// Export encoder settings.
    pub export: ExportConfig,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            compact: false,
            strip_width: 600,
            collage_width: 900,
            preview_max_edge: 800,
            decode_threads: None,
            sticker_seed: 0x5eed,
            export: ExportConfig::default(),
        }
    }
}

/// PNG export settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Compression effort for the preferred encoder path.
    pub compression: ExportCompression,
}

/// PNG compression effort.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportCompression {
    /// Fastest encode, largest files.
    Fast,
    /// Balanced.
    #[default]
    Default,
    /// Smallest files.
    Best,
}

impl BoothConfig {
    /// Parse a JSON config file.
    pub fn from_json_file(path: &Path) -> BoothResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| BoothError::config(format!("parse '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from an optional file, then apply `SNAPBOOTH_*` environment overrides.
    pub fn load(path: Option<&Path>) -> BoothResult<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_json_file(p)?,
            None => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply overrides from a variable lookup. Unparseable values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("SNAPBOOTH_COMPACT") {
            match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => self.compact = true,
                "0" | "false" | "no" => self.compact = false,
                _ => tracing::warn!(value = %v, "ignoring invalid SNAPBOOTH_COMPACT"),
            }
        }
        if let Some(n) = lookup("SNAPBOOTH_DECODE_THREADS")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.decode_threads = Some(n);
        }
        if let Some(n) = lookup("SNAPBOOTH_PREVIEW_MAX_EDGE")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|&n| n > 0)
        {
            self.preview_max_edge = n;
        }
        if let Some(n) = lookup("SNAPBOOTH_STICKER_SEED").and_then(|v| v.trim().parse::<u64>().ok())
        {
            self.sticker_seed = n;
        }
    }

    /// Reject values no canvas can be built from.
    pub fn validate(&self) -> BoothResult<()> {
        if self.strip_width < 100 || self.collage_width < 100 {
            return Err(BoothError::config("canvas widths must be >= 100 px"));
        }
        // collage height is 1.25x width, strip height 3x width
        if self.strip_width > 4000 || self.collage_width > 8000 {
            return Err(BoothError::config("canvas widths exceed the u16 surface limit"));
        }
        if self.preview_max_edge < 16 || self.preview_max_edge > 8192 {
            return Err(BoothError::config("preview_max_edge must be in [16, 8192]"));
        }
        if self.decode_threads == Some(0) {
            return Err(BoothError::config("decode_threads must be > 0"));
        }
        Ok(())
    }
}
