//! Configuration loading and parsing.
//!
//! Parses `notes.toml` (or an override path provided by the binary). Two
//! sections are recognised:
//!
//! ```toml
//! [indent]
//! step = 24.0        # plain (non-list) indent increment
//! minimum = 0.0
//! maximum = 192.0
//! list_unit = 24.0   # head indent per list nesting level
//!
//! [font]
//! family = "Avenir Next"
//! size = 17.0
//! min_size = 8.0
//! max_size = 72.0
//! step = 1.0
//! ```
//!
//! Unknown fields are ignored so the file can evolve without warnings. A file
//! that fails to parse falls back to defaults. Inconsistent bounds are
//! repaired by [`Config::normalize`] (logged under the `config` target).

use anyhow::{Context, Result};
use core_text::Font;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IndentConfig {
    #[serde(default = "IndentConfig::default_step")]
    pub step: f64,
    #[serde(default)]
    pub minimum: f64,
    #[serde(default = "IndentConfig::default_maximum")]
    pub maximum: f64,
    #[serde(default = "IndentConfig::default_list_unit")]
    pub list_unit: f64,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            step: Self::default_step(),
            minimum: 0.0,
            maximum: Self::default_maximum(),
            list_unit: Self::default_list_unit(),
        }
    }
}

impl IndentConfig {
    const fn default_step() -> f64 {
        24.0
    }
    const fn default_maximum() -> f64 {
        192.0
    }
    const fn default_list_unit() -> f64 {
        24.0
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.minimum).min(self.maximum)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FontConfig {
    #[serde(default = "FontConfig::default_family")]
    pub family: String,
    #[serde(default = "FontConfig::default_size")]
    pub size: f64,
    #[serde(default = "FontConfig::default_min_size")]
    pub min_size: f64,
    #[serde(default = "FontConfig::default_max_size")]
    pub max_size: f64,
    #[serde(default = "FontConfig::default_step")]
    pub step: f64,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: Self::default_family(),
            size: Self::default_size(),
            min_size: Self::default_min_size(),
            max_size: Self::default_max_size(),
            step: Self::default_step(),
        }
    }
}

impl FontConfig {
    fn default_family() -> String {
        "Avenir Next".to_string()
    }
    const fn default_size() -> f64 {
        17.0
    }
    const fn default_min_size() -> f64 {
        8.0
    }
    const fn default_max_size() -> f64 {
        72.0
    }
    const fn default_step() -> f64 {
        1.0
    }

    /// Body font used when neither the typing attributes nor the text carry one.
    pub fn body_font(&self) -> Font {
        Font::new(self.family.clone(), self.size)
    }

    pub fn clamp_size(&self, size: f64) -> f64 {
        size.max(self.min_size).min(self.max_size)
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct ConfigFile {
    #[serde(default)]
    pub indent: IndentConfig,
    #[serde(default)]
    pub font: FontConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
}

impl Config {
    pub fn indent(&self) -> &IndentConfig {
        &self.file.indent
    }

    pub fn font(&self) -> &FontConfig {
        &self.file.font
    }

    /// Parse a TOML document, repairing inconsistent bounds.
    pub fn from_toml(content: &str) -> Result<Self> {
        let file = toml::from_str::<ConfigFile>(content).context("parsing notes config")?;
        let mut cfg = Config {
            raw: Some(content.to_string()),
            file,
        };
        cfg.normalize();
        Ok(cfg)
    }

    /// Swap inverted bounds and force non-negative steps. Returns true when
    /// anything had to change.
    pub fn normalize(&mut self) -> bool {
        let mut changed = false;
        let indent = &mut self.file.indent;
        if indent.minimum > indent.maximum {
            info!(target: "config", minimum = indent.minimum, maximum = indent.maximum, "indent_bounds_swapped");
            std::mem::swap(&mut indent.minimum, &mut indent.maximum);
            changed = true;
        }
        if indent.step < 0.0 || indent.list_unit < 0.0 {
            info!(target: "config", step = indent.step, list_unit = indent.list_unit, "indent_step_negated");
            indent.step = indent.step.abs();
            indent.list_unit = indent.list_unit.abs();
            changed = true;
        }
        let font = &mut self.file.font;
        if font.min_size > font.max_size {
            info!(target: "config", min_size = font.min_size, max_size = font.max_size, "font_bounds_swapped");
            std::mem::swap(&mut font.min_size, &mut font.max_size);
            changed = true;
        }
        let clamped = font.clamp_size(font.size);
        if clamped != font.size {
            info!(target: "config", raw = font.size, clamped, "font_size_clamped");
            font.size = clamped;
            changed = true;
        }
        changed
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from("notes.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("notes").join("notes.toml");
    }
    PathBuf::from("notes.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    if let Ok(content) = fs::read_to_string(&path) {
        match Config::from_toml(&content) {
            Ok(cfg) => Ok(cfg),
            Err(e) => {
                // On parse error fall back to defaults (breadth-first resilience).
                warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
                Ok(Config::default())
            }
        }
    } else {
        Ok(Config::default())
    }
}
