//! Demo configuration, loaded from TOML.

use std::fs;
use std::path::Path;

use gridwalk_core::Pos;
use log::{info, warn};
use serde::Deserialize;
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_PATH: &str = "gridwalk.toml";

pub const MIN_ROWS: i32 = 2;
pub const MAX_ROWS: i32 = 200;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] basic_toml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings shared by the visualizer and the solver.
///
/// ```toml
/// rows = 40
/// steps_per_tick = 4
/// campus_layout = true
/// start = { row = 12, col = 6 }
/// end = { row = 12, col = 37 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Grid side length.
    pub rows: i32,
    /// Search steps run per animation frame.
    pub steps_per_tick: u32,
    /// Load the campus street map on start-up.
    pub campus_layout: bool,
    pub start: Option<Pos>,
    pub end: Option<Pos>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            steps_per_tick: 1,
            campus_layout: true,
            start: None,
            end: None,
        }
    }
}

impl DemoConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = basic_toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_ROWS..=MAX_ROWS).contains(&self.rows) {
            return Err(ConfigError::Invalid(format!(
                "rows must be between {MIN_ROWS} and {MAX_ROWS}, got {}",
                self.rows
            )));
        }
        if self.steps_per_tick == 0 {
            return Err(ConfigError::Invalid("steps_per_tick must be at least 1".into()));
        }
        for (name, preset) in [("start", self.start), ("end", self.end)] {
            if let Some(p) = preset {
                if !p.in_square(self.rows) {
                    return Err(ConfigError::Invalid(format!(
                        "{name} {p} is outside the {0}x{0} grid",
                        self.rows
                    )));
                }
            }
        }
        if self.start.is_some() && self.start == self.end {
            return Err(ConfigError::Invalid(
                "start and end presets are the same cell".into(),
            ));
        }
        Ok(())
    }
}

/// Load the demo configuration.
///
/// An explicit path is used as given; otherwise [`DEFAULT_CONFIG_PATH`] is
/// tried if it exists. Any failure is logged and the defaults are used.
pub fn load_config(explicit: Option<&str>) -> DemoConfig {
    let path = match explicit {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => DEFAULT_CONFIG_PATH,
        None => return DemoConfig::default(),
    };
    match DemoConfig::from_file(path) {
        Ok(config) => {
            info!("Loaded config from {path}");
            config
        }
        Err(e) => {
            warn!("Ignoring config {path}: {e}");
            DemoConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(DemoConfig::from_toml("").unwrap(), DemoConfig::default());
    }

    #[test]
    fn partial_document() {
        let c = DemoConfig::from_toml(
            "rows = 10\ncampus_layout = false\nstart = { row = 1, col = 2 }\n",
        )
        .unwrap();
        assert_eq!(c.rows, 10);
        assert!(!c.campus_layout);
        assert_eq!(c.steps_per_tick, 1);
        assert_eq!(c.start, Some(Pos::new(1, 2)));
        assert_eq!(c.end, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            DemoConfig::from_toml("rows = 1"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            DemoConfig::from_toml("steps_per_tick = 0"),
            Err(ConfigError::Invalid(_))
        ));
        let err = DemoConfig::from_toml("rows = 5\nend = { row = 5, col = 0 }").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config: end (5, 0) is outside the 5x5 grid"
        );
        assert!(matches!(
            DemoConfig::from_toml(
                "start = { row = 3, col = 3 }\nend = { row = 3, col = 3 }"
            ),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            DemoConfig::from_toml("rows = \"forty\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let missing = "/nonexistent/gridwalk-test.toml";
        assert!(matches!(
            DemoConfig::from_file(missing),
            Err(ConfigError::Read { .. })
        ));
        assert_eq!(load_config(Some(missing)), DemoConfig::default());
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("gridwalk-{}.toml", std::process::id()));
        fs::write(&path, "rows = 12\nsteps_per_tick = 3\n").unwrap();
        let c = load_config(path.to_str());
        fs::remove_file(&path).ok();
        assert_eq!(c.rows, 12);
        assert_eq!(c.steps_per_tick, 3);
    }
}
