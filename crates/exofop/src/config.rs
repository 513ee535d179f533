//! Configuration loading and resolution.

use std::path::PathBuf;

/// Archive root used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://exofop.ipac.caltech.edu/";

/// Mission path segment used when nothing else is configured.
pub const DEFAULT_MISSION: &str = "k2";

/// Runtime settings shared by every client operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExofopConfig {
    /// Archive root, always ending in `/`.
    pub base_url: String,
    /// Mission segment (`k2`, `tess`, ...).
    pub mission: String,
    /// Directory under which `<id>/<ext>/` download folders are created.
    pub output_dir: PathBuf,
}

impl Default for ExofopConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mission: DEFAULT_MISSION.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExofopConfig {
    /// Defaults overridden by `EXOFOP_BASE_URL`, `EXOFOP_MISSION` and
    /// `EXOFOP_OUTPUT_DIR` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = std::env::var("EXOFOP_BASE_URL") {
            config = config.with_base_url(&base);
        }
        if let Ok(mission) = std::env::var("EXOFOP_MISSION") {
            if !mission.trim().is_empty() {
                config.mission = mission.trim().to_string();
            }
        }
        if let Ok(dir) = std::env::var("EXOFOP_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        config
    }

    /// Replace the base URL, normalising the trailing slash.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn with_mission(mut self, mission: &str) -> Self {
        self.mission = mission.to_string();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}
