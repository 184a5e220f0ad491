//! Startup configuration.
//!
//! Window size, title and every visual constant are fixed at compile time.
//! The environment can only redirect shader loading and the log filter.

use std::path::PathBuf;

use crate::logging::LoggingConfig;

/// Environment variable naming a directory of shader sources.
pub const SHADER_DIR_VAR: &str = "SPECULAR_GRID_SHADER_DIR";
/// Environment variable holding an `env_logger` filter.
pub const LOG_VAR: &str = "SPECULAR_GRID_LOG";

/// Logical window size in screen coordinates.
pub const WINDOW_SIZE: [u32; 2] = [1280, 720];
/// Window title.
pub const WINDOW_TITLE: &str = "Specular Grid";

/// Where shader sources come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShaderSource {
    /// Sources generated in-process for the negotiated dialect.
    #[default]
    Builtin,
    /// `<dir>/<dialect>/{lit,overlay}.{vert,frag}`.
    Directory(PathBuf),
}

/// Everything `app::run` needs to start.
#[derive(Debug, Clone)]
pub struct Config {
    pub window_size: [u32; 2],
    pub title: String,
    pub shaders: ShaderSource,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE,
            title: WINDOW_TITLE.to_owned(),
            shaders: ShaderSource::Builtin,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Defaults, with overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, with overrides from `lookup`. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(dir) = var(SHADER_DIR_VAR) {
            config.shaders = ShaderSource::Directory(PathBuf::from(dir));
        }
        config.logging.env_filter = var(LOG_VAR);
        config
    }
}
