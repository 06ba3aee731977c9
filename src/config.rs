//! Configuration for the `vfd` command.
//!
//! Supports YAML configuration with precedence: CLI > ENV > file > defaults.

use crate::compile::{CompileOptions, StyleOverrides};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "VFD_CONFIG";

/// Environment variable overriding the script interpreter.
pub const INTERPRETER_ENV: &str = "VFD_PYTHON";

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File extensions to save; empty shows the figure interactively.
    #[serde(default)]
    pub formats: Vec<String>,

    /// Fit the layout to the figure before output.
    #[serde(default)]
    pub tight_layout: bool,

    /// Enlarge multiplot figures proportionally to their grid.
    #[serde(default)]
    pub scale_multiplot: bool,
}

/// Style settings applied to every compiled figure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// matplotlib style presets wrapped around the figure.
    #[serde(default)]
    pub context: Vec<String>,

    /// Color list overriding description hints.
    #[serde(default)]
    pub colors: Option<Vec<String>>,

    /// Line style list overriding description hints.
    #[serde(default)]
    pub lines: Option<Vec<String>>,

    /// Marker list overriding description hints.
    #[serde(default)]
    pub markers: Option<Vec<String>>,
}

/// Script execution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Interpreter used to run generated scripts.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Run scripts after writing them.
    #[serde(default = "default_run")]
    pub run: bool,

    /// Wait for each script to finish.
    #[serde(default = "default_blocking")]
    pub blocking: bool,

    /// Time allowed for the matplotlib availability probe, in milliseconds.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

fn default_interpreter() -> String {
    "python".to_string()
}
fn default_run() -> bool {
    true
}
fn default_blocking() -> bool {
    true
}
fn default_probe_timeout_ms() -> u64 {
    5000
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            run: default_run(),
            blocking: default_blocking(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Style settings.
    #[serde(default)]
    pub style: StyleConfig,

    /// Runner settings.
    #[serde(default)]
    pub runner: RunnerConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            output: OutputConfig::default(),
            style: StyleConfig::default(),
            runner: RunnerConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::Config {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Per-user configuration file (`<config dir>/vfd/config.yaml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vfd").join("config.yaml"))
    }

    /// Finds and loads the configuration, then applies environment overrides.
    ///
    /// Lookup order: `explicit`, `$VFD_CONFIG`, the per-user file if it
    /// exists, defaults. A file named explicitly or by the environment must
    /// exist.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit.map(Path::to_path_buf).or(env_path) {
            Some(path) => {
                log::debug!("loading configuration from {}", path.display());
                Self::load(path)?
            }
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    log::debug!("loading configuration from {}", path.display());
                    Self::load(path)?
                }
                None => Self::default(),
            },
        };
        config.apply_env_from(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(interpreter) = lookup(INTERPRETER_ENV).filter(|s| !s.is_empty()) {
            self.runner.interpreter = interpreter;
        }
    }

    /// Compilation settings described by this configuration.
    #[must_use]
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::default()
            .context(self.style.context.iter().cloned())
            .formats(self.output.formats.iter().cloned())
            .tight_layout(self.output.tight_layout)
            .scale_multiplot(self.output.scale_multiplot)
            .style(StyleOverrides {
                markers: self.style.markers.clone(),
                colors: self.style.colors.clone(),
                lines: self.style.lines.clone(),
            })
    }

    /// Returns the probe timeout as a Duration.
    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.runner.probe_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::new();

        assert_eq!(config.version, 1);
        assert!(config.output.formats.is_empty());
        assert_eq!(config.runner.interpreter, "python");
        assert!(config.runner.run);
        assert!(config.runner.blocking);
        assert_eq!(config.runner.probe_timeout_ms, 5000);
    }

    #[test]
    fn test_config_parse_minimal() {
        let config = Config::parse("version: 1").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_config_parse_full() {
        let yaml = r#"
version: 1
output:
  formats: [pdf, png]
  tight_layout: true
style:
  context: [ggplot]
  colors: [black, red]
runner:
  interpreter: python3
  blocking: false
  probe_timeout_ms: 250
"#;

        let config = Config::parse(yaml).unwrap();

        assert_eq!(config.output.formats, vec!["pdf", "png"]);
        assert!(config.output.tight_layout);
        assert!(!config.output.scale_multiplot);
        assert_eq!(config.style.context, vec!["ggplot"]);
        assert_eq!(config.runner.interpreter, "python3");
        assert!(config.runner.run);
        assert!(!config.runner.blocking);
        assert_eq!(config.probe_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_config_parse_error_includes_line() {
        let yaml = r#"
version: 1
runner:
  probe_timeout_ms: soon
"#;

        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(err, Error::Config { line: 4, .. }), "{err:?}");
        assert!(err.to_string().contains('4'), "Error should include line number");
    }

    #[test]
    fn test_compile_options_projection() {
        let mut config = Config::new();
        config.output.formats = vec!["svg".into()];
        config.output.scale_multiplot = true;
        config.style.context = vec!["dark_background".into()];
        config.style.markers = Some(vec!["x".into()]);

        let options = config.compile_options();
        assert_eq!(options.export_formats, vec!["svg"]);
        assert!(options.scale_multiplot);
        assert!(!options.tight_layout);
        assert_eq!(options.style_context, vec!["dark_background"]);
        assert_eq!(options.style.markers, Some(vec!["x".to_string()]));
        assert_eq!(options.style.colors, None);
    }

    #[test]
    fn test_interpreter_env_override() {
        let mut config = Config::new();
        config.apply_env_from(|key| (key == INTERPRETER_ENV).then(|| "/opt/py/bin/python".into()));
        assert_eq!(config.runner.interpreter, "/opt/py/bin/python");

        let mut config = Config::new();
        config.apply_env_from(|_| Some(String::new()));
        assert_eq!(config.runner.interpreter, "python");
    }

    #[test]
    fn test_discover_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vfd.yaml");
        std::fs::write(&path, "output:\n  formats: [eps]\n").unwrap();

        let config = Config::discover(Some(&path)).unwrap();
        assert_eq!(config.output.formats, vec!["eps"]);

        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            Config::discover(Some(&missing)),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_config_load_or_default() {
        let config = Config::load_or_default("/nonexistent/path");
        assert_eq!(config.version, 1);
    }
}
