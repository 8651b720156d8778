//! CLI configuration and settings management

use crate::{CliError, Result};
use serde::{Deserialize, Serialize};
use smol_core::{EvalContext, Registry};
use smol_interpret::parse_literal;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration loaded from config files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Evaluation settings
    pub runtime: RuntimeConfig,
    /// REPL settings
    pub repl: ReplConfig,
    /// Extra initial objects, written as literals (`answer = "42"`)
    pub objects: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Maximum nesting of bracketed sub-expressions
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub prompt: String,
    /// Typed on its own line to leave the REPL; compared case-insensitively
    pub quit_command: String,
    /// History file location
    pub history_file: Option<PathBuf>,
    /// Maximum history entries
    pub max_history: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            quit_command: "q".to_string(),
            history_file: None,
            max_history: 1000,
        }
    }
}

impl CliConfig {
    /// Load configuration from file, falling back to defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = if let Some(path) = config_path {
            Self::load_from_file(path)?
        } else {
            // Try to find config in standard locations
            let mut config = Self::default();

            // Try current directory
            if let Ok(local_config) = Self::load_from_file(Path::new("smoltalk.toml")) {
                config = config.merge(local_config);
            }

            // Try home directory
            if let Some(home_dir) = dirs::home_dir() {
                let home_config = home_dir.join(".smoltalk.toml");
                if let Ok(home_config) = Self::load_from_file(&home_config) {
                    config = config.merge(home_config);
                }
            }

            // Try system config directory
            if let Some(system_config) = Self::default_config_path() {
                if let Ok(system_config) = Self::load_from_file(&system_config) {
                    config = config.merge(system_config);
                }
            }

            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CliError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        std::fs::write(path, content)
            .map_err(|e| CliError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Merge this configuration with another, with the other taking precedence
    pub fn merge(self, other: Self) -> Self {
        other
    }

    /// Get the default config file path for the current user
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("smoltalk").join("config.toml"))
    }

    /// The default registry with the configured objects layered on top.
    pub fn registry(&self) -> Result<Registry> {
        let mut configured = Registry::empty();
        for (name, literal) in &self.objects {
            let value = parse_literal(literal).ok_or_else(|| {
                CliError::Config(format!("Object {} is not a literal: {}", name, literal))
            })?;
            configured.insert(name.clone(), value);
        }
        Ok(Registry::new().merged(configured))
    }

    pub fn context(&self) -> EvalContext {
        let mut ctx = EvalContext::new();
        ctx.options.max_depth = self.runtime.max_depth;
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smol_core::Value;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.repl.prompt, "> ");
        assert_eq!(config.repl.quit_command, "q");
        assert_eq!(config.runtime.max_depth, None);
        assert!(config.objects.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let mut config = CliConfig::default();
        config.runtime.max_depth = Some(4);
        config.objects.insert("greeting".into(), "\"hello\"".into());

        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: CliConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[repl]\nprompt = \"st> \"\n\n[objects]\nanswer = \"42\"").unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.repl.prompt, "st> ");
        assert_eq!(config.repl.quit_command, "q");
        assert_eq!(config.repl.max_history, 1000);
        assert_eq!(config.objects.get("answer").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_config_file_operations() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("smoltalk.toml");

        let mut config = CliConfig::default();
        config.repl.quit_command = "quit".into();
        config.save_to_file(&path).unwrap();

        assert_eq!(CliConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[runtime]\nmax_depth = \"deep\"").unwrap();

        let err = CliConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, CliError::Config(message) if message.contains("Failed to parse")));
    }

    #[test]
    fn test_objects_extend_the_registry() {
        let mut config = CliConfig::default();
        config.objects.insert("answer".into(), "42".into());
        config.objects.insert("name".into(), "\"ada\"".into());

        let registry = config.registry().unwrap();
        assert_eq!(registry.get("answer"), Some(&Value::int(42)));
        assert_eq!(registry.get("name"), Some(&Value::string("ada")));
        assert!(registry.contains("Int"));

        config.objects.insert("Int".into(), "7".into());
        assert_eq!(config.registry().unwrap().get("Int"), Some(&Value::int(7)));

        config.objects.insert("broken".into(), "not a literal".into());
        assert!(matches!(config.registry(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_context_uses_runtime_settings() {
        let mut config = CliConfig::default();
        config.runtime.max_depth = Some(2);
        assert_eq!(config.context().options.max_depth, Some(2));
    }
}
