use crate::error::LoxError;
use crate::parser::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_depth: usize,
    pub print_tokens: bool,
    pub print_ast: bool,
    pub prompt: String,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_depth: DEFAULT_MAX_DEPTH,
            print_tokens: false,
            print_ast: false,
            prompt: String::from("> "),
            debug: false,
        }
    }
}

impl Config {
    /// Reads the config file if there is one, then applies `LOX_DEBUG` and
    /// `LOX_MAX_DEPTH` on top.
    pub fn load() -> Result<Self, LoxError> {
        let config_path = Self::get_config_path();
        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)?;
            Self::from_json(&contents)?
        } else {
            Config::default()
        };

        config.apply_env(env::var("LOX_DEBUG").ok(), env::var("LOX_MAX_DEPTH").ok())?;
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, LoxError> {
        serde_json::from_str(contents).map_err(|e| LoxError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, LoxError> {
        serde_json::to_string_pretty(self).map_err(|e| LoxError::Config(e.to_string()))
    }

    pub fn apply_env(&mut self, debug: Option<String>, max_depth: Option<String>) -> Result<(), LoxError> {
        if let Some(debug) = debug {
            self.debug = matches!(debug.trim(), "1" | "true" | "TRUE" | "yes");
        }

        if let Some(max_depth) = max_depth {
            self.max_depth = max_depth.trim().parse().map_err(|_| {
                LoxError::Config(format!("LOX_MAX_DEPTH must be an integer, got {:?}", max_depth))
            })?;
        }

        Ok(())
    }

    pub fn save(&self) -> Result<PathBuf, LoxError> {
        let config_path = Self::get_config_path();
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&config_path, self.to_json()?)?;
        Ok(config_path)
    }

    pub fn get_config_path() -> PathBuf {
        if let Ok(custom_path) = env::var("LOX_CONFIG") {
            return PathBuf::from(custom_path);
        }

        let home = if cfg!(windows) {
            env::var("USERPROFILE")
        } else {
            env::var("HOME")
        };

        PathBuf::from(home.unwrap_or_else(|_| String::from(".")))
            .join(".lox")
            .join("config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_value_is_printed_by_default() {
        let config = Config::default();
        assert!(!config.print_tokens);
        assert!(!config.print_ast);

        let config = Config::from_json("{\"print_tokens\": true, \"print_ast\": true}").unwrap();
        assert!(config.print_tokens && config.print_ast);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = Config::from_json("{\"print_ast\": true}").unwrap();
        assert!(config.print_ast);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.prompt, "> ");
        assert!(!config.debug);
    }

    #[test]
    fn json_round_trip() {
        let config = Config {
            max_depth: 32,
            print_tokens: true,
            prompt: String::from("lox> "),
            ..Config::default()
        };
        assert_eq!(Config::from_json(&config.to_json().unwrap()).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        match Config::from_json("{\"max_depth\": \"deep\"}") {
            Err(LoxError::Config(_)) => {}
            other => panic!("expected a config error, got {:?}", other),
        }
    }

    #[test]
    fn environment_overrides() {
        let mut config = Config::default();
        config
            .apply_env(Some("1".to_string()), Some(" 16 ".to_string()))
            .unwrap();
        assert!(config.debug);
        assert_eq!(config.max_depth, 16);

        config.apply_env(Some("0".to_string()), None).unwrap();
        assert!(!config.debug);
        assert_eq!(config.max_depth, 16);

        assert!(config.apply_env(None, Some("lots".to_string())).is_err());
    }
}
