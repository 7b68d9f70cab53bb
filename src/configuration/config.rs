#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use crate::domain::models::SessionSettings;
use crate::domain::models::TransportConfig;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiToken,
    ApiURL,
    ConfigFile,
    ConfirmationPattern,
    DuplicateWindow,
    Ephemeral,
    StateFile,
    Theme,
}

impl ConfigKey {
    /// Environment variable that can supply the key's value.
    pub fn env_var(&self) -> String {
        return format!(
            "TABLEBOOK_{}",
            self.to_string().to_uppercase().replace('-', "_")
        );
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let base_dir = dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("tablebook");
        let config_path = base_dir.join("config.toml");

        let state_path = dirs::cache_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("tablebook/state.yaml");

        let res = match key {
            ConfigKey::ApiToken => "".to_string(),
            ConfigKey::ApiURL => "".to_string(),
            ConfigKey::ConfirmationPattern => "(?i)booking confirmed".to_string(),
            ConfigKey::DuplicateWindow => "1200".to_string(),
            ConfigKey::Theme => "".to_string(),

            // Special
            ConfigKey::ConfigFile => config_path.to_string_lossy().to_string(),
            ConfigKey::Ephemeral => "".to_string(),
            ConfigKey::StateFile => state_path.to_string_lossy().to_string(),
        };

        return res;
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = tokio::fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        Config::session_settings()?;

        tracing::debug!(
            api_url = Config::get(ConfigKey::ApiURL),
            api_token_set = !Config::get(ConfigKey::ApiToken).is_empty(),
            duplicate_window = Config::get(ConfigKey::DuplicateWindow),
            confirmation_pattern = Config::get(ConfigKey::ConfirmationPattern),
            state_file = Config::get(ConfigKey::StateFile),
            ephemeral = Config::get(ConfigKey::Ephemeral),
            theme = Config::get(ConfigKey::Theme),
            "config"
        );

        return Ok(());
    }

    pub fn transport_config() -> TransportConfig {
        return TransportConfig::new(
            &Config::get(ConfigKey::ApiURL),
            &Config::get(ConfigKey::ApiToken),
        );
    }

    pub fn session_settings() -> Result<SessionSettings> {
        return Config::parse_session_settings(
            &Config::get(ConfigKey::DuplicateWindow),
            &Config::get(ConfigKey::ConfirmationPattern),
        );
    }

    fn parse_session_settings(window_str: &str, pattern_str: &str) -> Result<SessionSettings> {
        let window_ms = match window_str.parse::<u64>() {
            Ok(ms) => ms,
            Err(_) => {
                bail!(format!(
                    "{} must be a number of milliseconds, got '{window_str}'",
                    ConfigKey::DuplicateWindow
                ));
            }
        };

        let confirmation_pattern = match Regex::new(pattern_str) {
            Ok(pattern) => pattern,
            Err(err) => {
                bail!(format!(
                    "{} is not a valid regular expression: {err}",
                    ConfigKey::ConfirmationPattern
                ));
            }
        };

        return Ok(SessionSettings {
            duplicate_window: Duration::from_millis(window_ms),
            confirmation_pattern,
        });
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile || key == ConfigKey::Ephemeral {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = {}", toml_edit::value(val));
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
