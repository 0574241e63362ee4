use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "tasklist";
const CONFIG_ENV_VAR: &str = "TASKLIST_CONFIG_PATH";

#[derive(Debug, Clone)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        self.paint(self.accent, text)
    }

    pub fn mutedize(&self, text: &str) -> String {
        self.paint(self.muted, text)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if color.is_empty() {
            text.to_string()
        } else {
            format!("{color}{text}{}", self.reset)
        }
    }
}

pub fn palette_for_theme(theme: Option<&str>) -> Palette {
    let (accent, muted) = match theme.map(canonical_theme_name).as_deref() {
        Some("noir") => ("\x1b[38;5;208m", "\x1b[38;5;250m"),
        Some("solarized") => ("\x1b[38;5;108m", "\x1b[38;5;250m"),
        _ => {
            return Palette {
                accent: "",
                muted: "",
                reset: "",
            };
        }
    };

    Palette {
        accent,
        muted,
        reset: "\x1b[0m",
    }
}

/// Lowercases `raw` and collapses every run of non-alphanumerics into one
/// `_`. Returns `None` when nothing alphanumeric is left.
pub fn canonical_name(raw: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_end_matches('_');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn canonical_theme_name(raw: &str) -> String {
    let name = canonical_name(raw).unwrap_or_default();
    let theme = match name.as_str() {
        "" | "vanilla" | "light" => "default",
        "dark" | "dark_mode" | "darkmode" => "noir",
        other => other,
    };
    theme.to_string()
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub aliases: HashMap<String, String>,
    #[serde(default)]
    pub notifications: Option<bool>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Config {
    pub fn notifications_enabled(&self) -> bool {
        self.notifications.unwrap_or(true)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub theme: Option<String>,
    pub aliases: HashMap<String, String>,
    pub notifications: Option<bool>,
    pub log_level: Option<String>,
}

/// Per-user application directory: `%APPDATA%/tasklist` on Windows,
/// `~/.config/tasklist` elsewhere.
pub fn app_dir() -> Result<PathBuf, AppError> {
    let (var, base) = if cfg!(windows) {
        ("APPDATA", None)
    } else {
        ("HOME", Some(".config"))
    };
    let root =
        std::env::var(var).map_err(|_| AppError::invalid_data(format!("{var} is not set")))?;

    let mut dir = PathBuf::from(root);
    if let Some(base) = base {
        dir.push(base);
    }
    dir.push(APP_DIR_NAME);
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf, AppError> {
    match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => Ok(app_dir()?.join(CONFIG_FILE_NAME)),
    }
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

/// A missing file is not an error; an unreadable one falls back to defaults
/// and is reported.
fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    let loaded = if path.exists() {
        load_config_from_path(path).map(Some)
    } else {
        Ok(None)
    };

    match loaded {
        Ok(config) => ConfigLoad {
            config: config.unwrap_or_default(),
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    Ok(normalize_config_theme(config))
}

fn normalize_config_theme(mut config: Config) -> Config {
    config.theme = config.theme.map(|name| canonical_theme_name(&name));
    config
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(theme) = overrides.theme.as_deref() {
        merged.theme = Some(canonical_theme_name(theme));
    }

    for (alias, value) in overrides.aliases.iter() {
        merged.aliases.insert(alias.clone(), value.clone());
    }

    if let Some(enabled) = overrides.notifications {
        merged.notifications = Some(enabled);
    }

    if let Some(level) = overrides.log_level.as_ref() {
        merged.log_level = Some(level.clone());
    }

    merged
}
