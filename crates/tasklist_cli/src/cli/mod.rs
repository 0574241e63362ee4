use clap::{Parser, Subcommand};
use tasklist_core::config::{ConfigOverrides, canonical_name};
use tasklist_core::model::Priority;

#[derive(Parser, Debug)]
#[command(name = "tasklist", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: tasklist add "Buy milk" --priority high
    Add {
        text: Option<String>,
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<Priority>,
    },
    /// Mark a task as completed, or as pending again
    ///
    /// Example: tasklist toggle 3f2c...
    Toggle {
        id: String,
    },
    /// Replace a task's text
    ///
    /// Example: tasklist edit 3f2c... "Buy oat milk"
    Edit {
        id: String,
        new_text: String,
    },
    /// Delete a task
    ///
    /// Example: tasklist delete 3f2c...
    Delete {
        id: String,
    },
    /// Show details of a task
    ///
    /// Example: tasklist show 3f2c...
    Show {
        id: String,
    },
    /// List all tasks in the order they were added
    List,
    /// Show the progress summary
    Home,
    /// Show completion statistics
    Stats,
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    Priority::parse(raw).ok_or_else(|| format!("unknown priority '{raw}' (high, medium, low)"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    Alias(String),
    Notifications,
    LogLevel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    let canonical_field =
        canonical_name(field).ok_or_else(|| "override key cannot be empty".to_string())?;

    let target = match canonical_field.as_str() {
        "aliases" | "alias" => {
            let alias_name = remainder
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| "aliases override requires an alias name".to_string())?;
            return Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Alias(alias_name.to_string()),
                value,
            });
        }
        "theme" => ConfigOverrideTarget::Theme,
        "notifications" => ConfigOverrideTarget::Notifications,
        "log_level" => ConfigOverrideTarget::LogLevel,
        other => return Err(format!("unknown config field '{other}'")),
    };

    if remainder.is_some() {
        return Err(format!("{canonical_field} override cannot have subfields"));
    }

    Ok(ParsedConfigOverride { target, value })
}

/// Folds every `--config-override` value into one set of overrides; later
/// values win.
pub fn collect_config_overrides(raw: &[String]) -> Result<ConfigOverrides, String> {
    let mut overrides = ConfigOverrides::default();

    for entry in raw {
        let parsed = parse_config_override(entry)?;
        match parsed.target {
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::Alias(name) => {
                overrides.aliases.insert(name, parsed.value);
            }
            ConfigOverrideTarget::Notifications => {
                overrides.notifications = Some(parse_switch(&parsed.value)?);
            }
            ConfigOverrideTarget::LogLevel => overrides.log_level = Some(parsed.value),
        }
    }

    Ok(overrides)
}

fn parse_switch(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(format!("expected on/off, got '{other}'")),
    }
}
