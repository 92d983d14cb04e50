//! Configuration file (`edlist.toml`).
//!
//! Every section is optional. A missing file means all defaults, which
//! reproduces the built-in form defaults and the five seed schools.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::Deserialize;

use crate::card::EditObserver;
use crate::date::host_offset;
use crate::error::ConfigError;
use crate::form::{DEFAULT_FROM, DEFAULT_NAME, DEFAULT_TO, FormDefaults, RecordForm};
use crate::panel::{EducationListPanel, Seed, default_seeds};

pub const DEFAULT_CONFIG_FILE: &str = "edlist.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdlistConfig {
    /// Draft defaults and the local zone.
    #[serde(default)]
    pub form: FormConfig,

    /// Initial records. Absent → built-in seeds; an empty list is honored.
    #[serde(default)]
    pub seed: Option<Vec<SeedConfig>>,

    /// Log sink for the interactive UI.
    #[serde(default)]
    pub log: LogConfig,
}

// ---------------------------------------------------------------------------
// FormConfig
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_from")]
    pub from: String,

    #[serde(default = "default_to")]
    pub to: String,

    /// Zone used for zone-less dates and for reformatting drafts.
    #[serde(default)]
    pub zone: ZoneSetting,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            from: default_from(),
            to: default_to(),
            zone: ZoneSetting::default(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_owned()
}

fn default_from() -> String {
    DEFAULT_FROM.to_owned()
}

fn default_to() -> String {
    DEFAULT_TO.to_owned()
}

/// `"local"`, `"utc"`, or a fixed offset such as `"+09:00"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ZoneSetting {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl ZoneSetting {
    /// Resolve to a concrete offset. `Local` samples the host zone now.
    pub fn offset(self) -> FixedOffset {
        match self {
            Self::Local => host_offset(),
            Self::Utc => FixedOffset::east_opt(0).unwrap_or_else(host_offset),
            Self::Fixed(offset) => offset,
        }
    }
}

impl TryFrom<String> for ZoneSetting {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" | "z" => Ok(Self::Utc),
            other => other
                .parse::<FixedOffset>()
                .map(Self::Fixed)
                .map_err(|e| format!("invalid zone '{value}': {e} (use local, utc, or +HH:MM)")),
        }
    }
}

impl fmt::Display for ZoneSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Utc => write!(f, "utc"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SeedConfig
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedConfig {
    pub name: String,
    pub from: String,
    pub to: String,
}

// ---------------------------------------------------------------------------
// LogConfig
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Write JSON log events to this file.
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default)]
    pub filter: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl EdlistConfig {
    /// Load from `path`. A missing file yields defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` on I/O errors (other than not-found) or parse errors.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError {
                    path: Some(path.to_owned()),
                    message: format!("could not read file: {e}"),
                });
            }
        };
        Self::parse(&contents).map_err(|mut e| {
            e.path = Some(path.to_owned());
            e
        })
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ConfigError` on invalid TOML, unknown fields, or a bad zone.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| {
            let mut message = e.message().to_owned();
            if let Some(span) = e.span() {
                let line = toml_str[..span.start]
                    .chars()
                    .filter(|&c| c == '\n')
                    .count()
                    + 1;
                message = format!("line {line}: {message}");
            }
            ConfigError {
                path: None,
                message,
            }
        })
    }

    pub fn form_defaults(&self) -> FormDefaults {
        FormDefaults {
            name: self.form.name.clone(),
            from: self.form.from.clone(),
            to: self.form.to.clone(),
        }
    }

    pub fn seeds(&self) -> Vec<Seed> {
        self.seed.as_ref().map_or_else(default_seeds, |seeds| {
            seeds
                .iter()
                .map(|s| Seed::new(&s.name, &s.from, &s.to))
                .collect()
        })
    }

    /// Build the panel this configuration describes.
    pub fn build_panel(&self, observer: Box<dyn EditObserver>) -> EducationListPanel {
        let form = RecordForm::new(self.form_defaults(), self.form.zone.offset());
        EducationListPanel::new(&self.seeds(), form, observer)
    }
}
