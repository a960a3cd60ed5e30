use crate::archive::DateFormat;
use crate::error::{KanbanError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Archive behaviour settings, keyed the way the host stores them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSettings {
    /// Stamp archived items with the archive date
    #[serde(rename = "prepend-archive-date", default)]
    pub prepend_archive_date: bool,

    /// Text placed between the date and the title
    #[serde(
        rename = "prepend-archive-separator",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub archive_date_separator: Option<String>,

    /// Moment-style pattern for the date stamp
    #[serde(rename = "prepend-archive-format", default = "default_format")]
    pub archive_date_format: String,
}

impl ArchiveSettings {
    pub const DEFAULT_DATE_FORMAT: &'static str = "YYYY-MM-DD HH:mm";

    /// Reads settings from the host's JSON settings blob. Unknown keys are
    /// ignored; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| KanbanError::ConfigError(format!("Invalid board settings: {}", e)))
    }

    pub fn with_date_stamp(mut self, format: impl Into<String>, separator: Option<&str>) -> Self {
        self.prepend_archive_date = true;
        self.archive_date_format = format.into();
        self.archive_date_separator = separator.filter(|s| !s.is_empty()).map(str::to_string);
        self
    }

    /// Checks the date pattern strictly
    pub fn validate(&self) -> Result<()> {
        DateFormat::parse(&self.archive_date_format).map(|_| ())
    }
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            prepend_archive_date: false,
            archive_date_separator: None,
            archive_date_format: default_format(),
        }
    }
}

fn default_format() -> String {
    ArchiveSettings::DEFAULT_DATE_FORMAT.to_string()
}

fn non_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
