//! User settings for the enrollment manager
//!
//! Settings are read from `config.json` in the base directory. Every field is
//! defaulted, so a missing file or a partial file both load cleanly.

use serde::{Deserialize, Serialize};

use super::paths::EnrollmentPaths;
use crate::error::EnrollmentError;
use crate::models::student::EMAIL_DOMAIN;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Domain that student emails must use (`<student_number>@<domain>`)
    #[serde(default = "default_email_domain")]
    pub email_domain: String,

    /// Whether successful mutations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_email_domain() -> String {
    EMAIL_DOMAIN.to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            email_domain: default_email_domain(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &EnrollmentPaths) -> Result<Self, EnrollmentError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                EnrollmentError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                EnrollmentError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &EnrollmentPaths) -> Result<(), EnrollmentError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            EnrollmentError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| EnrollmentError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
