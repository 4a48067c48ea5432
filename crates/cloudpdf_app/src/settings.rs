use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use cloudpdf_engine::{AtomicFileWriter, CollaboratorSettings};
use cloudpdf_logging::{cloud_error, cloud_info, cloud_warn};
use serde::{Deserialize, Serialize};

const SETTINGS_FILENAME: &str = "cloudpdf.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub collaborator_endpoint: String,
    pub model: String,
    pub request_timeout_secs: u64,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let collaborator = CollaboratorSettings::default();
        Self {
            collaborator_endpoint: collaborator.endpoint,
            model: collaborator.model,
            request_timeout_secs: collaborator.request_timeout.as_secs(),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Settings {
    /// Collaborator settings for the engine. The API key comes from the
    /// `CLOUDPDF_API_KEY` environment variable and is never persisted.
    pub fn collaborator(&self) -> CollaboratorSettings {
        CollaboratorSettings {
            endpoint: self.collaborator_endpoint.clone(),
            model: self.model.clone(),
            api_key: std::env::var("CLOUDPDF_API_KEY").ok(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..CollaboratorSettings::default()
        }
    }
}

/// Loads settings from `{dir}/cloudpdf.ron`. A missing file is seeded with
/// defaults; a malformed file falls back to defaults with a warning.
pub fn load(dir: &Path) -> Settings {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let defaults = Settings::default();
            save(dir, &defaults);
            cloud_info!("Seeded default settings at {:?}", path);
            return defaults;
        }
        Err(err) => {
            cloud_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => settings,
        Err(err) => {
            cloud_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

/// Writes settings atomically into `dir`.
pub fn save(dir: &Path, settings: &Settings) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(settings, pretty) {
        Ok(text) => text,
        Err(err) => {
            cloud_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(dir.to_path_buf());
    if let Err(err) = writer.write(SETTINGS_FILENAME, content.as_bytes()) {
        cloud_error!("Failed to write settings to {:?}: {}", dir, err);
    }
}
