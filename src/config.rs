use crate::error::{OrganizerError, Result};
use crate::ui::WarningStyle;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub gradebook: GradebookConfig,
    pub unpack: UnpackConfig,
    pub folders: FolderConfig,
    pub diagnostics: DiagnosticsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GradebookConfig {
    pub collaborator_prefix: String,
    pub sort_directory_names: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UnpackConfig {
    pub default_directory: String,
    pub exclude_dirs: Vec<String>,
    pub exclude_files: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub preserve_timestamps: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FolderConfig {
    pub default_directory: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub warning_style: WarningStyle,
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            collaborator_prefix: "abc123".to_string(),
            sort_directory_names: true,
        }
    }
}

impl Default for UnpackConfig {
    fn default() -> Self {
        Self {
            default_directory: "Unzipped".to_string(),
            exclude_dirs: vec!["venv".to_string(), ".idea".to_string()],
            exclude_files: vec![
                ".gitignore".to_string(),
                ".idea".to_string(),
                "grader_organizer.py".to_string(),
                "grade-organizer.toml".to_string(),
            ],
            exclude_patterns: Vec::new(),
            preserve_timestamps: true,
        }
    }
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            default_directory: "Students".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OrganizerError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| OrganizerError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| OrganizerError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["grade-organizer.toml", ".grade-organizer.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref dirs) = cli_args.exclude_dirs {
            for dir in dirs {
                if !self.unpack.exclude_dirs.contains(dir) {
                    self.unpack.exclude_dirs.push(dir.clone());
                }
            }
        }

        if let Some(ref files) = cli_args.exclude_files {
            for file in files {
                if !self.unpack.exclude_files.contains(file) {
                    self.unpack.exclude_files.push(file.clone());
                }
            }
        }

        if let Some(style) = cli_args.warning_style {
            self.diagnostics.warning_style = style;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.gradebook.collaborator_prefix.trim().is_empty() {
            return Err(OrganizerError::Config {
                message: "Collaborator column prefix cannot be empty".to_string(),
            });
        }

        for (section, name) in [
            ("unpack", &self.unpack.default_directory),
            ("folders", &self.folders.default_directory),
        ] {
            if name.trim().is_empty() {
                return Err(OrganizerError::Config {
                    message: format!("[{}] default_directory cannot be empty", section),
                });
            }
        }

        let names = self
            .unpack
            .exclude_dirs
            .iter()
            .chain(self.unpack.exclude_files.iter());
        for name in names {
            if name.contains('/') || name.contains('\\') {
                return Err(OrganizerError::Config {
                    message: format!(
                        "Exclusions match single file or directory names, not paths: {}",
                        name
                    ),
                });
            }
        }

        for pattern in &self.unpack.exclude_patterns {
            Regex::new(pattern)?;
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

/// Warning emitted when an operation falls back to `<cwd>/<default_directory>`.
pub fn default_directory_warning(default_directory: &str) -> String {
    format!(
        "no output directory given, creating one in current directory labelled \"{}\"",
        default_directory
    )
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub exclude_dirs: Option<Vec<String>>,
    pub exclude_files: Option<Vec<String>>,
    pub warning_style: Option<WarningStyle>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclude_dirs(mut self, dirs: Option<Vec<String>>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    pub fn with_exclude_files(mut self, files: Option<Vec<String>>) -> Self {
        self.exclude_files = files;
        self
    }

    pub fn with_warning_style(mut self, style: Option<WarningStyle>) -> Self {
        self.warning_style = style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gradebook.collaborator_prefix, "abc123");
        assert_eq!(config.unpack.default_directory, "Unzipped");
        assert_eq!(config.folders.default_directory, "Students");
        assert!(config.unpack.exclude_dirs.contains(&"venv".to_string()));
        assert!(config.unpack.exclude_files.contains(&".gitignore".to_string()));
        assert_eq!(config.diagnostics.warning_style, WarningStyle::Bare);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.gradebook.collaborator_prefix = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.unpack.exclude_dirs.push("nested/dir".to_string());
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.unpack.exclude_patterns.push("[unclosed".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.gradebook.collaborator_prefix = "netid".to_string();
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(toml::to_string_pretty(&config).unwrap().as_bytes())
            .unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.gradebook.collaborator_prefix, "netid");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[folders]\ndefault_directory = \"Roster\"\n").unwrap();
        assert_eq!(config.folders.default_directory, "Roster");
        assert_eq!(config.unpack.default_directory, "Unzipped");
        assert!(config.gradebook.sort_directory_names);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_exclude_dirs(Some(vec!["__MACOSX".to_string(), "venv".to_string()]))
            .with_exclude_files(Some(vec![".DS_Store".to_string()]))
            .with_warning_style(Some(WarningStyle::Decorated));

        config.merge_with_cli_args(&overrides);

        assert!(config.unpack.exclude_dirs.contains(&"__MACOSX".to_string()));
        assert_eq!(
            config.unpack.exclude_dirs.iter().filter(|d| *d == "venv").count(),
            1
        );
        assert!(config.unpack.exclude_files.contains(&".DS_Store".to_string()));
        assert_eq!(config.diagnostics.warning_style, WarningStyle::Decorated);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(!sample.is_empty());
        assert!(sample.contains("[gradebook]"));
        assert!(sample.contains("[unpack]"));
        assert!(sample.contains("[folders]"));
        assert!(sample.contains("[diagnostics]"));
    }
}
