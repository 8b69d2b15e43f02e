use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("IO operation failed on {path}: {source}")]
    PathIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing failed for {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Archive extraction failed for {path}: {source}")]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Roster file not found: {path}")]
    RosterNotFound { path: String },

    #[error("Missing required argument {argument} for {mode} mode")]
    MissingArgument { argument: String, mode: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Permission denied: {path}")]
    Permission { path: String },
}

impl OrganizerError {
    /// Attach the offending path to an IO error, promoting permission
    /// failures to their own variant.
    pub fn io_at<P: AsRef<Path>>(source: std::io::Error, path: P) -> Self {
        let path = path.as_ref().display().to_string();
        if source.kind() == std::io::ErrorKind::PermissionDenied {
            OrganizerError::Permission { path }
        } else {
            OrganizerError::PathIo { path, source }
        }
    }

    pub fn csv_at<P: AsRef<Path>>(source: csv::Error, path: P) -> Self {
        OrganizerError::Csv {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub fn archive_at<P: AsRef<Path>>(source: zip::result::ZipError, path: P) -> Self {
        OrganizerError::Archive {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for OrganizerError {
    fn user_message(&self) -> String {
        match self {
            OrganizerError::PathIo { path, source } => {
                format!("Filesystem operation failed on {}: {}", path, source)
            }
            OrganizerError::Csv { path, source } => {
                format!("Could not process CSV file {}: {}", path, source)
            }
            OrganizerError::Archive { path, source } => {
                format!("Could not extract archive {}: {}", path, source)
            }
            OrganizerError::RosterNotFound { path } => {
                format!("Roster file not found: {}", path)
            }
            OrganizerError::MissingArgument { argument, mode } => {
                format!("{} mode requires {}", mode, argument)
            }
            OrganizerError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            OrganizerError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            OrganizerError::Permission { path } => {
                format!("Permission denied accessing: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            OrganizerError::RosterNotFound { .. } => Some(
                "Check the --inputfile path. Relative paths are looked up in the working directory first, then in the current directory.".to_string()
            ),
            OrganizerError::MissingArgument { argument, .. } => Some(
                format!("Pass {} on the command line.", argument)
            ),
            OrganizerError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            OrganizerError::Permission { .. } => Some(
                "Ensure you have the necessary read/write permissions for the source and target directories.".to_string()
            ),
            OrganizerError::InvalidPath { .. } => Some(
                "Make sure the directory exists and is not a regular file.".to_string()
            ),
            OrganizerError::Csv { .. } => Some(
                "Roster files are plain comma-separated text with one student per line.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for OrganizerError {
    fn from(error: toml::de::Error) -> Self {
        OrganizerError::Config {
            message: error.to_string(),
        }
    }
}

impl From<regex::Error> for OrganizerError {
    fn from(error: regex::Error) -> Self {
        OrganizerError::Config {
            message: format!("Invalid exclude pattern: {}", error),
        }
    }
}

pub type Result<T> = std::result::Result<T, OrganizerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_user_friendly_messages() {
        let error = OrganizerError::RosterNotFound {
            path: "roster.csv".to_string(),
        };
        assert!(error.user_message().contains("roster.csv"));
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_permission_errors_are_promoted() {
        let error = OrganizerError::io_at(Error::new(ErrorKind::PermissionDenied, "nope"), "/srv/x");
        assert!(matches!(error, OrganizerError::Permission { ref path } if path == "/srv/x"));

        let error = OrganizerError::io_at(Error::new(ErrorKind::NotFound, "gone"), "/srv/y");
        assert!(matches!(error, OrganizerError::PathIo { .. }));
        assert!(error.user_message().contains("/srv/y"));
    }

    #[test]
    fn test_regex_error_conversion() {
        let regex_error = regex::Regex::new("(").unwrap_err();
        let error = OrganizerError::from(regex_error);
        assert!(matches!(error, OrganizerError::Config { .. }));
    }
}
