use crate::config::UnpackConfig;
use crate::error::Result;
use regex::Regex;
use std::path::Path;

/// Decides which directories are walked and which files are carried over.
pub struct ExclusionFilter {
    exclude_dirs: Vec<String>,
    exclude_files: Vec<String>,
    exclude_patterns: Vec<Regex>,
}

impl ExclusionFilter {
    pub fn new(config: &UnpackConfig) -> Result<Self> {
        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_files: config.exclude_files.clone(),
            exclude_patterns,
        })
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        match path.file_name().and_then(|s| s.to_str()) {
            Some(dir_name) => {
                !self.exclude_dirs.iter().any(|exclude| exclude == dir_name)
                    && !self.matches_any_pattern(dir_name)
            }
            None => true,
        }
    }

    pub fn should_copy_file(&self, path: &Path) -> bool {
        match path.file_name().and_then(|s| s.to_str()) {
            Some(file_name) => {
                !self.exclude_files.iter().any(|exclude| exclude == file_name)
                    && !self.matches_any_pattern(file_name)
            }
            None => true,
        }
    }

    pub fn matches_any_pattern(&self, name: &str) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.is_match(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> UnpackConfig {
        UnpackConfig {
            exclude_dirs: vec!["venv".to_string(), ".idea".to_string()],
            exclude_files: vec![".gitignore".to_string(), "grader_organizer.py".to_string()],
            exclude_patterns: vec![r"^__MACOSX$".to_string(), r"\.pyc$".to_string()],
            ..UnpackConfig::default()
        }
    }

    #[test]
    fn test_directory_exclusions() {
        let filter = ExclusionFilter::new(&create_test_config()).unwrap();

        assert!(filter.should_traverse_directory(Path::new("groupA")));
        assert!(filter.should_traverse_directory(Path::new("root/venv_notes")));
        assert!(!filter.should_traverse_directory(Path::new("venv")));
        assert!(!filter.should_traverse_directory(Path::new("root/groupA/.idea")));
        assert!(!filter.should_traverse_directory(Path::new("root/__MACOSX")));
    }

    #[test]
    fn test_file_exclusions() {
        let filter = ExclusionFilter::new(&create_test_config()).unwrap();

        assert!(filter.should_copy_file(Path::new("groupA/sub.zip")));
        assert!(filter.should_copy_file(Path::new("groupA/.gitignore.bak")));
        assert!(!filter.should_copy_file(Path::new("groupA/.gitignore")));
        assert!(!filter.should_copy_file(Path::new("grader_organizer.py")));
        assert!(!filter.should_copy_file(Path::new("cache/module.pyc")));
    }

    #[test]
    fn test_exclusion_is_case_sensitive() {
        let filter = ExclusionFilter::new(&create_test_config()).unwrap();
        assert!(filter.should_traverse_directory(Path::new("VENV")));
        assert!(filter.should_copy_file(Path::new("groupA/.GITIGNORE")));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let mut config = create_test_config();
        config.exclude_patterns.push("(".to_string());
        assert!(ExclusionFilter::new(&config).is_err());
    }
}
