use crate::config::{default_directory_warning, FolderConfig};
use crate::error::{OrganizerError, Result};
use crate::paths::is_single_segment;
use crate::roster;
use crate::ui::{DiagnosticSink, Summary};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FolderRequest {
    pub roster_file: PathBuf,
    pub dest_root: Option<PathBuf>,
}

impl FolderRequest {
    pub fn new<P: Into<PathBuf>>(roster_file: P) -> Self {
        Self {
            roster_file: roster_file.into(),
            dest_root: None,
        }
    }

    pub fn with_dest_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.dest_root = Some(root.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FolderSummary {
    pub destination: PathBuf,
    pub created: Vec<String>,
    pub already_present: Vec<String>,
    pub rejected: Vec<String>,
}

impl Summary for FolderSummary {
    fn headline(&self) -> String {
        format!("Student folders ready in {}", self.destination.display())
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Created:", self.created.len().to_string()),
            ("Already present:", self.already_present.len().to_string()),
            ("Rejected names:", self.rejected.len().to_string()),
        ]
    }
}

pub fn generate_student_folders(
    request: &FolderRequest,
    config: &FolderConfig,
    sink: &dyn DiagnosticSink,
) -> Result<FolderSummary> {
    let dest_root = match request.dest_root {
        Some(ref dest) => dest.clone(),
        None => {
            sink.warning(&default_directory_warning(&config.default_directory));
            std::env::current_dir()?.join(&config.default_directory)
        }
    };

    if !dest_root.exists() {
        fs::create_dir_all(&dest_root).map_err(|e| OrganizerError::io_at(e, &dest_root))?;
    }

    let entries = roster::read_lines(&request.roster_file)?;

    let mut summary = FolderSummary {
        destination: dest_root,
        created: Vec::new(),
        already_present: Vec::new(),
        rejected: Vec::new(),
    };

    for entry in entries.into_iter().filter(|e| e.has_name()) {
        if !is_single_segment(&entry.student_name) {
            sink.warning(&format!(
                "skipping roster name \"{}\": it is not a plain folder name",
                entry.student_name
            ));
            summary.rejected.push(entry.student_name);
            continue;
        }

        let folder = summary.destination.join(&entry.student_name);
        if folder.exists() {
            summary.already_present.push(entry.student_name);
            continue;
        }

        fs::create_dir(&folder).map_err(|e| OrganizerError::io_at(e, &folder))?;
        sink.debug(&format!("Created {}", folder.display()));
        summary.created.push(entry.student_name);
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::CollectingSink;
    use tempfile::TempDir;

    fn directory_names(root: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(root)
            .unwrap()
            .map(|e| e.unwrap())
            .filter(|e| e.path().is_dir())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_folders_created_from_roster() {
        let temp_dir = TempDir::new().unwrap();
        let roster = temp_dir.path().join("roster.csv");
        fs::write(&roster, "Alice,abc1\n Bob ,abc2\n").unwrap();
        let dest = temp_dir.path().join("Students");

        let request = FolderRequest::new(&roster).with_dest_root(&dest);
        let sink = CollectingSink::new();
        let summary =
            generate_student_folders(&request, &FolderConfig::default(), &sink).unwrap();

        assert_eq!(summary.destination, dest);
        assert_eq!(directory_names(&dest), vec!["Alice", "Bob"]);
        assert_eq!(summary.created, vec!["Alice", "Bob"]);
        assert!(sink.warnings().is_empty());
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let roster = temp_dir.path().join("roster.csv");
        fs::write(&roster, "Alice,abc1\n Bob ,abc2\n").unwrap();
        let dest = temp_dir.path().join("out");

        let request = FolderRequest::new(&roster).with_dest_root(&dest);
        let sink = CollectingSink::new();
        generate_student_folders(&request, &FolderConfig::default(), &sink).unwrap();
        fs::write(dest.join("Alice").join("feedback.txt"), "good work").unwrap();

        let summary =
            generate_student_folders(&request, &FolderConfig::default(), &sink).unwrap();

        assert!(summary.created.is_empty());
        assert_eq!(summary.already_present, vec!["Alice", "Bob"]);
        assert_eq!(directory_names(&dest), vec!["Alice", "Bob"]);
        assert!(dest.join("Alice").join("feedback.txt").exists());
    }

    #[test]
    fn test_blank_and_nameless_lines_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let roster = temp_dir.path().join("roster.csv");
        fs::write(&roster, "\n   \n,abc9\nKim\nKim,dup\n").unwrap();
        let dest = temp_dir.path().join("out");

        let summary = generate_student_folders(
            &FolderRequest::new(&roster).with_dest_root(&dest),
            &FolderConfig::default(),
            &CollectingSink::new(),
        )
        .unwrap();

        assert_eq!(directory_names(&dest), vec!["Kim"]);
        assert_eq!(summary.created, vec!["Kim"]);
        assert_eq!(summary.already_present, vec!["Kim"]);
    }

    #[test]
    fn test_path_like_names_stay_inside_destination() {
        let temp_dir = TempDir::new().unwrap();
        let outside = temp_dir.path().join("outside");
        let roster = temp_dir.path().join("roster.csv");
        fs::write(
            &roster,
            format!("{},abc1\n../escape,abc2\nnested/dir,abc3\nAlice,abc4\n", outside.display()),
        )
        .unwrap();
        let dest = temp_dir.path().join("Students");

        let sink = CollectingSink::new();
        let summary = generate_student_folders(
            &FolderRequest::new(&roster).with_dest_root(&dest),
            &FolderConfig::default(),
            &sink,
        )
        .unwrap();

        assert!(!outside.exists());
        assert!(!temp_dir.path().join("escape").exists());
        assert_eq!(directory_names(&dest), vec!["Alice"]);
        assert_eq!(summary.rejected.len(), 3);
        assert_eq!(sink.warnings().len(), 3);
    }

    #[test]
    fn test_missing_roster_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = generate_student_folders(
            &FolderRequest::new(temp_dir.path().join("missing.csv"))
                .with_dest_root(temp_dir.path().join("out")),
            &FolderConfig::default(),
            &CollectingSink::new(),
        );

        assert!(matches!(result, Err(OrganizerError::RosterNotFound { .. })));
    }
}
