use crate::config::GradebookConfig;
use crate::error::{OrganizerError, Result};
use crate::paths::is_single_segment;
use crate::roster::{self, RosterEntry};
use crate::ui::{DiagnosticSink, Summary};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DIRECTORY_MODE_WARNING: &str =
    "Using directory mode, please be sure to manually clean the output file of extraneous names";

#[derive(Debug, Clone)]
pub struct GradebookRequest {
    pub source_root: Option<PathBuf>,
    pub output_name: String,
    pub collaborator_columns: usize,
    pub roster_file: Option<PathBuf>,
}

impl GradebookRequest {
    pub fn new<S: Into<String>>(output_name: S) -> Self {
        Self {
            source_root: None,
            output_name: output_name.into(),
            collaborator_columns: 1,
            roster_file: None,
        }
    }

    pub fn with_source_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.source_root = Some(root.into());
        self
    }

    pub fn with_collaborator_columns(mut self, columns: usize) -> Self {
        self.collaborator_columns = columns.max(1);
        self
    }

    pub fn with_roster_file<P: Into<PathBuf>>(mut self, roster: P) -> Self {
        self.roster_file = Some(roster.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradebookSource {
    Directory,
    Roster,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradebookSummary {
    pub path: PathBuf,
    pub source: GradebookSource,
    pub header_columns: usize,
    pub rows_written: usize,
}

impl Summary for GradebookSummary {
    fn headline(&self) -> String {
        format!("Created gradebook: {}", self.path.display())
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let source = match self.source {
            GradebookSource::Directory => "directory listing",
            GradebookSource::Roster => "roster file",
        };
        vec![
            ("Names taken from:", source.to_string()),
            ("Header columns:", self.header_columns.to_string()),
            ("Student rows:", self.rows_written.to_string()),
        ]
    }
}

/// `Students`, one `<prefix>-k` column per collaborator, `Grade`, `Comments`.
pub fn build_header(prefix: &str, collaborator_columns: usize) -> Vec<String> {
    let columns = collaborator_columns.max(1);
    let mut header = Vec::with_capacity(columns + 3);
    header.push("Students".to_string());
    header.extend((1..=columns).map(|i| format!("{}-{}", prefix, i)));
    header.push("Grade".to_string());
    header.push("Comments".to_string());
    header
}

/// Append `.csv` unless the name already has a `csv` extension.
pub fn ensure_csv_extension(name: &str) -> String {
    let has_csv = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if has_csv {
        name.to_string()
    } else {
        format!("{}.csv", name)
    }
}

pub fn build_gradebook(
    request: &GradebookRequest,
    config: &GradebookConfig,
    sink: &dyn DiagnosticSink,
) -> Result<GradebookSummary> {
    if !is_single_segment(&request.output_name) {
        return Err(OrganizerError::InvalidPath {
            path: format!(
                "output name {} must be a file name, not a path",
                request.output_name
            ),
        });
    }

    let working_root = resolve_working_root(request.source_root.as_deref())?;
    let output_path = working_root.join(&request.output_name);
    sink.debug(&format!("Gradebook output: {}", output_path.display()));

    let header = build_header(&config.collaborator_prefix, request.collaborator_columns);

    // Everything is read before the output is opened so a roster stored at
    // the output path is not truncated first.
    let (source, entries) = match request.roster_file {
        None => {
            sink.warning(DIRECTORY_MODE_WARNING);
            let names = list_student_directories(&working_root, config.sort_directory_names)?;
            let entries = names.into_iter().map(RosterEntry::named).collect();
            (GradebookSource::Directory, entries)
        }
        Some(ref roster_file) => {
            let roster_path = roster::resolve_roster_path(roster_file, &working_root)?;
            sink.debug(&format!("Reading roster: {}", roster_path.display()));
            (GradebookSource::Roster, roster::read_records(&roster_path)?)
        }
    };

    write_gradebook(&output_path, &header, &entries)?;

    Ok(GradebookSummary {
        path: output_path,
        source,
        header_columns: header.len(),
        rows_written: entries.len(),
    })
}

fn resolve_working_root(source_root: Option<&Path>) -> Result<PathBuf> {
    let root = match source_root {
        Some(root) => root.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !root.is_dir() {
        return Err(OrganizerError::InvalidPath {
            path: format!("{} is not a directory", root.display()),
        });
    }

    Ok(root)
}

/// Names of the immediate subdirectories of `root`.
pub fn list_student_directories(root: &Path, sort: bool) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(root).map_err(|e| OrganizerError::io_at(e, root))? {
        let entry = entry.map_err(|e| OrganizerError::io_at(e, root))?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }

    if sort {
        names.sort();
    }

    Ok(names)
}

fn write_gradebook(path: &Path, header: &[String], entries: &[RosterEntry]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| OrganizerError::csv_at(e, path))?;

    writer
        .write_record(header)
        .map_err(|e| OrganizerError::csv_at(e, path))?;

    for entry in entries {
        writer
            .write_record(entry.to_record())
            .map_err(|e| OrganizerError::csv_at(e, path))?;
    }

    writer.flush().map_err(|e| OrganizerError::io_at(e, path))?;
    Ok(())
}
