use crate::error::{OrganizerError, Result};
use crate::roster::RosterEntry;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Locate a roster file. Relative paths are tried against `working_root`
/// first and then as given (relative to the process directory).
pub fn resolve_roster_path(roster: &Path, working_root: &Path) -> Result<PathBuf> {
    if roster.is_relative() {
        let candidate = working_root.join(roster);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    if roster.is_file() {
        return Ok(roster.to_path_buf());
    }

    Err(OrganizerError::RosterNotFound {
        path: roster.display().to_string(),
    })
}

/// Read every record of a comma-separated roster. There is no header row and
/// records may differ in width.
pub fn read_records(path: &Path) -> Result<Vec<RosterEntry>> {
    let file = open_roster(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| OrganizerError::csv_at(e, path))?;
        entries.push(RosterEntry::from_fields(record.iter()));
    }

    Ok(entries)
}

/// Read a roster line by line without CSV quoting rules.
pub fn read_lines(path: &Path) -> Result<Vec<RosterEntry>> {
    let reader = BufReader::new(open_roster(path)?);

    let mut entries = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| OrganizerError::io_at(e, path))?;
        if line.is_empty() {
            continue;
        }
        entries.push(RosterEntry::from_line(&line));
    }

    Ok(entries)
}

fn open_roster(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            OrganizerError::RosterNotFound {
                path: path.display().to_string(),
            }
        } else {
            OrganizerError::io_at(e, path)
        }
    })
}
