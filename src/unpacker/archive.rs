use crate::error::{OrganizerError, Result};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use zip::ZipArchive;

/// Only files named `*.zip` are considered for extraction.
pub fn is_zip_candidate(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Open `path` as a ZIP archive. `Ok(None)` means the file does not carry a
/// readable ZIP central directory and should be treated as an ordinary file.
pub fn open_zip(path: &Path) -> Result<Option<ZipArchive<File>>> {
    let file = File::open(path).map_err(|e| OrganizerError::io_at(e, path))?;

    match ZipArchive::new(file) {
        Ok(archive) => Ok(Some(archive)),
        Err(_) => Ok(None),
    }
}

/// Extract every entry of `archive` below `destination`, creating it first.
/// Existing files are overwritten; entries whose names would escape
/// `destination` abort the extraction.
pub fn extract_into(
    archive: &mut ZipArchive<File>,
    archive_path: &Path,
    destination: &Path,
) -> Result<usize> {
    fs::create_dir_all(destination).map_err(|e| OrganizerError::io_at(e, destination))?;

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| OrganizerError::archive_at(e, archive_path))?;

        let relative = entry
            .enclosed_name()
            .map(|p| p.to_path_buf())
            .ok_or_else(|| OrganizerError::InvalidPath {
                path: format!(
                    "Archive entry {} in {} escapes the extraction directory",
                    entry.name(),
                    archive_path.display()
                ),
            })?;
        let outpath = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&outpath).map_err(|e| OrganizerError::io_at(e, &outpath))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent).map_err(|e| OrganizerError::io_at(e, parent))?;
        }
        let mut outfile = File::create(&outpath).map_err(|e| OrganizerError::io_at(e, &outpath))?;
        io::copy(&mut entry, &mut outfile).map_err(|e| OrganizerError::io_at(e, &outpath))?;
    }

    Ok(archive.len())
}
