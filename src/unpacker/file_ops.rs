use crate::error::{OrganizerError, Result};
use std::fs;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

const BUFFER_SIZE: usize = 64 * 1024;

/// What a single copy did. The data is always copied in full; a failure to
/// carry the modification time over is reported but not fatal.
#[derive(Debug)]
pub struct CopyOutcome {
    pub bytes: u64,
    pub mtime_error: Option<io::Error>,
}

pub struct FileCopier {
    preserve_timestamps: bool,
}

impl FileCopier {
    pub fn new() -> Self {
        Self {
            preserve_timestamps: true,
        }
    }

    pub fn with_preserve_timestamps(mut self, preserve: bool) -> Self {
        self.preserve_timestamps = preserve;
        self
    }

    /// Copy `source` to `dest` byte for byte, replacing any existing file.
    pub fn copy_file(&self, source: &Path, dest: &Path) -> Result<CopyOutcome> {
        if !source.is_file() {
            return Err(OrganizerError::InvalidPath {
                path: format!("Source is not a file: {}", source.display()),
            });
        }

        let source_file = fs::File::open(source).map_err(|e| OrganizerError::io_at(e, source))?;
        let dest_file = fs::File::create(dest).map_err(|e| OrganizerError::io_at(e, dest))?;

        let mut reader = BufReader::with_capacity(BUFFER_SIZE, source_file);
        let mut writer = BufWriter::with_capacity(BUFFER_SIZE, dest_file);

        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; 8192];

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| OrganizerError::io_at(e, source))?;

            if bytes_read == 0 {
                break;
            }

            writer
                .write_all(&buffer[..bytes_read])
                .map_err(|e| OrganizerError::io_at(e, dest))?;

            total_bytes += bytes_read as u64;
        }

        writer.flush().map_err(|e| OrganizerError::io_at(e, dest))?;
        drop(writer);

        let mtime_error = if self.preserve_timestamps {
            copy_mtime(source, dest).err()
        } else {
            None
        };

        Ok(CopyOutcome {
            bytes: total_bytes,
            mtime_error,
        })
    }
}

fn copy_mtime(source: &Path, dest: &Path) -> io::Result<()> {
    let modified = fs::metadata(source)?.modified()?;
    filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(modified))
}

impl Default for FileCopier {
    fn default() -> Self {
        Self::new()
    }
}
