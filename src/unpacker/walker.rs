use crate::config::{default_directory_warning, UnpackConfig};
use crate::error::{OrganizerError, Result};
use crate::ui::output::format_bytes;
use crate::ui::progress::finish_progress_with_summary;
use crate::ui::{DiagnosticSink, ProgressManager, Summary};
use crate::unpacker::archive;
use crate::unpacker::file_ops::FileCopier;
use crate::unpacker::filter::ExclusionFilter;
use serde::Serialize;
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, Default)]
pub struct UnpackRequest {
    pub source_root: Option<PathBuf>,
    pub dest_root: Option<PathBuf>,
    pub allow_top_level_files: bool,
}

impl UnpackRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.source_root = Some(root.into());
        self
    }

    pub fn with_dest_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.dest_root = Some(root.into());
        self
    }

    pub fn with_top_level_files(mut self, allow: bool) -> Self {
        self.allow_top_level_files = allow;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UnpackSummary {
    pub destination: PathBuf,
    pub directories_mirrored: usize,
    pub files_copied: usize,
    pub archives_extracted: usize,
    pub fallback_copies: usize,
    pub top_level_skipped: usize,
    pub excluded: usize,
    pub links_skipped: usize,
    pub bytes_copied: u64,
}

impl UnpackSummary {
    fn new(destination: PathBuf) -> Self {
        Self {
            destination,
            ..Self::default()
        }
    }

    fn processed(&self) -> usize {
        self.files_copied + self.archives_extracted
    }
}

impl Summary for UnpackSummary {
    fn headline(&self) -> String {
        format!("Unpacked submissions into {}", self.destination.display())
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = vec![
            ("Archives extracted:", self.archives_extracted.to_string()),
            ("Files copied:", self.files_copied.to_string()),
            ("Bytes copied:", format_bytes(self.bytes_copied)),
            ("Directories:", self.directories_mirrored.to_string()),
        ];
        if self.fallback_copies > 0 {
            details.push(("Not real archives:", self.fallback_copies.to_string()));
        }
        if self.top_level_skipped > 0 {
            details.push(("Top-level skipped:", self.top_level_skipped.to_string()));
        }
        if self.excluded > 0 {
            details.push(("Excluded:", self.excluded.to_string()));
        }
        if self.links_skipped > 0 {
            details.push(("Links skipped:", self.links_skipped.to_string()));
        }
        details
    }
}

pub const NO_SOURCE_WARNING: &str =
    "no input directory given, scanning the current directory for folders containing zipped files";

pub struct SubmissionUnpacker<'a> {
    config: &'a UnpackConfig,
    filter: ExclusionFilter,
    copier: FileCopier,
    sink: &'a dyn DiagnosticSink,
    progress: &'a ProgressManager,
}

impl<'a> SubmissionUnpacker<'a> {
    pub fn new(
        config: &'a UnpackConfig,
        sink: &'a dyn DiagnosticSink,
        progress: &'a ProgressManager,
    ) -> Result<Self> {
        Ok(Self {
            config,
            filter: ExclusionFilter::new(config)?,
            copier: FileCopier::new().with_preserve_timestamps(config.preserve_timestamps),
            sink,
            progress,
        })
    }

    pub fn unpack(&self, request: &UnpackRequest) -> Result<UnpackSummary> {
        let start_time = Instant::now();

        let dest_root = match request.dest_root {
            Some(ref dest) => dest.clone(),
            None => {
                self.sink
                    .warning(&default_directory_warning(&self.config.default_directory));
                std::env::current_dir()?.join(&self.config.default_directory)
            }
        };

        if !dest_root.exists() {
            fs::create_dir_all(&dest_root).map_err(|e| OrganizerError::io_at(e, &dest_root))?;
        }

        let source_root = match request.source_root {
            Some(ref source) => source.clone(),
            None => {
                self.sink.warning(NO_SOURCE_WARNING);
                std::env::current_dir()?
            }
        };

        if !source_root.is_dir() {
            return Err(OrganizerError::InvalidPath {
                path: format!("{} is not a directory", source_root.display()),
            });
        }

        let source_root =
            fs::canonicalize(&source_root).map_err(|e| OrganizerError::io_at(e, &source_root))?;
        let dest_canonical =
            fs::canonicalize(&dest_root).map_err(|e| OrganizerError::io_at(e, &dest_root))?;

        self.sink.debug(&format!(
            "Unpacking {} into {}",
            source_root.display(),
            dest_canonical.display()
        ));

        if source_root == dest_canonical {
            self.sink.warning(
                "input and output directories are the same, nothing to unpack",
            );
            return Ok(UnpackSummary::new(dest_root));
        }

        let spinner = self.progress.create_spinner("Unpacking submissions");
        let mut summary = UnpackSummary::new(dest_root);

        match self.walk(&source_root, &dest_canonical, request, &mut summary, &spinner) {
            Ok(()) => {
                finish_progress_with_summary(
                    &spinner,
                    &format!("Processed {} files", summary.processed()),
                    start_time.elapsed(),
                );
                Ok(summary)
            }
            Err(e) => {
                spinner.abandon_with_message("Unpacking failed");
                Err(e)
            }
        }
    }

    fn walk(
        &self,
        source_root: &Path,
        dest_root: &Path,
        request: &UnpackRequest,
        summary: &mut UnpackSummary,
        spinner: &indicatif::ProgressBar,
    ) -> Result<()> {
        let excluded = Cell::new(0usize);
        let walker = WalkDir::new(source_root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.path() == dest_root {
                    return false;
                }
                let keep = self.should_traverse(e);
                if !keep {
                    excluded.set(excluded.get() + 1);
                    self.sink.debug(&format!("Excluding {}", e.path().display()));
                }
                keep
            });

        for entry in walker {
            let entry = entry?;
            let relative = entry.path().strip_prefix(source_root).map_err(|_| {
                OrganizerError::InvalidPath {
                    path: format!(
                        "Cannot calculate relative path for {} from root {}",
                        entry.path().display(),
                        source_root.display()
                    ),
                }
            })?;

            if entry.file_type().is_dir() {
                let mirror = if entry.depth() == 0 {
                    dest_root.to_path_buf()
                } else {
                    dest_root.join(relative)
                };
                fs::create_dir_all(&mirror).map_err(|e| OrganizerError::io_at(e, &mirror))?;
                if entry.depth() > 0 {
                    summary.directories_mirrored += 1;
                }
                continue;
            }

            // Links are never descended into, but a link to a regular file is
            // copied like the file itself.
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                if entry.path_is_symlink() {
                    summary.links_skipped += 1;
                    self.sink
                        .debug(&format!("Skipping link {}", entry.path().display()));
                }
                continue;
            }

            if entry.depth() == 1 && !request.allow_top_level_files {
                summary.top_level_skipped += 1;
                continue;
            }

            spinner.set_message(relative.display().to_string());
            self.process_file(&entry, &dest_root.join(relative), summary)?;
            spinner.inc(1);
        }

        summary.excluded = excluded.get();
        Ok(())
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 {
            return true;
        }

        if entry.file_type().is_dir() {
            return self.filter.should_traverse_directory(entry.path());
        }

        self.filter.should_copy_file(entry.path())
    }

    fn process_file(&self, entry: &DirEntry, target: &Path, summary: &mut UnpackSummary) -> Result<()> {
        let path = entry.path();

        if archive::is_zip_candidate(path) {
            match archive::open_zip(path)? {
                Some(mut zip) => {
                    let entries = archive::extract_into(&mut zip, path, target)?;
                    self.sink.debug(&format!(
                        "Extracted {} entries from {}",
                        entries,
                        path.display()
                    ));
                    summary.archives_extracted += 1;
                    return Ok(());
                }
                None => {
                    self.sink.info(&format!(
                        "{} is not a valid zip archive, copying it as-is",
                        path.display()
                    ));
                    summary.fallback_copies += 1;
                }
            }
        }

        let outcome = self.copier.copy_file(path, target)?;
        if let Some(e) = outcome.mtime_error {
            self.sink.debug(&format!(
                "Could not preserve modification time of {}: {}",
                target.display(),
                e
            ));
        }
        summary.files_copied += 1;
        summary.bytes_copied += outcome.bytes;
        Ok(())
    }
}

pub fn unpack_submissions(
    request: &UnpackRequest,
    config: &UnpackConfig,
    sink: &dyn DiagnosticSink,
    progress: &ProgressManager,
) -> Result<UnpackSummary> {
    SubmissionUnpacker::new(config, sink, progress)?.unpack(request)
}
