pub mod cli;
pub mod config;
pub mod error;
pub mod folders;
pub mod gradebook;
pub mod paths;
pub mod roster;
pub mod ui;
pub mod unpacker;

// Public API re-exports
pub use cli::{Cli, Mode, OutputFormat};
pub use config::{CliOverrides, Config, DiagnosticsConfig, FolderConfig, GradebookConfig, UnpackConfig};
pub use error::{OrganizerError, Result, UserFriendlyError};

// Core functionality re-exports
pub use folders::{FolderRequest, FolderSummary};
pub use gradebook::{GradebookRequest, GradebookSource, GradebookSummary};
pub use roster::RosterEntry;
pub use ui::{
    CollectingSink, DiagnosticSink, OutputFormatter, OutputMode, ProgressManager, Summary,
    WarningStyle,
};
pub use unpacker::{UnpackRequest, UnpackSummary};

use std::path::Path;

/// Main library interface tying configuration, diagnostics and the three
/// grading operations together.
pub struct GradeOrganizer {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl GradeOrganizer {
    /// Create a new GradeOrganizer with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet)
            .with_warning_style(config.diagnostics.warning_style);
        let progress_manager = ProgressManager::new(!quiet && matches!(output_mode, OutputMode::Human));

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create GradeOrganizer instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbose, cli_args.quiet))
    }

    /// Write a gradebook CSV from a roster or from the student folders
    pub fn build_gradebook(&self, request: &GradebookRequest) -> Result<GradebookSummary> {
        self.output_formatter.start_operation("Building gradebook");
        gradebook::build_gradebook(request, &self.config.gradebook, &self.output_formatter)
    }

    /// Mirror a submissions tree, expanding every zip archive in place
    pub fn unpack_submissions(&self, request: &UnpackRequest) -> Result<UnpackSummary> {
        self.output_formatter.start_operation("Unpacking submissions");
        unpacker::unpack_submissions(
            request,
            &self.config.unpack,
            &self.output_formatter,
            &self.progress_manager,
        )
    }

    /// Create one folder per roster entry
    pub fn generate_student_folders(&self, request: &FolderRequest) -> Result<FolderSummary> {
        self.output_formatter.start_operation("Generating student folders");
        folders::generate_student_folders(request, &self.config.folders, &self.output_formatter)
    }

    /// Dispatch the mode selected on the command line and print its summary
    pub fn run(&self, cli_args: &Cli) -> Result<()> {
        let mode = cli_args.mode.ok_or_else(|| OrganizerError::MissingArgument {
            argument: "<MODE>".to_string(),
            mode: "any".to_string(),
        })?;

        match mode {
            Mode::Csv => {
                let summary = self.build_gradebook(&cli_args.gradebook_request())?;
                self.output_formatter.print_summary(&summary);
            }
            Mode::Zip => {
                let summary = self.unpack_submissions(&cli_args.unpack_request())?;
                self.output_formatter.print_summary(&summary);
            }
            Mode::Folder => {
                let summary = self.generate_student_folders(&cli_args.folder_request()?)?;
                self.output_formatter.print_summary(&summary);
            }
        }

        Ok(())
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let output_path = output_path.as_ref();
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path, sample_config)
            .map_err(|e| OrganizerError::io_at(e, output_path))?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &OrganizerError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn quiet_organizer() -> GradeOrganizer {
        GradeOrganizer::new(Config::default(), OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_organizer_creation() {
        let organizer = GradeOrganizer::new(Config::default(), OutputMode::Human, 1, false);
        assert_eq!(organizer.config().gradebook.collaborator_prefix, "abc123");
        assert_eq!(organizer.config().unpack.default_directory, "Unzipped");
    }

    #[test]
    fn test_build_gradebook_from_roster() {
        let temp_dir = TempDir::new().unwrap();
        let roster = temp_dir.path().join("roster.csv");
        fs::write(&roster, "Alice,abc1\nBob,abc2,,late\n").unwrap();

        let request = GradebookRequest::new("book.csv")
            .with_source_root(temp_dir.path())
            .with_roster_file(&roster);
        let summary = quiet_organizer().build_gradebook(&request).unwrap();

        assert_eq!(summary.rows_written, 2);
        let written = fs::read_to_string(temp_dir.path().join("book.csv")).unwrap();
        assert!(written.starts_with("Students,abc123-1,Grade,Comments\n"));
        assert!(written.contains("Alice,abc1\n"));
        assert!(written.contains("Bob,abc2,,late\n"));
    }

    #[test]
    fn test_run_dispatches_folder_mode() {
        let temp_dir = TempDir::new().unwrap();
        let roster = temp_dir.path().join("roster.csv");
        fs::write(&roster, "Alice,abc1\nBob,abc2\n").unwrap();
        let dest = temp_dir.path().join("Students");

        let cli = Cli::try_parse_from([
            "grade-organizer",
            "folder",
            "-i",
            roster.to_str().unwrap(),
            "-d",
            dest.to_str().unwrap(),
            "-q",
        ])
        .unwrap();

        quiet_organizer().run(&cli).unwrap();
        assert!(dest.join("Alice").is_dir());
        assert!(dest.join("Bob").is_dir());
    }

    #[test]
    fn test_run_propagates_missing_roster() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.csv");

        let cli = Cli::try_parse_from([
            "grade-organizer",
            "csv",
            "-d",
            temp_dir.path().to_str().unwrap(),
            "-i",
            missing.to_str().unwrap(),
        ])
        .unwrap();

        let result = quiet_organizer().run(&cli);
        assert!(matches!(result, Err(OrganizerError::RosterNotFound { .. })));
        assert!(!temp_dir.path().join("gradebook.csv").exists());
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        GradeOrganizer::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[gradebook]"));
        assert!(content.contains("[unpack]"));

        let reloaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(reloaded.folders.default_directory, "Students");
    }

    #[test]
    fn test_version_info() {
        assert!(!version_info().is_empty());
    }
}
