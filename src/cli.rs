use crate::config::{CliOverrides, Config};
use crate::error::{OrganizerError, Result};
use crate::folders::FolderRequest;
use crate::gradebook::{ensure_csv_extension, GradebookRequest};
use crate::ui::WarningStyle;
use crate::unpacker::UnpackRequest;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "grade-organizer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Organize gradebooks, submissions and student folders")]
#[command(
    long_about = "grade-organizer builds gradebook CSV files from rosters or student folders, \
                  unpacks zipped submissions into a mirrored directory tree, and creates one \
                  folder per student listed in a roster."
)]
#[command(after_help = "EXAMPLES:\n  \
    grade-organizer csv -d submissions -n 2\n  \
    grade-organizer csv -i roster.csv -o week3\n  \
    grade-organizer zip -i downloads -d unzipped --toplevel\n  \
    grade-organizer folder -i roster.csv -d Students")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// csv - create grade book; zip - mass unzip; folder - generate name folders from file
    #[arg(value_enum, required_unless_present = "generate_config")]
    pub mode: Option<Mode>,

    /// csv: directory holding student folders; zip: target for unzipped files; folder: where to create student folders
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Name of the gradebook file, placed in the working directory
    #[arg(short, long, default_value = "gradebook.csv")]
    pub output: String,

    /// Maximum number of collaborators per submission
    #[arg(short, long = "numcollaborators", default_value_t = 1, allow_negative_numbers = true)]
    pub numcollaborators: i64,

    /// csv: roster file; zip: directory containing submissions; folder: roster file
    #[arg(short, long = "inputfile", required_if_eq("mode", "folder"))]
    pub inputfile: Option<PathBuf>,

    /// Copy files sitting directly in the input directory (zip mode)
    #[arg(short = 't', long = "toplevel", alias = "tl")]
    pub toplevel: bool,

    /// Additional directory names to skip while unpacking
    #[arg(long, value_delimiter = ',')]
    pub exclude_dir: Option<Vec<String>>,

    /// Additional file names to skip while unpacking
    #[arg(long, value_delimiter = ',')]
    pub exclude_file: Option<Vec<String>>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// How warnings are written to stderr
    #[arg(long, value_enum)]
    pub warning_style: Option<WarningStyle>,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Create a gradebook CSV
    Csv,
    /// Unzip submissions into a mirrored tree
    Zip,
    /// Create one folder per roster entry
    Folder,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_exclude_dirs(self.exclude_dir.clone())
            .with_exclude_files(self.exclude_file.clone())
            .with_warning_style(self.warning_style)
    }

    pub fn collaborator_columns(&self) -> usize {
        normalize_collaborators(self.numcollaborators)
    }

    pub fn gradebook_request(&self) -> GradebookRequest {
        GradebookRequest {
            source_root: self.directory.clone(),
            output_name: ensure_csv_extension(&self.output),
            collaborator_columns: self.collaborator_columns(),
            roster_file: self.inputfile.clone(),
        }
    }

    pub fn unpack_request(&self) -> UnpackRequest {
        UnpackRequest {
            source_root: self.inputfile.clone(),
            dest_root: self.directory.clone(),
            allow_top_level_files: self.toplevel,
        }
    }

    pub fn folder_request(&self) -> Result<FolderRequest> {
        let roster = self
            .inputfile
            .clone()
            .ok_or_else(|| OrganizerError::MissingArgument {
                argument: "--inputfile".to_string(),
                mode: "folder".to_string(),
            })?;

        Ok(FolderRequest {
            roster_file: roster,
            dest_root: self.directory.clone(),
        })
    }
}

/// Collaborator column counts below one are raised to one.
pub fn normalize_collaborators(requested: i64) -> usize {
    usize::try_from(requested.max(1)).unwrap_or(1)
}
