pub mod output;
pub mod progress;
pub mod sink;

pub use output::{OutputFormatter, OutputMode, Summary};
pub use progress::ProgressManager;
pub use sink::{CollectingSink, Diagnostic, DiagnosticLevel, DiagnosticSink, WarningStyle};
