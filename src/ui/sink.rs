use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Receiver for the diagnostics an operation emits while it runs.
///
/// Operations never print directly; the CLI hands them an
/// [`OutputFormatter`](crate::ui::OutputFormatter), tests hand them a
/// [`CollectingSink`].
pub trait DiagnosticSink {
    /// A configuration gap was filled with a default, or output needs review.
    fn warning(&self, message: &str);

    fn info(&self, message: &str);

    fn debug(&self, message: &str);
}

/// How warnings are rendered on the error stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WarningStyle {
    /// The message alone on a single line.
    #[default]
    Bare,
    /// Prefixed and colored when the terminal supports it.
    Decorated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Warning,
    Info,
    Debug,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub message: String,
}

/// Sink that records everything it receives.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: RefCell<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .map(|d| d.message.clone())
            .collect()
    }

    fn push(&self, level: DiagnosticLevel, message: &str) {
        self.entries.borrow_mut().push(Diagnostic {
            level,
            message: message.to_string(),
        });
    }
}

impl DiagnosticSink for CollectingSink {
    fn warning(&self, message: &str) {
        self.push(DiagnosticLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.push(DiagnosticLevel::Info, message);
    }

    fn debug(&self, message: &str) {
        self.push(DiagnosticLevel::Debug, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_filters_warnings() {
        let sink = CollectingSink::new();
        sink.info("starting");
        sink.warning("no output directory given");
        sink.debug("resolved /tmp/x");

        assert_eq!(sink.entries().len(), 3);
        assert_eq!(sink.warnings(), vec!["no output directory given".to_string()]);
    }

    #[test]
    fn test_warning_style_serialization() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            style: WarningStyle,
        }

        let text = toml::to_string(&Wrapper {
            style: WarningStyle::Decorated,
        })
        .unwrap();
        assert!(text.contains("\"decorated\""));

        let parsed: Wrapper = toml::from_str("style = \"bare\"").unwrap();
        assert_eq!(parsed.style, WarningStyle::Bare);
    }
}
