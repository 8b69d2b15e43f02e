use crate::error::{OrganizerError, UserFriendlyError};
use crate::ui::sink::{DiagnosticSink, WarningStyle};
use console::{style, Emoji, Term};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

/// Result of one operation, printable in every output mode.
pub trait Summary: Serialize {
    fn headline(&self) -> String;
    fn details(&self) -> Vec<(&'static str, String)>;
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");

pub struct OutputFormatter {
    mode: OutputMode,
    warning_style: WarningStyle,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stderr().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            warning_style: WarningStyle::default(),
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn with_warning_style(mut self, style: WarningStyle) -> Self {
        self.warning_style = style;
        self
    }

    pub fn success(&self, message: &str) {
        if !self.should_show_message(0) {
            return;
        }
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("SUCCESS: {}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &OrganizerError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    pub fn print_summary<S: Summary>(&self, summary: &S) {
        match self.mode {
            OutputMode::Human => {
                if self.quiet {
                    return;
                }
                self.success(&summary.headline());
                for (label, value) in summary.details() {
                    if self.use_colors {
                        println!("  {:<20} {}", label, style(value).cyan().bold());
                    } else {
                        println!("  {:<20} {}", label, value);
                    }
                }
            }
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => {
                if self.quiet {
                    return;
                }
                println!("COMPLETED: {}", summary.headline());
                for (label, value) in summary.details() {
                    println!("{}: {}", label, value);
                }
            }
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_warning(&self, message: &str) {
        match (self.mode, self.warning_style) {
            (OutputMode::Json, _) => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "type": "message",
                        "level": "warning",
                        "message": message,
                        "timestamp": chrono::Utc::now().to_rfc3339()
                    })
                );
            }
            (_, WarningStyle::Bare) => eprintln!("{}", message),
            (OutputMode::Plain, WarningStyle::Decorated) => eprintln!("WARNING: {}", message),
            (OutputMode::Human, WarningStyle::Decorated) => {
                self.print_human_message(MessageType::Warning, message)
            }
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Success => (CHECKMARK, Box::new(|msg| style(msg).green().bold())),
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
                MessageType::Info => (INFO, Box::new(|msg| style(msg).cyan())),
            };

        let to_stderr = matches!(msg_type, MessageType::Error | MessageType::Warning);

        if self.use_colors {
            if to_stderr {
                eprintln!("{}{}", emoji, color_fn(message));
            } else {
                println!("{}{}", emoji, color_fn(message));
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Warning => "!",
                MessageType::Info => "i",
            };

            if to_stderr {
                eprintln!("{} {}", prefix, message);
            } else {
                println!("{} {}", prefix, message);
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

impl DiagnosticSink for OutputFormatter {
    fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            self.print_warning(message);
        }
    }

    fn info(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Json => self.print_json_message("info", message),
                OutputMode::Plain => println!("INFO: {}", message),
            }
        }
    }

    fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Warning,
    Info,
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
