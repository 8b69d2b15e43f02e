use clap::Parser;
use grade_organizer::{
    Cli, GradeOrganizer, OrganizerError, OutputFormatter, OutputMode, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments; clap exits with status 2 on usage errors
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let organizer = match GradeOrganizer::from_cli(&cli) {
        Ok(organizer) => organizer,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    match organizer.run(&cli) {
        Ok(()) => 0,
        Err(e) => {
            organizer.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &OrganizerError) -> i32 {
    match error {
        OrganizerError::MissingArgument { .. } => 2,
        OrganizerError::RosterNotFound { .. } => 3,
        OrganizerError::Permission { .. } => 4,
        OrganizerError::Archive { .. } => 5,
        OrganizerError::Csv { .. } => 6,
        OrganizerError::Config { .. } => 7,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "grade-organizer.toml".to_string());

    match GradeOrganizer::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  grade-organizer <MODE> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            exit_code_for(&e)
        }
    }
}

fn print_startup_error(error: &OrganizerError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
