pub mod generator;

pub use generator::{generate_student_folders, FolderRequest, FolderSummary};
