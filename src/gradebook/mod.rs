pub mod builder;

pub use builder::{
    build_gradebook, build_header, ensure_csv_extension, list_student_directories,
    GradebookRequest, GradebookSource, GradebookSummary,
};
