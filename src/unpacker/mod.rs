pub mod archive;
pub mod file_ops;
pub mod filter;
pub mod walker;

pub use file_ops::FileCopier;
pub use filter::ExclusionFilter;
pub use walker::{unpack_submissions, SubmissionUnpacker, UnpackRequest, UnpackSummary};
