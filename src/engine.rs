//! File discovery and parallel execution of checking rounds

pub mod executor;
pub mod file_walker;

pub use executor::{ExecutionEngine, ExecutionResult};
pub use file_walker::{FileEntry, FileWalker, FileWalkerError, LanguageDetector};
