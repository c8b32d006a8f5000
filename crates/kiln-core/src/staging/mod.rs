//! In-memory staging of generated files

pub mod ops;
pub mod store;

pub use ops::{dump_file_names, dump_file_names_with, exists_in_memory, in_memory_copy, in_memory_move};
pub use store::{flush, FileEntry, FileState, MemStore, StagedFiles};
