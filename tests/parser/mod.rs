//! Parser tests over realistic source files.

pub mod tests_error_display;
pub mod tests_files;
