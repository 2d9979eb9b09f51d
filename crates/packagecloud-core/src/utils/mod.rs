//! Utility functions and helpers.

pub mod path;

pub use path::{file_extension, file_name, is_remote_source};
