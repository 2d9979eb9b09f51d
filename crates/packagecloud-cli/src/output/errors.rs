//! Error message formatting and exit status mapping.

use std::error::Error;

use packagecloud_core::error::PackagecloudError;
use super::colors::ColorSupport;

/// Exit status for a failed command: 2 for usage errors, 1 otherwise
pub fn exit_status(error: &PackagecloudError) -> u8 {
    if error.is_usage_error() {
        2
    } else {
        1
    }
}

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    /// Format an error with its cause chain and a suggestion when one exists
    pub fn format_error(&self, error: &PackagecloudError) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());
        output.push('\n');

        let mut source = error.source();
        while let Some(err) = source {
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            output.push('\n');
            source = err.source();
        }

        if let Some(suggestion) = error.suggestion() {
            output.push('\n');
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        output
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
