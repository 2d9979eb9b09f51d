//! Helpers for package sources given as local paths or URLs.

use std::path::Path;

/// Check whether a package source is an `http://` or `https://` URL
pub fn is_remote_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Final path segment of a local path or URL
///
/// Query strings and fragments of URLs are not part of the name.
pub fn file_name(source: &str) -> &str {
    let path = if is_remote_source(source) {
        source
            .split(|c| c == '?' || c == '#')
            .next()
            .unwrap_or(source)
    } else {
        source
    };
    match path.rfind(|c| c == '/' || c == std::path::MAIN_SEPARATOR) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Extension of the file a source points at, without the dot
pub fn file_extension(source: &str) -> Option<&str> {
    Path::new(file_name(source))
        .extension()
        .and_then(|ext| ext.to_str())
}
