//! Sandbox paths.
//!
//! `/host` points to the cwd of the last focused terminal, or the folder
//! Zellij was started in. That is usually the home directory, so the shelf
//! file ends up at `~/.local/share/zellij/bookshelf/local-storage.json`.

use std::path::PathBuf;

/// File holding the saved list, under [`data_dir`].
pub const STORAGE_FILE_NAME: &str = "local-storage.json";

/// File receiving exported spans, under [`data_dir`].
pub const TRACE_FILE_NAME: &str = "bookshelf-otlp.json";

/// Directory for everything the plugin writes.
///
/// ```
/// use bookshelf::infrastructure::data_dir;
///
/// assert_eq!(data_dir().to_str(), Some("/host/.local/share/zellij/bookshelf"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookshelf")
}

/// Default location of the persisted shelf.
#[must_use]
pub fn storage_file() -> PathBuf {
    data_dir().join(STORAGE_FILE_NAME)
}

/// Location of the OTLP span export.
#[must_use]
pub fn trace_file() -> PathBuf {
    data_dir().join(TRACE_FILE_NAME)
}

/// Maps `~` to `/host` so user-supplied paths resolve inside the sandbox.
///
/// ```
/// use bookshelf::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/books.json"), "/host/books.json");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/books.json"), "/tmp/books.json");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_in_data_dir() {
        assert!(storage_file().starts_with(data_dir()));
        assert!(storage_file().ends_with(STORAGE_FILE_NAME));
        assert!(trace_file().ends_with(TRACE_FILE_NAME));
    }

    #[test]
    fn tilde_only_expands_as_prefix() {
        assert_eq!(expand_tilde("~other/file"), "~other/file");
    }
}
