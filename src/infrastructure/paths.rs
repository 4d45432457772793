//! Path manipulation utilities for Zellij sandbox environment.
//!
//! In the Zellij plugin sandbox the host filesystem is mounted under `/host`.
//! These helpers map user-facing paths into the sandbox and back, and locate
//! the directory the plugin writes its trace file to.

use std::path::{Path, PathBuf};

/// Returns the data directory for drillmenu files.
///
/// The directory is located at `/host/.local/share/zellij/drillmenu` in the
/// Zellij sandbox. `/host` points to the cwd of the last focused terminal, or
/// the folder where Zellij was started, which is usually the home directory.
///
/// # Examples
///
/// ```
/// use drillmenu::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/drillmenu"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("drillmenu")
}

/// Expands tilde paths to use the `/host` prefix for Zellij sandbox.
///
/// # Examples
///
/// ```
/// use drillmenu::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/menus/ops.toml"), "/host/menus/ops.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
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

/// Removes the `/host` prefix from sandbox paths for display purposes.
///
/// # Examples
///
/// ```
/// use drillmenu::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/menus/ops.toml"), "/menus/ops.toml");
/// assert_eq!(strip_host_prefix("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix("/host").unwrap_or(path).to_string()
}

/// Whether two paths name the same file, ignoring the sandbox prefix.
///
/// Filesystem events may report a watched file with or without `/host`, and
/// with or without a leading slash.
#[must_use]
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    fn normalized(path: &Path) -> String {
        let text = path.to_string_lossy();
        strip_host_prefix(&text).trim_start_matches('/').to_string()
    }
    normalized(a) == normalized(b)
}
