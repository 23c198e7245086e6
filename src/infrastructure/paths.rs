//! Path utilities for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host` (in
//! practice the user's home directory when Zellij was started from it). These
//! helpers translate between the two worlds for the trace output directory
//! and user-supplied theme file paths.

use std::path::PathBuf;

/// Returns the plugin data directory for trace output.
///
/// Resolves to `/host/.local/share/zellij/knihovka`, which typically maps to
/// `~/.local/share/zellij/knihovka` on the host.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("knihovka")
}

/// Expands tilde paths to the `/host` sandbox prefix.
///
/// Used for the `theme_file` configuration value, so users can write
/// `~/themes/moje.toml` the way they would anywhere else.
///
/// # Examples
///
/// ```
/// use knihovka::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/moje.toml"), "/host/themes/moje.toml");
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
/// use knihovka::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/home/user/x"), "/home/user/x");
/// assert_eq!(strip_host_prefix("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix("/host").unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expansion_round_trips_with_strip() {
        let expanded = expand_tilde("~/themes/moje.toml");
        assert_eq!(strip_host_prefix(&expanded), "/themes/moje.toml");
    }
}
