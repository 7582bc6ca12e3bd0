//! Locations inside the Zellij plugin sandbox.
//!
//! Zellij mounts the host directory the session was started from under
//! `/host`, which is usually the user's home.

use std::path::PathBuf;

pub const TRACE_FILE_NAME: &str = "voidgate-otlp.json";

/// `/host/.local/share/zellij/voidgate`.
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("voidgate")
}

#[must_use]
pub fn trace_file() -> PathBuf {
    data_dir().join(TRACE_FILE_NAME)
}

/// Maps a leading `~` onto `/host`, leaving other paths alone.
///
/// ```
/// use voidgate::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/red.toml"), "/host/themes/red.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/void.toml"), "/etc/void.toml");
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
    fn test_trace_file_sits_in_data_dir() {
        assert_eq!(
            trace_file(),
            PathBuf::from("/host/.local/share/zellij/voidgate/voidgate-otlp.json")
        );
    }
}
