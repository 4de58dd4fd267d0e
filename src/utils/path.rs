//! Path utilities for finding data directories

use std::env;
use std::path::PathBuf;

/// Returns the folder where config, templates and logs live.
/// Uses the executable directory when a `config` folder sits next to it,
/// otherwise the current working directory.
pub fn get_data_dir() -> PathBuf {
    if let Ok(exe_path) = env::current_exe() {
        if let Some(parent) = exe_path.parent() {
            if parent.join("config").exists() {
                return parent.to_path_buf();
            }
        }
    }

    env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Location of the settings file inside a data directory
pub fn get_settings_path() -> PathBuf {
    get_data_dir().join("config").join("settings.json")
}

/// Location of the debug log inside a data directory
pub fn get_log_dir() -> PathBuf {
    get_data_dir().join("debug").join("log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_data_dir() {
        let dir = get_data_dir();
        assert!(dir.exists() || dir == PathBuf::from("."));
    }

    #[test]
    fn test_settings_path_layout() {
        let path = get_settings_path();
        assert!(path.ends_with("config/settings.json"));
    }
}
