//! JSON persistence helpers for files under ~/.lander-ext/.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".lander-ext";

/// Get the ~/.lander-ext/ directory path, creating it if needed.
pub fn app_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(APP_DIR);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Full path for a file in ~/.lander-ext/.
pub fn app_path(filename: &str) -> io::Result<PathBuf> {
    Ok(app_dir()?.join(filename))
}

/// Load JSON from `path`, returning `T::default()` if missing or invalid.
pub fn load_json_or_default<T: Default + serde::de::DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring malformed {}: {e}", path.display());
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Save a value as pretty-printed JSON.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lander_persist_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_load_missing_returns_default() {
        let val: Vec<String> = load_json_or_default(&temp_file("nonexistent.json"));
        assert!(val.is_empty());
    }

    #[test]
    fn test_load_malformed_returns_default() {
        let path = temp_file("malformed.json");
        fs::write(&path, "{ not json").expect("write");
        let val: Vec<u32> = load_json_or_default(&path);
        assert!(val.is_empty());
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_file("roundtrip.json");
        let data = vec!["hello".to_string(), "moon".to_string()];
        save_json(&path, &data).expect("save should succeed");

        let loaded: Vec<String> = load_json_or_default(&path);
        assert_eq!(loaded, data);

        fs::remove_file(path).ok();
    }
}
