//! Data directory and daily store path resolution
//!
//! The data directory holds the inventory workbooks and the daily store
//! files. Resolution priority order:
//! 1. Command-line argument (highest priority)
//! 2. `SIMINV_DATA_DIR` environment variable (handled by the CLI layer)
//! 3. TOML config file (`data_dir` key)
//! 4. OS-dependent compiled default (fallback)

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Resolve the data directory.
///
/// `cli_arg` carries both the command-line flag and the environment
/// variable (clap resolves the env fallback before this is called).
pub fn resolve_data_dir(cli_arg: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Some(path) = config_file_data_dir() {
        return path;
    }

    default_data_dir()
}

/// Path of the daily store inside the data directory.
///
/// One store file per calendar day; reused and appended across runs
/// within the same day.
pub fn database_path(data_dir: &Path, date: NaiveDate) -> PathBuf {
    data_dir.join(format!("{}.db", date.format("%Y-%m-%d")))
}

/// Read `data_dir` from the platform config file, if present
fn config_file_data_dir() -> Option<PathBuf> {
    let config_path = dirs::config_dir()?.join("siminv").join("config.toml");
    let toml_content = std::fs::read_to_string(&config_path).ok()?;
    let config = toml::from_str::<toml::Value>(&toml_content).ok()?;
    config
        .get("data_dir")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

/// Get OS-dependent default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("siminv"))
        .unwrap_or_else(|| PathBuf::from("./siminv_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_is_keyed_by_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let path = database_path(Path::new("/var/lib/siminv"), date);
        assert_eq!(path, PathBuf::from("/var/lib/siminv/2024-03-05.db"));
    }

    #[test]
    fn test_cli_argument_wins() {
        let resolved = resolve_data_dir(Some(Path::new("/tmp/explicit")));
        assert_eq!(resolved, PathBuf::from("/tmp/explicit"));
    }
}
