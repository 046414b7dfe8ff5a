//! Runtime configuration resolved from flags, environment and defaults.
//!
//! Precedence per setting: command-line flag, then environment variable,
//! then built-in default. Blank environment values are ignored.

use attendance_core::default_log_level;
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "ATTENDANCE_DB_PATH";
pub const LOG_DIR_ENV: &str = "ATTENDANCE_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "ATTENDANCE_LOG_LEVEL";

const DEFAULT_DB_FILE_NAME: &str = "attendance.db";
const DEFAULT_LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    /// Always absolute.
    pub log_dir: PathBuf,
    pub log_level: String,
}

/// Raw values before precedence is applied.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub db_flag: Option<String>,
    pub log_dir_flag: Option<String>,
    pub log_level_flag: Option<String>,
    pub db_env: Option<String>,
    pub log_dir_env: Option<String>,
    pub log_level_env: Option<String>,
}

impl ConfigSources {
    /// Fills the environment half from the process environment.
    pub fn with_process_env(mut self) -> Self {
        self.db_env = std::env::var(DB_PATH_ENV).ok();
        self.log_dir_env = std::env::var(LOG_DIR_ENV).ok();
        self.log_level_env = std::env::var(LOG_LEVEL_ENV).ok();
        self
    }

    /// Applies precedence. Relative paths are anchored at `cwd`.
    pub fn resolve(&self, cwd: &Path) -> Config {
        let db_path = pick(&self.db_flag, &self.db_env)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME));
        let log_dir = pick(&self.log_dir_flag, &self.log_dir_env)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR_NAME));
        let log_level = pick(&self.log_level_flag, &self.log_level_env)
            .unwrap_or_else(|| default_log_level().to_string());

        Config {
            db_path,
            log_dir: absolutize(cwd, log_dir),
            log_level,
        }
    }
}

fn pick(flag: &Option<String>, env: &Option<String>) -> Option<String> {
    [flag, env]
        .into_iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::ConfigSources;
    use attendance_core::default_log_level;
    use std::path::{Path, PathBuf};

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ConfigSources::default().resolve(Path::new("/work"));
        assert_eq!(config.db_path, PathBuf::from("attendance.db"));
        assert_eq!(config.log_dir, PathBuf::from("/work/logs"));
        assert_eq!(config.log_level, default_log_level());
    }

    #[test]
    fn flag_wins_over_env() {
        let sources = ConfigSources {
            db_flag: Some("flag.db".to_string()),
            db_env: Some("env.db".to_string()),
            log_level_env: Some("warn".to_string()),
            ..ConfigSources::default()
        };
        let config = sources.resolve(Path::new("/work"));
        assert_eq!(config.db_path, PathBuf::from("flag.db"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn blank_values_fall_through() {
        let sources = ConfigSources {
            log_dir_flag: Some("  ".to_string()),
            log_dir_env: Some("/var/log/attendance".to_string()),
            db_env: Some("".to_string()),
            ..ConfigSources::default()
        };
        let config = sources.resolve(Path::new("/work"));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/attendance"));
        assert_eq!(config.db_path, PathBuf::from("attendance.db"));
    }

    #[test]
    fn relative_log_dir_is_anchored_at_cwd() {
        let sources = ConfigSources {
            log_dir_flag: Some("out/logs".to_string()),
            ..ConfigSources::default()
        };
        let config = sources.resolve(Path::new("/work"));
        assert_eq!(config.log_dir, PathBuf::from("/work/out/logs"));
    }
}
