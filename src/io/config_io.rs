use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::model::config::Config;

pub const CONFIG_FILE: &str = "config.toml";

/// Error type for locating the data directory and reading its config
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no data directory: pass -C, or set TASKDECK_HOME or HOME")]
    NoDataDir,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Find the data directory: an explicit path wins, then `$TASKDECK_HOME`,
/// then `$XDG_DATA_HOME/taskdeck`, then `$HOME/.local/share/taskdeck`.
pub fn data_dir(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    resolve_data_dir(explicit, |name| std::env::var_os(name))
}

/// [`data_dir`] with the environment passed in.
pub fn resolve_data_dir(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<OsString>,
) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    let non_empty = |name: &str| env(name).filter(|v| !v.is_empty());
    if let Some(home) = non_empty("TASKDECK_HOME") {
        return Ok(PathBuf::from(home));
    }
    if let Some(xdg) = non_empty("XDG_DATA_HOME") {
        return Ok(PathBuf::from(xdg).join("taskdeck"));
    }
    if let Some(home) = non_empty("HOME") {
        return Ok(PathBuf::from(home).join(".local/share/taskdeck"));
    }
    Err(ConfigError::NoDataDir)
}

/// Read `config.toml` from the data directory. A missing file yields the
/// defaults.
pub fn read_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no {}, using defaults", path.display());
            return Ok(Config::default());
        }
        Err(source) => return Err(ConfigError::ReadError { path, source }),
    };
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn explicit_dir_wins() {
        let env = env_of(&[("TASKDECK_HOME", "/tmp/deck-home")]);
        let dir = resolve_data_dir(Some(Path::new("/data")), env).unwrap();
        assert_eq!(dir, PathBuf::from("/data"));
    }

    #[test]
    fn env_lookup_order() {
        let all = [
            ("TASKDECK_HOME", "/deck"),
            ("XDG_DATA_HOME", "/xdg"),
            ("HOME", "/home/me"),
        ];
        assert_eq!(
            resolve_data_dir(None, env_of(&all)).unwrap(),
            PathBuf::from("/deck")
        );
        assert_eq!(
            resolve_data_dir(None, env_of(&all[1..])).unwrap(),
            PathBuf::from("/xdg/taskdeck")
        );
        assert_eq!(
            resolve_data_dir(None, env_of(&all[2..])).unwrap(),
            PathBuf::from("/home/me/.local/share/taskdeck")
        );
    }

    #[test]
    fn empty_values_are_ignored() {
        let env = env_of(&[("TASKDECK_HOME", ""), ("HOME", "/home/me")]);
        assert_eq!(
            resolve_data_dir(None, env).unwrap(),
            PathBuf::from("/home/me/.local/share/taskdeck")
        );
        assert!(matches!(
            resolve_data_dir(None, env_of(&[])),
            Err(ConfigError::NoDataDir)
        ));
    }

    #[test]
    fn missing_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.auth.login_delay_ms, 600);
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.search.max_results, 20);
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "[auth]\nlogin_delay_ms = 0\n\n[ui.colors]\nhighlight = \"#FB4196\"\n",
        )
        .unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.auth.login_delay_ms, 0);
        assert_eq!(config.search.max_results, 20);
        assert_eq!(
            config.ui.colors.get("highlight").map(String::as_str),
            Some("#FB4196")
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[auth\nlogin_delay_ms = ").unwrap();
        assert!(matches!(
            read_config(tmp.path()),
            Err(ConfigError::ParseError(_))
        ));
    }
}
