//! Where dashprefs keeps its configuration file.
//!
//! `$XDG_CONFIG_HOME` wins on every platform when it is set to a non-empty
//! value. Otherwise the platform config directory from `dirs` is used
//! (`~/.config` on Linux, `~/Library/Application Support` on macOS).

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "dashboard-prefs";

/// File name of the configuration inside [`config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Extension given to the previous file by `config init --force`.
pub const BACKUP_EXTENSION: &str = "toml.backup";

fn base_dir(xdg_config_home: Option<OsString>) -> PathBuf {
    xdg_config_home
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Directory holding the dashboard-prefs configuration.
pub fn config_dir() -> PathBuf {
    base_dir(std::env::var_os("XDG_CONFIG_HOME")).join(APP_NAME)
}

/// Default configuration file path.
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Path the existing file at `path` is moved to before a forced overwrite.
pub fn backup_path(path: &Path) -> PathBuf {
    path.with_extension(BACKUP_EXTENSION)
}

/// Creates [`config_dir`] if needed, private to the user on unix.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    fs::create_dir_all(&dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o700))?;
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Sets `XDG_CONFIG_HOME` for the lifetime of the guard.
    struct XdgOverride(Option<OsString>);

    impl XdgOverride {
        fn set(value: Option<&Path>) -> Self {
            let previous = std::env::var_os("XDG_CONFIG_HOME");
            match value {
                Some(path) => std::env::set_var("XDG_CONFIG_HOME", path),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
            Self(previous)
        }
    }

    impl Drop for XdgOverride {
        fn drop(&mut self) {
            match self.0.take() {
                Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
                None => std::env::remove_var("XDG_CONFIG_HOME"),
            }
        }
    }

    #[test]
    fn base_dir_prefers_non_empty_override() {
        assert_eq!(
            base_dir(Some(OsString::from("/custom/config"))),
            PathBuf::from("/custom/config")
        );
    }

    #[test]
    fn base_dir_ignores_empty_override() {
        let fallback = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        assert_eq!(base_dir(Some(OsString::new())), fallback);
        assert_eq!(base_dir(None), fallback);
    }

    #[test]
    #[serial]
    fn config_path_follows_env() {
        let _guard = XdgOverride::set(Some(Path::new("/custom/config")));
        assert_eq!(
            config_path(),
            PathBuf::from("/custom/config/dashboard-prefs/config.toml")
        );
    }

    #[test]
    fn backup_sits_next_to_config() {
        let path = PathBuf::from("/x/dashboard-prefs/config.toml");
        assert_eq!(
            backup_path(&path),
            PathBuf::from("/x/dashboard-prefs/config.toml.backup")
        );
    }

    #[test]
    #[serial]
    fn ensure_config_dir_creates_private_dir() {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let _guard = XdgOverride::set(Some(tmp.path()));

        let dir = ensure_config_dir().expect("should create");
        assert_eq!(dir, tmp.path().join("dashboard-prefs"));
        assert!(dir.is_dir());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&dir).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }
    }
}
