use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the server home directory.
///
/// * `requested` set: `~` is expanded, relative paths are joined to the
///   current working directory.
/// * `requested` unset: `$HOME/<default_subdir>` on Unix and macOS,
///   `%APPDATA%/<default_subdir>` on Windows.
///
/// With `create` the directory is created when missing.
pub fn resolve_home_dir(
    requested: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let path = match requested {
        Some(raw) => absolutize(&expand_tilde(&raw)?)?,
        None => platform_base_dir()?.join(default_subdir),
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create home dir {}", path.display()))?;
    }

    Ok(path)
}

fn platform_base_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    let base = dirs::config_dir();
    #[cfg(not(windows))]
    let base = dirs::home_dir();

    base.ok_or_else(|| anyhow!("Cannot determine the user's home directory"))
}

fn expand_tilde(raw: &str) -> Result<PathBuf> {
    if raw == "~" {
        return dirs::home_dir().ok_or_else(|| anyhow!("Cannot expand '~': no home directory"));
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot expand '~': no home directory"))?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(raw))
}

fn absolutize(p: &Path) -> Result<PathBuf> {
    if p.is_absolute() {
        return Ok(p.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Cannot read current directory")?;
    Ok(cwd.join(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn explicit_absolute_path_is_created() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("a/b/home");

        let resolved =
            resolve_home_dir(Some(target.to_string_lossy().to_string()), ".unused", true).unwrap();

        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    fn no_create_leaves_filesystem_alone() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("missing");

        let resolved =
            resolve_home_dir(Some(target.to_string_lossy().to_string()), ".unused", false).unwrap();

        assert_eq!(resolved, target);
        assert!(!target.exists());
    }

    #[test]
    fn tilde_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let resolved = resolve_home_dir(Some("~/.passport-desk-test".into()), ".x", false).unwrap();
        assert_eq!(resolved, home.join(".passport-desk-test"));
    }

    #[test]
    fn relative_path_becomes_absolute() {
        let resolved = resolve_home_dir(Some("rel/home".into()), ".x", false).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("rel/home"));
    }

    #[test]
    fn default_uses_subdir() {
        if platform_base_dir().is_err() {
            return;
        }
        let resolved = resolve_home_dir(None, ".passport-desk", false).unwrap();
        assert!(resolved.ends_with(".passport-desk"));
    }
}
