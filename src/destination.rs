use crate::error::InvalidDestination;
use std::path::{Component, Path, PathBuf};

/// Separator used in `PATH`-like variables. The activation scripts splice the
/// destination into such variables, so it must never appear in it.
pub const PATH_LIST_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Validates a raw destination and returns its absolute, normalized form.
///
/// Guards run in order and the first violated one wins:
/// 1. the value must not contain [`PATH_LIST_SEPARATOR`] (checked before any
///    filesystem access),
/// 2. the value must not name an existing regular file,
/// 3. the nearest existing ancestor of the absolute path must be writable.
///
/// Only existence and access probes touch the filesystem; nothing is created.
#[tracing::instrument(level = "debug")]
pub fn validate_dest_dir(value: &str) -> Result<PathBuf, InvalidDestination> {
    if value.contains(PATH_LIST_SEPARATOR) {
        return Err(InvalidDestination::SeparatorPresent {
            value: value.to_string(),
            separator: PATH_LIST_SEPARATOR,
        });
    }

    let literal = Path::new(value);
    if literal.is_file() {
        return Err(InvalidDestination::TargetIsFile {
            value: value.to_string(),
        });
    }

    let dest = absolutize(literal).map_err(|e| InvalidDestination::Unresolvable {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    let mut candidate = dest.as_path();
    loop {
        if candidate.exists() {
            if is_writable(candidate) {
                tracing::debug!(ancestor = %candidate.display(), "Found writable ancestor");
                return Ok(dest);
            }
            return Err(not_writable(candidate, &dest));
        }
        tracing::trace!(path = %candidate.display(), "Does not exist yet, checking parent");
        match candidate.parent() {
            Some(parent) => candidate = parent,
            // Walked past the root without meeting an existing directory.
            None => return Err(not_writable(candidate, &dest)),
        }
    }
}

fn not_writable(ancestor: &Path, dest: &Path) -> InvalidDestination {
    let suffix = dest
        .strip_prefix(ancestor)
        .map(|rest| rest.display().to_string())
        .unwrap_or_default();
    InvalidDestination::NotWritable {
        ancestor: ancestor.to_path_buf(),
        suffix,
    }
}

/// Makes `path` absolute against the working directory and folds `.` and
/// `..` lexically. Symlinks are left alone.
fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let path = if path.as_os_str().is_empty() {
        Path::new(".")
    } else {
        path
    };
    let absolute = std::path::absolute(path)?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

#[cfg(unix)]
fn is_writable(path: &Path) -> bool {
    nix::unistd::access(path, nix::unistd::AccessFlags::W_OK).is_ok()
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppResult;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_separator_is_rejected() {
        let value = format!("env{PATH_LIST_SEPARATOR}other");
        assert!(matches!(
            validate_dest_dir(&value),
            Err(InvalidDestination::SeparatorPresent { .. })
        ));
    }

    #[test]
    fn test_separator_only_value_is_rejected() {
        let value = PATH_LIST_SEPARATOR.to_string().repeat(2);
        assert_eq!(
            validate_dest_dir(&value),
            Err(InvalidDestination::SeparatorPresent {
                value,
                separator: PATH_LIST_SEPARATOR,
            })
        );
    }

    #[test]
    fn test_separator_wins_over_existing_file() -> AppResult<()> {
        let dir = tempdir()?;
        let file_name = format!("a{PATH_LIST_SEPARATOR}b");
        let file = dir.path().join(&file_name);
        // Windows cannot create such a name, which is fine for this check.
        let _ = fs::write(&file, "");
        let value = file.to_string_lossy().to_string();

        assert!(matches!(
            validate_dest_dir(&value),
            Err(InvalidDestination::SeparatorPresent { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_existing_file_is_rejected() -> AppResult<()> {
        let dir = tempdir()?;
        let file = dir.path().join("not_a_dir");
        fs::write(&file, "content")?;
        let value = file.to_string_lossy().to_string();

        assert_eq!(
            validate_dest_dir(&value),
            Err(InvalidDestination::TargetIsFile { value })
        );
        Ok(())
    }

    #[test]
    fn test_missing_dest_under_writable_dir() -> AppResult<()> {
        let dir = tempdir()?;
        let dest = dir.path().join("newenv");
        let validated = validate_dest_dir(&dest.to_string_lossy())?;

        assert_eq!(validated, dest);
        assert!(!dest.exists(), "validation must not create anything");
        Ok(())
    }

    #[test]
    fn test_deeply_nested_missing_dest() -> AppResult<()> {
        let dir = tempdir()?;
        let dest = dir.path().join("a").join("b").join("c");
        assert_eq!(validate_dest_dir(&dest.to_string_lossy())?, dest);
        assert!(!dir.path().join("a").exists());
        Ok(())
    }

    #[test]
    fn test_existing_writable_dir_is_accepted() -> AppResult<()> {
        let dir = tempdir()?;
        assert_eq!(validate_dest_dir(&dir.path().to_string_lossy())?, dir.path());
        Ok(())
    }

    #[test]
    fn test_writable_file_as_nearest_ancestor_is_accepted() -> AppResult<()> {
        // Only write access of the nearest existing entry is checked.
        let dir = tempdir()?;
        let plain = dir.path().join("plain");
        fs::write(&plain, "")?;
        let dest = plain.join("env");

        assert_eq!(validate_dest_dir(&dest.to_string_lossy())?, dest);
        Ok(())
    }

    #[test]
    fn test_dot_segments_are_folded() -> AppResult<()> {
        let dir = tempdir()?;
        let raw = dir.path().join("x").join("..").join(".").join("env");
        assert_eq!(
            validate_dest_dir(&raw.to_string_lossy())?,
            dir.path().join("env")
        );
        Ok(())
    }

    #[test]
    fn test_relative_dest_becomes_absolute() -> AppResult<()> {
        let validated = validate_dest_dir("target/venvgate-relative-check")?;
        assert!(validated.is_absolute());
        assert_eq!(
            validated,
            std::env::current_dir()?.join("target/venvgate-relative-check")
        );
        Ok(())
    }

    #[test]
    fn test_empty_value_resolves_to_working_dir() -> AppResult<()> {
        assert_eq!(validate_dest_dir("")?, std::env::current_dir()?);
        Ok(())
    }

    #[test]
    #[cfg(unix)]
    fn test_read_only_ancestor_is_reported() -> AppResult<()> {
        use std::os::unix::fs::PermissionsExt;

        if nix::unistd::geteuid().is_root() {
            // root passes every access(2) write check
            return Ok(());
        }

        let dir = tempdir()?;
        let locked = dir.path().join("locked");
        fs::create_dir(&locked)?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555))?;

        let dest = locked.join("inner").join("env");
        let result = validate_dest_dir(&dest.to_string_lossy());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        assert_eq!(
            result,
            Err(InvalidDestination::NotWritable {
                ancestor: locked.clone(),
                suffix: "inner/env".to_string(),
            })
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("inner/env"));
        assert!(message.contains(&locked.display().to_string()));
        Ok(())
    }

    #[test]
    fn test_not_writable_suffix_is_relative_to_ancestor() {
        let error = not_writable(Path::new("/srv"), Path::new("/srv/envs/one"));
        assert_eq!(
            error,
            InvalidDestination::NotWritable {
                ancestor: PathBuf::from("/srv"),
                suffix: "envs/one".to_string(),
            }
        );
    }
}
