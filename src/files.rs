//! Capability-based file helpers for deck output and credential storage.
//!
//! All writes go through `cap-std` directory handles so path handling stays
//! UTF-8 and parent directories are created in one place.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::DeckError;

/// Creates a file at `path`, ensuring parent directories exist first.
///
/// Returns the path and the opened file handle.
///
/// # Errors
///
/// Returns [`DeckError::Io`] when a parent directory cannot be created or the
/// file cannot be created.
pub(crate) fn create_file_with_parents(
    path: &Utf8Path,
    path_type: &str,
) -> Result<(Utf8PathBuf, cap_std::fs_utf8::File), DeckError> {
    let file_name = path.file_name().ok_or_else(|| DeckError::Io {
        message: format!("invalid {path_type} path '{path}': no file name"),
    })?;

    let (dir, rel_parent) = open_base_dir(path, path_type)?;

    let target_dir = if rel_parent.as_str().is_empty() || rel_parent == Utf8Path::new(".") {
        dir
    } else {
        dir.create_dir_all(rel_parent).map_err(|error| DeckError::Io {
            message: format!(
                "failed to create {path_type} directory '{rel_parent}': {error}"
            ),
        })?;
        dir.open_dir(rel_parent).map_err(|error| DeckError::Io {
            message: format!("failed to open {path_type} directory '{rel_parent}': {error}"),
        })?
    };

    let file = target_dir.create(file_name).map_err(|error| DeckError::Io {
        message: format!("failed to create {path_type} file '{path}': {error}"),
    })?;

    Ok((path.to_path_buf(), file))
}

/// Writes `contents` to `path`, creating parent directories when needed.
///
/// # Errors
///
/// Returns [`DeckError::Io`] when the file cannot be created or written.
pub fn write_text(path: &Utf8Path, contents: &str, path_type: &str) -> Result<(), DeckError> {
    let (_, mut file) = create_file_with_parents(path, path_type)?;
    file.write_all(contents.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|error| DeckError::Io {
            message: format!("failed to write {path_type} file '{path}': {error}"),
        })
}

/// Reads `path` as text, returning `None` when the file does not exist.
///
/// # Errors
///
/// Returns [`DeckError::Io`] for any failure other than the file being
/// absent.
pub fn read_text_if_exists(
    path: &Utf8Path,
    path_type: &str,
) -> Result<Option<String>, DeckError> {
    let (dir, rel_parent) = open_base_dir(path, path_type)?;
    let file_name = path.file_name().ok_or_else(|| DeckError::Io {
        message: format!("invalid {path_type} path '{path}': no file name"),
    })?;

    let rel_file = if rel_parent.as_str().is_empty() || rel_parent == Utf8Path::new(".") {
        Utf8PathBuf::from(file_name)
    } else {
        rel_parent.join(file_name)
    };

    match dir.read_to_string(&rel_file) {
        Ok(contents) => Ok(Some(contents)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(DeckError::Io {
            message: format!("failed to read {path_type} file '{path}': {error}"),
        }),
    }
}

/// Restricts `path` to owner read/write only.
///
/// # Errors
///
/// Returns [`DeckError::Io`] when the permission change fails.
#[cfg(unix)]
pub(crate) fn restrict_to_owner(path: &Utf8Path, path_type: &str) -> Result<(), DeckError> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = std::fs::Permissions::from_mode(0o600);
    std::fs::set_permissions(path.as_std_path(), permissions).map_err(|error| DeckError::Io {
        message: format!("failed to restrict {path_type} file '{path}': {error}"),
    })
}

#[cfg(not(unix))]
pub(crate) fn restrict_to_owner(_path: &Utf8Path, _path_type: &str) -> Result<(), DeckError> {
    Ok(())
}

/// Splits a path into a base directory handle and the parent relative to it.
fn open_base_dir<'a>(
    path: &'a Utf8Path,
    path_type: &str,
) -> Result<(Dir, &'a Utf8Path), DeckError> {
    let parent = path.parent().unwrap_or_else(|| Utf8Path::new("."));

    if parent.is_absolute() {
        let root =
            Dir::open_ambient_dir("/", ambient_authority()).map_err(|error| DeckError::Io {
                message: format!("failed to open root directory for {path_type}s: {error}"),
            })?;
        let rel = parent.strip_prefix("/").map_err(|_| DeckError::Io {
            message: format!("failed to normalise {path_type} directory '{parent}'"),
        })?;
        Ok((root, rel))
    } else {
        let current =
            Dir::open_ambient_dir(".", ambient_authority()).map_err(|error| DeckError::Io {
                message: format!("failed to open current directory for {path_type}s: {error}"),
            })?;
        Ok((current, parent))
    }
}
