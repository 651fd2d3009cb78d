//! Write-then-rename file replacement
//!
//! Contents are written to a temporary file in the destination directory and
//! renamed over the destination once complete. Readers see either the old
//! file or the complete new one. If anything fails the temporary file is
//! removed when it is dropped.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::Builder;
use tracing::debug;

/// Atomically replaces `path` with `contents`
///
/// The parent directory must already exist; it is not created. An existing
/// file keeps its permissions. A new file gets the permissions a plain
/// create would give it under the process umask.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let existing = match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is a directory", path.display()),
            ));
        }
        Ok(metadata) => Some(metadata.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };

    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if existing.is_none() {
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
    }

    let mut temp = builder.tempfile_in(parent)?;
    debug!(
        temp = %temp.path().display(),
        target = %path.display(),
        bytes = contents.len(),
        "Writing temporary output"
    );

    temp.write_all(contents)?;
    if let Some(permissions) = existing {
        temp.as_file().set_permissions(permissions)?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_write_atomic_creates_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("constructors.c");

        write_atomic(&target, b"void f (void);\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "void f (void);\n");
        assert_eq!(entries(dir.path()), vec!["constructors.c"]);
    }

    #[test]
    fn test_write_atomic_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("constructors.c");
        fs::write(&target, "old contents that are longer than the new ones").unwrap();

        write_atomic(&target, b"new").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new");
    }

    #[test]
    fn test_write_atomic_missing_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("missing").join("constructors.c");

        let err = write_atomic(&target, b"x").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_write_atomic_target_is_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out");
        fs::create_dir(&target).unwrap();

        assert!(write_atomic(&target, b"x").is_err());
        assert_eq!(entries(dir.path()), vec!["out"]);
    }

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    #[cfg(unix)]
    fn test_write_atomic_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let target = dir.path().join("constructors.c");
        fs::write(&target, "old").unwrap();

        for wanted in [0o644, 0o640, 0o664] {
            fs::set_permissions(&target, fs::Permissions::from_mode(wanted)).unwrap();
            write_atomic(&target, b"x").unwrap();
            assert_eq!(mode(&target), wanted);
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_write_atomic_new_file_follows_umask() {
        let dir = TempDir::new().unwrap();
        let reference = dir.path().join("plain.c");
        let target = dir.path().join("constructors.c");
        fs::write(&reference, "x").unwrap();

        write_atomic(&target, b"x").unwrap();

        assert_eq!(mode(&target), mode(&reference));
    }
}
