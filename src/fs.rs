//! Filesystem capability interface and the OS-backed implementation
//!
//! The path algebra consumes the filesystem through the [`FileSystem`]
//! trait so the ambient values it depends on (current directory, home
//! directory, case policy) and the queries the glob engine needs are all
//! injectable. [`OsFileSystem`] is the production implementation; the
//! in-memory [`MemoryFileSystem`](crate::MemoryFileSystem) substitutes
//! for it in tests.

use std::fs;
use std::path::PathBuf;

use log::{trace, warn};

use crate::error::{Error, Result};
use crate::Path;

/// Filesystem operations the path algebra and glob engine depend on
///
/// Every method is synchronous; failures surface immediately as
/// [`Error`](crate::Error) values and are never retried. The process
/// working directory is global state: callers that mutate it from
/// several threads at once are on their own (see [`with_current_dir`]).
pub trait FileSystem {
    /// The current working directory.
    fn current_dir(&self) -> Result<Path>;

    /// Change the current working directory.
    fn set_current_dir(&self, dir: &Path) -> Result<()>;

    /// The home directory.
    fn home_dir(&self) -> Result<Path>;

    /// Whether name comparison at `path` is case-sensitive
    ///
    /// A probe, not a contract: when the question cannot be answered the
    /// platform default is reported.
    fn is_case_sensitive(&self, path: &Path) -> bool;

    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether `path` is a symbolic link.
    fn is_symlink(&self, path: &Path) -> bool;

    /// The immediate children of `path`, as full paths.
    fn list_dir(&self, path: &Path) -> Result<Vec<Path>>;

    /// Read the contents of the file at `path`.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write `contents` to the file at `path`, replacing it if present.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Remove the file or directory (recursively) at `path`.
    fn remove(&self, path: &Path) -> Result<()>;

    /// Create the directory at `path`, including missing parents.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

/// The real filesystem
///
/// Thin wrappers over `std::fs`/`std::env`; the home directory comes
/// from the `home` crate.
///
/// # Examples
/// ```
/// use path_kit::{FileSystem, OsFileSystem};
///
/// let fs = OsFileSystem::new();
/// assert!(fs.current_dir().unwrap().is_absolute());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    /// Create a handle to the real filesystem.
    #[must_use]
    pub fn new() -> Self {
        OsFileSystem
    }

    fn host(path: &Path) -> PathBuf {
        PathBuf::from(path.to_native())
    }

    fn from_host(path: &std::path::Path) -> Path {
        Path::new(path.to_string_lossy())
    }
}

impl FileSystem for OsFileSystem {
    fn current_dir(&self) -> Result<Path> {
        let cwd = std::env::current_dir().map_err(|e| Error::io(&Path::new("."), e))?;
        Ok(Self::from_host(&cwd))
    }

    fn set_current_dir(&self, dir: &Path) -> Result<()> {
        trace!("chdir to {dir}");
        std::env::set_current_dir(Self::host(dir)).map_err(|e| Error::io(dir, e))
    }

    fn home_dir(&self) -> Result<Path> {
        home::home_dir()
            .map(|h| Self::from_host(&h))
            .ok_or(Error::NotFound {
                path: Path::new("~"),
            })
    }

    fn is_case_sensitive(&self, path: &Path) -> bool {
        let host = Self::host(path);
        if host.exists() {
            if let Some(name) = host.file_name().and_then(|n| n.to_str()) {
                let flipped = swap_ascii_case(name);
                if flipped != name {
                    // On an insensitive filesystem the flipped spelling
                    // resolves to the same entry.
                    return !host.with_file_name(flipped).exists();
                }
            }
        }
        !cfg!(any(windows, target_os = "macos"))
    }

    fn exists(&self, path: &Path) -> bool {
        Self::host(path).exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        Self::host(path).is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        Self::host(path).is_file()
    }

    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(Self::host(path))
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<Path>> {
        let entries = fs::read_dir(Self::host(path)).map_err(|e| Error::io(path, e))?;
        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(path, e))?;
            children.push(Self::from_host(&entry.path()));
        }
        Ok(children)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(Self::host(path)).map_err(|e| Error::io(path, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        fs::write(Self::host(path), contents).map_err(|e| Error::io(path, e))
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let host = Self::host(path);
        let result = if host.is_dir() && !self.is_symlink(path) {
            fs::remove_dir_all(&host)
        } else {
            fs::remove_file(&host)
        };
        result.map_err(|e| Error::io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(Self::host(path)).map_err(|e| Error::io(path, e))
    }
}

/// Run `body` with the working directory changed to `dir`
///
/// The previous directory is restored on every exit path: on success, on
/// error, and during unwinding. The body's error, if any, propagates
/// after the restore.
///
/// The working directory is process-wide state; concurrent use of this
/// helper from multiple threads observes each other's changes and is the
/// caller's responsibility to avoid.
///
/// # Errors
///
/// Fails if the current directory cannot be read or changed; otherwise
/// returns whatever `body` returns.
///
/// # Examples
/// ```
/// use path_kit::{with_current_dir, FileSystem, MemoryFileSystem, Path};
///
/// let fs = MemoryFileSystem::new();
/// fs.create_dir_all(&Path::new("/work")).unwrap();
///
/// let seen = with_current_dir(&fs, &Path::new("/work"), || fs.current_dir()).unwrap();
/// assert_eq!(seen, Path::new("/work"));
/// assert_eq!(fs.current_dir().unwrap(), Path::new("/"));
/// ```
pub fn with_current_dir<T, F>(fs: &dyn FileSystem, dir: &Path, body: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let previous = fs.current_dir()?;
    fs.set_current_dir(dir)?;
    let _guard = CwdGuard { fs, previous };
    body()
}

struct CwdGuard<'a> {
    fs: &'a dyn FileSystem,
    previous: Path,
}

impl Drop for CwdGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.fs.set_current_dir(&self.previous) {
            warn!(
                "failed to restore working directory to {}: {err}",
                self.previous
            );
        }
    }
}

fn swap_ascii_case(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryFileSystem;
    use tempfile::TempDir;

    fn path_of(dir: &TempDir) -> Path {
        Path::new(dir.path().to_string_lossy())
    }

    #[test]
    fn test_os_metadata_queries() {
        let dir = TempDir::new().unwrap();
        let fs = OsFileSystem::new();
        let root = path_of(&dir);
        let file = root.join("note.txt");

        fs.write(&file, b"hello").unwrap();

        assert!(fs.exists(&root));
        assert!(fs.is_dir(&root));
        assert!(!fs.is_file(&root));
        assert!(fs.exists(&file));
        assert!(fs.is_file(&file));
        assert!(!fs.is_dir(&file));
        assert!(!fs.exists(&root.join("missing")));
    }

    #[test]
    fn test_os_read_write_remove() {
        let dir = TempDir::new().unwrap();
        let fs = OsFileSystem::new();
        let file = path_of(&dir).join("data.bin");

        fs.write(&file, b"contents").unwrap();
        assert_eq!(fs.read(&file).unwrap(), b"contents");

        fs.remove(&file).unwrap();
        assert!(!fs.exists(&file));
    }

    #[test]
    fn test_os_create_dir_all_and_list() {
        let dir = TempDir::new().unwrap();
        let fs = OsFileSystem::new();
        let root = path_of(&dir);

        fs.create_dir_all(&root.join("a/b")).unwrap();
        fs.write(&root.join("a/one.txt"), b"1").unwrap();

        let mut children = fs.list_dir(&root.join("a")).unwrap();
        children.sort();
        assert_eq!(children, vec![root.join("a/b"), root.join("a/one.txt")]);
    }

    #[test]
    fn test_os_errors_are_classified() {
        let dir = TempDir::new().unwrap();
        let fs = OsFileSystem::new();
        let missing = path_of(&dir).join("missing");

        assert!(fs.read(&missing).unwrap_err().is_not_found());
        assert!(fs.list_dir(&missing).unwrap_err().is_not_found());
    }

    #[test]
    #[cfg(unix)]
    fn test_os_is_symlink() {
        let dir = TempDir::new().unwrap();
        let fs = OsFileSystem::new();
        let root = path_of(&dir);

        fs.write(&root.join("target"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("link")).unwrap();

        assert!(fs.is_symlink(&root.join("link")));
        assert!(!fs.is_symlink(&root.join("target")));
    }

    #[test]
    fn test_os_home_dir_is_absolute() {
        let fs = OsFileSystem::new();
        assert!(fs.home_dir().unwrap().is_absolute());
    }

    // The only test that touches the real process working directory.
    #[test]
    fn test_os_with_current_dir_restores() {
        let dir = TempDir::new().unwrap();
        let fs = OsFileSystem::new();
        let before = fs.current_dir().unwrap();

        let inside = with_current_dir(&fs, &path_of(&dir), || fs.current_dir()).unwrap();
        assert_ne!(inside, before);
        assert_eq!(fs.current_dir().unwrap(), before);
    }

    #[test]
    fn test_with_current_dir_restores_on_error() {
        let fs = MemoryFileSystem::new();
        fs.create_dir_all(&Path::new("/work")).unwrap();

        let result: Result<()> = with_current_dir(&fs, &Path::new("/work"), || {
            Err(Error::NotFound {
                path: Path::new("/gone"),
            })
        });

        assert!(result.unwrap_err().is_not_found());
        assert_eq!(fs.current_dir().unwrap(), Path::new("/"));
    }

    #[test]
    fn test_with_current_dir_fails_on_missing_target() {
        let fs = MemoryFileSystem::new();
        let result = with_current_dir(&fs, &Path::new("/nope"), || Ok(()));
        assert!(result.is_err());
        assert_eq!(fs.current_dir().unwrap(), Path::new("/"));
    }

    #[test]
    fn test_swap_ascii_case() {
        assert_eq!(swap_ascii_case("AbC1"), "aBc1");
        assert_eq!(swap_ascii_case("123"), "123");
    }
}
