//! In-memory filesystem capability
//!
//! A map-backed [`FileSystem`] implementation. It keeps every entry in a
//! `BTreeMap` keyed by canonical absolute path string, so listings are
//! deterministic and nothing ever touches the host disk. Built for tests
//! and hermetic tooling; the ambient values the path algebra consults
//! (current directory, home directory, case policy) are all configurable.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::fs::FileSystem;
use crate::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Dir,
    File(Vec<u8>),
    Symlink(Path),
}

#[derive(Debug)]
struct State {
    entries: BTreeMap<String, Node>,
    cwd: Path,
    home: Path,
}

/// An in-memory [`FileSystem`]
///
/// The root directory `/` always exists; the current directory starts
/// there and the home directory defaults to `/home/user`. Symlinks are
/// recorded but not followed.
///
/// # Examples
/// ```
/// use path_kit::{FileSystem, MemoryFileSystem, Path};
///
/// let fs = MemoryFileSystem::new()
///     .with_home("/home/ada")
///     .with_file("/docs/note.txt", b"hello");
///
/// assert!(fs.is_file(&Path::new("/docs/note.txt")));
/// assert_eq!(fs.read(&Path::new("/docs/note.txt")).unwrap(), b"hello");
/// assert_eq!(fs.list_dir(&Path::new("/docs")).unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
    case_sensitive: bool,
}

impl MemoryFileSystem {
    /// Create an empty in-memory filesystem.
    #[must_use]
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("/".to_string(), Node::Dir);
        let fs = MemoryFileSystem {
            state: Mutex::new(State {
                entries,
                cwd: Path::new("/"),
                home: Path::new("/home/user"),
            }),
            case_sensitive: true,
        };
        fs.insert_dir_chain(&Path::new("/home/user"));
        fs
    }

    /// Set the home directory (created if missing).
    #[must_use]
    pub fn with_home<P: Into<Path>>(self, home: P) -> Self {
        let home = home.into();
        self.insert_dir_chain(&home);
        self.state().home = home;
        self
    }

    /// Set the current directory (created if missing).
    #[must_use]
    pub fn with_current_dir<P: Into<Path>>(self, dir: P) -> Self {
        let dir = dir.into();
        self.insert_dir_chain(&dir);
        self.state().cwd = dir;
        self
    }

    /// Set whether name comparison is case-sensitive (default: yes).
    #[must_use]
    pub fn with_case_sensitivity(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Add a directory, creating missing parents.
    #[must_use]
    pub fn with_dir<P: Into<Path>>(self, dir: P) -> Self {
        self.insert_dir_chain(&dir.into());
        self
    }

    /// Add a file with `contents`, creating missing parents.
    #[must_use]
    pub fn with_file<P: Into<Path>>(self, file: P, contents: &[u8]) -> Self {
        let file = file.into();
        let resolved = self.resolve(&file);
        self.insert_dir_chain(&resolved.parent());
        self.state()
            .entries
            .insert(resolved.into_string(), Node::File(contents.to_vec()));
        self
    }

    /// Add a symlink pointing at `target`, creating missing parents.
    #[must_use]
    pub fn with_symlink<P: Into<Path>, Q: Into<Path>>(self, link: P, target: Q) -> Self {
        let link = self.resolve(&link.into());
        self.insert_dir_chain(&link.parent());
        self.state()
            .entries
            .insert(link.into_string(), Node::Symlink(target.into()));
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve a possibly-relative path against the current directory.
    fn resolve(&self, path: &Path) -> Path {
        self.state().cwd.join(path).normalize()
    }

    fn keys_equal(&self, left: &str, right: &str) -> bool {
        if self.case_sensitive {
            left == right
        } else {
            left.eq_ignore_ascii_case(right)
        }
    }

    fn key_starts_with(&self, key: &str, prefix: &str) -> bool {
        if self.case_sensitive {
            key.starts_with(prefix)
        } else {
            key.len() >= prefix.len()
                && key.is_char_boundary(prefix.len())
                && key[..prefix.len()].eq_ignore_ascii_case(prefix)
        }
    }

    fn node(&self, resolved: &Path) -> Option<Node> {
        let state = self.state();
        if self.case_sensitive {
            state.entries.get(resolved.as_str()).cloned()
        } else {
            state
                .entries
                .iter()
                .find(|(key, _)| self.keys_equal(key, resolved.as_str()))
                .map(|(_, node)| node.clone())
        }
    }

    /// Insert `dir` and every missing ancestor, overwriting conflicting
    /// non-directory entries (builder semantics).
    fn insert_dir_chain(&self, dir: &Path) {
        let resolved = self.resolve(dir);
        let mut components = resolved.components().into_iter();
        let Some(anchor) = components.next() else {
            return;
        };
        let mut state = self.state();
        let mut current = Path::new(anchor);
        state.entries.insert(current.as_str().to_string(), Node::Dir);
        for segment in components {
            current = current.join(segment.as_str());
            state.entries.insert(current.as_str().to_string(), Node::Dir);
        }
    }
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MemoryFileSystem {
    fn current_dir(&self) -> Result<Path> {
        Ok(self.state().cwd.clone())
    }

    fn set_current_dir(&self, dir: &Path) -> Result<()> {
        let resolved = self.resolve(dir);
        match self.node(&resolved) {
            Some(Node::Dir) => {
                self.state().cwd = resolved;
                Ok(())
            }
            Some(_) => Err(Error::NotADirectory { path: resolved }),
            None => Err(Error::NotFound { path: resolved }),
        }
    }

    fn home_dir(&self) -> Result<Path> {
        Ok(self.state().home.clone())
    }

    fn is_case_sensitive(&self, _path: &Path) -> bool {
        self.case_sensitive
    }

    fn exists(&self, path: &Path) -> bool {
        self.node(&self.resolve(path)).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.node(&self.resolve(path)), Some(Node::Dir))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.node(&self.resolve(path)), Some(Node::File(_)))
    }

    fn is_symlink(&self, path: &Path) -> bool {
        matches!(self.node(&self.resolve(path)), Some(Node::Symlink(_)))
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<Path>> {
        let resolved = self.resolve(path);
        match self.node(&resolved) {
            Some(Node::Dir) => {}
            Some(_) => return Err(Error::NotADirectory { path: resolved }),
            None => return Err(Error::NotFound { path: resolved }),
        }

        let prefix = if resolved.as_str() == "/" {
            "/".to_string()
        } else {
            format!("{resolved}/")
        };

        let state = self.state();
        let children = state
            .entries
            .keys()
            .filter(|key| {
                self.key_starts_with(key, &prefix) && {
                    let rest = &key[prefix.len()..];
                    !rest.is_empty() && !rest.contains('/')
                }
            })
            .map(Path::new)
            .collect();
        Ok(children)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let resolved = self.resolve(path);
        match self.node(&resolved) {
            Some(Node::File(contents)) => Ok(contents),
            Some(Node::Dir) => Err(Error::io(
                &resolved,
                io::Error::from(io::ErrorKind::IsADirectory),
            )),
            Some(Node::Symlink(_)) => Err(Error::io(
                &resolved,
                io::Error::other("symlinks are not followed"),
            )),
            None => Err(Error::NotFound { path: resolved }),
        }
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let resolved = self.resolve(path);
        let parent = resolved.parent();
        match self.node(&parent) {
            Some(Node::Dir) => {}
            Some(_) => return Err(Error::NotADirectory { path: parent }),
            None => return Err(Error::NotFound { path: parent }),
        }
        if matches!(self.node(&resolved), Some(Node::Dir)) {
            return Err(Error::io(
                &resolved,
                io::Error::from(io::ErrorKind::IsADirectory),
            ));
        }
        self.state()
            .entries
            .insert(resolved.into_string(), Node::File(contents.to_vec()));
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let resolved = self.resolve(path);
        if resolved.as_str() == "/" {
            return Err(Error::PermissionDenied { path: resolved });
        }
        if self.node(&resolved).is_none() {
            return Err(Error::NotFound { path: resolved });
        }

        let prefix = format!("{resolved}/");
        let mut state = self.state();
        let doomed: Vec<String> = state
            .entries
            .keys()
            .filter(|key| self.keys_equal(key, resolved.as_str()) || self.key_starts_with(key, &prefix))
            .cloned()
            .collect();
        for key in doomed {
            state.entries.remove(&key);
        }
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let resolved = self.resolve(path);
        let mut components = resolved.components().into_iter();
        let Some(anchor) = components.next() else {
            return Ok(());
        };

        let mut current = Path::new(anchor);
        loop {
            match self.node(&current) {
                Some(Node::Dir) | None => {}
                Some(_) => return Err(Error::AlreadyExists { path: current }),
            }
            self.state()
                .entries
                .insert(current.as_str().to_string(), Node::Dir);
            match components.next() {
                Some(segment) => current = current.join(segment.as_str()),
                None => return Ok(()),
            }
        }
    }
}
