//! The `Path` value type and its pure algebra
//!
//! A `Path` is an immutable value: every operation returns a new value and
//! none of them touch the filesystem, except [`Path::absolute`],
//! [`Path::abbreviate`] and [`Path::matches`], which consult the ambient
//! values (current directory, home directory, case policy) through a
//! [`FileSystem`] capability supplied by the caller.

use std::fmt;
use std::str::FromStr;

use crate::component::{self, Anchor, Parsed};
use crate::error::Result;
use crate::fs::FileSystem;

/// A cross-platform filesystem path value
///
/// Construction never fails: any string is accepted and reduced to a
/// canonical form (separator runs collapsed, trailing separator dropped,
/// backslashes folded to `/`, a disk designator folded into the root).
/// Equality, ordering and hashing are those of the canonical string, so
/// they are case-sensitive regardless of the underlying filesystem.
///
/// # Examples
/// ```
/// use path_kit::Path;
///
/// assert_eq!(Path::new("a//b/"), Path::new("a/b"));
/// assert_eq!(Path::new("C:\\Windows"), Path::new("/C:/Windows"));
/// assert_eq!(Path::new("a/b/c").join("../d"), Path::new("a/b/d"));
/// assert!(Path::new("a") < Path::new("b"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Path {
    raw: String,
}

impl Path {
    /// Create a path from a string, reducing it to canonical form
    ///
    /// # Examples
    /// ```
    /// use path_kit::Path;
    ///
    /// assert_eq!(Path::new("a//b").as_str(), "a/b");
    /// assert_eq!(Path::new("").as_str(), "");
    /// assert_eq!(Path::new("/").as_str(), "/");
    /// ```
    #[must_use]
    pub fn new<S: AsRef<str>>(raw: S) -> Self {
        let parsed = component::parse(raw.as_ref());
        Path {
            raw: component::render(&parsed),
        }
    }

    /// Create a path from a sequence of components
    ///
    /// The first component may be an anchor (`/`, a disk designator, or
    /// `~`); the rest are ordinary segments.
    ///
    /// # Examples
    /// ```
    /// use path_kit::Path;
    ///
    /// assert_eq!(Path::from_components(["/", "usr", "bin"]), Path::new("/usr/bin"));
    /// assert_eq!(Path::from_components(["C:", "Windows"]), Path::new("C:/Windows"));
    /// assert_eq!(Path::from_components(["a", "b"]), Path::new("a/b"));
    /// ```
    #[must_use]
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = components
            .into_iter()
            .map(|c| c.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("/");
        Path::new(joined)
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Consume the path, returning its canonical string form.
    #[must_use]
    pub fn into_string(self) -> String {
        self.raw
    }

    /// Whether this is the empty path (distinct from `.`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The anchor of this path, if any.
    #[must_use]
    pub fn anchor(&self) -> Option<Anchor> {
        component::parse(&self.raw).anchor
    }

    /// Decompose into components, anchor first
    ///
    /// # Examples
    /// ```
    /// use path_kit::Path;
    ///
    /// assert_eq!(Path::new("a/b/c.d").components(), vec!["a", "b", "c.d"]);
    /// assert_eq!(Path::new("/usr/bin").components(), vec!["/", "usr", "bin"]);
    /// assert_eq!(Path::new("~/x").components(), vec!["~", "x"]);
    /// ```
    #[must_use]
    pub fn components(&self) -> Vec<String> {
        let parsed = component::parse(&self.raw);
        let mut out = Vec::with_capacity(parsed.segments.len() + 1);
        if let Some(anchor) = parsed.anchor {
            out.push(anchor.as_component());
        }
        out.extend(parsed.segments);
        out
    }

    /// Whether the path is anchored at a root or disk designator
    ///
    /// `~`-anchored paths are *relative* for this predicate: they still
    /// require resolution against the home directory.
    ///
    /// # Examples
    /// ```
    /// use path_kit::Path;
    ///
    /// assert!(Path::new("/usr").is_absolute());
    /// assert!(Path::new("C:/Windows").is_absolute());
    /// assert!(!Path::new("~/x").is_absolute());
    /// assert!(!Path::new("a/b").is_absolute());
    /// ```
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.anchor().is_some_and(|a| a.is_absolute())
    }

    /// The complement of [`Path::is_absolute`].
    #[must_use]
    pub fn is_relative(&self) -> bool {
        !self.is_absolute()
    }

    /// Append `other` onto this path
    ///
    /// This is the composition law of the algebra, not string
    /// concatenation:
    ///
    /// - an anchored right operand (absolute, disk-designated, or
    ///   `~`-rooted) replaces the left operand entirely;
    /// - `.` segments are dropped from both sides;
    /// - each leading `..` of the right operand pops the last poppable
    ///   segment of the left; once the left is exhausted the `..`
    ///   accumulates instead, and a root is never popped;
    /// - a join that cancels every segment of a relative path yields `.`.
    ///
    /// # Examples
    /// ```
    /// use path_kit::Path;
    ///
    /// assert_eq!(Path::new("a/b/c").join("../d/e"), Path::new("a/b/d/e"));
    /// assert_eq!(Path::new("a").join(".."), Path::new("."));
    /// assert_eq!(Path::new("..").join(".."), Path::new("../.."));
    /// assert_eq!(Path::new("/x").join(".."), Path::new("/"));
    /// assert_eq!(Path::new("anything").join("/etc"), Path::new("/etc"));
    /// ```
    #[must_use]
    pub fn join<P: Into<Path>>(&self, other: P) -> Path {
        let other = other.into();
        if other.raw.is_empty() {
            return self.clone();
        }

        let rhs = component::parse(&other.raw);
        if rhs.anchor.is_some() {
            return other;
        }

        let mut result = component::parse(&self.raw);
        result.segments.retain(|s| s != ".");
        for segment in &rhs.segments {
            push_resolved(&mut result, segment);
        }

        materialize(result, &self.raw)
    }

    /// Resolve all `.` and `..` segments without filesystem access
    ///
    /// Uses the same popping rule as [`Path::join`]; an anchor is never
    /// removed and the operation is idempotent.
    ///
    /// # Examples
    /// ```
    /// use path_kit::Path;
    ///
    /// assert_eq!(
    ///     Path::new("/usr/./local/../bin/swift").normalize(),
    ///     Path::new("/usr/bin/swift"),
    /// );
    /// assert_eq!(Path::new("/..").normalize(), Path::new("/"));
    /// assert_eq!(Path::new("a/..").normalize(), Path::new("."));
    /// assert_eq!(Path::new("../x/..").normalize(), Path::new(".."));
    /// ```
    #[must_use]
    pub fn normalize(&self) -> Path {
        let parsed = component::parse(&self.raw);
        let mut result = Parsed {
            anchor: parsed.anchor,
            segments: Vec::with_capacity(parsed.segments.len()),
        };
        for segment in &parsed.segments {
            push_resolved(&mut result, segment);
        }

        materialize(result, &self.raw)
    }

    /// The parent of this path, defined as `join("..")`.
    #[must_use]
    pub fn parent(&self) -> Path {
        self.join("..")
    }

    /// The final segment, if there is one
    ///
    /// Pure-anchor paths (`/`, `C:`, `~`) and the empty path have no
    /// final segment.
    ///
    /// # Examples
    /// ```
    /// use path_kit::Path;
    ///
    /// assert_eq!(Path::new("a/b/c.d").file_name(), Some("c.d"));
    /// assert_eq!(Path::new("/").file_name(), None);
    /// ```
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        let parsed = component::parse(&self.raw);
        let last = parsed.segments.last()?;
        // The canonical form always ends with the last segment verbatim.
        Some(&self.raw[self.raw.len() - last.len()..])
    }

    /// The final segment without its extension
    ///
    /// # Examples
    /// ```
    /// use path_kit::Path;
    ///
    /// assert_eq!(Path::new("a/b/c.d").file_stem(), Some("c"));
    /// assert_eq!(Path::new("a/.hidden").file_stem(), Some(".hidden"));
    /// ```
    #[must_use]
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        if name == "." || name == ".." {
            return Some(name);
        }
        match name.rfind('.') {
            Some(index) if index > 0 => Some(&name[..index]),
            _ => Some(name),
        }
    }

    /// The suffix after the final `.` of the last segment
    ///
    /// Absent when the segment has no `.`, or when it is a dotfile whose
    /// only `.` is the leading one.
    ///
    /// # Examples
    /// ```
    /// use path_kit::Path;
    ///
    /// assert_eq!(Path::new("a/b/c.d").extension(), Some("d"));
    /// assert_eq!(Path::new("a/b").extension(), None);
    /// assert_eq!(Path::new(".profile").extension(), None);
    /// assert_eq!(Path::new(".profile.bak").extension(), Some("bak"));
    /// ```
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        if name == "." || name == ".." {
            return None;
        }
        match name.rfind('.') {
            Some(index) if index > 0 => Some(&name[index + 1..]),
            _ => None,
        }
    }

    /// Resolve this path to an absolute one
    ///
    /// Absolute paths come back unchanged. A `~`-anchored path has the
    /// capability's home directory substituted for the `~`; the remaining
    /// segments are preserved, and a later literal occurrence of the home
    /// path string is not treated specially. Any other relative path is
    /// joined onto the capability's current directory.
    ///
    /// # Errors
    ///
    /// Fails only when the capability cannot supply the home or current
    /// directory.
    ///
    /// # Examples
    /// ```
    /// use path_kit::{MemoryFileSystem, Path};
    ///
    /// let fs = MemoryFileSystem::new().with_home("/home/ada");
    /// assert_eq!(Path::new("~/x").absolute(&fs).unwrap(), Path::new("/home/ada/x"));
    /// assert_eq!(Path::new("/etc").absolute(&fs).unwrap(), Path::new("/etc"));
    /// ```
    pub fn absolute(&self, fs: &dyn FileSystem) -> Result<Path> {
        let parsed = component::parse(&self.raw);
        match parsed.anchor {
            Some(anchor) if anchor.is_absolute() => Ok(self.clone()),
            Some(Anchor::Home) => {
                let rest = Parsed {
                    anchor: None,
                    segments: parsed.segments,
                };
                Ok(fs.home_dir()?.join(Path {
                    raw: component::render(&rest),
                }))
            }
            _ => Ok(fs.current_dir()?.join(self.clone())),
        }
    }

    /// Replace a leading home-directory prefix with `~`
    ///
    /// The inverse of home substitution. Only the leading occurrence is
    /// replaced, and the comparison honors the case policy the capability
    /// reports for the home directory; the remainder of the path keeps
    /// its original spelling.
    ///
    /// # Errors
    ///
    /// Fails only when the capability cannot supply the home directory.
    ///
    /// # Examples
    /// ```
    /// use path_kit::{MemoryFileSystem, Path};
    ///
    /// let fs = MemoryFileSystem::new().with_home("/home/ada");
    /// let p = Path::new("/home/ada/docs/home/ada");
    /// assert_eq!(p.abbreviate(&fs).unwrap(), Path::new("~/docs/home/ada"));
    /// ```
    pub fn abbreviate(&self, fs: &dyn FileSystem) -> Result<Path> {
        let home = fs.home_dir()?;
        let prefix = home.as_str();
        // A degenerate home would abbreviate every absolute path.
        if prefix.is_empty() || prefix == "/" {
            return Ok(self.clone());
        }

        let case_sensitive = fs.is_case_sensitive(&home);
        let head_matches = if case_sensitive {
            self.raw.starts_with(prefix)
        } else {
            self.raw.is_char_boundary(prefix.len())
                && self.raw.len() >= prefix.len()
                && self.raw[..prefix.len()].eq_ignore_ascii_case(prefix)
        };
        if !head_matches {
            return Ok(self.clone());
        }

        let rest = &self.raw[prefix.len()..];
        if rest.is_empty() {
            return Ok(Path::new("~"));
        }
        // `/home/ada2` must not abbreviate under home `/home/ada`.
        if !rest.starts_with('/') {
            return Ok(self.clone());
        }
        Ok(Path {
            raw: format!("~{rest}"),
        })
    }

    /// Whether this path equals or lies under `pattern`
    ///
    /// The pattern is itself a path; if it is `~`-anchored it is
    /// home-expanded first (a failed home lookup degrades to the literal
    /// pattern — the predicate itself never fails). Both sides are then
    /// normalized and compared for equality or component-wise prefix.
    ///
    /// # Examples
    /// ```
    /// use path_kit::{MemoryFileSystem, Path};
    ///
    /// let fs = MemoryFileSystem::new().with_home("/home/ada");
    /// let p = Path::new("/home/ada/src/main.rs");
    /// assert!(p.matches(&Path::new("~/src"), &fs));
    /// assert!(p.matches(&Path::new("/home/ada/src/x/../main.rs"), &fs));
    /// assert!(!p.matches(&Path::new("~/srcx"), &fs));
    /// ```
    #[must_use]
    pub fn matches(&self, pattern: &Path, fs: &dyn FileSystem) -> bool {
        let expanded = match component::parse(&pattern.raw).anchor {
            Some(Anchor::Home) => pattern.absolute(fs).unwrap_or_else(|_| pattern.clone()),
            _ => pattern.clone(),
        };
        let subject = self.normalize();
        let expanded = expanded.normalize();
        if subject == expanded {
            return true;
        }
        if expanded.is_empty() {
            return false;
        }

        let subject = component::parse(&subject.raw);
        let expanded = component::parse(&expanded.raw);
        subject.anchor == expanded.anchor && subject.segments.starts_with(&expanded.segments)
    }

    /// The string to hand to the host OS
    ///
    /// Disk-designated paths are spelled the Windows way (`C:\Windows`);
    /// everything else keeps the internal `/` form, which every supported
    /// platform accepts.
    #[must_use]
    pub fn to_native(&self) -> String {
        let parsed = component::parse(&self.raw);
        match parsed.anchor {
            Some(Anchor::Drive(letter)) => {
                format!("{letter}:\\{}", parsed.segments.join("\\"))
            }
            _ => self.raw.clone(),
        }
    }
}

/// Push one segment onto a partial result, applying the `.`/`..` rules.
fn push_resolved(result: &mut Parsed, segment: &str) {
    match segment {
        "." => {}
        ".." => match result.segments.last().map(String::as_str) {
            Some("..") => result.segments.push("..".to_string()),
            Some(_) => {
                result.segments.pop();
            }
            None => {
                // Ascending past a root is a no-op; a relative (or
                // home-anchored) path accumulates the `..` instead.
                if !result.anchor.is_some_and(|a| a.is_absolute()) {
                    result.segments.push("..".to_string());
                }
            }
        },
        other => result.segments.push(other.to_string()),
    }
}

/// Render a resolved result, mapping total cancellation of a non-empty
/// relative path to `.` (the empty path stays empty).
fn materialize(result: Parsed, original: &str) -> Path {
    if result.anchor.is_none() && result.segments.is_empty() && !original.is_empty() {
        return Path::new(".");
    }
    Path {
        raw: component::render(&result),
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for Path {
    fn from(raw: &str) -> Self {
        Path::new(raw)
    }
}

impl From<String> for Path {
    fn from(raw: String) -> Self {
        Path::new(raw)
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl FromStr for Path {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Path::new(raw))
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}
