//! Component-recursive glob expansion
//!
//! Patterns are split into components exactly like paths. Only components
//! that carry wildcard metacharacters cost a directory listing; literal
//! components are appended without touching the filesystem. All listing
//! and existence checks go through the [`FileSystem`] capability, so the
//! engine runs unchanged against the real disk or an in-memory tree.

use log::debug;

use crate::component::{self, Anchor, Parsed};
use crate::error::Result;
use crate::fs::FileSystem;
use crate::Path;

/// Expand `pattern` relative to `base` into matching paths
///
/// A rooted pattern ignores `base`; a `~`-anchored pattern starts at the
/// capability's home directory; any other pattern starts at `base` made
/// absolute. Per component, `*` matches any run of characters, `?` any
/// single character, and `[a-z]`/`[!a-z]` a character class; none of them
/// match a leading `.` unless the pattern component itself starts with
/// one. Matches come back absolute and normalized, in listing order.
///
/// A pattern that matches nothing yields an empty vector, never an
/// error; failures from the capability itself (a listing that cannot be
/// read) propagate.
///
/// # Errors
///
/// Fails only when a capability call fails.
///
/// # Examples
/// ```
/// use path_kit::{glob, MemoryFileSystem, Path};
///
/// let fs = MemoryFileSystem::new()
///     .with_file("/src/main.rs", b"")
///     .with_file("/src/lib.rs", b"")
///     .with_file("/src/notes.md", b"");
///
/// let mut found = glob(&fs, &Path::new("/src"), "*.rs").unwrap();
/// found.sort();
/// assert_eq!(found, vec![Path::new("/src/lib.rs"), Path::new("/src/main.rs")]);
///
/// assert!(glob(&fs, &Path::new("/src"), "*.toml").unwrap().is_empty());
/// ```
pub fn glob(fs: &dyn FileSystem, base: &Path, pattern: &str) -> Result<Vec<Path>> {
    let parsed = component::parse(pattern);
    let start = match parsed.anchor {
        Some(anchor) if anchor.is_absolute() => Path::new(component::render(&Parsed {
            anchor: Some(anchor),
            segments: Vec::new(),
        })),
        Some(Anchor::Home) => fs.home_dir()?,
        _ => base.absolute(fs)?.normalize(),
    };

    let mut candidates = vec![start];
    for segment in &parsed.segments {
        if candidates.is_empty() {
            break;
        }
        if is_wildcard(segment) {
            debug!(
                "expanding {segment:?} against {} candidate(s)",
                candidates.len()
            );
            let mut matched = Vec::new();
            for dir in &candidates {
                if !fs.is_dir(dir) {
                    continue;
                }
                for entry in fs.list_dir(dir)? {
                    let hit = entry
                        .file_name()
                        .is_some_and(|name| wildcard_match(name, segment));
                    if hit {
                        matched.push(entry);
                    }
                }
            }
            candidates = matched;
        } else {
            candidates = candidates
                .iter()
                .map(|dir| dir.join(segment.as_str()))
                .collect();
        }
    }

    // `..` after a wildcard can collapse distinct candidates into one
    // path; keep the first occurrence.
    let mut results: Vec<Path> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let candidate = candidate.normalize();
        if fs.exists(&candidate) && !results.contains(&candidate) {
            results.push(candidate);
        }
    }
    Ok(results)
}

/// Whether a pattern component needs a directory listing to match.
pub(crate) fn is_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?', '['])
}

/// Match one directory-entry name against one pattern component.
pub(crate) fn wildcard_match(name: &str, pattern: &str) -> bool {
    // A leading dot must be matched by a literal dot.
    if name.starts_with('.') && !pattern.starts_with('.') {
        return false;
    }
    let name: Vec<char> = name.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    match_chars(&name, &pattern)
}

fn match_chars(name: &[char], pattern: &[char]) -> bool {
    let Some((&first, rest)) = pattern.split_first() else {
        return name.is_empty();
    };
    match first {
        '*' => match_chars(name, rest) || (!name.is_empty() && match_chars(&name[1..], pattern)),
        '?' => !name.is_empty() && match_chars(&name[1..], rest),
        '[' => match CharClass::parse(rest) {
            Some((class, tail)) => {
                !name.is_empty() && class.contains(name[0]) && match_chars(&name[1..], tail)
            }
            // No closing bracket: `[` is an ordinary character.
            None => !name.is_empty() && name[0] == '[' && match_chars(&name[1..], rest),
        },
        literal => !name.is_empty() && name[0] == literal && match_chars(&name[1..], rest),
    }
}

struct CharClass {
    negated: bool,
    members: Vec<char>,
}

impl CharClass {
    /// Parse a class body (everything after `[`), returning the class and
    /// the rest of the pattern after the closing `]`.
    fn parse(body: &[char]) -> Option<(CharClass, &[char])> {
        let negated = body.first() == Some(&'!');
        let start = usize::from(negated);
        // `]` as the first member is literal; the class ends at the next one.
        let close = (start + 1..body.len()).find(|&i| body[i] == ']')?;
        let class = CharClass {
            negated,
            members: body[start..close].to_vec(),
        };
        Some((class, &body[close + 1..]))
    }

    fn contains(&self, c: char) -> bool {
        let mut hit = false;
        let mut i = 0;
        while i < self.members.len() {
            if i + 2 < self.members.len() && self.members[i + 1] == '-' {
                if (self.members[i]..=self.members[i + 2]).contains(&c) {
                    hit = true;
                }
                i += 3;
            } else {
                if self.members[i] == c {
                    hit = true;
                }
                i += 1;
            }
        }
        hit != self.negated
    }
}
