//! Path component model and the string grammar
//!
//! A path decomposes into an optional anchor plus a sequence of non-empty
//! segments. Both POSIX roots and Windows disk designators are anchors, so
//! the rest of the crate handles the two grammars through one code path;
//! disk-designated paths carry a POSIX-style leading separator in their
//! canonical string form (`C:\Windows` renders as `/C:/Windows`).

use std::fmt;

/// The component that anchors a path
///
/// `Root` and `Drive` make a path absolute. `Home` marks a path as rooted
/// at the home directory but still *relative*: it cannot be used until it
/// is resolved, so [`Path::is_absolute`](crate::Path::is_absolute) reports
/// `false` for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// POSIX root (`/`).
    Root,
    /// Windows disk designator, e.g. `C:`. The letter's case is preserved.
    Drive(char),
    /// Home marker (`~`), resolved lazily against the home directory.
    Home,
}

impl Anchor {
    /// The component string form: `/`, `C:`, or `~`.
    #[must_use]
    pub fn as_component(&self) -> String {
        match self {
            Anchor::Root => "/".to_string(),
            Anchor::Drive(letter) => format!("{letter}:"),
            Anchor::Home => "~".to_string(),
        }
    }

    /// Whether this anchor makes a path absolute.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        matches!(self, Anchor::Root | Anchor::Drive(_))
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_component())
    }
}

/// A path decomposed into its anchor and segments.
///
/// Segments are never empty strings; `.` and `..` are kept verbatim and
/// resolved only by the algebra (`normalize`/`join`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Parsed {
    pub(crate) anchor: Option<Anchor>,
    pub(crate) segments: Vec<String>,
}

/// Check whether `segment` is exactly a disk designator (`X:`).
pub(crate) fn is_drive_designator(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() == 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Parse a raw string into anchor and segments.
///
/// Backslashes are folded to `/` before splitting, so Windows-style input
/// is accepted everywhere. Runs of separators collapse to one boundary;
/// the empty string parses to the empty path.
pub(crate) fn parse(raw: &str) -> Parsed {
    let unified = raw.replace('\\', "/");
    if unified.is_empty() {
        return Parsed::default();
    }

    let mut segments: Vec<String> = unified
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    // A designator as the first segment folds into the anchor whether or
    // not a separator precedes it, so `C:/x` and the canonical `/C:/x`
    // parse to the same value.
    let leading_drive = leading_drive_letter(&segments);

    let anchor = if unified.starts_with('/') {
        if let Some(letter) = leading_drive {
            segments.remove(0);
            Some(Anchor::Drive(letter))
        } else {
            Some(Anchor::Root)
        }
    } else if let Some(letter) = leading_drive {
        segments.remove(0);
        Some(Anchor::Drive(letter))
    } else if segments.first().is_some_and(|s| s == "~") {
        segments.remove(0);
        Some(Anchor::Home)
    } else {
        None
    };

    Parsed { anchor, segments }
}

fn leading_drive_letter(segments: &[String]) -> Option<char> {
    segments
        .first()
        .filter(|s| is_drive_designator(s))
        .and_then(|s| s.chars().next())
}

/// Render anchor and segments back to the canonical string form.
pub(crate) fn render(parsed: &Parsed) -> String {
    let body = parsed.segments.join("/");
    match parsed.anchor {
        None => body,
        Some(Anchor::Root) => format!("/{body}"),
        Some(Anchor::Drive(letter)) => {
            if body.is_empty() {
                format!("/{letter}:")
            } else {
                format!("/{letter}:/{body}")
            }
        }
        Some(Anchor::Home) => {
            if body.is_empty() {
                "~".to_string()
            } else {
                format!("~/{body}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(parsed: &Parsed) -> Vec<&str> {
        parsed.segments.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_parse_relative() {
        let parsed = parse("a/b/c.d");
        assert_eq!(parsed.anchor, None);
        assert_eq!(segments(&parsed), ["a", "b", "c.d"]);
    }

    #[test]
    fn test_parse_rooted() {
        let parsed = parse("/usr/bin");
        assert_eq!(parsed.anchor, Some(Anchor::Root));
        assert_eq!(segments(&parsed), ["usr", "bin"]);
    }

    #[test]
    fn test_parse_collapses_separator_runs() {
        assert_eq!(parse("a//b"), parse("a/b"));
        assert_eq!(parse("//a"), parse("/a"));
        assert_eq!(parse("a/b/"), parse("a/b"));
    }

    #[test]
    fn test_parse_accepts_backslashes() {
        assert_eq!(parse("a\\b"), parse("a/b"));
        assert_eq!(parse("C:\\Windows"), parse("C:/Windows"));
    }

    #[test]
    fn test_parse_drive_designator() {
        let parsed = parse("C:/Windows/System32");
        assert_eq!(parsed.anchor, Some(Anchor::Drive('C')));
        assert_eq!(segments(&parsed), ["Windows", "System32"]);

        // The unified canonical spelling parses to the same value.
        assert_eq!(parse("/C:/Windows/System32"), parsed);
    }

    #[test]
    fn test_drive_designator_must_be_exactly_two_chars() {
        // `C:foo` and `CC:` are ordinary segments, not designators.
        assert_eq!(parse("C:foo").anchor, None);
        assert_eq!(parse("CC:/x").anchor, None);
        assert!(is_drive_designator("d:"));
        assert!(!is_drive_designator("1:"));
        assert!(!is_drive_designator(":"));
    }

    #[test]
    fn test_parse_home_marker() {
        let parsed = parse("~/projects");
        assert_eq!(parsed.anchor, Some(Anchor::Home));
        assert_eq!(segments(&parsed), ["projects"]);

        assert_eq!(parse("~").anchor, Some(Anchor::Home));

        // `~user` is not a home marker.
        assert_eq!(parse("~user/x").anchor, None);
        assert_eq!(segments(&parse("~user/x")), ["~user", "x"]);

        // `~` is only recognized in the first position.
        let rooted = parse("/~/x");
        assert_eq!(rooted.anchor, Some(Anchor::Root));
        assert_eq!(segments(&rooted), ["~", "x"]);
    }

    #[test]
    fn test_parse_preserves_dot_segments() {
        assert_eq!(segments(&parse("a/./b")), ["a", ".", "b"]);
        assert_eq!(segments(&parse("../x")), ["..", "x"]);
    }

    #[test]
    fn test_empty_path() {
        let parsed = parse("");
        assert_eq!(parsed, Parsed::default());
        assert_eq!(render(&parsed), "");
    }

    #[test]
    fn test_render_bare_anchors() {
        assert_eq!(render(&parse("/")), "/");
        assert_eq!(render(&parse("C:")), "/C:");
        assert_eq!(render(&parse("~")), "~");
    }

    #[test]
    fn test_round_trip_canonical_forms() {
        for canonical in [
            "",
            "/",
            "~",
            "/C:",
            "a",
            "a/b/c.d",
            "/usr/local/bin",
            "~/projects/demo",
            "/C:/Windows/System32",
            "./a",
            "../../up",
            "/~/literal-tilde",
        ] {
            assert_eq!(render(&parse(canonical)), canonical, "for {canonical:?}");
        }
    }
}
