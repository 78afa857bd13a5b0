//! Property test generators for path values
//!
//! This module provides generators for property-based testing of the path
//! algebra. Generators cover canonical forms (which must survive a
//! construction round trip untouched) and messy forms (separator runs,
//! backslashes, trailing separators) that construction must reduce.

use proptest::prelude::*;

/// Strategies for path testing scenarios
pub struct PathStrategies;

impl PathStrategies {
    /// Generate a single ordinary path segment (no separators, no anchor
    /// look-alikes, never `.` or `..`)
    pub fn segment() -> impl Strategy<Value = String> {
        "[A-Za-z0-9_][A-Za-z0-9_.-]{0,8}"
            .prop_filter("plain segment", |s| s != "." && s != "..")
    }

    /// Generate canonical relative paths like `a/b/c.d`
    pub fn canonical_relative() -> impl Strategy<Value = String> {
        prop::collection::vec(Self::segment(), 1..=4).prop_map(|parts| parts.join("/"))
    }

    /// Generate canonical absolute paths, POSIX-rooted or disk-designated
    pub fn canonical_absolute() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::collection::vec(Self::segment(), 0..=4).prop_map(|parts| {
                if parts.is_empty() {
                    "/".to_string()
                } else {
                    format!("/{}", parts.join("/"))
                }
            }),
            (prop::char::range('A', 'Z'), prop::collection::vec(Self::segment(), 0..=4)).prop_map(
                |(drive, parts)| {
                    if parts.is_empty() {
                        format!("/{drive}:")
                    } else {
                        format!("/{drive}:/{}", parts.join("/"))
                    }
                }
            ),
        ]
    }

    /// Generate canonical home-anchored paths like `~/a/b`
    pub fn canonical_home() -> impl Strategy<Value = String> {
        prop::collection::vec(Self::segment(), 0..=3).prop_map(|parts| {
            if parts.is_empty() {
                "~".to_string()
            } else {
                format!("~/{}", parts.join("/"))
            }
        })
    }

    /// Generate canonical paths containing `.` and `..` segments
    pub fn dotted_path() -> impl Strategy<Value = String> {
        let piece = prop_oneof![
            2 => Self::segment(),
            1 => Just(".".to_string()),
            1 => Just("..".to_string()),
        ];
        (any::<bool>(), prop::collection::vec(piece, 1..=6)).prop_map(|(rooted, parts)| {
            if rooted {
                format!("/{}", parts.join("/"))
            } else {
                parts.join("/")
            }
        })
    }

    /// Generate canonical paths without literal `.`/`..` segments
    pub fn canonical_plain_path() -> impl Strategy<Value = String> {
        prop_oneof![
            1 => Just(String::new()),
            3 => Self::canonical_relative(),
            3 => Self::canonical_absolute(),
            2 => Self::canonical_home(),
        ]
    }

    /// Generate any canonical path (round-trips through construction)
    pub fn canonical_path() -> impl Strategy<Value = String> {
        prop_oneof![
            1 => Just(String::new()),
            3 => Self::canonical_relative(),
            3 => Self::canonical_absolute(),
            2 => Self::canonical_home(),
            2 => Self::dotted_path(),
        ]
    }

    /// Generate messy but meaningful input (separator runs, backslashes,
    /// trailing separators, near-anchor spellings)
    pub fn messy_path() -> impl Strategy<Value = String> {
        prop_oneof![
            Self::canonical_path().prop_map(|p| p.replace('/', "//")),
            Self::canonical_path().prop_map(|p| p.replace('/', "\\")),
            Self::canonical_path().prop_map(|p| format!("{p}/")),
            Just("~user/docs".to_string()),
            Just("C:relative".to_string()),
            Just("a:b:c".to_string()),
            Just("//server//share".to_string()),
            Just("...".to_string()),
            Just("/~".to_string()),
            Just("файл/文件.txt".to_string()),
        ]
    }

    /// Generate all kinds of paths for comprehensive testing
    pub fn any_path() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => Self::canonical_path(),
            2 => Self::messy_path(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn segments_are_plain(segment in PathStrategies::segment()) {
            prop_assert!(!segment.is_empty());
            prop_assert!(!segment.contains('/'));
            prop_assert!(!segment.contains(':'));
            prop_assert_ne!(&segment, ".");
            prop_assert_ne!(&segment, "..");
        }

        #[test]
        fn canonical_paths_have_no_separator_runs(path in PathStrategies::canonical_path()) {
            prop_assert!(!path.contains("//"));
            prop_assert!(!path.contains('\\'));
            if path.len() > 1 {
                prop_assert!(!path.ends_with('/'));
            }
        }

        #[test]
        fn generators_dont_panic(_path in PathStrategies::any_path()) {
            // Just exercise the strategies themselves.
        }
    }
}
