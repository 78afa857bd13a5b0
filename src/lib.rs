//! # path-kit
//!
//! Cross-platform path values with a pure path algebra and
//! capability-backed filesystem queries.
//!
//! A [`Path`] is an immutable value over a canonical component form: one
//! grammar covers POSIX roots, Windows disk designators, and `~`-rooted
//! paths, so joining, normalization and decomposition behave identically
//! everywhere. Everything that needs the real world — the current
//! directory, the home directory, case policy, directory listings — is
//! reached through the [`FileSystem`] capability trait, with
//! [`OsFileSystem`] for production and [`MemoryFileSystem`] for tests.
//!
//! ## Features
//!
//! - **Total construction**: any string parses to some path; errors are
//!   reserved for real I/O
//! - **Path algebra**: `join` with shell-like absolute-override and `..`
//!   popping, `normalize`, home abbreviation and expansion
//! - **One grammar, two roots**: `C:\Windows` and `/usr/bin` share one
//!   internal representation
//! - **Injectable filesystem**: swap the OS for an in-memory tree in
//!   tests without touching the algebra
//! - **Glob expansion**: per-component wildcard matching driven by the
//!   capability, not by the host libc
//!
//! ## Examples
//!
//! ### Pure path algebra
//!
//! ```rust
//! use path_kit::Path;
//!
//! assert_eq!(
//!     Path::new("/usr/./local/../bin/swift").normalize(),
//!     Path::new("/usr/bin/swift"),
//! );
//! assert_eq!(Path::new("a/b/c").join("../d"), Path::new("a/b/d"));
//! assert_eq!(Path::new("anything").join("/etc/hosts"), Path::new("/etc/hosts"));
//! assert_eq!(Path::new("C:\\Windows"), Path::new("/C:/Windows"));
//! ```
//!
//! ### Ambient values are injected
//!
//! ```rust
//! use path_kit::{MemoryFileSystem, Path};
//!
//! let fs = MemoryFileSystem::new().with_home("/home/ada");
//!
//! let p = Path::new("~/projects").absolute(&fs).unwrap();
//! assert_eq!(p, Path::new("/home/ada/projects"));
//! assert_eq!(p.abbreviate(&fs).unwrap(), Path::new("~/projects"));
//! ```
//!
//! ### Glob expansion
//!
//! ```rust
//! use path_kit::{glob, MemoryFileSystem, Path};
//!
//! let fs = MemoryFileSystem::new()
//!     .with_file("/crate/src/lib.rs", b"")
//!     .with_file("/crate/src/path.rs", b"")
//!     .with_file("/crate/Cargo.toml", b"");
//!
//! let mut sources = glob(&fs, &Path::new("/crate"), "src/*.rs").unwrap();
//! sources.sort();
//! assert_eq!(sources.len(), 2);
//! ```

mod component;
mod error;
mod fs;
mod glob;
mod memory;
mod path;

// Generators module for property testing (available in tests)
#[cfg(test)]
pub mod generators;

// Re-export main public API
pub use component::Anchor;
pub use error::{Error, Result};
pub use fs::{with_current_dir, FileSystem, OsFileSystem};
pub use glob::glob;
pub use memory::MemoryFileSystem;
pub use path::Path;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
