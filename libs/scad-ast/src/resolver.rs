//! # Library Resolver
//!
//! Mirrors OpenSCAD's own library lookup rules. Candidate locations, in
//! order: an absolute path as given, the current file's directory, each
//! entry of `OPENSCADPATH`, then the platform default library directory.
//! The first existing regular file wins.

use crate::error::Error;
use std::path::{Path, PathBuf};

/// Searches for a library file.
///
/// `current_file` is the file whose `use`/`include` triggered the lookup;
/// `None` when parsing anonymous input.
pub fn find_library_file(current_file: Option<&Path>, libfile: &str) -> Result<PathBuf, Error> {
    find_in_search_path(current_file.and_then(Path::parent), libfile)
}

/// Searches with an explicit base directory instead of a current file.
pub(crate) fn find_in_search_path(
    base_dir: Option<&Path>,
    libfile: &str,
) -> Result<PathBuf, Error> {
    for candidate in candidates(base_dir, libfile) {
        log::trace!("library lookup: trying {}", candidate.display());
        if candidate.is_file() {
            log::debug!("resolved <{}> to {}", libfile, candidate.display());
            return Ok(candidate);
        }
    }
    Err(Error::LibraryNotFound { libfile: libfile.to_string() })
}

fn candidates(base_dir: Option<&Path>, libfile: &str) -> Vec<PathBuf> {
    let lib = Path::new(libfile);
    if lib.is_absolute() {
        // Joining would discard the prefix anyway; an absolute library
        // path either exists or the lookup fails.
        return vec![lib.to_path_buf()];
    }

    let mut out = Vec::new();
    if let Some(dir) = base_dir {
        out.push(dir.join(lib));
    }
    if let Some(paths) = std::env::var_os("OPENSCADPATH") {
        for dir in std::env::split_paths(&paths) {
            if dir.as_os_str().is_empty() {
                continue;
            }
            out.push(dir.join(lib));
        }
    }
    if let Some(default_dir) = platform_library_dir() {
        out.push(default_dir.join(lib));
    }
    out
}

fn platform_library_dir() -> Option<PathBuf> {
    let var = if cfg!(windows) { "USERPROFILE" } else { "HOME" };
    let home = PathBuf::from(std::env::var_os(var)?);
    if cfg!(any(target_os = "windows", target_os = "macos")) {
        Some(home.join("Documents").join("OpenSCAD").join("libraries"))
    } else {
        Some(home.join(".local").join("share").join("OpenSCAD").join("libraries"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_relative_to_current_file() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("util.scad");
        fs::write(&lib, "x = 1;").unwrap();
        let current = dir.path().join("main.scad");
        fs::write(&current, "").unwrap();

        let found = find_library_file(Some(&current), "util.scad").unwrap();
        assert_eq!(found, lib);
    }

    #[test]
    fn test_absolute_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("abs.scad");
        fs::write(&lib, "x = 1;").unwrap();

        let found = find_library_file(None, lib.to_str().unwrap()).unwrap();
        assert_eq!(found, lib);
    }

    #[test]
    fn test_missing_library() {
        let err = find_library_file(None, "no-such-library.scad").unwrap_err();
        match err {
            Error::LibraryNotFound { libfile } => assert_eq!(libfile, "no-such-library.scad"),
            other => panic!("expected LibraryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_openscadpath_is_searched() {
        let dir = tempfile::tempdir().unwrap();
        let lib = dir.path().join("from_env.scad");
        fs::write(&lib, "x = 1;").unwrap();

        std::env::set_var("OPENSCADPATH", dir.path());
        let found = find_library_file(None, "from_env.scad");
        std::env::remove_var("OPENSCADPATH");

        assert_eq!(found.unwrap(), lib);
    }

    #[test]
    fn test_directory_is_not_a_library() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("libdir.scad")).unwrap();
        let current = dir.path().join("main.scad");
        fs::write(&current, "").unwrap();

        assert!(find_library_file(Some(&current), "libdir.scad").is_err());
    }
}
