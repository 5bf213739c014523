//! # Include Pre-Processor
//!
//! Splices `include <path>` files into a single combined buffer before
//! parsing, building the source map that keeps every offset traceable to
//! its origin. `use` statements are never expanded; they survive as AST
//! nodes.
//!
//! Expansion is depth-first in source order. Each directive is blanked in
//! place (so it parses away without moving any offset) and the resolved
//! file's content is spliced at the directive's start. A stack of
//! canonical paths suppresses include cycles.

use crate::error::Error;
use crate::resolver::find_in_search_path;
use scad_syntax::{scan_includes, SourceMap};
use std::path::{Path, PathBuf};

/// Expands all includes reachable from `source` and returns the map.
///
/// `origin` names the main input in positions; `origin_dir` anchors
/// relative include paths (`None` for anonymous input, which then falls
/// back to `OPENSCADPATH` and the platform default).
pub fn expand_includes(
    source: &str,
    origin: &str,
    origin_dir: Option<&Path>,
) -> Result<SourceMap, Error> {
    let mut map = SourceMap::new();
    let base = map.add_origin(origin, source, None);

    let mut stack = Vec::new();
    if let Ok(canonical) = Path::new(origin).canonicalize() {
        stack.push(canonical);
    }

    expand_into(&mut map, source, base, origin_dir, &mut stack)?;
    Ok(map)
}

/// Expands the directives of one origin's text, returning the total
/// number of bytes spliced in.
fn expand_into(
    map: &mut SourceMap,
    text: &str,
    base: u32,
    dir: Option<&Path>,
    stack: &mut Vec<PathBuf>,
) -> Result<u32, Error> {
    let mut shift = 0u32;

    for directive in scan_includes(text) {
        let start = base + directive.start + shift;
        let end = base + directive.end + shift;

        // The directive itself always parses away, cycles included.
        map.blank_range(start, end);

        let resolved = match find_in_search_path(dir, &directive.path) {
            Ok(path) => path,
            Err(Error::LibraryNotFound { .. }) => {
                let position = map.get_location(start)?;
                return Err(Error::IncludeNotFound { path: directive.path, position });
            }
            Err(other) => return Err(other),
        };

        let canonical = resolved.canonicalize().unwrap_or_else(|_| resolved.clone());
        if stack.contains(&canonical) {
            log::debug!("skipping cyclic include of {}", canonical.display());
            continue;
        }

        let content = read_source(&resolved)?;
        log::debug!(
            "splicing {} ({} bytes) into combined buffer at {}",
            resolved.display(),
            content.len(),
            start
        );
        map.add_origin(&resolved.to_string_lossy(), &content, Some(start));

        stack.push(canonical);
        let nested = expand_into(map, &content, start, resolved.parent(), stack)?;
        stack.pop();

        shift += content.len() as u32 + nested;
    }

    Ok(shift)
}

/// Reads a source file as UTF-8, stripping a leading BOM.
pub(crate) fn read_source(path: &Path) -> Result<String, Error> {
    let content = std::fs::read_to_string(path)?;
    Ok(strip_bom(&content).to_string())
}

/// Drops a UTF-8 byte order mark from the start of the input.
pub(crate) fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{feff}').unwrap_or(source)
}
