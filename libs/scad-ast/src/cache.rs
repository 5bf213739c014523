//! # AST Cache
//!
//! Process-wide cache for file-level parses, keyed by canonical path and
//! options fingerprint. An entry is valid while the file's mtime matches
//! the one recorded at parse time. ASTs are immutable once built, so
//! lookups hand out an `Arc` and drop the lock immediately.

use crate::ast::Ast;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::SystemTime;

type CacheKey = (PathBuf, u8);

struct CacheEntry {
    mtime: SystemTime,
    ast: Arc<Ast>,
}

static AST_CACHE: OnceLock<Mutex<HashMap<CacheKey, CacheEntry>>> = OnceLock::new();

fn cache() -> &'static Mutex<HashMap<CacheKey, CacheEntry>> {
    AST_CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Returns the cached AST when the recorded mtime still matches.
pub(crate) fn lookup(path: &Path, fingerprint: u8, mtime: SystemTime) -> Option<Arc<Ast>> {
    let guard = cache().lock().ok()?;
    let entry = guard.get(&(path.to_path_buf(), fingerprint))?;
    if entry.mtime == mtime {
        log::debug!("ast cache hit for {}", path.display());
        Some(Arc::clone(&entry.ast))
    } else {
        None
    }
}

/// Records a fresh parse, replacing any stale entry.
pub(crate) fn store(path: PathBuf, fingerprint: u8, mtime: SystemTime, ast: Arc<Ast>) {
    if let Ok(mut guard) = cache().lock() {
        guard.insert((path, fingerprint), CacheEntry { mtime, ast });
    }
}

/// Empties the cache.
pub(crate) fn clear() {
    if let Ok(mut guard) = cache().lock() {
        guard.clear();
    }
}
