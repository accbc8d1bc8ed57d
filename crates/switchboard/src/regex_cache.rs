// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process-lifetime memoization of compiled regexes.
//!
//! Keyed by (source, compile options); run options never enter the key.
//! Entries are never evicted: rule sets compile rarely relative to match
//! volume, and the cache is bounded by the number of distinct configured
//! patterns, not by request count.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use regex::{Regex, RegexBuilder};

use crate::error::{Error, Result};
use crate::rule::RegexOptions;

/// Cache key: regex source plus compile options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RegexKey {
    source: String,
    options: RegexOptions,
}

/// Concurrent regex cache shared by every matcher compiled against it.
///
/// Insert-if-absent: concurrent compiles of an identical key are tolerated;
/// the first inserted entry wins and duplicates are dropped (redundant
/// work, not a correctness hazard).
#[derive(Debug, Default)]
pub struct RegexCache {
    inner: DashMap<RegexKey, Arc<Regex>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

/// Cache statistics.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub entries: usize,
}

impl RegexCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the compiled regex for a key, compiling it on first use.
    ///
    /// A malformed source surfaces here, at rule compile time, never at
    /// match time.
    pub fn get_or_compile(&self, source: &str, options: &RegexOptions) -> Result<Arc<Regex>> {
        let key = RegexKey {
            source: source.to_string(),
            options: options.clone(),
        };
        if let Some(entry) = self.inner.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(&entry));
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!("compiling regex '{}'", source);

        // Compile outside the map lock; losers of an insert race reuse the
        // winner's entry.
        let regex = RegexBuilder::new(source)
            .case_insensitive(options.case_insensitive)
            .multi_line(options.multi_line)
            .dot_matches_new_line(options.dot_matches_new_line)
            .ignore_whitespace(options.ignore_whitespace)
            .unicode(options.unicode)
            .build()
            .map_err(|e| Error::Regex {
                pattern: source.to_string(),
                source: e,
            })?;
        let entry = self.inner.entry(key).or_insert(Arc::new(regex));
        Ok(Arc::clone(&entry))
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.inner.len(),
        }
    }
}

#[cfg(test)]
#[path = "regex_cache_tests.rs"]
mod tests;
