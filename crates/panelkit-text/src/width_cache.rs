#![forbid(unsafe_code)]

//! LRU cache for line width measurements.
//!
//! Reflow re-measures the same lines many times while it searches for
//! widths that fit. The cache stores computed widths keyed by a hash of
//! the line and the tab size.
//!
//! # Example
//! ```
//! use panelkit_text::WidthCache;
//!
//! let mut cache = WidthCache::new(100);
//! assert_eq!(cache.get_or_compute("北京", 4), 4);
//! assert_eq!(cache.get_or_compute("北京", 4), 4);
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use lru::LruCache;
use rustc_hash::FxHasher;

use crate::width::line_stats;

/// Default cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    /// Hit rate in `0.0..=1.0`.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of line widths.
///
/// Keys are 64-bit FxHash values of `(line, tab_size)`, not the strings
/// themselves.
#[derive(Debug)]
pub struct WidthCache {
    cache: LruCache<u64, usize>,
    hits: u64,
    misses: u64,
}

impl WidthCache {
    /// Create a cache holding up to `capacity` entries (at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Cached width of `line`, computing it on a miss.
    #[inline]
    pub fn get_or_compute(&mut self, line: &str, tab_size: usize) -> usize {
        self.get_or_compute_with(line, tab_size, |l, t| line_stats(l, t, None).width)
    }

    /// Like [`get_or_compute`](Self::get_or_compute) with a custom measure.
    pub fn get_or_compute_with<F>(&mut self, line: &str, tab_size: usize, compute: F) -> usize
    where
        F: FnOnce(&str, usize) -> usize,
    {
        let key = hash_line(line, tab_size);

        if let Some(&width) = self.cache.get(&key) {
            self.hits += 1;
            return width;
        }

        self.misses += 1;
        let width = compute(line, tab_size);
        self.cache.put(key, width);
        width
    }

    #[must_use]
    pub fn contains(&self, line: &str, tab_size: usize) -> bool {
        self.cache.contains(&hash_line(line, tab_size))
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for WidthCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[inline]
fn hash_line(line: &str, tab_size: usize) -> u64 {
    let mut hasher = FxHasher::default();
    line.hash(&mut hasher);
    tab_size.hash(&mut hasher);
    hasher.finish()
}

thread_local! {
    static THREAD_CACHE: RefCell<WidthCache> = RefCell::new(WidthCache::with_default_capacity());
}

/// Width of `line` through the calling thread's cache.
pub fn cached_line_width(line: &str, tab_size: usize) -> usize {
    THREAD_CACHE.with(|cache| cache.borrow_mut().get_or_compute(line, tab_size))
}
