//! Memoization of free-text translations.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// How long a cached translation stays valid.
pub const CACHE_EXPIRY: Duration = Duration::from_secs(24 * 60 * 60);

/// How much of the source text participates in the cache key.
const FINGERPRINT_CHARS: usize = 100;

/// Time source, injectable for expiry tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    translation: String,
    stored_at: Instant,
}

/// Cache of single free-text translations, keyed by a fingerprint of the
/// truncated source text and target language.
///
/// Entries past their time-to-live are treated as misses on lookup; nothing
/// evicts them proactively.
pub struct TranslationCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock), CACHE_EXPIRY)
    }

    pub fn with_clock(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock,
        }
    }

    /// Cache key for a (source text, target language) pair.
    pub fn fingerprint(text: &str, target_language: &str) -> String {
        let prefix: String = text.chars().take(FINGERPRINT_CHARS).collect();
        format!("translate_{prefix}_{target_language}")
    }

    /// Look up a translation, treating expired entries as misses.
    pub fn get(&self, text: &str, target_language: &str) -> Option<String> {
        let key = Self::fingerprint(text, target_language);
        let entries = self.entries.lock();
        let entry = entries.get(&key)?;
        if self.clock.now().duration_since(entry.stored_at) < self.ttl {
            Some(entry.translation.clone())
        } else {
            None
        }
    }

    pub fn put(&self, text: &str, target_language: &str, translation: &str) {
        let key = Self::fingerprint(text, target_language);
        self.entries.lock().insert(
            key,
            CacheEntry {
                translation: translation.to_string(),
                stored_at: self.clock.now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Clock that only moves when told to.
    struct ManualClock {
        base: Instant,
        offset: Mutex<Duration>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Mutex::new(Duration::ZERO),
            }
        }

        fn advance(&self, by: Duration) {
            *self.offset.lock() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + *self.offset.lock()
        }
    }

    #[test]
    fn test_hit_just_before_expiry() {
        let clock = Arc::new(ManualClock::new());
        let cache = TranslationCache::with_clock(clock.clone(), CACHE_EXPIRY);

        cache.put("Guten Morgen", "en", "Good morning");
        clock.advance(CACHE_EXPIRY - Duration::from_secs(1));
        assert_eq!(
            cache.get("Guten Morgen", "en").as_deref(),
            Some("Good morning")
        );
    }

    #[test]
    fn test_miss_just_after_expiry() {
        let clock = Arc::new(ManualClock::new());
        let cache = TranslationCache::with_clock(clock.clone(), CACHE_EXPIRY);

        cache.put("Guten Morgen", "en", "Good morning");
        clock.advance(CACHE_EXPIRY + Duration::from_secs(1));
        assert!(cache.get("Guten Morgen", "en").is_none());
    }

    #[test]
    fn test_key_distinguishes_target_language() {
        let cache = TranslationCache::new();
        cache.put("Hello", "de", "Hallo");
        assert!(cache.get("Hello", "fr").is_none());
        assert_eq!(cache.get("Hello", "de").as_deref(), Some("Hallo"));
    }

    #[test]
    fn test_fingerprint_truncates_long_text() {
        let long_a = format!("{}{}", "a".repeat(150), "different tail one");
        let long_b = format!("{}{}", "a".repeat(150), "different tail two");
        assert_eq!(
            TranslationCache::fingerprint(&long_a, "en"),
            TranslationCache::fingerprint(&long_b, "en")
        );
    }

    #[test]
    fn test_put_refreshes_stored_at() {
        let clock = Arc::new(ManualClock::new());
        let cache = TranslationCache::with_clock(clock.clone(), CACHE_EXPIRY);

        cache.put("Hello", "de", "Hallo");
        clock.advance(CACHE_EXPIRY - Duration::from_secs(1));
        cache.put("Hello", "de", "Hallo!");
        clock.advance(Duration::from_secs(2));
        assert_eq!(cache.get("Hello", "de").as_deref(), Some("Hallo!"));
    }
}
