//! Background refresh debouncing
//!
//! Gates how often a higher layer may refresh a cached response in the
//! background. The context cache itself never consults it.

use std::time::Duration;

use clavis_domain::CacheSettings;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;

/// Grants at most one refresh per key within the debounce window.
pub struct RefreshDebouncer {
    window: Duration,
    recent: Option<Cache<String, ()>>,
}

impl RefreshDebouncer {
    pub fn new(window: Duration, max_capacity: u64) -> Self {
        let recent = (!window.is_zero()).then(|| {
            Cache::builder()
                .max_capacity(max_capacity)
                .eviction_policy(EvictionPolicy::lru())
                .time_to_live(window)
                .build()
        });
        Self { window, recent }
    }

    pub fn from_settings(settings: &CacheSettings) -> Self {
        Self::new(settings.cache_refresh_debounce(), settings.cache_size)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// `true` if a refresh for `key` may start now.
    ///
    /// Claiming is atomic per key: among concurrent callers exactly one wins
    /// until the window elapses. A zero window never debounces.
    pub fn try_acquire(&self, key: &str) -> bool {
        match &self.recent {
            Some(recent) => recent.entry(key.to_string()).or_insert(()).is_fresh(),
            None => true,
        }
    }
}

impl std::fmt::Debug for RefreshDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshDebouncer").field("window", &self.window).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_second_refresh_within_window_is_rejected() {
        let debouncer = RefreshDebouncer::new(Duration::from_secs(60), 100);

        assert!(debouncer.try_acquire("digest-a"));
        assert!(!debouncer.try_acquire("digest-a"));
        assert!(debouncer.try_acquire("digest-b"));
    }

    #[test]
    fn test_refresh_allowed_after_window() {
        let debouncer = RefreshDebouncer::new(Duration::from_millis(100), 100);

        assert!(debouncer.try_acquire("digest-a"));
        thread::sleep(Duration::from_millis(250));
        assert!(debouncer.try_acquire("digest-a"));
    }

    #[test]
    fn test_new_key_is_debounced_at_capacity() {
        let debouncer = RefreshDebouncer::new(Duration::from_secs(60), 2);

        assert!(debouncer.try_acquire("digest-a"));
        assert!(debouncer.try_acquire("digest-b"));
        for _ in 0..20 {
            assert!(!debouncer.try_acquire("digest-a"));
            assert!(!debouncer.try_acquire("digest-b"));
        }

        assert!(debouncer.try_acquire("digest-c"));
        if let Some(recent) = &debouncer.recent {
            recent.run_pending_tasks();
        }
        assert!(!debouncer.try_acquire("digest-c"));
    }

    #[test]
    fn test_zero_window_never_debounces() {
        let debouncer = RefreshDebouncer::new(Duration::ZERO, 100);

        assert!(debouncer.try_acquire("digest-a"));
        assert!(debouncer.try_acquire("digest-a"));
    }

    #[test]
    fn test_from_settings_uses_debounce() {
        let debouncer = RefreshDebouncer::from_settings(&CacheSettings::default());
        assert_eq!(debouncer.window(), Duration::from_secs(5));
    }
}
