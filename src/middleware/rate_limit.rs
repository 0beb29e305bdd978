//! Rate limiting middleware
//!
//! Fixed-window request counting per client identifier. A client may make
//! `limit` requests per window; the count resets once more than `window` has
//! passed since the window opened. A burst at the end of one window followed
//! by a burst at the start of the next is allowed, which is the usual
//! coarseness of a fixed window.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use log::debug;

use crate::error::GateError;
use crate::gate::Timestamp;

/// Counter state for one client identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRecord {
    pub count: u32,
    pub window_start: Timestamp,
    pub last_seen: Timestamp,
}

impl RateRecord {
    fn start(now: Timestamp) -> Self {
        Self {
            count: 1,
            window_start: now,
            last_seen: now,
        }
    }

    /// True once strictly more than `window` has passed since the window opened.
    pub fn window_elapsed(&self, now: Timestamp, window: Duration) -> bool {
        now.saturating_since(self.window_start) > window
    }
}

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed { count: u32 },
    Limited { count: u32 },
}

impl Admission {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Admission::Allowed { .. })
    }
}

/// Storage for rate-limit counters.
///
/// `increment` must be atomic per key: the read, compare and write happen as
/// one step, otherwise concurrent callers sharing a key could be admitted past
/// the limit. A shared backend (a networked key-value store with atomic
/// increment-and-expire) can implement this for multi-instance deployments.
pub trait RateStore: Send + Sync {
    /// Counts a request for `key` unless its current window is full.
    /// A limited call leaves the record untouched.
    fn increment(
        &self,
        key: &str,
        now: Timestamp,
        window: Duration,
        limit: u32,
    ) -> Result<Admission, GateError>;

    fn reset(&self, key: &str) -> Result<(), GateError>;

    fn record(&self, key: &str) -> Result<Option<RateRecord>, GateError>;

    fn tracked(&self) -> Result<usize, GateError>;

    /// Drops records whose window has elapsed. Returns how many were removed.
    fn sweep(&self, _now: Timestamp, _window: Duration) -> Result<usize, GateError> {
        Ok(0)
    }
}

/// Process-local rate store bounded to `max_tracked_clients` identifiers.
pub struct InMemoryRateStore {
    records: Mutex<HashMap<String, RateRecord>>,
    max_tracked_clients: usize,
}

impl InMemoryRateStore {
    pub fn new(max_tracked_clients: usize) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            max_tracked_clients: max_tracked_clients.max(1),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, RateRecord>>, GateError> {
        self.records
            .lock()
            .map_err(|e| GateError::RegistryUnavailable(e.to_string()))
    }

    /// Frees a slot for a new identifier: expired records go first, then the
    /// least recently admitted one.
    fn make_room(&self, records: &mut HashMap<String, RateRecord>, now: Timestamp, window: Duration) {
        if records.len() < self.max_tracked_clients {
            return;
        }

        let before = records.len();
        records.retain(|_, record| !record.window_elapsed(now, window));
        if records.len() < before {
            debug!("Dropped {} expired rate records", before - records.len());
        }

        while records.len() >= self.max_tracked_clients {
            let oldest = records
                .iter()
                .min_by_key(|(_, record)| record.last_seen)
                .map(|(key, _)| key.clone());

            match oldest {
                Some(key) => {
                    records.remove(&key);
                    debug!("Evicted rate record for {}", key);
                }
                None => break,
            }
        }
    }
}

impl Default for InMemoryRateStore {
    fn default() -> Self {
        Self::new(10_000)
    }
}

impl RateStore for InMemoryRateStore {
    fn increment(
        &self,
        key: &str,
        now: Timestamp,
        window: Duration,
        limit: u32,
    ) -> Result<Admission, GateError> {
        let mut records = self.lock()?;

        if let Some(record) = records.get_mut(key) {
            if record.window_elapsed(now, window) {
                *record = RateRecord::start(now);
                return Ok(Admission::Allowed { count: 1 });
            }

            if record.count >= limit {
                return Ok(Admission::Limited {
                    count: record.count,
                });
            }

            record.count += 1;
            record.last_seen = now;
            return Ok(Admission::Allowed {
                count: record.count,
            });
        }

        self.make_room(&mut records, now, window);
        records.insert(key.to_string(), RateRecord::start(now));
        Ok(Admission::Allowed { count: 1 })
    }

    fn reset(&self, key: &str) -> Result<(), GateError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn record(&self, key: &str) -> Result<Option<RateRecord>, GateError> {
        Ok(self.lock()?.get(key).copied())
    }

    fn tracked(&self) -> Result<usize, GateError> {
        Ok(self.lock()?.len())
    }

    fn sweep(&self, now: Timestamp, window: Duration) -> Result<usize, GateError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|_, record| !record.window_elapsed(now, window));
        Ok(before - records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    const WINDOW: Duration = Duration::from_secs(60);

    fn at(secs: u64) -> Timestamp {
        Timestamp::from_secs(secs)
    }

    #[test]
    fn test_first_request_creates_record() {
        let store = InMemoryRateStore::default();
        let admission = store.increment("1.2.3.4", at(10), WINDOW, 5).unwrap();
        assert_eq!(admission, Admission::Allowed { count: 1 });

        let record = store.record("1.2.3.4").unwrap().unwrap();
        assert_eq!(record.count, 1);
        assert_eq!(record.window_start, at(10));
    }

    #[test]
    fn test_limit_reached_within_window() {
        let store = InMemoryRateStore::default();
        for expected in 1..=5 {
            let admission = store.increment("a", at(0), WINDOW, 5).unwrap();
            assert_eq!(admission, Admission::Allowed { count: expected });
        }
        let admission = store.increment("a", at(30), WINDOW, 5).unwrap();
        assert_eq!(admission, Admission::Limited { count: 5 });
    }

    #[test]
    fn test_limited_call_leaves_record_untouched() {
        let store = InMemoryRateStore::default();
        for _ in 0..5 {
            store.increment("a", at(0), WINDOW, 5).unwrap();
        }
        let before = store.record("a").unwrap();
        store.increment("a", at(20), WINDOW, 5).unwrap();
        assert_eq!(store.record("a").unwrap(), before);
    }

    #[test]
    fn test_window_boundary_is_exclusive() {
        let store = InMemoryRateStore::default();
        for _ in 0..5 {
            store.increment("a", at(0), WINDOW, 5).unwrap();
        }
        // exactly one window later still belongs to the old window
        let admission = store.increment("a", at(60), WINDOW, 5).unwrap();
        assert!(!admission.is_allowed());

        let admission = store
            .increment("a", Timestamp::from_millis(60_001), WINDOW, 5)
            .unwrap();
        assert_eq!(admission, Admission::Allowed { count: 1 });
    }

    #[test]
    fn test_window_reset_replaces_count() {
        let store = InMemoryRateStore::default();
        for _ in 0..5 {
            store.increment("a", at(0), WINDOW, 5).unwrap();
        }
        store.increment("a", at(61), WINDOW, 5).unwrap();
        let record = store.record("a").unwrap().unwrap();
        assert_eq!(record.count, 1);
        assert_eq!(record.window_start, at(61));
    }

    #[test]
    fn test_reset_forgets_client() {
        let store = InMemoryRateStore::default();
        for _ in 0..5 {
            store.increment("a", at(0), WINDOW, 5).unwrap();
        }
        store.reset("a").unwrap();
        assert!(store.record("a").unwrap().is_none());
        assert!(store.increment("a", at(1), WINDOW, 5).unwrap().is_allowed());
    }

    #[test]
    fn test_capacity_evicts_expired_records_first() {
        let store = InMemoryRateStore::new(2);
        store.increment("old", at(0), WINDOW, 5).unwrap();
        store.increment("fresh", at(100), WINDOW, 5).unwrap();
        store.increment("new", at(110), WINDOW, 5).unwrap();

        assert_eq!(store.tracked().unwrap(), 2);
        assert!(store.record("old").unwrap().is_none());
        assert!(store.record("fresh").unwrap().is_some());
        assert!(store.record("new").unwrap().is_some());
    }

    #[test]
    fn test_capacity_evicts_least_recently_admitted() {
        let store = InMemoryRateStore::new(2);
        store.increment("a", at(0), WINDOW, 5).unwrap();
        store.increment("b", at(1), WINDOW, 5).unwrap();
        store.increment("a", at(2), WINDOW, 5).unwrap();
        store.increment("c", at(3), WINDOW, 5).unwrap();

        assert!(store.record("a").unwrap().is_some());
        assert!(store.record("b").unwrap().is_none());
        assert!(store.record("c").unwrap().is_some());
    }

    #[test]
    fn test_sweep_drops_only_expired() {
        let store = InMemoryRateStore::default();
        store.increment("stale", at(0), WINDOW, 5).unwrap();
        store.increment("live", at(50), WINDOW, 5).unwrap();

        let removed = store.sweep(at(70), WINDOW).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.tracked().unwrap(), 1);
        assert!(store.record("live").unwrap().is_some());
    }

    #[test]
    fn test_concurrent_increments_never_exceed_limit() {
        let store = Arc::new(InMemoryRateStore::default());
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.increment("shared", at(0), WINDOW, 5).unwrap())
            })
            .collect();

        let allowed = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(Admission::is_allowed)
            .count();
        assert_eq!(allowed, 5);
        assert_eq!(store.record("shared").unwrap().unwrap().count, 5);
    }
}
