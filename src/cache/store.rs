// In-process cache slots.
// Holds one value per logical key, with sliding/absolute expiration checking
// and a per-slot gate that serializes get-or-populate.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Result, RosterError};

/// Expiration policy for one cache slot.
#[derive(Debug, Clone, Copy)]
pub struct ExpiryPolicy {
    /// Window extended on each hit. `None` disables the sliding check.
    pub sliding: Option<Duration>,
    /// Ceiling measured from insertion, unaffected by hits.
    pub absolute: Option<Duration>,
}

impl ExpiryPolicy {
    /// Entries never expire.
    pub const KEEP: Self = Self {
        sliding: None,
        absolute: None,
    };

    /// Entries expire `sliding` after the last hit, and `absolute` after
    /// insertion no matter how recently they were hit.
    pub fn expiring(sliding: Duration, absolute: Duration) -> Self {
        Self {
            sliding: Some(sliding),
            absolute: Some(absolute),
        }
    }
}

/// Stored value plus the timestamps expiry checks run against.
#[derive(Debug)]
struct Entry<T> {
    value: Arc<T>,
    inserted_at: DateTime<Utc>,
    last_access: DateTime<Utc>,
}

impl<T> Entry<T> {
    fn new(value: Arc<T>, now: DateTime<Utc>) -> Self {
        Self {
            value,
            inserted_at: now,
            last_access: now,
        }
    }

    /// Check this entry against a policy. A clock that moved backwards
    /// reads as expired.
    fn is_expired(&self, policy: &ExpiryPolicy, now: DateTime<Utc>) -> bool {
        if let Some(absolute) = policy.absolute {
            if elapsed(self.inserted_at, now) > absolute {
                return true;
            }
        }
        if let Some(sliding) = policy.sliding {
            if elapsed(self.last_access, now) > sliding {
                return true;
            }
        }
        false
    }
}

/// Wall time elapsed since `since`.
fn elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    now.signed_duration_since(since)
        .to_std()
        .unwrap_or(Duration::MAX)
}

/// Cache slot for one logical key.
pub struct Slot<T> {
    name: &'static str,
    policy: ExpiryPolicy,
    entry: Mutex<Option<Entry<T>>>,
    /// Serializes populations of this slot; plain hits never touch it.
    gate: Mutex<()>,
}

impl<T> Slot<T> {
    pub fn new(name: &'static str, policy: ExpiryPolicy) -> Self {
        Self {
            name,
            policy,
            entry: Mutex::new(None),
            gate: Mutex::new(()),
        }
    }

    /// Get the cached value if present and unexpired. A hit extends the
    /// sliding window; an expired entry is evicted.
    pub async fn get(&self) -> Option<Arc<T>> {
        let mut slot = self.entry.lock().await;
        let now = Utc::now();
        match slot.as_mut() {
            Some(entry) if !entry.is_expired(&self.policy, now) => {
                entry.last_access = now;
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!(slot = self.name, "cache entry expired");
                *slot = None;
                None
            }
            None => None,
        }
    }

    /// Store a value, replacing whatever the slot held.
    pub async fn insert(&self, value: T) -> Arc<T> {
        let shared = Arc::new(value);
        let mut slot = self.entry.lock().await;
        *slot = Some(Entry::new(shared.clone(), Utc::now()));
        shared
    }

    /// Drop the slot's entry.
    pub async fn invalidate(&self) {
        *self.entry.lock().await = None;
    }

    /// Get the cached value, awaiting `init` to populate the slot on a
    /// miss; on a hit `init` is dropped unpolled.
    ///
    /// Populations are serialized behind the slot's gate: a concurrent
    /// caller either observes the cached value or waits for the single
    /// in-flight population instead of starting its own. The gate wait races
    /// against `cancel`, and the guard drops on every exit path. An `init`
    /// error leaves the slot empty.
    pub async fn get_or_populate<Fut>(
        &self,
        cancel: &CancellationToken,
        init: Fut,
    ) -> Result<Arc<T>>
    where
        Fut: Future<Output = Result<T>>,
    {
        if cancel.is_cancelled() {
            return Err(RosterError::Cancelled);
        }

        let _gate = tokio::select! {
            guard = self.gate.lock() => guard,
            _ = cancel.cancelled() => return Err(RosterError::Cancelled),
        };

        if let Some(hit) = self.get().await {
            debug!(slot = self.name, "cache hit");
            return Ok(hit);
        }

        debug!(slot = self.name, "cache miss, populating");
        let value = init.await?;
        Ok(self.insert(value).await)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_keep_policy_never_expires() {
        let now = Utc::now();
        let entry = Entry::new(Arc::new(1u32), now - chrono::Duration::days(365));
        assert!(!entry.is_expired(&ExpiryPolicy::KEEP, now));
    }

    #[test]
    fn test_sliding_expiry() {
        let policy =
            ExpiryPolicy::expiring(Duration::from_secs(300), Duration::from_secs(3600));
        let now = Utc::now();

        let mut entry = Entry::new(Arc::new(1u32), now - chrono::Duration::seconds(600));
        assert!(entry.is_expired(&policy, now));

        // A recent hit keeps the entry alive.
        entry.last_access = now - chrono::Duration::seconds(60);
        assert!(!entry.is_expired(&policy, now));
    }

    #[test]
    fn test_absolute_ceiling_caps_touches() {
        let policy =
            ExpiryPolicy::expiring(Duration::from_secs(300), Duration::from_secs(3600));
        let now = Utc::now();

        // Inserted past the ceiling; even a fresh hit cannot save it.
        let mut entry = Entry::new(Arc::new(1u32), now - chrono::Duration::seconds(4000));
        entry.last_access = now;
        assert!(entry.is_expired(&policy, now));
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let slot = Slot::new("test", ExpiryPolicy::KEEP);
        assert!(slot.get().await.is_none());

        slot.insert(42u32).await;
        assert_eq!(slot.get().await.as_deref(), Some(&42));

        slot.invalidate().await;
        assert!(slot.get().await.is_none());
    }

    #[tokio::test]
    async fn test_hit_extends_sliding_window() {
        let slot = Slot::new(
            "test",
            ExpiryPolicy::expiring(Duration::from_secs(300), Duration::from_secs(3600)),
        );
        slot.insert(5u32).await;

        {
            let mut entry = slot.entry.lock().await;
            entry.as_mut().unwrap().last_access = Utc::now() - chrono::Duration::seconds(200);
        }

        assert!(slot.get().await.is_some());

        let entry = slot.entry.lock().await;
        let touched = entry.as_ref().unwrap().last_access;
        assert!(elapsed(touched, Utc::now()) < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_expired_entry_evicted() {
        let slot = Slot::new(
            "test",
            ExpiryPolicy::expiring(Duration::from_secs(300), Duration::from_secs(3600)),
        );
        slot.insert(5u32).await;

        {
            let mut entry = slot.entry.lock().await;
            let stale = Utc::now() - chrono::Duration::seconds(600);
            entry.as_mut().unwrap().last_access = stale;
        }

        assert!(slot.get().await.is_none());
        assert!(slot.entry.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_populate_single_flight() {
        let slot = Slot::new("test", ExpiryPolicy::KEEP);
        let calls = AtomicUsize::new(0);
        let cancel = CancellationToken::new();

        let (first, second) = tokio::join!(
            slot.get_or_populate(&cancel, async {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(7u32)
            }),
            slot.get_or_populate(&cancel, async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(8u32)
            }),
        );

        // The second caller waited on the gate and saw the first result.
        assert_eq!(*first.unwrap(), 7);
        assert_eq!(*second.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_populate_error_leaves_slot_empty() {
        let slot: Slot<u32> = Slot::new("test", ExpiryPolicy::KEEP);
        let cancel = CancellationToken::new();

        let result = slot
            .get_or_populate(&cancel, async { Err(RosterError::Cancelled) })
            .await;
        assert!(result.is_err());
        assert!(slot.get().await.is_none());
    }

    #[tokio::test]
    async fn test_populate_cancelled_before_gate() {
        let slot: Slot<u32> = Slot::new("test", ExpiryPolicy::KEEP);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = slot.get_or_populate(&cancel, async { Ok(1u32) }).await;
        assert!(matches!(result, Err(RosterError::Cancelled)));
        assert!(slot.get().await.is_none());
    }
}
