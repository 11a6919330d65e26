//! # Verification-Result Cache
//!
//! Keyed by signature id and shared by concurrently running checks. Racing
//! writers are allowed: two checks of the same proof may both miss and both
//! write. The cache only saves work, so last write wins.

use std::collections::HashMap;

use idtab_core::{ProofError, SigId, Timestamp};
use parking_lot::RwLock;

/// A recorded verification outcome and when it was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// `None` when the proof verified.
    pub status: Option<ProofError>,
    pub time: Timestamp,
}

impl CheckResult {
    pub fn new(outcome: &Result<(), ProofError>, time: Timestamp) -> Self {
        Self {
            status: outcome.as_ref().err().cloned(),
            time,
        }
    }

    pub fn outcome(&self) -> Result<(), ProofError> {
        match &self.status {
            None => Ok(()),
            Some(err) => Err(err.clone()),
        }
    }

    /// `[cached 2026-01-15T12:00:00Z]`
    pub fn to_display_string(&self) -> String {
        format!("[cached {}]", self.time)
    }
}

/// Concurrent store of verification outcomes.
pub trait ProofCache: Send + Sync {
    fn get(&self, sig_id: &SigId) -> Option<CheckResult>;

    fn put(&self, sig_id: &SigId, outcome: &Result<(), ProofError>);
}

/// Process-local cache with a freshness bound.
#[derive(Debug)]
pub struct MemoryProofCache {
    entries: RwLock<HashMap<SigId, CheckResult>>,
    ttl_secs: u64,
}

impl MemoryProofCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl_secs,
        }
    }

    /// Store a result with an explicit record time.
    pub fn insert(&self, sig_id: SigId, result: CheckResult) {
        self.entries.write().insert(sig_id, result);
    }

    /// Look up a result that is still fresh at `now`. An expired entry is
    /// evicted.
    pub fn get_at(&self, sig_id: &SigId, now: Timestamp) -> Option<CheckResult> {
        {
            let entries = self.entries.read();
            let hit = entries.get(sig_id)?;
            if !self.is_stale(hit, now) {
                return Some(hit.clone());
            }
        }

        let mut entries = self.entries.write();
        // A concurrent put may have refreshed it since the read.
        if entries.get(sig_id).is_some_and(|hit| self.is_stale(hit, now)) {
            entries.remove(sig_id);
            tracing::debug!(sig_id = %sig_id, "evicted expired cached result");
        }
        None
    }

    fn is_stale(&self, hit: &CheckResult, now: Timestamp) -> bool {
        hit.time.secs_until(now) > self.ttl_secs
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ProofCache for MemoryProofCache {
    fn get(&self, sig_id: &SigId) -> Option<CheckResult> {
        self.get_at(sig_id, Timestamp::now())
    }

    fn put(&self, sig_id: &SigId, outcome: &Result<(), ProofError>) {
        self.insert(sig_id.clone(), CheckResult::new(outcome, Timestamp::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idtab_core::ProofStatus;

    fn sid(s: &str) -> SigId {
        SigId::parse(s).unwrap()
    }

    fn at(secs: i64) -> Timestamp {
        Timestamp::from_epoch_secs(secs).unwrap()
    }

    #[test]
    fn test_put_then_get() {
        let cache = MemoryProofCache::new(60);
        let err = ProofError::new(ProofStatus::NotFound, "gone");
        cache.put(&sid("a1"), &Err(err.clone()));
        cache.put(&sid("a2"), &Ok(()));
        assert_eq!(cache.get(&sid("a1")).unwrap().outcome(), Err(err));
        assert_eq!(cache.get(&sid("a2")).unwrap().outcome(), Ok(()));
        assert!(cache.get(&sid("a3")).is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_expired_entry_is_absent() {
        let cache = MemoryProofCache::new(60);
        cache.insert(sid("a1"), CheckResult::new(&Ok(()), at(1_000)));
        assert!(cache.get_at(&sid("a1"), at(1_060)).is_some());
        assert!(cache.get_at(&sid("a1"), at(1_061)).is_none());
    }

    #[test]
    fn test_expired_read_evicts_entry() {
        let cache = MemoryProofCache::new(60);
        cache.insert(sid("a1"), CheckResult::new(&Ok(()), at(1_000)));
        cache.insert(sid("a2"), CheckResult::new(&Ok(()), at(1_050)));

        assert!(cache.get_at(&sid("a1"), at(1_100)).is_none());
        assert_eq!(cache.len(), 1);
        assert!(cache.get_at(&sid("a2"), at(1_100)).is_some());

        cache.insert(sid("a1"), CheckResult::new(&Ok(()), at(1_100)));
        assert!(cache.get_at(&sid("a1"), at(1_100)).is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_later_put_overwrites() {
        let cache = MemoryProofCache::new(60);
        cache.put(&sid("a1"), &Err(ProofError::new(ProofStatus::Timeout, "slow")));
        cache.put(&sid("a1"), &Ok(()));
        assert_eq!(cache.get(&sid("a1")).unwrap().status, None);
    }

    #[test]
    fn test_display_string() {
        let r = CheckResult::new(&Ok(()), at(1_400_000_000));
        assert_eq!(r.to_display_string(), "[cached 2014-05-13T16:53:20Z]");
    }
}
