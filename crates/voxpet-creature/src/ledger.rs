//! Mesh resource ledger
//!
//! Every primitive box allocated for the creature, food or waste takes a
//! handle here and gives it back when its owner is removed. Releasing is
//! idempotent, so a double teardown cannot corrupt the count.

use ahash::AHashSet;

use crate::types::EntityId;

/// Tracks live mesh handles
#[derive(Debug, Default)]
pub struct MeshLedger {
    live: AHashSet<EntityId>,
    allocated_total: u64,
}

impl MeshLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new mesh handle
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId::new();
        self.live.insert(id);
        self.allocated_total += 1;
        id
    }

    /// Release a handle; returns false if it was already released
    pub fn release(&mut self, id: EntityId) -> bool {
        self.live.remove(&id)
    }

    /// Release every handle in `ids`, returning how many were live
    pub fn release_all(&mut self, ids: impl IntoIterator<Item = EntityId>) -> usize {
        ids.into_iter().filter(|id| self.release(*id)).count()
    }

    /// Number of handles currently allocated
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Whether a handle is still live
    pub fn is_live(&self, id: EntityId) -> bool {
        self.live.contains(&id)
    }

    /// Handles allocated over the ledger's lifetime
    pub fn allocated_total(&self) -> u64 {
        self.allocated_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_release() {
        let mut ledger = MeshLedger::new();
        let a = ledger.alloc();
        let b = ledger.alloc();
        assert_eq!(ledger.live_count(), 2);

        assert!(ledger.release(a));
        assert!(!ledger.release(a));
        assert_eq!(ledger.live_count(), 1);
        assert!(ledger.is_live(b));
        assert_eq!(ledger.allocated_total(), 2);
    }

    #[test]
    fn test_release_all_counts_only_live() {
        let mut ledger = MeshLedger::new();
        let ids: Vec<_> = (0..4).map(|_| ledger.alloc()).collect();
        ledger.release(ids[0]);
        assert_eq!(ledger.release_all(ids.iter().copied()), 3);
        assert_eq!(ledger.live_count(), 0);
    }
}
