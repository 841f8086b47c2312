//! Cluster storage with stable handles
//!
//! Clusters live in append-only slots. Removing a cluster tombstones its slot
//! instead of shifting the others, so a [`ClusterId`] taken before a removal
//! still refers to the same slot afterwards and can be checked for liveness.

use crate::core::TermIndex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A set of term indices, iterated in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cluster {
    members: BTreeSet<TermIndex>,
}

impl Cluster {
    pub fn singleton(term: TermIndex) -> Self {
        Self {
            members: BTreeSet::from([term]),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, term: TermIndex) -> bool {
        self.members.contains(&term)
    }

    /// Returns `false` if the term was already a member.
    pub fn insert(&mut self, term: TermIndex) -> bool {
        self.members.insert(term)
    }

    /// Union `other`'s members into this cluster.
    pub fn absorb(&mut self, other: Cluster) {
        self.members.extend(other.members);
    }

    pub fn iter(&self) -> impl Iterator<Item = TermIndex> + '_ {
        self.members.iter().copied()
    }

    pub fn members(&self) -> Vec<TermIndex> {
        self.iter().collect()
    }
}

impl FromIterator<TermIndex> for Cluster {
    fn from_iter<I: IntoIterator<Item = TermIndex>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

/// Opaque handle to a slot in a [`ClusterArena`]. Handles order by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ClusterId(usize);

impl ClusterId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The evolving cluster collection of one run.
#[derive(Debug, Clone, Default)]
pub struct ClusterArena {
    slots: Vec<Option<Cluster>>,
    live: usize,
}

impl ClusterArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cluster: Cluster) -> ClusterId {
        let id = ClusterId(self.slots.len());
        self.slots.push(Some(cluster));
        self.live += 1;
        id
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn is_live(&self, id: ClusterId) -> bool {
        self.get(id).is_some()
    }

    /// Tombstone the slot and hand back its cluster.
    pub fn remove(&mut self, id: ClusterId) -> Option<Cluster> {
        let removed = self.slots.get_mut(id.0).and_then(Option::take);
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    /// Move `source`'s members into `target` and retire `source`.
    ///
    /// Returns `false` and changes nothing if the handles are equal or either is dead.
    pub fn merge_into(&mut self, target: ClusterId, source: ClusterId) -> bool {
        if target == source || !self.is_live(target) || !self.is_live(source) {
            return false;
        }
        let Some(absorbed) = self.remove(source) else {
            return false;
        };
        match self.slots.get_mut(target.0).and_then(Option::as_mut) {
            Some(cluster) => {
                cluster.absorb(absorbed);
                true
            }
            None => false,
        }
    }

    /// Live handles in creation order.
    pub fn ids(&self) -> Vec<ClusterId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Live clusters in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ClusterId, &Cluster)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|cluster| (ClusterId(index), cluster)))
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Freeze into the live clusters, creation order.
    pub fn into_clusters(self) -> Vec<Cluster> {
        self.slots.into_iter().flatten().collect()
    }
}

impl FromIterator<Cluster> for ClusterArena {
    fn from_iter<I: IntoIterator<Item = Cluster>>(iter: I) -> Self {
        let mut arena = Self::new();
        for cluster in iter {
            arena.insert(cluster);
        }
        arena
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_survive_removal() {
        let mut arena = ClusterArena::new();
        let a = arena.insert(Cluster::singleton(0));
        let b = arena.insert(Cluster::singleton(1));
        let c = arena.insert(Cluster::singleton(2));

        assert!(arena.remove(b).is_some());
        assert!(!arena.is_live(b));
        assert_eq!(arena.get(c), Some(&Cluster::singleton(2)));
        assert_eq!(arena.ids(), vec![a, c]);
        assert_eq!(arena.len(), 2);
        assert!(arena.remove(b).is_none());
    }

    #[test]
    fn test_merge_into_unions_and_retires_source() {
        let mut arena: ClusterArena = [Cluster::from_iter([0, 1]), Cluster::from_iter([1, 2])]
            .into_iter()
            .collect();
        let ids = arena.ids();

        assert!(arena.merge_into(ids[0], ids[1]));
        assert_eq!(arena.get(ids[0]).unwrap().members(), vec![0, 1, 2]);
        assert!(!arena.is_live(ids[1]));
        assert!(!arena.merge_into(ids[0], ids[1]));
        assert!(!arena.merge_into(ids[0], ids[0]));
    }

    #[test]
    fn test_into_clusters_keeps_creation_order() {
        let mut arena = ClusterArena::new();
        let first = arena.insert(Cluster::singleton(5));
        arena.insert(Cluster::singleton(3));
        arena.remove(first);
        assert_eq!(arena.into_clusters(), vec![Cluster::singleton(3)]);
    }

    #[test]
    fn test_ids_order_by_creation() {
        let mut arena = ClusterArena::new();
        let a = arena.insert(Cluster::singleton(9));
        let b = arena.insert(Cluster::singleton(1));
        assert!(a < b);
        assert_eq!(b.index(), 1);
    }
}
