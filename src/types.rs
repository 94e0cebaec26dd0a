use std::cmp::Ordering;

use ordered_float::OrderedFloat;

/// A stable, dense identifier for a point stored in an [`crate::Hnsw`](crate::Hnsw).
///
/// Equal to the point's position in the facade's node collection (spec
/// invariant: `nodes[i].id == i`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub(crate) u32);

impl PointId {
    pub(crate) fn new(idx: usize) -> Self {
        assert!(idx <= u32::MAX as usize, "index space exhausted");
        PointId(idx as u32)
    }

    /// This id's position in the index's node collection.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A candidate considered during a layer search: a point together with its
/// distance to the query/target that produced it.
///
/// Ordered by distance so it can live in a [`std::collections::BinaryHeap`]
/// or be sorted directly; ties between equal distances are broken by
/// `PointId` so that orderings are deterministic given a stable insertion
/// order, matching spec's "ties are broken arbitrarily but deterministically".
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub distance: OrderedFloat<f32>,
    pub pid: PointId,
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .cmp(&other.distance)
            .then_with(|| self.pid.cmp(&other.pid))
    }
}

/// One fully-formed search result: the queried distance and the stored
/// point behind it.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    pub distance: f32,
    pub pid: PointId,
    pub point: Vec<f32>,
}
