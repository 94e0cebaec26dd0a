use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use ordered_float::OrderedFloat;

use crate::distance::euclidean;
use crate::node::Node;
use crate::types::{Candidate, PointId};

/// Reusable scratch state for a bounded best-first traversal of a single
/// layer (spec §4.3).
///
/// `nearest` is the working set `W`: always kept sorted ascending by
/// distance and capped at `ef` entries — both the frontier's filter and
/// the final result. `candidates` is the (unbounded) frontier of nodes
/// still to expand, ordered so the nearest-to-query is popped first.
/// `visited` ensures each node is distance-evaluated at most once per
/// call. Reused across calls (reset between them) to avoid reallocating
/// on every insertion and every query.
pub(crate) struct Search {
    visited: HashSet<PointId>,
    candidates: BinaryHeap<Reverse<Candidate>>,
    nearest: Vec<Candidate>,
}

impl Search {
    pub(crate) fn new() -> Self {
        Self {
            visited: HashSet::new(),
            candidates: BinaryHeap::new(),
            nearest: Vec::new(),
        }
    }

    fn reset(&mut self) {
        self.visited.clear();
        self.candidates.clear();
        self.nearest.clear();
    }

    /// Distance-evaluate `pid` against `point` exactly once and, if it
    /// belongs in the working set, insert it in sorted position.
    fn push(&mut self, pid: PointId, point: &[f32], nodes: &[Node], ef: usize) {
        if !self.visited.insert(pid) {
            return;
        }
        let distance = OrderedFloat(euclidean(point, &nodes[pid.index()].data));
        let candidate = Candidate { distance, pid };

        let idx = self.nearest.partition_point(|c| c.distance <= candidate.distance);
        if idx >= ef {
            return;
        }
        self.nearest.insert(idx, candidate);
        self.nearest.truncate(ef);
        self.candidates.push(Reverse(candidate));
    }

    /// Bounded best-first traversal of `layer` starting from `start`,
    /// toward `point`, retaining at most `ef` candidates.
    ///
    /// Implements spec §4.3: the working set doubles as frontier filter
    /// and result; each visited node is expanded exactly once; traversal
    /// ends once the frontier is exhausted or its nearest remaining
    /// candidate is farther than the current worst retained result.
    pub(crate) fn layer_search(
        &mut self,
        point: &[f32],
        start: PointId,
        nodes: &[Node],
        layer: usize,
        ef: usize,
    ) -> &[Candidate] {
        let ef = ef.max(1);
        self.reset();
        self.push(start, point, nodes, ef);

        while let Some(Reverse(current)) = self.candidates.pop() {
            if let Some(furthest) = self.nearest.last() {
                if self.nearest.len() >= ef && current.distance > furthest.distance {
                    break;
                }
            }

            let node = &nodes[current.pid.index()];
            if layer >= node.neighbors.len() {
                continue;
            }
            for &neighbor in &node.neighbors[layer] {
                self.push(neighbor, point, nodes, ef);
            }
        }

        &self.nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PointId as Pid;

    fn node(id: u32, data: Vec<f32>) -> Node {
        Node::new(Pid::new(id as usize), data, 0)
    }

    #[test]
    fn single_node_with_no_neighbors_returns_itself() {
        let nodes = vec![node(0, vec![0.0, 0.0])];
        let mut search = Search::new();
        let result = search.layer_search(&[1.0, 1.0], Pid::new(0), &nodes, 0, 5);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].pid, Pid::new(0));
    }

    #[test]
    fn expands_into_connected_neighbors() {
        let mut nodes = vec![
            node(0, vec![0.0, 0.0]),
            node(1, vec![1.0, 0.0]),
            node(2, vec![5.0, 5.0]),
        ];
        nodes[0].neighbors[0].push(Pid::new(1));
        nodes[1].neighbors[0].push(Pid::new(0));
        nodes[1].neighbors[0].push(Pid::new(2));
        nodes[2].neighbors[0].push(Pid::new(1));

        let mut search = Search::new();
        let result = search.layer_search(&[0.1, 0.1], Pid::new(0), &nodes, 0, 10);
        let ids: Vec<_> = result.iter().map(|c| c.pid).collect();
        assert!(ids.contains(&Pid::new(0)));
        assert!(ids.contains(&Pid::new(1)));
        assert!(ids.contains(&Pid::new(2)));
    }

    #[test]
    fn truncates_to_ef() {
        let mut nodes: Vec<_> = (0..10).map(|i| node(i, vec![i as f32, 0.0])).collect();
        for i in 0..9u32 {
            nodes[i as usize].neighbors[0].push(Pid::new((i + 1) as usize));
            nodes[(i + 1) as usize].neighbors[0].push(Pid::new(i as usize));
        }
        let mut search = Search::new();
        let result = search.layer_search(&[0.0, 0.0], Pid::new(0), &nodes, 0, 3);
        assert_eq!(result.len(), 3);
        assert!(result.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn result_sorted_ascending_by_distance() {
        let nodes: Vec<_> = (0..6).map(|i| node(i, vec![i as f32])).collect();
        let mut nodes = nodes;
        for i in 0..5u32 {
            nodes[i as usize].neighbors[0].push(Pid::new((i + 1) as usize));
            nodes[(i + 1) as usize].neighbors[0].push(Pid::new(i as usize));
        }
        let mut search = Search::new();
        let result = search.layer_search(&[2.1], Pid::new(0), &nodes, 0, 6);
        for window in result.windows(2) {
            assert!(window[0].distance <= window[1].distance);
        }
    }
}
