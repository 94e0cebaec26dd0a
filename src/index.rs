use tracing::{debug, trace_span};

use crate::distance::euclidean;
use crate::error::{Error, Result};
use crate::level::LevelSampler;
use crate::node::Node;
use crate::search::Search;
use crate::types::{PointId, SearchResult};

/// Parameters for building an [`Hnsw`] index.
///
/// Mirrors the teacher's own builder: a small set of chained setters
/// followed by a validating [`Builder::build`].
#[derive(Clone, Debug)]
pub struct Builder {
    m: usize,
    ef_construction: usize,
    ml: f32,
    seed: u64,
}

impl Builder {
    /// Fan-out cap per layer per node (`M` from the paper).
    pub fn m(mut self, m: usize) -> Self {
        self.m = m;
        self
    }

    /// Candidate breadth used while connecting a newly inserted node
    /// (`efConstruction` from the paper).
    pub fn ef_construction(mut self, ef_construction: usize) -> Self {
        self.ef_construction = ef_construction;
        self
    }

    /// Level sampler multiplier (`mL` from the paper). Larger values grow
    /// a taller hierarchy on average.
    pub fn ml(mut self, ml: f32) -> Self {
        self.ml = ml;
        self
    }

    /// Seed for the level sampler's random state, for reproducible tests.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the accumulated parameters and build an empty [`Hnsw`].
    pub fn build(self) -> Result<Hnsw> {
        if self.m == 0 {
            return Err(Error::InvalidParameter {
                field: "m",
                reason: "must be positive",
            });
        }
        if self.ef_construction == 0 {
            return Err(Error::InvalidParameter {
                field: "ef_construction",
                reason: "must be positive",
            });
        }
        if !(self.ml > 0.0) {
            return Err(Error::InvalidParameter {
                field: "ml",
                reason: "must be positive",
            });
        }

        Ok(Hnsw {
            m: self.m,
            ef_construction: self.ef_construction,
            sampler: LevelSampler::new(self.ml, self.seed),
            nodes: Vec::new(),
            entry_point: None,
            current_max_level: 0,
            dimension: None,
            search: Search::new(),
        })
    }
}

impl Default for Builder {
    /// `mL` defaults to 0.62, per the reference's default; the reference
    /// driver itself instead uses 0.5 (see `demos/recall_bench.rs`).
    fn default() -> Self {
        Self {
            m: 16,
            ef_construction: 200,
            ml: 0.62,
            seed: rand::random(),
        }
    }
}

/// An in-memory hierarchical navigable small-world index over
/// fixed-dimension points under Euclidean distance.
///
/// Single-writer, single-reader: there is no interior synchronization,
/// and interleaving `insert` and `search` from different threads is not
/// defined (spec §5).
pub struct Hnsw {
    m: usize,
    ef_construction: usize,
    sampler: LevelSampler,
    nodes: Vec<Node>,
    entry_point: Option<PointId>,
    current_max_level: usize,
    dimension: Option<usize>,
    search: Search,
}

impl Hnsw {
    /// Start building an index with the reference's default parameters
    /// (`M = 16`, `efConstruction = 200`, `mL = 0.62`).
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Number of points currently stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no point has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over every stored point and its id, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (PointId, &[f32])> {
        self.nodes.iter().map(|n| (n.id, n.data.as_slice()))
    }

    /// A node's per-layer adjacency, indexed `[layer]`. Exposed for
    /// invariant checks and debugging; not part of the query path.
    pub fn neighbors(&self, pid: PointId) -> &[Vec<PointId>] {
        &self.nodes[pid.index()].neighbors
    }

    fn check_dimension(&mut self, point: &[f32]) -> Result<()> {
        match self.dimension {
            Some(expected) if expected != point.len() => Err(Error::DimensionMismatch {
                expected,
                actual: point.len(),
            }),
            Some(_) => Ok(()),
            None => {
                self.dimension = Some(point.len());
                Ok(())
            }
        }
    }

    /// Insert `point` into the index, per spec §4.4.
    ///
    /// Returns the new point's stable [`PointId`], equal to its position
    /// in the node collection.
    pub fn insert(&mut self, point: Vec<f32>) -> Result<PointId> {
        let _span = trace_span!("hnsw_insert", n = self.nodes.len()).entered();
        self.check_dimension(&point)?;

        let top_level = self.sampler.sample();
        let new_id = PointId::new(self.nodes.len());
        self.nodes.push(Node::new(new_id, point, top_level));

        let Some(old_entry_point) = self.entry_point else {
            self.entry_point = Some(new_id);
            self.current_max_level = top_level;
            debug!(pid = ?new_id, top_level, "inserted first point as entry point");
            return Ok(new_id);
        };

        // Descend from the *existing* entry point, before promoting it to
        // the new node. Promoting first (the reference's order, spec §4.4
        // step 4) would make `current` start out as the new node itself —
        // which has no neighbors yet, so the connection phase below would
        // only ever find the new node, leaving it (and every future
        // insertion descending from it) disconnected from the graph built
        // so far. That is a real defect in the reference, not a benign
        // quirk, so it is not reproduced here.
        let old_max_level = self.current_max_level;
        let point = self.nodes[new_id.index()].data.clone();
        let mut current = old_entry_point;

        for layer in (top_level + 1..=old_max_level).rev() {
            let found = self
                .search
                .layer_search(&point, current, &self.nodes, layer, 1);
            if let Some(nearest) = found.first() {
                current = nearest.pid;
            }
        }

        if top_level > self.current_max_level {
            self.current_max_level = top_level;
            self.entry_point = Some(new_id);
        }

        // `current` is carried unchanged from the descent phase into and
        // across the connection phase's layers (spec §4.4 step 6d: "the
        // starting node for the next lower layer is the current node
        // carried from the previous layer") rather than being advanced to
        // each layer's own nearest candidate. The connection phase only
        // runs up to `old_max_level`: above that, no other node exists
        // yet, so the new node is correctly left unconnected at the
        // layers where it is the first (and so far only) occupant.
        for layer in (0..=top_level.min(old_max_level)).rev() {
            let candidates = self
                .search
                .layer_search(&point, current, &self.nodes, layer, self.ef_construction)
                .to_vec();

            for candidate in &candidates {
                self.nodes[new_id.index()].neighbors[layer].push(candidate.pid);
                self.nodes[candidate.pid.index()].neighbors[layer].push(new_id);
            }

            self.prune(new_id, layer);
        }

        debug!(pid = ?new_id, top_level, "inserted point");
        Ok(new_id)
    }

    /// Prune `node`'s adjacency at `layer` to the `m` closest neighbors by
    /// distance to `node`'s own point (spec §4.5). Only the newly
    /// inserted node's adjacency is pruned; neighbors on the other end of
    /// an edge may exceed `m` (spec §9, asymmetric pruning).
    fn prune(&mut self, node: PointId, layer: usize) {
        let m = self.m;
        let list = &mut self.nodes[node.index()].neighbors[layer];
        if list.len() <= m {
            return;
        }

        let origin = self.nodes[node.index()].data.clone();
        let nodes = &self.nodes;
        let mut scored: Vec<(f32, PointId)> = self.nodes[node.index()].neighbors[layer]
            .iter()
            .map(|&pid| (euclidean(&origin, &nodes[pid.index()].data), pid))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.truncate(m);

        self.nodes[node.index()].neighbors[layer] = scored.into_iter().map(|(_, pid)| pid).collect();
    }

    /// Top-k query for `query`, per spec §4.6.
    ///
    /// `ef_search` bounds layer-0 candidate breadth; it must be at least
    /// `k`. Searching an empty index returns an empty, not an error,
    /// result.
    pub fn search(&mut self, query: &[f32], k: usize, ef_search: usize) -> Result<Vec<SearchResult>> {
        let _span = trace_span!("hnsw_search", k, ef_search).entered();
        if k == 0 {
            return Err(Error::InvalidSearchParams {
                reason: "k must be positive",
            });
        }
        if ef_search < k {
            return Err(Error::InvalidSearchParams {
                reason: "ef_search must be >= k",
            });
        }
        if let Some(expected) = self.dimension {
            if query.len() != expected {
                return Err(Error::DimensionMismatch {
                    expected,
                    actual: query.len(),
                });
            }
        }

        let Some(entry_point) = self.entry_point else {
            return Ok(Vec::new());
        };

        let mut current = entry_point;
        for layer in (1..=self.current_max_level).rev() {
            let found = self
                .search
                .layer_search(query, current, &self.nodes, layer, 1);
            if let Some(nearest) = found.first() {
                current = nearest.pid;
            }
        }

        let candidates = self
            .search
            .layer_search(query, current, &self.nodes, 0, ef_search);

        let mut results: Vec<SearchResult> = candidates
            .iter()
            .map(|c| SearchResult {
                distance: c.distance.into_inner(),
                pid: c.pid,
                point: self.nodes[c.pid.index()].data.clone(),
            })
            .collect();
        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results.truncate(k);

        debug!(found = results.len(), "search complete");
        Ok(results)
    }
}
