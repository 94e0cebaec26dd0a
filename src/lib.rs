//! An in-memory, single-threaded hierarchical navigable small-world (HNSW)
//! index over fixed-dimension points under Euclidean distance.
//!
//! The index trades exact nearest-neighbor correctness for sub-linear
//! query time by maintaining a stack of proximity graphs: upper layers
//! are sparse long-range skeletons, and the bottom layer holds every
//! inserted point with denser local edges. See [`Hnsw`] for the facade
//! and [`Builder`] for construction.
//!
//! ```
//! use hnsw_graph::Hnsw;
//!
//! let mut index = Hnsw::builder().seed(7).build().unwrap();
//! index.insert(vec![0.0, 0.0]).unwrap();
//! index.insert(vec![1.0, 0.0]).unwrap();
//! index.insert(vec![0.0, 1.0]).unwrap();
//!
//! let results = index.search(&[0.1, 0.1], 2, 10).unwrap();
//! assert_eq!(results.len(), 2);
//! ```
//!
//! Out of scope by design: persistence, networking, concurrent
//! insertion/search, deletion of inserted points, and distance metrics
//! other than Euclidean L2.

mod distance;
mod error;
mod index;
mod level;
mod node;
mod search;
mod types;

pub use error::{Error, Result};
pub use index::{Builder, Hnsw};
pub use types::{PointId, SearchResult};
