//! Synthetic insertion/search benchmark and recall check, mirroring the
//! reference driver's own parameters: 2000 10-dimensional Gaussian points,
//! k=10, efSearch=200 for timing and efSearch=4000 for recall.

use std::time::Instant;

use hnsw_graph::Hnsw;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

const DIM: usize = 10;
const NUM_POINTS: usize = 2000;
const K: usize = 10;
const NUM_QUERIES: usize = 100;

fn generate_points(n: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    let normal = Normal::new(0.0f32, 1.0).unwrap();
    (0..n)
        .map(|_| (0..DIM).map(|_| normal.sample(rng)).collect())
        .collect()
}

fn brute_force_topk(points: &[Vec<f32>], query: &[f32], k: usize) -> Vec<f32> {
    let mut distances: Vec<f32> = points
        .iter()
        .map(|p| {
            p.iter()
                .zip(query.iter())
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f32>()
                .sqrt()
        })
        .collect();
    distances.sort_by(|a, b| a.total_cmp(b));
    distances.truncate(k);
    distances
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut rng = StdRng::seed_from_u64(42);
    let points = generate_points(NUM_POINTS, &mut rng);

    let mut index = Hnsw::builder()
        .m(16)
        .ef_construction(200)
        .ml(0.5)
        .seed(42)
        .build()
        .unwrap();

    let start = Instant::now();
    for p in &points {
        index.insert(p.clone()).unwrap();
    }
    let build_elapsed = start.elapsed();
    println!("built index of {NUM_POINTS} points in {build_elapsed:?}");

    let queries = generate_points(NUM_QUERIES, &mut rng);

    let start = Instant::now();
    for q in &queries {
        index.search(q, K, 200).unwrap();
    }
    let search_elapsed = start.elapsed();
    println!("ran {NUM_QUERIES} queries (efSearch=200) in {search_elapsed:?}");

    let mut total_recall = 0.0;
    for q in &queries {
        let ground_truth = brute_force_topk(&points, q, K);
        let ground_truth: std::collections::HashSet<String> =
            ground_truth.iter().map(|d| format!("{d:.4}")).collect();

        let results = index.search(q, K, 4000).unwrap();
        let hits = results
            .iter()
            .filter(|r| ground_truth.contains(&format!("{:.4}", r.distance)))
            .count();
        total_recall += hits as f64 / K as f64;
    }
    let recall = total_recall / NUM_QUERIES as f64;
    println!("recall@{K} (efSearch=4000): {recall:.4}");
}
