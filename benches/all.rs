use bencher::{benchmark_group, benchmark_main, Bencher};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use hnsw_graph::Hnsw;

benchmark_main!(benches);
benchmark_group!(benches, insert_1024, search_1024);

const SEED: u64 = 123456789;

fn random_points(n: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    (0..n).map(|_| vec![rng.gen::<f32>(), rng.gen::<f32>()]).collect()
}

fn insert_1024(bench: &mut Bencher) {
    let mut rng = StdRng::seed_from_u64(SEED);
    let points = random_points(1024, &mut rng);
    bench.iter(|| {
        let mut index = Hnsw::builder().seed(SEED).build().unwrap();
        for p in &points {
            index.insert(p.clone()).unwrap();
        }
    })
}

fn search_1024(bench: &mut Bencher) {
    let mut rng = StdRng::seed_from_u64(SEED);
    let points = random_points(1024, &mut rng);
    let mut index = Hnsw::builder().seed(SEED).build().unwrap();
    for p in &points {
        index.insert(p.clone()).unwrap();
    }
    let query = vec![rng.gen::<f32>(), rng.gen::<f32>()];

    bench.iter(|| index.search(&query, 10, 100).unwrap())
}
