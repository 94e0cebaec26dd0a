use hnsw_graph::Hnsw;

fn main() {
    let colors = [
        ("red", vec![255.0, 0.0, 0.0]),
        ("green", vec![0.0, 255.0, 0.0]),
        ("blue", vec![0.0, 0.0, 255.0]),
    ];

    let mut index = Hnsw::builder().build().unwrap();
    for (_, rgb) in &colors {
        index.insert(rgb.clone()).unwrap();
    }

    let query = vec![204.0, 85.0, 0.0];
    let closest = index.search(&query, 1, 10).unwrap();
    let (name, _) = colors[closest[0].pid.index()];
    println!("{name}");
}
