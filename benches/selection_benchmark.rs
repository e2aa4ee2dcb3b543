use criterion::{black_box, criterion_group, criterion_main, Criterion};
use station_selector::{
    algorithms::astar::AStarSelector,
    algorithms::dijkstra::DijkstraSelector,
    algorithms::genetic::GeneticSelector,
    Location, SelectionEngine, Station, StationAttributes, StationSelector,
};

fn benchmark_selection(c: &mut Criterion) {
    let (user, stations) = create_benchmark_data(60);
    let engine = SelectionEngine::default();
    let features = engine.features(&user, &stations).unwrap();

    // Full pipeline, all four selectors plus consensus
    c.bench_function("select_best_station", |b| {
        b.iter(|| engine.select_best_station(black_box(&user), black_box(&stations)))
    });

    c.bench_function("normalize_features", |b| {
        b.iter(|| engine.features(black_box(&user), black_box(&stations)))
    });

    c.bench_function("dijkstra_select", |b| {
        b.iter(|| DijkstraSelector.select(black_box(&features)))
    });

    c.bench_function("astar_select", |b| {
        b.iter(|| AStarSelector.select(black_box(&features)))
    });

    let genetic = GeneticSelector::default();
    c.bench_function("genetic_evolve", |b| {
        b.iter(|| genetic.evolve(black_box(&features)))
    });
}

// Stations on a grid around the user with rotating metadata
fn create_benchmark_data(count: usize) -> (Location, Vec<Station>) {
    let user = Location::new(48.8566, 2.3522);

    let stations = (0..count)
        .map(|i| {
            let lat = user.lat + ((i % 8) as f64 - 4.0) * 0.01;
            let lng = user.lng + ((i / 8) as f64 - 4.0) * 0.01;
            let attributes = StationAttributes {
                rating: (i % 3 != 0).then(|| 1.0 + (i % 5) as f64),
                price: Some(0.25 + (i % 7) as f64 * 0.05),
                connector_count: (i % 4 != 0).then(|| 2 + (i % 6) as u32),
                connector_type: None,
            };
            Station::new(format!("st-{:03}", i), format!("Station {}", i), Location::new(lat, lng))
                .with_attributes(attributes)
        })
        .collect();

    (user, stations)
}

criterion_group!(benches, benchmark_selection);
criterion_main!(benches);
