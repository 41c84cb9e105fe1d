//! Performance benchmarks for wildgrove

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wildgrove::scenario::Scenario;
use wildgrove::{Config, World};

fn populated_world(rabbits: u32, wolves: u32, grass: u32, seed: u64) -> World {
    let text = format!(
        "grid 80 80\nrabbit {}\nwolf {}\nbear 2\ngrass {}\nbush 10\n",
        rabbits, wolves, grass
    );
    let scenario = Scenario::parse(&text).expect("bench scenario parses");
    scenario.build(Config::default(), seed).expect("bench world builds")
}

fn benchmark_world_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_step");

    for &(rabbits, wolves, grass) in &[(50, 5, 100), (200, 20, 400), (500, 50, 1000)] {
        let mut world = populated_world(rabbits, wolves, grass, 42);

        // Warm up
        world.run(10);

        group.bench_with_input(
            BenchmarkId::new("animals", rabbits + wolves + 2),
            &rabbits,
            |b, _| {
                b.iter(|| {
                    world.step();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_scenario_build(c: &mut Criterion) {
    let text = "grid 80 80\nrabbit 200\nwolf 20\nbear 2\ngrass 400\nbush 10\n";
    let scenario = Scenario::parse(text).expect("bench scenario parses");

    c.bench_function("scenario_build", |b| {
        b.iter(|| {
            scenario
                .build(black_box(Config::default()), black_box(42))
                .expect("bench world builds")
        });
    });
}

fn benchmark_census(c: &mut Criterion) {
    use wildgrove::stats::Census;

    let mut world = populated_world(500, 50, 1000, 42);
    world.run(50);

    c.bench_function("census_tally", |b| {
        b.iter(|| {
            let ids = world.entity_ids();
            let entities: Vec<_> = ids.iter().filter_map(|id| world.entity(*id)).collect();
            Census::tally(entities.into_iter())
        });
    });
}

criterion_group!(
    benches,
    benchmark_world_step,
    benchmark_scenario_build,
    benchmark_census,
);

criterion_main!(benches);
