use chord_core::{ChordConfig, ChordNetwork, Identifier};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn network(nodes: usize, keys: usize) -> ChordNetwork {
    let mut network = ChordNetwork::new(ChordConfig::new(48)).expect("valid config");
    for i in 0..nodes {
        network.add_node(format!("node-{i}")).expect("unique name");
    }
    for i in 0..keys {
        network.add_key(format!("key-{i}")).expect("key in range");
    }
    network.build().expect("ring builds");
    network.assign_keys().expect("keys assigned");
    network
}

fn bench_finger_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("finger_tables");
    for nodes in [16, 256, 1024] {
        let mut net = network(nodes, 0);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &nodes, |b, _| {
            b.iter(|| net.build_finger_tables().expect("rebuild"))
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for nodes in [16, 256, 1024] {
        let net = network(nodes, 512);
        let keys: Vec<Identifier> = net.keys().values().copied().collect();
        let router = net.router().expect("built");
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &nodes, |b, _| {
            let mut i = 0;
            b.iter(|| {
                let key = keys[i % keys.len()];
                i += 1;
                black_box(router.lookup_from_first(key).expect("lookup"))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_finger_tables, bench_lookup);
criterion_main!(benches);
