use std::hint::black_box;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hcoord::graphlib::{Graph, GraphOptions};
use hcoord::position::position_x;
use hcoord::{EdgeLabel, GraphLabel, NodeLabel};

#[derive(Debug, Clone)]
struct GraphSpec {
    layers: usize,
    per_layer: usize,
}

impl GraphSpec {
    fn build(&self) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
        let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> = Graph::new(GraphOptions::default());
        g.set_graph(GraphLabel::new(50.0, 10.0));

        for rank in 0..self.layers {
            for order in 0..self.per_layer {
                let id = format!("n{rank}_{order}");
                g.set_node(&id, NodeLabel::new(rank as i32, order, 100.0));
            }
        }

        // A spine plus cross-layer fanout to create realistic alignment/compaction pressure.
        for rank in 0..self.layers.saturating_sub(1) {
            for order in 0..self.per_layer {
                let from = format!("n{rank}_{order}");
                let to_order = order % self.per_layer;
                let to = format!("n{}_{to_order}", rank + 1);
                g.set_edge(&from, &to);

                let skew = (order + 1) % self.per_layer;
                let to_skew = format!("n{}_{skew}", rank + 1);
                g.set_edge(&from, &to_skew);
            }
        }

        g
    }
}

fn bench_position_x(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_x");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("layers_10_w10", 10usize, 10usize),
        ("layers_30_w20", 30usize, 20usize),
        ("layers_50_w15", 50usize, 15usize),
    ];

    for (name, layers, per_layer) in cases {
        let spec = GraphSpec { layers, per_layer };
        group.bench_with_input(
            BenchmarkId::new("bk::position_x", name),
            &spec,
            |b, spec| {
                b.iter_batched(
                    || spec.build(),
                    |g| {
                        let xs = position_x(black_box(&g)).unwrap();
                        black_box(xs.len());
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_position_x);
criterion_main!(benches);
