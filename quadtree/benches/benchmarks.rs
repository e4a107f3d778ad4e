use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quadtree::quadtree::{ColliderIndex, Config, QuadTree};
use quadtree::shapes::Rect;
use rand::prelude::*;

const WORLD: Rect = Rect {
    top: 1000,
    bottom: 0,
    left: 0,
    right: 1000,
};

fn populated(rng: &mut StdRng, count: usize) -> (QuadTree, Vec<ColliderIndex>) {
    let mut quadtree = QuadTree::new(
        WORLD,
        Config {
            pool_size: count,
            ..Config::default()
        },
    )
    .unwrap();
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(quadtree.insert(WORLD.random_inside(5, 5, rng)).unwrap());
    }
    (quadtree, items)
}

fn insert_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let rects: Vec<Rect> = (0..1000)
        .map(|_| WORLD.random_inside(5, 5, &mut rng))
        .collect();
    let mut quadtree: QuadTree = QuadTree::with_defaults(WORLD).unwrap();

    c.bench_function("quadtree_insert_1000", |b| {
        b.iter(|| {
            for rect in &rects {
                quadtree.insert(black_box(*rect)).unwrap();
            }
            quadtree.clear_elements();
        })
    });
}

fn remove_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let (mut quadtree, items) = populated(&mut rng, 1000);

    c.bench_function("quadtree_remove_reinsert", |b| {
        b.iter(|| {
            let index = items[rng.gen_range(0..items.len())];
            let rect = quadtree.remove(black_box(index)).unwrap();
            quadtree.insert(rect).unwrap();
        })
    });
}

fn query_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(3);
    let (mut quadtree, _) = populated(&mut rng, 1000);
    let area = Rect::new(600, 400, 400, 600);
    let mut output = Vec::new();

    c.bench_function("quadtree_query", |b| {
        b.iter(|| {
            output.clear();
            quadtree.query(black_box(area), &mut output);
        })
    });
}

fn tick_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(4);
    let rects: Vec<Rect> = (0..1000)
        .map(|_| WORLD.random_inside(8, 8, &mut rng))
        .collect();
    let mut quadtree: QuadTree = QuadTree::with_defaults(WORLD).unwrap();

    c.bench_function("quadtree_tick", |b| {
        b.iter(|| {
            for rect in &rects {
                quadtree.insert(*rect).unwrap();
            }
            let mut pairs = 0u32;
            quadtree.for_each_collision_pair(|_, _| pairs += 1);
            black_box(pairs);
            quadtree.cleanup().unwrap();
            quadtree.clear_elements();
        })
    });
}

criterion_group!(
    quadtree_benchmarks,
    insert_benchmark,
    remove_benchmark,
    query_benchmark,
    tick_benchmark
);
criterion_main!(quadtree_benchmarks);
