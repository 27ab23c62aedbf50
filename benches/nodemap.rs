use sparse_nodemap::{Interner, NodeMap, Value};

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use indexmap::IndexMap;
use rand::{distr::Alphanumeric, rng, Rng};

fn random_words(count: usize, max_len: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            rng()
                .sample_iter(&Alphanumeric)
                .take(rng().random_range(1..=max_len))
                .map(char::from)
                .collect()
        })
        .collect()
}

// A chain of single child nodes, the common shape of a pattern tree.
fn make_chain(words: &[String], interner: &mut Interner) -> NodeMap<Value> {
    let mut node = NodeMap::child();
    node.put("<template>", Value::text("done"));
    for w in words.iter().rev() {
        let mut parent = NodeMap::child();
        parent.put_interned(w, Value::node(node), interner);
        node = parent;
    }
    let mut root = NodeMap::root();
    root.put("start", Value::node(node));
    root
}

fn single_entry(c: &mut Criterion) {
    let words = random_words(1000, 12);
    c.bench_function("put/get: one entry per map", |b| {
        b.iter(|| {
            words
                .iter()
                .map(|w| {
                    let mut map = NodeMap::new();
                    map.put(w, w.len());
                    map.get(w).copied()
                })
                .collect::<Vec<Option<usize>>>()
        })
    });
    c.bench_function("put/get: one entry per indexmap", |b| {
        b.iter(|| {
            words
                .iter()
                .map(|w| {
                    let mut map = IndexMap::new();
                    map.insert(w.to_uppercase(), w.len());
                    map.get(&w.to_uppercase()).copied()
                })
                .collect::<Vec<Option<usize>>>()
        })
    });
}

fn branching(c: &mut Criterion) {
    static POPULATION_SIZE: usize = 1000;

    let mut group = c.benchmark_group("branching");
    for size in [1usize, 2, 4, 16, 64].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("put", size), size, |b, &size| {
            let words = random_words(size, 8);
            b.iter(|| {
                let mut map = NodeMap::new();
                for (i, w) in words.iter().enumerate() {
                    map.put(w, i);
                }
                map
            })
        });
        group.bench_with_input(BenchmarkId::new("remove", size), size, |b, &size| {
            let words = random_words(size, 8);
            b.iter_batched(
                || {
                    let mut map = NodeMap::new();
                    for (i, w) in words.iter().enumerate() {
                        map.put(w, i);
                    }
                    map
                },
                |mut map| {
                    for i in 0..size {
                        let _ = map.remove(&i);
                    }
                    map
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("get", size), size, |b, &size| {
            let words = random_words(size, 8);
            let mut map = NodeMap::new();
            for (i, w) in words.iter().enumerate() {
                map.put(w, i);
            }
            let searches = random_words(POPULATION_SIZE, 8);
            b.iter(|| searches.iter().filter(|w| map.contains_key(w)).count())
        });
    }
    group.finish();
}

fn average_size(c: &mut Criterion) {
    let words = random_words(1_000, 6);
    let mut interner = Interner::new();
    let chain = make_chain(&words, &mut interner);
    c.bench_function("average size: 1k deep chain", |b| {
        b.iter(|| chain.average_size())
    });
}

criterion_group!(benches, single_entry, branching, average_size);
criterion_main!(benches);
