use core::hash::Hash;
use core::hash::Hasher;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::hash_table::Entry as HashbrownEntry;
use hashbrown::hash_table::HashTable as HashbrownHashTable;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Zipf;
use seg_hash::HashTable as SegHashTable;
use seg_hash::hash_table::Entry as SegEntry;
use seg_hash::probe::fold_hash;
use siphasher::sip::SipHasher;

trait KeyValuePair: Clone {
    fn new(key: u64) -> Self;

    fn hash_key(&self) -> u64;
    fn eq_key(&self, other: &Self) -> bool;
}

#[derive(Clone)]
struct StringItem {
    key: String,
    _value: u64,
}

impl KeyValuePair for StringItem {
    fn new(key: u64) -> Self {
        black_box(Self {
            key: format!("key_{:016X}", key),
            _value: key,
        })
    }

    fn hash_key(&self) -> u64 {
        let mut hasher = SipHasher::new();
        self.key.hash(&mut hasher);
        hasher.finish()
    }

    fn eq_key(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

#[derive(Clone)]
struct U64Item {
    key: u64,
}

impl KeyValuePair for U64Item {
    fn new(key: u64) -> Self {
        black_box(Self { key })
    }

    fn hash_key(&self) -> u64 {
        let mut hasher = SipHasher::new();
        self.key.hash(&mut hasher);
        hasher.finish()
    }

    fn eq_key(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

const SEGMENT_SIZE: usize = 32;

const CAPACITIES: &[usize] = &[
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
    (1 << 18),
];

fn random_items<Item: KeyValuePair>(count: usize) -> Vec<(u64, Item)> {
    let mut rng = OsRng;
    (0..count)
        .map(|_| {
            let item = Item::new(rng.try_next_u64().unwrap());
            (item.hash_key(), item)
        })
        .collect()
}

fn seg_table<Item: KeyValuePair>(capacity: usize, items: &[(u64, Item)]) -> SegHashTable<Item> {
    let mut table = SegHashTable::new(capacity, SEGMENT_SIZE).unwrap();
    for (hash, item) in items {
        match table.entry(fold_hash(*hash), |v| v.eq_key(item)).unwrap() {
            SegEntry::Vacant(entry) => {
                entry.insert(item.clone());
            }
            SegEntry::Occupied(_) => unreachable!(),
        }
    }
    table
}

fn hashbrown_table<Item: KeyValuePair>(
    capacity: usize,
    items: &[(u64, Item)],
) -> HashbrownHashTable<Item> {
    let mut table = HashbrownHashTable::with_capacity(capacity);
    for (hash, item) in items {
        match table.entry(*hash, |v: &Item| v.eq_key(item), |v| v.hash_key()) {
            HashbrownEntry::Vacant(entry) => {
                entry.insert(item.clone());
            }
            HashbrownEntry::Occupied(_) => unreachable!(),
        }
    }
    table
}

fn load_limit(capacity: usize) -> usize {
    SegHashTable::<()>::new(capacity, SEGMENT_SIZE)
        .unwrap()
        .load_limit()
}

fn bench_insert<Item: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!(
        "insert_to_load_limit_{}",
        core::any::type_name::<Item>()
    ));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &capacity in CAPACITIES[..=MAX_SIZE].iter() {
        let count = load_limit(capacity);
        let items = random_items::<Item>(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_function(format!("seg_hash/{capacity}"), |b| {
            b.iter_batched(
                || {
                    let mut items = items.clone();
                    items.shuffle(&mut SmallRng::from_os_rng());
                    items
                },
                |items| black_box(seg_table(capacity, &items)),
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{capacity}"), |b| {
            b.iter_batched(
                || {
                    let mut items = items.clone();
                    items.shuffle(&mut SmallRng::from_os_rng());
                    items
                },
                |items| black_box(hashbrown_table(capacity, &items)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit<Item: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_hit_{}", core::any::type_name::<Item>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &capacity in CAPACITIES[..=MAX_SIZE].iter() {
        let items = random_items::<Item>(load_limit(capacity));
        let seg = seg_table(capacity, &items);
        let brown = hashbrown_table(capacity, &items);
        let mut lookups = items.clone();
        lookups.shuffle(&mut SmallRng::from_os_rng());
        group.throughput(Throughput::Elements(lookups.len() as u64));

        group.bench_function(format!("seg_hash/{capacity}"), |b| {
            b.iter(|| {
                for (hash, item) in &lookups {
                    black_box(seg.find(fold_hash(*hash), |v| v.eq_key(item)));
                }
            })
        });

        group.bench_function(format!("hashbrown/{capacity}"), |b| {
            b.iter(|| {
                for (hash, item) in &lookups {
                    black_box(brown.find(*hash, |v| v.eq_key(item)));
                }
            })
        });
    }

    group.finish();
}

fn bench_find_miss<Item: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_miss_{}", core::any::type_name::<Item>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &capacity in CAPACITIES[..=MAX_SIZE].iter() {
        let count = load_limit(capacity);
        let items = random_items::<Item>(count);
        let misses = random_items::<Item>(count);
        let seg = seg_table(capacity, &items);
        let brown = hashbrown_table(capacity, &items);
        group.throughput(Throughput::Elements(misses.len() as u64));

        group.bench_function(format!("seg_hash/{capacity}"), |b| {
            b.iter(|| {
                for (hash, item) in &misses {
                    black_box(seg.find(fold_hash(*hash), |v| v.eq_key(item)));
                }
            })
        });

        group.bench_function(format!("hashbrown/{capacity}"), |b| {
            b.iter(|| {
                for (hash, item) in &misses {
                    black_box(brown.find(*hash, |v| v.eq_key(item)));
                }
            })
        });
    }

    group.finish();
}

/// Read-heavy access skewed towards a small set of hot keys.
fn bench_find_zipf<Item: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("find_zipf_{}", core::any::type_name::<Item>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &capacity in CAPACITIES[..=MAX_SIZE].iter() {
        let items = random_items::<Item>(load_limit(capacity));
        let seg = seg_table(capacity, &items);
        let brown = hashbrown_table(capacity, &items);

        let zipf = Zipf::new(items.len() as f64, 1.1).unwrap();
        let mut rng = SmallRng::from_os_rng();
        let lookups: Vec<&(u64, Item)> = (0..items.len())
            .map(|_| &items[rng.sample(zipf) as usize - 1])
            .collect();
        group.throughput(Throughput::Elements(lookups.len() as u64));

        group.bench_function(format!("seg_hash/{capacity}"), |b| {
            b.iter(|| {
                for (hash, item) in &lookups {
                    black_box(seg.find(fold_hash(*hash), |v| v.eq_key(item)));
                }
            })
        });

        group.bench_function(format!("hashbrown/{capacity}"), |b| {
            b.iter(|| {
                for (hash, item) in &lookups {
                    black_box(brown.find(*hash, |v| v.eq_key(item)));
                }
            })
        });
    }

    group.finish();
}

/// Removes and reinserts a quarter of the entries, exercising tombstone reuse.
fn bench_churn<Item: KeyValuePair, const MAX_SIZE: usize>(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("churn_{}", core::any::type_name::<Item>()));
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for &capacity in CAPACITIES[..=MAX_SIZE].iter() {
        let items = random_items::<Item>(load_limit(capacity));
        let churned = &items[..items.len() / 4];
        group.throughput(Throughput::Elements(churned.len() as u64 * 2));

        group.bench_function(format!("seg_hash/{capacity}"), |b| {
            b.iter_batched(
                || seg_table(capacity, &items),
                |mut table| {
                    for (hash, item) in churned {
                        black_box(table.remove(fold_hash(*hash), |v| v.eq_key(item)));
                    }
                    for (hash, item) in churned {
                        table
                            .entry(fold_hash(*hash), |v| v.eq_key(item))
                            .unwrap()
                            .or_insert_with(|| item.clone());
                    }
                    black_box(table)
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("hashbrown/{capacity}"), |b| {
            b.iter_batched(
                || hashbrown_table(capacity, &items),
                |mut table| {
                    for (hash, item) in churned {
                        if let Ok(entry) = table.find_entry(*hash, |v| v.eq_key(item)) {
                            black_box(entry.remove());
                        }
                    }
                    for (hash, item) in churned {
                        table
                            .entry(*hash, |v| v.eq_key(item), |v| v.hash_key())
                            .or_insert_with(|| item.clone());
                    }
                    black_box(table)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert::<U64Item, 4>,
    bench_insert::<StringItem, 3>,
    bench_find_hit::<U64Item, 4>,
    bench_find_hit::<StringItem, 3>,
    bench_find_miss::<U64Item, 4>,
    bench_find_zipf::<U64Item, 4>,
    bench_find_zipf::<StringItem, 3>,
    bench_churn::<U64Item, 4>,
);
criterion_main!(benches);
