use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use clap::Parser;
use seg_hash::HashTable;
use seg_hash::TableError;
use seg_hash::hash_table::Entry;
use seg_hash::probe::fold_hash;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "capacity", default_value_t = 1024)]
    capacity: usize,

    #[arg(short = 's', long = "segment_size", default_value_t = 32)]
    segment_size: usize,

    /// Percentage of entries removed and reinserted under new keys after
    /// the initial fill.
    #[arg(short = 'r', long = "churn", default_value_t = 25)]
    churn: u64,
}

fn hash_u64(value: u64) -> u32 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    fold_hash(hasher.finish())
}

fn insert(table: &mut HashTable<u64>, value: u64) -> Result<(), TableError> {
    match table.entry(hash_u64(value), |&v| v == value)? {
        Entry::Vacant(entry) => {
            entry.insert(value);
        }
        Entry::Occupied(_) => {
            panic!("Value already exists in table: {}", value);
        }
    }
    Ok(())
}

fn main() -> Result<(), TableError> {
    let args = Args::parse();

    println!(
        "Creating HashTable with capacity {} and segment size {}",
        args.capacity, args.segment_size
    );

    let mut table: HashTable<u64> = HashTable::new(args.capacity, args.segment_size)?;

    println!("Load limit: {}", table.load_limit());
    println!("Filling table with u64 values...");

    let mut next = 0u64;
    while table.len() < table.load_limit() {
        insert(&mut table, next)?;
        next += 1;
    }

    let churned = table.len() as u64 * args.churn.min(100) / 100;
    for value in 0..churned {
        table.remove(hash_u64(value), |&v| v == value);
    }
    for _ in 0..churned {
        insert(&mut table, next)?;
        next += 1;
    }

    println!("Inserted {} values, churned {}", table.len(), churned);
    println!("Final load factor: {:.2}%", table.load_factor() * 100.0);

    table.probe_histogram().print();
    table.debug_stats().print();

    match insert(&mut table, next) {
        Err(err) => println!("Insert past the load limit refused: {err}"),
        Ok(()) => println!("Insert past the load limit unexpectedly succeeded"),
    }

    Ok(())
}
