use std::time::Instant;

use collections::HashTable;
use log::info;
use rand::Rng;

mod util;

const TABLE_SIZE: usize = 20;
const RANDOM_KEYS: usize = 200;
const KEY_LEN: usize = 10;

fn main() {
    env_logger::builder().init();

    let mut table = HashTable::new(TABLE_SIZE);
    table.insert("Test1", 123458679).unwrap();
    table.insert("Test2", 123458679).unwrap();
    table.insert("Test1", 111111111).unwrap();

    info!("seeding {RANDOM_KEYS} random keys into {TABLE_SIZE} slots");
    let mut rng = rand::rng();
    for _ in 0..RANDOM_KEYS {
        let key = random_key(&mut rng, KEY_LEN);
        let value = rng.random_range(1_000_000..=50_000_000);
        table.insert(&key, value).unwrap();
    }
    info!("table holds {} entries", table.len());

    let before = Instant::now();
    let value = table["Test2"];
    let elapsed = before.elapsed();
    println!("{value}");
    println!("Time: {}s", elapsed.as_secs_f64());

    util::report_distribution(&table, true);
}

/// Random lowercase ASCII key, like the original driver's workload.
fn random_key(rng: &mut impl Rng, len: usize) -> String {
    (0..len)
        .map(|_| rng.random_range(b'a'..=b'z') as char)
        .collect()
}
