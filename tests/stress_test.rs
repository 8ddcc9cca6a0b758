//! Mixed-workload stress: many readers, rare writers, one shared map.
//!
//! Mirrors the intended production shape: a configuration-style map with
//! a read:write ratio around 20000:1. Values always equal their key, so
//! any successful read can be validated on the spot.

use rand::Rng;
use snapmap::CowMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

const THREADS: usize = 24;
const OPS_PER_THREAD: usize = 50_000;
const SEED_KEYS: usize = 100;
const KEY_SPACE: usize = SEED_KEYS * SEED_KEYS * SEED_KEYS;
const READS_PER_WRITE: u32 = 20_000;

#[test]
#[cfg_attr(miri, ignore)]
fn mixed_readers_and_writers_converge() {
    let map = Arc::new(CowMap::new());

    // Seed the working set
    for i in 0..SEED_KEYS {
        let k = i.to_string();
        map.put(k.clone(), k).unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..THREADS {
        let map = map.clone();
        handles.push(thread::spawn(move || {
            let mut rng = rand::thread_rng();
            let mut put_keys = HashSet::new();

            for _ in 0..OPS_PER_THREAD {
                let k = rng.gen_range(0..KEY_SPACE).to_string();
                if rng.gen_range(0..=READS_PER_WRITE) == 0 {
                    map.put(k.clone(), k.clone()).unwrap();
                    put_keys.insert(k);
                } else {
                    // Any observed value must equal its key: values are
                    // only ever written that way, so anything else would
                    // be a torn or phantom read.
                    if let Some(v) = map.get(&k) {
                        assert_eq!(v, k);
                    }
                }
            }

            put_keys
        }));
    }

    let mut ever_put: HashSet<String> = (0..SEED_KEYS).map(|i| i.to_string()).collect();
    for handle in handles {
        ever_put.extend(handle.join().unwrap());
    }

    // Final key count equals the number of distinct keys ever put
    assert_eq!(map.len(), ever_put.len());

    let snap = map.snapshot();
    for k in &ever_put {
        assert_eq!(snap.get(k), Some(k), "missing or corrupt entry {}", k);
    }
}

/// Sustained single-hot-key churn with many concurrent readers. The hot
/// key must stay present and valid throughout.
#[test]
#[cfg_attr(miri, ignore)]
fn hot_key_churn_under_read_pressure() {
    const READERS: usize = 8;
    const READS: usize = 100_000;
    const WRITES: usize = 2_000;

    let map = Arc::new(CowMap::new());
    map.put("hot", 0usize).unwrap();
    for i in 0..SEED_KEYS {
        map.put(format!("cold-{}", i), i).unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..READERS {
        let map = map.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..READS {
                let v = map.get("hot").expect("hot key never removed");
                assert!(v < WRITES);
            }
        }));
    }

    let writer = {
        let map = map.clone();
        thread::spawn(move || {
            for i in 0..WRITES {
                map.put("hot", i).unwrap();
            }
        })
    };

    for handle in handles {
        handle.join().unwrap();
    }
    writer.join().unwrap();

    assert_eq!(map.get("hot"), Some(WRITES - 1));
    assert_eq!(map.len(), SEED_KEYS + 1);
}
