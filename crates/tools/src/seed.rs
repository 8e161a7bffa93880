//! Level seed selection for `dungeon-gen`.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use xxhash_rust::xxh3::xxh3_64_with_seed;

static ENTROPY_DRAWS: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelSeed {
    pub value: u64,
    /// Set when the seed came from `--seed` rather than runtime entropy.
    pub explicit: bool,
}

impl LevelSeed {
    pub fn resolve(flag: Option<u64>) -> Self {
        match flag {
            Some(value) => Self { value, explicit: true },
            None => Self { value: entropy_seed(), explicit: false },
        }
    }

    pub fn source(self) -> &'static str {
        if self.explicit { "--seed" } else { "entropy" }
    }
}

/// Hash of the wall clock and process id, salted by a per-process draw counter.
pub fn entropy_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |elapsed| elapsed.as_nanos());
    let mut bytes = [0_u8; 20];
    bytes[..16].copy_from_slice(&nanos.to_le_bytes());
    bytes[16..].copy_from_slice(&process::id().to_le_bytes());
    xxh3_64_with_seed(&bytes, ENTROPY_DRAWS.fetch_add(1, Ordering::Relaxed))
}
