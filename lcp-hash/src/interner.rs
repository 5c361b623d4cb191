//! C3: label interning — a shared, deduplicating map mode and a stateless
//! hash mode, selected per operation via [`LabelMode`].

use crate::murmur3::{murmur3_32, murmur3_32_tuple};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::RwLock;

/// Default reservation for the string interning map, matching
/// `STR_HASH_TABLE_SIZE` in the engine's constants table.
pub const DEFAULT_STR_CAPACITY: usize = 1_000;

/// Default bucket count for the tuple interning table, matching
/// `CORE_HASH_TABLE_SIZE` in the engine's constants table.
pub const DEFAULT_CORE_CAPACITY: usize = 10_000;

/// One entry in a tuple bucket: the label-array key plus the id assigned to it.
#[derive(Debug, Clone)]
struct TupleEntry {
    key: Vec<u32>,
    label: u32,
}

/// The shared, process-lifetime interning tables used by map-mode labeling.
///
/// Modeled as an explicit, caller-owned handle (see `SPEC_FULL.md` §9) rather
/// than hidden global state: construct one `Interner`, wrap it in an `Arc`,
/// and hand clones of the `Arc` to every `Lps` that must agree on label ids.
///
/// `next_id` is a single atomic counter shared by both tables. The reference
/// engine instead guards the same counter under two independent per-table
/// mutexes, which is a latent data race between concurrent string and tuple
/// insertions; this crate closes that gap with one lock-free counter (see
/// `DESIGN.md`).
#[derive(Debug)]
pub struct Interner {
    str_map: RwLock<HashMap<String, u32>>,
    cores_map: Vec<RwLock<Vec<TupleEntry>>>,
    next_id: AtomicU32,
}

impl Interner {
    /// Build an interner, pre-reserving the string map and fixing the tuple
    /// table's bucket count.
    ///
    /// The bucket count is fixed at construction (a `Vec` of locks, never
    /// resized) rather than derived from a growable container's capacity, so
    /// the hashing modulus is stable and does not depend on `Vec`'s
    /// unspecified growth heuristic.
    pub fn with_capacity(str_capacity: usize, core_bucket_count: usize) -> Self {
        let core_bucket_count = core_bucket_count.max(1);
        let mut cores_map = Vec::with_capacity(core_bucket_count);
        cores_map.resize_with(core_bucket_count, || RwLock::new(Vec::new()));

        Self {
            str_map: RwLock::new(HashMap::with_capacity(str_capacity)),
            cores_map,
            next_id: AtomicU32::new(0),
        }
    }

    /// Insert (or look up) a byte string, case-normalized to upper case, and
    /// return its dense id.
    pub fn emplace_string(&self, bytes: &[u8]) -> u32 {
        let key = String::from_utf8_lossy(bytes).to_uppercase();

        if let Some(&id) = self.str_map.read().unwrap().get(&key) {
            return id;
        }

        let mut table = self.str_map.write().unwrap();
        if let Some(&id) = table.get(&key) {
            return id;
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        table.insert(key, id);
        id
    }

    /// Insert (or look up) a tuple of `u32` labels and return its dense id.
    pub fn emplace_tuple(&self, labels: &[u32]) -> u32 {
        let bucket_index = murmur3_32_tuple(labels) as usize % self.cores_map.len();
        let bucket = &self.cores_map[bucket_index];

        if let Some(entry) = bucket.read().unwrap().iter().find(|e| e.key == labels) {
            return entry.label;
        }

        let mut bucket = bucket.write().unwrap();
        if let Some(entry) = bucket.iter().find(|e| e.key == labels) {
            return entry.label;
        }
        let label = self.next_id.fetch_add(1, Ordering::SeqCst);
        bucket.push(TupleEntry {
            key: labels.to_vec(),
            label,
        });
        label
    }

    /// Diagnostic dump of both tables' load factor, bucket count, collision
    /// count, empty-bucket count, and max bucket size — a direct port of the
    /// original `hash::summary()` console dump, returned rather than printed.
    pub fn summary(&self) -> String {
        let str_map = self.str_map.read().unwrap();
        let bucket_count = str_map.capacity().max(1);
        let load_factor = str_map.len() as f64 / bucket_count as f64;
        let mut out = format!(
            "str_map = {load_factor} {bucket_count} entries={}\n",
            str_map.len()
        );

        let mut collisions = 0usize;
        let mut empty = 0usize;
        let mut max_bucket = 0usize;
        let mut total_entries = 0usize;
        for bucket in &self.cores_map {
            let len = bucket.read().unwrap().len();
            total_entries += len;
            if len == 0 {
                empty += 1;
            } else {
                collisions += len - 1;
            }
            max_bucket = max_bucket.max(len);
        }
        let load_factor = total_entries as f64 / self.cores_map.len() as f64;
        out.push_str(&format!(
            "cores_map = {load_factor} {} {collisions} {empty} {max_bucket}",
            self.cores_map.len()
        ));
        out
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_STR_CAPACITY, DEFAULT_CORE_CAPACITY)
    }
}

/// Selects between the two labeling schemes described in `SPEC_FULL.md` §4.3.
///
/// The reference engine threads a `use_map` boolean through every parse
/// call; this crate expresses the same choice as an enum so the two modes
/// cannot be silently confused with an unrelated boolean parameter.
pub enum LabelMode<'a> {
    /// Non-collisionful, shared, dense-id assignment (thread-safe insertion
    /// into the tables owned by the wrapped [`Interner`]).
    Map(&'a Interner),
    /// Stateless 32-bit MurmurHash3, fixed seed 42. No storage, no sharing.
    Hash,
}

impl LabelMode<'_> {
    /// Assign a label to a raw byte string (level-1 cores).
    ///
    /// Unlike map mode, hash mode hashes the bytes exactly as given — the
    /// reference engine's `hash::simple()` performs no case normalization,
    /// only `hash::emplace()` (map mode) does.
    pub fn label_bytes(&self, bytes: &[u8]) -> u32 {
        match self {
            LabelMode::Map(interner) => interner.emplace_string(bytes),
            LabelMode::Hash => murmur3_32(bytes),
        }
    }

    /// Assign a label to a tuple of source-core labels (level > 1 cores).
    pub fn label_tuple(&self, labels: &[u32]) -> u32 {
        match self {
            LabelMode::Map(interner) => interner.emplace_tuple(labels),
            LabelMode::Hash => murmur3_32_tuple(labels),
        }
    }
}
