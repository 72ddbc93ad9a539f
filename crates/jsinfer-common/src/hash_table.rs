//! Hash-consing storage keyed by a custom hash/equality pair.
//!
//! Keys carry their own 32-bit hash code and structural equality through the
//! [`Hashable`] trait instead of `std::hash::Hash`/`Eq`. This lets the type
//! arena hash a compound type by folding its constituents' hash codes (which
//! for primitives and symbols are identity counters, not content digests) and
//! still resolve collisions by structural comparison.
//!
//! Buckets are sparse: a bucket only exists once a key with that hash code has
//! been inserted. Within a bucket, lookups scan linearly with [`Hashable::equals`].

use crate::error::ContractViolation;
use rustc_hash::FxHashMap;

/// Multiplier used by [`hash_combine`].
const HASH_MULTIPLIER: u32 = 0xA555_5529;

/// A value with a caller-defined 32-bit hash code and matching equality.
///
/// Implementations must guarantee that `a.equals(b)` implies
/// `a.hash_code() == b.hash_code()`.
pub trait Hashable {
    fn hash_code(&self) -> i32;
    fn equals(&self, other: &Self) -> bool;
}

/// Fold one more hash code into an accumulator.
///
/// `acc' = low32(acc * 0xA5555529) + item`, all arithmetic wrapping at 32
/// bits. The fold is order sensitive: combining `[a, b]` and `[b, a]` gives
/// different results for almost all inputs.
#[inline]
pub fn hash_combine(acc: i32, item: i32) -> i32 {
    ((acc as u32).wrapping_mul(HASH_MULTIPLIER) as i32).wrapping_add(item)
}

/// Fold a sequence of hash codes left to right, starting from `seed`.
pub fn compute_hash<I>(seed: i32, items: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    items.into_iter().fold(seed, hash_combine)
}

/// Interning table from [`Hashable`] keys to values.
#[derive(Debug)]
pub struct HashTable<K, V> {
    buckets: FxHashMap<i32, Vec<(K, V)>>,
    len: usize,
}

impl<K, V> Default for HashTable<K, V> {
    fn default() -> Self {
        HashTable {
            buckets: FxHashMap::default(),
            len: 0,
        }
    }
}

impl<K: Hashable, V> HashTable<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Look up the value stored for a key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.buckets
            .get(&key.hash_code())?
            .iter()
            .find(|(existing, _)| existing.equals(key))
            .map(|(_, value)| value)
    }

    /// Insert `value` for `key`, overwriting the value of an equal key.
    pub fn set(&mut self, key: K, value: V) {
        let bucket = self.buckets.entry(key.hash_code()).or_default();
        if let Some(pair) = bucket.iter_mut().find(|(existing, _)| existing.equals(&key)) {
            pair.1 = value;
            return;
        }
        bucket.push((key, value));
        self.len += 1;
    }

    /// Insert `value` for `key`. An equal key already being present is a
    /// caller logic error.
    pub fn add(&mut self, key: K, value: V) -> Result<(), ContractViolation> {
        let hash = key.hash_code();
        let bucket = self.buckets.entry(hash).or_default();
        if bucket.iter().any(|(existing, _)| existing.equals(&key)) {
            return Err(ContractViolation::DuplicateKey { hash });
        }
        bucket.push((key, value));
        self.len += 1;
        Ok(())
    }

    /// Return the canonical value for `key`: the stored one if an equal key
    /// is present, otherwise `value` after inserting it.
    pub fn get_or_add(&mut self, key: K, value: V) -> &V {
        let bucket = self.buckets.entry(key.hash_code()).or_default();
        let position = match bucket.iter().position(|(existing, _)| existing.equals(&key)) {
            Some(position) => position,
            None => {
                bucket.push((key, value));
                self.len += 1;
                bucket.len() - 1
            }
        };
        &bucket[position].1
    }
}

#[cfg(test)]
#[path = "../tests/hash_table_tests.rs"]
mod hash_table_tests;
