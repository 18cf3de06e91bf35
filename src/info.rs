//! Info functions: pure per-record extractors producing the value an aggregator
//! consumes.
//!
//! Aggregation may call an info function from several worker threads and in any
//! order, so every extractor here is a plain `Fn` without side effects.

use std::collections::HashMap;
use std::hash::Hash;

use crate::category::codec::StaticCodec;

/// Ignore the record and always yield `v`.
pub fn constant<D, V: Clone>(v: V) -> impl Fn(&D) -> V {
    move |_| v.clone()
}

/// The whole record.
pub fn value<D: Clone>() -> impl Fn(&D) -> D {
    |d: &D| d.clone()
}

/// Element `i` of a sequence record, or `default` when the record is too short.
pub fn value_at<D, T>(i: usize, default: T) -> impl Fn(&D) -> T
where
    D: AsRef<[T]>,
    T: Clone,
{
    move |d: &D| d.as_ref().get(i).cloned().unwrap_or_else(|| default.clone())
}

/// Entry `key` of a map record, or `default` when missing.
pub fn key<K, V>(key: K, default: V) -> impl Fn(&HashMap<K, V>) -> V
where
    K: Eq + Hash,
    V: Clone,
{
    move |d: &HashMap<K, V>| d.get(&key).cloned().unwrap_or_else(|| default.clone())
}

/// Dense code of the record under a fixed codec.
pub fn encode<L: Eq + Hash>(codec: StaticCodec<L>) -> impl Fn(&L) -> usize {
    move |label: &L| codec.encode(label)
}
