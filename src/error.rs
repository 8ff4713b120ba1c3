//! Growth failures.
//!
//! Lookups and removals signal absence with `None`; the only failure a map
//! can hit is running out of room for a larger bucket array.

use core::fmt;
use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrowError {
    #[error("bucket array of {buckets} buckets cannot be doubled")]
    CapacityOverflow { buckets: usize },
    #[error("failed to allocate a bucket array of {buckets} buckets")]
    AllocFailed {
        buckets: usize,
        #[source]
        source: TryReserveError,
    },
}

/// Returned by `ChainHashMap::try_insert`. The map is unchanged and the
/// key and value are handed back.
#[derive(Error)]
#[error("insert failed: {error}")]
pub struct TryInsertError<K, V> {
    #[source]
    pub error: GrowError,
    pub key: K,
    pub value: V,
}

impl<K, V> TryInsertError<K, V> {
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> fmt::Debug for TryInsertError<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryInsertError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
