//! Ordered key-value storage for the reactions keeper, with filesystem and in-memory backends.
//!
//! Keys are raw byte strings compared lexicographically; prefix scans return entries in
//! ascending key order. Values written through [`TypedStore`] are canonical CBOR so two equal
//! records always produce identical bytes.

mod codec;
mod fs_store;
mod mem_store;

pub use codec::{Digest, DigestParseError, from_cbor, to_canonical_cbor};
pub use fs_store::FsStore;
pub use mem_store::MemStore;

use serde::{Serialize, de::DeserializeOwned};
use std::{io, path::PathBuf, sync::Arc};

pub type StoreResult<T> = Result<T, StoreError>;
pub type DynStore = Arc<dyn KvStore>;

/// A single key/value pair returned by a prefix scan.
pub type Entry = (Vec<u8>, Vec<u8>);

/// Trait implemented by all ordered key-value backends.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;
    fn set(&self, key: &[u8], value: &[u8]) -> StoreResult<()>;
    /// Removing an absent key is not an error.
    fn delete(&self, key: &[u8]) -> StoreResult<()>;
    /// Every entry whose key starts with `prefix`, in ascending key order.
    fn scan_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<Entry>>;

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Canonical-CBOR record helpers layered over any [`KvStore`].
pub trait TypedStore: KvStore {
    fn put_record<T: Serialize>(&self, key: &[u8], value: &T) -> StoreResult<()> {
        let bytes = to_canonical_cbor(value)?;
        self.set(key, &bytes)
    }

    fn get_record<T: DeserializeOwned>(&self, key: &[u8]) -> StoreResult<Option<T>> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(from_cbor(&bytes)?)),
            None => Ok(None),
        }
    }

    fn scan_records<T: DeserializeOwned>(&self, prefix: &[u8]) -> StoreResult<Vec<(Vec<u8>, T)>> {
        self.scan_prefix(prefix)?
            .into_iter()
            .map(|(key, bytes)| Ok((key, from_cbor(&bytes)?)))
            .collect()
    }
}

impl<S: KvStore + ?Sized> TypedStore for S {}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("CBOR serialization error: {0}")]
    Cbor(#[from] serde_cbor::Error),
    #[error("entry file '{name}' does not encode a key")]
    InvalidEntryName { name: String },
}

pub(crate) fn io_error(path: impl Into<PathBuf>, err: io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source: err,
    }
}

/// Exclusive upper bound for a prefix scan, or `None` when the prefix is all `0xff`.
pub(crate) fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_end_increments_last_byte() {
        assert_eq!(prefix_end(&[0x01, 0x02]), Some(vec![0x01, 0x03]));
        assert_eq!(prefix_end(&[0x01, 0xff]), Some(vec![0x02]));
        assert_eq!(prefix_end(&[0xff, 0xff]), None);
        assert_eq!(prefix_end(&[]), None);
    }
}
