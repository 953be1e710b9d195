use crate::{Entry, KvStore, StoreError, StoreResult, io_error};
use std::{
    fmt,
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

const TMP_SUFFIX: &str = ".tmp";

/// Filesystem-backed store rooted at `<root>/.reactions/kv`.
///
/// Each entry lives in its own file named by the hex encoding of its key. Hex preserves
/// byte order, so sorting file names yields key order.
#[derive(Clone)]
pub struct FsStore {
    entries_dir: PathBuf,
}

impl fmt::Debug for FsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FsStore")
            .field("entries_dir", &self.entries_dir)
            .finish()
    }
}

impl FsStore {
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let entries_dir = root.as_ref().join(".reactions").join("kv");
        fs::create_dir_all(&entries_dir).map_err(|e| io_error(&entries_dir, e))?;
        Ok(Self { entries_dir })
    }

    fn entry_path(&self, key: &[u8]) -> PathBuf {
        self.entries_dir.join(hex::encode(key))
    }

    /// Write to a sibling temp file and rename over the target so readers never see a
    /// partially written value.
    fn write_replace(path: &Path, bytes: &[u8]) -> StoreResult<()> {
        let mut tmp = path.as_os_str().to_owned();
        tmp.push(TMP_SUFFIX);
        let tmp = PathBuf::from(tmp);
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp)
            .map_err(|e| io_error(&tmp, e))?;
        file.write_all(bytes).map_err(|e| io_error(&tmp, e))?;
        file.sync_all().map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| io_error(path, e))
    }
}

impl KvStore for FsStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let path = self.entry_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(path, err)),
        }
    }

    fn set(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        Self::write_replace(&self.entry_path(key), value)
    }

    fn delete(&self, key: &[u8]) -> StoreResult<()> {
        let path = self.entry_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error(path, err)),
        }
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<Entry>> {
        let hex_prefix = hex::encode(prefix);
        let dir = fs::read_dir(&self.entries_dir).map_err(|e| io_error(&self.entries_dir, e))?;

        let mut names = Vec::new();
        for item in dir {
            let item = item.map_err(|e| io_error(&self.entries_dir, e))?;
            let name = item.file_name().to_string_lossy().into_owned();
            if name.ends_with(TMP_SUFFIX) || !name.starts_with(&hex_prefix) {
                continue;
            }
            names.push(name);
        }
        names.sort();

        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let key = hex::decode(&name)
                .map_err(|_| StoreError::InvalidEntryName { name: name.clone() })?;
            let path = self.entries_dir.join(&name);
            match fs::read(&path) {
                Ok(value) => entries.push((key, value)),
                // removed between listing and reading
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => return Err(io_error(path, err)),
            }
        }
        Ok(entries)
    }

    fn has(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.entry_path(key).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypedStore;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Dummy {
        name: String,
        counter: u64,
    }

    #[test]
    fn record_round_trip() {
        let dir = TempDir::new().expect("tmp");
        let store = FsStore::open(dir.path()).expect("open");
        let value = Dummy {
            name: "demo".into(),
            counter: 42,
        };
        store.put_record(&[0x04, 0x01], &value).expect("put");
        assert!(store.has(&[0x04, 0x01]).expect("has"));
        let loaded: Option<Dummy> = store.get_record(&[0x04, 0x01]).expect("get");
        assert_eq!(Some(value), loaded);
    }

    #[test]
    fn set_overwrites_existing_value() {
        let dir = TempDir::new().expect("tmp");
        let store = FsStore::open(dir.path()).expect("open");
        store.set(b"key", b"first").unwrap();
        store.set(b"key", b"second").unwrap();
        assert_eq!(store.get(b"key").unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn scan_prefix_matches_key_order() {
        let dir = TempDir::new().expect("tmp");
        let store = FsStore::open(dir.path()).expect("open");
        store.set(&[0x02, 0x00, 0x0a], b"ten").unwrap();
        store.set(&[0x02, 0x00, 0x02], b"two").unwrap();
        store.set(&[0x02, 0x01, 0x01], b"sibling").unwrap();

        let entries = store.scan_prefix(&[0x02, 0x00]).unwrap();
        let keys: Vec<_> = entries.iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec![vec![0x02, 0x00, 0x02], vec![0x02, 0x00, 0x0a]]);
    }

    #[test]
    fn state_survives_reopen() {
        let dir = TempDir::new().expect("tmp");
        {
            let store = FsStore::open(dir.path()).expect("open");
            store.set(b"persist", b"yes").unwrap();
            store.delete(b"never-written").unwrap();
        }
        let reopened = FsStore::open(dir.path()).expect("reopen");
        assert_eq!(reopened.get(b"persist").unwrap(), Some(b"yes".to_vec()));
    }
}
