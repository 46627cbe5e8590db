use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

/// Single-slot key for the most recent score result; overwritten per scan.
pub const RESULT_KEY: &str = "nutriscore_result";
/// Key for the bounded history log.
pub const HISTORY_KEY: &str = "nutriscore_history";

/// The client-resident key-value store: one JSON document per key, written
/// atomically (temp file + rename). Keys are independent; there is no
/// transaction spanning more than one key.
pub struct LocalStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl LocalStore {
    pub fn open(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .with_context(|| format!("create local store dir {}", dir.display()))?;
        info!(dir = %dir.display(), "opened local store");
        Ok(Self {
            dir,
            lock: Mutex::new(()),
        })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.read_key(key)
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write_key(key, value)
    }

    pub fn remove(&self, key: &str) -> anyhow::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Read-modify-write on one key under the store lock. `f` receives the
    /// current value (None when the key is absent) and returns the value to
    /// persist plus a result passed back to the caller.
    pub fn update<T, R, F>(&self, key: &str, f: F) -> anyhow::Result<R>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> (T, R),
    {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let current = self.read_key(key)?;
        let (next, out) = f(current);
        self.write_key(key, &next)?;
        Ok(out)
    }

    fn read_key<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match fs::read(self.key_path(key)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_key<T: Serialize>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let path = self.key_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, serde_json::to_vec(value)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (LocalStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn get_of_missing_key_is_none() {
        let (store, _dir) = create_test_store();
        let value: Option<Vec<u32>> = store.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn put_then_get_roundtrips() {
        let (store, _dir) = create_test_store();
        store.put("k", &vec![1u32, 2, 3]).unwrap();
        let value: Option<Vec<u32>> = store.get("k").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn keys_are_independent() {
        let (store, _dir) = create_test_store();
        store.put(RESULT_KEY, &"current").unwrap();
        store.put(HISTORY_KEY, &vec!["a", "b"]).unwrap();

        store.remove(RESULT_KEY).unwrap();
        let result: Option<String> = store.get(RESULT_KEY).unwrap();
        let history: Option<Vec<String>> = store.get(HISTORY_KEY).unwrap();
        assert!(result.is_none());
        assert_eq!(history, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn remove_of_missing_key_is_ok() {
        let (store, _dir) = create_test_store();
        store.remove("never-written").unwrap();
    }

    #[test]
    fn update_sees_current_value_and_persists() {
        let (store, _dir) = create_test_store();
        store.put("n", &10u32).unwrap();
        let doubled = store
            .update("n", |v: Option<u32>| {
                let next = v.unwrap_or(0) * 2;
                (next, next)
            })
            .unwrap();
        assert_eq!(doubled, 20);
        assert_eq!(store.get::<u32>("n").unwrap(), Some(20));
    }
}
