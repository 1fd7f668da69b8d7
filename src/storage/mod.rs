//! # Storage Module - Collection Persistence Layer
//!
//! Durable key→document storage for the game state. Each named collection
//! (`players`, `economy`, `world`, `guilds`, ...) lives in its own JSON file as an
//! id→document map. The store enforces no schema; each caller owns the shape of
//! its documents.
//!
//! ## Guarantees
//!
//! - **Atomic commits**: every write lands in `<collection>.json.tmp` first and is
//!   renamed over the live file, so a crash mid-write leaves the previously
//!   committed state fully intact.
//! - **Serialized writers per collection**: a per-collection async mutex serializes
//!   read-modify-write cycles against the same collection while letting different
//!   collections commit concurrently. Record-level mutation goes through
//!   [`JsonStore::update_collection`], which holds the lock across the whole cycle
//!   so concurrent trades against the same item cannot lose updates.
//! - **Reads degrade, writes propagate**: a missing or unparsable file reads as an
//!   empty collection (logged, never an error); a failed write removes its temp
//!   file, leaves the committed file untouched, and returns the error to the caller.
//!
//! File access is additionally guarded with `fs2` advisory locks (shared for read,
//! exclusive for write) against other processes poking at the data directory.

use std::collections::HashMap;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex as StdMutex};

use fs2::FileExt;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Mutex as AsyncMutex;

use crate::clock::{Clock, SystemClock};

/// Timestamp field stamped onto every record on write.
pub const UPDATED_AT_FIELD: &str = "_updatedAt";

/// Errors raised by the collection store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying filesystem failure (disk full, permissions, rename).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be serialized.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Returned when mutating a record that is not present.
    #[error("record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },
}

type CollectionMap = HashMap<String, Value>;

/// File-backed collection store with per-collection write serialization.
pub struct JsonStore {
    data_dir: PathBuf,
    clock: Arc<dyn Clock>,
    locks: StdMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl JsonStore {
    /// Open (or create) a store rooted at `path` using the system clock.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::open_with_clock(path, Arc::new(SystemClock))
    }

    /// Open with an injected clock. Tests use this to control `_updatedAt` stamps.
    pub fn open_with_clock<P: AsRef<Path>>(
        path: P,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        let data_dir = path.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            clock,
            locks: StdMutex::new(HashMap::new()),
        })
    }

    fn file_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    fn collection_lock(&self, collection: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().expect("lock table poisoned");
        locks
            .entry(collection.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    // ── Reads ────────────────────────────────────────────────────────────────

    /// Read an entire collection. Never fails: a missing or corrupt file yields
    /// an empty map and a log line.
    pub fn read_collection(&self, collection: &str) -> CollectionMap {
        let path = self.file_path(collection);
        let mut file = match fs::OpenOptions::new().read(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return CollectionMap::new(),
            Err(e) => {
                error!("store: failed opening {collection}: {e}");
                return CollectionMap::new();
            }
        };
        if let Err(e) = file.lock_shared() {
            warn!("store: shared lock on {collection} failed: {e}");
        }
        let mut raw = String::new();
        if let Err(e) = file.read_to_string(&mut raw) {
            error!("store: failed reading {collection}: {e}");
            return CollectionMap::new();
        }
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                error!("store: {collection} is unparsable, treating as empty: {e}");
                CollectionMap::new()
            }
        }
    }

    /// Get a single record by id, or `None` if the record or collection is absent.
    pub fn get_record(&self, collection: &str, id: &str) -> Option<Value> {
        self.read_collection(collection).remove(id)
    }

    /// Check whether a record exists.
    pub fn has_record(&self, collection: &str, id: &str) -> bool {
        self.read_collection(collection).contains_key(id)
    }

    /// All records in a collection, each with its key injected as an `"id"` field.
    pub fn get_all_records(&self, collection: &str) -> Vec<Value> {
        self.read_collection(collection)
            .into_iter()
            .map(|(id, mut doc)| {
                if let Value::Object(obj) = &mut doc {
                    obj.insert("id".to_string(), Value::String(id));
                }
                doc
            })
            .collect()
    }

    /// Typed read of a single record.
    pub fn get_doc<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Option<T> {
        let value = self.get_record(collection, id)?;
        match serde_json::from_value(value) {
            Ok(doc) => Some(doc),
            Err(e) => {
                warn!("store: {collection}/{id} failed to deserialize: {e}");
                None
            }
        }
    }

    /// Typed read of a whole collection. Entries that fail to deserialize are
    /// skipped with a warning rather than poisoning the read.
    pub fn read_collection_as<T: DeserializeOwned>(&self, collection: &str) -> HashMap<String, T> {
        let mut out = HashMap::new();
        for (id, value) in self.read_collection(collection) {
            match serde_json::from_value(value) {
                Ok(doc) => {
                    out.insert(id, doc);
                }
                Err(e) => warn!("store: skipping bad entry {collection}/{id}: {e}"),
            }
        }
        out
    }

    // ── Writes ───────────────────────────────────────────────────────────────

    /// Replace an entire collection atomically, serialized against other writers
    /// to the same collection.
    pub async fn write_collection(
        &self,
        collection: &str,
        data: &CollectionMap,
    ) -> Result<(), StoreError> {
        let lock = self.collection_lock(collection);
        let _guard = lock.lock().await;
        self.commit(collection, data)
    }

    /// Read-modify-write a collection under its lock. The closure mutates the
    /// in-memory map; the result is committed atomically afterwards. This is the
    /// primitive that makes concurrent trades against the same item safe.
    pub async fn update_collection<R>(
        &self,
        collection: &str,
        mutate: impl FnOnce(&mut CollectionMap) -> R,
    ) -> Result<R, StoreError> {
        let lock = self.collection_lock(collection);
        let _guard = lock.lock().await;
        let mut map = self.read_collection(collection);
        let result = mutate(&mut map);
        self.commit(collection, &map)?;
        Ok(result)
    }

    /// Typed variant of [`Self::update_collection`].
    pub async fn update_collection_as<T, R>(
        &self,
        collection: &str,
        mutate: impl FnOnce(&mut HashMap<String, T>) -> R,
    ) -> Result<R, StoreError>
    where
        T: Serialize + DeserializeOwned,
    {
        let lock = self.collection_lock(collection);
        let _guard = lock.lock().await;
        let raw = self.read_collection(collection);
        let mut typed: HashMap<String, T> = HashMap::new();
        for (id, value) in raw {
            match serde_json::from_value(value) {
                Ok(doc) => {
                    typed.insert(id, doc);
                }
                Err(e) => warn!("store: skipping bad entry {collection}/{id}: {e}"),
            }
        }
        let result = mutate(&mut typed);
        let mut out = CollectionMap::with_capacity(typed.len());
        for (id, doc) in typed {
            out.insert(id, serde_json::to_value(doc)?);
        }
        self.commit(collection, &out)?;
        Ok(result)
    }

    /// Upsert a single record, stamping [`UPDATED_AT_FIELD`].
    pub async fn set_record(
        &self,
        collection: &str,
        id: &str,
        mut doc: Value,
    ) -> Result<Value, StoreError> {
        self.stamp(&mut doc);
        let id = id.to_string();
        self.update_collection(collection, move |map| {
            map.insert(id, doc.clone());
            doc
        })
        .await
    }

    /// Upsert with an optimistic-concurrency check: `expected_updated_at` is the
    /// stamp observed when the record was loaded. A mismatch is logged as a lost
    /// update warning but the write still proceeds.
    pub async fn set_record_guarded(
        &self,
        collection: &str,
        id: &str,
        mut doc: Value,
        expected_updated_at: Option<i64>,
    ) -> Result<Value, StoreError> {
        self.stamp(&mut doc);
        let id_owned = id.to_string();
        let col_owned = collection.to_string();
        self.update_collection(collection, move |map| {
            if let Some(existing) = map.get(&id_owned) {
                let stored = existing.get(UPDATED_AT_FIELD).and_then(Value::as_i64);
                if stored != expected_updated_at {
                    warn!(
                        "store: overwriting {col_owned}/{id_owned} which changed since load \
                         (loaded stamp {expected_updated_at:?}, stored {stored:?})"
                    );
                }
            }
            map.insert(id_owned, doc.clone());
            doc
        })
        .await
    }

    /// Typed upsert.
    pub async fn set_doc<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
    ) -> Result<(), StoreError> {
        let value = serde_json::to_value(doc)?;
        self.set_record(collection, id, value).await?;
        Ok(())
    }

    /// Merge `patch`'s fields into an existing record. Unlike upsert this fails
    /// with [`StoreError::NotFound`] when the record is absent; callers rely on
    /// that distinction.
    pub async fn patch_record(
        &self,
        collection: &str,
        id: &str,
        patch: Value,
    ) -> Result<Value, StoreError> {
        let id_owned = id.to_string();
        let col_owned = collection.to_string();
        let stamp = self.clock.now_millis();
        self.update_collection(collection, move |map| {
            let Some(existing) = map.get_mut(&id_owned) else {
                return Err(StoreError::NotFound {
                    collection: col_owned,
                    id: id_owned,
                });
            };
            match (&mut *existing, patch) {
                (Value::Object(target), Value::Object(fields)) => {
                    for (key, value) in fields {
                        target.insert(key, value);
                    }
                    target.insert(UPDATED_AT_FIELD.to_string(), Value::from(stamp));
                }
                // Non-object documents are replaced wholesale; the replacement
                // is stamped too when it can carry the field.
                (target, mut other) => {
                    if let Value::Object(obj) = &mut other {
                        obj.insert(UPDATED_AT_FIELD.to_string(), Value::from(stamp));
                    }
                    *target = other;
                }
            }
            Ok(existing.clone())
        })
        .await?
    }

    /// Delete a record. Deleting an absent record is a no-op.
    pub async fn delete_record(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let id = id.to_string();
        self.update_collection(collection, move |map| {
            map.remove(&id);
        })
        .await
    }

    fn stamp(&self, doc: &mut Value) {
        if let Value::Object(obj) = doc {
            obj.insert(
                UPDATED_AT_FIELD.to_string(),
                Value::from(self.clock.now_millis()),
            );
        }
    }

    /// Serialize and commit a collection via temp file + atomic rename. Must only
    /// be called while holding the collection's lock.
    fn commit(&self, collection: &str, data: &CollectionMap) -> Result<(), StoreError> {
        let path = self.file_path(collection);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(data)?;

        let result = (|| -> Result<(), StoreError> {
            let mut file = fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&tmp)?;
            if let Err(e) = file.lock_exclusive() {
                warn!("store: exclusive lock on {collection} tmp failed: {e}");
            }
            file.write_all(&bytes)?;
            file.sync_all()?;
            drop(file);
            fs::rename(&tmp, &path)?;
            Ok(())
        })();

        if let Err(e) = &result {
            error!("store: write of {collection} failed, previous state kept: {e}");
            let _ = fs::remove_file(&tmp);
        } else {
            debug!("store: committed {collection} ({} records)", data.len());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().expect("tempdir");
        let store = JsonStore::open(dir.path()).expect("store");
        (dir, store)
    }

    #[tokio::test]
    async fn missing_collection_reads_empty() {
        let (_dir, store) = store();
        assert!(store.read_collection("players").is_empty());
        assert!(store.get_record("players", "alice").is_none());
    }

    #[tokio::test]
    async fn set_and_get_record_round_trip() {
        let (_dir, store) = store();
        store
            .set_record("players", "alice", json!({"gold": 100}))
            .await
            .expect("set");
        let doc = store.get_record("players", "alice").expect("present");
        assert_eq!(doc["gold"], 100);
        assert!(doc[UPDATED_AT_FIELD].is_i64(), "write stamps _updatedAt");
    }

    #[tokio::test]
    async fn patch_requires_existing_record() {
        let (_dir, store) = store();
        let err = store
            .patch_record("players", "ghost", json!({"gold": 1}))
            .await
            .expect_err("patch of missing record must fail");
        assert!(matches!(err, StoreError::NotFound { .. }));

        store
            .set_record("players", "alice", json!({"gold": 100, "level": 3}))
            .await
            .expect("set");
        let patched = store
            .patch_record("players", "alice", json!({"gold": 250}))
            .await
            .expect("patch");
        assert_eq!(patched["gold"], 250);
        assert_eq!(patched["level"], 3, "untouched fields survive a patch");
    }

    #[tokio::test]
    async fn patch_stamps_a_wholesale_replacement() {
        let (_dir, store) = store();
        store
            .set_record("counters", "battles", json!(7))
            .await
            .expect("set scalar");
        let patched = store
            .patch_record("counters", "battles", json!({"total": 8}))
            .await
            .expect("patch");
        assert_eq!(patched["total"], 8);
        assert!(
            patched[UPDATED_AT_FIELD].is_i64(),
            "replacement carries the stamp"
        );
    }

    #[tokio::test]
    async fn delete_and_has_record() {
        let (_dir, store) = store();
        store
            .set_record("guilds", "g1", json!({"name": "Ironclads"}))
            .await
            .expect("set");
        assert!(store.has_record("guilds", "g1"));
        store.delete_record("guilds", "g1").await.expect("delete");
        assert!(!store.has_record("guilds", "g1"));
        // deleting again is a no-op
        store.delete_record("guilds", "g1").await.expect("delete");
    }

    #[tokio::test]
    async fn get_all_records_injects_id() {
        let (_dir, store) = store();
        store
            .set_record("pets", "p1", json!({"name": "Wolf Pup"}))
            .await
            .expect("set");
        let all = store.get_all_records("pets");
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["id"], "p1");
    }

    #[tokio::test]
    async fn corrupt_file_degrades_to_empty() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("economy.json"), b"{not json at all").unwrap();
        assert!(store.read_collection("economy").is_empty());
    }

    #[tokio::test]
    async fn crash_between_tmp_write_and_rename_keeps_old_state() {
        let (dir, store) = store();
        store
            .set_record("world", "current", json!({"eventId": "gold_rush"}))
            .await
            .expect("set");

        // Simulate a crash: a fully written tmp file that never got renamed.
        std::fs::write(
            dir.path().join("world.json.tmp"),
            br#"{"current": {"eventId": "CORRUPT"}}"#,
        )
        .unwrap();

        let doc = store.get_record("world", "current").expect("present");
        assert_eq!(doc["eventId"], "gold_rush", "committed state untouched");

        // The next write overwrites the stale tmp and commits cleanly.
        store
            .set_record("world", "current", json!({"eventId": "scarcity"}))
            .await
            .expect("set after stale tmp");
        let doc = store.get_record("world", "current").expect("present");
        assert_eq!(doc["eventId"], "scarcity");
    }

    #[tokio::test]
    async fn concurrent_updates_to_same_collection_do_not_lose_writes() {
        let (_dir, store) = store();
        let store = std::sync::Arc::new(store);
        store
            .set_record("economy", "iron_sword", json!({"demand": 0}))
            .await
            .expect("seed");

        let mut handles = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .update_collection("economy", |map| {
                        let entry = map.get_mut("iron_sword").expect("seeded");
                        let demand = entry["demand"].as_i64().unwrap();
                        entry["demand"] = Value::from(demand + 1);
                    })
                    .await
                    .expect("update");
            }));
        }
        for handle in handles {
            handle.await.expect("join");
        }
        let doc = store.get_record("economy", "iron_sword").expect("present");
        assert_eq!(doc["demand"], 20, "no lost updates under concurrency");
    }

    #[tokio::test]
    async fn typed_round_trip() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Widget {
            size: u32,
        }
        let (_dir, store) = store();
        store
            .set_doc("widgets", "w", &Widget { size: 9 })
            .await
            .expect("set");
        let w: Widget = store.get_doc("widgets", "w").expect("doc");
        assert_eq!(w, Widget { size: 9 });
    }
}
