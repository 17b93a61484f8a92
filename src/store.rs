//! Embedded key-value store backing both services
//!
//! Wraps a redb database behind the small surface the handlers need:
//! get, put, conditional put, delete, enumerate, clear. Each service
//! opens its own database file, so the two stores are fully independent.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};

/// The single table used per store
///
/// Key: entry name (short-link key, or the fixed clipboard key)
/// Value: stored text (target URL, or clipboard contents)
const TABLE_KV: TableDefinition<&str, &str> = TableDefinition::new("kv_v1");

/// A key-value store backed by one redb database file
pub struct KvStore {
    db: Database,
}

impl KvStore {
    /// Creates or opens the database file at `path` and ensures the
    /// table exists.
    pub fn open(path: &str) -> Result<Self, redb::Error> {
        let db = Database::create(path)?;

        // Open the table once inside a committed transaction so later
        // readers never observe a missing table.
        let write_txn = db.begin_write()?;
        {
            write_txn.open_table(TABLE_KV)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Returns the value stored under `key`, or `None` if the key has
    /// never been written (distinct from an empty-string value).
    pub fn get(&self, key: &str) -> Result<Option<String>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_KV)?;

        Ok(table.get(key)?.map(|guard| guard.value().to_string()))
    }

    /// Writes `key -> value`, overwriting any previous value.
    pub fn put(&self, key: &str, value: &str) -> Result<(), redb::Error> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_KV)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;

        Ok(())
    }

    /// Writes `key -> value` only if `key` is currently unused.
    ///
    /// The existence check and the insert happen inside one write
    /// transaction, so two racing callers cannot both claim the same
    /// key. Returns `true` if the value was written, `false` if the key
    /// was already taken (in which case the existing value is untouched).
    pub fn put_if_absent(&self, key: &str, value: &str) -> Result<bool, redb::Error> {
        let write_txn = self.db.begin_write()?;
        let inserted = {
            let mut table = write_txn.open_table(TABLE_KV)?;
            if table.get(key)?.is_some() {
                false
            } else {
                table.insert(key, value)?;
                true
            }
        };
        write_txn.commit()?;

        Ok(inserted)
    }

    /// Removes `key`. Removing a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), redb::Error> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(TABLE_KV)?;
            table.remove(key)?;
        }
        write_txn.commit()?;

        Ok(())
    }

    /// Returns every `(key, value)` pair in store iteration order.
    ///
    /// redb iterates lexicographically by key, but callers must not
    /// rely on any particular ordering.
    pub fn entries(&self) -> Result<Vec<(String, String)>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TABLE_KV)?;

        let mut pairs = Vec::new();
        for item in table.iter()? {
            let (key, value) = item?;
            pairs.push((key.value().to_string(), value.value().to_string()));
        }

        Ok(pairs)
    }

    /// Deletes every key, returning how many were removed.
    ///
    /// All deletes run in a single write transaction: either the whole
    /// store is cleared or, on failure, nothing is.
    pub fn clear(&self) -> Result<usize, redb::Error> {
        let write_txn = self.db.begin_write()?;
        let removed = {
            let mut table = write_txn.open_table(TABLE_KV)?;

            let keys = table
                .iter()?
                .map(|item| item.map(|(key, _)| key.value().to_string()))
                .collect::<Result<Vec<_>, _>>()?;

            for key in &keys {
                table.remove(key.as_str())?;
            }
            keys.len()
        };
        write_txn.commit()?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn open_test_store() -> (KvStore, NamedTempFile) {
        let temp_db = NamedTempFile::new().expect("Failed to create temp file");
        let store = KvStore::open(temp_db.path().to_str().unwrap())
            .expect("Failed to open test store");
        (store, temp_db)
    }

    #[test]
    fn get_missing_key_is_none() {
        let (store, _temp_db) = open_test_store();

        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn empty_value_is_distinct_from_absence() {
        let (store, _temp_db) = open_test_store();

        store.put("blank", "").unwrap();

        assert_eq!(store.get("blank").unwrap(), Some(String::new()));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn put_overwrites() {
        let (store, _temp_db) = open_test_store();

        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn put_if_absent_only_claims_free_keys() {
        let (store, _temp_db) = open_test_store();

        // Occupy every candidate key except one
        store.put("aaa", "taken-1").unwrap();
        store.put("bbb", "taken-2").unwrap();

        assert!(!store.put_if_absent("aaa", "clobber").unwrap());
        assert!(!store.put_if_absent("bbb", "clobber").unwrap());
        assert!(store.put_if_absent("ccc", "fresh").unwrap());

        // Occupied keys kept their original values
        assert_eq!(store.get("aaa").unwrap(), Some("taken-1".to_string()));
        assert_eq!(store.get("bbb").unwrap(), Some("taken-2".to_string()));
        assert_eq!(store.get("ccc").unwrap(), Some("fresh".to_string()));
    }

    #[test]
    fn entries_returns_every_pair() {
        let (store, _temp_db) = open_test_store();

        store.put("a", "1").unwrap();
        store.put("b", "2").unwrap();
        store.put("c", "3").unwrap();

        let mut pairs = store.entries().unwrap();
        pairs.sort();

        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn clear_removes_everything() {
        let (store, _temp_db) = open_test_store();

        store.put("a", "1").unwrap();
        store.put("b", "2").unwrap();

        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.entries().unwrap().is_empty());
        assert_eq!(store.get("a").unwrap(), None);

        // Clearing an empty store is a no-op
        assert_eq!(store.clear().unwrap(), 0);
    }
}
