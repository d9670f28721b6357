use crate::domain::ports::KeyValueStore;
use crate::error::{Result, SandboxError};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding every ledger slot.
pub const CF_LEDGERS: &str = "ledgers";

/// A persistent slot store backed by RocksDB.
///
/// Every logical key maps to one value in the `ledgers` column family.
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `ledgers` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_ledgers = ColumnFamilyDescriptor::new(CF_LEDGERS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_ledgers])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn missing_cf() -> SandboxError {
        SandboxError::InternalError(Box::new(std::io::Error::other(
            "Ledgers column family not found",
        )))
    }
}

#[async_trait]
impl KeyValueStore for RocksDBStore {
    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cf = self.db.cf_handle(CF_LEDGERS).ok_or_else(Self::missing_cf)?;
        Ok(self.db.get_cf(cf, key.as_bytes())?)
    }

    async fn save(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let cf = self.db.cf_handle(CF_LEDGERS).ok_or_else(Self::missing_cf)?;
        self.db.put_cf(cf, key.as_bytes(), value)?;
        Ok(())
    }
}
