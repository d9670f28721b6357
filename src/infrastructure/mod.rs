pub mod clock;
pub mod in_memory;
pub mod json_file;
pub mod pacing;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
