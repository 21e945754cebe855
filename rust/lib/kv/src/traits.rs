use crate::error::KVError;

/// KVStore is the document collection the record service persists into.
///
/// Keys follow a namespaced convention: `users:{id}`. Values are opaque
/// bytes (the service stores JSON documents).
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, inserting or overwriting.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Overwrite the value of an existing key. Returns false, writing
    /// nothing, when the key does not exist.
    fn replace(&self, key: &str, value: &[u8]) -> Result<bool, KVError>;

    /// Delete a key. Returns the removed value, or None if the key did
    /// not exist.
    fn delete(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Scan all keys matching a prefix. Returns (key, value) pairs sorted by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;
}
