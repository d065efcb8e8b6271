use crate::domain::errors::StorageError;

use super::model::CartLine;

/// Durable slot holding the serialized cart line collection.
///
/// The substrate is local and synchronous (a file, an embedded database, a
/// browser storage bridge); implementations must make a returned `save`
/// durable before returning, and must report content they cannot decode as
/// [`StorageError::Malformed`] rather than inventing an empty collection —
/// the recovery policy belongs to the store, not the adapter.
pub trait CartStorage: Send + Sync {
    /// Loads the persisted line collection. `Ok(None)` means the slot has
    /// never been written.
    fn load(&self) -> Result<Option<Vec<CartLine>>, StorageError>;

    /// Replaces the slot content with the given collection, in order.
    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError>;
}
