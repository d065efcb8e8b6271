use crate::domain::errors::StorageError;
use crate::domain::shared::value_objects::ProductId;

/// Durable slot holding the wishlisted product identities, in insertion
/// order. Same contract as the cart slot: local synchronous substrate,
/// `Ok(None)` for a never-written slot, `Malformed` for undecodable content.
pub trait WishlistStorage: Send + Sync {
    fn load(&self) -> Result<Option<Vec<ProductId>>, StorageError>;
    fn save(&self, product_ids: &[ProductId]) -> Result<(), StorageError>;
}
