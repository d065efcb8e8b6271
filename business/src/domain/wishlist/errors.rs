#[derive(Debug, thiserror::Error)]
pub enum WishlistError {
    #[error("wishlist.id_empty")]
    IdEmpty,
    #[error("storage.persistence")]
    Storage(#[from] crate::domain::errors::StorageError),
}
