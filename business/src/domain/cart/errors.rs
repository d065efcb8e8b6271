#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("cart.id_empty")]
    IdEmpty,
    #[error("cart.price_negative")]
    PriceNegative,
    #[error("storage.persistence")]
    Storage(#[from] crate::domain::errors::StorageError),
}
