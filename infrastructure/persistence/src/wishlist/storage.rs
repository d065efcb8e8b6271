use std::path::Path;

use business::domain::errors::StorageError;
use business::domain::shared::value_objects::ProductId;
use business::domain::wishlist::storage::WishlistStorage;

use crate::slot::JsonSlot;

/// JSON-file adapter for the wishlist storage port. The slot lives at
/// `<data_dir>/wishlist.json` and holds a bare array of identity strings.
pub struct JsonFileWishlistStorage {
    slot: JsonSlot,
}

impl JsonFileWishlistStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            slot: JsonSlot::new(data_dir.join("wishlist.json")),
        }
    }
}

impl WishlistStorage for JsonFileWishlistStorage {
    fn load(&self) -> Result<Option<Vec<ProductId>>, StorageError> {
        let ids: Option<Vec<String>> = self.slot.load()?;
        Ok(ids.map(|ids| ids.into_iter().map(ProductId::new).collect()))
    }

    fn save(&self, product_ids: &[ProductId]) -> Result<(), StorageError> {
        let ids: Vec<&str> = product_ids.iter().map(ProductId::as_str).collect();
        self.slot.save(&ids)
    }
}
