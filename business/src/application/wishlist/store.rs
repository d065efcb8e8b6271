use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::ProductId;
use crate::domain::wishlist::errors::WishlistError;
use crate::domain::wishlist::storage::WishlistStorage;

/// Ordered set of wishlisted product identities, persisted in its own
/// storage slot. Unlike the cart there is no observer mechanism: each
/// surface reads the wishlist when it needs it.
pub struct WishlistStore {
    storage: Arc<dyn WishlistStorage>,
    logger: Arc<dyn Logger>,
    product_ids: Mutex<Vec<ProductId>>,
}

impl WishlistStore {
    /// Opens the wishlist, hydrating from the storage slot. Missing,
    /// unreadable, or malformed data yields an empty wishlist.
    pub fn open(storage: Arc<dyn WishlistStorage>, logger: Arc<dyn Logger>) -> Self {
        let product_ids = match storage.load() {
            Ok(Some(stored)) => sanitize(stored, logger.as_ref()),
            Ok(None) => {
                logger.debug("No persisted wishlist, starting empty");
                Vec::new()
            }
            Err(e) => {
                logger.warn(&format!("Discarding unusable persisted wishlist: {}", e));
                Vec::new()
            }
        };

        Self {
            storage,
            logger,
            product_ids: Mutex::new(product_ids),
        }
    }

    /// Adds the id when absent, removes it when present. Returns whether
    /// the product is wishlisted afterwards. Persists before committing,
    /// like every cart mutation.
    pub fn toggle(&self, id: &ProductId) -> Result<bool, WishlistError> {
        if id.as_str().trim().is_empty() {
            return Err(WishlistError::IdEmpty);
        }

        let mut product_ids = self.lock();
        let mut next = product_ids.clone();
        let wishlisted = if next.contains(id) {
            next.retain(|existing| existing != id);
            self.logger.info(&format!("Removing from wishlist: {}", id));
            false
        } else {
            next.push(id.clone());
            self.logger.info(&format!("Adding to wishlist: {}", id));
            true
        };

        self.storage.save(&next).map_err(|e| {
            self.logger
                .error(&format!("Failed to persist wishlist: {}", e));
            WishlistError::Storage(e)
        })?;
        *product_ids = next;
        Ok(wishlisted)
    }

    /// Empties the wishlist unconditionally.
    pub fn clear(&self) -> Result<(), WishlistError> {
        self.logger.info("Clearing wishlist");
        let mut product_ids = self.lock();
        self.storage.save(&[]).map_err(|e| {
            self.logger
                .error(&format!("Failed to persist wishlist: {}", e));
            WishlistError::Storage(e)
        })?;
        product_ids.clear();
        Ok(())
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.lock().contains(id)
    }

    /// The wishlisted identities in insertion order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ProductId>> {
        self.product_ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drops empty identities and duplicates from hydrated data, keeping the
/// first occurrence of each id.
fn sanitize(stored: Vec<ProductId>, logger: &dyn Logger) -> Vec<ProductId> {
    let mut product_ids: Vec<ProductId> = Vec::new();
    for id in stored {
        if id.as_str().trim().is_empty() {
            logger.warn("Dropping empty persisted wishlist id");
            continue;
        }
        if product_ids.contains(&id) {
            logger.warn(&format!("Dropping duplicate persisted wishlist id: {}", id));
            continue;
        }
        product_ids.push(id);
    }
    product_ids
}
