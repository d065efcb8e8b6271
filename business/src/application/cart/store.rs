use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{CartLine, ProductSnapshot};
use crate::domain::cart::observer::{CartObserver, ObserverId};
use crate::domain::cart::storage::CartStorage;
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::ProductId;

/// Single source of truth for the shopping cart.
///
/// One instance is constructed at application startup and shared (`Arc`)
/// with every consumer; every mutation goes through it and every registered
/// observer sees every committed mutation. A mutation is persisted through
/// the storage port before it is committed in memory, so a reload right
/// after a returned mutation always observes it; a failed save leaves the
/// cart unchanged and notifies nobody.
pub struct CartStore {
    storage: Arc<dyn CartStorage>,
    logger: Arc<dyn Logger>,
    inner: Mutex<Inner>,
}

struct Inner {
    lines: Vec<CartLine>,
    observers: Vec<(ObserverId, Arc<dyn CartObserver>)>,
    next_observer: u64,
}

impl CartStore {
    /// Opens the cart, hydrating from the storage slot. A slot that is
    /// missing, unreadable, or malformed yields an empty cart; hydration
    /// failure is recovered here and never surfaced to the caller.
    pub fn open(storage: Arc<dyn CartStorage>, logger: Arc<dyn Logger>) -> Self {
        let lines = match storage.load() {
            Ok(Some(stored)) => {
                let lines = sanitize(stored, logger.as_ref());
                logger.info(&format!("Cart hydrated with {} lines", lines.len()));
                lines
            }
            Ok(None) => {
                logger.debug("No persisted cart, starting empty");
                Vec::new()
            }
            Err(e) => {
                logger.warn(&format!("Discarding unusable persisted cart: {}", e));
                Vec::new()
            }
        };

        Self {
            storage,
            logger,
            inner: Mutex::new(Inner {
                lines,
                observers: Vec::new(),
                next_observer: 0,
            }),
        }
    }

    /// Adds one unit of the described product. A line with the same id
    /// absorbs the add as a quantity increment and keeps its original
    /// price snapshot; otherwise a new line with quantity 1 is appended.
    pub fn add_item(&self, snapshot: ProductSnapshot) -> Result<(), CartError> {
        let line = CartLine::new(snapshot)?;
        self.logger.info(&format!("Adding to cart: {}", line.id));

        let inner = self.lock();
        let mut next = inner.lines.clone();
        match next.iter_mut().find(|l| l.id == line.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => next.push(line),
        }
        self.commit(inner, next)
    }

    /// Removes the line with the given id. Removing an id that is not in
    /// the cart is a no-op, not an error: nothing is saved and nobody is
    /// notified.
    pub fn remove_item(&self, id: &ProductId) -> Result<(), CartError> {
        let inner = self.lock();
        if !inner.lines.iter().any(|l| l.id == *id) {
            self.logger
                .debug(&format!("Cart line not present, nothing to remove: {}", id));
            return Ok(());
        }

        self.logger.info(&format!("Removing from cart: {}", id));
        let next: Vec<CartLine> = inner
            .lines
            .iter()
            .filter(|l| l.id != *id)
            .cloned()
            .collect();
        self.commit(inner, next)
    }

    /// Sets the exact quantity of the line with the given id. A quantity
    /// of zero removes the line, leaving the same state `remove_item`
    /// would. Unknown ids are a no-op.
    pub fn update_quantity(&self, id: &ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_item(id);
        }

        let inner = self.lock();
        if !inner.lines.iter().any(|l| l.id == *id) {
            self.logger
                .debug(&format!("Cart line not present, nothing to update: {}", id));
            return Ok(());
        }

        self.logger
            .info(&format!("Setting cart quantity to {} for {}", quantity, id));
        let mut next = inner.lines.clone();
        if let Some(line) = next.iter_mut().find(|l| l.id == *id) {
            line.quantity = quantity;
        }
        self.commit(inner, next)
    }

    /// Empties the cart unconditionally.
    pub fn clear(&self) -> Result<(), CartError> {
        self.logger.info("Clearing cart");
        let inner = self.lock();
        self.commit(inner, Vec::new())
    }

    /// The line collection in display order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.lock().lines.clone()
    }

    /// Sum of all quantities. Derived on every call, never cached.
    pub fn total_items(&self) -> u64 {
        self.lock()
            .lines
            .iter()
            .map(|l| u64::from(l.quantity))
            .sum()
    }

    /// Sum of `price * quantity` over all lines. Derived on every call,
    /// never cached. Currency rounding is a display concern.
    pub fn total_price(&self) -> Decimal {
        self.lock().lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().lines.is_empty()
    }

    /// Registers an observer; it will see every mutation committed from
    /// now on. The returned id hands it back to `unsubscribe`.
    pub fn subscribe(&self, observer: Arc<dyn CartObserver>) -> ObserverId {
        let mut inner = self.lock();
        let id = ObserverId::new(inner.next_observer);
        inner.next_observer += 1;
        inner.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&self, id: ObserverId) {
        self.lock().observers.retain(|(oid, _)| *oid != id);
    }

    /// Persists `next`, commits it, and notifies observers outside the
    /// lock. On a save failure the in-memory state is left untouched.
    fn commit(&self, mut inner: MutexGuard<'_, Inner>, next: Vec<CartLine>) -> Result<(), CartError> {
        self.storage.save(&next).map_err(|e| {
            self.logger.error(&format!("Failed to persist cart: {}", e));
            CartError::Storage(e)
        })?;

        inner.lines = next.clone();
        let observers: Vec<Arc<dyn CartObserver>> = inner
            .observers
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        drop(inner);

        for observer in &observers {
            observer.cart_changed(&next);
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Another writer can update the slot between runs (last write wins at the
/// substrate), so hydrated data is checked against the cart invariants:
/// lines with an empty id, a zero quantity, or a negative price are
/// dropped, and duplicate ids merge into the first occurrence.
fn sanitize(stored: Vec<CartLine>, logger: &dyn Logger) -> Vec<CartLine> {
    let mut lines: Vec<CartLine> = Vec::new();
    for line in stored {
        if line.id.as_str().trim().is_empty() || line.quantity == 0 || line.price < Decimal::ZERO {
            logger.warn(&format!("Dropping invalid persisted cart line: {}", line.id));
            continue;
        }
        match lines.iter_mut().find(|l| l.id == line.id) {
            Some(existing) => {
                logger.warn(&format!("Merging duplicate persisted cart line: {}", line.id));
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => lines.push(line),
        }
    }
    lines
}
