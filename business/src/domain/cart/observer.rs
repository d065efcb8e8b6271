use super::model::CartLine;

/// Handle returned by `CartStore::subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl ObserverId {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A consumer kept in sync with cart mutations: a cart page, a header
/// badge, a checkout summary. Callbacks run synchronously on the mutating
/// thread, after the mutation has been persisted and committed and after
/// the store's internal lock has been released, so an observer may call
/// back into the store's read operations.
pub trait CartObserver: Send + Sync {
    fn cart_changed(&self, lines: &[CartLine]);
}
