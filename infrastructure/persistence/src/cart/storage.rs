use std::path::Path;

use business::domain::cart::model::CartLine;
use business::domain::cart::storage::CartStorage;
use business::domain::errors::StorageError;

use crate::slot::JsonSlot;

use super::record::CartLineRecord;

/// JSON-file adapter for the cart storage port. The cart owns exactly one
/// slot, `<data_dir>/cart.json`.
pub struct JsonFileCartStorage {
    slot: JsonSlot,
}

impl JsonFileCartStorage {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            slot: JsonSlot::new(data_dir.join("cart.json")),
        }
    }
}

impl CartStorage for JsonFileCartStorage {
    fn load(&self) -> Result<Option<Vec<CartLine>>, StorageError> {
        let records: Option<Vec<CartLineRecord>> = self.slot.load()?;
        Ok(records.map(|records| {
            records
                .into_iter()
                .map(CartLineRecord::into_domain)
                .collect()
        }))
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        let records: Vec<CartLineRecord> = lines.iter().map(CartLineRecord::from_domain).collect();
        self.slot.save(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use business::application::cart::store::CartStore;
    use business::domain::cart::model::ProductSnapshot;
    use business::domain::shared::value_objects::ProductId;
    use logger::TracingLogger;
    use rust_decimal::Decimal;
    use std::fs;
    use std::sync::Arc;

    fn stored_line(id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine::from_stored(
            ProductId::new(id),
            format!("Shoe {}", id),
            Decimal::new(price, 0),
            None,
            id.to_uppercase(),
            quantity,
        )
    }

    #[test]
    fn should_load_none_when_cart_never_saved() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileCartStorage::new(dir.path());

        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn should_round_trip_cart_lines() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileCartStorage::new(dir.path());
        let lines = vec![stored_line("shoe-a", 50, 2), stored_line("shoe-b", 30, 1)];

        storage.save(&lines).unwrap();
        let loaded = storage.load().unwrap().unwrap();

        assert_eq!(loaded, lines);
    }

    #[test]
    fn should_report_malformed_content() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileCartStorage::new(dir.path());
        fs::write(dir.path().join("cart.json"), "{{{").unwrap();

        assert!(matches!(storage.load(), Err(StorageError::Malformed)));
    }

    #[test]
    fn should_load_document_in_the_published_format() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileCartStorage::new(dir.path());
        fs::write(
            dir.path().join("cart.json"),
            r#"[{"id":"shoe-a","name":"Shoe A","sku":"A-001","image":null,"price":59.99,"quantity":2}]"#,
        )
        .unwrap();

        let loaded = storage.load().unwrap().unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.as_str(), "shoe-a");
        assert_eq!(loaded[0].price, Decimal::new(5999, 2));
        assert_eq!(loaded[0].quantity, 2);
    }

    /// A store reopened on the same directory behaves like the app after
    /// a restart: every mutation committed before shutdown is still there.
    #[test]
    fn should_survive_restart_of_the_cart_store() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = |id: &str, price: i64| ProductSnapshot {
            id: ProductId::new(id),
            name: format!("Shoe {}", id),
            price: Decimal::new(price, 0),
            image: None,
            sku: id.to_uppercase(),
        };

        let store = CartStore::open(
            Arc::new(JsonFileCartStorage::new(dir.path())),
            Arc::new(TracingLogger),
        );
        store.add_item(snapshot("shoe-a", 50)).unwrap();
        store.add_item(snapshot("shoe-b", 30)).unwrap();
        store.add_item(snapshot("shoe-a", 50)).unwrap();
        store
            .update_quantity(&ProductId::new("shoe-b"), 4)
            .unwrap();
        drop(store);

        let reloaded = CartStore::open(
            Arc::new(JsonFileCartStorage::new(dir.path())),
            Arc::new(TracingLogger),
        );

        assert_eq!(reloaded.total_items(), 6);
        assert_eq!(reloaded.total_price(), Decimal::new(220, 0));
        let lines = reloaded.lines();
        assert_eq!(lines[0].id.as_str(), "shoe-a");
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[1].id.as_str(), "shoe-b");
        assert_eq!(lines[1].quantity, 4);
    }
}
