use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use business::domain::cart::model::CartLine;
use business::domain::shared::value_objects::ProductId;

/// Persisted shape of one cart line, kept apart from the domain model so
/// the on-disk format holds still while the model moves. The price is a
/// plain JSON number.
#[derive(Debug, Serialize, Deserialize)]
pub struct CartLineRecord {
    pub id: String,
    pub name: String,
    pub sku: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

impl CartLineRecord {
    pub fn from_domain(line: &CartLine) -> Self {
        Self {
            id: line.id.as_str().to_string(),
            name: line.name.clone(),
            sku: line.sku.clone(),
            image: line.image.clone(),
            price: line.price,
            quantity: line.quantity,
        }
    }

    pub fn into_domain(self) -> CartLine {
        CartLine::from_stored(
            ProductId::new(self.id),
            self.name,
            self.price,
            self.image,
            self.sku,
            self.quantity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> CartLine {
        CartLine::from_stored(
            ProductId::new("shoe-trail-runner"),
            "Trail Runner".to_string(),
            Decimal::new(8999, 2),
            Some("/images/trail-runner.jpg".to_string()),
            "TR-001".to_string(),
            2,
        )
    }

    #[test]
    fn should_serialize_price_as_json_number() {
        let record = CartLineRecord::from_domain(&line());

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["price"], serde_json::json!(89.99));
        assert_eq!(value["quantity"], serde_json::json!(2));
    }

    #[test]
    fn should_map_between_record_and_domain() {
        let original = line();

        let round_tripped = CartLineRecord::from_domain(&original).into_domain();

        assert_eq!(round_tripped, original);
    }

    #[test]
    fn should_parse_record_without_image_field() {
        let raw = r#"{"id":"shoe-a","name":"Shoe A","sku":"A-001","price":50.0,"quantity":1}"#;

        let record: CartLineRecord = serde_json::from_str(raw).unwrap();

        assert!(record.image.is_none());
        assert_eq!(record.price, Decimal::new(50, 0));
    }
}
