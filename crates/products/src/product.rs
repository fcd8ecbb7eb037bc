use serde::{Deserialize, Serialize};

use shopfront_core::{DomainError, DomainResult};

/// Price in the smallest currency unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);
    pub const MAX: Price = Price(u64::MAX);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&crate::format::price_label(*self))
    }
}

/// Product category (compared exactly, no case folding).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Customer rating, bounded to `Rating::MIN..=Rating::MAX`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::validation("rating must be a finite number"));
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(DomainError::validation(format!(
                "rating {value} outside {}..={}",
                Self::MIN,
                Self::MAX
            )));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Wire shape of a single catalog entry.
///
/// All fields are required. A negative or fractional `price` fails to decode
/// because the wire type is unsigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: u64,
    pub rating: f64,
    pub image: String,
}

/// Immutable catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    name: String,
    brand: String,
    category: Category,
    price: Price,
    rating: Rating,
    image: String,
}

impl Product {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Decode and validate a single JSON entry.
    pub fn from_json(value: serde_json::Value) -> DomainResult<Self> {
        let record: ProductRecord = serde_json::from_value(value)
            .map_err(|e| DomainError::validation(format!("malformed product record: {e}")))?;
        Self::try_from(record)
    }
}

fn require_text(field: &str, value: String) -> DomainResult<String> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            name: require_text("name", record.name)?,
            brand: require_text("brand", record.brand)?,
            category: Category::new(require_text("category", record.category)?),
            price: Price::new(record.price),
            rating: Rating::new(record.rating)?,
            image: require_text("image", record.image)?,
        })
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.as_str().to_string(),
            price: product.price.amount(),
            rating: product.rating.value(),
            image: product.image.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn air_max() -> ProductRecord {
        ProductRecord {
            name: "Air Max".to_string(),
            brand: "Nike".to_string(),
            category: "shoes".to_string(),
            price: 8000,
            rating: 4.5,
            image: "a.jpg".to_string(),
        }
    }

    #[test]
    fn valid_record_converts() {
        let product = Product::try_from(air_max()).unwrap();
        assert_eq!(product.name(), "Air Max");
        assert_eq!(product.brand(), "Nike");
        assert_eq!(product.category(), &Category::new("shoes"));
        assert_eq!(product.price(), Price::new(8000));
        assert_eq!(product.rating().value(), 4.5);
        assert_eq!(product.image(), "a.jpg");
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut record = air_max();
        record.name = "   ".to_string();

        let err = Product::try_from(record).unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("name")),
            _ => panic!("Expected Validation error for blank name"),
        }
    }

    #[test]
    fn out_of_range_rating_is_rejected() {
        let mut record = air_max();
        record.rating = 7.2;
        assert!(Product::try_from(record).unwrap_err().is_validation());

        let mut record = air_max();
        record.rating = f64::NAN;
        assert!(Product::try_from(record).unwrap_err().is_validation());
    }

    #[test]
    fn missing_price_is_rejected_at_decode() {
        let value = json!({
            "name": "Air Max",
            "brand": "Nike",
            "category": "shoes",
            "rating": 4.5,
            "image": "a.jpg"
        });
        assert!(Product::from_json(value).unwrap_err().is_validation());
    }

    #[test]
    fn negative_or_fractional_price_is_rejected_at_decode() {
        for price in [json!(-1), json!(10.5), json!("8000")] {
            let value = json!({
                "name": "Air Max",
                "brand": "Nike",
                "category": "shoes",
                "price": price,
                "rating": 4.5,
                "image": "a.jpg"
            });
            assert!(Product::from_json(value).is_err());
        }
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let value = json!({
            "name": "Air Max",
            "brand": "Nike",
            "category": "shoes",
            "price": 8000,
            "rating": 4.5,
            "image": "a.jpg",
            "sku": "NK-1"
        });
        let product = Product::from_json(value).unwrap();
        assert_eq!(ProductRecord::from(&product), air_max());
    }
}
