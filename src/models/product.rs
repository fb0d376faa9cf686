use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A catalog entry as stored, image bytes included.
///
/// Field names on the wire follow the web frontend (`imageDate` holds the
/// base64 encoded image).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub product_available: bool,
    pub stock_quantity: Option<i32>,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
    #[serde(rename = "imageDate", default, with = "base64_bytes")]
    pub image_data: Option<Vec<u8>>,
}

/// The `product` part of a create or update form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default = "default_available")]
    pub product_available: bool,
    pub stock_quantity: Option<i32>,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
}

/// The `imageFile` part of a create or update form, fully read.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Everything the store needs to write a row; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub product_available: bool,
    pub stock_quantity: Option<i32>,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
    pub image_data: Option<Vec<u8>>,
}

impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            brand: req.brand,
            price: req.price,
            category: req.category,
            release_date: req.release_date,
            product_available: req.product_available,
            stock_quantity: req.stock_quantity,
            image_name: req.image_name,
            image_type: req.image_type,
            image_data: None,
        }
    }
}

impl NewProduct {
    pub fn into_product(self, id: i32) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            brand: self.brand,
            price: self.price,
            category: self.category,
            release_date: self.release_date,
            product_available: self.product_available,
            stock_quantity: self.stock_quantity,
            image_name: self.image_name,
            image_type: self.image_type,
            image_data: self.image_data,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "Keyword", alias = "keyword")]
    pub keyword: String,
}

fn default_available() -> bool {
    true
}

// Date inputs left blank arrive as "".
fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            let date_part = s.split('T').next().unwrap_or(s);
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| STANDARD.decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
