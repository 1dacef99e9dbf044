//! Immutable product catalog.
//!
//! Records are deserialized from JSON into a loose wire shape and then
//! validated into [`ProductRecord`]s. Anything ambiguous (empty identifiers,
//! slugs that are not URL-safe, duplicate ids/slugs, measurement strings without a
//! leading number) is rejected at load time so the rest of the engine can rely
//! on well-formed data.

use crate::error::CatalogError;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Catalog bundled with the application.
pub static BUILTIN_CATALOG_JSON: &str = include_str!("../data/bikes.json");

/// A measured value such as `"112.4 Nm"`: leading number plus the remaining unit text.
///
/// The original display text is kept so the presentation layer shows exactly
/// what the catalog author wrote.
#[derive(Clone, Debug, PartialEq)]
pub struct Measure {
    pub value: f32,
    pub unit: String,
    text: String,
}

impl Measure {
    /// Parse `"<number> <unit>"`. Thousands separators in the number are accepted.
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let numeric_end = trimmed
            .char_indices()
            .take_while(|(_, c)| c.is_ascii_digit() || *c == '.' || *c == ',')
            .last()
            .map(|(i, c)| i + c.len_utf8())?;
        let digits: String = trimmed[..numeric_end]
            .chars()
            .filter(|c| *c != ',')
            .collect();
        let value: f32 = digits.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        Some(Self {
            value,
            unit: trimmed[numeric_end..].trim().to_string(),
            text: trimmed.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub cc: u32,
    pub horsepower: f32,
    pub torque: Measure,
    pub top_speed: Measure,
    pub weight: Measure,
    pub price: u32,
    pub year: u16,
    pub description: String,
    pub features: Vec<String>,
    pub model: Option<String>,
}

impl ProductRecord {
    /// Price in thousands, e.g. `₹1049K`.
    pub fn price_label(&self) -> String {
        format!("₹{:.0}K", self.price as f64 / 1000.0)
    }

    /// Asset path if the record references a non-empty one.
    pub fn asset_path(&self) -> Option<&str> {
        self.model.as_deref().filter(|p| !p.trim().is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(u64),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRecord {
    id: WireId,
    slug: String,
    name: String,
    brand: String,
    #[serde(default)]
    category: String,
    cc: f64,
    horsepower: f64,
    torque: String,
    top_speed: String,
    weight: String,
    price: f64,
    year: u16,
    #[serde(default)]
    description: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    model: Option<String>,
}

fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

impl WireRecord {
    fn validate(self) -> Result<ProductRecord, CatalogError> {
        let id = match self.id {
            WireId::Text(s) => s.trim().to_string(),
            WireId::Number(n) => n.to_string(),
        };
        let malformed = |reason: String| CatalogError::Malformed {
            id: id.clone(),
            reason,
        };
        if id.is_empty() {
            return Err(malformed("empty id".into()));
        }
        if !is_url_safe(&self.slug) {
            return Err(malformed(format!("slug {:?} is not URL-safe", self.slug)));
        }
        for (field, value) in [("name", &self.name), ("brand", &self.brand)] {
            if value.trim().is_empty() {
                return Err(malformed(format!("empty {field}")));
            }
        }
        let whole = |field: &str, v: f64| -> Result<u32, CatalogError> {
            if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 {
                Ok(v.round() as u32)
            } else {
                Err(malformed(format!("{field} out of range: {v}")))
            }
        };
        let cc = whole("cc", self.cc)?;
        let price = whole("price", self.price)?;
        if !self.horsepower.is_finite() || self.horsepower < 0.0 {
            return Err(malformed(format!("horsepower out of range: {}", self.horsepower)));
        }
        let measure = |field: &str, text: &str| {
            Measure::parse(text).ok_or_else(|| malformed(format!("{field} {text:?} has no value")))
        };
        let torque = measure("torque", &self.torque)?;
        let top_speed = measure("topSpeed", &self.top_speed)?;
        let weight = measure("weight", &self.weight)?;

        Ok(ProductRecord {
            id: id.clone(),
            slug: self.slug,
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            category: self.category,
            cc,
            horsepower: self.horsepower as f32,
            torque,
            top_speed,
            weight,
            price,
            year: self.year,
            description: self.description,
            features: self.features,
            model: self.model.filter(|m| !m.trim().is_empty()),
        })
    }
}

/// Read-only list of products with id and slug indices.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    records: Vec<ProductRecord>,
    by_id: FnvHashMap<String, usize>,
    by_slug: FnvHashMap<String, usize>,
}

impl CatalogStore {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let wire: Vec<WireRecord> = serde_json::from_str(json)?;
        let records = wire
            .into_iter()
            .map(WireRecord::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_records(records)
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    pub fn from_records(records: Vec<ProductRecord>) -> Result<Self, CatalogError> {
        let mut by_id = FnvHashMap::default();
        let mut by_slug = FnvHashMap::default();
        for (i, r) in records.iter().enumerate() {
            if by_id.insert(r.id.clone(), i).is_some() {
                return Err(CatalogError::Duplicate {
                    field: "id",
                    value: r.id.clone(),
                });
            }
            if by_slug.insert(r.slug.clone(), i).is_some() {
                return Err(CatalogError::Duplicate {
                    field: "slug",
                    value: r.slug.clone(),
                });
            }
        }
        log::info!("[catalog] loaded {} records", records.len());
        Ok(Self {
            records,
            by_id,
            by_slug,
        })
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProductRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn by_slug(&self, slug: &str) -> Option<&ProductRecord> {
        self.by_slug.get(slug).map(|&i| &self.records[i])
    }

    /// Slug lookup that reports a miss as [`CatalogError::RecordNotFound`].
    pub fn find(&self, slug: &str) -> Result<&ProductRecord, CatalogError> {
        self.by_slug(slug)
            .ok_or_else(|| CatalogError::RecordNotFound(slug.to_string()))
    }
}
