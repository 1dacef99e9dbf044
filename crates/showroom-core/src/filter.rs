use crate::catalog::{CatalogStore, ProductRecord};
use std::fmt;

/// Brands offered by the selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Brand {
    Yamaha,
    Honda,
    Kawasaki,
    Ducati,
    Bmw,
}

impl Brand {
    pub const ALL: [Brand; 5] = [
        Brand::Yamaha,
        Brand::Honda,
        Brand::Kawasaki,
        Brand::Ducati,
        Brand::Bmw,
    ];

    /// Name as it appears in catalog records.
    pub fn name(self) -> &'static str {
        match self {
            Brand::Yamaha => "Yamaha",
            Brand::Honda => "Honda",
            Brand::Kawasaki => "Kawasaki",
            Brand::Ducati => "Ducati",
            Brand::Bmw => "BMW",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BrandFilter {
    #[default]
    All,
    Only(Brand),
}

impl BrandFilter {
    /// Selector entries in display order.
    pub const OPTIONS: [BrandFilter; 6] = [
        BrandFilter::All,
        BrandFilter::Only(Brand::Yamaha),
        BrandFilter::Only(Brand::Honda),
        BrandFilter::Only(Brand::Kawasaki),
        BrandFilter::Only(Brand::Ducati),
        BrandFilter::Only(Brand::Bmw),
    ];

    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("all") {
            return Some(BrandFilter::All);
        }
        Brand::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(label))
            .map(BrandFilter::Only)
    }

    pub fn label(self) -> &'static str {
        match self {
            BrandFilter::All => "All",
            BrandFilter::Only(b) => b.name(),
        }
    }

    pub fn matches(self, record: &ProductRecord) -> bool {
        match self {
            BrandFilter::All => true,
            BrandFilter::Only(b) => record.brand == b.name(),
        }
    }
}

impl fmt::Display for BrandFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub brand: BrandFilter,
    pub query: String,
}

impl FilterCriteria {
    pub fn new(brand: BrandFilter, query: impl Into<String>) -> Self {
        Self {
            brand,
            query: query.into(),
        }
    }

    pub fn matches(&self, record: &ProductRecord) -> bool {
        self.brand.matches(record) && query_matches(&self.query.to_lowercase(), record)
    }
}

#[inline]
fn query_matches(query_lower: &str, record: &ProductRecord) -> bool {
    query_lower.is_empty()
        || record.name.to_lowercase().contains(query_lower)
        || record.brand.to_lowercase().contains(query_lower)
}

/// Records passing a [`FilterCriteria`], borrowed from the catalog in catalog order.
#[derive(Clone, Debug)]
pub struct FilteredView<'a> {
    records: Vec<&'a ProductRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a ProductRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a ProductRecord> {
        self.records.get(index).copied()
    }

    pub fn slugs(&self) -> Vec<String> {
        self.records.iter().map(|r| r.slug.clone()).collect()
    }

    /// Record owning the scroll section under `scroll_fraction`.
    ///
    /// The page is split into `len()` equal sections; the last section also
    /// owns fraction 1.0.
    pub fn focused_by_scroll(&self, scroll_fraction: f32) -> Option<&'a ProductRecord> {
        focus_index(self.len(), scroll_fraction).and_then(|i| self.get(i))
    }
}

/// Index of the scroll section containing `scroll_fraction`, `None` for an empty list.
pub fn focus_index(len: usize, scroll_fraction: f32) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let f = if scroll_fraction.is_finite() {
        scroll_fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    Some(((f * len as f32).floor() as usize).min(len - 1))
}

/// Pure filter over the catalog: brand AND case-insensitive name/brand substring.
pub fn filter<'a>(catalog: &'a CatalogStore, criteria: &FilterCriteria) -> FilteredView<'a> {
    let query_lower = criteria.query.to_lowercase();
    let records = catalog
        .records()
        .iter()
        .filter(|r| criteria.brand.matches(r) && query_matches(&query_lower, r))
        .collect();
    FilteredView { records }
}
