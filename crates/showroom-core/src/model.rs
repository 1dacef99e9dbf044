//! Record to renderable model resolution.

use crate::asset;
use crate::catalog::ProductRecord;
use crate::constants::{hex_to_linear, BRAND_ACCENTS, DEFAULT_ACCENT_HEX};
use crate::error::AssetError;
use crate::mesh::MeshData;
use fnv::FnvHashSet;

/// Brand accent as 0xRRGGBB. Brand matching ignores case; unknown brands get the default accent.
pub fn brand_accent(brand: &str) -> u32 {
    let brand = brand.trim();
    BRAND_ACCENTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(brand))
        .map_or(DEFAULT_ACCENT_HEX, |&(_, hex)| hex)
}

/// Accent color in linear RGB.
pub fn brand_accent_linear(brand: &str) -> [f32; 3] {
    hex_to_linear(brand_accent(brand))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelDescriptor {
    ExternalAsset { path: String },
    ProceduralPlaceholder { accent: u32 },
}

/// Outcome of an external asset resolution.
#[derive(Debug)]
pub enum Resolution {
    Resolved(MeshData),
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Decides which model a record should show and remembers assets that failed.
#[derive(Debug, Default)]
pub struct ModelResolver {
    fallback_asset: Option<String>,
    failed: FnvHashSet<String>,
}

impl ModelResolver {
    pub fn new(fallback_asset: Option<String>) -> Self {
        Self {
            fallback_asset: fallback_asset.filter(|p| !p.trim().is_empty()),
            failed: FnvHashSet::default(),
        }
    }

    /// External asset when one applies and has not failed before, else the placeholder.
    pub fn resolve(&self, record: &ProductRecord) -> ModelDescriptor {
        match record.asset_path().or(self.fallback_asset.as_deref()) {
            Some(path) if !self.failed.contains(path) => ModelDescriptor::ExternalAsset {
                path: path.to_string(),
            },
            _ => Self::placeholder(record),
        }
    }

    pub fn placeholder(record: &ProductRecord) -> ModelDescriptor {
        ModelDescriptor::ProceduralPlaceholder {
            accent: brand_accent(&record.brand),
        }
    }

    pub fn has_failed(&self, path: &str) -> bool {
        self.failed.contains(path)
    }

    /// Turn fetched bytes (or a fetch failure) into a [`Resolution`].
    ///
    /// Failures are logged and the path is never offered again.
    pub fn finish(&mut self, path: &str, fetched: Result<Vec<u8>, AssetError>) -> Resolution {
        match fetched.and_then(|bytes| asset::decode_glb(path, &bytes)) {
            Ok(mesh) => {
                log::info!(
                    "[asset] resolved {path}: {} triangles",
                    mesh.triangle_count()
                );
                Resolution::Resolved(mesh)
            }
            Err(err) => {
                log::warn!("[asset] {err}; keeping placeholder");
                self.failed.insert(path.to_string());
                Resolution::Unresolved
            }
        }
    }
}
