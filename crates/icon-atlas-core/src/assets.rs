//! Custom icon assets for vector-layer symbols.
//!
//! A provider renders one icon per feature identifier; the icons are packed
//! into trimmed atlas pages and handed back together with their UV rects.

use crate::atlas::{build_atlas_pages, scaled_size};
use crate::config::PackerConfig;
use crate::error::Result;
use crate::model::Rect;
use crate::pipeline::pack;
use image::RgbaImage;
use std::collections::BTreeMap;
use tracing::{instrument, warn};

/// Supplies the icon for a feature of a layer.
pub trait AssetProvider {
    /// Returns `None` if no icon can be produced for the feature.
    fn image_for(&self, feature_id: &str, layer_identifier: &str) -> Option<RgbaImage>;
}

impl<F> AssetProvider for F
where
    F: Fn(&str, &str) -> Option<RgbaImage>,
{
    fn image_for(&self, feature_id: &str, layer_identifier: &str) -> Option<RgbaImage> {
        self(feature_id, layer_identifier)
    }
}

/// One atlas texture and the pixel rect of every feature placed on it.
pub struct AssetInfo {
    pub feature_uvs: BTreeMap<String, Rect>,
    pub texture: RgbaImage,
}

#[instrument(skip(provider, feature_ids, cfg))]
/// Collects icons for `feature_ids` from `provider` and packs them into textures.
///
/// Features the provider cannot render get a transparent 1x1 placeholder so
/// every identifier still resolves to a UV rect. Pages are always trimmed to
/// their bounding box. Repeated identifiers are collapsed.
pub fn custom_assets<P, I, S>(
    provider: &P,
    feature_ids: I,
    layer_identifier: &str,
    cfg: &PackerConfig,
) -> Result<Vec<AssetInfo>>
where
    P: AssetProvider + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut images: BTreeMap<String, RgbaImage> = BTreeMap::new();
    for id in feature_ids {
        let id = id.as_ref();
        if images.contains_key(id) {
            continue;
        }
        let img = provider.image_for(id, layer_identifier).unwrap_or_else(|| {
            warn!(feature = id, "no icon for feature, using placeholder");
            RgbaImage::new(1, 1)
        });
        images.insert(id.to_string(), img);
    }

    let cfg = PackerConfig {
        trim_to_bounding_box: true,
        ..cfg.clone()
    };
    let sizes = images.iter().map(|(id, img)| {
        let (w, h) = img.dimensions();
        (id.clone(), scaled_size(w, h, cfg.pixel_scale))
    });
    let result = pack(sizes, &cfg)?;
    Ok(build_atlas_pages(&result, &images, &cfg)
        .into_iter()
        .map(|p| AssetInfo {
            feature_uvs: p.page.uv_map(),
            texture: p.rgba,
        })
        .collect())
}
