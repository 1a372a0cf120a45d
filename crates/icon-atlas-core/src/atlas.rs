use crate::compositing::blit_rgba;
use crate::config::PackerConfig;
use crate::error::Result;
use crate::model::{PackResult, Page, Size, UvRect};
use crate::pipeline::pack;
use image::RgbaImage;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use tracing::{debug, instrument, warn};

/// Lookup of source pixels by identifier.
pub trait ImageSource<K> {
    fn image(&self, id: &K) -> Option<&RgbaImage>;
}

impl<K: Eq + Hash, S: std::hash::BuildHasher> ImageSource<K> for HashMap<K, RgbaImage, S> {
    fn image(&self, id: &K) -> Option<&RgbaImage> {
        self.get(id)
    }
}

impl<K: Ord> ImageSource<K> for BTreeMap<K, RgbaImage> {
    fn image(&self, id: &K) -> Option<&RgbaImage> {
        self.get(id)
    }
}

/// Rasterized page and its logical page record.
pub struct AtlasPage<K = String> {
    pub page: Page<K>,
    pub rgba: RgbaImage,
}

impl<K> AtlasPage<K> {
    /// Dimensions of the rasterized page.
    pub fn dimensions(&self) -> (u32, u32) {
        self.rgba.dimensions()
    }

    /// Identifier to normalized texture coordinates within `rgba`.
    pub fn uv_rects(&self) -> BTreeMap<K, UvRect>
    where
        K: Ord + Clone,
    {
        let (w, h) = self.rgba.dimensions();
        self.page
            .placements
            .iter()
            .map(|p| (p.id.clone(), UvRect::from_rect(&p.rect, w, h)))
            .collect()
    }
}

#[instrument(skip_all)]
/// Rasterizes every page of `result`, copying each identifier's image to its placement.
///
/// Identifiers without a source image keep their slot and stay transparent.
/// With `cfg.trim_to_bounding_box` the page image is cut to the placements'
/// bounding box, otherwise it has the full `max_width x max_height` size.
pub fn build_atlas_pages<K, S>(
    result: &PackResult<K>,
    images: &S,
    cfg: &PackerConfig,
) -> Vec<AtlasPage<K>>
where
    K: Clone + std::fmt::Debug,
    S: ImageSource<K> + ?Sized,
{
    result
        .pages
        .iter()
        .map(|page| {
            let (w, h) = if cfg.trim_to_bounding_box {
                page.bounding_size()
            } else {
                (cfg.max_width, cfg.max_height)
            };
            let mut canvas = RgbaImage::new(w, h);
            for p in &page.placements {
                match images.image(&p.id) {
                    Some(src) => blit_rgba(src, &mut canvas, &p.rect),
                    None => warn!(id = ?p.id, page = page.index, "missing source image, slot left blank"),
                }
            }
            debug!(page = page.index, width = w, height = h, placements = page.len(), "rasterized page");
            AtlasPage {
                page: page.clone(),
                rgba: canvas,
            }
        })
        .collect()
}

/// Packs `images` by their (scaled) dimensions and rasterizes the pages.
///
/// Sizes are `image size * cfg.pixel_scale`, truncated and clamped to 1x1 so
/// empty images still get a slot.
pub fn create_texture_atlas<S>(
    images: &HashMap<String, RgbaImage, S>,
    cfg: &PackerConfig,
) -> Result<Vec<AtlasPage<String>>>
where
    S: std::hash::BuildHasher,
{
    let sizes = images.iter().map(|(id, img)| {
        let (w, h) = img.dimensions();
        (id.clone(), scaled_size(w, h, cfg.pixel_scale))
    });
    let result = pack(sizes, cfg)?;
    Ok(build_atlas_pages(&result, images, cfg))
}

/// Scales a pixel size, truncating and clamping each side to at least 1.
pub fn scaled_size(width: u32, height: u32, scale: f32) -> Size {
    let s = |v: u32| ((v as f64 * scale as f64) as u32).max(1);
    Size::new(s(width), s(height))
}
