use crate::atlas::AtlasPage;
use crate::config::PackerConfig;
use crate::model::{PackResult, UvRect};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Atlas-level metadata written next to the page list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meta {
    /// Schema version of the JSON layout; bumped on breaking changes.
    pub schema_version: String,
    pub app: String,
    pub version: String,
    pub max_size: (u32, u32),
    pub spacing: u32,
    pub algorithm: String,
    pub trim_to_bounding_box: bool,
}

impl Meta {
    pub fn from_config(cfg: &PackerConfig) -> Self {
        Self {
            schema_version: "1".into(),
            app: "icon-atlas".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            max_size: (cfg.max_width, cfg.max_height),
            spacing: cfg.spacing,
            algorithm: cfg.algorithm.as_str().into(),
            trim_to_bounding_box: cfg.trim_to_bounding_box,
        }
    }
}

fn rect_json(r: &crate::model::Rect) -> Value {
    json!({"x": r.x, "y": r.y, "width": r.width, "height": r.height})
}

fn uv_json(uv: &UvRect) -> Value {
    json!({"u0": uv.u0, "v0": uv.v0, "u1": uv.u1, "v1": uv.v1})
}

/// Layout-only export: `{ pages: [{ index, width, height, uvs: { id: rect } }], meta }`.
pub fn to_json<K: ToString>(result: &PackResult<K>, cfg: &PackerConfig) -> Value {
    let pages: Vec<Value> = result
        .pages
        .iter()
        .map(|p| {
            let mut uvs = serde_json::Map::new();
            for pl in &p.placements {
                uvs.insert(pl.id.to_string(), rect_json(&pl.rect));
            }
            json!({
                "index": p.index,
                "width": p.width,
                "height": p.height,
                "uvs": uvs,
            })
        })
        .collect();
    json!({"pages": pages, "meta": Meta::from_config(cfg)})
}

/// Export of rasterized pages. Page size is the image size; each id carries
/// its pixel rect and normalized `uv`. `images` names the page files in order.
pub fn atlas_to_json<K: ToString>(
    pages: &[AtlasPage<K>],
    images: &[String],
    cfg: &PackerConfig,
) -> Value {
    let pages_val: Vec<Value> = pages
        .iter()
        .enumerate()
        .map(|(i, ap)| {
            let (w, h) = ap.dimensions();
            let mut uvs = serde_json::Map::new();
            for pl in &ap.page.placements {
                uvs.insert(
                    pl.id.to_string(),
                    json!({
                        "frame": rect_json(&pl.rect),
                        "uv": uv_json(&UvRect::from_rect(&pl.rect, w, h)),
                    }),
                );
            }
            let image = images
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("page_{}.png", ap.page.index));
            json!({
                "index": ap.page.index,
                "image": image,
                "width": w,
                "height": h,
                "uvs": uvs,
            })
        })
        .collect();
    json!({"pages": pages_val, "meta": Meta::from_config(cfg)})
}
