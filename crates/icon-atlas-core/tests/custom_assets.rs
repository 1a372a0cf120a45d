use icon_atlas_core::prelude::*;
use image::{Rgba, RgbaImage};

struct PinProvider;

impl AssetProvider for PinProvider {
    fn image_for(&self, feature_id: &str, layer_identifier: &str) -> Option<RgbaImage> {
        assert_eq!(layer_identifier, "pins");
        match feature_id {
            "unknown" => None,
            "wide" => Some(RgbaImage::from_pixel(24, 8, Rgba([0, 0, 255, 255]))),
            _ => Some(RgbaImage::from_pixel(16, 16, Rgba([255, 0, 0, 255]))),
        }
    }
}

#[test]
fn every_feature_gets_a_uv_rect() {
    let cfg = PackerConfig::builder().with_max_dimensions(256, 256).build();
    let assets = custom_assets(&PinProvider, ["a", "b", "wide", "unknown"], "pins", &cfg)
        .expect("assets");
    assert_eq!(assets.len(), 1);
    let info = &assets[0];
    assert_eq!(info.feature_uvs.len(), 4);
    assert_eq!(info.feature_uvs["unknown"].size(), Size::new(1, 1));
    assert_eq!(info.feature_uvs["wide"].size(), Size::new(24, 8));

    // texture is cut to the bounding box of the placements
    let (w, h) = info.texture.dimensions();
    let max_x = info.feature_uvs.values().map(|r| r.max_x()).max().unwrap_or(0);
    let max_y = info.feature_uvs.values().map(|r| r.max_y()).max().unwrap_or(0);
    assert_eq!((w, h), (max_x, max_y));

    let a = info.feature_uvs["a"];
    assert_eq!(*info.texture.get_pixel(a.x, a.y), Rgba([255, 0, 0, 255]));
}

#[test]
fn repeated_features_are_collapsed() {
    let cfg = PackerConfig::default();
    let assets = custom_assets(&PinProvider, vec!["a", "a", "b"], "pins", &cfg).expect("assets");
    assert_eq!(assets[0].feature_uvs.len(), 2);
}

#[test]
fn closures_act_as_providers() {
    let provider = |id: &str, _layer: &str| {
        (id != "skip").then(|| RgbaImage::from_pixel(4, 4, Rgba([7, 7, 7, 255])))
    };
    let cfg = PackerConfig::builder()
        .with_max_dimensions(8, 8)
        .build();
    // four 4x4 icons fill an 8x8 page, the placeholder spills onto a second one
    let ids = ["a", "b", "c", "d", "skip"];
    let assets = custom_assets(&provider, ids, "layer", &cfg).expect("assets");
    assert_eq!(assets.len(), 2);
    let total: usize = assets.iter().map(|a| a.feature_uvs.len()).sum();
    assert_eq!(total, 5);
}

#[test]
fn oversized_icon_fails_the_call() {
    let provider = |_: &str, _: &str| Some(RgbaImage::new(64, 64));
    let cfg = PackerConfig::builder().with_max_dimensions(32, 32).build();
    let err = custom_assets(&provider, ["big"], "layer", &cfg)
        .err()
        .expect("must fail");
    assert!(matches!(err, AtlasError::RectangleTooLarge { ref id, .. } if id == "big"));
}
