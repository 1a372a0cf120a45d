use icon_atlas_core::prelude::*;
use image::{Rgba, RgbaImage};
use std::collections::{BTreeMap, HashMap};

fn solid(w: u32, h: u32, c: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(c))
}

fn cfg(trim: bool) -> PackerConfig {
    PackerConfig::builder()
        .with_max_dimensions(128, 128)
        .spacing(1)
        .trim_to_bounding_box(trim)
        .build()
}

#[test]
fn pixels_land_at_their_placements() {
    let mut images: HashMap<String, RgbaImage> = HashMap::new();
    images.insert("red".into(), solid(20, 10, [255, 0, 0, 255]));
    images.insert("blue".into(), solid(8, 8, [0, 0, 255, 255]));
    let cfg = cfg(false);
    let pages = create_texture_atlas(&images, &cfg).expect("atlas");
    assert_eq!(pages.len(), 1);
    let ap = &pages[0];
    assert_eq!(ap.dimensions(), (128, 128));
    for (id, color) in [("red", [255, 0, 0, 255]), ("blue", [0, 0, 255, 255])] {
        let r = ap.page.get(&id.to_string()).expect("placed");
        for y in r.y..r.max_y() {
            for x in r.x..r.max_x() {
                assert_eq!(*ap.rgba.get_pixel(x, y), Rgba(color), "{id} at {x},{y}");
            }
        }
    }
    // padding area stays transparent
    assert_eq!(*ap.rgba.get_pixel(127, 127), Rgba([0, 0, 0, 0]));
}

#[test]
fn missing_image_leaves_blank_slot() {
    let cfg = cfg(false);
    let result = pack(
        vec![
            ("present".to_string(), Size::new(10, 10)),
            ("absent".to_string(), Size::new(12, 12)),
        ],
        &cfg,
    )
    .expect("pack");
    let mut images: BTreeMap<String, RgbaImage> = BTreeMap::new();
    images.insert("present".into(), solid(10, 10, [0, 255, 0, 255]));

    let pages = build_atlas_pages(&result, &images, &cfg);
    assert_eq!(pages.len(), 1);
    let ap = &pages[0];
    // slot is still reserved in the uv map
    let absent = *ap.page.get(&"absent".to_string()).expect("slot kept");
    for y in absent.y..absent.max_y() {
        for x in absent.x..absent.max_x() {
            assert_eq!(*ap.rgba.get_pixel(x, y), Rgba([0, 0, 0, 0]));
        }
    }
    let present = ap.page.get(&"present".to_string()).expect("placed");
    assert_eq!(*ap.rgba.get_pixel(present.x, present.y), Rgba([0, 255, 0, 255]));
}

#[test]
fn trimmed_pages_match_bounding_box() {
    let mut images: HashMap<String, RgbaImage> = HashMap::new();
    images.insert("a".into(), solid(30, 20, [1, 1, 1, 255]));
    images.insert("b".into(), solid(10, 5, [2, 2, 2, 255]));
    let pages = create_texture_atlas(&images, &cfg(true)).expect("atlas");
    assert_eq!(pages.len(), 1);
    // a at (0,0) 30x20, b at (31,0) 10x5 -> 41x20
    assert_eq!(pages[0].dimensions(), (41, 20));
    assert_eq!(pages[0].page.bounding_size(), (41, 20));
}

#[test]
fn every_page_is_rasterized() {
    let mut images: HashMap<String, RgbaImage> = HashMap::new();
    for i in 0..5 {
        images.insert(format!("big{i}"), solid(100, 100, [i as u8, 0, 0, 255]));
    }
    let pages = create_texture_atlas(&images, &cfg(true)).expect("atlas");
    assert_eq!(pages.len(), 5);
    for (i, ap) in pages.iter().enumerate() {
        assert_eq!(ap.page.index, i);
        assert_eq!(ap.dimensions(), (100, 100));
    }
}

#[test]
fn empty_result_builds_nothing() {
    let images: HashMap<String, RgbaImage> = HashMap::new();
    let pages = create_texture_atlas(&images, &cfg(false)).expect("atlas");
    assert!(pages.is_empty());
}

#[test]
fn pixel_scale_resizes_placements() {
    let mut images: HashMap<String, RgbaImage> = HashMap::new();
    images.insert("icon".into(), solid(10, 6, [9, 8, 7, 255]));
    let cfg = PackerConfig {
        pixel_scale: 2.0,
        ..cfg(true)
    };
    let pages = create_texture_atlas(&images, &cfg).expect("atlas");
    let r = pages[0].page.get(&"icon".to_string()).expect("placed");
    assert_eq!(r.size(), Size::new(20, 12));
    assert_eq!(*pages[0].rgba.get_pixel(19, 11), Rgba([9, 8, 7, 255]));
}

#[test]
fn uv_rects_are_normalized_to_page_image() {
    let mut images: HashMap<String, RgbaImage> = HashMap::new();
    images.insert("a".into(), solid(64, 32, [1, 2, 3, 4]));
    let pages = create_texture_atlas(&images, &cfg(false)).expect("atlas");
    let uvs = pages[0].uv_rects();
    let uv = uvs["a"];
    assert_eq!(uv.u0, 0.0);
    assert_eq!(uv.v0, 0.0);
    assert!((uv.u1 - 0.5).abs() < f32::EPSILON);
    assert!((uv.v1 - 0.25).abs() < f32::EPSILON);
}

#[test]
fn degenerate_images_get_a_one_pixel_slot() {
    let mut images: HashMap<String, RgbaImage> = HashMap::new();
    images.insert("empty".into(), RgbaImage::new(0, 0));
    images.insert("dot".into(), solid(1, 1, [5, 5, 5, 255]));
    let pages = create_texture_atlas(&images, &cfg(true)).expect("atlas");
    assert_eq!(pages.len(), 1);
    let r = pages[0].page.get(&"empty".to_string()).expect("slot");
    assert_eq!(r.size(), Size::new(1, 1));
}
