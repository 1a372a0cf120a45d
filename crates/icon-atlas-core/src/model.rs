use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Footprint of an input rectangle before placement (pixels).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }
    /// True if either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `width,height` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
    /// Exclusive right edge (`x + width`).
    pub fn max_x(&self) -> u32 {
        self.x + self.width
    }
    /// Exclusive bottom edge (`y + height`).
    pub fn max_y(&self) -> u32 {
        self.y + self.height
    }
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
    pub fn area(&self) -> u64 {
        (self.width as u64) * (self.height as u64)
    }
    /// Returns true if `r` lies fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.max_x() <= self.max_x() && r.max_y() <= self.max_y()
    }
    /// Returns true if the interiors of both rectangles overlap.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.x >= r.max_x() || r.x >= self.max_x() || self.y >= r.max_y() || r.y >= self.max_y())
    }
    /// The rectangle grown by `by` pixels on the right and bottom edges.
    pub fn expand(&self, by: u32) -> Rect {
        Rect::new(self.x, self.y, self.width + by, self.height + by)
    }
}

/// Normalized texture coordinates (0.0..=1.0) of a placement within a page image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UvRect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl UvRect {
    /// Converts a pixel rect into UVs for a page of `page_width x page_height`.
    pub fn from_rect(rect: &Rect, page_width: u32, page_height: u32) -> Self {
        let pw = page_width.max(1) as f32;
        let ph = page_height.max(1) as f32;
        Self {
            u0: rect.x as f32 / pw,
            v0: rect.y as f32 / ph,
            u1: rect.max_x() as f32 / pw,
            v1: rect.max_y() as f32 / ph,
        }
    }
}

/// One identifier placed on a page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement<K = String> {
    pub id: K,
    /// Top-left position and original size within the page.
    pub rect: Rect,
}

/// A single packed page (logical record).
///
/// `width`/`height` are the page bounds the packer worked against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<K = String> {
    pub index: usize,
    pub width: u32,
    pub height: u32,
    pub placements: Vec<Placement<K>>,
}

impl<K> Page<K> {
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Tight bounding size `(max(x + width), max(y + height))` of the placements.
    pub fn bounding_size(&self) -> (u32, u32) {
        self.placements.iter().fold((0, 0), |(w, h), p| {
            (w.max(p.rect.max_x()), h.max(p.rect.max_y()))
        })
    }

    pub fn get(&self, id: &K) -> Option<&Rect>
    where
        K: PartialEq,
    {
        self.placements.iter().find(|p| &p.id == id).map(|p| &p.rect)
    }

    /// Identifier to pixel rect, ordered by identifier.
    pub fn uv_map(&self) -> BTreeMap<K, Rect>
    where
        K: Ord + Clone,
    {
        self.placements
            .iter()
            .map(|p| (p.id.clone(), p.rect))
            .collect()
    }
}

/// Output of a packing run: pages in the order they were opened.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackResult<K = String> {
    pub pages: Vec<Page<K>>,
}

impl<K> Default for PackResult<K> {
    fn default() -> Self {
        Self { pages: Vec::new() }
    }
}

impl<K> PackResult<K> {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of placements over all pages.
    pub fn num_placements(&self) -> usize {
        self.pages.iter().map(|p| p.placements.len()).sum()
    }

    /// Finds the page index and rect of `id`.
    pub fn locate(&self, id: &K) -> Option<(usize, Rect)>
    where
        K: PartialEq,
    {
        self.pages
            .iter()
            .find_map(|p| p.get(id).map(|r| (p.index, *r)))
    }

    /// Computes packing statistics over the full page bounds.
    pub fn stats(&self) -> PackStats {
        let mut stats = PackStats {
            num_pages: self.pages.len(),
            ..PackStats::default()
        };
        for page in &self.pages {
            stats.total_page_area += (page.width as u64) * (page.height as u64);
            for p in &page.placements {
                stats.num_placements += 1;
                stats.used_area += p.rect.area();
            }
        }
        stats.occupancy = if stats.total_page_area > 0 {
            stats.used_area as f64 / stats.total_page_area as f64
        } else {
            0.0
        };
        stats
    }
}

/// Statistics about packing efficiency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct PackStats {
    pub num_pages: usize,
    pub num_placements: usize,
    /// Sum of width * height over all pages.
    pub total_page_area: u64,
    /// Sum of width * height over all placements (spacing excluded).
    pub used_area: u64,
    /// used_area / total_page_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl PackStats {
    pub fn summary(&self) -> String {
        format!(
            "Pages: {}, Placements: {}, Occupancy: {:.2}%, Total Area: {} px², Used Area: {} px²",
            self.num_pages,
            self.num_placements,
            self.occupancy * 100.0,
            self.total_page_area,
            self.used_area,
        )
    }

    pub fn wasted_area(&self) -> u64 {
        self.total_page_area.saturating_sub(self.used_area)
    }

    pub fn waste_percentage(&self) -> f64 {
        if self.total_page_area > 0 {
            (self.wasted_area() as f64 / self.total_page_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
