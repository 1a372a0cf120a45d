use crate::config::{Algorithm, PackerConfig};
use crate::model::{Rect, Size};

pub mod guillotine;
pub mod shelf;

pub use guillotine::GuillotinePacker;
pub use shelf::ShelfPacker;

/// A page-level allocator.
///
/// Footprints passed in already include the spacing gap. Implementations must
/// return disjoint slots lying fully inside the page, or `None` if the
/// footprint no longer fits on this page.
pub trait PagePacker {
    fn can_place(&self, footprint: Size) -> bool;
    fn place(&mut self, footprint: Size) -> Option<Rect>;
}

/// Creates an empty page allocator for the configured algorithm.
pub fn new_page_packer(cfg: &PackerConfig) -> Box<dyn PagePacker> {
    match cfg.algorithm {
        Algorithm::Shelf => Box::new(ShelfPacker::new(cfg.max_width, cfg.max_height)),
        Algorithm::Guillotine => Box::new(GuillotinePacker::new(cfg.max_width, cfg.max_height)),
    }
}
