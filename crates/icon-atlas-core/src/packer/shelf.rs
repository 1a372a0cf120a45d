use super::PagePacker;
use crate::model::{Rect, Size};

#[derive(Clone, Copy, Debug)]
struct Shelf {
    y: u32,
    height: u32,
    /// Next free x on this shelf.
    cursor: u32,
}

/// Shelf allocator: rows stacked top to bottom, each filled left to right.
///
/// A shelf takes the height of the footprint that opened it, so feeding
/// footprints in decreasing height keeps rows tight.
pub struct ShelfPacker {
    width: u32,
    height: u32,
    shelves: Vec<Shelf>,
    next_y: u32,
}

impl ShelfPacker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            shelves: Vec::new(),
            next_y: 0,
        }
    }

    fn find_shelf(&self, footprint: Size) -> Option<usize> {
        self.shelves.iter().position(|s| {
            footprint.height <= s.height && s.cursor + footprint.width <= self.width
        })
    }

    fn can_open_shelf(&self, footprint: Size) -> bool {
        footprint.width <= self.width && self.next_y + footprint.height <= self.height
    }

    /// Number of shelves opened so far.
    pub fn num_shelves(&self) -> usize {
        self.shelves.len()
    }
}

impl PagePacker for ShelfPacker {
    fn can_place(&self, footprint: Size) -> bool {
        self.find_shelf(footprint).is_some() || self.can_open_shelf(footprint)
    }

    fn place(&mut self, footprint: Size) -> Option<Rect> {
        if let Some(i) = self.find_shelf(footprint) {
            let shelf = &mut self.shelves[i];
            let slot = Rect::new(shelf.cursor, shelf.y, footprint.width, footprint.height);
            shelf.cursor += footprint.width;
            return Some(slot);
        }
        if !self.can_open_shelf(footprint) {
            return None;
        }
        let slot = Rect::new(0, self.next_y, footprint.width, footprint.height);
        self.shelves.push(Shelf {
            y: self.next_y,
            height: footprint.height,
            cursor: footprint.width,
        });
        self.next_y += footprint.height;
        Some(slot)
    }
}
