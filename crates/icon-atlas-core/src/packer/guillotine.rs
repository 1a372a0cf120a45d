use super::PagePacker;
use crate::model::{Rect, Size};

/// Guillotine allocator: keeps a list of free rectangles, places into the one
/// with the best area fit and splits the leftover along the shorter axis.
pub struct GuillotinePacker {
    free: Vec<Rect>,
}

impl GuillotinePacker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            free: vec![Rect::new(0, 0, width, height)],
        }
    }

    /// (area fit, short side fit); lower is better.
    fn score(fr: &Rect, w: u32, h: u32) -> (u64, u32) {
        let area_fit = fr.area() - (w as u64) * (h as u64);
        let short_fit = (fr.width - w).min(fr.height - h);
        (area_fit, short_fit)
    }

    fn choose(&self, w: u32, h: u32) -> Option<usize> {
        let mut best: Option<(usize, (u64, u32))> = None;
        for (i, fr) in self.free.iter().enumerate() {
            if fr.width < w || fr.height < h {
                continue;
            }
            let s = Self::score(fr, w, h);
            if best.is_none_or(|(_, bs)| s < bs) {
                best = Some((i, s));
            }
        }
        best.map(|(i, _)| i)
    }

    fn split(fr: &Rect, placed: &Rect) -> (Option<Rect>, Option<Rect>) {
        let w_right = fr.max_x() - placed.max_x();
        let h_bottom = fr.max_y() - placed.max_y();

        // shorter leftover axis
        let split_horizontal = h_bottom < w_right;

        let mut bottom = Rect::new(fr.x, placed.max_y(), 0, h_bottom);
        let mut right = Rect::new(placed.max_x(), fr.y, w_right, 0);
        if split_horizontal {
            bottom.width = fr.width;
            right.height = placed.height;
        } else {
            bottom.width = placed.width;
            right.height = fr.height;
        }
        let keep = |r: Rect| (r.width > 0 && r.height > 0).then_some(r);
        (keep(bottom), keep(right))
    }

    fn prune_free_list(&mut self) {
        let mut i = 0;
        while i < self.free.len() {
            let a = self.free[i];
            let mut remove_i = false;
            let mut j = i + 1;
            while j < self.free.len() {
                let b = self.free[j];
                if b.contains(&a) {
                    remove_i = true;
                    break;
                }
                if a.contains(&b) {
                    self.free.remove(j);
                    continue;
                }
                j += 1;
            }
            if remove_i {
                self.free.remove(i);
            } else {
                i += 1;
            }
        }
    }

    fn merge_free_list(&mut self) {
        let mut merged = true;
        while merged {
            merged = false;
            'outer: for i in 0..self.free.len() {
                for j in i + 1..self.free.len() {
                    let a = self.free[i];
                    let b = self.free[j];
                    let joined = if a.y == b.y && a.height == b.height && a.max_x() == b.x {
                        Some(Rect::new(a.x, a.y, a.width + b.width, a.height))
                    } else if a.y == b.y && a.height == b.height && b.max_x() == a.x {
                        Some(Rect::new(b.x, a.y, a.width + b.width, a.height))
                    } else if a.x == b.x && a.width == b.width && a.max_y() == b.y {
                        Some(Rect::new(a.x, a.y, a.width, a.height + b.height))
                    } else if a.x == b.x && a.width == b.width && b.max_y() == a.y {
                        Some(Rect::new(a.x, b.y, a.width, a.height + b.height))
                    } else {
                        None
                    };
                    if let Some(r) = joined {
                        self.free[i] = r;
                        self.free.remove(j);
                        merged = true;
                        break 'outer;
                    }
                }
            }
        }
    }
}

impl PagePacker for GuillotinePacker {
    fn can_place(&self, footprint: Size) -> bool {
        self.choose(footprint.width, footprint.height).is_some()
    }

    fn place(&mut self, footprint: Size) -> Option<Rect> {
        let idx = self.choose(footprint.width, footprint.height)?;
        let fr = self.free.swap_remove(idx);
        let placed = Rect::new(fr.x, fr.y, footprint.width, footprint.height);
        let (a, b) = Self::split(&fr, &placed);
        self.free.extend(a);
        self.free.extend(b);
        self.prune_free_list();
        self.merge_free_list();
        Some(placed)
    }
}
