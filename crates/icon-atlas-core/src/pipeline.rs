use crate::config::{PackerConfig, SortOrder};
use crate::error::{AtlasError, Result};
use crate::model::{PackResult, Page, Placement, Rect, Size};
use crate::packer::{PagePacker, new_page_packer};
use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, instrument};

struct OpenPage<K> {
    packer: Box<dyn PagePacker>,
    placements: Vec<Placement<K>>,
}

#[instrument(skip_all)]
/// Packs `(id, size)` pairs into pages of at most `cfg.max_width x cfg.max_height`.
///
/// Notes:
/// - Inputs are put into a canonical order (`cfg.sort_order`, ties by id) so
///   the layout does not depend on the iteration order of a hash map.
/// - Every input reserves `(width + spacing) x (height + spacing)`; the
///   returned rects keep the original size.
/// - Pages are tried in the order they were opened; a new page is opened only
///   when no existing page accepts the rectangle.
/// - Empty input returns an empty result.
pub fn pack<K, I>(inputs: I, cfg: &PackerConfig) -> Result<PackResult<K>>
where
    K: Ord + Hash + Clone + ToString,
    I: IntoIterator<Item = (K, Size)>,
{
    cfg.validate()?;

    let mut seen: HashSet<K> = HashSet::new();
    let mut items: Vec<(K, Size)> = Vec::new();
    for (id, size) in inputs {
        if size.is_empty() {
            return Err(AtlasError::EmptyRectangle(id.to_string()));
        }
        if !seen.insert(id.clone()) {
            return Err(AtlasError::DuplicateId(id.to_string()));
        }
        items.push((id, size));
    }
    sort_items(&mut items, cfg.sort_order);

    let mut open: Vec<OpenPage<K>> = Vec::new();
    for (id, size) in items {
        // saturated footprints stay above any page bound; overflow is checked below
        let footprint = Size::new(
            size.width.saturating_add(cfg.spacing),
            size.height.saturating_add(cfg.spacing),
        );
        let overflows = size.width.checked_add(cfg.spacing).is_none()
            || size.height.checked_add(cfg.spacing).is_none();
        let too_large = || AtlasError::RectangleTooLarge {
            id: id.to_string(),
            width: footprint.width,
            height: footprint.height,
            max_width: cfg.max_width,
            max_height: cfg.max_height,
        };
        if overflows || footprint.width > cfg.max_width || footprint.height > cfg.max_height {
            return Err(too_large());
        }

        let slot = open
            .iter_mut()
            .enumerate()
            .find(|(_, page)| page.packer.can_place(footprint))
            .and_then(|(page_idx, page)| page.packer.place(footprint).map(|s| (page_idx, s)));
        let (page_idx, s) = match slot {
            Some(found) => found,
            None => {
                let mut page = OpenPage {
                    packer: new_page_packer(cfg),
                    placements: Vec::new(),
                };
                let s = page.packer.place(footprint).ok_or_else(too_large)?;
                debug!(page = open.len(), "opened page");
                open.push(page);
                (open.len() - 1, s)
            }
        };
        open[page_idx].placements.push(Placement {
            id,
            rect: Rect::new(s.x, s.y, size.width, size.height),
        });
    }

    let pages = open
        .into_iter()
        .enumerate()
        .map(|(index, p)| Page {
            index,
            width: cfg.max_width,
            height: cfg.max_height,
            placements: p.placements,
        })
        .collect::<Vec<_>>();
    debug!(pages = pages.len(), "packing finished");
    Ok(PackResult { pages })
}

fn sort_items<K: Ord>(items: &mut [(K, Size)], order: SortOrder) {
    match order {
        SortOrder::None => {}
        SortOrder::IdAsc => items.sort_by(|a, b| a.0.cmp(&b.0)),
        SortOrder::HeightDesc => items.sort_by(|a, b| {
            b.1.height
                .cmp(&a.1.height)
                .then_with(|| b.1.width.cmp(&a.1.width))
                .then_with(|| a.0.cmp(&b.0))
        }),
        SortOrder::AreaDesc => items.sort_by(|a, b| {
            b.1.area()
                .cmp(&a.1.area())
                .then_with(|| a.0.cmp(&b.0))
        }),
        SortOrder::MaxSideDesc => items.sort_by(|a, b| {
            b.1.width
                .max(b.1.height)
                .cmp(&a.1.width.max(a.1.height))
                .then_with(|| a.0.cmp(&b.0))
        }),
        SortOrder::WidthDesc => items.sort_by(|a, b| {
            b.1.width
                .cmp(&a.1.width)
                .then_with(|| b.1.height.cmp(&a.1.height))
                .then_with(|| a.0.cmp(&b.0))
        }),
    }
}
