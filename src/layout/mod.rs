use ratatui::prelude::Rect;
use std::collections::BTreeMap;

/// Clickable regions registered during render, looked up on mouse input.
#[derive(Debug, Clone)]
pub struct RegionMap<T: Copy + Eq + Ord> {
    regions: BTreeMap<T, Rect>,
}

impl<T: Copy + Eq + Ord> Default for RegionMap<T> {
    fn default() -> Self {
        Self {
            regions: BTreeMap::new(),
        }
    }
}

impl<T: Copy + Eq + Ord> RegionMap<T> {
    pub fn ids(&self) -> Vec<T> {
        self.regions.keys().copied().collect()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn set(&mut self, id: T, rect: Rect) {
        self.regions.insert(id, rect);
    }

    pub fn get(&self, id: T) -> Option<Rect> {
        self.regions.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// First region containing the cell. Regions are expected not to overlap.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<T> {
        self.regions
            .iter()
            .find(|(_, rect)| rect_contains(**rect, column, row))
            .map(|(id, _)| *id)
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

/// Split `len` cells into `parts` runs, spreading the remainder over the
/// first runs. Returns (offset, length) pairs.
pub fn even_split(len: u16, parts: u16) -> Vec<(u16, u16)> {
    if parts == 0 {
        return Vec::new();
    }
    let base = len / parts;
    let extra = len % parts;
    let mut offset = 0;
    (0..parts)
        .map(|idx| {
            let size = base + u16::from(idx < extra);
            let run = (offset, size);
            offset += size;
            run
        })
        .collect()
}
