use crate::{foundation::core::DrawRect, foundation::random::RandomSource};

/// Redraws allowed before falling back to the next index. Only a degenerate random source
/// ever gets this far.
const MAX_REDRAWS: usize = 64;

/// Picks the drawing rectangle for each new pattern.
///
/// With more than one rectangle the previous pick is never repeated: two rectangles strictly
/// alternate, three or more are drawn uniformly until the draw differs from the previous one.
#[derive(Clone, Debug)]
pub struct RegionSelector {
    rects: Vec<DrawRect>,
    last: Option<usize>,
}

impl RegionSelector {
    /// Selector over `rects`, with no previous pick.
    pub fn new(rects: Vec<DrawRect>) -> Self {
        Self { rects, last: None }
    }

    /// Number of configured rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Whether no rectangles are configured.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Index chosen by the previous [`RegionSelector::select`].
    pub fn last_index(&self) -> Option<usize> {
        self.last
    }

    /// Choose the next rectangle. `None` when no rectangles are configured.
    pub fn select(&mut self, rng: &mut dyn RandomSource) -> Option<(usize, DrawRect)> {
        let index = match self.rects.len() {
            0 => return None,
            1 => 0,
            2 => match self.last {
                Some(1) => 0,
                _ => 1,
            },
            n => self.draw_distinct(n, rng),
        };
        self.last = Some(index);
        Some((index, self.rects[index]))
    }

    fn draw_distinct(&self, n: usize, rng: &mut dyn RandomSource) -> usize {
        let Some(last) = self.last else {
            return rng.next_index(n);
        };
        for _ in 0..MAX_REDRAWS {
            let i = rng.next_index(n);
            if i != last {
                return i;
            }
        }
        (last + 1) % n
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/region.rs"]
mod tests;
